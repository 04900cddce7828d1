use super::commission::{CommissionResult, CommissionStatus, Tier};
use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Period {
    pub year: i32,
    pub month: u32,
}

impl Period {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Persisted outcome of one commission computation.
///
/// Records are historical: once appended to a store they are never rewritten,
/// and reports only ever sum them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionRecord {
    /// Name of the lead the shipments were attributed to.
    pub lead: String,
    /// Year of the month the commission is attributed to.
    pub year: i32,
    /// Month the commission is attributed to (1-12).
    pub month: u32,
    pub shipments: u64,
    pub rate: Decimal,
    pub total_commission: Decimal,
    pub tier: Tier,
    pub status: CommissionStatus,
    /// Reference date the commission was computed for.
    pub processed_at: NaiveDate,
    /// Whether the lead was found in the contact directory while processing.
    pub crm_matched: bool,
}

impl CommissionRecord {
    /// Builds a record from an engine result. Deferred commissions are
    /// attributed to the month after the reference date.
    pub fn new(
        lead: &str,
        shipments: u64,
        result: &CommissionResult,
        reference: NaiveDate,
        crm_matched: bool,
    ) -> Self {
        let mut period = Period::of(reference);
        if result.status == CommissionStatus::NextMonth {
            period = period.next();
        }

        Self {
            lead: lead.to_string(),
            year: period.year,
            month: period.month,
            shipments,
            rate: result.rate,
            total_commission: result.total_commission,
            tier: result.tier,
            status: result.status,
            processed_at: reference,
            crm_matched,
        }
    }

    pub fn period(&self) -> Period {
        Period {
            year: self.year,
            month: self.month,
        }
    }
}
