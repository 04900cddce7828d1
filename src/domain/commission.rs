use crate::error::{CommissionError, Result};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Leads affiliated on or after this day of the month have their first-month
/// commission recognised in the following month.
pub const NEXT_MONTH_CUTOFF_DAY: u32 = 21;

/// Shipment band a lead reached in a month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "5-29")]
    Five,
    #[serde(rename = "30-99")]
    Thirty,
    #[serde(rename = "100-299")]
    Hundred,
    #[serde(rename = "300+")]
    ThreeHundred,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::None => "none",
            Tier::Five => "5-29",
            Tier::Thirty => "30-99",
            Tier::Hundred => "100-299",
            Tier::ThreeHundred => "300+",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a computed commission is paid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommissionStatus {
    Full,
    Half,
    NextMonth,
    None,
}

impl CommissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommissionStatus::Full => "full",
            CommissionStatus::Half => "half",
            CommissionStatus::NextMonth => "next_month",
            CommissionStatus::None => "none",
        }
    }
}

impl fmt::Display for CommissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommissionStatus {
    type Err = CommissionError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "full" => Ok(CommissionStatus::Full),
            "half" => Ok(CommissionStatus::Half),
            "next_month" => Ok(CommissionStatus::NextMonth),
            "none" => Ok(CommissionStatus::None),
            other => Err(CommissionError::InvalidInput(format!(
                "unknown commission status '{}'",
                other
            ))),
        }
    }
}

/// One row of a tier table: reaching `threshold` shipments awards `award`.
#[derive(Debug, Clone, Copy)]
struct TierStep {
    threshold: u64,
    tier: Tier,
    award: Decimal,
}

const FIRST_MONTH_TIERS: [TierStep; 4] = [
    TierStep {
        threshold: 5,
        tier: Tier::Five,
        award: dec!(5),
    },
    TierStep {
        threshold: 30,
        tier: Tier::Thirty,
        award: dec!(30),
    },
    TierStep {
        threshold: 100,
        tier: Tier::Hundred,
        award: dec!(100),
    },
    TierStep {
        threshold: 300,
        tier: Tier::ThreeHundred,
        award: dec!(300),
    },
];

const SECOND_MONTH_TIERS: [TierStep; 4] = [
    TierStep {
        threshold: 5,
        tier: Tier::Five,
        award: dec!(2.5),
    },
    TierStep {
        threshold: 30,
        tier: Tier::Thirty,
        award: dec!(15),
    },
    TierStep {
        threshold: 100,
        tier: Tier::Hundred,
        award: dec!(50),
    },
    TierStep {
        threshold: 300,
        tier: Tier::ThreeHundred,
        award: dec!(150),
    },
];

/// Position of the reference month relative to the affiliation month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    BeforeAffiliation,
    FirstMonth,
    SecondMonth,
    Expired,
}

impl Phase {
    pub fn from_months(months: i32) -> Self {
        match months {
            m if m < 0 => Phase::BeforeAffiliation,
            0 => Phase::FirstMonth,
            1 => Phase::SecondMonth,
            _ => Phase::Expired,
        }
    }

    /// Per-shipment rate advertised for the phase.
    pub fn rate(&self) -> Decimal {
        match self {
            Phase::FirstMonth => dec!(1),
            Phase::SecondMonth => dec!(0.5),
            Phase::BeforeAffiliation | Phase::Expired => Decimal::ZERO,
        }
    }

    fn tiers(&self) -> &'static [TierStep] {
        match self {
            Phase::FirstMonth => &FIRST_MONTH_TIERS,
            Phase::SecondMonth => &SECOND_MONTH_TIERS,
            Phase::BeforeAffiliation | Phase::Expired => &[],
        }
    }
}

/// Outcome of a commission computation for one lead and one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionResult {
    pub tier: Tier,
    pub rate: Decimal,
    pub total_commission: Decimal,
    pub status: CommissionStatus,
    pub months_since_affiliation: i32,
}

impl CommissionResult {
    fn no_commission(months_since_affiliation: i32) -> Self {
        Self {
            tier: Tier::None,
            rate: Decimal::ZERO,
            total_commission: Decimal::ZERO,
            status: CommissionStatus::None,
            months_since_affiliation,
        }
    }
}

/// Calendar month difference between two dates, ignoring the day of month.
pub fn months_between(affiliation: NaiveDate, reference: NaiveDate) -> i32 {
    (reference.year() - affiliation.year()) * 12
        + (reference.month() as i32 - affiliation.month() as i32)
}

/// Rejects negative shipment counts.
pub fn validate_shipments(shipment_count: i64) -> Result<u64> {
    u64::try_from(shipment_count).map_err(|_| {
        CommissionError::InvalidInput(format!(
            "shipment count must be non-negative, got {}",
            shipment_count
        ))
    })
}

/// Computes the tiered commission a lead earns for the month of `reference`.
///
/// The award is a flat amount for the highest tier threshold reached, not
/// `rate * shipment_count`. The function reads no clock and keeps no state,
/// so identical inputs always produce identical results.
///
/// # Errors
///
/// Returns [`CommissionError::InvalidInput`] when `shipment_count` is negative.
pub fn compute_commission(
    affiliation: NaiveDate,
    reference: NaiveDate,
    shipment_count: i64,
) -> Result<CommissionResult> {
    let shipments = validate_shipments(shipment_count)?;
    let months = months_between(affiliation, reference);

    if reference < affiliation {
        return Ok(CommissionResult::no_commission(months));
    }

    let phase = Phase::from_months(months);
    let (tier, total_commission) = phase
        .tiers()
        .iter()
        .rev()
        .find(|step| shipments >= step.threshold)
        .map(|step| (step.tier, step.award))
        .unwrap_or((Tier::None, Decimal::ZERO));

    let status = match phase {
        Phase::FirstMonth if affiliation.day() >= NEXT_MONTH_CUTOFF_DAY => {
            CommissionStatus::NextMonth
        }
        Phase::FirstMonth => CommissionStatus::Full,
        Phase::SecondMonth => CommissionStatus::Half,
        Phase::BeforeAffiliation | Phase::Expired => {
            return Ok(CommissionResult::no_commission(months));
        }
    };

    Ok(CommissionResult {
        tier,
        rate: phase.rate(),
        total_commission,
        status,
        months_since_affiliation: months,
    })
}

/// Parses a calendar date written as `YYYY-MM-DD`, or as a full timestamp
/// (`2024-03-05T10:00:00Z`, `2024-03-05 10:00:00`) whose calendar date is kept
/// as written. Any other suffix is rejected.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    let trimmed = input.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(timestamp.naive_local().date());
    }
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|timestamp| timestamp.date())
        .ok_or_else(|| {
            CommissionError::InvalidInput(format!("invalid calendar date '{}'", trimmed))
        })
}

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// String-typed entry point for callers at the edge of the system.
pub fn compute_from_strings(
    affiliation: &str,
    reference: &str,
    shipment_count: i64,
) -> Result<CommissionResult> {
    compute_commission(parse_date(affiliation)?, parse_date(reference)?, shipment_count)
}
