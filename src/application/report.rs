use crate::domain::commission::CommissionStatus;
use crate::domain::ports::{CommissionStore, LeadStore};
use crate::domain::record::CommissionRecord;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Serialize;

/// Totals over a set of persisted commission records.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct CommissionSummary {
    pub records: usize,
    pub total: Decimal,
    pub full: Decimal,
    pub half: Decimal,
    pub next_month: Decimal,
    pub crm_matched: usize,
}

impl CommissionSummary {
    /// Sums `records`, keeping only those with `filter` status when given.
    pub fn from_records<'a, I>(records: I, filter: Option<CommissionStatus>) -> Self
    where
        I: IntoIterator<Item = &'a CommissionRecord>,
    {
        let mut summary = Self::default();
        for record in records
            .into_iter()
            .filter(|r| filter.is_none_or(|status| r.status == status))
        {
            summary.records += 1;
            summary.total += record.total_commission;
            match record.status {
                CommissionStatus::Full => summary.full += record.total_commission,
                CommissionStatus::Half => summary.half += record.total_commission,
                CommissionStatus::NextMonth => summary.next_month += record.total_commission,
                CommissionStatus::None => {}
            }
            if record.crm_matched {
                summary.crm_matched += 1;
            }
        }
        summary.total = summary.total.normalize();
        summary.full = summary.full.normalize();
        summary.half = summary.half.normalize();
        summary.next_month = summary.next_month.normalize();
        summary
    }
}

/// Headline numbers across both stores.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_leads: usize,
    pub total_commission: Decimal,
    pub crm_matched_leads: usize,
}

impl DashboardStats {
    pub async fn collect(leads: &dyn LeadStore, commissions: &dyn CommissionStore) -> Result<Self> {
        let leads = leads.get_all().await?;
        let total_commission: Decimal = commissions
            .get_all()
            .await?
            .iter()
            .map(|r| r.total_commission)
            .sum();

        Ok(Self {
            total_leads: leads.len(),
            total_commission: total_commission.normalize(),
            crm_matched_leads: leads.iter().filter(|l| l.has_contact()).count(),
        })
    }
}
