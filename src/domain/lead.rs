use super::commission::{CommissionResult, compute_commission, parse_date};
use crate::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy, Default)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    Active,
    Inactive,
    #[default]
    Pending,
}

/// A prospective or active customer tracked for commissions.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    /// Display name, also the key shipment rows refer to.
    pub name: String,
    pub email: String,
    /// Date the lead became a customer. Never changes after import.
    #[serde(deserialize_with = "deserialize_date")]
    pub affiliation_date: NaiveDate,
    #[serde(default)]
    pub status: LeadStatus,
    /// Contact identifier in the external CRM, when a match was found.
    #[serde(default)]
    pub crm_contact_id: Option<String>,
}

fn deserialize_date<'de, D>(deserializer: D) -> std::result::Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

impl Lead {
    pub fn new(name: impl Into<String>, email: impl Into<String>, affiliation_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            affiliation_date,
            status: LeadStatus::Pending,
            crm_contact_id: None,
        }
    }

    pub fn activate(&mut self) {
        self.status = LeadStatus::Active;
    }

    pub fn attach_contact(&mut self, contact_id: impl Into<String>) {
        self.crm_contact_id = Some(contact_id.into());
    }

    pub fn has_contact(&self) -> bool {
        self.crm_contact_id.is_some()
    }

    /// Case-insensitive substring match on name or email.
    pub fn matches(&self, query: &str) -> bool {
        let needle = query.trim().to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.email.to_lowercase().contains(&needle)
    }

    /// Commission this lead earns for `shipment_count` shipments in the month of `reference`.
    pub fn commission(&self, reference: NaiveDate, shipment_count: i64) -> Result<CommissionResult> {
        compute_commission(self.affiliation_date, reference, shipment_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commission::CommissionStatus;
    use rust_decimal_macros::dec;

    fn lead() -> Lead {
        Lead::new(
            "Ferretería Sol",
            "ventas@sol.example",
            NaiveDate::from_ymd_opt(2024, 5, 9).unwrap(),
        )
    }

    #[test]
    fn test_new_lead_is_pending() {
        let mut lead = lead();
        assert_eq!(lead.status, LeadStatus::Pending);
        lead.activate();
        assert_eq!(lead.status, LeadStatus::Active);
    }

    #[test]
    fn test_lead_matches_name_or_email() {
        let lead = lead();
        assert!(lead.matches("ferretería"));
        assert!(lead.matches("SOL.EXAMPLE"));
        assert!(!lead.matches("acme"));
    }

    #[test]
    fn test_lead_commission_uses_affiliation_date() {
        let lead = lead();
        let result = lead
            .commission(NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(), 150)
            .unwrap();
        assert_eq!(result.status, CommissionStatus::Half);
        assert_eq!(result.total_commission, dec!(50));
    }

    #[test]
    fn test_lead_json_roundtrip_keeps_contact() {
        let mut lead = lead();
        lead.attach_contact("hs-42");
        let json = serde_json::to_string(&lead).unwrap();
        assert!(json.contains("\"affiliationDate\":\"2024-05-09\""));
        let back: Lead = serde_json::from_str(&json).unwrap();
        assert_eq!(back, lead);
        assert!(back.has_contact());
    }
}
