use super::lead::Lead;
use super::record::CommissionRecord;
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Inserts or replaces the lead keyed by its name.
    async fn store(&self, lead: Lead) -> Result<()>;
    async fn get(&self, name: &str) -> Result<Option<Lead>>;
    async fn get_all(&self) -> Result<Vec<Lead>>;

    /// Leads whose name or email contains `query`, ordered by name.
    async fn search(&self, query: &str) -> Result<Vec<Lead>> {
        let mut leads: Vec<Lead> = self
            .get_all()
            .await?
            .into_iter()
            .filter(|lead| lead.matches(query))
            .collect();
        leads.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(leads)
    }
}

/// Append-only history of computed commissions.
#[async_trait]
pub trait CommissionStore: Send + Sync {
    async fn append(&self, record: CommissionRecord) -> Result<()>;
    async fn get_all(&self) -> Result<Vec<CommissionRecord>>;
}

/// Lookup into an external CRM. Returns the first matching contact id.
#[async_trait]
pub trait ContactDirectory: Send + Sync {
    async fn search(&self, name: &str) -> Result<Option<String>>;
}

pub type LeadStoreBox = Box<dyn LeadStore>;
pub type CommissionStoreBox = Box<dyn CommissionStore>;
pub type ContactDirectoryBox = Box<dyn ContactDirectory>;
pub type LeadStoreFactory = Box<dyn Fn() -> LeadStoreBox + Send + Sync>;
