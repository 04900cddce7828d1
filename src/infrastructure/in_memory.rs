use crate::domain::contact::{Contact, normalize_name};
use crate::domain::lead::Lead;
use crate::domain::ports::{CommissionStore, ContactDirectory, LeadStore};
use crate::domain::record::CommissionRecord;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for leads, keyed by lead name.
///
/// `Clone` shares the underlying map, so clones observe each other's writes.
#[derive(Default, Clone)]
pub struct InMemoryLeadStore {
    leads: Arc<RwLock<HashMap<String, Lead>>>,
}

impl InMemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeadStore for InMemoryLeadStore {
    async fn store(&self, lead: Lead) -> Result<()> {
        let mut leads = self.leads.write().await;
        leads.insert(lead.name.clone(), lead);
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Option<Lead>> {
        let leads = self.leads.read().await;
        Ok(leads.get(name).cloned())
    }

    async fn get_all(&self) -> Result<Vec<Lead>> {
        let leads = self.leads.read().await;
        Ok(leads.values().cloned().collect())
    }
}

/// A thread-safe in-memory commission history that preserves insertion order.
#[derive(Default, Clone)]
pub struct InMemoryCommissionStore {
    records: Arc<RwLock<Vec<CommissionRecord>>>,
}

impl InMemoryCommissionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommissionStore for InMemoryCommissionStore {
    async fn append(&self, record: CommissionRecord) -> Result<()> {
        self.records.write().await.push(record);
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<CommissionRecord>> {
        Ok(self.records.read().await.clone())
    }
}

/// Contact directory backed by a CRM export loaded up front.
///
/// Names are matched case-insensitively after trimming. When the export lists
/// the same name twice, the first contact wins.
#[derive(Default, Clone)]
pub struct StaticContactDirectory {
    contacts: HashMap<String, String>,
}

impl StaticContactDirectory {
    pub fn from_contacts(contacts: impl IntoIterator<Item = Contact>) -> Self {
        let mut map = HashMap::new();
        for contact in contacts {
            map.entry(normalize_name(&contact.name))
                .or_insert(contact.contact_id);
        }
        Self { contacts: map }
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}

#[async_trait]
impl ContactDirectory for StaticContactDirectory {
    async fn search(&self, name: &str) -> Result<Option<String>> {
        Ok(self.contacts.get(&normalize_name(name)).cloned())
    }
}
