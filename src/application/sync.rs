use crate::domain::ports::{ContactDirectory, LeadStore};
use crate::error::Result;
use serde::Serialize;
use tracing::{debug, info};

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct SyncOutcome {
    /// Leads that had no contact id before the sync.
    pub examined: usize,
    pub synced: usize,
}

/// Looks up every lead lacking a CRM contact id and attaches the first match.
pub async fn sync_contacts(
    leads: &dyn LeadStore,
    directory: &dyn ContactDirectory,
) -> Result<SyncOutcome> {
    let mut outcome = SyncOutcome::default();
    for mut lead in leads.get_all().await? {
        if lead.has_contact() {
            continue;
        }
        outcome.examined += 1;

        if let Some(contact_id) = directory.search(&lead.name).await? {
            debug!(lead = %lead.name, contact = %contact_id, "synced CRM contact");
            lead.attach_contact(contact_id);
            leads.store(lead).await?;
            outcome.synced += 1;
        }
    }

    info!(examined = outcome.examined, synced = outcome.synced, "CRM sync finished");
    Ok(outcome)
}
