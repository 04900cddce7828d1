use crate::application::report::DashboardStats;
use crate::application::sync::{SyncOutcome, sync_contacts};
use crate::domain::commission::validate_shipments;
use crate::domain::lead::Lead;
use crate::domain::ports::{CommissionStoreBox, ContactDirectoryBox, LeadStoreBox};
use crate::domain::record::CommissionRecord;
use crate::domain::shipment::ShipmentRow;
use crate::error::{CommissionError, Result};
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// Counts from a lead import.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportOutcome {
    pub imported: usize,
    pub failed: usize,
    pub crm_matches: usize,
}

/// Result of processing a shipments file.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProcessOutcome {
    /// Records persisted during this run, in row order.
    pub records: Vec<CommissionRecord>,
    /// Rows without a client name or naming an unknown lead.
    pub skipped: usize,
    /// Rows that could not be read or carried invalid input.
    pub failed: usize,
    pub crm_matches: usize,
}

/// Turns monthly shipment rows into persisted commission records.
///
/// Owns the storage backends and the optional contact directory. Each row is
/// handled independently: the engine runs before anything is written, so a
/// row with invalid input leaves no trace in the stores.
pub struct ShipmentProcessor {
    lead_store: LeadStoreBox,
    commission_store: CommissionStoreBox,
    directory: Option<ContactDirectoryBox>,
}

impl ShipmentProcessor {
    pub fn new(
        lead_store: LeadStoreBox,
        commission_store: CommissionStoreBox,
        directory: Option<ContactDirectoryBox>,
    ) -> Self {
        Self {
            lead_store,
            commission_store,
            directory,
        }
    }

    /// Replaces the contact directory consulted by later operations.
    pub fn with_directory(mut self, directory: ContactDirectoryBox) -> Self {
        self.directory = Some(directory);
        self
    }

    async fn lookup_contact(&self, name: &str) -> Result<Option<String>> {
        match &self.directory {
            Some(directory) => directory.search(name).await,
            None => Ok(None),
        }
    }

    /// Stores every readable lead as active, attaching a CRM contact id when
    /// the directory knows the name.
    pub async fn import_leads<I>(&self, leads: I) -> Result<ImportOutcome>
    where
        I: IntoIterator<Item = Result<Lead>>,
    {
        let mut outcome = ImportOutcome::default();
        for lead in leads {
            let mut lead = match lead {
                Ok(lead) => lead,
                Err(e) => {
                    warn!("Error reading lead: {}", e);
                    outcome.failed += 1;
                    continue;
                }
            };

            lead.activate();
            if let Some(contact_id) = self.lookup_contact(&lead.name).await? {
                debug!(lead = %lead.name, contact = %contact_id, "matched CRM contact");
                lead.attach_contact(contact_id);
                outcome.crm_matches += 1;
            }
            self.lead_store.store(lead).await?;
            outcome.imported += 1;
        }

        info!(
            imported = outcome.imported,
            failed = outcome.failed,
            crm_matches = outcome.crm_matches,
            "lead import finished"
        );
        Ok(outcome)
    }

    /// Computes and persists the commission for one shipment row.
    ///
    /// Returns `Ok(None)` for rows without a client name and
    /// [`CommissionError::NotFound`] when the named lead does not exist.
    pub async fn process_row(
        &self,
        row: ShipmentRow,
        reference: NaiveDate,
    ) -> Result<Option<CommissionRecord>> {
        let Some(name) = row.client_name() else {
            debug!("skipping row without client name");
            return Ok(None);
        };

        let mut lead = self
            .lead_store
            .get(name)
            .await?
            .ok_or_else(|| CommissionError::NotFound(format!("lead '{}'", name)))?;

        let count = row.shipment_count();
        let shipments = validate_shipments(count)?;
        let result = lead.commission(reference, count)?;

        let crm_matched = match self.lookup_contact(name).await? {
            Some(contact_id) => {
                lead.attach_contact(contact_id);
                self.lead_store.store(lead.clone()).await?;
                true
            }
            None => false,
        };

        let record = CommissionRecord::new(&lead.name, shipments, &result, reference, crm_matched);
        debug!(
            lead = %record.lead,
            shipments = record.shipments,
            tier = %record.tier,
            status = %record.status,
            total = %record.total_commission,
            "commission computed"
        );
        self.commission_store.append(record.clone()).await?;
        Ok(Some(record))
    }

    /// Processes a stream of rows. Unreadable, invalid or unmatched rows are
    /// logged and counted; only storage failures abort the batch.
    pub async fn process_rows<I>(&self, rows: I, reference: NaiveDate) -> Result<ProcessOutcome>
    where
        I: IntoIterator<Item = Result<ShipmentRow>>,
    {
        let mut outcome = ProcessOutcome::default();
        for row in rows {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    warn!("Error reading shipment row: {}", e);
                    outcome.failed += 1;
                    continue;
                }
            };

            match self.process_row(row, reference).await {
                Ok(Some(record)) => {
                    if record.crm_matched {
                        outcome.crm_matches += 1;
                    }
                    outcome.records.push(record);
                }
                Ok(None) => outcome.skipped += 1,
                Err(CommissionError::NotFound(what)) => {
                    warn!("Skipping shipment row, {} not found", what);
                    outcome.skipped += 1;
                }
                Err(CommissionError::InvalidInput(msg)) => {
                    warn!("Error processing shipment row: {}", msg);
                    outcome.failed += 1;
                }
                Err(e) => return Err(e),
            }
        }

        info!(
            processed = outcome.records.len(),
            skipped = outcome.skipped,
            failed = outcome.failed,
            crm_matches = outcome.crm_matches,
            reference = %reference,
            "shipment processing finished"
        );
        Ok(outcome)
    }

    pub async fn search_leads(&self, query: &str) -> Result<Vec<Lead>> {
        self.lead_store.search(query).await
    }

    /// Attaches CRM contact ids to leads that do not have one yet.
    pub async fn sync_contacts(&self) -> Result<SyncOutcome> {
        match &self.directory {
            Some(directory) => sync_contacts(self.lead_store.as_ref(), directory.as_ref()).await,
            None => Err(CommissionError::InvalidInput(
                "no contact directory configured".to_string(),
            )),
        }
    }

    pub async fn stats(&self) -> Result<DashboardStats> {
        DashboardStats::collect(self.lead_store.as_ref(), self.commission_store.as_ref()).await
    }

    /// Consumes the processor and returns the full commission history.
    pub async fn into_records(self) -> Result<Vec<CommissionRecord>> {
        self.commission_store.get_all().await
    }
}
