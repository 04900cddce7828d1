use crate::domain::lead::Lead;
use crate::domain::ports::{CommissionStore, LeadStore};
use crate::domain::record::CommissionRecord;
use crate::error::{CommissionError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, IteratorMode, Options};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Column Family for storing leads, keyed by lead name.
pub const CF_LEADS: &str = "leads";
/// Column Family for the commission history, keyed by a big-endian sequence number.
pub const CF_COMMISSIONS: &str = "commissions";

/// A persistent store implementation using RocksDB.
///
/// Leads and commission records live in separate Column Families. Commission
/// records are append-only: each gets the next sequence number as its key, so
/// iterating the family returns them in insertion order.
///
/// `Clone` shares the underlying `Arc<DB>` and sequence counter.
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<DB>,
    next_seq: Arc<AtomicU64>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Resumes the commission sequence after the last record already stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_leads = ColumnFamilyDescriptor::new(CF_LEADS, Options::default());
        let cf_commissions = ColumnFamilyDescriptor::new(CF_COMMISSIONS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_leads, cf_commissions])?;

        let next_seq = {
            let cf = column_family(&db, CF_COMMISSIONS)?;
            match db.iterator_cf(cf, IteratorMode::End).next() {
                Some(item) => {
                    let (key, _) = item?;
                    decode_seq(&key)? + 1
                }
                None => 0,
            }
        };

        Ok(Self {
            db: Arc::new(db),
            next_seq: Arc::new(AtomicU64::new(next_seq)),
        })
    }
}

fn column_family<'a>(db: &'a DB, name: &str) -> Result<&'a ColumnFamily> {
    db.cf_handle(name)
        .ok_or_else(|| CommissionError::StorageError(format!("{} column family not found", name)))
}

fn decode_seq(key: &[u8]) -> Result<u64> {
    let bytes: [u8; 8] = key
        .try_into()
        .map_err(|_| CommissionError::StorageError("Malformed commission key".to_string()))?;
    Ok(u64::from_be_bytes(bytes))
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(value)
        .map_err(|e| CommissionError::StorageError(format!("Serialization error: {}", e)))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    serde_json::from_slice(bytes)
        .map_err(|e| CommissionError::StorageError(format!("Deserialization error: {}", e)))
}

impl RocksDBStore {
    fn values<T: DeserializeOwned>(&self, cf_name: &str) -> Result<Vec<T>> {
        let cf = column_family(&self.db, cf_name)?;
        let mut values = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            values.push(decode(&value)?);
        }
        Ok(values)
    }
}

#[async_trait]
impl LeadStore for RocksDBStore {
    async fn store(&self, lead: Lead) -> Result<()> {
        let cf = column_family(&self.db, CF_LEADS)?;
        let value = encode(&lead)?;
        self.db.put_cf(cf, lead.name.as_bytes(), value)?;
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Option<Lead>> {
        let cf = column_family(&self.db, CF_LEADS)?;
        match self.db.get_cf(cf, name.as_bytes())? {
            Some(bytes) => Ok(Some(decode(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn get_all(&self) -> Result<Vec<Lead>> {
        self.values(CF_LEADS)
    }
}

#[async_trait]
impl CommissionStore for RocksDBStore {
    async fn append(&self, record: CommissionRecord) -> Result<()> {
        let cf = column_family(&self.db, CF_COMMISSIONS)?;
        let value = encode(&record)?;
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
        self.db.put_cf(cf, seq.to_be_bytes(), value)?;
        Ok(())
    }

    async fn get_all(&self) -> Result<Vec<CommissionRecord>> {
        self.values(CF_COMMISSIONS)
    }
}
