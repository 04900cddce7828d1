use crate::domain::contact::Contact;
use crate::domain::lead::Lead;
use crate::domain::record::CommissionRecord;
use crate::domain::shipment::ShipmentRow;
use crate::error::{CommissionError, Result};
use serde::de::DeserializeOwned;
use std::io::Read;

/// Reads typed rows from a CSV source.
///
/// Wraps `csv::Reader`, trimming whitespace around headers and fields and
/// tolerating ragged rows. Each typed accessor returns a lazy iterator, so
/// large files are processed in a streaming fashion.
pub struct CsvReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CsvReader<R> {
    /// Creates a new `CsvReader` from any `Read` source (e.g., File, Stdin).
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    fn rows<T: DeserializeOwned>(self) -> impl Iterator<Item = Result<T>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(CommissionError::from))
    }

    /// Leads as `name,email,affiliationDate`.
    pub fn leads(self) -> impl Iterator<Item = Result<Lead>> {
        self.rows()
    }

    pub fn shipments(self) -> impl Iterator<Item = Result<ShipmentRow>> {
        self.rows()
    }

    /// CRM export as `name,contact_id`.
    pub fn contacts(self) -> impl Iterator<Item = Result<Contact>> {
        self.rows()
    }

    /// Commission records previously written by [`super::writer::CsvWriter`].
    pub fn commissions(self) -> impl Iterator<Item = Result<CommissionRecord>> {
        self.rows()
    }
}
