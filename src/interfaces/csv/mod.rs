//! CSV adapters for lead imports, shipment files, CRM exports and reports.

pub mod reader;
pub mod writer;
