//! Application layer orchestrating the commission engine.
//!
//! `ShipmentProcessor` is the primary entry point: it imports leads, turns
//! shipment rows into persisted commission records and exposes the reporting
//! and CRM sync operations over the same stores.

pub mod processor;
pub mod report;
pub mod sync;
