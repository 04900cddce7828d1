//! Domain types and the commission engine.
//!
//! `commission` holds the pure calculation; everything else here describes
//! the data the surrounding pipeline feeds into it and persists out of it.

pub mod commission;
pub mod contact;
pub mod lead;
pub mod ports;
pub mod record;
pub mod shipment;
