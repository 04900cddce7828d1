use serde::{Deserialize, Serialize};

/// A contact exported from the external CRM.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Contact {
    pub name: String,
    pub contact_id: String,
}

impl Contact {
    pub fn new(name: impl Into<String>, contact_id: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contact_id: contact_id.into(),
        }
    }
}

/// Key used to compare lead names against contact names.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}
