use serde::Deserialize;

/// One row of a monthly shipments file.
///
/// Column names follow the spreadsheets sales staff export, so several
/// spellings are accepted for each column.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct ShipmentRow {
    #[serde(rename = "Cliente", alias = "cliente", alias = "Client", alias = "client")]
    pub client: Option<String>,
    #[serde(rename = "Envios", alias = "envíos", alias = "Envíos", alias = "Shipments", alias = "shipments")]
    pub shipments: Option<i64>,
}

impl ShipmentRow {
    pub fn new(client: impl Into<String>, shipments: i64) -> Self {
        Self {
            client: Some(client.into()),
            shipments: Some(shipments),
        }
    }

    /// Lead name of the row, if the client column is non-empty.
    pub fn client_name(&self) -> Option<&str> {
        self.client
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }

    /// Shipment count; a missing or empty cell counts as zero.
    pub fn shipment_count(&self) -> i64 {
        self.shipments.unwrap_or(0)
    }
}
