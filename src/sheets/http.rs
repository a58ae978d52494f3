//! League sheet client.
//!
//! The sheet is published through a small web-app endpoint that answers
//! `{"status": "success", "data": [[...]], "sheetName": "..."}`.

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use super::grid::Grid;
use crate::error::{GolfError, Result};


#[derive(Debug, Deserialize)]
struct SheetEnvelope {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Value,
    #[serde(rename = "sheetName", default)]
    sheet_name: Option<String>,
}

/// A decoded sheet export.
#[derive(Debug, Clone)]
pub struct SheetData {
    pub sheet_name: Option<String>,
    pub grid: Grid,
}

/// Fetch the raw sheet payload for `sheet_name`.
pub async fn get_sheet(client: &Client, url: &str, sheet_name: &str) -> Result<Value> {
    info!(sheet = sheet_name, "fetching league sheet");

    let params = [("sheet", sheet_name)];
    let res = client
        .get(url)
        .query(&params)
        .send()
        .await?
        .error_for_status()?
        .json::<Value>()
        .await?;

    Ok(res)
}

/// Check the envelope status and decode the grid.
pub fn parse_sheet(payload: Value) -> Result<SheetData> {
    let envelope: SheetEnvelope = serde_json::from_value(payload)?;
    let status = envelope.status.unwrap_or_default();
    if status != "success" {
        return Err(GolfError::SheetStatus {
            status,
            message: envelope
                .message
                .unwrap_or_else(|| "no message".to_string()),
        });
    }

    Ok(SheetData {
        sheet_name: envelope.sheet_name,
        grid: Grid::from_value(&envelope.data),
    })
}
