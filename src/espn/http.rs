//! ESPN golf leaderboard client

use reqwest::Client;
use serde_json::Value;
use tracing::info;

use super::types::{LeaderboardResponse, Tournament};
use crate::Result;


/// Fetch the raw leaderboard payload.
pub async fn get_leaderboard(client: &Client, url: &str) -> Result<Value> {
    info!(url, "fetching leaderboard");

    let res = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<Value>()
        .await?;

    Ok(res)
}

/// Decode a raw leaderboard payload into the current tournament.
pub fn parse_tournament(payload: Value) -> Result<Tournament> {
    let response: LeaderboardResponse = serde_json::from_value(payload)?;
    Tournament::from_response(&response)
}
