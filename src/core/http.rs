//! HTTP utilities shared by the leaderboard, sheet and rankings clients

use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
    Client,
};

use crate::Result;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Default headers sent with every request.
pub fn common_headers() -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    let agent = format!("fantasy-golf/{}", env!("CARGO_PKG_VERSION"));
    h.insert(USER_AGENT, HeaderValue::from_str(&agent)?);
    Ok(h)
}

/// Build the one client the whole process shares.
pub fn build_client() -> Result<Client> {
    let client = Client::builder()
        .default_headers(common_headers()?)
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}
