//! Error types for the fantasy golf CLI

use thiserror::Error;


pub type Result<T> = std::result::Result<T, GolfError>;

#[derive(Error, Debug)]
pub enum GolfError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Sheet URL not provided and {env_var} environment variable not set")]
    MissingSheetUrl { env_var: String },

    #[error("Sheet endpoint returned status {status:?}: {message}")]
    SheetStatus { status: String, message: String },

    #[error("Leaderboard response contained no event")]
    NoEvent,

    #[error("Invalid league tag: {tag}")]
    InvalidLeagueTag { tag: String },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Invalid sheet layout: {message}")]
    InvalidLayout { message: String },

    #[error("Invalid timezone offset: {value}")]
    InvalidOffset { value: String },

    #[error("Player not found: {name}")]
    PlayerNotFound { name: String },

    #[error("Cache error: {message}")]
    Cache { message: String },
}
