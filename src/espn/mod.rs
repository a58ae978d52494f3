//! ESPN golf leaderboard: client, payload types and score normalization.

pub mod http;
pub mod normalize;
pub mod positions;
pub mod types;

pub use normalize::{normalize, NormalizedScore};
pub use positions::{LiveEntry, LivePositionMap};
pub use types::{Competitor, Thru, Tournament};
