//! Stats module - Match statistics pipeline
//!
//! - [`FetchOrchestrator`]: resolves a player, selects recent matches and
//!   fetches their details through the shared rate limiter
//! - [`transform`]: turns one match record into [`GameStats`](crate::common::types::GameStats)

mod orchestrator;
mod transform;

pub use orchestrator::{BoxedGateway, FetchOrchestrator};
pub use transform::transform;
