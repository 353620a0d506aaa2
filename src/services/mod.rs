//! Domain services on top of the repository
//!
//! `views` records deduplicated view events; `ranking` recomputes the
//! denormalized listing score.

pub mod ranking;
pub mod views;

pub use ranking::{EDITORIAL_WEIGHT, VIEW_WEIGHT, compute_score, recompute_score};
pub use views::{VIEW_COOLDOWN_MINUTES, ViewOutcome, record_view};
