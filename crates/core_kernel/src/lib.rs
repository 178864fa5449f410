//! Core Kernel - Foundational types shared by the claim decision engine
//!
//! This crate provides the value objects used across the domain crates:
//! - Cost ranges with precise decimal arithmetic
//! - Probability scores constrained to `[0, 1]`
//! - Claim and image identifiers

pub mod money;
pub mod score;
pub mod identifiers;
pub mod error;

pub use money::{CostRange, CostRangeError, format_amount};
pub use score::{Score, ScoreError};
pub use identifiers::{ClaimId, ImageId};
pub use error::CoreError;
