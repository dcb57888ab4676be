//! Guess comparison for the daily movie game.
//!
//! This crate provides:
//! - Typed status enums for every kind of movie attribute
//! - `Verdict` and `ComparisonResult`, the closed record handed to players
//! - `compare`, the pure function that produces it
//!
//! ## Example Usage
//! ```ignore
//! use comparison::compare;
//!
//! let guess = catalog.get_by_id(guess_id)?;
//! let target = catalog.get_by_id(today.movie_id)?;
//! let result = compare(guess, target);
//!
//! if result.is_solved() {
//!     println!("Got it!");
//! }
//! ```

pub mod verdict;
pub mod engine;

// Re-export main types
pub use engine::compare;
pub use verdict::{
    CollectionVerdict, ComparisonResult, DateStatus, DirectionStatus, MatchStatus,
    MembershipStatus, Status, Verdict,
};
