//! Verdict types returned to players.
//!
//! Each attribute of a guessed movie gets a `Verdict`: the guessed value plus
//! a status telling the player how it relates to the day's target. The status
//! type differs per field kind, so a date can never be marked `higher` and a
//! genre can never be marked `correct`.

use catalog::MovieId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Common behaviour of every status enum, used for rendering
pub trait Status {
    /// Wire label, e.g. `"no_match"`
    fn label(&self) -> &'static str;

    /// True when the guessed value is exactly right
    fn is_hit(&self) -> bool;
}

/// Status for identity and exact-string fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Correct,
    Incorrect,
}

/// Status for numeric fields.
///
/// Polarity: the status points at the target. `Higher` means the target's
/// value is higher than the guess, `Lower` means it is lower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectionStatus {
    Correct,
    Higher,
    Lower,
}

/// Status for the release date, with the same polarity as `DirectionStatus`:
/// `Later` means the target was released after the guessed movie.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateStatus {
    Correct,
    Earlier,
    Later,
}

/// Status for one element of a collection field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    Match,
    NoMatch,
}

impl Status for MatchStatus {
    fn label(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
        }
    }

    fn is_hit(&self) -> bool {
        matches!(self, Self::Correct)
    }
}

impl Status for DirectionStatus {
    fn label(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Higher => "higher",
            Self::Lower => "lower",
        }
    }

    fn is_hit(&self) -> bool {
        matches!(self, Self::Correct)
    }
}

impl Status for DateStatus {
    fn label(&self) -> &'static str {
        match self {
            Self::Correct => "correct",
            Self::Earlier => "earlier",
            Self::Later => "later",
        }
    }

    fn is_hit(&self) -> bool {
        matches!(self, Self::Correct)
    }
}

impl Status for MembershipStatus {
    fn label(&self) -> &'static str {
        match self {
            Self::Match => "match",
            Self::NoMatch => "no_match",
        }
    }

    fn is_hit(&self) -> bool {
        matches!(self, Self::Match)
    }
}

/// A guessed value and its status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict<T, S> {
    pub value: T,
    pub status: S,
}

impl<T, S> Verdict<T, S> {
    pub fn new(value: T, status: S) -> Self {
        Self { value, status }
    }
}

/// Per-element verdicts for a collection field, in the guess's order
pub type CollectionVerdict = Vec<Verdict<String, MembershipStatus>>;

/// Field-by-field comparison of a guess against the day's target.
///
/// One member per movie attribute; serialized with the same keys the web
/// client reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub movie_id: Verdict<MovieId, MatchStatus>,
    pub title: Verdict<String, MatchStatus>,
    pub release_date: Verdict<NaiveDate, DateStatus>,
    pub duration_minutes: Verdict<u32, DirectionStatus>,
    pub rating: Verdict<f64, DirectionStatus>,
    pub budget: Verdict<u64, DirectionStatus>,
    pub revenue: Verdict<u64, DirectionStatus>,
    pub genres: CollectionVerdict,
    pub director_names: CollectionVerdict,
    pub main_actors: CollectionVerdict,
    pub writers: CollectionVerdict,
    pub producer_company: Verdict<String, MatchStatus>,
    pub producer_country: Verdict<String, MatchStatus>,
}

impl ComparisonResult {
    /// The guess is the target itself
    pub fn is_solved(&self) -> bool {
        self.movie_id.status.is_hit()
    }
}
