//! The comparison engine.
//!
//! `compare` is a pure function over two catalog movies. It holds no state
//! and never fails: every field a `Movie` carries is already validated by
//! the catalog, so each rule below is total.
//!
//! ## Rules
//! | Fields | Status |
//! |--------|--------|
//! | `movie_id`, `title`, `producer_company`, `producer_country` | exact, case-sensitive equality |
//! | `duration_minutes`, `rating`, `budget`, `revenue` | direction towards the target |
//! | `release_date` | chronological direction towards the target |
//! | `genres`, `director_names`, `main_actors`, `writers` | per-element membership in the target's collection |

use crate::verdict::*;
use catalog::Movie;
use std::cmp::Ordering;
use std::collections::HashSet;

/// Compare a guessed movie against the day's target
pub fn compare(guess: &Movie, target: &Movie) -> ComparisonResult {
    ComparisonResult {
        movie_id: exact(&guess.id, &target.id),
        title: exact(&guess.title, &target.title),
        release_date: dated(guess, target),
        duration_minutes: directional(
            guess.duration_minutes,
            guess.duration_minutes.cmp(&target.duration_minutes),
        ),
        // Ratings are never NaN (checked by the catalog); -0.0 equals 0.0.
        rating: directional(
            guess.rating,
            guess
                .rating
                .partial_cmp(&target.rating)
                .unwrap_or(Ordering::Equal),
        ),
        budget: directional(guess.budget, guess.budget.cmp(&target.budget)),
        revenue: directional(guess.revenue, guess.revenue.cmp(&target.revenue)),
        genres: membership(&guess.genres, &target.genres),
        director_names: membership(&guess.director_names, &target.director_names),
        main_actors: membership(&guess.main_actors, &target.main_actors),
        writers: membership(&guess.writers, &target.writers),
        producer_company: exact(&guess.producer_company, &target.producer_company),
        producer_country: exact(&guess.producer_country, &target.producer_country),
    }
}

fn exact<T: PartialEq + Clone>(guess: &T, target: &T) -> Verdict<T, MatchStatus> {
    let status = if guess == target {
        MatchStatus::Correct
    } else {
        MatchStatus::Incorrect
    };
    Verdict::new(guess.clone(), status)
}

/// `ordering` is guess compared to target
fn directional<T>(guess: T, ordering: Ordering) -> Verdict<T, DirectionStatus> {
    let status = match ordering {
        Ordering::Equal => DirectionStatus::Correct,
        Ordering::Less => DirectionStatus::Higher,
        Ordering::Greater => DirectionStatus::Lower,
    };
    Verdict::new(guess, status)
}

fn dated(guess: &Movie, target: &Movie) -> Verdict<chrono::NaiveDate, DateStatus> {
    let status = match guess.release_date.cmp(&target.release_date) {
        Ordering::Equal => DateStatus::Correct,
        Ordering::Less => DateStatus::Later,
        Ordering::Greater => DateStatus::Earlier,
    };
    Verdict::new(guess.release_date, status)
}

/// One verdict per guessed element, in the guess's order.
///
/// Duplicates in the guess are kept; nothing from the target is added.
fn membership(guess: &[String], target: &[String]) -> CollectionVerdict {
    let target: HashSet<&str> = target.iter().map(String::as_str).collect();

    guess
        .iter()
        .map(|element| {
            let status = if target.contains(element.as_str()) {
                MembershipStatus::Match
            } else {
                MembershipStatus::NoMatch
            };
            Verdict::new(element.clone(), status)
        })
        .collect()
}
