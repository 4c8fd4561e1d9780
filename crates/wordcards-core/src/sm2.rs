// Copyright 2025 the wordcards authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The SM-2 scheduling algorithm, adapted to four discrete grades.

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;
use crate::types::card::ScheduleState;
use crate::types::timestamp::Timestamp;

/// The easiness factor of a card that has never been reviewed.
pub const INITIAL_EASINESS: f64 = 2.5;

/// The floor below which the easiness factor never drops. Without it,
/// repeated failures would shrink interval growth without bound.
pub const MIN_EASINESS: f64 = 1.3;

/// The learner's self-reported recall quality for a single review.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub enum Grade {
    Again,
    Hard,
    Good,
    Easy,
}

impl Grade {
    pub fn as_str(&self) -> &str {
        match self {
            Grade::Again => "again",
            Grade::Hard => "hard",
            Grade::Good => "good",
            Grade::Easy => "easy",
        }
    }

    /// The SM-2 quality score for this grade. Note that `Hard` maps to 3,
    /// which the algorithm already treats as a pass: it shares the plain
    /// success path with `Good` and `Easy`.
    pub fn quality(self) -> u32 {
        match self {
            Grade::Again => 1,
            Grade::Hard => 3,
            Grade::Good => 4,
            Grade::Easy => 5,
        }
    }

    /// Whether this grade counts as a successful recall (quality >= 3).
    pub fn is_success(self) -> bool {
        self.quality() >= 3
    }
}

impl TryFrom<String> for Grade {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "again" => Ok(Grade::Again),
            "hard" => Ok(Grade::Hard),
            "good" => Ok(Grade::Good),
            "easy" => Ok(Grade::Easy),
            _ => fail(format!("invalid grade string: {value}")),
        }
    }
}

/// The updated easiness factor after a review of quality `q`, floored at
/// [`MIN_EASINESS`]. Applied on success and failure alike, so lapses still
/// erode easiness.
pub fn new_easiness(ef: f64, q: u32) -> f64 {
    let d = (5 - q) as f64;
    let ef = ef + (0.1 - d * (0.08 + d * 0.02));
    f64::max(MIN_EASINESS, ef)
}

/// Applies a review to a card's scheduling state, returning the new state.
///
/// Pure and deterministic: the caller supplies the review time, and is
/// responsible for persisting the result. The easiness factor is updated
/// and clamped before the success/failure branch. On success the interval
/// is 1 day for the first success, 6 days for the second, and compounds by
/// the already-updated easiness factor thereafter. On failure repetitions
/// and the interval reset, but the eroded easiness factor sticks.
///
/// The due timestamp moves by the interval rounded to whole days; the
/// fractional interval is preserved in the state for future compounding.
pub fn apply_review(state: &ScheduleState, grade: Grade, reviewed_at: Timestamp) -> ScheduleState {
    let easiness_factor = new_easiness(state.easiness_factor, grade.quality());
    let (repetitions, interval_days) = if grade.is_success() {
        let repetitions = state.repetitions + 1;
        let interval_days = match repetitions {
            1 => 1.0,
            2 => 6.0,
            _ => state.interval_days * easiness_factor,
        };
        (repetitions, interval_days)
    } else {
        (0, 1.0)
    };
    let next_review_at = reviewed_at.add_days(interval_days.round() as i64);
    ScheduleState {
        next_review_at,
        interval_days,
        easiness_factor,
        repetitions,
    }
}

#[cfg(test)]
mod tests {
    use std::iter::zip;

    use super::*;
    use crate::error::Fallible;

    /// Approximate equality.
    fn feq(a: f64, b: f64) -> bool {
        f64::abs(a - b) < 1e-9
    }

    fn make_timestamp(s: &str) -> Timestamp {
        Timestamp::try_from(s.to_string()).unwrap()
    }

    fn fresh(now: Timestamp) -> ScheduleState {
        ScheduleState::initial(now)
    }

    #[test]
    fn test_quality_mapping() {
        assert_eq!(Grade::Again.quality(), 1);
        assert_eq!(Grade::Hard.quality(), 3);
        assert_eq!(Grade::Good.quality(), 4);
        assert_eq!(Grade::Easy.quality(), 5);
        assert!(!Grade::Again.is_success());
        assert!(Grade::Hard.is_success());
        assert!(Grade::Good.is_success());
        assert!(Grade::Easy.is_success());
    }

    /// A card with EF=2.5, interval=6, reps=2 graded Good: EF is unchanged,
    /// the interval compounds to 15, due in 15 days.
    #[test]
    fn test_good_on_mature_card() {
        let now = make_timestamp("2024-01-01T12:00:00.000");
        let state = ScheduleState {
            next_review_at: now,
            interval_days: 6.0,
            easiness_factor: 2.5,
            repetitions: 2,
        };
        let updated = apply_review(&state, Grade::Good, now);
        assert!(feq(updated.easiness_factor, 2.5));
        assert_eq!(updated.repetitions, 3);
        assert!(feq(updated.interval_days, 15.0));
        assert_eq!(
            updated.next_review_at,
            make_timestamp("2024-01-16T12:00:00.000")
        );
    }

    /// The same card graded Again: EF erodes to 1.96, repetitions and
    /// interval reset, due tomorrow.
    #[test]
    fn test_again_on_mature_card() {
        let now = make_timestamp("2024-01-01T12:00:00.000");
        let state = ScheduleState {
            next_review_at: now,
            interval_days: 6.0,
            easiness_factor: 2.5,
            repetitions: 2,
        };
        let updated = apply_review(&state, Grade::Again, now);
        assert!(feq(updated.easiness_factor, 1.96));
        assert_eq!(updated.repetitions, 0);
        assert!(feq(updated.interval_days, 1.0));
        assert_eq!(
            updated.next_review_at,
            make_timestamp("2024-01-02T12:00:00.000")
        );
    }

    /// A brand-new card graded Easy: EF grows to 2.6, but the first success
    /// always yields a one-day interval.
    #[test]
    fn test_easy_on_fresh_card() {
        let now = make_timestamp("2024-01-01T12:00:00.000");
        let updated = apply_review(&fresh(now), Grade::Easy, now);
        assert!(feq(updated.easiness_factor, 2.6));
        assert_eq!(updated.repetitions, 1);
        assert!(feq(updated.interval_days, 1.0));
        assert_eq!(
            updated.next_review_at,
            make_timestamp("2024-01-02T12:00:00.000")
        );
    }

    /// First success is 1 day, second is 6 days, third compounds by the
    /// updated EF, whatever the grade.
    #[test]
    fn test_interval_ladder() {
        let now = make_timestamp("2024-01-01T12:00:00.000");
        let first = apply_review(&fresh(now), Grade::Good, now);
        assert!(feq(first.interval_days, 1.0));
        let second = apply_review(&first, Grade::Good, now);
        assert!(feq(second.interval_days, 6.0));
        let third = apply_review(&second, Grade::Good, now);
        // EF stays 2.5 under Good, so the third interval is 6 * 2.5.
        assert!(feq(third.interval_days, 15.0));
        assert_eq!(third.repetitions, 3);
    }

    /// A success followed by a failure resets repetitions to 0 and the
    /// interval to 1 day, regardless of EF.
    #[test]
    fn test_failure_resets() {
        let now = make_timestamp("2024-01-01T12:00:00.000");
        let state = apply_review(&fresh(now), Grade::Easy, now);
        assert_eq!(state.repetitions, 1);
        let lapsed = apply_review(&state, Grade::Again, now);
        assert_eq!(lapsed.repetitions, 0);
        assert!(feq(lapsed.interval_days, 1.0));
    }

    /// EF never drops below 1.3, however many consecutive failures occur.
    #[test]
    fn test_easiness_floor() {
        let now = make_timestamp("2024-01-01T12:00:00.000");
        let mut state = fresh(now);
        for _ in 0..50 {
            state = apply_review(&state, Grade::Again, now);
            assert!(state.easiness_factor >= MIN_EASINESS);
        }
        assert!(feq(state.easiness_factor, MIN_EASINESS));
    }

    /// Hard passes (q=3) but erodes easiness by 0.14 per review.
    #[test]
    fn test_hard_erodes_easiness() {
        let now = make_timestamp("2024-01-01T12:00:00.000");
        let updated = apply_review(&fresh(now), Grade::Hard, now);
        assert!(feq(updated.easiness_factor, 2.36));
        assert_eq!(updated.repetitions, 1);
        assert!(feq(updated.interval_days, 1.0));
    }

    /// Fractional intervals round to whole days in the due timestamp but
    /// are preserved for compounding.
    #[test]
    fn test_fractional_interval_rounding() {
        let now = make_timestamp("2024-01-01T12:00:00.000");
        let state = ScheduleState {
            next_review_at: now,
            interval_days: 6.0,
            easiness_factor: 1.3,
            repetitions: 2,
        };
        // Good leaves EF clamped at 1.3, so the interval is 6 * 1.3 = 7.8,
        // which rounds to 8 days in the due timestamp.
        let updated = apply_review(&state, Grade::Good, now);
        assert!(feq(updated.interval_days, 7.8));
        assert_eq!(
            updated.next_review_at,
            make_timestamp("2024-01-09T12:00:00.000")
        );
    }

    #[test]
    fn test_grade_string_roundtrip() -> Fallible<()> {
        let grades = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy];
        for grade in grades {
            assert_eq!(grade, Grade::try_from(grade.as_str().to_string())?);
        }
        Ok(())
    }

    /// Test the serialization format of Grade.
    #[test]
    fn test_grade_serialization_format() -> Fallible<()> {
        let grades = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy];
        let expected = ["Again", "Hard", "Good", "Easy"];
        for (grade, expected) in zip(grades, expected) {
            let serialized = serde_json::to_string(&grade)?;
            let expected = format!("\"{}\"", expected);
            assert_eq!(serialized, expected);
        }
        Ok(())
    }

    #[test]
    fn test_invalid_grade_string() {
        let invalid_strings = ["", "Good", "perfect", "5"];
        for s in invalid_strings {
            assert!(Grade::try_from(s.to_string()).is_err());
        }
    }
}
