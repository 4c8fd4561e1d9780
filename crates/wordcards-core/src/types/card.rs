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

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::sm2::INITIAL_EASINESS;
use crate::types::timestamp::Timestamp;

/// A card's stable identity, assigned by the store. Survives edits to the
/// card's text.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct CardId(i64);

impl CardId {
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn into_inner(self) -> i64 {
        self.0
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The SM-2 scheduling state embedded in every card. Mutated only by
/// `sm2::apply_review`; created with the card and destroyed with it.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct ScheduleState {
    /// When the card is next due for review.
    pub next_review_at: Timestamp,
    /// Days until the next review after the last successful one. Zero for a
    /// card that has never been reviewed. Fractional days are kept here for
    /// compounding, even though the due timestamp is rounded to whole days.
    pub interval_days: f64,
    /// The easiness factor (EF) controlling interval growth. Never below 1.3.
    pub easiness_factor: f64,
    /// Consecutive successful reviews since the last failure.
    pub repetitions: u32,
}

impl ScheduleState {
    /// The state of a freshly created card: due immediately.
    pub fn initial(now: Timestamp) -> Self {
        ScheduleState {
            next_review_at: now,
            interval_days: 0.0,
            easiness_factor: INITIAL_EASINESS,
            repetitions: 0,
        }
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.next_review_at <= now
    }
}

/// A flashcard: a prompt, an answer, and its scheduling state.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// The prompt text. Never empty.
    pub front: String,
    /// The answer text, as markdown. May be empty while generation is
    /// pending or has failed.
    pub back: String,
    #[serde(flatten)]
    pub schedule: ScheduleState,
}
