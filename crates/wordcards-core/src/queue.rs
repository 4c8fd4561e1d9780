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

//! Due-queue construction: filtering and ordering the cards to review.

use crate::types::card::Card;
use crate::types::timestamp::Timestamp;

/// Selects the cards due for review at `now`, ordered oldest-due first so
/// the learner clears the largest backlog first. The sort is stable: cards
/// with equal due timestamps keep their storage order. Each returned card
/// carries its identity, so a later review hits the exact card even when
/// front texts collide.
pub fn select_due(cards: Vec<Card>, now: Timestamp) -> Vec<Card> {
    let mut due: Vec<Card> = cards
        .into_iter()
        .filter(|card| card.schedule.is_due(now))
        .collect();
    due.sort_by_key(|card| card.schedule.next_review_at);
    due
}
