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

use std::sync::Arc;
use std::sync::Mutex;

use tokio::sync::oneshot::Sender;
use wordcards_core::Card;
use wordcards_core::ScheduleState;
use wordcards_core::Timestamp;

use crate::store::CardStore;

#[derive(Clone)]
pub struct ServerState {
    pub total_cards: usize,
    pub session_started_at: Timestamp,
    pub mutable: Arc<Mutex<MutableState>>,
    pub shutdown_tx: Arc<Mutex<Option<Sender<()>>>>,
}

/// Session state behind one mutex: a review reads the card at the front of
/// the queue, computes the new schedule, and persists it without another
/// review of the same card interleaving.
pub struct MutableState {
    pub store: CardStore,
    /// The due queue, oldest-due first. A session snapshot: cards becoming
    /// due mid-session are not added.
    pub cards: Vec<Card>,
    pub reveal: bool,
    /// Applied reviews, newest last, kept for undo.
    pub reviews: Vec<ReviewRecord>,
    pub finished_at: Option<Timestamp>,
}

/// One applied review: the card as it was before grading, and the schedule
/// that was persisted. Undo writes the old schedule back.
pub struct ReviewRecord {
    pub card: Card,
    pub updated: ScheduleState,
}
