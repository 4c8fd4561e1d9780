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

use axum::extract::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use serde::Deserialize;

use wordcards_core::Grade;
use wordcards_core::Timestamp;
use wordcards_core::apply_review;

use crate::cmd::review::state::ReviewRecord;
use crate::cmd::review::state::ServerState;
use crate::error::Fallible;

#[derive(Deserialize)]
pub struct ActionForm {
    action: String,
}

pub async fn post_handler(State(state): State<ServerState>, Form(form): Form<ActionForm>) -> Response {
    match apply_action(&state, &form.action) {
        Ok(()) => Redirect::to("/").into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(e.to_string())).into_response(),
    }
}

fn apply_action(state: &ServerState, action: &str) -> Fallible<()> {
    match action {
        "Reveal" => {
            let mut mutable = state.mutable.lock().unwrap();
            mutable.reveal = true;
            Ok(())
        }
        "Again" | "Hard" | "Good" | "Easy" => {
            let grade = Grade::try_from(action.to_lowercase())?;
            grade_current_card(state, grade)
        }
        "Undo" => undo_last_review(state),
        "End" => {
            let mut mutable = state.mutable.lock().unwrap();
            mutable.finished_at = Some(Timestamp::now());
            Ok(())
        }
        "Shutdown" => {
            if let Some(tx) = state.shutdown_tx.lock().unwrap().take() {
                let _ = tx.send(());
            }
            Ok(())
        }
        _ => {
            // Unknown actions (hand-crafted requests) are ignored.
            log::warn!("unknown action: {action}");
            Ok(())
        }
    }
}

/// Grades the card at the front of the queue: compute the new schedule,
/// persist it, then advance. Holding the lock across all three steps keeps
/// the review atomic per card.
fn grade_current_card(state: &ServerState, grade: Grade) -> Fallible<()> {
    let mut mutable = state.mutable.lock().unwrap();
    let Some(card) = mutable.cards.first().cloned() else {
        return Ok(());
    };
    let updated = apply_review(&card.schedule, grade, Timestamp::now());
    mutable.store.persist_review(card.id, &card.schedule, &updated)?;
    mutable.cards.remove(0);
    mutable.reviews.push(ReviewRecord { card, updated });
    mutable.reveal = false;
    if mutable.cards.is_empty() {
        mutable.finished_at = Some(Timestamp::now());
    }
    Ok(())
}

/// Reverts the most recent review: the old schedule is written back (the
/// write is conditioned on the schedule we persisted, so an undo cannot
/// clobber a review applied elsewhere) and the card returns to the front of
/// the queue.
fn undo_last_review(state: &ServerState) -> Fallible<()> {
    let mut mutable = state.mutable.lock().unwrap();
    let Some(record) = mutable.reviews.pop() else {
        return Ok(());
    };
    let ReviewRecord { card, updated } = record;
    mutable
        .store
        .persist_review(card.id, &updated, &card.schedule)?;
    mutable.cards.insert(0, card);
    mutable.reveal = false;
    mutable.finished_at = None;
    Ok(())
}
