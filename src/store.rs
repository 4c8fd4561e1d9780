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

//! The card store: a SQLite-backed collection of cards.
//!
//! The store owns durable card data and identity. Scheduling math lives in
//! `wordcards-core`; this module only reads and writes state.

use std::path::Path;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::params;

use wordcards_core::Card;
use wordcards_core::CardId;
use wordcards_core::ScheduleState;
use wordcards_core::Timestamp;

use crate::error::Fallible;
use crate::error::fail;

/// The database filename inside a collection directory.
pub const DB_FILENAME: &str = "cards.db";

pub struct CardStore {
    conn: Connection,
}

impl CardStore {
    /// Opens (creating if necessary) the card database at the given path.
    pub fn open(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS cards (
                id              INTEGER PRIMARY KEY,
                front           TEXT NOT NULL,
                back            TEXT NOT NULL,
                next_review_at  TEXT NOT NULL,
                interval_days   REAL NOT NULL,
                easiness_factor REAL NOT NULL,
                repetitions     INTEGER NOT NULL
            );",
        )?;
        Ok(CardStore { conn })
    }

    /// Opens the card database inside a collection directory.
    pub fn open_in(directory: &Path) -> Fallible<Self> {
        Self::open(&directory.join(DB_FILENAME))
    }

    /// All cards in storage (id) order.
    pub fn list(&self) -> Fallible<Vec<Card>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, front, back, next_review_at, interval_days, easiness_factor, repetitions
             FROM cards ORDER BY id",
        )?;
        let cards = stmt
            .query_map([], row_to_card)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(cards)
    }

    pub fn get(&self, id: CardId) -> Fallible<Card> {
        let card = self
            .conn
            .query_row(
                "SELECT id, front, back, next_review_at, interval_days, easiness_factor, repetitions
                 FROM cards WHERE id = ?1",
                params![id.into_inner()],
                row_to_card,
            )
            .optional()?;
        match card {
            Some(card) => Ok(card),
            None => fail(format!("no card with id {id}.")),
        }
    }

    /// Creates a card with default scheduling state (due immediately) and
    /// returns it with its assigned identity.
    pub fn create(&self, front: &str, back: &str, now: Timestamp) -> Fallible<Card> {
        if front.trim().is_empty() {
            return fail("card front must not be empty.");
        }
        let schedule = ScheduleState::initial(now);
        self.conn.execute(
            "INSERT INTO cards (front, back, next_review_at, interval_days, easiness_factor, repetitions)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                front,
                back,
                schedule.next_review_at.to_string(),
                schedule.interval_days,
                schedule.easiness_factor,
                schedule.repetitions,
            ],
        )?;
        let id = CardId::new(self.conn.last_insert_rowid());
        Ok(Card {
            id,
            front: front.to_string(),
            back: back.to_string(),
            schedule,
        })
    }

    /// Partial text update: only the provided fields change, the scheduling
    /// state never does. Returns `Ok(false)` when neither field differs from
    /// the current values.
    pub fn update_text(
        &self,
        id: CardId,
        front: Option<&str>,
        back: Option<&str>,
    ) -> Fallible<bool> {
        let current = self.get(id)?;
        let front = front.unwrap_or(&current.front);
        let back = back.unwrap_or(&current.back);
        if front == current.front && back == current.back {
            return Ok(false);
        }
        if front.trim().is_empty() {
            return fail("card front must not be empty.");
        }
        self.conn.execute(
            "UPDATE cards SET front = ?1, back = ?2 WHERE id = ?3",
            params![front, back, id.into_inner()],
        )?;
        Ok(true)
    }

    /// Removes a card and its embedded state permanently. Deleting a
    /// non-existent id is an error, not a silent success.
    pub fn delete(&self, id: CardId) -> Fallible<()> {
        let rows = self
            .conn
            .execute("DELETE FROM cards WHERE id = ?1", params![id.into_inner()])?;
        if rows == 0 {
            return fail(format!("no card with id {id}."));
        }
        Ok(())
    }

    /// Persists the outcome of a review. The write is conditioned on the
    /// schedule the review was computed from, so a retry after a reported
    /// failure cannot double-apply, and a write racing another session is
    /// rejected instead of lost.
    pub fn persist_review(
        &self,
        id: CardId,
        previous: &ScheduleState,
        updated: &ScheduleState,
    ) -> Fallible<()> {
        let rows = self.conn.execute(
            "UPDATE cards
             SET next_review_at = ?1, interval_days = ?2, easiness_factor = ?3, repetitions = ?4
             WHERE id = ?5 AND next_review_at = ?6 AND repetitions = ?7",
            params![
                updated.next_review_at.to_string(),
                updated.interval_days,
                updated.easiness_factor,
                updated.repetitions,
                id.into_inner(),
                previous.next_review_at.to_string(),
                previous.repetitions,
            ],
        )?;
        if rows == 0 {
            // Distinguish a missing card from a concurrent modification.
            self.get(id)?;
            return fail(format!(
                "card {id} was modified since it was read; review not applied."
            ));
        }
        Ok(())
    }
}

/// A malformed due timestamp is recovered as the epoch: the card becomes
/// immediately due and sorts to the front of the queue. Corrupt state must
/// never hide a card from review.
fn row_to_card(row: &Row) -> rusqlite::Result<Card> {
    let id = CardId::new(row.get(0)?);
    let raw_due: String = row.get(3)?;
    let next_review_at = match Timestamp::try_from(raw_due) {
        Ok(ts) => ts,
        Err(e) => {
            log::warn!("card {id}: {e}; treating card as due immediately");
            Timestamp::UNIX_EPOCH
        }
    };
    Ok(Card {
        id,
        front: row.get(1)?,
        back: row.get(2)?,
        schedule: ScheduleState {
            next_review_at,
            interval_days: row.get(4)?,
            easiness_factor: row.get(5)?,
            repetitions: row.get(6)?,
        },
    })
}
