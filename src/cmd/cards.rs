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

//! Card management commands: list, edit, delete.

use wordcards_core::Card;
use wordcards_core::CardId;

use crate::error::Fallible;
use crate::store::CardStore;
use crate::utils::resolve_directory;

pub fn list_cards(directory: Option<String>) -> Fallible<()> {
    let directory = resolve_directory(directory)?;
    let store = CardStore::open_in(&directory)?;
    let cards = store.list()?;
    if cards.is_empty() {
        println!("No cards yet.");
        return Ok(());
    }
    println!(
        "{:>6}  {:<30} {:<12} {:>8} {:>6} {:>6}",
        "id", "front", "due", "interval", "EF", "reps"
    );
    for card in &cards {
        println!("{}", format_card_row(card));
    }
    println!("Total cards: {}", cards.len());
    Ok(())
}

fn format_card_row(card: &Card) -> String {
    let due = card.schedule.next_review_at.to_string();
    let due_date = due.split('T').next().unwrap_or(&due).to_string();
    let mut front = card.front.clone();
    if front.chars().count() > 30 {
        front = front.chars().take(27).collect::<String>() + "...";
    }
    format!(
        "{:>6}  {:<30} {:<12} {:>8} {:>6.2} {:>6}",
        card.id.to_string(),
        front,
        due_date,
        card.schedule.interval_days.round() as i64,
        card.schedule.easiness_factor,
        card.schedule.repetitions,
    )
}

/// Partial text edit: only the provided fields change, and scheduling
/// state is never touched.
pub fn edit_card(
    directory: Option<String>,
    id: i64,
    front: Option<String>,
    back: Option<String>,
) -> Fallible<()> {
    let directory = resolve_directory(directory)?;
    let store = CardStore::open_in(&directory)?;
    let changed = store.update_text(CardId::new(id), front.as_deref(), back.as_deref())?;
    if changed {
        println!("Updated card {id}.");
    } else {
        println!("Nothing to change.");
    }
    Ok(())
}

pub fn delete_card(directory: Option<String>, id: i64) -> Fallible<()> {
    let directory = resolve_directory(directory)?;
    let store = CardStore::open_in(&directory)?;
    store.delete(CardId::new(id))?;
    println!("Deleted card {id}.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use wordcards_core::ScheduleState;
    use wordcards_core::Timestamp;

    use super::*;

    #[test]
    fn test_format_card_row_truncates_long_fronts() {
        let now = Timestamp::try_from("2024-01-01T12:00:00.000".to_string()).unwrap();
        let card = Card {
            id: CardId::new(3),
            front: "a".repeat(60),
            back: String::new(),
            schedule: ScheduleState::initial(now),
        };
        let row = format_card_row(&card);
        assert!(row.contains("aaa..."));
        assert!(row.contains("2024-01-01"));
        assert!(!row.contains(&"a".repeat(31)));
    }
}
