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

use std::fs::write;

use crate::error::Fallible;
use crate::store::CardStore;
use crate::utils::resolve_directory;

/// Exports all cards, with their scheduling state, as a JSON array. Used
/// for backup and for bulk upload to an external table.
pub fn export_collection(directory: Option<String>, output: Option<String>) -> Fallible<()> {
    let directory = resolve_directory(directory)?;
    let store = CardStore::open_in(&directory)?;
    let cards = store.list()?;
    let json = serde_json::to_string_pretty(&cards)?;
    match output {
        Some(path) => write(path, json)?,
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::Value;
    use tempfile::tempdir;
    use wordcards_core::Timestamp;

    use super::*;

    #[test]
    fn test_export_to_file() -> Fallible<()> {
        let dir = tempdir()?;
        let now = Timestamp::try_from("2024-01-01T12:00:00.000".to_string()).unwrap();
        let store = CardStore::open_in(dir.path())?;
        store.create("serendipity", "a happy accident", now)?;
        store.create("ubiquitous", "", now)?;
        drop(store);

        let output = dir.path().join("export.json");
        export_collection(
            Some(dir.path().display().to_string()),
            Some(output.display().to_string()),
        )?;

        let text = std::fs::read_to_string(output)?;
        let parsed: Value = serde_json::from_str(&text)?;
        let cards = parsed.as_array().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0]["front"], "serendipity");
        assert_eq!(cards[0]["next_review_at"], "2024-01-01T12:00:00.000");
        assert_eq!(cards[1]["repetitions"], 0);
        Ok(())
    }
}
