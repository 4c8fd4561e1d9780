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

//! Test helpers.

use wordcards_core::Timestamp;

use crate::error::Fallible;
use crate::store::CardStore;

/// Creates a temporary collection directory seeded with the given
/// (front, back) cards, all immediately due. Returns the directory path.
pub fn create_tmp_collection(cards: &[(&str, &str)]) -> Fallible<String> {
    let directory = tempfile::tempdir()?.keep();
    let store = CardStore::open_in(&directory)?;
    let now = Timestamp::now();
    for (front, back) in cards {
        store.create(front, back, now)?;
    }
    Ok(directory.display().to_string())
}
