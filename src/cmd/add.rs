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

use wordcards_core::Timestamp;

use crate::config::Config;
use crate::error::Fallible;
use crate::generate::GeminiGenerator;
use crate::generate::Generator;
use crate::generate::back_prompt;
use crate::store::CardStore;
use crate::utils::resolve_directory;

/// Adds a card to the collection. With `generate`, the back is produced by
/// the content generator; a generation failure still creates the card (with
/// an empty back) so the front text the user typed is never lost, and the
/// error message is never stored as card content.
pub async fn add_card(
    directory: Option<String>,
    front: String,
    back: Option<String>,
    generate: bool,
) -> Fallible<()> {
    let directory = resolve_directory(directory)?;
    let store = CardStore::open_in(&directory)?;
    let back = if generate {
        let config = Config::load(&directory)?;
        match GeminiGenerator::from_config(&config.generator) {
            Ok(generator) => generate_back(&generator, &front).await,
            Err(e) => {
                log::warn!("back generation failed: {e}");
                eprintln!("Generation failed ({e}); creating the card with an empty back.");
                String::new()
            }
        }
    } else {
        back.unwrap_or_default()
    };
    let card = store.create(&front, &back, Timestamp::now())?;
    println!("Added card {}: {}", card.id, card.front);
    if generate && card.back.is_empty() {
        println!("The back is empty; fill it in with `wordcards edit`.");
    }
    Ok(())
}

async fn generate_back(generator: &impl Generator, front: &str) -> String {
    match generator.generate(&back_prompt(front)).await {
        Ok(text) => text,
        Err(e) => {
            log::warn!("back generation failed: {e}");
            eprintln!("Generation failed ({e}); creating the card with an empty back.");
            String::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::fail;

    struct CannedGenerator {
        response: Option<String>,
    }

    impl Generator for CannedGenerator {
        async fn generate(&self, _prompt: &str) -> Fallible<String> {
            match &self.response {
                Some(text) => Ok(text.clone()),
                None => fail("generator unavailable."),
            }
        }
    }

    #[tokio::test]
    async fn test_generate_back_success() {
        let generator = CannedGenerator {
            response: Some("#### word\n\nmeaning".to_string()),
        };
        assert_eq!(
            generate_back(&generator, "word").await,
            "#### word\n\nmeaning"
        );
    }

    /// A failed generation yields an empty back, never the error text.
    #[tokio::test]
    async fn test_generate_back_failure_is_empty() {
        let generator = CannedGenerator { response: None };
        assert_eq!(generate_back(&generator, "word").await, "");
    }
}
