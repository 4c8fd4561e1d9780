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

use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;

/// The config filename inside a collection directory.
pub const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Collection configuration, read from `config.toml` in the collection
/// directory. Everything is optional: a collection with no config file
/// works, it just cannot generate card backs.
#[derive(Debug, Default, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub generator: GeneratorConfig,
}

#[derive(Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneratorConfig {
    /// API key for the content generator. The `GEMINI_API_KEY` environment
    /// variable takes precedence over the config file.
    pub api_key: Option<String>,
    pub model: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        GeneratorConfig {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl Config {
    /// Loads the configuration for a collection directory. A missing config
    /// file yields the defaults; a malformed one is an error.
    pub fn load(directory: &Path) -> Fallible<Config> {
        let path = directory.join(CONFIG_FILENAME);
        let mut config: Config = if path.is_file() {
            let text = std::fs::read_to_string(&path)?;
            toml::from_str(&text)?
        } else {
            Config::default()
        };
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                config.generator.api_key = Some(key);
            }
        }
        Ok(config)
    }
}
