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

use std::process::exit;

use clap::Parser;
use tokio::spawn;

use wordcards_core::Timestamp;

use crate::cmd::add::add_card;
use crate::cmd::cards::delete_card;
use crate::cmd::cards::edit_card;
use crate::cmd::cards::list_cards;
use crate::cmd::export::export_collection;
use crate::cmd::review::server::ServerConfig;
use crate::cmd::review::server::start_server;
use crate::error::Fallible;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Review due cards through a web interface.
    Review {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Maximum number of cards to review in a session. By default, all cards due are reviewed.
        #[arg(long)]
        card_limit: Option<usize>,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// The port to use for the web server. Default is 8000.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
    },
    /// Add a card to the collection.
    Add {
        /// The front (prompt) text of the card.
        front: String,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
        /// The back (answer) text of the card, as markdown.
        #[arg(long, conflicts_with = "generate")]
        back: Option<String>,
        /// Generate the back text with the content generator.
        #[arg(long)]
        generate: bool,
    },
    /// List all cards with their scheduling state.
    List {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Edit a card's text. Fields not given are left unchanged.
    Edit {
        /// The id of the card to edit.
        id: i64,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
        /// New front text.
        #[arg(long)]
        front: Option<String>,
        /// New back text.
        #[arg(long)]
        back: Option<String>,
    },
    /// Delete a card permanently.
    Delete {
        /// The id of the card to delete.
        id: i64,
        /// Path to the collection directory. By default, the current working directory is used.
        #[arg(long)]
        directory: Option<String>,
    },
    /// Export a collection as JSON.
    Export {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Optional path to the output file. By default, the output is printed to stdout.
        #[arg(long)]
        output: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Review {
            directory,
            card_limit,
            host,
            port,
            open_browser,
        } => {
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                directory,
                host,
                port,
                session_started_at: Timestamp::now(),
                card_limit,
            };
            start_server(config).await
        }
        Command::Add {
            front,
            directory,
            back,
            generate,
        } => add_card(directory, front, back, generate).await,
        Command::List { directory } => list_cards(directory),
        Command::Edit {
            id,
            directory,
            front,
            back,
        } => edit_card(directory, id, front, back),
        Command::Delete { id, directory } => delete_card(directory, id),
        Command::Export { directory, output } => export_collection(directory, output),
    }
}
