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

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::PreEscaped;
use maud::html;

use wordcards_core::Card;
use wordcards_core::markdown::markdown_to_html;

use crate::cmd::review::state::MutableState;
use crate::cmd::review::state::ServerState;
use crate::cmd::review::template::page_template;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mutable = state.mutable.lock().unwrap();
    let body = if mutable.finished_at.is_some() || mutable.cards.is_empty() {
        render_completion(&state, &mutable)
    } else {
        render_session(&state, &mutable)
    };
    (StatusCode::OK, Html(page_template(body).into_string()))
}

fn render_session(state: &ServerState, mutable: &MutableState) -> Markup {
    let undo_disabled = mutable.reviews.is_empty();
    let cards_done = state.total_cards - mutable.cards.len();
    let percent = if state.total_cards == 0 {
        100
    } else {
        (cards_done * 100) / state.total_cards
    };
    let progress_style = format!("width: {}%;", percent);
    let card = &mutable.cards[0];
    let card_content = render_card(card, mutable.reveal);
    let card_controls = if mutable.reveal {
        html! {
            form action="/" method="post" {
                div.grades {
                    input id="again" type="submit" name="action" value="Again" title="Failed to recall. Shortcut: 1.";
                    input id="hard" type="submit" name="action" value="Hard" title="Recalled with difficulty. Shortcut: 2.";
                    input id="good" type="submit" name="action" value="Good" title="Recalled well. Shortcut: 3.";
                    input id="easy" type="submit" name="action" value="Easy" title="Recalled effortlessly. Shortcut: 4.";
                }
            }
        }
    } else {
        html! {
            form action="/" method="post" {
                input id="reveal" type="submit" name="action" value="Reveal" title="Show the answer. Shortcut: space.";
            }
        }
    };
    html! {
        div.root {
            div.header {
                form.header-action action="/" method="post" {
                    (undo_button(undo_disabled))
                }
                div.progress-bar {
                    div.progress-fill style=(progress_style) {}
                }
                form.header-action action="/" method="post" {
                    (end_button())
                }
            }
            div.card-container {
                div.card {
                    div.card-header {
                        span.counter { (cards_done + 1) " / " (state.total_cards) }
                    }
                    (card_content)
                }
            }
            div.controls {
                (card_controls)
            }
        }
    }
}

fn render_card(card: &Card, reveal: bool) -> Markup {
    let inner = if reveal {
        let back = markdown_to_html(&card.back);
        html! {
            div.question { (card.front) }
            div.answer.rich-text { (PreEscaped(back)) }
        }
    } else {
        html! {
            div.question { (card.front) }
            div.answer {}
        }
    };
    html! {
        div.card-content {
            (inner)
        }
    }
}

fn render_completion(state: &ServerState, mutable: &MutableState) -> Markup {
    let total_cards = state.total_cards;
    let cards_reviewed = state.total_cards - mutable.cards.len();
    let finished_at = mutable.finished_at.unwrap_or(state.session_started_at);
    let duration = finished_at.seconds_since(state.session_started_at);
    let pace = if cards_reviewed == 0 {
        "0.00".to_string()
    } else {
        format!("{:.2}", duration as f64 / cards_reviewed as f64)
    };
    html! {
        div.finished {
            h1 { "Session Completed \u{1F389}" }
            div.summary {
                "Reviewed " (cards_reviewed) " cards in " (duration) " seconds."
            }
            h2 { "Session Stats" }
            div.stats {
                table {
                    tbody {
                        tr {
                            td.key { "Total Cards" }
                            td.val { (total_cards) }
                        }
                        tr {
                            td.key { "Cards Reviewed" }
                            td.val { (cards_reviewed) }
                        }
                        tr {
                            td.key { "Started" }
                            td.val { (state.session_started_at) }
                        }
                        tr {
                            td.key { "Finished" }
                            td.val { (finished_at) }
                        }
                        tr {
                            td.key { "Duration (seconds)" }
                            td.val { (duration) }
                        }
                        tr {
                            td.key { "Pace (s/card)" }
                            td.val { (pace) }
                        }
                    }
                }
            }
            div.shutdown-container {
                form action="/" method="post" {
                    input #shutdown .shutdown-button type="submit" name="action" value="Shutdown" title="Shut down the server";
                }
            }
        }
    }
}

fn undo_button(disabled: bool) -> Markup {
    if disabled {
        html! {
            input id="undo" type="submit" name="action" value="Undo" disabled;
        }
    } else {
        html! {
            input id="undo" type="submit" name="action" value="Undo" title="Undo last review. Shortcut: u.";
        }
    }
}

fn end_button() -> Markup {
    html! {
        input id="end" type="submit" name="action" value="End" title="End the session early.";
    }
}
