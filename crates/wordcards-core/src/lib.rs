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

//! wordcards-core: Core library for the wordcards spaced repetition system.
//!
//! This library provides the pure, deterministic parts of the system:
//! - The SM-2 scheduling algorithm over four discrete grades
//! - Card types and per-card scheduling state
//! - Due-queue selection and ordering
//! - Markdown to HTML rendering for card backs
//!
//! Reading the clock is behind the `clock` feature; everything else is
//! side-effect free.

pub mod error;
pub mod markdown;
pub mod queue;
pub mod sm2;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use queue::select_due;
pub use sm2::{Grade, apply_review};
pub use types::card::{Card, CardId, ScheduleState};
pub use types::timestamp::Timestamp;
