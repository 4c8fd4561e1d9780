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

use pulldown_cmark::Options;
use pulldown_cmark::Parser;
use pulldown_cmark::html::push_html;

/// Convert Markdown to HTML. Card backs are markdown (typically a heading,
/// a definition, and example sentences).
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    let parser = Parser::new_ext(markdown, options);
    let mut html_output: String = String::new();
    push_html(&mut html_output, parser);
    html_output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_html_basic() {
        let markdown = "This is **bold** text.";
        let html = markdown_to_html(markdown);
        assert_eq!(html, "<p>This is <strong>bold</strong> text.</p>\n");
    }

    #[test]
    fn test_markdown_to_html_heading() {
        let markdown = "#### ubiquitous\n\npresent everywhere";
        let html = markdown_to_html(markdown);
        assert!(html.contains("<h4>ubiquitous</h4>"));
        assert!(html.contains("<p>present everywhere</p>"));
    }

    #[test]
    fn test_markdown_to_html_empty() {
        assert_eq!(markdown_to_html(""), "");
    }
}
