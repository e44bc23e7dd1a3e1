//! Turns stored card content into sanitized, typeset display markup.
//!
//! Legacy plain-string content may carry arbitrary rich-text markup and
//! `$...$` / `$$...$$` formula spans; structured content renders each field
//! in a fixed order. All untrusted markup passes through the sanitizer
//! before it reaches the page.

pub mod formula;

pub use formula::{BasicTypesetter, FormulaError};

use crate::models::CardContent;
use maud::{html, Markup, PreEscaped};

/// Pluggable math renderer
///
/// Input is the raw expression and whether it should be typeset in display
/// (block) mode; output is safe display markup or a parse error. Callers fall
/// back to the literal delimited text on error.
pub trait Typesetter: Send + Sync {
    fn typeset(&self, expr: &str, display: bool) -> Result<Markup, FormulaError>;
}

/// One run of legacy text: either ordinary markup or a formula span
#[derive(Debug, Clone, PartialEq)]
pub enum TextSegment {
    Plain(String),
    /// Inline `$...$` formula, inner expression trimmed
    Inline(String),
    /// Block `$$...$$` formula, inner expression trimmed
    Block(String),
}

/// Splits legacy text into plain runs and formula spans
///
/// Block `$$...$$` markers are matched before inline `$...$` ones so a block
/// span is never read as two inline spans. A span's body must be non-empty
/// and free of `$`; anything that does not close properly stays plain text.
pub fn split_formula_segments(text: &str) -> Vec<TextSegment> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'$' {
            i += 1;
            continue;
        }

        let (open_len, display) = if bytes[i..].starts_with(b"$$") {
            (2, true)
        } else {
            (1, false)
        };
        let body_start = i + open_len;
        let close = if display { "$$" } else { "$" };

        let span = text[body_start..].find(close).and_then(|offset| {
            let body = &text[body_start..body_start + offset];
            if body.is_empty() || body.contains('$') {
                None
            } else {
                Some((body, body_start + offset + open_len))
            }
        });

        match span {
            Some((body, end)) => {
                if plain_start < i {
                    segments.push(TextSegment::Plain(text[plain_start..i].to_string()));
                }
                let body = body.trim().to_string();
                segments.push(if display {
                    TextSegment::Block(body)
                } else {
                    TextSegment::Inline(body)
                });
                plain_start = end;
                i = end;
            }
            None => {
                i += open_len;
            }
        }
    }

    if plain_start < text.len() {
        segments.push(TextSegment::Plain(text[plain_start..].to_string()));
    }

    segments
}

/// Renders legacy text: sanitized markup with formula spans typeset
///
/// A span whose expression the typesetter rejects is shown as its literal
/// delimited text; surrounding content still renders.
pub fn render_text(text: &str, typesetter: &dyn Typesetter) -> Markup {
    html! {
        @for segment in split_formula_segments(text) {
            @match segment {
                TextSegment::Plain(markup) => {
                    (PreEscaped(ammonia::clean(&markup)))
                }
                TextSegment::Inline(expr) => {
                    @match typesetter.typeset(&expr, false) {
                        Ok(rendered) => { span class="formula-inline" { (rendered) } }
                        Err(_) => { span class="formula-inline" { "$" (expr) "$" } }
                    }
                }
                TextSegment::Block(expr) => {
                    @match typesetter.typeset(&expr, true) {
                        Ok(rendered) => { span class="formula-block" { (rendered) } }
                        Err(_) => { span class="formula-block" { "$$" (expr) "$$" } }
                    }
                }
            }
        }
    }
}

/// Renders a card side for display
///
/// Structured content renders its fields in a fixed order: text, images,
/// videos, tables, then standalone formulas.
pub fn render_content(content: &CardContent, typesetter: &dyn Typesetter) -> Markup {
    match content {
        CardContent::Plain(text) => render_text(text, typesetter),
        CardContent::Rich(rich) => html! {
            @if !rich.text.trim().is_empty() {
                div class="content-text" { (render_text(&rich.text, typesetter)) }
            }
            @for url in &rich.images {
                div class="content-image" {
                    img src=(url)
                        alt="Card image"
                        onerror="this.src='https://via.placeholder.com/400x300?text=Image+not+found'";
                }
            }
            @for url in &rich.videos {
                div class="content-video" {
                    iframe src=(embed_url(url)) allowfullscreen {}
                }
            }
            @for table in &rich.tables {
                table class="content-table" {
                    tbody {
                        @for (row_index, row) in table.iter().enumerate() {
                            tr class=(if row_index % 2 == 0 { "row-even" } else { "row-odd" }) {
                                @for cell in row {
                                    @if cell.is_empty() {
                                        td { "\u{a0}" }
                                    } @else {
                                        td { (cell) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
            @for expr in &rich.formulas {
                div class="content-formula" {
                    @match typesetter.typeset(expr, true) {
                        Ok(rendered) => { (rendered) }
                        Err(_) => { (expr) }
                    }
                }
            }
        },
    }
}

/// Resolves a video URL to an embeddable player URL
///
/// YouTube watch and short links become `youtube.com/embed` URLs, Vimeo
/// links become `player.vimeo.com` URLs; anything else passes through
/// unchanged, as does a recognized host with an unextractable id.
pub fn embed_url(url: &str) -> String {
    if url.contains("youtube.com/watch") || url.contains("youtu.be/") {
        let id = url
            .split_once("v=")
            .map(|(_, rest)| rest)
            .or_else(|| url.split_once("youtu.be/").map(|(_, rest)| rest))
            .map(|rest| {
                rest.split(['&', '\n', '?', '#'])
                    .next()
                    .unwrap_or("")
            })
            .filter(|id| !id.is_empty());

        return match id {
            Some(id) => format!("https://www.youtube.com/embed/{}", id),
            None => url.to_string(),
        };
    }

    if url.contains("vimeo.com/") {
        let id: String = url
            .split_once("vimeo.com/")
            .map(|(_, rest)| rest.chars().take_while(|c| c.is_ascii_digit()).collect())
            .unwrap_or_default();

        if !id.is_empty() {
            return format!("https://player.vimeo.com/video/{}", id);
        }
        return url.to_string();
    }

    url.to_string()
}
