use maud::{html, Markup};

use crate::models::{Card, Deck};
use crate::render::{render_content, Typesetter};
use crate::views::page;

/// A deck with its full card list
pub fn deck_page(
    deck: &Deck,
    cards: &[Card],
    typesetter: &dyn Typesetter,
    signed_in: bool,
) -> Markup {
    page(
        &deck.get_name(),
        signed_in,
        html! {
            h1 { (deck.get_name()) }
            @if let Some(description) = deck.get_description() {
                p { (description) }
            }
            @if cards.is_empty() {
                p { "This deck has no cards yet." }
            } @else {
                p { a href=(format!("/decks/{}/study", deck.get_id())) { "Study this deck" } }
            }
            @for card in cards {
                div class="deck-card" {
                    div class="card-front" { (render_content(&card.get_front(), typesetter)) }
                    hr;
                    div class="card-back" { (render_content(&card.get_back(), typesetter)) }
                    p {
                        small {
                            "Difficulty: " (card.get_difficulty().as_str())
                            @if let Some(reviewed) = card.get_last_reviewed() {
                                " · last reviewed " (reviewed.format("%Y-%m-%d"))
                            }
                        }
                    }
                }
            }
        },
    )
}

/// Shown when a deck id resolves to nothing; a dead link is not an error
pub fn deck_missing_page(signed_in: bool) -> Markup {
    page(
        "Deck not found",
        signed_in,
        html! {
            h1 { "Deck not found" }
            p { "This deck does not exist or has been deleted." }
            p { a href="/" { "Back to your decks" } }
        },
    )
}
