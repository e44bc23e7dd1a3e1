use maud::{html, Markup};

use crate::models::Deck;
use crate::views::page;

/// The deck list, newest first
pub fn decks_page(decks: &[Deck], signed_in: bool) -> Markup {
    page(
        "Decks",
        signed_in,
        html! {
            h1 { "Your decks" }
            @if decks.is_empty() {
                p { "No decks yet. Create one through the API to get started." }
            }
            @for deck in decks {
                div class="deck-card" data-color=(deck.get_color()) {
                    h2 { a href=(format!("/decks/{}", deck.get_id())) { (deck.get_name()) } }
                    @if let Some(description) = deck.get_description() {
                        p { (description) }
                    }
                    p {
                        (deck.get_card_count())
                        @if deck.get_card_count() == 1 { " card" } @else { " cards" }
                    }
                }
            }
        },
    )
}
