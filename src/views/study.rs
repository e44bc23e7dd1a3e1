use maud::{html, Markup};

use crate::models::Deck;
use crate::render::{render_content, Typesetter};
use crate::session::StudySession;
use crate::views::page;

/// The active study view for one session
pub fn study_page(
    deck: &Deck,
    session: &StudySession,
    typesetter: &dyn Typesetter,
    signed_in: bool,
) -> Markup {
    let back_link = format!("/decks/{}", deck.get_id());
    let study_link = format!("/decks/{}/study?session={}", deck.get_id(), session.get_id());

    page(
        &format!("Studying {}", deck.get_name()),
        signed_in,
        html! {
            h1 { "Studying " (deck.get_name()) }
            p { a href=(back_link) { "Back to deck" } }

            @if session.is_complete() {
                h2 { "Session complete" }
                p { "You studied " (session.get_studied_count()) " cards." }
                form method="post" action=(format!("/study/{}/restart", session.get_id())) {
                    button type="submit" { "Study again" }
                }
            } @else {
                p {
                    "Card " (session.get_current_index() + 1)
                    " of " (session.get_total())
                }
                @if let Some(card) = session.current_card() {
                    div class="study-card" {
                        div class="card-front" { (render_content(&card.get_front(), typesetter)) }
                        @if session.is_flipped() {
                            hr;
                            div class="card-back" { (render_content(&card.get_back(), typesetter)) }
                        }
                    }
                }
                @if session.is_flipped() {
                    form method="post" action=(format!("/study/{}/grade", session.get_id())) {
                        input type="hidden" name="remembered" value="true";
                        button type="submit" { "I remembered" }
                    }
                    form method="post" action=(format!("/study/{}/grade", session.get_id())) {
                        input type="hidden" name="remembered" value="false";
                        button type="submit" { "I forgot" }
                    }
                } @else {
                    form method="post" action=(format!("/study/{}/flip", session.get_id())) {
                        button type="submit" { "Show answer" }
                    }
                }
                p { small { a href=(study_link) { "Refresh" } } }
            }
        },
    )
}
