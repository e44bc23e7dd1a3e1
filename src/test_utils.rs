use crate::models::{CardContent, Difficulty, RichContent};
use proptest::prelude::*;

/// Generates an arbitrary difficulty
pub fn arb_difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

/// Generates card text, including blank and whitespace-only strings
pub fn arb_card_text() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("   ".to_string()),
        "[a-zA-Z0-9 .,?!]{1,60}",
    ]
}

/// Generates an arbitrary URL-ish string for image/video lists
pub fn arb_url() -> impl Strategy<Value = String> {
    "[a-z]{3,10}"
        .prop_map(|s| format!("https://example.com/{}.png", s))
}

/// Generates a rectangular table with 1-4 rows and 1-4 columns
pub fn arb_table() -> impl Strategy<Value = Vec<Vec<String>>> {
    (1usize..=4, 1usize..=4).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(
            prop::collection::vec("[a-z0-9 ]{0,8}", cols..=cols),
            rows..=rows,
        )
    })
}

/// Generates arbitrary structured content
pub fn arb_rich_content() -> impl Strategy<Value = RichContent> {
    (
        arb_card_text(),
        prop::collection::vec(arb_url(), 0..3),
        prop::collection::vec(arb_url(), 0..3),
        prop::collection::vec(arb_table(), 0..2),
        prop::collection::vec("[a-z0-9^_* ]{1,20}", 0..3),
    )
        .prop_map(|(text, images, videos, tables, formulas)| RichContent {
            text,
            images,
            videos,
            tables,
            formulas,
        })
}

/// Generates either representation of card content
pub fn arb_card_content() -> impl Strategy<Value = CardContent> {
    prop_oneof![
        arb_card_text().prop_map(CardContent::Plain),
        arb_rich_content().prop_map(CardContent::Rich),
    ]
}

/// Generates card content guaranteed to pass the non-empty check
pub fn arb_non_empty_content() -> impl Strategy<Value = CardContent> {
    prop_oneof![
        "[a-zA-Z0-9][a-zA-Z0-9 ]{0,40}".prop_map(CardContent::Plain),
        (arb_card_text(), prop::collection::vec(arb_url(), 1..3)).prop_map(|(text, images)| {
            CardContent::Rich(RichContent {
                text,
                images,
                ..RichContent::default()
            })
        }),
    ]
}
