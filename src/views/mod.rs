pub mod auth;
pub mod deck_detail;
pub mod decks;
pub mod layout;
pub mod study;

pub use layout::page;
