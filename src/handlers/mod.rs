/// Web API Handlers
///
/// This module contains the handlers for the RESTful API endpoints and the
/// server-rendered HTML pages. Each handler is responsible for processing a
/// specific type of HTTP request, extracting the necessary data, calling the
/// appropriate repository or session functions, and returning a properly
/// formatted response.

mod auth_handlers;
mod card_handlers;
mod deck_handlers;
mod page_handlers;
mod study_handlers;

// Re-export all handlers
pub use auth_handlers::*;
pub use card_handlers::*;
pub use deck_handlers::*;
pub use page_handlers::*;
pub use study_handlers::*;

#[cfg(test)]
pub(crate) fn test_state() -> crate::AppState {
    use crate::auth::StubAuthProvider;
    use crate::render::BasicTypesetter;
    use std::sync::Arc;
    use std::time::Duration;

    crate::AppState::new(
        crate::repo::tests::setup_test_db(),
        Arc::new(StubAuthProvider::with_delay(Duration::ZERO)),
        Arc::new(BasicTypesetter::new()),
    )
}
