//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{QuestionsCommand, QuestionsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub questions: Arc<dyn QuestionsCommand>,
    pub questions_query: Arc<dyn QuestionsQuery>,
}

impl HttpState {
    /// Construct state from the driving ports.
    ///
    /// A single service usually implements both ports; pass clones of the
    /// same `Arc`.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use backend::domain::QaService;
    /// use backend::inbound::http::state::HttpState;
    /// use backend::test_support::{InMemoryQaRepository, fixed_clock};
    ///
    /// let repository = Arc::new(InMemoryQaRepository::default());
    /// let service = Arc::new(QaService::new(repository.clone(), repository, fixed_clock()));
    /// let state = HttpState::new(service.clone(), service);
    /// let _query = state.questions_query.clone();
    /// ```
    pub fn new(
        questions: Arc<dyn QuestionsCommand>,
        questions_query: Arc<dyn QuestionsQuery>,
    ) -> Self {
        Self {
            questions,
            questions_query,
        }
    }
}
