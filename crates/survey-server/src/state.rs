//! Shared application state.

use std::sync::Arc;

use survey_ai::NarrativeComparator;
use survey_db::service::SurveyService;

pub struct AppState {
    pub service: SurveyService,
    pub comparator: NarrativeComparator,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    #[must_use]
    pub fn shared(service: SurveyService, comparator: NarrativeComparator) -> SharedState {
        Arc::new(Self {
            service,
            comparator,
        })
    }
}
