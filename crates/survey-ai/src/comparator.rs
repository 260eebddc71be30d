//! Narrative comparison of two organizations.

use std::sync::Arc;

use survey_config::GeminiConfig;
use survey_core::filter::ResponseFilter;
use survey_core::narrative::{NarrativeComparison, NarrativeSubject, build_prompt, extract};
use survey_db::service::SurveyService;

use crate::error::AiError;
use crate::gemini::GeminiClient;
use crate::generator::TextGenerator;

/// Builds the prompt, calls the generator once and shapes the reply.
///
/// Holds no generator when no credential was configured; every comparison
/// then fails with [`AiError::NotConfigured`].
#[derive(Clone, Default)]
pub struct NarrativeComparator {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl NarrativeComparator {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator: Some(generator),
        }
    }

    /// A comparator that rejects every request.
    #[must_use]
    pub fn disabled() -> Self {
        Self::default()
    }

    /// Wire up a Gemini client when an API key is configured.
    ///
    /// # Errors
    ///
    /// Returns [`AiError::Http`] if the HTTP client cannot be built.
    pub fn from_config(config: &GeminiConfig) -> Result<Self, AiError> {
        if !config.is_configured() {
            tracing::warn!("no Gemini API key configured; narrative comparison disabled");
            return Ok(Self::disabled());
        }
        let client = GeminiClient::from_config(config)?;
        tracing::info!(model = %config.model, "narrative comparison enabled");
        Ok(Self::new(Arc::new(client)))
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    /// Compare two organizations' filtered responses.
    ///
    /// The model is called exactly once, and only after both organizations
    /// resolve and the filter is valid.
    ///
    /// # Errors
    ///
    /// - [`AiError::NotConfigured`] when no generator is available.
    /// - a not-found error when either organization is unknown.
    /// - an invalid-range error when `end_date < start_date`.
    /// - an upstream error when the model call fails.
    pub async fn compare(
        &self,
        service: &SurveyService,
        first_id: i64,
        second_id: i64,
        filter: &ResponseFilter,
    ) -> Result<NarrativeComparison, AiError> {
        let generator = self.generator.as_ref().ok_or(AiError::NotConfigured)?;

        let first = service.get_organization(first_id).await?;
        let second = service.get_organization(second_id).await?;
        filter.validate()?;

        let first_responses = service
            .filter_responses(&filter.for_organization(first.id))
            .await?;
        let second_responses = service
            .filter_responses(&filter.for_organization(second.id))
            .await?;

        let prompt = build_prompt(
            NarrativeSubject {
                organization: &first,
                responses: &first_responses,
            },
            NarrativeSubject {
                organization: &second,
                responses: &second_responses,
            },
        );

        let reply = generator.generate(&prompt).await?;
        let extraction = extract(&reply);
        if extraction.is_degraded() {
            tracing::warn!(
                generator = generator.id(),
                reply_len = reply.len(),
                "model reply had no JSON object; returning raw text as summary"
            );
        }
        Ok(extraction.into_comparison())
    }
}
