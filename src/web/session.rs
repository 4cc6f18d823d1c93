//! One form submission, from validation to generated posts.

use chrono::NaiveDate;

use super::form::{SubmissionForm, ValidationError};
use crate::generator::{generate_all, GeneratedPost};
use crate::LLMProvider;

/// What a submission produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No API key was entered; nothing was sent anywhere.
    MissingCredential,
    /// The provider refused the key before any generation.
    InitializationFailed(String),
    /// The generate button was not pressed in this submission.
    Idle,
    /// Generate was pressed but the event fields are not usable.
    Incomplete(ValidationError),
    /// One result per platform, in display order.
    Generated(Vec<GeneratedPost>),
}

/// State of one interaction: the submitted form, the date it was judged
/// against, and the outcome.
#[derive(Debug, Clone)]
pub struct GenerationSession {
    pub form: SubmissionForm,
    pub today: NaiveDate,
    pub outcome: Outcome,
}

impl GenerationSession {
    /// The state shown before anything has been submitted.
    pub fn initial(today: NaiveDate) -> Self {
        Self {
            form: SubmissionForm::default(),
            today,
            outcome: Outcome::MissingCredential,
        }
    }

    /// Run a submission against the selected provider.
    #[tracing::instrument(skip_all, fields(provider = %form.provider))]
    pub async fn run(form: SubmissionForm, today: NaiveDate, provider: &dyn LLMProvider) -> Self {
        let outcome = Self::evaluate(&form, today, provider).await;
        Self {
            form,
            today,
            outcome,
        }
    }

    async fn evaluate(form: &SubmissionForm, today: NaiveDate, provider: &dyn LLMProvider) -> Outcome {
        let Some(credential) = form.credential() else {
            tracing::debug!("no API key supplied");
            return Outcome::MissingCredential;
        };

        if let Err(e) = provider.validate_credential(&credential) {
            tracing::warn!(error = %e, "provider initialization failed");
            return Outcome::InitializationFailed(format!(
                "Error initializing {}: {e}",
                form.provider
            ));
        }

        if !form.generate_requested() {
            return Outcome::Idle;
        }

        let event = match form.validate(today) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(reason = %e, "submission incomplete");
                return Outcome::Incomplete(e);
            }
        };

        tracing::info!(event = %event.name, "generating posts");
        Outcome::Generated(generate_all(provider, &credential, &event).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::RecordingProvider;
    use crate::web::form::GENERATE_ACTION;
    use crate::{Error, Platform, ProviderType};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
    }

    fn conference_form() -> SubmissionForm {
        SubmissionForm {
            provider: ProviderType::Gemini,
            api_key: "valid-key".to_string(),
            event_name: "Tech Conference 2025".to_string(),
            event_date: "2025-01-15".to_string(),
            venue: "Virtual Event".to_string(),
            description: "Join us...".to_string(),
            action: Some(GENERATE_ACTION.to_string()),
        }
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_calls() {
        let provider = RecordingProvider::replying("post");
        let form = SubmissionForm {
            api_key: String::new(),
            ..conference_form()
        };

        let session = GenerationSession::run(form, today(), &provider).await;
        assert_eq!(session.outcome, Outcome::MissingCredential);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_initialization_failure_blocks_generation() {
        let provider = RecordingProvider::replying("post").rejecting_credentials("bad key");
        let session = GenerationSession::run(conference_form(), today(), &provider).await;

        assert_eq!(
            session.outcome,
            Outcome::InitializationFailed(
                "Error initializing Gemini: Authentication failed: bad key".to_string()
            )
        );
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_without_generate_action_nothing_happens() {
        let provider = RecordingProvider::replying("post");
        let form = SubmissionForm {
            action: None,
            ..conference_form()
        };

        let session = GenerationSession::run(form, today(), &provider).await;
        assert_eq!(session.outcome, Outcome::Idle);
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_incomplete_form() {
        let provider = RecordingProvider::replying("post");
        let form = SubmissionForm {
            event_name: " ".to_string(),
            ..conference_form()
        };

        let session = GenerationSession::run(form, today(), &provider).await;
        assert!(matches!(session.outcome, Outcome::Incomplete(ValidationError::MissingFields(_))));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_past_date_is_rejected() {
        let provider = RecordingProvider::replying("post");
        let session = GenerationSession::run(
            conference_form(),
            NaiveDate::from_ymd_opt(2025, 1, 16).unwrap(),
            &provider,
        )
        .await;

        assert!(matches!(session.outcome, Outcome::Incomplete(ValidationError::DateInPast { .. })));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_end_to_end_prompts_carry_the_event() {
        let provider = RecordingProvider::replying("A generated post");
        let session = GenerationSession::run(conference_form(), today(), &provider).await;

        let Outcome::Generated(posts) = session.outcome else {
            panic!("expected generated posts");
        };
        assert_eq!(posts.len(), 3);
        assert!(posts.iter().all(|p| !p.text.is_empty()));

        let prompts = provider.prompts();
        assert_eq!(prompts.len(), 3);
        for (prompt, platform) in prompts.iter().zip(Platform::ALL) {
            assert!(prompt.contains(platform.name()));
            assert!(prompt.contains("Tech Conference 2025"));
            assert!(prompt.contains("January 15, 2025"));
            assert!(prompt.contains("Virtual Event"));
            assert!(prompt.contains("Join us..."));
        }
    }

    #[tokio::test]
    async fn test_one_platform_failing_leaves_others_intact() {
        let provider = RecordingProvider::replying("fine")
            .fail_on(Platform::WhatsApp, || Error::provider("Gemini", "quota exceeded"));
        let session = GenerationSession::run(conference_form(), today(), &provider).await;

        let Outcome::Generated(posts) = session.outcome else {
            panic!("expected generated posts");
        };
        assert_eq!(posts[0].text, "fine");
        assert_eq!(posts[1].text, "fine");
        assert_eq!(
            posts[2].text,
            "Error generating post: Provider error: Gemini - quota exceeded"
        );
    }
}
