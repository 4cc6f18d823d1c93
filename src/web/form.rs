//! The submitted form and its validation rules.

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::{format_event_date, ApiKey, EventDetails, ProviderType};

/// Value of the `action` field sent by the "Generate Posts" button.
pub const GENERATE_ACTION: &str = "generate";

/// Raw fields posted by the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SubmissionForm {
    #[serde(default)]
    pub provider: ProviderType,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub event_name: String,
    #[serde(default)]
    pub event_date: String,
    #[serde(default)]
    pub venue: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub action: Option<String>,
}

/// Why the event fields cannot be used yet.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please fill in: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    #[error("'{0}' is not a valid date")]
    InvalidDate(String),

    #[error("The event date {date} is in the past. Pick today ({today}) or a later date")]
    DateInPast { date: String, today: String },
}

impl SubmissionForm {
    /// Whether the generate button sent this submission.
    pub fn generate_requested(&self) -> bool {
        self.action.as_deref() == Some(GENERATE_ACTION)
    }

    /// The credential, if one was typed.
    pub fn credential(&self) -> Option<ApiKey> {
        ApiKey::new(&self.api_key)
    }

    /// Check every event field and build the event details.
    ///
    /// A field counts as empty when nothing but whitespace was entered. Dates
    /// before `today` are rejected.
    pub fn validate(&self, today: NaiveDate) -> Result<EventDetails, ValidationError> {
        let missing: Vec<&'static str> = [
            ("Event Name", &self.event_name),
            ("Event Date", &self.event_date),
            ("Venue", &self.venue),
            ("Event Description", &self.description),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| label)
        .collect();

        if !missing.is_empty() {
            return Err(ValidationError::MissingFields(missing));
        }

        let raw_date = self.event_date.trim();
        let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
            .map_err(|_| ValidationError::InvalidDate(raw_date.to_string()))?;

        if date < today {
            return Err(ValidationError::DateInPast {
                date: format_event_date(date),
                today: format_event_date(today),
            });
        }

        Ok(EventDetails::new(
            self.event_name.trim(),
            date,
            self.venue.trim(),
            self.description.trim(),
        ))
    }
}
