//! Event details and the fixed set of target platforms.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The details of an event a post is generated for.
///
/// Only the form controller constructs this, after every field has passed
/// validation, so all text fields are non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDetails {
    pub name: String,
    pub date: NaiveDate,
    pub venue: String,
    pub description: String,
}

impl EventDetails {
    pub fn new(
        name: impl Into<String>,
        date: NaiveDate,
        venue: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            date,
            venue: venue.into(),
            description: description.into(),
        }
    }

    /// The event date as it appears in prompts, e.g. "January 15, 2025".
    pub fn formatted_date(&self) -> String {
        format_event_date(self.date)
    }
}

/// Format a date in long month-name form.
pub fn format_event_date(date: NaiveDate) -> String {
    date.format("%B %d, %Y").to_string()
}

/// A social media platform a post is written for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    LinkedIn,
    Twitter,
    WhatsApp,
}

impl Platform {
    /// All platforms, in the order results are generated and shown.
    pub const ALL: [Platform; 3] = [Platform::LinkedIn, Platform::Twitter, Platform::WhatsApp];

    pub fn name(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "LinkedIn",
            Platform::Twitter => "Twitter",
            Platform::WhatsApp => "WhatsApp",
        }
    }

    /// Lowercase identifier used for element ids in the rendered page.
    pub fn slug(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "linkedin",
            Platform::Twitter => "twitter",
            Platform::WhatsApp => "whatsapp",
        }
    }

    /// Style guidance given to the model for this platform.
    pub fn style_guidance(&self) -> &'static str {
        match self {
            Platform::LinkedIn => "Professional tone, include relevant hashtags, structured format",
            Platform::Twitter => "Concise (under 280 characters), engaging, include hashtags",
            Platform::WhatsApp => "Casual tone, use emojis, clear formatting with event details",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
