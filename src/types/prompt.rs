use super::event::{EventDetails, Platform};

/// A single-turn prompt sent to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    text: String,
}

impl Prompt {
    /// Create a prompt from raw text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Build the post-generation prompt for one platform.
    pub fn for_post(platform: Platform, event: &EventDetails) -> Self {
        let guidance = Platform::ALL
            .iter()
            .map(|p| format!("- {}: {}", p.name(), p.style_guidance()))
            .collect::<Vec<_>>()
            .join("\n");

        let text = format!(
            "Generate a {platform} post for an event with the following details:\n\
             Event Name: {name}\n\
             Date: {date}\n\
             Venue: {venue}\n\
             Description: {description}\n\
             \n\
             For {platform}, consider these specific requirements:\n\
             {guidance}\n\
             \n\
             Generate only the post content without any explanations.",
            name = event.name,
            date = event.formatted_date(),
            venue = event.venue,
            description = event.description,
        );

        Self { text }
    }

    /// Get the prompt text.
    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl From<&str> for Prompt {
    fn from(s: &str) -> Self {
        Prompt::new(s)
    }
}

impl From<String> for Prompt {
    fn from(s: String) -> Self {
        Prompt::new(s)
    }
}
