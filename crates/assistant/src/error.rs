/// Errors from the assistant pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// Missing or rejected API key.
    #[error("API key configuration error: {0}")]
    Configuration(String),

    /// The provider refused the request for quota or rate reasons.
    #[error("API quota exceeded: {0}")]
    Quota(String),

    /// The HTTP request itself failed.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Any other non-2xx response.
    #[error("Assistant API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The provider answered without any text.
    #[error("Empty response from API")]
    EmptyResponse,
}

impl AssistantError {
    /// Classify a non-2xx response.
    ///
    /// Key problems and quota exhaustion get their own variants so the
    /// user sees an actionable message.
    pub fn from_status(status: u16, body: String) -> Self {
        let lowered = body.to_lowercase();
        if lowered.contains("api key")
            || lowered.contains("api_key")
            || status == 401
            || status == 403
        {
            AssistantError::Configuration(body)
        } else if lowered.contains("quota") || status == 429 {
            AssistantError::Quota(body)
        } else {
            AssistantError::Api { status, body }
        }
    }

    /// The single line shown to the user for this error.
    pub fn user_message(&self) -> &'static str {
        match self {
            AssistantError::Configuration(_) => {
                "API key configuration error. Please check your settings."
            }
            AssistantError::Quota(_) => "API quota exceeded. Please try again later.",
            _ => "An error occurred while processing your request.",
        }
    }
}
