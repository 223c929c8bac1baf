use tracker_assistant::{ChatMessage, ChatRole, ChatService, ContextRetriever, GenerativeModel};

use super::MSG_CHAT_FAILED;

/// The side chat widget: visibility, transcript, and a busy flag.
///
/// The transcript holds what the user typed and what they were shown,
/// not the enhanced prompts kept by the [`ChatService`].
pub struct ChatPanel<M, R> {
    service: ChatService<M, R>,
    open: bool,
    transcript: Vec<ChatMessage>,
    loading: bool,
}

impl<M, R> ChatPanel<M, R>
where
    M: GenerativeModel,
    R: ContextRetriever,
{
    pub fn new(service: ChatService<M, R>) -> Self {
        Self {
            service,
            open: false,
            transcript: Vec::new(),
            loading: false,
        }
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Send one message and append the reply to the transcript.
    ///
    /// Blank input and sends while a reply is pending are ignored and
    /// return `None`. A failed request appends a fixed apology.
    pub async fn send(&mut self, input: &str) -> Option<&ChatMessage> {
        let text = input.trim();
        if text.is_empty() || self.loading {
            return None;
        }
        self.transcript.push(ChatMessage {
            role: ChatRole::User,
            content: text.to_string(),
        });

        self.loading = true;
        let reply = match self.service.send_message(text).await {
            Ok(answer) => answer,
            Err(e) => {
                tracing::warn!(error = %e, reason = e.user_message(), "Chat message failed");
                MSG_CHAT_FAILED.to_string()
            }
        };
        self.loading = false;

        self.transcript.push(ChatMessage {
            role: ChatRole::Assistant,
            content: reply,
        });
        self.transcript.last()
    }
}
