//! Chat orchestration: retrieve context, extend the history, call the model.

use crate::error::AssistantError;
use crate::history::{ChatHistory, ChatMessage, ChatRole};
use crate::model::GenerativeModel;
use crate::prompt::{analytics_prompt, enhanced_message};
use crate::retrieval::ContextRetriever;

/// A conversation with one model over one context source.
pub struct ChatService<M, R> {
    model: M,
    retriever: R,
    history: ChatHistory,
}

impl<M, R> ChatService<M, R>
where
    M: GenerativeModel,
    R: ContextRetriever,
{
    pub fn new(model: M, retriever: R) -> Self {
        Self {
            model,
            retriever,
            history: ChatHistory::new(),
        }
    }

    /// Ask a question and return the model's answer.
    ///
    /// The enhanced user turn and the answer are appended to the history.
    /// On failure the unanswered user turn is removed again.
    pub async fn send_message(&mut self, question: &str) -> Result<String, AssistantError> {
        let context = self.retriever.retrieve(question).await?;
        self.history
            .push(ChatRole::User, enhanced_message(&context, question));

        match self.model.generate(&self.history.render_recent()).await {
            Ok(answer) => {
                self.history.push(ChatRole::Assistant, answer.clone());
                Ok(answer)
            }
            Err(e) => {
                tracing::error!(error = %e, "Assistant request failed");
                self.history.pop_if(ChatRole::User);
                Err(e)
            }
        }
    }

    /// Run a free-form analysis request through the analytics template.
    pub async fn analyze(&mut self, query: &str) -> Result<String, AssistantError> {
        self.send_message(&analytics_prompt(query)).await
    }

    pub fn history(&self) -> &[ChatMessage] {
        self.history.messages()
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use assert_matches::assert_matches;

    use super::*;
    use crate::retrieval::NoContext;

    /// Records prompts and replays canned results.
    struct ScriptedModel {
        replies: Mutex<Vec<Result<String, AssistantError>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedModel {
        fn new(replies: Vec<Result<String, AssistantError>>) -> Self {
            Self {
                replies: Mutex::new(replies),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    impl GenerativeModel for &ScriptedModel {
        async fn generate(&self, prompt: &str) -> Result<String, AssistantError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies.lock().unwrap().remove(0)
        }
    }

    #[tokio::test]
    async fn answer_is_appended_to_history() {
        let model = ScriptedModel::new(vec![Ok("Jane leads.".into())]);
        let mut chat = ChatService::new(&model, NoContext);

        let answer = chat.send_message("Who leads in math?").await.unwrap();
        assert_eq!(answer, "Jane leads.");

        let history = chat.history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[1].role, ChatRole::User);
        assert!(history[1].content.contains("Question: Who leads in math?"));
        assert!(history[1].content.contains("No relevant context found."));
        assert_eq!(history[2].content, "Jane leads.");

        let prompt = &model.prompts()[0];
        assert!(prompt.starts_with("ASSISTANT: You are an AI assistant"));
        assert!(prompt.contains("\n\n---\n\nUSER: \nSTUDENT DATA FOR ANALYSIS:"));
    }

    #[tokio::test]
    async fn failed_turn_is_rolled_back() {
        let model = ScriptedModel::new(vec![Err(AssistantError::Quota("exhausted".into()))]);
        let mut chat = ChatService::new(&model, NoContext);

        let err = chat.send_message("hello").await.unwrap_err();
        assert_eq!(err.user_message(), "API quota exceeded. Please try again later.");
        assert_eq!(chat.history().len(), 1);
    }

    #[tokio::test]
    async fn analyze_wraps_query() {
        let model = ScriptedModel::new(vec![Ok("done".into())]);
        let mut chat = ChatService::new(&model, NoContext);
        chat.analyze("section averages").await.unwrap();
        assert!(chat.history()[1]
            .content
            .contains("Question: Based on the provided data, please analyze: section averages"));
    }

    #[tokio::test]
    async fn clear_drops_conversation() {
        let model = ScriptedModel::new(vec![Ok("a".into())]);
        let mut chat = ChatService::new(&model, NoContext);
        chat.send_message("q").await.unwrap();
        chat.clear();
        assert_eq!(chat.history().len(), 1);
        assert_matches!(chat.history()[0].role, ChatRole::Assistant);
    }
}
