//! LlmClient trait definition

use async_trait::async_trait;

use super::{CompletionRequest, CompletionResponse, LlmError};

/// Stateless LLM client - each call is independent
///
/// This is the core abstraction for talking to language models. No
/// conversation state is kept between calls: both planner operations
/// (breakdown and re-plan) are single request/response exchanges.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single completion request (blocking until complete)
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError>;
}

#[cfg(test)]
pub mod mock {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::llm::{StopReason, TokenUsage, ToolCall};

    /// Mock LLM client for unit tests: returns queued responses in order.
    pub struct MockLlmClient {
        responses: Mutex<Vec<Result<CompletionResponse, LlmError>>>,
        call_count: AtomicUsize,
    }

    impl MockLlmClient {
        pub fn new(responses: Vec<CompletionResponse>) -> Self {
            Self {
                responses: Mutex::new(responses.into_iter().map(Ok).collect()),
                call_count: AtomicUsize::new(0),
            }
        }

        /// A client whose every call fails (exercises fallback paths)
        pub fn failing() -> Self {
            Self {
                responses: Mutex::new(Vec::new()),
                call_count: AtomicUsize::new(0),
            }
        }

        /// A client that answers every call with a single tool call
        pub fn with_tool_call(name: &str, input: serde_json::Value) -> Self {
            Self::new(vec![CompletionResponse {
                content: None,
                tool_calls: vec![ToolCall {
                    id: "tool_1".to_string(),
                    name: name.to_string(),
                    input,
                }],
                stop_reason: StopReason::ToolUse,
                usage: TokenUsage::default(),
            }])
        }

        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl LlmClient for MockLlmClient {
        async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            let mut responses = self.responses.lock().expect("mock lock poisoned");
            if responses.is_empty() {
                Err(LlmError::InvalidResponse("No more mock responses".to_string()))
            } else {
                responses.remove(0)
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_client_returns_responses() {
            let client = MockLlmClient::new(vec![CompletionResponse {
                content: Some("Response 1".to_string()),
                tool_calls: vec![],
                stop_reason: StopReason::EndTurn,
                usage: TokenUsage::default(),
            }]);

            let req = CompletionRequest {
                system_prompt: "Test".to_string(),
                messages: vec![],
                tools: vec![],
                max_tokens: 1000,
                temperature: None,
            };

            let resp = client.complete(req.clone()).await.unwrap();
            assert_eq!(resp.content, Some("Response 1".to_string()));
            assert_eq!(client.call_count(), 1);

            // Exhausted
            assert!(client.complete(req).await.is_err());
        }
    }
}
