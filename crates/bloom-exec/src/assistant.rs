use std::sync::Arc;

use bloom_core::fallback::FallbackResponseEngine;
use tracing::warn;

use crate::client::AnalysisClient;

pub const GREETING: &str = "Hi! I'm the BizBloom assistant. I can help you:\n\
- find your way around\n\
- understand the analysis views\n\
- think through startup questions\n\
How can I help today?";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickAction {
    pub label: &'static str,
    pub prompt: &'static str,
}

pub const QUICK_ACTIONS: [QuickAction; 4] = [
    QuickAction {
        label: "How do I start?",
        prompt: "How do I start validating my startup idea?",
    },
    QuickAction {
        label: "What features?",
        prompt: "What features does BizBloom offer?",
    },
    QuickAction {
        label: "Help with risks",
        prompt: "How do I assess risks for my startup?",
    },
    QuickAction {
        label: "Find partners",
        prompt: "How can I find co-founders?",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Remote,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssistantReply {
    pub text: String,
    pub source: ReplySource,
}

/// Chat front: asks the service and answers from the offline rules when the
/// service fails. Never returns an error.
pub struct Assistant<C: ?Sized> {
    client: Arc<C>,
    fallback: FallbackResponseEngine,
}

impl<C> Assistant<C>
where
    C: AnalysisClient + ?Sized,
{
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            fallback: FallbackResponseEngine,
        }
    }

    pub fn greeting(&self) -> &'static str {
        GREETING
    }

    pub fn quick_actions(&self) -> &'static [QuickAction] {
        &QUICK_ACTIONS
    }

    /// `None` for blank input; nothing is sent.
    pub async fn reply(&self, text: &str) -> Option<AssistantReply> {
        if text.trim().is_empty() {
            return None;
        }
        let reply = match self.client.send_chat_message(text).await {
            Ok(response) => AssistantReply {
                text: response,
                source: ReplySource::Remote,
            },
            Err(err) => {
                warn!(error = %err, "chat request failed, answering offline");
                AssistantReply {
                    text: self.fallback.respond(text).to_string(),
                    source: ReplySource::Fallback,
                }
            }
        };
        Some(reply)
    }
}
