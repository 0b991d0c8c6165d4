use serde::{Deserialize, Serialize};

/// Body posted to the chat robot webhook.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub msgtype: MessageType,
    pub markdown: Markdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markdown {
    pub content: String,
}

impl Message {
    pub fn markdown(content: impl Into<String>) -> Self {
        Self {
            msgtype: MessageType::Markdown,
            markdown: Markdown {
                content: content.into(),
            },
        }
    }

    pub fn content(&self) -> &str {
        &self.markdown.content
    }
}
