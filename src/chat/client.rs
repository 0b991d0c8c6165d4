use std::time::Duration;

use log::{debug, info};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;

use super::target::TargetUrl;
use crate::error::{NotifierError, Result};
use crate::message::Message;

const USER_AGENT: &str = concat!("gitlab-notifier/", env!("CARGO_PKG_VERSION"));

pub struct ChatClient {
    client: Client,
}

impl ChatClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| NotifierError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Posts one message to a robot webhook. Non-2xx answers are errors.
    pub async fn send(&self, target: &TargetUrl, message: &Message) -> Result<()> {
        debug!("Delivering message to {target:?}");

        let response = self
            .client
            .post(target.as_url().clone())
            .header(CONTENT_TYPE, "application/json; charset=UTF-8")
            .body(serde_json::to_vec(message)?)
            .send()
            .await?
            .error_for_status()?;

        let status = response.status();
        let body = response.text().await?;
        info!("Chat webhook responded with status {status}, data: {body}");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn client() -> ChatClient {
        ChatClient::new(Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_send_posts_markdown_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/cgi-bin/webhook/send")
            .match_header("content-type", "application/json; charset=UTF-8")
            .match_header("user-agent", USER_AGENT)
            .match_body(Matcher::Json(json!({
                "msgtype": "markdown",
                "markdown": { "content": "hello" },
            })))
            .with_status(200)
            .with_body(r#"{"errcode":0,"errmsg":"ok"}"#)
            .create_async()
            .await;

        let target = TargetUrl::parse(&format!("{}/cgi-bin/webhook/send", server.url())).unwrap();
        client()
            .send(&target, &Message::markdown("hello"))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_send_surfaces_http_errors() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/cgi-bin/webhook/send")
            .with_status(500)
            .create_async()
            .await;

        let target = TargetUrl::parse(&format!("{}/cgi-bin/webhook/send", server.url())).unwrap();
        let err = client()
            .send(&target, &Message::markdown("hello"))
            .await
            .unwrap_err();

        assert!(matches!(err, NotifierError::Delivery(_)));
        mock.assert_async().await;
    }
}
