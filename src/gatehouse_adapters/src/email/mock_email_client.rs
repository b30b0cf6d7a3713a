use gatehouse_core::{Email, EmailClient};

/// Drops every message. Used in local runs and tests where no mail
/// provider is configured. Only the subject is logged; recipient and body
/// carry account secrets.
#[derive(Debug, Clone, Default)]
pub struct MockEmailClient;

impl MockEmailClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl EmailClient for MockEmailClient {
    async fn send_email(
        &self,
        _recipient: &Email,
        subject: &str,
        _content: &str,
    ) -> Result<(), String> {
        tracing::debug!(subject, "discarding outbound email");
        Ok(())
    }
}
