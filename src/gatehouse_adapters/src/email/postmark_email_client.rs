use gatehouse_core::{Email, EmailClient};
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, Secret};

const POSTMARK_AUTH_HEADER: &str = "X-Postmark-Server-Token";

/// Postmark delivery client. Messages are plain text; the stream name comes
/// from configuration so broadcast and transactional mail can be separated
/// without a rebuild.
#[derive(Clone)]
pub struct PostmarkEmailClient {
    http_client: Client,
    base_url: Url,
    sender: Email,
    authorization_token: Secret<String>,
    message_stream: String,
}

impl PostmarkEmailClient {
    pub fn new(
        base_url: Url,
        sender: Email,
        authorization_token: Secret<String>,
        message_stream: String,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            sender,
            authorization_token,
            message_stream,
        }
    }
}

#[async_trait::async_trait]
impl EmailClient for PostmarkEmailClient {
    #[tracing::instrument(name = "Sending email", skip_all)]
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        let url = self.base_url.join("/email").map_err(|e| e.to_string())?;

        let request_body = SendEmailRequest {
            from: self.sender.as_ref().expose_secret(),
            to: recipient.as_ref().expose_secret(),
            subject,
            text_body: content,
            message_stream: &self.message_stream,
        };

        self.http_client
            .post(url)
            .header(
                POSTMARK_AUTH_HEADER,
                self.authorization_token.expose_secret(),
            )
            .json(&request_body)
            .send()
            .await
            .map_err(|e| e.to_string())?
            .error_for_status()
            .map_err(|e| e.to_string())?;

        Ok(())
    }
}

#[derive(serde::Serialize, Debug)]
#[serde(rename_all = "PascalCase")]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text_body: &'a str,
    message_stream: &'a str,
}
