use crate::error::DeliveryError;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;

/// A plain-text e-mail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub from_email: String,
    pub from_name: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    pub category: String,
}

/// Outbound notification delivery.
pub trait Notifier: Send + Sync {
    fn send(&self, message: &EmailMessage) -> impl Future<Output = Result<(), DeliveryError>> + Send;
}

impl<N: Notifier> Notifier for &N {
    fn send(&self, message: &EmailMessage) -> impl Future<Output = Result<(), DeliveryError>> + Send {
        (**self).send(message)
    }
}

#[derive(Serialize)]
struct Address<'a> {
    email: &'a str,

    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: Address<'a>,
    to: Vec<Address<'a>>,
    subject: &'a str,
    text: &'a str,
    category: &'a str,
}

impl<'a> From<&'a EmailMessage> for SendRequest<'a> {
    fn from(message: &'a EmailMessage) -> Self {
        Self {
            from: Address {
                email: &message.from_email,
                name: Some(&message.from_name).filter(|n| !n.is_empty()).map(String::as_str),
            },
            to: message.to.iter().map(|email| Address { email, name: None }).collect(),
            subject: &message.subject,
            text: &message.text,
            category: &message.category,
        }
    }
}

/// Sends e-mail through a transactional mail HTTP API with bearer authentication.
#[derive(Debug, Clone)]
pub struct MailApiNotifier {
    client: reqwest::Client,
    url: String,
}

impl MailApiNotifier {
    pub fn new(url: impl Into<String>, token: &str) -> crate::Result<Self> {
        let mut auth_val = HeaderValue::from_str(&format!("Bearer {token}"))?;
        auth_val.set_sensitive(true);

        let mut headers = HeaderMap::new();
        let _ = headers.insert(AUTHORIZATION, auth_val);

        let client = reqwest::Client::builder()
            .user_agent(concat!("feedback-report/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .build()?;

        Ok(Self { client, url: url.into() })
    }
}

impl Notifier for MailApiNotifier {
    async fn send(&self, message: &EmailMessage) -> Result<(), DeliveryError> {
        let response = self
            .client
            .post(&self.url)
            .json(&SendRequest::from(message))
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            log::debug!("mail API accepted message '{}' with status {status}", message.subject);
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(DeliveryError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
