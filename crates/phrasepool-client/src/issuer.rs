use crate::ClientError;
use core::{future::Future, time::Duration};
use phrasepool::IssueStatus;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;

/// Path of the issuance endpoint, relative to the server's base URL.
pub const NEXT_PHRASE_PATH: &str = "/api/next-phrase";

/// Something that can be asked for the next phrase over an unreliable link.
pub trait Issuer {
    /// Requests one phrase.
    ///
    /// # Errors
    /// - Any [`ClientError`]; depletion is reported as
    ///   [`IssueStatus::Depleted`], never as an error.
    fn issue(&self) -> impl Future<Output = Result<IssueStatus, ClientError>> + Send;
}

#[derive(Deserialize)]
struct PhraseBody {
    phrase: String,
}


/// Issues phrases from a running `phrasepool-server`.
///
/// Status 200 yields [`IssueStatus::Ready`]; 410 and 204 both mean depletion.
/// Anything else becomes [`ClientError::Status`].
#[derive(Clone, Debug)]
pub struct HttpIssuer {
    client: Client,
    endpoint: String,
}

impl HttpIssuer {
    /// Creates an issuer for the server at `base_url`, e.g.
    /// `http://127.0.0.1:3000`.
    ///
    /// Without a timeout a hung server blocks the request indefinitely.
    ///
    /// # Errors
    /// - [`ClientError::Transport`] if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ClientError::Transport)?;

        Ok(Self {
            client,
            endpoint: format!("{}{NEXT_PHRASE_PATH}", base_url.trim_end_matches('/')),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Issuer for HttpIssuer {
    #[tracing::instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn issue(&self) -> Result<IssueStatus, ClientError> {
        let response = self
            .client
            .post(&self.endpoint)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = response.status();
        if status == StatusCode::GONE || status == StatusCode::NO_CONTENT {
            return Ok(IssueStatus::Depleted);
        }

        if !status.is_success() {
            let message = match response.json::<Value>().await {
                Ok(body) => error_field(&body)
                    .unwrap_or_else(|| format!("Request failed: {}", status.as_u16())),
                Err(_) => "Failed".to_string(),
            };
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: PhraseBody = response.json().await.map_err(ClientError::Decode)?;
        Ok(IssueStatus::Ready {
            phrase: body.phrase,
        })
    }
}

/// Reads a usable `error` field from any JSON body. Only a non-empty string,
/// a non-zero number or `true` counts; any other shape has no message.
fn error_field(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::String(message) if !message.is_empty() => Some(message.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// An [`Issuer`] for builds without a server; every request fails with
/// [`ClientError::Offline`], so a fallback shell always uses its local pool.
#[derive(Clone, Copy, Debug, Default)]
pub struct Offline;

impl Issuer for Offline {
    async fn issue(&self) -> Result<IssueStatus, ClientError> {
        Err(ClientError::Offline)
    }
}
