/// Why an issuance request produced neither a phrase nor a depletion signal.
///
/// A shell with a fallback pool swallows every variant; one without shows the
/// message.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (connection refused, timeout).
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    /// The server answered with an unexpected status. `message` is the
    /// server's `error` field when it sent one.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// A success response did not carry a phrase.
    #[error("invalid response: {0}")]
    Decode(#[source] reqwest::Error),

    /// No server is configured.
    #[error("no phrase server configured")]
    Offline,
}
