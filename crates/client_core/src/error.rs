use thiserror::Error;

/// Failure taxonomy for catalog fetches.
///
/// Both variants are caught at the session boundary and turned into
/// "empty collection + settled loading flag"; neither propagates past the
/// controllers as a panic or an unhandled failure.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Transport-level failure: connection refused, TLS, timeout, or a
    /// non-2xx status surfaced by the transport.
    #[error("catalog request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// The response body does not match the `{ "data": ... }` contract for
    /// the endpoint's arity.
    #[error("unexpected catalog response shape: {0}")]
    Format(#[from] serde_json::Error),
}

impl CatalogError {
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Network(_))
    }

    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format(_))
    }
}

/// A single image resource that failed to load. Logged per image and
/// swallowed; never reaches list or filter state.
#[derive(Debug, Error)]
#[error("error loading image {uri}: {message}")]
pub struct ImageLoadError {
    pub uri: String,
    pub message: String,
}
