use thiserror::Error;

/// Display text is the provider's message as-is.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("{0}")]
    Config(String),

    #[error("{0}")]
    Request(String),

    #[error("{0}")]
    Response(String),

    #[error("{0}")]
    Api(String),
}
