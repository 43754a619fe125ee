use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The request never got a response: DNS, connect, timeout, body read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server answered with a non-success status. `message` is the response body.
    #[error("API error ({platform}): {message}")]
    Api {
        platform: String,
        message: String,
        status_code: Option<u16>,
    },

    /// A body that is not the JSON shape we expected, from the museum API or the model server.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Unreadable or invalid `config.toml`.
    #[error("Config error: {0}")]
    Config(String),

    /// Terminal reads and writes in the interactive explorer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn http(msg: impl Into<String>) -> Self {
        Self::Http(msg.into())
    }

    pub fn api_with_status(
        platform: impl Into<String>,
        message: impl Into<String>,
        status_code: u16,
    ) -> Self {
        Self::Api {
            platform: platform.into(),
            message: message.into(),
            status_code: Some(status_code),
        }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status of a rejected API call, if the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Api { status_code, .. } => *status_code,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
