use thiserror::Error;
use tracing::{error, warn};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{_0}")]
    Reqwest(#[from] reqwest::Error),
    #[error("Url {_0:?} returned status {_1}")]
    NonSuccessStatusCode(String, reqwest::StatusCode),
    #[error("deserialization failed while {_1}: {_0}")]
    Deserializing(#[source] serde_json::Error, &'static str),
    #[error("serialization failed while {_1}: {_0}")]
    Serializing(#[source] serde_json::Error, &'static str),
    #[error("invalid date encountered: {_0}")]
    InvalidDate(#[source] chrono::ParseError),
    #[error("invalid arguments: {_0}")]
    InvalidArguments(String),
    #[error("invalid request: {_0}")]
    InvalidRequest(String),
    #[error("unknown tool: {_0:?}")]
    UnknownTool(String),
    #[error("io error while {_1}: {_0}")]
    Io(#[source] std::io::Error, &'static str),
}

impl Error {
    /// Whether this error originates from talking to the upstream service.
    ///
    /// These are reported to the caller as plain text, everything else
    /// fails the invocation.
    pub fn is_http(&self) -> bool {
        matches!(self, Self::Reqwest(_) | Self::NonSuccessStatusCode(..))
    }

    /// Whether the caller is to blame for this error.
    pub fn is_invalid_params(&self) -> bool {
        matches!(self, Self::InvalidArguments(_) | Self::UnknownTool(_))
    }
}

pub trait ResultExt<T> {
    fn log_err(self) -> Option<T>;
    fn log_warn(self) -> Option<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn log_err(self) -> Option<T> {
        match self {
            Ok(inner) => Some(inner),
            Err(why) => {
                let why = why.into();
                error!("{}", why);
                None
            }
        }
    }

    fn log_warn(self) -> Option<T> {
        match self {
            Ok(inner) => Some(inner),
            Err(why) => {
                let why = why.into();
                warn!("{}", why);
                None
            }
        }
    }
}
