use std::fmt;

use http::StatusCode;

#[derive(Debug)]
pub enum Error {
    NotFound,
    Unauthorized,
    Status(StatusCode),
    Decode(serde_json::Error),
    Request(anyhow::Error),
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound => write!(f, "resource not exists"),
            Error::Unauthorized => write!(f, "identity authentication failed"),
            Error::Status(status) => write!(f, "unexpected response status: {}", status),
            Error::Decode(err) => write!(f, "snapshot decode error: {}", err),
            Error::Request(err) => write!(f, "request error: {}", err),
        }
    }
}

impl<E> From<E> for Error
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Error::Request(err.into())
    }
}
