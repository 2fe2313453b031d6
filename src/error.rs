use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Anything a client operation can fail with.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// The body came back but does not look like the expected page.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("page has no {0}")]
    MissingElement(&'static str),
    #[error("malformed attribute table: {0}")]
    MalformedTable(String),
    #[error("expected an integer, got {0:?}")]
    NotAnInteger(String),
    #[error("listing page {page} has {found} identifiers, needed index {offset}")]
    ShortPage { page: u64, offset: u64, found: usize },
    #[error("body is not valid UTF-8")]
    NotUtf8,
}

/// A parsed field set that cannot become a record.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{record}: unexpected field {field:?}")]
    UnknownField { record: &'static str, field: String },
    #[error("{record}: field {field} supplied more than once")]
    DuplicateField { record: &'static str, field: &'static str },
    #[error("{record}: missing required field {field}")]
    MissingField { record: &'static str, field: &'static str },
    #[error("{record}: field {field} is not an integer: {value:?}")]
    InvalidInteger {
        record: &'static str,
        field: &'static str,
        value: String,
    },
}
