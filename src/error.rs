use thiserror::Error;

/// Errors raised while allocating ticket ranges or resolving a ticket.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DrawError {
    #[error("item list is empty")]
    Empty,
    #[error("item {index} has a negative chance: {value}")]
    Negative { index: usize, value: f64 },
    #[error("item {index} has a non-finite chance: {value}")]
    NonFinite { index: usize, value: f64 },
    #[error("item {index} chance {value} exceeds 100 percent")]
    ChanceTooLarge { index: usize, value: f64 },
    #[error("ticket offset overflows at item {index}")]
    TicketOverflow { index: usize },
    /// `chance * 1000` is not a whole number of tickets.
    #[error("item {index} chance {chance} does not map to a whole number of tickets ({tickets})")]
    FractionalTickets {
        index: usize,
        chance: f64,
        tickets: f64,
    },
    #[error("ticket {ticket} does not fall in any range")]
    NoMatch { ticket: i64 },
}

/// Errors from the external random service. These never reach callers of
/// the fallback APIs; they are logged and replaced by local randomness.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("no random.org API key configured")]
    MissingApiKey,
    #[error("failed to build http client: {0}")]
    BuildClient(#[source] reqwest::Error),
    #[error("reqwest error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed: {0}")]
    Status(reqwest::StatusCode),
    #[error("json-rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("unexpected response: {0}")]
    UnexpectedResponse(String),
}
