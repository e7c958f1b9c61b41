use thiserror::Error;

#[derive(Error, Debug)]
pub enum CardexError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("HTTP error {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("Imported data must be a JSON array of cards")]
    ImportNotArray,

    #[error("No card with id {0}")]
    UnknownCard(String),

    #[error("CardexError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for CardexError {
    fn from(error: std::io::Error) -> Self {
        CardexError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for CardexError {
    fn from(error: reqwest::Error) -> Self {
        CardexError::Reqwest(Box::new(error))
    }
}
