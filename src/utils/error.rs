use thiserror::Error;

#[derive(Error, Debug)]
pub enum CascadeError {
    #[error("API request failed: {0}")]
    TransportError(#[from] reqwest::Error),

    #[error("API returned HTTP {status} for {url}")]
    HttpStatusError { url: String, status: u16 },

    #[error("Malformed response from {url}: {source}")]
    MalformedResponseError {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid URL: {0}")]
    InvalidUrlError(#[from] url::ParseError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Cannot select '{value}' on {control} control: {reason}")]
    SelectionRejected {
        control: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    MalformedResponse,
    Configuration,
    Selection,
    Internal,
}

impl CascadeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CascadeError::TransportError(_) | CascadeError::HttpStatusError { .. } => {
                ErrorKind::Transport
            }
            CascadeError::MalformedResponseError { .. } => ErrorKind::MalformedResponse,
            CascadeError::InvalidUrlError(_)
            | CascadeError::IoError(_)
            | CascadeError::ConfigValidationError { .. }
            | CascadeError::InvalidConfigValueError { .. } => ErrorKind::Configuration,
            CascadeError::SelectionRejected { .. } => ErrorKind::Selection,
            CascadeError::SerializationError(_) => ErrorKind::Internal,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Transport => "Check that the booking server is running and reachable",
            ErrorKind::MalformedResponse => {
                "The server answered with something other than the expected JSON; check the endpoint paths"
            }
            ErrorKind::Configuration => "Review the command line flags or the TOML config file",
            ErrorKind::Selection => "Pick one of the options currently offered by the control",
            ErrorKind::Internal => "Re-run with --verbose and report the log output",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.kind() {
            ErrorKind::Transport => format!("Could not reach the booking server ({})", self),
            ErrorKind::MalformedResponse => format!("Unexpected server response ({})", self),
            ErrorKind::Configuration => format!("Configuration problem: {}", self),
            ErrorKind::Selection => self.to_string(),
            ErrorKind::Internal => format!("Internal error: {}", self),
        }
    }

    /// 依錯誤類型決定 CLI 結束代碼
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::Configuration => 1,
            ErrorKind::Transport => 2,
            ErrorKind::MalformedResponse => 3,
            ErrorKind::Selection | ErrorKind::Internal => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, CascadeError>;
