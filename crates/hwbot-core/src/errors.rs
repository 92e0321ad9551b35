/// Core error type for the homework bot.
///
/// Adapter crates map their transport errors into this type so the poll loop
/// can render a precise failure message for every iteration that goes wrong.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("config error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("request failed: {0}")]
    Transport(String),

    #[error("unexpected response status {status}: {body}")]
    Protocol { status: u16, body: String },

    #[error("response body is not valid JSON: {0}")]
    Decode(String),

    #[error("response has no `homeworks` field")]
    MissingHomeworks,

    #[error("`homeworks` field is not a list")]
    MalformedHomeworks,

    #[error("unknown homework status: {0}")]
    UnknownStatus(String),

    #[error("homework record has no name")]
    MissingHomeworkName,

    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Coarse classification of [`Error`], used as a structured log field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    Config,
    Io,
    Transport,
    Protocol,
    Decode,
    Validation,
    Formatting,
    Delivery,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Config => "config",
            ErrorKind::Io => "io",
            ErrorKind::Transport => "transport",
            ErrorKind::Protocol => "protocol",
            ErrorKind::Decode => "decode",
            ErrorKind::Validation => "validation",
            ErrorKind::Formatting => "formatting",
            ErrorKind::Delivery => "delivery",
        }
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Protocol { .. } => ErrorKind::Protocol,
            Error::Decode(_) => ErrorKind::Decode,
            Error::MissingHomeworks | Error::MalformedHomeworks | Error::UnknownStatus(_) => {
                ErrorKind::Validation
            }
            Error::MissingHomeworkName => ErrorKind::Formatting,
            Error::Delivery(_) => ErrorKind::Delivery,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_variants_share_a_kind() {
        assert_eq!(Error::MissingHomeworks.kind(), ErrorKind::Validation);
        assert_eq!(Error::MalformedHomeworks.kind(), ErrorKind::Validation);
        assert_eq!(
            Error::UnknownStatus("bogus".to_string()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(Error::MissingHomeworkName.kind(), ErrorKind::Formatting);
    }

    #[test]
    fn protocol_error_mentions_status() {
        let e = Error::Protocol {
            status: 503,
            body: "down".to_string(),
        };
        let s = e.to_string();
        assert!(s.contains("503"));
        assert!(s.contains("down"));
    }

    #[test]
    fn json_errors_become_decode_errors() {
        let err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let e: Error = err.into();
        assert_eq!(e.kind(), ErrorKind::Decode);
    }
}
