use thiserror::Error;

use crate::command::ParseError;

/// Failures raised by the graph engine and the command interpreter.
///
/// Domain operations on `SocialNetwork` fold these into `bool`/`Option`
/// results; graph operations, path search, and command execution return them.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("no path between '{from}' and '{to}'")]
    NoPathFound { from: String, to: String },

    #[error("import failed at line {line}: {source}")]
    Import {
        line: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub(crate) fn unnamed() -> Self {
        Error::InvalidArgument("person has no name".to_string())
    }

    pub(crate) fn not_in_network(name: &str) -> Self {
        Error::InvalidArgument(format!("person '{}' is not in the network", name))
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Error::InvalidArgument(_))
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    pub fn is_no_path(&self) -> bool {
        matches!(self, Error::NoPathFound { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
