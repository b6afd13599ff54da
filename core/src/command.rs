//! Command language: `<op> <user1> [<user2>]`, where `op` is one of
//! `a` (add), `r` (remove), or `s` (set active user).

use std::fmt;

use thiserror::Error;

/// Why a command line was rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown action '{0}', expected one of a, r, s")]
    UnknownAction(String),

    #[error("missing user argument")]
    MissingUser,

    #[error("'{action}' takes exactly one user argument")]
    TooManyArguments { action: char },
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddUser(String),
    AddFriendship(String, String),
    RemoveUser(String),
    RemoveFriendship(String, String),
    SetActive(String),
}

impl Command {
    /// Parse one line. A blank line yields `Ok(None)`.
    ///
    /// Tokens after the second user of an `a` or `r` command are ignored.
    pub fn parse(line: &str) -> Result<Option<Command>, ParseError> {
        let mut tokens = line.split_whitespace();

        let action = match tokens.next() {
            Some(tok) => tok,
            None => return Ok(None),
        };
        if !matches!(action, "a" | "r" | "s") {
            return Err(ParseError::UnknownAction(action.to_string()));
        }

        let user1 = tokens.next().ok_or(ParseError::MissingUser)?.to_string();
        let user2 = tokens.next().map(str::to_string);

        let command = match (action, user2) {
            ("a", None) => Command::AddUser(user1),
            ("a", Some(user2)) => Command::AddFriendship(user1, user2),
            ("r", None) => Command::RemoveUser(user1),
            ("r", Some(user2)) => Command::RemoveFriendship(user1, user2),
            (_, None) => Command::SetActive(user1),
            (_, Some(_)) => return Err(ParseError::TooManyArguments { action: 's' }),
        };
        Ok(Some(command))
    }

    /// The single-letter action token.
    pub fn action(&self) -> char {
        match self {
            Command::AddUser(_) | Command::AddFriendship(..) => 'a',
            Command::RemoveUser(_) | Command::RemoveFriendship(..) => 'r',
            Command::SetActive(_) => 's',
        }
    }
}

/// Renders the canonical command line, which parses back to the same command.
impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::AddUser(u) | Command::RemoveUser(u) | Command::SetActive(u) => {
                write!(f, "{} {}", self.action(), u)
            }
            Command::AddFriendship(u1, u2) | Command::RemoveFriendship(u1, u2) => {
                write!(f, "{} {} {}", self.action(), u1, u2)
            }
        }
    }
}
