use std::fmt;
use std::io::Error;
use std::path::PathBuf;

use ratatui::crossterm::event::KeyEvent;

pub const SECRET_HEADERS: [&str; 4] = ["NAME", "TYPE", "STATUS", "EXPIRES"];
pub const VERSION_HEADERS: [&str; 6] = [
    "VERSION",
    "STATUS",
    "ACTIVATION_DATE",
    "EXPIRATION_DATE",
    "CREATED",
    "UPDATED",
];

pub const HELP_TEXT: &str = "\
/          Toggle the search bar
Enter      Apply search / open versions
Esc        Clear filter and close search
j/k ↓/↑    Move selection
PgDn/PgUp  Move one page
g/G        Jump to first / last row
⌫ / ←      Back to the secrets list
?          Toggle this help
q          Quit";

#[derive(Debug)]
pub enum SVError {
    IoError(Error),
    TerminalInitFailed(Error),
    LoggingFailed(String),
}

impl fmt::Display for SVError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SVError::IoError(e) => write!(f, "io error: {e}"),
            SVError::TerminalInitFailed(e) => write!(f, "failed to initialize terminal: {e}"),
            SVError::LoggingFailed(msg) => write!(f, "failed to setup logging: {msg}"),
        }
    }
}

impl From<Error> for SVError {
    fn from(err: Error) -> Self {
        SVError::IoError(err)
    }
}

#[derive(Debug, Clone)]
pub struct SVConfig {
    pub event_poll_time: u64,
    pub log_file: Option<PathBuf>,
    pub log_level: String,
    pub no_color: bool,
}

impl Default for SVConfig {
    fn default() -> Self {
        Self {
            event_poll_time: 100,
            log_file: None,
            log_level: "info".to_string(),
            no_color: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Quit,
    MoveUp,
    MoveDown,
    MovePageUp,
    MovePageDown,
    MoveBeginning,
    MoveEnd,
    ToggleSearch,
    Cancel,
    Enter,
    Back,
    Help,
    Resize(usize, usize),
    RawKey(KeyEvent),
}
