//! The log record schema shared by both transports.

use crate::error::CodecError;
use serde::{Deserialize, Serialize};

/// Severity of a log record.
///
/// Carried on the wire as a small integer code, identical for the stream and
/// unary transports. Unknown codes are rejected at the deserialization
/// boundary, so a `Level` held in memory is always one of the five values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Level {
    /// Diagnostic detail.
    Debug = 0,
    /// Routine events.
    Info = 1,
    /// Something unexpected but recoverable.
    Warning = 2,
    /// A failure of the current operation.
    Error = 3,
    /// A failure the process cannot recover from.
    Critical = 4,
}

impl Level {
    /// Stable integer code used on the wire.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Upper-case name, as rendered by collectors.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
            Self::Critical => "CRITICAL",
        }
    }
}

impl From<Level> for u8 {
    fn from(level: Level) -> Self {
        level.code()
    }
}

impl TryFrom<u8> for Level {
    type Error = CodecError;

    fn try_from(code: u8) -> Result<Self, CodecError> {
        match code {
            0 => Ok(Self::Debug),
            1 => Ok(Self::Info),
            2 => Ok(Self::Warning),
            3 => Ok(Self::Error),
            4 => Ok(Self::Critical),
            _ => Err(CodecError::UnknownLevel(code)),
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured log event.
///
/// Every field is present in the wire form; producers that have nothing to say
/// for a field send an empty string. `line_number` stays a string because some
/// producers fill it with non-numeric placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// When the event occurred (ISO-8601-like).
    pub timestamp: String,
    /// Host/machine name.
    pub hostname: String,
    /// Name of the logger that produced the event.
    pub logger_name: String,
    /// Module name portion of the source file.
    pub module: String,
    /// Severity.
    pub level: Level,
    /// Filename portion of the source path.
    pub filename: String,
    /// Function name.
    pub function_name: String,
    /// Source line number (string-encoded).
    pub line_number: String,
    /// The log message.
    pub message: String,
    /// Full pathname of the source file.
    pub path_name: String,
    /// Process ID.
    pub process_id: String,
    /// Process name.
    pub process_name: String,
    /// Thread ID.
    pub thread_id: String,
    /// Thread name.
    pub thread_name: String,
    /// Name of the service generating the log.
    pub service_name: String,
    /// Stack trace, if one was captured.
    pub stack_trace: Option<String>,
}
