//! Contains the Error and Result type used throughout the crate.
use std::fmt::Display;

use crate::Kind;

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from decoding, encoding or mutating NBT.
///
/// A failed decode never hands back a partial tree, and a failed mutation
/// leaves the container exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Error {
    msg: String,
    kind: ErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Input ran out part way through a value.
    UnexpectedEof,

    /// The stream is structurally invalid: negative lengths, invalid UTF-8,
    /// a missing root compound, trailing data and the like.
    Malformed,

    /// A decoded number does not fit the domain of the field it was read for.
    IntegerOutOfRange,

    /// A kind discriminant outside 0 to 12. Contains the offending byte.
    UnknownKind(u8),

    /// A tag of the wrong kind was given to a list, or asked for by a typed
    /// accessor.
    KindMismatch { expected: Kind, found: Kind },

    /// A value lies outside the domain of its kind, or a string or array is
    /// too long to be written.
    OutOfRange,

    /// Index past the end of a list or array.
    IndexOutOfRange { index: usize, len: usize },

    /// A payload of the wrong shape was given for a kind, eg a fractional
    /// number for an integer kind.
    TypeMismatch,

    /// The sink or source handed to the codec failed.
    Io,
}

impl Error {
    /// Get the kind of error.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// True for every error caused by a malformed or truncated stream.
    pub fn is_format(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::UnexpectedEof | ErrorKind::Malformed | ErrorKind::IntegerOutOfRange
        )
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.kind, ErrorKind::UnexpectedEof)
    }

    /// Note where in the input the error happened.
    pub(crate) fn at(mut self, offset: usize) -> Self {
        self.msg = format!("{} (at byte {})", self.msg, offset);
        self
    }

    pub(crate) fn new(kind: ErrorKind, msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            kind,
        }
    }

    pub(crate) fn unexpected_eof() -> Self {
        Self::new(
            ErrorKind::UnexpectedEof,
            "eof: unexpectedly ran out of input",
        )
    }

    pub(crate) fn malformed(msg: impl Display) -> Self {
        Self::new(ErrorKind::Malformed, format!("invalid nbt: {}", msg))
    }

    pub(crate) fn integer_out_of_range(what: &str) -> Self {
        Self::new(
            ErrorKind::IntegerOutOfRange,
            format!("invalid nbt: {} does not fit its declared width", what),
        )
    }

    pub(crate) fn unknown_kind(kind: u8) -> Self {
        Self::new(
            ErrorKind::UnknownKind(kind),
            format!("invalid nbt tag value: {}", kind),
        )
    }

    pub(crate) fn no_root_compound() -> Self {
        Self::malformed("no root compound")
    }

    pub(crate) fn nonunicode_string(data: &[u8]) -> Self {
        Self::malformed(format!(
            "nonunicode string: {}",
            String::from_utf8_lossy(data)
        ))
    }

    pub(crate) fn kind_mismatch(expected: Kind, found: Kind) -> Self {
        Self::new(
            ErrorKind::KindMismatch { expected, found },
            format!("expected {}, found {}", expected, found),
        )
    }

    pub(crate) fn out_of_range(msg: impl Display) -> Self {
        Self::new(ErrorKind::OutOfRange, msg.to_string())
    }

    pub(crate) fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::new(
            ErrorKind::IndexOutOfRange { index, len },
            format!("index {} out of range for length {}", index, len),
        )
    }

    pub(crate) fn type_mismatch(kind: Kind, given: &str) -> Self {
        Self::new(
            ErrorKind::TypeMismatch,
            format!("{} value must not be {}", kind, given),
        )
    }
}

impl std::error::Error for Error {}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.msg)
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Self::unexpected_eof(),
            _ => Self::new(ErrorKind::Io, format!("io error: {}", e)),
        }
    }
}
