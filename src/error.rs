//! This module implements `DateError`.

use alloc::borrow::Cow;
use core::fmt;

/// `DateError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error.
    #[default]
    Generic,
    /// RangeError
    Range,
    /// SyntaxError
    Syntax,
    /// An implementation assertion failed.
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Range => "RangeError",
            Self::Syntax => "SyntaxError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The error type for `datewise`.
#[derive(Debug, Clone, PartialEq)]
pub struct DateError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl DateError {
    fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Create a generic error
    #[must_use]
    pub fn general<S>(msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Create a range error.
    #[must_use]
    pub fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Create a syntax error.
    #[must_use]
    pub fn syntax() -> Self {
        Self::new(ErrorKind::Syntax)
    }

    /// Creates an assertion error
    #[must_use]
    pub(crate) fn assert() -> Self {
        Self::new(ErrorKind::Assert).with_enum(ErrorMessage::Assertion)
    }

    /// Add a message to the error.
    #[must_use]
    pub fn with_message<S>(mut self, msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.msg = msg.into();
        self
    }

    /// Add a predefined message to the error.
    #[must_use]
    pub(crate) fn with_enum(mut self, msg: ErrorMessage) -> Self {
        self.msg = Cow::Borrowed(msg.to_str());
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> Cow<'static, str> {
        self.msg
    }
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.trim();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        Ok(())
    }
}

impl core::error::Error for DateError {}

/// Messages shared across the crate's error sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorMessage {
    Assertion,
    InstantOutOfRange,
    YearOutOfRange,
    FieldOverflow,
    UnknownRfc2822Layout,
    UnknownZone,
    MissingTimeSeparator,
    InvalidTime,
    InvalidOffset,
    OffsetOutOfRange,
    #[cfg(feature = "tzdb")]
    IllformedTzif,
}

impl ErrorMessage {
    pub(crate) const fn to_str(self) -> &'static str {
        match self {
            Self::Assertion => "Implementation error: assertion failed.",
            Self::InstantOutOfRange => "Instant is not within the valid epoch range.",
            Self::YearOutOfRange => "Year is outside the supported range.",
            Self::FieldOverflow => "Date/time field values overflow the valid range.",
            Self::UnknownRfc2822Layout => {
                "Expected `<Weekday>, <Day> <Month> <Year> <Time>` or `<Month> <Day>, <Year> <Time>`."
            }
            Self::UnknownZone => "Unrecognized time zone designator.",
            Self::MissingTimeSeparator => "Expected a `T` separating the date and time.",
            Self::InvalidTime => "Time must be formatted as `HH:MM` or `HH:MM:SS`.",
            Self::InvalidOffset => "Numeric zone offsets must be `HH` or `HHMM`.",
            Self::OffsetOutOfRange => "UTC offset must be less than a day.",
            #[cfg(feature = "tzdb")]
            Self::IllformedTzif => "Illformed TZif data.",
        }
    }
}
