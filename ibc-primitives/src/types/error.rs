//! Foundational error types that are applicable across the IBC core crates.

use alloc::string::String;

use displaydoc::Display;

/// Causes of decoding failures
#[derive(Debug, Display, PartialEq, Eq)]
pub enum DecodingError {
    /// invalid identifier: `{0}`
    InvalidIdentifier(String),
    /// invalid field: `{0}`
    InvalidField(String),
    /// invalid UTF-8 data: `{description}`
    InvalidUtf8 { description: String },
    /// missing field: `{0}`
    MissingField(String),
    /// mismatched type URLs: expected `{expected}`, actual `{actual}`
    MismatchedTypeUrls { expected: String, actual: String },
    /// unknown type URL: `{0}`
    UnknownTypeUrl(String),
    /// failed to decode proto value: `{description}`
    FailedToDecodeProto { description: String },
}

impl DecodingError {
    pub fn missing_field(field: &str) -> Self {
        Self::MissingField(field.into())
    }

    pub fn invalid_field(description: impl Into<String>) -> Self {
        Self::InvalidField(description.into())
    }
}

impl From<prost::DecodeError> for DecodingError {
    fn from(e: prost::DecodeError) -> Self {
        Self::FailedToDecodeProto {
            description: alloc::format!("{e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodingError {}
