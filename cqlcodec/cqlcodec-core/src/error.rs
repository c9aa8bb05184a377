//! Error types for the codec layer.

use crate::wire_type::WireType;

/// Error returned by encode/decode operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// A structural prefix (e.g. a decimal's scale) is shorter than required,
    /// or the payload is not a valid representation of the wire type.
    #[error("malformed {wire_type} value: {detail}")]
    MalformedValue { wire_type: WireType, detail: String },

    /// A length prefix claims more bytes than the buffer holds.
    #[error("read bytes: expecting {expected} bytes, got {available}")]
    LengthMismatch { expected: usize, available: usize },

    /// A narrowing numeric conversion left the representable range.
    #[error("value {value} out of range for {target}")]
    RangeOverflow { value: String, target: String },

    /// The presented wire type has no rule and the rule set is complete.
    #[error("cannot convert {wire_type} to or from {native}")]
    UnsupportedConversion { wire_type: WireType, native: String },

    /// A UDT element name has no matching field and unknown fields are rejected.
    #[error("unknown field '{field}' in {udt}")]
    UnknownField { udt: String, field: String },

    /// A required field was never observed while decoding a UDT.
    #[error("key '{field}' is required")]
    MissingRequiredField { field: String },

    /// The descriptor is not shaped the way the native type needs.
    #[error("cannot code {native} as {found}")]
    TypeMismatch { native: String, found: String },

    /// Encode was handed a value that does not match the declared native type.
    #[error("value type mismatch: {0}")]
    ValueType(#[from] ValueTypeError),

    /// Dispatch needed the generic codec but none was configured.
    #[error("no generic codec available to convert {wire_type} to or from {native}")]
    FallbackUnavailable { wire_type: WireType, native: String },

    /// The generic codec failed.
    #[error("generic codec failed for {wire_type}: {source}")]
    Fallback {
        wire_type: WireType,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Flat classification of [`CodecError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedValue,
    LengthMismatch,
    RangeOverflow,
    UnsupportedConversion,
    UnknownField,
    MissingRequiredField,
    TypeMismatch,
    ValueType,
    FallbackUnavailable,
    Fallback,
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedValue { .. } => ErrorKind::MalformedValue,
            Self::LengthMismatch { .. } => ErrorKind::LengthMismatch,
            Self::RangeOverflow { .. } => ErrorKind::RangeOverflow,
            Self::UnsupportedConversion { .. } => ErrorKind::UnsupportedConversion,
            Self::UnknownField { .. } => ErrorKind::UnknownField,
            Self::MissingRequiredField { .. } => ErrorKind::MissingRequiredField,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::ValueType(_) => ErrorKind::ValueType,
            Self::FallbackUnavailable { .. } => ErrorKind::FallbackUnavailable,
            Self::Fallback { .. } => ErrorKind::Fallback,
        }
    }

    pub fn malformed(wire_type: WireType, detail: impl Into<String>) -> Self {
        Self::MalformedValue {
            wire_type,
            detail: detail.into(),
        }
    }

    pub fn out_of_range(value: impl ToString, target: impl Into<String>) -> Self {
        Self::RangeOverflow {
            value: value.to_string(),
            target: target.into(),
        }
    }
}

/// Errors raised while building field and struct descriptors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("unknown wire type '{0}'")]
    UnknownWireType(String),

    #[error("field '{field}': wire types {first} and {second} conflict")]
    ConflictingWireTypes {
        field: String,
        first: String,
        second: String,
    },

    #[error("duplicate wire field '{field}' in struct {name}")]
    DuplicateField { name: String, field: String },
}

/// A [`Value`](crate::Value) accessor found a different variant than requested.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, got {actual}")]
pub struct ValueTypeError {
    pub expected: String,
    pub actual: &'static str,
}

impl ValueTypeError {
    pub fn new(expected: impl Into<String>, actual: &'static str) -> Self {
        Self {
            expected: expected.into(),
            actual,
        }
    }
}
