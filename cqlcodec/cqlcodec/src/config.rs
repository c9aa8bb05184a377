/// Policy for UDT elements that match no field of the native struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownFieldPolicy {
    /// Skip the element on decode and write null for it on encode (default).
    #[default]
    Ignore,
    /// Fail with [`CodecError::UnknownField`](cqlcodec_core::CodecError::UnknownField).
    Reject,
}

/// How scalar values pick their conversion procedure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DispatchMode {
    /// Use specialised conversion rules and fall back to the generic codec
    /// only when no rule matches (default).
    #[default]
    Specialized,
    /// Bypass every specialised scalar rule and always use the generic codec.
    ///
    /// UDT field iteration and collection framing still run, so unknown-field
    /// and required-field policies keep applying.
    Conservative,
}

/// Policy for integer conversions whose source is wider than the target.
///
/// Applies identically to signed and unsigned targets, for decoding and
/// encoding. Widening an integer into an unsigned target always reinterprets
/// the source bit pattern (wire `tinyint` `0xff` becomes `255u16`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntegerOverflow {
    /// Values outside the target range fail with
    /// [`CodecError::RangeOverflow`](cqlcodec_core::CodecError::RangeOverflow) (default).
    #[default]
    Checked,
    /// Keep the low-order bits of the value.
    Wrap,
}

/// Immutable configuration of a [`Codec`](crate::Codec).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CodecConfig {
    pub unknown_fields: UnknownFieldPolicy,
    pub dispatch_mode: DispatchMode,
    pub integer_overflow: IntegerOverflow,
}
