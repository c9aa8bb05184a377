//! Dispatching codec between native values and CQL wire payloads.

use std::sync::Arc;

use cqlcodec_core::{
    CodecError, GenericCodec, NativeType, ScalarKind, TypeInfo, UdtTypeInfo, Value, WireType,
};
use cqlcodec_wire::{append_bytes, read_bytes};

use crate::{
    compound,
    config::{CodecConfig, DispatchMode, IntegerOverflow, UnknownFieldPolicy},
    rules::{Dispatch, RuleTable, underlying_kind},
    scalar::Conversion,
};

/// Why a value was routed to the generic codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FallbackReason {
    /// Conservative dispatch mode bypasses specialised rules.
    Conservative,
    /// The rule set has no rule for the wire type and is not complete.
    NoRule,
    /// The native type has no rule set, or its shape does not fit the wire type.
    Untyped,
}

impl FallbackReason {
    fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::Conservative => "conservative",
            FallbackReason::NoRule => "no_rule",
            FallbackReason::Untyped => "untyped",
        }
    }
}

/// Converts native values to and from CQL wire payloads.
///
/// A codec is immutable after construction and can be shared between threads;
/// every call allocates its own state.
pub struct Codec {
    config: CodecConfig,
    rules: &'static RuleTable,
    fallback: Option<Arc<dyn GenericCodec>>,
}

/// Builder for configuring [`Codec`].
pub struct CodecBuilder {
    config: CodecConfig,
    fallback: Option<Arc<dyn GenericCodec>>,
}

impl CodecBuilder {
    pub fn config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    pub fn unknown_fields(mut self, policy: UnknownFieldPolicy) -> Self {
        self.config.unknown_fields = policy;
        self
    }

    pub fn dispatch_mode(mut self, mode: DispatchMode) -> Self {
        self.config.dispatch_mode = mode;
        self
    }

    pub fn integer_overflow(mut self, policy: IntegerOverflow) -> Self {
        self.config.integer_overflow = policy;
        self
    }

    /// Generic codec used whenever no specialised rule applies.
    pub fn fallback(mut self, codec: Arc<dyn GenericCodec>) -> Self {
        self.fallback = Some(codec);
        self
    }

    pub fn build(self) -> Codec {
        let rules = RuleTable::global();
        tracing::debug!(
            rules = rules.len(),
            unknown_fields = ?self.config.unknown_fields,
            dispatch_mode = ?self.config.dispatch_mode,
            integer_overflow = ?self.config.integer_overflow,
            fallback = self.fallback.is_some(),
            "codec built"
        );
        Codec {
            config: self.config,
            rules,
            fallback: self.fallback,
        }
    }
}

impl Default for Codec {
    fn default() -> Self {
        Self::new()
    }
}

impl Codec {
    /// Create a builder for [`Codec`].
    pub fn builder() -> CodecBuilder {
        CodecBuilder {
            config: CodecConfig::default(),
            fallback: None,
        }
    }

    /// Codec with default policies and no generic codec.
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn rules(&self) -> &RuleTable {
        self.rules
    }

    /// Decode one payload (`None` for null) into a value of type `native`.
    pub fn decode(
        &self,
        native: &NativeType,
        info: &TypeInfo,
        data: Option<&[u8]>,
    ) -> Result<Value, CodecError> {
        match native {
            NativeType::Optional(inner) => match data {
                None => Ok(Value::Null),
                Some(_) => self.decode(inner, info, data),
            },
            NativeType::Struct(st) => compound::decode_udt(self, st, info, data),
            NativeType::List(elem) => match info {
                TypeInfo::List(elem_info) | TypeInfo::Set(elem_info) => {
                    compound::decode_list(self, elem, elem_info, data)
                }
                _ => self.fallback_decode(native, info, data, FallbackReason::Untyped),
            },
            NativeType::Map { key, value } => match info {
                TypeInfo::Map {
                    key: key_info,
                    value: value_info,
                } => compound::decode_map(self, (key, value), (key_info, value_info), data),
                _ => self.fallback_decode(native, info, data, FallbackReason::Untyped),
            },
            NativeType::Alias(alias) if underlying_kind(&alias.target).is_none() => {
                self.decode(&alias.target, info, data)
            }
            NativeType::Scalar(_) | NativeType::Alias(_) => self.decode_scalar(native, info, data),
        }
    }

    /// Decode one `[bytes]`-framed value from the front of `buf`, returning
    /// it together with the rest of the buffer.
    pub fn decode_framed<'b>(
        &self,
        native: &NativeType,
        info: &TypeInfo,
        buf: &'b [u8],
    ) -> Result<(Value, &'b [u8]), CodecError> {
        let (data, rest) = read_bytes(buf)?;
        Ok((self.decode(native, info, data)?, rest))
    }

    /// Encode `value` of type `native`; `None` is the null payload.
    pub fn encode(
        &self,
        native: &NativeType,
        info: &TypeInfo,
        value: &Value,
    ) -> Result<Option<Vec<u8>>, CodecError> {
        if value.is_null() {
            return Ok(None);
        }
        match native {
            NativeType::Optional(inner) => self.encode(inner, info, value),
            NativeType::Struct(st) => compound::encode_udt(self, st, info, value),
            NativeType::List(elem) => match info {
                TypeInfo::List(elem_info) | TypeInfo::Set(elem_info) => {
                    compound::encode_list(self, elem, elem_info, value)
                }
                _ => self.fallback_encode(native, info, value, FallbackReason::Untyped),
            },
            NativeType::Map { key, value: val } => match info {
                TypeInfo::Map {
                    key: key_info,
                    value: value_info,
                } => compound::encode_map(self, (key, val), (key_info, value_info), value),
                _ => self.fallback_encode(native, info, value, FallbackReason::Untyped),
            },
            NativeType::Alias(alias) if underlying_kind(&alias.target).is_none() => {
                self.encode(&alias.target, info, value)
            }
            NativeType::Scalar(_) | NativeType::Alias(_) => self.encode_scalar(native, info, value),
        }
    }

    /// Encode `value` as one `[bytes]`-framed element.
    pub fn encode_framed(
        &self,
        native: &NativeType,
        info: &TypeInfo,
        value: &Value,
    ) -> Result<Vec<u8>, CodecError> {
        let payload = self.encode(native, info, value)?;
        let mut buf = Vec::with_capacity(4 + payload.as_ref().map_or(0, Vec::len));
        append_bytes(&mut buf, payload.as_deref())?;
        Ok(buf)
    }

    /// Wire type description a native type is coded as when the peer does
    /// not announce one.
    ///
    /// Scalars take their preferred wire type, structs become UDTs named after
    /// the struct. Returns `None` for scalars without specialised rules.
    pub fn infer_type_info(&self, native: &NativeType) -> Option<TypeInfo> {
        self.infer_with(native, None)
    }

    /// `first` is a field's explicit wire type. It only wins when the rule
    /// set has a rule for it, the same head `dispatch_plan` renders.
    fn infer_with(&self, native: &NativeType, first: Option<WireType>) -> Option<TypeInfo> {
        match native {
            NativeType::Alias(alias) if underlying_kind(&alias.target).is_none() => {
                self.infer_with(&alias.target, None)
            }
            NativeType::Scalar(_) | NativeType::Alias(_) => {
                match self.rules.resolve(native).and_then(|key| self.rules.rule_set(key)) {
                    Some(set) => set.branches(first).first().copied().map(TypeInfo::Native),
                    None => first.map(TypeInfo::Native),
                }
            }
            NativeType::Optional(inner) => self.infer_with(inner, first),
            NativeType::List(elem) => Some(TypeInfo::list(self.infer_with(elem, None)?)),
            NativeType::Map { key, value } => Some(TypeInfo::map(
                self.infer_with(key, None)?,
                self.infer_with(value, None)?,
            )),
            NativeType::Struct(st) => {
                let mut udt = UdtTypeInfo::new("", st.name());
                for (_, field) in st.coded_fields() {
                    let info = self.infer_with(&field.native_type, field.wire_type)?;
                    udt = udt.with_element(field.wire_name.clone(), info);
                }
                Some(TypeInfo::Udt(udt))
            }
        }
    }

    pub(crate) fn rejects_unknown_fields(&self) -> bool {
        self.config.unknown_fields == UnknownFieldPolicy::Reject
    }

    fn conversion<'a>(
        &self,
        native: &'a NativeType,
        info: &TypeInfo,
        kind: ScalarKind,
    ) -> Conversion<'a> {
        Conversion {
            native,
            kind,
            wire_type: info.wire_type(),
            overflow: self.config.integer_overflow,
        }
    }

    fn decode_scalar(
        &self,
        native: &NativeType,
        info: &TypeInfo,
        data: Option<&[u8]>,
    ) -> Result<Value, CodecError> {
        let Some(key) = self.rules.resolve(native) else {
            return self.fallback_decode(native, info, data, FallbackReason::Untyped);
        };
        if self.config.dispatch_mode == DispatchMode::Conservative {
            return self.fallback_decode(native, info, data, FallbackReason::Conservative);
        }
        match self.rules.dispatch(key, info.wire_type()) {
            Dispatch::Specialized(rule) => {
                let c = self.conversion(native, info, key.kind());
                (rule.decode)(&c, data.unwrap_or_default())
            }
            Dispatch::Unsupported => Err(CodecError::UnsupportedConversion {
                wire_type: info.wire_type(),
                native: native.to_string(),
            }),
            Dispatch::Fallback => self.fallback_decode(native, info, data, FallbackReason::NoRule),
        }
    }

    fn encode_scalar(
        &self,
        native: &NativeType,
        info: &TypeInfo,
        value: &Value,
    ) -> Result<Option<Vec<u8>>, CodecError> {
        if let Some(kind) = underlying_kind(native) {
            let expected = kind.zero_value();
            if std::mem::discriminant(&expected) != std::mem::discriminant(value) {
                return Err(value.type_mismatch(expected.variant_name()).into());
            }
        }
        let Some(key) = self.rules.resolve(native) else {
            return self.fallback_encode(native, info, value, FallbackReason::Untyped);
        };
        if self.config.dispatch_mode == DispatchMode::Conservative {
            return self.fallback_encode(native, info, value, FallbackReason::Conservative);
        }
        match self.rules.dispatch(key, info.wire_type()) {
            Dispatch::Specialized(rule) => {
                let c = self.conversion(native, info, key.kind());
                (rule.encode)(&c, value).map(Some)
            }
            Dispatch::Unsupported => Err(CodecError::UnsupportedConversion {
                wire_type: info.wire_type(),
                native: native.to_string(),
            }),
            Dispatch::Fallback => self.fallback_encode(native, info, value, FallbackReason::NoRule),
        }
    }

    fn generic(
        &self,
        native: &NativeType,
        info: &TypeInfo,
        reason: FallbackReason,
    ) -> Result<&dyn GenericCodec, CodecError> {
        tracing::debug!(
            wire_type = %info,
            native = %native,
            reason = reason.as_str(),
            "falling back to generic codec"
        );
        self.fallback
            .as_deref()
            .ok_or_else(|| CodecError::FallbackUnavailable {
                wire_type: info.wire_type(),
                native: native.to_string(),
            })
    }

    fn fallback_decode(
        &self,
        native: &NativeType,
        info: &TypeInfo,
        data: Option<&[u8]>,
        reason: FallbackReason,
    ) -> Result<Value, CodecError> {
        self.generic(native, info, reason)?.decode(native, info, data)
    }

    fn fallback_encode(
        &self,
        native: &NativeType,
        info: &TypeInfo,
        value: &Value,
        reason: FallbackReason,
    ) -> Result<Option<Vec<u8>>, CodecError> {
        self.generic(native, info, reason)?.encode(native, info, value)
    }
}
