//! Rule-driven codec between native values and CQL wire payloads.
//!
//! The [`Codec`] walks a native type description ([`NativeType`] /
//! [`StructType`]) alongside the wire type announced by the peer
//! ([`TypeInfo`]) and converts each scalar with a specialised
//! [`ConversionRule`] from the process-wide [`RuleTable`]. Anything the rules
//! do not cover is handed to an injected [`GenericCodec`].
//!
//! # Typical Flow
//! ```rust
//! use cqlcodec::{Codec, FieldDescriptor, NativeType, ScalarKind, StructType, TypeInfo,
//!     UdtTypeInfo, Value, WireType};
//!
//! let address = StructType::builder("Address")
//!     .field(FieldDescriptor::new("street", ScalarKind::String))
//!     .field(FieldDescriptor::new("zip", ScalarKind::I32).required())
//!     .build()
//!     .unwrap();
//! let info = TypeInfo::Udt(
//!     UdtTypeInfo::new("ks", "address")
//!         .with_element("street", WireType::Text)
//!         .with_element("zip", WireType::Int),
//! );
//! let native = NativeType::from(address);
//!
//! let codec = Codec::new();
//! let value = Value::Struct(vec![Value::string("Main St"), Value::I32(12345)]);
//! let payload = codec.encode(&native, &info, &value).unwrap();
//! let decoded = codec.decode(&native, &info, payload.as_deref()).unwrap();
//! assert_eq!(decoded, value);
//! ```

mod codec;
mod compound;
mod config;
mod plan;
mod rules;
mod scalar;

pub use codec::{Codec, CodecBuilder};
pub use config::{CodecConfig, DispatchMode, IntegerOverflow, UnknownFieldPolicy};
pub use cqlcodec_core::{
    AliasType, CodecError, DescriptorError, ErrorKind, FieldDescriptor, GenericCodec, IntLayout,
    NativeType, ScalarKind, StructType, StructTypeBuilder, TypeInfo, UdtField, UdtTypeInfo,
    Value, ValueTypeError, WireType, format_struct_type,
};
pub use rules::{ConversionRule, Dispatch, RuleKey, RuleSet, RuleTable};
pub use scalar::{Conversion, DecodeFn, EncodeFn};
