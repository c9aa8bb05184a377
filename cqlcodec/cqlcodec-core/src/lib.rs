//! Wire-agnostic core types for `cqlcodec`.
//!
//! This crate provides the descriptor types shared by the binary primitives
//! and the dispatching codec: wire types ([`WireType`] / [`TypeInfo`]),
//! native types ([`NativeType`] / [`StructType`]), the native [`Value`] tree,
//! error types, and the [`GenericCodec`] fallback contract.

mod error;
mod generic;
mod schema;
mod value;
mod wire_type;

pub use error::{CodecError, DescriptorError, ErrorKind, ValueTypeError};
pub use generic::GenericCodec;
pub use schema::{
    AliasType, FieldDescriptor, IntLayout, NativeType, ScalarKind, StructType, StructTypeBuilder,
    TypeInfo, UdtField, UdtTypeInfo, format_struct_type,
};
pub use value::Value;
pub use wire_type::WireType;
