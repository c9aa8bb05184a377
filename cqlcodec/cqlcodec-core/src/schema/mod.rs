//! Schema descriptors: wire-level [`TypeInfo`] and native-level [`NativeType`].

mod format;
mod native;
mod type_info;

pub use format::format_struct_type;
pub use native::{
    AliasType, FieldDescriptor, IntLayout, NativeType, ScalarKind, StructType, StructTypeBuilder,
};
pub use type_info::{TypeInfo, UdtField, UdtTypeInfo};
