//! Contract of the generic codec that specialised dispatch falls back to.

use crate::{
    error::CodecError,
    schema::{NativeType, TypeInfo},
    value::Value,
};

/// Reflective codec able to convert any native type to and from any wire type.
///
/// Implementations are injected into the dispatching codec and invoked for a
/// single value whenever no specialised rule applies. They must be stateless
/// with respect to individual calls; one instance serves all threads.
pub trait GenericCodec: Send + Sync {
    /// Decode a payload (`None` for null) into a value of type `native`.
    fn decode(
        &self,
        native: &NativeType,
        info: &TypeInfo,
        data: Option<&[u8]>,
    ) -> Result<Value, CodecError>;

    /// Encode `value` of type `native`; `None` stands for the null payload.
    fn encode(
        &self,
        native: &NativeType,
        info: &TypeInfo,
        value: &Value,
    ) -> Result<Option<Vec<u8>>, CodecError>;
}
