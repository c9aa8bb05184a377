//! Shared helpers for building UDT payloads, descriptors and codecs in tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use cqlcodec::{
    Codec, CodecError, FieldDescriptor, GenericCodec, NativeType, ScalarKind, StructType,
    TypeInfo, UdtTypeInfo, Value, WireType,
};

/// Route codec events to the test writer; repeated calls are harmless.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Frame one payload the way UDT elements and collection items are framed.
pub fn framed(payload: Option<&[u8]>) -> Vec<u8> {
    match payload {
        None => (-1i32).to_be_bytes().to_vec(),
        Some(p) => {
            let mut buf = (p.len() as i32).to_be_bytes().to_vec();
            buf.extend_from_slice(p);
            buf
        }
    }
}

/// A non-null element payload.
pub fn present(p: &[u8]) -> Option<&[u8]> {
    Some(p)
}

/// Concatenate framed elements into a UDT payload.
pub fn udt_payload(elements: &[Option<&[u8]>]) -> Vec<u8> {
    elements.iter().flat_map(|e| framed(*e)).collect()
}

/// Collection payload: 4-byte count followed by framed items.
pub fn collection_payload(items: &[Option<&[u8]>]) -> Vec<u8> {
    let mut buf = (items.len() as i32).to_be_bytes().to_vec();
    buf.extend(udt_payload(items));
    buf
}

pub fn udt_info(name: &str, elements: &[(&str, TypeInfo)]) -> TypeInfo {
    let udt = elements
        .iter()
        .fold(UdtTypeInfo::new("ks", name), |udt, (n, t)| {
            udt.with_element(*n, t.clone())
        });
    TypeInfo::Udt(udt)
}

pub fn native(wire_type: WireType) -> TypeInfo {
    TypeInfo::Native(wire_type)
}

/// `Address { street: String, zip: i32 (required) }`.
pub fn address_type() -> StructType {
    StructType::builder("Address")
        .field(FieldDescriptor::new("street", ScalarKind::String))
        .field(FieldDescriptor::new("zip", ScalarKind::I32).required())
        .build()
        .unwrap()
}

pub fn address_info() -> TypeInfo {
    udt_info(
        "address",
        &[("street", native(WireType::Text)), ("zip", native(WireType::Int))],
    )
}

/// Generic codec that records every call and answers with fixed markers.
#[derive(Default)]
pub struct RecordingCodec {
    pub calls: Mutex<Vec<String>>,
}

impl RecordingCodec {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl GenericCodec for RecordingCodec {
    fn decode(
        &self,
        native: &NativeType,
        info: &TypeInfo,
        _data: Option<&[u8]>,
    ) -> Result<Value, CodecError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("decode {native} from {info}"));
        Ok(Value::string("generic"))
    }

    fn encode(
        &self,
        native: &NativeType,
        info: &TypeInfo,
        _value: &Value,
    ) -> Result<Option<Vec<u8>>, CodecError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("encode {native} as {info}"));
        Ok(Some(b"generic".to_vec()))
    }
}

pub fn recording_codec() -> (Codec, Arc<RecordingCodec>) {
    let generic = Arc::new(RecordingCodec::default());
    let codec = Codec::builder().fallback(generic.clone()).build();
    (codec, generic)
}
