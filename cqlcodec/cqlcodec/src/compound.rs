//! UDT and collection payloads: framed elements around recursive dispatch.

use cqlcodec_core::{CodecError, NativeType, StructType, TypeInfo, Value};
use cqlcodec_wire::{append_bytes, append_count, read_bytes, read_count};

use crate::codec::Codec;

fn udt_mismatch(st: &StructType, info: &TypeInfo) -> CodecError {
    CodecError::TypeMismatch {
        native: st.name().to_string(),
        found: info.to_string(),
    }
}

/// Decode a UDT payload into the flattened fields of `st`.
///
/// Elements are read in the order the type info lists them. A payload that
/// ends early leaves the remaining fields at their zero value.
pub(crate) fn decode_udt(
    codec: &Codec,
    st: &StructType,
    info: &TypeInfo,
    data: Option<&[u8]>,
) -> Result<Value, CodecError> {
    let Some(mut rest) = data else {
        return Ok(st.zero_value());
    };
    let udt = info.as_udt().ok_or_else(|| udt_mismatch(st, info))?;

    let mut values: Vec<Value> = st
        .fields()
        .iter()
        .map(|f| f.native_type.zero_value())
        .collect();
    let mut observed = vec![false; values.len()];

    for element in &udt.elements {
        if rest.is_empty() {
            tracing::trace!(udt = %udt, element = %element.name, "udt payload ended early");
            break;
        }
        let (payload, next) = read_bytes(rest)?;
        rest = next;

        let Some(i) = st.position(&element.name) else {
            if codec.rejects_unknown_fields() {
                return Err(CodecError::UnknownField {
                    udt: udt.to_string(),
                    field: element.name.clone(),
                });
            }
            tracing::trace!(udt = %udt, element = %element.name, "ignoring unknown udt element");
            continue;
        };
        values[i] = codec.decode(&st.fields()[i].native_type, &element.type_info, payload)?;
        observed[i] = true;
    }

    if let Some((_, field)) = st
        .coded_fields()
        .find(|(i, f)| f.is_required() && !observed[*i])
    {
        return Err(CodecError::MissingRequiredField {
            field: field.wire_name.clone(),
        });
    }

    Ok(Value::Struct(values))
}

/// Encode the fields of `st` in the element order of the type info.
pub(crate) fn encode_udt(
    codec: &Codec,
    st: &StructType,
    info: &TypeInfo,
    value: &Value,
) -> Result<Option<Vec<u8>>, CodecError> {
    let Some(values) = value.try_struct()? else {
        return Ok(None);
    };
    let udt = info.as_udt().ok_or_else(|| udt_mismatch(st, info))?;
    if values.len() != st.fields().len() {
        return Err(CodecError::TypeMismatch {
            native: st.name().to_string(),
            found: format!("struct value with {} fields", values.len()),
        });
    }

    let mut buf = Vec::new();
    for element in &udt.elements {
        match st.position(&element.name) {
            Some(i) => {
                let native = &st.fields()[i].native_type;
                let payload = codec.encode(native, &element.type_info, &values[i])?;
                append_bytes(&mut buf, payload.as_deref())?;
            }
            None if codec.rejects_unknown_fields() => {
                return Err(CodecError::UnknownField {
                    udt: udt.to_string(),
                    field: element.name.clone(),
                });
            }
            None => append_bytes(&mut buf, None)?,
        }
    }
    Ok(Some(buf))
}

pub(crate) fn decode_list(
    codec: &Codec,
    elem: &NativeType,
    elem_info: &TypeInfo,
    data: Option<&[u8]>,
) -> Result<Value, CodecError> {
    let Some(data) = data else {
        return Ok(Value::List(Vec::new()));
    };
    let (count, mut rest) = read_count(data)?;
    let mut items = Vec::with_capacity(count.min(rest.len() / 4));
    for _ in 0..count {
        let (payload, next) = read_bytes(rest)?;
        rest = next;
        items.push(codec.decode(elem, elem_info, payload)?);
    }
    Ok(Value::List(items))
}

pub(crate) fn encode_list(
    codec: &Codec,
    elem: &NativeType,
    elem_info: &TypeInfo,
    value: &Value,
) -> Result<Option<Vec<u8>>, CodecError> {
    let Some(items) = value.try_list()? else {
        return Ok(None);
    };
    let mut buf = Vec::new();
    append_count(&mut buf, items.len())?;
    for item in items {
        let payload = codec.encode(elem, elem_info, item)?;
        append_bytes(&mut buf, payload.as_deref())?;
    }
    Ok(Some(buf))
}

pub(crate) fn decode_map(
    codec: &Codec,
    (key, value): (&NativeType, &NativeType),
    (key_info, value_info): (&TypeInfo, &TypeInfo),
    data: Option<&[u8]>,
) -> Result<Value, CodecError> {
    let Some(data) = data else {
        return Ok(Value::Map(Vec::new()));
    };
    let (count, mut rest) = read_count(data)?;
    let mut entries = Vec::with_capacity(count.min(rest.len() / 8));
    for _ in 0..count {
        let (key_payload, next) = read_bytes(rest)?;
        let (value_payload, next) = read_bytes(next)?;
        rest = next;
        entries.push((
            codec.decode(key, key_info, key_payload)?,
            codec.decode(value, value_info, value_payload)?,
        ));
    }
    Ok(Value::Map(entries))
}

pub(crate) fn encode_map(
    codec: &Codec,
    (key, value): (&NativeType, &NativeType),
    (key_info, value_info): (&TypeInfo, &TypeInfo),
    map: &Value,
) -> Result<Option<Vec<u8>>, CodecError> {
    let Some(entries) = map.try_map()? else {
        return Ok(None);
    };
    let mut buf = Vec::new();
    append_count(&mut buf, entries.len())?;
    for (k, v) in entries {
        let key_payload = codec.encode(key, key_info, k)?;
        append_bytes(&mut buf, key_payload.as_deref())?;
        let value_payload = codec.encode(value, value_info, v)?;
        append_bytes(&mut buf, value_payload.as_deref())?;
    }
    Ok(Some(buf))
}
