use std::fmt::{Error, Result, Write as _};

use super::{FieldDescriptor, NativeType, StructType};

/// Format a struct's flattened field layout in a readable style:
/// scalar fields are rendered in one line, compound fields are pretty-printed.
/// Nested structs follow the same rule.
pub fn format_struct_type(st: &StructType) -> std::result::Result<String, Error> {
    let mut out = String::new();
    for field in st.fields() {
        format_field(field, 0, &mut out)?;
    }
    Ok(out)
}

fn format_field(field: &FieldDescriptor, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    let mut flags = Vec::new();
    if field.wire_name != field.name {
        flags.push(format!("wire: {}", field.wire_name));
    }
    if let Some(wire_type) = field.wire_type {
        flags.push(format!("prefer: {wire_type}"));
    }
    if field.omit {
        flags.push("omit".to_string());
    } else if field.required {
        flags.push("required".to_string());
    }

    if is_compound(&field.native_type) {
        writeln!(out, "{pad}{}:", field.name)?;
        for flag in &flags {
            writeln!(out, "{pad}    {flag}")?;
        }
        format_native_type(&field.native_type, indent + 4, out)?;
    } else {
        let mut line = format!("type: {}", field.native_type);
        for flag in &flags {
            line.push_str(", ");
            line.push_str(flag);
        }
        writeln!(out, "{pad}{}: {{ {line} }}", field.name)?;
    }
    Ok(())
}

fn format_native_type(native: &NativeType, indent: usize, out: &mut String) -> Result {
    let pad = " ".repeat(indent);
    writeln!(out, "{pad}type: {native}")?;

    match native {
        NativeType::Struct(st) => {
            writeln!(out, "{pad}fields:")?;
            for child in st.fields() {
                format_field(child, indent + 4, out)?;
            }
        }
        NativeType::Optional(inner) => {
            format_labeled_type("some", inner, indent, out)?;
        }
        NativeType::List(elem) => {
            format_labeled_type("item", elem, indent, out)?;
        }
        NativeType::Map { key, value } => {
            format_labeled_type("key", key, indent, out)?;
            format_labeled_type("value", value, indent, out)?;
        }
        _ => unreachable!("{native:?} is not a compound type"),
    }

    Ok(())
}

fn format_labeled_type(
    label: &str,
    native: &NativeType,
    indent: usize,
    out: &mut String,
) -> Result {
    let pad = " ".repeat(indent);
    if is_compound(native) {
        writeln!(out, "{pad}{label}:")?;
        format_native_type(native, indent + 4, out)?;
    } else {
        writeln!(out, "{pad}{label}: {{ type: {native} }}")?;
    }
    Ok(())
}

fn is_compound(native: &NativeType) -> bool {
    match native {
        NativeType::Struct(_) | NativeType::List(_) | NativeType::Map { .. } => true,
        NativeType::Optional(inner) => is_compound(inner),
        NativeType::Scalar(_) | NativeType::Alias(_) => false,
    }
}
