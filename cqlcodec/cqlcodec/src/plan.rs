use std::fmt::{Error, Result, Write as _};

use cqlcodec_core::{FieldDescriptor, NativeType, StructType, WireType};

use crate::{codec::Codec, config::DispatchMode, rules::underlying_kind};

impl Codec {
    /// Render how each coded field of `st` is dispatched.
    ///
    /// Scalar fields list the wire types with a specialised rule in the order
    /// they are tried, followed by what happens for any other wire type.
    /// Compound fields are pretty-printed with their element plans.
    ///
    /// ```text
    /// id: { native: string, branches: [varchar, ascii, bigint, ...], else: error }
    /// tags:
    ///     native: Vec<string>
    ///     item: { native: string, branches: [...], else: error }
    /// ```
    pub fn dispatch_plan(&self, st: &StructType) -> std::result::Result<String, Error> {
        let mut out = String::new();
        for (_, field) in st.coded_fields() {
            self.plan_field(field, 0, &mut out)?;
        }
        Ok(out)
    }

    fn plan_field(&self, field: &FieldDescriptor, indent: usize, out: &mut String) -> Result {
        self.plan_labeled(
            &field.wire_name,
            &field.native_type,
            field.wire_type,
            indent,
            out,
        )
    }

    fn plan_labeled(
        &self,
        label: &str,
        native: &NativeType,
        first: Option<WireType>,
        indent: usize,
        out: &mut String,
    ) -> Result {
        let pad = " ".repeat(indent);
        let native = unwrap_optional(native);
        match native {
            NativeType::Alias(alias) if underlying_kind(&alias.target).is_none() => {
                self.plan_labeled(label, &alias.target, first, indent, out)
            }
            NativeType::Scalar(_) | NativeType::Alias(_) => {
                writeln!(out, "{pad}{label}: {{ {} }}", self.scalar_plan(native, first))
            }
            NativeType::Struct(st) => {
                writeln!(out, "{pad}{label}:")?;
                writeln!(out, "{pad}    native: {native}")?;
                writeln!(out, "{pad}    fields:")?;
                for (_, child) in st.coded_fields() {
                    self.plan_field(child, indent + 8, out)?;
                }
                Ok(())
            }
            NativeType::List(elem) => {
                writeln!(out, "{pad}{label}:")?;
                writeln!(out, "{pad}    native: {native}")?;
                self.plan_labeled("item", elem, None, indent + 4, out)
            }
            NativeType::Map { key, value } => {
                writeln!(out, "{pad}{label}:")?;
                writeln!(out, "{pad}    native: {native}")?;
                self.plan_labeled("key", key, None, indent + 4, out)?;
                self.plan_labeled("value", value, None, indent + 4, out)
            }
            NativeType::Optional(_) => unreachable!("optional layers are stripped"),
        }
    }

    fn scalar_plan(&self, native: &NativeType, first: Option<WireType>) -> String {
        let rules = self.rules();
        let set = rules.resolve(native).and_then(|key| rules.rule_set(key));
        match set {
            Some(_) if self.config().dispatch_mode == DispatchMode::Conservative => {
                format!("native: {native}, branches: [], else: fallback")
            }
            Some(set) => {
                let branches: Vec<&str> = set
                    .branches(first)
                    .into_iter()
                    .map(|t| t.as_str())
                    .collect();
                let otherwise = if set.complete { "error" } else { "fallback" };
                format!(
                    "native: {native}, branches: [{}], else: {otherwise}",
                    branches.join(", ")
                )
            }
            None => format!("native: {native}, branches: [], else: fallback"),
        }
    }
}

fn unwrap_optional(native: &NativeType) -> &NativeType {
    match native {
        NativeType::Optional(inner) => unwrap_optional(inner),
        _ => native,
    }
}
