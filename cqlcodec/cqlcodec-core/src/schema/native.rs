use std::{
    collections::HashMap,
    fmt::{Display, Formatter, Result},
    sync::Arc,
};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;

use crate::{error::DescriptorError, value::Value, wire_type::WireType};

/// Primitive kind of a native scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ScalarKind {
    Bool,
    I8,
    I16,
    I32,
    I64,
    /// Platform-width signed integer.
    Isize,
    U8,
    U16,
    U32,
    U64,
    /// Platform-width unsigned integer.
    Usize,
    F32,
    F64,
    String,
    Bytes,
    BigInt,
    Decimal,
}

impl ScalarKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::I8 => "i8",
            ScalarKind::I16 => "i16",
            ScalarKind::I32 => "i32",
            ScalarKind::I64 => "i64",
            ScalarKind::Isize => "isize",
            ScalarKind::U8 => "u8",
            ScalarKind::U16 => "u16",
            ScalarKind::U32 => "u32",
            ScalarKind::U64 => "u64",
            ScalarKind::Usize => "usize",
            ScalarKind::F32 => "f32",
            ScalarKind::F64 => "f64",
            ScalarKind::String => "string",
            ScalarKind::Bytes => "bytes",
            ScalarKind::BigInt => "bigint",
            ScalarKind::Decimal => "decimal",
        }
    }

    /// Bit width and signedness of fixed-width integer kinds.
    pub fn int_layout(&self) -> Option<IntLayout> {
        let (bits, signed) = match self {
            ScalarKind::I8 => (8, true),
            ScalarKind::I16 => (16, true),
            ScalarKind::I32 => (32, true),
            ScalarKind::I64 => (64, true),
            ScalarKind::Isize => (isize::BITS, true),
            ScalarKind::U8 => (8, false),
            ScalarKind::U16 => (16, false),
            ScalarKind::U32 => (32, false),
            ScalarKind::U64 => (64, false),
            ScalarKind::Usize => (usize::BITS, false),
            _ => return None,
        };
        Some(IntLayout { bits, signed })
    }

    pub fn zero_value(&self) -> Value {
        match self {
            ScalarKind::Bool => Value::Bool(false),
            ScalarKind::I8 => Value::I8(0),
            ScalarKind::I16 => Value::I16(0),
            ScalarKind::I32 => Value::I32(0),
            ScalarKind::I64 => Value::I64(0),
            ScalarKind::Isize => Value::Isize(0),
            ScalarKind::U8 => Value::U8(0),
            ScalarKind::U16 => Value::U16(0),
            ScalarKind::U32 => Value::U32(0),
            ScalarKind::U64 => Value::U64(0),
            ScalarKind::Usize => Value::Usize(0),
            ScalarKind::F32 => Value::F32(0.0),
            ScalarKind::F64 => Value::F64(0.0),
            ScalarKind::String => Value::string(""),
            ScalarKind::Bytes => Value::Bytes(Arc::from(Vec::new())),
            ScalarKind::BigInt => Value::BigInt(BigInt::default()),
            ScalarKind::Decimal => Value::Decimal(BigDecimal::default()),
        }
    }
}

impl Display for ScalarKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(self.type_name())
    }
}

/// Width and signedness of a fixed-width integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntLayout {
    pub bits: u32,
    pub signed: bool,
}

impl IntLayout {
    pub fn min(&self) -> i128 {
        if self.signed {
            -(1i128 << (self.bits - 1))
        } else {
            0
        }
    }

    pub fn max(&self) -> i128 {
        if self.signed {
            (1i128 << (self.bits - 1)) - 1
        } else {
            (1i128 << self.bits) - 1
        }
    }

    pub fn contains(&self, v: i128) -> bool {
        (self.min()..=self.max()).contains(&v)
    }

    /// Keep the low-order `bits` of `v`, reinterpreted with this signedness.
    pub fn wrap(&self, v: i128) -> i128 {
        let mask = (1i128 << self.bits) - 1;
        let low = v & mask;
        if self.signed && low > self.max() {
            low - (1i128 << self.bits)
        } else {
            low
        }
    }
}

/// Declared native type of a value slot.
#[derive(Debug, Clone, PartialEq)]
pub enum NativeType {
    Scalar(ScalarKind),
    /// A named type defined over another native type.
    Alias(Arc<AliasType>),
    /// Nullable reference; absent values are [`Value::Null`].
    Optional(Box<NativeType>),
    List(Box<NativeType>),
    Map {
        key: Box<NativeType>,
        value: Box<NativeType>,
    },
    Struct(Arc<StructType>),
}

impl NativeType {
    pub fn alias(name: impl Into<String>, target: NativeType) -> Self {
        Self::Alias(Arc::new(AliasType {
            name: name.into(),
            target,
        }))
    }

    pub fn optional(inner: NativeType) -> Self {
        Self::Optional(Box::new(inner))
    }

    pub fn list(elem: NativeType) -> Self {
        Self::List(Box::new(elem))
    }

    pub fn map(key: NativeType, value: NativeType) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn scalar_kind(&self) -> Option<ScalarKind> {
        match self {
            NativeType::Scalar(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Value a non-optional slot holds when nothing was decoded into it.
    pub fn zero_value(&self) -> Value {
        match self {
            NativeType::Scalar(kind) => kind.zero_value(),
            NativeType::Alias(alias) => alias.target.zero_value(),
            NativeType::Optional(_) => Value::Null,
            NativeType::List(_) => Value::List(Vec::new()),
            NativeType::Map { .. } => Value::Map(Vec::new()),
            NativeType::Struct(st) => st.zero_value(),
        }
    }
}

impl From<ScalarKind> for NativeType {
    fn from(value: ScalarKind) -> Self {
        Self::Scalar(value)
    }
}

impl From<StructType> for NativeType {
    fn from(value: StructType) -> Self {
        Self::Struct(Arc::new(value))
    }
}

impl Display for NativeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            NativeType::Scalar(kind) => write!(f, "{kind}"),
            NativeType::Alias(alias) => f.write_str(&alias.name),
            NativeType::Optional(inner) => write!(f, "Option<{inner}>"),
            NativeType::List(elem) => write!(f, "Vec<{elem}>"),
            NativeType::Map { key, value } => write!(f, "Map<{key}, {value}>"),
            NativeType::Struct(st) => f.write_str(&st.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AliasType {
    pub name: String,
    pub target: NativeType,
}

/// Coding configuration of one native struct field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Native field name.
    pub name: String,
    /// UDT element name the field is matched against.
    pub wire_name: String,
    pub native_type: NativeType,
    /// Wire type tried first, ahead of the native type's default preference.
    pub wire_type: Option<WireType>,
    pub omit: bool,
    pub required: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, native_type: impl Into<NativeType>) -> Self {
        let name = name.into();
        Self {
            wire_name: name.clone(),
            name,
            native_type: native_type.into(),
            wire_type: None,
            omit: false,
            required: false,
        }
    }

    pub fn rename(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = wire_name.into();
        self
    }

    pub fn prefer(mut self, wire_type: WireType) -> Self {
        self.wire_type = Some(wire_type);
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn omitted(mut self) -> Self {
        self.omit = true;
        self
    }

    /// Build a descriptor from a tag of the form `name,option,option`.
    ///
    /// A leading `-` omits the field, `required` marks it required and a
    /// wire type name sets the preferred wire type.
    pub fn from_tag(
        name: impl Into<String>,
        native_type: impl Into<NativeType>,
        tag: &str,
    ) -> std::result::Result<Self, DescriptorError> {
        let mut field = Self::new(name, native_type);
        for (i, part) in tag.split(',').enumerate() {
            let part = part.trim();
            match part {
                "-" if i == 0 => field.omit = true,
                "" if i == 0 => {}
                _ if i == 0 => field.wire_name = part.to_string(),
                "required" => field.required = true,
                _ => {
                    let Ok(wire_type) = part.parse::<WireType>() else {
                        continue;
                    };
                    if let Some(first) = field.wire_type {
                        return Err(DescriptorError::ConflictingWireTypes {
                            field: field.name,
                            first: first.to_string(),
                            second: wire_type.to_string(),
                        });
                    }
                    field.wire_type = Some(wire_type);
                }
            }
        }
        Ok(field)
    }

    pub fn is_coded(&self) -> bool {
        !self.omit
    }

    /// Omitted fields are never required-checked.
    pub fn is_required(&self) -> bool {
        self.required && !self.omit
    }
}

/// Flattened field layout of a native struct.
///
/// Fields of embedded structs are merged into the field list at build time;
/// a field declared on the outer struct shadows an embedded field with the
/// same wire name.
#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    name: String,
    fields: Vec<FieldDescriptor>,
    by_wire_name: HashMap<String, usize>,
}

impl StructType {
    pub fn builder(name: impl Into<String>) -> StructTypeBuilder {
        StructTypeBuilder {
            name: name.into(),
            fields: Vec::new(),
            embedded: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn coded_fields(&self) -> impl Iterator<Item = (usize, &FieldDescriptor)> {
        self.fields.iter().enumerate().filter(|(_, f)| f.is_coded())
    }

    /// Position of the coded field matched by `wire_name`.
    pub fn position(&self, wire_name: &str) -> Option<usize> {
        self.by_wire_name.get(wire_name).copied()
    }

    pub fn field(&self, wire_name: &str) -> Option<&FieldDescriptor> {
        self.position(wire_name).map(|i| &self.fields[i])
    }

    pub fn zero_value(&self) -> Value {
        Value::Struct(
            self.fields
                .iter()
                .map(|f| f.native_type.zero_value())
                .collect(),
        )
    }
}

pub struct StructTypeBuilder {
    name: String,
    fields: Vec<FieldDescriptor>,
    embedded: Vec<Arc<StructType>>,
}

impl StructTypeBuilder {
    pub fn field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    /// Embed another struct anonymously; its fields are flattened into this one.
    pub fn embed(mut self, embedded: impl Into<Arc<StructType>>) -> Self {
        self.embedded.push(embedded.into());
        self
    }

    pub fn build(self) -> std::result::Result<StructType, DescriptorError> {
        let mut inherited = Vec::new();
        for embedded in &self.embedded {
            inherited = merge_fields(inherited, embedded.fields.clone());
        }

        let mut by_wire_name = HashMap::new();
        for (i, field) in self.fields.iter().enumerate() {
            if field.is_coded() && by_wire_name.insert(field.wire_name.clone(), i).is_some() {
                return Err(DescriptorError::DuplicateField {
                    name: self.name,
                    field: field.wire_name.clone(),
                });
            }
        }

        let fields = merge_fields(inherited, self.fields);
        let by_wire_name = fields
            .iter()
            .enumerate()
            .filter(|(_, f)| f.is_coded())
            .map(|(i, f)| (f.wire_name.clone(), i))
            .collect();

        Ok(StructType {
            name: self.name,
            fields,
            by_wire_name,
        })
    }
}

/// Fields of `shadowing` first, then every field of `base` whose wire name
/// `shadowing` does not already use.
fn merge_fields(
    base: Vec<FieldDescriptor>,
    shadowing: Vec<FieldDescriptor>,
) -> Vec<FieldDescriptor> {
    let mut merged = shadowing;
    let taken: Vec<String> = merged.iter().map(|f| f.wire_name.clone()).collect();
    merged.extend(base.into_iter().filter(|f| !taken.contains(&f.wire_name)));
    merged
}
