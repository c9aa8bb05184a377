use std::fmt::{Display, Formatter, Result};

use crate::wire_type::WireType;

/// Wire-level shape of a value, as announced by the protocol peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeInfo {
    /// A non-parameterised column type.
    Native(WireType),
    List(Box<TypeInfo>),
    Set(Box<TypeInfo>),
    Map {
        key: Box<TypeInfo>,
        value: Box<TypeInfo>,
    },
    Tuple(Vec<TypeInfo>),
    Udt(UdtTypeInfo),
}

impl TypeInfo {
    pub fn list(elem: TypeInfo) -> Self {
        Self::List(Box::new(elem))
    }

    pub fn set(elem: TypeInfo) -> Self {
        Self::Set(Box::new(elem))
    }

    pub fn map(key: TypeInfo, value: TypeInfo) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    /// Tag identifying this type on the wire.
    pub fn wire_type(&self) -> WireType {
        match self {
            TypeInfo::Native(t) => *t,
            TypeInfo::List(_) => WireType::List,
            TypeInfo::Set(_) => WireType::Set,
            TypeInfo::Map { .. } => WireType::Map,
            TypeInfo::Tuple(_) => WireType::Tuple,
            TypeInfo::Udt(_) => WireType::Udt,
        }
    }

    pub fn as_udt(&self) -> Option<&UdtTypeInfo> {
        match self {
            TypeInfo::Udt(udt) => Some(udt),
            _ => None,
        }
    }
}

impl From<WireType> for TypeInfo {
    fn from(value: WireType) -> Self {
        Self::Native(value)
    }
}

impl From<UdtTypeInfo> for TypeInfo {
    fn from(value: UdtTypeInfo) -> Self {
        Self::Udt(value)
    }
}

impl Display for TypeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            TypeInfo::Native(t) => write!(f, "{t}"),
            TypeInfo::List(elem) => write!(f, "list<{elem}>"),
            TypeInfo::Set(elem) => write!(f, "set<{elem}>"),
            TypeInfo::Map { key, value } => write!(f, "map<{key}, {value}>"),
            TypeInfo::Tuple(elems) => {
                f.write_str("tuple<")?;
                for (i, elem) in elems.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{elem}")?;
                }
                f.write_str(">")
            }
            TypeInfo::Udt(udt) => write!(f, "{udt}"),
        }
    }
}

/// User-defined type: an ordered list of named elements.
///
/// Keyspace and name only identify the type in messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdtTypeInfo {
    pub keyspace: String,
    pub name: String,
    pub elements: Vec<UdtField>,
}

impl UdtTypeInfo {
    pub fn new(keyspace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            keyspace: keyspace.into(),
            name: name.into(),
            elements: Vec::new(),
        }
    }

    pub fn with_element(mut self, name: impl Into<String>, type_info: impl Into<TypeInfo>) -> Self {
        self.elements.push(UdtField::new(name, type_info));
        self
    }
}

impl Display for UdtTypeInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        if self.keyspace.is_empty() {
            f.write_str(&self.name)
        } else {
            write!(f, "{}.{}", self.keyspace, self.name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UdtField {
    pub name: String,
    pub type_info: TypeInfo,
}

impl UdtField {
    pub fn new(name: impl Into<String>, type_info: impl Into<TypeInfo>) -> Self {
        Self {
            name: name.into(),
            type_info: type_info.into(),
        }
    }
}
