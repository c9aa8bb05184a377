use std::{fmt, str::FromStr};

use crate::error::DescriptorError;

/// Column types of the CQL native protocol.
///
/// Variants are declared in lexicographic order of their CQL names, so the
/// derived [`Ord`] is the stable branch order used by dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum WireType {
    /// `ascii`
    Ascii,
    /// `bigint` - 64-bit signed integer
    BigInt,
    /// `blob`
    Blob,
    /// `boolean`
    Boolean,
    /// `counter` - 64-bit signed integer
    Counter,
    /// `custom` - server-side Java class
    Custom,
    /// `date`
    Date,
    /// `decimal` - 4-byte scale followed by a varint
    Decimal,
    /// `double`
    Double,
    /// `duration`
    Duration,
    /// `float`
    Float,
    /// `inet` - 4 or 16 byte address
    Inet,
    /// `int` - 32-bit signed integer
    Int,
    /// `list<T>`
    List,
    /// `map<K, V>`
    Map,
    /// `set<T>`
    Set,
    /// `smallint` - 16-bit signed integer
    SmallInt,
    /// `text`
    Text,
    /// `time`
    Time,
    /// `timestamp`
    Timestamp,
    /// `timeuuid`
    TimeUuid,
    /// `tinyint` - 8-bit signed integer
    TinyInt,
    /// `tuple<...>`
    Tuple,
    /// User-defined type
    Udt,
    /// `uuid`
    Uuid,
    /// `varchar`
    Varchar,
    /// `varint` - arbitrary-precision two's complement integer
    Varint,
}

impl WireType {
    pub const ALL: [WireType; 27] = [
        Self::Ascii,
        Self::BigInt,
        Self::Blob,
        Self::Boolean,
        Self::Counter,
        Self::Custom,
        Self::Date,
        Self::Decimal,
        Self::Double,
        Self::Duration,
        Self::Float,
        Self::Inet,
        Self::Int,
        Self::List,
        Self::Map,
        Self::Set,
        Self::SmallInt,
        Self::Text,
        Self::Time,
        Self::Timestamp,
        Self::TimeUuid,
        Self::TinyInt,
        Self::Tuple,
        Self::Udt,
        Self::Uuid,
        Self::Varchar,
        Self::Varint,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascii => "ascii",
            Self::BigInt => "bigint",
            Self::Blob => "blob",
            Self::Boolean => "boolean",
            Self::Counter => "counter",
            Self::Custom => "custom",
            Self::Date => "date",
            Self::Decimal => "decimal",
            Self::Double => "double",
            Self::Duration => "duration",
            Self::Float => "float",
            Self::Inet => "inet",
            Self::Int => "int",
            Self::List => "list",
            Self::Map => "map",
            Self::Set => "set",
            Self::SmallInt => "smallint",
            Self::Text => "text",
            Self::Time => "time",
            Self::Timestamp => "timestamp",
            Self::TimeUuid => "timeuuid",
            Self::TinyInt => "tinyint",
            Self::Tuple => "tuple",
            Self::Udt => "udt",
            Self::Uuid => "uuid",
            Self::Varchar => "varchar",
            Self::Varint => "varint",
        }
    }

    /// Protocol option id of this type.
    pub fn id(&self) -> u16 {
        match self {
            Self::Custom => 0x0000,
            Self::Ascii => 0x0001,
            Self::BigInt => 0x0002,
            Self::Blob => 0x0003,
            Self::Boolean => 0x0004,
            Self::Counter => 0x0005,
            Self::Decimal => 0x0006,
            Self::Double => 0x0007,
            Self::Float => 0x0008,
            Self::Int => 0x0009,
            Self::Text => 0x000A,
            Self::Timestamp => 0x000B,
            Self::Uuid => 0x000C,
            Self::Varchar => 0x000D,
            Self::Varint => 0x000E,
            Self::TimeUuid => 0x000F,
            Self::Inet => 0x0010,
            Self::Date => 0x0011,
            Self::Time => 0x0012,
            Self::SmallInt => 0x0013,
            Self::TinyInt => 0x0014,
            Self::Duration => 0x0015,
            Self::List => 0x0020,
            Self::Map => 0x0021,
            Self::Set => 0x0022,
            Self::Udt => 0x0030,
            Self::Tuple => 0x0031,
        }
    }

    pub fn from_id(id: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.id() == id)
    }

    /// Byte width of fixed-width integer types.
    pub fn int_width(&self) -> Option<usize> {
        match self {
            Self::TinyInt => Some(1),
            Self::SmallInt => Some(2),
            Self::Int => Some(4),
            Self::BigInt | Self::Counter => Some(8),
            _ => None,
        }
    }
}

impl FromStr for WireType {
    type Err = DescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| DescriptorError::UnknownWireType(s.to_string()))
    }
}

impl fmt::Display for WireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
