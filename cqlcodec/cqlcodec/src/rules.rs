//! Static registry of specialised scalar conversion rules.
//!
//! Rules are keyed by [`RuleKey`]: rules registered for an exact native type
//! apply only to that type, rules registered for a primitive kind also apply
//! to aliases of that kind. The table is built once per process and shared
//! by every [`Codec`](crate::Codec).

use std::{
    collections::{BTreeSet, HashMap},
    sync::LazyLock,
};

use cqlcodec_core::{NativeType, ScalarKind, WireType};

use crate::scalar::{self, DecodeFn, EncodeFn};

/// Identity a rule set is registered under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleKey {
    /// The exact declared scalar type; never matches aliases.
    Type(ScalarKind),
    /// Any type whose primitive kind is this one, aliases included.
    Kind(ScalarKind),
}

impl RuleKey {
    pub fn kind(&self) -> ScalarKind {
        match self {
            RuleKey::Type(kind) | RuleKey::Kind(kind) => *kind,
        }
    }
}

/// Specialised decode/encode procedures for one native/wire pair.
#[derive(Clone, Copy)]
pub struct ConversionRule {
    pub decode: DecodeFn,
    pub encode: EncodeFn,
    /// Copied from the owning rule set.
    pub complete: bool,
}

impl std::fmt::Debug for ConversionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionRule")
            .field("complete", &self.complete)
            .finish_non_exhaustive()
    }
}

/// All rules registered under one [`RuleKey`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSet {
    /// Wire type used when the native type is coded without an explicit one.
    pub preferred: WireType,
    /// When set, a wire type outside the set is an error instead of a
    /// fallback to the generic codec.
    pub complete: bool,
    wire_types: BTreeSet<WireType>,
}

impl RuleSet {
    pub fn contains(&self, wire_type: WireType) -> bool {
        self.wire_types.contains(&wire_type)
    }

    /// Wire types with a rule, in lexicographic order of their names.
    pub fn wire_types(&self) -> impl Iterator<Item = WireType> + '_ {
        self.wire_types.iter().copied()
    }

    /// Order in which the dispatcher tests wire types: `first` (or the
    /// preferred type) ahead of the others, which keep lexicographic order.
    pub fn branches(&self, first: Option<WireType>) -> Vec<WireType> {
        let head = first
            .filter(|t| self.contains(*t))
            .unwrap_or(self.preferred);
        std::iter::once(head)
            .chain(self.wire_types().filter(|t| *t != head))
            .collect()
    }
}

/// Outcome of looking up a wire type in a rule set.
#[derive(Debug, Clone, Copy)]
pub enum Dispatch<'a> {
    Specialized(&'a ConversionRule),
    /// No rule, and the set is incomplete.
    Fallback,
    /// No rule, and the set is complete.
    Unsupported,
}

#[derive(Debug, Default)]
pub struct RuleTable {
    sets: HashMap<RuleKey, RuleSet>,
    rules: HashMap<(RuleKey, WireType), ConversionRule>,
}

static GLOBAL: LazyLock<RuleTable> = LazyLock::new(RuleTable::builtin);

const TEXT: [WireType; 4] = [
    WireType::Varchar,
    WireType::Ascii,
    WireType::Blob,
    WireType::Text,
];
const INTS: [WireType; 4] = [
    WireType::TinyInt,
    WireType::SmallInt,
    WireType::Int,
    WireType::BigInt,
];
const UUIDS: [WireType; 2] = [WireType::Uuid, WireType::TimeUuid];

const INT_KINDS: [ScalarKind; 10] = [
    ScalarKind::I8,
    ScalarKind::I16,
    ScalarKind::I32,
    ScalarKind::I64,
    ScalarKind::Isize,
    ScalarKind::U8,
    ScalarKind::U16,
    ScalarKind::U32,
    ScalarKind::U64,
    ScalarKind::Usize,
];

impl RuleTable {
    /// The process-wide table of built-in rules.
    pub fn global() -> &'static RuleTable {
        &GLOBAL
    }

    pub fn rule_set(&self, key: RuleKey) -> Option<&RuleSet> {
        self.sets.get(&key)
    }

    pub fn rule(&self, key: RuleKey, wire_type: WireType) -> Option<&ConversionRule> {
        self.rules.get(&(key, wire_type))
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rule set governing a scalar native type.
    ///
    /// Exact-type sets win over kind sets; aliases only see kind sets.
    /// `None` means the type has no specialised rules at all.
    pub fn resolve(&self, native: &NativeType) -> Option<RuleKey> {
        match native {
            NativeType::Scalar(kind) => [RuleKey::Type(*kind), RuleKey::Kind(*kind)]
                .into_iter()
                .find(|key| self.sets.contains_key(key)),
            NativeType::Alias(_) => {
                let key = RuleKey::Kind(underlying_kind(native)?);
                self.sets.contains_key(&key).then_some(key)
            }
            _ => None,
        }
    }

    pub fn dispatch(&self, key: RuleKey, wire_type: WireType) -> Dispatch<'_> {
        if let Some(rule) = self.rule(key, wire_type) {
            return Dispatch::Specialized(rule);
        }
        match self.sets.get(&key) {
            Some(set) if set.complete => Dispatch::Unsupported,
            _ => Dispatch::Fallback,
        }
    }

    fn builtin() -> Self {
        let mut table = Self::default();

        // Exact string: text, integers and varint as decimal, uuid and inet as text.
        let mut set = table.set(RuleKey::Type(ScalarKind::String), WireType::Varchar, true);
        set.add_all(&TEXT, scalar::text_to_string, scalar::string_to_text);
        set.add_all(&INTS, scalar::int_to_string, scalar::string_to_int);
        set.add(WireType::Varint, scalar::varint_to_string, scalar::string_to_varint);
        set.add_all(&UUIDS, scalar::uuid_to_string, scalar::string_to_uuid);
        set.add(WireType::Inet, scalar::inet_to_string, scalar::string_to_inet);

        let mut set = table.set(RuleKey::Kind(ScalarKind::String), WireType::Varchar, true);
        set.add_all(&TEXT, scalar::text_to_string, scalar::string_to_text);

        let mut set = table.set(RuleKey::Type(ScalarKind::Bytes), WireType::Blob, false);
        set.add_all(&TEXT, scalar::text_to_bytes, scalar::bytes_to_text);
        set.add_all(&UUIDS, scalar::uuid_to_bytes, scalar::bytes_to_uuid);

        let mut set = table.set(RuleKey::Type(ScalarKind::BigInt), WireType::Varint, true);
        set.add_all(&INTS, scalar::varint_to_bigint, scalar::bigint_to_int);
        set.add(WireType::Counter, scalar::varint_to_bigint, scalar::bigint_to_int);
        set.add(WireType::Varint, scalar::varint_to_bigint, scalar::bigint_to_varint);

        let mut set = table.set(RuleKey::Type(ScalarKind::Decimal), WireType::Decimal, true);
        set.add(WireType::Decimal, scalar::decimal_to_decimal, scalar::decimal_from_decimal);

        let mut set = table.set(RuleKey::Kind(ScalarKind::Bool), WireType::Boolean, true);
        set.add(WireType::Boolean, scalar::boolean_to_bool, scalar::bool_to_boolean);

        let mut set = table.set(RuleKey::Kind(ScalarKind::F32), WireType::Float, true);
        set.add(WireType::Float, scalar::float_to_f32, scalar::f32_to_float);

        let mut set = table.set(RuleKey::Kind(ScalarKind::F64), WireType::Double, true);
        set.add(WireType::Double, scalar::double_to_f64, scalar::f64_to_double);

        for kind in INT_KINDS {
            let preferred = preferred_int_wire_type(kind);
            let mut set = table.set(RuleKey::Kind(kind), preferred, false);
            set.add_all(&INTS, scalar::int_to_int, scalar::int_from_int);
        }

        table
    }

    fn set(&mut self, key: RuleKey, preferred: WireType, complete: bool) -> SetBuilder<'_> {
        self.sets.insert(
            key,
            RuleSet {
                preferred,
                complete,
                wire_types: BTreeSet::new(),
            },
        );
        SetBuilder {
            table: self,
            key,
            complete,
        }
    }
}

struct SetBuilder<'a> {
    table: &'a mut RuleTable,
    key: RuleKey,
    complete: bool,
}

impl SetBuilder<'_> {
    fn add(&mut self, wire_type: WireType, decode: DecodeFn, encode: EncodeFn) {
        let rule = ConversionRule {
            decode,
            encode,
            complete: self.complete,
        };
        self.table.rules.insert((self.key, wire_type), rule);
        if let Some(set) = self.table.sets.get_mut(&self.key) {
            set.wire_types.insert(wire_type);
        }
    }

    fn add_all(&mut self, wire_types: &[WireType], decode: DecodeFn, encode: EncodeFn) {
        for wire_type in wire_types {
            self.add(*wire_type, decode, encode);
        }
    }
}

/// Integer wire type of the same width as `kind`.
fn preferred_int_wire_type(kind: ScalarKind) -> WireType {
    match kind.int_layout().map(|l| l.bits) {
        Some(8) => WireType::TinyInt,
        Some(16) => WireType::SmallInt,
        Some(32) => WireType::Int,
        _ => WireType::BigInt,
    }
}

/// Primitive scalar kind behind a chain of aliases.
pub fn underlying_kind(native: &NativeType) -> Option<ScalarKind> {
    match native {
        NativeType::Scalar(kind) => Some(*kind),
        NativeType::Alias(alias) => underlying_kind(&alias.target),
        _ => None,
    }
}
