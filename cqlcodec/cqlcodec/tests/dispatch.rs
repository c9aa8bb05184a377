mod support;

use cqlcodec::{
    Codec, DispatchMode, ErrorKind, FieldDescriptor, NativeType, RuleKey, RuleTable, ScalarKind,
    StructType, TypeInfo, UdtTypeInfo, Value, WireType,
};
use support::*;

// ── rule table ───────────────────────────────────────────────────────────────

#[test]
fn exact_string_rule_set_orders_branches() {
    let table = RuleTable::global();
    let set = table.rule_set(RuleKey::Type(ScalarKind::String)).unwrap();
    assert!(set.complete);
    assert_eq!(set.preferred, WireType::Varchar);

    use WireType::*;
    assert_eq!(
        set.branches(None),
        vec![
            Varchar, Ascii, BigInt, Blob, Inet, Int, SmallInt, Text, TimeUuid, TinyInt, Uuid,
            Varint
        ]
    );
    // An override moves to the front; the rest keep lexicographic order.
    assert_eq!(
        set.branches(Some(Int)),
        vec![
            Int, Ascii, BigInt, Blob, Inet, SmallInt, Text, TimeUuid, TinyInt, Uuid, Varchar,
            Varint
        ]
    );
    // An override outside the set leaves the preferred type in front.
    assert_eq!(set.branches(Some(Boolean))[0], Varchar);
}

#[test]
fn rule_lookup_prefers_exact_type_over_kind() {
    let table = RuleTable::global();
    assert_eq!(
        table.resolve(&NativeType::from(ScalarKind::String)),
        Some(RuleKey::Type(ScalarKind::String))
    );
    assert_eq!(
        table.resolve(&NativeType::from(ScalarKind::I16)),
        Some(RuleKey::Kind(ScalarKind::I16))
    );
    let alias = NativeType::alias("Label", NativeType::from(ScalarKind::String));
    assert_eq!(table.resolve(&alias), Some(RuleKey::Kind(ScalarKind::String)));

    for kind in [ScalarKind::Bytes, ScalarKind::BigInt, ScalarKind::Decimal] {
        let alias = NativeType::alias("Named", NativeType::from(kind));
        assert_eq!(table.resolve(&alias), None, "{kind}");
    }

    let kind_set = table.rule_set(RuleKey::Kind(ScalarKind::String)).unwrap();
    assert_eq!(kind_set.wire_types().count(), 4);
    assert!(!kind_set.contains(WireType::Uuid));
}

#[test]
fn rule_set_preferences() {
    let table = RuleTable::global();
    let preferred = |key| table.rule_set(key).unwrap().preferred;
    assert_eq!(preferred(RuleKey::Type(ScalarKind::Bytes)), WireType::Blob);
    assert_eq!(preferred(RuleKey::Type(ScalarKind::BigInt)), WireType::Varint);
    assert_eq!(preferred(RuleKey::Type(ScalarKind::Decimal)), WireType::Decimal);
    assert_eq!(preferred(RuleKey::Kind(ScalarKind::Bool)), WireType::Boolean);
    assert_eq!(preferred(RuleKey::Kind(ScalarKind::F32)), WireType::Float);
    assert_eq!(preferred(RuleKey::Kind(ScalarKind::F64)), WireType::Double);
    assert_eq!(preferred(RuleKey::Kind(ScalarKind::U8)), WireType::TinyInt);

    for key in [
        RuleKey::Type(ScalarKind::Bytes),
        RuleKey::Kind(ScalarKind::I32),
        RuleKey::Kind(ScalarKind::U64),
    ] {
        assert!(!table.rule_set(key).unwrap().complete, "{key:?}");
    }
    let rule = table
        .rule(RuleKey::Type(ScalarKind::Decimal), WireType::Decimal)
        .unwrap();
    assert!(rule.complete);
}

// ── fallback chain ───────────────────────────────────────────────────────────

#[test]
fn complete_rule_set_rejects_unmatched_wire_type() {
    let (codec, generic) = recording_codec();
    let err = codec
        .decode(&NativeType::from(ScalarKind::String), &native(WireType::Boolean), Some(&[1]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedConversion);
    assert_eq!(err.to_string(), "cannot convert boolean to or from string");

    let err = codec
        .encode(&NativeType::from(ScalarKind::Bool), &native(WireType::Int), &Value::Bool(true))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::UnsupportedConversion);
    assert!(generic.calls().is_empty());
}

#[test]
fn incomplete_rule_set_falls_back_to_generic_codec() {
    init_tracing();
    let (codec, generic) = recording_codec();

    let value = codec
        .decode(&NativeType::from(ScalarKind::I32), &native(WireType::Float), Some(&[0; 4]))
        .unwrap();
    assert_eq!(value, Value::string("generic"));

    let payload = codec
        .encode(&NativeType::from(ScalarKind::Bytes), &native(WireType::Inet), &Value::bytes([1u8; 4]))
        .unwrap();
    assert_eq!(payload, Some(b"generic".to_vec()));

    assert_eq!(
        generic.calls(),
        vec!["decode i32 from float", "encode bytes as inet"]
    );
}

#[test]
fn types_without_rules_use_generic_codec() {
    let (codec, generic) = recording_codec();
    let hash = NativeType::alias("Hash", NativeType::from(ScalarKind::Bytes));

    codec.decode(&hash, &native(WireType::Blob), Some(b"ab")).unwrap();
    codec
        .decode(&NativeType::list(ScalarKind::I32.into()), &native(WireType::Blob), Some(&[]))
        .unwrap();
    assert_eq!(
        generic.calls(),
        vec!["decode Hash from blob", "decode Vec<i32> from blob"]
    );
}

#[test]
fn missing_generic_codec_is_reported() {
    let err = Codec::new()
        .decode(&NativeType::from(ScalarKind::I64), &native(WireType::Varint), Some(&[1]))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FallbackUnavailable);
    assert_eq!(
        err.to_string(),
        "no generic codec available to convert varint to or from i64"
    );
}

#[test]
fn conservative_mode_bypasses_scalar_rules() {
    let (_, generic) = recording_codec();
    let codec = Codec::builder()
        .dispatch_mode(DispatchMode::Conservative)
        .fallback(generic.clone())
        .build();

    let value = codec
        .decode(&NativeType::from(ScalarKind::I32), &native(WireType::Int), Some(&[0, 0, 0, 1]))
        .unwrap();
    assert_eq!(value, Value::string("generic"));
    assert_eq!(generic.calls(), vec!["decode i32 from int"]);
}

// ── collections ──────────────────────────────────────────────────────────────

#[test]
fn list_round_trip_as_list_or_set() {
    let codec = Codec::new();
    let native_type = NativeType::list(ScalarKind::I32.into());
    let value = Value::List(vec![Value::I32(1), Value::I32(-1)]);
    let expected = collection_payload(&[
        present(&1i32.to_be_bytes()),
        present(&(-1i32).to_be_bytes()),
    ]);

    for info in [
        TypeInfo::list(native(WireType::Int)),
        TypeInfo::set(native(WireType::Int)),
    ] {
        let payload = codec.encode(&native_type, &info, &value).unwrap();
        assert_eq!(payload.as_deref(), Some(expected.as_slice()), "{info}");
        assert_eq!(codec.decode(&native_type, &info, Some(&expected)).unwrap(), value);
    }
}

#[test]
fn list_items_may_be_null() {
    let codec = Codec::new();
    let native_type = NativeType::list(NativeType::optional(ScalarKind::String.into()));
    let info = TypeInfo::list(native(WireType::Text));
    let payload = collection_payload(&[present(b"a"), None]);

    let value = codec.decode(&native_type, &info, Some(&payload)).unwrap();
    assert_eq!(value, Value::List(vec![Value::string("a"), Value::Null]));
    assert_eq!(codec.encode(&native_type, &info, &value).unwrap(), Some(payload));
}

#[test]
fn map_round_trip() {
    let codec = Codec::new();
    let native_type = NativeType::map(ScalarKind::String.into(), ScalarKind::I64.into());
    let info = TypeInfo::map(native(WireType::Text), native(WireType::Int));
    let value = Value::Map(vec![
        (Value::string("a"), Value::I64(1)),
        (Value::string("b"), Value::I64(2)),
    ]);

    let payload = codec.encode(&native_type, &info, &value).unwrap().unwrap();
    let mut expected = 2i32.to_be_bytes().to_vec();
    expected.extend(framed(Some(b"a")));
    expected.extend(framed(Some(&1i32.to_be_bytes())));
    expected.extend(framed(Some(b"b")));
    expected.extend(framed(Some(&2i32.to_be_bytes())));
    assert_eq!(payload, expected);

    assert_eq!(codec.decode(&native_type, &info, Some(&payload)).unwrap(), value);
}

#[test]
fn null_collections_decode_empty() {
    let codec = Codec::new();
    let list = NativeType::list(ScalarKind::I32.into());
    assert_eq!(
        codec.decode(&list, &TypeInfo::list(native(WireType::Int)), None).unwrap(),
        Value::List(vec![])
    );
    let map = NativeType::map(ScalarKind::String.into(), ScalarKind::I32.into());
    assert_eq!(
        codec
            .decode(&map, &TypeInfo::map(native(WireType::Text), native(WireType::Int)), None)
            .unwrap(),
        Value::Map(vec![])
    );
}

#[test]
fn collection_count_beyond_payload_is_length_mismatch() {
    let mut payload = collection_payload(&[present(&1i32.to_be_bytes())]);
    payload[3] = 2;
    let err = Codec::new()
        .decode(
            &NativeType::list(ScalarKind::I32.into()),
            &TypeInfo::list(native(WireType::Int)),
            Some(&payload),
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::LengthMismatch);
}

#[test]
fn list_of_udts() {
    let codec = Codec::new();
    let native_type = NativeType::list(address_type().into());
    let info = TypeInfo::list(address_info());
    let value = Value::List(vec![
        Value::Struct(vec![Value::string("A"), Value::I32(1)]),
        Value::Struct(vec![Value::string("B"), Value::I32(2)]),
    ]);

    let payload = codec.encode(&native_type, &info, &value).unwrap();
    assert_eq!(codec.decode(&native_type, &info, payload.as_deref()).unwrap(), value);
}

// ── inference and plans ──────────────────────────────────────────────────────

#[test]
fn infers_preferred_type_info() {
    let codec = Codec::new();
    let infer = |native: NativeType| codec.infer_type_info(&native);

    assert_eq!(infer(ScalarKind::Bytes.into()), Some(native(WireType::Blob)));
    assert_eq!(infer(ScalarKind::BigInt.into()), Some(native(WireType::Varint)));
    assert_eq!(
        infer(NativeType::optional(ScalarKind::Bool.into())),
        Some(native(WireType::Boolean))
    );
    assert_eq!(
        infer(NativeType::map(ScalarKind::String.into(), ScalarKind::F64.into())),
        Some(TypeInfo::map(native(WireType::Varchar), native(WireType::Double)))
    );
    assert_eq!(
        infer(NativeType::alias("Hash", ScalarKind::Bytes.into())),
        None
    );
}

#[test]
fn dispatch_plan_lists_branches_per_field() {
    let st = StructType::builder("Point")
        .field(FieldDescriptor::new("id", ScalarKind::String).prefer(WireType::Uuid))
        .field(FieldDescriptor::new(
            "count",
            NativeType::optional(ScalarKind::I16.into()),
        ))
        .field(FieldDescriptor::new(
            "tags",
            NativeType::list(ScalarKind::Bool.into()),
        ))
        .field(FieldDescriptor::new("note", ScalarKind::String).omitted())
        .build()
        .unwrap();

    let plan = Codec::new().dispatch_plan(&st).unwrap();
    assert_eq!(
        plan,
        "id: { native: string, branches: [uuid, ascii, bigint, blob, inet, int, smallint, text, \
         timeuuid, tinyint, varchar, varint], else: error }\n\
         count: { native: i16, branches: [smallint, bigint, int, tinyint], else: fallback }\n\
         tags:\n    native: Vec<bool>\n    item: { native: bool, branches: [boolean], else: error }\n"
    );

    let conservative = Codec::builder()
        .dispatch_mode(DispatchMode::Conservative)
        .build()
        .dispatch_plan(&st)
        .unwrap();
    assert!(conservative.starts_with("id: { native: string, branches: [], else: fallback }\n"));
}

#[test]
fn dispatch_plan_nests_struct_fields() {
    let st = StructType::builder("Person")
        .field(FieldDescriptor::new("home", address_type()))
        .build()
        .unwrap();

    let plan = Codec::new().dispatch_plan(&st).unwrap();
    let lines: Vec<&str> = plan.lines().collect();
    assert_eq!(lines[0], "home:");
    assert_eq!(lines[1], "    native: Address");
    assert_eq!(lines[2], "    fields:");
    assert!(lines[3].starts_with("        street: { native: string, branches: [varchar,"));
    assert_eq!(
        lines[4],
        "        zip: { native: i32, branches: [int, bigint, smallint, tinyint], else: fallback }"
    );
}

#[test]
fn plan_and_inference_agree_on_field_overrides() {
    let st = StructType::builder("Reading")
        .field(FieldDescriptor::new("a", ScalarKind::I32).prefer(WireType::Uuid))
        .field(FieldDescriptor::new("b", ScalarKind::I32).prefer(WireType::SmallInt))
        .field(
            FieldDescriptor::new("c", NativeType::alias("Hash", ScalarKind::Bytes.into()))
                .prefer(WireType::Blob),
        )
        .build()
        .unwrap();
    let codec = Codec::new();

    let plan = codec.dispatch_plan(&st).unwrap();
    assert_eq!(
        plan,
        "a: { native: i32, branches: [int, bigint, smallint, tinyint], else: fallback }\n\
         b: { native: i32, branches: [smallint, bigint, int, tinyint], else: fallback }\n\
         c: { native: Hash, branches: [], else: fallback }\n"
    );

    // An override without a rule is dropped in favour of the preferred type.
    let info = codec.infer_type_info(&NativeType::from(st)).unwrap();
    let expected = UdtTypeInfo::new("", "Reading")
        .with_element("a", WireType::Int)
        .with_element("b", WireType::SmallInt)
        .with_element("c", WireType::Blob);
    assert_eq!(info, TypeInfo::Udt(expected));
}
