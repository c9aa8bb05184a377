use cqlcodec_core::{DescriptorError, TypeInfo, UdtTypeInfo, WireType};

#[test]
fn ord_follows_lexicographic_name_order() {
    let mut by_name = WireType::ALL.to_vec();
    by_name.sort_by_key(|t| t.as_str());
    let mut by_ord = WireType::ALL.to_vec();
    by_ord.sort();
    assert_eq!(by_name, by_ord);
    assert_eq!(by_ord, WireType::ALL.to_vec());
}

#[test]
fn names_round_trip_through_from_str() {
    for t in WireType::ALL {
        assert_eq!(t.as_str().parse::<WireType>(), Ok(t));
    }
    assert_eq!(
        "varchar2".parse::<WireType>(),
        Err(DescriptorError::UnknownWireType("varchar2".to_string()))
    );
}

#[test]
fn protocol_ids_match_native_protocol() {
    assert_eq!(WireType::Custom.id(), 0x0000);
    assert_eq!(WireType::Varchar.id(), 0x000D);
    assert_eq!(WireType::TinyInt.id(), 0x0014);
    assert_eq!(WireType::Udt.id(), 0x0030);
    assert_eq!(WireType::from_id(0x0021), Some(WireType::Map));
    assert_eq!(WireType::from_id(0x00FF), None);
}

#[test]
fn int_width_covers_fixed_width_integers_only() {
    assert_eq!(WireType::TinyInt.int_width(), Some(1));
    assert_eq!(WireType::SmallInt.int_width(), Some(2));
    assert_eq!(WireType::Int.int_width(), Some(4));
    assert_eq!(WireType::BigInt.int_width(), Some(8));
    assert_eq!(WireType::Varint.int_width(), None);
}

#[test]
fn type_info_displays_cql_syntax() {
    let udt = UdtTypeInfo::new("ks", "address").with_element("street", WireType::Text);
    let info = TypeInfo::map(
        TypeInfo::Native(WireType::Text),
        TypeInfo::list(TypeInfo::Udt(udt)),
    );
    assert_eq!(info.to_string(), "map<text, list<ks.address>>");
    assert_eq!(info.wire_type(), WireType::Map);

    let tuple = TypeInfo::Tuple(vec![WireType::Int.into(), WireType::Blob.into()]);
    assert_eq!(tuple.to_string(), "tuple<int, blob>");
}
