use cqlcodec_core::{FieldDescriptor, NativeType, ScalarKind, StructType, Value};

#[test]
fn value_string_creates_arc_str_value() {
    let value = Value::string("hello");
    match value {
        Value::String(s) => assert_eq!(&*s, "hello"),
        other => panic!("unexpected value variant: {:?}", other),
    }
}

#[test]
fn value_accessors_report_mismatched_variant() {
    let err = Value::I32(1).try_str().expect_err("I32 is not a string");
    assert_eq!(err.expected, "String");
    assert_eq!(err.actual, "I32");
    assert_eq!(Value::Null.try_str(), Ok(None));
}

#[test]
fn as_integer_widens_every_integer_variant() {
    assert_eq!(Value::I8(-128).as_integer(), Some(-128));
    assert_eq!(Value::U64(u64::MAX).as_integer(), Some(u64::MAX as i128));
    assert_eq!(Value::Usize(7).as_integer(), Some(7));
    assert_eq!(Value::F32(1.0).as_integer(), None);
}

#[test]
fn int_layout_bounds_and_wrapping() {
    let i8_layout = ScalarKind::I8.int_layout().expect("i8 is an integer");
    assert_eq!((i8_layout.min(), i8_layout.max()), (-128, 127));
    assert!(!i8_layout.contains(128));
    assert_eq!(i8_layout.wrap(128), -128);
    assert_eq!(i8_layout.wrap(-129), 127);

    let u16_layout = ScalarKind::U16.int_layout().expect("u16 is an integer");
    assert_eq!((u16_layout.min(), u16_layout.max()), (0, 65535));
    assert_eq!(u16_layout.wrap(-1), 65535);
    assert_eq!(ScalarKind::String.int_layout(), None);
}

#[test]
fn zero_values_follow_native_type() {
    let inner = StructType::builder("Inner")
        .field(FieldDescriptor::new("n", ScalarKind::I16))
        .build()
        .expect("valid struct");
    let outer = NativeType::list(NativeType::Struct(inner.into()));
    assert_eq!(outer.zero_value(), Value::List(vec![]));
    assert_eq!(
        NativeType::optional(ScalarKind::I32.into()).zero_value(),
        Value::Null
    );
    assert_eq!(
        NativeType::alias("Name", ScalarKind::String.into()).zero_value(),
        Value::string("")
    );
}

#[test]
fn native_type_displays_rust_like_names() {
    let native = NativeType::map(
        ScalarKind::String.into(),
        NativeType::optional(NativeType::list(ScalarKind::U8.into())),
    );
    assert_eq!(native.to_string(), "Map<string, Option<Vec<u8>>>");
}
