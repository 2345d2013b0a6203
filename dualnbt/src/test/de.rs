use super::builder::Builder;
use crate::de::Reader;
use crate::error::{ErrorKind, Result};
use crate::{
    from_bytes, from_bytes_multiple, from_bytes_prefix, from_reader, read_named_tag, to_bytes,
    Endian, Kind, List, Mode, Opts, Tag, DEFAULT_MAX_DEPTH,
};

#[test]
fn empty_payload() {
    let payload = Builder::new().build();
    let err = from_bytes(&payload, Mode::Disk).unwrap_err();
    assert!(err.is_eof());
}

#[test]
fn simple_scalars() -> Result<()> {
    let payload = Builder::new()
        .start_compound("object")
        .byte("byte", 123)
        .short("short", -1234)
        .int("int", 50345)
        .long("long", i32::MAX as i64 + 1)
        .float("float", 1.23)
        .double("double", 1.23456)
        .string("str", "something")
        .end_compound()
        .build();

    let doc = from_bytes(&payload, Mode::Disk)?;

    assert_eq!(doc.name, "object");
    assert_eq!(doc.root.get_byte("byte")?, Some(123));
    assert_eq!(doc.root.get_short("short")?, Some(-1234));
    assert_eq!(doc.root.get_int("int")?, Some(50345));
    assert_eq!(doc.root.get_long("long")?, Some(i32::MAX as i64 + 1));
    assert_eq!(doc.root.get_float("float")?, Some(1.23));
    assert_eq!(doc.root.get_double("double")?, Some(1.23456));
    assert_eq!(doc.root.get_str("str")?, Some("something"));
    Ok(())
}

#[test]
fn entries_keep_stream_order() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .byte("z", 1)
        .byte("a", 2)
        .byte("m", 3)
        .end_compound()
        .build();

    let doc = from_bytes(&payload, Mode::Disk)?;
    let keys: Vec<_> = doc.root.keys().collect();
    assert_eq!(keys, ["z", "a", "m"]);
    Ok(())
}

#[test]
fn arrays() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .byte_array("bytes", &[1, -2, 3])
        .int_array("ints", &[1, 2, i32::MIN])
        .long_array("longs", &[i64::MAX, 0])
        .byte_array("empty", &[])
        .end_compound()
        .build();

    let doc = from_bytes(&payload, Mode::Disk)?;
    assert_eq!(&doc.root.get_byte_array("bytes")?.unwrap()[..], &[1, -2, 3]);
    assert_eq!(&doc.root.get_int_array("ints")?.unwrap()[..], &[1, 2, i32::MIN]);
    assert_eq!(&doc.root.get_long_array("longs")?.unwrap()[..], &[i64::MAX, 0]);
    assert!(doc.root.get_byte_array("empty")?.unwrap().is_empty());
    Ok(())
}

#[test]
fn nested_compound_and_list_of_compounds() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .start_compound("nested")
        .int("x", 1)
        .end_compound()
        .start_list("Items", Kind::Compound, 2)
        .start_anon_compound()
        .byte("Slot", 0)
        .string("id", "minecraft:coal")
        .end_compound()
        .start_anon_compound()
        .byte("Slot", 2)
        .end_compound()
        .end_compound()
        .build();

    let doc = from_bytes(&payload, Mode::Disk)?;
    let nested = doc.root.get_compound("nested")?.unwrap();
    assert_eq!(nested.get_int("x")?, Some(1));

    let items = doc.root.get_list("Items")?.unwrap();
    assert_eq!(items.kind(), Kind::Compound);
    assert_eq!(items.len(), 2);

    let first = items.get(0)?.as_compound().unwrap();
    assert_eq!(first.get_str("id")?, Some("minecraft:coal"));
    let second = items.get(1)?.as_compound().unwrap();
    assert_eq!(second.get_byte("Slot")?, Some(2));
    Ok(())
}

#[test]
fn list_of_lists() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .start_list("outer", Kind::List, 2)
        .start_anon_list(Kind::Short, 1)
        .short_payload(7)
        .start_anon_list(Kind::End, 0)
        .end_compound()
        .build();

    let doc = from_bytes(&payload, Mode::Disk)?;
    let outer = doc.root.get_list("outer")?.unwrap();
    assert_eq!(outer.get(0)?.as_list().unwrap().get(0)?, &Tag::Short(7));
    assert_eq!(outer.get(1)?.as_list().unwrap(), &List::new());
    Ok(())
}

#[test]
fn empty_list_keeps_declared_kind() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .start_list("canonical", Kind::End, 0)
        .start_list("typed", Kind::Byte, 0)
        .end_compound()
        .build();

    let doc = from_bytes(&payload, Mode::Disk)?;
    assert_eq!(doc.root.get_list("canonical")?.unwrap().kind(), Kind::End);
    assert_eq!(doc.root.get_list("typed")?.unwrap().kind(), Kind::Byte);
    Ok(())
}

#[test]
fn truncated_short_payload_is_format_error() {
    let err = Tag::from_payload_bytes(Kind::Short, &[0x01], Mode::Disk).unwrap_err();
    assert!(err.is_format());
    assert_eq!(err.kind(), &ErrorKind::UnexpectedEof);
}

#[test]
fn unknown_discriminant_consumes_only_itself() {
    let input = [13u8, 0, 0, 0];
    let mut reader = Reader::new(&input);

    let err = reader.read_kind().unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnknownKind(13));
    assert_eq!(reader.position(), 1);

    let mut cursor = &input[..];
    let err = read_named_tag(&mut cursor, Mode::Disk).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnknownKind(13));
    assert_eq!(cursor.len(), input.len());

    let err = from_bytes(&input, Mode::Disk).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnknownKind(13));
}

#[test]
fn unknown_discriminant_inside_compound() {
    let payload = Builder::new()
        .start_compound("")
        .raw_bytes(&[200])
        .name("x")
        .end_compound()
        .build();

    let err = from_bytes(&payload, Mode::Disk).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::UnknownKind(200));
}

#[test]
fn compound_without_end_is_format_error() {
    let payload = Builder::new().start_compound("").byte("a", 1).build();
    let err = from_bytes(&payload, Mode::Disk).unwrap_err();
    assert!(err.is_format());
}

#[test]
fn partial_input_in_string() {
    let input = Builder::new().start_compound("some long name").build();
    let err = from_bytes(&input[0..5], Mode::Disk).unwrap_err();
    assert!(err.is_eof());
}

#[test]
fn list_of_end_with_elements() {
    let input = Builder::new()
        .start_compound("")
        .start_list("", Kind::End, 1)
        .tag(Kind::End)
        .end_compound()
        .build();

    let err = from_bytes(&input, Mode::Disk).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Malformed);
}

#[test]
fn negative_lengths_are_malformed() {
    let input = Builder::new()
        .start_compound("")
        .tag(Kind::IntArray)
        .name("a")
        .int_payload(-1)
        .end_compound()
        .build();
    let err = from_bytes(&input, Mode::Disk).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Malformed);

    let input = Builder::new()
        .start_compound("")
        .start_list("l", Kind::Byte, -5)
        .end_compound()
        .build();
    let err = from_bytes(&input, Mode::Disk).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Malformed);
}

#[test]
fn huge_length_fails_before_allocating() {
    let input = Builder::new()
        .start_compound("")
        .tag(Kind::LongArray)
        .name("a")
        .int_payload(i32::MAX)
        .long_payload(1)
        .end_compound()
        .build();

    let err = from_bytes(&input, Mode::Disk).unwrap_err();
    assert!(err.is_eof());
}

#[test]
fn max_seq_len_limits_lists_and_arrays() {
    let payload = Builder::new()
        .start_compound("")
        .start_list("l", Kind::Byte, 2)
        .byte_payload(1)
        .byte_payload(2)
        .end_compound()
        .build();

    assert!(from_bytes(&payload, Opts::disk().max_seq_len(1)).is_err());
    assert!(from_bytes(&payload, Opts::disk().max_seq_len(2)).is_ok());
}

#[test]
fn max_depth_limits_nesting() {
    let mut builder = Builder::new().start_compound("");
    for _ in 0..10 {
        builder = builder.start_compound("c");
    }
    for _ in 0..11 {
        builder = builder.end_compound();
    }
    let payload = builder.build();

    let err = from_bytes(&payload, Opts::disk().max_depth(9)).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Malformed);
    assert!(from_bytes(&payload, Opts::disk().max_depth(10)).is_ok());
}

/// A root holding `depth` lists nested inside each other, the innermost empty.
fn nested_lists(depth: usize) -> Vec<u8> {
    let mut builder = Builder::new()
        .start_compound("")
        .start_list("l", Kind::List, 1);
    for _ in 0..depth - 2 {
        builder = builder.start_anon_list(Kind::List, 1);
    }
    builder.start_anon_list(Kind::End, 0).end_compound().build()
}

#[test]
fn default_depth_limit_is_reachable() -> Result<()> {
    let payload = nested_lists(DEFAULT_MAX_DEPTH);
    let doc = from_bytes(&payload, Mode::Disk)?;
    assert_eq!(to_bytes(&doc, Mode::Disk)?, payload);

    let err = from_bytes(&nested_lists(DEFAULT_MAX_DEPTH + 1), Mode::Disk).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Malformed);
    Ok(())
}

#[test]
fn root_must_be_compound() {
    let payload = Builder::new().int("x", 1).build();
    let err = from_bytes(&payload, Mode::Disk).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Malformed);
}

#[test]
fn nonunicode_string() {
    let payload = Builder::new()
        .start_compound("")
        .tag(Kind::String)
        .name("s")
        .raw_str_len(2)
        .raw_bytes(&[0xff, 0xfe])
        .end_compound()
        .build();

    let err = from_bytes(&payload, Mode::Disk).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Malformed);
}

#[test]
fn unicode_string_and_name() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .string("名前", "Ünïcödé 🎉")
        .end_compound()
        .build();

    let doc = from_bytes(&payload, Mode::Disk)?;
    assert_eq!(doc.root.get_str("名前")?, Some("Ünïcödé 🎉"));
    Ok(())
}

#[test]
fn duplicate_keys_are_malformed() {
    let payload = Builder::new()
        .start_compound("")
        .byte("x", 1)
        .byte("x", 2)
        .end_compound()
        .build();

    let err = from_bytes(&payload, Mode::Disk).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Malformed);
}

#[test]
fn trailing_bytes() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .end_compound()
        .raw_bytes(&[1, 2, 3])
        .build();

    let err = from_bytes(&payload, Mode::Disk).unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Malformed);

    let (doc, used) = from_bytes_prefix(&payload, Mode::Disk)?;
    assert!(doc.root.is_empty());
    assert_eq!(used, 4);
    Ok(())
}

#[test]
fn multiple_documents() -> Result<()> {
    let payload = Builder::new()
        .start_compound("first")
        .byte("a", 1)
        .end_compound()
        .start_compound("second")
        .end_compound()
        .build();

    let docs = from_bytes_multiple(&payload, Mode::Disk)?;
    assert_eq!(docs.len(), 2);
    assert_eq!(docs[0].name, "first");
    assert_eq!(docs[1].name, "second");
    Ok(())
}

#[test]
fn from_reader_reads_everything() -> Result<()> {
    let payload = Builder::new()
        .start_compound("")
        .int("x", 9)
        .end_compound()
        .build();

    let doc = from_reader(payload.as_slice(), Mode::Disk)?;
    assert_eq!(doc.root.get_int("x")?, Some(9));
    Ok(())
}

#[test]
fn named_tag_of_any_kind() -> Result<()> {
    let payload = Builder::new()
        .string("greeting", "hi")
        .int("after", 1)
        .build();

    let mut cursor = payload.as_slice();
    let (name, tag) = read_named_tag(&mut cursor, Mode::Disk)?;
    assert_eq!(name, "greeting");
    assert_eq!(tag, Tag::String("hi".to_owned()));

    let (name, tag) = read_named_tag(&mut cursor, Mode::Disk)?;
    assert_eq!(name, "after");
    assert_eq!(tag, Tag::Int(1));
    assert!(cursor.is_empty());
    Ok(())
}

#[test]
fn little_endian_fixed_fields() -> Result<()> {
    // TAG_Compound("") { TAG_Short("s"): 0x0102 }
    let payload = [10, 0, 0, 2, 1, 0, b's', 0x02, 0x01, 0];
    let opts = Opts::disk().endian(Endian::Little);

    let doc = from_bytes(&payload, opts)?;
    assert_eq!(doc.root.get_short("s")?, Some(0x0102));
    Ok(())
}
