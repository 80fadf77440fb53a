//! The closed error taxonomy, exercised through the public API.

use std::io::{self, Read};

use lsd_tree::{ParseErrorKind, parse, parse_str};

fn kind(source: &str) -> ParseErrorKind {
    parse_str(source).unwrap_err().kind
}

#[test]
fn unexpected_char_at_file_end() {
    assert!(matches!(
        kind("[] test"),
        ParseErrorKind::UnexpectedCharAtFileEnd
    ));
    assert!(matches!(
        kind("{} test"),
        ParseErrorKind::UnexpectedCharAtFileEnd
    ));
}

#[test]
fn unexpected_string_end() {
    assert!(matches!(
        kind("test \""),
        ParseErrorKind::UnexpectedStringEnd
    ));
    assert!(matches!(
        kind("test \"\\u"),
        ParseErrorKind::UnexpectedStringEnd
    ));
    assert!(matches!(
        kind("test \"\\udfff"),
        ParseErrorKind::UnexpectedStringEnd
    ));
    assert!(matches!(
        kind("test \"\\udfff\""),
        ParseErrorKind::UnexpectedStringEnd
    ));
    assert!(matches!(
        kind("test \"\\x"),
        ParseErrorKind::UnexpectedStringEnd
    ));
    assert!(matches!(
        kind("test \"\\xc3"),
        ParseErrorKind::UnexpectedStringEnd
    ));
}

#[test]
fn unexpected_char_escape_end() {
    assert!(matches!(
        kind("test \"\\"),
        ParseErrorKind::UnexpectedCharEscapeEnd
    ));
    assert!(matches!(
        kind("test \"\\j"),
        ParseErrorKind::UnexpectedCharEscapeEnd
    ));
}

#[test]
fn unexpected_char_in_byte_escape() {
    // 0xff can never start a UTF-8 sequence
    assert!(matches!(
        kind("test \"\\xffNO"),
        ParseErrorKind::UnexpectedCharInByteEscape
    ));
    // 0xf0 demands three continuations of the form 10xxxxxx
    assert!(matches!(
        kind("test \"\\xf0\\x00\\x00\\x00\\x00\""),
        ParseErrorKind::UnexpectedCharInByteEscape
    ));
    // continuations must come as further \x escapes
    assert!(matches!(
        kind("test \"\\xd0ab\""),
        ParseErrorKind::UnexpectedCharInByteEscape
    ));
}

#[test]
fn unexpected_char_in_unicode_escape() {
    assert!(matches!(
        kind("test \"\\udfffNO\""),
        ParseErrorKind::UnexpectedCharInUnicodeEscape
    ));
    assert!(matches!(
        kind("test \"\\udfff\\udfff\""),
        ParseErrorKind::UnexpectedCharInUnicodeEscape
    ));
}

#[test]
fn expected_key_or_end() {
    assert!(matches!(kind("{"), ParseErrorKind::ExpectedKeyOrEnd));
}

#[test]
fn expected_key_part_after_key_separator() {
    assert!(matches!(
        kind("{a."),
        ParseErrorKind::ExpectedKeyPartAfterKeySeparator
    ));
}

#[test]
fn expected_lsd_after_key() {
    assert!(matches!(kind("{a "), ParseErrorKind::ExpectedLsdAfterKey));
}

#[test]
fn expected_list_lsd_or_end() {
    assert!(matches!(kind("["), ParseErrorKind::ExpectedListLsdOrEnd));
}

#[test]
fn key_collision_should_be_level_but_is_not() {
    let source = "\
a 10
a.b 20
";
    assert!(matches!(
        kind(source),
        ParseErrorKind::KeyCollisionShouldBeLevelButIsNot
    ));
}

#[test]
fn key_collision_key_already_exists() {
    let source = "\
a 10
a 20
";
    match kind(source) {
        ParseErrorKind::KeyCollisionKeyAlreadyExists(key) => assert_eq!(key, "a"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn read_failure() {
    struct BrokenReader;

    impl Read for BrokenReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("wire unplugged"))
        }
    }

    let error = parse(BrokenReader).unwrap_err();
    assert!(matches!(error.kind, ParseErrorKind::ReadFailure(_)));
}
