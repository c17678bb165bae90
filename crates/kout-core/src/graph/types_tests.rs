//! Tests for `types` module - vertex ids and directions.

use super::types::*;
use crate::error::Error;

#[test]
fn test_parse_numeric_id() {
    assert_eq!(parse_vertex_id("42").unwrap(), VertexId::Number(42));
    assert_eq!(parse_vertex_id(" -7 ").unwrap(), VertexId::Number(-7));
}

#[test]
fn test_parse_quoted_string_id() {
    assert_eq!(
        parse_vertex_id("\"alice\"").unwrap(),
        VertexId::Text("alice".to_string())
    );
    // Quoted digits stay a string id
    assert_eq!(
        parse_vertex_id("\"42\"").unwrap(),
        VertexId::Text("42".to_string())
    );
    assert_eq!(
        parse_vertex_id(r#""a\"b""#).unwrap(),
        VertexId::Text("a\"b".to_string())
    );
}

#[test]
fn test_parse_bare_string_id() {
    assert_eq!(
        parse_vertex_id("1:marko").unwrap(),
        VertexId::Text("1:marko".to_string())
    );
}

#[test]
fn test_parse_rejects_malformed() {
    for raw in ["", "   ", "\"\"", "\"unterminated", "99999999999999999999", "a b", "x\"y"] {
        let err = parse_vertex_id(raw).unwrap_err();
        assert!(
            matches!(err, Error::InvalidArgument(_)),
            "{raw:?} should be rejected, got {err:?}"
        );
    }
}

#[test]
fn test_vertex_id_display() {
    assert_eq!(VertexId::Number(5).to_string(), "5");
    assert_eq!(VertexId::from("bob").to_string(), "bob");
}

#[test]
fn test_vertex_id_serde_untagged() {
    let ids: Vec<VertexId> = serde_json::from_str(r#"[1, "two"]"#).unwrap();
    assert_eq!(ids, vec![VertexId::Number(1), VertexId::from("two")]);
}

#[test]
fn test_direction_from_str() {
    assert_eq!("OUT".parse::<Direction>().unwrap(), Direction::Out);
    assert_eq!("in".parse::<Direction>().unwrap(), Direction::In);
    assert_eq!("Both".parse::<Direction>().unwrap(), Direction::Both);
    assert!("sideways".parse::<Direction>().is_err());
}

#[test]
fn test_direction_default_is_out() {
    assert_eq!(Direction::default(), Direction::Out);
}

#[test]
fn test_direction_includes() {
    assert!(Direction::Both.includes(Direction::In));
    assert!(Direction::Out.includes(Direction::Out));
    assert!(!Direction::Out.includes(Direction::In));
}
