use core::str::FromStr;

use serde_json::{from_value as from_json_value, json, to_value as to_json_value};

use super::{InvalidPath, Path};

#[test]
fn test_split_on_single_space() {
    let path: Path = "service ssh port".parse().unwrap();

    assert_eq!(path.segments(), ["service", "ssh", "port"]);
    assert_eq!(path.len(), 3);
    assert_eq!(path.last(), Some("port"));
}

#[test]
fn test_join_renders_single_space() {
    let path = Path::from_segments(["interfaces", "ethernet", "eth0"]).unwrap();

    assert_eq!(path.to_string(), "interfaces ethernet eth0");
}

#[test]
fn test_split_join_roundtrip() {
    let cases: &[&[&str]] = &[
        &["a"],
        &["a", "b"],
        &["system", "login", "user", "vyos", "authentication"],
        &["firewall", "name", "WAN-IN", "rule", "10"],
        &["x-1", "y_2", "z.3", "ünïcødé"],
    ];

    for segments in cases {
        let path = Path::from_segments(segments.iter().copied()).unwrap();
        let reparsed = Path::from_str(&path.to_string()).unwrap();

        assert_eq!(reparsed, path);
        assert_eq!(reparsed.segments(), *segments);
    }
}

#[test]
fn test_empty_string_is_root() {
    let path: Path = "".parse().unwrap();

    assert!(path.is_root());
    assert_eq!(path, Path::root());
    assert_eq!(path.last(), None);
    assert_eq!(path.to_string(), "");
}

#[test]
fn test_leading_delimiter_rejected() {
    let result = Path::from_str(" service");
    assert_eq!(result, Err(InvalidPath::EmptySegment(" service".to_owned())));
}

#[test]
fn test_trailing_delimiter_rejected() {
    let result = Path::from_str("service ");
    assert!(matches!(result, Err(InvalidPath::EmptySegment(_))));
}

#[test]
fn test_doubled_delimiter_rejected() {
    let result = Path::from_str("service  port");
    assert!(matches!(result, Err(InvalidPath::EmptySegment(_))));
}

#[test]
fn test_lone_delimiter_rejected() {
    let result = Path::from_str(" ");
    assert!(matches!(result, Err(InvalidPath::EmptySegment(_))));
}

#[test]
fn test_push_rejects_delimiter() {
    let mut path = Path::root();

    let result = path.push("two words");

    assert_eq!(
        result,
        Err(InvalidPath::DelimiterInSegment("two words".to_owned()))
    );
    assert!(path.is_root(), "failed push must not modify the path");
}

#[test]
fn test_push_rejects_empty_segment() {
    let mut path: Path = "a".parse().unwrap();

    assert!(matches!(path.push(""), Err(InvalidPath::EmptySegment(_))));
    assert_eq!(path.len(), 1);
}

#[test]
fn test_child_leaves_parent_untouched() {
    let parent: Path = "service".parse().unwrap();
    let child = parent.child("ssh").unwrap();

    assert_eq!(parent.to_string(), "service");
    assert_eq!(child.to_string(), "service ssh");
}

#[test]
fn test_serializes_as_segment_array() {
    let path: Path = "service port".parse().unwrap();

    assert_eq!(to_json_value(&path).unwrap(), json!(["service", "port"]));
    assert_eq!(to_json_value(Path::root()).unwrap(), json!([]));
}

#[test]
fn test_deserialize_validates_segments() {
    let path: Path = from_json_value(json!(["a", "b"])).unwrap();
    assert_eq!(path.to_string(), "a b");

    let result: Result<Path, _> = from_json_value(json!(["a b"]));
    assert!(result
        .unwrap_err()
        .to_string()
        .contains("contains the path delimiter"));

    let result: Result<Path, _> = from_json_value(json!([""]));
    assert!(result.is_err());
}
