//! Integration tests for mime_media_type library

use mime_media_type::*;
use std::collections::HashMap;
use std::sync::Arc;

#[test]
fn test_content_type_header_values() {
    // Values seen in real Content-Type headers
    let cases = [
        ("text/html; charset=utf-8", "text", "html", vec![("charset", "utf-8")]),
        ("application/json", "application", "json", vec![]),
        (
            "multipart/form-data; boundary=----WebKitFormBoundary7MA4YWxkTrZu0gW",
            "multipart",
            "form-data",
            vec![("boundary", "----WebKitFormBoundary7MA4YWxkTrZu0gW")],
        ),
        (
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "application",
            "vnd.openxmlformats-officedocument.wordprocessingml.document",
            vec![],
        ),
        (
            "Message/Partial; number=2; total=3; id=\"oc=jpbe0M2Yt4s@example.com\"",
            "message",
            "partial",
            vec![("number", "2"), ("total", "3"), ("id", "oc=jpbe0M2Yt4s@example.com")],
        ),
    ];

    for (input, type_, subtype, params) in cases {
        let media_type = MediaType::parse(input).unwrap();
        assert_eq!(media_type.type_(), type_, "{input}");
        assert_eq!(media_type.subtype(), subtype, "{input}");
        assert_eq!(media_type.parameters().collect::<Vec<_>>(), params, "{input}");
        assert_eq!(media_type.to_string(), input);
    }
}

#[test]
fn test_error_handling_chain() {
    let err = MediaType::parse("").unwrap_err();
    assert!(matches!(err, ParseError::NoSubtype(_)));

    let err = "text/plain; =bogus".parse::<MediaType>().unwrap_err();
    assert!(matches!(err, ParseError::MalformedParameter { .. }));
    assert!(err.to_string().contains("=bogus"));

    // Boxed as a generic error
    let boxed: Box<dyn std::error::Error + Send + Sync> = err.into();
    assert!(boxed.to_string().starts_with("Parameter is not formatted correctly"));

    // The lenient entry point swallows both kinds
    assert_eq!(MediaType::try_parse(""), None);
    assert_eq!(MediaType::try_parse("text/plain; =bogus"), None);
}

#[test]
fn test_charset_resolution_end_to_end() {
    let header = |value: &str| MediaType::try_parse(value);

    // No header, no charset parameter, unknown charset: all fall back
    let fallback = Some(charset::utf_8());
    let missing = header("text/plain").and_then(|m| m.charset_or(fallback.clone()));
    assert_eq!(missing, fallback);

    let unknown =
        header("text/plain; charset=x-unknown").and_then(|m| m.charset_or(fallback.clone()));
    assert_eq!(unknown, fallback);

    let known =
        header("text/plain; charset=ISO-8859-1").and_then(|m| m.charset_or(fallback.clone()));
    assert_eq!(known, Some(charset::iso_8859_1()));

    let malformed = header("text/plain; charset = latin1");
    assert_eq!(malformed, None);
}

#[test]
fn test_registered_charset_is_visible_to_media_types() {
    let media_type = MediaType::parse("text/plain; charset=x-integration-charset").unwrap();
    assert_eq!(media_type.charset(), None);

    let registered = charset::register_charset("x-integration-charset", &["x-int"]).unwrap();
    assert_eq!(media_type.charset(), Some(registered.clone()));

    let by_alias = MediaType::parse("text/plain; charset=X-INT").unwrap();
    assert_eq!(by_alias.charset(), Some(registered));
}

#[test]
fn test_registry_as_resolver() {
    let mut registry = CharsetRegistry::with_builtins();
    registry.register("x-private", &[]).unwrap();

    let media_type = MediaType::parse("text/plain; charset=x-private").unwrap();
    assert_eq!(media_type.charset_with(&registry, None).unwrap().name(), "x-private");

    // The private registry does not leak into the process-wide one
    assert_eq!(media_type.charset(), None);

    let dyn_resolver: &dyn CharsetResolver = &registry;
    assert!(media_type.charset_with(dyn_resolver, None).is_some());
}

#[test]
fn test_media_types_as_map_keys() {
    let mut handlers: HashMap<MediaType, &str> = HashMap::new();
    handlers.insert(MediaType::parse("application/json").unwrap(), "json");
    handlers.insert(MediaType::parse("text/html; charset=utf-8").unwrap(), "html");

    assert_eq!(handlers.get(&MediaType::parse("application/json").unwrap()), Some(&"json"));

    // Keys compare by their original text
    assert_eq!(handlers.get(&MediaType::parse("Application/JSON").unwrap()), None);
    assert_eq!(handlers.get(&MediaType::parse("text/html;charset=utf-8").unwrap()), None);
}

#[test]
fn test_concurrent_media_type_parsing() {
    let test_inputs = [
        "text/html; charset=utf-8",
        "application/json",
        "multipart/form-data; boundary=test123",
        "image/jpeg",
        "text/plain; charset=iso-8859-1",
    ];

    std::thread::scope(|scope| {
        for input in test_inputs {
            scope.spawn(move || {
                for _ in 0..1000 {
                    let media_type = MediaType::parse(input).unwrap();
                    assert_eq!(media_type.as_str(), input);
                }
            });
        }
    });
}

#[test]
fn test_shared_media_type_across_threads() {
    let shared = Arc::new(MediaType::parse("text/plain; charset=us-ascii").unwrap());

    std::thread::scope(|scope| {
        for _ in 0..4 {
            let shared = Arc::clone(&shared);
            scope.spawn(move || {
                for _ in 0..100 {
                    assert_eq!(shared.charset(), Some(charset::us_ascii()));
                }
            });
        }
    });
}
