//! Golden master tests for diagnostic output.
//!
//! These tests capture the exact formatted output of `AeDiagnostic`
//! to ensure consistent error presentation across changes.

use ae::cli::diagnostics::AeDiagnostic;
use ae::{parse_source, tokenize, AeError};

/// Test helper to capture diagnostic output as a string.
fn capture_diagnostic_output(error: &AeError) -> String {
    format!("{}", AeDiagnostic::new(error))
}

fn parse_error(source: &str) -> AeError {
    parse_source("schema.ae", source).unwrap_err()
}

#[test]
fn test_unknown_name_diagnostic() {
    let error = parse_error(r#"route "/a" A"#);

    let expected = "Error 1:12: unknown name `A`
    A

1 | route \"/a\" A
  |            ^ here
help: names must be defined with `def` before they are used
";

    assert_eq!(capture_diagnostic_output(&error), expected);
}

#[test]
fn test_multiline_context_diagnostic() {
    let error = parse_error("def A { \"x\": \"y\" }\n\nroute \"/a\" B\n\ndef C { \"z\": \"w\" }\n");

    let expected = "Error 3:12: unknown name `B`
    B

1 | def A { \"x\": \"y\" }
2 |
3 | route \"/a\" B
  |            ^ here
4 |
5 | def C { \"z\": \"w\" }
help: names must be defined with `def` before they are used
";

    assert_eq!(capture_diagnostic_output(&error), expected);
}

#[test]
fn test_pointer_covers_whole_token() {
    let error = parse_error(r#"response "/a" "200" {"x":"y"}"#);

    let expected = "Error 1:15: status code must be a 3-digit number
    200

1 | response \"/a\" \"200\" {\"x\":\"y\"}
  |               ^---- here
help: use an HTTP status such as 200 or 404
";

    assert_eq!(capture_diagnostic_output(&error), expected);
}

#[test]
fn test_lex_error_has_no_offending_text() {
    let error = parse_error(r#""bad\q""#);

    let expected = "Error 1:6: character 'q' does not correspond to any escape sequence

1 | \"bad\\q\"
  |      ^ here
help: supported escapes are \\\\ \\n \\t \\r \\\"
";

    assert_eq!(capture_diagnostic_output(&error), expected);
}

#[test]
fn test_error_without_source() {
    let error = tokenize("\"open").unwrap_err();

    let expected = "Error 1:1: unexpected EOF while scanning string literal
help: close the string with `\"`
";

    assert_eq!(capture_diagnostic_output(&error), expected);
}

#[test]
fn test_io_error_diagnostic() {
    let error = AeError::Io {
        path: "missing.ae".into(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
    };

    let expected = "Error: failed to read missing.ae: not found
";

    assert_eq!(capture_diagnostic_output(&error), expected);
}
