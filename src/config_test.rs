use super::*;

fn parse(args: &[&str]) -> Result<PortalConfig, ConfigError> {
    let mut argv = vec!["portal"];
    argv.extend_from_slice(args);
    Cli::try_parse_from(argv).unwrap().into_config()
}

#[test]
fn explicit_flags() {
    let config = parse(&[
        "--base-url",
        "https://canvas.example.com/",
        "--project",
        "roadmap",
        "--request-timeout-secs",
        "30",
        "--connect-timeout-secs",
        "2",
    ])
    .unwrap();
    assert_eq!(config.base_url, "https://canvas.example.com");
    assert_eq!(config.project_slug.as_deref(), Some("roadmap"));
    assert_eq!(config.timeouts, Timeouts { request_secs: 30, connect_secs: 2 });
}

#[test]
fn trailing_slashes_trimmed() {
    let config = parse(&["--base-url", "http://localhost:8080///"]).unwrap();
    assert_eq!(config.base_url, "http://localhost:8080");
}

#[test]
fn blank_project_slug_is_none() {
    let config = parse(&["--base-url", "http://localhost:8080", "--project", "  "]).unwrap();
    assert_eq!(config.project_slug, None);
}

#[test]
fn rejects_non_http_scheme() {
    let err = parse(&["--base-url", "ftp://files.example.com"]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
}

#[test]
fn rejects_scheme_without_host() {
    let err = parse(&["--base-url", "http://"]).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBaseUrl(_)));
}

#[test]
fn rejects_zero_timeout() {
    let err = parse(&["--base-url", "http://localhost", "--request-timeout-secs", "0"]).unwrap_err();
    assert!(matches!(err, ConfigError::ZeroTimeout { name: "request timeout" }));
}

#[test]
fn non_numeric_timeout_is_a_usage_error() {
    let result = Cli::try_parse_from(["portal", "--connect-timeout-secs", "soon"]);
    assert!(result.is_err());
}

#[test]
fn defaults_are_valid() {
    assert!(normalize_base_url(DEFAULT_BASE_URL).is_ok());
    assert!(nonzero("request timeout", DEFAULT_REQUEST_TIMEOUT_SECS).is_ok());
    assert!(nonzero("connect timeout", DEFAULT_CONNECT_TIMEOUT_SECS).is_ok());
}
