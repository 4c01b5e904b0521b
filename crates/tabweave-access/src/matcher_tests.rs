use super::*;

#[test]
fn test_include_all_allows_everything() {
    let config = HostAccessConfig::default();
    assert!(is_allowed("https://anything.example/path", &config).allowed);
    assert!(is_allowed("http://localhost:8080", &config).allowed);
}

#[test]
fn test_invalid_url_is_denied_in_every_mode() {
    for config in [
        HostAccessConfig::default(),
        HostAccessConfig::whitelist(["example.com"]),
        HostAccessConfig::blocklist(["example.com"]),
    ] {
        let decision = is_allowed("not a url", &config);
        assert!(!decision.allowed);
        assert_eq!(decision.reason.as_deref(), Some("Invalid URL"));
    }
}

#[test]
fn test_wildcard_whitelist_entry() {
    let config = HostAccessConfig::whitelist(["*.example.com"]);
    assert!(is_allowed("https://a.example.com/x", &config).allowed);
    assert!(is_allowed("https://example.com/", &config).allowed);
    assert!(is_allowed("https://deep.a.example.com/", &config).allowed);
}

#[test]
fn test_whitelist_rejects_lookalike_host() {
    let config = HostAccessConfig::whitelist(["*.example.com"]);
    let decision = is_allowed("https://badexample.com/", &config);
    assert!(!decision.allowed);
    assert_eq!(
        decision.reason.as_deref(),
        Some("Host badexample.com is not in the whitelist")
    );
}

#[test]
fn test_whitelist_rejects_prefix_glued_host() {
    let config = HostAccessConfig::whitelist(["*.example.com"]);
    assert!(!is_allowed("https://notexample.com/", &config).allowed);
}

#[test]
fn test_blocklist_covers_subdomains() {
    let config = HostAccessConfig::blocklist(["bad.com"]);
    assert!(!is_allowed("https://bad.com/", &config).allowed);
    assert!(!is_allowed("https://sub.bad.com/page", &config).allowed);
    assert!(is_allowed("https://notbad.com/", &config).allowed);
}

#[test]
fn test_bare_entry_matches_subdomains() {
    let config = HostAccessConfig::whitelist(["example.com"]);
    assert!(is_allowed("https://example.com/", &config).allowed);
    assert!(is_allowed("https://www.example.com/", &config).allowed);
    assert!(!is_allowed("https://example.org/", &config).allowed);
}

#[test]
fn test_blocklist_denies_case_insensitively() {
    let config = HostAccessConfig::blocklist(["Example.COM"]);
    let decision = is_allowed("https://WWW.example.com", &config);
    assert!(!decision.allowed);
    assert_eq!(decision.reason.as_deref(), Some("Host www.example.com is blocked"));
}

#[test]
fn test_blocklist_allows_unlisted() {
    let config = HostAccessConfig::blocklist(["ads.example.com"]);
    assert!(is_allowed("https://example.com/", &config).allowed);
    assert!(!is_allowed("https://x.ads.example.com/", &config).allowed);
}

#[test]
fn test_empty_and_blank_entries_never_match() {
    let config = HostAccessConfig::blocklist(["", "   ", "*."]);
    assert!(is_allowed("https://example.com/", &config).allowed);

    let config = HostAccessConfig::whitelist([""]);
    assert!(!is_allowed("https://example.com/", &config).allowed);
}

#[test]
fn test_entries_are_trimmed() {
    let config = HostAccessConfig::whitelist(["  example.com  "]);
    assert!(is_allowed("https://example.com/", &config).allowed);
}

#[test]
fn test_hostless_url_with_whitelist() {
    let config = HostAccessConfig::whitelist(["example.com"]);
    let decision = is_allowed("about:blank", &config);
    assert!(!decision.allowed);
    assert_eq!(decision.reason.as_deref(), Some("Host  is not in the whitelist"));
}

#[test]
fn test_decision_serialization_skips_empty_reason() {
    let json = serde_json::to_value(AccessDecision::allow()).unwrap();
    assert_eq!(json, serde_json::json!({"allowed": true}));
}
