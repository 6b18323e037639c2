//! Parameter discovery over decoded script text. These are plain literal
//! scans: the scripts are machine-generated, so `name = 'value'` and
//! `name = 123` assignments are stable enough to find without a full
//! parser.

/// Value of the first `name = 'value'` (or double-quoted) assignment.
pub fn quoted_var<'a>(script: &'a str, name: &str) -> Option<&'a str> {
    let bytes = script.as_bytes();
    let mut from = 0;
    while let Some(at) = script[from..].find(name) {
        let mut i = from + at + name.len();
        from = i;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if bytes.get(i) != Some(&b'=') {
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let quote = match bytes.get(i) {
            Some(&b'\'') => b'\'',
            Some(&b'"') => b'"',
            _ => continue
        };
        i += 1;
        let start = i;
        while i < bytes.len() {
            if bytes[i] == quote {
                return Some(&script[start..i]);
            }
            i += 1;
        }
        return None;
    }
    None
}

/// Value of the first `name = 123` assignment.
pub fn int_var(script: &str, name: &str) -> Option<i64> {
    let bytes = script.as_bytes();
    let mut from = 0;
    while let Some(at) = script[from..].find(name) {
        let mut i = from + at + name.len();
        from = i;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        if bytes.get(i) != Some(&b'=') {
            continue;
        }
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_whitespace() {
            i += 1;
        }
        let start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == start {
            continue;
        }
        return script[start..i].parse().ok();
    }
    None
}

/// Host of the first `https://` URL whose host contains `marker`.
pub fn marked_host<'a>(script: &'a str, marker: &str) -> Option<&'a str> {
    const SCHEME: &str = "https://";
    let mut from = 0;
    while let Some(at) = script[from..].find(SCHEME) {
        let start = from + at + SCHEME.len();
        let host_len = script[start..]
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '.'))
            .unwrap_or(script.len() - start);
        let host = &script[start..start + host_len];
        if host.contains(marker) {
            return Some(host);
        }
        from = start;
    }
    None
}

#[test]
fn test_quoted_var() {
    let script = "var smlx = 9;\nsml = 'K9fTq';\nvar sme = \"Zw3Lp\";";
    assert_eq!(quoted_var(script, "sml"), Some("K9fTq"));
    assert_eq!(quoted_var(script, "sme"), Some("Zw3Lp"));
    assert_eq!(quoted_var(script, "missing"), None);
}

#[test]
fn test_int_var() {
    let script = "const idc = 2116; var other = 'x';";
    assert_eq!(int_var(script, "idc"), Some(2116));
    assert_eq!(int_var(script, "other"), None);
}

#[test]
fn test_marked_host() {
    let script = "fetch('https://cdn.example.org/x');\nvar api_url = 'https://bqj.scan-manga.com/lel/';";
    assert_eq!(marked_host(script, ".scan-manga.com"), Some("bqj.scan-manga.com"));
    assert_eq!(marked_host(script, ".nowhere."), None);
}
