use crate::Error;

/// Keyed monoalphabetic remap: every ASCII alphanumeric is looked up in
/// `reference` and replaced by the `mapping` character at the same
/// position. Characters outside the reference alphabet (separators,
/// padding, punctuation) pass through untouched.
pub fn remap(input: &str, mapping: &str, reference: &str) -> Result<String, Error> {
    require!(!mapping.is_empty() && mapping.chars().count() == reference.chars().count(),
        Error::Config("mapping and reference alphabets differ in length".into()));
    let mapping: Vec<char> = mapping.chars().collect();

    Ok(input.chars().map(|c| {
        if c.is_ascii_alphanumeric() {
            match reference.chars().position(|r| r == c) {
                Some(position) => mapping[position],
                None => c
            }
        } else {
            c
        }
    }).collect())
}

#[test]
fn test_remap() {
    assert_eq!(remap("cab=ba", "xyz", "abc").unwrap(), "zxy=yx");
}

#[test]
fn test_unknown_chars_pass() {
    assert_eq!(remap("d+e/f", "xyz", "abc").unwrap(), "d+e/f");
}

#[test]
fn test_mismatched_alphabets() {
    assert!(matches!(remap("a", "xy", "abc"), Err(Error::Config(_))));
}
