use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use crate::Error;

/// Standard-alphabet base64 decode, tolerant of stripped padding.
///
/// Payloads that pass through a string-reversal stage lose their trailing
/// `=`, so the missing padding is recomputed from the length before
/// decoding. Embedded whitespace is ignored, as the sites' own decoders do.
pub fn decode(text: &str) -> Result<Vec<u8>, Error> {
    let mut clean: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    for _ in 0..(4 - clean.len() % 4) % 4 {
        clean.push('=');
    }
    match STANDARD.decode(&clean) {
        Ok(bytes) => Ok(bytes),
        Err(e) => decode!("base64: {}", e)
    }
}

#[test]
fn test_repad() {
    // the same bytes whether the padding survived or not
    let full = decode("QUJDRA==").unwrap();
    assert_eq!(full, b"ABCD");
    assert_eq!(decode("QUJDRA=").unwrap(), full);
    assert_eq!(decode("QUJDRA").unwrap(), full);
}

#[test]
fn test_no_padding_needed() {
    assert_eq!(decode("SGVsbG8=").unwrap(), b"Hello");
    assert_eq!(decode("aHR0cA==").unwrap(), b"http");
}

#[test]
fn test_embedded_newlines() {
    assert_eq!(decode("SGVs\nbG8=").unwrap(), b"Hello");
}

#[test]
fn test_bad_alphabet() {
    assert!(decode("SGV%bG8=").is_err());
}
