use itertools::Itertools;
use crate::Error;

/// Decode a hex string two digits at a time.
///
/// A trailing half pair is dropped silently, matching the sites' own
/// decoders, so odd-length input is not an error.
pub fn decode(hex: &str) -> Result<Vec<u8>, Error> {
    let mut out = Vec::with_capacity(hex.len() / 2);
    for (hi, lo) in hex.chars().tuples() {
        let hi = expect!(hi.to_digit(16), "bad hex digit {:?}", hi);
        let lo = expect!(lo.to_digit(16), "bad hex digit {:?}", lo);
        out.push((hi << 4 | lo) as u8);
    }
    Ok(out)
}

pub fn encode(data: &[u8]) -> String {
    data.iter().map(|b| format!("{:02x}", b)).collect()
}

#[test]
fn test_decode() {
    assert_eq!(decode("48656c6c6f").unwrap(), b"Hello");
    assert_eq!(decode("48656C6C6F").unwrap(), b"Hello");
    assert_eq!(decode("").unwrap(), b"");
}

#[test]
fn test_odd_tail_dropped() {
    assert_eq!(decode("4865f").unwrap(), b"He");
    assert_eq!(decode("4").unwrap(), b"");
}

#[test]
fn test_bad_digit() {
    assert!(decode("4g").is_err());
    // a bad digit in the dropped half pair is never consumed
    assert!(decode("48g").is_ok());
}

#[test]
fn test_round_trip() {
    let data: Vec<u8> = (0u16..=255).map(|b| b as u8).collect();
    assert_eq!(decode(&encode(&data)).unwrap(), data);
}
