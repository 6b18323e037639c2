//! Rolling-key byte transforms: the keyed additive substitution and the
//! XOR stream cipher. Keys are ASCII strings reused cyclically; input is
//! treated as 8-bit code units.

use crate::Error;

fn check_key(key: &[u8]) -> Result<(), Error> {
    require!(!key.is_empty(), Error::Config("empty cipher key".into()));
    Ok(())
}

/// output[i] = (input[i] - key[i mod |key|]) mod 256
pub fn decipher(input: &[u8], key: &[u8]) -> Result<Vec<u8>, Error> {
    check_key(key)?;
    Ok(input.iter()
        .zip(key.iter().cycle())
        .map(|(&b, &k)| b.wrapping_sub(k))
        .collect())
}

/// The additive inverse of [`decipher`].
pub fn encipher(input: &[u8], key: &[u8]) -> Result<Vec<u8>, Error> {
    check_key(key)?;
    Ok(input.iter()
        .zip(key.iter().cycle())
        .map(|(&b, &k)| b.wrapping_add(k))
        .collect())
}

/// Self-inverse: the same call encrypts and decrypts.
pub fn xor(input: &[u8], key: &[u8]) -> Result<Vec<u8>, Error> {
    check_key(key)?;
    Ok(input.iter()
        .zip(key.iter().cycle())
        .map(|(&b, &k)| b ^ k)
        .collect())
}

#[test]
fn test_substitution_round_trip() {
    let encrypted = encipher(b"abc", b"XY").unwrap();
    assert_eq!(encrypted, [(97 + 88) as u8, (98 + 89) as u8, (99 + 88) as u8]);
    assert_eq!(decipher(&encrypted, b"XY").unwrap(), b"abc");
}

#[test]
fn test_substitution_wraps() {
    assert_eq!(decipher(&[0x01], b"\x02").unwrap(), [0xff]);
    assert_eq!(encipher(&[0xff], b"\x02").unwrap(), [0x01]);
}

#[test]
fn test_xor_self_inverse() {
    let data = b"http://a/1.jpg;http://a/2.jpg;";
    let key = b"sml";
    assert_eq!(xor(&xor(data, key).unwrap(), key).unwrap(), data);
}

#[test]
fn test_empty_key() {
    assert!(matches!(decipher(b"abc", b""), Err(Error::Config(_))));
    assert!(matches!(xor(b"abc", b""), Err(Error::Config(_))));
}
