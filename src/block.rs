use aes::Aes128;
use aes::cipher::{BlockDecryptMut, KeyIvInit, block_padding::Pkcs7};
use cbc::Decryptor;
use crate::Error;

type Aes128CbcDec = Decryptor<Aes128>;

pub const BLOCK_SIZE: usize = 16;

/// Decrypt an IV-prefixed AES-128-CBC payload: the first 16 bytes are the
/// initialization vector, the remainder the ciphertext. PKCS#7 padding is
/// removed from the result.
pub fn decrypt(data: &[u8], key: &[u8]) -> Result<Vec<u8>, Error> {
    require!(data.len() > BLOCK_SIZE, Error::Crypto("payload shorter than its IV"));
    let (iv, ciphertext) = data.split_at(BLOCK_SIZE);
    require!(ciphertext.len() % BLOCK_SIZE == 0, Error::Crypto("ciphertext is not a whole number of blocks"));

    let cipher = Aes128CbcDec::new_from_slices(key, iv)
        .map_err(|_| Error::Crypto("key is not 16 bytes"))?;
    cipher.decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| Error::Crypto("bad padding"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use aes::cipher::BlockEncryptMut;

    type Aes128CbcEnc = cbc::Encryptor<Aes128>;

    const KEY: &[u8] = b"EsKgHdRzCvBnMlQw";
    const IV: &[u8] = b"0102030405060708";

    fn encrypt(plaintext: &[u8]) -> Vec<u8> {
        let ciphertext = Aes128CbcEnc::new_from_slices(KEY, IV).unwrap()
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);
        let mut data = IV.to_vec();
        data.extend_from_slice(&ciphertext);
        data
    }

    #[test]
    fn round_trip() {
        let plaintext = b"http://a/1.jpg;http://a/2.jpg;";
        assert_eq!(decrypt(&encrypt(plaintext), KEY).unwrap(), plaintext);
    }

    #[test]
    fn ragged_ciphertext() {
        let mut data = encrypt(b"pages");
        data.pop();
        assert!(matches!(decrypt(&data, KEY), Err(Error::Crypto(_))));
    }

    #[test]
    fn short_payload() {
        assert!(matches!(decrypt(&[0; 16], KEY), Err(Error::Crypto(_))));
    }

    #[test]
    fn bad_key_length() {
        let data = encrypt(b"pages");
        assert!(matches!(decrypt(&data, b"short"), Err(Error::Crypto(_))));
    }

    #[test]
    fn wrong_key_is_garbage_or_error() {
        // CBC with the wrong key either fails the unpad check or yields
        // bytes that are not the plaintext; it must never round-trip.
        let data = encrypt(b"http://a/1.jpg;");
        match decrypt(&data, b"AAAABBBBCCCCDDDD") {
            Ok(out) => assert_ne!(out, b"http://a/1.jpg;"),
            Err(Error::Crypto(_)) => {}
            Err(e) => panic!("unexpected error: {:?}", e),
        }
    }
}
