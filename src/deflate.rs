use inflate::InflateStream;
use crate::Error;

/// Inflate a compressed payload to text, trying zlib framing first and
/// headerless DEFLATE second.
///
/// Within an attempt, decompression runs until the stream completes or
/// stalls wanting more input; whatever came out by then is accepted. Some
/// servers truncate the stream after the last page entry, so partial
/// output is not an error. Only a hard decoder error fails an attempt.
pub fn inflate(data: &[u8]) -> Result<String, Error> {
    let bytes = attempt(InflateStream::from_zlib(), data)
        .or_else(|| attempt(InflateStream::new(), data));
    match bytes {
        Some(bytes) => {
            debug!("inflated {} -> {} bytes", data.len(), bytes.len());
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        None => Err(Error::Decode("neither zlib nor raw deflate".into()))
    }
}

fn attempt(mut stream: InflateStream, data: &[u8]) -> Option<Vec<u8>> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < data.len() {
        match stream.update(&data[pos..]) {
            Ok((0, chunk)) if chunk.is_empty() => break, // stalled
            Ok((consumed, chunk)) => {
                out.extend_from_slice(chunk);
                pos += consumed;
            }
            Err(_) => return None,
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    // a single stored block holding "Hello"
    const RAW: &[u8] = &[0x01, 0x05, 0x00, 0xfa, 0xff, b'H', b'e', b'l', b'l', b'o'];
    // the same block with a zlib header and Adler-32 trailer
    const ZLIB: &[u8] = &[
        0x78, 0x01, 0x01, 0x05, 0x00, 0xfa, 0xff, b'H', b'e', b'l', b'l', b'o',
        0x05, 0x8c, 0x01, 0xf5,
    ];

    #[test]
    fn zlib_framing() {
        assert_eq!(inflate(ZLIB).unwrap(), "Hello");
    }

    #[test]
    fn raw_fallback() {
        assert_eq!(inflate(RAW).unwrap(), "Hello");
    }

    #[test]
    fn truncated_stream_keeps_partial_output() {
        // the stored block declares five bytes but only three arrive
        let cut = &RAW[..RAW.len() - 2];
        assert_eq!(inflate(cut).unwrap(), "Hel");
    }

    #[test]
    fn garbage_fails_both_framings() {
        assert!(inflate(&[0x1f, 0x8b, 0xff, 0xff, 0xff, 0xff]).is_err());
    }
}
