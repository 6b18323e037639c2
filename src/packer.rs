//! Reversal of the h,u,n,t,e,r script packer. The payload re-encodes the
//! source one character at a time: each code point, shifted up by
//! `interval`, is written as a base-`option` numeral whose digits are
//! looked up in a custom alphabet (the mask), and the numerals are joined
//! by the mask character at index `option`.

use std::collections::HashMap;
use nom::{
    bytes::complete::{tag, take_till},
    character::complete::{char, digit1, multispace0},
    combinator::map_res,
    sequence::{delimited, preceded},
};
use crate::{Error, R};

const HEADER: &str = "function(h,u,n,t,e,r)";

#[derive(Debug, Clone, PartialEq)]
pub struct PackedCall {
    pub encoded: String,
    pub radix: u32,
    pub mask: String,
    pub interval: u32,
    pub option: u32
}

fn quoted(i: &str) -> R<&str> {
    delimited(char('"'), take_till(|c| c == '"'), char('"'))(i)
}
fn int(i: &str) -> R<u32> {
    map_res(digit1, |s: &str| s.parse())(i)
}
fn comma(i: &str) -> R<char> {
    delimited(multispace0, char(','), multispace0)(i)
}

fn packed_args(i: &str) -> R<PackedCall> {
    let (i, _) = tag("}(")(i)?;
    let (i, _) = multispace0(i)?;
    let (i, encoded) = quoted(i)?;
    let (i, radix) = preceded(comma, int)(i)?;
    let (i, mask) = preceded(comma, quoted)(i)?;
    let (i, interval) = preceded(comma, int)(i)?;
    let (i, option) = preceded(comma, int)(i)?;
    let (i, _count) = preceded(comma, int)(i)?;
    let (i, _) = preceded(multispace0, char(')'))(i)?;
    Ok((i, PackedCall {
        encoded: encoded.into(),
        radix,
        mask: mask.into(),
        interval,
        option
    }))
}

/// Locate the packed call site inside inline script text and pull out its
/// argument tuple.
pub fn find_packed(script: &str) -> Result<PackedCall, Error> {
    let start = expect!(script.find(HEADER), "no packed payload in script");
    let tail = &script[start..];
    let args = expect!(tail.find("}("), "packed payload has no argument list");
    let (_, call) = t!(packed_args(&tail[args..]));
    trace!("packed call: {} chars, mask {:?}, interval {}, option {}",
        call.encoded.len(), call.mask, call.interval, call.option);
    Ok(call)
}

/// Decode the packed payload back to script source.
pub fn unpack(call: &PackedCall) -> Result<String, Error> {
    let mask: Vec<char> = call.mask.chars().collect();
    let base = call.option;
    require!((2..=36).contains(&base), Error::Config(format!("packer base {} out of range", base)));
    require!((base as usize) < mask.len(),
        Error::Config(format!("delimiter index {} outside a {}-char mask", base, mask.len())));
    let delimiter = mask[base as usize];

    let mut reverse = HashMap::with_capacity(mask.len());
    for (position, &c) in mask.iter().enumerate() {
        reverse.insert(c, position);
    }

    let mut out = String::new();
    for token in call.encoded.split(delimiter).filter(|t| !t.is_empty()) {
        // mask positions are spelled out in decimal, so masks longer than
        // ten characters contribute more than one digit per character
        let mut digits = String::with_capacity(token.len());
        for c in token.chars() {
            let position = expect!(reverse.get(&c), "character {:?} missing from mask", c);
            digits += &position.to_string();
        }
        let value = match u32::from_str_radix(&digits, base) {
            Ok(value) => value,
            Err(_) => decode!("token {:?} is not a base-{} numeral", digits, base)
        };
        let code = expect!(value.checked_sub(call.interval),
            "token value {} below interval {}", value, call.interval);
        out.push(expect!(std::char::from_u32(code), "code point {:#x} out of range", code));
    }
    Ok(out)
}

#[test]
fn test_unpack_known() {
    // "68" and "41" read in base 16, minus the interval, give 'H' and '!'
    let call = PackedCall {
        encoded: "68g41g".into(),
        radix: 16,
        mask: "0123456789abcdefg".into(),
        interval: 32,
        option: 16
    };
    assert_eq!(unpack(&call).unwrap(), "H!");
}

#[test]
fn test_unpack_multi_digit_positions() {
    // 'H' -> 79 -> "hj", 'i' -> 112 -> "bbc", delimiter mask[10] = 'k'
    let call = PackedCall {
        encoded: "hjkbbck".into(),
        radix: 8,
        mask: "abcdefghijklmnop".into(),
        interval: 7,
        option: 10
    };
    assert_eq!(unpack(&call).unwrap(), "Hi");
}

#[test]
fn test_unpack_bad_character() {
    let call = PackedCall {
        encoded: "6Zg".into(),
        radix: 16,
        mask: "0123456789abcdefg".into(),
        interval: 32,
        option: 16
    };
    assert!(matches!(unpack(&call), Err(Error::Decode(_))));
}

#[test]
fn test_find_packed() {
    let script = r#"<script>eval(function(h,u,n,t,e,r){r = ""}("hjkbbck",8,"abcdefghijklmnop",7,10,2))</script>"#;
    let call = find_packed(script).unwrap();
    assert_eq!(call.encoded, "hjkbbck");
    assert_eq!(call.mask, "abcdefghijklmnop");
    assert_eq!(call.interval, 7);
    assert_eq!(call.option, 10);
    assert_eq!(unpack(&call).unwrap(), "Hi");
}

#[test]
fn test_find_packed_missing() {
    assert!(find_packed("var x = 1;").is_err());
}
