use indexmap::IndexMap;
use crate::Error;

/// Where a stage key comes from: a site constant, or a value the page
/// parser extracted alongside the payload.
#[derive(Debug, Clone)]
pub enum KeySource {
    Fixed(&'static [u8]),
    Param(&'static str)
}

impl KeySource {
    pub fn resolve(&self, ctx: &ChapterContext) -> Result<Vec<u8>, Error> {
        match *self {
            KeySource::Fixed(key) => Ok(key.to_vec()),
            KeySource::Param(name) => Ok(ctx.require(name)?.as_bytes().to_vec())
        }
    }
}

/// One step of a decode chain. The first seven mirror the leaf codecs;
/// the rest are the string fix-ups some sites wrap around them.
#[derive(Debug, Clone)]
pub enum Stage {
    Hex,
    Substitution(KeySource),
    Xor(KeySource),
    /// AES-128-CBC with an IV-prefixed payload; the key is a per-site
    /// base64-encoded constant, obfuscation rather than secrecy.
    BlockCipher { key_b64: &'static str },
    Inflate,
    Base64,
    /// h,u,n,t,e,r packed script; its parameters ride in the payload itself.
    Unpack,
    AlphabetMap { mapping: String, reference: String },
    SkipPrefix(usize),
    /// Drop the hex rendering of the chapter id from the end of the text.
    StripIdSuffix,
    Reverse
}

/// How the final plaintext becomes a URL list.
#[derive(Debug, Clone)]
pub enum Materialize {
    /// Split on a separator, trim, drop blanks and decoy entries.
    Split { delimiter: char, decoy: Option<&'static str> },
    /// JSON document carrying an `imagesLink` array.
    ImageList { suffix: Option<&'static str> },
    /// JSON URL-template payload: host + path plus a file list or a count.
    Template
}

/// Per-site constant configuration, built once at startup and shared
/// read-only across resolutions.
#[derive(Debug, Clone)]
pub struct CipherProfile {
    pub name: &'static str,
    /// base origin for resolving root-relative entries
    pub origin: &'static str,
    pub stages: Vec<Stage>,
    pub materialize: Materialize
}

/// Inline parameters the page parser extracted next to the payload:
/// cipher keys, the numeric chapter id, anything a profile's stages
/// declare as [`KeySource::Param`].
#[derive(Debug, Default, Clone)]
pub struct ChapterContext {
    values: IndexMap<String, String>
}

impl ChapterContext {
    pub fn new() -> Self {
        ChapterContext { values: IndexMap::new() }
    }
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|v| v.as_str())
    }
    pub fn require(&self, name: &str) -> Result<&str, Error> {
        match self.get(name) {
            Some(value) => Ok(value),
            None => Err(Error::Config(format!("missing chapter parameter {:?}", name)))
        }
    }
    pub fn require_int(&self, name: &str) -> Result<i64, Error> {
        let raw = self.require(name)?;
        raw.parse().map_err(|_| Error::Config(format!("chapter parameter {:?} is not a number", name)))
    }
}

#[test]
fn test_context_params() {
    let ctx = ChapterContext::new()
        .with("sme", "XY")
        .with("chapter_id", "2116");
    assert_eq!(ctx.require("sme").unwrap(), "XY");
    assert_eq!(ctx.require_int("chapter_id").unwrap(), 2116);
    assert!(matches!(ctx.require("sml"), Err(Error::Config(_))));
    assert!(matches!(
        ChapterContext::new().with("chapter_id", "x").require_int("chapter_id"),
        Err(Error::Config(_))
    ));
}

#[test]
fn test_key_source() {
    let ctx = ChapterContext::new().with("sme", "XY");
    assert_eq!(KeySource::Fixed(b"abc").resolve(&ctx).unwrap(), b"abc");
    assert_eq!(KeySource::Param("sme").resolve(&ctx).unwrap(), b"XY");
    assert!(KeySource::Param("sml").resolve(&ctx).is_err());
}
