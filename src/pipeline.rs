//! The stage runner. A resolution owns one buffer, feeds it through the
//! profile's stages in order, and materializes the survivor into a page
//! list. The first failing stage aborts the whole chain; no partial
//! lists are ever returned.

use crate::{alphabet, base64, block, deflate, hex, packer, stream, urls};
use crate::profile::{ChapterContext, CipherProfile, Materialize, Stage};
use crate::{Error, Page};

#[derive(Debug, Clone, Copy)]
pub enum ObfuscatedPayload<'a> {
    Text(&'a str),
    Bytes(&'a [u8])
}

impl<'a> From<&'a str> for ObfuscatedPayload<'a> {
    fn from(text: &'a str) -> Self {
        ObfuscatedPayload::Text(text)
    }
}
impl<'a> From<&'a [u8]> for ObfuscatedPayload<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ObfuscatedPayload::Bytes(bytes)
    }
}

/// Intermediate buffer handed from stage to stage by value.
enum Buf {
    Bytes(Vec<u8>),
    Text(String)
}

impl Buf {
    fn text(&self) -> Result<&str, Error> {
        match self {
            Buf::Text(s) => Ok(s),
            Buf::Bytes(b) => match std::str::from_utf8(b) {
                Ok(s) => Ok(s),
                Err(_) => decode!("stage output is not valid UTF-8")
            }
        }
    }
    fn into_text(self) -> Result<String, Error> {
        match self {
            Buf::Text(s) => Ok(s),
            Buf::Bytes(b) => match String::from_utf8(b) {
                Ok(s) => Ok(s),
                Err(_) => decode!("stage output is not valid UTF-8")
            }
        }
    }
    fn bytes(&self) -> &[u8] {
        match self {
            Buf::Bytes(b) => b,
            Buf::Text(s) => s.as_bytes()
        }
    }
    /// 8-bit code units: text is read as code points truncated to a byte,
    /// the way the sites' own scripts index into strings.
    fn byte_units(&self) -> Vec<u8> {
        match self {
            Buf::Bytes(b) => b.clone(),
            Buf::Text(s) => s.chars().map(|c| c as u32 as u8).collect()
        }
    }
    fn len(&self) -> usize {
        match self {
            Buf::Bytes(b) => b.len(),
            Buf::Text(s) => s.len()
        }
    }
}

/// Run a chapter payload through a site profile. The result is dense and
/// zero-indexed; an empty result is reported as [`Error::EmptyResult`],
/// since a chapter without pages always means a decode went wrong
/// upstream.
pub fn resolve(profile: &CipherProfile, payload: ObfuscatedPayload, ctx: &ChapterContext)
    -> Result<Vec<Page>, Error>
{
    let mut buf = match payload {
        ObfuscatedPayload::Text(s) => Buf::Text(s.into()),
        ObfuscatedPayload::Bytes(b) => Buf::Bytes(b.to_vec())
    };
    for stage in &profile.stages {
        debug!("{}: {:?} over {} bytes", profile.name, stage, buf.len());
        buf = t!(apply(stage, buf, ctx));
    }

    let urls = t!(materialize(&profile.materialize, buf, profile.origin));
    require!(!urls.is_empty(), Error::EmptyResult);

    Ok(urls.into_iter()
        .enumerate()
        .map(|(index, url)| Page { index: index as u32, url })
        .collect())
}

fn apply(stage: &Stage, buf: Buf, ctx: &ChapterContext) -> Result<Buf, Error> {
    Ok(match stage {
        Stage::Hex => Buf::Bytes(hex::decode(buf.text()?.trim())?),
        Stage::Substitution(key) => {
            let key = key.resolve(ctx)?;
            Buf::Bytes(stream::decipher(&buf.byte_units(), &key)?)
        }
        Stage::Xor(key) => {
            let key = key.resolve(ctx)?;
            Buf::Bytes(stream::xor(&buf.byte_units(), &key)?)
        }
        Stage::BlockCipher { key_b64 } => {
            let key = base64::decode(key_b64)
                .map_err(|_| Error::Crypto("key constant is not valid base64"))?;
            Buf::Bytes(block::decrypt(buf.bytes(), &key)?)
        }
        Stage::Inflate => Buf::Text(deflate::inflate(buf.bytes())?),
        Stage::Base64 => Buf::Bytes(base64::decode(buf.text()?.trim())?),
        Stage::Unpack => {
            let call = packer::find_packed(buf.text()?)?;
            Buf::Text(packer::unpack(&call)?)
        }
        Stage::AlphabetMap { mapping, reference } => {
            Buf::Text(alphabet::remap(buf.text()?, mapping, reference)?)
        }
        Stage::SkipPrefix(n) => Buf::Text(buf.text()?.chars().skip(*n).collect()),
        Stage::Reverse => Buf::Text(buf.text()?.chars().rev().collect()),
        Stage::StripIdSuffix => {
            let id = ctx.require_int("chapter_id")?;
            let suffix = format!("{:x}", id);
            let text = buf.into_text()?;
            // the id's hex form could equally occur inside the payload;
            // only a literal suffix is removed
            Buf::Text(match text.strip_suffix(&suffix) {
                Some(stripped) => stripped.into(),
                None => text
            })
        }
    })
}

fn materialize(materialize: &Materialize, buf: Buf, origin: &str) -> Result<Vec<String>, Error> {
    match materialize {
        Materialize::Split { delimiter, decoy } => {
            let text = buf.into_text()?;
            Ok(urls::split_urls(&text, *delimiter, *decoy, origin))
        }
        Materialize::ImageList { suffix } => {
            let doc: urls::ChapterImages = match serde_json::from_slice(buf.bytes()) {
                Ok(doc) => doc,
                Err(e) => decode!("image list payload: {}", e)
            };
            Ok(doc.images_link.into_iter()
                .map(|url| {
                    let url = urls::absolutize(origin, &url);
                    match suffix {
                        Some(suffix) => url + suffix,
                        None => url
                    }
                })
                .collect())
        }
        Materialize::Template => {
            let payload: urls::UrlPayload = match serde_json::from_slice(buf.bytes()) {
                Ok(payload) => payload,
                Err(e) => decode!("url template payload: {}", e)
            };
            Ok(payload.image_urls().into_iter().map(|(_, url)| url).collect())
        }
    }
}
