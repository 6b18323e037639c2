//! Decryption cores for a family of manga-site connectors: the codec
//! chains that turn an obfuscated chapter payload back into the ordered
//! list of page-image URLs. Fetching pages and parsing DOM stays with the
//! caller; this crate only ever sees extracted payload strings and the
//! inline parameters found next to them.

#[macro_use] extern crate log;

use nom::{IResult, error::VerboseError};

#[macro_use]
mod error;
pub mod hex;
pub mod stream;
pub mod block;
pub mod deflate;
pub mod base64;
pub mod packer;
pub mod alphabet;
pub mod script;
pub mod profile;
pub mod pipeline;
pub mod urls;
pub mod profiles;

pub use error::Error;
pub use profile::{ChapterContext, CipherProfile, KeySource, Materialize, Stage};
pub use pipeline::{resolve, ObfuscatedPayload};

pub type R<'a, T> = IResult<&'a str, T, VerboseError<&'a str>>;

/// One page of a resolved chapter. Indices are zero-based, dense and
/// ascending; the URL is always absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub index: u32,
    pub url: String
}
