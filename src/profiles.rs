//! The per-site constants: one [`CipherProfile`] per connector, plus the
//! packed-script discovery the Scan-Manga connector needs before it can
//! fetch the encrypted payload. Profiles are built once at startup and
//! never mutated.

use indexmap::IndexMap;
use crate::packer;
use crate::profile::{CipherProfile, KeySource, Materialize, Stage};
use crate::script;
use crate::Error;

// both alphabets are used right-to-left relative to how the pages carry them
const JAPSCAN_MAPPING: &str = "M7HXtiwLKdpIBkEbQ2OaF8Sxmz1yGReU4q5DncgsT6jVA3Pfv0WuJ9YCZNhlor";
const JAPSCAN_REFERENCE: &str = "uGJ657yOSbZRtplgHEYPBwCqaxQIizDWmTLMsAeNocnX0d98rf4Kj1kvh3UFV2";

const CRUNCHY_KEY_B64: &str = "RXNLZ0hkUnpDdkJuTWxRdw==";

const SCAN_MANGA_API_FALLBACK: &str = "bqj.scan-manga.com";

/// All site profiles, in declaration order.
pub fn registry() -> IndexMap<&'static str, CipherProfile> {
    let profiles = vec![scan_manga(), scan_manga_legacy(), japscan(), crunchy_scan()];
    profiles.into_iter().map(|profile| (profile.name, profile)).collect()
}

/// Scan-Manga's chapter API payload: base64 over a deflated blob whose
/// inflated text carries the chapter id in hex as a tail marker, then a
/// reversed base64 of the URL-template JSON.
pub fn scan_manga() -> CipherProfile {
    CipherProfile {
        name: "scan-manga",
        origin: "https://m.scan-manga.com",
        stages: vec![
            Stage::Base64,
            Stage::Inflate,
            Stage::StripIdSuffix,
            Stage::Reverse,
            Stage::Base64,
        ],
        materialize: Materialize::Template
    }
}

/// The older Scan-Manga image-path encoding: a hex string enciphered with
/// the two rolling keys the chapter script carries as `sme` and `sml`.
pub fn scan_manga_legacy() -> CipherProfile {
    CipherProfile {
        name: "scan-manga-legacy",
        origin: "https://m.scan-manga.com",
        stages: vec![
            Stage::Hex,
            Stage::Substitution(KeySource::Param("sme")),
            Stage::Xor(KeySource::Param("sml")),
        ],
        materialize: Materialize::Split { delimiter: ';', decoy: None }
    }
}

/// Japscan hides the image list in an oversized `data-*` attribute: seven
/// junk characters, then an alphabet-substituted base64 of the JSON.
pub fn japscan() -> CipherProfile {
    CipherProfile {
        name: "japscan",
        origin: "https://www.japscan.foo",
        stages: vec![
            Stage::SkipPrefix(7),
            Stage::AlphabetMap {
                mapping: JAPSCAN_MAPPING.chars().rev().collect(),
                reference: JAPSCAN_REFERENCE.chars().rev().collect()
            },
            Stage::Base64,
        ],
        materialize: Materialize::ImageList { suffix: Some("?o=1") }
    }
}

/// CrunchyScan ships the list AES-encrypted under a fixed site key, with
/// proxy decoys mixed into the real entries.
pub fn crunchy_scan() -> CipherProfile {
    CipherProfile {
        name: "crunchyscan",
        origin: "https://crunchyscan.fr",
        stages: vec![
            Stage::Base64,
            Stage::BlockCipher { key_b64: CRUNCHY_KEY_B64 },
        ],
        materialize: Materialize::Split { delimiter: ';', decoy: Some("get-image") }
    }
}

/// What the network collaborator needs to fetch Scan-Manga's encrypted
/// chapter payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanMangaApiCall {
    pub host: String,
    pub chapter_id: i64,
    /// request body field `a`
    pub token_a: String,
    /// request body field `b`
    pub token_b: String
}

impl ScanMangaApiCall {
    pub fn url(&self) -> String {
        format!("https://{}/lel/{}.json", self.host, self.chapter_id)
    }
}

/// Unpack the chapter page's packed script and pull out the API call
/// parameters: the two request tokens and the API host live in the
/// unpacked source, the chapter id next to the call site.
pub fn scan_manga_api_call(packed_script: &str) -> Result<ScanMangaApiCall, Error> {
    let call = t!(packer::find_packed(packed_script));
    let unpacked = t!(packer::unpack(&call));

    let token_b = expect!(script::quoted_var(&unpacked, "sml"), "no sml token in unpacked script");
    let token_a = expect!(script::quoted_var(&unpacked, "sme"), "no sme token in unpacked script");
    let chapter_id = expect!(script::int_var(packed_script, "idc"), "no chapter id in script");

    let host = script::marked_host(&unpacked, ".scan-manga.com")
        .or_else(|| script::marked_host(packed_script, ".scan-manga.com"))
        .unwrap_or(SCAN_MANGA_API_FALLBACK);

    debug!("scan-manga api call: host {}, chapter {}", host, chapter_id);

    Ok(ScanMangaApiCall {
        host: host.into(),
        chapter_id,
        token_a: token_a.into(),
        token_b: token_b.into()
    })
}

#[test]
fn test_registry_is_keyed_by_name() {
    let registry = registry();
    assert_eq!(registry.len(), 4);
    assert!(registry.contains_key("scan-manga"));
    assert!(registry.contains_key("japscan"));
}
