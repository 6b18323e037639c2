use scandecode::{hex, profiles, resolve, stream, ChapterContext, Error, Page};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

// base64( zlib( reverse(base64(template json)) + "844" ) ) for chapter 2116
const SCAN_MANGA_PAYLOAD: &str = "eJwVyEEPgiAUAOC/pAyalw4WrT0mtuoAeAPW5sPEmjl6/771Hb99ZS3Gc3wL0qVNsAIN5TV31EqNBSEfst9OUhcgswOKz6/xszp2eJU9b8jhkmC5WVf+V7GQxN1lYdynxjD2LG7FDKvCC3Ljx5qFSdGj4fwH0bApMg==";

#[test]
fn scan_manga_chapter_payload() {
    init();
    let registry = profiles::registry();
    let profile = &registry["scan-manga"];
    let ctx = ChapterContext::new().with("chapter_id", "2116");

    let pages = resolve(profile, SCAN_MANGA_PAYLOAD.into(), &ctx).unwrap();
    assert_eq!(pages, [
        Page { index: 0, url: "https://lel.scan-manga.com/c/844/001.jpg".into() },
        Page { index: 1, url: "https://lel.scan-manga.com/c/844/002.jpg".into() },
        Page { index: 2, url: "https://lel.scan-manga.com/c/844/003.jpg".into() },
    ]);
}

#[test]
fn scan_manga_wrong_chapter_id_fails() {
    init();
    let registry = profiles::registry();
    let profile = &registry["scan-manga"];
    // the wrong id leaves the hex tail in place, so the inner base64 is junk
    let ctx = ChapterContext::new().with("chapter_id", "7");
    assert!(resolve(profile, SCAN_MANGA_PAYLOAD.into(), &ctx).is_err());
}

// seven junk characters, then the alphabet-substituted base64 of
// {"imagesLink":[...]}
const JAPSCAN_ATTRIBUTE: &str = "zz9AbQ7DIjZg4Bsh63uP4L2RnZgRaUfbJtxY7wrkEzKOaZUAJ3nk4mKha1rOd0rgELFO6tZh43FOxlquM0ruMlKPstsR7y7PJzfAJucOI1nhimKPaByAE3Ug7LagEwrAv1rgaW5AiFFkEWruolyuvwyu7LTAiA766f=";

#[test]
fn japscan_data_attribute() {
    init();
    let registry = profiles::registry();
    let pages = resolve(&registry["japscan"], JAPSCAN_ATTRIBUTE.into(), &ChapterContext::new()).unwrap();
    assert_eq!(pages, [
        Page { index: 0, url: "https://cdn.japscan.foo/p/one-piece/1100/01.jpg?o=1".into() },
        Page { index: 1, url: "https://cdn.japscan.foo/p/one-piece/1100/02.jpg?o=1".into() },
    ]);
}

const SCAN_MANGA_SCRIPT: &str = "const idc = 2116;\neval(function(h,u,n,t,e,r){r = \"\"}(\"bcfkbaekbcbkdjkbaekbbjkbbckbackbcekbcbkbbfkdjkgikdjkegkbbbkbcdkbcdkbbjkbcckgfkfekfekbafkbcakbbdkfdkbcckbagkbaekbbhkfckbbgkbaekbbhkbbakbaekfdkbagkbbikbbgkfekbbfkbaikbbfkfekegkggkbhkbcckbbgkbbfkdjkgikdjkegkickgekbajkjbkbcakegkggkbhkbcfkbaekbcbkdjkbcckbbgkbaikdjkgikdjkegkjhkbcgkfikidkbbjkegkggk\",16,\"abcdefghijklmnop\",7,10,22))";

#[test]
fn scan_manga_api_discovery() {
    init();
    let call = profiles::scan_manga_api_call(SCAN_MANGA_SCRIPT).unwrap();
    assert_eq!(call.host, "bqj.scan-manga.com");
    assert_eq!(call.chapter_id, 2116);
    assert_eq!(call.token_a, "Zw3Lp");
    assert_eq!(call.token_b, "K9fTq");
    assert_eq!(call.url(), "https://bqj.scan-manga.com/lel/2116.json");
}

#[test]
fn crunchyscan_encrypted_list() {
    init();
    use aes::cipher::{block_padding::Pkcs7, BlockEncryptMut, KeyIvInit};
    use base64::{engine::general_purpose::STANDARD, Engine};
    type Aes128CbcEnc = cbc::Encryptor<aes::Aes128>;

    let plaintext = "https://img.crunchyscan.fr/1.webp;/api/get-image/decoy.webp;/storage/2.webp;";
    let key = b"EsKgHdRzCvBnMlQw";
    let iv = b"4fb1a2c793e805d6";
    let mut data = iv.to_vec();
    data.extend(
        Aes128CbcEnc::new_from_slices(key, iv).unwrap()
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext.as_bytes())
    );
    let payload = STANDARD.encode(&data);

    let registry = profiles::registry();
    let pages = resolve(&registry["crunchyscan"], payload.as_str().into(), &ChapterContext::new()).unwrap();
    assert_eq!(pages, [
        Page { index: 0, url: "https://img.crunchyscan.fr/1.webp".into() },
        Page { index: 1, url: "https://crunchyscan.fr/storage/2.webp".into() },
    ]);
}

#[test]
fn scan_manga_legacy_keyed_paths() {
    init();
    let plaintext = b"/img/manga/one/001.jpg;/img/manga/one/002.jpg;";
    // encode by running the chain backwards: xor, add the rolling key, hex
    let masked = stream::xor(plaintext, b"fRk2").unwrap();
    let shifted = stream::encipher(&masked, b"Tj8w").unwrap();
    let payload = hex::encode(&shifted);

    let ctx = ChapterContext::new().with("sme", "Tj8w").with("sml", "fRk2");
    let registry = profiles::registry();
    let pages = resolve(&registry["scan-manga-legacy"], payload.as_str().into(), &ctx).unwrap();
    assert_eq!(pages, [
        Page { index: 0, url: "https://m.scan-manga.com/img/manga/one/001.jpg".into() },
        Page { index: 1, url: "https://m.scan-manga.com/img/manga/one/002.jpg".into() },
    ]);
}

#[test]
fn scan_manga_legacy_missing_keys() {
    init();
    let registry = profiles::registry();
    let result = resolve(&registry["scan-manga-legacy"], "48656c".into(), &ChapterContext::new());
    match result {
        Err(Error::Context(_, _, inner)) => assert!(matches!(*inner, Error::Config(_))),
        other => panic!("expected a config error, got {:?}", other),
    }
}
