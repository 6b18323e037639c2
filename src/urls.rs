use serde::Deserialize;

/// Resolve an entry to an absolute URL. Root-relative entries get the
/// site origin; `data:` images and anything already absolute pass
/// through unchanged.
pub fn absolutize(origin: &str, url: &str) -> String {
    if url.starts_with("http") || url.starts_with("data:") {
        url.into()
    } else if url.starts_with('/') {
        format!("{}{}", origin, url)
    } else {
        url.into()
    }
}

/// Split a decoded URL list on its separator: trim, drop blank entries
/// and entries bearing the site's decoy marker, absolutize the rest.
pub fn split_urls(text: &str, delimiter: char, decoy: Option<&str>, origin: &str) -> Vec<String> {
    text.split(delimiter)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .filter(|entry| decoy.map_or(true, |marker| !entry.contains(marker)))
        .map(|entry| absolutize(origin, entry))
        .collect()
}

/// Terminal JSON of list-bearing sites.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChapterImages {
    pub images_link: Vec<String>
}

/// Terminal JSON of the packed-script family: image host and chapter
/// path, plus either an explicit file list or a page count with an
/// extension to expand per index.
#[derive(Debug, Deserialize)]
pub struct UrlPayload {
    pub domain: String,
    pub path: String,
    #[serde(default)]
    pub files: Vec<String>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub ext: Option<String>
}

impl UrlPayload {
    pub fn image_urls(&self) -> Vec<(u32, String)> {
        if !self.files.is_empty() {
            self.files.iter()
                .enumerate()
                .map(|(i, file)| (i as u32, format!("https://{}/{}/{}", self.domain, self.path, file)))
                .collect()
        } else if let Some(pages) = self.pages {
            // counted form: files are numbered from 1, two digits wide
            let ext = self.ext.as_deref().unwrap_or("jpg");
            (0..pages)
                .map(|i| (i, format!("https://{}/{}/{:02}.{}", self.domain, self.path, i + 1, ext)))
                .collect()
        } else {
            Vec::new()
        }
    }
}

#[test]
fn test_absolutize() {
    assert_eq!(absolutize("https://a.b", "https://c.d/1.jpg"), "https://c.d/1.jpg");
    assert_eq!(absolutize("https://a.b", "/img/1.jpg"), "https://a.b/img/1.jpg");
    assert_eq!(absolutize("https://a.b", "data:image/png;base64,QQ=="), "data:image/png;base64,QQ==");
}

#[test]
fn test_split_drops_blanks_and_decoys() {
    let urls = split_urls(
        "http://a/1.jpg;/get-image/decoy.jpg;http://a/2.jpg; ;",
        ';',
        Some("get-image"),
        "https://a",
    );
    assert_eq!(urls, ["http://a/1.jpg", "http://a/2.jpg"]);
}

#[test]
fn test_template_explicit_list() {
    let payload: UrlPayload = serde_json::from_str(
        r#"{"domain":"img.example.com","path":"c/12","files":["a.jpg","b.jpg"]}"#
    ).unwrap();
    assert_eq!(payload.image_urls(), [
        (0, "https://img.example.com/c/12/a.jpg".to_string()),
        (1, "https://img.example.com/c/12/b.jpg".to_string()),
    ]);
}

#[test]
fn test_template_counted() {
    let payload: UrlPayload = serde_json::from_str(
        r#"{"domain":"img.example.com","path":"c/12","pages":3,"ext":"webp"}"#
    ).unwrap();
    let urls = payload.image_urls();
    assert_eq!(urls.len(), 3);
    assert_eq!(urls[0], (0, "https://img.example.com/c/12/01.webp".to_string()));
    assert_eq!(urls[2], (2, "https://img.example.com/c/12/03.webp".to_string()));
}
