use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use base64::Engine as _;
use tokio::sync::{Mutex, OnceCell};
use url::Url;

use crate::fetcher::Fetcher;
use crate::progress::Progress;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Remote(Url),
    Local(PathBuf),
    /// Already self-contained (`data:` URI); used verbatim.
    Inline(String),
}

impl AssetSource {
    /// Classify an image reference from the content file. Relative paths are
    /// resolved against `content_dir`.
    pub fn classify(raw: &str, content_dir: &Path) -> anyhow::Result<AssetSource> {
        let r = raw.trim();
        if r.is_empty() {
            anyhow::bail!("empty image reference");
        }
        let lowered = r.to_ascii_lowercase();
        if lowered.starts_with("data:") {
            return Ok(AssetSource::Inline(r.to_string()));
        }
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            return Ok(AssetSource::Remote(
                Url::parse(r).with_context(|| format!("parse image url {}", r))?,
            ));
        }
        if r.starts_with("//") {
            return Ok(AssetSource::Remote(
                Url::parse(&format!("https:{}", r))
                    .with_context(|| format!("parse image url {}", r))?,
            ));
        }
        Ok(AssetSource::Local(content_dir.join(r)))
    }
}

/// Reference to a local file from a page written into `page_dir`. Falls back
/// to a `file:` URL when the two share no root.
pub fn local_link(path: &Path, page_dir: &Path) -> anyhow::Result<String> {
    let target = file_url(path, false)?;
    let base = file_url(page_dir, true)?;
    Ok(base
        .make_relative(&target)
        .unwrap_or_else(|| target.to_string()))
}

fn file_url(path: &Path, is_dir: bool) -> anyhow::Result<Url> {
    let abs = std::fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .with_context(|| format!("resolve {}", path.display()))?;
    let url = if is_dir {
        Url::from_directory_path(&abs)
    } else {
        Url::from_file_path(&abs)
    };
    url.map_err(|()| anyhow::anyhow!("not a file path: {}", abs.display()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    Dir,
    Single,
}

type Entry = Arc<OnceCell<Result<String, String>>>;

/// Makes images available offline: files under `<assets>/img/` in dir mode,
/// `data:` URIs in single mode. Each source is fetched at most once.
pub struct AssetStore {
    mode: OutputMode,
    out_dir: PathBuf,
    assets_dir_name: String,
    fetcher: Fetcher,
    progress: Option<Arc<Progress>>,
    entries: Mutex<HashMap<String, Entry>>,
}

impl AssetStore {
    pub fn new_dir(
        out_dir: PathBuf,
        assets_dir_name: String,
        fetcher: Fetcher,
        progress: Option<Arc<Progress>>,
    ) -> Self {
        Self {
            mode: OutputMode::Dir,
            out_dir,
            assets_dir_name,
            fetcher,
            progress,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn new_single(out_dir: PathBuf, fetcher: Fetcher, progress: Option<Arc<Progress>>) -> Self {
        Self {
            mode: OutputMode::Single,
            out_dir,
            assets_dir_name: "assets".to_string(),
            fetcher,
            progress,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the `src` to put in the page for `source`.
    pub async fn get(&self, source: AssetSource) -> anyhow::Result<String> {
        if let AssetSource::Inline(uri) = &source {
            return Ok(uri.clone());
        }

        let key = source_key(&source);
        let cell = {
            let mut entries = self.entries.lock().await;
            let is_unique = !entries.contains_key(&key);
            if let Some(p) = &self.progress {
                p.asset_request(is_unique);
            }
            entries
                .entry(key)
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        let stored = cell
            .get_or_init(|| async {
                self.fetch_and_store(&source)
                    .await
                    .map_err(|e| format!("{:#}", e))
            })
            .await;

        match stored {
            Ok(v) => Ok(v.clone()),
            Err(e) => Err(anyhow::anyhow!("{e}")),
        }
    }

    async fn fetch_and_store(&self, source: &AssetSource) -> anyhow::Result<String> {
        let (bytes, content_type_hint) = match source {
            AssetSource::Remote(url) => {
                let (bytes, headers) = self.fetcher.get_bytes(url.clone()).await?;
                let ct = headers
                    .get(reqwest::header::CONTENT_TYPE)
                    .and_then(|v| v.to_str().ok())
                    .map(|s| s.to_string());
                (bytes.to_vec(), ct)
            }
            AssetSource::Local(path) => {
                let bytes = tokio::fs::read(path)
                    .await
                    .with_context(|| format!("read local image {}", path.display()))?;
                (bytes, None)
            }
            AssetSource::Inline(uri) => return Ok(uri.clone()),
        };

        let (mime, ext) = sniff_mime_and_ext(&bytes, content_type_hint.as_deref(), source);

        match self.mode {
            OutputMode::Single => {
                let b64 = base64::engine::general_purpose::STANDARD.encode(&bytes);
                Ok(format!("data:{};base64,{}", mime, b64))
            }
            OutputMode::Dir => write_image_file(&self.out_dir, &self.assets_dir_name, &bytes, ext),
        }
    }
}

fn source_key(source: &AssetSource) -> String {
    match source {
        AssetSource::Remote(url) => url.as_str().to_string(),
        AssetSource::Local(path) => format!("file:{}", path.display()),
        AssetSource::Inline(uri) => uri.clone(),
    }
}

fn write_image_file(
    out_dir: &Path,
    assets_dir_name: &str,
    bytes: &[u8],
    ext: &str,
) -> anyhow::Result<String> {
    let hash = blake3::hash(bytes).to_hex().to_string();
    let rel = format!("{}/img/{}.{}", assets_dir_name, hash, ext);
    let abs = out_dir.join(&rel);
    if let Some(parent) = abs.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    if !abs.exists() {
        std::fs::write(&abs, bytes).with_context(|| format!("write {}", abs.display()))?;
    }
    Ok(rel)
}

fn sniff_mime_and_ext(
    bytes: &[u8],
    content_type_hint: Option<&str>,
    source: &AssetSource,
) -> (&'static str, &'static str) {
    if let Some(found) = content_type_hint
        .and_then(|s| s.split(';').next())
        .and_then(|ct| mime_to_ext(ct.trim()))
    {
        return found;
    }

    if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
        return ("image/png", "png");
    }
    if bytes.starts_with(b"\xff\xd8\xff") {
        return ("image/jpeg", "jpg");
    }
    if bytes.starts_with(b"GIF87a") || bytes.starts_with(b"GIF89a") {
        return ("image/gif", "gif");
    }
    if bytes.starts_with(b"RIFF") && bytes.get(8..12) == Some(&b"WEBP"[..]) {
        return ("image/webp", "webp");
    }

    let path_ext = match source {
        AssetSource::Remote(url) => url.path().rsplit('.').next().map(str::to_ascii_lowercase),
        AssetSource::Local(path) => path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase),
        AssetSource::Inline(_) => None,
    };
    match path_ext.as_deref() {
        Some("png") => ("image/png", "png"),
        Some("jpg" | "jpeg") => ("image/jpeg", "jpg"),
        Some("gif") => ("image/gif", "gif"),
        Some("webp") => ("image/webp", "webp"),
        Some("svg") => ("image/svg+xml", "svg"),
        Some("avif") => ("image/avif", "avif"),
        _ => ("application/octet-stream", "bin"),
    }
}

fn mime_to_ext(mime: &str) -> Option<(&'static str, &'static str)> {
    match mime {
        "image/png" => Some(("image/png", "png")),
        "image/jpeg" => Some(("image/jpeg", "jpg")),
        "image/gif" => Some(("image/gif", "gif")),
        "image/webp" => Some(("image/webp", "webp")),
        "image/svg+xml" => Some(("image/svg+xml", "svg")),
        "image/avif" => Some(("image/avif", "avif")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_references() {
        let dir = Path::new("/site");
        assert!(matches!(
            AssetSource::classify("https://images.example.com/a.jpg?w=400", dir).unwrap(),
            AssetSource::Remote(_)
        ));
        assert_eq!(
            AssetSource::classify("img/a.png", dir).unwrap(),
            AssetSource::Local(PathBuf::from("/site/img/a.png"))
        );
        assert!(matches!(
            AssetSource::classify("data:image/png;base64,AAAA", dir).unwrap(),
            AssetSource::Inline(_)
        ));
        assert!(AssetSource::classify("  ", dir).is_err());
    }

    #[test]
    fn local_links_are_relative_to_the_page() {
        let tmp = tempfile::tempdir().unwrap();
        let site = tmp.path().join("site");
        let out = tmp.path().join("out");
        std::fs::create_dir_all(site.join("img")).unwrap();
        std::fs::create_dir_all(&out).unwrap();
        std::fs::write(site.join("img/a b.png"), b"x").unwrap();
        std::fs::write(site.join("logo.png"), b"x").unwrap();

        assert_eq!(
            local_link(&site.join("img/a b.png"), &out).unwrap(),
            "../site/img/a%20b.png"
        );
        assert_eq!(local_link(&site.join("logo.png"), &site).unwrap(), "logo.png");
    }

    #[test]
    fn sniff_prefers_header_then_magic_then_extension() {
        let remote = AssetSource::Remote(Url::parse("https://x.test/photo").unwrap());
        assert_eq!(
            sniff_mime_and_ext(b"anything", Some("image/webp; q=1"), &remote),
            ("image/webp", "webp")
        );
        assert_eq!(
            sniff_mime_and_ext(b"\xff\xd8\xff\xe0", Some("application/octet-stream"), &remote),
            ("image/jpeg", "jpg")
        );
        let local = AssetSource::Local(PathBuf::from("/tmp/logo.svg"));
        assert_eq!(sniff_mime_and_ext(b"<svg/>", None, &local), ("image/svg+xml", "svg"));
        assert_eq!(
            sniff_mime_and_ext(b"??", None, &remote),
            ("application/octet-stream", "bin")
        );
    }
}
