use std::{
    fmt,
    path::{Path, PathBuf},
};

use crate::error::{BoardError, BoardResult};

pub const DEFAULT_SOURCE: &str = "blockchain_registry/outputs/anchors.json";

/// Where `anchors.json` is read from. Every read goes to the origin; nothing is cached.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnchorSource {
    File(PathBuf),
    Http(String),
}

impl AnchorSource {
    /// `http://` / `https://` locations are fetched, anything else is a path.
    /// Relative paths resolve against `base_dir`.
    pub fn parse(location: &str, base_dir: &Path) -> Self {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            return Self::Http(trimmed.to_string());
        }
        let path = Path::new(trimmed);
        if path.is_absolute() {
            Self::File(path.to_path_buf())
        } else {
            Self::File(base_dir.join(path))
        }
    }

    /// Short name for user-facing messages, e.g. `anchors.json`.
    pub fn label(&self) -> String {
        let name = match self {
            Self::File(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned()),
            Self::Http(url) => {
                let path = url.split(['?', '#']).next().unwrap_or(url);
                path.rsplit('/')
                    .next()
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            }
        };
        name.unwrap_or_else(|| "anchors.json".to_string())
    }

    #[tracing::instrument(skip(self), fields(source = %self))]
    pub async fn read(&self) -> BoardResult<Vec<u8>> {
        let bytes = match self {
            Self::File(path) => tokio::fs::read(path)
                .await
                .map_err(|e| BoardError::io(format!("read '{}': {e}", path.display())))?,
            Self::Http(url) => read_http(url).await?,
        };
        tracing::debug!(len = bytes.len(), "anchors resource read");
        Ok(bytes)
    }
}

impl fmt::Display for AnchorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Http(url) => f.write_str(url),
        }
    }
}

#[cfg(feature = "http")]
async fn read_http(url: &str) -> BoardResult<Vec<u8>> {
    use reqwest::header::{CACHE_CONTROL, PRAGMA};

    let client = reqwest::Client::builder()
        .build()
        .map_err(|e| BoardError::http(format!("build client: {e}")))?;
    let resp = client
        .get(url)
        .header(CACHE_CONTROL, "no-cache")
        .header(PRAGMA, "no-cache")
        .send()
        .await
        .map_err(|e| BoardError::http(format!("GET {url}: {e}")))?;

    let status = resp.status();
    if !status.is_success() {
        return Err(BoardError::http(format!("GET {url} returned {status}")));
    }
    let body = resp
        .bytes()
        .await
        .map_err(|e| BoardError::http(format!("read body of {url}: {e}")))?;
    Ok(body.to_vec())
}

#[cfg(not(feature = "http"))]
async fn read_http(url: &str) -> BoardResult<Vec<u8>> {
    Err(BoardError::http(format!(
        "cannot fetch {url}: built without the `http` feature"
    )))
}
