use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

use crate::error::{RegistryError, Result};
use crate::metrics::FetchMetrics;

/// Port for downloading a text resource
pub trait HttpGet {
    fn get_text(&self, url: &str) -> Result<String>;
}

/// Blocking reqwest client. Follows redirects, no retries.
pub struct ReqwestHttp {
    client: reqwest::blocking::Client,
}

impl ReqwestHttp {
    pub fn new() -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl Default for ReqwestHttp {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpGet for ReqwestHttp {
    fn get_text(&self, url: &str) -> Result<String> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(RegistryError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        // Decoded with the charset announced by the server
        Ok(resp.text()?)
    }
}

/// Downloads files into a local cache directory, keyed by base file name
pub struct Fetcher<H: HttpGet = ReqwestHttp> {
    http: H,
    data_dir: PathBuf,
}

impl Fetcher<ReqwestHttp> {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self::with_http(ReqwestHttp::new(), data_dir)
    }
}

impl<H: HttpGet> Fetcher<H> {
    pub fn with_http<P: Into<PathBuf>>(http: H, data_dir: P) -> Self {
        Self {
            http,
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Local path a URL is cached under: its base name without query string
    pub fn cache_path(&self, url: &str) -> Result<PathBuf> {
        let without_query = url.split(['?', '#']).next().unwrap_or(url);
        let file_name = without_query
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty() && !name.contains(':'))
            .ok_or_else(|| RegistryError::Config(format!("URL has no file name: {}", url)))?;
        Ok(self.data_dir.join(file_name))
    }

    /// Return the cached copy of `url`, downloading it when absent or when
    /// `force_refresh` is set. Network and I/O failures propagate.
    #[instrument(skip(self))]
    pub fn fetch(&self, url: &str, force_refresh: bool) -> Result<PathBuf> {
        let path = self.cache_path(url)?;

        if path.exists() && !force_refresh {
            debug!(path = %path.display(), "Using cached file");
            FetchMetrics::record_cache_hit();
            return Ok(path);
        }

        fs::create_dir_all(&self.data_dir)?;

        let start = Instant::now();
        let body = self.http.get_text(url).map_err(|e| {
            warn!("Download failed: {}", e);
            FetchMetrics::record_error();
            e
        })?;
        fs::write(&path, &body)?;

        FetchMetrics::record_download(body.len(), start.elapsed().as_secs_f64());
        info!(path = %path.display(), bytes = body.len(), "Downloaded registry export");
        Ok(path)
    }
}
