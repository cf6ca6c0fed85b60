// error.rs — 全景图加载错误

use thiserror::Error;

/// Errors that can occur while fetching or decoding a panorama.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered with HTTP {status}")]
    HttpStatus { url: String, status: u16 },
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("not a usable local file URL: {0}")]
    BadFileUrl(String),
    #[error("unsupported panorama source scheme: {0}")]
    UnsupportedScheme(String),
    #[error("panorama source is empty")]
    Empty,
    #[error("loader stopped before reporting a result")]
    WorkerGone,
}
