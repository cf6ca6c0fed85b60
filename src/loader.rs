// loader.rs — 全景图加载：主图失败时回退一次到示例图
//
// Loading happens on a worker thread and reports exactly one `LoadOutcome`
// through a channel. The worker never touches viewer state; if the receiving
// session has been dropped the result is discarded.

use crate::error::LoadError;
use image::io::Reader as ImageReader;
use image::RgbaImage;
use std::fs::File;
use std::io::{BufReader, Cursor};
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

pub const DEFAULT_FALLBACK: &str = "assets/panoramas/fallback-panorama.png";

/// Where a panorama comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanoramaSource {
    File(PathBuf),
    Http(String),
}

impl PanoramaSource {
    pub fn parse(source: &str) -> Result<Self, LoadError> {
        let source = source.trim();
        if source.is_empty() {
            return Err(LoadError::Empty);
        }

        // Windows drive letters ("C:\...") have no "://" and stay paths.
        let Some((scheme, _)) = source.split_once("://") else {
            return Ok(Self::File(PathBuf::from(source)));
        };

        if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") {
            Ok(Self::Http(source.to_string()))
        } else if scheme.eq_ignore_ascii_case("file") {
            // Url takes care of percent-escapes and host forms.
            reqwest::Url::parse(source)
                .ok()
                .and_then(|url| url.to_file_path().ok())
                .map(Self::File)
                .ok_or_else(|| LoadError::BadFileUrl(source.to_string()))
        } else {
            Err(LoadError::UnsupportedScheme(scheme.to_string()))
        }
    }
}

/// Fetches and decodes one image. Implemented by the real loader and by test doubles.
pub trait ImageFetcher: Send + Sync {
    fn fetch(&self, source: &str) -> Result<RgbaImage, LoadError>;
}

/// Reads local files and `http(s)` URLs.
#[derive(Debug, Default)]
pub struct DefaultFetcher;

impl ImageFetcher for DefaultFetcher {
    fn fetch(&self, source: &str) -> Result<RgbaImage, LoadError> {
        match PanoramaSource::parse(source)? {
            PanoramaSource::File(path) => {
                let file = File::open(&path).map_err(|e| LoadError::Io {
                    path: path.display().to_string(),
                    source: e,
                })?;
                decode(ImageReader::new(BufReader::new(file)))
            }
            PanoramaSource::Http(url) => {
                let response = reqwest::blocking::get(&url).map_err(|e| LoadError::Http {
                    url: url.clone(),
                    source: e,
                })?;
                let status = response.status();
                if !status.is_success() {
                    return Err(LoadError::HttpStatus {
                        url,
                        status: status.as_u16(),
                    });
                }
                let bytes = response.bytes().map_err(|e| LoadError::Http {
                    url: url.clone(),
                    source: e,
                })?;
                decode(ImageReader::new(Cursor::new(bytes)))
            }
        }
    }
}

fn decode<R: std::io::BufRead + std::io::Seek>(reader: ImageReader<R>) -> Result<RgbaImage, LoadError> {
    let mut reader = reader
        .with_guessed_format()
        .map_err(image::ImageError::IoError)?;
    // 全景图常常超过默认的解码尺寸限制
    reader.no_limits();
    let img = reader.decode()?;
    Ok(img.to_rgba8())
}

/// A decoded panorama together with the source it came from.
#[derive(Debug, Clone)]
pub struct PanoramaImage {
    pub source: String,
    pub pixels: RgbaImage,
}

#[derive(Debug)]
pub enum LoadOutcome {
    Primary(PanoramaImage),
    Fallback { image: PanoramaImage, cause: LoadError },
    Failed { primary: LoadError, fallback: LoadError },
}

/// Tries `primary`, then `fallback` once. No further retries.
pub fn load_with_fallback(fetcher: &dyn ImageFetcher, primary: &str, fallback: &str) -> LoadOutcome {
    log::info!("loading panorama {}", primary);
    let cause = match fetcher.fetch(primary) {
        Ok(pixels) => {
            log::info!("loaded {} ({}x{})", primary, pixels.width(), pixels.height());
            return LoadOutcome::Primary(PanoramaImage {
                source: primary.to_string(),
                pixels,
            });
        }
        Err(e) => e,
    };

    log::warn!("failed to load panorama {}: {}; trying fallback {}", primary, cause, fallback);
    match fetcher.fetch(fallback) {
        Ok(pixels) => LoadOutcome::Fallback {
            image: PanoramaImage {
                source: fallback.to_string(),
                pixels,
            },
            cause,
        },
        Err(e) => {
            log::error!("failed to load fallback panorama {}: {}", fallback, e);
            LoadOutcome::Failed {
                primary: cause,
                fallback: e,
            }
        }
    }
}

/// An in-flight load owned by one viewer session.
pub struct LoadTask {
    rx: Receiver<LoadOutcome>,
    worker: Option<thread::JoinHandle<()>>,
}

impl LoadTask {
    /// Non-blocking. `Err(WorkerGone)` if the worker exited without reporting.
    pub fn try_take(&self) -> Option<Result<LoadOutcome, LoadError>> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(Ok(outcome)),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(LoadError::WorkerGone)),
        }
    }

    /// Gives up the result and hands back the worker so callers can wait for it.
    pub fn abandon(mut self) -> Option<thread::JoinHandle<()>> {
        self.worker.take()
    }
}

pub fn spawn_load(fetcher: Arc<dyn ImageFetcher>, primary: String, fallback: String) -> LoadTask {
    let (tx, rx) = channel();
    let worker = thread::Builder::new()
        .name("panorama-loader".into())
        .spawn(move || {
            let outcome = load_with_fallback(fetcher.as_ref(), &primary, &fallback);
            if tx.send(outcome).is_err() {
                log::debug!("viewer went away before {} finished loading; result dropped", primary);
            }
        });

    match worker {
        Ok(handle) => LoadTask {
            rx,
            worker: Some(handle),
        },
        Err(e) => {
            // rx 的发送端已随闭包一起被丢弃，try_take 会报告 WorkerGone
            log::error!("failed to spawn loader thread: {}", e);
            LoadTask { rx, worker: None }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureOrigin {
    Primary,
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready(TextureOrigin),
    /// Both sources failed; nothing is bound.
    Unavailable,
}

/// Load state plus the user-facing error flag.
#[derive(Debug)]
pub struct LoadTracker {
    phase: LoadPhase,
    error: bool,
}

impl Default for LoadTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl LoadTracker {
    pub fn new() -> Self {
        Self {
            phase: LoadPhase::Loading,
            error: false,
        }
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn has_error(&self) -> bool {
        self.error
    }

    /// The banner's "continue" button. The bound texture is unaffected.
    pub fn dismiss_error(&mut self) {
        self.error = false;
    }

    /// Applies a finished load. Returns the image to bind, if any.
    pub fn resolve(&mut self, outcome: LoadOutcome) -> Option<PanoramaImage> {
        match outcome {
            LoadOutcome::Primary(image) => {
                log::debug!("binding {}", image.source);
                self.phase = LoadPhase::Ready(TextureOrigin::Primary);
                self.error = false;
                Some(image)
            }
            LoadOutcome::Fallback { image, cause } => {
                log::info!("showing {} in place of the requested panorama ({})", image.source, cause);
                self.phase = LoadPhase::Ready(TextureOrigin::Fallback);
                self.error = true;
                Some(image)
            }
            LoadOutcome::Failed { primary, fallback } => {
                log::error!("no panorama available: {}; fallback: {}", primary, fallback);
                self.fail();
                None
            }
        }
    }

    pub fn fail(&mut self) {
        self.phase = LoadPhase::Unavailable;
        self.error = true;
    }
}
