// cli.rs — 命令行参数

use crate::loader::DEFAULT_FALLBACK;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "panorama_tour")]
#[command(about = "Interactive 360° viewer for property panoramas")]
pub struct Args {
    /// Equirectangular panorama to open: a file path, file:// or http(s):// URL.
    /// Defaults to the fallback panorama.
    pub panorama: Option<String>,

    /// Panorama shown when the requested one cannot be loaded.
    #[arg(long, env = "PANORAMA_FALLBACK", default_value = DEFAULT_FALLBACK)]
    pub fallback: String,

    /// UI language (en, zh-Hans, fr, ja).
    #[arg(long, env = "PANORAMA_LANG", default_value = crate::i18n::DEFAULT_LANG)]
    pub lang: String,
}

impl Args {
    /// The source to mount first.
    pub fn initial_source(&self) -> &str {
        self.panorama.as_deref().unwrap_or(&self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["panorama_tour"]).unwrap();
        assert_eq!(args.initial_source(), args.fallback);
        assert!(!args.fallback.is_empty());
    }

    #[test]
    fn test_explicit_values() {
        let args = Args::try_parse_from([
            "panorama_tour",
            "https://example.com/living-room.jpg",
            "--fallback",
            "sample.png",
            "--lang",
            "fr",
        ])
        .unwrap();
        assert_eq!(args.initial_source(), "https://example.com/living-room.jpg");
        assert_eq!(args.fallback, "sample.png");
        assert_eq!(args.lang, "fr");
    }
}
