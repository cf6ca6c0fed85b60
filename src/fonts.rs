// fonts.rs — 为 egui 寻找能显示中日文等界面语言的字体
//
// egui's built-in fonts only cover Latin. We look for a system or bundled
// font with wider coverage and put it in front of both families. ab_glyph is
// used to reject files egui would fail to parse (some .ttc collections).

use std::path::{Path, PathBuf};

fn system_candidates() -> Vec<PathBuf> {
    let mut out = Vec::new();

    if cfg!(windows) {
        let dir = PathBuf::from(r"C:\Windows\Fonts");
        for f in ["msyh.ttf", "simhei.ttf", "Deng.ttf", "meiryo.ttf", "malgun.ttf"] {
            out.push(dir.join(f));
        }
    } else if cfg!(target_os = "macos") {
        for p in [
            "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
            "/Library/Fonts/Arial Unicode.ttf",
            "/System/Library/Fonts/Hiragino Sans GB.ttc",
            "/System/Library/Fonts/PingFang.ttc",
        ] {
            out.push(PathBuf::from(p));
        }
    } else {
        for p in [
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
            "/usr/share/fonts/truetype/noto/NotoSansSC-Regular.ttf",
            "/usr/share/fonts/truetype/droid/DroidSansFallbackFull.ttf",
            "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
        ] {
            out.push(PathBuf::from(p));
        }
        if let Ok(home) = std::env::var("HOME") {
            let home = PathBuf::from(home);
            out.push(home.join(".local/share/fonts/NotoSansCJK-Regular.ttc"));
            out.push(home.join(".fonts/NotoSansCJK-Regular.ttc"));
        }
    }
    out
}

fn bundled_candidates() -> Vec<PathBuf> {
    const FILES: [&str; 3] = ["NotoSansSC-Regular.ttf", "NotoSansJP-Regular.ttf", "NotoSans-Regular.ttf"];

    let mut dirs = Vec::new();
    if let Some(dir) = std::env::current_exe().ok().and_then(|e| e.parent().map(|d| d.join("assets"))) {
        dirs.push(dir);
    }
    dirs.push(PathBuf::from("assets"));

    dirs.iter()
        .flat_map(|d| FILES.iter().map(move |f| d.join("fonts").join(f)))
        .collect()
}

fn load_usable(path: &Path) -> Option<Vec<u8>> {
    let bytes = std::fs::read(path).ok()?;
    ab_glyph::FontRef::try_from_slice(&bytes).ok()?;
    Some(bytes)
}

pub fn install_ui_fonts(ctx: &egui::Context) {
    let chosen = bundled_candidates()
        .into_iter()
        .chain(system_candidates())
        .find_map(|p| load_usable(&p).map(|bytes| (p, bytes)));

    let Some((path, bytes)) = chosen else {
        log::warn!("no wide-coverage UI font found; non-Latin labels may not render");
        return;
    };
    log::info!("using UI font {}", path.display());

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert("ui".to_owned(), egui::FontData::from_owned(bytes));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        if let Some(list) = fonts.families.get_mut(&family) {
            list.insert(0, "ui".to_owned());
        }
    }
    ctx.set_fonts(fonts);
}
