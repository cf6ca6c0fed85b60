// i18n.rs
//
// Runtime UI strings:
// - Tables live in assets/i18n/<lang>.json or in a single assets/i18n.json
//   ({ "<lang>": { "key": "value" } }), searched next to the executable first,
//   then under the working directory.
// - Lookup order: selected language -> bundled English -> the key itself.
// - tr("key") / tr_with("key", &[("name", ...)]) with {name} placeholders.

use once_cell::sync::{Lazy, OnceCell};
use serde::de::DeserializeOwned;
use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::RwLock,
};

pub const DEFAULT_LANG: &str = "en";

/// (code, native name) pairs offered in the language menu.
pub const LANGUAGES: [(&str, &str); 4] = [
    ("en", "English"),
    ("zh-Hans", "简体中文"),
    ("fr", "Français"),
    ("ja", "日本語"),
];

static BUNDLED: Lazy<Table> = Lazy::new(|| {
    serde_json::from_str(include_str!("../assets/i18n/en.json")).unwrap_or_else(|e| {
        log::error!("bundled English strings are malformed: {}", e);
        HashMap::new()
    })
});

#[derive(Debug, Clone, Default)]
struct Catalog {
    lang: String,
    map: Table,
}

static CATALOG: OnceCell<RwLock<Catalog>> = OnceCell::new();

/// `<exe_dir>/assets/<rel>` if it exists, else `./assets/<rel>`.
fn find_asset(rel: &Path) -> Option<PathBuf> {
    let beside_exe = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("assets").join(rel)));

    beside_exe
        .into_iter()
        .chain(std::iter::once(PathBuf::from("assets").join(rel)))
        .find(|p| p.exists())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Option<T> {
    let text = std::fs::read_to_string(path).ok()?;
    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("ignoring malformed string table {}: {}", path.display(), e);
            None
        }
    }
}

type Table = HashMap<String, String>;

fn load_lang(lang: &str) -> Table {
    let per_lang = find_asset(&Path::new("i18n").join(format!("{}.json", lang)))
        .and_then(|p| read_json::<Table>(&p));
    if let Some(map) = per_lang {
        return map;
    }

    let multi = find_asset(Path::new("i18n.json"))
        .and_then(|p| read_json::<HashMap<String, Table>>(&p))
        .and_then(|mut all| all.remove(lang));
    if let Some(map) = multi {
        return map;
    }

    if lang != DEFAULT_LANG {
        log::warn!("no strings found for language {}, using English", lang);
    }
    Table::new()
}

/// Selects the UI language. Safe to call again to switch at runtime.
pub fn init(lang: impl Into<String>) {
    let lang = lang.into();
    let catalog = Catalog {
        map: load_lang(&lang),
        lang,
    };

    match CATALOG.get() {
        Some(lock) => {
            if let Ok(mut w) = lock.write() {
                *w = catalog;
            }
        }
        None => {
            let _ = CATALOG.set(RwLock::new(catalog));
        }
    }
}

pub fn current_lang() -> String {
    CATALOG
        .get()
        .and_then(|l| l.read().ok().map(|c| c.lang.clone()))
        .unwrap_or_else(|| DEFAULT_LANG.to_string())
}

/// Localized text for `key`; the key itself if no table has it.
pub fn tr(key: &str) -> String {
    let selected = CATALOG
        .get()
        .and_then(|l| l.read().ok())
        .and_then(|c| c.map.get(key).cloned());

    selected
        .or_else(|| BUNDLED.get(key).cloned())
        .unwrap_or_else(|| key.to_string())
}

/// Like [`tr`], substituting `{name}` placeholders. Unknown placeholders are left as-is.
pub fn tr_with(key: &str, args: &[(&str, String)]) -> String {
    substitute(tr(key), args)
}

fn substitute(mut s: String, args: &[(&str, String)]) -> String {
    for (k, v) in args {
        s = s.replace(&format!("{{{}}}", k), v);
    }
    s
}
