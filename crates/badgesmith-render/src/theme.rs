//! Fixed badge color themes.
//!
//! Theme names are matched case-insensitively. Unknown names resolve to [`DEFAULT_THEME`]; this is
//! a lookup with fallback and never an error.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub name: &'static str,
    pub background: &'static str,
    pub text: &'static str,
}

pub const DEFAULT_THEME: Theme = Theme {
    name: "default",
    background: "#4695EB",
    text: "#ffffff",
};

pub static THEMES: [Theme; 4] = [
    DEFAULT_THEME,
    Theme {
        name: "native",
        background: "#2EBAAE",
        text: "#ffffff",
    },
    Theme {
        name: "dark",
        background: "#0D1C2C",
        text: "#e0e0e0",
    },
    Theme {
        name: "ai",
        background: "#9b51e0",
        text: "#fff",
    },
];

/// Lowercases a raw theme name; whitespace is kept, so `" dark "` is unknown. An empty key maps
/// to `default`.
pub fn normalize_theme_key(raw: &str) -> String {
    let key = raw.to_lowercase();
    if key.is_empty() {
        return DEFAULT_THEME.name.to_string();
    }
    key
}

/// Returns the theme registered under `name`, if any.
pub fn lookup_theme(name: &str) -> Option<&'static Theme> {
    let key = normalize_theme_key(name);
    THEMES.iter().find(|t| t.name == key)
}

pub fn resolve_theme(name: &str) -> &'static Theme {
    lookup_theme(name).unwrap_or(&THEMES[0])
}

pub fn theme_names() -> impl Iterator<Item = &'static str> {
    THEMES.iter().map(|t| t.name)
}
