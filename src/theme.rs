use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn flipped(self) -> ThemeMode {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn palette(self) -> &'static Palette {
        match self {
            ThemeMode::Light => &LIGHT,
            ThemeMode::Dark => &DARK,
        }
    }
}

impl fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The page-wide theme toggle. Lives for one page view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Theme {
    mode: ThemeMode,
}

impl Theme {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    pub fn toggle(&mut self) -> ThemeMode {
        self.mode = self.mode.flipped();
        self.mode
    }

    pub fn palette(&self) -> &'static Palette {
        self.mode.palette()
    }
}

/// One of the two style sets. Every field becomes a CSS custom property
/// scoped to `:root[data-theme=...]`.
#[derive(Debug, PartialEq, Eq)]
pub struct Palette {
    pub page_bg: &'static str,
    pub text: &'static str,
    pub muted_text: &'static str,
    pub header_bg: &'static str,
    pub accent: &'static str,
    pub accent_hover: &'static str,
    pub nav_text: &'static str,
    pub hero_bg: &'static str,
    pub alt_section_bg: &'static str,
    pub card_bg: &'static str,
    pub card_hover_bg: &'static str,
    pub avatar_bg: &'static str,
    pub input_bg: &'static str,
    pub input_border: &'static str,
    pub toggle_bg: &'static str,
    pub toggle_hover_bg: &'static str,
}

impl Palette {
    pub fn custom_properties(&self) -> [(&'static str, &'static str); 16] {
        [
            ("--page-bg", self.page_bg),
            ("--text", self.text),
            ("--muted-text", self.muted_text),
            ("--header-bg", self.header_bg),
            ("--accent", self.accent),
            ("--accent-hover", self.accent_hover),
            ("--nav-text", self.nav_text),
            ("--hero-bg", self.hero_bg),
            ("--alt-section-bg", self.alt_section_bg),
            ("--card-bg", self.card_bg),
            ("--card-hover-bg", self.card_hover_bg),
            ("--avatar-bg", self.avatar_bg),
            ("--input-bg", self.input_bg),
            ("--input-border", self.input_border),
            ("--toggle-bg", self.toggle_bg),
            ("--toggle-hover-bg", self.toggle_hover_bg),
        ]
    }
}

pub static LIGHT: Palette = Palette {
    page_bg: "#ffffff",
    text: "#111827",
    muted_text: "#4b5563",
    header_bg: "rgba(255, 255, 255, 0.95)",
    accent: "#2563eb",
    accent_hover: "#1d4ed8",
    nav_text: "#4b5563",
    hero_bg: "linear-gradient(135deg, #eff6ff, #ffffff, #f0fdfa)",
    alt_section_bg: "#f9fafb",
    card_bg: "#ffffff",
    card_hover_bg: "#f3f4f6",
    avatar_bg: "#d1d5db",
    input_bg: "#ffffff",
    input_border: "#d1d5db",
    toggle_bg: "#e5e7eb",
    toggle_hover_bg: "#d1d5db",
};

pub static DARK: Palette = Palette {
    page_bg: "#111827",
    text: "#ffffff",
    muted_text: "#d1d5db",
    header_bg: "rgba(31, 41, 55, 0.95)",
    accent: "#2dd4bf",
    accent_hover: "#0d9488",
    nav_text: "#d1d5db",
    hero_bg: "linear-gradient(135deg, #111827, #1f2937, #111827)",
    alt_section_bg: "#1f2937",
    card_bg: "#1f2937",
    card_hover_bg: "#4b5563",
    avatar_bg: "#374151",
    input_bg: "#374151",
    input_border: "#4b5563",
    toggle_bg: "#374151",
    toggle_hover_bg: "#4b5563",
};
