use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::section::Section;
use crate::theme::ThemeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    Dir,
    Single,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OfflineMode {
    /// Bundle project images locally and reject any remote auto-loading resource.
    Strict,
    /// Leave image references as written.
    Loose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProgressMode {
    /// Enable progress UI when stderr is a TTY.
    Auto,
    /// Always enable progress UI (even when piped).
    Always,
    /// Never show progress UI.
    Never,
}

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Site content JSON file (profile, projects, skills, social links).
    ///
    /// If omitted, the built-in portfolio content is rendered.
    #[arg(long)]
    pub content: Option<PathBuf>,

    /// Output mode: `dir` (index.html + assets/) or `single` (one self-contained HTML).
    #[arg(long, value_enum, default_value = "dir")]
    pub mode: Mode,

    /// Offline mode: `strict` bundles project images, `loose` links them.
    #[arg(long, value_enum, default_value = "strict")]
    pub offline: OfflineMode,

    /// Output path. For `dir` mode: a directory. For `single` mode: an HTML file path.
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Theme the page starts in.
    #[arg(long, value_enum, default_value = "light")]
    pub theme: ThemeMode,

    /// Section whose nav link is highlighted before the first scroll event.
    #[arg(long, value_enum, default_value = "home")]
    pub active: Section,

    /// Assets directory name for `dir` mode.
    #[arg(long, default_value = "assets")]
    pub assets_dir_name: String,

    /// Max concurrent downloads.
    #[arg(long, default_value_t = 8)]
    pub max_concurrency: usize,

    /// HTTP User-Agent used for downloading images.
    #[arg(long, default_value = "portfolio-render/0.1")]
    pub user_agent: String,

    /// Progress display: `auto`, `always`, or `never`.
    #[arg(long, value_enum, default_value = "auto")]
    pub progress: ProgressMode,
}
