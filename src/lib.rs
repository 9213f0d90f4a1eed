mod assets;
mod builtin;
mod cli;
mod fetcher;
mod html;
mod icons;
mod progress;
mod strict;

pub mod content;
pub mod controller;
pub mod layout;
pub mod navigator;
pub mod section;
pub mod theme;
pub mod tracker;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use assets::AssetStore;
use cli::Args;
use content::SiteContent;
use controller::PortfolioController;
use fetcher::Fetcher;
use html::PageState;
use layout::StaticLayout;

pub use cli::{Args as CliArgs, Mode, OfflineMode, ProgressMode};

pub async fn run(args: Args) -> anyhow::Result<()> {
    use std::io::IsTerminal as _;

    let progress_enabled = match args.progress {
        ProgressMode::Always => true,
        ProgressMode::Never => false,
        ProgressMode::Auto => std::io::stderr().is_terminal(),
    };
    let progress = progress::Progress::new(progress_enabled, args.max_concurrency);
    progress.set_stage("loading content");

    let (content, content_dir) = match &args.content {
        Some(path) => {
            let content = SiteContent::load(path)?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            (content, dir)
        }
        None => (SiteContent::builtin(), PathBuf::from(".")),
    };
    tracing::info!(
        projects = content.projects.len(),
        skills = content.skills.len(),
        builtin = args.content.is_none(),
        "content loaded"
    );

    // Layout only exists in the browser; the controller here supplies the
    // initial state the page is rendered with.
    let controller = PortfolioController::new(StaticLayout::new())
        .with_theme(args.theme)
        .with_active(args.active);
    let state = PageState::from(&controller);

    let res = match args.mode {
        Mode::Dir => render_dir(&content, &content_dir, state, &args, progress.clone()).await,
        Mode::Single => render_single(&content, &content_dir, state, &args, progress.clone()).await,
    };
    progress.finish();
    res
}

async fn render_dir(
    content: &SiteContent,
    content_dir: &Path,
    state: PageState,
    args: &Args,
    progress: Arc<progress::Progress>,
) -> anyhow::Result<()> {
    let out_dir = args.out.clone().unwrap_or_else(|| PathBuf::from("out"));
    std::fs::create_dir_all(&out_dir).with_context(|| format!("create {}", out_dir.display()))?;

    let store = match args.offline {
        OfflineMode::Strict => Some(Arc::new(AssetStore::new_dir(
            out_dir.clone(),
            args.assets_dir_name.clone(),
            new_fetcher(args, &progress)?,
            Some(progress.clone()),
        ))),
        OfflineMode::Loose => None,
    };

    progress.set_stage("bundling project images");
    let projects = html::render_projects(content, content_dir, &out_dir, store, &progress).await?;

    progress.set_stage("building html");
    let css_text = builtin::site_css();
    let css_rel = format!("{}/css/site.css", args.assets_dir_name);
    let page = html::build_page(content, &projects, state, "", Some(&css_rel));
    check_page(&page, &css_text, args.offline)?;

    progress.set_stage("writing output");
    write_css_file(&out_dir, &css_rel, &css_text)?;
    let html_path = out_dir.join("index.html");
    std::fs::write(&html_path, page).with_context(|| format!("write {}", html_path.display()))?;
    tracing::info!(path = %html_path.display(), "page written");

    Ok(())
}

async fn render_single(
    content: &SiteContent,
    content_dir: &Path,
    state: PageState,
    args: &Args,
    progress: Arc<progress::Progress>,
) -> anyhow::Result<()> {
    let out_path = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from("index.html"));

    if let Some(parent) = out_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create {}", parent.display()))?;
        }
    }

    let out_dir = out_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));
    let store = match args.offline {
        OfflineMode::Strict => Some(Arc::new(AssetStore::new_single(
            out_dir.clone(),
            new_fetcher(args, &progress)?,
            Some(progress.clone()),
        ))),
        OfflineMode::Loose => None,
    };

    let css_text = builtin::site_css();
    progress.set_stage("bundling project images");
    let projects = html::render_projects(content, content_dir, &out_dir, store, &progress).await?;

    progress.set_stage("building html");
    let page = html::build_page(content, &projects, state, &css_text, None);
    check_page(&page, &css_text, args.offline)?;

    progress.set_stage("writing output");
    std::fs::write(&out_path, page).with_context(|| format!("write {}", out_path.display()))?;
    tracing::info!(path = %out_path.display(), "page written");
    Ok(())
}

fn new_fetcher(args: &Args, progress: &Arc<progress::Progress>) -> anyhow::Result<Fetcher> {
    Fetcher::new(
        &args.user_agent,
        args.max_concurrency,
        Some(progress.clone()),
    )
}

fn check_page(page: &str, css: &str, offline: OfflineMode) -> anyhow::Result<()> {
    strict::assert_page_contract(page)?;
    match offline {
        OfflineMode::Strict => strict::assert_strict_offline(page, css),
        OfflineMode::Loose => Ok(()),
    }
}

fn write_css_file(out_dir: &Path, rel: &str, css: &str) -> anyhow::Result<()> {
    let abs = out_dir.join(rel);
    if let Some(parent) = abs.parent() {
        std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
    }
    std::fs::write(&abs, css).with_context(|| format!("write {}", abs.display()))?;
    Ok(())
}
