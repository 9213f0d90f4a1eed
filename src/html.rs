use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::assets::{self, AssetSource, AssetStore};
use crate::builtin;
use crate::content::{Profile, Project, SiteContent, Skill, SocialLink};
use crate::controller::PortfolioController;
use crate::icons;
use crate::layout::Layout;
use crate::progress::Progress;
use crate::section::Section;
use crate::theme::ThemeMode;

pub const THEME_TOGGLE_ID: &str = "pf-theme-toggle";
pub const CONTACT_FORM_ID: &str = "pf-contact-form";

/// The UI state baked into the initial render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageState {
    pub theme: ThemeMode,
    pub active: Section,
}

impl<L: Layout> From<&PortfolioController<L>> for PageState {
    fn from(c: &PortfolioController<L>) -> Self {
        Self {
            theme: c.theme(),
            active: c.active_section(),
        }
    }
}

pub struct RenderedProject<'a> {
    pub project: &'a Project,
    pub image_src: String,
}

/// Resolve each project's image `src`. With a store the images are bundled;
/// without one they are linked from the page written into `page_dir`.
pub async fn render_projects<'a>(
    content: &'a SiteContent,
    content_dir: &Path,
    page_dir: &Path,
    store: Option<Arc<AssetStore>>,
    progress: &Progress,
) -> anyhow::Result<Vec<RenderedProject<'a>>> {
    progress.set_projects_total(content.projects.len());

    let Some(store) = store else {
        let mut rendered = Vec::with_capacity(content.projects.len());
        for project in &content.projects {
            let image_src = linked_image_src(&project.image, content_dir, page_dir)
                .with_context(|| format!("image for project {:?}", project.title))?;
            progress.project_done(&project.title);
            rendered.push(RenderedProject { project, image_src });
        }
        return Ok(rendered);
    };

    let mut tasks = tokio::task::JoinSet::new();
    for (idx, project) in content.projects.iter().enumerate() {
        let source = AssetSource::classify(&project.image, content_dir)
            .with_context(|| format!("image for project {:?}", project.title))?;
        let store = Arc::clone(&store);
        tasks.spawn(async move { (idx, store.get(source).await) });
    }

    let mut srcs = vec![String::new(); content.projects.len()];
    while let Some(joined) = tasks.join_next().await {
        let (idx, res) = joined.context("image task failed")?;
        let title = &content.projects[idx].title;
        srcs[idx] = res.with_context(|| format!("bundle image for project {:?}", title))?;
        progress.project_done(title);
    }

    Ok(content
        .projects
        .iter()
        .zip(srcs)
        .map(|(project, image_src)| RenderedProject { project, image_src })
        .collect())
}

/// Remote and `data:` references are kept as written; local paths are
/// re-rooted at the page.
fn linked_image_src(raw: &str, content_dir: &Path, page_dir: &Path) -> anyhow::Result<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(String::new());
    }
    match AssetSource::classify(raw, content_dir)? {
        AssetSource::Local(path) => {
            if !path.is_file() {
                tracing::warn!(path = %path.display(), "local image not found; linking anyway");
            }
            assets::local_link(&path, page_dir)
        }
        AssetSource::Remote(_) | AssetSource::Inline(_) => Ok(raw.to_string()),
    }
}

pub fn build_page(
    content: &SiteContent,
    projects: &[RenderedProject<'_>],
    state: PageState,
    css: &str,
    css_link_href: Option<&str>,
) -> String {
    let profile = &content.profile;
    let title = format!("{} | Portfolio", profile.name);

    let markup: Markup = html! {
        (DOCTYPE)
        html lang="en" data-theme=(state.theme.as_str()) {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="color-scheme" content="light dark";
                title { (title) }
                @if let Some(href) = css_link_href {
                    link rel="stylesheet" href=(href);
                } @else {
                    style { (PreEscaped(css)) }
                }
            }
            body {
                (render_header(profile, state))
                main {
                    (render_hero(profile))
                    (render_about(profile, &content.skills))
                    (render_projects_section(projects))
                    (render_contact())
                }
                (render_footer(profile, &content.social, content.copyright_year))
                script { (PreEscaped(builtin::runtime_js())) }
            }
        }
    };
    markup.into_string()
}

fn render_header(profile: &Profile, state: PageState) -> Markup {
    let next = state.theme.flipped();
    let toggle_label = format!("Switch to {} theme", next);

    html! {
        header class="pf-header" {
            nav class="pf-container pf-nav" {
                div class="pf-brand" {
                    div class="pf-badge" { (profile.initials) }
                    span { (profile.name) }
                }
                div class="pf-links" {
                    @for section in Section::ALL {
                        @let active = section == state.active;
                        button type="button"
                            class=(if active { "pf-link is-active" } else { "pf-link" })
                            data-section=(section.id())
                            aria-current=[active.then_some("true")] {
                            (section.id())
                        }
                    }
                }
                button type="button" id=(THEME_TOGGLE_ID) class="pf-toggle"
                    aria-label=(toggle_label) title=(toggle_label) {
                    (icons::theme_toggle_icons())
                }
            }
        }
    }
}

fn render_hero(profile: &Profile) -> Markup {
    html! {
        section id=(Section::Home.id()) class="pf-hero" {
            div class="pf-container pf-fade-in" {
                h1 class="pf-slide-up" {
                    "Welcome, I'm "
                    span class="pf-accent" { (profile.name) }
                }
                p class="pf-tagline pf-slide-up" { (profile.tagline) }
            }
        }
    }
}

fn render_about(profile: &Profile, skills: &[Skill]) -> Markup {
    html! {
        section id=(Section::About.id()) class="pf-section pf-section-alt" {
            div class="pf-container" {
                h2 { "About Me" }
                div class="pf-about" {
                    div class="pf-avatar" { (profile.avatar_emoji) }
                    div {
                        @for paragraph in &profile.about {
                            p { (paragraph) }
                        }
                        h3 { "Skills" }
                        div class="pf-skills" {
                            @for skill in skills {
                                div class="pf-skill" {
                                    (icons::skill_icon(skill.icon))
                                    span { (skill.name) }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_projects_section(projects: &[RenderedProject<'_>]) -> Markup {
    html! {
        section id=(Section::Projects.id()) class="pf-section" {
            div class="pf-container" {
                h2 { "My Projects" }
                div class="pf-projects" {
                    @for p in projects {
                        article class="pf-card" {
                            @if !p.image_src.is_empty() {
                                img src=(p.image_src) alt=(p.project.title)
                                    width="400" height="300" loading="lazy";
                            }
                            div class="pf-card-body" {
                                h3 { (p.project.title) }
                                p { (p.project.description) }
                                button type="button" class="pf-button" { "View Project" }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn render_contact() -> Markup {
    html! {
        section id=(Section::Contact.id()) class="pf-section pf-section-alt" {
            div class="pf-container" {
                h2 { "Get In Touch" }
                form id=(CONTACT_FORM_ID) class="pf-contact" novalidate {
                    div {
                        label for="pf-contact-name" { "Name" }
                        input id="pf-contact-name" type="text" name="name" placeholder="Your Name";
                    }
                    div {
                        label for="pf-contact-email" { "Email" }
                        input id="pf-contact-email" type="email" name="email"
                            placeholder="your.email@example.com";
                    }
                    div {
                        label for="pf-contact-message" { "Message" }
                        textarea id="pf-contact-message" name="message" rows="5"
                            placeholder="Your message here..." {}
                    }
                    button type="submit" class="pf-button" { "Send Message" }
                }
            }
        }
    }
}

fn render_footer(profile: &Profile, social: &[SocialLink], year: u16) -> Markup {
    html! {
        footer class="pf-footer" {
            div class="pf-container" {
                @if !social.is_empty() {
                    div class="pf-social" {
                        @for link in social {
                            @if link.kind.opens_new_tab() {
                                a href=(link.href) target="_blank" rel="noopener noreferrer"
                                    aria-label=(link.kind.label()) {
                                    (icons::social_icon(link.kind))
                                }
                            } @else {
                                a href=(link.href) aria-label=(link.kind.label()) {
                                    (icons::social_icon(link.kind))
                                }
                            }
                        }
                    }
                }
                p class="pf-copyright" {
                    "© " (year) " " (profile.name) ". All rights reserved."
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(state: PageState) -> String {
        let content = SiteContent::builtin();
        let projects: Vec<_> = content
            .projects
            .iter()
            .map(|project| RenderedProject {
                project,
                image_src: project.image.clone(),
            })
            .collect();
        build_page(&content, &projects, state, "body{}", None)
    }

    #[test]
    fn every_section_rendered_once() {
        let html = page(PageState::default());
        for section in Section::ALL {
            let needle = format!("id=\"{}\"", section.id());
            assert_eq!(html.matches(&needle).count(), 1, "{needle}");
            let nav = format!("data-section=\"{}\"", section.id());
            assert_eq!(html.matches(&nav).count(), 1, "{nav}");
        }
    }

    #[test]
    fn initial_state_is_baked_in() {
        let html = page(PageState {
            theme: ThemeMode::Dark,
            active: Section::Projects,
        });
        assert!(html.contains("data-theme=\"dark\""));
        assert!(html.contains(
            "class=\"pf-link is-active\" data-section=\"projects\" aria-current=\"true\""
        ));
        assert_eq!(html.matches("aria-current=\"true\"").count(), 1);
        assert!(html.contains("aria-label=\"Switch to light theme\""));
    }

    #[test]
    fn hero_names_the_profile_once() {
        let html = page(PageState::default());
        assert!(html.contains(
            "Welcome, I'm <span class=\"pf-accent\">Chaitanya Shekhar Pandey</span>"
        ));
        assert!(!html.contains("John Doe"));
    }

    #[test]
    fn social_links_open_externally_but_mail_does_not() {
        let html = page(PageState::default());
        assert!(html.contains(
            "href=\"https://github.com/yourusername\" target=\"_blank\" rel=\"noopener noreferrer\""
        ));
        assert!(html.contains("<a href=\"mailto:your@email.com\" aria-label=\"Email\">"));
    }

    #[test]
    fn contact_form_has_no_action() {
        let html = page(PageState::default());
        assert!(html.contains("<form id=\"pf-contact-form\" class=\"pf-contact\" novalidate>"));
        assert!(!html.contains("action="));
    }

    #[test]
    fn linked_images_keep_absolute_references() {
        let dir = Path::new("/site");
        let out = Path::new("/site/out");
        for raw in [
            "https://images.example.com/a.jpg?w=400",
            "//cdn.example.com/b.png",
            "data:image/png;base64,AAAA",
        ] {
            assert_eq!(linked_image_src(raw, dir, out).unwrap(), raw);
        }
        assert_eq!(linked_image_src("  ", dir, out).unwrap(), "");
        assert_eq!(linked_image_src("img/a.png", dir, out).unwrap(), "../img/a.png");
    }

    #[test]
    fn text_content_is_escaped() {
        let mut content = SiteContent::builtin();
        content.profile.name = "<b>Ada</b>".to_string();
        let html = build_page(&content, &[], PageState::default(), "", Some("assets/css/site.css"));
        assert!(html.contains("&lt;b&gt;Ada&lt;/b&gt;"));
        assert!(html.contains("<link rel=\"stylesheet\" href=\"assets/css/site.css\">"));
    }
}
