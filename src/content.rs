use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteContent {
    pub profile: Profile,
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub social: Vec<SocialLink>,
    pub copyright_year: u16,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub initials: String,
    pub tagline: String,
    #[serde(default)]
    pub about: Vec<String>,
    #[serde(default = "default_avatar")]
    pub avatar_emoji: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    /// Image URL; bundled locally in strict offline mode.
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub icon: Icon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Layout,
    Code,
    Smartphone,
    Database,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialLink {
    pub kind: SocialKind,
    pub href: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialKind {
    Github,
    Linkedin,
    Twitter,
    Email,
}

impl SocialKind {
    pub fn label(self) -> &'static str {
        match self {
            SocialKind::Github => "GitHub",
            SocialKind::Linkedin => "LinkedIn",
            SocialKind::Twitter => "Twitter",
            SocialKind::Email => "Email",
        }
    }

    /// External profiles open in a new tab; mail links do not.
    pub fn opens_new_tab(self) -> bool {
        !matches!(self, SocialKind::Email)
    }
}

fn default_avatar() -> String {
    "👨‍💻".to_string()
}

impl SiteContent {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let bytes = std::fs::read(path).with_context(|| format!("read {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
    }

    pub fn builtin() -> Self {
        Self {
            profile: Profile {
                name: "Chaitanya Shekhar Pandey".to_string(),
                initials: "CSP".to_string(),
                tagline: "A Full Stack Developer".to_string(),
                about: vec![
                    "I'm a passionate full stack developer with 5+ years of experience creating web applications that make a difference. I love turning complex problems into simple, beautiful, and intuitive solutions.".to_string(),
                    "When I'm not coding, you can find me exploring new technologies, contributing to open-source projects, or sharing my knowledge through technical writing.".to_string(),
                ],
                avatar_emoji: default_avatar(),
            },
            projects: vec![
                project(
                    "E-Commerce Platform",
                    "A full-stack e-commerce solution with payment integration, product management, and user authentication.",
                    "https://images.unsplash.com/photo-1557821552-17105176677c?w=400&h=300&fit=crop",
                ),
                project(
                    "Task Management App",
                    "Real-time collaborative task manager with drag-and-drop functionality and team collaboration features.",
                    "https://images.unsplash.com/photo-1454165804606-c3d57bc86b40?w=400&h=300&fit=crop",
                ),
                project(
                    "Weather Dashboard",
                    "Interactive weather application with forecasts, maps, and historical data visualization.",
                    "https://images.unsplash.com/photo-1561484930-998b6a7b22e8?w=400&h=300&fit=crop",
                ),
                project(
                    "Social Media Analytics",
                    "Analytics dashboard for tracking social media metrics with real-time data updates and insights.",
                    "https://images.unsplash.com/photo-1460925895917-afdab827c52f?w=400&h=300&fit=crop",
                ),
            ],
            skills: vec![
                skill("HTML5", Icon::Layout),
                skill("CSS3", Icon::Code),
                skill("JavaScript", Icon::Code),
                skill("React", Icon::Smartphone),
                skill("Node.js", Icon::Database),
                skill("MongoDB", Icon::Database),
            ],
            social: vec![
                social(SocialKind::Github, "https://github.com/yourusername"),
                social(SocialKind::Linkedin, "https://linkedin.com/in/yourusername"),
                social(SocialKind::Twitter, "https://twitter.com/yourusername"),
                social(SocialKind::Email, "mailto:your@email.com"),
            ],
            copyright_year: 2025,
        }
    }
}

fn project(title: &str, description: &str, image: &str) -> Project {
    Project {
        title: title.to_string(),
        description: description.to_string(),
        image: image.to_string(),
    }
}

fn skill(name: &str, icon: Icon) -> Skill {
    Skill {
        name: name.to_string(),
        icon,
    }
}

fn social(kind: SocialKind, href: &str) -> SocialLink {
    SocialLink {
        kind,
        href: href.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_content_shape() {
        let content = SiteContent::builtin();
        assert_eq!(content.projects.len(), 4);
        assert_eq!(content.skills.len(), 6);
        assert_eq!(content.skills[3].name, "React");
        assert!(content
            .social
            .iter()
            .any(|s| s.kind == SocialKind::Email && s.href.starts_with("mailto:")));
    }

    #[test]
    fn parses_minimal_content_file() {
        let json = r#"{
  "profile": { "name": "Ada", "initials": "AL", "tagline": "Engineer" },
  "projects": [{ "title": "Engine", "description": "Analytical", "image": "/engine.png" }],
  "skills": [{ "name": "Rust", "icon": "code" }],
  "copyright_year": 1843
}"#;
        let content: SiteContent = serde_json::from_str(json).unwrap();
        assert_eq!(content.profile.avatar_emoji, "👨‍💻");
        assert!(content.profile.about.is_empty());
        assert!(content.social.is_empty());
        assert_eq!(content.skills[0].icon, Icon::Code);
    }

    #[test]
    fn rejects_unknown_icon() {
        let json = r#"{ "name": "Rust", "icon": "crab" }"#;
        assert!(serde_json::from_str::<Skill>(json).is_err());
    }
}
