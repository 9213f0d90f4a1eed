use std::fmt;

use serde::{Deserialize, Serialize};

/// A vertically stacked region of the page, addressable by a stable id.
///
/// Declaration order is registry order: top to bottom on the page.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    #[default]
    Home,
    About,
    Projects,
    Contact,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Home,
        Section::About,
        Section::Projects,
        Section::Contact,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Section::Home => "home",
            Section::About => "about",
            Section::Projects => "projects",
            Section::Contact => "contact",
        }
    }

    pub fn from_id(id: &str) -> Option<Section> {
        Section::ALL.into_iter().find(|s| s.id() == id)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_is_top_to_bottom() {
        let ids: Vec<_> = Section::ALL.iter().map(|s| s.id()).collect();
        assert_eq!(ids, ["home", "about", "projects", "contact"]);
    }

    #[test]
    fn lookup_known_and_unknown_ids() {
        assert_eq!(Section::from_id("projects"), Some(Section::Projects));
        assert_eq!(Section::from_id("header"), None);
        assert_eq!(Section::from_id("Home"), None);
    }
}
