use std::collections::HashMap;

use crate::section::Section;

/// Vertical span of a section in document coordinates, half-open: `[top, top + height)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub top: f64,
    pub height: f64,
}

impl Region {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn contains(&self, y: f64) -> bool {
        y >= self.top && y < self.bottom()
    }
}

/// Current document layout as seen by the tracker and navigator.
///
/// `None` means the section's region is not in the document.
pub trait Layout {
    fn region(&self, section: Section) -> Option<Region>;
}

impl<L: Layout + ?Sized> Layout for &L {
    fn region(&self, section: Section) -> Option<Region> {
        (**self).region(section)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StaticLayout {
    regions: HashMap<Section, Region>,
}

impl StaticLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lay sections out back to back starting at 0, in registry order.
    pub fn stacked(heights: &[(Section, f64)]) -> Self {
        let mut layout = Self::new();
        let mut top = 0.0;
        for &(section, height) in heights {
            layout.insert(section, Region::new(top, height));
            top += height;
        }
        layout
    }

    pub fn with(mut self, section: Section, region: Region) -> Self {
        self.insert(section, region);
        self
    }

    pub fn insert(&mut self, section: Section, region: Region) {
        self.regions.insert(section, region);
    }

    pub fn remove(&mut self, section: Section) -> Option<Region> {
        self.regions.remove(&section)
    }
}

impl Layout for StaticLayout {
    fn region(&self, section: Section) -> Option<Region> {
        self.regions.get(&section).copied()
    }
}
