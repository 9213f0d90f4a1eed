use crate::layout::Layout;
use crate::section::Section;

/// Lookahead added to the scroll offset so a section counts as active once it
/// clears the fixed header.
pub const PROBE_OFFSET: f64 = 100.0;

pub fn probe(scroll_y: f64) -> f64 {
    scroll_y + PROBE_OFFSET
}

/// First section in registry order whose region contains the probe point.
///
/// Sections without a region are skipped.
pub fn locate<L: Layout + ?Sized>(scroll_y: f64, layout: &L) -> Option<Section> {
    let probe = probe(scroll_y);
    Section::ALL.into_iter().find(|&section| {
        layout
            .region(section)
            .is_some_and(|region| region.contains(probe))
    })
}

/// Recompute `active` for a scroll event. Leaves it untouched when nothing
/// matches; returns whether a section matched.
pub fn track<L: Layout + ?Sized>(scroll_y: f64, layout: &L, active: &mut Section) -> bool {
    match locate(scroll_y, layout) {
        Some(section) => {
            if *active != section {
                tracing::debug!(from = %active, to = %section, scroll_y, "active section changed");
            }
            *active = section;
            true
        }
        None => false,
    }
}
