use crate::layout::Layout;
use crate::section::Section;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollBehavior {
    Smooth,
    Instant,
}

/// Where a navigation request lands: the section and the document offset its
/// top sits at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTarget {
    pub section: Section,
    pub top: f64,
}

/// The host's viewport. Scrolls are fire-and-forget.
pub trait Viewport {
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior);
}

/// Resolve a section id against the current layout. Unknown ids and sections
/// absent from the layout resolve to nothing.
pub fn scroll_target<L: Layout + ?Sized>(id: &str, layout: &L) -> Option<ScrollTarget> {
    let section = Section::from_id(id)?;
    let region = layout.region(section)?;
    Some(ScrollTarget {
        section,
        top: region.top,
    })
}

pub fn navigate<L, V>(id: &str, layout: &L, viewport: &mut V)
where
    L: Layout + ?Sized,
    V: Viewport + ?Sized,
{
    match scroll_target(id, layout) {
        Some(target) => {
            tracing::debug!(section = %target.section, top = target.top, "scrolling to section");
            viewport.scroll_to(target.top, ScrollBehavior::Smooth);
        }
        None => tracing::trace!(id, "navigation target not found"),
    }
}

/// Viewport that records requested scrolls and jumps straight to the target.
#[derive(Debug, Clone, Default)]
pub struct RecordingViewport {
    pub scroll_y: f64,
    pub requests: Vec<(f64, ScrollBehavior)>,
}

impl Viewport for RecordingViewport {
    fn scroll_to(&mut self, top: f64, behavior: ScrollBehavior) {
        self.requests.push((top, behavior));
        self.scroll_y = top;
    }
}
