use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::layout::Layout;
use crate::navigator::{self, Viewport};
use crate::section::Section;
use crate::theme::{Theme, ThemeMode};
use crate::tracker;

/// Owns the page's UI state: theme and active section. Handlers receive it
/// explicitly; nothing here is global.
#[derive(Debug, Clone)]
pub struct PortfolioController<L> {
    theme: Theme,
    active: Section,
    layout: L,
}

impl<L: Layout> PortfolioController<L> {
    pub fn new(layout: L) -> Self {
        Self {
            theme: Theme::default(),
            active: Section::default(),
            layout,
        }
    }

    pub fn with_theme(mut self, mode: ThemeMode) -> Self {
        self.theme = Theme::new(mode);
        self
    }

    pub fn with_active(mut self, section: Section) -> Self {
        self.active = section;
        self
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme.mode()
    }

    pub fn toggle_theme(&mut self) -> ThemeMode {
        let mode = self.theme.toggle();
        tracing::debug!(theme = %mode, "theme toggled");
        mode
    }

    pub fn active_section(&self) -> Section {
        self.active
    }

    pub fn is_active(&self, section: Section) -> bool {
        self.active == section
    }

    /// Scroll event handler.
    pub fn on_scroll(&mut self, scroll_y: f64) -> bool {
        tracker::track(scroll_y, &self.layout, &mut self.active)
    }

    /// Nav link click handler.
    pub fn navigate<V: Viewport + ?Sized>(&self, id: &str, viewport: &mut V) {
        navigator::navigate(id, &self.layout, viewport);
    }

    pub fn layout(&self) -> &L {
        &self.layout
    }

    /// Swap in a fresh layout (after a resize, for instance). Active section is
    /// recomputed on the next scroll event, not here.
    pub fn relayout(&mut self, layout: L) {
        self.layout = layout;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub type ScrollHandler = Box<dyn FnMut(f64)>;

/// The host's scroll event source.
pub trait ScrollEvents {
    fn subscribe(&self, handler: ScrollHandler) -> ListenerId;

    /// Returns false when `id` was not registered.
    fn unsubscribe(&self, id: ListenerId) -> bool;
}

/// In-process scroll event source. Cloning shares the listener list.
#[derive(Clone, Default)]
pub struct ScrollBus {
    inner: Rc<RefCell<BusInner>>,
}

#[derive(Default)]
struct BusInner {
    next_id: u64,
    listeners: Vec<(ListenerId, Rc<RefCell<ScrollHandler>>)>,
}

impl ScrollBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver one scroll event to every listener, in subscription order.
    /// A listener that emits from its own callback does not see the nested
    /// event.
    pub fn emit(&self, scroll_y: f64) {
        // Snapshot first so a handler may unsubscribe while being called.
        let handlers: Vec<_> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, h)| Rc::clone(h))
            .collect();
        for handler in handlers {
            match handler.try_borrow_mut() {
                Ok(mut handler) => (&mut *handler)(scroll_y),
                Err(_) => tracing::trace!(scroll_y, "scroll listener busy; nested event skipped"),
            }
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

impl ScrollEvents for ScrollBus {
    fn subscribe(&self, handler: ScrollHandler) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, Rc::new(RefCell::new(handler))));
        id
    }

    fn unsubscribe(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(lid, _)| *lid != id);
        inner.listeners.len() != before
    }
}

/// Registration of a controller's scroll handler. Deregisters on drop.
pub struct ScrollSubscription<'a, E: ScrollEvents + ?Sized> {
    events: &'a E,
    id: Option<ListenerId>,
}

impl<E: ScrollEvents + ?Sized> ScrollSubscription<'_, E> {
    pub fn id(&self) -> Option<ListenerId> {
        self.id
    }

    pub fn unmount(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if let Some(id) = self.id.take() {
            if !self.events.unsubscribe(id) {
                tracing::warn!(?id, "scroll listener was already gone at unmount");
            }
        }
    }
}

impl<E: ScrollEvents + ?Sized> Drop for ScrollSubscription<'_, E> {
    fn drop(&mut self) {
        self.release();
    }
}

/// Register `controller`'s scroll handler with `events` for as long as the
/// returned guard lives. The handler holds a weak reference, so a dropped
/// controller turns later events into no-ops.
pub fn mount<'a, L, E>(
    controller: &Rc<RefCell<PortfolioController<L>>>,
    events: &'a E,
) -> ScrollSubscription<'a, E>
where
    L: Layout + 'static,
    E: ScrollEvents + ?Sized,
{
    let weak: Weak<RefCell<PortfolioController<L>>> = Rc::downgrade(controller);
    let id = events.subscribe(Box::new(move |scroll_y: f64| {
        let Some(controller) = weak.upgrade() else {
            return;
        };
        match controller.try_borrow_mut() {
            Ok(mut c) => {
                c.on_scroll(scroll_y);
            }
            Err(_) => tracing::trace!(scroll_y, "controller busy; scroll event dropped"),
        };
    }));
    tracing::debug!(?id, "scroll listener registered");
    ScrollSubscription {
        events,
        id: Some(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::StaticLayout;
    use crate::navigator::{RecordingViewport, ScrollBehavior};

    fn page() -> StaticLayout {
        StaticLayout::stacked(&[
            (Section::Home, 800.0),
            (Section::About, 800.0),
            (Section::Projects, 1000.0),
            (Section::Contact, 700.0),
        ])
    }

    #[test]
    fn starts_on_home_in_light_mode() {
        let c = PortfolioController::new(page());
        assert_eq!(c.active_section(), Section::Home);
        assert_eq!(c.theme(), ThemeMode::Light);
    }

    #[test]
    fn nav_click_then_scroll_highlights_target() {
        let mut c = PortfolioController::new(page());
        let mut viewport = RecordingViewport::default();
        c.navigate("projects", &mut viewport);
        assert_eq!(viewport.requests, vec![(1600.0, ScrollBehavior::Smooth)]);

        c.on_scroll(viewport.scroll_y);
        assert!(c.is_active(Section::Projects));
    }

    #[test]
    fn toggle_twice_is_identity() {
        let mut c = PortfolioController::new(page()).with_theme(ThemeMode::Dark);
        c.toggle_theme();
        c.toggle_theme();
        assert_eq!(c.theme(), ThemeMode::Dark);
    }

    #[test]
    fn mounted_controller_follows_scroll_until_dropped() {
        let bus = ScrollBus::new();
        let controller = Rc::new(RefCell::new(PortfolioController::new(page())));

        {
            let _sub = mount(&controller, &bus);
            assert_eq!(bus.listener_count(), 1);
            bus.emit(900.0);
            assert_eq!(controller.borrow().active_section(), Section::About);
        }

        assert_eq!(bus.listener_count(), 0);
        bus.emit(2500.0);
        assert_eq!(controller.borrow().active_section(), Section::About);
    }

    #[test]
    fn explicit_unmount_deregisters_once() {
        let bus = ScrollBus::new();
        let controller = Rc::new(RefCell::new(PortfolioController::new(page())));
        let sub = mount(&controller, &bus);
        let id = sub.id().unwrap();
        sub.unmount();
        assert_eq!(bus.listener_count(), 0);
        assert!(!bus.unsubscribe(id));
    }

    #[test]
    fn dropped_controller_makes_events_noops() {
        let bus = ScrollBus::new();
        let controller = Rc::new(RefCell::new(PortfolioController::new(page())));
        let _sub = mount(&controller, &bus);
        drop(controller);
        bus.emit(900.0);
        assert_eq!(bus.listener_count(), 1);
    }

    #[test]
    fn listener_emitting_from_its_callback_does_not_panic() {
        let bus = ScrollBus::new();
        let controller = Rc::new(RefCell::new(PortfolioController::new(page())));
        let _sub = mount(&controller, &bus);

        let calls = Rc::new(RefCell::new(Vec::new()));
        let nested = bus.clone();
        let seen = Rc::clone(&calls);
        bus.subscribe(Box::new(move |y: f64| {
            seen.borrow_mut().push(y);
            nested.emit(y + 800.0);
        }));

        bus.emit(0.0);

        // The controller saw the nested event; the emitting listener did not.
        assert_eq!(controller.borrow().active_section(), Section::About);
        assert_eq!(*calls.borrow(), vec![0.0]);
    }

    #[test]
    fn relayout_changes_later_tracking() {
        let mut c = PortfolioController::new(page());
        c.relayout(StaticLayout::stacked(&[
            (Section::Home, 2000.0),
            (Section::About, 800.0),
        ]));
        c.on_scroll(900.0);
        assert_eq!(c.active_section(), Section::Home);
    }
}
