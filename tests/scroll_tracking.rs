use std::cell::RefCell;
use std::rc::Rc;

use portfolio_render::controller::{PortfolioController, ScrollBus, mount};
use portfolio_render::layout::{Region, StaticLayout};
use portfolio_render::navigator::{RecordingViewport, ScrollBehavior};
use portfolio_render::section::Section;
use portfolio_render::theme::ThemeMode;

fn page() -> StaticLayout {
    StaticLayout::stacked(&[
        (Section::Home, 800.0),
        (Section::About, 800.0),
        (Section::Projects, 1400.0),
        (Section::Contact, 900.0),
    ])
}

#[test]
fn scroll_scenarios() {
    let bus = ScrollBus::new();
    let controller = Rc::new(RefCell::new(PortfolioController::new(page())));
    let _sub = mount(&controller, &bus);

    bus.emit(0.0);
    assert_eq!(controller.borrow().active_section(), Section::Home);

    bus.emit(900.0);
    assert_eq!(controller.borrow().active_section(), Section::About);

    // Past the end of the page nothing matches and the highlight stays put.
    bus.emit(50_000.0);
    assert_eq!(controller.borrow().active_section(), Section::About);
}

#[test]
fn clicking_projects_scrolls_and_highlights() {
    let bus = ScrollBus::new();
    let controller = Rc::new(RefCell::new(PortfolioController::new(page())));
    let _sub = mount(&controller, &bus);

    let mut viewport = RecordingViewport::default();
    controller.borrow().navigate("projects", &mut viewport);
    assert_eq!(viewport.requests, vec![(1600.0, ScrollBehavior::Smooth)]);

    // The browser fires scroll events as the animation lands.
    bus.emit(viewport.scroll_y);
    assert_eq!(controller.borrow().active_section(), Section::Projects);
}

#[test]
fn unknown_nav_target_is_ignored() {
    let controller = PortfolioController::new(page());
    let mut viewport = RecordingViewport::default();
    controller.navigate("resume", &mut viewport);
    assert!(viewport.requests.is_empty());
}

#[test]
fn theme_toggle_is_independent_of_scrolling() {
    let mut c = PortfolioController::new(page());
    assert_eq!(c.toggle_theme(), ThemeMode::Dark);
    c.on_scroll(2000.0);
    assert_eq!(c.theme(), ThemeMode::Dark);
    assert_eq!(c.toggle_theme(), ThemeMode::Light);
}

#[test]
fn gaps_between_sections_keep_previous_highlight() {
    let layout = StaticLayout::new()
        .with(Section::Home, Region::new(0.0, 500.0))
        .with(Section::About, Region::new(700.0, 500.0));
    let mut c = PortfolioController::new(layout);
    c.on_scroll(350.0);
    assert_eq!(c.active_section(), Section::Home);
    c.on_scroll(500.0);
    assert_eq!(c.active_section(), Section::Home);
    c.on_scroll(650.0);
    assert_eq!(c.active_section(), Section::About);
}
