use maud::{Markup, html};

use crate::content::{Icon, SocialKind};

enum Shape {
    Path(&'static str),
    Rect {
        x: u8,
        y: u8,
        w: u8,
        h: u8,
        rx: u8,
    },
    Circle {
        cx: u8,
        cy: u8,
        r: u8,
    },
    Ellipse {
        cx: u8,
        cy: u8,
        rx: u8,
        ry: u8,
    },
}

const LAYOUT: &[Shape] = &[
    Shape::Rect { x: 3, y: 3, w: 18, h: 18, rx: 2 },
    Shape::Path("M3 9h18"),
    Shape::Path("M9 21V9"),
];

const CODE: &[Shape] = &[Shape::Path("m16 18 6-6-6-6"), Shape::Path("m8 6-6 6 6 6")];

const SMARTPHONE: &[Shape] = &[
    Shape::Rect { x: 5, y: 2, w: 14, h: 20, rx: 2 },
    Shape::Path("M12 18h.01"),
];

const DATABASE: &[Shape] = &[
    Shape::Ellipse { cx: 12, cy: 5, rx: 9, ry: 3 },
    Shape::Path("M3 5V19A9 3 0 0 0 21 19V5"),
    Shape::Path("M3 12A9 3 0 0 0 21 12"),
];

const SUN: &[Shape] = &[
    Shape::Circle { cx: 12, cy: 12, r: 4 },
    Shape::Path(
        "M12 2v2M12 20v2m-7.07-14.93 1.41 1.41m11.32 11.32 1.41 1.41M2 12h2m16 0h2M6.34 17.66l-1.41 1.41M19.07 4.93l-1.41 1.41",
    ),
];

const MOON: &[Shape] = &[Shape::Path("M12 3a6 6 0 0 0 9 9 9 9 0 1 1-9-9Z")];

const GITHUB: &[Shape] = &[
    Shape::Path(
        "M15 22v-4a4.8 4.8 0 0 0-1-3.5c3 0 6-2 6-5.5.08-1.25-.27-2.48-1-3.5.28-1.15.28-2.35 0-3.5 0 0-1 0-3 1.5-2.64-.5-5.36-.5-8 0C6 2 5 2 5 2c-.3 1.15-.3 2.35 0 3.5A5.403 5.403 0 0 0 4 9c0 3.5 3 5.5 6 5.5-.39.49-.68 1.05-.85 1.65-.17.6-.22 1.23-.15 1.85v4",
    ),
    Shape::Path("M9 18c-4.51 2-5-2-7-2"),
];

const LINKEDIN: &[Shape] = &[
    Shape::Path("M16 8a6 6 0 0 1 6 6v7h-4v-7a2 2 0 0 0-2-2 2 2 0 0 0-2 2v7h-4v-7a6 6 0 0 1 6-6z"),
    Shape::Rect { x: 2, y: 9, w: 4, h: 12, rx: 0 },
    Shape::Circle { cx: 4, cy: 4, r: 2 },
];

const TWITTER: &[Shape] = &[Shape::Path(
    "M22 4s-.7 2.1-2 3.4c1.6 10-9.4 17.3-18 11.6 2.2.1 4.4-.6 6-2C3 15.5.5 9.6 3 5c2.2 2.6 5.6 4.1 9 4-.9-4.2 4-6.6 7-3.8 1.1 0 3-1.2 3-1.2z",
)];

const MAIL: &[Shape] = &[
    Shape::Rect { x: 2, y: 4, w: 20, h: 16, rx: 2 },
    Shape::Path("m22 7-8.97 5.7a1.94 1.94 0 0 1-2.06 0L2 7"),
];

fn svg(shapes: &[Shape], class: &str) -> Markup {
    html! {
        svg xmlns="http://www.w3.org/2000/svg" class=(class) viewBox="0 0 24 24" fill="none"
            stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round"
            aria-hidden="true" {
            @for shape in shapes {
                @match shape {
                    Shape::Path(d) => { path d=(d) {} }
                    Shape::Rect { x, y, w, h, rx } => {
                        rect x=(x) y=(y) width=(w) height=(h) rx=(rx) {}
                    }
                    Shape::Circle { cx, cy, r } => { circle cx=(cx) cy=(cy) r=(r) {} }
                    Shape::Ellipse { cx, cy, rx, ry } => {
                        ellipse cx=(cx) cy=(cy) rx=(rx) ry=(ry) {}
                    }
                }
            }
        }
    }
}

pub fn skill_icon(icon: Icon) -> Markup {
    let shapes = match icon {
        Icon::Layout => LAYOUT,
        Icon::Code => CODE,
        Icon::Smartphone => SMARTPHONE,
        Icon::Database => DATABASE,
    };
    svg(shapes, "pf-icon")
}

pub fn social_icon(kind: SocialKind) -> Markup {
    let shapes = match kind {
        SocialKind::Github => GITHUB,
        SocialKind::Linkedin => LINKEDIN,
        SocialKind::Twitter => TWITTER,
        SocialKind::Email => MAIL,
    };
    svg(shapes, "pf-icon")
}

/// Both glyphs are emitted; CSS hides the one that does not match `data-theme`.
pub fn theme_toggle_icons() -> Markup {
    html! {
        (svg(SUN, "pf-icon pf-icon-sun"))
        (svg(MOON, "pf-icon pf-icon-moon"))
    }
}
