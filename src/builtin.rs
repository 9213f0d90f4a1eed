use std::fmt::Write as _;

use crate::section::Section;
use crate::theme::ThemeMode;
use crate::tracker::PROBE_OFFSET;

pub const BUILTIN_CSS: &str = include_str!("builtin.css");

const RUNTIME_JS_TEMPLATE: &str = r#"(function () {
  var sections = __SECTIONS__;
  var probeOffset = __PROBE_OFFSET__;
  var root = document.documentElement;
  var toggle = document.getElementById("pf-theme-toggle");
  var links = document.querySelectorAll("[data-section]");

  function highlight(id) {
    for (var i = 0; i < links.length; i++) {
      var on = links[i].getAttribute("data-section") === id;
      links[i].classList.toggle("is-active", on);
      if (on) {
        links[i].setAttribute("aria-current", "true");
      } else {
        links[i].removeAttribute("aria-current");
      }
    }
  }

  function onScroll() {
    var probe = window.scrollY + probeOffset;
    for (var i = 0; i < sections.length; i++) {
      var el = document.getElementById(sections[i]);
      if (!el) continue;
      if (probe >= el.offsetTop && probe < el.offsetTop + el.offsetHeight) {
        highlight(sections[i]);
        return;
      }
    }
  }

  function labelToggle() {
    if (!toggle) return;
    var next = root.getAttribute("data-theme") === "dark" ? "light" : "dark";
    toggle.setAttribute("aria-label", "Switch to " + next + " theme");
    toggle.setAttribute("title", "Switch to " + next + " theme");
  }

  for (var i = 0; i < links.length; i++) {
    links[i].addEventListener("click", function (event) {
      var el = document.getElementById(event.currentTarget.getAttribute("data-section"));
      if (el) el.scrollIntoView({ behavior: "smooth" });
    });
  }

  if (toggle) {
    toggle.addEventListener("click", function () {
      var next = root.getAttribute("data-theme") === "dark" ? "light" : "dark";
      root.setAttribute("data-theme", next);
      labelToggle();
    });
  }

  var form = document.getElementById("pf-contact-form");
  if (form) {
    form.addEventListener("submit", function (event) {
      event.preventDefault();
    });
  }

  window.addEventListener("scroll", onScroll, { passive: true });
  window.addEventListener("pagehide", function () {
    window.removeEventListener("scroll", onScroll);
  });
  labelToggle();
})();"#;

/// Browser half of the page: scroll tracking, smooth navigation, theme toggle.
/// Section order and probe offset come from the Rust definitions.
pub fn runtime_js() -> String {
    let ids: Vec<&str> = Section::ALL.iter().map(|s| s.id()).collect();
    let sections = serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string());
    RUNTIME_JS_TEMPLATE
        .replace("__SECTIONS__", &sections)
        .replace("__PROBE_OFFSET__", &PROBE_OFFSET.to_string())
}

/// Both style sets as custom properties, followed by the static stylesheet.
pub fn site_css() -> String {
    let mut css = String::new();
    for mode in [ThemeMode::Light, ThemeMode::Dark] {
        let _ = writeln!(css, ":root[data-theme=\"{}\"] {{", mode.as_str());
        let _ = writeln!(css, "  color-scheme: {};", mode.as_str());
        for (name, value) in mode.palette().custom_properties() {
            let _ = writeln!(css, "  {name}: {value};");
        }
        css.push_str("}\n");
    }
    css.push_str(BUILTIN_CSS);
    css
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_embeds_registry_and_probe() {
        let js = runtime_js();
        assert!(js.contains(r#"var sections = ["home","about","projects","contact"];"#));
        assert!(js.contains("var probeOffset = 100;"));
        assert!(!js.contains("__"));
    }

    #[test]
    fn highlight_waits_for_the_first_scroll_event() {
        let js = runtime_js();
        assert_eq!(js.matches("onScroll()").count(), 1, "only the definition");
        assert!(js.contains(r#"window.addEventListener("scroll", onScroll, { passive: true });"#));
        assert!(js.trim_end().ends_with("labelToggle();\n})();"));
    }

    #[test]
    fn css_defines_both_themes() {
        let css = site_css();
        assert!(css.contains(":root[data-theme=\"light\"]"));
        assert!(css.contains(":root[data-theme=\"dark\"]"));
        assert!(css.contains("--accent: #2dd4bf;"));
        assert!(css.contains(".pf-header"));
    }
}
