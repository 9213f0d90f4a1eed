use kuchiki::NodeRef;
use kuchiki::traits::TendrilSink as _;

use crate::section::Section;

/// Structural checks every rendered page must pass, independent of offline mode.
pub fn assert_page_contract(html: &str) -> anyhow::Result<()> {
    let doc = kuchiki::parse_html().one(html);

    let headers = count(&doc, "header");
    if headers != 1 {
        anyhow::bail!("page contract failed: expected one <header>, found {}", headers);
    }

    for section in Section::ALL {
        let id = section.id();
        let regions = count(&doc, &format!("#{}", id));
        if regions != 1 {
            anyhow::bail!(
                "page contract failed: expected one element with id {:?}, found {}",
                id,
                regions
            );
        }
        let links = count(&doc, &format!("nav [data-section=\"{}\"]", id));
        if links != 1 {
            anyhow::bail!(
                "page contract failed: expected one nav link for {:?}, found {}",
                id,
                links
            );
        }
    }

    if let Ok(nodes) = doc.select("form[action]") {
        if nodes.count() > 0 {
            anyhow::bail!("page contract failed: contact form must not submit anywhere");
        }
    }

    Ok(())
}

pub fn assert_strict_offline(html: &str, css: &str) -> anyhow::Result<()> {
    assert_css_strict(css)?;
    assert_html_strict(html)?;
    Ok(())
}

fn count(doc: &NodeRef, selector: &str) -> usize {
    doc.select(selector).map(|nodes| nodes.count()).unwrap_or(0)
}

fn assert_css_strict(css: &str) -> anyhow::Result<()> {
    let lowered = css.to_ascii_lowercase();
    for pat in [
        "url(http://",
        "url(https://",
        "url(\"http://",
        "url(\"https://",
        "url('http",
        "url(//",
        "url(\"//",
        "url('//",
        "@import",
    ] {
        if lowered.contains(pat) {
            anyhow::bail!("strict offline check failed: css references non-local url ({})", pat);
        }
    }
    Ok(())
}

fn assert_html_strict(html: &str) -> anyhow::Result<()> {
    let doc = kuchiki::parse_html().one(html);

    for selector in [
        "img[src]",
        "img[srcset]",
        "source[src]",
        "source[srcset]",
        "script[src]",
        "link[href]",
        "iframe[src]",
        "audio[src]",
        "video[src]",
    ] {
        if let Ok(nodes) = doc.select(selector) {
            for node in nodes {
                let attrs = node.attributes.borrow();
                for attr in ["src", "srcset", "href"] {
                    if let Some(v) = attrs.get(attr) {
                        if is_remote_auto_load(v) {
                            anyhow::bail!(
                                "strict offline check failed: <{} {}=\"{}\"> is not local",
                                node.name.local.as_ref(),
                                attr,
                                v
                            );
                        }
                    }
                }
            }
        }
    }

    if let Ok(nodes) = doc.select("style") {
        for node in nodes {
            assert_css_strict(&node.text_contents())?;
        }
    }

    Ok(())
}

fn is_remote_auto_load(v: &str) -> bool {
    let s = v.trim().to_ascii_lowercase();
    s.starts_with("http://") || s.starts_with("https://") || s.starts_with("//")
}
