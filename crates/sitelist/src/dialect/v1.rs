//! Legacy Enterprise Mode (`<rules>`) walker
//!
//! Only `rules > (emie | docMode) > domain > path` is meaningful. Every
//! other element is skipped together with its subtree, so rule-like tags
//! buried inside unknown content never produce entries.

use tracing::trace;

use super::entry::{self, CompatHint, Marker, Section, SiteEntry};
use crate::xml::Element;

pub(crate) fn walk(root: &Element) -> Vec<SiteEntry> {
    let mut rules = Vec::new();

    for child in root.elements() {
        let Some(section) = Section::from_tag(&child.name) else {
            trace!(tag = %child.name, "skipping unknown rules child");
            continue;
        };

        for node in child.elements() {
            if node.name == "domain" {
                walk_domain(node, section, &mut rules);
            } else {
                trace!(tag = %node.name, ?section, "skipping non-domain element");
            }
        }
    }

    rules
}

fn walk_domain(node: &Element, section: Section, rules: &mut Vec<SiteEntry>) {
    let text = node.text();
    let domain = entry::trim_text(&text);
    if domain.is_empty() {
        trace!("skipping domain without text");
        return;
    }

    rules.extend(entry::build(
        domain.to_string(),
        marker(node),
        hint(node, section),
    ));

    // only direct paths; anything below a path is inert
    for path in node.elements_named("path") {
        let text = path.text();
        let path_text = entry::trim_text(&text);
        if path_text.is_empty() {
            trace!(domain = %domain, "skipping path without text");
            continue;
        }

        rules.extend(entry::build(
            join(domain, path_text),
            marker(path),
            hint(path, section),
        ));
    }
}

fn marker(node: &Element) -> Marker {
    Marker::legacy(
        entry::flag(node.attr("exclude")),
        entry::flag(node.attr("doNotTransition")),
    )
}

fn hint(node: &Element, section: Section) -> CompatHint {
    CompatHint::Legacy {
        section,
        doc_mode: node.attr("docMode").map(str::to_string),
        force_compat_view: entry::flag(node.attr("forceCompatView")),
    }
}

fn join(domain: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{domain}{path}")
    } else {
        format!("{domain}/{path}")
    }
}
