//! Site-list (`<site-list>`) walker

use tracing::trace;

use super::entry::{self, CompatHint, Marker, SiteEntry};
use crate::xml::Element;

/// Target assumed when a site has no `open-in` child
pub const DEFAULT_TARGET: &str = "None";

pub(crate) fn walk(root: &Element) -> Vec<SiteEntry> {
    root.elements_named("site").filter_map(site_entry).collect()
}

fn site_entry(site: &Element) -> Option<SiteEntry> {
    let Some(url) = site.attr("url").filter(|url| !url.is_empty()) else {
        trace!("skipping site without url");
        return None;
    };

    let target = site.first_named("open-in").map(Element::text);
    let target = target.as_deref().unwrap_or(DEFAULT_TARGET);
    let compat_mode = site
        .first_named("compat-mode")
        .map(|node| entry::trim_text(&node.text()).to_string());

    entry::build(
        url.to_string(),
        Marker::site_list(target),
        CompatHint::SiteList { compat_mode },
    )
}
