//! Property-based tests for site-list resolution
//!
//! These tests use proptest to verify:
//! 1. Arbitrary input never panics and always obeys the error/rules invariant
//! 2. Generated V1 documents yield exactly the entries the marker rules allow
//! 3. Generated V2 documents yield one entry per site with a url

use proptest::prelude::*;
use sitelist::parse_str;

#[derive(Clone, Debug)]
struct Node {
    text: String,
    exclude: Option<bool>,
    do_not_transition: Option<bool>,
}

fn domain_text() -> impl Strategy<Value = String> {
    "[a-z]{1,8}\\.(com|net|org)"
}

fn path_text() -> impl Strategy<Value = String> {
    "/[a-z0-9_]{1,8}"
}

fn node(text: impl Strategy<Value = String>) -> impl Strategy<Value = Node> {
    (text, any::<Option<bool>>(), any::<Option<bool>>()).prop_map(
        |(text, exclude, do_not_transition)| Node {
            text,
            exclude,
            do_not_transition,
        },
    )
}

fn attrs(node: &Node) -> String {
    let mut out = String::new();
    if let Some(exclude) = node.exclude {
        out.push_str(&format!(" exclude=\"{exclude}\""));
    }
    if let Some(dnt) = node.do_not_transition {
        out.push_str(&format!(" doNotTransition=\"{dnt}\""));
    }
    out
}

fn expected(node: &Node, pattern: String) -> Option<String> {
    if node.exclude == Some(true) {
        None
    } else if node.do_not_transition == Some(true) {
        Some(format!("!{pattern}"))
    } else {
        Some(pattern)
    }
}

proptest! {
    #[test]
    fn arbitrary_text_never_panics(input in ".{0,256}") {
        let parsed = parse_str(&input);
        if parsed.error.is_some() {
            prop_assert!(parsed.rules.is_empty());
        }
    }

    #[test]
    fn tag_soup_never_panics(
        parts in prop::collection::vec(
            prop::sample::select(vec![
                "<rules>", "</rules>", "<site-list>", "</site-list>", "<emie>", "</emie>",
                "<docMode>", "</docMode>", "<domain>", "</domain>", "<path>", "</path>",
                "<site url=\"a.com\">", "</site>", "<open-in>", "</open-in>", "<!--", "-->",
                "a.com", "/p", " ", "&amp;", "&", "<", ">",
            ]),
            0..48,
        )
    ) {
        let input = parts.concat();
        let first = parse_str(&input);
        let second = parse_str(&input);
        prop_assert_eq!(&first, &second);
        if first.error.is_some() {
            prop_assert!(first.rules.is_empty());
        }
    }

    #[test]
    fn v1_entries_follow_marker_rules(
        domains in prop::collection::vec(
            (node(domain_text()), prop::collection::vec(node(path_text()), 0..4)),
            0..6,
        ),
        doc_mode in any::<bool>(),
    ) {
        let section = if doc_mode { "docMode" } else { "emie" };
        let mut xml = format!("<rules version=\"1\"><{section}>");
        let mut want = Vec::new();
        for (domain, paths) in &domains {
            xml.push_str(&format!("<domain{}>\n {} \t", attrs(domain), domain.text));
            want.extend(expected(domain, domain.text.clone()));
            for path in paths {
                xml.push_str(&format!("<path{}>{}</path>", attrs(path), path.text));
                want.extend(expected(path, format!("{}{}", domain.text, path.text)));
            }
            xml.push_str("</domain>");
        }
        xml.push_str(&format!("</{section}></rules>"));

        let parsed = parse_str(&xml);
        prop_assert_eq!(&parsed.error, &None);
        prop_assert_eq!(parsed.rule_strings(), want);
    }

    #[test]
    fn v2_one_entry_per_site(
        sites in prop::collection::vec(
            (prop::option::of(domain_text()), prop::option::of(prop::sample::select(vec![
                "None", "none", "NONE", "MSEdge", "IE11",
            ]))),
            0..8,
        )
    ) {
        let mut xml = String::from("<site-list version=\"2\">");
        let mut want = Vec::new();
        for (url, target) in &sites {
            match url {
                Some(url) => xml.push_str(&format!("<site url=\"{url}\">")),
                None => xml.push_str("<site>"),
            }
            if let Some(target) = target {
                xml.push_str(&format!("<open-in>{target}</open-in>"));
            }
            xml.push_str("</site>");

            if let Some(url) = url {
                let stay = target.map_or(true, |t| t.eq_ignore_ascii_case("none"));
                want.push(if stay { format!("!{url}") } else { url.clone() });
            }
        }
        xml.push_str("</site-list>");

        let parsed = parse_str(&xml);
        prop_assert_eq!(&parsed.error, &None);
        prop_assert_eq!(parsed.rule_strings(), want);
    }
}
