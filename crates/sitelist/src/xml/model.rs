//! XML data model

use indexmap::IndexMap;

/// XML document
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    pub root: Element,
}

/// XML element
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Element {
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Content>,
}

/// XML content node
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    Element(Element),
    Text(String),
}

impl Element {
    /// Create an empty element with the given tag name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Look up an attribute by its exact (case-sensitive) name
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Concatenation of this element's direct text runs.
    ///
    /// Text inside child elements is not included.
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|child| match child {
                Content::Text(text) => Some(text.as_str()),
                Content::Element(_) => None,
            })
            .collect()
    }

    /// Direct child elements in document order
    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|child| match child {
            Content::Element(element) => Some(element),
            Content::Text(_) => None,
        })
    }

    /// Direct child elements with the given tag name
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Self> + 'a {
        self.elements().filter(move |element| element.name == name)
    }

    /// First direct child element with the given tag name
    pub fn first_named(&self, name: &str) -> Option<&Self> {
        self.elements().find(|element| element.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain() -> Element {
        let mut path = Element::new("path");
        path.children.push(Content::Text("/inner".to_string()));

        let mut domain = Element::new("domain");
        domain
            .attributes
            .insert("exclude".to_string(), "true".to_string());
        domain.children.push(Content::Text("a.com".to_string()));
        domain.children.push(Content::Element(path));
        domain.children.push(Content::Text(" tail".to_string()));
        domain
    }

    #[test]
    fn test_text_is_direct_only() {
        assert_eq!(domain().text(), "a.com tail");
    }

    #[test]
    fn test_attr_is_case_sensitive() {
        let domain = domain();
        assert_eq!(domain.attr("exclude"), Some("true"));
        assert_eq!(domain.attr("Exclude"), None);
    }

    #[test]
    fn test_child_lookup() {
        let domain = domain();
        assert_eq!(domain.elements().count(), 1);
        assert_eq!(domain.elements_named("path").count(), 1);
        assert!(domain.first_named("path").is_some());
        assert!(domain.first_named("domain").is_none());
    }
}
