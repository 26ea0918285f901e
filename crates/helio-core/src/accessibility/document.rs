//! Minimal document tree for read-aloud.
//!
//! Pages come in as HTML and are reduced to elements, attributes and text;
//! that is all the visible-text walk needs.

use scraper::{ElementRef, Html, Selector};

/// Tags whose direct text is never read aloud
const IGNORED_TAGS: [&str; 7] = [
    "script", "style", "noscript", "svg", "textarea", "input", "button",
];

/// Class that opts a subtree out of read-aloud
const NO_READ_CLASS: &str = "no-read";

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_lowercase(),
            ..Default::default()
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn child(mut self, element: Element) -> Self {
        self.children.push(Node::Element(element));
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.get_attr("class")
            .map(|classes| classes.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Hidden, aria-hidden, or opted out with `no-read`
    fn is_concealed(&self) -> bool {
        self.get_attr("hidden").is_some()
            || self.get_attr("aria-hidden") == Some("true")
            || self.has_class(NO_READ_CLASS)
    }

    /// Parse an HTML page and return its `<body>` (or the root element)
    pub fn from_html(html: &str) -> Self {
        let document = Html::parse_document(html);
        let body = Selector::parse("body")
            .ok()
            .and_then(|selector| document.select(&selector).next());
        convert(body.unwrap_or_else(|| document.root_element()))
    }
}

fn convert(element: ElementRef<'_>) -> Element {
    let value = element.value();
    let children = element
        .children()
        .filter_map(|child| match ElementRef::wrap(child) {
            Some(child_element) => Some(Node::Element(convert(child_element))),
            None => child.value().as_text().map(|t| Node::Text((**t).to_string())),
        })
        .collect();

    Element {
        tag: value.name().to_lowercase(),
        attrs: value
            .attrs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        children,
    }
}

/// Depth-first walk collecting visible text, separated by single spaces.
/// Stops appending once `max_chars` characters have been gathered.
pub fn collect_visible_text(root: &Element, max_chars: usize) -> String {
    let mut out = String::new();
    let mut len = 0usize;
    walk(root, root.is_concealed(), max_chars, &mut out, &mut len);
    out.trim().to_string()
}

fn walk(element: &Element, concealed: bool, max_chars: usize, out: &mut String, len: &mut usize) {
    let ignored_tag = IGNORED_TAGS.contains(&element.tag.as_str());
    for node in &element.children {
        if *len >= max_chars {
            return;
        }
        match node {
            Node::Text(text) => {
                let trimmed = text.trim();
                if trimmed.is_empty() || concealed || ignored_tag {
                    continue;
                }
                out.push_str(trimmed);
                out.push(' ');
                *len += trimmed.chars().count() + 1;
            }
            Node::Element(child) => {
                walk(child, concealed || child.is_concealed(), max_chars, out, len);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_in_document_order() {
        let body = Element::new("body")
            .child(Element::new("h1").text("  Welcome  "))
            .child(Element::new("p").text("First").child(Element::new("b").text("bold")))
            .text("tail");
        assert_eq!(collect_visible_text(&body, 20_000), "Welcome First bold tail");
    }

    #[test]
    fn test_skips_ignored_tags_and_blank_text() {
        let body = Element::new("body")
            .child(Element::new("script").text("var x = 1;"))
            .child(Element::new("button").text("Click"))
            .child(Element::new("p").text("   \n "))
            .child(Element::new("p").text("kept"));
        assert_eq!(collect_visible_text(&body, 20_000), "kept");
    }

    #[test]
    fn test_ignored_tag_only_affects_direct_text() {
        let body = Element::new("body")
            .child(Element::new("button").child(Element::new("span").text("label")));
        assert_eq!(collect_visible_text(&body, 20_000), "label");
    }

    #[test]
    fn test_skips_concealed_subtrees() {
        let body = Element::new("body")
            .child(Element::new("div").attr("hidden", "").child(Element::new("p").text("a")))
            .child(Element::new("div").attr("aria-hidden", "true").text("b"))
            .child(Element::new("div").attr("aria-hidden", "false").text("c"))
            .child(
                Element::new("nav")
                    .attr("class", "menu no-read")
                    .child(Element::new("a").text("d")),
            );
        assert_eq!(collect_visible_text(&body, 20_000), "c");
    }

    #[test]
    fn test_stops_at_max_chars() {
        let body = Element::new("body")
            .child(Element::new("p").text("aaaa"))
            .child(Element::new("p").text("bbbb"))
            .child(Element::new("p").text("cccc"));
        // First chunk brings us to 5, below 6, so one more chunk is taken
        assert_eq!(collect_visible_text(&body, 6), "aaaa bbbb");
        assert_eq!(collect_visible_text(&body, 5), "aaaa");
    }

    #[test]
    fn test_from_html() {
        let html = r#"<html><head><title>ignored</title></head>
            <body>
              <h1>Portal</h1>
              <p class="no-read">secret</p>
              <p>Visible <span hidden>gone</span>text</p>
              <script>alert(1)</script>
            </body></html>"#;
        let body = Element::from_html(html);
        assert_eq!(body.tag, "body");
        assert_eq!(collect_visible_text(&body, 20_000), "Portal Visible text");
    }
}
