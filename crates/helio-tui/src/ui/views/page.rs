//! The host page the widgets float over.

use helio_core::accessibility::{Element, Node};
use ratatui::{
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use crate::ui::app::PageStatus;
use crate::ui::layout;
use crate::ui::theme::Palette;

const BLOCK_TAGS: [&str; 16] = [
    "p", "div", "section", "article", "header", "footer", "main", "nav", "li", "ul", "ol", "tr",
    "h1", "h2", "h3", "br",
];
const HEADING_TAGS: [&str; 3] = ["h1", "h2", "h3"];
const INVISIBLE_TAGS: [&str; 5] = ["script", "style", "noscript", "template", "head"];

/// One displayed line of page text
#[derive(Debug, Clone, PartialEq)]
pub struct PageLine {
    pub text: String,
    pub heading: bool,
}

/// Flatten the page into lines, breaking at block elements
pub fn page_lines(root: &Element) -> Vec<PageLine> {
    let mut lines = Vec::new();
    let mut current = String::new();
    collect(root, false, &mut current, &mut lines);
    flush(&mut current, false, &mut lines);
    lines
}

fn flush(current: &mut String, heading: bool, lines: &mut Vec<PageLine>) {
    let text = current.split_whitespace().collect::<Vec<_>>().join(" ");
    if !text.is_empty() {
        lines.push(PageLine { text, heading });
    }
    current.clear();
}

fn collect(element: &Element, heading: bool, current: &mut String, lines: &mut Vec<PageLine>) {
    if INVISIBLE_TAGS.contains(&element.tag.as_str()) || element.get_attr("hidden").is_some() {
        return;
    }
    let is_block = BLOCK_TAGS.contains(&element.tag.as_str());
    let heading = heading || HEADING_TAGS.contains(&element.tag.as_str());
    if is_block {
        flush(current, false, lines);
    }
    for node in &element.children {
        match node {
            Node::Text(text) => {
                current.push_str(text);
                current.push(' ');
            }
            Node::Element(child) => collect(child, heading, current, lines),
        }
    }
    if is_block {
        flush(current, heading, lines);
    }
}

pub fn render_page(
    f: &mut Frame,
    area: Rect,
    page: &Element,
    status: &PageStatus,
    scroll: u16,
    font_scale: f64,
    palette: &Palette,
) {
    let area = layout::with_horizontal_padding(area, layout::CONTENT_PADDING_H);

    let lines: Vec<Line> = match status {
        PageStatus::Loading(source) => vec![Line::from(Span::styled(
            format!("Loading {}...", source),
            palette.muted(),
        ))],
        PageStatus::Failed(_) if page.children.is_empty() => vec![Line::from(Span::styled(
            "The page could not be loaded.",
            palette.muted(),
        ))],
        _ => {
            // Larger text: spread paragraphs apart
            let spacing = font_scale >= 1.2;
            let mut out = Vec::new();
            for line in page_lines(page) {
                let style = if line.heading {
                    palette.title().fg(palette.accent)
                } else if font_scale > 1.0 {
                    palette.text().add_modifier(Modifier::BOLD)
                } else {
                    palette.text()
                };
                out.push(Line::from(Span::styled(line.text, style)));
                if spacing || line.heading {
                    out.push(Line::from(""));
                }
            }
            out
        }
    };

    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_lines_break_at_blocks() {
        let body = Element::from_html(
            "<body><h1>Title</h1><p>One <b>two</b></p><div>three<p>four</p></div>\
             <script>x()</script><p hidden>no</p></body>",
        );
        let lines = page_lines(&body);
        let texts: Vec<_> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["Title", "One two", "three", "four"]);
        assert!(lines[0].heading);
        assert!(!lines[1].heading);
    }

    #[test]
    fn test_empty_page_has_no_lines() {
        assert!(page_lines(&Element::new("body")).is_empty());
    }
}
