//! Document tree types
//!
//! A `Document` describes what to print, not where page breaks fall. The
//! tree is serde-serializable so a UI preview can consume the same
//! structure the PDF renderer paints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// RGB color, serialized as a `#RRGGBB` hex string
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Create color from RGB values (0-255)
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
        Some(Self::from_rgb(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Black color
    pub const fn black() -> Self {
        Self::from_rgb(0, 0, 0)
    }

    /// White color
    pub const fn white() -> Self {
        Self::from_rgb(255, 255, 255)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid hex color: {value}"))
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

impl From<Color> for pdf_core::Color {
    fn from(color: Color) -> Self {
        pdf_core::Color::from_rgb(color.r, color.g, color.b)
    }
}

/// Text alignment within the available width
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl From<Align> for pdf_core::Align {
    fn from(align: Align) -> Self {
        match align {
            Align::Left => pdf_core::Align::Left,
            Align::Center => pdf_core::Align::Center,
            Align::Right => pdf_core::Align::Right,
        }
    }
}

/// Font weight
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// How text is drawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextStyle {
    /// Font size in points
    pub size: f32,
    pub weight: FontWeight,
    pub color: Color,
    pub align: Align,
    /// Line height as a multiple of the font size
    pub line_height: f64,
    /// Space above the first line, in points
    pub margin_top: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 12.0,
            weight: FontWeight::Regular,
            color: Color::black(),
            align: Align::Left,
            line_height: 1.2,
            margin_top: 0.0,
        }
    }
}

/// A paragraph of text; wraps to the width it is given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub text: String,
    #[serde(default)]
    pub style: TextStyle,
}

impl TextNode {
    pub fn new(text: impl Into<String>, style: TextStyle) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Space inside a box, in points
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    /// Same padding on every side
    pub const fn all(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Padding above the content only
    pub const fn top(value: f64) -> Self {
        Self {
            top: value,
            right: 0.0,
            bottom: 0.0,
            left: 0.0,
        }
    }

    /// Padding after the content on the right only
    pub const fn right(value: f64) -> Self {
        Self {
            top: 0.0,
            right: value,
            bottom: 0.0,
            left: 0.0,
        }
    }
}

/// A solid horizontal rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub width: f64,
    pub color: Color,
}

impl Border {
    pub const fn new(width: f64, color: Color) -> Self {
        Self { width, color }
    }
}

/// Decoration and spacing of a box
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BoxStyle {
    pub background: Option<Color>,
    pub padding: Padding,
    pub margin_top: f64,
    pub margin_bottom: f64,
    pub border_top: Option<Border>,
    pub border_bottom: Option<Border>,
}

/// Vertical stack of children
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoxNode {
    #[serde(default)]
    pub style: BoxStyle,
    pub children: Vec<Node>,
}

/// Horizontal size of a row cell
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Width {
    /// Fixed width in points
    Points(f64),
    /// Percentage of the row width (0-100)
    Percent(f64),
    /// Share of the space left after fixed, percent, and gap widths
    Flex(f64),
}

/// One cell of a row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub width: Width,
    #[serde(default)]
    pub padding: Padding,
    pub content: Vec<Node>,
}

impl Cell {
    pub fn new(width: Width, content: Vec<Node>) -> Self {
        Self {
            width,
            padding: Padding::default(),
            content,
        }
    }
}

/// Cells laid out side by side; a row never splits across pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowNode {
    pub cells: Vec<Cell>,
    /// Space between neighboring cells
    #[serde(default)]
    pub gap: f64,
    /// Placement of the cells when they do not fill the row
    #[serde(default)]
    pub justify: Align,
}

/// A node of the document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    Text(TextNode),
    Box(BoxNode),
    Row(RowNode),
}

impl Node {
    /// All text in document order
    pub fn texts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Text(text) => out.push(&text.text),
            Node::Box(node) => {
                for child in &node.children {
                    child.collect_texts(out);
                }
            }
            Node::Row(row) => {
                for cell in &row.cells {
                    for child in &cell.content {
                        child.collect_texts(out);
                    }
                }
            }
        }
    }
}

/// Role of a top-level section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SectionKind {
    Title,
    Metadata,
    Billing,
    ItemsTable,
    Totals,
}

/// A top-level block of the document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub kind: SectionKind,
    pub node: Node,
}

/// Text stamped at the bottom of every page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Footer {
    pub text: String,
    #[serde(default)]
    pub style: TextStyle,
    /// Rule drawn above the footer text
    pub rule: Option<Border>,
    /// Space between the rule and the text
    #[serde(default)]
    pub padding_top: f64,
}

/// Renderer-agnostic description of a printed invoice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub sections: Vec<Section>,
    pub footer: Option<Footer>,
}

impl Document {
    /// The first section of the given kind
    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|section| section.kind == kind)
    }

    /// Section kinds in order
    pub fn kinds(&self) -> Vec<SectionKind> {
        self.sections.iter().map(|section| section.kind).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_color_from_hex() {
        assert_eq!(
            Color::from_hex("#6B46C1"),
            Some(Color::from_rgb(0x6B, 0x46, 0xC1))
        );
        assert_eq!(Color::from_hex("f9fafb"), Some(Color::from_rgb(249, 250, 251)));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#GG0000"), None);
    }

    #[test]
    fn test_color_display() {
        assert_eq!(Color::from_rgb(0x6B, 0x46, 0xC1).to_string(), "#6B46C1");
    }

    #[test]
    fn test_color_serde() {
        let json = serde_json::to_string(&Color::white()).unwrap();
        assert_eq!(json, "\"#FFFFFF\"");

        let color: Color = serde_json::from_str("\"#e5e7eb\"").unwrap();
        assert_eq!(color, Color::from_rgb(0xE5, 0xE7, 0xEB));

        assert!(serde_json::from_str::<Color>("\"purple\"").is_err());
    }

    #[test]
    fn test_node_serde_tags() {
        let node = Node::Row(RowNode {
            cells: vec![Cell::new(
                Width::Percent(40.0),
                vec![Node::Text(TextNode::new("Item", TextStyle::default()))],
            )],
            gap: 0.0,
            justify: Align::Left,
        });

        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["type"], "row");
        assert_eq!(json["cells"][0]["width"]["type"], "percent");
        assert_eq!(json["cells"][0]["width"]["value"], 40.0);
        assert_eq!(json["cells"][0]["content"][0]["type"], "text");

        let back: Node = serde_json::from_value(json).unwrap();
        assert_eq!(back, node);
    }

    #[test]
    fn test_texts_in_order() {
        let node = Node::Box(BoxNode {
            style: BoxStyle::default(),
            children: vec![
                Node::Text(TextNode::new("a", TextStyle::default())),
                Node::Row(RowNode {
                    cells: vec![
                        Cell::new(
                            Width::Flex(1.0),
                            vec![Node::Text(TextNode::new("b", TextStyle::default()))],
                        ),
                        Cell::new(
                            Width::Flex(1.0),
                            vec![Node::Text(TextNode::new("c", TextStyle::default()))],
                        ),
                    ],
                    gap: 40.0,
                    justify: Align::Left,
                }),
            ],
        });

        assert_eq!(node.texts(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_document_lookup() {
        let doc = Document {
            sections: vec![
                Section {
                    kind: SectionKind::Title,
                    node: Node::Text(TextNode::new("Acme", TextStyle::default())),
                },
                Section {
                    kind: SectionKind::Totals,
                    node: Node::Box(BoxNode::default()),
                },
            ],
            footer: None,
        };

        assert_eq!(doc.kinds(), vec![SectionKind::Title, SectionKind::Totals]);
        assert!(doc.section(SectionKind::Totals).is_some());
        assert!(doc.section(SectionKind::Billing).is_none());
    }
}
