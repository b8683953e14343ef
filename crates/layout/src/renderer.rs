//! Document rendering
//!
//! The tree is flattened into bands: unbreakable horizontal slices such as
//! one line of text, a whole table row, or the padding of a box. Bands are
//! then stacked onto pages, starting a new page whenever the next band does
//! not fit above the footer. Backgrounds are painted per band, so a shaded
//! box that crosses a page break stays shaded on both pages.

use crate::config::PageSetup;
use crate::schema::*;
use crate::{LayoutError, Result};
use pdf_core::{wrap_text, PdfDocument, StandardFont};

/// Helvetica ascender, as a fraction of the font size
const ASCENT: f64 = 0.718;
/// Helvetica descender depth, as a fraction of the font size
const DESCENT: f64 = 0.207;

/// A drawing operation positioned relative to the top of its band
#[derive(Debug, Clone, PartialEq)]
enum DrawOp {
    Text {
        text: String,
        /// Anchor point; meaning depends on `align`
        x: f64,
        baseline: f64,
        font: StandardFont,
        size: f32,
        color: Color,
        align: Align,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    },
    Rule {
        x1: f64,
        x2: f64,
        y: f64,
        width: f64,
        color: Color,
    },
}

impl DrawOp {
    fn shift(&mut self, dy: f64) {
        match self {
            DrawOp::Text { baseline, .. } => *baseline += dy,
            DrawOp::Rect { y, .. } | DrawOp::Rule { y, .. } => *y += dy,
        }
    }
}

/// An unbreakable horizontal slice of content
#[derive(Debug, Clone, PartialEq)]
struct Band {
    height: f64,
    /// Margin space; dropped when it would open a page
    spacer: bool,
    ops: Vec<DrawOp>,
}

impl Band {
    fn spacer(height: f64) -> Self {
        Self {
            height,
            spacer: true,
            ops: Vec::new(),
        }
    }

    fn content(height: f64, ops: Vec<DrawOp>) -> Self {
        Self {
            height,
            spacer: false,
            ops,
        }
    }
}

/// A band and the y (from the page top) it is drawn at
#[derive(Debug)]
struct Placement<'a> {
    top: f64,
    band: &'a Band,
}

/// Renders document trees to PDF bytes
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    setup: PageSetup,
}

impl PdfRenderer {
    /// Create a renderer for the given paper size and margins
    pub fn new(setup: PageSetup) -> Self {
        Self { setup }
    }

    /// Render a document to PDF bytes
    pub fn render(&self, document: &Document) -> Result<Vec<u8>> {
        self.render_counted(document).map(|(bytes, _)| bytes)
    }

    /// Render a document, also returning the number of pages
    pub(crate) fn render_counted(&self, document: &Document) -> Result<(Vec<u8>, usize)> {
        let mut pdf = self.paint(document)?;
        let bytes = pdf.to_bytes()?;
        let pages = pdf.page_count();
        tracing::debug!(pages, bytes = bytes.len(), "rendered document");
        Ok((bytes, pages))
    }

    /// Lay out and draw every page, without serializing
    fn paint(&self, document: &Document) -> Result<PdfDocument> {
        let setup = &self.setup;
        setup.validate()?;

        let footer = document
            .footer
            .as_ref()
            .map(|footer| layout_footer(footer, setup.margin, setup.content_width()));
        let limit = match &footer {
            Some(band) => setup.height - setup.footer_offset - band.height,
            None => setup.content_bottom(),
        };
        if limit <= setup.margin {
            return Err(LayoutError::Render(format!(
                "footer leaves no room for content on a {} x {} page",
                setup.width, setup.height
            )));
        }

        let bands: Vec<Band> = document
            .sections
            .iter()
            .flat_map(|section| layout_node(&section.node, setup.margin, setup.content_width()))
            .collect();

        let pages = paginate(&bands, setup.margin, limit);
        let mut pdf = PdfDocument::new();
        for placements in &pages {
            let page = pdf.add_blank_page(setup.width, setup.height)?;
            for placement in placements {
                draw_ops(&mut pdf, page, placement.top, &placement.band.ops)?;
            }
            if let Some(band) = &footer {
                draw_ops(&mut pdf, page, limit, &band.ops)?;
            }
        }

        Ok(pdf)
    }
}

/// Stack bands onto pages between `top` and `limit`
///
/// Always returns at least one (possibly empty) page. A band taller than a
/// whole page is placed on its own page and allowed to overflow.
fn paginate(bands: &[Band], top: f64, limit: f64) -> Vec<Vec<Placement<'_>>> {
    let mut pages = vec![Vec::new()];
    let mut y = top;

    for band in bands {
        let page_is_empty = pages.last().map_or(true, Vec::is_empty);
        if band.spacer && page_is_empty {
            continue;
        }
        if !page_is_empty && y + band.height > limit {
            pages.push(Vec::new());
            y = top;
            if band.spacer {
                continue;
            }
        }
        if let Some(page) = pages.last_mut() {
            page.push(Placement { top: y, band });
        }
        y += band.height;
    }

    pages
}

fn layout_node(node: &Node, x: f64, width: f64) -> Vec<Band> {
    match node {
        Node::Text(text) => layout_text(text, x, width),
        Node::Box(boxed) => layout_box(boxed, x, width),
        Node::Row(row) => vec![layout_row(row, x, width)],
    }
}

fn layout_text(node: &TextNode, x: f64, width: f64) -> Vec<Band> {
    let style = &node.style;
    let font = StandardFont::for_weight(style.weight == FontWeight::Bold);
    let size = f64::from(style.size);
    let line_height = size * style.line_height;
    // Center the glyph box vertically within the line
    let baseline = line_height / 2.0 + size * (ASCENT - DESCENT) / 2.0;
    let anchor = match style.align {
        Align::Left => x,
        Align::Center => x + width / 2.0,
        Align::Right => x + width,
    };

    let mut bands = Vec::new();
    if style.margin_top > 0.0 {
        bands.push(Band::spacer(style.margin_top));
    }
    for line in wrap_text(&node.text, font, style.size, width) {
        bands.push(Band::content(
            line_height,
            vec![DrawOp::Text {
                text: line,
                x: anchor,
                baseline,
                font,
                size: style.size,
                color: style.color,
                align: style.align,
            }],
        ));
    }
    bands
}

fn layout_box(node: &BoxNode, x: f64, width: f64) -> Vec<Band> {
    let style = &node.style;
    let padding = style.padding;
    let inner_x = x + padding.left;
    let inner_width = (width - padding.left - padding.right).max(0.0);
    let rule = |border: &Border| {
        Band::content(
            border.width,
            vec![DrawOp::Rule {
                x1: x,
                x2: x + width,
                y: border.width / 2.0,
                width: border.width,
                color: border.color,
            }],
        )
    };

    let mut inner = Vec::new();
    if let Some(border) = &style.border_top {
        inner.push(rule(border));
    }
    if padding.top > 0.0 {
        inner.push(Band::content(padding.top, Vec::new()));
    }
    for child in &node.children {
        inner.extend(layout_node(child, inner_x, inner_width));
    }
    if padding.bottom > 0.0 {
        inner.push(Band::content(padding.bottom, Vec::new()));
    }
    if let Some(border) = &style.border_bottom {
        inner.push(rule(border));
    }

    if let Some(color) = style.background {
        for band in &mut inner {
            band.ops.insert(
                0,
                DrawOp::Rect {
                    x,
                    y: 0.0,
                    width,
                    height: band.height,
                    color,
                },
            );
        }
    }

    let mut bands = Vec::with_capacity(inner.len() + 2);
    if style.margin_top > 0.0 {
        bands.push(Band::spacer(style.margin_top));
    }
    bands.extend(inner);
    if style.margin_bottom > 0.0 {
        bands.push(Band::spacer(style.margin_bottom));
    }
    bands
}

/// Resolve cell widths against the row width
fn resolve_widths(row: &RowNode, width: f64) -> Vec<f64> {
    let gaps = row.gap * row.cells.len().saturating_sub(1) as f64;
    let mut fixed = 0.0;
    let mut flex_total = 0.0;
    for cell in &row.cells {
        match cell.width {
            Width::Points(points) => fixed += points,
            Width::Percent(percent) => fixed += width * percent / 100.0,
            Width::Flex(weight) => flex_total += weight,
        }
    }
    let remaining = (width - gaps - fixed).max(0.0);

    row.cells
        .iter()
        .map(|cell| match cell.width {
            Width::Points(points) => points,
            Width::Percent(percent) => width * percent / 100.0,
            Width::Flex(weight) if flex_total > 0.0 => remaining * weight / flex_total,
            Width::Flex(_) => 0.0,
        })
        .collect()
}

fn layout_row(row: &RowNode, x: f64, width: f64) -> Band {
    let widths = resolve_widths(row, width);
    let used = widths.iter().sum::<f64>() + row.gap * widths.len().saturating_sub(1) as f64;
    let mut cell_x = match row.justify {
        Align::Left => x,
        Align::Center => x + (width - used) / 2.0,
        Align::Right => x + width - used,
    };

    let mut ops = Vec::new();
    let mut height: f64 = 0.0;
    for (cell, cell_width) in row.cells.iter().zip(widths) {
        let padding = cell.padding;
        let content_x = cell_x + padding.left;
        let content_width = (cell_width - padding.left - padding.right).max(0.0);

        let mut y = padding.top;
        for child in &cell.content {
            for band in layout_node(child, content_x, content_width) {
                for mut op in band.ops {
                    op.shift(y);
                    ops.push(op);
                }
                y += band.height;
            }
        }
        height = height.max(y + padding.bottom);
        cell_x += cell_width + row.gap;
    }

    Band::content(height, ops)
}

/// The footer as a single band: rule, padding, then the text lines
fn layout_footer(footer: &Footer, x: f64, width: f64) -> Band {
    let mut ops = Vec::new();
    let mut y = 0.0;
    if let Some(rule) = &footer.rule {
        ops.push(DrawOp::Rule {
            x1: x,
            x2: x + width,
            y: rule.width / 2.0,
            width: rule.width,
            color: rule.color,
        });
        y += rule.width;
    }
    y += footer.padding_top;

    let text = TextNode::new(footer.text.clone(), footer.style.clone());
    for band in layout_text(&text, x, width) {
        for mut op in band.ops {
            op.shift(y);
            ops.push(op);
        }
        y += band.height;
    }

    Band::content(y, ops)
}

fn draw_ops(pdf: &mut PdfDocument, page: usize, top: f64, ops: &[DrawOp]) -> Result<()> {
    for op in ops {
        match op {
            DrawOp::Text {
                text,
                x,
                baseline,
                font,
                size,
                color,
                align,
            } => {
                pdf.set_font(*font, *size);
                pdf.set_text_color((*color).into());
                pdf.insert_text(text, page, *x, top + baseline, (*align).into())?;
            }
            DrawOp::Rect {
                x,
                y,
                width,
                height,
                color,
            } => {
                pdf.fill_rect(page, *x, top + y, *width, *height, (*color).into())?;
            }
            DrawOp::Rule {
                x1,
                x2,
                y,
                width,
                color,
            } => {
                pdf.draw_line(page, *x1, top + y, *x2, top + y, *width, (*color).into())?;
            }
        }
    }
    Ok(())
}
