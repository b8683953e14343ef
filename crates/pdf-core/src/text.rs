//! Text rendering utilities

use crate::document::Color;
use crate::font::StandardFont;
use crate::{fmt_num, Align};

/// Context for rendering text
pub struct TextRenderContext {
    /// PDF font resource name (e.g., "F1")
    pub font_name: String,
    /// Font size in points
    pub font_size: f32,
    /// Text width in points (for alignment)
    pub text_width: f64,
    /// Text color (RGB)
    pub color: Color,
}

/// Generate PDF operators for text insertion
///
/// Creates the PDF text operators (BT, rg, Tf, Td, Tj, ET) to render text
/// at a specific position with alignment support.
///
/// # Arguments
/// * `text` - WinAnsi-encoded text bytes
/// * `x` - X coordinate in points (PDF coordinates, from left)
/// * `y` - Baseline Y coordinate in points (PDF coordinates, from bottom)
/// * `align` - Text alignment relative to `x`
/// * `ctx` - Text rendering context
///
/// # Returns
/// Vector of bytes containing the PDF operators
pub fn generate_text_operators(
    text: &[u8],
    x: f64,
    y: f64,
    align: Align,
    ctx: &TextRenderContext,
) -> Vec<u8> {
    let x_offset = match align {
        Align::Left => 0.0,
        Align::Center => -ctx.text_width / 2.0,
        Align::Right => -ctx.text_width,
    };

    let mut ops = String::from("BT\n");
    ops.push_str(&format!(
        "{} {} {} rg\n",
        fmt_num(ctx.color.r.into()),
        fmt_num(ctx.color.g.into()),
        fmt_num(ctx.color.b.into())
    ));
    ops.push_str(&format!("/{} {} Tf\n", ctx.font_name, ctx.font_size));
    ops.push_str(&format!("{} {} Td\n", fmt_num(x + x_offset), fmt_num(y)));
    ops.push_str(&format!("({}) Tj\n", escape_literal(text)));
    ops.push_str("ET\n");

    ops.into_bytes()
}

/// Escape bytes for a PDF literal string, keeping the stream ASCII
fn escape_literal(text: &[u8]) -> String {
    let mut escaped = String::with_capacity(text.len());
    for &byte in text {
        match byte {
            b'(' | b')' | b'\\' => {
                escaped.push('\\');
                escaped.push(byte as char);
            }
            0x20..=0x7E => escaped.push(byte as char),
            _ => escaped.push_str(&format!("\\{byte:03o}")),
        }
    }
    escaped
}

/// Wrap text to a maximum width in points
///
/// Breaks on whitespace and honors explicit newlines. A single word wider
/// than `max_width` is kept whole on its own line.
pub fn wrap_text(text: &str, font: StandardFont, size: f32, max_width: f64) -> Vec<String> {
    let space = font.text_width(" ", size);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current_line = String::new();
        let mut current_width = 0.0;

        for word in paragraph.split_whitespace() {
            let word_width = font.text_width(word, size);
            if current_line.is_empty() {
                current_line.push_str(word);
                current_width = word_width;
            } else if current_width + space + word_width <= max_width {
                current_line.push(' ');
                current_line.push_str(word);
                current_width += space + word_width;
            } else {
                lines.push(std::mem::take(&mut current_line));
                current_line.push_str(word);
                current_width = word_width;
            }
        }

        lines.push(current_line);
    }

    lines
}
