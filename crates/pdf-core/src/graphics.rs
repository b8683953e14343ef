//! Vector graphics operators (filled rectangles and stroked lines)

use crate::document::Color;
use crate::fmt_num;

/// Generate PDF operators for a filled rectangle
///
/// Coordinates are in PDF space: `(x, y)` is the bottom-left corner.
/// The graphics state is saved and restored so the fill color does not
/// leak into later operators.
pub fn generate_rect_operators(x: f64, y: f64, width: f64, height: f64, color: Color) -> Vec<u8> {
    format!(
        "q\n{} rg\n{} {} {} {} re\nf\nQ\n",
        color_components(color),
        fmt_num(x),
        fmt_num(y),
        fmt_num(width),
        fmt_num(height)
    )
    .into_bytes()
}

/// Generate PDF operators for a straight stroked line
pub fn generate_line_operators(
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    line_width: f64,
    color: Color,
) -> Vec<u8> {
    format!(
        "q\n{} RG\n{} w\n{} {} m\n{} {} l\nS\nQ\n",
        color_components(color),
        fmt_num(line_width),
        fmt_num(x1),
        fmt_num(y1),
        fmt_num(x2),
        fmt_num(y2)
    )
    .into_bytes()
}

fn color_components(color: Color) -> String {
    format!(
        "{} {} {}",
        fmt_num(color.r.into()),
        fmt_num(color.g.into()),
        fmt_num(color.b.into())
    )
}
