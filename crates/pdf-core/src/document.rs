//! PDF Document wrapper

use crate::font::StandardFont;
use crate::graphics::{generate_line_operators, generate_rect_operators};
use crate::text::{generate_text_operators, TextRenderContext};
use crate::{Align, PdfError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::BTreeMap;
use std::path::Path;

/// RGB Color (values 0.0 - 1.0)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    /// Create a new RGB color (values 0.0 - 1.0)
    pub fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create color from RGB values (0-255)
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Black color
    pub fn black() -> Self {
        Self::rgb(0.0, 0.0, 0.0)
    }

    /// White color
    pub fn white() -> Self {
        Self::rgb(1.0, 1.0, 1.0)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::black()
    }
}

/// A page and the operators drawn on it so far
struct PageState {
    id: ObjectId,
    contents_id: ObjectId,
    height: f64,
    content: Vec<u8>,
}

/// PDF Document builder providing high-level drawing operations
///
/// Pages are created blank. Drawing calls take top-left origin coordinates
/// and buffer content operators; streams and font resources are written
/// when the document is serialized.
pub struct PdfDocument {
    /// The underlying lopdf document
    inner: Document,
    /// The root Pages object
    pages_id: ObjectId,
    /// Pages in order (page number - 1)
    pages: Vec<PageState>,
    /// Current font face
    current_font: StandardFont,
    /// Current font size
    current_font_size: f32,
    /// Current text color
    current_text_color: Color,
    /// Font resource names in use (font -> "F1", "F2", ...)
    font_resources: BTreeMap<StandardFont, String>,
    /// Font dictionaries already written (font -> PDF object ID)
    embedded_fonts: BTreeMap<StandardFont, ObjectId>,
}

impl Default for PdfDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfDocument {
    /// Create an empty document with no pages
    pub fn new() -> Self {
        let mut inner = Document::with_version("1.5");
        let pages_id = inner.new_object_id();

        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set("Kids", Object::Array(vec![]));
        pages_dict.set("Count", Object::Integer(0));
        inner.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = inner.add_object(Object::Dictionary(catalog));
        inner.trailer.set("Root", Object::Reference(catalog_id));

        Self {
            inner,
            pages_id,
            pages: Vec::new(),
            current_font: StandardFont::default(),
            current_font_size: 12.0,
            current_text_color: Color::default(),
            font_resources: BTreeMap::new(),
            embedded_fonts: BTreeMap::new(),
        }
    }

    /// Get the number of pages in the document
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Add a blank page at the end of the document
    ///
    /// # Arguments
    /// * `width` - Page width in points
    /// * `height` - Page height in points
    ///
    /// # Returns
    /// New page number (1-indexed)
    pub fn add_blank_page(&mut self, width: f64, height: f64) -> Result<usize> {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(PdfError::InvalidPageSize(width, height));
        }

        // Empty content stream, filled in when the document is serialized
        let contents_id = self
            .inner
            .add_object(Object::Stream(Stream::new(Dictionary::new(), vec![])));

        let mut page_dict = Dictionary::new();
        page_dict.set("Type", Object::Name(b"Page".to_vec()));
        page_dict.set("Parent", Object::Reference(self.pages_id));
        page_dict.set(
            "MediaBox",
            Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(width as f32),
                Object::Real(height as f32),
            ]),
        );
        page_dict.set("Contents", Object::Reference(contents_id));
        let page_id = self.inner.add_object(Object::Dictionary(page_dict));

        let pages_dict = self
            .inner
            .get_object_mut(self.pages_id)?
            .as_dict_mut()
            .map_err(|_| PdfError::ParseError("Pages object is not a dictionary".to_string()))?;

        let mut kids = pages_dict
            .get(b"Kids")
            .and_then(Object::as_array)
            .map_err(|_| PdfError::ParseError("Pages object missing Kids array".to_string()))?
            .clone();
        kids.push(Object::Reference(page_id));
        let count = kids.len() as i64;
        pages_dict.set("Kids", Object::Array(kids));
        pages_dict.set("Count", Object::Integer(count));

        self.pages.push(PageState {
            id: page_id,
            contents_id,
            height,
            content: Vec::new(),
        });

        Ok(self.pages.len())
    }

    /// Set the current font face and size
    pub fn set_font(&mut self, font: StandardFont, size: f32) {
        self.current_font = font;
        self.current_font_size = size;
    }

    /// Set text color for subsequent insert_text calls
    pub fn set_text_color(&mut self, color: Color) {
        self.current_text_color = color;
    }

    /// Width of `text` in points with the current font and size
    pub fn text_width(&self, text: &str) -> f64 {
        self.current_font.text_width(text, self.current_font_size)
    }

    /// Insert text at position
    ///
    /// # Arguments
    /// * `text` - Text to insert
    /// * `page` - Page number (1-indexed)
    /// * `x` - X coordinate in points
    /// * `y` - Baseline Y coordinate in points (from top)
    /// * `align` - Text alignment relative to `x`
    pub fn insert_text(
        &mut self,
        text: &str,
        page: usize,
        x: f64,
        y: f64,
        align: Align,
    ) -> Result<()> {
        let height = self.page(page)?.height;

        if text.is_empty() {
            return Ok(());
        }

        let ctx = TextRenderContext {
            font_name: self.font_resource(self.current_font),
            font_size: self.current_font_size,
            text_width: self.text_width(text),
            color: self.current_text_color,
        };
        let encoded = self.current_font.encode(text);
        let ops = generate_text_operators(&encoded, x, height - y, align, &ctx);

        self.page_mut(page)?.content.extend_from_slice(&ops);
        Ok(())
    }

    /// Fill a rectangle whose top-left corner is at `(x, y)`
    pub fn fill_rect(
        &mut self,
        page: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Color,
    ) -> Result<()> {
        let state = self.page_mut(page)?;
        let ops = generate_rect_operators(x, state.height - y - height, width, height, color);
        state.content.extend_from_slice(&ops);
        Ok(())
    }

    /// Stroke a straight line between two top-left origin points
    #[allow(clippy::too_many_arguments)]
    pub fn draw_line(
        &mut self,
        page: usize,
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        line_width: f64,
        color: Color,
    ) -> Result<()> {
        let state = self.page_mut(page)?;
        let ops = generate_line_operators(
            x1,
            state.height - y1,
            x2,
            state.height - y2,
            line_width,
            color,
        );
        state.content.extend_from_slice(&ops);
        Ok(())
    }

    /// Save the document to a file
    ///
    /// # Arguments
    /// * `path` - Output file path
    pub fn save<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.finalize()?;
        self.inner
            .save(path)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Save the document to bytes
    pub fn to_bytes(&mut self) -> Result<Vec<u8>> {
        self.finalize()?;

        let mut buffer = Vec::new();
        self.inner
            .save_to(&mut buffer)
            .map_err(|e| PdfError::SaveError(e.to_string()))?;

        Ok(buffer)
    }

    fn page(&self, page: usize) -> Result<&PageState> {
        let page_count = self.pages.len();
        page.checked_sub(1)
            .and_then(|index| self.pages.get(index))
            .ok_or(PdfError::InvalidPage(page, page_count))
    }

    fn page_mut(&mut self, page: usize) -> Result<&mut PageState> {
        let page_count = self.pages.len();
        page.checked_sub(1)
            .and_then(|index| self.pages.get_mut(index))
            .ok_or(PdfError::InvalidPage(page, page_count))
    }

    /// Resource name for a font, assigned on first use
    fn font_resource(&mut self, font: StandardFont) -> String {
        let next = self.font_resources.len() + 1;
        self.font_resources
            .entry(font)
            .or_insert_with(|| format!("F{next}"))
            .clone()
    }

    /// Write font dictionaries, page resources, and content streams
    ///
    /// Safe to call more than once: content streams are replaced, not
    /// appended, and each font is written a single time.
    fn finalize(&mut self) -> Result<()> {
        let mut font_dict = Dictionary::new();
        for (font, resource_name) in &self.font_resources {
            let font_id = match self.embedded_fonts.get(font) {
                Some(id) => *id,
                None => {
                    let id = self.inner.add_object(font.to_pdf_object());
                    self.embedded_fonts.insert(*font, id);
                    id
                }
            };
            font_dict.set(resource_name.as_bytes(), Object::Reference(font_id));
        }

        let mut resources = Dictionary::new();
        resources.set("Font", Object::Dictionary(font_dict));

        for state in &self.pages {
            let stream = Stream::new(Dictionary::new(), state.content.clone());
            self.inner
                .objects
                .insert(state.contents_id, Object::Stream(stream));

            let page_dict = self
                .inner
                .get_object_mut(state.id)?
                .as_dict_mut()
                .map_err(|_| PdfError::ParseError("Page object is not a dictionary".to_string()))?;
            page_dict.set("Resources", Object::Dictionary(resources.clone()));
        }

        tracing::debug!(
            pages = self.pages.len(),
            fonts = self.font_resources.len(),
            "finalized PDF document"
        );
        Ok(())
    }
}
