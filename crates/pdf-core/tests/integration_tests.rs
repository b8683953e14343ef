//! Integration tests for pdf-core
//!
//! These tests build documents through the public API, serialize them, and
//! load the bytes back with lopdf to inspect the result.

use pdf_core::{Align, Color, PdfDocument, PdfError, StandardFont};
use pretty_assertions::assert_eq;

const A4_WIDTH: f64 = 595.28;
const A4_HEIGHT: f64 = 841.89;

fn load(bytes: &[u8]) -> lopdf::Document {
    lopdf::Document::load_mem(bytes).expect("generated PDF should parse")
}

fn page_content(doc: &lopdf::Document, page: u32) -> String {
    let page_id = *doc.get_pages().get(&page).expect("page exists");
    String::from_utf8(doc.get_page_content(page_id).unwrap()).unwrap()
}

#[test]
fn test_blank_document_roundtrip() {
    let mut doc = PdfDocument::new();
    doc.add_blank_page(A4_WIDTH, A4_HEIGHT).unwrap();

    let bytes = doc.to_bytes().unwrap();
    assert!(bytes.starts_with(b"%PDF-1.5"));

    let loaded = load(&bytes);
    assert_eq!(loaded.get_pages().len(), 1);
}

#[test]
fn test_media_box_matches_page_size() {
    let mut doc = PdfDocument::new();
    doc.add_blank_page(612.0, 792.0).unwrap();

    let loaded = load(&doc.to_bytes().unwrap());
    let page_id = loaded.get_pages()[&1];
    let page = loaded.get_dictionary(page_id).unwrap();
    let media_box = page.get(b"MediaBox").unwrap().as_array().unwrap();

    assert_eq!(media_box.len(), 4);
    assert_eq!(media_box[2].as_float().unwrap(), 612.0);
    assert_eq!(media_box[3].as_float().unwrap(), 792.0);
}

#[test]
fn test_insert_text_basic() {
    let mut doc = PdfDocument::new();
    let page = doc.add_blank_page(A4_WIDTH, A4_HEIGHT).unwrap();
    doc.set_font(StandardFont::HelveticaBold, 28.0);
    doc.insert_text("INVOICE", page, 100.0, 100.0, Align::Left)
        .unwrap();

    let loaded = load(&doc.to_bytes().unwrap());
    let content = page_content(&loaded, 1);

    assert!(content.contains("/F1 28 Tf"));
    assert!(content.contains("(INVOICE) Tj"));
    assert!(content.contains("100 741.89 Td"));
}

#[test]
fn test_insert_text_alignment() {
    let mut doc = PdfDocument::new();
    let page = doc.add_blank_page(A4_WIDTH, A4_HEIGHT).unwrap();
    doc.set_font(StandardFont::Helvetica, 10.0);

    // "Hi" is 9.44pt wide at 10pt
    doc.insert_text("Hi", page, 100.0, 50.0, Align::Center).unwrap();
    doc.insert_text("Hi", page, 100.0, 60.0, Align::Right).unwrap();

    let content = page_content(&load(&doc.to_bytes().unwrap()), 1);
    assert!(content.contains("95.28 791.89 Td"));
    assert!(content.contains("90.56 781.89 Td"));
}

#[test]
fn test_font_resources_on_every_page() {
    let mut doc = PdfDocument::new();
    let first = doc.add_blank_page(A4_WIDTH, A4_HEIGHT).unwrap();
    let second = doc.add_blank_page(A4_WIDTH, A4_HEIGHT).unwrap();

    doc.set_font(StandardFont::HelveticaBold, 12.0);
    doc.insert_text("Bold", first, 50.0, 50.0, Align::Left).unwrap();
    doc.set_font(StandardFont::Helvetica, 12.0);
    doc.insert_text("Regular", second, 50.0, 50.0, Align::Left)
        .unwrap();

    let loaded = load(&doc.to_bytes().unwrap());
    for (_, page_id) in loaded.get_pages() {
        let page = loaded.get_dictionary(page_id).unwrap();
        let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
        let fonts = resources.get(b"Font").unwrap().as_dict().unwrap();

        let mut names: Vec<Vec<u8>> = fonts
            .iter()
            .map(|(_, font_ref)| {
                let font = loaded
                    .get_dictionary(font_ref.as_reference().unwrap())
                    .unwrap();
                font.get(b"BaseFont").unwrap().as_name().unwrap().to_vec()
            })
            .collect();
        names.sort();
        assert_eq!(names, vec![b"Helvetica".to_vec(), b"Helvetica-Bold".to_vec()]);
    }
}

#[test]
fn test_text_on_multiple_pages() {
    let mut doc = PdfDocument::new();
    for i in 1..=3 {
        let page = doc.add_blank_page(A4_WIDTH, A4_HEIGHT).unwrap();
        doc.insert_text(&format!("Page {i}"), page, 40.0, 40.0, Align::Left)
            .unwrap();
    }

    let loaded = load(&doc.to_bytes().unwrap());
    assert_eq!(loaded.get_pages().len(), 3);
    for i in 1..=3u32 {
        assert!(page_content(&loaded, i).contains(&format!("(Page {i}) Tj")));
    }
}

#[test]
fn test_empty_text() {
    let mut doc = PdfDocument::new();
    let page = doc.add_blank_page(A4_WIDTH, A4_HEIGHT).unwrap();
    doc.insert_text("", page, 40.0, 40.0, Align::Left).unwrap();

    let content = page_content(&load(&doc.to_bytes().unwrap()), 1);
    assert!(!content.contains("Tj"));
}

#[test]
fn test_special_characters_escaped() {
    let mut doc = PdfDocument::new();
    let page = doc.add_blank_page(A4_WIDTH, A4_HEIGHT).unwrap();
    doc.insert_text("Fee (50%) €", page, 40.0, 40.0, Align::Left)
        .unwrap();

    let content = page_content(&load(&doc.to_bytes().unwrap()), 1);
    assert!(content.contains("(Fee \\(50%\\) \\200) Tj"));
}

#[test]
fn test_shapes_and_text_colors() {
    let mut doc = PdfDocument::new();
    let page = doc.add_blank_page(A4_WIDTH, A4_HEIGHT).unwrap();
    doc.fill_rect(page, 40.0, 40.0, 100.0, 20.0, Color::from_rgb(0x6B, 0x46, 0xC1))
        .unwrap();
    doc.draw_line(page, 40.0, 80.0, 140.0, 80.0, 1.0, Color::black())
        .unwrap();
    doc.set_text_color(Color::white());
    doc.insert_text("Item", page, 50.0, 55.0, Align::Left).unwrap();

    let content = page_content(&load(&doc.to_bytes().unwrap()), 1);

    let rect = content.find(" re\n").unwrap();
    let text = content.find("(Item) Tj").unwrap();
    assert!(rect < text, "background must be painted before text");
    assert!(content.contains("40 781.89 100 20 re"));
    assert!(content.contains("40 761.89 m\n140 761.89 l"));
    assert!(content.contains("1 1 1 rg"));
}

#[test]
fn test_invalid_page_number() {
    let mut doc = PdfDocument::new();
    doc.add_blank_page(A4_WIDTH, A4_HEIGHT).unwrap();

    assert!(matches!(
        doc.insert_text("x", 5, 0.0, 0.0, Align::Left),
        Err(PdfError::InvalidPage(5, 1))
    ));
    assert!(matches!(
        doc.fill_rect(2, 0.0, 0.0, 1.0, 1.0, Color::black()),
        Err(PdfError::InvalidPage(2, 1))
    ));
}

#[test]
fn test_save_to_file() {
    let path = std::env::temp_dir().join(format!("pdf-core-test-{}.pdf", std::process::id()));

    let mut doc = PdfDocument::new();
    let page = doc.add_blank_page(A4_WIDTH, A4_HEIGHT).unwrap();
    doc.insert_text("Saved", page, 40.0, 40.0, Align::Left).unwrap();
    doc.save(&path).unwrap();

    let loaded = lopdf::Document::load(&path).unwrap();
    assert_eq!(loaded.get_pages().len(), 1);
    std::fs::remove_file(&path).unwrap();
}
