//! Standard PDF fonts
//!
//! The base-14 Helvetica faces are available in every PDF viewer, so they
//! are referenced by name instead of being embedded. Widths come from the
//! Adobe font metrics and are expressed in 1/1000 of the font size.

use lopdf::{Dictionary, Object};

/// Width used for characters missing from the tables
const DEFAULT_WIDTH: u16 = 556;

/// Helvetica widths for U+0020..=U+007E
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

/// Helvetica-Bold widths for U+0020..=U+007E
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0..?
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // P.._
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // `..o
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // p..~
];

/// WinAnsi bytes for characters in the 0x80..=0x9F range
const WIN_ANSI_EXTRAS: [(char, u8); 27] = [
    ('€', 0x80),
    ('‚', 0x82),
    ('ƒ', 0x83),
    ('„', 0x84),
    ('…', 0x85),
    ('†', 0x86),
    ('‡', 0x87),
    ('ˆ', 0x88),
    ('‰', 0x89),
    ('Š', 0x8A),
    ('‹', 0x8B),
    ('Œ', 0x8C),
    ('Ž', 0x8E),
    ('‘', 0x91),
    ('’', 0x92),
    ('“', 0x93),
    ('”', 0x94),
    ('•', 0x95),
    ('–', 0x96),
    ('—', 0x97),
    ('˜', 0x98),
    ('™', 0x99),
    ('š', 0x9A),
    ('›', 0x9B),
    ('œ', 0x9C),
    ('ž', 0x9E),
    ('Ÿ', 0x9F),
];

/// A base-14 font face
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StandardFont {
    #[default]
    Helvetica,
    HelveticaBold,
}

impl StandardFont {
    /// PostScript name used as /BaseFont
    pub fn base_font(self) -> &'static str {
        match self {
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
        }
    }

    /// Pick the regular or bold face
    pub fn for_weight(bold: bool) -> Self {
        if bold {
            StandardFont::HelveticaBold
        } else {
            StandardFont::Helvetica
        }
    }

    /// Advance width of one character in 1/1000 em
    pub fn char_width(self, c: char) -> u16 {
        let table = match self {
            StandardFont::Helvetica => &HELVETICA_WIDTHS,
            StandardFont::HelveticaBold => &HELVETICA_BOLD_WIDTHS,
        };

        match c {
            ' '..='~' => table[c as usize - 0x20],
            '\u{A0}' => table[0],
            '—' | '…' | '‰' | '™' => 1000,
            '‘' | '’' | '‚' => 222,
            '“' | '”' | '„' => 333,
            '•' => 350,
            _ => DEFAULT_WIDTH,
        }
    }

    /// Width of `text` in points at `size`
    pub fn text_width(self, text: &str, size: f32) -> f64 {
        let units: u32 = text.chars().map(|c| u32::from(self.char_width(c))).sum();
        f64::from(units) * f64::from(size) / 1000.0
    }

    /// Encode text as WinAnsi bytes; unsupported characters become `?`
    pub fn encode(self, text: &str) -> Vec<u8> {
        text.chars().map(encode_win_ansi).collect()
    }

    /// Font dictionary for the page resources
    pub fn to_pdf_object(self) -> Object {
        let mut dict = Dictionary::new();
        dict.set("Type", Object::Name(b"Font".to_vec()));
        dict.set("Subtype", Object::Name(b"Type1".to_vec()));
        dict.set("BaseFont", Object::Name(self.base_font().as_bytes().to_vec()));
        dict.set("Encoding", Object::Name(b"WinAnsiEncoding".to_vec()));
        Object::Dictionary(dict)
    }
}

fn encode_win_ansi(c: char) -> u8 {
    match c {
        ' '..='~' | '\u{A0}'..='\u{FF}' => c as u8,
        _ => WIN_ANSI_EXTRAS
            .iter()
            .find(|(extra, _)| *extra == c)
            .map(|(_, byte)| *byte)
            .unwrap_or(b'?'),
    }
}
