//! Predefined single-byte encodings.
//!
//! The four named base encodings a font's `/Encoding` entry can select:
//! StandardEncoding, WinAnsiEncoding, MacRomanEncoding, and
//! PDFDocEncoding. Each is described as a sparse glyph-name table over
//! an ASCII base (plus a Latin-1 upper half where the encoding matches
//! it), resolved through the glyph list and built once into a dense
//! 256-entry lookup table on first use.
//!
//! Codes without an entry are unmapped — the caller decides between a
//! placeholder escape and skipping.

use std::sync::OnceLock;

use crate::glyphs::glyph_name_to_char;

/// A named predefined encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredefinedEncoding {
    /// Adobe standard Latin encoding.
    Standard,
    /// Windows code page 1252 superset.
    WinAnsi,
    /// Classic Mac OS Roman (PDF variant).
    MacRoman,
    /// The encoding used for PDF text strings outside content streams.
    PdfDoc,
}

impl PredefinedEncoding {
    /// Recognize a PDF encoding name (e.g. `/WinAnsiEncoding`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "StandardEncoding" => Some(Self::Standard),
            "WinAnsiEncoding" => Some(Self::WinAnsi),
            "MacRomanEncoding" => Some(Self::MacRoman),
            "PDFDocEncoding" => Some(Self::PdfDoc),
            _ => None,
        }
    }

    /// The dense 256-entry lookup table for this encoding.
    pub fn table(&self) -> &'static [Option<char>; 256] {
        match self {
            Self::Standard => {
                static TABLE: OnceLock<[Option<char>; 256]> = OnceLock::new();
                TABLE.get_or_init(|| build_table(STANDARD_OVERRIDES, false))
            }
            Self::WinAnsi => {
                static TABLE: OnceLock<[Option<char>; 256]> = OnceLock::new();
                TABLE.get_or_init(|| build_table(WIN_ANSI_OVERRIDES, true))
            }
            Self::MacRoman => {
                static TABLE: OnceLock<[Option<char>; 256]> = OnceLock::new();
                TABLE.get_or_init(|| build_table(MAC_ROMAN_OVERRIDES, false))
            }
            Self::PdfDoc => {
                static TABLE: OnceLock<[Option<char>; 256]> = OnceLock::new();
                TABLE.get_or_init(|| build_table(PDF_DOC_OVERRIDES, true))
            }
        }
    }

    /// Decode a single byte code.
    pub fn decode(&self, code: u8) -> Option<char> {
        self.table()[code as usize]
    }
}

/// Fill the ASCII printable range, optionally the Latin-1 upper half,
/// then apply the encoding's glyph-name overrides.
fn build_table(overrides: &[(u8, &str)], latin1_upper: bool) -> [Option<char>; 256] {
    let mut table = [None; 256];
    for code in 0x20..=0x7Eu8 {
        table[code as usize] = Some(code as char);
    }
    if latin1_upper {
        for code in 0xA0..=0xFFu32 {
            table[code as usize] = char::from_u32(code);
        }
    }
    for &(code, name) in overrides {
        table[code as usize] = glyph_name_to_char(name);
    }
    table
}

/// StandardEncoding deviations from ASCII, per PDF Annex D.
static STANDARD_OVERRIDES: &[(u8, &str)] = &[
    (0x27, "quoteright"),
    (0x60, "quoteleft"),
    (0xA1, "exclamdown"),
    (0xA2, "cent"),
    (0xA3, "sterling"),
    (0xA4, "fraction"),
    (0xA5, "yen"),
    (0xA6, "florin"),
    (0xA7, "section"),
    (0xA8, "currency"),
    (0xA9, "quotesingle"),
    (0xAA, "quotedblleft"),
    (0xAB, "guillemotleft"),
    (0xAC, "guilsinglleft"),
    (0xAD, "guilsinglright"),
    (0xAE, "fi"),
    (0xAF, "fl"),
    (0xB1, "endash"),
    (0xB2, "dagger"),
    (0xB3, "daggerdbl"),
    (0xB4, "periodcentered"),
    (0xB6, "paragraph"),
    (0xB7, "bullet"),
    (0xB8, "quotesinglbase"),
    (0xB9, "quotedblbase"),
    (0xBA, "quotedblright"),
    (0xBB, "guillemotright"),
    (0xBC, "ellipsis"),
    (0xBD, "perthousand"),
    (0xBF, "questiondown"),
    (0xC1, "grave"),
    (0xC2, "acute"),
    (0xC3, "circumflex"),
    (0xC4, "tilde"),
    (0xC5, "macron"),
    (0xC6, "breve"),
    (0xC7, "dotaccent"),
    (0xC8, "dieresis"),
    (0xCA, "ring"),
    (0xCB, "cedilla"),
    (0xCD, "hungarumlaut"),
    (0xCE, "ogonek"),
    (0xCF, "caron"),
    (0xD0, "emdash"),
    (0xE1, "AE"),
    (0xE3, "ordfeminine"),
    (0xE8, "Lslash"),
    (0xE9, "Oslash"),
    (0xEA, "OE"),
    (0xEB, "ordmasculine"),
    (0xF1, "ae"),
    (0xF5, "dotlessi"),
    (0xF8, "lslash"),
    (0xF9, "oslash"),
    (0xFA, "oe"),
    (0xFB, "germandbls"),
];

/// WinAnsiEncoding 0x80–0x9F block; the 0xA0–0xFF half is Latin-1.
/// 0x81, 0x8D, 0x8F, 0x90, and 0x9D are undefined.
static WIN_ANSI_OVERRIDES: &[(u8, &str)] = &[
    (0x80, "Euro"),
    (0x82, "quotesinglbase"),
    (0x83, "florin"),
    (0x84, "quotedblbase"),
    (0x85, "ellipsis"),
    (0x86, "dagger"),
    (0x87, "daggerdbl"),
    (0x88, "circumflex"),
    (0x89, "perthousand"),
    (0x8A, "Scaron"),
    (0x8B, "guilsinglleft"),
    (0x8C, "OE"),
    (0x8E, "Zcaron"),
    (0x91, "quoteleft"),
    (0x92, "quoteright"),
    (0x93, "quotedblleft"),
    (0x94, "quotedblright"),
    (0x95, "bullet"),
    (0x96, "endash"),
    (0x97, "emdash"),
    (0x98, "tilde"),
    (0x99, "trademark"),
    (0x9A, "scaron"),
    (0x9B, "guilsinglright"),
    (0x9C, "oe"),
    (0x9E, "zcaron"),
    (0x9F, "Ydieresis"),
];

/// MacRomanEncoding 0x80–0xFF block, per PDF Annex D (0xF0 undefined).
static MAC_ROMAN_OVERRIDES: &[(u8, &str)] = &[
    (0x80, "Adieresis"),
    (0x81, "Aring"),
    (0x82, "Ccedilla"),
    (0x83, "Eacute"),
    (0x84, "Ntilde"),
    (0x85, "Odieresis"),
    (0x86, "Udieresis"),
    (0x87, "aacute"),
    (0x88, "agrave"),
    (0x89, "acircumflex"),
    (0x8A, "adieresis"),
    (0x8B, "atilde"),
    (0x8C, "aring"),
    (0x8D, "ccedilla"),
    (0x8E, "eacute"),
    (0x8F, "egrave"),
    (0x90, "ecircumflex"),
    (0x91, "edieresis"),
    (0x92, "iacute"),
    (0x93, "igrave"),
    (0x94, "icircumflex"),
    (0x95, "idieresis"),
    (0x96, "ntilde"),
    (0x97, "oacute"),
    (0x98, "ograve"),
    (0x99, "ocircumflex"),
    (0x9A, "odieresis"),
    (0x9B, "otilde"),
    (0x9C, "uacute"),
    (0x9D, "ugrave"),
    (0x9E, "ucircumflex"),
    (0x9F, "udieresis"),
    (0xA0, "dagger"),
    (0xA1, "degree"),
    (0xA2, "cent"),
    (0xA3, "sterling"),
    (0xA4, "section"),
    (0xA5, "bullet"),
    (0xA6, "paragraph"),
    (0xA7, "germandbls"),
    (0xA8, "registered"),
    (0xA9, "copyright"),
    (0xAA, "trademark"),
    (0xAB, "acute"),
    (0xAC, "dieresis"),
    (0xAD, "notequal"),
    (0xAE, "AE"),
    (0xAF, "Oslash"),
    (0xB0, "infinity"),
    (0xB1, "plusminus"),
    (0xB2, "lessequal"),
    (0xB3, "greaterequal"),
    (0xB4, "yen"),
    (0xB5, "mu"),
    (0xB6, "partialdiff"),
    (0xB7, "summation"),
    (0xB8, "product"),
    (0xB9, "pi"),
    (0xBA, "integral"),
    (0xBB, "ordfeminine"),
    (0xBC, "ordmasculine"),
    (0xBD, "Omega"),
    (0xBE, "ae"),
    (0xBF, "oslash"),
    (0xC0, "questiondown"),
    (0xC1, "exclamdown"),
    (0xC2, "logicalnot"),
    (0xC3, "radical"),
    (0xC4, "florin"),
    (0xC5, "approxequal"),
    (0xC6, "Delta"),
    (0xC7, "guillemotleft"),
    (0xC8, "guillemotright"),
    (0xC9, "ellipsis"),
    (0xCA, "space"),
    (0xCB, "Agrave"),
    (0xCC, "Atilde"),
    (0xCD, "Otilde"),
    (0xCE, "OE"),
    (0xCF, "oe"),
    (0xD0, "endash"),
    (0xD1, "emdash"),
    (0xD2, "quotedblleft"),
    (0xD3, "quotedblright"),
    (0xD4, "quoteleft"),
    (0xD5, "quoteright"),
    (0xD6, "divide"),
    (0xD7, "lozenge"),
    (0xD8, "ydieresis"),
    (0xD9, "Ydieresis"),
    (0xDA, "fraction"),
    (0xDB, "currency"),
    (0xDC, "guilsinglleft"),
    (0xDD, "guilsinglright"),
    (0xDE, "fi"),
    (0xDF, "fl"),
    (0xE0, "daggerdbl"),
    (0xE1, "periodcentered"),
    (0xE2, "quotesinglbase"),
    (0xE3, "quotedblbase"),
    (0xE4, "perthousand"),
    (0xE5, "Acircumflex"),
    (0xE6, "Ecircumflex"),
    (0xE7, "Aacute"),
    (0xE8, "Edieresis"),
    (0xE9, "Egrave"),
    (0xEA, "Iacute"),
    (0xEB, "Icircumflex"),
    (0xEC, "Idieresis"),
    (0xED, "Igrave"),
    (0xEE, "Oacute"),
    (0xEF, "Ocircumflex"),
    (0xF1, "Ograve"),
    (0xF2, "Uacute"),
    (0xF3, "Ucircumflex"),
    (0xF4, "Ugrave"),
    (0xF5, "dotlessi"),
    (0xF6, "circumflex"),
    (0xF7, "tilde"),
    (0xF8, "macron"),
    (0xF9, "breve"),
    (0xFA, "dotaccent"),
    (0xFB, "ring"),
    (0xFC, "cedilla"),
    (0xFD, "hungarumlaut"),
    (0xFE, "ogonek"),
    (0xFF, "caron"),
];

/// PDFDocEncoding deviations: accents at 0x18–0x1F, the typographic
/// block at 0x80–0x9E, Euro at 0xA0; the rest of the upper half is
/// Latin-1.
static PDF_DOC_OVERRIDES: &[(u8, &str)] = &[
    (0x18, "breve"),
    (0x19, "caron"),
    (0x1A, "circumflex"),
    (0x1B, "dotaccent"),
    (0x1C, "hungarumlaut"),
    (0x1D, "ogonek"),
    (0x1E, "ring"),
    (0x1F, "tilde"),
    (0x80, "bullet"),
    (0x81, "dagger"),
    (0x82, "daggerdbl"),
    (0x83, "ellipsis"),
    (0x84, "emdash"),
    (0x85, "endash"),
    (0x86, "florin"),
    (0x87, "fraction"),
    (0x88, "guilsinglleft"),
    (0x89, "guilsinglright"),
    (0x8A, "minus"),
    (0x8B, "perthousand"),
    (0x8C, "quotedblbase"),
    (0x8D, "quotedblleft"),
    (0x8E, "quotedblright"),
    (0x8F, "quoteleft"),
    (0x90, "quoteright"),
    (0x91, "quotesinglbase"),
    (0x92, "trademark"),
    (0x93, "fi"),
    (0x94, "fl"),
    (0x95, "Lslash"),
    (0x96, "OE"),
    (0x97, "Scaron"),
    (0x98, "Ydieresis"),
    (0x99, "Zcaron"),
    (0x9A, "dotlessi"),
    (0x9B, "lslash"),
    (0x9C, "oe"),
    (0x9D, "scaron"),
    (0x9E, "zcaron"),
    (0xA0, "Euro"),
];
