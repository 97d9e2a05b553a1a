//! Glyph-name → Unicode resolution.
//!
//! PDF encodings and Differences arrays identify glyphs by Adobe glyph
//! names (`/emdash`, `/Aacute`, …). This module resolves those names to
//! Unicode characters through a static table, plus the two systematic
//! naming conventions (`uniXXXX` hex names and `charXX` byte names).
//! `.notdef` and unknown names resolve to `None` — a missing-mapping
//! condition the caller handles, never a failure.

/// Resolve a PDF glyph name to its Unicode character.
///
/// Handles, in order:
/// - `uniXXXX` (4 hex digits) names decoded directly
/// - `charXX` (2 hex digits) names decoded directly
/// - single ASCII letter names (`/A` → 'A')
/// - the static Adobe glyph-name table
pub fn glyph_name_to_char(name: &str) -> Option<char> {
    if name == ".notdef" {
        return None;
    }

    if let Some(hex) = name.strip_prefix("uni") {
        if hex.len() == 4 {
            if let Ok(code) = u32::from_str_radix(hex, 16) {
                return char::from_u32(code);
            }
        }
    }

    if let Some(hex) = name.strip_prefix("char") {
        if hex.len() == 2 {
            if let Ok(code) = u32::from_str_radix(hex, 16) {
                return char::from_u32(code);
            }
        }
    }

    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        if c.is_ascii_alphabetic() {
            return Some(c);
        }
    }

    lookup_glyph_name(name)
}

/// Static Adobe glyph-name table covering the Latin text repertoire of
/// the predefined encodings plus the names commonly seen in Differences
/// arrays.
fn lookup_glyph_name(name: &str) -> Option<char> {
    let ch = match name {
        // Digits
        "zero" => '0',
        "one" => '1',
        "two" => '2',
        "three" => '3',
        "four" => '4',
        "five" => '5',
        "six" => '6',
        "seven" => '7',
        "eight" => '8',
        "nine" => '9',
        // ASCII punctuation
        "space" => ' ',
        "exclam" => '!',
        "quotedbl" => '"',
        "numbersign" => '#',
        "dollar" => '$',
        "percent" => '%',
        "ampersand" => '&',
        "quotesingle" => '\'',
        "parenleft" => '(',
        "parenright" => ')',
        "asterisk" => '*',
        "plus" => '+',
        "comma" => ',',
        "hyphen" => '-',
        "period" => '.',
        "slash" => '/',
        "colon" => ':',
        "semicolon" => ';',
        "less" => '<',
        "equal" => '=',
        "greater" => '>',
        "question" => '?',
        "at" => '@',
        "bracketleft" => '[',
        "backslash" => '\\',
        "bracketright" => ']',
        "asciicircum" => '^',
        "underscore" => '_',
        "grave" => '`',
        "braceleft" => '{',
        "bar" => '|',
        "braceright" => '}',
        "asciitilde" => '~',
        // Quotes, dashes, and typographic marks
        "quoteleft" => '\u{2018}',
        "quoteright" => '\u{2019}',
        "quotedblleft" => '\u{201C}',
        "quotedblright" => '\u{201D}',
        "quotesinglbase" => '\u{201A}',
        "quotedblbase" => '\u{201E}',
        "endash" => '\u{2013}',
        "emdash" => '\u{2014}',
        "ellipsis" => '\u{2026}',
        "bullet" => '\u{2022}',
        "dagger" => '\u{2020}',
        "daggerdbl" => '\u{2021}',
        "perthousand" => '\u{2030}',
        "guilsinglleft" => '\u{2039}',
        "guilsinglright" => '\u{203A}',
        "guillemotleft" => '\u{00AB}',
        "guillemotright" => '\u{00BB}',
        "fraction" => '\u{2044}',
        "minus" => '\u{2212}',
        "trademark" => '\u{2122}',
        "fi" => '\u{FB01}',
        "fl" => '\u{FB02}',
        // Currency and signs
        "cent" => '\u{00A2}',
        "sterling" => '\u{00A3}',
        "currency" => '\u{00A4}',
        "yen" => '\u{00A5}',
        "Euro" => '\u{20AC}',
        "florin" => '\u{0192}',
        "section" => '\u{00A7}',
        "paragraph" => '\u{00B6}',
        "copyright" => '\u{00A9}',
        "registered" => '\u{00AE}',
        "degree" => '\u{00B0}',
        "plusminus" => '\u{00B1}',
        "periodcentered" => '\u{00B7}',
        "brokenbar" => '\u{00A6}',
        "ordfeminine" => '\u{00AA}',
        "ordmasculine" => '\u{00BA}',
        "onequarter" => '\u{00BC}',
        "onehalf" => '\u{00BD}',
        "threequarters" => '\u{00BE}',
        "onesuperior" => '\u{00B9}',
        "twosuperior" => '\u{00B2}',
        "threesuperior" => '\u{00B3}',
        "exclamdown" => '\u{00A1}',
        "questiondown" => '\u{00BF}',
        "logicalnot" => '\u{00AC}',
        "softhyphen" => '\u{00AD}',
        "multiply" => '\u{00D7}',
        "divide" => '\u{00F7}',
        "mu" => '\u{00B5}',
        // Spacing accents
        "acute" => '\u{00B4}',
        "dieresis" => '\u{00A8}',
        "macron" => '\u{00AF}',
        "cedilla" => '\u{00B8}',
        "circumflex" => '\u{02C6}',
        "tilde" => '\u{02DC}',
        "breve" => '\u{02D8}',
        "dotaccent" => '\u{02D9}',
        "ring" => '\u{02DA}',
        "hungarumlaut" => '\u{02DD}',
        "ogonek" => '\u{02DB}',
        "caron" => '\u{02C7}',
        // Uppercase accented Latin
        "Agrave" => '\u{00C0}',
        "Aacute" => '\u{00C1}',
        "Acircumflex" => '\u{00C2}',
        "Atilde" => '\u{00C3}',
        "Adieresis" => '\u{00C4}',
        "Aring" => '\u{00C5}',
        "AE" => '\u{00C6}',
        "Ccedilla" => '\u{00C7}',
        "Egrave" => '\u{00C8}',
        "Eacute" => '\u{00C9}',
        "Ecircumflex" => '\u{00CA}',
        "Edieresis" => '\u{00CB}',
        "Igrave" => '\u{00CC}',
        "Iacute" => '\u{00CD}',
        "Icircumflex" => '\u{00CE}',
        "Idieresis" => '\u{00CF}',
        "Eth" => '\u{00D0}',
        "Ntilde" => '\u{00D1}',
        "Ograve" => '\u{00D2}',
        "Oacute" => '\u{00D3}',
        "Ocircumflex" => '\u{00D4}',
        "Otilde" => '\u{00D5}',
        "Odieresis" => '\u{00D6}',
        "Oslash" => '\u{00D8}',
        "Ugrave" => '\u{00D9}',
        "Uacute" => '\u{00DA}',
        "Ucircumflex" => '\u{00DB}',
        "Udieresis" => '\u{00DC}',
        "Yacute" => '\u{00DD}',
        "Thorn" => '\u{00DE}',
        "Lslash" => '\u{0141}',
        "OE" => '\u{0152}',
        "Scaron" => '\u{0160}',
        "Ydieresis" => '\u{0178}',
        "Zcaron" => '\u{017D}',
        // Lowercase accented Latin
        "agrave" => '\u{00E0}',
        "aacute" => '\u{00E1}',
        "acircumflex" => '\u{00E2}',
        "atilde" => '\u{00E3}',
        "adieresis" => '\u{00E4}',
        "aring" => '\u{00E5}',
        "ae" => '\u{00E6}',
        "ccedilla" => '\u{00E7}',
        "egrave" => '\u{00E8}',
        "eacute" => '\u{00E9}',
        "ecircumflex" => '\u{00EA}',
        "edieresis" => '\u{00EB}',
        "igrave" => '\u{00EC}',
        "iacute" => '\u{00ED}',
        "icircumflex" => '\u{00EE}',
        "idieresis" => '\u{00EF}',
        "eth" => '\u{00F0}',
        "ntilde" => '\u{00F1}',
        "ograve" => '\u{00F2}',
        "oacute" => '\u{00F3}',
        "ocircumflex" => '\u{00F4}',
        "otilde" => '\u{00F5}',
        "odieresis" => '\u{00F6}',
        "oslash" => '\u{00F8}',
        "ugrave" => '\u{00F9}',
        "uacute" => '\u{00FA}',
        "ucircumflex" => '\u{00FB}',
        "udieresis" => '\u{00FC}',
        "yacute" => '\u{00FD}',
        "thorn" => '\u{00FE}',
        "ydieresis" => '\u{00FF}',
        "germandbls" => '\u{00DF}',
        "dotlessi" => '\u{0131}',
        "lslash" => '\u{0142}',
        "oe" => '\u{0153}',
        "scaron" => '\u{0161}',
        "zcaron" => '\u{017E}',
        // Math and symbols (MacRoman repertoire)
        "notequal" => '\u{2260}',
        "infinity" => '\u{221E}',
        "lessequal" => '\u{2264}',
        "greaterequal" => '\u{2265}',
        "partialdiff" => '\u{2202}',
        "summation" => '\u{2211}',
        "product" => '\u{220F}',
        "pi" => '\u{03C0}',
        "integral" => '\u{222B}',
        "Omega" => '\u{2126}',
        "Delta" => '\u{2206}',
        "radical" => '\u{221A}',
        "approxequal" => '\u{2248}',
        "lozenge" => '\u{25CA}',
        "nbspace" => '\u{00A0}',
        _ => return None,
    };
    Some(ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_common_names() {
        assert_eq!(glyph_name_to_char("emdash"), Some('\u{2014}'));
        assert_eq!(glyph_name_to_char("Aacute"), Some('\u{00C1}'));
        assert_eq!(glyph_name_to_char("germandbls"), Some('\u{00DF}'));
        assert_eq!(glyph_name_to_char("seven"), Some('7'));
        assert_eq!(glyph_name_to_char("space"), Some(' '));
    }

    #[test]
    fn resolves_single_letter_names() {
        assert_eq!(glyph_name_to_char("A"), Some('A'));
        assert_eq!(glyph_name_to_char("z"), Some('z'));
    }

    #[test]
    fn resolves_uni_names() {
        assert_eq!(glyph_name_to_char("uni0041"), Some('A'));
        assert_eq!(glyph_name_to_char("uni2014"), Some('\u{2014}'));
        // Wrong digit count falls through to the table (and misses)
        assert_eq!(glyph_name_to_char("uni41"), None);
    }

    #[test]
    fn resolves_char_names() {
        assert_eq!(glyph_name_to_char("char41"), Some('A'));
        assert_eq!(glyph_name_to_char("char20"), Some(' '));
    }

    #[test]
    fn notdef_and_unknown_are_none() {
        assert_eq!(glyph_name_to_char(".notdef"), None);
        assert_eq!(glyph_name_to_char("g123"), None);
        assert_eq!(glyph_name_to_char(""), None);
    }

    #[test]
    fn ligature_names() {
        assert_eq!(glyph_name_to_char("fi"), Some('\u{FB01}'));
        assert_eq!(glyph_name_to_char("fl"), Some('\u{FB02}'));
    }
}
