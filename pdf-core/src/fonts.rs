/// The Helvetica faces of the 14 standard PDF fonts.
/// These are guaranteed available in all PDF viewers
/// without embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BuiltinFont {
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
}

impl BuiltinFont {
    /// Every face, in resource-name order.
    pub const ALL: [BuiltinFont; 4] = [
        BuiltinFont::Helvetica,
        BuiltinFont::HelveticaBold,
        BuiltinFont::HelveticaOblique,
        BuiltinFont::HelveticaBoldOblique,
    ];

    /// Returns the PDF resource name used in content streams
    /// (e.g. "F1"). Fixed mapping by variant order.
    pub fn pdf_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "F1",
            BuiltinFont::HelveticaBold => "F2",
            BuiltinFont::HelveticaOblique => "F3",
            BuiltinFont::HelveticaBoldOblique => "F4",
        }
    }

    /// Returns the PDF BaseFont name (e.g. "Helvetica-Bold").
    pub fn pdf_base_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::HelveticaBold => "Helvetica-Bold",
            BuiltinFont::HelveticaOblique => "Helvetica-Oblique",
            BuiltinFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
        }
    }

    fn is_bold(&self) -> bool {
        matches!(
            self,
            BuiltinFont::HelveticaBold | BuiltinFont::HelveticaBoldOblique
        )
    }
}

/// Character widths for Helvetica (ASCII 32..=126) in units of 1/1000 em.
/// Source: Adobe Helvetica AFM data.
#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9 : ; < = > ?
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    // @ A-O
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    // P-Z [ \ ] ^ _
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    // ` a-o
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    // p-z { | } ~
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Character widths for Helvetica-Bold (ASCII 32..=126) in 1/1000 em.
/// Source: Adobe Helvetica-Bold AFM data.
#[rustfmt::skip]
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    // space ! " # $ % & ' ( ) * + , - . /
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0-9 : ; < = > ?
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    // @ A-O
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    // P-Z [ \ ] ^ _
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    // ` a-o
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    // p-z { | } ~
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Widths for WinAnsi codes 0x80..=0xFF in Helvetica. Unassigned
/// slots hold the bullet width.
/// Source: Adobe Helvetica AFM data.
#[rustfmt::skip]
const HELVETICA_HIGH_WIDTHS: [u16; 128] = [
    // 0x80: Euro , florin ,, ... dagger daggerdbl circumflex perthousand Scaron < OE . Zcaron .
    556, 350, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350,
    // 0x90: . ' ' " " bullet endash emdash tilde trademark scaron > oe . zcaron Ydieresis
    350, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 350, 500, 667,
    // 0xA0: nbsp ¡ ¢ £ ¤ ¥ ¦ § ¨ © ª « ¬ shy ® ¯
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // 0xB0: ° ± ² ³ ´ µ ¶ · ¸ ¹ º » ¼ ½ ¾ ¿
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 0xC0: À-Ï
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // 0xD0: Ð-ß
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 0xE0: à-ï
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    // 0xF0: ð-ÿ
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

/// Widths for WinAnsi codes 0x80..=0xFF in Helvetica-Bold.
/// Source: Adobe Helvetica-Bold AFM data.
#[rustfmt::skip]
const HELVETICA_BOLD_HIGH_WIDTHS: [u16; 128] = [
    // 0x80
    556, 350, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 350, 611, 350,
    // 0x90
    350, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 350, 500, 667,
    // 0xA0
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    // 0xB0
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    // 0xC0
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    // 0xD0
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    // 0xE0
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278,
    // 0xF0
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556,
];

/// Glyph drawn for characters WinAnsi cannot encode.
pub const FALLBACK_GLYPH: u8 = b'?';

/// Font metrics for built-in PDF fonts.
pub struct FontMetrics;

impl FontMetrics {
    /// Returns the width of a character in 1/1000 em units.
    /// Characters without a WinAnsi code are measured as the
    /// `?` they are drawn as.
    pub fn char_width(font: BuiltinFont, ch: char) -> u16 {
        let code = winansi_encode(ch).unwrap_or(FALLBACK_GLYPH);
        Self::code_width(font, code)
    }

    /// Width of a WinAnsi code in 1/1000 em units.
    pub fn code_width(font: BuiltinFont, code: u8) -> u16 {
        match (code, font.is_bold()) {
            (0x20..=0x7E, false) => HELVETICA_WIDTHS[(code - 0x20) as usize],
            (0x20..=0x7E, true) => HELVETICA_BOLD_WIDTHS[(code - 0x20) as usize],
            (0x80..=0xFF, false) => HELVETICA_HIGH_WIDTHS[(code - 0x80) as usize],
            (0x80..=0xFF, true) => HELVETICA_BOLD_HIGH_WIDTHS[(code - 0x80) as usize],
            // Control codes and DEL are never emitted.
            _ => Self::code_width(font, FALLBACK_GLYPH),
        }
    }

    /// Measures the width of a text string in points.
    pub fn measure_text(text: &str, font: BuiltinFont, font_size: f64) -> f64 {
        let total: u32 = text
            .chars()
            .map(|ch| Self::char_width(font, ch) as u32)
            .sum();
        total as f64 * font_size / 1000.0
    }
}

/// Code points 0x80..=0x9F of WinAnsiEncoding. Zero marks an
/// unassigned slot.
#[rustfmt::skip]
const WINANSI_HIGH: [u16; 32] = [
    0x20AC, 0, 0x201A, 0x0192, 0x201E, 0x2026, 0x2020, 0x2021,
    0x02C6, 0x2030, 0x0160, 0x2039, 0x0152, 0, 0x017D, 0,
    0, 0x2018, 0x2019, 0x201C, 0x201D, 0x2022, 0x2013, 0x2014,
    0x02DC, 0x2122, 0x0161, 0x203A, 0x0153, 0, 0x017E, 0x0178,
];

/// Map a character to its single-byte WinAnsiEncoding code.
/// Returns None for characters the standard fonts cannot show.
pub fn winansi_encode(ch: char) -> Option<u8> {
    let code = ch as u32;
    match code {
        0x20..=0x7E | 0xA0..=0xFF => Some(code as u8),
        _ => WINANSI_HIGH
            .iter()
            .position(|&c| c != 0 && c as u32 == code)
            .map(|i| 0x80 + i as u8),
    }
}

/// Map a WinAnsiEncoding byte back to the character it shows.
pub fn winansi_decode(byte: u8) -> char {
    match byte {
        0x80..=0x9F => {
            let code = WINANSI_HIGH[(byte - 0x80) as usize];
            char::from_u32(code as u32)
                .filter(|_| code != 0)
                .unwrap_or('\u{FFFD}')
        }
        _ => byte as char,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bullet_round_trips_through_winansi() {
        assert_eq!(winansi_encode('\u{2022}'), Some(0x95));
        assert_eq!(winansi_decode(0x95), '\u{2022}');
    }

    #[test]
    fn latin1_maps_to_itself() {
        assert_eq!(winansi_encode('\u{e9}'), Some(0xE9));
        assert_eq!(winansi_decode(0xE9), '\u{e9}');
    }

    #[test]
    fn unencodable_chars_are_rejected() {
        assert_eq!(winansi_encode('\u{4e2d}'), None);
        assert_eq!(winansi_encode('\n'), None);
    }

    #[test]
    fn euro_sign_uses_high_table() {
        assert_eq!(winansi_encode('\u{20AC}'), Some(0x80));
    }

    #[test]
    fn oblique_shares_regular_widths() {
        assert_eq!(
            FontMetrics::char_width(BuiltinFont::HelveticaOblique, 'W'),
            FontMetrics::char_width(BuiltinFont::Helvetica, 'W'),
        );
    }
}
