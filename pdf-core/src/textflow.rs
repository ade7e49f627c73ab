use crate::fonts::{BuiltinFont, FontMetrics};

/// Extra vertical space added below the font size to get the
/// distance between consecutive baselines.
pub const LEADING: f64 = 8.0;

/// Text styling options.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: BuiltinFont,
    pub font_size: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            font: BuiltinFont::Helvetica,
            font_size: 12.0,
        }
    }
}

impl TextStyle {
    pub fn new(font: BuiltinFont, font_size: f64) -> Self {
        TextStyle { font, font_size }
    }

    /// Baseline-to-baseline distance for one line of this style.
    /// 12pt text advances by 20 units.
    pub fn line_height(&self) -> f64 {
        self.font_size + LEADING
    }

    /// Rendered width of `text` in this style, in points.
    pub fn measure(&self, text: &str) -> f64 {
        FontMetrics::measure_text(text, self.font, self.font_size)
    }
}

/// Greedy word wrap.
///
/// Splits `text` on whitespace and fills each line with as many
/// words as fit within `max_width`. A word wider than
/// `max_width` is placed alone on its own line; words are
/// never broken. Words on a line are joined by single spaces,
/// so joining the returned lines with spaces reproduces the
/// whitespace-normalized input.
///
/// Returns an empty list for empty or whitespace-only input.
pub fn wrap(
    text: &str,
    font: BuiltinFont,
    font_size: f64,
    max_width: f64,
) -> Vec<String> {
    let space_width = FontMetrics::measure_text(" ", font, font_size);
    let mut lines = Vec::new();
    let mut line = String::new();
    let mut line_width = 0.0;

    for word in text.split_whitespace() {
        let word_width = FontMetrics::measure_text(word, font, font_size);
        if line.is_empty() {
            line.push_str(word);
            line_width = word_width;
            continue;
        }

        let candidate = line_width + space_width + word_width;
        if candidate > max_width {
            lines.push(std::mem::take(&mut line));
            line.push_str(word);
            line_width = word_width;
        } else {
            line.push(' ');
            line.push_str(word);
            line_width = candidate;
        }
    }

    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_height_includes_leading() {
        assert_eq!(TextStyle::default().line_height(), 20.0);
        let heading = TextStyle::new(BuiltinFont::HelveticaBold, 16.0);
        assert_eq!(heading.line_height(), 24.0);
    }

    #[test]
    fn measure_uses_style_font() {
        let regular = TextStyle::default();
        let bold = TextStyle::new(BuiltinFont::HelveticaBold, 12.0);
        assert!(bold.measure("Mileage") > regular.measure("Mileage"));
    }

    #[test]
    fn internal_whitespace_is_collapsed() {
        let lines = wrap("a  b\tc\n d", BuiltinFont::Helvetica, 12.0, 500.0);
        assert_eq!(lines, vec!["a b c d".to_string()]);
    }
}
