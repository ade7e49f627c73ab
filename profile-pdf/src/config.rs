use pdf_core::TextStyle;

/// Fixed layout constants and output switches for one render.
///
/// All lengths are in points. `Default` gives US Letter with a 50pt
/// margin, which is what every document is normally rendered with.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportConfig {
    pub page_width: f64,
    pub page_height: f64,
    /// Outer margin on all four sides.
    pub margin: f64,
    /// Baseline advance for one body line.
    pub line_height: f64,
    /// Edge of the square avatar drawn inside the profile report.
    pub avatar_size: f64,
    /// Edge of the square image in the avatar-only document.
    pub avatar_only_size: f64,
    /// Flate-compress content streams and raw image data.
    pub compress: bool,
    pub title: String,
    pub creator: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            page_width: 612.0,
            page_height: 792.0,
            margin: 50.0,
            line_height: TextStyle::default().line_height(),
            avatar_size: 100.0,
            avatar_only_size: 220.0,
            compress: true,
            title: "User Profile".to_string(),
            creator: "profile-pdf".to_string(),
        }
    }
}

impl ReportConfig {
    /// Horizontal room between the left and right margins.
    pub fn content_width(&self) -> f64 {
        self.page_width - 2.0 * self.margin
    }

    /// Baseline of the first line on every page.
    pub fn top(&self) -> f64 {
        self.page_height - self.margin
    }
}
