use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use pdf_core::{load_image, wrap, BuiltinFont, TextStyle};
use tracing::{error, info, warn};

use crate::config::ReportConfig;
use crate::error::ReportError;
use crate::layout::{DrawOp, PageLifecycle};
use crate::model::ProfileReport;
use crate::sections;

/// MIME type of every generated document.
pub const CONTENT_TYPE: &str = "application/pdf";

/// Bottom edge of the image in the avatar-only document.
const AVATAR_ONLY_BOTTOM: f64 = 350.0;
const CAPTION_SIZE: f64 = 18.0;
const CAPTION_OFFSET: f64 = 30.0;

/// The two documents the engine produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Avatar,
    ProfileReport,
}

impl DocumentKind {
    /// Suggested download name.
    pub fn file_name(&self) -> &'static str {
        match self {
            DocumentKind::Avatar => "avatar.pdf",
            DocumentKind::ProfileReport => "user-profile.pdf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        CONTENT_TYPE
    }
}

/// Renders profile documents with a fixed layout configuration.
///
/// Each call builds its own document and page lifecycle, so one
/// renderer can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct ProfileRenderer {
    config: ReportConfig,
}

impl ProfileRenderer {
    pub fn new(config: ReportConfig) -> Self {
        ProfileRenderer { config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Render the full profile report: title, optional avatar, user
    /// information, statistics, car and maintenance lists, and the
    /// generation timestamp, paginated as needed.
    ///
    /// Missing optional fields never cause an error, and an avatar
    /// that cannot be decoded is left out.
    pub fn render(
        &self,
        image_bytes: Option<&[u8]>,
        report: &ProfileReport,
    ) -> Result<Vec<u8>, ReportError> {
        info!(
            cars = report.cars.len(),
            maintenance_records = report.maintenance_records.len(),
            with_avatar = image_bytes.is_some_and(|b| !b.is_empty()),
            "rendering profile report"
        );
        if !report.totals_match_lists() {
            warn!(
                total_cars = report.total_cars,
                listed_cars = report.cars.len(),
                total_maintenance_records = report.total_maintenance_records,
                listed_maintenance_records = report.maintenance_records.len(),
                "report totals disagree with its lists; rendering totals as given"
            );
        }
        guarded(DocumentKind::ProfileReport, || {
            self.render_sections(image_bytes, report)
        })
    }

    /// Render a single page holding the image centered horizontally,
    /// with `label` as a bold caption underneath when it is not blank.
    /// The caption's whitespace is collapsed and each wrapped line is
    /// centered.
    ///
    /// Fails with [`ReportError::MissingImage`] for empty input and
    /// [`ReportError::Decode`] when the bytes are not an image.
    pub fn render_avatar_only(
        &self,
        image_bytes: &[u8],
        label: Option<&str>,
    ) -> Result<Vec<u8>, ReportError> {
        info!(bytes = image_bytes.len(), "rendering avatar document");
        guarded(DocumentKind::Avatar, || {
            if image_bytes.is_empty() {
                return Err(ReportError::MissingImage);
            }
            let decoded = load_image(image_bytes.to_vec())?;

            let config = &self.config;
            let size = config.avatar_only_size;
            let mut pages = PageLifecycle::open(config)?;
            let image = pages.embed_image(decoded)?;

            let top = AVATAR_ONLY_BOTTOM + size;
            pages.advance(pages.cursor().y - top);
            pages.write(DrawOp::Image {
                image,
                x: (config.page_width - size) / 2.0,
                size,
                advance: size + CAPTION_OFFSET,
            });

            let style = TextStyle::new(BuiltinFont::HelveticaBold, CAPTION_SIZE);
            let caption = wrap(
                label.unwrap_or_default(),
                style.font,
                style.font_size,
                config.content_width(),
            );
            for line in &caption {
                pages.ensure_space(style.line_height())?;
                let left = (config.page_width - style.measure(line)) / 2.0;
                pages.write(DrawOp::Text {
                    text: line,
                    style,
                    indent: (left - config.margin).max(0.0),
                    advance: style.line_height(),
                });
            }
            Ok(pages.close()?)
        })
    }

    fn render_sections(
        &self,
        image_bytes: Option<&[u8]>,
        report: &ProfileReport,
    ) -> Result<Vec<u8>, ReportError> {
        let config = &self.config;
        let mut pages = PageLifecycle::open(config)?;

        sections::title(&mut pages);
        sections::avatar(&mut pages, config, image_bytes)?;
        if let Some(user) = &report.subject {
            sections::user_info(&mut pages, config, user)?;
        }
        sections::statistics(&mut pages, config, report)?;
        sections::cars(&mut pages, config, &report.cars)?;
        sections::maintenance(&mut pages, config, &report.maintenance_records)?;
        sections::footer(&mut pages, report)?;

        let page_count = pages.page_count();
        let bytes = pages.close()?;
        info!(pages = page_count, "laid out profile report");
        Ok(bytes)
    }
}

/// Run one render, turning a panic into [`ReportError::Internal`] and
/// logging the outcome.
fn guarded<F>(kind: DocumentKind, render: F) -> Result<Vec<u8>, ReportError>
where
    F: FnOnce() -> Result<Vec<u8>, ReportError>,
{
    let result = panic::catch_unwind(AssertUnwindSafe(render))
        .unwrap_or_else(|payload| Err(ReportError::Internal(panic_message(payload))));
    match &result {
        Ok(bytes) => info!(document = kind.file_name(), bytes = bytes.len(), "document generated"),
        Err(e) => error!(document = kind.file_name(), error = %e, "document generation failed"),
    }
    result
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg.to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "render panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_names() {
        assert_eq!(DocumentKind::Avatar.file_name(), "avatar.pdf");
        assert_eq!(DocumentKind::ProfileReport.file_name(), "user-profile.pdf");
        assert_eq!(DocumentKind::Avatar.content_type(), "application/pdf");
    }

    #[test]
    fn panic_becomes_internal_error() {
        let result = guarded(DocumentKind::ProfileReport, || panic!("layout bug"));
        match result {
            Err(ReportError::Internal(msg)) => assert_eq!(msg, "layout bug"),
            other => panic!("expected Internal, got {:?}", other),
        }
    }

    #[test]
    fn errors_pass_through_unchanged() {
        let result = guarded(DocumentKind::Avatar, || Err(ReportError::MissingImage));
        assert!(matches!(result, Err(ReportError::MissingImage)));
    }
}
