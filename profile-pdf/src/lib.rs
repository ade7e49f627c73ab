//! Renders a user's profile data into a paginated PDF report, and a
//! single avatar image into a one-page PDF.
//!
//! ```no_run
//! use profile_pdf::{render, ProfileReport};
//!
//! let report = ProfileReport::from_json(r#"{"totalCars": 0}"#).unwrap();
//! let pdf = render(None, &report).unwrap();
//! std::fs::write("user-profile.pdf", pdf).unwrap();
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod format;
pub mod layout;
pub mod model;
pub mod sections;

pub use assembler::{DocumentKind, ProfileRenderer, CONTENT_TYPE};
pub use config::ReportConfig;
pub use error::{ErrorKind, ReportError};
pub use layout::{DrawOp, PageLifecycle, RenderCursor};
pub use model::{CarSummary, MaintenanceSummary, ProfileReport, UserSummary};

/// Render the full profile report with the default layout.
pub fn render(image_bytes: Option<&[u8]>, report: &ProfileReport) -> Result<Vec<u8>, ReportError> {
    ProfileRenderer::default().render(image_bytes, report)
}

/// Render the one-page avatar document with the default layout.
pub fn render_avatar_only(image_bytes: &[u8], label: Option<&str>) -> Result<Vec<u8>, ReportError> {
    ProfileRenderer::default().render_avatar_only(image_bytes, label)
}
