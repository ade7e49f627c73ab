//! Minimal PDF generation for fixed-layout documents: built-in
//! Helvetica metrics, greedy word wrap, JPEG/PNG embedding, and a
//! small reader for checking what was written.

pub mod objects;
pub mod writer;
pub mod document;
pub mod fonts;
pub mod images;
pub mod reader;
pub mod textflow;

pub use document::PdfDocument;
pub use fonts::{BuiltinFont, FontMetrics};
pub use images::{load_image, ImageData, ImageError, ImageId};
pub use reader::{PdfReadError, PdfReader};
pub use textflow::{wrap, TextStyle};
