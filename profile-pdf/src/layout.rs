//! Page lifecycle: owns the document being written, the single open
//! page, and the vertical write cursor.

use std::io;

use pdf_core::{ImageData, ImageId, PdfDocument, TextStyle};
use tracing::debug;

use crate::config::ReportConfig;

/// Current write position. `y` is the baseline of the next line,
/// measured from the bottom edge of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCursor {
    pub y: f64,
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
}

impl RenderCursor {
    fn at_top(config: &ReportConfig) -> Self {
        RenderCursor {
            y: config.top(),
            page_width: config.page_width,
            page_height: config.page_height,
            margin: config.margin,
        }
    }

    pub fn top(&self) -> f64 {
        self.page_height - self.margin
    }

    /// Room left above the bottom margin.
    pub fn remaining(&self) -> f64 {
        self.y - self.margin
    }
}

/// One drawing operation against the open page.
#[derive(Debug, Clone, Copy)]
pub enum DrawOp<'a> {
    /// One line of text with its baseline at the cursor, starting
    /// `indent` points right of the left margin.
    Text {
        text: &'a str,
        style: TextStyle,
        indent: f64,
        advance: f64,
    },
    /// A square image whose top edge sits at the cursor.
    Image {
        image: ImageId,
        x: f64,
        size: f64,
        advance: f64,
    },
}

impl DrawOp<'_> {
    fn advance(&self) -> f64 {
        match self {
            DrawOp::Text { advance, .. } | DrawOp::Image { advance, .. } => *advance,
        }
    }
}

/// A document with exactly one page open for writing.
///
/// Holding a `PageLifecycle` means a page is open. [`close`](Self::close)
/// consumes it, finishing the last page and returning the serialized
/// document, so nothing can be drawn after the document is closed. If
/// the value is dropped without being closed (an early return or a
/// panic), the open page and the document are still finished; the
/// bytes are discarded.
pub struct PageLifecycle {
    doc: Option<PdfDocument<Vec<u8>>>,
    cursor: RenderCursor,
    blank: bool,
}

impl PageLifecycle {
    /// Start a new document with its first page open and the cursor
    /// at the top margin.
    pub fn open(config: &ReportConfig) -> io::Result<Self> {
        let mut doc = PdfDocument::new(Vec::new())?;
        doc.set_compression(config.compress);
        doc.set_info("Title", &config.title)
            .set_info("Creator", &config.creator)
            .set_info("Producer", "pdf-core");
        doc.begin_page(config.page_width, config.page_height)?;
        Ok(PageLifecycle {
            doc: Some(doc),
            cursor: RenderCursor::at_top(config),
            blank: true,
        })
    }

    pub fn cursor(&self) -> RenderCursor {
        self.cursor
    }

    pub fn page_count(&self) -> usize {
        self.doc.as_ref().map_or(0, |doc| doc.page_count())
    }

    /// Make sure `required` points fit above the bottom margin, moving
    /// to a fresh page if they do not. A page nothing has been drawn
    /// on is never replaced, so a block taller than a whole page is
    /// drawn from the top of one page rather than looping.
    pub fn ensure_space(&mut self, required: f64) -> io::Result<()> {
        if self.blank || self.cursor.y - required >= self.cursor.margin {
            return Ok(());
        }
        let (width, height) = (self.cursor.page_width, self.cursor.page_height);
        self.doc_mut().begin_page(width, height)?;
        self.cursor.y = self.cursor.top();
        self.blank = true;
        debug!(page = self.page_count(), required, "started new page");
        Ok(())
    }

    /// Draw on the open page, then move the cursor down by the
    /// operation's advance.
    pub fn write(&mut self, op: DrawOp<'_>) {
        let y = self.cursor.y;
        let margin = self.cursor.margin;
        let doc = self.doc_mut();
        match op {
            DrawOp::Text {
                text,
                style,
                indent,
                ..
            } => {
                doc.place_text_styled(text, margin + indent, y, &style);
            }
            DrawOp::Image { image, x, size, .. } => {
                doc.place_image(image, x, y - size, size, size);
            }
        }
        self.blank = false;
        self.advance(op.advance());
    }

    /// Move the cursor down without drawing.
    pub fn advance(&mut self, dy: f64) {
        self.cursor.y -= dy;
    }

    /// Write an image into the document so pages can place it.
    pub fn embed_image(&mut self, image: ImageData) -> io::Result<ImageId> {
        self.doc_mut().embed_image(image)
    }

    /// Finish the last page and serialize the document.
    pub fn close(mut self) -> io::Result<Vec<u8>> {
        match self.doc.take() {
            Some(doc) => doc.end_document(),
            None => Ok(Vec::new()),
        }
    }

    fn doc_mut(&mut self) -> &mut PdfDocument<Vec<u8>> {
        self.doc
            .as_mut()
            .expect("document is present until the lifecycle is closed")
    }
}

impl Drop for PageLifecycle {
    fn drop(&mut self) {
        if let Some(doc) = self.doc.take() {
            debug!("finishing document that was not closed");
            let _ = doc.end_document();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdf_core::PdfReader;

    fn line(text: &str) -> DrawOp<'_> {
        DrawOp::Text {
            text,
            style: TextStyle::default(),
            indent: 0.0,
            advance: 20.0,
        }
    }

    #[test]
    fn opens_with_cursor_at_top_margin() {
        let pages = PageLifecycle::open(&ReportConfig::default()).unwrap();
        assert_eq!(pages.cursor().y, 742.0);
        assert_eq!(pages.cursor().remaining(), 692.0);
        assert_eq!(pages.page_count(), 1);
    }

    #[test]
    fn ensure_space_is_noop_when_room_remains() {
        let mut pages = PageLifecycle::open(&ReportConfig::default()).unwrap();
        pages.write(line("first"));
        pages.ensure_space(600.0).unwrap();
        assert_eq!(pages.page_count(), 1);
        assert_eq!(pages.cursor().y, 722.0);
    }

    #[test]
    fn ensure_space_breaks_when_room_runs_out() {
        let mut pages = PageLifecycle::open(&ReportConfig::default()).unwrap();
        pages.write(line("first"));
        pages.advance(600.0);
        pages.ensure_space(100.0).unwrap();
        assert_eq!(pages.page_count(), 2);
        assert_eq!(pages.cursor().y, 742.0);
    }

    #[test]
    fn blank_page_is_never_replaced() {
        let mut pages = PageLifecycle::open(&ReportConfig::default()).unwrap();
        pages.ensure_space(5000.0).unwrap();
        pages.ensure_space(5000.0).unwrap();
        assert_eq!(pages.page_count(), 1);
    }

    #[test]
    fn close_keeps_every_page_and_line() {
        let mut pages = PageLifecycle::open(&ReportConfig::default()).unwrap();
        for i in 0..80 {
            pages.ensure_space(20.0).unwrap();
            pages.write(line(&format!("line {}", i)));
        }
        let count = pages.page_count();
        let bytes = pages.close().unwrap();

        let reader = PdfReader::from_bytes(bytes).unwrap();
        assert_eq!(reader.page_count(), count);
        assert!(count > 1);
        let text = reader.text().unwrap();
        for i in 0..80 {
            assert!(text.contains(&format!("line {}\n", i)));
        }
    }
}
