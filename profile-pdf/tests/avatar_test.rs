mod common;

use common::{contains, document_text, page_count, solid_png};
use pdf_core::{BuiltinFont, FontMetrics, ImageError};
use profile_pdf::{render_avatar_only, ErrorKind, ProfileRenderer, ReportConfig, ReportError};

fn uncompressed() -> ProfileRenderer {
    ProfileRenderer::new(ReportConfig {
        compress: false,
        ..ReportConfig::default()
    })
}

#[test]
fn renders_single_page_with_centered_image() {
    let pdf = uncompressed()
        .render_avatar_only(&solid_png(64, 64, 3), None)
        .unwrap();
    assert_eq!(page_count(&pdf), 1);
    assert!(contains(&pdf, b"220 0 0 220 196 350 cm\n/Im1 Do"));
    assert_eq!(document_text(&pdf), "");
}

#[test]
fn caption_is_drawn_below_image() {
    let pdf = uncompressed()
        .render_avatar_only(&solid_png(64, 64, 3), Some("Jane Doe"))
        .unwrap();
    assert_eq!(document_text(&pdf), "Jane Doe\n");
    assert!(contains(&pdf, b"/F2 18 Tf"));
    assert!(contains(&pdf, b" 320 Td\n(Jane Doe) Tj"));
}

#[test]
fn blank_caption_is_ignored() {
    let pdf = render_avatar_only(&solid_png(8, 8, 1), Some("   ")).unwrap();
    assert_eq!(document_text(&pdf), "");
}

#[test]
fn caption_whitespace_is_collapsed() {
    let pdf = uncompressed()
        .render_avatar_only(&solid_png(8, 8, 3), Some(" Jane\r\n\tDoe "))
        .unwrap();
    assert!(contains(&pdf, b"(Jane Doe) Tj"));
    assert!(!contains(&pdf, b"Jane\r"));
    assert_eq!(document_text(&pdf), "Jane Doe\n");
}

#[test]
fn long_caption_wraps_into_centered_lines() {
    let name = "Maximilian Alexander Konstantin von Hohenzollern-Sigmaringen";
    let pdf = uncompressed()
        .render_avatar_only(&solid_png(8, 8, 3), Some(name))
        .unwrap();
    assert_eq!(page_count(&pdf), 1);
    let text = document_text(&pdf);
    let lines: Vec<&str> = text.lines().collect();
    assert!(lines.len() > 1);
    assert_eq!(lines.join(" "), name);
    for line in &lines {
        let width = FontMetrics::measure_text(line, BuiltinFont::HelveticaBold, 18.0);
        assert!(width <= 512.0, "caption line {:?} is {} wide", line, width);
    }
    // Second line sits one caption line below the first.
    assert!(contains(&pdf, b" 294 Td\n("));
}

#[test]
fn transparent_avatar_keeps_its_alpha() {
    let pdf = render_avatar_only(&solid_png(8, 8, 4), Some("Jane")).unwrap();
    assert!(contains(&pdf, b"/SMask"));
}

#[test]
fn empty_image_is_rejected() {
    let err = render_avatar_only(&[], Some("Jane")).unwrap_err();
    assert!(matches!(err, ReportError::MissingImage));
    assert_eq!(err.kind(), ErrorKind::BadInput);
}

#[test]
fn corrupt_image_is_a_decode_error() {
    let err = render_avatar_only(b"GIF89a not really", None).unwrap_err();
    assert!(matches!(err, ReportError::Decode(ImageError::UnsupportedFormat)));
    assert_eq!(err.kind(), ErrorKind::BadInput);
}

#[test]
fn truncated_png_is_a_decode_error() {
    let mut png = solid_png(32, 32, 3);
    png.truncate(png.len() / 2);
    let err = render_avatar_only(&png, None).unwrap_err();
    assert!(matches!(err, ReportError::Decode(ImageError::Png(_))));
}

#[test]
fn jpeg_is_accepted() {
    // SOI, SOF0 with 8-bit precision, 16x16, 3 components, EOI.
    let jpeg = [
        0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x10, 0x00, 0x10, 0x03, 0xFF, 0xD9,
    ];
    let pdf = render_avatar_only(&jpeg, None).unwrap();
    assert!(contains(&pdf, b"/Filter /DCTDecode"));
}
