mod common;

use common::{contains, solid_png};
use pdf_core::images::{ColorSpace, ImageFormat};
use pdf_core::{load_image, ImageError, PdfDocument};

// -------------------------------------------------------
// Decoding
// -------------------------------------------------------

#[test]
fn rgb_png_decodes_to_raw_pixels() {
    let img = load_image(solid_png(3, 2, 3)).unwrap();
    assert_eq!(img.format, ImageFormat::Png);
    assert_eq!(img.color_space, ColorSpace::DeviceRGB);
    assert_eq!((img.width, img.height), (3, 2));
    assert_eq!(img.data.len(), 3 * 2 * 3);
    assert!(img.smask_data.is_none());
}

#[test]
fn rgba_png_splits_alpha_channel() {
    let img = load_image(solid_png(5, 5, 4)).unwrap();
    assert_eq!(img.data.len(), 5 * 5 * 3);
    assert_eq!(img.smask_data.map(|a| a.len()), Some(25));
}

#[test]
fn gray_alpha_png_splits_alpha_channel() {
    let img = load_image(solid_png(2, 2, 2)).unwrap();
    assert_eq!(img.color_space, ColorSpace::DeviceGray);
    assert_eq!(img.data.len(), 4);
    assert_eq!(img.smask_data.map(|a| a.len()), Some(4));
}

#[test]
fn invalid_data_returns_error() {
    let result = load_image(vec![0x00, 0x01, 0x02, 0x03]);
    assert!(matches!(result, Err(ImageError::UnsupportedFormat)));
}

#[test]
fn empty_data_returns_error() {
    assert!(matches!(load_image(Vec::new()), Err(ImageError::TooShort)));
}

#[test]
fn corrupted_png_body_returns_error() {
    let mut bytes = solid_png(8, 8, 3);
    let len = bytes.len();
    bytes.truncate(len / 2);
    assert!(matches!(load_image(bytes), Err(ImageError::Png(_))));
}

// -------------------------------------------------------
// Embedding
// -------------------------------------------------------

#[test]
fn png_produces_image_xobject() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.embed_image(load_image(solid_png(4, 4, 3)).unwrap())
        .unwrap();
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    assert!(output.contains("/Subtype /Image"));
    assert!(output.contains("/ColorSpace /DeviceRGB"));
    assert!(output.contains("/Width 4 /Height 4"));
}

#[test]
fn rgba_png_produces_smask() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.embed_image(load_image(solid_png(4, 4, 4)).unwrap())
        .unwrap();
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    assert!(output.contains("/SMask"));
    assert!(output.contains("/ColorSpace /DeviceGray"));
}

#[test]
fn jpeg_is_embedded_with_dctdecode() {
    let jpeg = vec![
        0xFF, 0xD8, 0xFF, 0xC0, 0x00, 0x11, 0x08, 0x00, 0x10, 0x00, 0x10, 0x01, 0xFF, 0xD9,
    ];
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.set_compression(true);
    doc.embed_image(load_image(jpeg).unwrap()).unwrap();
    let bytes = doc.end_document().unwrap();
    assert!(contains(&bytes, b"/Filter /DCTDecode"));
    assert!(contains(&bytes, b"/ColorSpace /DeviceGray"));
}

#[test]
fn compressed_png_uses_flate() {
    let mut doc = PdfDocument::new(Vec::<u8>::new()).unwrap();
    doc.set_compression(true);
    doc.embed_image(load_image(solid_png(16, 16, 3)).unwrap())
        .unwrap();
    let bytes = doc.end_document().unwrap();
    assert!(contains(&bytes, b"/Filter /FlateDecode"));
}
