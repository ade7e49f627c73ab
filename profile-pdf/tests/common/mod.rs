#![allow(dead_code)]

/// Encode a solid-color PNG in memory. `channels` selects the color
/// type: 1 gray, 2 gray+alpha, 3 RGB, 4 RGBA.
pub fn solid_png(width: u32, height: u32, channels: usize) -> Vec<u8> {
    let color_type = match channels {
        1 => png::ColorType::Grayscale,
        2 => png::ColorType::GrayscaleAlpha,
        3 => png::ColorType::Rgb,
        4 => png::ColorType::Rgba,
        n => panic!("unsupported channel count {}", n),
    };
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        let pixels = vec![0x80u8; (width * height) as usize * channels];
        writer.write_image_data(&pixels).unwrap();
    }
    out
}

/// Check that a byte pattern exists in the buffer.
pub fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

/// Every line of text shown in the document, across all pages.
pub fn document_text(pdf: &[u8]) -> String {
    pdf_core::PdfReader::from_bytes(pdf.to_vec())
        .unwrap()
        .text()
        .unwrap()
}

pub fn page_count(pdf: &[u8]) -> usize {
    pdf_core::PdfReader::from_bytes(pdf.to_vec())
        .unwrap()
        .page_count()
}
