use std::fmt;

/// Opaque handle to an image embedded in a PdfDocument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub usize);

impl ImageId {
    /// Resource name used for this image in page content streams.
    pub fn pdf_name(&self) -> String {
        format!("Im{}", self.0 + 1)
    }
}

/// Supported image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

/// PDF color space for image data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceRGB,
    DeviceGray,
}

impl ColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceGray => "DeviceGray",
        }
    }
}

/// Reasons raw bytes could not be turned into an embeddable image.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageError {
    /// Fewer bytes than any image signature.
    TooShort,
    /// The bytes are neither JPEG nor PNG.
    UnsupportedFormat,
    /// JPEG headers are missing or malformed.
    Jpeg(String),
    /// The PNG decoder rejected the data.
    Png(String),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::TooShort => write!(f, "image data too short to detect format"),
            ImageError::UnsupportedFormat => {
                write!(f, "unsupported image format (expected JPEG or PNG)")
            }
            ImageError::Jpeg(msg) => write!(f, "JPEG error: {}", msg),
            ImageError::Png(msg) => write!(f, "PNG error: {}", msg),
        }
    }
}

impl std::error::Error for ImageError {}

/// Parsed image data ready for embedding into a PDF.
pub struct ImageData {
    pub width: u32,
    pub height: u32,
    pub format: ImageFormat,
    pub color_space: ColorSpace,
    pub bits_per_component: u8,
    /// Raw pixel data (RGB/Gray) or raw JPEG bytes.
    pub data: Vec<u8>,
    /// Separate alpha channel (grayscale), if present.
    pub smask_data: Option<Vec<u8>>,
}

/// Detect image format from magic bytes.
pub fn detect_format(data: &[u8]) -> Result<ImageFormat, ImageError> {
    if data.len() < 4 {
        return Err(ImageError::TooShort);
    }
    if data[0] == 0xFF && data[1] == 0xD8 {
        Ok(ImageFormat::Jpeg)
    } else if data[..4] == [0x89, 0x50, 0x4E, 0x47] {
        Ok(ImageFormat::Png)
    } else {
        Err(ImageError::UnsupportedFormat)
    }
}

/// Decode raw bytes into embeddable image data.
pub fn load_image(data: Vec<u8>) -> Result<ImageData, ImageError> {
    match detect_format(&data)? {
        ImageFormat::Jpeg => parse_jpeg(data),
        ImageFormat::Png => parse_png(data),
    }
}

/// Parse JPEG SOF marker to extract dimensions and color space.
/// JPEG data is embedded as-is (DCTDecode); no pixel decoding needed.
fn parse_jpeg(data: Vec<u8>) -> Result<ImageData, ImageError> {
    let (width, height, components) = jpeg_dimensions(&data)?;
    if width == 0 || height == 0 {
        return Err(ImageError::Jpeg("zero image dimension".to_string()));
    }
    let color_space = match components {
        1 => ColorSpace::DeviceGray,
        3 => ColorSpace::DeviceRGB,
        n => {
            return Err(ImageError::Jpeg(format!(
                "unsupported component count: {} (expected 1 or 3)",
                n
            )))
        }
    };

    Ok(ImageData {
        width,
        height,
        format: ImageFormat::Jpeg,
        color_space,
        bits_per_component: 8,
        data,
        smask_data: None,
    })
}

/// Scan JPEG data for SOF0-SOF3 markers and extract width/height/components.
fn jpeg_dimensions(data: &[u8]) -> Result<(u32, u32, u8), ImageError> {
    let len = data.len();
    let mut i = 0;
    while i + 1 < len {
        if data[i] != 0xFF {
            i += 1;
            continue;
        }
        let marker = data[i + 1];
        // SOF0 (0xC0) through SOF3 (0xC3): baseline, extended, progressive, lossless
        if (0xC0..=0xC3).contains(&marker) {
            if i + 9 >= len {
                return Err(ImageError::Jpeg("SOF marker truncated".to_string()));
            }
            let height = u16::from_be_bytes([data[i + 5], data[i + 6]]) as u32;
            let width = u16::from_be_bytes([data[i + 7], data[i + 8]]) as u32;
            let components = data[i + 9];
            return Ok((width, height, components));
        }
        if marker == 0xFF || marker == 0x00 {
            i += 1;
            continue;
        }
        // Standalone markers (no length)
        if marker == 0xD8 || marker == 0xD9 || (0xD0..=0xD7).contains(&marker) {
            i += 2;
            continue;
        }
        if i + 3 >= len {
            break;
        }
        let seg_len = u16::from_be_bytes([data[i + 2], data[i + 3]]) as usize;
        i += 2 + seg_len;
    }
    Err(ImageError::Jpeg("no SOF marker found".to_string()))
}

/// Decode PNG using the `png` crate into 8-bit gray or RGB pixels
/// with any alpha channel split out as an SMask.
fn parse_png(data: Vec<u8>) -> Result<ImageData, ImageError> {
    let mut decoder = png::Decoder::new(data.as_slice());
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| ImageError::Png(e.to_string()))?;

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| ImageError::Png(e.to_string()))?;
    buf.truncate(info.buffer_size());

    let (color_space, channels, has_alpha) = match info.color_type {
        png::ColorType::Rgb => (ColorSpace::DeviceRGB, 3, false),
        png::ColorType::Rgba => (ColorSpace::DeviceRGB, 4, true),
        png::ColorType::Grayscale => (ColorSpace::DeviceGray, 1, false),
        png::ColorType::GrayscaleAlpha => (ColorSpace::DeviceGray, 2, true),
        other => {
            return Err(ImageError::Png(format!(
                "unsupported color type after expansion: {:?}",
                other
            )))
        }
    };

    let (pixels, smask_data) = if has_alpha {
        let color_channels = channels - 1;
        let pixel_count = (info.width * info.height) as usize;
        let mut color = Vec::with_capacity(pixel_count * color_channels);
        let mut alpha = Vec::with_capacity(pixel_count);
        for chunk in buf.chunks_exact(channels) {
            color.extend_from_slice(&chunk[..color_channels]);
            alpha.push(chunk[color_channels]);
        }
        (color, Some(alpha))
    } else {
        (buf, None)
    };

    Ok(ImageData {
        width: info.width,
        height: info.height,
        format: ImageFormat::Png,
        color_space,
        bits_per_component: 8,
        data: pixels,
        smask_data,
    })
}
