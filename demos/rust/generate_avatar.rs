/// Example: one-page avatar document with a caption.
///
/// Run with:
///   cargo run --example generate_avatar -p pdf-demos
///
/// Opens output at: demos/output/avatar.pdf
use profile_pdf::DocumentKind;

/// A 128x128 RGBA disc on a transparent background, encoded as PNG.
fn disc_png() -> Vec<u8> {
    let size = 128u32;
    let r = size as f64 / 2.0;
    let mut pixels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f64 + 0.5 - r;
            let dy = y as f64 + 0.5 - r;
            let alpha = if dx * dx + dy * dy <= r * r { 255 } else { 0 };
            pixels.extend_from_slice(&[30, 58, 95, alpha]);
        }
    }
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, size, size);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("png header");
        writer.write_image_data(&pixels).expect("png data");
    }
    out
}

fn main() {
    std::fs::create_dir_all("demos/output").unwrap();
    let path = format!("demos/output/{}", DocumentKind::Avatar.file_name());

    let pdf = profile_pdf::render_avatar_only(&disc_png(), Some("Jane Doe")).expect("render avatar");
    std::fs::write(&path, &pdf).expect("write PDF");
    println!("Written to {}", path);
}
