/// Example: read back a generated report and print its text.
///
/// Run `generate_profile_report` first to create the input file.
///
/// Run with:
///   cargo run --example read_report -p pdf-demos
use pdf_core::PdfReader;

fn main() {
    let path = "demos/output/user-profile.pdf";

    let reader = match std::fs::read(path)
        .map_err(|e| e.to_string())
        .and_then(|bytes| PdfReader::from_bytes(bytes).map_err(|e| e.to_string()))
    {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("Hint: run `cargo run --example generate_profile_report -p pdf-demos` first.");
            std::process::exit(1);
        }
    };

    println!("File:    {path}");
    println!("Version: PDF {}", reader.pdf_version());
    println!("Pages:   {}", reader.page_count());
    for page in 0..reader.page_count() {
        println!("\n── page {} ──", page + 1);
        match reader.page_text(page) {
            Ok(text) => print!("{text}"),
            Err(e) => eprintln!("Error: {e}"),
        }
    }
}
