use std::fs;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use profile_pdf::{DocumentKind, ErrorKind, ProfileRenderer, ProfileReport, ReportConfig, ReportError};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "profile-pdf", version, about = "Render user profile documents as PDF")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Full profile report from a JSON payload
    Report {
        /// Profile payload (JSON)
        #[arg(long)]
        data: PathBuf,
        /// Avatar image (PNG or JPEG); left out of the report if it cannot be decoded
        #[arg(long)]
        image: Option<PathBuf>,
        /// Output file [default: user-profile.pdf]
        #[arg(long)]
        out: Option<PathBuf>,
        /// Write uncompressed content streams
        #[arg(long, default_value_t = false)]
        no_compress: bool,
    },
    /// One-page document with the avatar and an optional caption
    Avatar {
        /// Avatar image (PNG or JPEG)
        #[arg(long)]
        image: PathBuf,
        /// Caption drawn under the image
        #[arg(long)]
        name: Option<String>,
        /// Output file [default: avatar.pdf]
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        let code = match e.kind() {
            ErrorKind::BadInput => 2,
            ErrorKind::Unexpected => 1,
        };
        process::exit(code);
    }
}

fn run(cli: Cli) -> Result<(), ReportError> {
    match cli.command {
        Command::Report {
            data,
            image,
            out,
            no_compress,
        } => {
            let report = ProfileReport::from_json(&fs::read_to_string(&data)?)?;
            let image = image.map(fs::read).transpose()?;
            let renderer = ProfileRenderer::new(ReportConfig {
                compress: !no_compress,
                ..ReportConfig::default()
            });
            let pdf = renderer.render(image.as_deref(), &report)?;
            write_output(out, DocumentKind::ProfileReport, &pdf)
        }
        Command::Avatar { image, name, out } => {
            let bytes = fs::read(&image)?;
            let pdf = ProfileRenderer::default().render_avatar_only(&bytes, name.as_deref())?;
            write_output(out, DocumentKind::Avatar, &pdf)
        }
    }
}

fn write_output(out: Option<PathBuf>, kind: DocumentKind, pdf: &[u8]) -> Result<(), ReportError> {
    let path = out.unwrap_or_else(|| PathBuf::from(kind.file_name()));
    fs::write(&path, pdf)?;
    info!(path = %path.display(), bytes = pdf.len(), "wrote {}", kind.content_type());
    Ok(())
}
