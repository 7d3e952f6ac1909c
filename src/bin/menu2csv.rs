use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use menu_pdf_to_csv::{ConvertError, ConvertOptions, MenuConversion, convert_menu_pdf};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "menu2csv",
    version,
    about = "Convert restaurant menu PDFs into allergy-annotated CSV"
)]
struct Cli {
    /// Input PDF path.
    pdf: Option<PathBuf>,

    /// Optional 1-indexed page number; anything non-numeric is ignored.
    page: Option<String>,
}

/// The page argument is honored only when it is all decimal digits;
/// everything else falls back to whole-document processing.
fn parse_page(page: Option<&str>) -> Option<u32> {
    page.filter(|value| !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit()))
        .and_then(|value| value.parse().ok())
}

fn run(cli: &Cli) -> Result<MenuConversion, ConvertError> {
    let Some(input_pdf) = cli.pdf.as_deref() else {
        return Err(ConvertError::MissingPath);
    };

    let options = ConvertOptions {
        page: parse_page(cli.page.as_deref()),
    };
    convert_menu_pdf(input_pdf, &options)
}

fn main() -> ExitCode {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("menu_pdf_to_csv=warn"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(conversion) => {
            // stdout carries exactly one JSON line; serde_json leaves the
            // Japanese literals as raw UTF-8.
            match serde_json::to_string(&conversion) {
                Ok(line) => {
                    println!("{line}");
                    ExitCode::SUCCESS
                }
                Err(error) => {
                    println!("{}", json!({ "error": error.to_string() }));
                    ExitCode::FAILURE
                }
            }
        }
        Err(error) => {
            println!("{}", json!({ "error": error.to_string() }));
            ExitCode::FAILURE
        }
    }
}
