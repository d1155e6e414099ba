mod commands;
mod output;

use clap::error::ErrorKind;
use clap::Parser;
use log::debug;
use pdfconv_core::extraction::pdftotext::{PdftotextBackend, DEFAULT_PROGRAM};
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "pdf_converter",
    version,
    about = "Extract text and tables from a PDF and print them as one line of JSON"
)]
struct Cli {
    /// Path to the PDF file
    #[arg(allow_hyphen_values = true)]
    input_file: Option<PathBuf>,

    /// Ignored
    #[arg(hide = true, allow_hyphen_values = true)]
    extra: Vec<OsString>,

    /// pdftotext executable used for extraction
    #[arg(
        long,
        env = "PDF_CONVERTER_PDFTOTEXT",
        value_name = "PATH",
        default_value = DEFAULT_PROGRAM
    )]
    pdftotext: PathBuf,
}

fn main() {
    // Logs go to stderr; stdout carries only the JSON result.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let mut stdout = std::io::stdout().lock();
    let result = match Cli::try_parse() {
        Ok(cli) => {
            if !cli.extra.is_empty() {
                debug!("ignoring extra arguments: {:?}", cli.extra);
            }
            let backend = PdftotextBackend::with_program(cli.pdftotext);
            commands::convert::run(cli.input_file.as_deref(), &backend, &mut stdout)
        }
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            e.exit()
        }
        Err(e) => {
            debug!("argument error: {e}");
            commands::convert::usage(&mut stdout)
        }
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}
