//! docshape CLI - flatten document backend output to JSON, text, or Markdown

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};

use docshape::convert::DEFAULT_BACKEND;
use docshape::{render, BackendConfig, DocumentProcessor, OutputFormat, ProcessOptions};

#[derive(Parser)]
#[command(name = "docshape")]
#[command(author = "iyulab")]
#[command(version)]
#[command(
    about = "Convert a document through a layout-analysis backend and print flat JSON",
    long_about = None
)]
struct Cli {
    /// Input document file path
    #[arg(value_name = "INPUT_FILE")]
    input_file: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value = "json")]
    output_format: Format,

    /// Preserve document layout structure
    #[arg(long)]
    preserve_layout: bool,

    /// Extract tables
    #[arg(long)]
    extract_tables: bool,

    /// Extract figures and images
    #[arg(long)]
    extract_figures: bool,

    /// Extract mathematical equations
    #[arg(long)]
    extract_equations: bool,

    /// Output file path (stdout if not specified)
    #[arg(long, value_name = "FILE")]
    output_file: Option<PathBuf>,

    /// Backend program that performs the conversion
    #[arg(long, value_name = "PROGRAM", env = "DOCSHAPE_BACKEND", default_value = DEFAULT_BACKEND)]
    backend: String,

    /// Argument passed to the backend before the generated ones (repeatable)
    #[arg(long = "backend-arg", value_name = "ARG", allow_hyphen_values = true)]
    backend_args: Vec<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Plain text content
    Text,
    /// Markdown content
    Markdown,
    /// Full JSON result
    Json,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Markdown => OutputFormat::Markdown,
            Format::Json => OutputFormat::Json,
        }
    }
}

impl Cli {
    fn options(&self) -> ProcessOptions {
        ProcessOptions::minimal()
            .with_format(self.output_format.into())
            .with_layout(self.preserve_layout)
            .with_tables(self.extract_tables)
            .with_figures(self.extract_figures)
            .with_equations(self.extract_equations)
    }

    fn backend(&self) -> BackendConfig {
        BackendConfig::new(&self.backend).with_args(&self.backend_args)
    }
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                buf.timestamp_millis(),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() {
    init_logging();

    let cli = Cli::parse();
    process::exit(run(&cli));
}

fn run(cli: &Cli) -> i32 {
    let backend = cli.backend();
    if let Err(e) = backend.probe() {
        log::error!("{}", e);
        return 1;
    }

    if !cli.input_file.exists() {
        log::error!("Input file not found: {}", cli.input_file.display());
        return 1;
    }

    let options = cli.options();
    let processor = DocumentProcessor::with_backend(backend);
    let result = processor.process_document(&cli.input_file, &options);

    if let Err(e) = emit(&result, options.output_format, cli.output_file.as_deref()) {
        log::error!("Could not write output: {}", e);
        return 1;
    }

    result.exit_code()
}

fn emit(
    result: &docshape::ProcessingResult,
    format: OutputFormat,
    output_file: Option<&Path>,
) -> docshape::Result<()> {
    match output_file {
        Some(path) => render::write_file(result, format, path),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            render::write_stream(result, format, &mut handle)
        }
    }
}
