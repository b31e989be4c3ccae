use std::{fs::read_to_string, path::PathBuf, process::ExitCode, time::Instant};

use anyhow::Context;
use clap::Parser as ClapParser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use pascal_frontend::{
    lexer::lexer::Lexer,
    parser::parser::parse,
    render::{printer::print_program, xml::program_to_xml},
    render_diagnostic,
    type_checker::type_checker::type_check,
};

/// Parses and type checks a Pascal program.
#[derive(ClapParser, Debug)]
#[command(name = "pascalc", version, about)]
struct Args {
    /// Source file to check
    file: PathBuf,

    /// Print the checked program back as Pascal source
    #[arg(long)]
    print: bool,

    /// Dump the annotated tree as XML
    #[arg(long)]
    xml: bool,
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.to_string_lossy().into_owned());
    let source = read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;

    let start = Instant::now();

    let mut program = match parse(Lexer::new(source.clone(), Some(file_name))) {
        Ok(program) => program,
        Err(error) => {
            eprintln!("{}", render_diagnostic(&error, &source));
            return Ok(ExitCode::FAILURE);
        }
    };
    info!(elapsed = ?start.elapsed(), "parsed");

    let check_start = Instant::now();
    if let Err(error) = type_check(&mut program) {
        eprintln!("{}", render_diagnostic(&error, &source));
        return Ok(ExitCode::FAILURE);
    }
    info!(elapsed = ?check_start.elapsed(), "type checked");
    info!(elapsed = ?start.elapsed(), "total");

    if args.print {
        print!("{}", print_program(&program));
    }
    if args.xml {
        print!("{}", program_to_xml(&program));
    }

    Ok(ExitCode::SUCCESS)
}
