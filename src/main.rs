use std::{
    fs::read_to_string,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use log::{debug, info};

use monkey_parser::{
    lexer::{lexer::TokenSource, tokens::TokenKind},
    parse, Lexer,
};

#[derive(ClapParser, Debug)]
#[command(version, about = "Parse a source file and report syntax diagnostics", long_about = None)]
struct Cli {
    /// Source file to parse. Reads stdin when omitted.
    file: Option<PathBuf>,

    /// Print every token before parsing
    #[arg(long)]
    tokens: bool,

    /// Enable debug logging to stderr (RUST_LOG overrides the level)
    #[arg(long)]
    log: bool,
}

fn init_logger(enabled: bool) {
    let mut builder = env_logger::Builder::new();

    if enabled {
        builder.filter_level(log::LevelFilter::Debug).parse_default_env();
    } else {
        builder.filter_level(log::LevelFilter::Off);
    }

    builder.init();
}

fn read_source(file: &Option<PathBuf>) -> Result<(String, String)> {
    match file {
        Some(path) => {
            info!("Reading file: {:?}", path);
            let contents = read_to_string(path).context(format!("Failed to read file {:?}", path))?;
            let file_name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string_lossy().into_owned());

            Ok((contents, file_name))
        }
        None => {
            info!("Reading stdin");
            let mut contents = String::new();
            io::stdin()
                .read_to_string(&mut contents)
                .context("Failed to read stdin")?;

            Ok((contents, String::from("stdin")))
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logger(cli.log);
    debug!("CLI arguments: {:?}", cli);

    let (source, file_name) = read_source(&cli.file)?;

    if cli.tokens {
        let mut lexer = Lexer::new(source.clone(), Some(file_name.clone()));
        loop {
            let token = lexer.next_token();
            println!("{}", token);
            if token.kind == TokenKind::EOF {
                break;
            }
        }
    }

    let start = Instant::now();
    let (parser, program) = parse(Lexer::new(source, Some(file_name)));
    info!("Parsed {} statements in {:?}", program.len(), start.elapsed());

    if parser.diagnostics().is_empty() {
        print!("{}", program);
        return Ok(ExitCode::SUCCESS);
    }

    for error in parser.diagnostics() {
        eprintln!("{}: {}: {}", error.get_position(), error.get_error_name(), error);
    }
    eprintln!("{} error(s) found", parser.diagnostics().len());

    Ok(ExitCode::FAILURE)
}
