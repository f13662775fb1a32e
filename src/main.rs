//! whitepaper - read the LIFE System whitepaper in the terminal

use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use whitepaper_tui::content::document::load_store;
use whitepaper_tui::shell::dump_document;
use whitepaper_tui::{App, Config, LogSink, Result};

#[derive(Parser)]
#[command(name = "whitepaper")]
#[command(version, about = "Terminal whitepaper reader", long_about = None)]
#[command(after_help = "EXAMPLES:
    whitepaper                          Landing page, built-in document
    whitepaper --open methodology       Open straight at a section
    whitepaper --sections paper.json    Read a different document
    whitepaper --dump                   Print every section and exit")]
struct Cli {
    /// JSON array of section records
    #[arg(long, value_name = "PATH")]
    sections: Option<PathBuf>,

    /// JSON configuration file
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Section id to open on launch
    #[arg(long, value_name = "ID")]
    open: Option<String>,

    /// Colour theme (terminal, dracula, nord, gruvbox)
    #[arg(short, long)]
    theme: Option<String>,

    /// Print the parsed document as plain text and exit
    #[arg(long)]
    dump: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) -> Result<()> {
    let default = if cli.verbose { "debug" } else { "warn" };
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default));
    if let Some(path) = &cli.log_file {
        let file = File::create(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    if let Some(sections) = &cli.sections {
        config.sections = Some(sections.clone());
    }
    if let Some(id) = &cli.open {
        config.start_section = Some(id.clone());
    }
    if let Some(theme) = &cli.theme {
        config.theme = theme.clone();
    }
    config.validate()?;
    Ok(config)
}

fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    let store = load_store(config.sections.as_deref())?;

    if cli.dump {
        print!("{}", dump_document(&store, &config.parser_config()));
        return Ok(());
    }

    let (width, height) = crossterm::terminal::size()?;
    let mut app = App::new(config, store, LogSink::new(), width, height, Instant::now())?;
    app.run()
}
