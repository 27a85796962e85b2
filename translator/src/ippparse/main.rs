use std::error::Error;
use std::ffi::OsString;
use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::ArgAction::{Set, SetTrue};
use clap::{CommandFactory, Parser};
use tracing::{event, span, Level};
use tracing_subscriber::prelude::*;

use translator::{translate_file, ExitStatus, TranslationFailure};

const EXIT_STATUS_HELP: &str = "Exit status: 0 success, 10 bad usage, 11 unreadable input, \
12 unwritable output, 21 bad header, 22 unknown opcode, 23 other syntax error.";

/// Check IPPcode23 source code and translate it into its XML
/// representation.
#[derive(Parser, Debug)]
#[clap(version, about, long_about = None, disable_help_flag = true, after_help = EXIT_STATUS_HELP)]
struct Cli {
    /// File from which IPPcode23 source is read (default: standard
    /// input).
    #[clap(action = Set, long)]
    source: Option<OsString>,

    /// File to which the XML program is written (default: standard
    /// output).
    #[clap(action = Set, short = 'o', long)]
    output: Option<OsString>,

    /// Print this help message.  Must be used on its own.
    #[clap(action = SetTrue, short = 'h', long)]
    help: bool,
}

#[derive(Debug)]
enum Fail {
    /// The command line was not valid.
    Usage(String),
    /// We began the translation but then it failed.
    Translation(TranslationFailure),
    /// We were not able to correctly initialise the translator.
    InitialisationFailure(String),
}

impl Fail {
    fn status(&self) -> ExitStatus {
        match self {
            Fail::Usage(_) => ExitStatus::Usage,
            Fail::Translation(e) => e.status(),
            Fail::InitialisationFailure(_) => ExitStatus::Internal,
        }
    }
}

impl Display for Fail {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), fmt::Error> {
        match self {
            Fail::Usage(msg) | Fail::InitialisationFailure(msg) => f.write_str(msg.as_str()),
            Fail::Translation(translation_failure) => translation_failure.fmt(f),
        }
    }
}

impl Error for Fail {}

fn run_translator() -> Result<(), Fail> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.kind() == ErrorKind::DisplayVersion => {
            print!("{e}");
            return Ok(());
        }
        Err(e) => {
            return Err(Fail::Usage(e.to_string()));
        }
    };

    if cli.help {
        if cli.source.is_some() || cli.output.is_some() {
            return Err(Fail::Usage(
                "--help cannot be combined with other options".to_string(),
            ));
        }
        println!("{}", Cli::command().render_help());
        return Ok(());
    }

    // See
    // https://docs.rs/tracing-subscriber/latest/tracing_subscriber/fmt/index.html#filtering-events-with-environment-variables
    // for instructions on how to select which trace messages get
    // printed.  Standard output carries the translated program, so
    // trace messages go to standard error.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("warn"))
    {
        Err(e) => {
            return Err(Fail::InitialisationFailure(format!(
                "failed to initialise tracing filter (perhaps there is a problem with environment variables): {e}"
            )));
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    let span = span!(Level::ERROR, "ippparse", source=?cli.source, output=?cli.output);
    let _enter = span.enter();
    let source: Option<PathBuf> = cli.source.map(PathBuf::from);
    let output: Option<PathBuf> = cli.output.map(PathBuf::from);
    let result =
        translate_file(source.as_deref(), output.as_deref()).map_err(Fail::Translation);
    if let Err(e) = &result {
        event!(Level::ERROR, "translation failed: {:?}", e);
    } else {
        event!(Level::INFO, "translation succeeded");
    }
    result
}

fn main() {
    let status = match run_translator() {
        Err(e) => {
            eprintln!("{e}");
            e.status()
        }
        Ok(()) => ExitStatus::Success,
    };
    std::process::exit(status.code());
}
