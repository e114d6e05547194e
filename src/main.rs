use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use xml_dewey::{outline, Backend, XmlParser};

#[derive(Parser, Debug)]
#[command(version, about = "Print an XML document as a Dewey-labelled tree")]
struct Cli {
    /// XML file to parse
    file: PathBuf,

    #[arg(short, long, value_enum, default_value_t = BackendArg::Streaming)]
    backend: BackendArg,

    #[arg(short, long, value_enum, default_value_t = Format::Outline)]
    format: Format,

    /// Debug output on stderr, repeat for more (-d -d -d)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum BackendArg {
    Streaming,
    Dom,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Streaming => Backend::Streaming,
            BackendArg::Dom => Backend::Dom,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// Indented tree in document order
    Outline,
    /// Flat node list in completion order
    List,
    /// Parent to child edges
    Edges,
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.debug);

    if let Err(e) = run(&cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let tree = XmlParser::with_backend(cli.backend.into())
        .parse_file(&cli.file)
        .with_context(|| format!("failed to parse {}", cli.file.display()))?;

    let output = match cli.format {
        Format::Outline => outline::render(&tree),
        Format::List => outline::listing(&tree),
        Format::Edges => outline::edge_list(&tree),
    };
    print!("{}", output);
    Ok(())
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    tracing_subscriber::registry().with(fmt_layer).init();
}
