mod terminal;

use anyhow::Result;
use calc_engine::Session;
use clap::Parser;
use terminal::TerminalConsole;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser, Debug, Clone)]
#[command(version, about = "Interactive four-function calculator", long_about = None)]
struct Args {
    /// Enable debug logging (written to stderr)
    #[arg(long)]
    debug: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn setup_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("info,calc_cli=debug,calc_engine=debug")
    } else {
        EnvFilter::new("warn")
    };

    fmt::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(args.debug);
    if args.no_color {
        console::set_colors_enabled(false);
    }

    let terminal = TerminalConsole::new()?;
    Session::new(terminal).run()
}
