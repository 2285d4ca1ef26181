//! MathHax CLI - stateful LaTeX macro expander

#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use mathhax::{
    diagnostics::{expand_expressions, format_diagnostics, CheckResult},
    ExpandOptions, Session,
};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read, Write};
#[cfg(feature = "cli")]
use tracing::level_filters::LevelFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "mathhax")]
#[command(version)]
#[command(about = "MathHax - counters, toggles and loops for LaTeX math", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Print counters and toggles after expansion
    #[arg(long)]
    dump_state: bool,

    /// Use colored output for diagnostics
    #[arg(long)]
    color: bool,

    #[command(flatten)]
    expansion: ExpansionArgs,

    /// More log output on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode: only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

/// Options shared by the default action and `check`
#[cfg(feature = "cli")]
#[derive(Args)]
struct ExpansionArgs {
    /// Expand this file first and discard its output
    #[arg(long, value_name = "FILE")]
    preamble: Option<String>,

    /// Treat every non-empty line as its own expression
    #[arg(long)]
    per_line: bool,

    /// Buffer ceiling per expression, in bytes
    #[arg(long, value_name = "BYTES", default_value_t = mathhax::DEFAULT_MAX_BUFFER)]
    max_buffer: usize,

    /// Macro invocation ceiling per expression
    #[arg(long, value_name = "N", default_value_t = mathhax::DEFAULT_MAX_MACROS)]
    max_macros: usize,

    /// Fail on control words that have no handler
    #[arg(long)]
    strict: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Expand the input and report problems without printing the result
    Check {
        /// Input file to check
        input: Option<String>,

        /// Disable colored output
        #[arg(long)]
        no_color: bool,

        #[command(flatten)]
        expansion: ExpansionArgs,
    },
}

#[cfg(feature = "cli")]
impl ExpansionArgs {
    fn options(&self) -> ExpandOptions {
        ExpandOptions {
            strict: self.strict,
            ..ExpandOptions::with_limits(self.max_buffer, self.max_macros)
        }
    }

    /// Expand `input` in a fresh session, after the preamble if any
    fn run(&self, input: &str) -> io::Result<(Session, Vec<Option<String>>, CheckResult)> {
        let options = self.options();
        let mut session = Session::new();

        if let Some(ref path) = self.preamble {
            let preamble = fs::read_to_string(path)?;
            if let Err(err) = session.load_preamble_with_options(&preamble, &options) {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("{}: {}", path, err),
                ));
            }
        }

        let exprs: Vec<&str> = if self.per_line {
            input.lines().filter(|l| !l.trim().is_empty()).collect()
        } else {
            vec![input]
        };

        let (outputs, result) = expand_expressions(&mut session, &exprs, &options);
        Ok((session, outputs, result))
    }
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    // Handle subcommands first
    if let Some(cmd) = cli.command {
        return handle_subcommand(cmd);
    }

    let input = read_input(cli.input_file.as_deref())?;
    let (session, outputs, result) = cli.expansion.run(&input)?;

    let expanded: Vec<String> = outputs.into_iter().flatten().collect();
    let joined = expanded.join("\n");

    match cli.output {
        Some(ref path) => {
            let mut file = fs::File::create(path)?;
            writeln!(file, "{}", joined)?;
            eprintln!("✓ Output written to: {}", path);
        }
        None => {
            if !joined.is_empty() {
                println!("{}", joined);
            }
        }
    }

    if cli.dump_state {
        print_state(&session);
    }

    if !result.is_empty() {
        eprintln!("{}", format_diagnostics(&result, cli.color));
    }
    if result.has_errors() {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(feature = "cli")]
fn handle_subcommand(cmd: Commands) -> io::Result<()> {
    match cmd {
        Commands::Check {
            input,
            no_color,
            expansion,
        } => {
            let source = read_input(input.as_deref())?;
            let (_, _, result) = expansion.run(&source)?;
            println!("{}", format_diagnostics(&result, !no_color));

            if result.has_errors() {
                std::process::exit(1);
            }
            Ok(())
        }
    }
}

#[cfg(feature = "cli")]
fn read_input(path: Option<&str>) -> io::Result<String> {
    match path {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

#[cfg(feature = "cli")]
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::ERROR,
        (false, 0) => LevelFilter::WARN,
        (false, 1) => LevelFilter::DEBUG,
        (false, _) => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

/// Print counters and toggles in definition order
#[cfg(feature = "cli")]
fn print_state(session: &Session) {
    let counters = session.counters();
    eprintln!("Counters ({}):", counters.len());
    for (name, value) in counters.iter() {
        let dependents = counters.dependents(name);
        if dependents.is_empty() {
            eprintln!("  {:<16} {}", name, value);
        } else {
            eprintln!(
                "  {:<16} {}  (resets {})",
                name,
                value,
                dependents.join(", ")
            );
        }
    }

    let toggles = session.toggles();
    eprintln!("Toggles ({}):", toggles.len());
    for (name, value) in toggles.iter() {
        eprintln!("  {:<16} {}", name, value);
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install mathhax --features cli");
    eprintln!("  mathhax [OPTIONS] [INPUT_FILE]");
}
