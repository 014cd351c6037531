use clap::{ArgAction, Args, CommandFactory, Parser as ClapParser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::process::ExitCode;
use tinyts::parser::Parser;
use tinyts::{Dialect, check_source};
use tracing::{Level, debug};
use tracing_subscriber::FmtSubscriber;

/// tinyts - static type checker for a small TypeScript-like language
#[derive(ClapParser)]
#[command(name = "tinyts")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Type check a program and print its type
    Check(SourceArgs),

    /// Parse a program and print the resulting term
    Parse(SourceArgs),

    /// Generate shell completions for bash, zsh, fish, or powershell
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Source file ("-" or omitted reads stdin)
    #[arg(value_name = "INPUT", conflicts_with = "expr")]
    input: Option<String>,

    /// Program text given on the command line
    #[arg(short, long, value_name = "SOURCE")]
    expr: Option<String>,

    /// Language dialect
    #[arg(short, long, value_enum, default_value_t = DialectArg::Basic)]
    dialect: DialectArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum DialectArg {
    /// Booleans, numbers, addition and conditionals
    Arith,
    /// Adds variables, functions, calls, sequencing and const
    Basic,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Arith => Dialect::Arith,
            DialectArg::Basic => Dialect::Basic,
        }
    }
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Commands::Check(args) => check_command(&args),
        Commands::Parse(args) => parse_command(&args),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn init_logging(verbose: u8) -> Result<(), Box<dyn std::error::Error>> {
    let level = match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn check_command(args: &SourceArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let source = read_source(args)?;

    match check_source(&source, args.dialect.into()) {
        Ok(ty) => {
            println!("{}", ty);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("error: {}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn parse_command(args: &SourceArgs) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let source = read_source(args)?;
    let mut parser = Parser::with_dialect(&source, args.dialect.into());

    let printed = match parser.dialect() {
        Dialect::Arith => parser.parse_arith().map(|term| term.to_string()),
        Dialect::Basic => parser.parse().map(|term| term.to_string()),
    };

    match printed {
        Ok(term) => {
            println!("{}", term);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("error: {}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn read_source(args: &SourceArgs) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(expr) = &args.expr {
        return Ok(expr.clone());
    }

    match args.input.as_deref() {
        None | Some("-") => {
            debug!("reading program from stdin");
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
        Some(path) => {
            debug!(path, "reading program");
            let source = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {}", path, e))?;
            Ok(source)
        }
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
