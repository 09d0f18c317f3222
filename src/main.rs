use std::io::{self, Read};

use clap::{Parser as ClapParser, Subcommand};
use gqt_lang::cli::{self, CheckOptions, CheckResult, CliError};

#[derive(ClapParser)]
#[command(name = "gqt")]
#[command(about = "gqt - Validate and inspect GraphQL query templates")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log everything, including optimizer folds
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a template and report the first error
    Check {
        /// Template source (reads from stdin if not provided)
        template: Option<String>,

        /// Print the syntax tree as JSON
        #[arg(long)]
        ast: bool,

        /// Pretty-print the syntax tree
        #[arg(short, long)]
        pretty: bool,

        /// Print the tree as parsed, without constant folding
        #[arg(long)]
        no_optimize: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    cli::init_logger(cli.verbose, cli.quiet, std::env::var(cli::GQT_LOG));

    let result = match cli.command {
        Commands::Check {
            template,
            ast,
            pretty,
            no_optimize,
        } => run_check(template, ast, pretty, !no_optimize),
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run_check(
    template: Option<String>,
    ast: bool,
    pretty: bool,
    optimize: bool,
) -> Result<(), CliError> {
    let template = match template {
        Some(s) => s,
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        None => return Err(CliError::NoInput),
    };

    let options = CheckOptions {
        template,
        ast,
        pretty,
        optimize,
    };

    match cli::execute_check(&options)? {
        CheckResult::Valid => println!("Template is valid"),
        CheckResult::Ast(tree) => println!("{}", tree),
    }
    Ok(())
}
