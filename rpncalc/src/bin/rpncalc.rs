use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

/// Evaluate arithmetic expressions with + - * / % ^ and parentheses.
///
/// Without arguments an interactive prompt is started; enter 'q' to leave.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Print the postfix (RPN) form of each expression before its result.
    #[arg(long, conflicts_with = "batch")]
    rpn: bool,

    /// History file for the interactive prompt [default: ~/.rpncalc_history]
    #[arg(long, value_name = "PATH")]
    history: Option<PathBuf>,

    /// Run each line of FILE as a test case ("expr" or "expr => expected").
    #[arg(short, long, value_name = "FILE", conflicts_with = "expr")]
    batch: Option<PathBuf>,

    /// Expression to evaluate once. Words are joined with spaces.
    #[arg(allow_hyphen_values = true, allow_negative_numbers = true)]
    expr: Vec<String>,
}

mod repl {
    use rpncalc::{CalcError, ShuntingParser};

    pub const BANNER: &str = "\
---------------------------------
Arithmetic Expression Calculator
Enter an equation (or 'q' to quit):
Supported operators: + - * / % ^
---------------------------------";

    pub fn evalexpr(input: &str, show_rpn: bool) -> bool {
        let rpn = match ShuntingParser::parse_str(input) {
            Err(e) => {
                println!("Error: {}", e);
                return false;
            }
            Ok(rpn) => rpn,
        };
        if show_rpn {
            println!("RPN: {}", rpn);
        }
        match rpn.eval() {
            Err(e) => {
                println!("Error: {}", CalcError::from(e));
                false
            }
            Ok(result) => {
                println!("Result: {}", result);
                true
            }
        }
    }
}

fn prompt(histpath: Option<PathBuf>, show_rpn: bool) -> Result<ExitCode, String> {
    use rustyline::error::ReadlineError;
    let mut rl = rustyline::DefaultEditor::new().map_err(|e| e.to_string())?;
    if let Some(ref path) = histpath {
        if rl.load_history(path).is_err() {
            tracing::info!(path = %path.display(), "no history yet");
        }
    }
    println!("{}", repl::BANNER);
    loop {
        match rl.readline(">> ") {
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(format!("Readline err: {:?}", e)),
            Ok(line) => {
                if line.trim() == "q" {
                    println!("Exiting...");
                    break;
                }
                let _ = rl.add_history_entry(line.as_str());
                repl::evalexpr(&line, show_rpn);
                println!();
            }
        }
    }
    if let Some(path) = histpath {
        if let Err(e) = rl.save_history(&path) {
            tracing::warn!(path = %path.display(), error = %e, "could not save history");
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_file(path: &Path) -> Result<ExitCode, String> {
    let file = File::open(path).map_err(|e| format!("cannot open {}: {}", path.display(), e))?;
    let report = rpncalc::batch::run_batch(BufReader::new(file))
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    println!("{}", report);
    Ok(if report.failed() == 0 { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn main() -> Result<ExitCode, String> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    tracing::debug!(?args, "starting");

    if let Some(ref path) = args.batch {
        return run_file(path);
    }
    if !args.expr.is_empty() {
        let input = args.expr.join(" ");
        let ok = repl::evalexpr(&input, args.rpn);
        return Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE });
    }
    let histpath = args.history
        .or_else(|| home::home_dir().map(|h| h.join(".rpncalc_history")));
    prompt(histpath, args.rpn)
}
