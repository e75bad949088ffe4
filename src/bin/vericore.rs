//! Component K: the CLI front-end (§4.11).

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use clap::Subcommand;
use vericore::api::solve_sat;
use vericore::api::solve_smt;
use vericore::api::SatOutcome;
use vericore::api::SmtOutcome;
use vericore::api::Status;
use vericore::error::Error;
use vericore::interner::Interner;
use vericore::parser::parse_first_order;
use vericore::parser::parse_propositional;

#[derive(Debug, Parser)]
#[command(
    name = "vericore",
    about = "A CDCL(T) solver for propositional SAT and quantifier-free T_UF SMT"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Solve a propositional formula.
    Sat {
        /// The formula, fully parenthesized (§6). Omit in favor of `--file`.
        formula: Option<String>,

        #[arg(long)]
        file: Option<PathBuf>,

        /// Decision-depth cap; hitting it reports UNKNOWN rather than searching forever.
        #[arg(long, default_value_t = 10_000)]
        max_decisions: usize,
    },
    /// Solve a quantifier-free first-order formula over T_UF.
    Smt {
        formula: Option<String>,

        #[arg(long)]
        file: Option<PathBuf>,

        #[arg(long, default_value_t = 10_000)]
        max_decisions: usize,
    },
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run() {
        Ok(code) => code,
        Err(error) => {
            eprintln!("{error:?}");
            ExitCode::from(3)
        }
    }
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let mut interner = Interner::new();

    match cli.command {
        Command::Sat {
            formula,
            file,
            max_decisions,
        } => {
            let source = read_source(formula, file)?;
            let formula = parse_propositional(&source, &mut interner)
                .context("failed to parse propositional formula")?;
            match solve_sat(&formula, None, None, max_decisions, &mut interner) {
                Ok(outcome) => Ok(report_sat(&outcome, &interner)),
                Err(Error::Exhausted { .. }) => {
                    println!("UNKNOWN");
                    Ok(ExitCode::from(2))
                }
                Err(error) => Err(anyhow::Error::from(error).context("solving failed")),
            }
        }
        Command::Smt {
            formula,
            file,
            max_decisions,
        } => {
            let source = read_source(formula, file)?;
            let formula = parse_first_order(&source, &mut interner)
                .context("failed to parse first-order formula")?;
            match solve_smt(&formula, max_decisions, &mut interner) {
                Ok(outcome) => Ok(report_smt(&outcome, &interner)),
                Err(Error::Exhausted { .. }) => {
                    println!("UNKNOWN");
                    Ok(ExitCode::from(2))
                }
                Err(error) => Err(anyhow::Error::from(error).context("solving failed")),
            }
        }
    }
}

fn read_source(formula: Option<String>, file: Option<PathBuf>) -> anyhow::Result<String> {
    match (formula, file) {
        (Some(formula), None) => Ok(formula),
        (None, Some(path)) => {
            fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
        }
        (Some(_), Some(_)) => anyhow::bail!("pass either a formula or --file, not both"),
        (None, None) => anyhow::bail!("pass a formula or --file"),
    }
}

fn report_sat(outcome: &SatOutcome, interner: &Interner) -> ExitCode {
    match outcome.status {
        Status::Sat => {
            println!("SAT");
            println!("{}", outcome.model.display_sorted(interner));
            ExitCode::from(0)
        }
        Status::Unsat => {
            println!("UNSAT");
            ExitCode::from(1)
        }
    }
}

fn report_smt(outcome: &SmtOutcome, interner: &Interner) -> ExitCode {
    match outcome.status {
        Status::Sat => {
            println!("SAT");
            let mut entries: Vec<String> = outcome
                .atom_model
                .iter()
                .map(|(atom, value)| {
                    format!(
                        "{}={}: {value}",
                        atom.left.display(interner),
                        atom.right.display(interner)
                    )
                })
                .collect();
            entries.sort();
            println!("{}", entries.join(", "));
            ExitCode::from(0)
        }
        Status::Unsat => {
            println!("UNSAT");
            ExitCode::from(1)
        }
    }
}
