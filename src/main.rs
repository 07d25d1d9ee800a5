//! RepayRite CLI
//!
//! Interactive mortgage repayment calculator. When the loan is given on the
//! command line the results are printed without prompting.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --principal 200000 --rate 5 --term 30 --extra 200
//! cargo run -- --principal 200000 --rate 5 --term 30 --refinance-rate 3.5 --refinance-term 25 --csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `debug` or `warn` to control logging verbosity
//! - `NO_COLOR`: Disable colored output

use clap::Parser;
use repayrite::input::{parse_extra_payment, parse_principal, parse_rate, parse_term};
use repayrite::{session, LoanTerms, Palette, RepayError, Result, Session};
use std::io;
use std::process;

#[derive(Debug, Parser)]
#[command(name = "repayrite", version, about = "Mortgage repayment calculator")]
struct Cli {
    /// Loan amount
    #[arg(long, value_parser = parse_principal)]
    principal: Option<f64>,

    /// Annual interest rate in percent
    #[arg(long, value_parser = parse_rate)]
    rate: Option<f64>,

    /// Loan term in years
    #[arg(long, value_parser = parse_term)]
    term: Option<u32>,

    /// Extra amount paid every month
    #[arg(long, value_parser = parse_extra_payment)]
    extra: Option<f64>,

    /// Annual interest rate of the refinanced loan, in percent
    #[arg(long, value_parser = parse_rate, requires = "refinance_term")]
    refinance_rate: Option<f64>,

    /// Term of the refinanced loan in years
    #[arg(long, value_parser = parse_term, requires = "refinance_rate")]
    refinance_term: Option<u32>,

    /// Print results as CSV instead of tables
    #[arg(long)]
    csv: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let palette = Palette::from_env(cli.no_color);

    match (cli.principal, cli.rate, cli.term) {
        (Some(principal), Some(rate), Some(term)) => {
            let terms = LoanTerms::new(principal, rate, term)?;
            run_batch(&cli, &terms, palette)
        }
        (None, None, None) => {
            if cli.extra.is_some() || cli.refinance_rate.is_some() || cli.csv {
                return Err(RepayError::InvalidArguments(
                    "scenario and output options need --principal, --rate and --term".to_string(),
                ));
            }
            let stdin = io::stdin();
            let stdout = io::stdout();
            Session::new(stdin.lock(), stdout.lock(), palette).run()
        }
        _ => Err(RepayError::InvalidArguments(
            "--principal, --rate and --term must be given together".to_string(),
        )),
    }
}

fn run_batch(cli: &Cli, terms: &LoanTerms, palette: Palette) -> Result<()> {
    let baseline = terms.amortize();
    let extra = cli.extra.map(|amount| terms.with_extra_payments(amount));
    let refinance = cli
        .refinance_rate
        .zip(cli.refinance_term)
        .map(|(rate, term)| terms.refinance(rate, term));

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.csv {
        return repayrite::report::write_csv_summary(
            out,
            terms,
            &baseline,
            extra.as_ref(),
            refinance.as_ref(),
        );
    }

    session::write_summary(&mut out, palette, terms, &baseline)?;
    if let Some(extra) = &extra {
        session::write_extra_payments(&mut out, palette, extra)?;
    }
    if let Some(refinance) = &refinance {
        session::write_refinance(&mut out, palette, refinance)?;
    }
    Ok(())
}
