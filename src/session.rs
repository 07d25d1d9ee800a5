//! Interactive question-and-answer flow and the shared result printers.

use crate::amortization::{
    simulate_refinancing, AmortizationResult, ExtraPaymentResult, LoanTerms, RefinanceResult,
};
use crate::error::Result;
use crate::input::{
    parse_extra_payment, parse_principal, parse_rate, parse_term, parse_yes_no, Prompter,
};
use crate::report::{self, Palette};
use crossterm::style::Color;
use log::info;
use std::io::{BufRead, Write};

const LENDER_CONDITIONS_PROMPT: &str = "Are you aware that not all mortgage lenders allow extra \
monthly payments without conditions, and some require permission or specific contract terms? \
Would you still like to explore this option? (yes/no): ";

/// Prints the baseline summary table.
pub fn write_summary<W: Write>(
    out: &mut W,
    palette: Palette,
    terms: &LoanTerms,
    baseline: &AmortizationResult,
) -> Result<()> {
    writeln!(out, "\n{}", palette.heading("=== YOUR MORTGAGE SUMMARY ===", Color::Cyan))?;
    writeln!(out, "{}", report::summary_table(terms, baseline))?;
    Ok(())
}

/// Prints an extra-payment result, with a warning if the loan was not paid off.
pub fn write_extra_payments<W: Write>(
    out: &mut W,
    palette: Palette,
    result: &ExtraPaymentResult,
) -> Result<()> {
    writeln!(out, "\n{}", palette.success("WITH EXTRA PAYMENTS:"))?;
    writeln!(out, "{}", report::extra_payment_table(result))?;
    if let Some(warning) = report::payoff_warning(result) {
        writeln!(out, "\n{}", palette.error(&warning))?;
    }
    Ok(())
}

/// Prints a refinance result followed by the savings verdict.
pub fn write_refinance<W: Write>(
    out: &mut W,
    palette: Palette,
    result: &RefinanceResult,
) -> Result<()> {
    writeln!(out, "\n{}", palette.paint("RESULTS OF REFINANCING:", Color::Cyan))?;
    writeln!(out, "{}", report::refinance_table(result))?;

    let verdict = report::refinance_verdict(result);
    let verdict = if result.saves_money() {
        palette.success(&verdict)
    } else {
        palette.error(&verdict)
    };
    writeln!(out, "\n{}", verdict)?;
    Ok(())
}

/// One interactive run: collect a loan, show its summary, then offer the
/// extra-payment and refinancing scenarios.
pub struct Session<R, W> {
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(reader: R, writer: W, palette: Palette) -> Self {
        Session {
            prompter: Prompter::new(reader, writer, palette),
        }
    }

    pub fn run(&mut self) -> Result<()> {
        let palette = self.prompter.palette();
        writeln!(
            self.prompter.out(),
            "\n{}",
            palette.heading(
                "Welcome to RepayRite - Your Mortgage Repayment Companion!",
                Color::Blue
            )
        )?;

        let principal = self
            .prompter
            .ask("Enter the loan amount (Principal): £", parse_principal)?;
        let rate = self
            .prompter
            .ask("Enter the annual interest rate (in %): ", parse_rate)?;
        let term = self
            .prompter
            .ask("Enter the loan term in years: ", parse_term)?;

        let terms = LoanTerms::new(principal, rate, term)?;
        info!(
            "Loan entered: {:.2} at {}% over {} years",
            terms.principal, terms.annual_rate_percent, terms.term_years
        );

        let baseline = terms.amortize();
        write_summary(self.prompter.out(), palette, &terms, &baseline)?;

        if self.confirm(
            "Would you like to explore how extra monthly payments could reduce your loan term? (yes/no): ",
        )? {
            self.extra_payments(&terms)?;
        }

        if self.confirm(
            "Would you like to explore how refinancing might impact your repayment? (yes/no): ",
        )? {
            self.refinancing(&terms, &baseline)?;
        }

        writeln!(
            self.prompter.out(),
            "\n{}",
            palette.heading(
                "Thank you for using RepayRite! We wish you smart and stress-free repayments.",
                Color::Magenta
            )
        )?;
        Ok(())
    }

    fn confirm(&mut self, question: &str) -> Result<bool> {
        writeln!(self.prompter.out())?;
        self.prompter.ask(question, parse_yes_no)
    }

    fn extra_payments(&mut self, terms: &LoanTerms) -> Result<()> {
        let palette = self.prompter.palette();
        writeln!(
            self.prompter.out(),
            "\n{}",
            palette.heading("=== EXTRA PAYMENTS ===", Color::Yellow)
        )?;

        if !self.prompter.ask(LENDER_CONDITIONS_PROMPT, parse_yes_no)? {
            writeln!(
                self.prompter.out(),
                "{}",
                palette.paint("No extra payments applied.", Color::Blue)
            )?;
            return Ok(());
        }

        let extra = self
            .prompter
            .ask("Enter the extra monthly payment amount: £", parse_extra_payment)?;
        let result = terms.with_extra_payments(extra);
        write_extra_payments(self.prompter.out(), palette, &result)
    }

    fn refinancing(&mut self, terms: &LoanTerms, baseline: &AmortizationResult) -> Result<()> {
        let palette = self.prompter.palette();
        writeln!(
            self.prompter.out(),
            "\n{}",
            palette.heading("=== REFINANCING SIMULATION ===", Color::Magenta)
        )?;

        let new_rate = self
            .prompter
            .ask("Enter the new annual interest rate (in %): ", parse_rate)?;
        let new_term = self
            .prompter
            .ask("Enter the new loan term in years: ", parse_term)?;

        let result = simulate_refinancing(
            terms.principal,
            new_rate,
            new_term,
            baseline.total_repayment,
        );
        write_refinance(self.prompter.out(), palette, &result)
    }
}
