//! Rendering of calculation results as terminal tables and CSV.

use crate::amortization::{
    AmortizationResult, ExtraPaymentResult, LoanTerms, PayoffStatus, RefinanceResult,
};
use crate::error::Result;
use crate::money::Money;
use comfy_table::Table;
use crossterm::style::{style, Color, Stylize};
use serde::Serialize;
use std::io::Write;

/// Terminal color settings for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn plain() -> Self {
        Palette { enabled: false }
    }

    pub fn colored() -> Self {
        Palette { enabled: true }
    }

    /// Colors unless disabled by flag or by a non-empty `NO_COLOR` variable.
    pub fn from_env(no_color: bool) -> Self {
        let env_disabled = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Palette {
            enabled: !no_color && !env_disabled,
        }
    }

    pub fn paint(&self, text: &str, color: Color) -> String {
        if self.enabled {
            style(text).with(color).to_string()
        } else {
            text.to_string()
        }
    }

    /// Bold colored text, used for section headings.
    pub fn heading(&self, text: &str, color: Color) -> String {
        if self.enabled {
            style(text).with(color).bold().to_string()
        } else {
            text.to_string()
        }
    }

    pub fn error(&self, text: &str) -> String {
        self.paint(text, Color::Red)
    }

    pub fn success(&self, text: &str) -> String {
        self.paint(text, Color::Green)
    }
}

/// Formats an amount for display, or `n/a` when it cannot be represented.
pub fn fmt_money(amount: f64) -> String {
    Money::from_f64(amount)
        .map(|m| m.to_string())
        .unwrap_or_else(|| "n/a".to_string())
}

/// Formats a month count as `N months (Y yrs, M mos)`.
pub fn format_term(months: u32) -> String {
    format!("{} months ({} yrs, {} mos)", months, months / 12, months % 12)
}

/// Double rules around the header and outer edges, single rules between rows.
const FANCY_GRID: &str = "││══╞═╪╡│─┼├┤╤╧╒╕╘╛";

/// Two-column table with the given headers.
pub fn two_column_table(left: &str, right: &str) -> Table {
    let mut table = Table::new();
    table.load_preset(FANCY_GRID).set_header(vec![left, right]);
    table
}

pub fn summary_table(terms: &LoanTerms, result: &AmortizationResult) -> Table {
    let mut table = two_column_table("Description", "Amount");
    table
        .add_row(vec![
            "Monthly Payment".to_string(),
            fmt_money(result.monthly_payment),
        ])
        .add_row(vec![
            format!("Total Repayment ({} years)", terms.term_years),
            fmt_money(result.total_repayment),
        ])
        .add_row(vec![
            "Total Interest Paid".to_string(),
            fmt_money(result.total_interest),
        ]);
    table
}

pub fn extra_payment_table(result: &ExtraPaymentResult) -> Table {
    let mut table = two_column_table("Metric", "Value");
    table
        .add_row(vec![
            "New Monthly Payment (incl. extra)".to_string(),
            fmt_money(result.actual_monthly_outgoing),
        ])
        .add_row(vec![
            "New Loan Term".to_string(),
            format_term(result.new_months),
        ])
        .add_row(vec![
            "Total Payment with Extra".to_string(),
            fmt_money(result.total_paid),
        ])
        .add_row(vec![
            "Interest Saved".to_string(),
            fmt_money(result.interest_saved),
        ]);

    if !result.is_paid_off() {
        table.add_row(vec![
            "Balance Remaining".to_string(),
            fmt_money(result.remaining_balance),
        ]);
    }
    table
}

pub fn refinance_table(result: &RefinanceResult) -> Table {
    let mut table = two_column_table("Description", "Amount");
    table
        .add_row(vec![
            "New Monthly Payment".to_string(),
            fmt_money(result.new_monthly_payment),
        ])
        .add_row(vec![
            "New Total Repayment".to_string(),
            fmt_money(result.new_total_repayment),
        ])
        .add_row(vec![
            "New Total Interest".to_string(),
            fmt_money(result.new_total_interest),
        ]);
    table
}

/// Sentence telling the user whether the refinance saves or costs money.
pub fn refinance_verdict(result: &RefinanceResult) -> String {
    if result.saves_money() {
        format!(
            "You would save {} in interest compared to your original plan.",
            fmt_money(result.interest_difference)
        )
    } else {
        format!(
            "This refinancing would cost you an extra {} in interest.",
            fmt_money(result.interest_difference.abs())
        )
    }
}

/// Explains an extra-payment result that did not clear the loan.
pub fn payoff_warning(result: &ExtraPaymentResult) -> Option<String> {
    match result.status {
        PayoffStatus::PaidOff => None,
        PayoffStatus::PaymentInsufficient => Some(format!(
            "A monthly outgoing of {} does not cover the interest due, so the loan is never paid off.",
            fmt_money(result.actual_monthly_outgoing)
        )),
        PayoffStatus::IterationCapReached => Some(format!(
            "The loan is still not paid off after {}; {} would remain outstanding.",
            format_term(result.new_months),
            fmt_money(result.remaining_balance)
        )),
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum ReportValue {
    Amount(Money),
    Months(u32),
    Status(PayoffStatus),
    Unavailable(&'static str),
}

impl From<f64> for ReportValue {
    /// Amounts outside the `Money` range are written as `n/a`, matching the tables.
    fn from(amount: f64) -> Self {
        Money::from_f64(amount)
            .map(ReportValue::Amount)
            .unwrap_or(ReportValue::Unavailable("n/a"))
    }
}

#[derive(Debug, Serialize)]
struct ReportRow {
    scenario: &'static str,
    metric: &'static str,
    value: ReportValue,
}

fn report_rows(
    terms: &LoanTerms,
    baseline: &AmortizationResult,
    extra: Option<&ExtraPaymentResult>,
    refinance: Option<&RefinanceResult>,
) -> Vec<ReportRow> {
    let row = |scenario, metric, value: ReportValue| ReportRow {
        scenario,
        metric,
        value,
    };

    let mut rows = vec![
        row("baseline", "principal", terms.principal.into()),
        row("baseline", "term_months", ReportValue::Months(terms.months())),
        row("baseline", "monthly_payment", baseline.monthly_payment.into()),
        row("baseline", "total_repayment", baseline.total_repayment.into()),
        row("baseline", "total_interest", baseline.total_interest.into()),
    ];

    if let Some(extra) = extra {
        rows.extend([
            row("extra", "monthly_outgoing", extra.actual_monthly_outgoing.into()),
            row("extra", "term_months", ReportValue::Months(extra.new_months)),
            row("extra", "total_paid", extra.total_paid.into()),
            row("extra", "interest_saved", extra.interest_saved.into()),
            row("extra", "remaining_balance", extra.remaining_balance.into()),
            row("extra", "status", ReportValue::Status(extra.status)),
        ]);
    }

    if let Some(refi) = refinance {
        rows.extend([
            row("refinance", "monthly_payment", refi.new_monthly_payment.into()),
            row("refinance", "total_repayment", refi.new_total_repayment.into()),
            row("refinance", "total_interest", refi.new_total_interest.into()),
            row("refinance", "interest_difference", refi.interest_difference.into()),
        ]);
    }

    rows
}

/// Writes all computed figures as `scenario,metric,value` CSV rows.
///
/// Amounts are rounded to pence and written without currency symbols.
pub fn write_csv_summary<W: Write>(
    writer: W,
    terms: &LoanTerms,
    baseline: &AmortizationResult,
    extra: Option<&ExtraPaymentResult>,
    refinance: Option<&RefinanceResult>,
) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in report_rows(terms, baseline, extra, refinance) {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
