//! Amortization math for fixed-rate, monthly-payment loans.
//!
//! Every function here is pure: results depend only on the arguments, and
//! nothing is cached between calls. Inputs are assumed to be validated by the
//! caller (positive principal, non-negative rate, positive term); [`LoanTerms::new`]
//! performs that validation for callers that want it.

use crate::error::{RepayError, Result};
use log::{debug, warn};
use serde::Serialize;

/// Hard upper bound on simulated months (100 years) for the extra-payment payoff loop.
pub const MAX_PAYOFF_MONTHS: u32 = 1200;

/// Largest accepted loan amount. Keeps every derived figure representable as [`Money`](crate::Money).
pub const MAX_PRINCIPAL: f64 = 1_000_000_000.0;

/// Longest accepted loan term, matching the payoff simulation cap.
pub const MAX_TERM_YEARS: u32 = MAX_PAYOFF_MONTHS / 12;

/// Highest accepted annual interest rate, in percent.
pub const MAX_RATE_PERCENT: f64 = 100.0;

/// Balances below half a penny are treated as paid off.
const BALANCE_EPSILON: f64 = 0.005;

/// Converts an annual percentage rate (e.g. `5.0`) to a monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: f64) -> f64 {
    annual_rate_percent / 100.0 / 12.0
}

fn payment_count(term_years: u32) -> f64 {
    f64::from(term_years) * 12.0
}

/// Computes the level monthly payment that pays off `principal` over `term_years`.
///
/// A zero rate divides the principal evenly across the payments. Otherwise the
/// standard annuity formula is used:
///
/// `P * r * (1 + r)^n / ((1 + r)^n - 1)`
///
/// The result is meaningless (infinite or NaN) for `term_years == 0`.
pub fn compute_monthly_payment(principal: f64, annual_rate_percent: f64, term_years: u32) -> f64 {
    let r = monthly_rate(annual_rate_percent);
    let n = payment_count(term_years);

    if r == 0.0 {
        return principal / n;
    }

    let growth = (1.0 + r).powf(n);
    principal * (r * growth) / (growth - 1.0)
}

/// Total paid over the full term: `monthly_payment * term_years * 12`.
pub fn compute_total_repayment(monthly_payment: f64, term_years: u32) -> f64 {
    monthly_payment * payment_count(term_years)
}

/// Interest portion of a total repayment.
pub fn compute_total_interest(total_repayment: f64, principal: f64) -> f64 {
    total_repayment - principal
}

/// Validated loan inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanTerms {
    /// Amount borrowed.
    pub principal: f64,

    /// Nominal annual rate in percent (`5.0` means 5%).
    pub annual_rate_percent: f64,

    /// Loan term in whole years.
    pub term_years: u32,
}

impl LoanTerms {
    /// Creates loan terms, rejecting a non-positive principal or term, a
    /// negative or non-finite rate, and anything above [`MAX_PRINCIPAL`],
    /// [`MAX_RATE_PERCENT`] or [`MAX_TERM_YEARS`].
    pub fn new(principal: f64, annual_rate_percent: f64, term_years: u32) -> Result<Self> {
        if !principal.is_finite() || principal <= 0.0 {
            return Err(RepayError::invalid("principal", "must be greater than zero"));
        }
        if principal > MAX_PRINCIPAL {
            return Err(RepayError::invalid("principal", "exceeds the largest supported loan"));
        }
        if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
            return Err(RepayError::invalid("interest rate", "must be zero or greater"));
        }
        if annual_rate_percent > MAX_RATE_PERCENT {
            return Err(RepayError::invalid(
                "interest rate",
                format!("must not exceed {}%", MAX_RATE_PERCENT),
            ));
        }
        if term_years == 0 {
            return Err(RepayError::invalid("loan term", "must be at least one year"));
        }
        if term_years > MAX_TERM_YEARS {
            return Err(RepayError::invalid(
                "loan term",
                format!("must not exceed {} years", MAX_TERM_YEARS),
            ));
        }

        Ok(LoanTerms {
            principal,
            annual_rate_percent,
            term_years,
        })
    }

    /// Number of scheduled monthly payments.
    pub fn months(&self) -> u32 {
        self.term_years * 12
    }

    /// Baseline repayment figures for these terms.
    pub fn amortize(&self) -> AmortizationResult {
        AmortizationResult::compute(self.principal, self.annual_rate_percent, self.term_years)
    }

    /// Payoff with `extra_payment` added to every monthly payment.
    pub fn with_extra_payments(&self, extra_payment: f64) -> ExtraPaymentResult {
        simulate_extra_payments(
            self.principal,
            self.annual_rate_percent,
            self.term_years,
            extra_payment,
        )
    }

    /// Refinances the same principal at a new rate and term, compared against
    /// this loan's total repayment.
    pub fn refinance(&self, new_annual_rate_percent: f64, new_term_years: u32) -> RefinanceResult {
        simulate_refinancing(
            self.principal,
            new_annual_rate_percent,
            new_term_years,
            self.amortize().total_repayment,
        )
    }
}

/// Baseline repayment figures for a loan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmortizationResult {
    pub monthly_payment: f64,
    pub total_repayment: f64,
    pub total_interest: f64,
}

impl AmortizationResult {
    pub fn compute(principal: f64, annual_rate_percent: f64, term_years: u32) -> Self {
        let monthly_payment = compute_monthly_payment(principal, annual_rate_percent, term_years);
        let total_repayment = compute_total_repayment(monthly_payment, term_years);
        let total_interest = compute_total_interest(total_repayment, principal);

        debug!(
            "Amortized {:.2} at {}% over {} years: payment {:.2}, total {:.2}",
            principal, annual_rate_percent, term_years, monthly_payment, total_repayment
        );

        AmortizationResult {
            monthly_payment,
            total_repayment,
            total_interest,
        }
    }
}

/// How an extra-payment payoff simulation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PayoffStatus {
    /// The balance reached zero.
    PaidOff,

    /// The monthly outgoing did not exceed the interest due, so the balance
    /// could never shrink.
    PaymentInsufficient,

    /// The balance was still positive after [`MAX_PAYOFF_MONTHS`] months.
    IterationCapReached,
}

/// Outcome of paying extra principal every month.
///
/// Only a [`PayoffStatus::PaidOff`] result describes a completed payoff. In the
/// other cases `new_months` and `total_paid` cover the months simulated before
/// stopping and `remaining_balance` is still owed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtraPaymentResult {
    /// Baseline monthly payment plus the extra amount.
    pub actual_monthly_outgoing: f64,

    /// Months until the balance reached zero (or until the simulation stopped).
    pub new_months: u32,

    /// Sum of all payments made, the last one trimmed to the amount owed.
    pub total_paid: f64,

    /// Baseline total repayment minus `total_paid`.
    pub interest_saved: f64,

    /// Balance left when the simulation stopped; zero once paid off.
    pub remaining_balance: f64,

    pub status: PayoffStatus,
}

impl ExtraPaymentResult {
    pub fn is_paid_off(&self) -> bool {
        self.status == PayoffStatus::PaidOff
    }
}

/// Simulates month-by-month payoff with `extra_payment` added to the baseline payment.
///
/// Each month the interest on the outstanding balance is charged first and the
/// rest of the outgoing reduces the balance. The final month pays only what is
/// still owed (balance plus that month's interest), so `total_paid` is the exact
/// payoff cost.
///
/// `interest_saved` is measured against the original, no-extra total repayment
/// (`baseline payment * term_years * 12`).
pub fn simulate_extra_payments(
    principal: f64,
    annual_rate_percent: f64,
    term_years: u32,
    extra_payment: f64,
) -> ExtraPaymentResult {
    let monthly_payment = compute_monthly_payment(principal, annual_rate_percent, term_years);
    let r = monthly_rate(annual_rate_percent);
    let outgoing = monthly_payment + extra_payment;

    let mut balance = principal;
    let mut total_paid = 0.0;
    let mut months = 0u32;
    let mut status = PayoffStatus::PaidOff;

    while balance > BALANCE_EPSILON {
        if months >= MAX_PAYOFF_MONTHS {
            status = PayoffStatus::IterationCapReached;
            break;
        }

        let interest = balance * r;
        let principal_paid = outgoing - interest;
        if principal_paid <= 0.0 {
            status = PayoffStatus::PaymentInsufficient;
            break;
        }

        let payment = if principal_paid >= balance {
            balance + interest
        } else {
            outgoing
        };

        balance -= payment - interest;
        total_paid += payment;
        months += 1;
    }

    match status {
        PayoffStatus::PaidOff => debug!(
            "Extra payment of {:.2} pays off {:.2} in {} months",
            extra_payment, principal, months
        ),
        PayoffStatus::PaymentInsufficient => warn!(
            "Monthly outgoing {:.2} does not cover interest; stopped after {} months",
            outgoing, months
        ),
        PayoffStatus::IterationCapReached => warn!(
            "Balance {:.2} still outstanding after {} months",
            balance, MAX_PAYOFF_MONTHS
        ),
    }

    let total_without_extra = compute_total_repayment(monthly_payment, term_years);

    ExtraPaymentResult {
        actual_monthly_outgoing: outgoing,
        new_months: months,
        total_paid,
        interest_saved: total_without_extra - total_paid,
        remaining_balance: if status == PayoffStatus::PaidOff {
            0.0
        } else {
            balance
        },
        status,
    }
}

/// Outcome of refinancing the principal at a new rate and term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RefinanceResult {
    pub new_monthly_payment: f64,
    pub new_total_repayment: f64,
    pub new_total_interest: f64,

    /// `original_total_repayment - new_total_repayment`; positive means the
    /// refinance costs less over its lifetime.
    pub interest_difference: f64,
}

impl RefinanceResult {
    pub fn saves_money(&self) -> bool {
        self.interest_difference > 0.0
    }
}

/// Amortizes `principal` under a new rate and term and compares the result with
/// the original plan.
///
/// The comparison is between lifetime total repayments: the full original
/// `original_total_repayment` against the new loan's total. It does not account
/// for payments already made on the original loan or for its balance at the
/// time of refinancing, so it answers "which plan costs less from day one"
/// rather than "what does switching now save".
pub fn simulate_refinancing(
    principal: f64,
    new_annual_rate_percent: f64,
    new_term_years: u32,
    original_total_repayment: f64,
) -> RefinanceResult {
    let refinanced = AmortizationResult::compute(principal, new_annual_rate_percent, new_term_years);

    RefinanceResult {
        new_monthly_payment: refinanced.monthly_payment,
        new_total_repayment: refinanced.total_repayment,
        new_total_interest: refinanced.total_interest,
        interest_difference: original_total_repayment - refinanced.total_repayment,
    }
}
