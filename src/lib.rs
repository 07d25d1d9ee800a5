//! # RepayRite
//!
//! Mortgage repayment calculator with two what-if scenarios: paying extra
//! principal every month, and refinancing at a new rate and term.
//!
//! ## Design Principles
//!
//! - **Pure core**: the [`amortization`] functions take numbers and return
//!   small result records, with no I/O or shared state
//! - **Validate at the edge**: user input is parsed and checked in [`input`]
//!   before it reaches the calculations
//! - **Bounded simulation**: the extra-payment payoff loop stops after
//!   [`MAX_PAYOFF_MONTHS`] and reports how it ended
//! - **Rounded once**: figures are rounded to pence only for display and export
//!
//! ## Example
//!
//! ```
//! use repayrite::LoanTerms;
//!
//! let terms = LoanTerms::new(200_000.0, 5.0, 30).unwrap();
//! let baseline = terms.amortize();
//! assert!((baseline.monthly_payment - 1073.64).abs() < 0.01);
//!
//! let extra = terms.with_extra_payments(200.0);
//! assert!(extra.new_months < 360);
//! ```

pub mod amortization;
pub mod error;
pub mod input;
pub mod money;
pub mod report;
pub mod session;

pub use amortization::{
    compute_monthly_payment, compute_total_interest, compute_total_repayment,
    simulate_extra_payments, simulate_refinancing, AmortizationResult, ExtraPaymentResult,
    LoanTerms, PayoffStatus, RefinanceResult, MAX_PAYOFF_MONTHS, MAX_PRINCIPAL, MAX_RATE_PERCENT,
    MAX_TERM_YEARS,
};
pub use error::{RepayError, Result};
pub use money::Money;
pub use report::Palette;
pub use session::Session;
