//! Edge case and property tests for the amortization functions.
//!
//! Each property is checked across a spread of realistic loans rather than a
//! single example.

use approx::assert_relative_eq;
use repayrite::{
    compute_monthly_payment, compute_total_interest, compute_total_repayment,
    simulate_extra_payments, simulate_refinancing, AmortizationResult, LoanTerms, PayoffStatus,
    MAX_PAYOFF_MONTHS,
};

const PRINCIPALS: [f64; 4] = [5_000.0, 85_000.0, 200_000.0, 1_250_000.0];
const RATES: [f64; 5] = [0.5, 2.25, 5.0, 8.0, 15.0];
const TERMS: [u32; 4] = [1, 10, 25, 40];

fn loans() -> impl Iterator<Item = (f64, f64, u32)> {
    PRINCIPALS.iter().flat_map(|&p| {
        RATES
            .iter()
            .flat_map(move |&r| TERMS.iter().map(move |&y| (p, r, y)))
    })
}

// ==================== MONTHLY PAYMENT ====================

#[test]
fn test_zero_rate_is_exact_division() {
    for &principal in &PRINCIPALS {
        for &years in &TERMS {
            let payment = compute_monthly_payment(principal, 0.0, years);
            assert_eq!(payment, principal / (f64::from(years) * 12.0));
        }
    }
}

#[test]
fn test_payment_covers_first_month_interest() {
    for (principal, rate, years) in loans() {
        let payment = compute_monthly_payment(principal, rate, years);
        let interest = principal * rate / 100.0 / 12.0;
        assert!(payment > interest, "{} {} {}", principal, rate, years);
    }
}

#[test]
fn test_payment_grows_with_rate_and_shrinks_with_term() {
    let low = compute_monthly_payment(200_000.0, 3.0, 30);
    let high = compute_monthly_payment(200_000.0, 6.0, 30);
    assert!(high > low);

    let short = compute_monthly_payment(200_000.0, 5.0, 15);
    let long = compute_monthly_payment(200_000.0, 5.0, 30);
    assert!(short > long);
}

#[test]
fn test_tiny_rate_approaches_straight_line() {
    let straight = compute_monthly_payment(120_000.0, 0.0, 10);
    let tiny = compute_monthly_payment(120_000.0, 1e-6, 10);
    assert_relative_eq!(tiny, straight, max_relative = 1e-6);
}

// ==================== TOTALS ====================

#[test]
fn test_total_repayment_matches_payment_times_months() {
    for (principal, rate, years) in loans() {
        let payment = compute_monthly_payment(principal, rate, years);
        let total = compute_total_repayment(payment, years);
        assert_relative_eq!(total, payment * f64::from(years) * 12.0, max_relative = 1e-12);
    }
}

#[test]
fn test_total_interest_is_difference() {
    for (principal, rate, years) in loans() {
        let result = AmortizationResult::compute(principal, rate, years);
        assert_eq!(
            compute_total_interest(result.total_repayment, principal),
            result.total_repayment - principal
        );
        assert_eq!(result.total_interest, result.total_repayment - principal);
        assert!(result.total_interest > 0.0);
    }
}

// ==================== EXTRA PAYMENTS ====================

#[test]
fn test_zero_extra_reproduces_baseline() {
    for (principal, rate, years) in loans() {
        let result = simulate_extra_payments(principal, rate, years, 0.0);
        let scheduled = years * 12;

        assert_eq!(result.status, PayoffStatus::PaidOff);
        assert!(
            result.new_months + 1 >= scheduled && result.new_months <= scheduled,
            "{} {} {}: {} months",
            principal,
            rate,
            years,
            result.new_months
        );
        assert!(result.interest_saved.abs() <= result.actual_monthly_outgoing + 1e-6);
    }
}

#[test]
fn test_extra_payment_never_lengthens_or_costs() {
    for (principal, rate, years) in loans() {
        let result = simulate_extra_payments(principal, rate, years, 150.0);

        assert!(result.is_paid_off());
        assert!(result.new_months <= years * 12);
        assert!(result.interest_saved >= 0.0, "{} {} {}", principal, rate, years);
    }
}

#[test]
fn test_larger_extra_pays_off_sooner() {
    let small = simulate_extra_payments(200_000.0, 5.0, 30, 100.0);
    let large = simulate_extra_payments(200_000.0, 5.0, 30, 1_000.0);
    assert!(large.new_months < small.new_months);
    assert!(large.interest_saved > small.interest_saved);
}

#[test]
fn test_extra_exceeding_principal_pays_off_in_one_month() {
    let result = simulate_extra_payments(5_000.0, 5.0, 10, 10_000.0);
    assert!(result.is_paid_off());
    assert_eq!(result.new_months, 1);
    // Only the balance and one month's interest are charged.
    assert_relative_eq!(
        result.total_paid,
        5_000.0 + 5_000.0 * 5.0 / 1200.0,
        max_relative = 1e-12
    );
}

#[test]
fn test_reference_extra_payment_scenario() {
    let result = simulate_extra_payments(200_000.0, 5.0, 30, 200.0);
    assert!(result.new_months < 360);
    assert!(result.interest_saved > 0.0);
}

#[test]
fn test_payoff_loop_is_bounded() {
    // The outgoing exceeds the first month's interest by one penny, so the
    // balance falls, but far too slowly to clear within the cap.
    let principal = 500_000.0;
    let rate = 9.0;
    let interest = principal * rate / 100.0 / 12.0;
    let baseline = compute_monthly_payment(principal, rate, 30);

    let result = simulate_extra_payments(principal, rate, 30, interest + 0.01 - baseline);
    assert_eq!(result.status, PayoffStatus::IterationCapReached);
    assert_eq!(result.new_months, MAX_PAYOFF_MONTHS);
    assert!(result.remaining_balance > 0.0 && result.remaining_balance < principal);
}

#[test]
fn test_outgoing_equal_to_interest_stops_immediately() {
    let principal = 100_000.0;
    let baseline = compute_monthly_payment(principal, 12.0, 20);
    // Outgoing of exactly 1% of the balance leaves nothing for principal.
    let result = simulate_extra_payments(principal, 12.0, 20, 1_000.0 - baseline);

    assert_eq!(result.status, PayoffStatus::PaymentInsufficient);
    assert_eq!(result.new_months, 0);
    assert_eq!(result.total_paid, 0.0);
    assert_eq!(result.remaining_balance, principal);
}

// ==================== REFINANCING ====================

#[test]
fn test_refinance_same_terms_is_neutral() {
    for (principal, rate, years) in loans() {
        let original = AmortizationResult::compute(principal, rate, years);
        let refi = simulate_refinancing(principal, rate, years, original.total_repayment);

        assert_eq!(refi.new_total_repayment, original.total_repayment);
        assert_eq!(refi.interest_difference, 0.0);
    }
}

#[test]
fn test_reference_refinance_saves() {
    let terms = LoanTerms::new(200_000.0, 5.0, 30).unwrap();
    let original = terms.amortize();
    let refi = simulate_refinancing(200_000.0, 3.5, 25, original.total_repayment);

    assert!(refi.interest_difference > 0.0);
    assert_eq!(refi, terms.refinance(3.5, 25));
    assert_relative_eq!(
        refi.interest_difference,
        original.total_repayment - refi.new_total_repayment
    );
}

#[test]
fn test_refinance_to_zero_rate() {
    let original = AmortizationResult::compute(60_000.0, 4.0, 5);
    let refi = simulate_refinancing(60_000.0, 0.0, 5, original.total_repayment);

    assert_eq!(refi.new_monthly_payment, 1_000.0);
    assert_eq!(refi.new_total_interest, 0.0);
    assert_relative_eq!(refi.interest_difference, original.total_interest);
}

#[test]
fn test_refinance_compares_lifetime_totals_not_interest() {
    // Stretching the term lowers the payment but raises the lifetime total.
    let original = AmortizationResult::compute(200_000.0, 5.0, 15);
    let refi = simulate_refinancing(200_000.0, 4.5, 30, original.total_repayment);

    assert!(refi.new_monthly_payment < original.monthly_payment);
    assert!(refi.interest_difference < 0.0);
}
