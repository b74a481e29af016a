//! Deterministic finance calculators
//!
//! Pure functions: no I/O, no shared state. Inputs outside the documented
//! domain are rejected with `AppError::InvalidParameter` instead of leaking
//! NaN or infinity to the caller.
//!
//! Conventions:
//! - monthly rate `r = annual_percent / 100 / 12`, months `n = years * 12`
//! - recurring contributions use the annuity-due form (each payment compounds
//!   one extra month), matching the figures shown in the learning content
//! - `r == 0` is special-cased; the closed forms divide by zero there
//! - `(1+r)^n - 1` goes through `ln_1p`/`exp_m1` so tiny positive rates do
//!   not collapse to zero growth

use crate::error::AppError;
use crate::models::{
    InvestmentParameters, InvestmentResult, LoanParameters, LoanResult, SipParameters, SipResult,
};
use crate::Result;
use tracing::debug;

mod format;

pub use format::format_inr;

/// Round a monetary amount to whole currency units, half away from zero.
///
/// This is the only rounding applied to calculator output. Amounts that do
/// not fit in an `i64` are rejected rather than saturated.
pub fn round_currency(amount: f64) -> Result<i64> {
    let rounded = amount.round();
    if rounded.is_finite() && rounded.abs() < I64_BOUND {
        Ok(rounded as i64)
    } else {
        Err(AppError::invalid(format!(
            "amount {} is outside the representable currency range",
            amount
        )))
    }
}

/// 2^63; every integral f64 strictly below it converts to `i64` exactly.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Future value of a monthly SIP.
pub fn compute_sip(params: &SipParameters) -> Result<SipResult> {
    require_positive("monthlyAmount", params.monthly_amount)?;
    require_rate("annualReturnPercent", params.annual_return_percent)?;
    let months = require_months("years", params.years)?;

    let r = monthly_rate(params.annual_return_percent);
    let future_value = params.monthly_amount * annuity_due_factor(r, months);
    let total_investment = params.monthly_amount * months as f64;

    let result = SipResult {
        future_value: round_currency(future_value)?,
        total_investment: round_currency(total_investment)?,
        total_returns: round_currency(future_value - total_investment)?,
    };

    debug!(
        monthly_amount = params.monthly_amount,
        annual_return_percent = params.annual_return_percent,
        years = params.years,
        future_value = result.future_value,
        "SIP computed"
    );

    Ok(result)
}

/// Amortized loan EMI with total payable and total interest.
pub fn compute_loan_emi(params: &LoanParameters) -> Result<LoanResult> {
    require_positive("principal", params.principal)?;
    require_rate("annualRatePercent", params.annual_rate_percent)?;
    let months = require_months("tenureYears", params.tenure_years)?;

    let r = monthly_rate(params.annual_rate_percent);
    let n = months as f64;

    let growth = growth_minus_one(r, months);
    let emi = if growth > 0.0 {
        params.principal * r * (growth + 1.0) / growth
    } else {
        params.principal / n
    };

    let total_payable = emi * n;
    let total_interest = total_payable - params.principal;

    let result = LoanResult {
        monthly_payment: round_currency(emi)?,
        total_payable: round_currency(total_payable)?,
        total_interest: round_currency(total_interest)?,
    };

    debug!(
        principal = params.principal,
        annual_rate_percent = params.annual_rate_percent,
        tenure_years = params.tenure_years,
        monthly_payment = result.monthly_payment,
        "EMI computed"
    );

    Ok(result)
}

/// Lump sum plus monthly contributions, compounded monthly.
pub fn compute_investment_growth(params: &InvestmentParameters) -> Result<InvestmentResult> {
    require_non_negative("initialAmount", params.initial_amount)?;
    require_non_negative("monthlyContribution", params.monthly_contribution)?;
    require_rate("annualReturnPercent", params.annual_return_percent)?;
    let months = require_months("years", params.years)?;

    let r = monthly_rate(params.annual_return_percent);
    let lump_sum_value = params.initial_amount * compound(r, months);
    let contributions_value = params.monthly_contribution * annuity_due_factor(r, months);
    let future_value = lump_sum_value + contributions_value;
    let total_investment = params.initial_amount + params.monthly_contribution * months as f64;

    let result = InvestmentResult {
        future_value: round_currency(future_value)?,
        total_investment: round_currency(total_investment)?,
        total_returns: round_currency(future_value - total_investment)?,
    };

    debug!(
        initial_amount = params.initial_amount,
        monthly_contribution = params.monthly_contribution,
        years = params.years,
        future_value = result.future_value,
        "Investment growth computed"
    );

    Ok(result)
}

fn monthly_rate(annual_percent: f64) -> f64 {
    annual_percent / 100.0 / 12.0
}

fn compound(r: f64, months: i32) -> f64 {
    (1.0 + r).powi(months)
}

/// `(1+r)^n - 1` without the cancellation of computing `(1+r)^n` first.
fn growth_minus_one(r: f64, months: i32) -> f64 {
    (months as f64 * r.ln_1p()).exp_m1()
}

/// `((1+r)^n - 1) / r * (1+r)`, or `n` when `r == 0`.
fn annuity_due_factor(r: f64, months: i32) -> f64 {
    let growth = growth_minus_one(r, months);
    if r > 0.0 && growth > 0.0 {
        (growth / r) * (1.0 + r)
    } else {
        months as f64
    }
}

//
// ================= Validation =================
//

fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(AppError::invalid(format!("{} must be a positive number, got {}", name, value)))
    }
}

fn require_non_negative(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(AppError::invalid(format!("{} must be zero or positive, got {}", name, value)))
    }
}

fn require_rate(name: &str, value: f64) -> Result<()> {
    require_non_negative(name, value)
}

fn require_months(name: &str, years: u32) -> Result<i32> {
    if years == 0 {
        return Err(AppError::invalid(format!("{} must be at least 1", name)));
    }
    years
        .checked_mul(12)
        .and_then(|months| i32::try_from(months).ok())
        .ok_or_else(|| AppError::invalid(format!("{} is too large: {}", name, years)))
}
