//! Equated monthly installment calculation.
//!
//! Everything in here is a pure function of its input: text goes in, a
//! validated [`LoanInput`] comes out, and [`calculate`] turns that into a
//! [`LoanResult`] at full `f64` precision. Rounding for display lives in
//! [`crate::format`].

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One of the three inputs on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Principal,
    AnnualRate,
    Tenure,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Principal, Field::AnnualRate, Field::Tenure];

    pub fn label(self) -> &'static str {
        match self {
            Field::Principal => "Loan Amount",
            Field::AnnualRate => "Annual Interest Rate (%)",
            Field::Tenure => "Loan Tenure (months)",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Field::Principal => "e.g. 500000",
            Field::AnnualRate => "e.g. 7.5",
            Field::Tenure => "e.g. 60",
        }
    }

    pub fn next(self) -> Field {
        match self {
            Field::Principal => Field::AnnualRate,
            Field::AnnualRate => Field::Tenure,
            Field::Tenure => Field::Principal,
        }
    }

    pub fn prev(self) -> Field {
        match self {
            Field::Principal => Field::Tenure,
            Field::AnnualRate => Field::Principal,
            Field::Tenure => Field::AnnualRate,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Principal => "loan amount",
            Field::AnnualRate => "interest rate",
            Field::Tenure => "tenure",
        };
        f.write_str(name)
    }
}

/// Reasons a set of inputs cannot produce a result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("{field} is not a number: {input:?}")]
    NotANumber { field: Field, input: String },

    #[error("{field} must be greater than zero")]
    NotPositive { field: Field },

    #[error("tenure must be a whole number of months: {input:?}")]
    FractionalTenure { input: String },

    #[error("inputs are too large to produce a finite installment")]
    OutOfRange,
}

/// Validated loan terms. Every field is strictly positive and finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanInput {
    principal: f64,
    annual_rate_percent: f64,
    tenure_months: u32,
}

impl LoanInput {
    pub fn new(
        principal: f64,
        annual_rate_percent: f64,
        tenure_months: u32,
    ) -> Result<Self, ValidationError> {
        let principal = positive(Field::Principal, principal)?;
        let annual_rate_percent = positive(Field::AnnualRate, annual_rate_percent)?;
        if tenure_months == 0 {
            return Err(ValidationError::NotPositive {
                field: Field::Tenure,
            });
        }

        Ok(Self {
            principal,
            annual_rate_percent,
            tenure_months,
        })
    }

    /// Parses the three raw form values, checking principal, rate and tenure in
    /// that order and reporting the first problem found.
    pub fn parse(principal: &str, annual_rate: &str, tenure: &str) -> Result<Self, ValidationError> {
        let principal = parse_real(Field::Principal, principal)?;
        let annual_rate_percent = parse_real(Field::AnnualRate, annual_rate)?;
        let tenure_months = parse_tenure(tenure)?;
        Self::new(principal, annual_rate_percent, tenure_months)
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    pub fn annual_rate_percent(&self) -> f64 {
        self.annual_rate_percent
    }

    pub fn tenure_months(&self) -> u32 {
        self.tenure_months
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 12.0 / 100.0
    }
}

/// Installment and totals for one [`LoanInput`], unrounded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LoanResult {
    pub monthly_installment: f64,
    pub total_interest: f64,
    pub total_payment: f64,
}

/// Computes the amortizing installment
/// `P × R × (1+R)^N / ((1+R)^N − 1)` with `R` the monthly rate.
///
/// Evaluated in the equivalent form `P × R / (1 − (1+R)^−N)`, with the
/// discount factor built from `ln_1p`/`exp_m1`. Very small rates approach
/// `P / N` instead of collapsing to `0 / 0`, and very long tenures approach
/// `P × R` instead of `inf / inf`.
pub fn calculate(input: &LoanInput) -> Result<LoanResult, ValidationError> {
    let rate = input.monthly_rate();
    let months = input.tenure_months as f64;

    let discount = -(-(months * rate.ln_1p())).exp_m1();
    let monthly_installment = input.principal * rate / discount;

    let total_payment = monthly_installment * months;
    let total_interest = total_payment - input.principal;

    let result = LoanResult {
        monthly_installment,
        total_interest,
        total_payment,
    };
    if !(monthly_installment.is_finite() && total_payment.is_finite() && total_interest.is_finite()) {
        return Err(ValidationError::OutOfRange);
    }

    Ok(result)
}

/// Parses and calculates in one step, straight from form text.
pub fn calculate_text(
    principal: &str,
    annual_rate: &str,
    tenure: &str,
) -> Result<(LoanInput, LoanResult), ValidationError> {
    let input = LoanInput::parse(principal, annual_rate, tenure)?;
    let result = calculate(&input)?;
    Ok((input, result))
}

fn positive(field: Field, value: f64) -> Result<f64, ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NotANumber {
            field,
            input: value.to_string(),
        });
    }
    if value <= 0.0 {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(value)
}

fn parse_real(field: Field, input: &str) -> Result<f64, ValidationError> {
    let not_a_number = || ValidationError::NotANumber {
        field,
        input: input.to_string(),
    };

    let value: f64 = input.trim().parse().map_err(|_| not_a_number())?;
    if !value.is_finite() {
        return Err(not_a_number());
    }
    Ok(value)
}

// Whole-valued decimals such as "60.0" are accepted; "60.5" is not truncated.
fn parse_tenure(input: &str) -> Result<u32, ValidationError> {
    let trimmed = input.trim();
    if let Ok(months) = trimmed.parse::<u32>() {
        return Ok(months);
    }

    let value = parse_real(Field::Tenure, input)?;
    if value <= 0.0 {
        return Err(ValidationError::NotPositive {
            field: Field::Tenure,
        });
    }
    if value.fract() != 0.0 {
        return Err(ValidationError::FractionalTenure {
            input: input.to_string(),
        });
    }
    if value > u32::MAX as f64 {
        return Err(ValidationError::OutOfRange);
    }
    Ok(value as u32)
}
