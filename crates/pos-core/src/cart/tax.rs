//! Tax rules applied on top of the cart subtotal.

use crate::error::PosError;
use crate::money::Money;
use std::fmt;

/// Computes the tax owed for a subtotal.
pub trait TaxRule: fmt::Debug + Send + Sync {
    /// Taxes for the given subtotal, in the subtotal's currency.
    fn taxes(&self, sub_total: Money) -> Money;
}

/// No taxes. The default rule.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct NoTax;

impl TaxRule for NoTax {
    fn taxes(&self, sub_total: Money) -> Money {
        Money::zero(sub_total.currency)
    }
}

/// A single percentage applied to the whole subtotal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatRate {
    percent: f64,
}

impl FlatRate {
    /// Create a flat rate. The percentage must be finite and non-negative.
    pub fn new(percent: f64) -> Result<Self, PosError> {
        if !percent.is_finite() || percent < 0.0 {
            return Err(PosError::Validation(format!(
                "Tax rate must be a non-negative percentage, got {percent}"
            )));
        }
        Ok(Self { percent })
    }

    pub fn percent(&self) -> f64 {
        self.percent
    }
}

impl TaxRule for FlatRate {
    fn taxes(&self, sub_total: Money) -> Money {
        sub_total.percentage(self.percent)
    }
}

/// Build the rule for a configured percentage. Zero means [`NoTax`].
pub fn rule_for_percent(percent: f64) -> Result<Box<dyn TaxRule>, PosError> {
    if percent == 0.0 {
        return Ok(Box::new(NoTax));
    }
    Ok(Box::new(FlatRate::new(percent)?))
}
