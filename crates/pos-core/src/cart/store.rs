//! The cart store: single source of truth for the sale in progress.

use crate::cart::tax::{NoTax, TaxRule};
use crate::cart::{CartLineItem, PaymentMethod};
use crate::checkout::{
    GatewayResult, OrderPhase, OrderRequest, SubmissionOutcome,
};
use crate::error::PosError;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Derived money figures for the current lines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of `quantity * unit_price` over all lines.
    pub sub_total: Money,
    /// Taxes from the configured rule.
    pub taxes: Money,
    /// `sub_total + taxes`.
    pub total: Money,
}

impl CartTotals {
    pub fn zero(currency: Currency) -> Self {
        Self {
            sub_total: Money::zero(currency),
            taxes: Money::zero(currency),
            total: Money::zero(currency),
        }
    }
}

/// Observable cart state.
///
/// Totals always match the current lines: every mutation on [`CartStore`]
/// recomputes them before returning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartState {
    /// Lines in insertion order, which is also display order.
    pub lines: Vec<CartLineItem>,
    pub payment_method: PaymentMethod,
    pub sub_total: Money,
    pub taxes: Money,
    pub total: Money,
    /// Server confirmation text of the last successful submission.
    pub last_success: Option<String>,
    /// Failure reason of the last failed submission.
    pub last_error: Option<String>,
}

impl CartState {
    /// The initial state: no lines, cash, zero totals, no messages.
    pub fn empty(currency: Currency) -> Self {
        let zero = Money::zero(currency);
        Self {
            lines: Vec::new(),
            payment_method: PaymentMethod::default(),
            sub_total: zero,
            taxes: zero,
            total: zero,
            last_success: None,
            last_error: None,
        }
    }

    /// Current totals.
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            sub_total: self.sub_total,
            taxes: self.taxes,
            total: self.total,
        }
    }

    /// Project the lines and payment method into the order payload.
    pub fn to_order_request(&self) -> OrderRequest {
        OrderRequest::from_lines(self.payment_method, &self.lines)
    }

    fn apply_totals(&mut self, totals: CartTotals) {
        self.sub_total = totals.sub_total;
        self.taxes = totals.taxes;
        self.total = totals.total;
    }
}

/// Cart store for one point-of-sale session.
///
/// Construct one per session and hand it (or a [`CartHandle`](crate::cart::CartHandle)
/// wrapping it) to every consumer. There is no global instance.
#[derive(Debug)]
pub struct CartStore {
    state: CartState,
    currency: Currency,
    tax_rule: Box<dyn TaxRule>,
    submitting: bool,
}

impl CartStore {
    /// Create an empty store with no taxes.
    pub fn new(currency: Currency) -> Self {
        Self {
            state: CartState::empty(currency),
            currency,
            tax_rule: Box::new(NoTax),
            submitting: false,
        }
    }

    /// Replace the tax rule and recompute totals.
    pub fn with_tax_rule(mut self, rule: Box<dyn TaxRule>) -> Result<Self, PosError> {
        self.tax_rule = rule;
        self.recompute_totals()?;
        Ok(self)
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn lines(&self) -> &[CartLineItem] {
        &self.state.lines
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.state.payment_method
    }

    pub fn totals(&self) -> CartTotals {
        self.state.totals()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lines.is_empty()
    }

    /// Number of lines (not units).
    pub fn len(&self) -> usize {
        self.state.lines.len()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> i64 {
        self.state.lines.iter().map(|l| l.quantity).sum()
    }

    /// Where the cart is in its order lifecycle.
    pub fn phase(&self) -> OrderPhase {
        if self.submitting {
            OrderPhase::Submitting
        } else if self.state.last_error.is_some() {
            OrderPhase::Failed
        } else if self.state.last_success.is_some() {
            OrderPhase::Succeeded
        } else if self.state.lines.is_empty() {
            OrderPhase::Empty
        } else {
            OrderPhase::Filled
        }
    }

    /// Append a line and recompute totals.
    ///
    /// Lines are never merged: adding the same product and location twice
    /// yields two lines. Returns the index of the new line.
    pub fn add_line(&mut self, item: CartLineItem) -> Result<usize, PosError> {
        self.ensure_mutable()?;
        if item.unit_price.currency != self.currency {
            return Err(PosError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: item.unit_price.currency.code().to_string(),
            });
        }

        let totals = self.totals_for(self.state.lines.iter().chain(std::iter::once(&item)))?;
        tracing::debug!(
            product_id = %item.product.id,
            location_id = %item.location.id,
            quantity = item.quantity,
            "cart line added"
        );
        self.state.lines.push(item);
        self.state.apply_totals(totals);
        Ok(self.state.lines.len() - 1)
    }

    /// Remove the line at `index` and recompute totals.
    ///
    /// An out-of-range index is a no-op returning `Ok(None)`.
    pub fn remove_line(&mut self, index: usize) -> Result<Option<CartLineItem>, PosError> {
        self.ensure_mutable()?;
        if index >= self.state.lines.len() {
            return Ok(None);
        }

        let remaining = self
            .state
            .lines
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, line)| line);
        let totals = self.totals_for(remaining)?;
        let removed = self.state.lines.remove(index);
        self.state.apply_totals(totals);
        tracing::debug!(index, product_id = %removed.product.id, "cart line removed");
        Ok(Some(removed))
    }

    /// Select the payment method for the order.
    pub fn set_payment_method(&mut self, method: PaymentMethod) -> Result<(), PosError> {
        self.ensure_mutable()?;
        self.state.payment_method = method;
        Ok(())
    }

    /// Recompute subtotal, taxes, and total from the current lines.
    ///
    /// Idempotent. Mutations already call this, so callers only need it
    /// after swapping tax rules.
    pub fn recompute_totals(&mut self) -> Result<CartTotals, PosError> {
        let totals = self.totals_for(self.state.lines.iter())?;
        self.state.apply_totals(totals);
        Ok(totals)
    }

    /// Clear lines, zero totals, restore cash, and clear messages.
    pub fn reset_cart(&mut self) -> Result<(), PosError> {
        if self.submitting {
            return Err(PosError::SubmissionInProgress);
        }
        self.state = CartState::empty(self.currency);
        Ok(())
    }

    /// Enter the submitting phase and return the payload to send.
    ///
    /// Rejects empty carts, a second submission while one is in flight,
    /// and submissions while an earlier outcome is unacknowledged.
    pub fn begin_submission(&mut self) -> Result<OrderRequest, PosError> {
        self.ensure_mutable()?;
        if self.state.lines.is_empty() {
            return Err(PosError::EmptyCart);
        }
        self.submitting = true;
        let request = self.state.to_order_request();
        tracing::info!(
            lines = request.items.len(),
            payment_method = %request.payment_method,
            total = %self.state.total,
            "submitting order"
        );
        Ok(request)
    }

    /// Record the result of the submission started by [`begin_submission`](Self::begin_submission).
    ///
    /// The outcome stays visible until [`acknowledge_outcome`](Self::acknowledge_outcome).
    /// With no submission in flight the result is dropped and `None` returned.
    pub fn complete_submission(&mut self, result: GatewayResult) -> Option<SubmissionOutcome> {
        if !self.submitting {
            tracing::warn!("order result ignored, no submission in flight");
            return None;
        }
        self.submitting = false;
        let outcome = match result {
            Ok(confirmation) => {
                tracing::info!(message = %confirmation.message, "order accepted");
                self.state.last_error = None;
                self.state.last_success = Some(confirmation.message.clone());
                SubmissionOutcome::Succeeded(confirmation.message)
            }
            Err(err) => {
                tracing::warn!(error = %err, "order rejected");
                self.state.last_success = None;
                self.state.last_error = Some(err.message.clone());
                SubmissionOutcome::Failed(err.message)
            }
        };
        Some(outcome)
    }

    /// The recorded outcome awaiting acknowledgement, if any.
    pub fn pending_outcome(&self) -> Option<SubmissionOutcome> {
        if self.submitting {
            return None;
        }
        if let Some(message) = &self.state.last_error {
            return Some(SubmissionOutcome::Failed(message.clone()));
        }
        self.state
            .last_success
            .as_ref()
            .map(|message| SubmissionOutcome::Succeeded(message.clone()))
    }

    /// Take the pending outcome and reset the cart.
    ///
    /// Resets exactly once per outcome: a second call returns `None` and
    /// leaves the cart alone.
    pub fn acknowledge_outcome(&mut self) -> Option<SubmissionOutcome> {
        let outcome = self.pending_outcome()?;
        self.state = CartState::empty(self.currency);
        Some(outcome)
    }

    fn ensure_mutable(&self) -> Result<(), PosError> {
        let phase = self.phase();
        if phase.accepts_mutations() {
            Ok(())
        } else if phase == OrderPhase::Submitting {
            Err(PosError::SubmissionInProgress)
        } else {
            Err(PosError::OutcomePending)
        }
    }

    fn totals_for<'a>(
        &self,
        mut lines: impl Iterator<Item = &'a CartLineItem>,
    ) -> Result<CartTotals, PosError> {
        let sub_total = lines.try_fold(Money::zero(self.currency), |acc, line| {
            acc.try_add(&line.line_total).ok_or(PosError::Overflow)
        })?;
        let taxes = self.tax_rule.taxes(sub_total);
        let total = sub_total.try_add(&taxes).ok_or(PosError::Overflow)?;
        Ok(CartTotals {
            sub_total,
            taxes,
            total,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::{FlatRate, ProductRef};
    use crate::catalog::Location;
    use crate::checkout::OrderConfirmation;
    use crate::error::GatewayError;
    use crate::ids::{LocationId, ProductId};

    fn line(product: i64, quantity: i64, price: i64) -> CartLineItem {
        CartLineItem::new(
            ProductRef {
                id: ProductId::new(product),
                name: format!("Product {product}"),
            },
            Location {
                id: LocationId::new(1),
                name: "Store".to_string(),
            },
            quantity,
            Money::new(price, Currency::COP),
        )
        .unwrap()
    }

    fn cop(amount: i64) -> Money {
        Money::new(amount, Currency::COP)
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = CartStore::new(Currency::COP);
        assert_eq!(store.state(), &CartState::empty(Currency::COP));
        assert_eq!(store.phase(), OrderPhase::Empty);
    }

    #[test]
    fn test_add_line_recomputes_totals() {
        let mut store = CartStore::new(Currency::COP);
        store.add_line(line(1, 2, 50)).unwrap();
        store.add_line(line(2, 1, 30)).unwrap();

        assert_eq!(store.totals().sub_total, cop(130));
        assert_eq!(store.totals().total, cop(130));
        assert_eq!(store.phase(), OrderPhase::Filled);
        assert_eq!(store.item_count(), 3);
    }

    #[test]
    fn test_duplicate_lines_are_kept_separate() {
        let mut store = CartStore::new(Currency::COP);
        assert_eq!(store.add_line(line(1, 1, 10)).unwrap(), 0);
        assert_eq!(store.add_line(line(1, 1, 10)).unwrap(), 1);
        assert_eq!(store.len(), 2);
        assert_eq!(store.totals().sub_total, cop(20));
    }

    #[test]
    fn test_remove_line_drops_its_contribution() {
        let mut store = CartStore::new(Currency::COP);
        store.add_line(line(1, 2, 50)).unwrap();
        store.add_line(line(2, 1, 30)).unwrap();

        let removed = store.remove_line(0).unwrap().unwrap();
        assert_eq!(removed.product.id, ProductId::new(1));
        assert_eq!(store.totals().sub_total, cop(30));

        store.remove_line(0).unwrap();
        assert_eq!(store.totals().sub_total, cop(0));
        assert_eq!(store.phase(), OrderPhase::Empty);
    }

    #[test]
    fn test_remove_out_of_range_is_noop() {
        let mut store = CartStore::new(Currency::COP);
        store.add_line(line(1, 2, 50)).unwrap();
        assert_eq!(store.remove_line(5).unwrap(), None);
        assert_eq!(store.len(), 1);
        assert_eq!(store.totals().sub_total, cop(100));
    }

    #[test]
    fn test_remove_keeps_order_of_remaining_lines() {
        let mut store = CartStore::new(Currency::COP);
        for p in 1..=4 {
            store.add_line(line(p, 1, 10)).unwrap();
        }
        store.remove_line(1).unwrap();
        let ids: Vec<i64> = store.lines().iter().map(|l| l.product.id.get()).collect();
        assert_eq!(ids, vec![1, 3, 4]);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut store = CartStore::new(Currency::COP);
        store.add_line(line(1, 3, 90)).unwrap();
        let first = store.recompute_totals().unwrap();
        let second = store.recompute_totals().unwrap();
        assert_eq!(first, second);
        assert_eq!(first.sub_total, cop(270));
    }

    #[test]
    fn test_tax_rule_applied() {
        let mut store = CartStore::new(Currency::COP)
            .with_tax_rule(Box::new(FlatRate::new(19.0).unwrap()))
            .unwrap();
        store.add_line(line(1, 1, 1000)).unwrap();
        let totals = store.totals();
        assert_eq!(totals.taxes, cop(190));
        assert_eq!(totals.total, cop(1190));
    }

    #[test]
    fn test_currency_mismatch_rejected() {
        let mut store = CartStore::new(Currency::USD);
        let err = store.add_line(line(1, 1, 10)).unwrap_err();
        assert!(matches!(err, PosError::CurrencyMismatch { .. }));
        assert!(store.is_empty());
    }

    #[test]
    fn test_overflowing_add_leaves_state_untouched() {
        let mut store = CartStore::new(Currency::COP);
        store.add_line(line(1, 1, i64::MAX)).unwrap();
        let err = store.add_line(line(2, 1, 1)).unwrap_err();
        assert_eq!(err, PosError::Overflow);
        assert_eq!(store.len(), 1);
        assert_eq!(store.totals().sub_total, cop(i64::MAX));
    }

    #[test]
    fn test_empty_cart_cannot_submit() {
        let mut store = CartStore::new(Currency::COP);
        assert_eq!(store.begin_submission().unwrap_err(), PosError::EmptyCart);
        assert_eq!(store.phase(), OrderPhase::Empty);
    }

    #[test]
    fn test_submitting_blocks_mutation_and_resubmission() {
        let mut store = CartStore::new(Currency::COP);
        store.add_line(line(1, 1, 10)).unwrap();
        store.begin_submission().unwrap();

        assert_eq!(store.phase(), OrderPhase::Submitting);
        assert_eq!(store.begin_submission().unwrap_err(), PosError::SubmissionInProgress);
        assert_eq!(store.add_line(line(2, 1, 10)).unwrap_err(), PosError::SubmissionInProgress);
        assert_eq!(store.remove_line(0).unwrap_err(), PosError::SubmissionInProgress);
        assert_eq!(
            store.set_payment_method(PaymentMethod::Card).unwrap_err(),
            PosError::SubmissionInProgress
        );
        assert_eq!(store.reset_cart().unwrap_err(), PosError::SubmissionInProgress);
        assert!(store.pending_outcome().is_none());
    }

    #[test]
    fn test_success_then_acknowledge_resets() {
        let mut store = CartStore::new(Currency::COP);
        store.add_line(line(1, 2, 50)).unwrap();
        store.set_payment_method(PaymentMethod::Card).unwrap();
        store.begin_submission().unwrap();

        let outcome = store
            .complete_submission(Ok(OrderConfirmation::new("ok")))
            .unwrap();
        assert_eq!(outcome, SubmissionOutcome::Succeeded("ok".to_string()));
        assert_eq!(store.phase(), OrderPhase::Succeeded);
        assert_eq!(store.state().last_success.as_deref(), Some("ok"));
        assert_eq!(store.add_line(line(2, 1, 1)).unwrap_err(), PosError::OutcomePending);

        assert_eq!(store.acknowledge_outcome(), Some(outcome));
        assert_eq!(store.state(), &CartState::empty(Currency::COP));
        assert_eq!(store.acknowledge_outcome(), None);
    }

    #[test]
    fn test_failure_then_acknowledge_resets() {
        let mut store = CartStore::new(Currency::COP);
        store.add_line(line(1, 2, 50)).unwrap();
        store.begin_submission().unwrap();

        let outcome = store
            .complete_submission(Err(GatewayError::new("Sin stock")))
            .unwrap();
        assert_eq!(outcome, SubmissionOutcome::Failed("Sin stock".to_string()));
        assert_eq!(store.phase(), OrderPhase::Failed);
        assert_eq!(store.state().last_error.as_deref(), Some("Sin stock"));

        store.acknowledge_outcome();
        assert_eq!(store.state(), &CartState::empty(Currency::COP));
        assert_eq!(store.phase(), OrderPhase::Empty);
    }

    #[test]
    fn test_result_without_submission_is_ignored() {
        let mut store = CartStore::new(Currency::COP);
        store.add_line(line(1, 2, 50)).unwrap();

        assert_eq!(store.complete_submission(Ok(OrderConfirmation::new("stray"))), None);
        assert_eq!(store.phase(), OrderPhase::Filled);
        assert_eq!(store.state().last_success, None);
        assert_eq!(store.acknowledge_outcome(), None);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_second_result_for_one_submission_is_ignored() {
        let mut store = CartStore::new(Currency::COP);
        store.add_line(line(1, 2, 50)).unwrap();
        store.begin_submission().unwrap();
        store
            .complete_submission(Err(GatewayError::new("Sin stock")))
            .unwrap();

        assert_eq!(store.complete_submission(Ok(OrderConfirmation::new("ok"))), None);
        assert_eq!(
            store.pending_outcome(),
            Some(SubmissionOutcome::Failed("Sin stock".to_string()))
        );
    }

    #[test]
    fn test_reset_cart_restores_defaults() {
        let mut store = CartStore::new(Currency::COP);
        store.add_line(line(1, 2, 50)).unwrap();
        store.set_payment_method(PaymentMethod::Transfer).unwrap();
        store.reset_cart().unwrap();
        assert_eq!(store.state(), &CartState::empty(Currency::COP));
    }

    #[test]
    fn test_order_projection_preserves_lines() {
        let mut store = CartStore::new(Currency::COP);
        store.add_line(line(7, 2, 50)).unwrap();
        store.add_line(line(3, 1, 30)).unwrap();
        store.set_payment_method(PaymentMethod::Credit).unwrap();

        let request = store.begin_submission().unwrap();
        assert_eq!(request.payment_method, PaymentMethod::Credit);
        assert_eq!(request.items.len(), 2);
        assert_eq!(request.items[0].product_id, ProductId::new(7));
        assert_eq!(request.items[0].quantity, 2);
        assert_eq!(request.items[0].unit_price, cop(50));
        assert_eq!(request.items[1].product_id, ProductId::new(3));
        assert_eq!(request.items[1].location_id, LocationId::new(1));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn subtotal_matches_sum_of_lines(
                specs in proptest::collection::vec((1i64..50, 0i64..100_000), 0..20)
            ) {
                let mut store = CartStore::new(Currency::COP);
                for (i, (qty, price)) in specs.iter().enumerate() {
                    store.add_line(line(i as i64 + 1, *qty, *price)).unwrap();
                }
                let expected: i64 = specs.iter().map(|(q, p)| q * p).sum();
                prop_assert_eq!(store.recompute_totals().unwrap().sub_total, cop(expected));

                let mut reversed = CartStore::new(Currency::COP);
                for (i, (qty, price)) in specs.iter().enumerate().rev() {
                    reversed.add_line(line(i as i64 + 1, *qty, *price)).unwrap();
                }
                prop_assert_eq!(reversed.totals().sub_total, cop(expected));
            }

            #[test]
            fn removal_leaves_no_stale_contribution(
                specs in proptest::collection::vec((1i64..50, 0i64..100_000), 1..20),
                pick in any::<prop::sample::Index>()
            ) {
                let mut store = CartStore::new(Currency::COP);
                for (i, (qty, price)) in specs.iter().enumerate() {
                    store.add_line(line(i as i64 + 1, *qty, *price)).unwrap();
                }
                let index = pick.index(specs.len());
                store.remove_line(index).unwrap();
                let expected: i64 = specs
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != index)
                    .map(|(_, (q, p))| q * p)
                    .sum();
                prop_assert_eq!(store.totals().sub_total, cop(expected));
                prop_assert_eq!(store.recompute_totals().unwrap().sub_total, cop(expected));
            }
        }
    }
}
