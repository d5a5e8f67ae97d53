//! Shared handle to a session's cart store.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::cart::{CartLineItem, CartState, CartStore, LineItemEntry, PaymentMethod};
use crate::checkout::{OrderGateway, OrderPhase, OrderSummary, SubmissionOutcome};
use crate::error::{GatewayError, PosError};

/// Cloneable handle to one cart store and the gateway that submits its orders.
///
/// Every consumer in a session holds a clone of the same handle. The store
/// lock is never held across the network call, so readers keep seeing the
/// `Submitting` phase while an order is in flight, and a second submission
/// is rejected instead of queued.
#[derive(Clone)]
pub struct CartHandle {
    store: Arc<Mutex<CartStore>>,
    gateway: Arc<dyn OrderGateway>,
}

impl CartHandle {
    pub fn new(store: CartStore, gateway: Arc<dyn OrderGateway>) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            gateway,
        }
    }

    pub async fn add_line(&self, item: CartLineItem) -> Result<usize, PosError> {
        self.store.lock().await.add_line(item)
    }

    /// Validate an entry and append its line.
    pub async fn add_entry(&self, entry: &LineItemEntry) -> Result<usize, PosError> {
        let line = entry.build_line()?;
        self.add_line(line).await
    }

    pub async fn remove_line(&self, index: usize) -> Result<Option<CartLineItem>, PosError> {
        self.store.lock().await.remove_line(index)
    }

    pub async fn set_payment_method(&self, method: PaymentMethod) -> Result<(), PosError> {
        self.store.lock().await.set_payment_method(method)
    }

    pub async fn reset_cart(&self) -> Result<(), PosError> {
        self.store.lock().await.reset_cart()
    }

    pub async fn phase(&self) -> OrderPhase {
        self.store.lock().await.phase()
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> CartState {
        self.store.lock().await.state().clone()
    }

    pub async fn summary(&self) -> OrderSummary {
        OrderSummary::from_store(&*self.store.lock().await)
    }

    /// Submit the cart as one order.
    ///
    /// The request runs to completion on its own task, so dropping the
    /// returned future (a timeout, a `select!`) still records the outcome
    /// in the store. There is no client timeout beyond what the gateway's
    /// transport enforces.
    pub async fn submit_order(&self) -> Result<SubmissionOutcome, PosError> {
        let request = self.store.lock().await.begin_submission()?;

        let store = Arc::clone(&self.store);
        let gateway = Arc::clone(&self.gateway);
        let flight = tokio::spawn(async move {
            let result = gateway.create_order(&request).await;
            store.lock().await.complete_submission(result)
        });

        let outcome = match flight.await {
            Ok(outcome) => outcome,
            Err(err) => {
                tracing::error!(error = %err, "order submission task failed");
                self.store
                    .lock()
                    .await
                    .complete_submission(Err(GatewayError::new(err.to_string())))
            }
        };
        outcome.ok_or(PosError::NoSubmissionInFlight)
    }

    /// Take the pending outcome and reset the cart. See [`CartStore::acknowledge_outcome`].
    pub async fn acknowledge_outcome(&self) -> Option<SubmissionOutcome> {
        self.store.lock().await.acknowledge_outcome()
    }
}
