use super::CustomerError;
use crate::framework::{FloorActor, FloorContext, FloorMsg};
use crate::model::{CustomerId, ItemRequest, ProductType, PRODUCT_TYPE_COUNT};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Pause between two order lines of the same visit.
pub const ITEM_PAUSE: Duration = Duration::from_millis(500);

/// Most units a customer asks for in one order line.
pub const MAX_QUANTITY: u32 = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct CustomerReport {
    pub customer_id: CustomerId,
    pub patience: Duration,
    pub requests_sent: u32,
    pub complained: bool,
}

/// One visit: place a few orders, wait out patience, leave frustrated.
///
/// The customer never looks for a response. Running out of patience is the
/// frustration event whether or not a seller served any of the orders.
pub struct Customer {
    id: CustomerId,
    ctx: FloorContext,
    rng: StdRng,
}

impl Customer {
    pub fn new(id: CustomerId, ctx: FloorContext, rng: StdRng) -> Self {
        Self { id, ctx, rng }
    }

    pub fn id(&self) -> CustomerId {
        self.id
    }

    fn draw_patience(&mut self) -> Duration {
        let params = &self.ctx.config.customer_params;
        Duration::from_secs(self.rng.gen_range(params.min_patience_secs..=params.max_patience_secs))
    }

    fn next_request(&mut self) -> ItemRequest {
        let product = ProductType::ALL[self.rng.gen_range(0..PRODUCT_TYPE_COUNT)];
        let subtypes = self.ctx.config.subtypes(product);
        let subtype = if subtypes > 0 { self.rng.gen_range(0..subtypes) } else { 0 };
        let quantity = self.rng.gen_range(1..=MAX_QUANTITY);
        ItemRequest::new(self.id, product, subtype, quantity)
    }

    /// Records the frustration and, maybe, a complaint in one critical section.
    ///
    /// Returns whether a complaint was filed.
    fn give_up(&mut self, last_request: Option<ItemRequest>) -> Result<bool, CustomerError> {
        let mut status = self.ctx.ledger.acquire()?;
        status.frustrated_customers += 1;

        let Some(last_request) = last_request else {
            return Ok(false);
        };
        if !self.rng.gen_bool(self.ctx.config.complaint_probability) {
            return Ok(false);
        }

        match self.ctx.channel.send(FloorMsg::Complaint(last_request)) {
            Ok(()) => {
                status.complained_customers += 1;
                info!(customer_id = %self.id, product = %last_request.product, "Filed a complaint");
                Ok(true)
            }
            Err(e) => {
                warn!(customer_id = %self.id, error = %e, "Complaint lost");
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl FloorActor for Customer {
    type Report = CustomerReport;
    type Error = CustomerError;
    const ROLE: &'static str = "customer";

    fn label(&self) -> String {
        self.id.to_string()
    }

    async fn run(mut self) -> Result<CustomerReport, CustomerError> {
        let patience = self.draw_patience();
        info!(customer_id = %self.id, patience_secs = patience.as_secs(), "Customer arrived");

        let num_items = self.rng.gen_range(1..=self.ctx.config.max_purchase_items);
        let mut last_request = None;
        let mut requests_sent = 0;
        for i in 0..num_items {
            if i > 0 {
                tokio::time::sleep(ITEM_PAUSE).await;
            }
            let request = self.next_request();
            last_request = Some(request);
            if let Err(e) = self.ctx.channel.send(FloorMsg::Request(request)) {
                warn!(customer_id = %self.id, error = %e, "Request lost");
                break;
            }
            requests_sent += 1;
            debug!(
                customer_id = %self.id,
                product = %request.product,
                subtype = request.subtype,
                quantity = request.quantity,
                "Requested"
            );
        }

        tokio::time::sleep(patience).await;

        let complained = self.give_up(last_request)?;
        info!(customer_id = %self.id, patience_secs = patience.as_secs(), "Customer leaving");

        Ok(CustomerReport {
            customer_id: self.id,
            patience,
            requests_sent,
            complained,
        })
    }
}
