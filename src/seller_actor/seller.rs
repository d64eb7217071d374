use super::sale::resolve_request;
use super::SellerError;
use crate::framework::{FloorActor, FloorContext, FloorMsg, SaleOutcome, SaleResponse};
use crate::model::{ItemRequest, SellerId};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Wait between polls when the queue is empty.
pub const IDLE_BACKOFF: Duration = Duration::from_millis(100);

/// Range of the simulated complaint-handling delay, in milliseconds.
const COMPLAINT_HANDLING_MS: std::ops::Range<u64> = 1_000..3_000;

/// What one seller did during its shift. Local to the seller, not shared.
#[derive(Debug, Clone, PartialEq)]
pub struct SellerReport {
    pub seller_id: SellerId,
    pub customers_served: u64,
    pub out_of_stock: u64,
    pub complaints_handled: u64,
    pub responses_sent: u64,
    /// Messages taken by the complaint probe that were not complaints.
    pub messages_dropped: u64,
}

impl SellerReport {
    fn new(seller_id: SellerId) -> Self {
        Self {
            seller_id,
            customers_served: 0,
            out_of_stock: 0,
            complaints_handled: 0,
            responses_sent: 0,
            messages_dropped: 0,
        }
    }
}

/// A long-lived seller polling the shared queue until the floor closes.
pub struct Seller {
    ctx: FloorContext,
    rng: StdRng,
    report: SellerReport,
}

impl Seller {
    pub fn new(id: SellerId, ctx: FloorContext, rng: StdRng) -> Self {
        Self {
            ctx,
            rng,
            report: SellerReport::new(id),
        }
    }

    pub fn id(&self) -> SellerId {
        self.report.seller_id
    }

    /// Resolves one request under the lock, then posts the response.
    fn serve(&mut self, request: ItemRequest) -> Result<SaleOutcome, SellerError> {
        debug!(customer_id = %request.customer_id, product = %request.product, subtype = request.subtype, quantity = request.quantity, "Processing request");

        let outcome = {
            let mut status = self.ctx.ledger.acquire()?;
            resolve_request(&mut status, &request, &self.ctx.config)
        };

        match outcome {
            SaleOutcome::Sold { price } => {
                self.report.customers_served += 1;
                info!(customer_id = %request.customer_id, product = %request.product, quantity = request.quantity, price, "Sold");
            }
            SaleOutcome::OutOfStock => {
                self.report.out_of_stock += 1;
                info!(customer_id = %request.customer_id, product = %request.product, quantity = request.quantity, "Not available");
            }
        }

        // Nobody reads responses back; the send is kept so the queue carries them.
        let response = SaleResponse {
            seller_id: self.id(),
            request,
            outcome,
        };
        match self.ctx.channel.send(FloorMsg::Response(response)) {
            Ok(()) => self.report.responses_sent += 1,
            Err(e) => warn!(customer_id = %request.customer_id, error = %e, "Response lost"),
        }
        Ok(outcome)
    }

    /// Counts the complaint under the lock, then spends the handling delay unlocked.
    async fn handle_complaint(&mut self, complaint: ItemRequest) -> Result<(), SellerError> {
        info!(customer_id = %complaint.customer_id, product = %complaint.product, "Processing complaint");
        {
            let mut status = self.ctx.ledger.acquire()?;
            status.complaints_handled += 1;
        }
        self.report.complaints_handled += 1;

        let handling = Duration::from_millis(self.rng.gen_range(COMPLAINT_HANDLING_MS));
        tokio::time::sleep(handling).await;
        info!(customer_id = %complaint.customer_id, "Complaint processed");
        Ok(())
    }

    /// One extra non-blocking take right after serving, looking for a complaint.
    ///
    /// Whatever else comes out (another customer's request, a response) is
    /// dropped: the request is lost and that customer simply goes unserved.
    async fn probe_for_complaint(&mut self) -> Result<(), SellerError> {
        match self.ctx.channel.try_recv() {
            Ok(Some(FloorMsg::Complaint(complaint))) => self.handle_complaint(complaint).await?,
            Ok(Some(other)) => {
                self.report.messages_dropped += 1;
                if let FloorMsg::Request(lost) = &other {
                    warn!(customer_id = %lost.customer_id, product = %lost.product, "Request dropped by complaint probe");
                } else {
                    debug!(kind = other.kind(), "Message dropped by complaint probe");
                }
            }
            Ok(None) => {}
            Err(e) => debug!(error = %e, "Complaint probe failed"),
        }
        Ok(())
    }
}

#[async_trait]
impl FloorActor for Seller {
    type Report = SellerReport;
    type Error = SellerError;
    const ROLE: &'static str = "seller";

    fn label(&self) -> String {
        self.id().to_string()
    }

    async fn run(mut self) -> Result<SellerReport, SellerError> {
        info!(seller_id = %self.id(), "Seller started");

        while self.ctx.ledger.is_active() {
            let msg = match self.ctx.channel.try_recv() {
                Ok(Some(msg)) => msg,
                Ok(None) => {
                    tokio::time::sleep(IDLE_BACKOFF).await;
                    continue;
                }
                Err(e) => {
                    warn!(error = %e, "Dequeue failed");
                    tokio::time::sleep(IDLE_BACKOFF).await;
                    continue;
                }
            };

            match msg {
                FloorMsg::Request(request) => {
                    self.serve(request)?;
                    self.probe_for_complaint().await?;
                }
                FloorMsg::Complaint(complaint) => self.handle_complaint(complaint).await?,
                FloorMsg::Response(response) => {
                    debug!(customer_id = %response.request.customer_id, from = %response.seller_id, "Discarding response");
                }
            }
        }

        let report = self.report;
        info!(
            seller_id = %report.seller_id,
            served = report.customers_served,
            complaints = report.complaints_handled,
            "Seller terminating"
        );
        Ok(report)
    }
}
