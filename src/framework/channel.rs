//! # Request Channel
//!
//! The shared work queue between customers and sellers. It is multi-producer
//! and multi-consumer: every actor holds a clone and may both send and take.
//! Delivery order across producers is whatever the queue yields; there is no
//! addressing, so any seller may pick up any customer's message.
//!
//! Messages carry an explicit [`FloorMsg`] tag instead of being told apart by
//! field values.

use crate::framework::FloorError;
use crate::model::{ItemRequest, SellerId};
use async_channel::{Receiver, Sender, TryRecvError};

/// What a seller decided for one request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SaleOutcome {
    Sold { price: f64 },
    OutOfStock,
}

impl SaleOutcome {
    pub fn is_sold(&self) -> bool {
        matches!(self, SaleOutcome::Sold { .. })
    }
}

/// A seller's reply to a request.
///
/// Customers never read these; they sit in the queue until some seller
/// takes and discards them.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleResponse {
    pub seller_id: SellerId,
    pub request: ItemRequest,
    pub outcome: SaleOutcome,
}

/// Everything that travels over the floor's queue.
#[derive(Debug, Clone, PartialEq)]
pub enum FloorMsg {
    Request(ItemRequest),
    Response(SaleResponse),
    Complaint(ItemRequest),
}

impl FloorMsg {
    pub fn kind(&self) -> &'static str {
        match self {
            FloorMsg::Request(_) => "request",
            FloorMsg::Response(_) => "response",
            FloorMsg::Complaint(_) => "complaint",
        }
    }
}

/// Cloneable handle onto the shared, unbounded queue.
#[derive(Debug, Clone)]
pub struct RequestChannel {
    sender: Sender<FloorMsg>,
    receiver: Receiver<FloorMsg>,
}

impl Default for RequestChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestChannel {
    pub fn new() -> Self {
        let (sender, receiver) = async_channel::unbounded();
        Self { sender, receiver }
    }

    /// Enqueues without waiting. Fails only once the queue is closed.
    pub fn send(&self, msg: FloorMsg) -> Result<(), FloorError> {
        self.sender.try_send(msg).map_err(|_| FloorError::ChannelClosed)
    }

    /// Takes one message if any is waiting.
    pub fn try_recv(&self) -> Result<Option<FloorMsg>, FloorError> {
        match self.receiver.try_recv() {
            Ok(msg) => Ok(Some(msg)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Closed) => Err(FloorError::ChannelClosed),
        }
    }

    /// Messages currently queued.
    pub fn len(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_empty(&self) -> bool {
        self.receiver.is_empty()
    }

    /// Closes the queue for every holder. Returns `false` if already closed.
    pub fn close(&self) -> bool {
        self.sender.close()
    }
}
