use bakery_floor::framework::{spawn_actor, FloorContext, FloorError, FloorMsg, Ledger, ProductionStatus};
use bakery_floor::model::{BakeryConfig, CustomerId, ItemRequest, ProductType, SellerId};
use bakery_floor::seller_actor::{self, SellerError};
use std::sync::Arc;
use std::time::Duration;

fn seeded_config() -> BakeryConfig {
    BakeryConfig {
        seed: Some(11),
        ..BakeryConfig::default()
    }
}

fn context_with_stock(config: BakeryConfig, product: ProductType, produced: u64, sold: u64) -> FloorContext {
    let mut status = ProductionStatus::default();
    status.produced_items[product.index()] = produced;
    status.sold_items[product.index()] = sold;
    FloorContext::with_ledger(config, Ledger::with_status(status))
}

/// A sold-out product is recorded as a missing item; stock and profit stay put.
#[tokio::test(start_paused = true)]
async fn test_sold_out_request_counts_as_missing() {
    let ctx = context_with_stock(seeded_config(), ProductType::Bread, 5, 5);
    let handle = spawn_actor(seller_actor::new(SellerId(1), &ctx));

    ctx.channel
        .send(FloorMsg::Request(ItemRequest::new(CustomerId(1), ProductType::Bread, 0, 1)))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;
    ctx.ledger.stop();
    let report = handle.await.unwrap().unwrap();

    let status = ctx.ledger.snapshot().unwrap();
    assert_eq!(status.missing_items_requests, 1);
    assert_eq!(status.sold_items[ProductType::Bread.index()], 5);
    assert_eq!(status.total_profit, 0.0);
    assert_eq!(report.out_of_stock, 1);
    assert_eq!(report.customers_served, 0);
    assert_eq!(report.responses_sent, 1);
}

/// A premium cake order is sold at base price plus 10% per subtype level.
#[tokio::test(start_paused = true)]
async fn test_premium_sale_updates_ledger() {
    let mut config = seeded_config();
    config.product_prices[ProductType::Cake.index()] = 4.00;
    let ctx = context_with_stock(config, ProductType::Cake, 10, 2);
    let handle = spawn_actor(seller_actor::new(SellerId(1), &ctx));

    ctx.channel
        .send(FloorMsg::Request(ItemRequest::new(CustomerId(2), ProductType::Cake, 1, 3)))
        .unwrap();
    tokio::time::sleep(Duration::from_millis(500)).await;
    ctx.ledger.stop();
    let report = handle.await.unwrap().unwrap();

    let status = ctx.ledger.snapshot().unwrap();
    assert_eq!(status.sold_items[ProductType::Cake.index()], 5);
    assert!((status.total_profit - 13.20).abs() < 1e-9);
    assert_eq!(status.missing_items_requests, 0);
    assert_eq!(report.customers_served, 1);
    // The only thing left to probe was the seller's own response.
    assert_eq!(report.messages_dropped, 1);
    assert!(ctx.channel.is_empty());
}

/// A complaint picked up by the probe right after a sale is handled.
#[tokio::test(start_paused = true)]
async fn test_probe_handles_waiting_complaint() {
    let ctx = context_with_stock(seeded_config(), ProductType::Sweet, 10, 0);
    let handle = spawn_actor(seller_actor::new(SellerId(1), &ctx));

    ctx.channel
        .send(FloorMsg::Request(ItemRequest::new(CustomerId(3), ProductType::Sweet, 0, 1)))
        .unwrap();
    ctx.channel
        .send(FloorMsg::Complaint(ItemRequest::new(CustomerId(4), ProductType::Cake, 0, 2)))
        .unwrap();

    // Handling takes at most 3 s.
    tokio::time::sleep(Duration::from_secs(4)).await;
    ctx.ledger.stop();
    let report = handle.await.unwrap().unwrap();

    let status = ctx.ledger.snapshot().unwrap();
    assert_eq!(status.complaints_handled, 1);
    assert_eq!(status.complained_customers, 0, "only customers count themselves as complained");
    assert_eq!(report.complaints_handled, 1);
    assert_eq!(report.customers_served, 1);
    assert!(ctx.channel.is_empty(), "the response left behind is discarded");
}

/// A complaint that is first in line is handled without a preceding sale.
#[tokio::test(start_paused = true)]
async fn test_complaint_taken_first_is_handled() {
    let ctx = FloorContext::new(seeded_config());
    let handle = spawn_actor(seller_actor::new(SellerId(2), &ctx));

    ctx.channel
        .send(FloorMsg::Complaint(ItemRequest::new(CustomerId(5), ProductType::Paste, 0, 1)))
        .unwrap();
    tokio::time::sleep(Duration::from_secs(4)).await;
    ctx.ledger.stop();
    let report = handle.await.unwrap().unwrap();

    assert_eq!(report.complaints_handled, 1);
    assert_eq!(report.responses_sent, 0);
    assert_eq!(ctx.ledger.snapshot().unwrap().complaints_handled, 1);
}

/// A second request taken by the complaint probe is lost, never sold.
#[tokio::test(start_paused = true)]
async fn test_probe_drops_next_request() {
    let ctx = context_with_stock(seeded_config(), ProductType::Bread, 20, 0);
    let handle = spawn_actor(seller_actor::new(SellerId(1), &ctx));

    ctx.channel
        .send(FloorMsg::Request(ItemRequest::new(CustomerId(6), ProductType::Bread, 0, 2)))
        .unwrap();
    ctx.channel
        .send(FloorMsg::Request(ItemRequest::new(CustomerId(7), ProductType::Bread, 0, 3)))
        .unwrap();
    tokio::time::sleep(Duration::from_secs(1)).await;
    ctx.ledger.stop();
    let report = handle.await.unwrap().unwrap();

    let status = ctx.ledger.snapshot().unwrap();
    assert_eq!(status.sold_items[ProductType::Bread.index()], 2);
    assert_eq!(status.missing_items_requests, 0);
    assert_eq!(report.customers_served, 1);
    assert_eq!(report.messages_dropped, 1);
    assert!(ctx.channel.is_empty());
}

/// Several sellers draining one queue never oversell a product.
#[tokio::test(start_paused = true)]
async fn test_concurrent_sellers_never_oversell() {
    let ctx = context_with_stock(seeded_config(), ProductType::Sandwich, 10, 0);
    let handles: Vec<_> = (1..=4)
        .map(|i| spawn_actor(seller_actor::new(SellerId(i), &ctx)))
        .collect();

    for customer in 0..30 {
        ctx.channel
            .send(FloorMsg::Request(ItemRequest::new(CustomerId(customer), ProductType::Sandwich, 0, 1)))
            .unwrap();
    }
    tokio::time::sleep(Duration::from_secs(5)).await;
    ctx.ledger.stop();

    let mut served = 0;
    for handle in handles {
        served += handle.await.unwrap().unwrap().customers_served;
    }
    let status = ctx.ledger.snapshot().unwrap();
    let sold = status.sold_items[ProductType::Sandwich.index()];
    assert!(sold <= status.produced_items[ProductType::Sandwich.index()]);
    assert_eq!(sold, served);
}

/// A seller started on a closed floor exits immediately with an empty report.
#[tokio::test(start_paused = true)]
async fn test_seller_exits_when_floor_closed() {
    let ctx = FloorContext::new(seeded_config());
    ctx.ledger.stop();
    ctx.channel
        .send(FloorMsg::Request(ItemRequest::new(CustomerId(8), ProductType::Bread, 0, 1)))
        .unwrap();

    let report = spawn_actor(seller_actor::new(SellerId(3), &ctx)).await.unwrap().unwrap();
    assert_eq!(report.seller_id, SellerId(3));
    assert_eq!(report.customers_served + report.out_of_stock, 0);
    assert_eq!(ctx.channel.len(), 1, "nothing is taken once the floor is closed");
}

/// A poisoned ledger ends the seller's shift with an error.
#[tokio::test(start_paused = true)]
async fn test_poisoned_ledger_is_fatal_for_seller() {
    let ctx = FloorContext::new(seeded_config());
    let ledger: Arc<Ledger> = ctx.ledger.clone();
    let _ = std::thread::spawn(move || {
        let _guard = ledger.acquire().unwrap();
        panic!("poison the ledger");
    })
    .join();

    ctx.channel
        .send(FloorMsg::Request(ItemRequest::new(CustomerId(9), ProductType::Bread, 0, 1)))
        .unwrap();
    let result = spawn_actor(seller_actor::new(SellerId(1), &ctx)).await.unwrap();
    assert_eq!(result.unwrap_err(), SellerError::Ledger(FloorError::LedgerPoisoned));
}
