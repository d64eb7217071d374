use bakery_floor::framework::ProductionStatus;
use bakery_floor::lifecycle::{BakerySystem, SimulationReport, StopReason};
use bakery_floor::model::{BakeryConfig, CustomerParams, ProductType, SimulationLimits, PRODUCT_TYPE_COUNT};
use std::future::pending;
use std::time::Duration;

/// Small, fast, reproducible floor: a customer per second, short patience.
fn busy_floor(limits: SimulationLimits) -> BakeryConfig {
    BakeryConfig {
        customer_params: CustomerParams {
            min_arrival_secs: 1,
            max_arrival_secs: 1,
            min_patience_secs: 2,
            max_patience_secs: 3,
        },
        complaint_probability: 0.5,
        num_sellers: 2,
        seed: Some(2024),
        limits,
        ..BakeryConfig::default()
    }
}

fn full_shelves(units: u64) -> ProductionStatus {
    ProductionStatus {
        produced_items: [units; PRODUCT_TYPE_COUNT],
        ..ProductionStatus::default()
    }
}

/// Relations that hold at the end of every run.
fn assert_consistent(report: &SimulationReport) {
    let status = &report.status;
    for product in ProductType::ALL {
        let i = product.index();
        assert!(
            status.sold_items[i] <= status.produced_items[i],
            "{product}: sold {} of {} produced",
            status.sold_items[i],
            status.produced_items[i]
        );
    }
    assert_eq!(report.customers.failed, 0);
    assert_eq!(report.customers.completed, report.customers.spawned);
    // Every customer leaves frustrated exactly once.
    assert_eq!(status.frustrated_customers, report.customers.completed);
    assert_eq!(status.complained_customers, report.customers.complained);
    assert!(status.complained_customers <= status.frustrated_customers);
    assert!(status.complaints_handled <= status.complained_customers);
    // Only sellers write these two counters.
    assert_eq!(status.missing_items_requests, report.sellers.iter().map(|s| s.out_of_stock).sum::<u64>());
    assert_eq!(status.complaints_handled, report.sellers.iter().map(|s| s.complaints_handled).sum::<u64>());
    assert!(status.total_profit >= 0.0);
}

/// Full run that ends on the runtime limit.
#[tokio::test(start_paused = true)]
async fn test_runtime_limit_closes_the_floor() {
    let limits = SimulationLimits {
        max_runtime_secs: Some(10),
        ..SimulationLimits::default()
    };
    let system = BakerySystem::start_with_backlog(busy_floor(limits), full_shelves(20)).unwrap();
    let report = system.run_until(pending()).await.unwrap();

    assert_eq!(report.stop_reason, StopReason::RuntimeElapsed);
    assert_eq!(report.sellers.len(), 2);
    assert!(report.customers.spawned >= 9);
    assert!(report.oven.batches >= 1);
    assert!(report.status.total_sold() > 0, "stocked shelves should see some sales");
    assert_consistent(&report);
}

/// Once the floor is stopped, no new customer arrives and every actor exits.
#[tokio::test(start_paused = true)]
async fn test_stop_drains_every_actor() {
    let system = BakerySystem::start(busy_floor(SimulationLimits::default())).unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;

    let ctx = system.context().clone();
    assert!(system.stop());
    let report = system.shutdown().await.unwrap();

    assert_eq!(report.stop_reason, StopReason::Requested);
    assert!(!ctx.ledger.is_active());
    assert_consistent(&report);

    // Nothing is left running to touch the ledger.
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(ctx.ledger.snapshot().unwrap(), report.status);
}

/// An external signal ends the run just like a limit does.
#[tokio::test(start_paused = true)]
async fn test_signal_ends_the_run() {
    let system = BakerySystem::start(busy_floor(SimulationLimits::default())).unwrap();
    let report = system
        .run_until(tokio::time::sleep(Duration::from_secs(4)))
        .await
        .unwrap();

    assert!(report.elapsed >= Duration::from_secs(4));
    assert!(report.customers.spawned >= 4);
    assert_consistent(&report);
}

/// Crossing the frustration limit ends the simulation.
#[tokio::test(start_paused = true)]
async fn test_frustration_limit_closes_the_floor() {
    let limits = SimulationLimits {
        max_frustrated_customers: Some(3),
        ..SimulationLimits::default()
    };
    let system = BakerySystem::start(busy_floor(limits)).unwrap();
    let report = system.run_until(pending()).await.unwrap();

    assert_eq!(report.stop_reason, StopReason::FrustrationLimit);
    assert!(report.status.frustrated_customers >= 3);
    assert_consistent(&report);
}

/// A well-stocked floor reaches a small profit target.
#[tokio::test(start_paused = true)]
async fn test_profit_target_closes_the_floor() {
    let limits = SimulationLimits {
        profit_target: Some(1.0),
        ..SimulationLimits::default()
    };
    let system = BakerySystem::start_with_backlog(busy_floor(limits), full_shelves(100)).unwrap();
    let report = system.run_until(pending()).await.unwrap();

    assert_eq!(report.stop_reason, StopReason::ProfitTarget);
    assert!(report.status.total_profit >= 1.0);
    assert_consistent(&report);
}

/// Invalid configuration is rejected before any actor starts.
#[tokio::test]
async fn test_invalid_config_is_rejected() {
    let config = BakeryConfig {
        num_sellers: 0,
        ..BakeryConfig::default()
    };
    assert!(BakerySystem::start(config).is_err());
}
