//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the subscriber used by the binary. Every actor
//! runs inside an `actor` span carrying its role and label, so log lines read
//! like:
//!
//! ```text
//! INFO actor{role="seller" id=seller_2}: Sold customer_id=customer_14 product=cake quantity=3 price=13.2
//! INFO actor{role="customer" id=customer_14}: Filed a complaint customer_id=customer_14 product=cake
//! INFO actor{role="monitor" id=monitor}: Floor status elapsed_secs=12 sold=41 profit=132.4 frustrated=9
//! ```
//!
//! ## Levels
//!
//! ```bash
//! RUST_LOG=info cargo run                            # arrivals, sales, complaints, status
//! RUST_LOG=debug cargo run                           # every request, dropped message and batch
//! RUST_LOG=bakery_floor::seller_actor=debug cargo run
//! ```
//!
//! Without `RUST_LOG` the filter defaults to `info`.

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // the actor span already names the role
        .compact()
        .init();
}
