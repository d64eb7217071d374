//! # System Lifecycle & Orchestration
//!
//! Individual actors are simple; this module wires them together.
//!
//! **Key Responsibilities:**
//! 1. **Shared state** - build the [`FloorContext`](crate::framework::FloorContext) before any actor runs
//! 2. **Startup** - spawn sellers, the oven, the customer generator and the [`Monitor`]
//! 3. **Termination** - the monitor closes the floor when a configured limit trips
//! 4. **Teardown** - [`BakerySystem::shutdown`] awaits every task and returns a [`SimulationReport`]
//! 5. **Observability** - [`setup_tracing`] for the binary
//!
//! ## Shutdown
//!
//! There is no preemptive cancellation. Shutdown flips `simulation_active` and
//! waits: sellers notice within one idle poll, the generator after its current
//! arrival gap, and customers already inside finish their patience first.

pub mod bakery_system;
pub mod monitor;
pub mod tracing;

pub use bakery_system::*;
pub use monitor::*;
pub use self::tracing::setup_tracing;
