// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Simulated runtime
//!
//! In-memory implementations of every collaborator seam plus a
//! priority-ordered event injector, so the interrupt-driven pipeline can run
//! and be tested on a host machine with no neuromorphic hardware attached.
//! State the real core keeps in registers or SDRAM lives in plain collections
//! here; everything is recorded so tests can assert on exact behavior.

mod dma;
mod injector;
mod memory;
mod plasticity;
mod resolver;
mod sinks;

pub use dma::SimDmaController;
pub use injector::{EventInjector, SimEvent};
pub use memory::SimBulkMemory;
pub use plasticity::RoundRobinPlanner;
pub use resolver::TableResolver;
pub use sinks::{RecordingAccumulator, RecordingTelemetry};
