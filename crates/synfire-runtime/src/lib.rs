// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Synfire Runtime
//!
//! Foundation crate for the synfire spike-delivery pipeline: core value types,
//! the synaptic row wire format, and the trait seams through which the pipeline
//! talks to its host core.
//!
//! ## Design Philosophy
//!
//! - **Trait seams at the hardware boundary**: the DMA controller, neuron
//!   accumulators, telemetry recording, and routing-table lookups are
//!   pre-existing capabilities of the surrounding core. The pipeline only ever
//!   sees them through the traits in [`traits`].
//! - **Testable without hardware**: the [`sim`] module (feature `sim`,
//!   default-on) provides in-memory implementations of every seam plus a
//!   priority-ordered event injector, so the full interrupt-driven pipeline can
//!   be exercised on a host machine.

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod row;
pub mod traits;
pub mod types;

#[cfg(feature = "sim")]
pub mod sim;

pub use error::{DmaError, RowDecodeError};
pub use row::{SynapseRecord, SynapticRow};
pub use traits::*;
pub use types::*;
