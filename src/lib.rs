// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Synfire - Event-Driven Spike Delivery
//!
//! Synfire is the spike-delivery pipeline of a neuromorphic processor core:
//! received multicast spike packets become DMA fetches of synaptic
//! connectivity rows, and each fetched row drives per-synapse weight
//! accumulation into the neuron model's input buffers, all within a periodic
//! simulation timestep.
//!
//! ## Quick Start
//!
//! ```toml
//! [dependencies]
//! synfire = "0.1"
//! ```
//!
//! ```rust
//! use std::sync::Arc;
//! use synfire::prelude::*;
//! use synfire::runtime::sim::*;
//!
//! // Simulated collaborators stand in for the core's hardware seams
//! let dma = Arc::new(SimDmaController::new());
//! let resolver = Arc::new(TableResolver::new());
//! let accumulator = Arc::new(RecordingAccumulator::new());
//!
//! let pipeline = SpikePipeline::new(
//!     PipelineConfig::default(),
//!     Collaborators {
//!         dma: Arc::clone(&dma) as Arc<dyn synfire::runtime::DmaController>,
//!         resolver: Arc::clone(&resolver) as Arc<dyn synfire::runtime::RowAddressResolver>,
//!         accumulator: Arc::clone(&accumulator) as Arc<dyn synfire::runtime::AccumulatorSink>,
//!         telemetry: Arc::new(RecordingTelemetry::new()),
//!         plasticity: Arc::new(RoundRobinPlanner::new()),
//!     },
//! )
//! .unwrap();
//!
//! // A packet arriving on an idle pipeline dispatches immediately
//! pipeline.on_packet_received(synfire::runtime::SpikeKey(42));
//! ```
//!
//! ## Components
//!
//! - [`pipeline`] — input buffering, DMA dispatch, row processing, rewiring
//!   scheduling, timestep boundaries, provenance
//! - [`runtime`] — core types, the synaptic row format, collaborator trait
//!   seams, and the simulated runtime
//! - [`config`] — TOML configuration with environment overrides

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use synfire_config as config;
pub use synfire_pipeline as pipeline;
pub use synfire_runtime as runtime;

/// Common imports for building and driving a pipeline.
pub mod prelude {
    pub use synfire_config::{load_config, SynfireConfig};
    pub use synfire_pipeline::{
        Collaborators, PipelineConfig, PipelineError, ProvenanceCounters, SlotState, SpikePipeline,
    };
    pub use synfire_runtime::{
        InterruptHandlers, RowLocation, SpikeKey, SynapticWeight, TargetSlot, TelemetryRegion,
        Timestep,
    };
}
