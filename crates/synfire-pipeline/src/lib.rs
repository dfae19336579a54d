// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! # Synfire Pipeline
//!
//! Event-driven spike-delivery pipeline for a neuromorphic processor core.
//!
//! Incoming multicast spike packets are buffered, converted one at a time into
//! DMA fetches of their synaptic connectivity rows, and applied synapse by
//! synapse to the neuron model's input accumulators, all inside a periodic
//! simulation timestep. Three independently-triggered interrupt sources
//! (packet reception, DMA completion, timer tick) interleave into one
//! serialized, bounded-latency schedule around two shared resources: the
//! input buffer and the single DMA transfer slot.
//!
//! ## Architecture
//! - Interrupt handlers do minimal non-blocking work; heavy logic runs at a
//!   deferred priority that the packet path may preempt
//! - One transfer in flight at a time, state machine IDLE/REQUESTED/PROCESSING
//! - Structural-plasticity rewiring shares the DMA channel, one attempt at
//!   most per free-slot event
//! - Exact accounting: every dropped, fetched, and processed packet lands in
//!   a provenance counter

/// Crate version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod error;
pub mod input_buffer;
pub mod provenance;

mod dispatch;
mod pipeline;
mod rewiring;
mod row_processor;
mod timestep;

pub use config::PipelineConfig;
pub use dispatch::SlotState;
pub use error::PipelineError;
pub use input_buffer::InputSpikeBuffer;
pub use pipeline::{Collaborators, SpikePipeline};
pub use provenance::ProvenanceCounters;
