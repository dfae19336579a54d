// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Pipeline configuration

use serde::{Deserialize, Serialize};

use synfire_runtime::TelemetryRegion;

/// Fixed-at-initialization configuration of the delivery pipeline.
///
/// Mirrors the parameters the owning core supplies at startup; nothing here
/// changes while the pipeline runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Maximum synaptic row size in bytes; bounds every DMA transfer
    pub row_max_n_bytes: u32,
    /// Interrupt priority of the packet-reception handler (lower = higher).
    /// Consumed by the owning runtime at interrupt registration.
    pub packet_priority: u8,
    /// Interrupt priority of the deferred processing level
    pub deferred_priority: u8,
    /// Input buffer capacity in spikes
    pub buffer_capacity: usize,
    /// Whether buffered-but-unissued spikes are discarded at step boundaries
    pub clear_late_packets: bool,
    /// Recording region for per-step packet counts
    pub telemetry_region: TelemetryRegion,
    /// Bound on queued rewiring attempts
    pub max_pending_rewires: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            row_max_n_bytes: 512,
            packet_priority: 0,
            deferred_priority: 1,
            buffer_capacity: 256,
            clear_late_packets: false,
            telemetry_region: TelemetryRegion(0),
            max_pending_rewires: 128,
        }
    }
}
