// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration schema types

use serde::{Deserialize, Serialize};

use synfire_pipeline::PipelineConfig;
use synfire_runtime::TelemetryRegion;

/// Root configuration, one section per concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SynfireConfig {
    pub pipeline: PipelineSection,
    pub priorities: PrioritySection,
    pub telemetry: TelemetrySection,
}

/// `[pipeline]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineSection {
    /// Maximum synaptic row size in bytes
    pub row_max_n_bytes: u32,
    /// Input buffer capacity in spikes
    pub buffer_capacity: usize,
    /// Discard buffered-but-unissued spikes at step boundaries
    pub clear_late_packets: bool,
    /// Bound on queued rewiring attempts
    pub max_pending_rewires: u32,
}

impl Default for PipelineSection {
    fn default() -> Self {
        Self {
            row_max_n_bytes: 512,
            buffer_capacity: 256,
            clear_late_packets: false,
            max_pending_rewires: 128,
        }
    }
}

/// `[priorities]` section (lower value = higher interrupt priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrioritySection {
    /// Packet-reception handler priority
    pub packet: u8,
    /// Deferred processing priority
    pub deferred: u8,
}

impl Default for PrioritySection {
    fn default() -> Self {
        Self {
            packet: 0,
            deferred: 1,
        }
    }
}

/// `[telemetry]` section
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySection {
    /// Recording region for per-step packet counts
    pub packets_per_step_region: u32,
}

impl Default for TelemetrySection {
    fn default() -> Self {
        Self {
            packets_per_step_region: 0,
        }
    }
}

impl SynfireConfig {
    /// Flatten the sections into the pipeline's runtime configuration.
    pub fn to_pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            row_max_n_bytes: self.pipeline.row_max_n_bytes,
            packet_priority: self.priorities.packet,
            deferred_priority: self.priorities.deferred,
            buffer_capacity: self.pipeline.buffer_capacity,
            clear_late_packets: self.pipeline.clear_late_packets,
            telemetry_region: TelemetryRegion(self.telemetry.packets_per_step_region),
            max_pending_rewires: self.pipeline.max_pending_rewires,
        }
    }
}
