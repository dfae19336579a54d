// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Recording sinks for accumulator writes and telemetry

use parking_lot::Mutex;

use crate::traits::{AccumulatorSink, TelemetrySink};
use crate::types::{SynapticWeight, TargetSlot, TelemetryRegion, Timestep};

/// Accumulator sink that records every write for later assertion.
#[derive(Default)]
pub struct RecordingAccumulator {
    writes: Mutex<Vec<(TargetSlot, SynapticWeight)>>,
}

impl RecordingAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn writes(&self) -> Vec<(TargetSlot, SynapticWeight)> {
        self.writes.lock().clone()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().len()
    }

    /// Sum of all weights delivered to one ring-buffer slot.
    pub fn total_for(&self, target: TargetSlot) -> u64 {
        self.writes
            .lock()
            .iter()
            .filter(|(slot, _)| *slot == target)
            .map(|(_, weight)| weight.0 as u64)
            .sum()
    }
}

impl AccumulatorSink for RecordingAccumulator {
    fn accumulate(&self, target: TargetSlot, weight: SynapticWeight) {
        self.writes.lock().push((target, weight));
    }
}

/// Telemetry sink that records every per-step packet count.
#[derive(Default)]
pub struct RecordingTelemetry {
    records: Mutex<Vec<(TelemetryRegion, Timestep, u32)>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(TelemetryRegion, Timestep, u32)> {
        self.records.lock().clone()
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn record_packet_count(&self, region: TelemetryRegion, time: Timestep, count: u32) {
        self.records.lock().push((region, time, count));
    }
}
