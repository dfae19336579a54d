// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Identity and location types shared across the pipeline

use core::fmt;

use serde::{Deserialize, Serialize};

/// Simulation time index, advanced once per timer tick by the owning scheduler.
pub type Timestep = u32;

/// Multicast spike key (source neuron + partition), opaque to the pipeline.
///
/// A spike carries no payload beyond this key; everything else is looked up
/// from the routing tables and bulk memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SpikeKey(pub u32);

impl fmt::Display for SpikeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Spike({:#010x})", self.0)
    }
}

/// Address and length of one synaptic row in bulk memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RowLocation {
    /// Byte address of the row in bulk memory
    pub address: u32,
    /// Row length in bytes
    pub length: u32,
}

impl fmt::Display for RowLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row({:#010x}, {} bytes)", self.address, self.length)
    }
}

/// Synaptic weight as stored in a row record (raw, no normalization).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SynapticWeight(pub u16);

/// One slot of the neuron core's ring-buffer-of-input-buffers.
///
/// `time_slot` selects the future timestep the contribution lands in (computed
/// from the synapse delay); `neuron` is the target neuron index within the
/// core. The pipeline only addresses slots; decay and current conversion are
/// the neuron model's concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetSlot {
    pub time_slot: u32,
    pub neuron: u32,
}

/// Recording-region identifier for per-step telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TelemetryRegion(pub u32);

impl fmt::Display for TelemetryRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Region({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spike_key_display() {
        assert_eq!(SpikeKey(0xBEEF).to_string(), "Spike(0x0000beef)");
    }

    #[test]
    fn test_row_location_display() {
        let loc = RowLocation {
            address: 0x1000,
            length: 36,
        };
        assert_eq!(loc.to_string(), "Row(0x00001000, 36 bytes)");
    }
}
