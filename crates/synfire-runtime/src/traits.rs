// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Runtime abstraction traits for the spike-delivery pipeline
//!
//! These are the narrow seams through which the pipeline reaches capabilities
//! owned by the surrounding core: the DMA engine, the neuron model's input
//! accumulators, telemetry recording, routing-table lookups, and the
//! structural-plasticity engine. The pipeline never touches hardware or the
//! neuron model directly; a host runtime (real or simulated) implements these
//! traits and delivers completion/tick/packet events back through
//! [`InterruptHandlers`].

use crate::error::DmaError;
use crate::types::{RowLocation, SpikeKey, SynapticWeight, TargetSlot, TelemetryRegion, Timestep};

/// The single-channel DMA primitive for synaptic row fetches.
///
/// Completion is not signalled through this trait: the owning runtime raises a
/// DMA-complete interrupt and hands the transferred bytes to
/// [`InterruptHandlers::on_dma_complete`]. At most one transfer may be
/// outstanding; the pipeline enforces this, implementations may assume it.
pub trait DmaController: Send + Sync {
    /// One-time channel setup for rows of up to `row_max_n_bytes` bytes.
    /// Called during pipeline initialization; failure aborts startup.
    fn prepare(&self, row_max_n_bytes: u32) -> Result<(), DmaError>;

    /// Begin a read of `location` from bulk memory into the transfer buffer.
    ///
    /// A failure here is not expected in normal operation; the pipeline parks
    /// the transfer and retries it on the next free-slot event.
    fn start_transfer(&self, location: RowLocation) -> Result<(), DmaError>;
}

/// The neuron core's deferred-input accumulators (ring buffer of input
/// buffers). The pipeline only supplies the addressed slot and weight; decay
/// and current conversion happen inside the neuron model.
pub trait AccumulatorSink: Send + Sync {
    fn accumulate(&self, target: TargetSlot, weight: SynapticWeight);
}

/// Recording channel for per-timestep packet counts.
pub trait TelemetrySink: Send + Sync {
    /// Record the number of packets received during the step ending at `time`.
    fn record_packet_count(&self, region: TelemetryRegion, time: Timestep, count: u32);
}

/// Routing-table lookup from a spike key to its synaptic row.
///
/// Returns `None` for keys with no local targets; the pipeline skips such
/// spikes and moves on to the next candidate.
pub trait RowAddressResolver: Send + Sync {
    fn resolve(&self, key: SpikeKey) -> Option<RowLocation>;
}

/// The structural-plasticity engine behind rewiring attempts.
///
/// The pipeline schedules attempts and fetches the chosen rows over the shared
/// DMA channel; choosing targets and performing the add/remove arithmetic stay
/// on this side of the seam.
pub trait StructuralPlasticity: Send + Sync {
    /// Select the row for the next rewiring attempt, or `None` when there is
    /// currently nothing to rewire (the attempt is consumed without effect).
    fn next_target(&self) -> Option<RowLocation>;

    /// Perform one rewiring attempt on a fetched row.
    fn process_row(&self, time: Timestep, row: &[u8]);
}

/// The pipeline's event-driven entry points, as seen by an interrupt source.
///
/// A real core registers these with its interrupt controller; the simulated
/// runtime's event injector calls them directly in priority order.
pub trait InterruptHandlers: Send + Sync {
    /// Multicast packet reception (highest priority).
    fn on_packet_received(&self, key: SpikeKey);

    /// DMA transfer completion; `row` is the transferred bytes, valid only for
    /// the duration of the call.
    fn on_dma_complete(&self, row: &[u8]);

    /// Periodic timer tick marking the boundary into step `time`.
    fn on_timer_tick(&self, time: Timestep);
}
