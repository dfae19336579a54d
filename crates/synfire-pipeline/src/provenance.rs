// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Provenance counters for end-of-run diagnostics
//!
//! Counters are the only failure-reporting channel while the pipeline runs:
//! interrupt entry points cannot propagate structured errors upward. Every
//! counter is a monotonic atomic, exact under concurrent increment from the
//! packet and deferred priority levels; the snapshot is consistent per field
//! but not atomic across fields.

use std::sync::atomic::{AtomicU32, Ordering};

use serde::Serialize;

use crate::input_buffer::InputSpikeBuffer;

/// Snapshot of the pipeline's diagnostic counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProvenanceCounters {
    /// Times the input buffer was full when a packet arrived
    pub n_input_buffer_overflows: u32,
    /// Synaptic row transfers issued on the DMA channel
    pub n_dmas_issued: u32,
    /// Spikes whose rows were fetched and fully applied
    pub n_spikes_processed: u32,
    /// Rewiring attempts carried through to row processing
    pub n_rewires_performed: u32,
    /// Buffered packets discarded at timestep boundaries
    pub n_late_packets_dropped: u32,
    /// High-water mark of input buffer occupancy
    pub max_input_buffer_fill: u32,
}

/// The pipeline-owned counters; the buffer contributes its own two fields at
/// snapshot time.
#[derive(Default)]
pub(crate) struct CounterBank {
    dmas_issued: AtomicU32,
    spikes_processed: AtomicU32,
    rewires_performed: AtomicU32,
    late_packets_dropped: AtomicU32,
}

impl CounterBank {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn count_dma_issued(&self) {
        self.dmas_issued.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn count_spike_processed(&self) {
        self.spikes_processed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn count_rewire_performed(&self) {
        self.rewires_performed.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn add_late_dropped(&self, n: u32) {
        self.late_packets_dropped.fetch_add(n, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self, buffer: &InputSpikeBuffer) -> ProvenanceCounters {
        ProvenanceCounters {
            n_input_buffer_overflows: buffer.overflow_count(),
            n_dmas_issued: self.dmas_issued.load(Ordering::Relaxed),
            n_spikes_processed: self.spikes_processed.load(Ordering::Relaxed),
            n_rewires_performed: self.rewires_performed.load(Ordering::Relaxed),
            n_late_packets_dropped: self.late_packets_dropped.load(Ordering::Relaxed),
            max_input_buffer_fill: buffer.max_fill(),
        }
    }
}
