// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

/*
 * Copyright 2025 Neuraville Inc.
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 */

//! # Spike Pipeline
//!
//! The assembled delivery pipeline: one input buffer, one DMA transfer slot,
//! and the event entry points that the owning core's interrupt sources drive.
//!
//! ## Event flow
//! - `on_packet_received` (packet priority): count, buffer, and kick dispatch
//!   when the channel is idle so an empty pipeline starts immediately.
//! - `on_dma_complete` (deferred priority): consume the row in full, release
//!   the slot, and dispatch the next transfer.
//! - `on_timer_tick` (deferred priority): step boundary; telemetry snapshot
//!   plus the flush-or-carry decision.
//!
//! Nothing here blocks or allocates once constructed; "waiting" is returning
//! from an entry point with state parked in the buffer, the slot, and the
//! rewiring count.

use std::sync::Arc;

use tracing::{info, warn};

use synfire_runtime::{
    AccumulatorSink, DmaController, InterruptHandlers, RowAddressResolver, SpikeKey,
    StructuralPlasticity, TelemetrySink, Timestep,
};

use crate::config::PipelineConfig;
use crate::dispatch::{DispatchEngine, SlotState};
use crate::error::PipelineError;
use crate::input_buffer::InputSpikeBuffer;
use crate::provenance::{CounterBank, ProvenanceCounters};
use crate::rewiring::RewiringScheduler;
use crate::row_processor::RowProcessor;
use crate::timestep::TimestepController;

/// The capabilities of the surrounding core, injected at construction.
pub struct Collaborators {
    pub dma: Arc<dyn DmaController>,
    pub resolver: Arc<dyn RowAddressResolver>,
    pub accumulator: Arc<dyn AccumulatorSink>,
    pub telemetry: Arc<dyn TelemetrySink>,
    pub plasticity: Arc<dyn StructuralPlasticity>,
}

pub struct SpikePipeline {
    buffer: InputSpikeBuffer,
    engine: DispatchEngine,
    processor: RowProcessor,
    rewiring: RewiringScheduler,
    timestep: TimestepController,
    counters: CounterBank,
    plasticity: Arc<dyn StructuralPlasticity>,
}

impl SpikePipeline {
    /// Build and prepare the pipeline. Fails when the configuration cannot
    /// hold a row header or the DMA channel refuses setup; the caller must
    /// not run the simulation after a failure here.
    pub fn new(
        config: PipelineConfig,
        collaborators: Collaborators,
    ) -> Result<Self, PipelineError> {
        if (config.row_max_n_bytes as usize) < synfire_runtime::row::ROW_HEADER_BYTES {
            return Err(PipelineError::RowMaxTooSmall {
                got: config.row_max_n_bytes,
            });
        }
        collaborators.dma.prepare(config.row_max_n_bytes)?;

        info!(
            row_max_n_bytes = config.row_max_n_bytes,
            buffer_capacity = config.buffer_capacity,
            clear_late_packets = config.clear_late_packets,
            packet_priority = config.packet_priority,
            deferred_priority = config.deferred_priority,
            "spike pipeline initialized"
        );

        let pipeline = Self {
            buffer: InputSpikeBuffer::new(config.buffer_capacity),
            engine: DispatchEngine::new(
                collaborators.dma,
                collaborators.resolver,
                config.row_max_n_bytes,
            ),
            processor: RowProcessor::new(
                collaborators.accumulator,
                Arc::clone(&collaborators.plasticity),
            ),
            rewiring: RewiringScheduler::new(config.max_pending_rewires),
            timestep: TimestepController::new(
                config.clear_late_packets,
                config.telemetry_region,
                collaborators.telemetry,
            ),
            counters: CounterBank::new(),
            plasticity: collaborators.plasticity,
        };
        // Initial setup counts as a free-slot event; a no-op on the empty
        // pipeline but keeps the entry-point contract uniform.
        pipeline.on_slot_free();
        Ok(pipeline)
    }

    /// Packet-reception entry point (highest priority). Counts the arrival,
    /// buffers the spike, and triggers dispatch immediately when the channel
    /// is idle rather than waiting for the next free-slot event.
    pub fn on_packet_received(&self, key: SpikeKey) {
        self.timestep.note_packet();
        if !self.buffer.try_push(key) {
            // Full: counted by the buffer, spike dropped, never retried
            return;
        }
        if self.engine.slot_is_idle() {
            self.on_slot_free();
        }
    }

    /// DMA-completion entry point. Consumes the row in full, returns the slot
    /// to idle, and advances to the next transfer.
    pub fn on_dma_complete(&self, row: &[u8]) {
        let Some(intent) = self.engine.begin_processing() else {
            warn!("spurious DMA completion with no transfer in flight");
            return;
        };
        self.processor
            .process(intent, row, self.timestep.time(), &self.counters);
        self.engine.finish_processing();
        self.on_slot_free();
    }

    /// Timer-tick entry point; must be invoked exactly once per simulation
    /// step by the owning scheduler.
    pub fn on_timer_tick(&self, time: Timestep) {
        self.timestep.on_tick(time, &self.buffer, &self.counters);
    }

    /// The free-slot event: decide and issue the next transfer, or go idle.
    /// Safe to invoke at any point; a busy slot makes it a no-op.
    pub fn on_slot_free(&self) {
        self.engine.on_slot_free(
            &self.buffer,
            &self.rewiring,
            &*self.plasticity,
            &self.counters,
        );
    }

    /// Queue up to `count` rewiring attempts, serviced opportunistically on
    /// later free-slot events. Always reports acceptance of the intent.
    pub fn request_rewiring(&self, count: u32) -> bool {
        self.rewiring.request(count)
    }

    /// Fill caller-owned storage with the current provenance snapshot.
    pub fn store_provenance(&self, out: &mut ProvenanceCounters) {
        *out = self.provenance();
    }

    pub fn provenance(&self) -> ProvenanceCounters {
        self.counters.snapshot(&self.buffer)
    }

    // === Diagnostics ===

    pub fn buffered_spikes(&self) -> usize {
        self.buffer.len()
    }

    pub fn slot_state(&self) -> SlotState {
        self.engine.slot_state()
    }

    pub fn pending_rewires(&self) -> u32 {
        self.rewiring.pending()
    }

    pub fn current_time(&self) -> Timestep {
        self.timestep.time()
    }
}

impl InterruptHandlers for SpikePipeline {
    fn on_packet_received(&self, key: SpikeKey) {
        SpikePipeline::on_packet_received(self, key);
    }

    fn on_dma_complete(&self, row: &[u8]) {
        SpikePipeline::on_dma_complete(self, row);
    }

    fn on_timer_tick(&self, time: Timestep) {
        SpikePipeline::on_timer_tick(self, time);
    }
}
