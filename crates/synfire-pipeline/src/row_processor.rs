// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Synaptic row consumption
//!
//! Runs at the deferred priority level on DMA completion. A row is consumed
//! in full before the transfer slot is released, so two transfers can never
//! interpret overlapping buffers. Spike rows feed the neuron accumulators;
//! rewiring rows are handed to the structural-plasticity engine.

use std::sync::Arc;

use tracing::warn;

use synfire_runtime::{AccumulatorSink, StructuralPlasticity, SynapticRow, Timestep};

use crate::dispatch::TransferIntent;
use crate::provenance::CounterBank;

pub(crate) struct RowProcessor {
    accumulator: Arc<dyn AccumulatorSink>,
    plasticity: Arc<dyn StructuralPlasticity>,
}

impl RowProcessor {
    pub(crate) fn new(
        accumulator: Arc<dyn AccumulatorSink>,
        plasticity: Arc<dyn StructuralPlasticity>,
    ) -> Self {
        Self {
            accumulator,
            plasticity,
        }
    }

    /// Consume one completed transfer. Counts the spike or rewiring attempt
    /// exactly once; an undecodable row is an internal-invariant violation,
    /// logged and counted as neither.
    pub(crate) fn process(
        &self,
        intent: TransferIntent,
        bytes: &[u8],
        time: Timestep,
        counters: &CounterBank,
    ) {
        match intent {
            TransferIntent::SpikeRow { key, .. } => match SynapticRow::decode(bytes) {
                Ok(row) => {
                    // Zero-synapse rows are valid and simply write nothing
                    for record in row.iter() {
                        self.accumulator
                            .accumulate(record.target_slot(time), record.weight);
                    }
                    counters.count_spike_processed();
                }
                Err(error) => {
                    warn!(%key, %error, "undecodable synaptic row; spike not applied");
                }
            },
            TransferIntent::RewiringRow { .. } => {
                self.plasticity.process_row(time, bytes);
                counters.count_rewire_performed();
            }
        }
    }
}
