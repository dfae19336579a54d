// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Timestep boundary handling
//!
//! The timer tick runs independently of packet and DMA events. At each
//! boundary the controller records the just-completed step's packet count to
//! the telemetry sink, then either clears the buffered backlog (counting each
//! discarded packet as late) or carries it into the new step untouched. An
//! in-flight transfer is never cancelled; only buffered-but-unissued spikes
//! are subject to the clear.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use tracing::debug;

use synfire_runtime::{TelemetryRegion, TelemetrySink, Timestep};

use crate::input_buffer::InputSpikeBuffer;
use crate::provenance::CounterBank;

pub(crate) struct TimestepController {
    clear_late_packets: bool,
    region: TelemetryRegion,
    telemetry: Arc<dyn TelemetrySink>,
    /// Current simulation time, advanced only here
    time: AtomicU32,
    /// Packets received since the last tick (counted even when dropped)
    packets_this_step: AtomicU32,
}

impl TimestepController {
    pub(crate) fn new(
        clear_late_packets: bool,
        region: TelemetryRegion,
        telemetry: Arc<dyn TelemetrySink>,
    ) -> Self {
        Self {
            clear_late_packets,
            region,
            telemetry,
            time: AtomicU32::new(0),
            packets_this_step: AtomicU32::new(0),
        }
    }

    pub(crate) fn time(&self) -> Timestep {
        self.time.load(Ordering::Relaxed)
    }

    /// Called from the packet path for every arrival, before the push.
    pub(crate) fn note_packet(&self) {
        self.packets_this_step.fetch_add(1, Ordering::Relaxed);
    }

    /// The step boundary: snapshot telemetry, flush or carry, advance time.
    pub(crate) fn on_tick(
        &self,
        time: Timestep,
        buffer: &InputSpikeBuffer,
        counters: &CounterBank,
    ) {
        let count = self.packets_this_step.swap(0, Ordering::Relaxed);
        self.telemetry.record_packet_count(self.region, time, count);

        if self.clear_late_packets {
            let dropped = buffer.clear();
            if dropped > 0 {
                counters.add_late_dropped(dropped);
                debug!(time, dropped, "cleared late packets at step boundary");
            }
        }

        self.time.store(time, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use synfire_runtime::sim::RecordingTelemetry;
    use synfire_runtime::SpikeKey;

    fn controller(clear: bool, telemetry: Arc<RecordingTelemetry>) -> TimestepController {
        TimestepController::new(clear, TelemetryRegion(7), telemetry)
    }

    #[test]
    fn test_tick_records_and_resets_packet_count() {
        let telemetry = Arc::new(RecordingTelemetry::new());
        let ctl = controller(false, Arc::clone(&telemetry));
        let buffer = InputSpikeBuffer::new(4);
        let counters = CounterBank::new();

        ctl.note_packet();
        ctl.note_packet();
        ctl.on_tick(1, &buffer, &counters);
        ctl.on_tick(2, &buffer, &counters);

        assert_eq!(
            telemetry.records(),
            vec![(TelemetryRegion(7), 1, 2), (TelemetryRegion(7), 2, 0)]
        );
    }

    #[test]
    fn test_flush_counts_discards_as_late() {
        let telemetry = Arc::new(RecordingTelemetry::new());
        let ctl = controller(true, telemetry);
        let buffer = InputSpikeBuffer::new(8);
        let counters = CounterBank::new();
        for key in 0..3 {
            buffer.try_push(SpikeKey(key));
        }

        ctl.on_tick(1, &buffer, &counters);

        assert!(buffer.is_empty());
        assert_eq!(counters.snapshot(&buffer).n_late_packets_dropped, 3);
    }

    #[test]
    fn test_carry_leaves_backlog_in_order() {
        let telemetry = Arc::new(RecordingTelemetry::new());
        let ctl = controller(false, telemetry);
        let buffer = InputSpikeBuffer::new(8);
        let counters = CounterBank::new();
        for key in 0..3 {
            buffer.try_push(SpikeKey(key));
        }

        ctl.on_tick(1, &buffer, &counters);

        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.try_pop(), Some(SpikeKey(0)));
        assert_eq!(counters.snapshot(&buffer).n_late_packets_dropped, 0);
        assert_eq!(ctl.time(), 1);
    }
}
