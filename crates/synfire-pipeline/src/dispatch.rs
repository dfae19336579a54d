// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! DMA dispatch engine
//!
//! Owns the single transfer slot and decides, each time it comes free, what to
//! fetch next. Fixed priority order per free-slot event: a transfer parked by
//! an earlier issuance failure, then a due rewiring attempt, then the oldest
//! buffered spike, then idle. The slot is claimed with an IDLE→REQUESTED
//! compare-exchange before any intent is chosen, so two concurrent entry
//! points can never double-issue on the one channel.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, warn};

use synfire_runtime::{
    DmaController, RowAddressResolver, RowLocation, SpikeKey, StructuralPlasticity,
};

use crate::input_buffer::InputSpikeBuffer;
use crate::provenance::CounterBank;
use crate::rewiring::RewiringScheduler;

/// State of the single DMA transfer slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum SlotState {
    /// No transfer outstanding
    Idle = 0,
    /// A transfer has been issued and is in flight
    Requested = 1,
    /// The transferred row is being consumed
    Processing = 2,
}

impl SlotState {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => SlotState::Idle,
            1 => SlotState::Requested,
            _ => SlotState::Processing,
        }
    }
}

/// What the in-flight transfer is for; routes the completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TransferIntent {
    SpikeRow { key: SpikeKey, location: RowLocation },
    RewiringRow { location: RowLocation },
}

impl TransferIntent {
    fn location(&self) -> RowLocation {
        match self {
            TransferIntent::SpikeRow { location, .. } => *location,
            TransferIntent::RewiringRow { location } => *location,
        }
    }
}

struct TransferSlot {
    state: AtomicU8,
    /// Intent of the in-flight transfer; written only by the claim winner
    intent: Mutex<Option<TransferIntent>>,
    /// Transfer whose issuance failed, retried ahead of everything else
    parked: Mutex<Option<TransferIntent>>,
}

impl TransferSlot {
    fn new() -> Self {
        Self {
            state: AtomicU8::new(SlotState::Idle as u8),
            intent: Mutex::new(None),
            parked: Mutex::new(None),
        }
    }

    fn try_claim(&self) -> bool {
        self.state
            .compare_exchange(
                SlotState::Idle as u8,
                SlotState::Requested as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    fn release(&self) {
        self.state.store(SlotState::Idle as u8, Ordering::Release);
    }

    fn state(&self) -> SlotState {
        SlotState::from_u8(self.state.load(Ordering::Acquire))
    }
}

pub(crate) struct DispatchEngine {
    slot: TransferSlot,
    dma: Arc<dyn DmaController>,
    resolver: Arc<dyn RowAddressResolver>,
    row_max_n_bytes: u32,
}

impl DispatchEngine {
    pub(crate) fn new(
        dma: Arc<dyn DmaController>,
        resolver: Arc<dyn RowAddressResolver>,
        row_max_n_bytes: u32,
    ) -> Self {
        Self {
            slot: TransferSlot::new(),
            dma,
            resolver,
            row_max_n_bytes,
        }
    }

    pub(crate) fn slot_state(&self) -> SlotState {
        self.slot.state()
    }

    pub(crate) fn slot_is_idle(&self) -> bool {
        self.slot.state() == SlotState::Idle
    }

    /// The free-slot decision point. Idempotent with "go idle": claims the
    /// slot, picks the next transfer per the priority order, and issues it.
    /// Returns without effect when the slot is already busy or there is
    /// nothing to do.
    pub(crate) fn on_slot_free(
        &self,
        buffer: &InputSpikeBuffer,
        rewiring: &RewiringScheduler,
        planner: &dyn StructuralPlasticity,
        counters: &CounterBank,
    ) {
        if !self.slot.try_claim() {
            return;
        }
        let Some(intent) = self.next_intent(buffer, rewiring, planner) else {
            self.slot.release();
            return;
        };

        *self.slot.intent.lock() = Some(intent);
        match self.dma.start_transfer(intent.location()) {
            Ok(()) => counters.count_dma_issued(),
            Err(error) => {
                // Not expected in normal operation; park the transfer so the
                // next free-slot event retries it instead of dropping it.
                warn!(%error, location = %intent.location(),
                    "DMA issuance failed; transfer parked for retry");
                *self.slot.intent.lock() = None;
                *self.slot.parked.lock() = Some(intent);
                self.slot.release();
            }
        }
    }

    /// Transition REQUESTED→PROCESSING and hand back the in-flight intent.
    /// Returns `None` for completions with nothing in flight (spurious).
    pub(crate) fn begin_processing(&self) -> Option<TransferIntent> {
        if self
            .slot
            .state
            .compare_exchange(
                SlotState::Requested as u8,
                SlotState::Processing as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_err()
        {
            return None;
        }
        let intent = self.slot.intent.lock().take();
        if intent.is_none() {
            self.slot.release();
        }
        intent
    }

    /// Return the slot to IDLE once the row has been fully consumed.
    pub(crate) fn finish_processing(&self) {
        self.slot.release();
    }

    /// Pick the next transfer: parked retry first, then a due rewiring
    /// attempt, then the oldest buffered spike. Rewiring attempts with no
    /// target and spikes with no (or an oversized) row are consumed and the
    /// search continues within the same event.
    fn next_intent(
        &self,
        buffer: &InputSpikeBuffer,
        rewiring: &RewiringScheduler,
        planner: &dyn StructuralPlasticity,
    ) -> Option<TransferIntent> {
        if let Some(parked) = self.slot.parked.lock().take() {
            return Some(parked);
        }
        loop {
            if rewiring.try_claim() {
                match planner.next_target() {
                    Some(location) => return Some(TransferIntent::RewiringRow { location }),
                    None => {
                        debug!("rewiring attempt had no target; consumed");
                        continue;
                    }
                }
            }
            let key = buffer.try_pop()?;
            match self.resolver.resolve(key) {
                Some(location) if location.length > self.row_max_n_bytes => {
                    warn!(%key, %location, max = self.row_max_n_bytes,
                        "resolved row exceeds configured maximum; spike skipped");
                }
                Some(location) => return Some(TransferIntent::SpikeRow { key, location }),
                None => debug!(%key, "no synaptic row for key; spike skipped"),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_claim_is_exclusive() {
        let slot = TransferSlot::new();
        assert!(slot.try_claim());
        assert!(!slot.try_claim());
        assert_eq!(slot.state(), SlotState::Requested);
        slot.release();
        assert!(slot.try_claim());
    }

    #[test]
    fn test_slot_state_roundtrip() {
        assert_eq!(SlotState::from_u8(SlotState::Idle as u8), SlotState::Idle);
        assert_eq!(
            SlotState::from_u8(SlotState::Requested as u8),
            SlotState::Requested
        );
        assert_eq!(
            SlotState::from_u8(SlotState::Processing as u8),
            SlotState::Processing
        );
    }
}
