// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Simulated single-channel DMA controller

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use parking_lot::Mutex;

use crate::error::DmaError;
use crate::traits::DmaController;
use crate::types::RowLocation;

/// Simulated DMA channel: accepted transfers queue up until the harness
/// completes them with [`SimDmaController::take_completed`] (normally via the
/// event injector). Tests can inject issuance faults to exercise the
/// pipeline's retry path.
#[derive(Default)]
pub struct SimDmaController {
    prepared: AtomicBool,
    max_transfer_bytes: AtomicU32,
    in_flight: Mutex<VecDeque<RowLocation>>,
    fail_next: AtomicU32,
    n_started: AtomicU32,
}

impl SimDmaController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `n` calls to `start_transfer` fail with
    /// [`DmaError::Rejected`].
    pub fn fail_next_transfers(&self, n: u32) {
        self.fail_next.store(n, Ordering::Relaxed);
    }

    /// Pop the oldest accepted transfer, simulating its completion.
    pub fn take_completed(&self) -> Option<RowLocation> {
        self.in_flight.lock().pop_front()
    }

    pub fn has_in_flight(&self) -> bool {
        !self.in_flight.lock().is_empty()
    }

    /// Total transfers accepted since construction.
    pub fn started_count(&self) -> u32 {
        self.n_started.load(Ordering::Relaxed)
    }
}

impl DmaController for SimDmaController {
    fn prepare(&self, row_max_n_bytes: u32) -> Result<(), DmaError> {
        self.max_transfer_bytes.store(row_max_n_bytes, Ordering::Relaxed);
        self.prepared.store(true, Ordering::Relaxed);
        Ok(())
    }

    fn start_transfer(&self, location: RowLocation) -> Result<(), DmaError> {
        if !self.prepared.load(Ordering::Relaxed) {
            return Err(DmaError::NotPrepared);
        }
        if self
            .fail_next
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(DmaError::Rejected {
                reason: "injected fault",
            });
        }
        let max = self.max_transfer_bytes.load(Ordering::Relaxed);
        if location.length > max {
            return Err(DmaError::LengthExceedsMax {
                length: location.length,
                max,
            });
        }
        self.in_flight.lock().push_back(location);
        self.n_started.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(address: u32, length: u32) -> RowLocation {
        RowLocation { address, length }
    }

    #[test]
    fn test_rejects_before_prepare() {
        let dma = SimDmaController::new();
        assert_eq!(dma.start_transfer(loc(0, 4)), Err(DmaError::NotPrepared));
    }

    #[test]
    fn test_transfers_complete_in_order() {
        let dma = SimDmaController::new();
        dma.prepare(64).unwrap();
        dma.start_transfer(loc(0x10, 4)).unwrap();
        dma.start_transfer(loc(0x20, 8)).unwrap();
        assert_eq!(dma.take_completed(), Some(loc(0x10, 4)));
        assert_eq!(dma.take_completed(), Some(loc(0x20, 8)));
        assert_eq!(dma.take_completed(), None);
    }

    #[test]
    fn test_injected_faults_then_recovery() {
        let dma = SimDmaController::new();
        dma.prepare(64).unwrap();
        dma.fail_next_transfers(1);
        assert!(dma.start_transfer(loc(0, 4)).is_err());
        assert!(dma.start_transfer(loc(0, 4)).is_ok());
        assert_eq!(dma.started_count(), 1);
    }

    #[test]
    fn test_oversized_transfer_rejected() {
        let dma = SimDmaController::new();
        dma.prepare(16).unwrap();
        assert_eq!(
            dma.start_transfer(loc(0, 20)),
            Err(DmaError::LengthExceedsMax { length: 20, max: 16 })
        );
    }
}
