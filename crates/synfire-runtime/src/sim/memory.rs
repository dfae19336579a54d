// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Simulated bulk memory holding synaptic rows

use ahash::AHashMap;
use parking_lot::Mutex;

use crate::types::RowLocation;

/// Address-keyed row storage standing in for the core's SDRAM.
#[derive(Default)]
pub struct SimBulkMemory {
    rows: Mutex<AHashMap<u32, Vec<u8>>>,
}

impl SimBulkMemory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a row's bytes at `address`, replacing any previous contents.
    pub fn load_row(&self, address: u32, bytes: Vec<u8>) {
        self.rows.lock().insert(address, bytes);
    }

    /// Read `location.length` bytes from `location.address`, or `None` when
    /// nothing was loaded there. Reads shorter than the stored row are
    /// truncated, mirroring a partial DMA read.
    pub fn read(&self, location: RowLocation) -> Option<Vec<u8>> {
        let rows = self.rows.lock();
        let stored = rows.get(&location.address)?;
        let len = stored.len().min(location.length as usize);
        Some(stored[..len].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_truncates_to_requested_length() {
        let memory = SimBulkMemory::new();
        memory.load_row(0x100, vec![1, 2, 3, 4, 5, 6]);
        let bytes = memory
            .read(RowLocation {
                address: 0x100,
                length: 4,
            })
            .unwrap();
        assert_eq!(bytes, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_read_unloaded_address() {
        let memory = SimBulkMemory::new();
        assert!(memory
            .read(RowLocation {
                address: 0x200,
                length: 4
            })
            .is_none());
    }
}
