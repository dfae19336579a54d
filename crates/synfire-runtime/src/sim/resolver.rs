// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Table-backed key-to-row resolver

use ahash::AHashMap;
use parking_lot::Mutex;

use crate::traits::RowAddressResolver;
use crate::types::{RowLocation, SpikeKey};

/// Resolver backed by an explicit key table, standing in for the core's
/// master population table. Keys absent from the table resolve to `None`,
/// matching spikes routed here with no local targets.
#[derive(Default)]
pub struct TableResolver {
    table: Mutex<AHashMap<u32, RowLocation>>,
}

impl TableResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, key: SpikeKey, location: RowLocation) {
        self.table.lock().insert(key.0, location);
    }
}

impl RowAddressResolver for TableResolver {
    fn resolve(&self, key: SpikeKey) -> Option<RowLocation> {
        self.table.lock().get(&key.0).copied()
    }
}
