// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Round-robin structural-plasticity planner

use std::collections::VecDeque;

use parking_lot::Mutex;

use crate::traits::StructuralPlasticity;
use crate::types::{RowLocation, Timestep};

/// Planner that cycles through a fixed set of candidate rows, recording every
/// attempt it is handed. With no candidates loaded it reports nothing to
/// rewire, which the pipeline treats as a consumed attempt.
#[derive(Default)]
pub struct RoundRobinPlanner {
    targets: Mutex<VecDeque<RowLocation>>,
    processed: Mutex<Vec<(Timestep, usize)>>,
}

impl RoundRobinPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_target(&self, location: RowLocation) {
        self.targets.lock().push_back(location);
    }

    /// (time, row length) for each attempt processed so far.
    pub fn processed(&self) -> Vec<(Timestep, usize)> {
        self.processed.lock().clone()
    }

    pub fn processed_count(&self) -> usize {
        self.processed.lock().len()
    }
}

impl StructuralPlasticity for RoundRobinPlanner {
    fn next_target(&self) -> Option<RowLocation> {
        let mut targets = self.targets.lock();
        let location = targets.pop_front()?;
        targets.push_back(location);
        Some(location)
    }

    fn process_row(&self, time: Timestep, row: &[u8]) {
        self.processed.lock().push((time, row.len()));
    }
}
