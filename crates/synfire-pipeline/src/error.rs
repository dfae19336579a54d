// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Pipeline error types
//!
//! Only initialization can fail with a structured error. Once running, the
//! interrupt-shaped entry points report nothing upward: failures are counted
//! or logged (see `provenance`).

use synfire_runtime::DmaError;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("row_max_n_bytes of {got} is below the row header size")]
    RowMaxTooSmall { got: u32 },

    #[error("dma channel setup failed: {0}")]
    DmaSetup(#[from] DmaError),
}
