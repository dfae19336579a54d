// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Error types for runtime seams and row decoding

/// Errors surfaced by a DMA controller implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DmaError {
    #[error("dma controller used before prepare()")]
    NotPrepared,

    #[error("transfer of {length} bytes exceeds prepared maximum of {max} bytes")]
    LengthExceedsMax { length: u32, max: u32 },

    #[error("transfer rejected: {reason}")]
    Rejected { reason: &'static str },
}

/// Errors produced when decoding a fetched synaptic row.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowDecodeError {
    #[error("row of {len} bytes is shorter than the header word")]
    MissingHeader { len: usize },

    #[error("row claims {claimed} synapses but only holds {available}")]
    Truncated { claimed: u32, available: u32 },
}
