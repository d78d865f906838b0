//! Error taxonomy for the emulator core.
//!
//! Load errors surface before any CPU step runs; step errors are fatal to
//! the guest and carry enough context for a diagnostic.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoadError {
    #[error("missing iNES magic bytes")]
    BadMagic,

    #[error("{section} section expected {expected} bytes, got {actual}")]
    ShortRead {
        section: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported image: {0}")]
    UnsupportedFormat(&'static str),

    #[error("mapper {0} is not implemented")]
    UnsupportedMapper(u8),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StepError {
    #[error("unknown opcode {opcode:#04x} at {pc:#06x}")]
    UnknownOpcode { opcode: u8, pc: u16 },
}
