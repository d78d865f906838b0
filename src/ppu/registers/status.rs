//! The PPU status register ($2002)
//!
//! Reference: https://www.nesdev.org/wiki/PPU_registers#PPUSTATUS

bitflags! {
    // 7654 3210
    // ---- ----
    // VSO. ....
    // |||
    // ||+------- Sprite overflow
    // |+-------- Sprite 0 hit
    // +--------- Vertical blank has started
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PpuStatus: u8 {
        const SPRITE_OVERFLOW = 1 << 5;
        const SPRITE_ZERO_HIT = 1 << 6;
        const VBLANK_STARTED  = 1 << 7;
    }
}

impl PpuStatus {
    pub fn new() -> Self {
        PpuStatus::from_bits_truncate(0)
    }
}

impl Default for PpuStatus {
    fn default() -> Self {
        PpuStatus::new()
    }
}
