//! The PPU controller register ($2000)
//!
//! Reference: https://www.nesdev.org/wiki/PPU_registers#PPUCTRL

bitflags! {
    // 7654 3210
    // ---- ----
    // VPHB SINN
    // |||| ||||
    // |||| ||++- Base nametable address
    // |||| |+--- VRAM address increment per CPU read/write of PPUDATA
    // |||| +---- Sprite pattern table address ($0000 or $1000)
    // |||+------ Background pattern table address
    // ||+------- Sprite size
    // |+-------- PPU master/slave select
    // +--------- Generate an NMI at the start of vertical blanking
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PpuCtrl: u8 {
        const NAMETABLE1              = 1 << 0;
        const NAMETABLE2              = 1 << 1;
        const VRAM_ADD_INCREMENT      = 1 << 2;
        const SPRITE_PATTERN_ADDR     = 1 << 3;
        const BACKGROUND_PATTERN_ADDR = 1 << 4;
        const SPRITE_SIZE             = 1 << 5;
        const MASTER_SLAVE_SELECT     = 1 << 6;
        const GENERATE_NMI            = 1 << 7;
    }
}

impl PpuCtrl {
    pub fn new() -> Self {
        PpuCtrl::from_bits_truncate(0)
    }

    /// Whether the guest asked for an NMI at the VBlank-on edge.
    pub fn vblank_enabled(&self) -> bool {
        self.contains(PpuCtrl::GENERATE_NMI)
    }

    /// Pattern table selected by bit 3.
    pub fn pattern_table_base(&self) -> u16 {
        if self.contains(PpuCtrl::SPRITE_PATTERN_ADDR) {
            0x1000
        } else {
            0x0000
        }
    }
}

impl Default for PpuCtrl {
    fn default() -> Self {
        PpuCtrl::new()
    }
}
