//! Frame scheduler
//!
//! Drives the CPU one instruction at a time and manages the VBlank
//! half-cycle. The cycle budget is NTSC-derived: ~29 760 CPU cycles of
//! visible frame, ~2 728 of vertical blank. The counter resets on both
//! edges.

use crate::bus::Bus;
use crate::cartridge::Cartridge;
use crate::cpu::{CpuFlags, CPU};
use crate::error::StepError;
use crate::ppu::{OAM_SIZE, VRAM_SIZE};

// 240 visible scanlines at ~124 cycles each
pub const CYCLES_PER_VBLANK_OFF: u64 = 29_760;
pub const CYCLES_PER_VBLANK_ON: u64 = 2_728;

/// Where rendered output goes. The core hands the PPU surfaces to the sink
/// at the VBlank-on edge; between `on_vblank_enter` and `on_vblank_exit`
/// the sink may read them consistently.
pub trait VideoSink {
    fn on_vblank_enter(
        &mut self,
        vram: &[u8; VRAM_SIZE],
        oam: &[u8; OAM_SIZE],
        pattern_table_base: u16,
    );

    fn on_vblank_exit(&mut self);
}

/// Sink for headless runs (tests, tooling).
pub struct NullSink;

impl VideoSink for NullSink {
    fn on_vblank_enter(&mut self, _: &[u8; VRAM_SIZE], _: &[u8; OAM_SIZE], _: u16) {}

    fn on_vblank_exit(&mut self) {}
}

pub struct Console {
    pub cpu: CPU,
    in_vblank: bool,
}

impl Console {
    pub fn new(cartridge: Cartridge) -> Self {
        Console {
            cpu: CPU::new(Bus::new(cartridge)),
            in_vblank: false,
        }
    }

    pub fn reset(&mut self) {
        self.cpu.reset();
        self.in_vblank = false;
    }

    pub fn in_vblank(&self) -> bool {
        self.in_vblank
    }

    /// One instruction, then the edge checks.
    pub fn step(&mut self, sink: &mut dyn VideoSink) -> Result<usize, StepError> {
        let cycles = self.cpu.step()?;
        self.cpu.cycle_count += cycles as u64;

        if !self.in_vblank && self.cpu.cycle_count >= CYCLES_PER_VBLANK_OFF {
            self.enter_vblank(sink);
        } else if self.in_vblank && self.cpu.cycle_count >= CYCLES_PER_VBLANK_ON {
            self.exit_vblank(sink);
        }

        Ok(cycles)
    }

    /// Runs through the end of the next VBlank interval, so a caller doing
    /// real-time pacing sleeps between calls.
    pub fn run_frame(&mut self, sink: &mut dyn VideoSink) -> Result<(), StepError> {
        loop {
            let was_in_vblank = self.in_vblank;
            self.step(sink)?;
            if was_in_vblank && !self.in_vblank {
                return Ok(());
            }
        }
    }

    fn enter_vblank(&mut self, sink: &mut dyn VideoSink) {
        let ppu = &mut self.cpu.bus.ppu;
        ppu.set_vblank(true);

        // NMI fires only when the guest both unmasked interrupts and asked
        // for it through $2000 bit 7.
        if !self.cpu.status.contains(CpuFlags::INTERRUPT_DISABLE) && ppu.vblank_enabled() {
            ppu.latch_nmi();
        }
        tracing::debug!(cycles = self.cpu.cycle_count, "vblank on");

        let ppu = &self.cpu.bus.ppu;
        sink.on_vblank_enter(&ppu.vram, &ppu.oam, ppu.pattern_table_base());

        self.cpu.cycle_count = 0;
        self.in_vblank = true;
    }

    fn exit_vblank(&mut self, sink: &mut dyn VideoSink) {
        self.cpu.bus.ppu.set_vblank(false);
        tracing::debug!("vblank off");
        sink.on_vblank_exit();

        self.cpu.cycle_count = 0;
        self.in_vblank = false;
    }
}
