//! PPU-adjacent state observed through memory-mapped I/O.
//!
//! The emulator core does not render; it owns the surfaces the guest can
//! reach from the CPU side (VRAM through $2006/$2007, OAM through
//! $2003/$2004/$4014) plus the register latches, and hands the surfaces to
//! the renderer at VBlank edges.

use registers::addr::VramAddr;
use registers::controller::PpuCtrl;
use registers::status::PpuStatus;

pub mod registers;

pub const VRAM_SIZE: usize = 0x4000;
pub const OAM_SIZE: usize = 256;

pub struct Ppu {
    /// 16 KiB of PPU memory, addressed by the $2006 latch.
    pub vram: [u8; VRAM_SIZE],
    /// 256 bytes of sprite attribute memory.
    pub oam: [u8; OAM_SIZE],

    pub ctrl: PpuCtrl,
    pub status: PpuStatus,
    addr: VramAddr,
    oam_addr: u8,

    // NMI edge latched by the frame scheduler, consumed by the CPU at the
    // next instruction boundary.
    nmi_pending: bool,
}

impl Ppu {
    pub fn new() -> Self {
        Ppu {
            vram: [0; VRAM_SIZE],
            oam: [0; OAM_SIZE],
            ctrl: PpuCtrl::new(),
            status: PpuStatus::new(),
            addr: VramAddr::new(),
            oam_addr: 0,
            nmi_pending: false,
        }
    }

    pub fn write_to_ctrl(&mut self, value: u8) {
        self.ctrl = PpuCtrl::from_bits_truncate(value);
    }

    /// $2002 read: the VBlank flag lives in bit 7; the read also resets the
    /// $2006 write latch to its high-byte phase.
    pub fn read_status(&mut self) -> u8 {
        self.addr.reset_latch();
        self.status.bits()
    }

    /// The frame scheduler toggles the VBlank half-cycle through this.
    pub fn set_vblank(&mut self, on: bool) {
        self.status.set(PpuStatus::VBLANK_STARTED, on);
    }

    pub fn vblank_enabled(&self) -> bool {
        self.ctrl.vblank_enabled()
    }

    pub fn pattern_table_base(&self) -> u16 {
        self.ctrl.pattern_table_base()
    }

    pub fn latch_nmi(&mut self) {
        self.nmi_pending = true;
    }

    pub fn take_nmi(&mut self) -> bool {
        std::mem::take(&mut self.nmi_pending)
    }

    pub fn write_to_ppu_addr(&mut self, value: u8) {
        self.addr.update(value);
    }

    pub fn vram_addr(&self) -> u16 {
        self.addr.get()
    }

    /// $2007 write: store at the latched address, then advance it.
    pub fn write_to_data(&mut self, value: u8) {
        let addr = self.addr.get();
        self.vram[addr as usize] = value;
        tracing::trace!("vram write {addr:#06x} = {value:#04x}");
        self.addr.increment(1);
    }

    /// $2007 read: fetch from the latched address, then advance it.
    pub fn read_data(&mut self) -> u8 {
        let addr = self.addr.get();
        let value = self.vram[addr as usize];
        self.addr.increment(1);
        value
    }

    pub fn write_to_oam_addr(&mut self, value: u8) {
        self.oam_addr = value;
    }

    pub fn write_to_oam_data(&mut self, value: u8) {
        self.oam[self.oam_addr as usize] = value;
        self.oam_addr = self.oam_addr.wrapping_add(1);
    }

    pub fn read_oam_data(&self) -> u8 {
        self.oam[self.oam_addr as usize]
    }

    /// $4014: a full 256-byte page arrives from CPU RAM in one burst.
    pub fn write_oam_dma(&mut self, page: &[u8; OAM_SIZE]) {
        self.oam.copy_from_slice(page);
    }
}

impl Default for Ppu {
    fn default() -> Self {
        Ppu::new()
    }
}
