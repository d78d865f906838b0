//! Sprite compositor
//!
//! A `VideoSink` that rebuilds the frame buffer from OAM at each VBlank-on
//! edge. Each of the 64 OAM entries is (y, pattern index, attributes, x);
//! patterns come from CHR ROM, colors from the palette RAM at $3F00 in the
//! PPU address space.
//!
//! Reference: https://www.nesdev.org/wiki/PPU_OAM

use macroquad::prelude::*;

use crate::console::VideoSink;
use crate::ppu::{OAM_SIZE, VRAM_SIZE};
use frame::{Frame, FRAME_HEIGHT, FRAME_WIDTH, SYSTEM_PALETTE};

pub mod frame;

const TILE_BYTES: usize = 16;
const PALETTE_RAM_START: usize = 0x3F00;

pub struct SpriteRenderer {
    chr: Vec<u8>,
    pub frame: Frame,
}

impl SpriteRenderer {
    /// `chr` is the cartridge's 8 KiB pattern bank (possibly empty for
    /// CHR-RAM boards, which this renderer leaves blank).
    pub fn new(chr: Vec<u8>) -> Self {
        SpriteRenderer {
            chr,
            frame: Frame::new(),
        }
    }

    fn blit_sprite(
        &mut self,
        vram: &[u8; VRAM_SIZE],
        pattern_table_base: u16,
        tile: u8,
        sprite_x: u8,
        sprite_y: u8,
        attr: u8,
    ) {
        let offset = pattern_table_base as usize + tile as usize * TILE_BYTES;
        let mut pattern = [0u8; TILE_BYTES];
        match self.chr.get(offset..offset + TILE_BYTES) {
            Some(bytes) => pattern.copy_from_slice(bytes),
            None => return,
        }

        for y in 0..8usize {
            let mut upper = pattern[y];
            let mut lower = pattern[y + 8];

            for x in (0..8usize).rev() {
                let value = (1 & upper) << 1 | (1 & lower);
                upper >>= 1;
                lower >>= 1;
                if value == 0 {
                    // transparent
                    continue;
                }
                let palette_entry = ((attr & 0b11) << 2 | value) as usize;
                let color_index = vram[PALETTE_RAM_START + palette_entry] as usize % 64;
                self.frame.set_pixel(
                    sprite_x as usize + x,
                    sprite_y as usize + y,
                    SYSTEM_PALETTE[color_index],
                );
            }
        }
    }

    /// Draws the frame buffer scaled to the window.
    pub fn present(&self, scale: f32) {
        let mut index = 0;
        for y in 0..FRAME_HEIGHT {
            for x in 0..FRAME_WIDTH {
                draw_rectangle(
                    x as f32 * scale,
                    y as f32 * scale,
                    scale,
                    scale,
                    self.frame.data[index],
                );
                index += 1;
            }
        }
    }
}

impl VideoSink for SpriteRenderer {
    fn on_vblank_enter(
        &mut self,
        vram: &[u8; VRAM_SIZE],
        oam: &[u8; OAM_SIZE],
        pattern_table_base: u16,
    ) {
        self.frame.clear();
        for entry in 0..OAM_SIZE / 4 {
            let base = entry * 4;
            let (y, tile, attr, x) = (oam[base], oam[base + 1], oam[base + 2], oam[base + 3]);
            if tile == 0 {
                continue;
            }
            self.blit_sprite(vram, pattern_table_base, tile, x, y, attr);
        }
    }

    fn on_vblank_exit(&mut self) {}
}
