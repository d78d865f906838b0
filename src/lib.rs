pub mod bus;
pub mod cartridge;
pub mod console;
pub mod cpu;
pub mod error;
pub mod joypad;
pub mod ppu;
pub mod render;

#[macro_use]
extern crate lazy_static;

#[macro_use]
extern crate bitflags;
