use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use macroquad::prelude::*;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use famicore::bus::Mem;
use famicore::cartridge::Cartridge;
use famicore::console::Console;
use famicore::error::StepError;
use famicore::joypad::{Joypad, JoypadButton};
use famicore::render::frame::{FRAME_HEIGHT, FRAME_WIDTH};
use famicore::render::SpriteRenderer;

const SCALE: f32 = 3.0;

#[derive(Parser, Debug)]
#[command(name = "famicore")]
#[command(about = "NES emulator core", long_about = None)]
struct Args {
    /// Path to an iNES ROM image
    rom_file: PathBuf,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warning)]
    log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Level {
        match level {
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warning => Level::WARN,
            LogLevel::Error | LogLevel::Critical => Level::ERROR,
        }
    }
}

fn window_conf() -> Conf {
    Conf {
        window_title: "famicore".to_owned(),
        window_width: FRAME_WIDTH as i32 * SCALE as i32,
        window_height: FRAME_HEIGHT as i32 * SCALE as i32,
        ..Default::default()
    }
}

fn poll_joypad(joypad: &mut Joypad) {
    joypad.set_button(JoypadButton::BUTTON_A, is_key_down(KeyCode::Z));
    joypad.set_button(JoypadButton::BUTTON_B, is_key_down(KeyCode::X));
    joypad.set_button(JoypadButton::SELECT, is_key_down(KeyCode::RightShift));
    joypad.set_button(JoypadButton::START, is_key_down(KeyCode::Enter));
    joypad.set_button(JoypadButton::UP, is_key_down(KeyCode::Up));
    joypad.set_button(JoypadButton::DOWN, is_key_down(KeyCode::Down));
    joypad.set_button(JoypadButton::LEFT, is_key_down(KeyCode::Left));
    joypad.set_button(JoypadButton::RIGHT, is_key_down(KeyCode::Right));
}

/// On a decode miss the guest cannot continue; dump the neighbourhood of
/// the program counter for the diagnostic.
fn report_unknown_opcode(console: &Console, err: &StepError) {
    let StepError::UnknownOpcode { pc, .. } = err;
    let window: Vec<String> = (0..10)
        .map(|i| format!("{:02x}", console.cpu.bus.peek(pc.wrapping_add(i))))
        .collect();
    eprintln!("famicore: {err}");
    eprintln!("famicore: memory at {:#06x}: {}", pc, window.join(" "));
}

async fn run(args: Args) -> anyhow::Result<()> {
    let bytes = std::fs::read(&args.rom_file)
        .with_context(|| format!("unable to open ROM file {}", args.rom_file.display()))?;
    let cartridge = Cartridge::load(&bytes)?;
    if let Some(title) = &cartridge.title {
        tracing::info!(title = %title, "cartridge title");
    }

    // The renderer keeps its own copy of the pattern data; the banks are
    // immutable after load.
    let chr = cartridge.chr_banks.first().cloned().unwrap_or_default();
    let mut renderer = SpriteRenderer::new(chr);

    let mut console = Console::new(cartridge);
    console.reset();
    tracing::info!(
        "vectors: reset {:#06x} nmi {:#06x} irq {:#06x}",
        console.cpu.program_counter,
        console.cpu.bus.mem_read_u16(famicore::cpu::NMI_VECTOR),
        console.cpu.bus.mem_read_u16(famicore::cpu::IRQ_VECTOR),
    );

    loop {
        poll_joypad(&mut console.cpu.bus.joypad);

        if let Err(err) = console.run_frame(&mut renderer) {
            report_unknown_opcode(&console, &err);
            return Err(err.into());
        }

        renderer.present(SCALE);
        next_frame().await;
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let args = Args::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::from(args.log_level))
        .with_target(false)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("set tracing subscriber");

    if let Err(err) = run(args).await {
        eprintln!("famicore: {err:#}");
        std::process::exit(1);
    }
}
