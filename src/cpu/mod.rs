//! 6502 CPU core
//!
//! <http://wiki.nesdev.com/w/index.php/CPU>
//!
//! One `step()` fetches, decodes and executes a single instruction (or
//! services a pending interrupt) and reports the cycles it consumed; the
//! frame scheduler does the pacing.

use crate::bus::{Bus, Mem};
use crate::cpu::opcodes::OPCODES_MAP;
use crate::cpu::operations::Operation;
use crate::error::StepError;

pub mod addressing;
pub mod opcodes;
pub mod operations;

// Status flags -- https://www.nesdev.org/wiki/Status_flags
// 7654 3210
// NV1B DIZC
// |||| ||||
// |||| |||+- Carry
// |||| ||+-- Zero
// |||| |+--- Interrupt Disable
// |||| +---- Decimal
// |||+------ (No CPU effect; see: the B flag)
// ||+------- (No CPU effect; always pushed as 1)
// |+-------- Overflow
// +--------- Negative
bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct CpuFlags: u8 {
        const CARRY             = 1 << 0;
        const ZERO              = 1 << 1;
        const INTERRUPT_DISABLE = 1 << 2;
        const DECIMAL_MODE      = 1 << 3;
        const BREAK             = 1 << 4;
        const BREAK2            = 1 << 5; // not used, reads as 1
        const OVERFLOW          = 1 << 6;
        const NEGATIVE          = 1 << 7;
    }
}

// Stack occupies 0x0100 -> 0x01FF
const STACK: u16 = 0x0100;
const STACK_RESET: u8 = 0xFD;

pub const NMI_VECTOR: u16 = 0xFFFA;
pub const RESET_VECTOR: u16 = 0xFFFC;
pub const IRQ_VECTOR: u16 = 0xFFFE;

const INTERRUPT_CYCLES: usize = 7;

pub struct CPU {
    pub register_a: u8,
    pub register_x: u8,
    pub register_y: u8,
    pub status: CpuFlags,
    pub program_counter: u16,
    pub stack_pointer: u8,
    /// CPU cycles elapsed since the last VBlank edge; the frame scheduler
    /// accumulates into this and zeroes it at each edge.
    pub cycle_count: u64,
    /// Level-triggered maskable interrupt line.
    pub irq_pending: bool,
    pub bus: Bus,

    // extra cycles charged by the executing instruction (page crosses,
    // taken branches)
    extra_cycles: usize,
}

impl Mem for CPU {
    fn mem_read(&mut self, addr: u16) -> u8 {
        self.bus.mem_read(addr)
    }

    fn mem_write(&mut self, addr: u16, data: u8) {
        self.bus.mem_write(addr, data)
    }
}

impl CPU {
    pub fn new(bus: Bus) -> Self {
        CPU {
            register_a: 0,
            register_x: 0,
            register_y: 0,
            // Interrupt disable (bit 2) and the unused bit 5 start set
            status: CpuFlags::from_bits_truncate(0b0010_0100),
            program_counter: 0,
            stack_pointer: STACK_RESET,
            cycle_count: 0,
            irq_pending: false,
            bus,
            extra_cycles: 0,
        }
    }

    pub fn reset(&mut self) {
        self.register_a = 0;
        self.register_x = 0;
        self.register_y = 0;
        self.stack_pointer = STACK_RESET;
        self.status = CpuFlags::from_bits_truncate(0b0010_0100);
        self.cycle_count = 0;
        self.program_counter = self.mem_read_u16(RESET_VECTOR);
        tracing::debug!("reset to {:#06x}", self.program_counter);
    }

    pub(crate) fn stack_push(&mut self, data: u8) {
        self.mem_write(STACK + self.stack_pointer as u16, data);
        self.stack_pointer = self.stack_pointer.wrapping_sub(1);
    }

    pub(crate) fn stack_pop(&mut self) -> u8 {
        self.stack_pointer = self.stack_pointer.wrapping_add(1);
        self.mem_read(STACK + self.stack_pointer as u16)
    }

    pub(crate) fn stack_push_u16(&mut self, data: u16) {
        self.stack_push((data >> 8) as u8);
        self.stack_push((data & 0xFF) as u8);
    }

    pub(crate) fn stack_pop_u16(&mut self) -> u16 {
        let lo = self.stack_pop() as u16;
        let hi = self.stack_pop() as u16;
        hi << 8 | lo
    }

    pub(crate) fn set_register_a(&mut self, value: u8) {
        self.register_a = value;
        self.update_zero_and_negative_flags(self.register_a);
    }

    /// note: the NES ignores decimal mode, unlike most 6502 processors
    /// http://www.righto.com/2012/12/the-6502-overflow-flag-explained.html
    pub(crate) fn add_to_register_a(&mut self, data: u8) {
        let sum = self.register_a as u16
            + data as u16
            + self.status.contains(CpuFlags::CARRY) as u16;

        self.status.set(CpuFlags::CARRY, sum > 0xFF);

        let result = sum as u8;
        self.status.set(
            CpuFlags::OVERFLOW,
            (data ^ result) & (result ^ self.register_a) & 0x80 != 0,
        );

        self.set_register_a(result);
    }

    pub(crate) fn update_zero_and_negative_flags(&mut self, result: u8) {
        self.status.set(CpuFlags::ZERO, result == 0);
        self.status.set(CpuFlags::NEGATIVE, result & 0b1000_0000 != 0);
    }

    /// Hardware interrupt entry: push PC then status (B clear), mask IRQs
    /// and vector.
    fn interrupt(&mut self, vector: u16) -> usize {
        self.stack_push_u16(self.program_counter);
        self.stack_push((self.status.bits() | 0b0010_0000) & !0b0001_0000);
        self.status.insert(CpuFlags::INTERRUPT_DISABLE);
        self.program_counter = self.mem_read_u16(vector);
        INTERRUPT_CYCLES
    }

    /// Executes one instruction boundary: a latched NMI edge wins over
    /// everything (even with interrupts masked), then a held IRQ line when
    /// unmasked, then the instruction under the program counter.
    pub fn step(&mut self) -> Result<usize, StepError> {
        if self.bus.ppu.take_nmi() {
            return Ok(self.interrupt(NMI_VECTOR));
        }
        if self.irq_pending && !self.status.contains(CpuFlags::INTERRUPT_DISABLE) {
            return Ok(self.interrupt(IRQ_VECTOR));
        }

        let pc = self.program_counter;
        let code = self.mem_read(pc);
        let opcode = OPCODES_MAP
            .get(&code)
            .copied()
            .ok_or(StepError::UnknownOpcode { opcode: code, pc })?;

        self.program_counter = pc.wrapping_add(1);
        self.extra_cycles = 0;

        let mode = &opcode.addressing_mode;
        match opcode.op {
            Operation::ADC => self.adc(mode),
            Operation::AND => self.and(mode),
            Operation::ASL => self.asl(mode),
            Operation::BCC => self.branch(!self.status.contains(CpuFlags::CARRY)),
            Operation::BCS => self.branch(self.status.contains(CpuFlags::CARRY)),
            Operation::BEQ => self.branch(self.status.contains(CpuFlags::ZERO)),
            Operation::BIT => self.bit(mode),
            Operation::BMI => self.branch(self.status.contains(CpuFlags::NEGATIVE)),
            Operation::BNE => self.branch(!self.status.contains(CpuFlags::ZERO)),
            Operation::BPL => self.branch(!self.status.contains(CpuFlags::NEGATIVE)),
            Operation::BRK => self.brk(),
            Operation::BVC => self.branch(!self.status.contains(CpuFlags::OVERFLOW)),
            Operation::BVS => self.branch(self.status.contains(CpuFlags::OVERFLOW)),
            Operation::CLC => self.status.remove(CpuFlags::CARRY),
            Operation::CLD => self.status.remove(CpuFlags::DECIMAL_MODE),
            Operation::CLI => self.status.remove(CpuFlags::INTERRUPT_DISABLE),
            Operation::CLV => self.status.remove(CpuFlags::OVERFLOW),
            Operation::CMP => self.compare(mode, self.register_a),
            Operation::CPX => self.compare(mode, self.register_x),
            Operation::CPY => self.compare(mode, self.register_y),
            Operation::DEC => self.dec(mode),
            Operation::DEX => self.dex(),
            Operation::DEY => self.dey(),
            Operation::EOR => self.eor(mode),
            Operation::INC => self.inc(mode),
            Operation::INX => self.inx(),
            Operation::INY => self.iny(),
            Operation::JMP => self.jmp(mode),
            Operation::JSR => self.jsr(),
            Operation::LDA => self.lda(mode),
            Operation::LDX => self.ldx(mode),
            Operation::LDY => self.ldy(mode),
            Operation::LSR => self.lsr(mode),
            Operation::NOP => (),
            Operation::ORA => self.ora(mode),
            Operation::PHA => self.stack_push(self.register_a),
            Operation::PHP => self.php(),
            Operation::PLA => self.pla(),
            Operation::PLP => self.plp(),
            Operation::ROL => self.rol(mode),
            Operation::ROR => self.ror(mode),
            Operation::RTI => self.rti(),
            Operation::RTS => self.rts(),
            Operation::SBC => self.sbc(mode),
            Operation::SEC => self.status.insert(CpuFlags::CARRY),
            Operation::SED => self.status.insert(CpuFlags::DECIMAL_MODE),
            Operation::SEI => self.status.insert(CpuFlags::INTERRUPT_DISABLE),
            Operation::STA => self.sta(mode),
            Operation::STX => self.stx(mode),
            Operation::STY => self.sty(mode),
            Operation::TAX => self.tax(),
            Operation::TAY => self.tay(),
            Operation::TSX => self.tsx(),
            Operation::TXA => self.txa(),
            Operation::TXS => self.stack_pointer = self.register_x,
            Operation::TYA => self.tya(),
        }

        if !opcode.op.writes_pc() {
            self.program_counter = pc.wrapping_add(opcode.bytes as u16);
        }

        Ok(opcode.cycles + self.extra_cycles)
    }
}
