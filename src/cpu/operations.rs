//! Instruction handlers
//!
//! Reference: https://www.nesdev.org/obelisk-6502-guide/reference.html

use crate::bus::Mem;
use crate::cpu::addressing::AddressingMode;
use crate::cpu::{CpuFlags, CPU, IRQ_VECTOR};

#[derive(Debug, PartialEq)]
#[allow(clippy::upper_case_acronyms)]
pub enum Operation {
    ADC, AND, ASL, BCC, BCS, BEQ, BIT, BMI, BNE, BPL, BRK, BVC, BVS, CLC,
    CLD, CLI, CLV, CMP, CPX, CPY, DEC, DEX, DEY, EOR, INC, INX, INY, JMP,
    JSR, LDA, LDX, LDY, LSR, NOP, ORA, PHA, PHP, PLA, PLP, ROL, ROR, RTI,
    RTS, SBC, SEC, SED, SEI, STA, STX, STY, TAX, TAY, TSX, TXA, TXS, TYA,
}

impl Operation {
    /// Control-flow operations place the program counter themselves; for
    /// everything else the step loop advances it by the instruction length.
    pub fn writes_pc(&self) -> bool {
        matches!(
            self,
            Operation::JMP
                | Operation::JSR
                | Operation::RTS
                | Operation::RTI
                | Operation::BRK
                | Operation::BCC
                | Operation::BCS
                | Operation::BEQ
                | Operation::BMI
                | Operation::BNE
                | Operation::BPL
                | Operation::BVC
                | Operation::BVS
        )
    }
}

impl CPU {
    // Add with carry
    pub(super) fn adc(&mut self, mode: &AddressingMode) {
        let (addr, page_cross) = self.operand_address(mode);
        let value = self.mem_read(addr);
        self.add_to_register_a(value);
        if page_cross {
            self.extra_cycles += 1;
        }
    }

    // Subtract with carry: ADC of the operand's complement, carry acting as
    // the inverted borrow.
    pub(super) fn sbc(&mut self, mode: &AddressingMode) {
        let (addr, page_cross) = self.operand_address(mode);
        let value = self.mem_read(addr);
        self.add_to_register_a(!value);
        if page_cross {
            self.extra_cycles += 1;
        }
    }

    pub(super) fn and(&mut self, mode: &AddressingMode) {
        let (addr, page_cross) = self.operand_address(mode);
        let value = self.mem_read(addr);
        self.set_register_a(self.register_a & value);
        if page_cross {
            self.extra_cycles += 1;
        }
    }

    pub(super) fn eor(&mut self, mode: &AddressingMode) {
        let (addr, page_cross) = self.operand_address(mode);
        let value = self.mem_read(addr);
        self.set_register_a(self.register_a ^ value);
        if page_cross {
            self.extra_cycles += 1;
        }
    }

    pub(super) fn ora(&mut self, mode: &AddressingMode) {
        let (addr, page_cross) = self.operand_address(mode);
        let value = self.mem_read(addr);
        self.set_register_a(self.register_a | value);
        if page_cross {
            self.extra_cycles += 1;
        }
    }

    // Shared by CMP/CPX/CPY: carry says the register is not below the
    // operand, Z/N come from the modular difference.
    pub(super) fn compare(&mut self, mode: &AddressingMode, compare_with: u8) {
        let (addr, page_cross) = self.operand_address(mode);
        let value = self.mem_read(addr);
        self.status.set(CpuFlags::CARRY, compare_with >= value);
        self.update_zero_and_negative_flags(compare_with.wrapping_sub(value));
        if page_cross {
            self.extra_cycles += 1;
        }
    }

    // Bit test
    pub(super) fn bit(&mut self, mode: &AddressingMode) {
        let (addr, _) = self.operand_address(mode);
        let value = self.mem_read(addr);
        self.status.set(CpuFlags::ZERO, self.register_a & value == 0);
        self.status.set(CpuFlags::NEGATIVE, value & 0b1000_0000 != 0);
        self.status.set(CpuFlags::OVERFLOW, value & 0b0100_0000 != 0);
    }

    // Arithmetic shift left; NoneAddressing targets the accumulator.
    pub(super) fn asl(&mut self, mode: &AddressingMode) {
        self.read_modify_write(mode, |cpu, data| {
            cpu.status.set(CpuFlags::CARRY, data >> 7 == 1);
            data << 1
        });
    }

    // Logical shift right
    pub(super) fn lsr(&mut self, mode: &AddressingMode) {
        self.read_modify_write(mode, |cpu, data| {
            cpu.status.set(CpuFlags::CARRY, data & 1 == 1);
            data >> 1
        });
    }

    // Rotate left through carry
    pub(super) fn rol(&mut self, mode: &AddressingMode) {
        self.read_modify_write(mode, |cpu, data| {
            let old_carry = cpu.status.contains(CpuFlags::CARRY);
            cpu.status.set(CpuFlags::CARRY, data >> 7 == 1);
            (data << 1) | old_carry as u8
        });
    }

    // Rotate right through carry
    pub(super) fn ror(&mut self, mode: &AddressingMode) {
        self.read_modify_write(mode, |cpu, data| {
            let old_carry = cpu.status.contains(CpuFlags::CARRY);
            cpu.status.set(CpuFlags::CARRY, data & 1 == 1);
            (data >> 1) | ((old_carry as u8) << 7)
        });
    }

    fn read_modify_write(&mut self, mode: &AddressingMode, f: impl Fn(&mut CPU, u8) -> u8) {
        match mode {
            AddressingMode::NoneAddressing => {
                let data = self.register_a;
                let result = f(self, data);
                self.register_a = result;
                self.update_zero_and_negative_flags(result);
            }
            _ => {
                let (addr, _) = self.operand_address(mode);
                let data = self.mem_read(addr);
                let result = f(self, data);
                self.mem_write(addr, result);
                self.update_zero_and_negative_flags(result);
            }
        }
    }

    pub(super) fn inc(&mut self, mode: &AddressingMode) {
        let (addr, _) = self.operand_address(mode);
        let value = self.mem_read(addr).wrapping_add(1);
        self.mem_write(addr, value);
        self.update_zero_and_negative_flags(value);
    }

    pub(super) fn dec(&mut self, mode: &AddressingMode) {
        let (addr, _) = self.operand_address(mode);
        let value = self.mem_read(addr).wrapping_sub(1);
        self.mem_write(addr, value);
        self.update_zero_and_negative_flags(value);
    }

    pub(super) fn inx(&mut self) {
        self.register_x = self.register_x.wrapping_add(1);
        self.update_zero_and_negative_flags(self.register_x);
    }

    pub(super) fn iny(&mut self) {
        self.register_y = self.register_y.wrapping_add(1);
        self.update_zero_and_negative_flags(self.register_y);
    }

    pub(super) fn dex(&mut self) {
        self.register_x = self.register_x.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.register_x);
    }

    pub(super) fn dey(&mut self) {
        self.register_y = self.register_y.wrapping_sub(1);
        self.update_zero_and_negative_flags(self.register_y);
    }

    pub(super) fn lda(&mut self, mode: &AddressingMode) {
        let (addr, page_cross) = self.operand_address(mode);
        let value = self.mem_read(addr);
        self.set_register_a(value);
        if page_cross {
            self.extra_cycles += 1;
        }
    }

    pub(super) fn ldx(&mut self, mode: &AddressingMode) {
        let (addr, page_cross) = self.operand_address(mode);
        self.register_x = self.mem_read(addr);
        self.update_zero_and_negative_flags(self.register_x);
        if page_cross {
            self.extra_cycles += 1;
        }
    }

    pub(super) fn ldy(&mut self, mode: &AddressingMode) {
        let (addr, page_cross) = self.operand_address(mode);
        self.register_y = self.mem_read(addr);
        self.update_zero_and_negative_flags(self.register_y);
        if page_cross {
            self.extra_cycles += 1;
        }
    }

    pub(super) fn sta(&mut self, mode: &AddressingMode) {
        let (addr, _) = self.operand_address(mode);
        self.mem_write(addr, self.register_a);
    }

    pub(super) fn stx(&mut self, mode: &AddressingMode) {
        let (addr, _) = self.operand_address(mode);
        self.mem_write(addr, self.register_x);
    }

    pub(super) fn sty(&mut self, mode: &AddressingMode) {
        let (addr, _) = self.operand_address(mode);
        self.mem_write(addr, self.register_y);
    }

    /// All branches: signed 8-bit displacement relative to the address after
    /// the instruction. Taken branches cost one extra cycle, two when the
    /// target sits on another page.
    pub(super) fn branch(&mut self, condition: bool) {
        let offset = self.mem_read(self.program_counter) as i8;
        let next = self.program_counter.wrapping_add(1);
        if condition {
            let target = next.wrapping_add(offset as u16);
            self.extra_cycles += 1;
            if CPU::page_cross(next, target) {
                self.extra_cycles += 1;
            }
            self.program_counter = target;
        } else {
            self.program_counter = next;
        }
    }

    pub(super) fn jmp(&mut self, mode: &AddressingMode) {
        let target = self.mem_read_u16(self.program_counter);
        match mode {
            AddressingMode::Absolute => self.program_counter = target,
            // The hardware page-wrap quirk is deliberately not modelled.
            AddressingMode::Indirect => self.program_counter = self.mem_read_u16(target),
            _ => panic!("invalid mode {:?} in JMP", mode),
        }
    }

    // Jump to subroutine: the stack records the address of the last byte of
    // the JSR instruction.
    pub(super) fn jsr(&mut self) {
        let target = self.mem_read_u16(self.program_counter);
        self.stack_push_u16(self.program_counter.wrapping_add(1));
        self.program_counter = target;
    }

    pub(super) fn rts(&mut self) {
        self.program_counter = self.stack_pop_u16().wrapping_add(1);
    }

    pub(super) fn rti(&mut self) {
        self.plp();
        self.program_counter = self.stack_pop_u16();
    }

    // Software interrupt: pushes the address two past the opcode, then the
    // status byte with B set, and vectors through $FFFE.
    pub(super) fn brk(&mut self) {
        self.stack_push_u16(self.program_counter.wrapping_add(1));
        self.php();
        self.status.insert(CpuFlags::INTERRUPT_DISABLE);
        self.program_counter = self.mem_read_u16(IRQ_VECTOR);
    }

    pub(super) fn php(&mut self) {
        // B and bit 5 read as 1 on the pushed copy
        self.stack_push(self.status.bits() | 0b0011_0000);
    }

    pub(super) fn pla(&mut self) {
        let value = self.stack_pop();
        self.set_register_a(value);
    }

    pub(super) fn plp(&mut self) {
        let value = self.stack_pop();
        // bits 4-5 are ignored on pull
        self.status = CpuFlags::from_bits_retain(
            (self.status.bits() & 0b0011_0000) | (value & 0b1100_1111),
        );
    }

    pub(super) fn tax(&mut self) {
        self.register_x = self.register_a;
        self.update_zero_and_negative_flags(self.register_x);
    }

    pub(super) fn tay(&mut self) {
        self.register_y = self.register_a;
        self.update_zero_and_negative_flags(self.register_y);
    }

    pub(super) fn tsx(&mut self) {
        self.register_x = self.stack_pointer;
        self.update_zero_and_negative_flags(self.register_x);
    }

    pub(super) fn txa(&mut self) {
        self.register_a = self.register_x;
        self.update_zero_and_negative_flags(self.register_a);
    }

    pub(super) fn tya(&mut self) {
        self.register_a = self.register_y;
        self.update_zero_and_negative_flags(self.register_a);
    }
}
