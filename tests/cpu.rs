//! End-to-end CPU scenarios over a synthetic 32 KiB cartridge whose reset
//! vector points at $8000.

use famicore::bus::{Bus, Mem};
use famicore::cartridge::test::{cartridge_with_program, IRQ_TARGET};
use famicore::cpu::{CpuFlags, CPU};
use famicore::error::StepError;

fn cpu_with_program(program: &[u8]) -> CPU {
    let mut cpu = CPU::new(Bus::new(cartridge_with_program(program)));
    cpu.reset();
    cpu
}

#[test]
fn reset_loads_vector_and_initial_state() {
    let cpu = cpu_with_program(&[0xEA]);
    assert_eq!(cpu.program_counter, 0x8000);
    assert_eq!(cpu.stack_pointer, 0xFD);
    assert!(cpu.status.contains(CpuFlags::INTERRUPT_DISABLE));
    assert_eq!(cpu.register_a, 0);
    assert_eq!(cpu.register_x, 0);
    assert_eq!(cpu.register_y, 0);
    assert_eq!(cpu.cycle_count, 0);
}

#[test]
fn lda_immediate_sets_flags() {
    let mut cpu = cpu_with_program(&[0xA9, 0x00]);
    let cycles = cpu.step().unwrap();
    assert_eq!(cpu.register_a, 0);
    assert!(cpu.status.contains(CpuFlags::ZERO));
    assert!(!cpu.status.contains(CpuFlags::NEGATIVE));
    assert_eq!(cpu.program_counter, 0x8002);
    assert_eq!(cycles, 2);
}

#[test]
fn adc_with_signed_overflow() {
    // LDA #$50; ADC #$50
    let mut cpu = cpu_with_program(&[0xA9, 0x50, 0x69, 0x50]);
    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.register_a, 0xA0);
    assert!(cpu.status.contains(CpuFlags::OVERFLOW));
    assert!(cpu.status.contains(CpuFlags::NEGATIVE));
    assert!(!cpu.status.contains(CpuFlags::CARRY));
    assert!(!cpu.status.contains(CpuFlags::ZERO));
}

#[test]
fn jsr_rts_round_trip() {
    // $8000: JSR $8010; $8010: RTS
    let mut program = vec![0u8; 0x11];
    program[..3].copy_from_slice(&[0x20, 0x10, 0x80]);
    program[0x10] = 0x60;
    let mut cpu = cpu_with_program(&program);

    cpu.step().unwrap();
    assert_eq!(cpu.program_counter, 0x8010);
    assert_eq!(cpu.stack_pointer, 0xFB);
    // return address minus one, high byte pushed first
    assert_eq!(cpu.bus.peek(0x01FD), 0x80);
    assert_eq!(cpu.bus.peek(0x01FC), 0x02);

    cpu.step().unwrap();
    assert_eq!(cpu.program_counter, 0x8003);
    assert_eq!(cpu.stack_pointer, 0xFD);
}

#[test]
fn wram_mirror_round_trip() {
    let mut cpu = cpu_with_program(&[0xEA]);
    cpu.mem_write(0x0005, 0xAA);
    assert_eq!(cpu.mem_read(0x0805), 0xAA);
    assert_eq!(cpu.mem_read(0x1005), 0xAA);
    assert_eq!(cpu.mem_read(0x1805), 0xAA);
}

#[test]
fn bne_skips_over_filler() {
    // LDA #$01; BNE +2; (2 bytes skipped); LDA #$05
    let mut cpu = cpu_with_program(&[0xA9, 0x01, 0xD0, 0x02, 0x00, 0x00, 0xA9, 0x05]);
    cpu.step().unwrap();
    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.register_a, 5);
    assert_eq!(cpu.program_counter, 0x8008);
}

#[test]
fn branch_not_taken_advances_by_length() {
    // BEQ with Z clear falls through
    let mut cpu = cpu_with_program(&[0xA9, 0x01, 0xF0, 0x10]);
    cpu.step().unwrap();
    let cycles = cpu.step().unwrap();
    assert_eq!(cpu.program_counter, 0x8004);
    assert_eq!(cycles, 2);
}

#[test]
fn taken_branch_costs_an_extra_cycle() {
    let mut cpu = cpu_with_program(&[0xA9, 0x01, 0xD0, 0x02]);
    cpu.step().unwrap();
    let cycles = cpu.step().unwrap();
    assert_eq!(cpu.program_counter, 0x8006);
    assert_eq!(cycles, 3);
}

#[test]
fn backward_branch_takes_negative_displacement() {
    // $8000: NOP; $8001: BNE -3 (back to $8000) while Z is clear
    let mut cpu = cpu_with_program(&[0xEA, 0xD0, 0xFD]);
    cpu.status.remove(CpuFlags::ZERO);
    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.program_counter, 0x8000);
}

#[test]
fn pc_advances_by_instruction_length() {
    // NOP (1), LDA zp (2), ASL A (1), LDA abs (3)
    let mut cpu = cpu_with_program(&[0xEA, 0xA5, 0x10, 0x0A, 0xAD, 0x00, 0x02]);
    cpu.step().unwrap();
    assert_eq!(cpu.program_counter, 0x8001);
    cpu.step().unwrap();
    assert_eq!(cpu.program_counter, 0x8003);
    cpu.step().unwrap();
    assert_eq!(cpu.program_counter, 0x8004);
    cpu.step().unwrap();
    assert_eq!(cpu.program_counter, 0x8007);
}

#[test]
fn load_flag_laws_hold_for_every_value() {
    let mut cpu = cpu_with_program(&[]);
    for value in 0..=255u8 {
        cpu.mem_write(0x8000, 0xA9);
        cpu.mem_write(0x8001, value);
        cpu.program_counter = 0x8000;
        cpu.step().unwrap();
        assert_eq!(cpu.register_a, value);
        assert_eq!(cpu.status.contains(CpuFlags::ZERO), value == 0);
        assert_eq!(cpu.status.contains(CpuFlags::NEGATIVE), value >= 0x80);
    }
}

#[test]
fn adc_laws_hold_for_all_operand_pairs() {
    let mut cpu = cpu_with_program(&[]);
    for a in 0..=255u8 {
        for operand in 0..=255u8 {
            for carry_in in 0..2u16 {
                cpu.mem_write(0x8000, 0x69);
                cpu.mem_write(0x8001, operand);
                cpu.program_counter = 0x8000;
                cpu.register_a = a;
                cpu.status.set(CpuFlags::CARRY, carry_in == 1);
                cpu.step().unwrap();

                let sum = a as u16 + operand as u16 + carry_in;
                let result = sum as u8;
                assert_eq!(cpu.register_a, result);
                assert_eq!(cpu.status.contains(CpuFlags::CARRY), sum > 0xFF);
                assert_eq!(
                    cpu.status.contains(CpuFlags::OVERFLOW),
                    (a ^ result) & (operand ^ result) & 0x80 != 0,
                    "overflow law failed for A={a:#04x} M={operand:#04x} C={carry_in}"
                );
                assert_eq!(cpu.status.contains(CpuFlags::ZERO), result == 0);
                assert_eq!(cpu.status.contains(CpuFlags::NEGATIVE), result >= 0x80);
            }
        }
    }
}

#[test]
fn cmp_laws_hold_for_all_operand_pairs() {
    let mut cpu = cpu_with_program(&[]);
    for a in 0..=255u8 {
        for operand in 0..=255u8 {
            cpu.mem_write(0x8000, 0xC9);
            cpu.mem_write(0x8001, operand);
            cpu.program_counter = 0x8000;
            cpu.register_a = a;
            cpu.step().unwrap();

            assert_eq!(cpu.status.contains(CpuFlags::CARRY), a >= operand);
            assert_eq!(cpu.status.contains(CpuFlags::ZERO), a == operand);
            assert_eq!(
                cpu.status.contains(CpuFlags::NEGATIVE),
                a.wrapping_sub(operand) >= 0x80
            );
            // the compared register is untouched
            assert_eq!(cpu.register_a, a);
        }
    }
}

#[test]
fn cpx_sets_carry_on_greater_or_equal() {
    let mut cpu = cpu_with_program(&[0xA2, 0x10, 0xE0, 0x10, 0xE0, 0x11]);
    cpu.step().unwrap();
    cpu.step().unwrap();
    assert!(cpu.status.contains(CpuFlags::CARRY));
    assert!(cpu.status.contains(CpuFlags::ZERO));
    cpu.step().unwrap();
    assert!(!cpu.status.contains(CpuFlags::CARRY));
}

#[test]
fn stack_round_trips_every_byte() {
    let mut cpu = cpu_with_program(&[]);
    for value in 0..=255u8 {
        // LDA #value; PHA; LDA #$FF; PLA
        for (i, byte) in [0xA9, value, 0x48, 0xA9, 0xFF, 0x68].iter().enumerate() {
            cpu.mem_write(0x8000 + i as u16, *byte);
        }
        cpu.program_counter = 0x8000;
        for _ in 0..4 {
            cpu.step().unwrap();
        }
        assert_eq!(cpu.register_a, value);
        assert_eq!(cpu.stack_pointer, 0xFD);
    }
}

#[test]
fn brk_vectors_through_fffe_and_rti_returns() {
    // $8000: BRK; IRQ handler is a bare RTI
    let mut program = vec![0u8; (IRQ_TARGET - 0x8000 + 1) as usize];
    program[(IRQ_TARGET - 0x8000) as usize] = 0x40;
    let mut cpu = cpu_with_program(&program);

    cpu.step().unwrap();
    assert_eq!(cpu.program_counter, IRQ_TARGET);
    assert!(cpu.status.contains(CpuFlags::INTERRUPT_DISABLE));
    // pushed status has B and bit 5 set
    assert_eq!(cpu.bus.peek(0x01FB) & 0b0011_0000, 0b0011_0000);

    cpu.step().unwrap();
    assert_eq!(cpu.program_counter, 0x8002);
}

#[test]
fn irq_line_is_masked_until_cli() {
    // NOP; CLI; NOP
    let mut cpu = cpu_with_program(&[0xEA, 0x58, 0xEA]);
    cpu.irq_pending = true;

    cpu.step().unwrap();
    assert_eq!(cpu.program_counter, 0x8001);

    cpu.step().unwrap();
    let cycles = cpu.step().unwrap();
    assert_eq!(cpu.program_counter, IRQ_TARGET);
    assert_eq!(cycles, 7);
    // hardware interrupts push the status byte with B clear
    assert_eq!(cpu.bus.peek(0x01FB) & 0b0001_0000, 0);
}

#[test]
fn jmp_indirect_follows_pointer() {
    // JMP ($0010) where $0010 holds $8004; $8004: LDA #$07
    let mut cpu = cpu_with_program(&[0x6C, 0x10, 0x00, 0xEA, 0xA9, 0x07]);
    cpu.mem_write(0x0010, 0x04);
    cpu.mem_write(0x0011, 0x80);
    cpu.step().unwrap();
    assert_eq!(cpu.program_counter, 0x8004);
    cpu.step().unwrap();
    assert_eq!(cpu.register_a, 0x07);
}

#[test]
fn unknown_opcode_reports_location() {
    let mut cpu = cpu_with_program(&[0xFF]);
    assert_eq!(
        cpu.step(),
        Err(StepError::UnknownOpcode {
            opcode: 0xFF,
            pc: 0x8000
        })
    );
}

#[test]
fn indirect_indexed_load_reads_through_pointer() {
    // LDY #$04; LDA ($20),Y
    let mut cpu = cpu_with_program(&[0xA0, 0x04, 0xB1, 0x20]);
    cpu.mem_write(0x0020, 0x00);
    cpu.mem_write(0x0021, 0x03);
    cpu.mem_write(0x0304, 0x5A);
    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.register_a, 0x5A);
}

#[test]
fn bit_maps_memory_bits_into_flags() {
    // LDA #$01; BIT $0300
    let mut cpu = cpu_with_program(&[0xA9, 0x01, 0x2C, 0x00, 0x03]);
    cpu.mem_write(0x0300, 0b1100_0000);
    cpu.step().unwrap();
    cpu.step().unwrap();
    assert!(cpu.status.contains(CpuFlags::ZERO));
    assert!(cpu.status.contains(CpuFlags::NEGATIVE));
    assert!(cpu.status.contains(CpuFlags::OVERFLOW));
}

#[test]
fn asl_accumulator_moves_bit_into_carry() {
    let mut cpu = cpu_with_program(&[0xA9, 0x81, 0x0A]);
    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.register_a, 0x02);
    assert!(cpu.status.contains(CpuFlags::CARRY));
    assert!(!cpu.status.contains(CpuFlags::NEGATIVE));
}

#[test]
fn inc_and_dec_memory_set_flags() {
    // INC $10 (0xFF -> 0x00), DEC $11 (0x00 -> 0xFF)
    let mut cpu = cpu_with_program(&[0xE6, 0x10, 0xC6, 0x11]);
    cpu.mem_write(0x0010, 0xFF);
    cpu.mem_write(0x0011, 0x00);
    cpu.step().unwrap();
    assert_eq!(cpu.mem_read(0x0010), 0x00);
    assert!(cpu.status.contains(CpuFlags::ZERO));
    cpu.step().unwrap();
    assert_eq!(cpu.mem_read(0x0011), 0xFF);
    assert!(cpu.status.contains(CpuFlags::NEGATIVE));
}

#[test]
fn sbc_behaves_as_inverted_adc() {
    // SEC; LDA #$20; SBC #$10
    let mut cpu = cpu_with_program(&[0x38, 0xA9, 0x20, 0xE9, 0x10]);
    cpu.step().unwrap();
    cpu.step().unwrap();
    cpu.step().unwrap();
    assert_eq!(cpu.register_a, 0x10);
    // no borrow occurred
    assert!(cpu.status.contains(CpuFlags::CARRY));
}
