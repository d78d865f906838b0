//! Single-step vector tests in the SingleStepTests JSON shape
//! (https://github.com/SingleStepTests/ProcessorTests): each vector pins
//! the full register file and a sparse RAM image before and after one
//! instruction. The vectors here are inlined rather than read from the
//! external suite.

use famicore::bus::{Bus, Mem};
use famicore::cartridge::test::cartridge_with_program;
use famicore::cpu::{CpuFlags, CPU};
use serde_json::Value;

const VECTORS: &str = r#"[
  {
    "name": "a9 00 - LDA immediate loads zero",
    "initial": {"pc": 1024, "s": 253, "a": 85, "x": 0, "y": 0, "p": 36,
                "ram": [[1024, 169], [1025, 0]]},
    "final":   {"pc": 1026, "s": 253, "a": 0, "x": 0, "y": 0, "p": 38,
                "ram": [[1024, 169], [1025, 0]]}
  },
  {
    "name": "69 50 - ADC signed overflow",
    "initial": {"pc": 1024, "s": 253, "a": 80, "x": 0, "y": 0, "p": 36,
                "ram": [[1024, 105], [1025, 80]]},
    "final":   {"pc": 1026, "s": 253, "a": 160, "x": 0, "y": 0, "p": 228,
                "ram": [[1024, 105], [1025, 80]]}
  },
  {
    "name": "e8 - INX wraps to zero",
    "initial": {"pc": 1024, "s": 253, "a": 0, "x": 255, "y": 0, "p": 36,
                "ram": [[1024, 232]]},
    "final":   {"pc": 1025, "s": 253, "a": 0, "x": 0, "y": 0, "p": 38,
                "ram": [[1024, 232]]}
  },
  {
    "name": "e9 10 - SBC without borrow",
    "initial": {"pc": 1024, "s": 253, "a": 32, "x": 0, "y": 0, "p": 37,
                "ram": [[1024, 233], [1025, 16]]},
    "final":   {"pc": 1026, "s": 253, "a": 16, "x": 0, "y": 0, "p": 37,
                "ram": [[1024, 233], [1025, 16]]}
  },
  {
    "name": "85 10 - STA zero page",
    "initial": {"pc": 1024, "s": 253, "a": 66, "x": 0, "y": 0, "p": 36,
                "ram": [[1024, 133], [1025, 16], [16, 0]]},
    "final":   {"pc": 1026, "s": 253, "a": 66, "x": 0, "y": 0, "p": 36,
                "ram": [[1024, 133], [1025, 16], [16, 66]]}
  },
  {
    "name": "d0 03 - BNE taken forward",
    "initial": {"pc": 1024, "s": 253, "a": 1, "x": 0, "y": 0, "p": 36,
                "ram": [[1024, 208], [1025, 3]]},
    "final":   {"pc": 1029, "s": 253, "a": 1, "x": 0, "y": 0, "p": 36,
                "ram": [[1024, 208], [1025, 3]]}
  },
  {
    "name": "20 34 02 - JSR pushes return address minus one",
    "initial": {"pc": 1024, "s": 253, "a": 0, "x": 0, "y": 0, "p": 36,
                "ram": [[1024, 32], [1025, 52], [1026, 2]]},
    "final":   {"pc": 564, "s": 251, "a": 0, "x": 0, "y": 0, "p": 36,
                "ram": [[1024, 32], [1025, 52], [1026, 2], [509, 4], [508, 2]]}
  },
  {
    "name": "4a - LSR accumulator shifts into carry",
    "initial": {"pc": 1024, "s": 253, "a": 1, "x": 0, "y": 0, "p": 36,
                "ram": [[1024, 74]]},
    "final":   {"pc": 1025, "s": 253, "a": 0, "x": 0, "y": 0, "p": 39,
                "ram": [[1024, 74]]}
  }
]"#;

fn field(v: &Value, name: &str) -> u64 {
    v[name].as_u64().unwrap_or_else(|| panic!("missing field {name}"))
}

fn run_vector(v: &Value) {
    let name = v["name"].as_str().unwrap();
    let initial = &v["initial"];
    let expected = &v["final"];

    let mut cpu = CPU::new(Bus::new(cartridge_with_program(&[])));
    cpu.program_counter = field(initial, "pc") as u16;
    cpu.stack_pointer = field(initial, "s") as u8;
    cpu.register_a = field(initial, "a") as u8;
    cpu.register_x = field(initial, "x") as u8;
    cpu.register_y = field(initial, "y") as u8;
    cpu.status = CpuFlags::from_bits_retain(field(initial, "p") as u8);

    for pair in initial["ram"].as_array().unwrap() {
        cpu.mem_write(pair[0].as_u64().unwrap() as u16, pair[1].as_u64().unwrap() as u8);
    }

    cpu.step().unwrap();

    assert_eq!(cpu.program_counter, field(expected, "pc") as u16, "{name}: pc");
    assert_eq!(cpu.stack_pointer, field(expected, "s") as u8, "{name}: s");
    assert_eq!(cpu.register_a, field(expected, "a") as u8, "{name}: a");
    assert_eq!(cpu.register_x, field(expected, "x") as u8, "{name}: x");
    assert_eq!(cpu.register_y, field(expected, "y") as u8, "{name}: y");
    assert_eq!(cpu.status.bits(), field(expected, "p") as u8, "{name}: p");

    for pair in expected["ram"].as_array().unwrap() {
        let addr = pair[0].as_u64().unwrap() as u16;
        assert_eq!(
            cpu.mem_read(addr),
            pair[1].as_u64().unwrap() as u8,
            "{name}: ram at {addr:#06x}"
        );
    }
}

#[test]
fn step_vectors() {
    let vectors: Value = serde_json::from_str(VECTORS).unwrap();
    for vector in vectors.as_array().unwrap() {
        run_vector(vector);
    }
}
