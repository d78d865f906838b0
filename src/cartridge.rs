//! iNES (.NES) file parser
//!
//! Reference: https://www.nesdev.org/wiki/INES

use crate::error::LoadError;

const INES_IDENTIFIER: [u8; 4] = [0x4E, 0x45, 0x53, 0x1A];
const HEADER_SIZE: usize = 16;
const TRAINER_SIZE: usize = 512;
pub const PRG_BANK_SIZE: usize = 16384;
pub const CHR_BANK_SIZE: usize = 8192;
const TITLE_SIZE: usize = 128;

/// A parsed ROM image. Read-only once constructed; the banks are shared by
/// value with the bus and the renderer.
#[derive(Debug, PartialEq)]
pub struct Cartridge {
    /// 16 KiB PRG banks. A single-bank image is duplicated so that `$8000`
    /// and `$C000` read symmetrically.
    pub prg_banks: Vec<Vec<u8>>,
    /// 8 KiB CHR (pattern) banks. May be empty.
    pub chr_banks: Vec<Vec<u8>>,
    /// Bank counts as declared by the header.
    pub prg_count: u8,
    pub chr_count: u8,
    pub mapper: u8,
    /// Trailing 128-byte title, when the image carries one.
    pub title: Option<String>,
}

impl Cartridge {
    pub fn load(raw: &[u8]) -> Result<Cartridge, LoadError> {
        if raw.len() < HEADER_SIZE {
            return Err(LoadError::ShortRead {
                section: "header",
                expected: HEADER_SIZE,
                actual: raw.len(),
            });
        }
        if raw[0..4] != INES_IDENTIFIER {
            return Err(LoadError::BadMagic);
        }

        let prg_count = raw[4];
        let chr_count = raw[5];
        let flags6 = raw[6];
        let flags7 = raw[7];

        let ines_ver = (flags7 >> 2) & 0b11;
        if ines_ver != 0 {
            return Err(LoadError::UnsupportedFormat("NES 2.0 header"));
        }

        let mapper = (flags6 >> 4) | (flags7 & 0b1111_0000);
        if mapper != 0 {
            return Err(LoadError::UnsupportedMapper(mapper));
        }

        // NROM carries one or two fixed PRG banks.
        if prg_count == 0 || prg_count > 2 {
            return Err(LoadError::UnsupportedFormat("mapper 0 takes 1 or 2 PRG banks"));
        }

        let skip_trainer = flags6 & 0b100 != 0;
        let mut offset = HEADER_SIZE + if skip_trainer { TRAINER_SIZE } else { 0 };

        let mut prg_banks = Vec::with_capacity(prg_count as usize);
        for _ in 0..prg_count {
            prg_banks.push(read_bank(raw, &mut offset, PRG_BANK_SIZE, "PRG-ROM")?);
        }
        let mut chr_banks = Vec::with_capacity(chr_count as usize);
        for _ in 0..chr_count {
            chr_banks.push(read_bank(raw, &mut offset, CHR_BANK_SIZE, "CHR-ROM")?);
        }

        // Mapper 0: mirror a lone PRG bank into both CPU-visible slots.
        if prg_count == 1 {
            let bank = prg_banks[0].clone();
            prg_banks.push(bank);
        }

        let title = raw[offset..]
            .get(..TITLE_SIZE)
            .map(|tail| String::from_utf8_lossy(tail).trim_end_matches('\0').to_string())
            .filter(|t| !t.is_empty());

        tracing::info!(prg = prg_count, chr = chr_count, mapper, "loaded iNES image");

        Ok(Cartridge {
            prg_banks,
            chr_banks,
            prg_count,
            chr_count,
            mapper,
            title,
        })
    }
}

fn read_bank(
    raw: &[u8],
    offset: &mut usize,
    size: usize,
    section: &'static str,
) -> Result<Vec<u8>, LoadError> {
    let end = *offset + size;
    let bank = raw.get(*offset..end).ok_or(LoadError::ShortRead {
        section,
        expected: size,
        actual: raw.len().saturating_sub(*offset),
    })?;
    *offset = end;
    Ok(bank.to_vec())
}

pub mod test {
    use super::*;

    /// Where the test vectors point. The reset vector lands at the start of
    /// PRG, the NMI and IRQ handlers further in.
    pub const RESET_TARGET: u16 = 0x8000;
    pub const NMI_TARGET: u16 = 0x9000;
    pub const IRQ_TARGET: u16 = 0x9800;

    /// Builds a two-bank cartridge with `program` at `$8000` and the
    /// interrupt vectors wired to the targets above.
    pub fn cartridge_with_program(program: &[u8]) -> Cartridge {
        let mut prg = vec![0u8; 2 * PRG_BANK_SIZE];
        prg[..program.len()].copy_from_slice(program);

        // Vectors live in the top of the second bank ($FFFA-$FFFF).
        for (slot, target) in [
            (0x7FFA, NMI_TARGET),
            (0x7FFC, RESET_TARGET),
            (0x7FFE, IRQ_TARGET),
        ] {
            prg[slot] = (target & 0xFF) as u8;
            prg[slot + 1] = (target >> 8) as u8;
        }

        let mut raw = vec![
            0x4E, 0x45, 0x53, 0x1A, 0x02, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00,
        ];
        raw.extend_from_slice(&prg);
        raw.extend_from_slice(&[0u8; CHR_BANK_SIZE]);
        Cartridge::load(&raw).unwrap()
    }

    #[test]
    fn test_invalid_ines_identifier() {
        let raw_data = vec![
            // Incorrect iNES header
            0x00, 0x00, 0x00, 0x00, // Invalid NES<EOF>
            0x02, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];

        assert_eq!(Cartridge::load(&raw_data), Err(LoadError::BadMagic));
    }

    #[test]
    fn test_unsupported_nes_version() {
        let raw_data = vec![
            0x4E, 0x45, 0x53, 0x1A, // NES<EOF>
            0x02, 0x01, 0x00, 0x08, // NES2.0 bits set in flags 7
            0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        ];

        assert_eq!(
            Cartridge::load(&raw_data),
            Err(LoadError::UnsupportedFormat("NES 2.0 header"))
        );
    }

    #[test]
    fn test_prg_bank_count_is_bounded() {
        let mut raw = vec![
            0x4E, 0x45, 0x53, 0x1A, 0x03, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00,
        ];
        raw.extend_from_slice(&[0u8; 3 * PRG_BANK_SIZE]);

        assert!(matches!(
            Cartridge::load(&raw),
            Err(LoadError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_short_prg_section() {
        let mut raw = vec![
            0x4E, 0x45, 0x53, 0x1A, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00,
        ];
        raw.extend_from_slice(&[0u8; 100]);

        assert_eq!(
            Cartridge::load(&raw),
            Err(LoadError::ShortRead {
                section: "PRG-ROM",
                expected: PRG_BANK_SIZE,
                actual: 100,
            })
        );
    }

    #[test]
    fn test_mapper_nibbles() {
        let mut raw = vec![
            0x4E, 0x45, 0x53, 0x1A, 0x01, 0x00, 0x10, 0x20, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00,
        ];
        raw.extend_from_slice(&[0u8; PRG_BANK_SIZE]);

        // Low nibble from flags6 bits 4-7, high nibble from flags7 bits 4-7.
        assert_eq!(Cartridge::load(&raw), Err(LoadError::UnsupportedMapper(0x21)));
    }

    #[test]
    fn test_single_prg_bank_is_duplicated() {
        let mut raw = vec![
            0x4E, 0x45, 0x53, 0x1A, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00,
        ];
        let mut prg = vec![0u8; PRG_BANK_SIZE];
        prg[0] = 0xEA;
        raw.extend_from_slice(&prg);

        let cartridge = Cartridge::load(&raw).unwrap();
        assert_eq!(cartridge.prg_count, 1);
        assert_eq!(cartridge.prg_banks.len(), 2);
        assert_eq!(cartridge.prg_banks[0], cartridge.prg_banks[1]);
    }

    #[test]
    fn test_title_is_parsed() {
        let mut raw = vec![
            0x4E, 0x45, 0x53, 0x1A, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x00, 0x00,
        ];
        raw.extend_from_slice(&[0u8; PRG_BANK_SIZE]);
        let mut title = [0u8; TITLE_SIZE];
        title[..5].copy_from_slice(b"MARIO");
        raw.extend_from_slice(&title);

        let cartridge = Cartridge::load(&raw).unwrap();
        assert_eq!(cartridge.title.as_deref(), Some("MARIO"));
    }
}
