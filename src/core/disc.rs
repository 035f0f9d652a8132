// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 psx-core contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Raw CD-ROM disc image reader
//!
//! The image is treated as a flat sequence of 2352-byte raw sectors; the
//! sync/header/data/EDC-ECC layout inside each sector is opaque to this
//! core.

use std::fs::File;
use std::io::{Read as _, Seek as _, SeekFrom};

use crate::core::error::{EmulatorError, Result};

pub const RAW_SECTOR_SIZE: usize = 2352;

/// Sectors-per-second for MSF (minute:second:frame) addressing.
const SECTORS_PER_SECOND: u32 = 75;
/// LBA 0 corresponds to MSF 00:02:00 — a 2-second (150-sector) lead-in.
const LEAD_IN_SECTORS: u32 = 150;

pub struct Disc {
    file: File,
    total_sectors: u32,
}

impl Disc {
    pub fn open(path: &str) -> Result<Self> {
        let file = File::open(path).map_err(|e| EmulatorError::LoaderError(e.to_string()))?;
        let len = file
            .metadata()
            .map_err(|e| EmulatorError::LoaderError(e.to_string()))?
            .len();
        let total_sectors = (len / RAW_SECTOR_SIZE as u64) as u32;
        Ok(Self { file, total_sectors })
    }

    pub fn total_sectors(&self) -> u32 {
        self.total_sectors
    }

    /// Read the raw 2352-byte sector at `lba` into `buf`.
    pub fn read_sector(&mut self, lba: u32, buf: &mut [u8; RAW_SECTOR_SIZE]) -> Result<()> {
        if lba >= self.total_sectors {
            return Err(EmulatorError::LoaderError(format!(
                "sector {} out of range (disc has {} sectors)",
                lba, self.total_sectors
            )));
        }
        self.file
            .seek(SeekFrom::Start(lba as u64 * RAW_SECTOR_SIZE as u64))
            .map_err(|e| EmulatorError::LoaderError(e.to_string()))?;
        self.file
            .read_exact(buf)
            .map_err(|e| EmulatorError::LoaderError(e.to_string()))?;
        Ok(())
    }

    pub fn msf_to_lba(minute: u32, second: u32, frame: u32) -> u32 {
        (minute * 60 + second) * SECTORS_PER_SECOND + frame - LEAD_IN_SECTORS
    }

    pub fn lba_to_msf(lba: u32) -> (u32, u32, u32) {
        let mut absolute = lba + LEAD_IN_SECTORS;
        let minute = absolute / (60 * SECTORS_PER_SECOND);
        absolute %= 60 * SECTORS_PER_SECOND;
        let second = absolute / SECTORS_PER_SECOND;
        let frame = absolute % SECTORS_PER_SECOND;
        (minute, second, frame)
    }

    pub fn to_bcd(value: u8) -> u8 {
        ((value / 10) << 4) | (value % 10)
    }

    pub fn from_bcd(bcd: u8) -> u8 {
        (bcd >> 4) * 10 + (bcd & 0xF)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn msf_lba_round_trip() {
        for lba in [0u32, 1, 74, 150, 1000, 300_000] {
            let (m, s, f) = Disc::lba_to_msf(lba);
            assert_eq!(Disc::msf_to_lba(m, s, f), lba);
        }
    }

    #[test]
    fn bcd_round_trip() {
        for v in 0u8..100 {
            assert_eq!(Disc::from_bcd(Disc::to_bcd(v)), v);
        }
    }

    #[test]
    fn to_bcd_known_values() {
        assert_eq!(Disc::to_bcd(0), 0x00);
        assert_eq!(Disc::to_bcd(42), 0x42);
        assert_eq!(Disc::to_bcd(99), 0x99);
    }

    #[test]
    fn open_computes_total_sectors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; RAW_SECTOR_SIZE * 3]).unwrap();
        let disc = Disc::open(file.path().to_str().unwrap()).unwrap();
        assert_eq!(disc.total_sectors(), 3);
    }

    #[test]
    fn read_sector_out_of_range_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; RAW_SECTOR_SIZE]).unwrap();
        let mut disc = Disc::open(file.path().to_str().unwrap()).unwrap();
        let mut buf = [0u8; RAW_SECTOR_SIZE];
        assert!(disc.read_sector(1, &mut buf).is_err());
    }

    #[test]
    fn read_sector_returns_exact_bytes() {
        let mut data = vec![0u8; RAW_SECTOR_SIZE * 2];
        data[RAW_SECTOR_SIZE] = 0xAB;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&data).unwrap();
        let mut disc = Disc::open(file.path().to_str().unwrap()).unwrap();
        let mut buf = [0u8; RAW_SECTOR_SIZE];
        disc.read_sector(1, &mut buf).unwrap();
        assert_eq!(buf[0], 0xAB);
    }
}
