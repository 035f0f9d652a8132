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

//! GPU command (GP0 display list) decoder
//!
//! This classifies and decodes the command word that opens a GP0 packet; it
//! does not rasterize anything. Parameter words that follow are appended with
//! [`GpuCommand::add_param`] until [`GpuCommand::expected_params`] is
//! reached.

use serde::{Deserialize, Serialize};

/// Fixed-capacity parameter buffer backing a single in-flight command.
///
/// Mirrors real GP0 FIFO behavior: once 32 words have queued, further
/// parameters for an over-long command are silently dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpuParamArray {
    data: Vec<u32>,
}

impl GpuParamArray {
    pub const CAPACITY: usize = 32;

    pub fn new() -> Self {
        Self {
            data: Vec::with_capacity(Self::CAPACITY),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.data
    }

    pub fn add(&mut self, param: u32) {
        if self.data.len() >= Self::CAPACITY {
            log::warn!("GpuCommand: parameter buffer full, dropping 0x{:08X}", param);
            return;
        }
        self.data.push(param);
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }
}

impl Default for GpuParamArray {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GpuCommandType {
    None,
    Nop,
    DrawPolygon,
    DrawLine,
    DrawRectangle,
    VramVramCopy,
    CpuVramCopy,
    VramCpuCopy,
    Env,
    ClearCache,
    QuickRectFill,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RectSize {
    Variable,
    Size1x1,
    Size8x8,
    Size16x16,
}

/// Decoded command-word flags, valid for the family named by
/// [`GpuCommand::command_type`]. Fields unrelated to the current family are
/// left at their default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GpuCommandFlags {
    pub shaded: bool,
    pub textured: bool,
    pub nb_vertices: u8,
    pub semi_transparent: bool,
    pub raw_texture: bool,
    pub polyline: bool,
    pub rect_flag: Option<RectSize>,
}

pub struct GpuCommand {
    command_type: GpuCommandType,
    flags: GpuCommandFlags,
    params: GpuParamArray,
    /// Expected parameter count; -1 means "unbounded" (polyline).
    expected: i32,
}

impl GpuCommand {
    pub fn new() -> Self {
        Self {
            command_type: GpuCommandType::None,
            flags: GpuCommandFlags::default(),
            params: GpuParamArray::new(),
            expected: 0,
        }
    }

    pub fn command_type(&self) -> GpuCommandType {
        self.command_type
    }

    pub fn flags(&self) -> GpuCommandFlags {
        self.flags
    }

    pub fn params(&self) -> &[u32] {
        self.params.as_slice()
    }

    pub fn expected_params(&self) -> i32 {
        self.expected
    }

    pub fn reset(&mut self) {
        self.params.clear();
        self.command_type = GpuCommandType::None;
        self.expected = 0;
        self.flags = GpuCommandFlags::default();
    }

    pub fn add_param(&mut self, param: u32) {
        self.params.add(param);
    }

    /// Classify and decode a new command word, resetting prior state first.
    pub fn set(&mut self, word: u32) {
        self.reset();

        let top = word >> 29;
        if top != 0 {
            match top {
                1 => self.decode_polygon(word),
                2 => self.decode_line(word),
                3 => self.decode_rectangle(word),
                4 => {
                    self.command_type = GpuCommandType::VramVramCopy;
                    self.expected = 3;
                }
                5 => {
                    self.command_type = GpuCommandType::CpuVramCopy;
                    self.expected = 2;
                }
                6 => {
                    self.command_type = GpuCommandType::VramCpuCopy;
                    self.expected = 0;
                }
                7 => {
                    self.command_type = GpuCommandType::Env;
                    self.expected = 0;
                }
                _ => unreachable!("top is a 3-bit value already matched above"),
            }
            return;
        }

        match (word >> 24) & 0xFF {
            0x00 => {
                self.command_type = GpuCommandType::Nop;
                self.expected = 0;
            }
            0x01 => {
                self.command_type = GpuCommandType::ClearCache;
                self.expected = 0;
            }
            0x02 => {
                self.command_type = GpuCommandType::QuickRectFill;
                self.expected = 3;
                self.params.add(word & 0x00FF_FFFF);
            }
            other => {
                log::warn!("GpuCommand: unknown misc command top byte 0x{:02X}", other);
                self.command_type = GpuCommandType::None;
                self.expected = 0;
            }
        }
    }

    fn decode_polygon(&mut self, word: u32) {
        let shaded = bit(word, 28);
        let nb_vertices = 3 + bit(word, 27) as u8;
        let textured = bit(word, 26);
        let semi_transparent = bit(word, 25);
        let raw_texture = bit(word, 24);

        self.flags = GpuCommandFlags {
            shaded,
            textured,
            nb_vertices,
            semi_transparent,
            raw_texture,
            ..Default::default()
        };
        self.command_type = GpuCommandType::DrawPolygon;

        let shaded_n = shaded as i32;
        let textured_n = textured as i32;
        self.expected =
            nb_vertices as i32 * (1 + shaded_n + textured_n) - shaded_n + 1;
        self.params.add(word & 0x00FF_FFFF);
    }

    fn decode_line(&mut self, word: u32) {
        let shaded = bit(word, 28);
        let semi_transparent = bit(word, 25);
        let polyline = bit(word, 24);

        self.flags = GpuCommandFlags {
            shaded,
            semi_transparent,
            polyline,
            ..Default::default()
        };
        self.command_type = GpuCommandType::DrawLine;

        self.expected = if polyline {
            -1
        } else if shaded {
            4
        } else {
            3
        };
        self.params.add(word & 0x00FF_FFFF);
    }

    fn decode_rectangle(&mut self, word: u32) {
        let rect_flag = match (word >> 27) & 3 {
            0 => RectSize::Variable,
            1 => RectSize::Size1x1,
            2 => RectSize::Size8x8,
            3 => RectSize::Size16x16,
            _ => unreachable!("masked to 2 bits"),
        };
        let textured = bit(word, 26);
        let semi_transparent = bit(word, 25);
        let raw_texture = bit(word, 24);

        self.flags = GpuCommandFlags {
            textured,
            semi_transparent,
            raw_texture,
            rect_flag: Some(rect_flag),
            ..Default::default()
        };
        self.command_type = GpuCommandType::DrawRectangle;

        let is_variable = matches!(rect_flag, RectSize::Variable) as i32;
        self.expected = 2 + is_variable + textured as i32;
        self.params.add(word & 0x00FF_FFFF);
    }
}

impl Default for GpuCommand {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
fn bit(word: u32, index: u32) -> bool {
    (word >> index) & 1 != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nop() {
        let mut cmd = GpuCommand::new();
        cmd.set(0x0000_0000);
        assert_eq!(cmd.command_type(), GpuCommandType::Nop);
        assert_eq!(cmd.expected_params(), 0);
    }

    #[test]
    fn clear_cache() {
        let mut cmd = GpuCommand::new();
        cmd.set(0x0100_0000);
        assert_eq!(cmd.command_type(), GpuCommandType::ClearCache);
        assert_eq!(cmd.expected_params(), 0);
    }

    #[test]
    fn quick_rect_fill() {
        let mut cmd = GpuCommand::new();
        cmd.set(0x02AA_BBCC);
        assert_eq!(cmd.command_type(), GpuCommandType::QuickRectFill);
        assert_eq!(cmd.expected_params(), 3);
        assert_eq!(cmd.params()[0], 0x00AA_BBCC);
    }

    #[test]
    fn draw_polygon_3_flat_untextured() {
        let mut cmd = GpuCommand::new();
        cmd.set(0x2011_2233);
        assert_eq!(cmd.command_type(), GpuCommandType::DrawPolygon);
        assert_eq!(cmd.flags().nb_vertices, 3);
        assert!(!cmd.flags().shaded);
        assert!(!cmd.flags().textured);
        assert_eq!(cmd.expected_params(), 4);
        assert_eq!(cmd.params()[0], 0x0011_2233);
    }

    #[test]
    fn draw_polygon_shaded() {
        let mut cmd = GpuCommand::new();
        cmd.set(0x30AA_BBCC);
        assert_eq!(cmd.command_type(), GpuCommandType::DrawPolygon);
        assert!(cmd.flags().shaded);
        assert_eq!(cmd.expected_params(), 6);
    }

    #[test]
    fn draw_polygon_textured() {
        let mut cmd = GpuCommand::new();
        cmd.set(0x24FF_FFFF);
        assert!(cmd.flags().textured);
        assert_eq!(cmd.expected_params(), 7);
    }

    #[test]
    fn draw_polygon_4_vertices() {
        let mut cmd = GpuCommand::new();
        cmd.set(0x2800_0000);
        assert_eq!(cmd.flags().nb_vertices, 4);
        assert_eq!(cmd.expected_params(), 5);
    }

    #[test]
    fn draw_polygon_4_vertex_shaded_textured() {
        let mut cmd = GpuCommand::new();
        cmd.set(0x3C00_0000);
        assert_eq!(cmd.flags().nb_vertices, 4);
        assert!(cmd.flags().shaded);
        assert!(cmd.flags().textured);
        assert_eq!(cmd.expected_params(), 12);
    }

    #[test]
    fn draw_line_flat() {
        let mut cmd = GpuCommand::new();
        cmd.set(0x4000_0000);
        assert_eq!(cmd.command_type(), GpuCommandType::DrawLine);
        assert_eq!(cmd.expected_params(), 3);
    }

    #[test]
    fn draw_line_shaded() {
        let mut cmd = GpuCommand::new();
        cmd.set(0x5000_0000);
        assert_eq!(cmd.expected_params(), 4);
    }

    #[test]
    fn draw_line_polyline_is_unbounded() {
        let mut cmd = GpuCommand::new();
        cmd.set(0x4100_0000);
        assert!(cmd.flags().polyline);
        assert_eq!(cmd.expected_params(), -1);
    }

    #[test]
    fn draw_rectangle_variable() {
        let mut cmd = GpuCommand::new();
        cmd.set(0x6000_0000);
        assert_eq!(cmd.command_type(), GpuCommandType::DrawRectangle);
        assert_eq!(cmd.expected_params(), 3);
    }

    #[test]
    fn draw_rectangle_fixed_sizes() {
        for word in [0x6800_0000u32, 0x7000_0000, 0x7800_0000] {
            let mut cmd = GpuCommand::new();
            cmd.set(word);
            assert_eq!(cmd.expected_params(), 2);
        }
    }

    #[test]
    fn draw_rectangle_variable_textured() {
        let mut cmd = GpuCommand::new();
        cmd.set(0x6400_0000);
        assert_eq!(cmd.expected_params(), 4);
    }

    #[test]
    fn draw_rectangle_8x8_textured() {
        let mut cmd = GpuCommand::new();
        cmd.set(0x7400_0000);
        assert_eq!(cmd.expected_params(), 3);
    }

    #[test]
    fn vram_vram_copy() {
        let mut cmd = GpuCommand::new();
        cmd.set(0x8000_0000);
        assert_eq!(cmd.command_type(), GpuCommandType::VramVramCopy);
        assert_eq!(cmd.expected_params(), 3);
    }

    #[test]
    fn cpu_vram_copy() {
        let mut cmd = GpuCommand::new();
        cmd.set(0xA000_0000);
        assert_eq!(cmd.command_type(), GpuCommandType::CpuVramCopy);
        assert_eq!(cmd.expected_params(), 2);
    }

    #[test]
    fn vram_cpu_copy_and_env_default_to_zero_expected() {
        let mut cmd = GpuCommand::new();
        cmd.set(0xC000_0000);
        assert_eq!(cmd.command_type(), GpuCommandType::VramCpuCopy);
        assert_eq!(cmd.expected_params(), 0);

        cmd.set(0xE000_0000);
        assert_eq!(cmd.command_type(), GpuCommandType::Env);
        assert_eq!(cmd.expected_params(), 0);
    }

    #[test]
    fn unknown_misc_command_yields_none() {
        let mut cmd = GpuCommand::new();
        cmd.set(0x0A00_0000);
        assert_eq!(cmd.command_type(), GpuCommandType::None);
    }

    #[test]
    fn param_buffer_drops_beyond_capacity() {
        let mut params = GpuParamArray::new();
        for i in 0..40 {
            params.add(i);
        }
        assert_eq!(params.len(), GpuParamArray::CAPACITY);
    }

    #[test]
    fn reset_clears_everything() {
        let mut cmd = GpuCommand::new();
        cmd.set(0x2011_2233);
        cmd.add_param(0xDEAD_BEEF);
        cmd.reset();
        assert_eq!(cmd.command_type(), GpuCommandType::None);
        assert_eq!(cmd.expected_params(), 0);
        assert!(cmd.params().is_empty());
    }
}
