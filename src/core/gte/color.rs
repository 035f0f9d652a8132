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

//! Color pipeline instructions: lighting, depth-cueing, and the general
//! interpolation opcodes.
//!
//! These follow the standard documented GTE pseudocode: light an input
//! normal with the light-matrix (LLM), add the background color via the
//! light-color matrix (LCM), optionally depth-cue toward the far color (FC)
//! using IR0 as the interpolation factor, and push the result through the
//! RGB FIFO saturated to `[0, 255]` per channel. Being a child module of
//! `gte`, `Gte`'s private fields and helpers are visible here directly.

use super::{
    dot, flags, Gte, BBK, BFC, GBK, GFC, IR0, IR1, IR2, IR3, MAC1, MAC2, MAC3, RBK, RFC, RGBC,
};

/// Fixed-point fractional bits used by BK/FC and color channels (4.12).
const FC_SHIFT: i64 = 12;

fn shift_amount(sf: bool) -> i64 {
    if sf {
        12
    } else {
        0
    }
}

fn current_rgbc(gte: &Gte) -> ([u8; 3], u8) {
    let packed = gte.mfc(RGBC) as u32;
    (
        [
            (packed & 0xFF) as u8,
            ((packed >> 8) & 0xFF) as u8,
            ((packed >> 16) & 0xFF) as u8,
        ],
        ((packed >> 24) & 0xFF) as u8,
    )
}

/// Normal-color transform: MAC = LLM * normal, IR = saturate(MAC).
fn light_normal(gte: &mut Gte, normal: [i32; 3], sf: bool, lm: bool) -> [i32; 3] {
    let matrix = gte
        .read_matrix(1)
        .expect("light matrix selector is always valid");
    let shift = shift_amount(sf);
    let mac1 = gte.set_mac(1, dot(matrix[0], normal) >> shift);
    let mac2 = gte.set_mac(2, dot(matrix[1], normal) >> shift);
    let mac3 = gte.set_mac(3, dot(matrix[2], normal) >> shift);
    [
        gte.set_ir(1, mac1 as i64, lm),
        gte.set_ir(2, mac2 as i64, lm),
        gte.set_ir(3, mac3 as i64, lm),
    ]
}

/// Apply the light-color matrix and background color to a lit vector:
/// MAC = LCM * ir + BK, IR = saturate(MAC).
fn apply_color_matrix(gte: &mut Gte, ir: [i32; 3], sf: bool, lm: bool) -> [i32; 3] {
    let matrix = gte
        .read_matrix(2)
        .expect("color matrix selector is always valid");
    let bk = [
        gte.control[RBK] as i64,
        gte.control[GBK] as i64,
        gte.control[BBK] as i64,
    ];
    let shift = shift_amount(sf);
    let mac1 = gte.set_mac(1, ((bk[0] << 12) + dot(matrix[0], ir)) >> shift);
    let mac2 = gte.set_mac(2, ((bk[1] << 12) + dot(matrix[1], ir)) >> shift);
    let mac3 = gte.set_mac(3, ((bk[2] << 12) + dot(matrix[2], ir)) >> shift);
    [
        gte.set_ir(1, mac1 as i64, lm),
        gte.set_ir(2, mac2 as i64, lm),
        gte.set_ir(3, mac3 as i64, lm),
    ]
}

/// Depth-cue a color toward FC using IR0: MAC = color*4096 + (FC*4096 -
/// color*4096) * IR0 / 4096, then IR = MAC >> 12 saturated.
fn depth_cue(gte: &mut Gte, color: [i64; 3], sf: bool, lm: bool) -> [i32; 3] {
    let fc = [
        gte.control[RFC] as i64,
        gte.control[GFC] as i64,
        gte.control[BFC] as i64,
    ];
    let ir0 = gte.data[IR0] as i64;
    let shift = shift_amount(sf);

    let mut out = [0i32; 3];
    for i in 0..3 {
        let base = color[i] << FC_SHIFT;
        let delta = (fc[i] << FC_SHIFT) - base;
        let mac = gte.set_mac((i + 1) as u8, (base + ((delta * ir0) >> FC_SHIFT)) >> shift);
        out[i] = gte.set_ir((i + 1) as u8, mac as i64, lm);
    }
    out
}

fn push_color_from_ir(gte: &mut Gte, ir: [i32; 3], code: u8) {
    let r = gte.saturate_color(ir[0] as i64 >> FC_SHIFT, flags::COLOR_R_SATURATED);
    let g = gte.saturate_color(ir[1] as i64 >> FC_SHIFT, flags::COLOR_G_SATURATED);
    let b = gte.saturate_color(ir[2] as i64 >> FC_SHIFT, flags::COLOR_B_SATURATED);
    gte.push_rgb(r, g, b, code);
}

/// NCS: light `normal`, colorize via LCM/BK, push RGB. No depth-cue.
fn ncs_single(gte: &mut Gte, normal: [i32; 3], sf: bool, lm: bool) {
    let lit = light_normal(gte, normal, sf, lm);
    let colorized = apply_color_matrix(gte, lit, sf, lm);
    let (_, code) = current_rgbc(gte);
    push_color_from_ir(gte, colorized, code);
}

pub fn ncs(gte: &mut Gte, vector_slot: u8, sf: bool, lm: bool) {
    let normal = gte.read_vector(vector_slot);
    ncs_single(gte, normal, sf, lm);
}

pub fn nct(gte: &mut Gte, sf: bool, lm: bool) {
    for slot in 0..3 {
        let normal = gte.read_vector(slot);
        ncs_single(gte, normal, sf, lm);
    }
}

/// NCDS: like NCS, then depth-cue the result toward FC.
fn ncds_single(gte: &mut Gte, normal: [i32; 3], sf: bool, lm: bool) {
    let lit = light_normal(gte, normal, sf, lm);
    let _colorized = apply_color_matrix(gte, lit, sf, lm);
    let (rgb, code) = current_rgbc(gte);
    let color = [rgb[0] as i64, rgb[1] as i64, rgb[2] as i64];
    let cued = depth_cue(gte, color, sf, lm);
    push_color_from_ir(gte, cued, code);
}

pub fn ncds(gte: &mut Gte, vector_slot: u8, sf: bool, lm: bool) {
    let normal = gte.read_vector(vector_slot);
    ncds_single(gte, normal, sf, lm);
}

pub fn ncdt(gte: &mut Gte, sf: bool, lm: bool) {
    for slot in 0..3 {
        let normal = gte.read_vector(slot);
        ncds_single(gte, normal, sf, lm);
    }
}

/// NCCS: light `normal`, then modulate the current RGBC by the lit
/// intensity instead of adding a background color.
fn nccs_single(gte: &mut Gte, normal: [i32; 3], sf: bool, lm: bool) {
    let lit = light_normal(gte, normal, sf, lm);
    let (rgb, code) = current_rgbc(gte);
    let shift = shift_amount(sf);
    let mut out = [0i32; 3];
    for i in 0..3 {
        let mac = gte.set_mac(
            (i + 1) as u8,
            (((rgb[i] as i64) << FC_SHIFT) * lit[i] as i64) >> (FC_SHIFT + shift),
        );
        out[i] = gte.set_ir((i + 1) as u8, mac as i64, lm);
    }
    push_color_from_ir(gte, out, code);
}

pub fn nccs(gte: &mut Gte, vector_slot: u8, sf: bool, lm: bool) {
    let normal = gte.read_vector(vector_slot);
    nccs_single(gte, normal, sf, lm);
}

pub fn ncct(gte: &mut Gte, sf: bool, lm: bool) {
    for slot in 0..3 {
        let normal = gte.read_vector(slot);
        nccs_single(gte, normal, sf, lm);
    }
}

/// CC: color * color, no lighting normal involved — modulates the current
/// IR vector (already holding a lit intensity from a prior instruction) by
/// RGBC and the background color.
pub fn cc(gte: &mut Gte, sf: bool, lm: bool) {
    let ir = [
        gte.data[IR1] as i64,
        gte.data[IR2] as i64,
        gte.data[IR3] as i64,
    ];
    let bk = [
        gte.control[RBK] as i64,
        gte.control[GBK] as i64,
        gte.control[BBK] as i64,
    ];
    let (rgb, code) = current_rgbc(gte);
    let shift = shift_amount(sf);
    let mut out = [0i32; 3];
    for i in 0..3 {
        let mac = gte.set_mac(
            (i + 1) as u8,
            ((bk[i] << 12) + (rgb[i] as i64) * ir[i]) >> shift,
        );
        out[i] = gte.set_ir((i + 1) as u8, mac as i64, lm);
    }
    push_color_from_ir(gte, out, code);
}

/// CDP: color depth-cue without a lighting normal — depth-cue the current
/// RGBC directly toward FC.
pub fn cdp(gte: &mut Gte, sf: bool, lm: bool) {
    let (rgb, code) = current_rgbc(gte);
    let color = [rgb[0] as i64, rgb[1] as i64, rgb[2] as i64];
    let cued = depth_cue(gte, color, sf, lm);
    push_color_from_ir(gte, cued, code);
}

/// DPCS: depth-cue a single RGBC value toward FC (identical recipe to CDP;
/// kept distinct since the two opcodes are encoded separately).
pub fn dpcs(gte: &mut Gte, sf: bool, lm: bool) {
    cdp(gte, sf, lm);
}

/// DPCT: DPCS applied three times (against the RGB FIFO contents).
pub fn dpct(gte: &mut Gte, sf: bool, lm: bool) {
    for _ in 0..3 {
        dpcs(gte, sf, lm);
    }
}

/// DCPL: depth-cue using RGBC together with the already-lit IR colors
/// (rather than re-deriving the base color from RGBC alone).
pub fn dcpl(gte: &mut Gte, sf: bool, lm: bool) {
    let ir = [
        gte.data[IR1] as i64,
        gte.data[IR2] as i64,
        gte.data[IR3] as i64,
    ];
    let (_, code) = current_rgbc(gte);
    let cued = depth_cue(gte, ir, sf, lm);
    push_color_from_ir(gte, cued, code);
}

/// INTPL: interpolate the current IR vector toward FC using IR0 — the same
/// recipe as depth-cueing, but starting from IR rather than RGBC.
pub fn intpl(gte: &mut Gte, sf: bool, lm: bool) {
    let ir = [
        gte.data[IR1] as i64,
        gte.data[IR2] as i64,
        gte.data[IR3] as i64,
    ];
    let (_, code) = current_rgbc(gte);
    let cued = depth_cue(gte, ir, sf, lm);
    push_color_from_ir(gte, cued, code);
}

/// GPF: general-purpose interpolation, IR * IR0 (no preload of MAC).
pub fn gpf(gte: &mut Gte, sf: bool, lm: bool) {
    let ir = [
        gte.data[IR1] as i64,
        gte.data[IR2] as i64,
        gte.data[IR3] as i64,
    ];
    let ir0 = gte.data[IR0] as i64;
    let (_, code) = current_rgbc(gte);
    let shift = shift_amount(sf);
    let mut out = [0i32; 3];
    for i in 0..3 {
        let mac = gte.set_mac((i + 1) as u8, (ir[i] * ir0) >> shift);
        out[i] = gte.set_ir((i + 1) as u8, mac as i64, lm);
    }
    push_color_from_ir(gte, out, code);
}

/// GPL: GPF, but MAC is preloaded from the existing MAC1..3 registers
/// before adding the IR * IR0 product.
pub fn gpl(gte: &mut Gte, sf: bool, lm: bool) {
    let ir = [
        gte.data[IR1] as i64,
        gte.data[IR2] as i64,
        gte.data[IR3] as i64,
    ];
    let ir0 = gte.data[IR0] as i64;
    let preload = [
        gte.data[MAC1] as i64,
        gte.data[MAC2] as i64,
        gte.data[MAC3] as i64,
    ];
    let (_, code) = current_rgbc(gte);
    let shift = shift_amount(sf);
    let mut out = [0i32; 3];
    for i in 0..3 {
        let mac = gte.set_mac((i + 1) as u8, ((preload[i] << shift) + ir[i] * ir0) >> shift);
        out[i] = gte.set_ir((i + 1) as u8, mac as i64, lm);
    }
    push_color_from_ir(gte, out, code);
}
