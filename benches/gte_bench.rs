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

//! GTE instruction throughput. The geometry engine is on the hot path of
//! every polygon the CPU feeds the GPU, so it's the one module in this crate
//! worth watching for regressions.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use psx_core::core::gte::{Gte, H, IR1, IR2, IR3, RT_0, VZ0};

fn bench_sqr(c: &mut Criterion) {
    let mut gte = Gte::new();
    gte.mtc(IR1, 1000);
    gte.mtc(IR2, 2000);
    gte.mtc(IR3, 3000);

    c.bench_function("gte_sqr", |b| {
        b.iter(|| {
            gte.execute(black_box(0x28));
        })
    });
}

fn bench_rtps(c: &mut Criterion) {
    let mut gte = Gte::new();
    gte.ctc(RT_0 + 4, 4096);
    gte.ctc(H, 256);
    gte.mtc(VZ0, 512);

    c.bench_function("gte_rtps", |b| {
        b.iter(|| {
            gte.execute(black_box(0x01));
        })
    });
}

fn bench_ncds(c: &mut Criterion) {
    let mut gte = Gte::new();
    gte.mtc(VZ0, 300);

    c.bench_function("gte_ncds", |b| {
        b.iter(|| {
            gte.execute(black_box(0x13));
        })
    });
}

criterion_group!(benches, bench_sqr, bench_rtps, bench_ncds);
criterion_main!(benches);
