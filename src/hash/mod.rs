// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Hash derivation shared by both sketch families.
//!
//! Each structure needs many well-distributed array positions per input,
//! but computing one full hash per position dominates update cost once the
//! number of hash functions grows. Instead, a MurmurHash3 x64 128-bit
//! pass over the input yields two base values, a second pass over the
//! sentinel-extended input yields two more, and the Kirsch-Mitzenmacher
//! technique expands the four base values into any number of derived
//! locations:
//!
//! ```text
//! g_k(x) = h_pair(x) + k * h_mult(x)
//! ```
//!
//! See <https://www.eecs.harvard.edu/~michaelm/postscripts/tr-02-05.pdf>.
//!
//! These are free functions over byte slices. No hasher state is shared
//! between calls, so derivation is safe to invoke from any context the
//! caller already synchronizes.

/// Seed for all MurmurHash3 computations.
pub const DEFAULT_SEED: u32 = 0;

/// Byte appended to the input to decorrelate the second 128-bit hash from
/// the first.
const SENTINEL: u8 = 1;

/// Computes the four 64-bit base hash values for `data`.
///
/// The first pair `(h1, h2)` is the 128-bit MurmurHash3 of `data`. The
/// second pair `(h3, h4)` is the 128-bit hash of `data` extended by one
/// [`SENTINEL`] byte, which matches finalizing a running murmur state
/// after writing the sentinel. Total over any input, including the empty
/// slice, and stable across calls.
pub fn base_hashes(data: &[u8]) -> [u64; 4] {
    let (h1, h2) = mur3::murmurhash3_x64_128(data, DEFAULT_SEED);

    let mut extended = Vec::with_capacity(data.len() + 1);
    extended.extend_from_slice(data);
    extended.push(SENTINEL);
    let (h3, h4) = mur3::murmurhash3_x64_128(&extended, DEFAULT_SEED);

    [h1, h2, h3, h4]
}

/// Derives the `k`-th location from the four base hash values.
///
/// The additive base alternates between `h1` and `h2` as `k` steps, and the
/// multiplier alternates pairwise between `h3` and `h4`, so consecutive
/// derived locations never reuse the same `(base, multiplier)` pair.
/// Arithmetic wraps; the result is an unreduced 64-bit location that the
/// caller reduces modulo its own array dimension.
pub fn location_for_k(hashes: &[u64; 4], k: u64) -> u64 {
    let pair = (k % 2) as usize;
    let slot = (2 + (k.wrapping_add(k % 2) % 4) / 2) as usize;
    hashes[pair].wrapping_add(k.wrapping_mul(hashes[slot]))
}
