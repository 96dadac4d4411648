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

use crate::error::Error;
use crate::error::ErrorKind;
use crate::hash;

/// A Count-Min sketch for point frequency queries over a stream of keyed
/// increments.
///
/// The sketch keeps a `depth x width` matrix of counters. Each update
/// increments one counter per row; each estimate takes the minimum counter
/// over the same cells. The per-row column is
///
/// ```text
/// column_r = (a + b * r) mod width
/// ```
///
/// where `(a, b)` are the first two base hash values of the key and `r` is
/// the row index. The row index itself is the multiplier here: each row
/// acts as one independent hash function, which is what gives the sketch
/// its one-sided error bound. This deliberately differs from the
/// Bloom filter's four-value derived-index scheme.
///
/// # Examples
///
/// ```
/// use probstruct::countmin::CountMinSketch;
///
/// let mut sketch = CountMinSketch::new(7, 2000).unwrap();
/// sketch.update(b"test", 1);
/// assert_eq!(sketch.estimate(b"test"), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CountMinSketch {
    /// Number of hash rows (d)
    depth: u32,
    /// Number of counters per row (w)
    width: u32,
    /// Sum of all update weights, for error-bound bookkeeping
    total_weight: u64,
    /// Row-major depth x width counter matrix
    counters: Vec<u64>,
}

impl CountMinSketch {
    /// Creates a sketch with explicit dimensions.
    ///
    /// Larger `width` lowers the overcount per query; larger `depth`
    /// lowers the probability of exceeding it. Both are fixed for the
    /// lifetime of the sketch.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] if either dimension is 0, or
    /// if `depth * width` counters cannot be addressed.
    ///
    /// # Examples
    ///
    /// ```
    /// use probstruct::countmin::CountMinSketch;
    ///
    /// let sketch = CountMinSketch::new(7, 2000).unwrap();
    /// assert_eq!(sketch.depth(), 7);
    /// assert_eq!(sketch.width(), 2000);
    ///
    /// assert!(CountMinSketch::new(0, 2000).is_err());
    /// assert!(CountMinSketch::new(7, 0).is_err());
    /// ```
    pub fn new(depth: u32, width: u32) -> Result<CountMinSketch, Error> {
        if depth == 0 {
            return Err(Error::new(
                ErrorKind::ConfigInvalid,
                "depth must be greater than 0",
            ));
        }
        if width == 0 {
            return Err(Error::new(
                ErrorKind::ConfigInvalid,
                "width must be greater than 0",
            ));
        }

        let size = (depth as usize).checked_mul(width as usize).ok_or_else(|| {
            Error::new(ErrorKind::ConfigInvalid, "counter matrix size overflows")
                .with_context("depth", depth)
                .with_context("width", width)
        })?;

        Ok(CountMinSketch {
            depth,
            width,
            total_weight: 0,
            counters: vec![0u64; size],
        })
    }

    /// Creates a sketch sized from accuracy parameters.
    ///
    /// Derives the dimensions as
    ///
    /// ```text
    /// width = ceil(2 / epsilon)
    /// depth = ceil(ln(1 - delta) / ln(0.5))
    /// ```
    ///
    /// so that estimates overcount by at most `epsilon * total weight`
    /// with probability at least `delta`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] if `epsilon` or `delta` is
    /// not in the exclusive range `(0, 1)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use probstruct::countmin::CountMinSketch;
    ///
    /// let sketch = CountMinSketch::with_error_bounds(0.0001, 0.9999).unwrap();
    /// assert_eq!(sketch.width(), 20000);
    /// assert_eq!(sketch.depth(), 14);
    /// ```
    pub fn with_error_bounds(epsilon: f64, delta: f64) -> Result<CountMinSketch, Error> {
        if !(0.0 < epsilon && epsilon < 1.0) {
            return Err(Error::new(
                ErrorKind::ConfigInvalid,
                "epsilon must be in the exclusive range (0, 1)",
            )
            .with_context("epsilon", epsilon));
        }
        if !(0.0 < delta && delta < 1.0) {
            return Err(Error::new(
                ErrorKind::ConfigInvalid,
                "delta must be in the exclusive range (0, 1)",
            )
            .with_context("delta", delta));
        }

        let width = (2.0 / epsilon).ceil() as u32;
        let depth = ((1.0 - delta).ln() / 0.5f64.ln()).ceil() as u32;
        Self::new(depth.max(1), width)
    }

    // ========================================================================
    // Update and Query Operations
    // ========================================================================

    /// Adds `count` occurrences of `key`.
    ///
    /// A `count` of 0 is a no-op on every counter. Counters saturate
    /// instead of wrapping, so an estimate can never fall below the true
    /// frequency through overflow. Infallible.
    ///
    /// # Examples
    ///
    /// ```
    /// # use probstruct::countmin::CountMinSketch;
    /// let mut sketch = CountMinSketch::new(5, 1000).unwrap();
    /// sketch.update(b"apple", 5);
    /// sketch.update(b"apple", 2);
    /// assert!(sketch.estimate(b"apple") >= 7);
    /// ```
    pub fn update(&mut self, key: &[u8], count: u64) {
        let hashes = hash::base_hashes(key);
        for row in 0..self.depth {
            let index = self.counter_index(&hashes, row);
            self.counters[index] = self.counters[index].saturating_add(count);
        }
        self.total_weight = self.total_weight.saturating_add(count);
    }

    /// Estimates the frequency of `key` (point query).
    ///
    /// The result is always at least the true frequency of the key;
    /// collisions with other keys can only add extra mass.
    ///
    /// # Examples
    ///
    /// ```
    /// # use probstruct::countmin::CountMinSketch;
    /// let sketch = CountMinSketch::new(5, 1000).unwrap();
    /// assert_eq!(sketch.estimate(b"never-seen"), 0);
    /// ```
    pub fn estimate(&self, key: &[u8]) -> u64 {
        let hashes = hash::base_hashes(key);
        (0..self.depth)
            .map(|row| self.counters[self.counter_index(&hashes, row)])
            .min()
            .unwrap_or(0)
    }

    // ========================================================================
    // Statistics and Properties
    // ========================================================================

    /// Returns whether the sketch has received any weight.
    pub fn is_empty(&self) -> bool {
        self.total_weight == 0
    }

    /// Returns the number of hash rows.
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Returns the number of counters per row.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the sum of all update weights.
    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    /// Returns the epsilon implied by the sketch width.
    ///
    /// Any estimate exceeds the true frequency by at most
    /// `relative_error() * total_weight()` with the configured confidence.
    pub fn relative_error(&self) -> f64 {
        2.0 / self.width as f64
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    /// Flat index of the counter for `row`.
    ///
    /// Only the first 128-bit hash pair is used; every row reuses `(a, b)`
    /// with the row index as the multiplier.
    fn counter_index(&self, hashes: &[u64; 4], row: u32) -> usize {
        let (a, b) = (hashes[0], hashes[1]);
        let column = a.wrapping_add(b.wrapping_mul(u64::from(row))) % u64::from(self.width);
        self.width as usize * row as usize + column as usize
    }
}

// ============================================================================
// Tests
// ============================================================================
