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

/// A Bloom filter for probabilistic set membership testing.
///
/// Provides fast membership queries with:
/// - No false negatives (added elements always return `true`)
/// - Tunable false positive rate
/// - Constant space usage, sized once at construction
///
/// Sizing follows the standard optimum for `capacity` expected elements at
/// a target false-positive `error_rate`:
///
/// ```text
/// num_bits   = ceil(-capacity * ln(error_rate) / ln(2)^2)
/// num_hashes = ceil((num_bits / capacity) * ln(2))
/// ```
///
/// The `num_hashes` bit positions per element are derived from one
/// 128-bit hash pass via [`hash::location_for_k`].
///
/// # Examples
///
/// ```
/// use probstruct::bloom::BloomFilter;
///
/// let mut filter = BloomFilter::new(1000, 0.001).unwrap();
/// filter.add(b"test");
///
/// assert!(filter.may_contain(b"test"));
/// assert!(!filter.may_contain(b"never-added"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BloomFilter {
    /// Expected number of distinct elements (n)
    capacity: u64,
    /// Target false-positive probability at design capacity (p)
    error_rate: f64,
    /// Total number of bits in the filter (m)
    num_bits: u64,
    /// Number of hash functions (k)
    num_hashes: u32,
    /// Count of bits set to 1 (for statistics)
    num_bits_set: u64,
    /// Bit array packed into u64 words, length = ceil(num_bits / 64)
    bit_array: Vec<u64>,
}

impl BloomFilter {
    /// Creates a filter sized for `capacity` distinct elements at the
    /// target false-positive `error_rate`.
    ///
    /// The bit array is allocated eagerly and both derived sizes are
    /// computed once; neither changes for the lifetime of the filter.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::ConfigInvalid`] if `capacity` is 0 or
    /// `error_rate` is not in the exclusive range `(0, 1)`. Both derived
    /// sizes are clamped to at least 1, so a constructed filter is never
    /// degenerate.
    ///
    /// # Examples
    ///
    /// ```
    /// use probstruct::bloom::BloomFilter;
    ///
    /// let filter = BloomFilter::new(1000, 0.001).unwrap();
    /// assert_eq!(filter.num_bits(), 14378);
    /// assert_eq!(filter.num_hashes(), 10);
    ///
    /// assert!(BloomFilter::new(0, 0.001).is_err());
    /// assert!(BloomFilter::new(1000, 1.0).is_err());
    /// ```
    pub fn new(capacity: u64, error_rate: f64) -> Result<BloomFilter, Error> {
        if capacity == 0 {
            return Err(Error::new(
                ErrorKind::ConfigInvalid,
                "capacity must be greater than 0",
            ));
        }
        if !(0.0 < error_rate && error_rate < 1.0) {
            return Err(Error::new(
                ErrorKind::ConfigInvalid,
                "error_rate must be in the exclusive range (0, 1)",
            )
            .with_context("error_rate", error_rate));
        }

        let num_bits = Self::optimal_num_bits(capacity, error_rate);
        let num_hashes = Self::optimal_num_hashes(num_bits, capacity);
        let num_words = num_bits.div_ceil(64) as usize;

        Ok(BloomFilter {
            capacity,
            error_rate,
            num_bits,
            num_hashes,
            num_bits_set: 0,
            bit_array: vec![0u64; num_words],
        })
    }

    // ========================================================================
    // Update and Query Operations
    // ========================================================================

    /// Adds an element to the filter.
    ///
    /// After adding, `may_contain(element)` always returns `true`.
    /// Idempotent: adding the same element again leaves the bit array
    /// unchanged. Infallible.
    ///
    /// # Examples
    ///
    /// ```
    /// # use probstruct::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01).unwrap();
    /// filter.add(b"apple");
    /// assert!(filter.may_contain(b"apple"));
    /// ```
    pub fn add(&mut self, element: &[u8]) {
        let hashes = hash::base_hashes(element);
        for k in 0..u64::from(self.num_hashes) {
            let bit_index = hash::location_for_k(&hashes, k) % self.num_bits;
            self.set_bit(bit_index);
        }
    }

    /// Tests whether an element was possibly added.
    ///
    /// Returns:
    /// - `true`: element was **possibly** added (or is a false positive)
    /// - `false`: element was **definitely not** added
    ///
    /// # Examples
    ///
    /// ```
    /// # use probstruct::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 0.01).unwrap();
    /// filter.add(b"apple");
    ///
    /// assert!(filter.may_contain(b"apple"));
    /// assert!(!filter.may_contain(b"grape")); // never added (probably)
    /// ```
    pub fn may_contain(&self, element: &[u8]) -> bool {
        if self.is_empty() {
            return false;
        }

        let hashes = hash::base_hashes(element);
        for k in 0..u64::from(self.num_hashes) {
            let bit_index = hash::location_for_k(&hashes, k) % self.num_bits;
            if !self.get_bit(bit_index) {
                return false;
            }
        }
        true
    }

    // ========================================================================
    // Statistics and Properties
    // ========================================================================

    /// Returns whether the filter is empty (no elements added).
    pub fn is_empty(&self) -> bool {
        self.num_bits_set == 0
    }

    /// Returns the design capacity (expected distinct elements).
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Returns the target false-positive rate at design capacity.
    pub fn error_rate(&self) -> f64 {
        self.error_rate
    }

    /// Returns the total number of bits in the filter.
    pub fn num_bits(&self) -> u64 {
        self.num_bits
    }

    /// Returns the number of hash functions used.
    pub fn num_hashes(&self) -> u32 {
        self.num_hashes
    }

    /// Returns the number of bits set to 1.
    ///
    /// Useful for monitoring filter saturation.
    pub fn bits_used(&self) -> u64 {
        self.num_bits_set
    }

    /// Returns the current load factor (fraction of bits set).
    ///
    /// Values above 0.5 indicate degraded false-positive rates.
    pub fn load_factor(&self) -> f64 {
        self.num_bits_set as f64 / self.num_bits as f64
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    /// Optimal bit count: `m = ceil(-n * ln(p) / ln(2)^2)`, at least 1.
    fn optimal_num_bits(capacity: u64, error_rate: f64) -> u64 {
        let n = capacity as f64;
        let ln2_squared = std::f64::consts::LN_2 * std::f64::consts::LN_2;

        let bits = (-n * error_rate.ln() / ln2_squared).ceil() as u64;
        bits.max(1)
    }

    /// Optimal hash count: `k = ceil((m / n) * ln(2))`, at least 1.
    ///
    /// Computed in floating point; integer division here can truncate to
    /// zero hash functions for pathological `(capacity, error_rate)` pairs,
    /// which would make every query trivially true.
    fn optimal_num_hashes(num_bits: u64, capacity: u64) -> u32 {
        let m = num_bits as f64;
        let n = capacity as f64;

        let k = (m / n * std::f64::consts::LN_2).ceil() as u32;
        k.max(1)
    }

    /// Gets the value of a single bit.
    fn get_bit(&self, bit_index: u64) -> bool {
        let word_index = (bit_index / 64) as usize;
        let bit_offset = bit_index % 64;
        let mask = 1u64 << bit_offset;
        (self.bit_array[word_index] & mask) != 0
    }

    /// Sets a single bit and updates the count if it wasn't already set.
    fn set_bit(&mut self, bit_index: u64) {
        let word_index = (bit_index / 64) as usize;
        let bit_offset = bit_index % 64;
        let mask = 1u64 << bit_offset;

        if (self.bit_array[word_index] & mask) == 0 {
            self.bit_array[word_index] |= mask;
            self.num_bits_set += 1;
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sizing_formulas() {
        // m = ceil(1000 * 6.907755 / 0.480453) = 14378, k = ceil(m/n * ln2) = 10
        let filter = BloomFilter::new(1000, 0.001).unwrap();
        assert_eq!(filter.num_bits(), 14378);
        assert_eq!(filter.num_hashes(), 10);
        assert_eq!(filter.capacity(), 1000);
        assert_eq!(filter.error_rate(), 0.001);
    }

    #[test]
    fn test_high_error_rate_keeps_at_least_one_hash() {
        let filter = BloomFilter::new(1000, 0.99).unwrap();
        assert!(filter.num_bits() >= 1);
        assert_eq!(filter.num_hashes(), 1);
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = BloomFilter::new(0, 0.01).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    }

    #[test]
    fn test_error_rate_bounds_rejected() {
        for error_rate in [0.0, 1.0, -0.5, 1.5, f64::NAN] {
            let err = BloomFilter::new(1000, error_rate).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid, "{error_rate}");
        }
    }

    #[test]
    fn test_add_and_may_contain() {
        let mut filter = BloomFilter::new(100, 0.01).unwrap();

        assert!(!filter.may_contain(b"apple"));
        filter.add(b"apple");
        assert!(filter.may_contain(b"apple"));
        assert!(!filter.is_empty());
    }

    #[test]
    fn test_fresh_filter_is_deterministically_negative() {
        let filter = BloomFilter::new(1000, 0.001).unwrap();
        assert!(filter.is_empty());
        assert!(!filter.may_contain(b"test"));
        assert!(!filter.may_contain(b""));
    }

    #[test]
    fn test_add_is_idempotent_bit_for_bit() {
        let mut once = BloomFilter::new(100, 0.01).unwrap();
        let mut twice = BloomFilter::new(100, 0.01).unwrap();

        once.add(b"element");
        twice.add(b"element");
        twice.add(b"element");

        assert_eq!(once, twice);
        assert_eq!(once.bits_used(), twice.bits_used());
        assert!(twice.may_contain(b"element"));
    }

    #[test]
    fn test_unrelated_inserts_keep_members_positive() {
        let mut filter = BloomFilter::new(1000, 0.01).unwrap();
        filter.add(b"member");

        for i in 0..1000u32 {
            filter.add(format!("other-{i}").as_bytes());
            assert!(filter.may_contain(b"member"));
        }
    }

    #[test]
    fn test_empty_element_is_a_valid_key() {
        let mut filter = BloomFilter::new(100, 0.01).unwrap();
        filter.add(b"");
        assert!(filter.may_contain(b""));
    }

    #[test]
    fn test_statistics() {
        let mut filter = BloomFilter::new(1000, 0.01).unwrap();
        assert_eq!(filter.bits_used(), 0);
        assert_eq!(filter.load_factor(), 0.0);

        filter.add(b"test");
        assert!(filter.bits_used() > 0);
        assert!(filter.bits_used() <= u64::from(filter.num_hashes()));
        assert!(filter.load_factor() > 0.0);
    }
}
