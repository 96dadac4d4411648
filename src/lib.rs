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

//! Probabilistic membership and frequency data structures.
//!
//! This crate provides two sketches built on a shared double-hashing core:
//!
//! - [`bloom::BloomFilter`]: approximate set membership with no false
//!   negatives and a tunable false-positive rate.
//! - [`countmin::CountMinSketch`]: approximate frequency counts over a
//!   stream of keyed increments; estimates never undercount.
//!
//! Both structures derive all of their array positions from one 128-bit
//! MurmurHash3 pass over the input plus one over the sentinel-extended
//! input, expanded via the Kirsch-Mitzenmacher technique (see [`hash`]),
//! so update and query cost stays flat as the number of hash functions
//! grows.
//!
//! # Quick Start
//!
//! ```rust
//! use probstruct::bloom::BloomFilter;
//! use probstruct::countmin::CountMinSketch;
//!
//! let mut filter = BloomFilter::new(1000, 0.001).unwrap();
//! filter.add(b"test");
//! assert!(filter.may_contain(b"test"));
//!
//! let mut sketch = CountMinSketch::new(7, 2000).unwrap();
//! sketch.update(b"test", 1);
//! assert_eq!(sketch.estimate(b"test"), 1);
//! ```
//!
//! # Concurrency
//!
//! Neither structure synchronizes internally. Callers that share a
//! structure across threads must serialize mutation externally; concurrent
//! reads are safe only while no writer is active.

pub mod bloom;
pub mod countmin;
pub mod error;
pub mod hash;

pub use crate::bloom::BloomFilter;
pub use crate::countmin::CountMinSketch;
pub use crate::error::Error;
pub use crate::error::ErrorKind;
