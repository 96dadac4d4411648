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

//! Bloom filter implementation for probabilistic set membership.
//!
//! A Bloom filter answers "was this element added?" with no false
//! negatives and a false-positive probability that approaches the
//! configured `error_rate` once the filter holds its design `capacity`.
//!
//! # Usage
//!
//! ```rust
//! use probstruct::bloom::BloomFilter;
//!
//! let mut filter = BloomFilter::new(1000, 0.001).unwrap();
//!
//! filter.add(b"alice");
//! filter.add(b"bob");
//!
//! assert!(filter.may_contain(b"alice"));
//! assert!(!filter.may_contain(b"mallory"));
//! ```

mod sketch;
pub use self::sketch::BloomFilter;
