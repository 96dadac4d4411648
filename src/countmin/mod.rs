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

//! Count-Min sketch implementation for frequency estimation.
//!
//! The Count-Min sketch provides approximate frequency counts for streaming
//! data. Estimates never undercount; collisions can only add extra mass, so
//! the point query overcounts by at most `epsilon * total weight` with
//! probability at least `delta`.
//!
//! # Usage
//!
//! ```rust
//! use probstruct::countmin::CountMinSketch;
//!
//! let mut sketch = CountMinSketch::new(7, 2000).unwrap();
//!
//! sketch.update(b"apple", 5);
//! sketch.update(b"banana", 3);
//! sketch.update(b"apple", 2);
//!
//! assert!(sketch.estimate(b"apple") >= 7);
//! assert!(sketch.estimate(b"banana") >= 3);
//! ```
//!
//! # Sizing from error bounds
//!
//! ```rust
//! use probstruct::countmin::CountMinSketch;
//!
//! let sketch = CountMinSketch::with_error_bounds(0.001, 0.99).unwrap();
//! assert_eq!(sketch.width(), 2000);
//! assert_eq!(sketch.depth(), 7);
//! ```

mod sketch;
pub use self::sketch::CountMinSketch;
