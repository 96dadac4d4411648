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

use googletest::assert_that;
use googletest::prelude::contains_substring;
use probstruct::bloom::BloomFilter;
use rand::Rng;
use rand::SeedableRng;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;

fn random_string(rng: &mut StdRng, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

#[test]
fn test_no_false_negatives() {
    let mut filter = BloomFilter::new(10_000, 0.01).unwrap();

    for i in 0..10_000u32 {
        filter.add(format!("element-{i}").as_bytes());
    }

    for i in 0..10_000u32 {
        assert!(
            filter.may_contain(format!("element-{i}").as_bytes()),
            "false negative for element-{i}"
        );
    }
}

#[test]
fn test_added_element_found() {
    let mut filter = BloomFilter::new(1000, 0.001).unwrap();
    filter.add(b"test");
    assert!(filter.may_contain(b"test"));
}

#[test]
fn test_fresh_filter_gives_no_false_positives() {
    let filter = BloomFilter::new(1000, 0.001).unwrap();
    assert!(!filter.may_contain(b"test"));
    assert!(!filter.may_contain(b"definitely-not-inserted-unique-string"));
}

#[test]
fn test_false_positive_rate_within_tolerance() {
    let capacity = 1000;
    let error_rate = 0.01;
    let mut filter = BloomFilter::new(capacity, error_rate).unwrap();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    // Fill to design capacity with random members.
    for _ in 0..capacity {
        let member = format!("in:{}", random_string(&mut rng, 16));
        filter.add(member.as_bytes());
    }

    // Probe fresh elements that can never collide with the "in:" namespace.
    let probes = 20_000u32;
    let mut false_positives = 0u32;
    for i in 0..probes {
        if filter.may_contain(format!("out:{i}").as_bytes()) {
            false_positives += 1;
        }
    }

    let observed = f64::from(false_positives) / f64::from(probes);
    assert!(
        observed <= 10.0 * error_rate,
        "observed false-positive rate {observed} exceeds 10x target {error_rate}"
    );
    // At design capacity the filter should occasionally report positives.
    assert!(false_positives > 0, "saw no false positives at all");
}

#[test]
fn test_idempotence_survives_interleaved_adds() {
    let mut once = BloomFilter::new(500, 0.01).unwrap();
    let mut twice = BloomFilter::new(500, 0.01).unwrap();

    for i in 0..100u32 {
        let element = format!("e-{i}");
        once.add(element.as_bytes());
        twice.add(element.as_bytes());
        twice.add(element.as_bytes());
    }

    assert_eq!(once, twice);
}

#[test]
fn test_invalid_capacity_message() {
    let err = BloomFilter::new(0, 0.01).unwrap_err();
    assert_that!(err.message(), contains_substring("capacity"));
}

#[test]
fn test_invalid_error_rate_message() {
    let err = BloomFilter::new(1000, 1.0).unwrap_err();
    assert_that!(err.message(), contains_substring("error_rate"));
    assert_that!(format!("{err}").as_str(), contains_substring("ConfigInvalid"));
}
