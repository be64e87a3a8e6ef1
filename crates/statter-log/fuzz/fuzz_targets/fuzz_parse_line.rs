// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for single line classification
//!
//! Every line either yields a record, no match, or a malformed field error.
//! The parser must never panic, and a produced record must be consistent.

#![no_main]

use libfuzzer_sys::fuzz_target;

use statter_log::LinePatterns;

fuzz_target!(|data: &[u8]| {
    if let Ok(line) = std::str::from_utf8(data) {
        let patterns = LinePatterns::new();
        if let Ok(Some(record)) = patterns.parse_line(line) {
            assert!(record.name.starts_with("//"));
            assert!(record.successes <= record.attempts);
        }
    }
});
