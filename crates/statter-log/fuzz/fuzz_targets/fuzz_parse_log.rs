// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Fuzz target for whole-log parsing

#![no_main]

use libfuzzer_sys::fuzz_target;

use statter_log::{LinePatterns, parse_log};

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let patterns = LinePatterns::new();
        let parsed = parse_log(&patterns, input);
        assert!(parsed.records.len() + parsed.malformed.len() <= parsed.lines_seen);
    }
});
