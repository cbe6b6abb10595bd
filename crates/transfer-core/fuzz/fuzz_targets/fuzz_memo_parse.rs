//! Fuzz test for memo parsing
//!
//! Ensures memo validation handles arbitrary input gracefully

#![no_main]

use libfuzzer_sys::fuzz_target;
use nam_transfer_core::memo::{Memo, MAX_MEMO_LENGTH};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(Some(memo)) = Memo::from_text(s) {
            assert!(memo.byte_len() <= MAX_MEMO_LENGTH);
        }
    }
});
