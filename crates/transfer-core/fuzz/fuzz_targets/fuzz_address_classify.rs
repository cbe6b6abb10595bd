//! Fuzz test for address classification
//!
//! Classification must be total and agree with the transfer kind resolver

#![no_main]

use libfuzzer_sys::fuzz_target;
use nam_transfer_core::{classify, Address, TransferKind};

fuzz_target!(|data: (&str, &str)| {
    let (source, target) = data;
    let kind = TransferKind::for_addresses(&Address::new(source), &Address::new(target));
    assert_eq!(kind.source(), classify(source));
    assert_eq!(kind.destination(), classify(target));
});
