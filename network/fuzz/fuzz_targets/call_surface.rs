// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fuzz the JSON call surface and signed record decoding
//! Arbitrary input must never panic, and every call answers with exactly
//! one of Ok or Err.

#![no_main]

use dots_core::MoveRecord;
use dots_network::{Conductor, ConductorConfig};
use libfuzzer_sys::fuzz_target;
use serde_json::Value;

const FUNCTIONS: [&str; 5] = ["create_game", "make_move", "get_state", "render_state", "valid_moves"];

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };

    // Signed records arrive as CBOR; a decoded one may still be forged
    if let Ok(record) = serde_cbor::from_slice::<MoveRecord>(rest) {
        let _ = record.verify();
    }

    let Ok(params) = serde_json::from_slice::<Value>(rest) else {
        return;
    };

    let Ok(conductor) = Conductor::new(ConductorConfig::default()) else {
        return;
    };
    let Some(alice) = conductor.agent("alice") else {
        return;
    };

    let function = FUNCTIONS[selector as usize % FUNCTIONS.len()];
    let response = alice.call(function, params);
    assert!(response.get("Ok").is_some() != response.get("Err").is_some());
});
