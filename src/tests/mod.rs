//! Driver-level tests against the simulated EIP76D.

mod concurrency_tests;

use std::vec::Vec;

use crate::drivers::eip76d::sim::SimulatedEip76d;

/// The first `len` bytes the simulated device produces when nothing is scripted
fn expected_stream(len: usize) -> Vec<u8> {
    (0..)
        .flat_map(|seq| SimulatedEip76d::generated_word(seq))
        .flat_map(u32::to_le_bytes)
        .take(len)
        .collect()
}

fn refills_for(bytes: usize) -> usize {
    (bytes + 15) / 16
}
