//! Concurrent callers sharing one driver instance.

use std::thread;
use std::vec::Vec;

use super::{expected_stream, refills_for};
use crate::drivers::eip76d::sim::SimulatedEip76d;
use crate::{Trng, TrngConfig};

const CALLERS: usize = 4;
const REQUESTS: usize = 25;
const REQUEST_LEN: usize = 7;

fn sorted(mut bytes: Vec<u8>) -> Vec<u8> {
    bytes.sort_unstable();
    bytes
}

#[test]
fn test_concurrent_callers_account_for_every_byte() {
    let sim = SimulatedEip76d::with_latency(2);
    let trng = Trng::new(&sim, TrngConfig::default());
    let trng = &trng;

    let outputs: Vec<Vec<u8>> = thread::scope(|s| {
        let handles: Vec<_> = (0..CALLERS)
            .map(|_| {
                s.spawn(move || {
                    let mut mine = Vec::new();
                    for _ in 0..REQUESTS {
                        let mut buf = [0u8; REQUEST_LEN];
                        trng.get_random_bytes(&mut buf);
                        mine.extend_from_slice(&buf);
                    }
                    mine
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let total = CALLERS * REQUESTS * REQUEST_LEN;
    let all: Vec<u8> = outputs.into_iter().flatten().collect();

    assert_eq!(all.len(), total);
    assert_eq!(sim.words_delivered(), refills_for(total));
    // Same multiset as the device stream: nothing duplicated or dropped
    assert_eq!(sorted(all), sorted(expected_stream(total)));
    assert_eq!(sim.premature_reads(), 0);
}

#[test]
fn test_concurrent_callers_survive_fro_alarms() {
    let sim = SimulatedEip76d::with_latency(2);
    let trng = Trng::new(&sim, TrngConfig::default());
    let (trng, sim) = (&trng, &sim);

    let all: Vec<u8> = thread::scope(|s| {
        let readers: Vec<_> = (0..CALLERS)
            .map(|_| {
                s.spawn(move || {
                    let mut buf = [0u8; 40];
                    trng.get_random_bytes(&mut buf);
                    buf
                })
            })
            .collect();
        s.spawn(move || {
            for fro in 0..8 {
                sim.inject_shutdown(1 << fro);
                thread::yield_now();
            }
        });
        readers
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect()
    });

    assert_eq!(sorted(all), sorted(expected_stream(CALLERS * 40)));
    assert_eq!(sim.words_delivered(), refills_for(CALLERS * 40));
}

#[test]
fn test_interleaved_callers_observe_one_total_order() {
    let sim = SimulatedEip76d::new();
    let trng = Trng::new(&sim, TrngConfig::default());

    // Two callers alternate; the global consumption order is the device stream
    let mut caller_a = Vec::new();
    let mut caller_b = Vec::new();
    let mut consumed = Vec::new();
    let pattern = [(true, 3usize), (false, 1), (false, 14), (true, 9), (false, 2), (true, 20)];

    for &(is_a, len) in &pattern {
        let mut buf = std::vec![0u8; len];
        trng.get_random_bytes(&mut buf);
        consumed.extend_from_slice(&buf);
        if is_a {
            caller_a.extend_from_slice(&buf);
        } else {
            caller_b.extend_from_slice(&buf);
        }
    }

    assert_eq!(consumed, expected_stream(consumed.len()));
    assert_eq!(caller_a.len() + caller_b.len(), consumed.len());
    assert_eq!(sim.words_delivered(), refills_for(consumed.len()));
}
