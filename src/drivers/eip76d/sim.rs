//! Simulated EIP76D register block for host-side testing.
//!
//! Models the parts of the device the driver depends on: the CONTROL enable
//! bit, a ready latency counted in STATUS polls, injectable shutdown-overflow
//! events, and the shared STATUS/INTACK offset. Every write is journaled.
//!
//! Once STATUS has reported READY the result stays latched until the READY
//! acknowledge, so an alarm raised in between cannot take the word back.

use heapless::Vec;
use spin::Mutex;

use super::regs::*;

const REG_COUNT: usize = RNG_EIP_REV / 4 + 1;
const MAX_SCRIPTED_OUTPUTS: usize = 32;
const JOURNAL_DEPTH: usize = 256;

struct SimState {
    regs: [u32; REG_COUNT],
    scripted: Vec<[u32; 4], MAX_SCRIPTED_OUTPUTS>,
    delivered: usize,
    latency: u32,
    countdown: u32,
    ready_latched: bool,
    shutdown_pending: bool,
    status_polls: usize,
    premature_reads: usize,
    writes: Vec<(usize, u32), JOURNAL_DEPTH>,
}

impl SimState {
    fn enabled(&self) -> bool {
        self.regs[RNG_CONTROL / 4] & ENABLE_TRNG != 0
    }

    fn current_word(&self) -> [u32; 4] {
        self.scripted
            .get(self.delivered)
            .copied()
            .unwrap_or_else(|| SimulatedEip76d::generated_word(self.delivered))
    }
}

pub struct SimulatedEip76d {
    state: Mutex<SimState>,
}

impl Default for SimulatedEip76d {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulatedEip76d {
    /// A device that is ready on the first poll
    pub fn new() -> Self {
        Self::with_latency(0)
    }

    /// A device that reports not-ready for `polls` STATUS reads per word
    pub fn with_latency(polls: u32) -> Self {
        SimulatedEip76d {
            state: Mutex::new(SimState {
                regs: [0; REG_COUNT],
                scripted: Vec::new(),
                delivered: 0,
                latency: polls,
                countdown: polls,
                ready_latched: false,
                shutdown_pending: false,
                status_polls: 0,
                premature_reads: 0,
                writes: Vec::new(),
            }),
        }
    }

    /// Output for delivery slot `seq` once the scripted words run out
    pub fn generated_word(seq: usize) -> [u32; 4] {
        let mut word = [0u32; 4];
        for (i, w) in word.iter_mut().enumerate() {
            let n = (seq * 4 + i) as u32;
            *w = n.wrapping_mul(0x9E37_79B9) ^ 0x5A5A_0000 ^ n;
        }
        word
    }

    /// Queue a specific 128-bit output. Scripted words are delivered first.
    pub fn push_output(&self, word: [u32; 4]) {
        let mut s = self.state.lock();
        let _ = s.scripted.push(word);
    }

    /// Raise SHUTDOWN_OFLO with `alarm_stop` FROs shut down
    pub fn inject_shutdown(&self, alarm_stop: u32) {
        let mut s = self.state.lock();
        s.regs[RNG_ALARMSTOP / 4] = alarm_stop & RNG_FRO_MASK;
        s.regs[RNG_ALARMMASK / 4] = alarm_stop & RNG_FRO_MASK;
        s.shutdown_pending = true;
    }

    /// External reset: every register back to zero. Output state survives.
    pub fn reset(&self) {
        let mut s = self.state.lock();
        s.regs = [0; REG_COUNT];
        s.ready_latched = false;
        s.shutdown_pending = false;
    }

    /// Set a register behind the driver's back
    pub fn set_register(&self, offset: usize, value: u32) {
        self.state.lock().regs[offset / 4] = value;
    }

    pub fn register(&self, offset: usize) -> u32 {
        self.state.lock().regs[offset / 4]
    }

    pub fn snapshot(&self) -> [u32; REG_COUNT] {
        self.state.lock().regs
    }

    pub fn shutdown_pending(&self) -> bool {
        self.state.lock().shutdown_pending
    }

    /// Number of 128-bit words acknowledged by the driver
    pub fn words_delivered(&self) -> usize {
        self.state.lock().delivered
    }

    pub fn status_polls(&self) -> usize {
        self.state.lock().status_polls
    }

    /// OUTPUT reads made while no result was ready
    pub fn premature_reads(&self) -> usize {
        self.state.lock().premature_reads
    }

    /// Journaled writes, oldest first (capped at the journal depth)
    pub fn writes(&self) -> Vec<(usize, u32), JOURNAL_DEPTH> {
        self.state.lock().writes.clone()
    }

    pub fn clear_journal(&self) {
        self.state.lock().writes.clear();
    }
}

impl RegisterIo for SimulatedEip76d {
    fn read32(&self, offset: usize) -> u32 {
        let mut s = self.state.lock();
        match offset {
            RNG_STATUS => {
                s.status_polls += 1;
                let oflo = if s.shutdown_pending { SHUTDOWN_OFLO } else { 0 };
                if !s.enabled() {
                    0
                } else if s.ready_latched {
                    RNG_READY | oflo
                } else if s.shutdown_pending {
                    SHUTDOWN_OFLO
                } else if s.countdown > 0 {
                    s.countdown -= 1;
                    0
                } else {
                    s.ready_latched = true;
                    RNG_READY
                }
            }
            RNG_OUTPUT_0 | RNG_OUTPUT_1 | RNG_OUTPUT_2 | RNG_OUTPUT_3 => {
                if !s.ready_latched {
                    s.premature_reads += 1;
                }
                s.current_word()[offset / 4]
            }
            _ => s.regs[offset / 4],
        }
    }

    fn write32(&self, offset: usize, value: u32) {
        let mut s = self.state.lock();
        let _ = s.writes.push((offset, value));
        match offset {
            RNG_INTACK => {
                if value & RNG_READY != 0 && s.ready_latched {
                    s.ready_latched = false;
                    s.delivered += 1;
                    s.countdown = s.latency;
                }
                if value & SHUTDOWN_OFLO != 0 {
                    s.shutdown_pending = false;
                }
            }
            RNG_FROENABLE | RNG_FRODETUNE | RNG_ALARMMASK | RNG_ALARMSTOP => {
                s.regs[offset / 4] = value & RNG_FRO_MASK;
            }
            _ => s.regs[offset / 4] = value,
        }
    }
}
