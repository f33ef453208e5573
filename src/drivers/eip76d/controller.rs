//! EIP76D hardware controller.
//!
//! Owns the enable sequence and the 128-bit read protocol. The read protocol
//! busy-polls STATUS with no timeout. While waiting it heals FRO shutdowns:
//! oscillators reported in ALARMSTOP have their de-tune bit toggled and are
//! re-enabled, after which polling continues.

use super::config::TrngConfig;
use super::regs::*;
use crate::arch;

// ═══════════════════════════════════════════════════════════════════════════════
// POLL RESULT
// ═══════════════════════════════════════════════════════════════════════════════

/// FRO alarm snapshot taken at a shutdown-overflow event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmState {
    /// FROs shut down by the alarm logic
    pub alarm_stop: u32,
    /// De-tune mask in effect when the alarm fired
    pub detune: u32,
}

impl AlarmState {
    /// De-tune mask after recovery: toggle exactly the alarmed FROs
    pub fn next_detune(&self) -> u32 {
        self.detune ^ self.alarm_stop
    }
}

/// Outcome of a single STATUS poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Poll {
    /// A 128-bit result is waiting in the output registers
    Ready,
    /// A shutdown overflow was cleared; keep polling
    Recovered(AlarmState),
    /// Still accumulating entropy
    Pending,
}

/// Decoded EIP_REV register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EipRevision {
    pub eip_number: u8,
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl EipRevision {
    pub const EIP76: u8 = 76;

    pub fn from_raw(raw: u32) -> Option<Self> {
        let number = (raw & 0xFF) as u8;
        let complement = ((raw >> 8) & 0xFF) as u8;
        // The register carries the EIP number and its bitwise complement
        if number != !complement {
            return None;
        }
        Some(EipRevision {
            eip_number: number,
            patch: ((raw >> 16) & 0xF) as u8,
            minor: ((raw >> 20) & 0xF) as u8,
            major: ((raw >> 24) & 0xF) as u8,
        })
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONTROLLER
// ═══════════════════════════════════════════════════════════════════════════════

pub struct Eip76d<R: RegisterIo> {
    regs: R,
    config: TrngConfig,
}

impl<R: RegisterIo> Eip76d<R> {
    /// Wrap a register block. Does not touch the hardware.
    pub const fn new(regs: R, config: TrngConfig) -> Self {
        Eip76d { regs, config }
    }

    /// Live check of the CONTROL enable bit
    pub fn is_enabled(&self) -> bool {
        self.regs.read32(RNG_CONTROL) & ENABLE_TRNG != 0
    }

    /// Program timing, enable every FRO and start the generator.
    ///
    /// Safe to repeat on a running device.
    pub fn initialize(&mut self) {
        // Ensure initial latency
        self.regs.write32(RNG_CONFIG, self.config.config());

        if let Some(thresholds) = self.config.alarm_thresholds {
            self.regs.write32(RNG_ALARMCNT, thresholds.alarmcnt());
        }

        // Configure the desired FROs
        self.regs.write32(RNG_FRODETUNE, 0);

        // Enable all FROs
        self.regs.write32(RNG_FROENABLE, RNG_FRO_MASK);

        self.regs.write32(RNG_CONTROL, self.config.control());
    }

    pub fn revision(&self) -> Option<EipRevision> {
        EipRevision::from_raw(self.regs.read32(RNG_EIP_REV))
    }

    /// Raw OPTIONS register (synthesis parameters)
    pub fn options(&self) -> u32 {
        self.regs.read32(RNG_OPTIONS)
    }

    /// Read STATUS once, healing a shutdown overflow if one is flagged.
    pub fn poll(&mut self) -> Poll {
        let status = self.regs.read32(RNG_STATUS);

        if status & RNG_READY != 0 {
            Poll::Ready
        } else if status & SHUTDOWN_OFLO != 0 {
            Poll::Recovered(self.recover_shutdown())
        } else {
            Poll::Pending
        }
    }

    fn recover_shutdown(&mut self) -> AlarmState {
        let alarm = AlarmState {
            alarm_stop: self.regs.read32(RNG_ALARMSTOP),
            detune: self.regs.read32(RNG_FRODETUNE),
        };

        // Clear the alarm events
        self.regs.write32(RNG_ALARMMASK, 0);
        self.regs.write32(RNG_ALARMSTOP, 0);
        // De-tune offending FROs
        self.regs.write32(RNG_FRODETUNE, alarm.next_detune());
        // Re-enable the shut down FROs
        self.regs.write32(RNG_FROENABLE, RNG_FRO_MASK);
        // Clear the shutdown overflow event
        self.regs.write32(RNG_INTACK, SHUTDOWN_OFLO);

        log::debug!(
            "eip76d: fixed FRO shutdown (alarm {:#08x}, detune {:#08x} -> {:#08x})",
            alarm.alarm_stop,
            alarm.detune,
            alarm.next_detune()
        );

        alarm
    }

    /// Re-run the enable sequence if the device lost its configuration
    fn ensure_enabled(&mut self) {
        if !self.is_enabled() {
            log::trace!("eip76d: found disabled, re-running enable sequence");
            self.initialize();
        }
    }

    /// Copy the output words out and release them to the hardware
    fn take_output(&mut self) -> [u32; 4] {
        let words = RNG_OUTPUTS.map(|offset| self.regs.read32(offset));
        // Acknowledge read complete
        self.regs.write32(RNG_INTACK, RNG_READY);
        words
    }

    /// Produce one 128-bit word. Spins until the hardware is ready.
    pub fn read_128(&mut self) -> [u32; 4] {
        self.ensure_enabled();

        while self.poll() != Poll::Ready {
            arch::spin_wait();
        }

        self.take_output()
    }

    /// Like [`read_128`](Self::read_128), but `keep_polling` is asked after
    /// every poll that did not find a result. Returning `false` abandons the
    /// wait and yields `None`; the next read resumes the protocol.
    pub fn read_128_while<F>(&mut self, mut keep_polling: F) -> Option<[u32; 4]>
    where
        F: FnMut() -> bool,
    {
        self.ensure_enabled();

        loop {
            if self.poll() == Poll::Ready {
                return Some(self.take_output());
            }
            if !keep_polling() {
                return None;
            }
            arch::spin_wait();
        }
    }
}
