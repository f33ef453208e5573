//! Timing and threshold configuration.
//!
//! These are design constants fixed at construction; a live driver never
//! reprograms them.

use super::regs::*;

/// Startup cycles before the first output
pub const RNG_CONTROL_STARTUP_CYCLES: u32 = 0xff;
/// Minimum refill cycles between outputs
pub const RNG_CONFIG_MIN_REFIL_CYCLES: u32 = 0x5;
/// Maximum refill cycles between outputs
pub const RNG_CONFIG_MAX_REFIL_CYCLES: u32 = 0x22;
/// Alarm events tolerated per FRO before it is shut down
pub const RNG_ALARM_THRESHOLD: u32 = 0xff;
/// Shut-down FROs tolerated before SHUTDOWN_OFLO is raised
pub const RNG_SHUTDOWN_THRESHOLD: u32 = 0x4;

/// Thresholds programmed into ALARMCNT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlarmThresholds {
    pub alarm: u32,
    pub shutdown: u32,
}

impl Default for AlarmThresholds {
    fn default() -> Self {
        AlarmThresholds {
            alarm: RNG_ALARM_THRESHOLD,
            shutdown: RNG_SHUTDOWN_THRESHOLD,
        }
    }
}

impl AlarmThresholds {
    pub fn alarmcnt(&self) -> u32 {
        ((self.alarm << RNG_ALARMCNT_ALARM_TH_SHIFT) & RNG_ALARMCNT_ALARM_TH_MASK)
            | ((self.shutdown << RNG_ALARMCNT_SHUTDOWN_TH_SHIFT) & RNG_ALARMCNT_SHUTDOWN_TH_MASK)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrngConfig {
    pub startup_cycles: u32,
    pub min_refill_cycles: u32,
    pub max_refill_cycles: u32,
    /// `None` leaves ALARMCNT at its reset value
    pub alarm_thresholds: Option<AlarmThresholds>,
}

impl Default for TrngConfig {
    fn default() -> Self {
        TrngConfig {
            startup_cycles: RNG_CONTROL_STARTUP_CYCLES,
            min_refill_cycles: RNG_CONFIG_MIN_REFIL_CYCLES,
            max_refill_cycles: RNG_CONFIG_MAX_REFIL_CYCLES,
            alarm_thresholds: None,
        }
    }
}

impl TrngConfig {
    /// Reference configuration plus explicit ALARMCNT programming
    pub fn with_alarm_thresholds(thresholds: AlarmThresholds) -> Self {
        TrngConfig {
            alarm_thresholds: Some(thresholds),
            ..Self::default()
        }
    }

    /// CONFIG register value
    pub fn config(&self) -> u32 {
        ((self.min_refill_cycles << RNG_CONFIG_MIN_REFIL_CYCLES_SHIFT)
            & RNG_CONFIG_MIN_REFIL_CYCLES_MASK)
            | ((self.max_refill_cycles << RNG_CONFIG_MAX_REFIL_CYCLES_SHIFT)
                & RNG_CONFIG_MAX_REFIL_CYCLES_MASK)
    }

    /// CONTROL register value that starts the generator
    pub fn control(&self) -> u32 {
        ENABLE_TRNG
            | ((self.startup_cycles << RNG_CONTROL_STARTUP_CYCLES_SHIFT)
                & RNG_CONTROL_STARTUP_CYCLES_MASK)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_config_packing() {
        let cfg = TrngConfig::default();
        assert_eq!(cfg.config(), 0x0022_0005);
        assert_eq!(cfg.control(), 0x00FF_0400);
        assert_eq!(cfg.alarm_thresholds, None);
    }

    #[test]
    fn test_alarmcnt_packing() {
        let cfg = TrngConfig::with_alarm_thresholds(AlarmThresholds::default());
        assert_eq!(cfg.alarm_thresholds.map(|t| t.alarmcnt()), Some(0x0004_00FF));
    }

    #[test]
    fn test_oversized_fields_are_masked() {
        let t = AlarmThresholds { alarm: 0x1FF, shutdown: 0x3F };
        assert_eq!(t.alarmcnt(), 0x001F_00FF);
    }
}
