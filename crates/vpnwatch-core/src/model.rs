//! The reading model.

use chrono::{DateTime, Local};
use serde::Serialize;
use vpnwatch_device::{DeviceConfig, GaiaSession};

use crate::error::CoreError;

/// One collected sample of the VPN user table.
///
/// Created once per invocation, consumed by exactly one reporter
/// behavior, never mutated. No ordering between `current_users` and
/// `peak_users` is assumed; the peak is device-reported and may reset
/// independently.
#[derive(Debug, Clone, Serialize)]
pub struct Reading {
    /// Active VPN sessions at collection time.
    pub current_users: u64,
    /// Device-reported high-water mark.
    pub peak_users: u64,
    /// Wall clock at the point of collection, not device-reported.
    pub timestamp: DateTime<Local>,
}

impl Reading {
    /// Collect a single reading over a fresh management session.
    pub fn collect(device: &DeviceConfig) -> Result<Self, CoreError> {
        let mut session = GaiaSession::connect(device)?;
        let counts = session.vpn_user_counts()?;
        session.close();
        Ok(Self {
            current_users: counts.vals,
            peak_users: counts.peak,
            timestamp: Local::now(),
        })
    }
}
