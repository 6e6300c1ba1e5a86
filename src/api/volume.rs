use serde::Serialize;

use crate::error::DetectorError;

/// Reads the master volume of the default audio output device.
pub trait VolumeProbe: Send + Sync {
    /// Volume scalar in `[0, 1]`.
    fn master_volume(&self) -> Result<f32, DetectorError>;

    /// Whether the default output is a Bluetooth device. Most backends cannot
    /// tell, hence the default.
    fn is_bluetooth(&self) -> bool {
        false
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum VolumeReport {
    Reading {
        volume: u8,
        is_high: bool,
        is_bluetooth: bool,
        status: &'static str,
    },
    Failed {
        status: &'static str,
        message: String,
    },
}

impl VolumeReport {
    pub fn read(probe: Option<&dyn VolumeProbe>, high_percent: u8) -> Self {
        let Some(probe) = probe else {
            return Self::failed(DetectorError::Unavailable("volume probe"));
        };
        match probe.master_volume() {
            Ok(scalar) => {
                // truncated like the OS mixer shows it
                let volume = (scalar.clamp(0.0, 1.0) * 100.0) as u8;
                tracing::info!("Health Monitor: Active Audio Device Volume at {}%", volume);
                Self::Reading {
                    volume,
                    is_high: volume > high_percent,
                    is_bluetooth: probe.is_bluetooth(),
                    status: "success",
                }
            }
            Err(e) => Self::failed(e),
        }
    }

    fn failed(error: DetectorError) -> Self {
        tracing::warn!("Volume check failed: {}", error);
        Self::Failed {
            status: "error",
            message: error.to_string(),
        }
    }
}
