//! Device settings boundary.
//!
//! The core only reads named keys with defaults; there is no write path.
//! The surrounding app owns where the values actually live.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alliance {
    Blue,
    Red,
}

/// Which scouting tablet this device is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Blue1,
    Blue2,
    Blue3,
    Red1,
    Red2,
    Red3,
}

impl DeviceType {
    pub fn alliance(&self) -> Alliance {
        match self {
            DeviceType::Blue1 | DeviceType::Blue2 | DeviceType::Blue3 => Alliance::Blue,
            DeviceType::Red1 | DeviceType::Red2 | DeviceType::Red3 => Alliance::Red,
        }
    }
}

/// Physical orientation of the device relative to the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldOrientation {
    Standard,
    Flipped,
}

/// Synchronous read of named settings keys, with defaults.
pub trait SettingsProvider {
    fn device_type(&self) -> DeviceType {
        DeviceType::Blue1
    }

    fn field_orientation(&self) -> FieldOrientation {
        FieldOrientation::Standard
    }

    fn debug(&self) -> bool {
        false
    }
}

/// All-defaults provider.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSettings;

impl SettingsProvider for DefaultSettings {}

/// Fixed in-memory settings, used by tests and the replay API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticSettings {
    #[serde(default = "StaticSettings::default_device_type")]
    pub device_type: DeviceType,
    #[serde(default = "StaticSettings::default_field_orientation")]
    pub field_orientation: FieldOrientation,
    #[serde(default)]
    pub debug: bool,
}

impl StaticSettings {
    fn default_device_type() -> DeviceType {
        DeviceType::Blue1
    }

    fn default_field_orientation() -> FieldOrientation {
        FieldOrientation::Standard
    }
}

impl Default for StaticSettings {
    fn default() -> Self {
        Self {
            device_type: Self::default_device_type(),
            field_orientation: Self::default_field_orientation(),
            debug: false,
        }
    }
}

impl SettingsProvider for StaticSettings {
    fn device_type(&self) -> DeviceType {
        self.device_type
    }

    fn field_orientation(&self) -> FieldOrientation {
        self.field_orientation
    }

    fn debug(&self) -> bool {
        self.debug
    }
}
