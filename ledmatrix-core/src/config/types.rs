//! Configuration type definitions

use heapless::String;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Hard maximum number of daisy-chained modules
pub const MAX_CHAIN_LEN: usize = 8;

/// Pixels along each edge of one LED module
pub const MODULE_SIZE: usize = 8;

/// Maximum text length accepted for display
pub const MAX_TEXT_LEN: usize = 64;

/// Text shown after power-up unless configured otherwise
pub const DEFAULT_BOOT_TEXT: &str = "BigClwn";

/// Errors from configuration values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Intensity outside 0-15
    IntensityOutOfRange,
    /// Text longer than [`MAX_TEXT_LEN`]
    TextTooLong,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::IntensityOutOfRange => f.write_str("intensity must be 0-15"),
            ConfigError::TextTooLong => write!(f, "text longer than {} bytes", MAX_TEXT_LEN),
        }
    }
}

/// LED brightness level (0-15)
///
/// Maps directly onto the 4-bit intensity register of the driver chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "u8", into = "u8"))]
pub struct Intensity(u8);

impl Intensity {
    /// Lowest brightness (LEDs still lit)
    pub const MIN: Intensity = Intensity(0);
    /// Highest brightness
    pub const MAX: Intensity = Intensity(15);
    /// Power-up brightness
    pub const DEFAULT: Intensity = Intensity(2);

    /// Validate an arbitrary integer, typically from a remote command
    ///
    /// Returns `None` outside 0-15.
    pub fn new(value: i32) -> Option<Self> {
        if (Self::MIN.0 as i32..=Self::MAX.0 as i32).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    /// Register value
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Intensity {
    type Error = ConfigError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value as i32).ok_or(ConfigError::IntensityOutOfRange)
    }
}

impl From<Intensity> for u8 {
    fn from(intensity: Intensity) -> Self {
        intensity.0
    }
}

/// Display configuration
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Brightness applied during initialization
    pub intensity: Intensity,
    /// Text drawn once the chain is powered up
    pub boot_text: String<MAX_TEXT_LEN>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        let mut boot_text = String::new();
        let _ = boot_text.push_str(DEFAULT_BOOT_TEXT);
        Self {
            intensity: Intensity::DEFAULT,
            boot_text,
        }
    }
}

impl DisplayConfig {
    /// Build a configuration, rejecting over-long boot text
    pub fn new(intensity: Intensity, boot_text: &str) -> Result<Self, ConfigError> {
        let mut text = String::new();
        text.push_str(boot_text)
            .map_err(|_| ConfigError::TextTooLong)?;
        Ok(Self {
            intensity,
            boot_text: text,
        })
    }
}
