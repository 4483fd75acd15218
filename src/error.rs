//! Error types.
//!
//! Construction problems ([`ConfigError`]) are kept apart from failures while talking to the
//! controller ([`Error`]), so a bad bus address is never confused with a bus fault.

use core::fmt;

/// Rejected construction parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// I²C address is reserved or not a 7-bit address
    InvalidAddress(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidAddress(address) => {
                write!(f, "invalid I2C address {address:#04x}")
            }
        }
    }
}

/// Driver errors, generic over the transport's error type `E`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The transport failed (NACK, timeout, wire fault)
    Interface(E),
    /// The controller has not been configured yet; call `init()` first
    NotInitialized,
    /// Display RAM address past the end of RAM
    AddressOutOfRange(u8),
}

impl<E: fmt::Debug> fmt::Display for Error<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "interface error: {e:?}"),
            Self::NotInitialized => f.write_str("controller not initialized"),
            Self::AddressOutOfRange(address) => {
                write!(f, "display RAM address {address} out of range")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::string::ToString;

    use super::*;

    #[test]
    fn test_config_error_display() {
        assert_eq!(
            ConfigError::InvalidAddress(0x80).to_string(),
            "invalid I2C address 0x80"
        );
        assert_eq!(
            ConfigError::InvalidAddress(0x03).to_string(),
            "invalid I2C address 0x03"
        );
    }

    #[test]
    fn test_error_display() {
        let e: Error<&str> = Error::Interface("nack");
        assert_eq!(e.to_string(), "interface error: \"nack\"");
        let e: Error<()> = Error::NotInitialized;
        assert_eq!(e.to_string(), "controller not initialized");
        let e: Error<()> = Error::AddressOutOfRange(40);
        assert_eq!(e.to_string(), "display RAM address 40 out of range");
    }
}
