//! I2C bus abstractions
//!
//! Provides the bus master trait drivers transmit through, plus an
//! adapter wrapping any `embedded-hal` 1.0 I2C implementation.

/// I2C bus master
///
/// Provides basic I2C read/write operations for communicating with
/// peripheral devices. Transfers are blocking and all-or-nothing: a
/// returned error carries no partial-transfer count.
pub trait I2cBus {
    /// Error type for I2C operations
    type Error;

    /// Write data to a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `data` - Bytes to write
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Read data from a device at the given address
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `buf` - Buffer to read into
    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error>;

    /// Write then read in a single transaction (repeated start)
    ///
    /// This is commonly used to write a register address then read data.
    ///
    /// # Arguments
    /// * `address` - 7-bit I2C address
    /// * `write_data` - Bytes to write (typically register address)
    /// * `read_buf` - Buffer to read into
    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error>;
}

/// Adapter exposing an `embedded-hal` 1.0 I2C master as an [`I2cBus`]
///
/// ```ignore
/// let bus = EmbeddedHalI2c(hal_i2c);
/// ```
pub struct EmbeddedHalI2c<T>(pub T);

impl<T> I2cBus for EmbeddedHalI2c<T>
where
    T: embedded_hal::i2c::I2c,
{
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.0.write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.0.read(address, buf)
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.0.write_read(address, write_data, read_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{self, ErrorKind, ErrorType, Operation, SevenBitAddress};

    #[derive(Debug, PartialEq, Eq)]
    struct NoFault;

    impl i2c::Error for NoFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    /// Captures the last written bytes, answers reads with 0xAB
    #[derive(Default)]
    struct Loopback {
        last: [u8; 16],
        last_len: usize,
    }

    impl ErrorType for Loopback {
        type Error = NoFault;
    }

    impl i2c::I2c for Loopback {
        fn transaction(
            &mut self,
            _address: SevenBitAddress,
            operations: &mut [Operation<'_>],
        ) -> Result<(), NoFault> {
            for op in operations {
                match op {
                    Operation::Write(bytes) => {
                        self.last[..bytes.len()].copy_from_slice(bytes);
                        self.last_len = bytes.len();
                    }
                    Operation::Read(buf) => buf.fill(0xAB),
                }
            }
            Ok(())
        }
    }

    #[test]
    fn test_adapter_forwards_write() {
        let mut bus = EmbeddedHalI2c(Loopback::default());
        bus.write(0x3C, &[0x00, 0xAF]).unwrap();
        assert_eq!(&bus.0.last[..bus.0.last_len], &[0x00, 0xAF]);
    }

    #[test]
    fn test_adapter_forwards_read() {
        let mut bus = EmbeddedHalI2c(Loopback::default());
        let mut buf = [0u8; 2];
        bus.read(0x3C, &mut buf).unwrap();
        assert_eq!(buf, [0xAB, 0xAB]);
    }
}
