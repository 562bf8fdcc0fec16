//! Recording fake buses for driver tests

use heapless::Vec;

use ht16k33_hal::{BusError, I2cBus};

/// Longest transfer the driver makes (RAM write)
const MAX_BYTES: usize = 17;

/// Transfers kept per test
const MAX_TRANSFERS: usize = 32;

/// One bus transaction as seen by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Transfer {
    Write { address: u8, data: Vec<u8, MAX_BYTES> },
    Read { address: u8, len: usize },
    WriteRead { address: u8, data: Vec<u8, MAX_BYTES>, len: usize },
}

impl Transfer {
    /// Bytes written by this transfer (empty for plain reads)
    pub(crate) fn written(&self) -> &[u8] {
        match self {
            Transfer::Write { data, .. } | Transfer::WriteRead { data, .. } => data.as_slice(),
            Transfer::Read { .. } => &[],
        }
    }
}

/// Bus that records every transfer and answers reads from a queue
#[derive(Debug, Default)]
pub(crate) struct RecordingBus {
    pub(crate) transfers: Vec<Transfer, MAX_TRANSFERS>,
    responses: Vec<u8, 64>,
    fail_with: Option<BusError>,
}

impl RecordingBus {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Queue bytes returned by subsequent reads, in order
    pub(crate) fn respond(&mut self, bytes: &[u8]) {
        self.responses.extend_from_slice(bytes).unwrap();
    }

    /// Make every following transfer fail
    pub(crate) fn fail(&mut self, err: BusError) {
        self.fail_with = Some(err);
    }

    /// Written bytes of every transfer, in order
    pub(crate) fn writes(&self) -> Vec<&[u8], MAX_TRANSFERS> {
        self.transfers.iter().map(Transfer::written).collect()
    }

    pub(crate) fn take(&mut self) -> Vec<Transfer, MAX_TRANSFERS> {
        core::mem::take(&mut self.transfers)
    }

    fn fill(&mut self, buf: &mut [u8]) {
        for byte in buf.iter_mut() {
            *byte = if self.responses.is_empty() {
                0
            } else {
                self.responses.remove(0)
            };
        }
    }

    fn record(&mut self, transfer: Transfer) -> Result<(), BusError> {
        if let Some(err) = self.fail_with {
            return Err(err);
        }
        self.transfers.push(transfer).unwrap();
        Ok(())
    }
}

impl I2cBus for RecordingBus {
    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), BusError> {
        self.record(Transfer::Write {
            address,
            data: Vec::from_slice(data).unwrap(),
        })
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), BusError> {
        self.record(Transfer::Read {
            address,
            len: buf.len(),
        })?;
        self.fill(buf);
        Ok(())
    }

    fn write_read(
        &mut self,
        address: u8,
        write_data: &[u8],
        read_buf: &mut [u8],
    ) -> Result<(), BusError> {
        self.record(Transfer::WriteRead {
            address,
            data: Vec::from_slice(write_data).unwrap(),
            len: read_buf.len(),
        })?;
        self.fill(read_buf);
        Ok(())
    }
}

/// Async counterpart: an `embedded-hal-async` bus that records writes
#[derive(Debug, Default)]
pub(crate) struct AsyncRecordingBus {
    pub(crate) inner: RecordingBus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FakeError(pub(crate) embedded_hal_async::i2c::ErrorKind);

impl embedded_hal_async::i2c::Error for FakeError {
    fn kind(&self) -> embedded_hal_async::i2c::ErrorKind {
        self.0
    }
}

impl embedded_hal_async::i2c::ErrorType for AsyncRecordingBus {
    type Error = FakeError;
}

impl embedded_hal_async::i2c::I2c for AsyncRecordingBus {
    async fn transaction(
        &mut self,
        address: u8,
        operations: &mut [embedded_hal_async::i2c::Operation<'_>],
    ) -> Result<(), Self::Error> {
        use embedded_hal_async::i2c::{ErrorKind, NoAcknowledgeSource, Operation};

        // Hand the injected failure back as the matching HAL error kind
        let to_fake = |err: BusError| {
            FakeError(match err {
                BusError::Bus => ErrorKind::Bus,
                BusError::ArbitrationLost => ErrorKind::ArbitrationLoss,
                BusError::Nack => ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address),
                BusError::Overrun => ErrorKind::Overrun,
                BusError::Other => ErrorKind::Other,
            })
        };
        match operations {
            [Operation::Write(data)] => self.inner.write(address, data).map_err(to_fake),
            [Operation::Read(buf)] => self.inner.read(address, buf).map_err(to_fake),
            [Operation::Write(data), Operation::Read(buf)] => {
                self.inner.write_read(address, data, buf).map_err(to_fake)
            }
            _ => Err(FakeError(ErrorKind::Other)),
        }
    }
}
