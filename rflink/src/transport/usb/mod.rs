// rflink/src/transport/usb/mod.rs

#![cfg(feature = "usb")]

//! USB CDC-ACM transport, feature-gated behind `usb` so the protocol
//! core builds without libusb present.

use std::time::Duration;

use rusb::{Context, DeviceHandle, UsbContext};

use crate::transport::traits::Transport;
use crate::{Error, Result};

mod descriptor;
use descriptor::find_bulk_endpoints;

/// USB ids the analyzer family enumerates under.
const KNOWN_IDS: &[(u16, u16)] = &[(0x2d2d, 0x504d), (0x9ac4, 0x4b8f)];

pub struct UsbTransport {
    handle: DeviceHandle<Context>,
    in_ep: u8,
    out_ep: u8,
    write_timeout: Duration,
}

impl UsbTransport {
    /// Open the first matching analyzer found on the bus.
    pub fn open() -> Result<Self> {
        let ctx = Context::new()?;
        for device in ctx.devices()?.iter() {
            let dd = device.device_descriptor()?;
            if !KNOWN_IDS.contains(&(dd.vendor_id(), dd.product_id())) {
                continue;
            }
            let Some((in_ep, out_ep, iface)) = find_bulk_endpoints(&device) else {
                continue;
            };
            let mut handle = device.open()?;

            // On Linux the cdc_acm kernel driver usually owns the data
            // interface; detach it so we can claim the bulk pipe.
            if let Ok(true) = handle.kernel_driver_active(iface) {
                let _ = handle.detach_kernel_driver(iface);
            }
            handle.claim_interface(iface)?;

            return Ok(Self {
                handle,
                in_ep,
                out_ep,
                write_timeout: Duration::from_millis(1000),
            });
        }
        Err(Error::DeviceNotFound)
    }
}

impl Transport for UsbTransport {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        let mut offset = 0;
        while offset < data.len() {
            let n = self
                .handle
                .write_bulk(self.out_ep, &data[offset..], self.write_timeout)?;
            if n == 0 {
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::WriteZero,
                    "bulk write made no progress",
                )));
            }
            offset += n;
        }
        Ok(())
    }

    fn read(&mut self, max: usize, timeout: Duration) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; max];
        match self.handle.read_bulk(self.in_ep, &mut buf, timeout) {
            Ok(0) => Err(Error::Timeout),
            Ok(n) => {
                buf.truncate(n);
                Ok(buf)
            }
            Err(rusb::Error::Timeout) => Err(Error::Timeout),
            Err(e) => Err(e.into()),
        }
    }

    fn name(&self) -> &str {
        "usb"
    }
}
