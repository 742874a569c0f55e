// rflink/src/transport/usb/descriptor.rs

#![cfg(feature = "usb")]

use rusb::{Device, Direction, TransferType};

/// Locate the CDC-ACM bulk data endpoints.
///
/// Returns (in_endpoint, out_endpoint, interface_number) for the first
/// interface exposing a bulk pair. The analyzer enumerates as a plain
/// CDC-ACM modem, so the data interface is the one with two bulk
/// endpoints; the notification interface only has an interrupt one.
pub fn find_bulk_endpoints<D: rusb::UsbContext>(
    device: &Device<D>,
) -> Option<(u8, u8, u8)> {
    let config = device.config_descriptor(0).ok()?;
    for interface in config.interfaces() {
        for desc in interface.descriptors() {
            let mut in_ep = None;
            let mut out_ep = None;
            for ep in desc.endpoint_descriptors() {
                if ep.transfer_type() != TransferType::Bulk {
                    continue;
                }
                match ep.direction() {
                    Direction::In => in_ep = Some(ep.address()),
                    Direction::Out => out_ep = Some(ep.address()),
                }
            }
            if let (Some(i), Some(o)) = (in_ep, out_ep) {
                return Some((i, o, desc.interface_number()));
            }
        }
    }
    None
}
