//! Clone an HID Prox id onto a writable tag through the legacy argument
//! adapter.
//!
//! Usage:
//!   cargo run -p rflink --example hid_clone -- 192.168.0.10:18888 2004263f88

use anyhow::{Context, Result, bail};

use rflink::prelude::*;
use rflink::transport::tcp::TcpTransport;

fn parse_id(hex: &str) -> Result<HidClone> {
    let value = u128::from_str_radix(hex, 16).context("id must be hex")?;
    if value >> 96 != 0 {
        bail!("id does not fit in 96 bits");
    }
    Ok(HidClone {
        hi2: (value >> 64) as u32,
        hi: (value >> 32) as u32,
        lo: value as u32,
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let (Some(addr), Some(id_hex)) = (args.next(), args.next()) else {
        bail!("usage: hid_clone <host:port> <id-hex>");
    };
    let id = parse_id(&id_hex)?;
    println!(
        "cloning {} id {id_hex}",
        if id.long_format() { "long" } else { "short" }
    );

    let transport = TcpTransport::connect(&addr).with_context(|| format!("connecting {addr}"))?;
    let mut session = SessionBuilder::new()
        .with_transport(Box::new(transport))
        .connect()
        .context("handshake")?;

    session.send(&commands::hid_clone(id))?;
    // The writer acknowledges with the keep-alive sentinel once the tag
    // is programmed.
    let reply = session.wait_for(Some(Opcode::Ack.raw()), ms(4000))?;
    reply.require_success()?;
    println!("done");

    session.close();
    Ok(())
}
