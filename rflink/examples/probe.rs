//! Connect to an analyzer behind a TCP bridge, run the handshake and
//! print what the device can do.
//!
//! Usage:
//!   cargo run -p rflink --example probe -- 192.168.0.10:18888

use anyhow::{Context, Result, bail};

use rflink::prelude::*;
use rflink::transport::tcp::TcpTransport;

fn main() -> Result<()> {
    env_logger::init();

    let Some(addr) = std::env::args().nth(1) else {
        bail!("usage: probe <host:port>");
    };

    let transport = TcpTransport::connect(&addr).with_context(|| format!("connecting {addr}"))?;
    let mut session = SessionBuilder::new()
        .with_transport(Box::new(transport))
        .connect()
        .context("handshake")?;

    println!("link format : {}", session.format());
    let caps = session.capabilities().clone();
    println!("baudrate    : {}", caps.baudrate);
    println!("big buffer  : {} bytes", caps.bigbuf_size);
    print!("built with  :");
    for cap in caps.enabled() {
        print!(" {cap}");
    }
    println!();

    let reply = session.exchange(&commands::version(), default_timeout())?;
    reply.require_success()?;
    println!("firmware    : {}", String::from_utf8_lossy(&reply.data));

    session.close();
    Ok(())
}
