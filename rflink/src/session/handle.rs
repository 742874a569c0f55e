// rflink/src/session/handle.rs

use std::marker::PhantomData;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::capabilities::Capabilities;
use crate::constants::{CAPABILITIES_SIZE, READ_CHUNK_SIZE, READ_SLICE_MS, RESP_PREAMBLE_MAGIC};
use crate::protocol::commands::{device as device_cmds, ping as ping_cmds};
use crate::protocol::frame;
use crate::protocol::packet::{CommandPacket, ResponsePacket};
use crate::protocol::registry::{self, Opcode};
use crate::session::unsolicited::{self, Observer};
use crate::transport::Transport;
use crate::types::FrameFormat;
use crate::utils::hex_preview;
use crate::utils::timeout::handshake_timeout;
use crate::{Error, Result};

/// Type-state markers
pub struct Uninitialized;
pub struct Ready;

/// Shared flag a caller can trip to abort an in-progress wait.
///
/// Cancellation is cooperative: the dispatcher notices the flag between
/// read attempts, pings the device to resynchronize its notion of an
/// outstanding reply, and returns the user-abort error. The transport is
/// left open.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    pub fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Connection to one analyzer, enforcing handshake-before-commands at
/// compile time.
///
/// A session is the single owner of its transport and supports exactly
/// one outstanding request: every operation takes `&mut self`, and the
/// wire format has no way to match concurrent replies to their requests.
/// Callers that want background polling must serialize access to the
/// one instance themselves.
pub struct Session<State = Uninitialized> {
    transport: Box<dyn Transport>,
    format: FrameFormat,
    capabilities: Capabilities,
    rx: Vec<u8>,
    observer: Option<Observer>,
    cancel: CancelToken,
    handshake_budget: Duration,
    _state: PhantomData<State>,
}

impl Session<Uninitialized> {
    /// Wrap an open transport. Nothing is sent until
    /// [`handshake`](Self::handshake).
    pub fn attach(transport: Box<dyn Transport>) -> Self {
        Self {
            transport,
            format: FrameFormat::Ng,
            capabilities: Capabilities::default(),
            rx: Vec::new(),
            observer: None,
            cancel: CancelToken::new(),
            handshake_budget: handshake_timeout(),
            _state: PhantomData,
        }
    }

    /// Override the per-step handshake budget. Mostly useful for tests
    /// and for very slow bridges.
    pub fn with_handshake_budget(mut self, budget: Duration) -> Self {
        self.handshake_budget = budget;
        self
    }

    /// Skip negotiation for a peer whose format and capabilities are
    /// known out of band, e.g. a replayed trace or a simulated device
    /// in tests.
    pub fn assume_negotiated(self, format: FrameFormat, capabilities: Capabilities) -> Session<Ready> {
        self.into_ready(format, capabilities)
    }

    /// Negotiate the connection: verify the link with a ping, fix the
    /// frame format for the lifetime of the connection, then fetch and
    /// version-check the capability descriptor.
    ///
    /// The modern format is tried first; a peer that stays silent is
    /// retried once in the legacy format. After this point the format is
    /// connection state and never re-inferred from the byte stream.
    pub fn handshake(mut self) -> Result<Session<Ready>> {
        let budget = self.handshake_budget;
        let token = ping_cmds::default_token();

        self.send_frame(&ping_cmds::ping_with(&token))?;
        match self.wait(Some(Opcode::Ping.raw()), budget) {
            Ok(reply) => ping_cmds::check_echo(&token, &reply)?,
            Err(Error::Timeout) => {
                log::debug!(
                    "no ping reply on {} in the modern format, retrying legacy",
                    self.transport.name()
                );
                self.format = FrameFormat::Old;
                self.send_frame(&ping_cmds::ping_with(&token))?;
                let reply = self.wait(Some(Opcode::Ack.raw()), budget)?;
                reply.require_success()?;
            }
            Err(e) => return Err(e),
        }

        self.send_frame(&device_cmds::capabilities_query())?;
        let reply = self.wait(Some(Opcode::Capabilities.raw()), budget)?;
        reply.require_success()?;
        // A legacy reply pads the descriptor out to the fixed payload
        // region; only the leading bytes are the descriptor.
        let raw = match reply.format {
            FrameFormat::Old => &reply.data[..CAPABILITIES_SIZE.min(reply.data.len())],
            _ => &reply.data[..],
        };
        let capabilities = Capabilities::decode(raw)?;
        log::debug!(
            "negotiated {} link on {}, {} capabilities",
            self.format,
            self.transport.name(),
            capabilities.enabled().len()
        );
        Ok(self.into_ready_with(capabilities))
    }

    fn into_ready_with(self, capabilities: Capabilities) -> Session<Ready> {
        let format = self.format;
        self.into_ready(format, capabilities)
    }

    fn into_ready(self, format: FrameFormat, capabilities: Capabilities) -> Session<Ready> {
        Session {
            transport: self.transport,
            format,
            capabilities,
            rx: self.rx,
            observer: self.observer,
            cancel: self.cancel,
            handshake_budget: self.handshake_budget,
            _state: PhantomData,
        }
    }
}

impl<State> Session<State> {
    /// Register the side-channel observer for unsolicited frames. Each
    /// such frame is surfaced exactly once.
    pub fn set_observer(&mut self, observer: Observer) {
        self.observer = Some(observer);
    }

    /// Handle callers can trip from another thread to abort a wait.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Encode and write a command, dropping any stale buffered bytes
    /// first so a leftover of the previous exchange cannot be taken for
    /// this one's reply.
    fn send_frame(&mut self, packet: &CommandPacket) -> Result<()> {
        let bytes = frame::encode_command(packet, self.format)?;
        self.rx.clear();
        log::trace!(
            "tx {:#06x} on {}: {}",
            packet.cmd,
            self.transport.name(),
            hex_preview(&bytes, 16)
        );
        self.transport.write(&bytes)
    }

    /// Core receive loop. The deadline is measured from the start of the
    /// wait and is not extended by unsolicited traffic, so a chatty peer
    /// cannot stretch it without producing the actual reply.
    fn wait(&mut self, expected: Option<u16>, timeout: Duration) -> Result<ResponsePacket> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.cancel.is_cancelled() {
                self.cancel.reset();
                let _ = self.send_frame(&ping_cmds::ping());
                return Err(Error::Aborted);
            }

            // Drain every complete frame already buffered.
            loop {
                match frame::decode_response(&self.rx, self.format) {
                    Ok(Some((packet, used))) => {
                        self.rx.drain(..used);
                        if let Some(found) = self.accept(expected, packet) {
                            return Ok(found);
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        // Line noise: drop to the next plausible frame
                        // boundary and keep scanning.
                        log::warn!("discarding noise on {}: {}", self.transport.name(), e);
                        self.resync();
                    }
                }
            }

            let now = Instant::now();
            if now >= deadline {
                return Err(Error::Timeout);
            }
            let slice = (deadline - now).min(Duration::from_millis(READ_SLICE_MS));
            match self.transport.read(READ_CHUNK_SIZE, slice) {
                Ok(bytes) => self.rx.extend_from_slice(&bytes),
                Err(Error::Timeout) => {}
                Err(e) => return Err(e),
            }
        }
    }

    /// Decide what a decoded frame is to the current wait. Returns the
    /// packet when it answers the wait, `None` when the loop should keep
    /// going.
    fn accept(&mut self, expected: Option<u16>, packet: ResponsePacket) -> Option<ResponsePacket> {
        if expected == Some(packet.cmd) {
            return Some(packet);
        }
        if let Some(kind) = unsolicited::classify(packet.cmd) {
            log::debug!("unsolicited {:?} frame ({:#06x})", kind, packet.cmd);
            if let Some(observer) = self.observer.as_mut() {
                observer(kind, &packet);
            }
            return None;
        }
        if expected.is_none() {
            return Some(packet);
        }
        log::debug!(
            "dropping reply {:#06x} while waiting for {:#06x}",
            packet.cmd,
            expected.unwrap_or(Opcode::Unknown.raw())
        );
        None
    }

    /// Skip to the next candidate frame start after a decode failure.
    /// The legacy format has no marker, so there this degenerates to
    /// dropping the buffer; the modern format is scanned for its magic.
    fn resync(&mut self) {
        let magic = RESP_PREAMBLE_MAGIC.to_le_bytes();
        if self.format == FrameFormat::Old {
            self.rx.clear();
            return;
        }
        match self.rx.windows(4).skip(1).position(|w| w == magic) {
            Some(i) => {
                self.rx.drain(..i + 1);
            }
            None => {
                // Keep a partial magic that may complete on the next read.
                let keep = self.rx.len().saturating_sub(3);
                self.rx.drain(..keep);
            }
        }
    }
}

impl Session<Ready> {
    /// Capability descriptor negotiated for this connection.
    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Frame format fixed at handshake time.
    pub fn format(&self) -> FrameFormat {
        self.format
    }

    /// Send a command without awaiting anything.
    ///
    /// Legality is checked before any bytes move: a requested opcode
    /// this build does not recognize is an error, as is one whose
    /// registry entry is response-only or gated on a capability the
    /// connected device lacks.
    pub fn send(&mut self, packet: &CommandPacket) -> Result<()> {
        let Some(def) = registry::lookup(packet.cmd) else {
            return Err(Error::UnknownCommand(packet.cmd));
        };
        if !def.direction.host_may_send() {
            return Err(Error::InvalidArgument(format!(
                "{} is a response-only opcode",
                def.opcode
            )));
        }
        if let Some(capability) = def.capability {
            if !self.capabilities.has(capability) {
                return Err(Error::MissingCapability {
                    opcode: packet.cmd,
                    capability,
                });
            }
        }
        self.send_frame(packet)
    }

    /// Await a reply carrying `expected`, or any ordinary reply when
    /// `None`. Unsolicited frames are surfaced to the observer and do
    /// not satisfy a wildcard wait. No retry happens here; retry policy
    /// belongs to the caller.
    pub fn wait_for(&mut self, expected: Option<u16>, timeout: Duration) -> Result<ResponsePacket> {
        self.wait(expected, timeout)
    }

    /// Send and await the reply carrying the same opcode. Commands that
    /// answer with the keep-alive sentinel instead should pair
    /// [`send`](Self::send) with an explicit
    /// [`wait_for`](Self::wait_for).
    pub fn exchange(&mut self, packet: &CommandPacket, timeout: Duration) -> Result<ResponsePacket> {
        self.send(packet)?;
        self.wait(Some(packet.cmd), timeout)
    }

    /// Verify the link end to end with an echo ping.
    pub fn ping(&mut self, timeout: Duration) -> Result<()> {
        let token = ping_cmds::default_token();
        let reply = self.exchange(&ping_cmds::ping_with(&token), timeout)?;
        ping_cmds::check_echo(&token, &reply)
    }

    /// Tell the device the session is over and drop the connection.
    /// Best effort: a peer that already went away is not an error.
    pub fn close(mut self) {
        if let Err(e) = self.send_frame(&device_cmds::quit_session()) {
            log::debug!("quit notification failed: {}", e);
        }
    }
}
