// rflink/src/session/builder.rs

use std::time::Duration;

use crate::session::handle::{Ready, Session, Uninitialized};
use crate::transport::Transport;
use crate::{Error, Result};

/// Helper to construct a session with optional configuration.
pub struct SessionBuilder {
    transport: Option<Box<dyn Transport>>,
    handshake_budget: Option<Duration>,
}

impl SessionBuilder {
    pub fn new() -> Self {
        Self {
            transport: None,
            handshake_budget: None,
        }
    }

    /// Provide an already-open transport, e.g. a
    /// [`TcpTransport`](crate::transport::tcp::TcpTransport) or a mock.
    pub fn with_transport(mut self, transport: Box<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Override the per-step handshake budget.
    pub fn with_handshake_budget(mut self, budget: Duration) -> Self {
        self.handshake_budget = Some(budget);
        self
    }

    /// Consume the builder and return an unnegotiated session.
    pub fn attach(self) -> Result<Session<Uninitialized>> {
        let Some(transport) = self.transport else {
            return Err(Error::DeviceNotFound);
        };
        let mut session = Session::attach(transport);
        if let Some(budget) = self.handshake_budget {
            session = session.with_handshake_budget(budget);
        }
        Ok(session)
    }

    /// Attach and run the handshake in one go.
    pub fn connect(self) -> Result<Session<Ready>> {
        self.attach()?.handshake()
    }
}

impl Default for SessionBuilder {
    fn default() -> Self {
        Self::new()
    }
}
