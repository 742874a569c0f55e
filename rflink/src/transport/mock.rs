// rflink/src/transport/mock.rs

use std::collections::VecDeque;
use std::time::Duration;

use crate::transport::traits::Transport;
use crate::{Error, Result};

/// Mock transport for unit tests. It records written bytes and serves
/// queued chunks on read, so tests control exactly where the byte
/// stream splits.
#[derive(Debug, Default)]
pub struct MockTransport {
    /// Everything the session wrote, one entry per write call.
    pub sent: Vec<Vec<u8>>,
    /// Pending read chunks, served front first.
    pub chunks: VecDeque<Vec<u8>>,
    /// Testing hook: number of read calls that should fail with Timeout
    /// even while chunks are queued.
    pub read_failures: usize,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue one contiguous read chunk.
    pub fn push_bytes(&mut self, bytes: Vec<u8>) {
        self.chunks.push_back(bytes);
    }

    /// Queue bytes split into pieces of at most `piece` bytes, to
    /// exercise incremental frame assembly.
    pub fn push_chunked(&mut self, bytes: &[u8], piece: usize) {
        for part in bytes.chunks(piece.max(1)) {
            self.chunks.push_back(part.to_vec());
        }
    }

    /// Make the next `n` reads time out before queued chunks resume.
    pub fn fail_reads(&mut self, n: usize) {
        self.read_failures = n;
    }

    /// Concatenation of everything written so far.
    pub fn written(&self) -> Vec<u8> {
        self.sent.concat()
    }
}

impl Transport for MockTransport {
    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.sent.push(data.to_vec());
        Ok(())
    }

    fn read(&mut self, max: usize, _timeout: Duration) -> Result<Vec<u8>> {
        if self.read_failures > 0 {
            self.read_failures -= 1;
            return Err(Error::Timeout);
        }
        let Some(front) = self.chunks.front_mut() else {
            return Err(Error::Timeout);
        };
        if front.len() <= max {
            let chunk = self.chunks.pop_front().unwrap_or_default();
            Ok(chunk)
        } else {
            let rest = front.split_off(max);
            let head = std::mem::replace(front, rest);
            Ok(head)
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
