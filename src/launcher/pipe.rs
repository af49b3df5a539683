//! Byte relay between a child process and our own stdio

use std::io::{self, ErrorKind, Read, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use tracing::debug;

const CHUNK: usize = 8 * 1024;

/// Copies one stream into another on its own thread
pub struct Pipe {
    name: &'static str,
    stop: Option<Arc<AtomicBool>>,
}

impl Pipe {
    /// A relay that runs until end of input or a closed output
    pub fn new(name: &'static str) -> Self {
        Self { name, stop: None }
    }

    /// Also end once `stop` is set and the current read returns
    #[must_use]
    pub fn with_stop(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = Some(stop);
        self
    }

    fn stopped(&self) -> bool {
        self.stop.as_ref().is_some_and(|s| s.load(Ordering::SeqCst))
    }

    /// Start relaying `from` into `to`
    pub fn start<R, W>(self, from: R, to: W) -> io::Result<JoinHandle<()>>
    where
        R: Read + Send + 'static,
        W: Write + Send + 'static,
    {
        thread::Builder::new()
            .name(format!("pipe-{}", self.name))
            .spawn(move || self.relay(from, to))
    }

    fn relay<R: Read, W: Write>(&self, mut from: R, mut to: W) {
        let mut buffer = [0u8; CHUNK];
        while !self.stopped() {
            let read = match from.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!(pipe = self.name, error = %e, "read failed");
                    break;
                }
            };
            if self.stopped() {
                break;
            }
            if let Err(e) = to.write_all(&buffer[..read]).and_then(|()| to.flush()) {
                if e.kind() != ErrorKind::BrokenPipe {
                    debug!(pipe = self.name, error = %e, "write failed");
                }
                break;
            }
        }
        debug!(pipe = self.name, "closed");
    }
}
