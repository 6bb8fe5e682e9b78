//! Writers for observing what a bar draws from other threads.

#![allow(dead_code)]

use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Records every `write` call separately. Clones share the same record.
#[derive(Clone, Default)]
pub struct Recorder {
    writes: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl Recorder {
    pub fn count(&self) -> usize {
        self.writes.lock().len()
    }

    pub fn lines(&self) -> Vec<String> {
        self.writes
            .lock()
            .iter()
            .map(|w| String::from_utf8_lossy(w).into_owned())
            .collect()
    }
}

impl Write for Recorder {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writes.lock().push(buf.to_vec());
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Accepts a single byte per `write` call, so that any unguarded concurrent
/// writers would interleave their output.
#[derive(Clone, Default)]
pub struct Trickle {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl Trickle {
    pub fn contents(&self) -> String {
        String::from_utf8(self.bytes.lock().clone()).unwrap()
    }
}

impl Write for Trickle {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match buf.first() {
            Some(b) => {
                self.bytes.lock().push(*b);
                thread::yield_now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Poll `cond` until it holds, giving up after `limit`.
pub fn wait_for<F: Fn() -> bool>(limit: Duration, cond: F) -> bool {
    let start = Instant::now();

    while start.elapsed() < limit {
        if cond() {
            return true;
        }
        thread::sleep(Duration::from_millis(1));
    }

    cond()
}
