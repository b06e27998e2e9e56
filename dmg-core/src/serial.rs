//! Serial port plumbing.
//!
//! The link cable itself is not emulated; bytes written to the serial data
//! register are handed to a [`SerialSink`]. Blargg-style test ROMs report
//! their results over this channel, so the default sink prints each byte to
//! stderr in a greppable format.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

pub trait SerialSink {
    fn transmit(&mut self, byte: u8);
}

/// Sink that prints every transmitted byte to stderr as `[SERIAL]: 'c'`.
pub struct DebugConsoleSink;

impl SerialSink for DebugConsoleSink {
    fn transmit(&mut self, byte: u8) {
        let mut stderr = io::stderr().lock();
        // Ignore write failures; losing debug output should not kill the core
        let _ = writeln!(stderr, "[SERIAL]: '{}'", byte as char);
    }
}

/// Sink that appends transmitted bytes to a shared buffer, so the contents
/// can be inspected after the emulator has run.
pub struct BufferSink {
    buffer: Rc<RefCell<Vec<u8>>>,
}

impl BufferSink {
    pub fn new() -> (Self, Rc<RefCell<Vec<u8>>>) {
        let buffer = Rc::new(RefCell::new(Vec::new()));
        (Self { buffer: Rc::clone(&buffer) }, buffer)
    }
}

impl SerialSink for BufferSink {
    fn transmit(&mut self, byte: u8) {
        self.buffer.borrow_mut().push(byte);
    }
}
