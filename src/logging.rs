//! Logging
//!
//! `tracing` output formatted by `tracing-subscriber` and written to the
//! browser console, one console call per event.

use std::io;

use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Copy)]
struct ConsoleWriter {
    level: Level,
}

/// Buffers one formatted event and hands it to the console on drop
struct ConsoleLine {
    level: Level,
    buf: Vec<u8>,
}

impl<'a> MakeWriter<'a> for ConsoleWriter {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleLine { level: self.level, buf: Vec::new() }
    }

    fn make_writer_for(&'a self, meta: &tracing::Metadata<'_>) -> Self::Writer {
        ConsoleLine { level: *meta.level(), buf: Vec::new() }
    }
}

impl io::Write for ConsoleLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        let value = wasm_bindgen::JsValue::from_str(line);
        match self.level {
            Level::ERROR => web_sys::console::error_1(&value),
            Level::WARN => web_sys::console::warn_1(&value),
            Level::DEBUG | Level::TRACE => web_sys::console::debug_1(&value),
            _ => web_sys::console::log_1(&value),
        }
    }
}

/// Install the global subscriber. Safe to call more than once.
pub fn init(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_writer(ConsoleWriter { level: Level::INFO })
        .with_max_level(level)
        .with_ansi(false)
        .without_time()
        .try_init();
}
