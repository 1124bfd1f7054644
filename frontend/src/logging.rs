use std::io;

use gloo_console::log;
use tracing_subscriber::filter::LevelFilter;

/// Collects one formatted event and prints it to the browser console when dropped.
#[derive(Default)]
struct ConsoleWriter {
    line: Vec<u8>,
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.line.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.line);
        let line = line.trim_end();
        if !line.is_empty() {
            log!(line.to_owned());
        }
    }
}

/// Routes `tracing` events from the library to the console. No timestamps,
/// the clock is not available on wasm.
pub fn init() {
    tracing_subscriber::fmt()
        .with_writer(ConsoleWriter::default)
        .with_max_level(LevelFilter::DEBUG)
        .with_target(false)
        .without_time()
        .init();
}
