use std::io::{self, Write};

/// Output side of the machine.
///
/// The core never touches stdout directly; PRN, PRA and the optional halt
/// echo all go through this trait so frontends and tests can decide where
/// the bytes end up.
pub trait Console {
    /// Write a register value as a decimal number followed by a newline.
    fn write_number(&mut self, value: u8) -> io::Result<()>;
    /// Write a register value as a single ASCII character.
    fn write_char(&mut self, value: u8) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Console backed by the process's standard output.
pub struct StdoutConsole {
    out: io::LineWriter<io::Stdout>,
}

impl StdoutConsole {
    pub fn new() -> Self {
        Self {
            out: io::LineWriter::new(io::stdout()),
        }
    }
}

impl Default for StdoutConsole {
    fn default() -> Self {
        Self::new()
    }
}

impl Console for StdoutConsole {
    fn write_number(&mut self, value: u8) -> io::Result<()> {
        writeln!(self.out, "{}", value)
    }

    fn write_char(&mut self, value: u8) -> io::Result<()> {
        self.out.write_all(&[value])
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl Drop for StdoutConsole {
    fn drop(&mut self) {
        if let Err(err) = self.out.flush() {
            log::warn!("Failed to flush stdout: {}", err);
        }
    }
}

/// Console that keeps everything in memory.
#[derive(Default, Debug, Clone)]
pub struct BufferConsole {
    bytes: Vec<u8>,
}

impl BufferConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Captured output as text. Non-UTF-8 bytes from PRA are replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes).into_owned()
    }

    /// Numbers written with `write_number`, one per captured line.
    ///
    /// Lines that do not parse (e.g. PRA output) are skipped.
    pub fn numbers(&self) -> Vec<u8> {
        self.text()
            .lines()
            .filter_map(|line| line.trim().parse().ok())
            .collect()
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}

impl Console for BufferConsole {
    fn write_number(&mut self, value: u8) -> io::Result<()> {
        writeln!(self.bytes, "{}", value)
    }

    fn write_char(&mut self, value: u8) -> io::Result<()> {
        self.bytes.push(value);
        Ok(())
    }
}
