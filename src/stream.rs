//! Single-byte blocking I/O over `std::io` streams.

use std::io::{self, Read, Write};

/// Read exactly one byte, blocking.
///
/// Returns `Ok(None)` on end of stream. Interrupted reads are retried.
pub fn read_byte<R: Read + ?Sized>(input: &mut R) -> io::Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match input.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

/// Write exactly one byte, blocking.
///
/// A write that accepts zero bytes is reported as [`io::ErrorKind::WriteZero`].
/// Nothing is flushed; the sink's buffering belongs to the caller.
pub fn write_byte<W: Write + ?Sized>(output: &mut W, byte: u8) -> io::Result<()> {
    loop {
        match output.write(&[byte]) {
            Ok(0) => {
                return Err(io::Error::new(
                    io::ErrorKind::WriteZero,
                    "output stream accepted zero bytes",
                ));
            }
            Ok(_) => return Ok(()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Misbehaving streams shared by the engine tests.

    use std::io::{self, Read, Write};

    /// A reader that fails every call with the given kind.
    pub struct FailingReader(pub io::ErrorKind);

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(self.0, "read failed"))
        }
    }

    /// A writer that accepts `budget` bytes, then fails with the given kind.
    pub struct FailingWriter {
        pub written: Vec<u8>,
        pub budget: usize,
        pub kind: io::ErrorKind,
    }

    impl FailingWriter {
        pub fn after(budget: usize, kind: io::ErrorKind) -> Self {
            Self {
                written: Vec::new(),
                budget,
                kind,
            }
        }
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.budget == 0 {
                return Err(io::Error::new(self.kind, "write failed"));
            }
            self.budget -= 1;
            self.written.push(buf[0]);
            Ok(1)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// A writer that always reports zero bytes written.
    pub struct ZeroWriter;

    impl Write for ZeroWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Ok(0)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// A reader that is interrupted once before each byte it yields.
    pub struct InterruptingReader {
        pub data: Vec<u8>,
        pub interrupt_next: bool,
    }

    impl Read for InterruptingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.interrupt_next {
                self.interrupt_next = false;
                return Err(io::Error::from(io::ErrorKind::Interrupted));
            }
            self.interrupt_next = true;
            if self.data.is_empty() {
                return Ok(0);
            }
            buf[0] = self.data.remove(0);
            Ok(1)
        }
    }
}
