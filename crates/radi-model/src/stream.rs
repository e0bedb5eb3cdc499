use std::{
    fmt,
    io::{self, Cursor, Read, Write},
    sync::{Arc, Mutex, MutexGuard},
};

/// Symbolic name of the process standard output.
pub const STDOUT: &str = "stdout";
/// Symbolic name of the process standard error.
pub const STDERR: &str = "stderr";
/// Symbolic name of the process standard input.
pub const STDIN: &str = "stdin";

/// Shared, clonable handle to a writable stream.
///
/// Clones point at the same underlying writer; [`OutputStream::same_stream`] compares identity.
#[derive(Clone)]
pub struct OutputStream {
    name: String,
    inner: Arc<Mutex<dyn Write + Send>>,
}

impl OutputStream {
    /// Wrap a writer under the given display name.
    pub fn new<W>(name: impl Into<String>, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            name: name.into(),
            inner: Arc::new(Mutex::new(writer)),
        }
    }

    /// Display name (e.g. `stdout`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if both handles write to the same underlying stream.
    pub fn same_stream(&self, other: &OutputStream) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    fn lock(&self) -> io::Result<MutexGuard<'_, dyn Write + Send + 'static>> {
        self.inner
            .lock()
            .map_err(|_| io::Error::other(format!("output stream '{}' poisoned", self.name)))
    }
}

impl Write for OutputStream {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock()?.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.lock()?.flush()
    }
}

impl fmt::Debug for OutputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutputStream").field("name", &self.name).finish()
    }
}

/// Shared, clonable handle to a readable stream.
#[derive(Clone)]
pub struct InputStream {
    name: String,
    inner: Arc<Mutex<dyn Read + Send>>,
}

impl InputStream {
    /// Wrap a reader under the given display name.
    pub fn new<R>(name: impl Into<String>, reader: R) -> Self
    where
        R: Read + Send + 'static,
    {
        Self {
            name: name.into(),
            inner: Arc::new(Mutex::new(reader)),
        }
    }

    /// Display name (e.g. `stdin`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if both handles read from the same underlying stream.
    pub fn same_stream(&self, other: &InputStream) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Read for InputStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner
            .lock()
            .map_err(|_| io::Error::other(format!("input stream '{}' poisoned", self.name)))?
            .read(buf)
    }
}

impl fmt::Debug for InputStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InputStream").field("name", &self.name).finish()
    }
}

/// Capability providing the process-wide streams that symbolic flag values refer to.
///
/// Injected into flag resolution instead of reaching for globals, so tests can substitute in-memory streams.
pub trait Streams {
    /// Standard output handle.
    fn stdout(&self) -> OutputStream;
    /// Standard error handle.
    fn stderr(&self) -> OutputStream;
    /// Standard input handle.
    fn stdin(&self) -> InputStream;

    /// Resolve a symbolic output name. Only `stdout` and `stderr` are defined.
    fn output(&self, name: &str) -> Option<OutputStream> {
        match name {
            STDOUT => Some(self.stdout()),
            STDERR => Some(self.stderr()),
            _ => None,
        }
    }

    /// Resolve a symbolic input name. Only `stdin` is defined.
    fn input(&self, name: &str) -> Option<InputStream> {
        match name {
            STDIN => Some(self.stdin()),
            _ => None,
        }
    }
}

/// The real process streams.
///
/// Handles are created once, so repeated lookups return the same stream.
#[derive(Debug, Clone)]
pub struct ProcessStreams {
    stdout: OutputStream,
    stderr: OutputStream,
    stdin: InputStream,
}

impl ProcessStreams {
    pub fn new() -> Self {
        Self {
            stdout: OutputStream::new(STDOUT, io::stdout()),
            stderr: OutputStream::new(STDERR, io::stderr()),
            stdin: InputStream::new(STDIN, io::stdin()),
        }
    }
}

impl Default for ProcessStreams {
    fn default() -> Self {
        Self::new()
    }
}

impl Streams for ProcessStreams {
    fn stdout(&self) -> OutputStream {
        self.stdout.clone()
    }

    fn stderr(&self) -> OutputStream {
        self.stderr.clone()
    }

    fn stdin(&self) -> InputStream {
        self.stdin.clone()
    }
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn contents(&self) -> Vec<u8> {
        match self.0.lock() {
            Ok(buf) => buf.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .map_err(|_| io::Error::other("memory buffer poisoned"))?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// In-memory streams: captured stdout/stderr and a fixed stdin payload.
#[derive(Clone)]
pub struct MemoryStreams {
    stdout_buf: SharedBuffer,
    stderr_buf: SharedBuffer,
    stdout: OutputStream,
    stderr: OutputStream,
    stdin: InputStream,
}

impl MemoryStreams {
    /// Create streams whose stdin yields `input`.
    pub fn new(input: impl Into<Vec<u8>>) -> Self {
        let stdout_buf = SharedBuffer::default();
        let stderr_buf = SharedBuffer::default();
        Self {
            stdout: OutputStream::new(STDOUT, stdout_buf.clone()),
            stderr: OutputStream::new(STDERR, stderr_buf.clone()),
            stdin: InputStream::new(STDIN, Cursor::new(input.into())),
            stdout_buf,
            stderr_buf,
        }
    }

    /// Everything written to stdout so far.
    pub fn stdout_contents(&self) -> Vec<u8> {
        self.stdout_buf.contents()
    }

    /// Everything written to stderr so far.
    pub fn stderr_contents(&self) -> Vec<u8> {
        self.stderr_buf.contents()
    }
}

impl Default for MemoryStreams {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl fmt::Debug for MemoryStreams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStreams")
            .field("stdout_len", &self.stdout_contents().len())
            .field("stderr_len", &self.stderr_contents().len())
            .finish()
    }
}

impl Streams for MemoryStreams {
    fn stdout(&self) -> OutputStream {
        self.stdout.clone()
    }

    fn stderr(&self) -> OutputStream {
        self.stderr.clone()
    }

    fn stdin(&self) -> InputStream {
        self.stdin.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbolic_output_names_resolve() {
        let streams = MemoryStreams::default();

        let out = streams.output("stdout").expect("stdout is defined");
        let err = streams.output("stderr").expect("stderr is defined");

        assert!(out.same_stream(&streams.stdout()));
        assert!(err.same_stream(&streams.stderr()));
        assert!(!out.same_stream(&err));
    }

    #[test]
    fn unknown_symbolic_names_are_none() {
        let streams = MemoryStreams::default();

        for name in ["", "bogus", "STDOUT", "stdin"] {
            assert!(streams.output(name).is_none(), "output {name:?}");
        }
        for name in ["", "stdout", "Stdin"] {
            assert!(streams.input(name).is_none(), "input {name:?}");
        }
        assert!(streams.input("stdin").is_some());
    }

    #[test]
    fn memory_stdout_captures_writes() {
        let streams = MemoryStreams::default();
        let mut out = streams.stdout();

        out.write_all(b"hello ").unwrap();
        writeln!(out, "world").unwrap();
        out.flush().unwrap();

        assert_eq!(streams.stdout_contents(), b"hello world\n");
        assert!(streams.stderr_contents().is_empty());
    }

    #[test]
    fn memory_stdin_yields_payload() {
        let streams = MemoryStreams::new("line one\n");
        let mut input = streams.stdin();

        let mut got = String::new();
        input.read_to_string(&mut got).unwrap();
        assert_eq!(got, "line one\n");
    }

    #[test]
    fn process_streams_are_stable_across_lookups() {
        let streams = ProcessStreams::new();
        assert!(streams.stdout().same_stream(&streams.stdout()));
        assert!(streams.stdin().same_stream(&streams.stdin()));
        assert_eq!(streams.stderr().name(), "stderr");
    }
}
