//! In-memory capture of `tracing` output.
//!
//! [`capture_logs`] installs a plain-text `fmt` subscriber for the duration of
//! a closure and returns everything it wrote, so tests can assert on log
//! lines without touching global state.
//!
//! # Examples
//!
//! ```
//! use backfill_test_helpers::logs::capture_logs;
//!
//! let (value, logs) = capture_logs("debug", || {
//!     tracing::debug!(answer = 42, "computed");
//!     42
//! });
//! assert_eq!(value, 42);
//! assert!(logs.contains("computed"));
//! assert!(logs.contains("answer=42"));
//! ```

use std::io;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;

/// Shared byte buffer that a `fmt` subscriber can write into.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    /// Returns everything written so far as UTF-8, replacing invalid bytes.
    #[must_use]
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for LogBuffer {
    type Writer = Self;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Runs `f` with a thread-local subscriber and returns its output alongside
/// the captured log text.
///
/// `filter` uses `EnvFilter` directive syntax, for example `"trace"` or
/// `"backfill=debug"`. An unparsable directive captures nothing.
pub fn capture_logs<F, T>(filter: &str, f: F) -> (T, String)
where
    F: FnOnce() -> T,
{
    let buffer = LogBuffer::default();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("off")))
        .with_writer(buffer.clone())
        .with_ansi(false)
        .without_time()
        .finish();
    let output = tracing::subscriber::with_default(subscriber, f);
    (output, buffer.contents())
}
