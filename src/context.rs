//! Process-scoped trace state: configuration, serial counter, output sink.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::config::TraceConfig;

static GLOBAL: Lazy<TraceContext> = Lazy::new(|| {
    let config = match TraceConfig::from_env() {
        Ok(config) => config,
        // A bad TRACELEVEL would silently corrupt every later gating
        // decision, so abort instead of guessing a threshold.
        Err(e) => panic!("tracer: {e}"),
    };
    TraceContext::new(config)
});

/// Shared state consulted by every [`TraceHandle`](crate::TraceHandle).
///
/// Owns the gating configuration, the counter handing out unique ascending
/// serials, and the sink trace lines are written to. The process-wide
/// instance behind [`TraceContext::global`] reads its configuration from the
/// environment once and writes to stderr; tests and embedders can construct
/// their own with [`TraceContext::with_writer`].
pub struct TraceContext {
    config: TraceConfig,
    counter: AtomicU64,
    sink: Mutex<Box<dyn Write + Send>>,
}

impl TraceContext {
    /// Create a context that writes to stderr.
    pub fn new(config: TraceConfig) -> Self {
        Self::with_writer(config, Box::new(io::stderr()))
    }

    /// Create a context that writes to an arbitrary sink.
    pub fn with_writer(config: TraceConfig, writer: Box<dyn Write + Send>) -> Self {
        Self {
            config,
            counter: AtomicU64::new(0),
            sink: Mutex::new(writer),
        }
    }

    /// The process-wide context, initialized from the environment on first
    /// use. Concurrent first calls observe one fully-initialized instance.
    ///
    /// # Panics
    ///
    /// Panics on first use if `TRACELEVEL` is set to a non-integer value.
    pub fn global() -> &'static TraceContext {
        &GLOBAL
    }

    /// The gating configuration this context was built with.
    pub fn config(&self) -> &TraceConfig {
        &self.config
    }

    /// Hand out the next serial and write the entry line for it.
    ///
    /// Both happen under the sink lock, so serials appear in the output in
    /// the order they were assigned, even under concurrent construction.
    pub(crate) fn emit_entry(&self, group: &str, level: i32, message: &str) -> u64 {
        let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        let serial = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let _ = writeln!(sink, "Tracer: [{serial}][{group}, {level}] {message}");
        serial
    }

    /// Write one trace line for an already-armed site.
    pub(crate) fn emit(&self, serial: u64, group: &str, level: i32, message: &str) {
        let mut sink = self.sink.lock().unwrap_or_else(|e| e.into_inner());
        let _ = writeln!(sink, "Tracer: [{serial}][{group}, {level}] {message}");
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};

    /// Cloneable writer over a shared in-memory buffer, for capturing trace
    /// output in tests.
    #[derive(Clone, Default)]
    pub(crate) struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        pub(crate) fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }

        pub(crate) fn lines(&self) -> Vec<String> {
            self.contents().lines().map(str::to_owned).collect()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }
}
