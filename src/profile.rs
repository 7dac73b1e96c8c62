//! Chrome-trace-format profiling sink.
//!
//! The output is a JSON document with a `traceEvents` array of paired
//! `B`/`E` events; load it in a chrome://tracing-compatible viewer. Spans
//! are RAII guards, so a phase is timed by holding its [Span] for the
//! duration of the work.

use std::{
    cell::RefCell,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
    time::Instant,
};

/// An open trace file and the instant all timestamps are relative to.
pub struct Profiler {
    /// The trace file, shared with the [Span] guards
    out: RefCell<BufWriter<File>>,
    /// Timestamp origin
    start: Instant,
}

/// An in-progress span; dropping it writes the closing event.
pub struct Span<'a> {
    /// The profiler this span writes to
    profiler: &'a Profiler,
    /// Label of both paired events
    name: &'static str,
}

impl Profiler {
    /// Creates the trace file and writes the document preamble.
    ///
    /// # Errors
    ///
    /// Fails if the file cannot be created or written.
    pub fn create(path: &Path) -> io::Result<Self> {
        let mut out = BufWriter::new(File::create(path)?);
        write!(out, "{{\n\"traceEvents\": [\n")?;

        Ok(Self {
            out: RefCell::new(out),
            start: Instant::now(),
        })
    }

    /// Opens a span; the matching end event is written when the returned
    /// guard drops.
    #[must_use]
    pub fn span(&self, name: &'static str) -> Span<'_> {
        self.event(name, 'B');
        Span {
            profiler: self,
            name,
        }
    }

    /// Writes one event with a microsecond timestamp relative to creation.
    /// Write failures here are swallowed; span guards cannot propagate them.
    fn event(&self, name: &str, phase: char) {
        let ts = self.start.elapsed().as_secs_f64() * 1e6;
        let _ = write!(
            self.out.borrow_mut(),
            "{{\"pid\": 1, \"ts\": {}, \"name\": \"{}\", \"ph\": \"{}\"}},\n",
            ts, name, phase
        );
    }

    /// Terminates the `traceEvents` array and the document, flushing the
    /// file.
    ///
    /// # Errors
    ///
    /// Fails on I/O errors while writing the trailer.
    pub fn finish(self) -> io::Result<()> {
        let mut out = self.out.into_inner();
        write!(out, "{{}}\n]\n}}\n")?;
        out.flush()
    }
}

impl Drop for Span<'_> {
    fn drop(&mut self) {
        self.profiler.event(self.name, 'E');
    }
}
