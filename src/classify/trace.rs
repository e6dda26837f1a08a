use std::backtrace::BacktraceStatus;
use std::fmt::{self, Write};
use std::panic::{self, AssertUnwindSafe};

use crate::classify::ClassifyOptions;
use crate::failure::Failure;

pub const TRUNCATION_MARKER: &str = "\n... (trace truncated)";

/// `fmt::Write` sink that stops accepting text once `limit` bytes are held,
/// so the trace never grows past the configured cap while being built.
struct BoundedWriter {
    out: String,
    limit: usize,
    truncated: bool,
}

impl BoundedWriter {
    fn new(limit: usize) -> Self {
        Self {
            out: String::new(),
            limit,
            truncated: false,
        }
    }

    fn finish(mut self) -> String {
        if self.truncated {
            self.out.push_str(TRUNCATION_MARKER);
        }
        self.out
    }
}

impl Write for BoundedWriter {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let room = self.limit.saturating_sub(self.out.len());
        if s.len() <= room {
            self.out.push_str(s);
            return Ok(());
        }
        let mut cut = room;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        self.out.push_str(&s[..cut]);
        self.truncated = true;
        Err(fmt::Error)
    }
}

/// Renders the operator-facing trace for `failure`.
///
/// `description` is the failure's already-computed description, so user
/// `Display` code runs once per classification. Never panics: if rendering
/// blows up the trace degrades to the failure's type name.
pub fn render(failure: &Failure, description: &str, options: &ClassifyOptions) -> String {
    let mut writer = BoundedWriter::new(options.max_trace_len);
    let rendered = panic::catch_unwind(AssertUnwindSafe(|| {
        // Err only means the limit was reached; `finish` marks that.
        let _ = write_full(&mut writer, failure, description, options.include_backtrace);
    }));
    match rendered {
        Ok(()) => writer.finish(),
        Err(_) => format!("{} (trace unavailable)", failure.type_name()),
    }
}

/// Type name and capture location only. Used when memory is exhausted:
/// no user code runs, no backtrace is symbolized, and the output is bounded
/// by `max_trace_len`.
pub fn render_brief(failure: &Failure, options: &ClassifyOptions) -> String {
    let mut writer = BoundedWriter::new(options.max_trace_len);
    let _ = write_header(&mut writer, failure, "");
    writer.finish()
}

fn write_header(out: &mut impl Write, failure: &Failure, description: &str) -> fmt::Result {
    out.write_str(failure.type_name())?;
    if !description.is_empty() {
        write!(out, ": {description}")?;
    }
    let location = failure.location();
    write!(
        out,
        "\n  at {}:{}:{}",
        location.file(),
        location.line(),
        location.column()
    )
}

fn write_full(
    out: &mut impl Write,
    failure: &Failure,
    description: &str,
    include_backtrace: bool,
) -> fmt::Result {
    write_header(out, failure, description)?;

    let mut causes = failure.chain().skip(1).enumerate().peekable();
    if causes.peek().is_some() {
        out.write_str("\nCaused by:")?;
        for (i, cause) in causes {
            write!(out, "\n  {i}: {cause}")?;
        }
    }

    let backtrace = failure.backtrace();
    if include_backtrace && backtrace.status() == BacktraceStatus::Captured {
        write!(out, "\nStack backtrace:\n{backtrace}")?;
    }
    Ok(())
}
