//! Log redaction for health-metric values.
//!
//! Request bodies and form dumps carry the user's vitals. Anything that looks
//! like `"<field>": <value>` or `<field>=<value>` for a registered field has
//! its value replaced before the line reaches a log sink, e.g.
//! `{"age":30,"ap_hi":120}` becomes `{"age":[REDACTED],"ap_hi":[REDACTED]}`.
//!
//! Prefer not logging values at all; this is the fallback for the cases
//! that slip through (error bodies echoed by the server, debug dumps).

use regex::Regex;
use std::sync::OnceLock;
use tracing_subscriber::fmt::MakeWriter;

use crate::domain::list_fields;

const REDACTED: &str = "[REDACTED]";

/// Per-call cap on sanitized input; longer input is truncated.
const DEFAULT_SANITIZE_MAX_BYTES: usize = 16 * 1024;

struct MetricPatterns {
    json_pair: Regex,
    assignment: Regex,
}

static PATTERNS: OnceLock<Option<MetricPatterns>> = OnceLock::new();

fn max_sanitize_bytes() -> usize {
    std::env::var("HRIDAY_SANITIZE_MAX_BYTES")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .filter(|&v| v > 0)
        .unwrap_or(DEFAULT_SANITIZE_MAX_BYTES)
}

fn truncate_to_char_boundary(input: &str, max_bytes: usize) -> (&str, bool) {
    if input.len() <= max_bytes {
        return (input, false);
    }

    let mut end = max_bytes;
    while end > 0 && !input.is_char_boundary(end) {
        end -= 1;
    }
    (&input[..end], true)
}

fn build_patterns() -> Option<MetricPatterns> {
    let names = list_fields()
        .iter()
        .map(|f| regex::escape(f.name))
        .collect::<Vec<_>>()
        .join("|");

    // Quoted key, optional escaped quotes (Debug output), then a string or bare value.
    let json_pair = Regex::new(&format!(
        r#"(\\?"(?:{names})\\?"\s*:\s*)(?:\\?"[^"\\]*\\?"|[^,}}\s\]]+)"#
    ))
    .ok()?;
    let assignment = Regex::new(&format!(r#"\b((?:{names})\s*=\s*)(?:"[^"]*"|[^,\s}}\]]+)"#))
        .ok()?;

    Some(MetricPatterns {
        json_pair,
        assignment,
    })
}

fn patterns() -> Option<&'static MetricPatterns> {
    PATTERNS.get_or_init(build_patterns).as_ref()
}

/// Redact registered health-metric values from `input`.
#[must_use]
pub fn sanitize(input: &str) -> String {
    sanitize_with_limit(input, max_sanitize_bytes())
}

fn sanitize_with_limit(input: &str, max_bytes: usize) -> String {
    let (prefix, truncated) = truncate_to_char_boundary(input, max_bytes);

    let mut out = match patterns() {
        Some(p) => {
            let replacement = format!("${{1}}{REDACTED}");
            let step = p.json_pair.replace_all(prefix, replacement.as_str());
            p.assignment
                .replace_all(&step, replacement.as_str())
                .into_owned()
        }
        // Patterns are built from static names; fail closed if that ever breaks.
        None => REDACTED.to_string(),
    };

    if truncated {
        out.push_str(" [TRUNCATED]");
    }
    out
}

/// A `tracing_subscriber` writer wrapper that sanitizes each formatted log
/// line before it is written to the underlying sink.
#[derive(Debug, Clone)]
pub struct SanitizingMakeWriter<M> {
    inner: M,
}

impl<M> SanitizingMakeWriter<M> {
    #[must_use]
    pub fn new(inner: M) -> Self {
        Self { inner }
    }
}

pub struct SanitizingWriter<W: std::io::Write> {
    inner: W,
    buffer: Vec<u8>,
}

impl<W: std::io::Write> SanitizingWriter<W> {
    fn new(inner: W) -> Self {
        Self {
            inner,
            buffer: Vec::new(),
        }
    }

    fn flush_lines(&mut self) -> std::io::Result<()> {
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            let sanitized = sanitize(&String::from_utf8_lossy(&line));
            self.inner.write_all(sanitized.as_bytes())?;
        }
        Ok(())
    }
}

impl<W: std::io::Write> std::io::Write for SanitizingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.buffer.extend_from_slice(buf);

        // A formatter writing a huge line with no newline must not buffer forever.
        let hard_cap = max_sanitize_bytes().saturating_mul(2);
        if self.buffer.len() > hard_cap {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.inner.write_all(b"\n")?;
            self.buffer.clear();
            return Ok(buf.len());
        }

        self.flush_lines()?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_lines()?;
        if !self.buffer.is_empty() {
            let sanitized = sanitize(&String::from_utf8_lossy(&self.buffer));
            self.inner.write_all(sanitized.as_bytes())?;
            self.buffer.clear();
        }
        self.inner.flush()
    }
}

impl<W: std::io::Write> Drop for SanitizingWriter<W> {
    fn drop(&mut self) {
        // tracing-subscriber drops the writer after each event without flushing.
        let _ = std::io::Write::flush(self);
    }
}

impl<'a, M> MakeWriter<'a> for SanitizingMakeWriter<M>
where
    M: MakeWriter<'a>,
{
    type Writer = SanitizingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        SanitizingWriter::new(self.inner.make_writer())
    }
}
