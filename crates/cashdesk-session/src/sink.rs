//! # Notice Sinks
//!
//! Delivery of ledger notices outside the pure core.
//!
//! - [`ConsoleSink`] prints one line per notice (stdout by default), which is
//!   what a person at the register reads.
//! - [`TracingSink`] turns notices into tracing events for the log.

use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

use cashdesk_core::{Notice, NoticeSink};
use tracing::{info, warn};

// =============================================================================
// Console
// =============================================================================

/// Writes each notice as a line of text.
pub struct ConsoleSink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    /// A sink that prints to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }

    /// A sink that writes to any writer (a file, a buffer in tests).
    pub fn new(out: impl Write + Send + 'static) -> Self {
        ConsoleSink {
            out: Mutex::new(Box::new(out)),
        }
    }
}

impl NoticeSink for ConsoleSink {
    fn publish(&self, notice: &Notice) {
        let mut out = self.out.lock().unwrap_or_else(PoisonError::into_inner);
        if let Err(err) = writeln!(out, "{notice}").and_then(|()| out.flush()) {
            warn!(%err, %notice, "Failed to print notice");
        }
    }
}

impl std::fmt::Debug for ConsoleSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleSink").finish_non_exhaustive()
    }
}

// =============================================================================
// Tracing
// =============================================================================

/// Logs notices: refusals at WARN, applied discounts at INFO.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl NoticeSink for TracingSink {
    fn publish(&self, notice: &Notice) {
        match notice {
            Notice::InvalidDiscount { reason } => warn!(%reason, "{notice}"),
            Notice::NoDiscountToApply => warn!("{notice}"),
            Notice::DiscountApplied { total } => info!(total = %total.amount(), "{notice}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashdesk_core::{Money, ValidationError};
    use std::sync::Arc;

    /// Writer that keeps what was written where the test can read it.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_console_sink_prints_one_line_per_notice() {
        let buffer = SharedBuffer::default();
        let sink = ConsoleSink::new(buffer.clone());

        sink.publish(&Notice::NoDiscountToApply);
        sink.publish(&Notice::DiscountApplied {
            total: Money::from_cents(8100),
        });

        assert_eq!(
            buffer.text(),
            "There is no discount to apply.\nAfter the discount, the total comes to $81.\n"
        );
    }

    #[test]
    fn test_tracing_sink_logs_levels_and_fields() {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .with_max_level(tracing::Level::INFO)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            TracingSink.publish(&Notice::InvalidDiscount {
                reason: ValidationError::OutOfRange {
                    field: "discount".to_string(),
                    min: 0,
                    max: 100,
                },
            });
            TracingSink.publish(&Notice::NoDiscountToApply);
            TracingSink.publish(&Notice::DiscountApplied {
                total: Money::from_cents(8100),
            });
        });

        let text = buffer.text();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3, "{text}");

        assert!(lines[0].contains("WARN"), "{text}");
        assert!(lines[0].contains("Not valid discount"), "{text}");
        assert!(
            lines[0].contains("reason=discount must be between 0 and 100"),
            "{text}"
        );

        assert!(lines[1].contains("WARN"), "{text}");
        assert!(lines[1].contains("There is no discount to apply."), "{text}");

        assert!(lines[2].contains("INFO"), "{text}");
        assert!(
            lines[2].contains("After the discount, the total comes to $81."),
            "{text}"
        );
        assert!(lines[2].contains("total=81.00"), "{text}");
    }
}
