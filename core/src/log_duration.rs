use std::time::Instant;

/// Logs how long a scope took when dropped.
///
/// ```ignore
/// let _guard = LogDuration::new("remove documents");
/// // work...
/// ```
pub struct LogDuration {
    label: String,
    start: Instant,
}

impl LogDuration {
    pub fn new(label: impl Into<String>) -> Self {
        Self { label: label.into(), start: Instant::now() }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.start.elapsed().as_millis()
    }
}

impl Drop for LogDuration {
    fn drop(&mut self) {
        let elapsed = self.start.elapsed();
        tracing::info!(
            operation = %self.label,
            took_ms = elapsed.as_millis() as u64,
            took_s = elapsed.as_secs_f64(),
            "operation finished"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_label() {
        let guard = LogDuration::new("match documents");
        assert_eq!(guard.label(), "match documents");
        assert!(guard.elapsed_ms() < 60_000);
    }
}
