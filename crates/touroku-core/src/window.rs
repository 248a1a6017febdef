//! Registration-open gating.
//!
//! One window value is computed at startup and passed down, so every
//! consumer agrees on whether registration is open -- reading the
//! clock at multiple mount points can straddle the boundary instant.
//! The boundary is inclusive: registration opens at exactly the
//! configured instant.

/// The registration-open window, gated only on an opening instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationWindow {
    /// Opening instant as Unix milliseconds. `None` means always open
    /// (dev deployments).
    opens_at_ms: Option<i64>,
}

impl RegistrationWindow {
    /// A window opening at the given Unix-millisecond instant.
    #[must_use]
    pub const fn opens_at(instant_ms: i64) -> Self {
        Self {
            opens_at_ms: Some(instant_ms),
        }
    }

    /// A window that is always open.
    #[must_use]
    pub const fn always_open() -> Self {
        Self { opens_at_ms: None }
    }

    /// The configured opening instant, if any.
    #[must_use]
    pub const fn opening_instant_ms(&self) -> Option<i64> {
        self.opens_at_ms
    }

    /// Whether registration is open at `now_ms` (Unix milliseconds).
    #[must_use]
    pub const fn is_open(&self, now_ms: i64) -> bool {
        match self.opens_at_ms {
            None => true,
            Some(opens) => now_ms >= opens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_inclusive() {
        let window = RegistrationWindow::opens_at(1_000);
        assert!(!window.is_open(999));
        assert!(window.is_open(1_000));
        assert!(window.is_open(1_001));
    }

    #[test]
    fn unconfigured_window_is_always_open() {
        let window = RegistrationWindow::always_open();
        assert!(window.is_open(i64::MIN));
        assert!(window.is_open(0));
    }
}
