//! Explicit best-effort results.
//!
//! Every stage of the report pipeline either produced its value for real or
//! fell back to a default. [`Outcome`] keeps that distinction in the type so
//! callers can log or inspect degradations instead of losing them in a
//! swallowed error.

/// A value that is either fresh or a fallback substituted after a failure.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Fresh(T),
    Degraded { value: T, reason: String },
}

impl<T> Outcome<T> {
    /// Keep `Ok` values, replace errors with `fallback()` and remember why.
    pub fn from_result<E: std::fmt::Display>(
        result: Result<T, E>,
        fallback: impl FnOnce() -> T,
    ) -> Self {
        match result {
            Ok(value) => Outcome::Fresh(value),
            Err(e) => Outcome::Degraded {
                value: fallback(),
                reason: e.to_string(),
            },
        }
    }

    #[must_use]
    pub fn reason(&self) -> Option<&str> {
        match self {
            Outcome::Fresh(_) => None,
            Outcome::Degraded { reason, .. } => Some(reason),
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Outcome::Fresh(value) | Outcome::Degraded { value, .. } => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_result_is_fresh() {
        let out: Outcome<u8> = Outcome::from_result(Ok::<_, String>(3), || 0);
        assert_eq!(out.reason(), None);
        assert_eq!(out.into_value(), 3);
    }

    #[test]
    fn err_result_uses_fallback_and_keeps_reason() {
        let out: Outcome<u8> = Outcome::from_result(Err::<u8, _>("boom"), || 7);
        assert_eq!(out.reason(), Some("boom"));
        assert_eq!(out.into_value(), 7);
    }
}
