//! Conditional tracing macros (zero-cost when feature disabled).
//!
//! Spans and events go to `tracing` when the `tracing` feature is enabled and
//! compile to nothing otherwise. The `trace_info!`/`trace_warn!` macros take a
//! format string and are used for the user-facing reports of the file-level
//! operation.

/// Create an info-level span for a major operation.
#[cfg(feature = "tracing")]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        tracing::info_span!($name $(, $($field)*)?)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_span {
    ($name:expr $(, $($field:tt)*)?) => {
        $crate::trace::NoopSpan
    };
}

/// Emit a debug-level event for key measurements.
#[cfg(feature = "tracing")]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        tracing::debug!(name: $name, $($key = $value),+)
    };
    ($name:expr) => {
        tracing::debug!(name: $name)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_event {
    ($name:expr, $($key:ident = $value:expr),+ $(,)?) => {
        let _ = ($($value,)+);
    };
    ($name:expr) => {};
}

/// Emit an info-level message.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)+) => {
        tracing::info!($($arg)+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)+) => {
        if false {
            let _ = format!($($arg)+);
        }
    };
}

/// Emit a warn-level message.
#[cfg(feature = "tracing")]
macro_rules! trace_warn {
    ($($arg:tt)+) => {
        tracing::warn!($($arg)+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_warn {
    ($($arg:tt)+) => {
        if false {
            let _ = format!($($arg)+);
        }
    };
}

#[allow(unused_imports)]
pub(crate) use trace_event;
#[allow(unused_imports)]
pub(crate) use trace_info;
#[allow(unused_imports)]
pub(crate) use trace_span;
#[allow(unused_imports)]
pub(crate) use trace_warn;

/// A no-op span guard used when tracing is disabled.
///
/// Lets `let _guard = trace_span!(...).entered();` compile without
/// conditional code at call sites.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Returns self, mimicking `Span::entered()`.
    #[inline]
    pub fn entered(self) -> Self {
        self
    }
}
