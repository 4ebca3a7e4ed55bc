//! Processing stages and the error they may raise.
//!
//! A [`Stage`] takes a [`MailItem`] and hands back either the same item, a
//! freshly built replacement, or a [`StageError`] that aborts the surrounding
//! [`Pipeline`](crate::Pipeline).
//!
//! ## Provided stages
//!
//! - [`RealMailService`]: delivery stand-in, the identity stage
//! - [`Thief`]: replaces valuable packages and accumulates their value
//! - [`Spy`]: logs correspondence, never touches the item
//! - [`Inspector`]: rejects banned or tampered packages

mod inspector;
mod real;
mod spy;
mod thief;

use std::sync::Arc;

use tracing_error::SpanTrace;

use crate::MailItem;

pub use inspector::{BANNED_CONTENTS, BANNED_SUBSTANCE, Inspector, STOLEN_MARKER_PREFIX, WEAPONS};
pub use real::RealMailService;
pub use spy::{Spy, WATCHED_IDENTITY};
pub use thief::{STOLEN_PLACEHOLDER, Thief};

/// A single transform or validation step.
///
/// Stages take `&self` so one instance can sit in several pipelines at once;
/// any internal state must therefore use interior mutability that is safe to
/// share between threads.
///
/// Side effects performed by `process` (logging, counters) are not rolled back
/// when a later stage fails.
pub trait Stage: Send + Sync {
    /// Process one item.
    fn process(&self, item: MailItem) -> Result<MailItem, StageError>;

    /// Human-readable stage name used in tracing spans.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

impl<S: Stage + ?Sized> Stage for Arc<S> {
    fn process(&self, item: MailItem) -> Result<MailItem, StageError> {
        (**self).process(item)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S: Stage + ?Sized> Stage for Box<S> {
    fn process(&self, item: MailItem) -> Result<MailItem, StageError> {
        (**self).process(item)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<S: Stage + ?Sized> Stage for &S {
    fn process(&self, item: MailItem) -> Result<MailItem, StageError> {
        (**self).process(item)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

/// Error raised by a stage.
///
/// Each error captures:
/// - The error kind
/// - A tracing span backtrace pointing at the stage that raised it
#[derive(Debug)]
pub struct StageError {
    context: SpanTrace,
    kind: StageErrorKind,
}

/// Stage error kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageErrorKind {
    /// The package declares a banned category of contents.
    IllegalPackage { content: String },
    /// The package carries the thief's placeholder instead of its contents.
    StolenPackage { content: String },
}

impl StageError {
    /// Create an error for a package with banned contents.
    pub fn illegal_package(content: impl Into<String>) -> Self {
        Self {
            context: SpanTrace::capture(),
            kind: StageErrorKind::IllegalPackage {
                content: content.into(),
            },
        }
    }

    /// Create an error for a package that was tampered with.
    pub fn stolen_package(content: impl Into<String>) -> Self {
        Self {
            context: SpanTrace::capture(),
            kind: StageErrorKind::StolenPackage {
                content: content.into(),
            },
        }
    }

    pub fn kind(&self) -> &StageErrorKind {
        &self.kind
    }

    pub fn is_illegal_package(&self) -> bool {
        matches!(self.kind, StageErrorKind::IllegalPackage { .. })
    }

    pub fn is_stolen_package(&self) -> bool {
        matches!(self.kind, StageErrorKind::StolenPackage { .. })
    }
}

impl std::fmt::Display for StageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            StageErrorKind::IllegalPackage { content } => {
                writeln!(f, "Illegal package: {content:?}")
            }
            StageErrorKind::StolenPackage { content } => {
                writeln!(f, "Stolen package: {content:?}")
            }
        }?;
        self.context.fmt(f)
    }
}

impl std::error::Error for StageError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Package;

    struct Reject;

    impl Stage for Reject {
        fn process(&self, _item: MailItem) -> Result<MailItem, StageError> {
            Err(StageError::illegal_package("anything"))
        }
    }

    #[test]
    fn wrappers_delegate_to_inner_stage() {
        let item = MailItem::package("a", "b", Package::new("x", 1));

        let shared: Arc<dyn Stage> = Arc::new(Reject);
        let boxed: Box<dyn Stage> = Box::new(Reject);

        assert!(shared.process(item.clone()).unwrap_err().is_illegal_package());
        assert!(boxed.process(item.clone()).unwrap_err().is_illegal_package());
        assert!((&Reject).process(item).unwrap_err().is_illegal_package());
        assert_eq!(shared.name(), boxed.name());
    }

    #[test]
    fn display_names_the_kind() {
        let err = StageError::stolen_package("stones instead of {content}");

        assert!(err.to_string().starts_with("Stolen package:"));
        assert_eq!(
            err.kind(),
            &StageErrorKind::StolenPackage {
                content: "stones instead of {content}".into(),
            }
        );
        assert!(!err.is_illegal_package());
    }
}
