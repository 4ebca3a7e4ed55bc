use crate::{Level, Logger, MailItem, Stage, StageError, TracingLogger};

/// Identity whose correspondence a [`Spy`] reports at warning level.
pub const WATCHED_IDENTITY: &str = "Austin Powers";

/// Stage that reads every message and reports it.
///
/// Each message produces exactly one log record through the injected
/// [`Logger`]:
///
/// - [`Level::Warning`] with sender, recipient and text when either address
///   is the watched identity
/// - [`Level::Info`] with sender and recipient otherwise
///
/// Packages are ignored. The item is always returned unchanged.
#[derive(Debug, Clone)]
pub struct Spy<L = TracingLogger> {
    logger: L,
    watched: String,
}

impl Default for Spy {
    fn default() -> Self {
        Spy::new(TracingLogger)
    }
}

impl<L: Logger> Spy<L> {
    /// Create a spy reporting to `logger` and watching [`WATCHED_IDENTITY`].
    pub fn new(logger: L) -> Self {
        Self {
            logger,
            watched: WATCHED_IDENTITY.to_owned(),
        }
    }

    /// Watch a different identity.
    pub fn with_watched_identity(self, identity: impl Into<String>) -> Self {
        Self {
            watched: identity.into(),
            ..self
        }
    }

    pub fn watched_identity(&self) -> &str {
        &self.watched
    }
}

impl<L: Logger> Stage for Spy<L> {
    fn process(&self, item: MailItem) -> Result<MailItem, StageError> {
        if let MailItem::Message(message) = &item {
            let envelope = message.envelope();
            if envelope.involves(&self.watched) {
                self.logger.log(
                    Level::Warning,
                    &format!(
                        "Detected target mail correspondence: from {} to {} \"{}\"",
                        envelope.from(),
                        envelope.to(),
                        message.text()
                    ),
                );
            } else {
                self.logger.log(
                    Level::Info,
                    &format!(
                        "Usual correspondence: from {} to {}",
                        envelope.from(),
                        envelope.to()
                    ),
                );
            }
        }
        Ok(item)
    }

    fn name(&self) -> &str {
        "spy"
    }
}
