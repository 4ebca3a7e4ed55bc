#![doc = include_str!("../README.md")]

pub mod envelope;
pub mod logger;
pub mod mail;
pub mod pipeline;
pub mod service;
pub mod stage;

#[doc(inline)]
pub use envelope::Envelope;

#[doc(inline)]
pub use mail::{MailItem, MailMessage, MailPackage, Package};

#[doc(inline)]
pub use logger::{InMemoryLogger, Level, LogRecord, Logger, TracingLogger};

#[doc(inline)]
pub use pipeline::{DefaultPipelineHook, Pipeline, PipelineHook};

#[doc(inline)]
pub use service::{StageLayer, StageService};

#[doc(inline)]
pub use stage::{
    BANNED_CONTENTS, BANNED_SUBSTANCE, Inspector, RealMailService, STOLEN_MARKER_PREFIX,
    STOLEN_PLACEHOLDER, Spy, Stage, StageError, StageErrorKind, Thief, WATCHED_IDENTITY, WEAPONS,
};
