//! Postal items flowing through a [`Pipeline`](crate::Pipeline).
//!
//! A [`MailItem`] is a closed set of variants: a text [`MailMessage`] or a
//! valued [`MailPackage`]. Items are immutable once built; a stage that wants
//! to change one constructs a new item instead.

use crate::Envelope;

/// Contents of a package: a free-form description and a declared value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Package {
    description: String,
    price: u64,
}

impl Package {
    pub fn new(description: impl Into<String>, price: u64) -> Self {
        Self {
            description: description.into(),
            price,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn price(&self) -> u64 {
        self.price
    }
}

/// A letter carrying a text body.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MailMessage {
    envelope: Envelope,
    text: String,
}

impl MailMessage {
    pub fn new(envelope: impl Into<Envelope>, text: impl Into<String>) -> Self {
        Self {
            envelope: envelope.into(),
            text: text.into(),
        }
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A parcel carrying a [`Package`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MailPackage {
    envelope: Envelope,
    content: Package,
}

impl MailPackage {
    pub fn new(envelope: impl Into<Envelope>, content: Package) -> Self {
        Self {
            envelope: envelope.into(),
            content,
        }
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    pub fn content(&self) -> &Package {
        &self.content
    }

    /// Build a new parcel with the same addressing and different contents.
    pub fn with_content(&self, content: Package) -> Self {
        Self {
            envelope: self.envelope.clone(),
            content,
        }
    }
}

/// Unit of data threaded through a pipeline.
///
/// Equality is structural: two items are equal when they are the same variant
/// and every field matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum MailItem {
    Message(MailMessage),
    Package(MailPackage),
}

impl MailItem {
    /// Shorthand for a [`MailItem::Message`].
    pub fn message(
        from: impl Into<String>,
        to: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        MailItem::Message(MailMessage::new(Envelope::new(from, to), text))
    }

    /// Shorthand for a [`MailItem::Package`].
    pub fn package(from: impl Into<String>, to: impl Into<String>, content: Package) -> Self {
        MailItem::Package(MailPackage::new(Envelope::new(from, to), content))
    }

    pub fn envelope(&self) -> &Envelope {
        match self {
            MailItem::Message(message) => message.envelope(),
            MailItem::Package(package) => package.envelope(),
        }
    }

    pub fn from(&self) -> &str {
        self.envelope().from()
    }

    pub fn to(&self) -> &str {
        self.envelope().to()
    }

    pub fn as_message(&self) -> Option<&MailMessage> {
        match self {
            MailItem::Message(message) => Some(message),
            MailItem::Package(_) => None,
        }
    }

    pub fn as_package(&self) -> Option<&MailPackage> {
        match self {
            MailItem::Package(package) => Some(package),
            MailItem::Message(_) => None,
        }
    }
}

impl From<MailMessage> for MailItem {
    fn from(value: MailMessage) -> Self {
        MailItem::Message(value)
    }
}

impl From<MailPackage> for MailItem {
    fn from(value: MailPackage) -> Self {
        MailItem::Package(value)
    }
}
