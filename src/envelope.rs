/// Addressing shared by every postal item.
///
/// `Envelope` holds who a piece of mail comes from and who it is meant for.
/// Both [`MailMessage`](crate::MailMessage) and
/// [`MailPackage`](crate::MailPackage) embed one, so stages can read the
/// addresses without caring which kind of item they were handed.
///
/// ## Conversion
///
/// `Envelope` implements `From<(F, T)>` for ergonomic construction when the
/// sender and recipient are already at hand as a tuple.
///
/// ## Example
///
/// ```rust
/// use mailsort::Envelope;
///
/// let envelope = Envelope::new("Alice", "Bob");
///
/// // or, equivalently
/// let same: Envelope = ("Alice", "Bob").into();
/// assert_eq!(envelope, same);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Envelope {
    from: String,
    to: String,
}

impl Envelope {
    /// Create an envelope addressed from `from` to `to`.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Sender identity.
    pub fn from(&self) -> &str {
        &self.from
    }

    /// Recipient identity.
    pub fn to(&self) -> &str {
        &self.to
    }

    /// Whether `identity` appears as either the sender or the recipient.
    pub fn involves(&self, identity: &str) -> bool {
        self.from == identity || self.to == identity
    }
}

impl<F, T> From<(F, T)> for Envelope
where
    F: Into<String>,
    T: Into<String>,
{
    fn from(value: (F, T)) -> Self {
        Envelope::new(value.0, value.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn involves_matches_sender_or_recipient() {
        let envelope = Envelope::new("Austin Powers", "Dr. Evil");

        assert!(envelope.involves("Austin Powers"));
        assert!(envelope.involves("Dr. Evil"));
        assert!(!envelope.involves("Mini-Me"));
    }
}
