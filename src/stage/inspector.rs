use crate::{MailItem, Stage, StageError};

pub const WEAPONS: &str = "weapons";
pub const BANNED_SUBSTANCE: &str = "banned substance";

/// Package descriptions an [`Inspector`] refuses outright.
pub const BANNED_CONTENTS: [&str; 2] = [WEAPONS, BANNED_SUBSTANCE];

/// Prefix of the placeholder a [`Thief`](crate::Thief) leaves behind.
pub const STOLEN_MARKER_PREFIX: &str = "stones";

/// Stage that checks package contents.
///
/// Checks run in order and the first match fails the item:
///
/// 1. description equal to one of [`BANNED_CONTENTS`]: `IllegalPackage`
/// 2. description starting with [`STOLEN_MARKER_PREFIX`]: `StolenPackage`
///
/// Prices are not looked at and messages always pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct Inspector;

impl Inspector {
    pub fn new() -> Self {
        Self
    }
}

impl Stage for Inspector {
    #[tracing::instrument(skip_all)]
    fn process(&self, item: MailItem) -> Result<MailItem, StageError> {
        if let MailItem::Package(parcel) = &item {
            let description = parcel.content().description();
            if BANNED_CONTENTS.contains(&description) {
                tracing::warn!(description, "Banned contents found");
                return Err(StageError::illegal_package(description));
            }
            if description.starts_with(STOLEN_MARKER_PREFIX) {
                tracing::warn!(description, "Tampered package found");
                return Err(StageError::stolen_package(description));
            }
        }
        Ok(item)
    }

    fn name(&self) -> &str {
        "inspector"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Package, STOLEN_PLACEHOLDER, StageErrorKind};

    fn parcel(description: &str, price: u64) -> MailItem {
        MailItem::package("Alice", "Bob", Package::new(description, price))
    }

    #[test]
    fn banned_contents_are_illegal_regardless_of_price() {
        for description in BANNED_CONTENTS {
            for price in [0, 1, 1_000_000] {
                let err = Inspector.process(parcel(description, price)).unwrap_err();
                assert_eq!(
                    err.kind(),
                    &StageErrorKind::IllegalPackage {
                        content: description.into(),
                    }
                );
            }
        }
    }

    #[test]
    fn banned_match_is_exact() {
        for description in ["Weapons", "weapons ", "more weapons", "banned"] {
            let item = parcel(description, 10);
            assert_eq!(Inspector.process(item.clone()).unwrap(), item);
        }
    }

    #[test]
    fn stones_prefix_means_stolen() {
        for description in [STOLEN_PLACEHOLDER, "stones", "stonesoup"] {
            assert!(
                Inspector
                    .process(parcel(description, 0))
                    .unwrap_err()
                    .is_stolen_package()
            );
        }
    }

    #[test]
    fn ordinary_packages_and_messages_pass() {
        let items = [
            parcel("books", 30),
            parcel("a few stones", 0),
            MailItem::message("Alice", "Bob", "weapons"),
            MailItem::message("Alice", "Bob", "stones"),
        ];

        for item in items {
            assert_eq!(Inspector.process(item.clone()).unwrap(), item);
        }
    }
}
