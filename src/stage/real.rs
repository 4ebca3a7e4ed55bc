use crate::{MailItem, Stage, StageError};

/// Stand-in for the real postal delivery system.
///
/// Returns every item unchanged and never fails. Usually placed last in a
/// pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealMailService;

impl Stage for RealMailService {
    #[tracing::instrument(skip_all)]
    fn process(&self, item: MailItem) -> Result<MailItem, StageError> {
        tracing::debug!(from = item.from(), to = item.to(), "Mail handed over for delivery");
        Ok(item)
    }

    fn name(&self) -> &str {
        "real-mail-service"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Package;

    #[test]
    fn delivers_every_variant_unchanged() {
        let items = [
            MailItem::message("Alice", "Bob", "hello"),
            MailItem::package("Alice", "Bob", Package::new("weapons", 1_000)),
            MailItem::package("Alice", "Bob", Package::new("stones", 0)),
        ];

        for item in items {
            assert_eq!(RealMailService.process(item.clone()).unwrap(), item);
        }
    }
}
