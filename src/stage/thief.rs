use std::sync::atomic::{AtomicU64, Ordering};

use crate::{MailItem, Package, Stage, StageError};

/// Description the thief leaves in place of what it took.
///
/// The braces are literal: the original description is not substituted in.
pub const STOLEN_PLACEHOLDER: &str = "stones instead of {content}";

/// Stage that steals valuable packages.
///
/// Any package worth strictly more than the configured minimum is replaced by
/// a worthless one described by [`STOLEN_PLACEHOLDER`], and its price is added
/// to a running total. Messages and cheaper packages pass through untouched.
///
/// The total lives in the instance and grows across every pipeline run that
/// goes through it. Updates are atomic, so a `Thief` shared behind an `Arc`
/// between concurrent pipelines never loses loot.
#[derive(Debug, Default)]
pub struct Thief {
    min_price: u64,
    stolen: AtomicU64,
}

impl Thief {
    /// Create a thief ignoring packages worth `min_price` or less.
    pub fn new(min_price: u64) -> Self {
        Self {
            min_price,
            stolen: AtomicU64::new(0),
        }
    }

    pub fn min_price(&self) -> u64 {
        self.min_price
    }

    /// Total value stolen so far.
    ///
    /// Saturates at `u64::MAX` rather than wrapping.
    pub fn stolen_value(&self) -> u64 {
        self.stolen.load(Ordering::Acquire)
    }

    fn pocket(&self, price: u64) {
        // The closure never returns `None`, so the update always lands.
        self.stolen
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |total| {
                Some(total.saturating_add(price))
            })
            .unwrap_or_else(|total| total);
    }
}

impl Stage for Thief {
    #[tracing::instrument(skip_all, fields(min_price = self.min_price))]
    fn process(&self, item: MailItem) -> Result<MailItem, StageError> {
        match item {
            MailItem::Package(parcel) if parcel.content().price() > self.min_price => {
                let price = parcel.content().price();
                self.pocket(price);
                tracing::debug!(price, "Package swapped for stones");
                Ok(parcel.with_content(Package::new(STOLEN_PLACEHOLDER, 0)).into())
            }
            other => Ok(other),
        }
    }

    fn name(&self) -> &str {
        "thief"
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn packages_at_or_under_threshold_pass_untouched() {
        let thief = Thief::new(50);

        for price in [0, 1, 49, 50] {
            let item = MailItem::package("Alice", "Bob", Package::new("books", price));
            assert_eq!(thief.process(item.clone()).unwrap(), item);
        }
        assert_eq!(thief.stolen_value(), 0);
    }

    #[test]
    fn valuable_package_is_replaced_and_counted() {
        let thief = Thief::new(50);
        let item = MailItem::package("Alice", "Bob", Package::new("gold", 51));

        let out = thief.process(item).unwrap();

        assert_eq!(
            out,
            MailItem::package("Alice", "Bob", Package::new(STOLEN_PLACEHOLDER, 0))
        );
        assert_eq!(thief.stolen_value(), 51);
    }

    #[test]
    fn placeholder_is_not_interpolated() {
        let thief = Thief::new(0);
        let out = thief
            .process(MailItem::package("a", "b", Package::new("diamonds", 7)))
            .unwrap();

        let parcel = out.as_package().unwrap();
        assert_eq!(parcel.content().description(), "stones instead of {content}");
        assert_eq!(parcel.content().price(), 0);
    }

    #[test]
    fn messages_are_ignored() {
        let thief = Thief::new(0);
        let item = MailItem::message("Alice", "Bob", "a valuable secret");

        assert_eq!(thief.process(item.clone()).unwrap(), item);
        assert_eq!(thief.stolen_value(), 0);
    }

    #[test]
    fn total_accumulates_across_calls() {
        let thief = Thief::new(10);

        thief
            .process(MailItem::package("a", "b", Package::new("x", 30)))
            .unwrap();
        thief
            .process(MailItem::package("a", "b", Package::new("y", 45)))
            .unwrap();

        assert_eq!(thief.stolen_value(), 75);
    }

    #[test]
    fn total_saturates_instead_of_wrapping() {
        let thief = Thief::new(0);

        thief
            .process(MailItem::package("a", "b", Package::new("vault", u64::MAX - 1)))
            .unwrap();
        thief
            .process(MailItem::package("a", "b", Package::new("coin", 5)))
            .unwrap();

        assert_eq!(thief.stolen_value(), u64::MAX);
    }

    #[test]
    fn concurrent_thefts_are_all_counted() {
        let thief = Arc::new(Thief::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let thief = Arc::clone(&thief);
                std::thread::spawn(move || {
                    for _ in 0..100 {
                        thief
                            .process(MailItem::package("a", "b", Package::new("coin", 1)))
                            .unwrap();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(thief.stolen_value(), 800);
    }
}
