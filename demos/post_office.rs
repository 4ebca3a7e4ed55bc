use std::sync::Arc;

use mailsort::{
    Inspector, MailItem, Package, Pipeline, RealMailService, Spy, StageErrorKind, Thief,
    TracingLogger, WATCHED_IDENTITY,
};
use tracing_error::ErrorLayer;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

fn main() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(false);
    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(ErrorLayer::default())
        .init();

    let thief = Arc::new(Thief::new(100));
    let pipeline = Pipeline::new()
        .stage(Spy::new(TracingLogger))
        .stage(Arc::clone(&thief))
        .stage(Inspector)
        .stage(RealMailService);

    let mail = [
        MailItem::message("Alice", "Bob", "see you at the station"),
        MailItem::message(WATCHED_IDENTITY, "Vanessa", "yeah baby"),
        MailItem::package("Alice", "Bob", Package::new("books", 40)),
        MailItem::package("Alice", "Bob", Package::new("jewellery", 900)),
        MailItem::package("Dr. Evil", "Number Two", Package::new("weapons", 50)),
    ];

    for item in mail {
        match pipeline.run(item) {
            Ok(delivered) => println!("delivered: {delivered:?}"),
            Err(err) => match err.kind() {
                StageErrorKind::IllegalPackage { content } => {
                    println!("seized illegal package: {content}")
                }
                StageErrorKind::StolenPackage { content } => {
                    println!("caught a tampered package: {content}")
                }
            },
        }
    }

    println!("the thief made off with {}", thief.stolen_value());
}
