pub mod defs;

pub use defs::{
    FeedSource, MailDelivery, OutgoingMail, PublishedTime, RawEntry, ServiceError, TextGenerator,
    TimeParts,
};
