pub mod catalog;
pub mod engagement;
pub mod message;
pub mod notification;
pub mod outcome;

pub use catalog::{FINAL_NOTICE_DAYS, MessageSpec};
pub use engagement::EngagementRecord;
pub use message::EmailMessage;
pub use notification::Notification;
pub use outcome::{DispatchOutcome, ProviderKind};
