mod notification;

pub use notification::{Notification, NotificationKind, NotificationStatus};
