mod meeting;

pub use meeting::{MeetingDetails, MeetingKind, MeetingParticipant, MeetingStatus};
