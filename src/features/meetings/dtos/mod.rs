mod meeting_dto;

pub use meeting_dto::{
    CreateMeetingDto, MeetingParticipantDto, MeetingResponseDto, UpdateMeetingDto,
    UpdateMeetingStatusDto,
};
