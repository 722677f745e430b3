use sqlx::PgPool;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

use crate::core::error::{AppError, Result};
use crate::features::auth::model::AuthenticatedUser;
use crate::features::meetings::dtos::{
    CreateMeetingDto, MeetingParticipantDto, MeetingResponseDto, UpdateMeetingDto,
};
use crate::features::meetings::models::{MeetingDetails, MeetingParticipant, MeetingStatus};
use crate::features::notifications::models::NotificationKind;
use crate::features::notifications::NotificationService;

const MEETING_DETAIL_SELECT: &str = "SELECT m.id, m.title, m.kind, m.date, m.time, \
     m.duration_minutes, m.description, m.location, m.status, m.organizer_id, m.created_at, \
     m.updated_at, (o.first_name || ' ' || o.last_name) AS organizer_name \
     FROM meetings m \
     JOIN users o ON o.id = m.organizer_id";

/// Service for meeting scheduling between tuteurs, RH and stagiaires
pub struct MeetingService {
    pool: PgPool,
    notification_service: Arc<NotificationService>,
}

impl MeetingService {
    pub fn new(pool: PgPool, notification_service: Arc<NotificationService>) -> Self {
        Self {
            pool,
            notification_service,
        }
    }

    /// Schedule a meeting and invite the participants
    pub async fn create(
        &self,
        organizer: &AuthenticatedUser,
        dto: CreateMeetingDto,
    ) -> Result<MeetingResponseDto> {
        let mut tx = self.pool.begin().await?;

        let meeting_id: Uuid = sqlx::query_scalar(
            "INSERT INTO meetings \
                 (title, kind, date, time, duration_minutes, description, location, organizer_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
             RETURNING id",
        )
        .bind(&dto.title)
        .bind(dto.kind)
        .bind(dto.date)
        .bind(dto.time)
        .bind(dto.duration_minutes)
        .bind(&dto.description)
        .bind(&dto.location)
        .bind(organizer.user_id)
        .fetch_one(&mut *tx)
        .await?;

        for participant_id in &dto.participant_ids {
            sqlx::query(
                "INSERT INTO meeting_participants (meeting_id, user_id) \
                 VALUES ($1, $2) ON CONFLICT DO NOTHING",
            )
            .bind(meeting_id)
            .bind(participant_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        info!(
            "Meeting created: id={}, organizer={}, participants={}",
            meeting_id,
            organizer.user_id,
            dto.participant_ids.len()
        );

        for participant_id in &dto.participant_ids {
            self.notification_service
                .notify(
                    *participant_id,
                    NotificationKind::MeetingInvitation,
                    "Invitation à une réunion",
                    &format!(
                        "{} vous invite à \"{}\" le {} à {}",
                        organizer.full_name, dto.title, dto.date, dto.time
                    ),
                    Some(meeting_id),
                )
                .await;
        }

        self.build_response(meeting_id).await
    }

    /// Meetings the caller organizes or attends, soonest first
    pub async fn list_mine(&self, user_id: Uuid) -> Result<Vec<MeetingResponseDto>> {
        let meetings = sqlx::query_as::<_, MeetingDetails>(&format!(
            "{MEETING_DETAIL_SELECT} \
             WHERE m.organizer_id = $1 \
                OR EXISTS (SELECT 1 FROM meeting_participants mp \
                           WHERE mp.meeting_id = m.id AND mp.user_id = $1) \
             ORDER BY m.date, m.time"
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::with_capacity(meetings.len());
        for meeting in meetings {
            let participants = self.fetch_participants(meeting.id).await?;
            result.push(MeetingResponseDto::from_details(meeting, participants));
        }

        Ok(result)
    }

    /// Get a meeting, visible to the organizer, participants and staff
    pub async fn get_by_id(
        &self,
        meeting_id: Uuid,
        user: &AuthenticatedUser,
    ) -> Result<MeetingResponseDto> {
        let meeting = self.fetch_details(meeting_id).await?;
        let participants = self.fetch_participants(meeting_id).await?;

        let is_organizer = meeting.organizer_id == user.user_id;
        let is_participant = participants.iter().any(|p| p.user_id == user.user_id);
        if !is_organizer && !is_participant && !user.has_staff_access() {
            return Err(AppError::Forbidden(
                "You do not have access to this meeting".to_string(),
            ));
        }

        Ok(MeetingResponseDto::from_details(meeting, participants))
    }

    /// Edit a planned meeting (organizer only)
    pub async fn update(
        &self,
        meeting_id: Uuid,
        user: &AuthenticatedUser,
        dto: UpdateMeetingDto,
    ) -> Result<MeetingResponseDto> {
        let meeting = self.fetch_details(meeting_id).await?;
        if meeting.organizer_id != user.user_id {
            return Err(AppError::Forbidden(
                "Only the organizer can edit this meeting".to_string(),
            ));
        }

        let updated = sqlx::query(
            "UPDATE meetings SET \
                 title = COALESCE($2, title), \
                 date = COALESCE($3, date), \
                 time = COALESCE($4, time), \
                 duration_minutes = COALESCE($5, duration_minutes), \
                 description = COALESCE($6, description), \
                 location = COALESCE($7, location), \
                 updated_at = NOW() \
             WHERE id = $1 AND status = 'planifie'",
        )
        .bind(meeting_id)
        .bind(&dto.title)
        .bind(dto.date)
        .bind(dto.time)
        .bind(dto.duration_minutes)
        .bind(&dto.description)
        .bind(&dto.location)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::Conflict(
                "Only planned meetings can be edited".to_string(),
            ));
        }

        self.build_response(meeting_id).await
    }

    /// Transition a meeting's status (organizer only)
    pub async fn update_status(
        &self,
        meeting_id: Uuid,
        user: &AuthenticatedUser,
        next: MeetingStatus,
    ) -> Result<MeetingResponseDto> {
        let meeting = self.fetch_details(meeting_id).await?;
        if meeting.organizer_id != user.user_id && !user.has_staff_access() {
            return Err(AppError::Forbidden(
                "Only the organizer can change the meeting status".to_string(),
            ));
        }

        if !meeting.status.can_transition_to(next) {
            return Err(AppError::Conflict(format!(
                "Cannot transition meeting from {:?} to {:?}",
                meeting.status, next
            )));
        }

        // Guarded on the current status in case of concurrent transitions
        let updated = sqlx::query(
            "UPDATE meetings SET status = $2, updated_at = NOW() WHERE id = $1 AND status = $3",
        )
        .bind(meeting_id)
        .bind(next)
        .bind(meeting.status)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::Conflict(
                "Meeting status changed concurrently".to_string(),
            ));
        }

        info!("Meeting {} status -> {:?}", meeting_id, next);

        self.build_response(meeting_id).await
    }

    /// Accept an invitation (participant only)
    pub async fn accept_invitation(
        &self,
        meeting_id: Uuid,
        user_id: Uuid,
    ) -> Result<MeetingResponseDto> {
        let updated = sqlx::query(
            "UPDATE meeting_participants SET has_accepted = TRUE \
             WHERE meeting_id = $1 AND user_id = $2",
        )
        .bind(meeting_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "You are not invited to this meeting".to_string(),
            ));
        }

        self.build_response(meeting_id).await
    }

    /// Delete a meeting (organizer or admin)
    pub async fn delete(&self, meeting_id: Uuid, user: &AuthenticatedUser) -> Result<()> {
        let meeting = self.fetch_details(meeting_id).await?;
        if meeting.organizer_id != user.user_id && !user.is_admin() {
            return Err(AppError::Forbidden(
                "Only the organizer can delete this meeting".to_string(),
            ));
        }

        sqlx::query("DELETE FROM meetings WHERE id = $1")
            .bind(meeting_id)
            .execute(&self.pool)
            .await?;

        info!("Meeting deleted: {}", meeting_id);
        Ok(())
    }

    async fn build_response(&self, meeting_id: Uuid) -> Result<MeetingResponseDto> {
        let meeting = self.fetch_details(meeting_id).await?;
        let participants = self.fetch_participants(meeting_id).await?;
        Ok(MeetingResponseDto::from_details(meeting, participants))
    }

    async fn fetch_details(&self, meeting_id: Uuid) -> Result<MeetingDetails> {
        sqlx::query_as::<_, MeetingDetails>(&format!(
            "{MEETING_DETAIL_SELECT} WHERE m.id = $1"
        ))
        .bind(meeting_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Meeting '{}' not found", meeting_id)))
    }

    async fn fetch_participants(&self, meeting_id: Uuid) -> Result<Vec<MeetingParticipantDto>> {
        let participants = sqlx::query_as::<_, MeetingParticipant>(
            "SELECT mp.meeting_id, mp.user_id, mp.has_accepted, mp.joined_at, \
                 (u.first_name || ' ' || u.last_name) AS participant_name \
             FROM meeting_participants mp \
             JOIN users u ON u.id = mp.user_id \
             WHERE mp.meeting_id = $1 \
             ORDER BY u.last_name, u.first_name",
        )
        .bind(meeting_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(participants
            .into_iter()
            .map(|p| MeetingParticipantDto {
                user_id: p.user_id,
                name: p.participant_name,
                has_accepted: p.has_accepted,
            })
            .collect())
    }
}
