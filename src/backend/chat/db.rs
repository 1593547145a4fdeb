/**
 * Database Operations for Chat Messages and Channel Membership
 *
 * Postgres implementation of the chat storage traits. Message ids come from
 * the `chat_messages.id` BIGSERIAL and are the only order key. `created_at`
 * is read from the database clock at insert time; concurrent inserts can
 * tie or commit out of timestamp order, so pages never sort on it.
 *
 * Sender display fields are joined in at read time from `users`,
 * `profiles` and `profile_images`.
 */
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::backend::chat::store::{MembershipCheck, MessageStore, PageRequest, StoreError};
use crate::shared::{ChannelId, ChatMessage, SenderProfile, UserId};

/// Row shape shared by the append and page queries
#[derive(Debug, sqlx::FromRow)]
struct ChatMessageRow {
    id: i64,
    channel_id: i64,
    send_user_id: i64,
    content: String,
    created_at: DateTime<Utc>,
    sender_email: String,
    sender_nickname: String,
    sender_profile_image: Option<String>,
}

impl From<ChatMessageRow> for ChatMessage {
    fn from(row: ChatMessageRow) -> Self {
        let sender = SenderProfile {
            id: row.send_user_id,
            email: row.sender_email,
            nickname: row.sender_nickname,
            profile_image: row.sender_profile_image,
        };
        ChatMessage::new(row.id, row.channel_id, row.content, row.created_at, sender)
    }
}

/// Chat store backed by a Postgres connection pool
#[derive(Debug, Clone)]
pub struct PgChatStore {
    pool: PgPool,
}

impl PgChatStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait::async_trait]
impl MessageStore for PgChatStore {
    async fn append(
        &self,
        sender_user_id: UserId,
        channel_id: ChannelId,
        content: &str,
    ) -> Result<ChatMessage, StoreError> {
        let row = sqlx::query_as::<_, ChatMessageRow>(
            r#"
            WITH inserted AS (
                INSERT INTO chat_messages (channel_id, send_user_id, content, created_at)
                VALUES ($1, $2, $3, clock_timestamp())
                RETURNING id, channel_id, send_user_id, content, created_at
            )
            SELECT i.id, i.channel_id, i.send_user_id, i.content, i.created_at,
                   u.email AS sender_email,
                   u.nickname AS sender_nickname,
                   pi.src AS sender_profile_image
            FROM inserted i
            JOIN users u ON u.id = i.send_user_id
            LEFT JOIN profiles p ON p.user_id = u.id
            LEFT JOIN profile_images pi ON pi.profile_id = p.id
            "#,
        )
        .bind(channel_id)
        .bind(sender_user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn page(&self, request: PageRequest) -> Result<Vec<ChatMessage>, StoreError> {
        let rows = sqlx::query_as::<_, ChatMessageRow>(
            r#"
            SELECT m.id, m.channel_id, m.send_user_id, m.content, m.created_at,
                   u.email AS sender_email,
                   u.nickname AS sender_nickname,
                   pi.src AS sender_profile_image
            FROM chat_messages m
            JOIN users u ON u.id = m.send_user_id
            LEFT JOIN profiles p ON p.user_id = u.id
            LEFT JOIN profile_images pi ON pi.profile_id = p.id
            WHERE m.channel_id = $1
              AND (
                $2::BIGINT IS NULL
                OR (
                    m.id < $2
                    AND EXISTS (
                        SELECT 1 FROM chat_messages c
                        WHERE c.id = $2 AND c.channel_id = $1
                    )
                )
              )
            ORDER BY m.id DESC
            LIMIT $3
            "#,
        )
        .bind(request.channel_id)
        .bind(request.cursor)
        .bind(i64::from(request.page_size))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(ChatMessage::from).collect())
    }
}

#[async_trait::async_trait]
impl MembershipCheck for PgChatStore {
    async fn is_participant(
        &self,
        user_id: UserId,
        channel_id: ChannelId,
    ) -> Result<bool, StoreError> {
        let (exists,): (bool,) = sqlx::query_as(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM channel_participants
                WHERE user_id = $1 AND channel_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(channel_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }
}
