//! Per-track comment normalizer

use super::{decode_response, present, CommentFragment};
use crate::error::NormalizeError;
use crate::models::{Comment, User};
use crate::wire::{decode_record, CommentRecord, CommentsResponse};
use chrono::DateTime;
use serde_json::Value;
use tracing::warn;

/// Translate one track's raw comment page into hot and general comments
///
/// Each comment needs id, body, like count, timestamp (epoch milliseconds) and
/// an author with id, nickname and avatar; otherwise it is dropped with a
/// warning. A missing `hotComments` or `comments` array yields an empty
/// sequence.
pub fn normalize_comments(track_id: &str, raw: Value) -> Result<CommentFragment, NormalizeError> {
    let response: CommentsResponse = decode_response(raw)?;

    let mut skipped = 0;
    let hot = build_comments(track_id, response.hot_comments, &mut skipped);
    let general = build_comments(track_id, response.comments, &mut skipped);

    Ok(CommentFragment {
        hot,
        general,
        skipped,
    })
}

fn build_comments(
    track_id: &str,
    records: Option<Vec<Value>>,
    skipped: &mut usize,
) -> Vec<Comment> {
    let mut comments = Vec::new();

    for record in records.unwrap_or_default() {
        let Some(record) = decode_record::<CommentRecord>(record, "comment") else {
            *skipped += 1;
            continue;
        };
        match build_comment(record) {
            Ok(comment) => comments.push(comment),
            Err(field) => {
                warn!(track_id = %track_id, field, "Skipping comment with missing field");
                *skipped += 1;
            }
        }
    }

    comments
}

/// Returns the name of the first missing or unusable field on failure
fn build_comment(record: CommentRecord) -> Result<Comment, &'static str> {
    let id = record.comment_id.ok_or("commentId")?.to_text();
    let content = record.content.ok_or("content")?;
    let liked_count = record
        .liked_count
        .and_then(|count| count.as_u64())
        .ok_or("likedCount")?;
    let time = record
        .time
        .and_then(|time| time.as_i64())
        .and_then(DateTime::from_timestamp_millis)
        .ok_or("time")?;

    let user = record.user.ok_or("user")?;
    let user = User {
        id: user.user_id.ok_or("user.userId")?.to_text(),
        nickname: user.nickname.ok_or("user.nickname")?,
        avatar_url: Some(present(user.avatar_url).ok_or("user.avatarUrl")?),
    };

    Ok(Comment {
        id,
        content,
        liked_count,
        time,
        user,
    })
}
