//! Text extraction for the word-cloud collaborator

use crate::models::Collection;

/// Every comment body of the collection, flattened
///
/// Tracks in collection order; within a track, hot comments then general
/// comments, each in stored order. No deduplication, filtering or truncation.
pub fn comment_texts(collection: &Collection) -> Vec<String> {
    collection
        .tracks()
        .iter()
        .flat_map(|track| track.hot_comments.iter().chain(track.comments.iter()))
        .map(|comment| comment.content.clone())
        .collect()
}
