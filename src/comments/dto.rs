use serde::{Deserialize, Serialize};

use super::repo::PhotoComment;

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub comment: String,
}

#[derive(Debug, Deserialize)]
pub struct ToggleReactionRequest {
    pub emoji: String,
}

/// Toggle outcome: the updated comment plus where the caller now stands.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionResponse {
    pub comment: PhotoComment,
    pub reacted: bool,
    pub total_reactions: usize,
}
