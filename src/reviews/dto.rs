use serde::Deserialize;

use super::repo::SortOrder;

#[derive(Debug, Deserialize)]
pub struct CreateReviewRequest {
    pub rating: u8,
    pub comment: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ReviewListQuery {
    #[serde(default)]
    pub sort: SortOrder,
}
