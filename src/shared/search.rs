use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Entry handed to the host site's search indexer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SearchContentDto {
    pub entity_name: String,
    pub entity_id: String,
    pub title: String,
    pub body: String,
    pub content_modified_by: String,
    pub content_modified_on: DateTime<Utc>,
}

/// Query params for incremental search indexing
#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SearchContentQuery {
    /// Only records modified at or after this instant; omit for a full index
    pub since: Option<DateTime<Utc>>,
}

impl SearchContentQuery {
    pub fn since_or_epoch(&self) -> DateTime<Utc> {
        self.since.unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }
}
