use serde::{Deserialize, Serialize};

/// The logged-in user as returned by the auth endpoints. The server sends a
/// few more fields (email, banned, createdAt); only these three are used.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TorrentSummary {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub size_bytes: i64,
    #[serde(default)]
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TorrentDetail {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub size_bytes: i64,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub rating_avg: Option<f64>,
    #[serde(default)]
    pub rating_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub torrent_id: String,
    pub text: String,
    pub rating: u8,
    pub user_id: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentInput {
    pub torrent_id: String,
    pub text: String,
    pub rating: u8,
}

/// Register/login both wrap the identity in a `user` field.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: Identity,
}

/// Filter and sort fields of the search form. Empty filters are left out of
/// the query string; sort and order are always sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchQuery {
    pub title: String,
    pub description: String,
    pub category: String,
    pub sort: SortField,
    pub order: SortOrder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Date,
    Size,
}

impl SortField {
    pub fn as_str(self) -> &'static str {
        match self {
            SortField::Date => "date",
            SortField::Size => "size",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortField::Date => "Upload date",
            SortField::Size => "Size",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortOrder::Asc => "Ascending",
            SortOrder::Desc => "Descending",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn torrent_detail_accepts_null_rating() {
        let json = r#"{
            "_id": "66f0",
            "title": "Some ISO",
            "description": "nightly build",
            "sizeBytes": 734003200,
            "categories": ["software", "linux"],
            "ratingAvg": null,
            "ratingCount": 0
        }"#;
        let detail: TorrentDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.id, "66f0");
        assert_eq!(detail.size_bytes, 734_003_200);
        assert_eq!(detail.rating_avg, None);
        assert_eq!(detail.rating_count, 0);
    }

    #[test]
    fn summary_tolerates_missing_optionals() {
        let json = r#"{"_id": "1", "title": "bare", "sizeBytes": 42}"#;
        let summary: TorrentSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.description, None);
        assert!(summary.categories.is_empty());
    }

    #[test]
    fn comment_matches_backend_shape() {
        let json = r#"{
            "_id": "c1",
            "torrentId": "66f0",
            "userId": "u9",
            "text": "seeds fine",
            "rating": 4,
            "createdAt": "2024-05-01T12:30:00",
            "updatedAt": null
        }"#;
        let comment: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.torrent_id, "66f0");
        assert_eq!(comment.rating, 4);
        assert_eq!(comment.created_at.as_deref(), Some("2024-05-01T12:30:00"));
    }

    #[test]
    fn comment_input_uses_wire_field_names() {
        let input = CreateCommentInput {
            torrent_id: "66f0".into(),
            text: "great".into(),
            rating: 5,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["torrentId"], "66f0");
        assert_eq!(json["rating"], 5);
    }

    #[test]
    fn identity_ignores_extra_server_fields() {
        let json = r#"{
            "id": "u9",
            "username": "alice",
            "email": "alice@example.com",
            "role": "moderator",
            "banned": false,
            "createdAt": "2024-01-01T00:00:00"
        }"#;
        let identity: Identity = serde_json::from_str(json).unwrap();
        assert_eq!(identity.username, "alice");
        assert_eq!(identity.role, "moderator");
    }
}
