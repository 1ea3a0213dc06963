use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Status of a JSend [`Envelope`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// The call did what was asked; `data` holds the payload.
    Success,
    /// Expected, structured failure (validation, not found...). `data` holds a [`FailData`].
    Fail,
    /// Unexpected server-side error; `message` explains it.
    Error,
    /// Any status string the client does not know about.
    #[serde(other)]
    Other,
}

/// The wrapper every Issue#1 response comes in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub status: Status,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// HTTP status code that accompanied a failed envelope. Set by the client,
    /// never by the server.
    #[serde(
        rename = "errorCode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub error_code: Option<u16>,
}

impl Envelope {
    /// The `data` of a `fail` envelope read as [`FailData`].
    pub fn fail_data(&self) -> Option<FailData> {
        if self.status != Status::Fail {
            return None;
        }
        self.data
            .as_ref()
            .and_then(|data| serde_json::from_value(data.clone()).ok())
    }
}

/// Payload of a `fail` envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailData {
    /// Which input caused the failure (e.g. `"username"`).
    #[serde(default)]
    pub error_reason: Option<String>,
    /// Human-readable explanation.
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Result of a successful `/token-auth` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenGrant {
    pub token: String,
}

/// An Issue#1 user account.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Only ever sent, the server never returns it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(
        rename = "pictureURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub picture_url: Option<String>,
}

/// A channel: a publication owned by a user and run by its admins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub channel_username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_username: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub admin_usernames: Vec<String>,
    #[serde(rename = "postIDs", default, skip_serializing_if = "Vec::is_empty")]
    pub post_ids: Vec<u64>,
    #[serde(
        rename = "stickiedPostIDs",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub stickied_post_ids: Vec<u64>,
    #[serde(rename = "releaseIDs", default, skip_serializing_if = "Vec::is_empty")]
    pub release_ids: Vec<u64>,
    #[serde(
        rename = "officialReleaseIDs",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub official_release_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
    #[serde(
        rename = "pictureURL",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub picture_url: Option<String>,
}

/// A post published in a channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub posted_by_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "contentsID", default, skip_serializing_if = "Vec::is_empty")]
    pub content_ids: Vec<u64>,
    #[serde(rename = "commentsID", default, skip_serializing_if = "Vec::is_empty")]
    pub comment_ids: Vec<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReleaseType {
    #[default]
    Text,
    Image,
}

/// An atomic work of creativity, owned by a channel.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Release {
    /// Zero when the release has not been created yet.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_channel: Option<String>,
    #[serde(rename = "type", default)]
    pub release_type: ReleaseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
}

/// Meta information attached to a [`Release`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<DateTime<Utc>>,
    /// The genre that defines the release most.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre_defining: Option<String>,
    /// Blurbs and the like.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<ExtraMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraMetadata {
    /// Issue#1 usernames, or plain names for authors without an account.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
}

/// A comment on a post, or a reply to another comment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commenter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_post: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Id of the comment being replied to, `-1` for a direct comment on the post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reply_to: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
}

/// Everything `/search` found for a pattern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResults {
    #[serde(default)]
    pub posts: Vec<Post>,
    #[serde(default)]
    pub releases: Vec<Release>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub users: Vec<User>,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_status_decodes_as_other() {
        let envelope: Envelope = serde_json::from_value(json!({"status": "pending"})).unwrap();
        assert_eq!(envelope.status, Status::Other);
        assert!(envelope.fail_data().is_none());
    }

    #[test]
    fn fail_data_reads_reason_and_message() {
        let envelope: Envelope = serde_json::from_value(json!({
            "status": "fail",
            "data": {"errorReason": "username", "errorMessage": "taken"}
        }))
        .unwrap();
        let data = envelope.fail_data().unwrap();
        assert_eq!(data.error_reason.as_deref(), Some("username"));
        assert_eq!(data.error_message.as_deref(), Some("taken"));
    }

    #[test]
    fn error_code_is_only_serialized_when_stamped() {
        let mut envelope: Envelope =
            serde_json::from_value(json!({"status": "fail", "data": {}})).unwrap();
        assert!(serde_json::to_value(&envelope).unwrap().get("errorCode").is_none());
        envelope.error_code = Some(404);
        assert_eq!(serde_json::to_value(&envelope).unwrap()["errorCode"], 404);
    }

    #[test]
    fn channel_uses_server_field_names() {
        let channel: Channel = serde_json::from_value(json!({
            "channelUsername": "daily",
            "postIDs": [1, 2],
            "pictureURL": "http://img/1.png",
            "creationTime": "2019-12-01T10:00:00Z"
        }))
        .unwrap();
        assert_eq!(channel.channel_username, "daily");
        assert_eq!(channel.post_ids, vec![1, 2]);
        assert_eq!(channel.picture_url.as_deref(), Some("http://img/1.png"));
        assert!(channel.creation_time.is_some());
    }

    #[test]
    fn new_release_serializes_without_id() {
        let release = Release {
            owner_channel: Some("daily".to_string()),
            content: Some("hello".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&release).unwrap();
        assert!(value.get("id").is_none());
        assert_eq!(value["type"], "text");
        assert_eq!(value["ownerChannel"], "daily");
    }
}
