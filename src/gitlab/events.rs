use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error::Result;

/// Revision GitLab reports as `before` for a new ref and as `after` for a deleted one.
pub const ZERO_HASH: &str = "0000000000000000000000000000000000000000";

/// Object kinds that produce a notification. Anything else is ignored.
pub const SUPPORTED_KINDS: [&str; 4] = ["push", "tag_push", "merge_request", "pipeline"];

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "object_kind", rename_all = "snake_case")]
pub enum GitLabEvent {
    Push(PushEvent),
    TagPush(PushEvent),
    MergeRequest(MergeRequestEvent),
    Pipeline(PipelineEvent),
}

impl GitLabEvent {
    /// Decodes a raw webhook body.
    ///
    /// Returns `Ok(None)` when `object_kind` is missing or not one of
    /// [`SUPPORTED_KINDS`]. Nested objects of the wrong shape fall back to
    /// their defaults; any other field with the wrong JSON type is an error.
    pub fn from_payload(payload: &Value) -> Result<Option<Self>> {
        let Some(kind) = object_kind(payload) else {
            return Ok(None);
        };
        if !SUPPORTED_KINDS.contains(&kind) {
            return Ok(None);
        }

        Ok(Some(Self::deserialize(payload)?))
    }
}

pub fn object_kind(payload: &Value) -> Option<&str> {
    payload.get("object_kind").and_then(Value::as_str)
}

// GitLab sends explicit nulls for many optional fields.
fn nullable<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Nested objects that are not objects (e.g. `"project": "x"`) are treated as absent.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Project {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub web_url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub path_with_namespace: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct User {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub username: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Author {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Commit {
    #[serde(default, deserialize_with = "lenient")]
    pub author: Author,
    #[serde(default, deserialize_with = "nullable")]
    pub message: String,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub added: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub modified: Vec<String>,
    #[serde(default, deserialize_with = "nullable")]
    pub removed: Vec<String>,
}

impl Commit {
    pub fn is_empty(&self) -> bool {
        self.author.name.is_empty() && self.message.is_empty() && self.url.is_empty()
    }
}

/// Shared by `push` and `tag_push`; `message` is only set on annotated tags.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushEvent {
    #[serde(default, deserialize_with = "nullable")]
    pub user_name: String,
    #[serde(rename = "ref", default, deserialize_with = "nullable")]
    pub ref_: String,
    #[serde(default, deserialize_with = "lenient")]
    pub project: Project,
    #[serde(default, deserialize_with = "nullable")]
    pub commits: Vec<Commit>,
    #[serde(default, deserialize_with = "nullable")]
    pub total_commits_count: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub before: String,
    #[serde(default, deserialize_with = "nullable")]
    pub after: String,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MergeRequestEvent {
    #[serde(default, deserialize_with = "lenient")]
    pub user: User,
    #[serde(default, deserialize_with = "lenient")]
    pub project: Project,
    #[serde(default, deserialize_with = "lenient")]
    pub object_attributes: MergeRequestAttributes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MergeRequestAttributes {
    #[serde(default, deserialize_with = "nullable")]
    pub id: u64,
    #[serde(default)]
    pub iid: Option<u64>,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub source_branch: String,
    #[serde(default, deserialize_with = "nullable")]
    pub target_branch: String,
    #[serde(default, deserialize_with = "nullable")]
    pub state: String,
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient")]
    pub last_commit: Option<Commit>,
    #[serde(default, deserialize_with = "nullable")]
    pub updated_at: String,
}

impl MergeRequestAttributes {
    /// Project-scoped number shown in the GitLab UI, falling back to the global id.
    pub fn number(&self) -> u64 {
        self.iid.unwrap_or(self.id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineEvent {
    #[serde(default, deserialize_with = "lenient")]
    pub object_attributes: PipelineAttributes,
    #[serde(default, deserialize_with = "lenient")]
    pub merge_request: Option<MergeRequestSummary>,
    #[serde(default, deserialize_with = "lenient")]
    pub user: User,
    #[serde(default, deserialize_with = "lenient")]
    pub project: Project,
    #[serde(default, deserialize_with = "lenient")]
    pub commit: Option<Commit>,
    #[serde(default, deserialize_with = "nullable")]
    pub builds: Vec<Build>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PipelineAttributes {
    #[serde(default, deserialize_with = "nullable")]
    pub id: u64,
    #[serde(rename = "ref", default, deserialize_with = "nullable")]
    pub ref_: String,
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "nullable")]
    pub source: String,
    #[serde(default, deserialize_with = "nullable")]
    pub stages: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MergeRequestSummary {
    #[serde(default, deserialize_with = "nullable")]
    pub title: String,
    #[serde(default, deserialize_with = "nullable")]
    pub url: String,
    #[serde(default, deserialize_with = "nullable")]
    pub source_branch: String,
    #[serde(default, deserialize_with = "nullable")]
    pub target_branch: String,
}

impl MergeRequestSummary {
    pub fn is_empty(&self) -> bool {
        self.title.is_empty()
            && self.url.is_empty()
            && self.source_branch.is_empty()
            && self.target_branch.is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Build {
    #[serde(default, deserialize_with = "nullable")]
    pub id: u64,
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,
    #[serde(default, deserialize_with = "nullable")]
    pub stage: String,
    #[serde(default, deserialize_with = "nullable")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient")]
    pub user: User,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_object_kind_is_ignored() {
        let payload = json!({ "ref": "refs/heads/main" });

        assert!(GitLabEvent::from_payload(&payload).unwrap().is_none());
    }

    #[test]
    fn test_placeholder_kinds_are_ignored() {
        for kind in ["issue", "note", "wiki_page", "build", "deployment"] {
            let payload = json!({ "object_kind": kind });
            assert!(
                GitLabEvent::from_payload(&payload).unwrap().is_none(),
                "{kind} should be ignored"
            );
        }
    }

    #[test]
    fn test_non_string_object_kind_is_ignored() {
        let payload = json!({ "object_kind": 7 });

        assert!(GitLabEvent::from_payload(&payload).unwrap().is_none());
    }

    #[test]
    fn test_tag_push_dispatches_to_tag_variant() {
        let payload = json!({
            "object_kind": "tag_push",
            "ref": "refs/tags/v1.0.0",
            "message": "release",
        });

        let event = GitLabEvent::from_payload(&payload).unwrap().unwrap();
        let GitLabEvent::TagPush(tag) = event else {
            panic!("expected tag push");
        };
        assert_eq!(tag.ref_, "refs/tags/v1.0.0");
        assert_eq!(tag.message.as_deref(), Some("release"));
    }

    #[test]
    fn test_missing_nested_fields_default() {
        let payload = json!({ "object_kind": "pipeline" });

        let Some(GitLabEvent::Pipeline(pipeline)) = GitLabEvent::from_payload(&payload).unwrap()
        else {
            panic!("expected pipeline");
        };
        assert_eq!(pipeline.object_attributes.id, 0);
        assert!(pipeline.builds.is_empty());
        assert!(pipeline.commit.is_none());
        assert!(pipeline.project.web_url.is_empty());
    }

    #[test]
    fn test_explicit_nulls_default() {
        let payload = json!({
            "object_kind": "push",
            "user_name": null,
            "project": null,
            "commits": null,
            "total_commits_count": null,
            "message": null,
        });

        let Some(GitLabEvent::Push(push)) = GitLabEvent::from_payload(&payload).unwrap() else {
            panic!("expected push");
        };
        assert!(push.user_name.is_empty());
        assert!(push.commits.is_empty());
        assert_eq!(push.total_commits_count, 0);
        assert!(push.message.is_none());
    }

    #[test]
    fn test_wrong_field_type_is_an_error() {
        let payload = json!({ "object_kind": "push", "commits": "not a list" });

        assert!(GitLabEvent::from_payload(&payload).is_err());
    }

    #[test]
    fn test_misshapen_nested_objects_default() {
        let payload = json!({
            "object_kind": "merge_request",
            "user": ["alice"],
            "project": "x",
            "object_attributes": {
                "iid": 3,
                "title": "Fix",
                "last_commit": 42,
            },
        });

        let Some(GitLabEvent::MergeRequest(mr)) = GitLabEvent::from_payload(&payload).unwrap()
        else {
            panic!("expected merge request");
        };
        assert!(mr.user.name.is_empty());
        assert!(mr.project.web_url.is_empty());
        assert_eq!(mr.object_attributes.number(), 3);
        assert_eq!(mr.object_attributes.title, "Fix");
        assert!(mr.object_attributes.last_commit.is_none());
    }

    #[test]
    fn test_merge_request_number_prefers_iid() {
        let attrs = MergeRequestAttributes {
            id: 9001,
            iid: Some(12),
            ..Default::default()
        };
        assert_eq!(attrs.number(), 12);

        let attrs = MergeRequestAttributes {
            id: 9001,
            ..Default::default()
        };
        assert_eq!(attrs.number(), 9001);
    }

    #[test]
    fn test_empty_sections() {
        assert!(Commit::default().is_empty());
        assert!(MergeRequestSummary::default().is_empty());

        let summary = MergeRequestSummary {
            title: "Fix".to_string(),
            ..Default::default()
        };
        assert!(!summary.is_empty());
    }
}
