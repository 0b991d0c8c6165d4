/// Header GitLab uses to name the hook that fired.
pub const GITLAB_EVENT_HEADER: &str = "x-gitlab-event";

/// Hook names GitLab may send. Only some of them produce a notification;
/// the rest are accepted and ignored by the translator.
const KNOWN_HOOKS: [&str; 9] = [
    "Push Hook",
    "Tag Push Hook",
    "Issue Hook",
    "Note Hook",
    "Merge Request Hook",
    "Wiki Page Hook",
    "Pipeline Hook",
    "Job Hook",
    "Build Hook",
];

pub fn is_known_hook(value: &str) -> bool {
    KNOWN_HOOKS.contains(&value)
}
