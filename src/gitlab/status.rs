/// Font colours understood by the group robot markdown renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Info,
    Warning,
    /// Grey, the renderer's neutral colour.
    Comment,
}

impl Color {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Comment => "comment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub color: Color,
    pub label: &'static str,
    /// `false` for states that should not be announced on their own.
    pub notify: bool,
}

const fn style(color: Color, label: &'static str) -> StatusStyle {
    StatusStyle {
        color,
        label,
        notify: true,
    }
}

const STATUS_STYLES: [(&str, StatusStyle); 7] = [
    ("failed", style(Color::Warning, "failed")),
    ("success", style(Color::Info, "succeeded")),
    ("running", style(Color::Comment, "running")),
    (
        "pending",
        StatusStyle {
            color: Color::Warning,
            label: "pending",
            notify: false,
        },
    ),
    ("canceled", style(Color::Comment, "canceled")),
    ("skipped", style(Color::Comment, "skipped")),
    ("manual", style(Color::Comment, "needs manual trigger")),
];

/// Build states that mean the pipeline has not settled yet.
pub const UNSETTLED_STATUSES: [&str; 3] = ["created", "running", "pending"];

const TRIGGER_PHRASES: [(&str, &str); 3] = [
    ("push", "push trigger"),
    ("merge_request_event", "merge trigger"),
    ("web", "manual web trigger"),
];

pub fn status_style(status: &str) -> Option<StatusStyle> {
    STATUS_STYLES
        .iter()
        .find(|(name, _)| *name == status)
        .map(|(_, style)| *style)
}

pub fn is_settled(status: &str) -> bool {
    !UNSETTLED_STATUSES.contains(&status)
}

pub fn trigger_phrase(source: &str) -> String {
    TRIGGER_PHRASES
        .iter()
        .find(|(name, _)| *name == source)
        .map_or_else(|| format!("trigger ({source})"), |(_, phrase)| (*phrase).to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MergeRequestAction {
    pub verb: &'static str,
    pub admonition: Option<&'static str>,
}

const MERGE_REQUEST_ACTIONS: [(&str, MergeRequestAction); 4] = [
    (
        "opened",
        MergeRequestAction {
            verb: "opened",
            admonition: Some("request reviewer confirmation"),
        },
    ),
    (
        "closed",
        MergeRequestAction {
            verb: "closed",
            admonition: Some("request submitter double-check"),
        },
    ),
    (
        "locked",
        MergeRequestAction {
            verb: "locked",
            admonition: None,
        },
    ),
    (
        "merged",
        MergeRequestAction {
            verb: "merged",
            admonition: None,
        },
    ),
];

/// Unknown states map to an empty verb without admonition.
pub fn merge_request_action(state: &str) -> MergeRequestAction {
    MERGE_REQUEST_ACTIONS
        .iter()
        .find(|(name, _)| *name == state)
        .map(|(_, action)| *action)
        .unwrap_or_default()
}
