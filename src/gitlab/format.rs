use chrono::{DateTime, NaiveDateTime};

use super::events::{Build, Commit, Project};
use super::status::{status_style, Color};

/// Separator between the lines of one notification.
pub const LINE_SEPARATOR: &str = " \n  ";

pub fn list_item(label: &str, text: &str) -> String {
    if label.is_empty() {
        format!("> {text}")
    } else {
        format!(">{label}: {text}")
    }
}

pub fn project_line(project: &Project) -> String {
    format!(
        "> project [[{} | {}]({})]\n",
        project.name, project.path_with_namespace, project.web_url
    )
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn commit_line(commit: &Commit) -> String {
    format!(
        "{}: [{}]({})",
        commit.author.name,
        collapse_whitespace(&commit.message),
        commit.url
    )
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ChangeCounts {
    pub added: usize,
    pub modified: usize,
    pub removed: usize,
}

impl ChangeCounts {
    pub fn tally(commits: &[Commit]) -> Self {
        commits.iter().fold(Self::default(), |acc, commit| Self {
            added: acc.added + commit.added.len(),
            modified: acc.modified + commit.modified.len(),
            removed: acc.removed + commit.removed.len(),
        })
    }
}

/// Aggregate file counts followed by one line per commit, in input order.
pub fn commit_summary(commits: &[Commit]) -> String {
    let counts = ChangeCounts::tally(commits);
    let lines = commits.iter().map(commit_line).collect::<Vec<_>>();

    format!(
        "added: `{}` modified: `{}` removed: `{}` \n {}",
        counts.added,
        counts.modified,
        counts.removed,
        lines.join("\n")
    )
}

/// Hours are not broken out: anything from an hour up stays in seconds.
pub fn format_duration(seconds: u64) -> String {
    match seconds {
        0..=59 => format!("{seconds} seconds"),
        60..=3599 => format!("{}m{}s", seconds / 60, seconds % 60),
        _ => format!("{seconds} seconds"),
    }
}

pub fn colored(color: Color, text: &str) -> String {
    format!("<font color=\"{}\">{text}</font>", color.as_str())
}

pub fn colored_status(status: &str) -> String {
    match status_style(status) {
        Some(style) => colored(style.color, style.label),
        None => colored(Color::Comment, &format!("unknown status ({status})")),
    }
}

/// `pipeline_username` is the user who triggered the whole pipeline; builds
/// started by someone else are attributed explicitly. Builds without a user
/// carry no attribution.
pub fn build_line(build: &Build, pipeline_username: &str, web_url: &str) -> String {
    let user = &build.user;
    let attribution = if user.username.is_empty() || user.username == pipeline_username {
        String::new()
    } else {
        format!(", triggered by {}", user.name)
    };

    format!(
        "`{}`: [`{}`]({web_url}/-/jobs/{}) > {}{attribution}",
        build.stage,
        build.name,
        build.id,
        colored_status(&build.status)
    )
}

/// Renders GitLab timestamps as `MM-DD HH:mm` in the offset they carry.
/// Values in an unknown format are returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    const SHORT: &str = "%m-%d %H:%M";

    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S %z"))
        .map(|dt| dt.format(SHORT).to_string())
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S UTC")
                .map(|dt| dt.format(SHORT).to_string())
        })
        .unwrap_or_else(|_| raw.to_string())
}
