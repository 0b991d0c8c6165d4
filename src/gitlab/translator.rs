use serde_json::Value;

use super::events::{GitLabEvent, MergeRequestEvent, PipelineEvent, PushEvent, ZERO_HASH};
use super::format::{
    build_line, colored_status, commit_line, commit_summary, format_duration, format_timestamp,
    list_item, project_line, LINE_SEPARATOR,
};
use super::status::{is_settled, merge_request_action, trigger_phrase};
use crate::error::Result;
use crate::message::Message;

/// Outcome of translating one webhook event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    Deliver(Message),
    /// Pipeline still has builds in flight; GitLab will send another event once they settle.
    Suppressed,
    /// Unknown or unsupported `object_kind`.
    Ignored,
}

pub fn translate_payload(payload: &Value) -> Result<Translation> {
    Ok(GitLabEvent::from_payload(payload)?.map_or(Translation::Ignored, |event| translate(&event)))
}

pub fn translate(event: &GitLabEvent) -> Translation {
    let lines = match event {
        GitLabEvent::Push(push) => push_lines(push),
        GitLabEvent::TagPush(tag) => tag_push_lines(tag),
        GitLabEvent::MergeRequest(mr) => merge_request_lines(mr),
        GitLabEvent::Pipeline(pipeline) => match pipeline_lines(pipeline) {
            Some(lines) => lines,
            None => return Translation::Suppressed,
        },
    };

    Translation::Deliver(Message::markdown(lines.join(LINE_SEPARATOR)))
}

fn push_lines(event: &PushEvent) -> Vec<String> {
    let project = &event.project;
    let branch = event.ref_.strip_prefix("refs/heads/").unwrap_or(&event.ref_);

    let operation = if event.before == ZERO_HASH {
        "created branch"
    } else if event.after == ZERO_HASH {
        "deleted branch"
    } else {
        "pushed to"
    };

    let mut lines = vec![
        format!(
            "`{}` {operation} [[{}/{branch}]({}/tree/{branch})].",
            event.user_name, project.path_with_namespace, project.web_url
        ),
        project_line(project),
    ];
    push_commit_lines(&mut lines, event);
    lines
}

fn tag_push_lines(event: &PushEvent) -> Vec<String> {
    let project = &event.project;
    let tag = event.ref_.strip_prefix("refs/tags/").unwrap_or(&event.ref_);

    // Retagging an existing tag keeps an empty label.
    let subject = if event.before == ZERO_HASH {
        "added tag"
    } else if event.after == ZERO_HASH {
        "removed tag"
    } else {
        "tag"
    };

    let mut lines = vec![
        format!(
            "`{}` {subject} [[{}/{tag}]({}/-/tags/{tag})].",
            event.user_name, project.path_with_namespace, project.web_url
        ),
        project_line(project),
    ];
    if let Some(message) = event.message.as_deref().filter(|m| !m.is_empty()) {
        lines.push(list_item("note", message));
    }
    push_commit_lines(&mut lines, event);
    lines
}

fn push_commit_lines(lines: &mut Vec<String>, event: &PushEvent) {
    if event.total_commits_count == 0 {
        return;
    }
    lines.push(format!(
        "**{} commits in total:**\n",
        event.total_commits_count
    ));
    lines.push(list_item("", &commit_summary(&event.commits)));
}

fn merge_request_lines(event: &MergeRequestEvent) -> Vec<String> {
    let attrs = &event.object_attributes;
    let action = merge_request_action(&attrs.state);
    let admonition = action
        .admonition
        .map(|text| format!(", **{text}**"))
        .unwrap_or_default();

    let mut lines = vec![
        format!(
            "`{}` **{}** [[#{} merge request {}]({})], `{}` into `{}`{admonition}.",
            event.user.name,
            action.verb,
            attrs.number(),
            attrs.title,
            attrs.url,
            attrs.source_branch,
            attrs.target_branch
        ),
        project_line(&event.project),
        "**MR details:**\n".to_string(),
    ];

    if !attrs.updated_at.is_empty() {
        lines.push(list_item("updated", &format_timestamp(&attrs.updated_at)));
    }
    if !attrs.description.is_empty() {
        lines.push(list_item("description", &attrs.description));
    }
    if let Some(commit) = attrs.last_commit.as_ref().filter(|c| !c.is_empty()) {
        lines.push(list_item("commit", &format!("\n{}", commit_line(commit))));
    }
    lines
}

/// Returns `None` while any build is still created, running or pending.
fn pipeline_lines(event: &PipelineEvent) -> Option<Vec<String>> {
    if !event.builds.iter().all(|build| is_settled(&build.status)) {
        return None;
    }

    let attrs = &event.object_attributes;
    let project = &event.project;
    let pipeline_url = format!("{}/pipelines/{}", project.web_url, attrs.id);

    let mut lines = vec![
        format!(
            "[[#{} pipeline]({pipeline_url})] {} on branch `{}`, {}.",
            attrs.id,
            colored_status(&attrs.status),
            attrs.ref_,
            trigger_phrase(&attrs.source)
        ),
        project_line(project),
        "**Pipeline details:**\n".to_string(),
    ];

    if !event.user.name.is_empty() {
        lines.push(list_item("operator", &format!("`{}`", event.user.name)));
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let duration = attrs.duration.map_or(0, |d| d as u64);
    if duration > 0 {
        lines.push(list_item("duration", &format_duration(duration)));
    }

    if !attrs.stages.is_empty() {
        lines.push(list_item(
            &format!("{} stages", attrs.stages.len()),
            &attrs.stages.join(" / "),
        ));
    }

    if let Some(mr) = event.merge_request.as_ref().filter(|mr| !mr.is_empty()) {
        lines.push(list_item(
            "merge request",
            &format!(
                "[{}]({}), `{}` into `{}`",
                mr.title, mr.url, mr.source_branch, mr.target_branch
            ),
        ));
    }

    if let Some(commit) = event.commit.as_ref().filter(|c| !c.is_empty()) {
        lines.push(list_item("commit", &format!("\n{}", commit_line(commit))));
    }

    if !event.builds.is_empty() {
        let builds = event
            .builds
            .iter()
            .map(|build| build_line(build, &event.user.username, &project.web_url))
            .collect::<Vec<_>>();
        lines.push(list_item("builds", &format!("\n{}", builds.join("\n"))));
    }

    Some(lines)
}
