//
//  bitbucket-api
//  output/views.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Table views of the models the binary prints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{
    format_bool, format_duration, format_relative_time, format_status, print_field, print_header,
    truncate, TableOutput, TableRow,
};
use crate::models::{Issue, Pipeline, PullRequest, Repository, Workspace};

const DASH: &str = "-";

fn text(value: Option<&str>) -> String {
    value.unwrap_or(DASH).to_string()
}

fn when(value: Option<&DateTime<Utc>>) -> String {
    value.map(format_relative_time).unwrap_or_else(|| DASH.to_string())
}

/// The serialized name of a unit enum variant, e.g. `"on hold"`.
fn label<T: Serialize>(value: Option<&T>) -> String {
    value
        .and_then(|v| serde_json::to_value(v).ok())
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_else(|| DASH.to_string())
}

impl TableRow for Repository {
    fn headers() -> Vec<&'static str> {
        vec!["NAME", "DESCRIPTION", "PRIVATE", "LANGUAGE", "UPDATED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.display_name().to_string(),
            truncate(self.description.as_deref().unwrap_or(""), 50),
            self.is_private
                .map(|p| format_bool(p, color))
                .unwrap_or_else(|| DASH.to_string()),
            text(self.language.as_deref().filter(|l| !l.is_empty())),
            when(self.updated_on.as_ref()),
        ]
    }
}

impl TableOutput for Repository {
    fn print_table(&self, color: bool) {
        print_header(self.display_name());
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            println!("{}\n", description);
        }
        let private = self
            .is_private
            .map(|p| format_bool(p, color))
            .unwrap_or_else(|| DASH.to_string());
        print_field("Private", &private, color);
        print_field("SCM", &text(self.scm.as_deref()), color);
        print_field(
            "Main branch",
            &text(self.mainbranch.as_ref().and_then(|b| b.name.as_deref())),
            color,
        );
        print_field("Language", &text(self.language.as_deref()), color);
        print_field("Fork policy", &label(self.fork_policy.as_ref()), color);
        if let Some(size) = self.size {
            print_field("Size", &format!("{} bytes", size), color);
        }
        print_field("Created", &when(self.created_on.as_ref()), color);
        print_field("Updated", &when(self.updated_on.as_ref()), color);
        if let Some(url) = self.links.as_ref().and_then(|l| l.href("html")) {
            print_field("URL", url, color);
        }
    }
}

impl TableRow for PullRequest {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "TITLE", "BRANCH", "AUTHOR", "STATE", "UPDATED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id.map(|id| format!("#{}", id)).unwrap_or_else(|| DASH.to_string()),
            truncate(self.title.as_deref().unwrap_or(""), 50),
            format!(
                "{} → {}",
                self.source_branch().unwrap_or("?"),
                self.destination_branch().unwrap_or("?")
            ),
            self.author
                .as_ref()
                .map(|a| a.name().to_string())
                .unwrap_or_else(|| DASH.to_string()),
            format_status(&label(self.state.as_ref()), color),
            when(self.updated_on.as_ref()),
        ]
    }
}

impl TableOutput for PullRequest {
    fn print_table(&self, color: bool) {
        let title = format!(
            "#{} {}",
            self.id.unwrap_or_default(),
            self.title.as_deref().unwrap_or("")
        );
        print_header(&title);
        print_field("State", &format_status(&label(self.state.as_ref()), color), color);
        print_field(
            "Branches",
            &format!(
                "{} → {}",
                self.source_branch().unwrap_or("?"),
                self.destination_branch().unwrap_or("?")
            ),
            color,
        );
        print_field(
            "Author",
            &text(self.author.as_ref().map(|a| a.name())),
            color,
        );
        let reviewers = self
            .reviewers
            .iter()
            .flatten()
            .map(|r| r.name())
            .collect::<Vec<_>>()
            .join(", ");
        if !reviewers.is_empty() {
            print_field("Reviewers", &reviewers, color);
        }
        print_field("Approvals", &self.approvals().to_string(), color);
        if self.draft == Some(true) {
            print_field("Draft", &format_bool(true, color), color);
        }
        print_field("Comments", &self.comment_count.unwrap_or(0).to_string(), color);
        print_field("Created", &when(self.created_on.as_ref()), color);
        print_field("Updated", &when(self.updated_on.as_ref()), color);
        if let Some(url) = self.links.as_ref().and_then(|l| l.href("html")) {
            print_field("URL", url, color);
        }
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            println!("\n{}", description);
        }
    }
}

impl TableRow for Issue {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "TITLE", "KIND", "PRIORITY", "STATE", "ASSIGNEE"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.id.map(|id| format!("#{}", id)).unwrap_or_else(|| DASH.to_string()),
            truncate(self.title.as_deref().unwrap_or(""), 50),
            label(self.kind.as_ref()),
            label(self.priority.as_ref()),
            format_status(&label(self.state.as_ref()), color),
            text(self.assignee.as_ref().map(|a| a.name())),
        ]
    }
}

impl TableOutput for Issue {
    fn print_table(&self, color: bool) {
        let title = format!(
            "#{} {}",
            self.id.unwrap_or_default(),
            self.title.as_deref().unwrap_or("")
        );
        print_header(&title);
        print_field("State", &format_status(&label(self.state.as_ref()), color), color);
        print_field("Kind", &label(self.kind.as_ref()), color);
        print_field("Priority", &label(self.priority.as_ref()), color);
        print_field("Reporter", &text(self.reporter.as_ref().map(|a| a.name())), color);
        print_field("Assignee", &text(self.assignee.as_ref().map(|a| a.name())), color);
        print_field("Votes", &self.votes.unwrap_or(0).to_string(), color);
        print_field("Created", &when(self.created_on.as_ref()), color);
        print_field("Updated", &when(self.updated_on.as_ref()), color);
        if let Some(body) = self
            .content
            .as_ref()
            .and_then(|c| c.raw.as_deref())
            .filter(|b| !b.is_empty())
        {
            println!("\n{}", body);
        }
    }
}

impl TableRow for Pipeline {
    fn headers() -> Vec<&'static str> {
        vec!["#", "STATUS", "REF", "TRIGGER", "DURATION", "CREATED"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            self.build_number
                .map(|n| n.to_string())
                .unwrap_or_else(|| DASH.to_string()),
            format_status(self.status_label(), color),
            text(self.target.as_ref().and_then(|t| t.ref_name.as_deref())),
            text(
                self.trigger
                    .as_ref()
                    .and_then(|t| t.name.as_deref()),
            ),
            self.duration_in_seconds
                .map(format_duration)
                .unwrap_or_else(|| DASH.to_string()),
            when(self.created_on.as_ref()),
        ]
    }
}

impl TableOutput for Pipeline {
    fn print_table(&self, color: bool) {
        print_header(&format!("Pipeline #{}", self.build_number.unwrap_or_default()));
        print_field("UUID", &text(self.uuid.as_deref()), color);
        print_field("Status", &format_status(self.status_label(), color), color);
        if let Some(target) = &self.target {
            print_field("Ref", &text(target.ref_name.as_deref()), color);
            if let Some(commit) = &target.commit {
                print_field("Commit", commit.short_hash(), color);
            }
            if let Some(pattern) = target.selector.as_ref().and_then(|s| s.pattern.as_deref()) {
                print_field("Selector", pattern, color);
            }
        }
        print_field(
            "Creator",
            &text(self.creator.as_ref().map(|a| a.name())),
            color,
        );
        if let Some(secs) = self.duration_in_seconds {
            print_field("Duration", &format_duration(secs), color);
        }
        print_field("Created", &when(self.created_on.as_ref()), color);
        if let Some(completed) = &self.completed_on {
            print_field("Completed", &format_relative_time(completed), color);
        }
    }
}

impl TableRow for Workspace {
    fn headers() -> Vec<&'static str> {
        vec!["SLUG", "NAME", "PRIVATE"]
    }

    fn row(&self, color: bool) -> Vec<String> {
        vec![
            text(self.slug.as_deref()),
            text(self.name.as_deref()),
            self.is_private
                .map(|p| format_bool(p, color))
                .unwrap_or_else(|| DASH.to_string()),
        ]
    }
}

impl TableOutput for Workspace {
    fn print_table(&self, color: bool) {
        print_header(self.name.as_deref().or(self.slug.as_deref()).unwrap_or("Workspace"));
        print_field("Slug", &text(self.slug.as_deref()), color);
        print_field("UUID", &text(self.uuid.as_deref()), color);
        print_field(
            "Private",
            &self.is_private.map(|p| format_bool(p, color)).unwrap_or_else(|| DASH.to_string()),
            color,
        );
        print_field("Created", &when(self.created_on.as_ref()), color);
        if let Some(url) = self.links.as_ref().and_then(|l| l.href("html")) {
            print_field("URL", url, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{IssueState, PullRequestState};

    #[test]
    fn test_label_uses_wire_names() {
        assert_eq!(label(Some(&IssueState::OnHold)), "on hold");
        assert_eq!(label(Some(&PullRequestState::Open)), "OPEN");
        assert_eq!(label::<IssueState>(None), "-");
    }

    #[test]
    fn test_pull_request_row() {
        let pr = PullRequest {
            id: Some(7),
            title: Some("Add login".to_string()),
            state: Some(PullRequestState::Open),
            ..PullRequest::between("feature/login", "main")
        };
        let row = pr.row(false);
        assert_eq!(row[0], "#7");
        assert_eq!(row[2], "feature/login → main");
        assert_eq!(row[4], "OPEN");
        assert_eq!(row.len(), PullRequest::headers().len());
    }

    #[test]
    fn test_repository_row_defaults() {
        let row = Repository::default().row(false);
        assert_eq!(row[2], "-");
        assert_eq!(row[3], "-");
    }
}
