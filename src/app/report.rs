//! Status report printed after each refresh round

use crate::analysis::api::{RefreshSummary, StateHub};
use crate::model::{
    Classification, DataSource, LocalState, Preferences, Relationship, StateResult,
};
use prettytable::{format, Cell, Row, Table};
use serde::Serialize;

/// Everything one report shows, in the order the preferences list it
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub generated_at: String,
    pub summary: RefreshSummary,
    pub projects: Vec<ProjectStatus>,
}

#[derive(Debug, Serialize)]
pub struct ProjectStatus {
    pub name: String,
    pub local_state: SourceStatus<LocalState>,
    pub relationships: Vec<SourceStatus<Relationship>>,
}

/// One source's row
///
/// `previous` is the value the source held before the refresh round, not the
/// `Pending` marker the round reset it to.
#[derive(Debug, Serialize)]
pub struct SourceStatus<C> {
    pub source: DataSource,
    pub current: C,
    pub previous: Option<C>,
    pub changed: bool,
}

impl<C: Classification> SourceStatus<C> {
    /// `before_round` is `None` when the source was not part of the round;
    /// the cached `previous` is used instead
    fn new(result: StateResult<C>, before_round: Option<Option<C>>) -> Self {
        let previous = before_round.unwrap_or_else(|| result.previous());
        Self {
            changed: is_change(previous, result.current()),
            source: result.source().clone(),
            current: result.current(),
            previous,
        }
    }
}

// Only a move between two settled values is news
fn is_change<C: Classification>(previous: Option<C>, current: C) -> bool {
    match previous {
        Some(previous) => !previous.is_pending() && !current.is_pending() && previous != current,
        None => false,
    }
}

impl StatusReport {
    pub fn collect(hub: &StateHub, prefs: &Preferences, summary: RefreshSummary) -> Self {
        let baseline = &summary.baseline;
        let projects = prefs
            .projects()
            .iter()
            .map(|project| ProjectStatus {
                name: project.name.clone(),
                local_state: SourceStatus::new(
                    hub.get_local_state(&project.environment),
                    baseline.local_state_before(&project.environment),
                ),
                relationships: project
                    .peers
                    .iter()
                    .map(|peer| {
                        SourceStatus::new(
                            hub.get_relationship(peer),
                            baseline.relationship_before(peer),
                        )
                    })
                    .collect(),
            })
            .collect();

        Self {
            generated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            summary,
            projects,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn to_table(&self, color: bool) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
        table.set_titles(Row::new(
            ["Project", "Source", "Kind", "Current", "Previous", ""]
                .iter()
                .map(|title| Cell::new(title).style_spec("b"))
                .collect(),
        ));

        for project in &self.projects {
            let local = &project.local_state;
            table.add_row(Row::new(vec![
                Cell::new(&project.name),
                Cell::new(&format!("{} (local)", local.source.name)),
                Cell::new(&local.source.kind.to_string()),
                styled(&local.current.to_string(), local_state_style(local.current), color),
                Cell::new(&previous_text(local.previous)),
                Cell::new(changed_marker(local.changed)),
            ]));

            for rel in &project.relationships {
                table.add_row(Row::new(vec![
                    Cell::new(""),
                    Cell::new(&rel.source.name),
                    Cell::new(&rel.source.kind.to_string()),
                    styled(&rel.current.to_string(), relationship_style(rel.current), color),
                    Cell::new(&previous_text(rel.previous)),
                    Cell::new(changed_marker(rel.changed)),
                ]));
            }
        }
        table
    }

    /// Heading line: time and round outcome
    pub fn heading(&self, color: bool) -> String {
        use colored::*;

        let text = format!(
            "{}  {} computed, {} failed",
            self.generated_at, self.summary.computed, self.summary.failed
        );
        if !color {
            text
        } else if self.summary.failed > 0 {
            text.yellow().to_string()
        } else {
            text.bold().to_string()
        }
    }
}

fn previous_text<C: std::fmt::Display>(previous: Option<C>) -> String {
    previous.map_or_else(|| "-".to_string(), |p| p.to_string())
}

fn changed_marker(changed: bool) -> &'static str {
    if changed {
        "changed"
    } else {
        ""
    }
}

fn styled(text: &str, spec: &str, color: bool) -> Cell {
    let cell = Cell::new(text);
    if color {
        cell.style_spec(spec)
    } else {
        cell
    }
}

fn relationship_style(relationship: Relationship) -> &'static str {
    match relationship {
        Relationship::Same => "Fg",
        Relationship::Ahead | Relationship::Behind => "Fy",
        Relationship::MergeClean => "Fc",
        r if r.is_conflict() => "bFr",
        r if r.is_error() => "Fm",
        _ => "Fb",
    }
}

fn local_state_style(state: LocalState) -> &'static str {
    match state {
        LocalState::AllClear => "Fg",
        LocalState::Uncheckpointed => "Fy",
        LocalState::MustResolve => "bFr",
        LocalState::Error => "Fm",
        LocalState::Pending => "Fb",
    }
}
