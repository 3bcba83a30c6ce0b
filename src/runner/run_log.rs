//! Ordered record of per-step outcomes for one invocation.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};

/// What happened to a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Confirmed and the action succeeded.
    Succeeded,
    /// Confirmed and the action failed.
    Failed {
        /// Whether the failure aborted the run.
        critical: bool,
    },
    /// The operator answered no.
    Declined,
    /// The guard reported the work as already done; no prompt was shown.
    Satisfied,
}

impl Outcome {
    /// Stable label used in logs and summaries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Succeeded => "confirmed-success",
            Self::Failed { .. } => "confirmed-failure",
            Self::Declined => "declined",
            Self::Satisfied => "already-satisfied",
        }
    }

    /// Whether the operator confirmed the step.
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed { .. })
    }

    /// Get a display character for this outcome.
    pub fn display_char(&self) -> char {
        match self {
            Self::Succeeded => '✓',
            Self::Failed { critical: true } => '✗',
            Self::Failed { critical: false } => '⚠',
            Self::Declined | Self::Satisfied => '○',
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One `(step, outcome)` record.
#[derive(Debug, Clone, PartialEq)]
pub struct RunLogEntry {
    /// Step name.
    pub step: String,

    /// Outcome.
    pub outcome: Outcome,

    /// How long the action ran (confirmed steps only).
    pub duration: Option<Duration>,

    /// Error message for failures, check description for satisfied steps.
    pub detail: Option<String>,
}

/// Outcomes of a single run, in execution order.
#[derive(Debug, Clone)]
pub struct RunLog {
    started_at: DateTime<Utc>,
    entries: Vec<RunLogEntry>,
    aborted_by: Option<String>,
}

impl Default for RunLog {
    fn default() -> Self {
        Self::new()
    }
}

impl RunLog {
    /// Create an empty log stamped with the current time.
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            entries: Vec::new(),
            aborted_by: None,
        }
    }

    pub(crate) fn record(&mut self, entry: RunLogEntry) {
        if let Outcome::Failed { critical: true } = entry.outcome {
            self.aborted_by = Some(entry.step.clone());
        }
        self.entries.push(entry);
    }

    /// When the run started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// All entries in execution order.
    pub fn entries(&self) -> &[RunLogEntry] {
        &self.entries
    }

    /// `(step, outcome)` pairs in execution order.
    pub fn outcomes(&self) -> Vec<(&str, Outcome)> {
        self.entries
            .iter()
            .map(|e| (e.step.as_str(), e.outcome))
            .collect()
    }

    /// Outcome recorded for a step, if it was reached.
    pub fn outcome_of(&self, step: &str) -> Option<Outcome> {
        self.entries
            .iter()
            .find(|e| e.step == step)
            .map(|e| e.outcome)
    }

    /// Name of the critical step that aborted the run.
    pub fn aborted_by(&self) -> Option<&str> {
        self.aborted_by.as_deref()
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted_by.is_some()
    }

    /// Number of entries matching a predicate.
    pub fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.outcome)).count()
    }

    /// Sum of action durations.
    pub fn total_duration(&self) -> Duration {
        self.entries.iter().filter_map(|e| e.duration).sum()
    }

    /// Process exit code for this run: non-zero only after a critical failure.
    pub fn exit_code(&self) -> i32 {
        if self.is_aborted() {
            1
        } else {
            0
        }
    }
}
