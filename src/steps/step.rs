//! The step model: a named action with a criticality flag and an optional
//! guard.
//!
//! Steps are independent. Any of them may be declined, so an action must not
//! rely on an earlier step having run in the same invocation, and it must be
//! safe to run again on a machine where it already ran.

use std::fmt;

use crate::steps::completed_check::CheckResult;

/// The work a step performs.
///
/// Errors are opaque to the runner; they are only logged. Any
/// `FnMut() -> anyhow::Result<()>` closure is an action.
pub trait Action {
    /// Perform the work.
    fn run(&mut self) -> anyhow::Result<()>;
}

impl<F> Action for F
where
    F: FnMut() -> anyhow::Result<()>,
{
    fn run(&mut self) -> anyhow::Result<()> {
        self()
    }
}

/// Check that reports whether a step's work is already in place.
pub trait Guard {
    /// Evaluate the guard.
    fn check(&self) -> CheckResult;
}

impl<F> Guard for F
where
    F: Fn() -> CheckResult,
{
    fn check(&self) -> CheckResult {
        self()
    }
}

/// One confirm-gated unit of provisioning work.
pub struct Step {
    name: String,
    description: Option<String>,
    critical: bool,
    privileged: bool,
    guard: Option<Box<dyn Guard>>,
    action: Box<dyn Action>,
}

impl Step {
    /// Create a non-critical step without a guard from a closure.
    pub fn new<F>(name: impl Into<String>, action: F) -> Self
    where
        F: FnMut() -> anyhow::Result<()> + 'static,
    {
        Self::from_action(name, action)
    }

    /// Create a non-critical step without a guard from any [`Action`].
    pub fn from_action(name: impl Into<String>, action: impl Action + 'static) -> Self {
        Self {
            name: name.into(),
            description: None,
            critical: false,
            privileged: false,
            guard: None,
            action: Box::new(action),
        }
    }

    /// Set whether a failure of this step aborts the run.
    pub fn critical(mut self, critical: bool) -> Self {
        self.critical = critical;
        self
    }

    /// Mark the step as needing elevated privileges (display only).
    pub fn privileged(mut self, privileged: bool) -> Self {
        self.privileged = privileged;
        self
    }

    /// Attach a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach a guard.
    pub fn with_guard(mut self, guard: impl Guard + 'static) -> Self {
        self.guard = Some(Box::new(guard));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_critical(&self) -> bool {
        self.critical
    }

    pub fn is_privileged(&self) -> bool {
        self.privileged
    }

    pub fn has_guard(&self) -> bool {
        self.guard.is_some()
    }

    /// Evaluate the guard, if any.
    pub fn check(&self) -> Option<CheckResult> {
        self.guard.as_ref().map(|g| g.check())
    }

    /// Invoke the action.
    pub fn run(&mut self) -> anyhow::Result<()> {
        self.action.run()
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("critical", &self.critical)
            .field("privileged", &self.privileged)
            .field("guard", &self.guard.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn closure_is_an_action() {
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let mut step = Step::new("count", move || {
            counter.set(counter.get() + 1);
            Ok(())
        });
        step.run().unwrap();
        step.run().unwrap();
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn failing_action_returns_error() {
        let mut step = Step::new("boom", || bail!("no network"));
        let err = step.run().unwrap_err();
        assert_eq!(err.to_string(), "no network");
    }

    #[test]
    fn builder_sets_flags() {
        let step = Step::new("mirrors", || Ok(()))
            .critical(true)
            .privileged(true)
            .with_description("Rank mirrors");
        assert_eq!(step.name(), "mirrors");
        assert!(step.is_critical());
        assert!(step.is_privileged());
        assert_eq!(step.description(), Some("Rank mirrors"));
        assert!(!step.has_guard());
        assert!(step.check().is_none());
    }

    #[test]
    fn guard_closure_is_evaluated() {
        let step =
            Step::new("fonts", || Ok(())).with_guard(|| CheckResult::complete("fonts cached"));
        let result = step.check().unwrap();
        assert!(result.complete);
        assert_eq!(result.description, "fonts cached");
    }

    #[test]
    fn debug_hides_closures() {
        let step = Step::new("a", || Ok(()));
        let debug = format!("{:?}", step);
        assert!(debug.contains("\"a\""));
        assert!(debug.contains("critical: false"));
    }
}
