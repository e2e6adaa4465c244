//! Accumulated diagnostics.
//!
//! Every phase (build, read, evaluate, write) keeps going past the first
//! problem and reports all of them at once. A phase returns its
//! [`Diagnostics`], or an [`Outcome`] pairing them with the value it
//! produced, and the caller decides whether to continue.

use std::fmt;

use thiserror::Error;

use crate::error::{BuildError, EvalError, InputError, WriteError};

/// Any problem a phase can report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Problem {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Eval(#[from] EvalError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub problem: Problem,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.problem, f)
    }
}

/// Ordered list of diagnostics. Good until an error is recorded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error. The diagnostics are no longer good.
    pub fn error(&mut self, problem: impl Into<Problem>) {
        self.push(Severity::Error, problem.into());
    }

    /// Record a warning.
    pub fn warning(&mut self, problem: impl Into<Problem>) {
        self.push(Severity::Warning, problem.into());
    }

    fn push(&mut self, severity: Severity, problem: Problem) {
        self.entries.push(Diagnostic { severity, problem });
    }

    /// `true` if no error has been recorded. Warnings do not count.
    pub fn is_good(&self) -> bool {
        self.entries.iter().all(|d| d.severity != Severity::Error)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&Diagnostic> {
        self.entries.last()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Problem> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| &d.problem)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Problem> {
        self.entries
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .map(|d| &d.problem)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Value produced by a phase together with what went wrong producing it.
#[derive(Debug, Clone)]
pub struct Outcome<T> {
    pub value: T,
    pub diagnostics: Diagnostics,
}

impl<T> Outcome<T> {
    pub fn new(value: T, diagnostics: Diagnostics) -> Self {
        Self { value, diagnostics }
    }

    pub fn is_good(&self) -> bool {
        self.diagnostics.is_good()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome::new(f(self.value), self.diagnostics)
    }
}
