//! Predicates and factories with fully scripted answers.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use autoignore::predicate::{IgnorePredicate, PredicateFactory};

/// Ignores exactly the listed paths and records every question asked.
#[derive(Debug, Clone, Default)]
pub struct SetPredicate {
    paths: HashSet<PathBuf>,
    asked: Arc<Mutex<Vec<PathBuf>>>,
}

impl SetPredicate {
    pub fn new<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            paths: paths.into_iter().map(Into::into).collect(),
            asked: Arc::default(),
        }
    }

    /// Paths evaluated so far, in order.
    pub fn asked(&self) -> Vec<PathBuf> {
        self.asked.lock().unwrap().clone()
    }
}

impl IgnorePredicate for SetPredicate {
    fn ignore(&self, path: &Path) -> bool {
        self.asked.lock().unwrap().push(path.to_path_buf());
        self.paths.contains(path)
    }
}

/// Hands out the same [`SetPredicate`] for every scope, optionally failing
/// for one scope root.
#[derive(Debug, Clone, Default)]
pub struct SetPredicateFactory {
    predicate: SetPredicate,
    fail_for: Option<PathBuf>,
}

impl SetPredicateFactory {
    pub fn new(predicate: SetPredicate) -> Self {
        Self {
            predicate,
            fail_for: None,
        }
    }

    pub fn failing_for(mut self, scope_root: impl Into<PathBuf>) -> Self {
        self.fail_for = Some(scope_root.into());
        self
    }
}

impl PredicateFactory for SetPredicateFactory {
    fn for_scope(&self, scope_root: &Path) -> Result<Box<dyn IgnorePredicate>> {
        if self.fail_for.as_deref() == Some(scope_root) {
            return Err(anyhow!("no predicate for {:?}", scope_root));
        }
        Ok(Box::new(self.predicate.clone()))
    }
}
