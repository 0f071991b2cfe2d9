//! Buffered collection of results for sorted output.

use std::{
    io,
    sync::{Mutex, PoisonError},
};

use crate::{config::SortOrder, presenter::sort_results, scanner::ResultSink};

use super::SizeResult;

/// Results gathered from every worker before anything is printed.
///
/// Workers append under a mutex; the collection is read once, after the scan,
/// by consuming it.
#[derive(Debug, Default)]
pub struct ResultSet(Mutex<Vec<SizeResult>>);

impl ResultSet {
    /// Create an empty result set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of results collected so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether no result has been collected.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consume the set, returning results in enumeration order.
    #[must_use]
    pub fn into_results(self) -> Vec<SizeResult> {
        let mut results = self.into_inner();
        results.sort_by_key(|result| result.order);
        results
    }

    /// Consume the set, returning results sorted by size in `order`.
    ///
    /// Ties keep enumeration order and unmeasured results come last.
    #[must_use]
    pub fn into_sorted(self, order: SortOrder) -> Vec<SizeResult> {
        let mut results = self.into_inner();
        sort_results(&mut results, order);
        results
    }

    fn into_inner(self) -> Vec<SizeResult> {
        self.0.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl ResultSink for ResultSet {
    fn accept(&self, result: SizeResult) -> io::Result<()> {
        self.0
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::UNMEASURED;

    fn collected() -> ResultSet {
        let set = ResultSet::new();
        // Completion order differs from enumeration order.
        set.accept(SizeResult::new(2, "c", UNMEASURED)).unwrap();
        set.accept(SizeResult::new(0, "a", 350)).unwrap();
        set.accept(SizeResult::new(1, "b", 0)).unwrap();
        set
    }

    #[test]
    fn test_accept_appends() {
        let set = collected();

        assert_eq!(set.len(), 3);
        assert!(!set.is_empty());
        assert!(ResultSet::new().is_empty());
    }

    #[test]
    fn test_into_results_restores_enumeration_order() {
        let names: Vec<_> = collected()
            .into_results()
            .into_iter()
            .map(|r| r.name)
            .collect();

        assert_eq!(names, ["a", "b", "c"]);
    }

    #[test]
    fn test_into_sorted_ascending() {
        let names: Vec<_> = collected()
            .into_sorted(SortOrder::Ascending)
            .into_iter()
            .map(|r| r.name)
            .collect();

        assert_eq!(names, ["b", "a", "c"]);
    }

    #[test]
    fn test_concurrent_accept_loses_nothing() {
        let set = ResultSet::new();

        std::thread::scope(|scope| {
            for worker in 0..8 {
                let set = &set;
                scope.spawn(move || {
                    for i in 0..100 {
                        set.accept(SizeResult::new(worker * 100 + i, "dir", 1)).unwrap();
                    }
                });
            }
        });

        let results = set.into_results();
        assert_eq!(results.len(), 800);
        assert!(results.iter().enumerate().all(|(i, r)| r.order == i));
    }
}
