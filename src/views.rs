//! Derived views over the task collection.
//!
//! Pure functions, recomputed from scratch whenever the collection or the
//! active filters change. The collection is small, so a full recompute is
//! simpler to reason about than incremental maintenance.

use chrono::{DateTime, Utc};

use crate::task::{Category, Status, Task};

/// Status facet of the filter: everything, or one status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

/// Category facet of the filter: everything, or one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

/// Active filter state: free-text search plus the two facets. All three
/// conditions are conjunctive.
#[derive(Debug, Clone, Default)]
pub struct TaskQuery {
    pub search: String,
    pub status: StatusFilter,
    pub category: CategoryFilter,
}

impl TaskQuery {
    fn matches(&self, task: &Task) -> bool {
        let matches_search = if self.search.is_empty() {
            true
        } else {
            let needle = self.search.to_lowercase();
            task.title.to_lowercase().contains(&needle)
                || task
                    .description
                    .as_ref()
                    .is_some_and(|d| d.to_lowercase().contains(&needle))
        };

        let matches_status = match self.status {
            StatusFilter::All => true,
            StatusFilter::Only(status) => task.status == status,
        };

        let matches_category = match self.category {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => task.category == category,
        };

        matches_search && matches_status && matches_category
    }
}

/// The subset of `tasks` passing `query`, in the input order.
pub fn filter_tasks<'a>(tasks: &'a [Task], query: &TaskQuery) -> Vec<&'a Task> {
    tasks.iter().filter(|t| query.matches(t)).collect()
}

/// Aggregate counts over the unfiltered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub in_progress: usize,
    /// Due date set, in the past relative to `now`, and not completed.
    pub overdue: usize,
}

/// Compute stats. `now` is a parameter so the result is deterministic
/// given the same inputs.
pub fn collection_stats(tasks: &[Task], now: DateTime<Utc>) -> TaskStats {
    let mut stats = TaskStats {
        total: tasks.len(),
        ..TaskStats::default()
    };

    for task in tasks {
        match task.status {
            Status::Completed => stats.completed += 1,
            Status::Pending => stats.pending += 1,
            Status::InProgress => stats.in_progress += 1,
        }
        if task.status != Status::Completed && task.due_date.is_some_and(|due| due < now) {
            stats.overdue += 1;
        }
    }

    stats
}
