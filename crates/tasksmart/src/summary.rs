/*
[INPUT]:  Snapshot of tasks held by the task cache
[OUTPUT]: Category and priority counts in fixed display order, task filters
[POS]:    Aggregation layer - pure derivation over the current snapshot
[UPDATE]: When changing displayed categories or count semantics
*/

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tasksmart_client::{Category, DEFAULT_CATEGORIES, PRIORITIES, Priority, Task};

/// One sidebar entry derived from the snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
    pub icon: &'static str,
    /// Hex accent colour; `None` renders with the theme's foreground
    pub color: Option<&'static str>,
    pub filter: TaskFilter,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriorityCount {
    pub name: String,
    pub count: usize,
    pub color: &'static str,
    pub filter: TaskFilter,
}

/// Counts derived from one snapshot; never updated incrementally
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSummary {
    /// `All`, `Personal`, `Work`, `Important`, `Completed`
    pub categories: Vec<CategoryCount>,
    /// `High`, `Medium`, `Low`
    pub priorities: Vec<PriorityCount>,
    pub total: usize,
    pub completed: usize,
    /// Tasks whose category is outside the displayed defaults
    pub hidden: usize,
    /// Every category seen, including ones not displayed
    pub by_category: HashMap<Category, usize>,
}

impl TaskSummary {
    pub fn category(&self, name: &str) -> Option<&CategoryCount> {
        self.categories.iter().find(|entry| entry.name == name)
    }

    pub fn priority(&self, priority: Priority) -> Option<&PriorityCount> {
        self.priorities
            .iter()
            .find(|entry| entry.name == priority.as_str())
    }
}

pub fn category_icon(category: &Category) -> &'static str {
    match category {
        Category::Personal => "👤",
        Category::Work => "💼",
        Category::Important => "⭐",
        Category::Other(_) => "•",
    }
}

pub fn category_color(category: &Category) -> Option<&'static str> {
    match category {
        Category::Personal => Some("#3b82f6"),
        Category::Work => Some("#8b5cf6"),
        Category::Important => Some("#ef4444"),
        Category::Other(_) => None,
    }
}

pub fn priority_color(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "#ef4444",
        Priority::Medium => "#f59e0b",
        Priority::Low => "#10b981",
    }
}

const ALL_ICON: &str = "📋";
const COMPLETED_ICON: &str = "✅";
const COMPLETED_COLOR: &str = "#10b981";

/// Single pass over `tasks` producing the display summary
pub fn summarize(tasks: &[Task]) -> TaskSummary {
    let mut by_category: HashMap<Category, usize> = DEFAULT_CATEGORIES
        .iter()
        .cloned()
        .map(|category| (category, 0))
        .collect();
    let mut by_priority: HashMap<Priority, usize> =
        PRIORITIES.iter().map(|priority| (*priority, 0)).collect();
    let mut completed = 0;

    for task in tasks {
        *by_category.entry(task.category.clone()).or_insert(0) += 1;
        *by_priority.entry(task.priority).or_insert(0) += 1;
        if task.completed {
            completed += 1;
        }
    }

    let hidden: usize = by_category
        .iter()
        .filter(|(category, _)| !category.is_default())
        .map(|(_, count)| count)
        .sum();

    let mut categories = Vec::with_capacity(DEFAULT_CATEGORIES.len() + 2);
    categories.push(CategoryCount {
        name: "All".to_string(),
        count: tasks.len(),
        icon: ALL_ICON,
        color: None,
        filter: TaskFilter::All,
    });
    for category in DEFAULT_CATEGORIES.iter() {
        categories.push(CategoryCount {
            name: category.to_string(),
            count: by_category.get(category).copied().unwrap_or(0),
            icon: category_icon(category),
            color: category_color(category),
            filter: TaskFilter::Category(category.clone()),
        });
    }
    categories.push(CategoryCount {
        name: "Completed".to_string(),
        count: completed,
        icon: COMPLETED_ICON,
        color: Some(COMPLETED_COLOR),
        filter: TaskFilter::Completed,
    });

    let priorities = PRIORITIES
        .iter()
        .map(|priority| PriorityCount {
            name: priority.as_str().to_string(),
            count: by_priority.get(priority).copied().unwrap_or(0),
            color: priority_color(*priority),
            filter: TaskFilter::Priority(*priority),
        })
        .collect();

    TaskSummary {
        categories,
        priorities,
        total: tasks.len(),
        completed,
        hidden,
        by_category,
    }
}

/// Selects the tasks behind a summary entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum TaskFilter {
    #[default]
    All,
    Completed,
    Category(Category),
    Priority(Priority),
}

impl TaskFilter {
    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Completed => task.completed,
            TaskFilter::Category(category) => &task.category == category,
            TaskFilter::Priority(priority) => task.priority == *priority,
        }
    }

    pub fn apply<'a>(&self, tasks: &'a [Task]) -> Vec<&'a Task> {
        tasks.iter().filter(|task| self.matches(task)).collect()
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskFilter::All => f.write_str("All"),
            TaskFilter::Completed => f.write_str("Completed"),
            TaskFilter::Category(category) => write!(f, "{category}"),
            TaskFilter::Priority(priority) => write!(f, "{priority} priority"),
        }
    }
}

/// Caches the summary of the last snapshot seen.
///
/// Recomputes only when handed a different `Arc` than last time; the cache
/// replaces the `Arc` on every refresh, so pointer identity tracks changes.
#[derive(Debug, Default)]
pub struct SummaryMemo {
    input: Option<Arc<Vec<Task>>>,
    summary: Arc<TaskSummary>,
    computations: usize,
}

impl SummaryMemo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, tasks: &Arc<Vec<Task>>) -> Arc<TaskSummary> {
        let fresh = match &self.input {
            Some(previous) => Arc::ptr_eq(previous, tasks),
            None => false,
        };
        if !fresh {
            self.summary = Arc::new(summarize(tasks));
            self.input = Some(Arc::clone(tasks));
            self.computations += 1;
        }
        Arc::clone(&self.summary)
    }

    /// Number of times the summary was recomputed
    pub fn computations(&self) -> usize {
        self.computations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn task(id: &str, category: Category, priority: Priority, completed: bool) -> Task {
        Task {
            id: id.to_string(),
            title: format!("task {id}"),
            category,
            priority,
            completed,
            due_date: None,
            notes: None,
            created_at: None,
            updated_at: None,
        }
    }

    fn sample() -> Vec<Task> {
        vec![
            task("1", Category::Personal, Priority::High, false),
            task("2", Category::Work, Priority::Medium, true),
            task("3", Category::Work, Priority::Low, false),
            task("4", Category::Important, Priority::High, true),
            task("5", Category::Other("Groceries".into()), Priority::Low, false),
        ]
    }

    #[test]
    fn empty_snapshot_has_zeroed_entries() {
        let summary = summarize(&[]);
        let names: Vec<_> = summary.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["All", "Personal", "Work", "Important", "Completed"]);
        assert!(summary.categories.iter().all(|c| c.count == 0));
        assert!(summary.priorities.iter().all(|p| p.count == 0));
        assert_eq!(summary.hidden, 0);
    }

    #[test]
    fn counts_follow_fixed_display_order() {
        let summary = summarize(&sample());
        let counts: Vec<_> = summary.categories.iter().map(|c| c.count).collect();
        assert_eq!(counts, [5, 1, 2, 1, 2]);

        let priorities: Vec<_> = summary
            .priorities
            .iter()
            .map(|p| (p.name.as_str(), p.count))
            .collect();
        assert_eq!(priorities, [("High", 2), ("Medium", 1), ("Low", 2)]);
    }

    #[test]
    fn unknown_category_is_counted_but_hidden() {
        let summary = summarize(&sample());
        assert_eq!(summary.hidden, 1);
        assert_eq!(
            summary.by_category.get(&Category::Other("Groceries".into())),
            Some(&1)
        );
        assert!(summary.category("Groceries").is_none());

        let displayed: usize = summary.categories[1..4].iter().map(|c| c.count).sum();
        assert_eq!(displayed + summary.hidden, summary.total);
        assert!(displayed < summary.total);
    }

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(17)]
    fn all_and_completed_track_snapshot(#[case] n: usize) {
        let tasks: Vec<_> = (0..n)
            .map(|i| task(&i.to_string(), Category::Work, Priority::Medium, i % 3 == 0))
            .collect();
        let summary = summarize(&tasks);

        assert_eq!(summary.category("All").map(|c| c.count), Some(n));
        assert_eq!(
            summary.category("Completed").map(|c| c.count),
            Some(tasks.iter().filter(|t| t.completed).count())
        );
    }

    #[rstest]
    #[case(TaskFilter::All, 5)]
    #[case(TaskFilter::Completed, 2)]
    #[case(TaskFilter::Category(Category::Work), 2)]
    #[case(TaskFilter::Priority(Priority::Low), 2)]
    #[case(TaskFilter::Category(Category::Other("Groceries".into())), 1)]
    fn filter_selects_entry_tasks(#[case] filter: TaskFilter, #[case] expected: usize) {
        assert_eq!(filter.apply(&sample()).len(), expected);
    }

    #[test]
    fn summary_entry_filters_agree_with_counts() {
        let tasks = sample();
        let summary = summarize(&tasks);
        for entry in &summary.categories {
            assert_eq!(entry.filter.apply(&tasks).len(), entry.count, "{}", entry.name);
        }
        for entry in &summary.priorities {
            assert_eq!(entry.filter.apply(&tasks).len(), entry.count, "{}", entry.name);
        }
    }

    #[test]
    fn memo_recomputes_only_on_new_snapshot() {
        let mut memo = SummaryMemo::new();
        let first = Arc::new(sample());

        let a = memo.get(&first);
        let b = memo.get(&Arc::clone(&first));
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(memo.computations(), 1);

        let second = Arc::new(sample());
        let c = memo.get(&second);
        assert_eq!(memo.computations(), 2);
        assert_eq!(*a, *c);
    }

    #[test]
    fn filter_round_trips_through_json() {
        let filter = TaskFilter::Category(Category::Important);
        let json = serde_json::to_string(&filter).unwrap();
        assert_eq!(json, r#"{"kind":"category","value":"Important"}"#);
        let back: TaskFilter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, filter);
    }
}
