//! Some utility functions

use crate::stats;
use crate::task::Task;

/// A debug utility that pretty-prints a task snapshot
pub fn print_task_list(tasks: &[Task]) {
    for task in tasks {
        print_task(task);
    }
}

pub fn print_task(task: &Task) {
    let completion = if task.completed() { "✓" } else { " " };
    println!("    {} [{:<6}] {} → {}\t{}\t{}",
        completion, task.priority().to_string(), task.start_date(), task.end_date(),
        task.title(), task.id());
}

/// A debug utility that pretty-prints the statistics the progress screen would display
pub fn print_stats(tasks: &[Task]) {
    let breakdown = stats::count_by_priority(tasks);
    println!("    {} tasks, {} completed ({} this month)",
        stats::total_count(tasks),
        stats::completed_count(tasks),
        stats::current_month_completed_count(tasks));
    println!("    completed by priority: {} low, {} medium, {} high",
        breakdown.count(crate::Priority::Low),
        breakdown.count(crate::Priority::Medium),
        breakdown.count(crate::Priority::High));
}
