use super::task_board::{TaskBoard, TaskId};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    // Board order, each task at most once
    pub matched_tasks: Vec<TaskId>,
    pub matched_observations: Vec<(TaskId, usize)>,
    // Last matching task; the observation panel switches to it
    pub focus: Option<TaskId>,
}

impl SearchOutcome {
    pub fn is_empty(&self) -> bool { self.matched_tasks.is_empty() }

    pub fn is_task_highlighted(&self, id: TaskId) -> bool {
        self.matched_tasks.contains(&id)
    }

    pub fn is_observation_highlighted(&self, id: TaskId, index: usize) -> bool {
        self.matched_observations.contains(&(id, index))
    }
}

/// Case-insensitive substring scan over every observation.
///
/// Returns `None` for a blank query, which callers treat as "clear highlighting".
pub fn search_observations(board: &TaskBoard, query: &str) -> Option<SearchOutcome> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    let mut out = SearchOutcome::default();
    for task in board.iter() {
        let mut hit = false;
        for (idx, obs) in task.observations.iter().enumerate() {
            if obs.to_lowercase().contains(&needle) {
                out.matched_observations.push((task.id, idx));
                hit = true;
            }
        }
        if hit {
            out.matched_tasks.push(task.id);
            out.focus = Some(task.id);
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_query_yields_none() {
        let board = TaskBoard::with_sample_tasks();
        assert!(search_observations(&board, "   ").is_none());
    }

    #[test]
    fn matches_ignore_case_and_focus_last_task() {
        let mut board = TaskBoard::new();
        let a = board.add_task("A").unwrap();
        let b = board.add_task("B").unwrap();
        board.add_observation(a, "Call the SUPPLIER");
        board.add_observation(b, "nothing here");
        board.add_observation(b, "supplier invoice");

        let out = search_observations(&board, "supplier").unwrap();
        assert_eq!(out.matched_tasks, vec![a, b]);
        assert_eq!(out.matched_observations, vec![(a, 0), (b, 1)]);
        assert_eq!(out.focus, Some(b));
        assert!(out.is_observation_highlighted(b, 1));
        assert!(!out.is_observation_highlighted(b, 0));
    }
}
