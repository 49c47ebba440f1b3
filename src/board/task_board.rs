use uuid::Uuid;
use serde::{Serialize, Deserialize};

pub type TaskId = Uuid;

const SAMPLE_TASKS: [&str; 7] = [
    "Manage E-mails",
    "Organize Schedule",
    "Update Reports",
    "Maintenance",
    "Team Meeting",
    "Answer Calls",
    "Monitor System",
];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub observations: Vec<String>,
}

// Insertion order is the placement order on the circle
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TaskBoard {
    pub tasks: Vec<Task>,
}

fn non_blank(s: &str) -> Option<String> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

impl TaskBoard {
    pub fn new() -> Self {
        TaskBoard { tasks: Vec::new() }
    }

    pub fn with_sample_tasks() -> Self {
        let mut board = Self::new();
        for title in SAMPLE_TASKS {
            board.add_task(title);
        }
        board
    }

    // Append a task; blank titles are rejected
    pub fn add_task(&mut self, title: &str) -> Option<TaskId> {
        let title = non_blank(title)?;
        let id = Uuid::now_v7();
        log::debug!("task added: {} ({})", title, id);
        self.tasks.push(Task { id, title, observations: Vec::new() });
        Some(id)
    }

    pub fn remove_last_task(&mut self) -> Option<Task> {
        let removed = self.tasks.pop();
        if let Some(t) = &removed {
            log::debug!("task removed: {} ({})", t.title, t.id);
        }
        removed
    }

    pub fn remove_task(&mut self, id: TaskId) -> bool {
        match self.index_of(id) {
            Some(idx) => {
                let t = self.tasks.remove(idx);
                log::debug!("task removed: {} ({})", t.title, t.id);
                true
            }
            None => false,
        }
    }

    pub fn rename_task(&mut self, id: TaskId, title: &str) -> bool {
        let Some(title) = non_blank(title) else { return false };
        if let Some(task) = self.get_task_mut(id) {
            task.title = title;
            true
        } else {
            false
        }
    }

    pub fn add_observation(&mut self, id: TaskId, text: &str) -> bool {
        let Some(text) = non_blank(text) else { return false };
        if let Some(task) = self.get_task_mut(id) {
            task.observations.push(text);
            true
        } else {
            false
        }
    }

    pub fn remove_observation(&mut self, id: TaskId, index: usize) -> Option<String> {
        let task = self.get_task_mut(id)?;
        if index < task.observations.len() {
            Some(task.observations.remove(index))
        } else {
            None
        }
    }

    pub fn get_task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_task_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    pub fn task_at(&self, index: usize) -> Option<&Task> { self.tasks.get(index) }
    pub fn index_of(&self, id: TaskId) -> Option<usize> { self.tasks.iter().position(|t| t.id == id) }
    pub fn task_count(&self) -> usize { self.tasks.len() }
    pub fn is_empty(&self) -> bool { self.tasks.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = &Task> { self.tasks.iter() }
}
