//! Task service

use chrono::NaiveDate;

use crate::error::{CreatorFlowError, CreatorFlowResult};
use crate::models::{Priority, Selection, Task, TaskId, TaskPatch, TaskStatus};
use crate::storage::{Change, Storage, WriteOp};

pub struct TaskService<'a> {
    storage: &'a Storage,
}

impl<'a> TaskService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// New tasks land at the top of the list
    pub fn create(&self, title: &str, due_date: NaiveDate, priority: Priority) -> CreatorFlowResult<Task> {
        let task = Task::new(title, due_date, priority);
        task.validate()
            .map_err(|e| CreatorFlowError::Validation(e.to_string()))?;

        let task = self.storage.tasks.create(task)?;
        self.storage.log_changes(&[Change::Created(task.clone())])?;
        tracing::info!(task = %task.id, title = %task.title, "Created task");
        Ok(task)
    }

    /// Tasks whose title contains `search`, newest first
    pub fn list(&self, search: Option<&str>) -> CreatorFlowResult<Vec<Task>> {
        let tasks = self.storage.tasks.snapshot()?;
        Ok(match search.map(str::trim) {
            Some(term) if !term.is_empty() => {
                tasks.into_iter().filter(|t| t.matches_search(term)).collect()
            }
            _ => tasks,
        })
    }

    pub fn find(&self, identifier: &str) -> CreatorFlowResult<Task> {
        self.storage
            .tasks
            .find(identifier)?
            .ok_or_else(|| CreatorFlowError::task_not_found(identifier))
    }

    pub fn update(&self, id: TaskId, patch: &TaskPatch) -> CreatorFlowResult<Task> {
        if patch.is_empty() {
            return Err(CreatorFlowError::Validation("Nothing to update".into()));
        }
        let mut task = self.get(id)?;
        task.apply(patch);
        task.validate()
            .map_err(|e| CreatorFlowError::Validation(e.to_string()))?;
        self.save(task)
    }

    /// Flip Done / Not Done
    pub fn toggle(&self, id: TaskId) -> CreatorFlowResult<Task> {
        let mut task = self.get(id)?;
        task.toggle();
        let task = self.save(task)?;
        tracing::info!(task = %task.id, status = %task.status, "Toggled task");
        Ok(task)
    }

    pub fn delete(&self, id: TaskId) -> CreatorFlowResult<Task> {
        let removed = self.storage.tasks.delete(id)?;
        self.storage.log_changes(&[Change::Deleted(removed.clone())])?;
        tracing::info!(task = %id, "Deleted task");
        Ok(removed)
    }

    /// Set one status on every selected task; clears the selection on success
    pub fn bulk_set_status(
        &self,
        selection: &mut Selection<TaskId>,
        status: TaskStatus,
    ) -> CreatorFlowResult<usize> {
        if selection.is_empty() {
            return Err(CreatorFlowError::Validation("No tasks selected".into()));
        }
        let mut ops = Vec::with_capacity(selection.len());
        for id in selection.ids() {
            let mut task = self.get(id)?;
            if task.status != status {
                task.status = status;
                task.updated_at = chrono::Utc::now();
            }
            ops.push(WriteOp::Update(task));
        }

        let count = self.commit(ops)?;
        selection.clear();
        tracing::info!(count, status = %status, "Bulk updated tasks");
        Ok(count)
    }

    pub fn bulk_delete(&self, selection: &mut Selection<TaskId>) -> CreatorFlowResult<usize> {
        if selection.is_empty() {
            return Err(CreatorFlowError::Validation("No tasks selected".into()));
        }
        let ops = selection.ids().into_iter().map(WriteOp::Delete).collect();

        let count = self.commit(ops)?;
        selection.clear();
        tracing::info!(count, "Bulk deleted tasks");
        Ok(count)
    }

    fn get(&self, id: TaskId) -> CreatorFlowResult<Task> {
        self.storage
            .tasks
            .get(id)?
            .ok_or_else(|| CreatorFlowError::task_not_found(id.to_string()))
    }

    fn save(&self, task: Task) -> CreatorFlowResult<Task> {
        let change = self.storage.tasks.update(task)?;
        self.storage.log_changes(std::slice::from_ref(&change))?;
        match change {
            Change::Updated { after, .. } => Ok(after),
            Change::Created(t) | Change::Deleted(t) => Ok(t),
        }
    }

    fn commit(&self, ops: Vec<WriteOp<Task>>) -> CreatorFlowResult<usize> {
        let changes = self.storage.tasks.commit_batch(ops)?;
        self.storage.log_changes(&changes)?;
        Ok(changes.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CreatorFlowPaths;
    use crate::config::settings::Settings;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CreatorFlowPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, &Settings::default()).unwrap();
        (temp_dir, storage)
    }

    fn due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_newest_first() {
        let (_temp, storage) = create_test_storage();
        let service = TaskService::new(&storage);
        service.create("First", due(), Priority::Low).unwrap();
        service.create("Second", due(), Priority::High).unwrap();

        let titles: Vec<_> = service.list(None).unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["Second", "First"]);
    }

    #[test]
    fn test_toggle_and_search() {
        let (_temp, storage) = create_test_storage();
        let service = TaskService::new(&storage);
        let task = service.create("Send brief to Sarah", due(), Priority::Medium).unwrap();
        service.create("Pay invoices", due(), Priority::Medium).unwrap();

        assert!(service.toggle(task.id).unwrap().is_done());
        assert!(!service.toggle(task.id).unwrap().is_done());
        assert_eq!(service.list(Some("sarah")).unwrap().len(), 1);
    }

    #[test]
    fn test_update_rejects_blank_title() {
        let (_temp, storage) = create_test_storage();
        let service = TaskService::new(&storage);
        let task = service.create("Call agency", due(), Priority::Medium).unwrap();

        let patch = TaskPatch {
            title: Some("  ".into()),
            ..Default::default()
        };
        assert!(service.update(task.id, &patch).unwrap_err().is_validation());
        assert_eq!(service.find(&task.id.to_string()).unwrap().title, "Call agency");
        assert!(service.create("", due(), Priority::Low).unwrap_err().is_validation());
    }

    #[test]
    fn test_bulk_status_and_delete() {
        let (_temp, storage) = create_test_storage();
        let service = TaskService::new(&storage);
        let a = service.create("A", due(), Priority::Low).unwrap();
        let b = service.create("B", due(), Priority::Low).unwrap();
        let c = service.create("C", due(), Priority::Low).unwrap();

        let mut selection: Selection<TaskId> = [a.id, b.id].into_iter().collect();
        assert_eq!(service.bulk_set_status(&mut selection, TaskStatus::Done).unwrap(), 2);
        assert!(selection.is_empty());
        let done = service.list(None).unwrap().iter().filter(|t| t.is_done()).count();
        assert_eq!(done, 2);

        let mut selection: Selection<TaskId> = [c.id, TaskId::new()].into_iter().collect();
        assert!(service.bulk_delete(&mut selection).unwrap_err().is_not_found());
        assert_eq!(selection.len(), 2);
        assert_eq!(service.list(None).unwrap().len(), 3);
    }
}
