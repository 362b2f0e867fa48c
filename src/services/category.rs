//! Category service
//!
//! Adds and removes labels from the shared registry and reports expense
//! lines whose label has been removed. Removing a label never touches the
//! lines that carry it.

use crate::audit::EntityType;
use crate::error::{CreatorFlowError, CreatorFlowResult};
use crate::models::{CategoryError, ExpenseItemId, ProjectId, DEFAULT_CATEGORY};
use crate::storage::Storage;

pub struct CategoryService<'a> {
    storage: &'a Storage,
}

/// Outcome of a delete request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryRemoval {
    Removed,
    /// The default category; nothing was changed
    Protected,
    NotFound,
}

/// An expense line whose category is no longer registered
#[derive(Debug, Clone, PartialEq)]
pub struct OrphanedItem {
    pub project_id: ProjectId,
    pub project_title: String,
    pub item_id: ExpenseItemId,
    pub description: String,
    pub category: String,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Labels in insertion order
    pub fn list(&self) -> CreatorFlowResult<Vec<String>> {
        Ok(self
            .storage
            .categories
            .get()?
            .iter()
            .map(str::to_string)
            .collect())
    }

    pub fn add(&self, name: &str) -> CreatorFlowResult<String> {
        let mut registry = self.storage.categories.get()?;
        let added = registry.add(name).map_err(|e| match e {
            CategoryError::EmptyName => CreatorFlowError::Validation(e.to_string()),
            CategoryError::AlreadyExists(existing) => {
                tracing::warn!(category = %existing, "Category already exists");
                CreatorFlowError::Duplicate {
                    entity_type: "Category",
                    identifier: existing,
                }
            }
        })?;

        self.storage.categories.replace(registry)?;
        self.storage.log_create(
            EntityType::Category,
            added.clone(),
            Some(added.clone()),
            &added,
        )?;

        tracing::info!(category = %added, "Added category");
        Ok(added)
    }

    pub fn delete(&self, name: &str) -> CreatorFlowResult<CategoryRemoval> {
        let name = name.trim();
        if name == DEFAULT_CATEGORY {
            tracing::warn!("Refused to delete the default category");
            return Ok(CategoryRemoval::Protected);
        }

        let mut registry = self.storage.categories.get()?;
        if !registry.remove(name) {
            return Ok(CategoryRemoval::NotFound);
        }

        self.storage.categories.replace(registry)?;
        self.storage.log_delete(
            EntityType::Category,
            name,
            Some(name.to_string()),
            &name,
        )?;

        tracing::info!(category = %name, "Deleted category");
        Ok(CategoryRemoval::Removed)
    }

    /// Expense lines pointing at labels that are no longer registered
    pub fn orphans(&self) -> CreatorFlowResult<Vec<OrphanedItem>> {
        let registry = self.storage.categories.get()?;
        let projects = self.storage.projects.snapshot()?;

        Ok(projects
            .iter()
            .flat_map(|project| {
                project
                    .expenses
                    .iter()
                    .filter(|item| !registry.contains(&item.category))
                    .map(move |item| OrphanedItem {
                        project_id: project.id,
                        project_title: project.title.clone(),
                        item_id: item.id,
                        description: item.description.clone(),
                        category: item.category.clone(),
                    })
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CreatorFlowPaths;
    use crate::config::settings::Settings;
    use crate::models::Money;
    use crate::services::project::{NewExpenseItem, ProjectService};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CreatorFlowPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, &Settings::default()).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_add_and_delete_round_trip() {
        let (_temp, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let before = service.list().unwrap();

        assert_eq!(service.add(" Travel ").unwrap(), "Travel");
        assert_eq!(service.list().unwrap().last().map(String::as_str), Some("Travel"));
        assert_eq!(service.delete("Travel").unwrap(), CategoryRemoval::Removed);

        assert_eq!(service.list().unwrap(), before);
    }

    #[test]
    fn test_duplicate_rejected_without_change() {
        let (_temp, storage) = create_test_storage();
        let service = CategoryService::new(&storage);
        let before = service.list().unwrap();

        let err = service.add("Other").unwrap_err();
        assert!(matches!(err, CreatorFlowError::Duplicate { .. }));
        assert!(service.add("  ").unwrap_err().is_validation());
        assert_eq!(service.list().unwrap(), before);
    }

    #[test]
    fn test_other_is_protected() {
        let (_temp, storage) = create_test_storage();
        let service = CategoryService::new(&storage);

        assert_eq!(service.delete("Other").unwrap(), CategoryRemoval::Protected);
        assert_eq!(service.delete("Nope").unwrap(), CategoryRemoval::NotFound);
        assert!(service.list().unwrap().contains(&"Other".to_string()));
    }

    #[test]
    fn test_delete_leaves_orphans() {
        let (_temp, storage) = create_test_storage();
        let settings = Settings::default();
        let categories = CategoryService::new(&storage);
        let projects = ProjectService::new(&storage, &settings);

        let project = projects.create("Launch", Money::from_units(100)).unwrap();
        projects
            .add_item(
                project.id,
                NewExpenseItem {
                    category: Some("Gift".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert!(categories.orphans().unwrap().is_empty());

        categories.delete("Gift").unwrap();

        let orphans = categories.orphans().unwrap();
        assert_eq!(orphans.len(), 1);
        assert_eq!(orphans[0].category, "Gift");
        let stored = projects.get(project.id).unwrap();
        assert_eq!(stored.expenses[0].category, "Gift");
    }
}
