//! Project service
//!
//! Creating projects, editing their expense lines and recording payments.
//! Editing lines never touches the cached status; only a payment does.

use chrono::{Local, NaiveDate};
use std::fmt::Write;

use crate::config::settings::Settings;
use crate::error::{CreatorFlowError, CreatorFlowResult};
use crate::models::{
    ExpenseItem, ExpenseItemId, ExpenseItemPatch, Money, Project, ProjectId, ProjectStatus,
};
use crate::storage::{Change, Storage};

/// Service for projects and their expense lines
pub struct ProjectService<'a> {
    storage: &'a Storage,
    settings: &'a Settings,
}

/// Fields for a new expense line; unset fields take the blank-line defaults
#[derive(Debug, Clone, Default)]
pub struct NewExpenseItem {
    pub description: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<u32>,
    pub unit_price: Option<Money>,
}

impl<'a> ProjectService<'a> {
    pub fn new(storage: &'a Storage, settings: &'a Settings) -> Self {
        Self { storage, settings }
    }

    /// Create an empty project dated today
    pub fn create(&self, title: &str, budget: Money) -> CreatorFlowResult<Project> {
        let created_at = format_date(Local::now().date_naive(), &self.settings.date_format)?;
        let project = Project::new(title, budget, created_at);
        project
            .validate()
            .map_err(|e| CreatorFlowError::Validation(e.to_string()))?;

        let project = self.storage.projects.create(project)?;
        self.storage
            .log_changes(&[Change::Created(project.clone())])?;

        tracing::info!(project = %project.id, title = %project.title, "Created project");
        Ok(project)
    }

    pub fn list(&self) -> CreatorFlowResult<Vec<Project>> {
        self.storage.projects.snapshot()
    }

    pub fn get(&self, id: ProjectId) -> CreatorFlowResult<Project> {
        self.storage
            .projects
            .get(id)?
            .ok_or_else(|| CreatorFlowError::project_not_found(id.to_string()))
    }

    /// Find a project by id, short id or exact title (case-insensitive)
    pub fn find(&self, identifier: &str) -> CreatorFlowResult<Project> {
        if let Some(project) = self.storage.projects.find(identifier)? {
            return Ok(project);
        }
        let wanted = identifier.trim().to_lowercase();
        let mut by_title = self
            .storage
            .projects
            .snapshot()?
            .into_iter()
            .filter(|p| p.title.to_lowercase() == wanted);
        match (by_title.next(), by_title.next()) {
            (Some(project), None) => Ok(project),
            _ => Err(CreatorFlowError::project_not_found(identifier)),
        }
    }

    /// Remove a project together with its expense lines
    pub fn delete(&self, id: ProjectId) -> CreatorFlowResult<Project> {
        let removed = self.storage.projects.delete(id)?;
        self.storage
            .log_changes(&[Change::Deleted(removed.clone())])?;
        tracing::info!(project = %removed.id, items = removed.expenses.len(), "Deleted project");
        Ok(removed)
    }

    /// Append an expense line
    ///
    /// The category is not checked against the registry; an unknown label
    /// is stored as given and only logged.
    pub fn add_item(
        &self,
        project_id: ProjectId,
        fields: NewExpenseItem,
    ) -> CreatorFlowResult<(Project, ExpenseItemId)> {
        let mut project = self.get(project_id)?;

        let mut item = ExpenseItem::new();
        let patch = ExpenseItemPatch {
            description: fields.description,
            category: fields.category,
            quantity: fields.quantity,
            unit_price: fields.unit_price,
        };
        patch
            .validate()
            .map_err(|e| CreatorFlowError::Validation(e.to_string()))?;
        item.apply(&patch);
        self.warn_unregistered(&item.category)?;

        let item_id = item.id;
        project.add_item(item);
        project
            .check_totals()
            .map_err(|e| CreatorFlowError::Validation(e.to_string()))?;
        let project = self.save(project)?;

        tracing::info!(project = %project.id, item = %item_id, "Added expense item");
        Ok((project, item_id))
    }

    /// Patch an expense line, addressed by id, short id or 1-based position
    pub fn update_item(
        &self,
        project_id: ProjectId,
        item: &str,
        patch: &ExpenseItemPatch,
    ) -> CreatorFlowResult<Project> {
        if patch.is_empty() {
            return Err(CreatorFlowError::Validation("Nothing to update".into()));
        }
        patch
            .validate()
            .map_err(|e| CreatorFlowError::Validation(e.to_string()))?;

        let mut project = self.get(project_id)?;
        let item_id = project
            .resolve_item(item)
            .ok_or_else(|| CreatorFlowError::expense_item_not_found(item))?;
        if let Some(category) = &patch.category {
            self.warn_unregistered(category)?;
        }

        project.update_item(item_id, patch);
        project
            .check_totals()
            .map_err(|e| CreatorFlowError::Validation(e.to_string()))?;
        let project = self.save(project)?;
        tracing::info!(project = %project.id, item = %item_id, "Updated expense item");
        Ok(project)
    }

    pub fn remove_item(
        &self,
        project_id: ProjectId,
        item: &str,
    ) -> CreatorFlowResult<(Project, ExpenseItem)> {
        let mut project = self.get(project_id)?;
        let item_id = project
            .resolve_item(item)
            .ok_or_else(|| CreatorFlowError::expense_item_not_found(item))?;
        let removed = project
            .remove_item(item_id)
            .ok_or_else(|| CreatorFlowError::expense_item_not_found(item))?;

        let project = self.save(project)?;
        tracing::info!(project = %project.id, item = %item_id, "Removed expense item");
        Ok((project, removed))
    }

    /// Add a payment and recompute the status against the current total
    ///
    /// A zero or negative amount is a validation error and nothing is written.
    pub fn record_payment(&self, project_id: ProjectId, amount: Money) -> CreatorFlowResult<Project> {
        let mut project = self.get(project_id)?;
        let previous = project.status;

        if let Err(e) = project.record_payment(amount) {
            tracing::warn!(project = %project_id, amount = %amount, "Rejected payment");
            return Err(CreatorFlowError::Validation(e.to_string()));
        }

        let project = self.save(project)?;
        if previous != project.status && project.status == ProjectStatus::Paid {
            tracing::info!(project = %project.id, "Project settled");
        }
        tracing::info!(
            project = %project.id,
            amount = %amount,
            paid = %project.paid_amount,
            "Recorded payment"
        );
        Ok(project)
    }

    fn save(&self, project: Project) -> CreatorFlowResult<Project> {
        let change = self.storage.projects.update(project)?;
        self.storage.log_changes(std::slice::from_ref(&change))?;
        match change {
            Change::Updated { after, .. } => Ok(after),
            Change::Created(p) | Change::Deleted(p) => Ok(p),
        }
    }

    fn warn_unregistered(&self, category: &str) -> CreatorFlowResult<()> {
        if !self.storage.categories.get()?.contains(category) {
            tracing::warn!(category, "Expense category is not in the registry");
        }
        Ok(())
    }
}

/// Format with a user-supplied strftime pattern without panicking on bad patterns
fn format_date(date: NaiveDate, pattern: &str) -> CreatorFlowResult<String> {
    let mut out = String::new();
    write!(out, "{}", date.format(pattern))
        .map_err(|_| CreatorFlowError::Config(format!("Invalid date format: {}", pattern)))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CreatorFlowPaths;
    use crate::audit::Operation;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage, Settings) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CreatorFlowPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings::default();
        let storage = Storage::new(paths, &settings).unwrap();
        (temp_dir, storage, settings)
    }

    fn item(quantity: u32, units: i64) -> NewExpenseItem {
        NewExpenseItem {
            description: Some("Line".into()),
            quantity: Some(quantity),
            unit_price: Some(Money::from_units(units)),
            ..Default::default()
        }
    }

    #[test]
    fn test_scenario_totals() {
        let (_temp, storage, settings) = create_test_storage();
        let service = ProjectService::new(&storage, &settings);

        let project = service.create("Spring Launch", Money::from_units(1000)).unwrap();
        service.add_item(project.id, item(2, 50)).unwrap();
        let (project, _) = service.add_item(project.id, item(1, 100)).unwrap();

        let summary = project.summary();
        assert_eq!(summary.total_cost, Money::from_units(200));
        assert_eq!(summary.percent_used, Some(20.0));
        assert_eq!(summary.balance, Money::from_units(200));
        assert_eq!(project.status, ProjectStatus::Unpaid);
    }

    #[test]
    fn test_new_item_defaults() {
        let (_temp, storage, settings) = create_test_storage();
        let service = ProjectService::new(&storage, &settings);
        let project = service.create("Blank", Money::zero()).unwrap();

        let (project, id) = service.add_item(project.id, NewExpenseItem::default()).unwrap();
        let line = project.find_item(id).unwrap();
        assert_eq!(line.category, "Other");
        assert_eq!(line.quantity, 1);
        assert_eq!(line.unit_price, Money::zero());
        assert_eq!(project.percent_used(), None);
    }

    #[test]
    fn test_payments_flip_status() {
        let (_temp, storage, settings) = create_test_storage();
        let service = ProjectService::new(&storage, &settings);
        let project = service.create("Launch", Money::from_units(500)).unwrap();
        service.add_item(project.id, item(1, 100)).unwrap();

        let project = service.record_payment(project.id, Money::from_units(40)).unwrap();
        assert_eq!(project.status, ProjectStatus::Unpaid);
        let project = service.record_payment(project.id, Money::from_units(60)).unwrap();
        assert_eq!(project.status, ProjectStatus::Paid);
        assert_eq!(project.paid_amount, Money::from_units(100));

        // Each payment is audited as a project update
        let updates = storage
            .audit()
            .read_for_entity(&project.id.to_string())
            .unwrap()
            .into_iter()
            .filter(|e| e.operation == Operation::Update)
            .count();
        assert_eq!(updates, 3);
    }

    #[test]
    fn test_invalid_payment_changes_nothing() {
        let (_temp, storage, settings) = create_test_storage();
        let service = ProjectService::new(&storage, &settings);
        let project = service.create("Launch", Money::from_units(500)).unwrap();

        for amount in [Money::zero(), Money::from_units(-5)] {
            let err = service.record_payment(project.id, amount).unwrap_err();
            assert!(err.is_validation());
        }
        let reloaded = service.get(project.id).unwrap();
        assert_eq!(reloaded.paid_amount, Money::zero());
        assert_eq!(reloaded.status, ProjectStatus::Unpaid);
    }

    #[test]
    fn test_oversized_amounts_rejected() {
        let (_temp, storage, settings) = create_test_storage();
        let service = ProjectService::new(&storage, &settings);
        let project = service.create("Launch", Money::zero()).unwrap();

        let huge = NewExpenseItem {
            quantity: Some(u32::MAX),
            unit_price: Some(Money::parse("9999999999999").unwrap()),
            ..Default::default()
        };
        assert!(service.add_item(project.id, huge).unwrap_err().is_validation());
        assert!(service.get(project.id).unwrap().expenses.is_empty());

        service.add_item(project.id, item(1, 9_999_999_999_999)).unwrap();
        let err = service
            .update_item(
                project.id,
                "1",
                &ExpenseItemPatch {
                    quantity: Some(u32::MAX),
                    ..Default::default()
                },
            )
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(service.get(project.id).unwrap().expenses[0].quantity, 1);

        service
            .record_payment(project.id, Money::from_cents(i64::MAX))
            .unwrap();
        let err = service
            .record_payment(project.id, Money::from_cents(1))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(
            service.get(project.id).unwrap().paid_amount,
            Money::from_cents(i64::MAX)
        );
    }

    #[test]
    fn test_status_goes_stale_after_edit() {
        let (_temp, storage, settings) = create_test_storage();
        let service = ProjectService::new(&storage, &settings);
        let project = service.create("Launch", Money::from_units(500)).unwrap();
        service.add_item(project.id, item(1, 100)).unwrap();
        service.record_payment(project.id, Money::from_units(100)).unwrap();

        let project = service
            .update_item(
                project.id,
                "1",
                &ExpenseItemPatch {
                    quantity: Some(3),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(project.total_cost(), Money::from_units(300));
        assert_eq!(project.status, ProjectStatus::Paid);
    }

    #[test]
    fn test_remove_item_keeps_order() {
        let (_temp, storage, settings) = create_test_storage();
        let service = ProjectService::new(&storage, &settings);
        let project = service.create("Launch", Money::zero()).unwrap();
        for units in [1, 2, 3] {
            service.add_item(project.id, item(1, units)).unwrap();
        }

        let (project, removed) = service.remove_item(project.id, "2").unwrap();
        assert_eq!(removed.unit_price, Money::from_units(2));
        let prices: Vec<_> = project.expenses.iter().map(|i| i.unit_price.units()).collect();
        assert_eq!(prices, vec![1, 3]);
    }

    #[test]
    fn test_find_by_title_and_delete() {
        let (_temp, storage, settings) = create_test_storage();
        let service = ProjectService::new(&storage, &settings);
        let project = service.create("Winter Promo", Money::zero()).unwrap();

        assert_eq!(service.find("winter promo").unwrap().id, project.id);
        service.delete(project.id).unwrap();
        assert!(service.find("Winter Promo").unwrap_err().is_not_found());
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(format_date(date, "%b %-d, %Y").unwrap(), "Mar 5, 2024");
        assert!(format_date(date, "%Q").is_err());
    }

    #[test]
    fn test_empty_title_rejected() {
        let (_temp, storage, settings) = create_test_storage();
        let service = ProjectService::new(&storage, &settings);
        assert!(service.create("   ", Money::zero()).unwrap_err().is_validation());
        assert!(service.list().unwrap().is_empty());
    }
}
