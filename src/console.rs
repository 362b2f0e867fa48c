//! Console state
//!
//! The explicit store behind every screen: storage, one projection per
//! collection, the delivery and task selections and the signed-in user.
//! Reads come from the projections, never from storage directly, so a
//! write is visible only after its echo has been pumped in by `refresh`.

use crate::config::paths::CreatorFlowPaths;
use crate::config::settings::Settings;
use crate::error::CreatorFlowResult;
use crate::models::{
    CampaignTransaction, Delivery, DeliveryId, DeliveryPatch, Influencer, Project, Selection,
    Task, TaskId, TaskStatus, UserSession,
};
use crate::reports::{DashboardReport, DeliveryStats, PortfolioReport, TaskStats};
use crate::services::{DeliveryService, SessionService, TaskService};
use crate::storage::{Projection, Storage};

pub struct Console {
    storage: Storage,
    settings: Settings,

    influencers: Projection<Influencer>,
    transactions: Projection<CampaignTransaction>,
    deliveries: Projection<Delivery>,
    projects: Projection<Project>,
    tasks: Projection<Task>,

    /// Deliveries ticked for a bulk action
    pub delivery_selection: Selection<DeliveryId>,
    /// Tasks ticked for a bulk action
    pub task_selection: Selection<TaskId>,

    session: Option<UserSession>,
}

impl Console {
    /// Open storage under `paths`, load every collection and subscribe to it
    pub fn open(paths: CreatorFlowPaths, settings: Settings) -> CreatorFlowResult<Self> {
        let storage = Storage::new(paths, &settings)?;
        storage.load_all()?;
        let session = storage.session.read()?;

        let console = Self {
            influencers: Projection::new(storage.influencers.subscribe()?),
            transactions: Projection::new(storage.transactions.subscribe()?),
            deliveries: Projection::new(storage.deliveries.subscribe()?),
            projects: Projection::new(storage.projects.subscribe()?),
            tasks: Projection::new(storage.tasks.subscribe()?),
            delivery_selection: Selection::new(),
            task_selection: Selection::new(),
            session,
            storage,
            settings,
        };
        tracing::debug!(
            signed_in = console.session.is_some(),
            "Console opened"
        );
        Ok(console)
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn session(&self) -> Option<&UserSession> {
        self.session.as_ref()
    }

    /// Pump every projection; returns whether anything changed
    pub fn refresh(&mut self) -> bool {
        let mut changed = self.influencers.pump();
        changed |= self.transactions.pump();
        changed |= self.deliveries.pump();
        changed |= self.projects.pump();
        changed |= self.tasks.pump();
        changed
    }

    pub fn influencers(&self) -> &[Influencer] {
        self.influencers.docs()
    }

    pub fn transactions(&self) -> &[CampaignTransaction] {
        self.transactions.docs()
    }

    pub fn deliveries(&self) -> &[Delivery] {
        self.deliveries.docs()
    }

    pub fn projects(&self) -> &[Project] {
        self.projects.docs()
    }

    pub fn tasks(&self) -> &[Task] {
        self.tasks.docs()
    }

    pub fn delivery_pending(&self, id: DeliveryId) -> bool {
        self.deliveries.is_pending(id)
    }

    pub fn task_pending(&self, id: TaskId) -> bool {
        self.tasks.is_pending(id)
    }

    /// Writes issued but not yet seen in a snapshot
    pub fn pending_writes(&self) -> usize {
        self.influencers.pending_count()
            + self.transactions.pending_count()
            + self.deliveries.pending_count()
            + self.projects.pending_count()
            + self.tasks.pending_count()
    }

    pub fn login(&mut self, email: &str, password: &str) -> CreatorFlowResult<&UserSession> {
        let session = SessionService::new(&self.storage).login(email, password)?;
        Ok(&*self.session.insert(session))
    }

    pub fn logout(&mut self) -> CreatorFlowResult<Option<UserSession>> {
        let closed = SessionService::new(&self.storage).logout()?;
        self.session = None;
        Ok(closed)
    }

    pub fn toggle_task(&mut self, id: TaskId) -> CreatorFlowResult<Task> {
        let task = TaskService::new(&self.storage).toggle(id)?;
        self.tasks.mark_pending(id);
        Ok(task)
    }

    /// Apply `patch` to the selected deliveries
    pub fn bulk_update_deliveries(&mut self, patch: &DeliveryPatch) -> CreatorFlowResult<usize> {
        let ids = self.delivery_selection.ids();
        let count = DeliveryService::new(&self.storage, &self.settings)
            .bulk_update(&mut self.delivery_selection, patch)?;
        for id in ids {
            self.deliveries.mark_pending(id);
        }
        Ok(count)
    }

    pub fn bulk_delete_deliveries(&mut self) -> CreatorFlowResult<usize> {
        let ids = self.delivery_selection.ids();
        let count = DeliveryService::new(&self.storage, &self.settings)
            .bulk_delete(&mut self.delivery_selection)?;
        for id in ids {
            self.deliveries.mark_pending_delete(id);
        }
        Ok(count)
    }

    pub fn bulk_set_task_status(&mut self, status: TaskStatus) -> CreatorFlowResult<usize> {
        let ids = self.task_selection.ids();
        let count = TaskService::new(&self.storage).bulk_set_status(&mut self.task_selection, status)?;
        for id in ids {
            self.tasks.mark_pending(id);
        }
        Ok(count)
    }

    pub fn bulk_delete_tasks(&mut self) -> CreatorFlowResult<usize> {
        let ids = self.task_selection.ids();
        let count = TaskService::new(&self.storage).bulk_delete(&mut self.task_selection)?;
        for id in ids {
            self.tasks.mark_pending_delete(id);
        }
        Ok(count)
    }

    pub fn dashboard(&self) -> DashboardReport {
        DashboardReport::from_records(self.influencers(), self.transactions())
    }

    pub fn delivery_stats(&self) -> DeliveryStats {
        DeliveryStats::from_deliveries(self.deliveries())
    }

    pub fn task_stats(&self) -> TaskStats {
        TaskStats::from_tasks(self.tasks())
    }

    pub fn portfolio(&self) -> PortfolioReport {
        PortfolioReport::from_projects(self.projects())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DeliveryStatus, InfluencerId, Money, Priority};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn open() -> (TempDir, Console) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CreatorFlowPaths::with_base_dir(temp_dir.path().to_path_buf());
        let console = Console::open(paths, Settings::default()).unwrap();
        (temp_dir, console)
    }

    fn due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 1).unwrap()
    }

    #[test]
    fn test_reads_come_from_projections() {
        let (_temp, mut console) = open();
        TaskService::new(console.storage())
            .create("Brief", due(), Priority::High)
            .unwrap();

        assert!(console.tasks().is_empty());
        assert!(console.refresh());
        assert_eq!(console.tasks().len(), 1);
        assert_eq!(console.task_stats().pending, 1);
    }

    #[test]
    fn test_toggle_is_pending_until_refresh() {
        let (_temp, mut console) = open();
        let task = TaskService::new(console.storage())
            .create("Brief", due(), Priority::High)
            .unwrap();
        console.refresh();

        console.toggle_task(task.id).unwrap();
        assert!(console.task_pending(task.id));
        assert!(!console.tasks()[0].is_done());

        console.refresh();
        assert!(!console.task_pending(task.id));
        assert!(console.tasks()[0].is_done());
        assert_eq!(console.pending_writes(), 0);
    }

    #[test]
    fn test_failed_toggle_leaves_nothing_pending() {
        let (_temp, mut console) = open();

        assert!(console.toggle_task(TaskId::new()).unwrap_err().is_not_found());
        console.refresh();
        assert_eq!(console.pending_writes(), 0);
    }

    #[test]
    fn test_bulk_delivery_update_through_selection() {
        let (_temp, mut console) = open();
        let mut ids = Vec::new();
        for product in ["A", "B"] {
            let mut delivery = Delivery::new(InfluencerId::new(), "Unknown", product, due());
            delivery.price = Money::from_units(10);
            ids.push(console.storage().deliveries.create(delivery).unwrap().id);
        }
        console.refresh();

        console.delivery_selection.select_all(ids.iter().copied());
        let count = console
            .bulk_update_deliveries(&DeliveryPatch::status(DeliveryStatus::Delivered))
            .unwrap();
        assert_eq!(count, 2);
        assert!(console.delivery_selection.is_empty());
        assert!(console.delivery_pending(ids[0]));

        console.refresh();
        assert!(console
            .deliveries()
            .iter()
            .all(|d| d.status == DeliveryStatus::Delivered));
        assert_eq!(console.delivery_stats().unpaid, Money::from_units(20));
    }

    #[test]
    fn test_failed_bulk_keeps_selection() {
        let (_temp, mut console) = open();
        console.task_selection.insert(TaskId::new());

        assert!(console.bulk_delete_tasks().unwrap_err().is_not_found());
        assert_eq!(console.task_selection.len(), 1);
        assert_eq!(console.pending_writes(), 0);
    }

    #[test]
    fn test_session_lifecycle() {
        let (_temp, mut console) = open();
        assert!(console.session().is_none());
        console.login("ops@brand.co", "pw").unwrap();
        assert_eq!(console.session().unwrap().display_name, "ops");
        console.logout().unwrap();
        assert!(console.session().is_none());
    }
}
