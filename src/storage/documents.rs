//! Collection bindings for the stored record types

use crate::audit::EntityType;
use crate::models::{
    CampaignTransaction, Delivery, DeliveryId, Influencer, InfluencerId, Project, ProjectId,
    Task, TaskId, TransactionId,
};

use super::collection::Document;

impl Document for Influencer {
    type Id = InfluencerId;
    const COLLECTION: &'static str = "influencers";
    const ENTITY: EntityType = EntityType::Influencer;

    fn id(&self) -> InfluencerId {
        self.id
    }

    fn matches_id(&self, input: &str) -> bool {
        self.id.matches(input)
    }

    fn label(&self) -> String {
        self.name.clone()
    }
}

impl Document for CampaignTransaction {
    type Id = TransactionId;
    const COLLECTION: &'static str = "transactions";
    const ENTITY: EntityType = EntityType::Transaction;

    fn id(&self) -> TransactionId {
        self.id
    }

    fn matches_id(&self, input: &str) -> bool {
        self.id.matches(input)
    }

    fn label(&self) -> String {
        format!("{} {}", self.category, self.amount)
    }
}

impl Document for Delivery {
    type Id = DeliveryId;
    const COLLECTION: &'static str = "deliveries";
    const ENTITY: EntityType = EntityType::Delivery;

    fn id(&self) -> DeliveryId {
        self.id
    }

    fn matches_id(&self, input: &str) -> bool {
        self.id.matches(input)
    }

    fn label(&self) -> String {
        format!("{} -> {}", self.product_name, self.influencer_name)
    }
}

impl Document for Project {
    type Id = ProjectId;
    const COLLECTION: &'static str = "projects";
    const ENTITY: EntityType = EntityType::Project;

    fn id(&self) -> ProjectId {
        self.id
    }

    fn matches_id(&self, input: &str) -> bool {
        self.id.matches(input)
    }

    fn label(&self) -> String {
        self.title.clone()
    }
}

impl Document for Task {
    type Id = TaskId;
    const COLLECTION: &'static str = "tasks";
    const ENTITY: EntityType = EntityType::Task;
    const NEWEST_FIRST: bool = true;

    fn id(&self) -> TaskId {
        self.id
    }

    fn matches_id(&self, input: &str) -> bool {
        self.id.matches(input)
    }

    fn label(&self) -> String {
        self.title.clone()
    }
}
