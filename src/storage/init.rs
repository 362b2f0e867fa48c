//! First-run setup and sample data

use chrono::NaiveDate;

use crate::config::paths::CreatorFlowPaths;
use crate::config::settings::Settings;
use crate::error::{CreatorFlowError, CreatorFlowResult};
use crate::models::{
    CampaignTransaction, CategoryRegistry, Delivery, DeliveryStatus, Influencer, Money,
    PaymentStatus, SettlementStatus, SpendCategory,
};

use super::file_io::write_json_atomic;
use super::Storage;

/// Create the directory layout, the settings file and the category registry
///
/// Existing files are left alone.
pub fn initialize_storage(paths: &CreatorFlowPaths, settings: &Settings) -> CreatorFlowResult<()> {
    paths.ensure_directories()?;

    if !paths.settings_file().exists() {
        settings.save(paths)?;
    }

    let categories = paths.collection_file("categories");
    if !categories.exists() {
        let registry = CategoryRegistry::new(settings.default_categories.iter().cloned());
        write_json_atomic(categories, &registry)?;
    }

    Ok(())
}

fn date(y: i32, m: u32, d: u32) -> CreatorFlowResult<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
        .ok_or_else(|| CreatorFlowError::Config(format!("Invalid sample date {}-{}-{}", y, m, d)))
}

/// Fill an empty roster with two creators and their campaign records
///
/// Returns `false` without writing anything when influencers already exist.
pub fn seed_sample_data(storage: &Storage) -> CreatorFlowResult<bool> {
    if !storage.influencers.is_empty()? {
        return Ok(false);
    }

    let mut alex = Influencer::new("Alex Rivera", "alex_tech_tips");
    alex.followers = 1_250_000;
    alex.engagement_rate = 8.4;
    alex.avg_views = 450_000;
    alex.niche = "Technology".into();
    alex.phone = "611681991".into();
    alex.salary = Money::from_units(500);
    alex.contract_type = "6 Months".into();
    alex.target_videos = 10;
    alex.completed_videos = 4;
    alex.ad_types = vec!["Technology".into(), "Software".into()];
    alex.platform = "TikTok".into();
    alex.notes = "Primary tech reviewer".into();

    let mut sarah = Influencer::new("Sarah Chen", "@sarahstyle");
    sarah.followers = 890_000;
    sarah.engagement_rate = 12.2;
    sarah.avg_views = 670_000;
    sarah.niche = "Fashion".into();
    sarah.phone = "611681992".into();
    sarah.salary = Money::from_units(400);
    sarah.contract_type = "3 Months".into();
    sarah.target_videos = 5;
    sarah.completed_videos = 2;
    sarah.ad_types = vec!["Makeup".into(), "Skincare".into()];
    sarah.platform = "TikTok".into();
    sarah.notes = "High engagement in beauty niche".into();

    let mut commission = CampaignTransaction::new(
        alex.id,
        Money::from_units(2500),
        date(2023, 10, 12)?,
        SpendCategory::Commission,
    );
    commission.status = SettlementStatus::Paid;
    commission.description = "Q4 Gadget Review Series".into();

    let mut promo = CampaignTransaction::new(
        sarah.id,
        Money::from_units(1800),
        date(2023, 11, 5)?,
        SpendCategory::AdSpend,
    );
    promo.description = "Winter Collection Promo".into();

    let mut review_unit = Delivery::new(alex.id, &alex.name, "Tech Hub Pro", date(2024, 1, 20)?);
    review_unit.status = DeliveryStatus::Delivered;
    review_unit.payment_status = PaymentStatus::Paid;
    review_unit.price = Money::from_cents(4500);
    review_unit.notes = "Standard review unit".into();

    let mut pr_package = Delivery::new(sarah.id, &sarah.name, "Glow Cream", date(2024, 1, 25)?);
    pr_package.quantity = 3;
    pr_package.status = DeliveryStatus::Sent;
    pr_package.price = Money::from_cents(1550);
    pr_package.notes = "PR package for winter campaign".into();

    for influencer in [alex, sarah] {
        let created = storage.influencers.create(influencer)?;
        storage.log_changes(&[super::Change::Created(created)])?;
    }
    for txn in [commission, promo] {
        let created = storage.transactions.create(txn)?;
        storage.log_changes(&[super::Change::Created(created)])?;
    }
    for delivery in [review_unit, pr_package] {
        let created = storage.deliveries.create(delivery)?;
        storage.log_changes(&[super::Change::Created(created)])?;
    }

    tracing::info!("Seeded sample roster");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_initialize_storage() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CreatorFlowPaths::with_base_dir(temp_dir.path().to_path_buf());
        assert!(!paths.is_initialized());

        initialize_storage(&paths, &Settings::default()).unwrap();

        assert!(paths.is_initialized());
        let content = std::fs::read_to_string(paths.collection_file("categories")).unwrap();
        let registry: CategoryRegistry = serde_json::from_str(&content).unwrap();
        assert_eq!(registry.len(), 6);
    }

    #[test]
    fn test_doesnt_overwrite_existing_registry() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CreatorFlowPaths::with_base_dir(temp_dir.path().to_path_buf());
        initialize_storage(&paths, &Settings::default()).unwrap();

        write_json_atomic(
            paths.collection_file("categories"),
            &CategoryRegistry::new(["Travel"]),
        )
        .unwrap();
        initialize_storage(&paths, &Settings::default()).unwrap();

        let content = std::fs::read_to_string(paths.collection_file("categories")).unwrap();
        let registry: CategoryRegistry = serde_json::from_str(&content).unwrap();
        assert_eq!(registry.iter().collect::<Vec<_>>(), vec!["Other", "Travel"]);
    }

    #[test]
    fn test_seed_once() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CreatorFlowPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, &Settings::default()).unwrap();

        assert!(seed_sample_data(&storage).unwrap());
        assert!(!seed_sample_data(&storage).unwrap());

        let deliveries = storage.deliveries.snapshot().unwrap();
        assert_eq!(deliveries.len(), 2);
        assert_eq!(storage.influencers.len().unwrap(), 2);
        assert_eq!(storage.transactions.len().unwrap(), 2);
        assert_eq!(deliveries[1].influencer_name, "Sarah Chen");
    }
}
