//! CSV Export functionality
//!
//! Exports deliveries and project expense lines to CSV format.

use crate::error::{CreatorFlowError, CreatorFlowResult};
use crate::storage::Storage;
use std::io::Write;

fn export_err(e: csv::Error) -> CreatorFlowError {
    CreatorFlowError::Export(e.to_string())
}

/// Export all deliveries to CSV
pub fn export_deliveries_csv<W: Write>(storage: &Storage, writer: W) -> CreatorFlowResult<usize> {
    let deliveries = storage.deliveries.snapshot()?;
    let mut csv = csv::Writer::from_writer(writer);

    csv.write_record([
        "ID",
        "Influencer",
        "Product",
        "Quantity",
        "Date Sent",
        "Status",
        "Payment",
        "Price",
        "Notes",
    ])
    .map_err(export_err)?;

    for delivery in &deliveries {
        csv.write_record([
            delivery.id.as_uuid().to_string(),
            delivery.influencer_name.clone(),
            delivery.product_name.clone(),
            delivery.quantity.to_string(),
            delivery.date_sent.to_string(),
            delivery.status.to_string(),
            delivery.payment_status.to_string(),
            delivery.price.to_decimal_string(),
            delivery.notes.clone(),
        ])
        .map_err(export_err)?;
    }

    csv.flush()
        .map_err(|e| CreatorFlowError::Export(e.to_string()))?;
    Ok(deliveries.len())
}

/// Export every expense line of every project to CSV
pub fn export_expense_items_csv<W: Write>(storage: &Storage, writer: W) -> CreatorFlowResult<usize> {
    let projects = storage.projects.snapshot()?;
    let mut csv = csv::Writer::from_writer(writer);
    let mut rows = 0;

    csv.write_record([
        "Project",
        "Item",
        "Description",
        "Category",
        "Quantity",
        "Unit Price",
        "Amount",
    ])
    .map_err(export_err)?;

    for project in &projects {
        for item in &project.expenses {
            csv.write_record([
                project.title.clone(),
                item.id.as_uuid().to_string(),
                item.description.clone(),
                item.category.clone(),
                item.quantity.to_string(),
                item.unit_price.to_decimal_string(),
                item.line_amount().to_decimal_string(),
            ])
            .map_err(export_err)?;
            rows += 1;
        }
    }

    csv.flush()
        .map_err(|e| CreatorFlowError::Export(e.to_string()))?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::CreatorFlowPaths;
    use crate::config::settings::Settings;
    use crate::models::Money;
    use crate::services::{NewExpenseItem, ProjectService};
    use crate::storage::seed_sample_data;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CreatorFlowPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths, &Settings::default()).unwrap();
        (temp_dir, storage)
    }

    #[test]
    fn test_deliveries_csv() {
        let (_temp, storage) = create_test_storage();
        seed_sample_data(&storage).unwrap();

        let mut out = Vec::new();
        assert_eq!(export_deliveries_csv(&storage, &mut out).unwrap(), 2);
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("ID,Influencer,Product,"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_expense_items_csv_quotes_commas() {
        let (_temp, storage) = create_test_storage();
        let settings = Settings::default();
        let projects = ProjectService::new(&storage, &settings);
        let project = projects.create("Launch", Money::from_units(100)).unwrap();
        projects
            .add_item(
                project.id,
                NewExpenseItem {
                    description: Some("Lights, camera".into()),
                    quantity: Some(2),
                    unit_price: Some(Money::from_units(25)),
                    ..Default::default()
                },
            )
            .unwrap();

        let mut out = Vec::new();
        assert_eq!(export_expense_items_csv(&storage, &mut out).unwrap(), 1);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"Lights, camera\""));
        assert!(text.contains("25.00,50.00"));
    }
}
