//! Category display formatting

use crate::models::DEFAULT_CATEGORY;
use crate::services::OrphanedItem;

/// Registered labels in insertion order
pub fn format_category_list(names: &[String]) -> String {
    if names.is_empty() {
        return "No categories registered.".to_string();
    }
    let mut output = String::new();
    for name in names {
        if name == DEFAULT_CATEGORY {
            output.push_str(&format!("  {} (default)\n", name));
        } else {
            output.push_str(&format!("  {}\n", name));
        }
    }
    output
}

/// Expense lines whose category has been removed from the registry
pub fn format_orphans(orphans: &[OrphanedItem]) -> String {
    if orphans.is_empty() {
        return "Every expense item uses a registered category.".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<24}  {:<12}  {:<28}  {}\n",
        "Project", "Item", "Description", "Category"
    ));
    output.push_str(&format!("{:-<24}  {:-<12}  {:-<28}  {:-<12}\n", "", "", "", ""));
    for orphan in orphans {
        output.push_str(&format!(
            "{:<24}  {:<12}  {:<28}  {}\n",
            orphan.project_title,
            orphan.item_id.to_string(),
            orphan.description,
            orphan.category
        ));
    }
    output
}
