//! Tables for the operational lists: roster, deliveries, tasks and spend

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{CampaignTransaction, Delivery, Influencer, Task};
use crate::reports::dashboard::format_count;
use crate::reports::{DeliveryStats, TaskStats};

#[derive(Tabled)]
struct InfluencerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Handle")]
    handle: String,
    #[tabled(rename = "Followers")]
    followers: String,
    #[tabled(rename = "Eng.")]
    engagement: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Videos")]
    videos: String,
}

#[derive(Tabled)]
struct DeliveryRow {
    #[tabled(rename = "")]
    marker: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Influencer")]
    influencer: String,
    #[tabled(rename = "Product")]
    product: String,
    #[tabled(rename = "Qty")]
    quantity: u32,
    #[tabled(rename = "Sent")]
    date_sent: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Price")]
    price: String,
}

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "")]
    check: &'static str,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Due")]
    due: String,
    #[tabled(rename = "Priority")]
    priority: String,
}

#[derive(Tabled)]
struct SpendRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Influencer")]
    influencer: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn render<R: Tabled>(rows: Vec<R>) -> String {
    let mut table = Table::new(rows);
    table.with(Style::psql());
    table.to_string()
}

pub fn format_influencer_list(influencers: &[Influencer]) -> String {
    if influencers.is_empty() {
        return "No influencers found.".to_string();
    }
    render(
        influencers
            .iter()
            .map(|i| InfluencerRow {
                id: i.id.to_string(),
                name: i.name.clone(),
                handle: i.handle.clone(),
                followers: format_count(i.followers),
                engagement: format!("{:.1}%", i.engagement_rate),
                status: i.status.to_string(),
                videos: format!("{}/{}", i.completed_videos, i.target_videos),
            })
            .collect(),
    )
}

/// Single influencer with the production tracker drawn as slots
pub fn format_influencer_details(influencer: &Influencer) -> String {
    let mut output = String::new();
    output.push_str(&format!("{}\n", influencer));
    output.push_str(&format!("  ID:         {}\n", influencer.id));
    output.push_str(&format!("  Status:     {}\n", influencer.status));
    output.push_str(&format!("  Platform:   {}\n", influencer.platform));
    output.push_str(&format!("  Niche:      {}\n", influencer.niche));
    output.push_str(&format!("  Followers:  {}\n", format_count(influencer.followers)));
    output.push_str(&format!("  Engagement: {:.1}%\n", influencer.engagement_rate));
    output.push_str(&format!("  Avg. Views: {}\n", format_count(influencer.avg_views)));
    output.push_str(&format!("  Salary:     {}\n", influencer.salary));
    if !influencer.contract_type.is_empty() {
        output.push_str(&format!("  Contract:   {}\n", influencer.contract_type));
    }
    if !influencer.ad_types.is_empty() {
        output.push_str(&format!("  Ad Types:   {}\n", influencer.ad_types.join(", ")));
    }

    let slots: String = (0..influencer.target_videos)
        .map(|i| if i < influencer.completed_videos { '#' } else { '.' })
        .collect();
    let percent = influencer
        .completion_percent()
        .map(|p| format!("{:.0}%", p))
        .unwrap_or_else(|| "no target".to_string());
    output.push_str(&format!(
        "  Videos:     [{}] {}/{} ({})\n",
        slots, influencer.completed_videos, influencer.target_videos, percent
    ));
    output
}

/// Deliveries with the selection / in-flight marker column
///
/// `marker` returns "*" for pending writes, "x" for selected rows, or "".
pub fn format_delivery_list(
    deliveries: &[Delivery],
    marker: impl Fn(&Delivery) -> &'static str,
) -> String {
    if deliveries.is_empty() {
        return "No deliveries found.".to_string();
    }
    render(
        deliveries
            .iter()
            .map(|d| DeliveryRow {
                marker: marker(d),
                id: d.id.to_string(),
                influencer: d.influencer_name.clone(),
                product: d.product_name.clone(),
                quantity: d.quantity,
                date_sent: d.date_sent.to_string(),
                status: d.status.to_string(),
                payment: d.payment_status.to_string(),
                price: d.price.to_string(),
            })
            .collect(),
    )
}

pub fn format_delivery_stats(stats: &DeliveryStats) -> String {
    format!(
        "{} deliveries  Paid: {}  Unpaid: {}  Total: {}",
        stats.count, stats.paid, stats.unpaid, stats.total
    )
}

pub fn format_task_list(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks found.".to_string();
    }
    render(
        tasks
            .iter()
            .map(|t| TaskRow {
                check: if t.is_done() { "[x]" } else { "[ ]" },
                id: t.id.to_string(),
                title: t.title.clone(),
                due: t.due_date.to_string(),
                priority: t.priority.to_string(),
            })
            .collect(),
    )
}

pub fn format_task_stats(stats: &TaskStats) -> String {
    format!(
        "{} tasks  Done: {}  Pending: {}",
        stats.total, stats.done, stats.pending
    )
}

/// Campaign spend, with influencer names looked up from the roster
pub fn format_spend_list(transactions: &[CampaignTransaction], roster: &[Influencer]) -> String {
    if transactions.is_empty() {
        return "No campaign spend recorded.".to_string();
    }
    render(
        transactions
            .iter()
            .map(|t| SpendRow {
                id: t.id.to_string(),
                date: t.date.to_string(),
                influencer: roster
                    .iter()
                    .find(|i| i.id == t.influencer_id)
                    .map(|i| i.name.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
                category: t.category.to_string(),
                amount: t.amount.to_string(),
                status: t.status.to_string(),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InfluencerId, Money, Priority, SpendCategory};
    use chrono::NaiveDate;

    #[test]
    fn test_empty_lists() {
        assert_eq!(format_task_list(&[]), "No tasks found.");
        assert_eq!(format_delivery_list(&[], |_| ""), "No deliveries found.");
        assert_eq!(format_influencer_list(&[]), "No influencers found.");
    }

    #[test]
    fn test_task_table() {
        let due = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let mut task = Task::new("Ship samples", due, Priority::High);
        task.toggle();
        let text = format_task_list(&[task]);
        assert!(text.contains("Ship samples"));
        assert!(text.contains("[x]"));
        assert!(text.contains("High"));
    }

    #[test]
    fn test_spend_names_resolved() {
        let sarah = Influencer::new("Sarah Chen", "sarahstyle");
        let date = NaiveDate::from_ymd_opt(2023, 10, 15).unwrap();
        let known = CampaignTransaction::new(sarah.id, Money::from_units(500), date, SpendCategory::Gift);
        let orphan = CampaignTransaction::new(InfluencerId::new(), Money::from_units(5), date, SpendCategory::Gift);

        let text = format_spend_list(&[known, orphan], &[sarah]);
        assert!(text.contains("Sarah Chen"));
        assert!(text.contains("Unknown"));
        assert!(text.contains("$500.00"));
    }

    #[test]
    fn test_progress_slots() {
        let mut influencer = Influencer::new("Alex", "alex");
        influencer.target_videos = 4;
        influencer.toggle_progress(1);
        let text = format_influencer_details(&influencer);
        assert!(text.contains("[##..] 2/4 (50%)"));
    }
}
