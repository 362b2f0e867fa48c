//! Delivery and task statistics

use crate::models::{Delivery, Money, PaymentStatus, Task};

/// Price sums by payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeliveryStats {
    pub paid: Money,
    pub unpaid: Money,
    pub total: Money,
    pub count: usize,
}

impl DeliveryStats {
    pub fn from_deliveries(deliveries: &[Delivery]) -> Self {
        deliveries.iter().fold(Self::default(), |mut stats, d| {
            match d.payment_status {
                PaymentStatus::Paid => stats.paid += d.price,
                PaymentStatus::Unpaid => stats.unpaid += d.price,
            }
            stats.total += d.price;
            stats.count += 1;
            stats
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskStats {
    pub total: usize,
    pub done: usize,
    pub pending: usize,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let done = tasks.iter().filter(|t| t.is_done()).count();
        Self {
            total: tasks.len(),
            done,
            pending: tasks.len() - done,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{InfluencerId, Priority};
    use chrono::NaiveDate;

    fn delivery(units: i64, paid: bool) -> Delivery {
        let mut d = Delivery::new(
            InfluencerId::new(),
            "Sarah Chen",
            "Glow Cream",
            NaiveDate::from_ymd_opt(2024, 1, 25).unwrap(),
        );
        d.price = Money::from_units(units);
        if paid {
            d.payment_status = PaymentStatus::Paid;
        }
        d
    }

    #[test]
    fn test_delivery_stats() {
        let stats = DeliveryStats::from_deliveries(&[
            delivery(45, true),
            delivery(120, false),
            delivery(5, false),
        ]);
        assert_eq!(stats.paid, Money::from_units(45));
        assert_eq!(stats.unpaid, Money::from_units(125));
        assert_eq!(stats.total, Money::from_units(170));
        assert_eq!(stats.count, 3);
    }

    #[test]
    fn test_task_stats() {
        let due = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let mut done = Task::new("A", due, Priority::Low);
        done.toggle();
        let stats = TaskStats::from_tasks(&[done, Task::new("B", due, Priority::High)]);
        assert_eq!(stats, TaskStats { total: 2, done: 1, pending: 1 });
        assert_eq!(TaskStats::from_tasks(&[]), TaskStats::default());
    }
}
