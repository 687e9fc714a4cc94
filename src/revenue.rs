use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time_of_day::parse_calendar_date;

/// Number of daily buckets on the teacher dashboard chart.
pub const REVENUE_WINDOW_DAYS: usize = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    pub course_id: i64,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub order_id: Option<i64>,
    #[serde(default)]
    pub student_id: Option<i64>,
    pub created_at: String,
    pub total_price: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub order_details: Vec<OrderDetail>,
}

impl Order {
    pub fn created_on(&self) -> Option<NaiveDate> {
        parse_calendar_date(&self.created_at)
    }

    fn touches_any(&self, course_ids: &[i64]) -> bool {
        self.order_details
            .iter()
            .any(|detail| course_ids.contains(&detail.course_id))
    }
}

/// Price paid for `course_id` across all orders. Only the first matching
/// line of each order counts.
pub fn course_revenue(orders: &[Order], course_id: i64) -> f64 {
    orders
        .iter()
        .filter_map(|order| {
            order
                .order_details
                .iter()
                .find(|detail| detail.course_id == course_id)
        })
        .map(|detail| detail.price)
        .sum()
}

pub fn total_revenue(orders: &[Order], course_ids: &[i64]) -> f64 {
    course_ids
        .iter()
        .map(|course_id| course_revenue(orders, *course_id))
        .sum()
}

/// Order totals bucketed by day over the week ending on `today`.
///
/// Index 6 is `today`, index 0 six days earlier. An order counts in full
/// when any of its lines is for one of `course_ids`; orders with an
/// unreadable or future date are ignored.
pub fn daily_revenue(
    orders: &[Order],
    course_ids: &[i64],
    today: NaiveDate,
) -> [f64; REVENUE_WINDOW_DAYS] {
    let mut buckets = [0.0; REVENUE_WINDOW_DAYS];
    for order in orders {
        let Some(created) = order.created_on() else {
            continue;
        };
        let days_ago = (today - created).num_days();
        if !(0..REVENUE_WINDOW_DAYS as i64).contains(&days_ago) || !order.touches_any(course_ids) {
            continue;
        }
        buckets[REVENUE_WINDOW_DAYS - 1 - days_ago as usize] += order.total_price;
    }
    buckets
}
