use chrono::NaiveDate;
use course_calendar::{Order, OrderDetail, course_revenue, daily_revenue, total_revenue};

fn order(created_at: &str, total: f64, lines: &[(i64, f64)]) -> Order {
    Order {
        order_id: None,
        student_id: Some(1),
        created_at: created_at.to_string(),
        total_price: total,
        status: Some("Paid".to_string()),
        order_details: lines
            .iter()
            .map(|(course_id, price)| OrderDetail {
                course_id: *course_id,
                price: *price,
            })
            .collect(),
    }
}

fn orders() -> Vec<Order> {
    vec![
        order("2024-03-10T08:00:00", 150.0, &[(1, 100.0), (2, 50.0)]),
        order("2024-03-08T12:30:00", 100.0, &[(1, 100.0)]),
        order("2024-03-04T09:00:00", 40.0, &[(3, 40.0)]),
        order("2024-03-01T09:00:00", 100.0, &[(1, 100.0)]),
        order("2024-03-11T09:00:00", 70.0, &[(1, 70.0)]),
        order("not a date", 999.0, &[(1, 999.0)]),
    ]
}

#[test]
fn course_revenue_sums_matching_lines() {
    let orders = orders();
    assert_eq!(course_revenue(&orders, 1), 1369.0);
    assert_eq!(course_revenue(&orders, 2), 50.0);
    assert_eq!(course_revenue(&orders, 42), 0.0);
    assert_eq!(total_revenue(&orders, &[2, 3]), 90.0);
}

#[test]
fn daily_revenue_buckets_the_last_week() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    let daily = daily_revenue(&orders(), &[1], today);
    // index 6 is today, index 4 two days ago; older and future orders drop out
    assert_eq!(daily, [0.0, 0.0, 0.0, 0.0, 100.0, 0.0, 150.0]);
}

#[test]
fn daily_revenue_ignores_orders_for_other_courses() {
    let today = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
    let daily = daily_revenue(&orders(), &[3], today);
    assert_eq!(daily, [40.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
    assert_eq!(daily_revenue(&orders(), &[], today), [0.0; 7]);
}
