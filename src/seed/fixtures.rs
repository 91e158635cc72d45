//! Development fixture data.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::{NewCustomer, NewReservation};

pub const ADMIN_ROLE: &str = "admin";

pub const CUSTOMER_COUNT: i32 = 9;

struct ReservationFixture {
    reservation_id: i32,
    start_date: &'static str,
    end_date: &'static str,
    /// Position in [`customers`] order.
    customer_index: usize,
}

const RESERVATIONS: [ReservationFixture; 4] = [
    ReservationFixture {
        reservation_id: 1,
        start_date: "2021-01-01",
        end_date: "2021-01-02",
        customer_index: 0,
    },
    ReservationFixture {
        reservation_id: 2,
        start_date: "2021-01-04",
        end_date: "2021-01-12",
        customer_index: 1,
    },
    ReservationFixture {
        reservation_id: 3,
        start_date: "2021-01-20",
        end_date: "2021-01-30",
        customer_index: 2,
    },
    ReservationFixture {
        reservation_id: 4,
        start_date: "2021-01-31",
        end_date: "2021-02-08",
        customer_index: 0,
    },
];

/// Customers 1..=9: `John`/`Doe`/`test@example.com`, then `John1`/`Doe1`/
/// `test1@example.com` and so on.
#[must_use]
pub fn customers() -> Vec<NewCustomer> {
    (0..CUSTOMER_COUNT)
        .map(|n| {
            let suffix = if n == 0 { String::new() } else { n.to_string() };
            NewCustomer {
                customer_id: n + 1,
                first_name: format!("John{suffix}"),
                last_name: format!("Doe{suffix}"),
                email: format!("test{suffix}@example.com"),
            }
        })
        .collect()
}

/// Builds the reservations against the customers' internal ids, which must be
/// in [`customers`] order.
pub fn reservations(customer_ids: &[Uuid]) -> Result<Vec<NewReservation>> {
    RESERVATIONS
        .iter()
        .map(|fixture| {
            let customer_id = *customer_ids.get(fixture.customer_index).with_context(|| {
                format!(
                    "Reservation {} needs customer #{} but only {} were seeded",
                    fixture.reservation_id,
                    fixture.customer_index + 1,
                    customer_ids.len()
                )
            })?;

            Ok(NewReservation {
                reservation_id: fixture.reservation_id,
                start_date: parse_date(fixture.start_date)?,
                end_date: parse_date(fixture.end_date)?,
                customer_id,
            })
        })
        .collect()
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .with_context(|| format!("Invalid fixture date: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::validation::email_matches_pattern;

    #[test]
    fn test_customer_fixtures() {
        let customers = customers();
        assert_eq!(customers.len(), 9);

        assert_eq!(customers[0].customer_id, 1);
        assert_eq!(customers[0].first_name, "John");
        assert_eq!(customers[0].email, "test@example.com");

        assert_eq!(customers[8].customer_id, 9);
        assert_eq!(customers[8].last_name, "Doe8");
        assert_eq!(customers[8].email, "test8@example.com");

        assert!(customers.iter().all(|c| email_matches_pattern(&c.email)));
    }

    #[test]
    fn test_reservation_fixtures_link_by_position() {
        let ids: Vec<Uuid> = (0..9).map(|_| Uuid::new_v4()).collect();
        let reservations = reservations(&ids).unwrap();

        assert_eq!(reservations.len(), 4);
        assert_eq!(reservations[0].customer_id, ids[0]);
        assert_eq!(reservations[1].customer_id, ids[1]);
        assert_eq!(reservations[2].customer_id, ids[2]);
        assert_eq!(reservations[3].customer_id, ids[0]);
        assert!(reservations.iter().all(|r| r.start_date < r.end_date));
    }

    #[test]
    fn test_reservation_fixtures_need_enough_customers() {
        let ids = vec![Uuid::new_v4()];
        assert!(reservations(&ids).is_err());
    }
}
