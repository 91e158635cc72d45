pub use super::customers::Entity as Customers;
pub use super::reservation_services::Entity as ReservationServices;
pub use super::reservations::Entity as Reservations;
pub use super::services::Entity as Services;
pub use super::users::Entity as Users;
