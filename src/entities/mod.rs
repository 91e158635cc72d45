pub mod prelude;

pub mod customers;
pub mod reservation_services;
pub mod reservations;
pub mod services;
pub mod users;
