pub mod catalog;
pub mod customer;
pub mod reservation;
pub mod user;
