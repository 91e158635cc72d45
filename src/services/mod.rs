pub mod error;
pub use error::ServiceError;

pub mod validation;

pub mod customer_service;
pub mod customer_service_impl;
pub use customer_service::{CreateCustomerRequest, CustomerService, UpdateCustomerRequest};
pub use customer_service_impl::SeaOrmCustomerService;

pub mod user_service;
pub mod user_service_impl;
pub use user_service::{CreateUserRequest, UpdateUserRequest, UserService};
pub use user_service_impl::SeaOrmUserService;

pub mod reservation_service;
pub mod reservation_service_impl;
pub use reservation_service::{
    CreateReservationRequest, CreateServiceRequest, ReservationService, ReservationServiceLink,
    UpdateReservationRequest,
};
pub use reservation_service_impl::SeaOrmReservationService;
