//! HTTP route modules, one per resource, nested under `/api` by
//! [`crate::app::build_router`].

pub mod cars;
pub mod customers;
pub mod dashboard;
pub mod parts;
pub mod sales;
pub mod suppliers;
pub mod uploads;
