//! Business logic, one module per concern. Routes stay thin and delegate
//! here; everything in this tree takes `&dyn KvStore` so the test suite can
//! run against the in-memory backing.

pub mod auth;
pub mod booking;
pub mod catalog;
pub mod message;
