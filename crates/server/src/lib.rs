pub mod admin;
pub mod errors;
pub mod orders;
pub mod routes;
pub mod startup;

pub use startup::run;
