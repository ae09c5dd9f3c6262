#[macro_use]
extern crate lazy_static;

pub mod adf;
mod combine;
mod error;
mod options;
mod parse_schema;
mod produce;
mod refs;
mod schema;
mod visitor;

pub use combine::cap_by_max;
pub use error::{GenerateError, VisitorError};
pub use options::GeneratorOptions;
pub use parse_schema::classify;
pub use produce::{generate, Generator};
pub use refs::Definitions;
pub use schema::*;
pub use visitor::{IdentityVisitor, Visitor};
