//! Record types of the cadastro backend and the pure helpers around them:
//! identifier normalization, collection envelopes and form validation.

pub mod city;
pub mod envelope;
pub mod identifier;
pub mod person;
pub mod resource;
pub mod validation;

pub use city::{City, NewCity};
pub use identifier::{IdentifierPolicy, Normalize, RecordId};
pub use person::{NewPerson, Person};
pub use resource::Resource;
pub use validation::{FieldErrors, Validate};
