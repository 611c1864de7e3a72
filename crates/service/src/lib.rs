//! Service layer between the admin UI and the cadastro REST backend.
//! - One generic [`ResourceService`] per record type: list (client-side filter + window), get, create, update, delete.
//! - Transport behind the [`RecordGateway`] trait; [`HttpGateway`] is the REST implementation.
//! - Caller-side helpers: submission state, search debouncing, city options.

pub mod cities;
pub mod debounce;
pub mod errors;
pub mod gateway;
pub mod pagination;
pub mod resource_service;
pub mod submission;
#[cfg(test)]
pub mod test_support;

use models::{City, Person};

pub use cities::{CityOption, CityOptions};
pub use debounce::Debouncer;
pub use errors::{Operation, ServiceError};
pub use gateway::{HttpGateway, RecordGateway};
pub use resource_service::{Listing, ResourceService};
pub use submission::{AfterSave, SaveIntent, SubmissionState};

pub type CityService<G = HttpGateway> = ResourceService<City, G>;
pub type PersonService<G = HttpGateway> = ResourceService<Person, G>;
