pub mod entities;
pub mod errors;
pub mod queries;
pub mod repositories;
pub mod services;
pub mod validation;

pub use entities::*;
pub use errors::*;
pub use queries::*;
pub use repositories::*;
pub use services::*;
