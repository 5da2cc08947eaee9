pub mod record;
pub mod role;

pub use record::{ApplicationStatus, Record, RecordId};
pub use role::{ListingContext, Role};
