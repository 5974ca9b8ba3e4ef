//! Brand guidelines: the active voice description plus recent history.

mod profile;
mod store;

pub use profile::{BrandEntry, BrandProfile, MAX_HISTORY};
pub use store::BrandStore;
