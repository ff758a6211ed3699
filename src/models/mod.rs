pub mod activity_log;
pub mod booking;
pub mod current_user;
pub mod profile;
pub mod provider;
pub mod review;

pub use activity_log::ActivityLogRow;
pub use booking::BookingRow;
pub use current_user::CurrentUserRow;
pub use profile::ProfileRow;
pub use provider::{ProviderGeoRow, ProviderRow};
pub use review::ReviewRow;
