pub mod table;
pub mod page;
pub mod errors;
pub mod ratelimit;
pub mod rates_ratelimit;

pub use table::Table;
pub use page::{paginate, Page};
pub use errors::extract_clean_error;
pub use ratelimit::check_cooldown;
