mod status_cache;

pub use status_cache::{ConnectionState, StatusCache};
