pub mod api;
pub mod store;
pub mod time_providers;
