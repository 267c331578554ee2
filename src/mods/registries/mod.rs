//! Registry implementations for fetching mod releases

pub mod thunderstore;

pub use thunderstore::ThunderstoreRegistry;
