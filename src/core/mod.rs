pub mod batch;
pub mod dates;
pub mod formats;
pub mod geo;
pub mod loader;
pub mod metadata;
