pub mod api;

pub use api::create_app;
