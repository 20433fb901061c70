pub mod model;
pub mod signature;

mod routes;
pub use routes::get_router;
