pub mod payment;

mod router;
pub use router::get_router;
