pub mod referral;

mod router;
pub use router::get_router;
