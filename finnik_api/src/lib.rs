//! HTTP client for the public Finnik vehicle pages.
//!
//! Fetches the raw HTML of a vehicle page by registration code. Parsing and
//! classification live in `fleetdetect_lib`; this crate only moves bytes.

mod client;
mod errors;
mod user_agent;
pub use self::client::Client;
pub use self::errors::Error;
pub use self::user_agent::get_user_agent;
