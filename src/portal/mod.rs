pub mod client;
pub mod scrape;

pub use client::PortalClient;
