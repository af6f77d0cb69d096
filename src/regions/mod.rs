//! Region reference data
//!
//! Regions are fetched from the organisation's API in the background and
//! offered as `direction` values. The fetch never blocks data entry: when
//! it fails the list is simply empty and `direction` stays free text.

pub mod client;
pub mod loader;

pub use client::RegionClient;
pub use loader::RegionLoader;
