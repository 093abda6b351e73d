//! Core traits for the healthcheck
//!
//! This module defines the abstract interfaces the engine is driven through.
//!
//! - [`DnsProvider`]: Read a record set and submit changes to it
//! - [`HealthProber`]: Classify one backend address as healthy or not

pub mod dns_provider;
pub mod prober;

pub use dns_provider::DnsProvider;
pub use prober::HealthProber;
