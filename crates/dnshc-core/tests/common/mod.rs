//! Test doubles and common utilities for engine contract tests
//!
//! The doubles count calls so tests can assert not only on results but on
//! which external effects happened.

#![allow(dead_code)]

use dnshc_core::error::{Error, Result};
use dnshc_core::model::{Change, ChangeAck, HealthVerdict, ManagedZoneRef, ProbeFailure};
use dnshc_core::model::ResourceRecordSet;
use dnshc_core::traits::{DnsProvider, HealthProber};
use dnshc_core::HealthcheckConfig;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const RECORD_NAME: &str = "www.example.com.";

/// What the mock provider answers to `fetch_record()`
#[derive(Clone)]
pub enum FetchBehavior {
    Found(ResourceRecordSet),
    Missing,
    Ambiguous(usize),
    Unavailable,
}

/// A mock DnsProvider that tracks calls
pub struct MockDnsProvider {
    fetch: FetchBehavior,
    fail_submit: bool,
    fetch_call_count: Arc<AtomicUsize>,
    submitted: Arc<Mutex<Vec<Change>>>,
}

impl MockDnsProvider {
    pub fn with_record(rrdatas: &[&str]) -> Self {
        Self::new(FetchBehavior::Found(record(rrdatas)))
    }

    pub fn new(fetch: FetchBehavior) -> Self {
        Self {
            fetch,
            fail_submit: false,
            fetch_call_count: Arc::new(AtomicUsize::new(0)),
            submitted: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Make `submit_change()` fail after recording the change
    pub fn failing_submit(mut self) -> Self {
        self.fail_submit = true;
        self
    }

    /// Get the number of times fetch_record() was called
    pub fn fetch_call_count(&self) -> usize {
        self.fetch_call_count.load(Ordering::SeqCst)
    }

    /// Get the changes passed to submit_change()
    pub fn submitted(&self) -> Vec<Change> {
        self.submitted.lock().unwrap().clone()
    }

    /// Create a new MockDnsProvider that shares counters with an existing one
    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            fetch: other.fetch.clone(),
            fail_submit: other.fail_submit,
            fetch_call_count: Arc::clone(&other.fetch_call_count),
            submitted: Arc::clone(&other.submitted),
        }
    }
}

#[async_trait::async_trait]
impl DnsProvider for MockDnsProvider {
    async fn fetch_record(
        &self,
        _zone: &ManagedZoneRef,
        name: &str,
        _record_type: &str,
    ) -> Result<ResourceRecordSet> {
        self.fetch_call_count.fetch_add(1, Ordering::SeqCst);

        match &self.fetch {
            FetchBehavior::Found(record) => Ok(record.clone()),
            FetchBehavior::Missing => Err(Error::not_found(name)),
            FetchBehavior::Ambiguous(count) => Err(Error::AmbiguousRecord {
                name: name.to_string(),
                count: *count,
            }),
            FetchBehavior::Unavailable => Err(Error::provider("mock", "503 Service Unavailable")),
        }
    }

    async fn submit_change(&self, _zone: &ManagedZoneRef, change: &Change) -> Result<ChangeAck> {
        self.submitted.lock().unwrap().push(change.clone());

        if self.fail_submit {
            return Err(Error::provider("mock", "412 Precondition Failed"));
        }

        Ok(ChangeAck {
            id: Some("7".to_string()),
            status: Some("pending".to_string()),
            start_time: None,
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}

/// A HealthProber answering from a fixed address → healthy table
///
/// Addresses not in the table are reported as timed out.
pub struct ScriptedProber {
    table: HashMap<String, bool>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedProber {
    pub fn new(table: &[(&str, bool)]) -> Self {
        Self {
            table: table
                .iter()
                .map(|(address, healthy)| (address.to_string(), *healthy))
                .collect(),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Addresses probed so far, in call order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sharing_counters_with(other: &Self) -> Self {
        Self {
            table: other.table.clone(),
            calls: Arc::clone(&other.calls),
        }
    }
}

#[async_trait::async_trait]
impl HealthProber for ScriptedProber {
    async fn probe(&self, address: &str) -> HealthVerdict {
        self.calls.lock().unwrap().push(address.to_string());

        match self.table.get(address) {
            Some(true) => HealthVerdict::Healthy,
            Some(false) => HealthVerdict::Unhealthy(ProbeFailure::Status(503)),
            None => HealthVerdict::Unhealthy(ProbeFailure::Transport(
                "operation timed out".to_string(),
            )),
        }
    }
}

/// Build a record set with the standard test name
pub fn record(rrdatas: &[&str]) -> ResourceRecordSet {
    ResourceRecordSet::new(RECORD_NAME, "A", 300, strings(rrdatas))
}

pub fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Helper to create a minimal HealthcheckConfig for testing
pub fn minimal_config(rrdatas: &[&str]) -> HealthcheckConfig {
    HealthcheckConfig::new(
        RECORD_NAME,
        ManagedZoneRef::new("test-project", "test-zone"),
        strings(rrdatas),
        "/healthz",
    )
}
