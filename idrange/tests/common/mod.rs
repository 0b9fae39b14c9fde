//! Common test utilities for integration tests.
//!
//! Fixture builders for existing ranges and the recorded API responses the
//! snapshot reads them from.

use std::fs;
use std::path::{Path, PathBuf};

use idrange::{IdentityRange, RangeKind, TrustDomain};
use serde_json::{json, Value};

/// Builder for existing ranges with sensible defaults.
///
/// Defaults to a local range named `EXAMPLE.TEST_id_range` the way a fresh
/// server installs it.
#[allow(dead_code)]
pub struct RangeFixture {
    name: String,
    base_id: u64,
    size: u64,
    base_rid: Option<u64>,
    secondary_base_rid: Option<u64>,
    trust_domain: Option<String>,
}

#[allow(dead_code)]
impl RangeFixture {
    /// The default installation range.
    pub fn new() -> Self {
        Self {
            name: "EXAMPLE.TEST_id_range".to_string(),
            base_id: 1_000,
            size: 200_000,
            base_rid: Some(1_000),
            secondary_base_rid: Some(100_000_000),
            trust_domain: None,
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn with_base_id(mut self, base_id: u64) -> Self {
        self.base_id = base_id;
        self
    }

    pub fn with_size(mut self, size: u64) -> Self {
        self.size = size;
        self
    }

    pub fn with_base_rid(mut self, base_rid: Option<u64>) -> Self {
        self.base_rid = base_rid;
        self
    }

    pub fn with_secondary_base_rid(mut self, rid: Option<u64>) -> Self {
        self.secondary_base_rid = rid;
        self
    }

    /// Make this a trust-backed range; drops the secondary RID.
    pub fn trusted_by(mut self, domain: &str) -> Self {
        self.trust_domain = Some(domain.to_string());
        self.secondary_base_rid = None;
        self
    }

    pub fn build(self) -> IdentityRange {
        let kind = if self.trust_domain.is_some() {
            RangeKind::TrustBacked
        } else {
            RangeKind::Local
        };
        let mut range =
            IdentityRange::new(self.name, self.base_id, self.size).with_range_type(kind.as_str());
        if let Some(rid) = self.base_rid {
            range = range.with_base_rid(rid);
        }
        if let Some(rid) = self.secondary_base_rid {
            range = range.with_secondary_base_rid(rid);
        }
        if let Some(domain) = self.trust_domain {
            range = range.with_trust_domain(domain);
        }
        range
    }
}

impl Default for RangeFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode ranges the way `idrange_find` returns them.
#[allow(dead_code)]
pub fn idrange_find_response(ranges: &[IdentityRange]) -> Value {
    let entries: Vec<Value> = ranges
        .iter()
        .map(|range| {
            let mut entry = json!({
                "cn": [range.name],
                "ipabaseid": [range.base_id.to_string()],
                "ipaidrangesize": [range.size.to_string()],
            });
            let object = entry.as_object_mut().unwrap();
            if let Some(rid) = range.base_rid {
                object.insert("ipabaserid".into(), json!([rid.to_string()]));
            }
            if let Some(rid) = range.secondary_base_rid {
                object.insert("ipasecondarybaserid".into(), json!([rid.to_string()]));
            }
            if let Some(domain) = &range.trust_domain {
                object.insert("ipanttrusteddomainname".into(), json!([domain]));
            }
            if let Some(kind) = &range.range_type {
                object.insert("iparangetype".into(), json!([kind]));
            }
            entry
        })
        .collect();

    json!({"result": {"count": entries.len(), "result": entries}, "error": null})
}

/// Encode trusts the way `trust_find` returns them.
#[allow(dead_code)]
pub fn trust_find_response(trusts: &[TrustDomain]) -> Value {
    let entries: Vec<Value> = trusts
        .iter()
        .map(|trust| json!({"cn": [trust.name()]}))
        .collect();
    json!({"result": {"count": entries.len(), "result": entries}, "error": null})
}

/// Write recorded responses into `dir`, returning the two paths.
#[allow(dead_code)]
pub fn write_responses(
    dir: &Path,
    ranges: &[IdentityRange],
    trusts: &[TrustDomain],
) -> (PathBuf, PathBuf) {
    let ranges_path = dir.join("idrange_find.json");
    let trusts_path = dir.join("trust_find.json");
    fs::write(&ranges_path, idrange_find_response(ranges).to_string()).unwrap();
    fs::write(&trusts_path, trust_find_response(trusts).to_string()).unwrap();
    (ranges_path, trusts_path)
}
