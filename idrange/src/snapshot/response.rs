//! Decoding of `idrange_find` and `trust_find` API responses.
//!
//! The server wraps search results as `{"result": {"result": [...]}}`, and
//! each entry maps LDAP attribute names to lists of strings. Single values
//! that arrive unwrapped are accepted as well.

use serde_json::{Map, Value};

use crate::error::Error;
use crate::range::{IdentityRange, TrustDomain};
use crate::Result;

/// Name of the range search command.
pub const IDRANGE_FIND: &str = "idrange_find";

/// Name of the trust search command.
pub const TRUST_FIND: &str = "trust_find";

/// Range and trust entry attributes.
pub mod attr {
    /// Entry name.
    pub const CN: &str = "cn";
    /// First POSIX ID.
    pub const BASE_ID: &str = "ipabaseid";
    /// Range size.
    pub const SIZE: &str = "ipaidrangesize";
    /// First primary RID.
    pub const BASE_RID: &str = "ipabaserid";
    /// First secondary RID.
    pub const SECONDARY_BASE_RID: &str = "ipasecondarybaserid";
    /// Trusted domain name.
    pub const TRUSTED_DOMAIN_NAME: &str = "ipanttrusteddomainname";
    /// Trusted domain SID, reported instead of the name by some servers.
    pub const TRUSTED_DOMAIN_SID: &str = "ipanttrusteddomainsid";
    /// Range type.
    pub const RANGE_TYPE: &str = "iparangetype";
}

/// Parse a raw response document.
///
/// # Errors
///
/// Returns [`Error::QueryFailure`] if the text is not valid JSON.
pub fn parse_document(operation: &str, text: &str) -> Result<Value> {
    serde_json::from_str(text).map_err(|e| Error::query(operation, format!("malformed response: {e}")))
}

/// Decode the entries of an `idrange_find` response.
///
/// # Errors
///
/// Returns [`Error::QueryFailure`] if the envelope is missing or an entry
/// lacks `cn`, `ipabaseid` or `ipaidrangesize`, or carries a non-integer
/// numeric attribute.
///
/// # Examples
///
/// ```
/// use idrange::snapshot::response::decode_ranges;
/// use serde_json::json;
///
/// let response = json!({"result": {"result": [{
///     "cn": ["r1"],
///     "ipabaseid": ["1000"],
///     "ipaidrangesize": ["50"],
///     "ipabaserid": ["2000"],
/// }]}});
///
/// let ranges = decode_ranges(&response).unwrap();
/// assert_eq!(ranges[0].base_rid, Some(2000));
/// assert_eq!(ranges[0].secondary_base_rid, None);
/// ```
pub fn decode_ranges(response: &Value) -> Result<Vec<IdentityRange>> {
    entries(IDRANGE_FIND, response)?
        .iter()
        .map(decode_range)
        .collect()
}

/// Decode the entries of a `trust_find` response.
///
/// # Errors
///
/// Returns [`Error::QueryFailure`] if the envelope is missing or an entry
/// lacks `cn`.
pub fn decode_trust_domains(response: &Value) -> Result<Vec<TrustDomain>> {
    entries(TRUST_FIND, response)?
        .iter()
        .map(|entry| {
            let entry = as_object(TRUST_FIND, entry)?;
            let name = required_str(TRUST_FIND, entry, attr::CN)?;
            Ok(TrustDomain::new(name))
        })
        .collect()
}

fn decode_range(entry: &Value) -> Result<IdentityRange> {
    let entry = as_object(IDRANGE_FIND, entry)?;

    let name = required_str(IDRANGE_FIND, entry, attr::CN)?;
    let base_id = required_u64(entry, attr::BASE_ID)?;
    let size = required_u64(entry, attr::SIZE)?;

    let trust_domain = match optional_str(IDRANGE_FIND, entry, attr::TRUSTED_DOMAIN_NAME)? {
        Some(domain) => Some(domain),
        None => optional_str(IDRANGE_FIND, entry, attr::TRUSTED_DOMAIN_SID)?,
    };

    Ok(IdentityRange {
        name: name.to_string(),
        base_id,
        size,
        base_rid: optional_u64(entry, attr::BASE_RID)?,
        secondary_base_rid: optional_u64(entry, attr::SECONDARY_BASE_RID)?,
        trust_domain: trust_domain.map(str::to_string),
        range_type: optional_str(IDRANGE_FIND, entry, attr::RANGE_TYPE)?.map(str::to_string),
    })
}

fn entries<'a>(operation: &str, response: &'a Value) -> Result<&'a Vec<Value>> {
    response
        .get("result")
        .and_then(|outer| outer.get("result"))
        .and_then(Value::as_array)
        .ok_or_else(|| Error::query(operation, "response has no result.result list"))
}

fn as_object<'a>(operation: &str, entry: &'a Value) -> Result<&'a Map<String, Value>> {
    entry
        .as_object()
        .ok_or_else(|| Error::query(operation, "result entry is not an object"))
}

fn optional_str<'a>(
    operation: &str,
    entry: &'a Map<String, Value>,
    name: &str,
) -> Result<Option<&'a str>> {
    let value = match entry.get(name) {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(values)) => match values.first() {
            Some(first) => first,
            None => return Ok(None),
        },
        Some(other) => other,
    };

    value
        .as_str()
        .map(Some)
        .ok_or_else(|| Error::query(operation, format!("attribute '{name}' is not a string")))
}

fn required_str<'a>(operation: &str, entry: &'a Map<String, Value>, name: &str) -> Result<&'a str> {
    optional_str(operation, entry, name)?
        .ok_or_else(|| Error::query(operation, format!("entry is missing attribute '{name}'")))
}

fn optional_u64(entry: &Map<String, Value>, name: &str) -> Result<Option<u64>> {
    optional_str(IDRANGE_FIND, entry, name)?
        .map(|raw| {
            raw.trim().parse::<u64>().map_err(|_| {
                Error::query(
                    IDRANGE_FIND,
                    format!("attribute '{name}' is not an unsigned integer: {raw}"),
                )
            })
        })
        .transpose()
}

fn required_u64(entry: &Map<String, Value>, name: &str) -> Result<u64> {
    optional_u64(entry, name)?.ok_or_else(|| {
        Error::query(IDRANGE_FIND, format!("entry is missing attribute '{name}'"))
    })
}
