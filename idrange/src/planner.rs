//! Allocation of new, non-colliding ID ranges.
//!
//! The planner draws windows above a [`HighWaterMark`] and advances the mark
//! past every window it derives, so successive plans in one run never reuse
//! identifiers. Values supplied explicitly by the caller are used verbatim
//! and never checked: that is how tests build deliberately overlapping
//! ranges.
//!
//! # Examples
//!
//! ```
//! use idrange::{AllocationPlanner, AllocationPolicy, AllocationRequest, HighWaterMark};
//!
//! let mut planner = AllocationPlanner::new(HighWaterMark::default(), AllocationPolicy::default());
//! let plan = planner.plan(&AllocationRequest::local().with_size(50)).unwrap();
//!
//! assert_eq!(plan.base_id(), 100);
//! assert_eq!(plan.base_rid(), 100);
//! assert_eq!(plan.secondary_base_rid(), Some(250));
//! ```

use serde::Serialize;
use uuid::Uuid;

use crate::error::{Error, IdSpace};
use crate::fixture::{FieldState, FormField};
use crate::range::{IdentityRange, RangeKind, Window};
use crate::snapshot::{RangeSnapshot, RangeSource};
use crate::watermark::{HighWaterMark, DEFAULT_MARGIN};
use crate::Result;

/// Gap left between consecutive windows the planner derives.
pub const DEFAULT_SHIFT: u64 = 100;

/// Range size used when a request does not name one.
pub const DEFAULT_SIZE: u64 = 50;

/// Prefix of generated range names.
pub const DEFAULT_NAME_PREFIX: &str = "itest-range";

/// Tunable constants of the allocation algorithm.
///
/// # Examples
///
/// ```
/// use idrange::AllocationPolicy;
///
/// let policy = AllocationPolicy::default();
/// assert_eq!(policy.shift, 100);
/// assert_eq!(policy.margin, 1_000_000);
/// assert_eq!(policy.default_size, 50);
/// assert_eq!(policy.name_prefix, "itest-range");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationPolicy {
    /// Gap between a mark and the next derived window.
    pub shift: u64,
    /// Safety margin added above existing ranges.
    pub margin: u64,
    /// Size of a range when the request leaves it open.
    pub default_size: u64,
    /// Prefix of generated names.
    pub name_prefix: String,
}

impl Default for AllocationPolicy {
    fn default() -> Self {
        Self {
            shift: DEFAULT_SHIFT,
            margin: DEFAULT_MARGIN,
            default_size: DEFAULT_SIZE,
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
        }
    }
}

impl AllocationPolicy {
    /// Generate a fresh range name: the prefix plus 8 random hex digits.
    ///
    /// # Examples
    ///
    /// ```
    /// use idrange::AllocationPolicy;
    ///
    /// let name = AllocationPolicy::default().generate_name();
    /// assert!(name.starts_with("itest-range-"));
    /// assert_eq!(name.len(), "itest-range-".len() + 8);
    /// ```
    #[must_use]
    pub fn generate_name(&self) -> String {
        let id = Uuid::new_v4().simple().to_string();
        format!("{}-{}", self.name_prefix, &id[..8])
    }
}

/// A request for one new range.
///
/// Build with [`AllocationRequest::local`] or
/// [`AllocationRequest::trust_backed`] and the `with_*` methods. Any of the
/// three window starts may be forced; forced values are used verbatim.
///
/// # Examples
///
/// ```
/// use idrange::AllocationRequest;
///
/// let request = AllocationRequest::trust_backed("ad.example.test")
///     .with_size(200)
///     .with_base_rid(0);
/// assert!(request.validate().is_ok());
///
/// let conflicting = AllocationRequest::local().with_trust_domain("ad.example.test");
/// assert!(conflicting.validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationRequest {
    /// Range name; generated when absent.
    pub name: Option<String>,
    /// Range size; the policy default when absent.
    pub size: Option<u64>,
    /// Local or trust-backed.
    pub kind: RangeKind,
    /// Forced base ID.
    pub base_id: Option<u64>,
    /// Forced primary RID.
    pub base_rid: Option<u64>,
    /// Forced secondary RID (local ranges only).
    pub secondary_base_rid: Option<u64>,
    /// Trusted domain (trust-backed ranges only).
    pub trust_domain: Option<String>,
}

impl AllocationRequest {
    fn of_kind(kind: RangeKind) -> Self {
        Self {
            name: None,
            size: None,
            kind,
            base_id: None,
            base_rid: None,
            secondary_base_rid: None,
            trust_domain: None,
        }
    }

    /// A request for a local range with every value derived.
    #[must_use]
    pub fn local() -> Self {
        Self::of_kind(RangeKind::Local)
    }

    /// A request for a range backed by `domain`.
    #[must_use]
    pub fn trust_backed(domain: impl Into<String>) -> Self {
        Self::of_kind(RangeKind::TrustBacked).with_trust_domain(domain)
    }

    /// Set the range name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the range size.
    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Force the base ID.
    #[must_use]
    pub fn with_base_id(mut self, base_id: u64) -> Self {
        self.base_id = Some(base_id);
        self
    }

    /// Force the primary RID.
    #[must_use]
    pub fn with_base_rid(mut self, base_rid: u64) -> Self {
        self.base_rid = Some(base_rid);
        self
    }

    /// Force the secondary RID.
    #[must_use]
    pub fn with_secondary_base_rid(mut self, secondary_base_rid: u64) -> Self {
        self.secondary_base_rid = Some(secondary_base_rid);
        self
    }

    /// Set the trusted domain.
    #[must_use]
    pub fn with_trust_domain(mut self, domain: impl Into<String>) -> Self {
        self.trust_domain = Some(domain.into());
        self
    }

    /// Check that the request describes a range the server could accept.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] when:
    /// - the size is zero
    /// - a local range names a trust domain
    /// - a trust-backed range forces a secondary RID
    /// - a trust-backed range has no (or an empty) trust domain
    pub fn validate(&self) -> Result<()> {
        if self.size == Some(0) {
            return Err(Error::invalid_request("range size must be greater than 0"));
        }

        match self.kind {
            RangeKind::Local => {
                if let Some(domain) = &self.trust_domain {
                    return Err(Error::invalid_request(format!(
                        "local range cannot be bound to trust domain '{domain}'"
                    )));
                }
            }
            RangeKind::TrustBacked => {
                if self.secondary_base_rid.is_some() {
                    return Err(Error::invalid_request(
                        "trust-backed range cannot have a secondary base RID",
                    ));
                }
                match self.trust_domain.as_deref().map(str::trim) {
                    None | Some("") => {
                        return Err(Error::invalid_request(
                            "trust-backed range requires a trust domain",
                        ));
                    }
                    Some(_) => {}
                }
            }
        }

        Ok(())
    }
}

/// The kind-specific half of a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "range_type")]
pub enum RangeAssignment {
    /// A local range owns a secondary RID window.
    #[serde(rename = "ipa-local")]
    Local {
        /// The secondary RID window.
        secondary_rid: Window,
    },
    /// A trust-backed range uses the trusted domain's secondary space.
    #[serde(rename = "ipa-ad-trust")]
    TrustBacked {
        /// The trusted domain.
        trust_domain: String,
    },
}

impl RangeAssignment {
    /// Returns the range kind this assignment belongs to.
    #[must_use]
    pub const fn kind(&self) -> RangeKind {
        match self {
            Self::Local { .. } => RangeKind::Local,
            Self::TrustBacked { .. } => RangeKind::TrustBacked,
        }
    }
}

/// Which form-state assertions apply after the range type is chosen.
///
/// Selecting a range type in the form enables one of the trust-domain and
/// secondary-RID inputs and disables the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationCallback {
    /// Trust-domain input disabled, secondary-RID input enabled.
    Local,
    /// Trust-domain input enabled, secondary-RID input disabled.
    TrustBacked,
}

impl ValidationCallback {
    /// The callback that checks the form for `kind`.
    #[must_use]
    pub const fn for_kind(kind: RangeKind) -> Self {
        match kind {
            RangeKind::Local => Self::Local,
            RangeKind::TrustBacked => Self::TrustBacked,
        }
    }

    /// The range kind this callback validates.
    #[must_use]
    pub const fn kind(self) -> RangeKind {
        match self {
            Self::Local => RangeKind::Local,
            Self::TrustBacked => RangeKind::TrustBacked,
        }
    }

    /// Expected state of each conditional input.
    ///
    /// # Examples
    ///
    /// ```
    /// use idrange::{FieldState, FormField, ValidationCallback};
    ///
    /// let states = ValidationCallback::Local.expected_field_states();
    /// assert!(states.contains(&(FormField::TrustedDomainName, FieldState::Disabled)));
    /// assert!(states.contains(&(FormField::SecondaryBaseRid, FieldState::Enabled)));
    /// ```
    #[must_use]
    pub const fn expected_field_states(self) -> [(FormField, FieldState); 2] {
        match self {
            Self::Local => [
                (FormField::TrustedDomainName, FieldState::Disabled),
                (FormField::SecondaryBaseRid, FieldState::Enabled),
            ],
            Self::TrustBacked => [
                (FormField::TrustedDomainName, FieldState::Enabled),
                (FormField::SecondaryBaseRid, FieldState::Disabled),
            ],
        }
    }
}

/// A fully resolved range, ready to be turned into form fixtures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationPlan {
    name: String,
    id_window: Window,
    primary_rid: Window,
    assignment: RangeAssignment,
    validation: ValidationCallback,
}

impl AllocationPlan {
    /// Assemble a plan from resolved parts.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRequest`] if the windows differ in size.
    pub fn new(
        name: impl Into<String>,
        id_window: Window,
        primary_rid: Window,
        assignment: RangeAssignment,
    ) -> Result<Self> {
        if primary_rid.size() != id_window.size() {
            return Err(Error::invalid_request(
                "base ID and RID windows must have the same size",
            ));
        }
        if let RangeAssignment::Local { secondary_rid } = &assignment {
            if secondary_rid.size() != id_window.size() {
                return Err(Error::invalid_request(
                    "base ID and RID windows must have the same size",
                ));
            }
        }

        let validation = ValidationCallback::for_kind(assignment.kind());
        Ok(Self {
            name: name.into(),
            id_window,
            primary_rid,
            assignment,
            validation,
        })
    }

    /// Returns the range name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rename the plan.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Returns the range kind.
    #[must_use]
    pub const fn kind(&self) -> RangeKind {
        self.assignment.kind()
    }

    /// Returns the range size.
    #[must_use]
    pub const fn size(&self) -> u64 {
        self.id_window.size()
    }

    /// Returns the first base ID.
    #[must_use]
    pub const fn base_id(&self) -> u64 {
        self.id_window.start()
    }

    /// Returns the first primary RID.
    #[must_use]
    pub const fn base_rid(&self) -> u64 {
        self.primary_rid.start()
    }

    /// Returns the first secondary RID, for local plans.
    #[must_use]
    pub fn secondary_base_rid(&self) -> Option<u64> {
        self.secondary_rid_window().map(|w| w.start())
    }

    /// Returns the trusted domain, for trust-backed plans.
    #[must_use]
    pub fn trust_domain(&self) -> Option<&str> {
        match &self.assignment {
            RangeAssignment::TrustBacked { trust_domain } => Some(trust_domain),
            RangeAssignment::Local { .. } => None,
        }
    }

    /// Returns the base ID window.
    #[must_use]
    pub const fn id_window(&self) -> Window {
        self.id_window
    }

    /// Returns the primary RID window.
    #[must_use]
    pub const fn primary_rid_window(&self) -> Window {
        self.primary_rid
    }

    /// Returns the secondary RID window, for local plans.
    #[must_use]
    pub fn secondary_rid_window(&self) -> Option<Window> {
        match &self.assignment {
            RangeAssignment::Local { secondary_rid } => Some(*secondary_rid),
            RangeAssignment::TrustBacked { .. } => None,
        }
    }

    /// Returns the kind-specific part of the plan.
    #[must_use]
    pub const fn assignment(&self) -> &RangeAssignment {
        &self.assignment
    }

    /// Returns the form-state callback for this plan.
    #[must_use]
    pub const fn validation(&self) -> ValidationCallback {
        self.validation
    }

    /// Returns `true` if the plan's own primary and secondary RID windows overlap.
    ///
    /// Only possible when the caller forced RID values; the server rejects
    /// such a range.
    #[must_use]
    pub fn has_self_overlap(&self) -> bool {
        self.secondary_rid_window()
            .is_some_and(|secondary| secondary.overlaps(&self.primary_rid))
    }

    /// The range as the server would report it once created.
    #[must_use]
    pub fn to_identity_range(&self) -> IdentityRange {
        IdentityRange {
            name: self.name.clone(),
            base_id: self.base_id(),
            size: self.size(),
            base_rid: Some(self.base_rid()),
            secondary_base_rid: self.secondary_base_rid(),
            trust_domain: self.trust_domain().map(str::to_string),
            range_type: Some(self.kind().as_str().to_string()),
        }
    }
}

/// Resolve one request against `mark`, returning the plan and the advanced mark.
///
/// Steps, in order:
/// 1. Base ID: forced value, or `max_base_id + shift`. The base mark moves to
///    the window end (never backwards for a forced value).
/// 2. Primary RID: forced value (mark untouched), or
///    `max_primary_rid + shift` with the mark moved to the window end.
/// 3. Secondary RID, local only: forced value (mark untouched), or drawn from
///    the same running primary mark, which moves past it again.
/// 4. Trust-backed plans carry the trust domain instead.
///
/// # Errors
///
/// Returns [`Error::InvalidRequest`] if the request fails validation and
/// [`Error::IdSpaceOverflow`] if a window would run past `u64::MAX`.
///
/// # Examples
///
/// ```
/// use idrange::planner::plan;
/// use idrange::{AllocationPolicy, AllocationRequest, HighWaterMark};
///
/// let policy = AllocationPolicy::default();
/// let mark = HighWaterMark { max_base_id: 1000, ..HighWaterMark::default() };
///
/// let (forced, mark) = plan(&AllocationRequest::local().with_base_id(500), mark, &policy).unwrap();
/// assert_eq!(forced.base_id(), 500);
/// assert_eq!(mark.max_base_id, 1000);
/// ```
pub fn plan(
    request: &AllocationRequest,
    mark: HighWaterMark,
    policy: &AllocationPolicy,
) -> Result<(AllocationPlan, HighWaterMark)> {
    request.validate()?;

    let size = request.size.unwrap_or(policy.default_size);
    let mut next = mark;

    let id_window = match request.base_id {
        Some(base_id) => {
            let window = Window::in_space(IdSpace::BaseId, base_id, size)?;
            next.max_base_id = next.max_base_id.max(window.end());
            window
        }
        None => {
            let window = draw(IdSpace::BaseId, next.max_base_id, policy.shift, size)?;
            next.max_base_id = window.end();
            window
        }
    };

    let primary_rid = match request.base_rid {
        Some(base_rid) => Window::in_space(IdSpace::PrimaryRid, base_rid, size)?,
        None => {
            let window = draw(IdSpace::PrimaryRid, next.max_primary_rid, policy.shift, size)?;
            next.max_primary_rid = window.end();
            window
        }
    };

    let assignment = match request.kind {
        RangeKind::Local => {
            let secondary_rid = match request.secondary_base_rid {
                Some(rid) => Window::in_space(IdSpace::SecondaryRid, rid, size)?,
                None => {
                    let window =
                        draw(IdSpace::SecondaryRid, next.max_primary_rid, policy.shift, size)?;
                    next.max_primary_rid = window.end();
                    next.max_secondary_rid = next.max_secondary_rid.max(window.end());
                    window
                }
            };
            RangeAssignment::Local { secondary_rid }
        }
        RangeKind::TrustBacked => RangeAssignment::TrustBacked {
            trust_domain: request
                .trust_domain
                .clone()
                .ok_or_else(|| Error::invalid_request("trust-backed range requires a trust domain"))?,
        },
    };

    let name = request
        .name
        .clone()
        .unwrap_or_else(|| policy.generate_name());

    let plan = AllocationPlan::new(name, id_window, primary_rid, assignment)?;
    log::debug!(
        "planned {} range '{}': base ID {}, primary RID {}, secondary RID {:?}",
        plan.kind(),
        plan.name(),
        plan.id_window(),
        plan.primary_rid_window(),
        plan.secondary_rid_window().map(|w| w.to_string())
    );

    Ok((plan, next))
}

fn draw(space: IdSpace, mark: u64, shift: u64, size: u64) -> Result<Window> {
    let start = mark.checked_add(shift).ok_or(Error::IdSpaceOverflow {
        space,
        base: mark,
        size,
    })?;
    Window::in_space(space, start, size)
}

/// Owns the high-water mark for one test run.
///
/// A planner must not be shared between concurrently running test runs
/// against the same server: each would start from the same snapshot and
/// could hand out the same windows.
#[derive(Debug, Clone)]
pub struct AllocationPlanner {
    mark: HighWaterMark,
    policy: AllocationPolicy,
}

impl AllocationPlanner {
    /// Create a planner starting from `mark`.
    #[must_use]
    pub fn new(mark: HighWaterMark, policy: AllocationPolicy) -> Self {
        Self { mark, policy }
    }

    /// Create a planner above every range in `snapshot`, using the policy margin.
    #[must_use]
    pub fn from_snapshot(snapshot: &RangeSnapshot, policy: AllocationPolicy) -> Self {
        let mark = HighWaterMark::compute_with_margin(snapshot, policy.margin);
        Self::new(mark, policy)
    }

    /// Capture a snapshot from `source` and create a planner above it.
    ///
    /// # Errors
    ///
    /// Propagates query failures from the source.
    pub fn capture<S: RangeSource + ?Sized>(source: &S, policy: AllocationPolicy) -> Result<Self> {
        let snapshot = RangeSnapshot::capture(source)?;
        Ok(Self::from_snapshot(&snapshot, policy))
    }

    /// Returns the current mark.
    #[must_use]
    pub const fn mark(&self) -> HighWaterMark {
        self.mark
    }

    /// Returns the policy in use.
    #[must_use]
    pub const fn policy(&self) -> &AllocationPolicy {
        &self.policy
    }

    /// Plan one range and advance the mark.
    ///
    /// On error the mark is left unchanged.
    ///
    /// # Errors
    ///
    /// See [`plan`].
    pub fn plan(&mut self, request: &AllocationRequest) -> Result<AllocationPlan> {
        let (plan, mark) = plan(request, self.mark, &self.policy)?;
        self.mark = mark;
        Ok(plan)
    }
}


#[cfg(test)]
mod proptests;
