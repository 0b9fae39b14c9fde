//! Form fixtures for creating and modifying ranges.
//!
//! The builder turns an [`AllocationPlan`] into the ordered field
//! assignments the range form expects. Ordering matters: choosing the range
//! type enables one of the trust-domain and secondary-RID inputs, so the
//! conditional field is always assigned last, after the type selector and
//! its validation callback.
//!
//! Nothing here talks to a server or a browser; the sequences are handed to
//! an external form driver.

use std::fmt;

use serde::Serialize;

use crate::error::{Error, IdSpace};
use crate::planner::{AllocationPlan, RangeAssignment, ValidationCallback};
use crate::range::{RangeKind, Window};
use crate::snapshot::response::attr;
use crate::Result;

/// Widget type of a form input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Free-text input.
    Textbox,
    /// Radio button group.
    Radio,
}

/// Whether an input accepts user input when the form is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldState {
    /// The input is editable.
    Enabled,
    /// The input is greyed out.
    Disabled,
}

/// Inputs of the ID range form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FormField {
    /// Range name.
    #[serde(rename = "cn")]
    Cn,
    /// First base ID.
    #[serde(rename = "ipabaseid")]
    BaseId,
    /// Range size.
    #[serde(rename = "ipaidrangesize")]
    Size,
    /// First primary RID.
    #[serde(rename = "ipabaserid")]
    BaseRid,
    /// Range type selector.
    #[serde(rename = "iparangetype")]
    RangeType,
    /// Trusted domain name.
    #[serde(rename = "ipanttrusteddomainname")]
    TrustedDomainName,
    /// First secondary RID.
    #[serde(rename = "ipasecondarybaserid")]
    SecondaryBaseRid,
}

impl FormField {
    /// Returns the input's `name` attribute.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cn => attr::CN,
            Self::BaseId => attr::BASE_ID,
            Self::Size => attr::SIZE,
            Self::BaseRid => attr::BASE_RID,
            Self::RangeType => attr::RANGE_TYPE,
            Self::TrustedDomainName => attr::TRUSTED_DOMAIN_NAME,
            Self::SecondaryBaseRid => attr::SECONDARY_BASE_RID,
        }
    }

    /// Returns the widget type of the input.
    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::RangeType => FieldKind::Radio,
            _ => FieldKind::Textbox,
        }
    }

    /// CSS selector for the input, as used by form-state assertions.
    ///
    /// # Examples
    ///
    /// ```
    /// use idrange::FormField;
    ///
    /// assert_eq!(FormField::SecondaryBaseRid.selector(), "[name=ipasecondarybaserid]");
    /// ```
    #[must_use]
    pub fn selector(self) -> String {
        format!("[name={}]", self.as_str())
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of filling in the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FieldAssignment {
    /// Type `value` into a text input.
    Textbox {
        /// Input to fill.
        name: FormField,
        /// Text to enter.
        value: String,
    },
    /// Select `value` in a radio group.
    Radio {
        /// Radio group.
        name: FormField,
        /// Option to select.
        value: String,
    },
    /// Run the form-state check for the chosen range type.
    Callback {
        /// The check to run.
        callback: ValidationCallback,
        /// The range type it is run for.
        range_type: RangeKind,
    },
}

impl FieldAssignment {
    /// Assign text to a text input.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] if `field` is not a text input.
    ///
    /// # Examples
    ///
    /// ```
    /// use idrange::{FieldAssignment, FormField};
    ///
    /// assert!(FieldAssignment::textbox(FormField::Size, "51").is_ok());
    /// assert!(FieldAssignment::textbox(FormField::RangeType, "ipa-local").is_err());
    /// ```
    pub fn textbox(field: FormField, value: impl Into<String>) -> Result<Self> {
        if field.kind() != FieldKind::Textbox {
            return Err(Error::InvalidField {
                field: field.as_str().to_string(),
                reason: "is not a text input".to_string(),
            });
        }
        Ok(Self::Textbox {
            name: field,
            value: value.into(),
        })
    }

    /// Select an option in a radio group.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] if `field` is not a radio group or
    /// `value` is not one of its options.
    pub fn radio(field: FormField, value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if field.kind() != FieldKind::Radio {
            return Err(Error::InvalidField {
                field: field.as_str().to_string(),
                reason: "is not a radio group".to_string(),
            });
        }
        if RangeKind::parse(&value).is_none() {
            return Err(Error::InvalidField {
                field: field.as_str().to_string(),
                reason: format!("unknown option '{value}'"),
            });
        }
        Ok(Self::Radio { name: field, value })
    }

    fn number(field: FormField, value: u64) -> Self {
        Self::Textbox {
            name: field,
            value: value.to_string(),
        }
    }

    /// Returns the input this step touches, if any.
    #[must_use]
    pub const fn field(&self) -> Option<FormField> {
        match self {
            Self::Textbox { name, .. } | Self::Radio { name, .. } => Some(*name),
            Self::Callback { .. } => None,
        }
    }

    /// Returns the value entered, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Textbox { value, .. } | Self::Radio { value, .. } => Some(value),
            Self::Callback { .. } => None,
        }
    }

    /// Returns the widget name the form driver dispatches on.
    #[must_use]
    pub const fn widget(&self) -> &'static str {
        match self {
            Self::Textbox { .. } => "textbox",
            Self::Radio { .. } => "radio",
            Self::Callback { .. } => "callback",
        }
    }
}

/// Fields to change on an existing range.
///
/// Only fields that are set are emitted.
///
/// # Examples
///
/// ```
/// use idrange::{FixtureBuilder, ModifyRequest};
///
/// let fields = FixtureBuilder::modify_sequence(&ModifyRequest::new().with_size(51));
/// assert_eq!(fields.len(), 1);
/// assert_eq!(fields[0].value(), Some("51"));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifyRequest {
    /// New base ID.
    pub base_id: Option<u64>,
    /// New size.
    pub size: Option<u64>,
    /// New primary RID.
    pub base_rid: Option<u64>,
    /// New secondary RID.
    pub secondary_base_rid: Option<u64>,
}

impl ModifyRequest {
    /// A request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the base ID.
    #[must_use]
    pub fn with_base_id(mut self, base_id: u64) -> Self {
        self.base_id = Some(base_id);
        self
    }

    /// Change the size.
    #[must_use]
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Change the primary RID.
    #[must_use]
    pub fn with_base_rid(mut self, base_rid: u64) -> Self {
        self.base_rid = Some(base_rid);
        self
    }

    /// Change the secondary RID.
    #[must_use]
    pub fn with_secondary_base_rid(mut self, secondary_base_rid: u64) -> Self {
        self.secondary_base_rid = Some(secondary_base_rid);
        self
    }

    /// Returns `true` if no field is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base_id.is_none()
            && self.size.is_none()
            && self.base_rid.is_none()
            && self.secondary_base_rid.is_none()
    }
}

/// Everything a range CRUD scenario needs for one range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FixtureData {
    /// Primary key of the range (its name).
    pub pkey: String,
    /// Steps to fill in the "add" form.
    pub add: Vec<FieldAssignment>,
    /// Steps to fill in the "modify" form.
    #[serde(rename = "mod")]
    pub modify: Vec<FieldAssignment>,
}

impl FixtureData {
    /// Replace the modify steps.
    #[must_use]
    pub fn with_modify(mut self, request: &ModifyRequest) -> Self {
        self.modify = FixtureBuilder::modify_sequence(request);
        self
    }
}

/// Serializes plans into form field sequences.
///
/// # Examples
///
/// ```
/// use idrange::{AllocationPlanner, AllocationPolicy, AllocationRequest, FixtureBuilder, HighWaterMark};
///
/// let mut planner = AllocationPlanner::new(HighWaterMark::default(), AllocationPolicy::default());
/// let plan = planner.plan(&AllocationRequest::local().with_name("r1")).unwrap();
///
/// let fixture = FixtureBuilder::fixture(&plan);
/// assert_eq!(fixture.pkey, "r1");
/// assert_eq!(fixture.add.len(), 7);
/// assert_eq!(fixture.modify[0].value(), Some("51"));
/// ```
pub struct FixtureBuilder;

impl FixtureBuilder {
    /// The full "add" form sequence for `plan`, in form order.
    #[must_use]
    pub fn add_sequence(plan: &AllocationPlan) -> Vec<FieldAssignment> {
        let kind = plan.kind();
        let mut fields = vec![
            FieldAssignment::Textbox {
                name: FormField::Cn,
                value: plan.name().to_string(),
            },
            FieldAssignment::number(FormField::BaseId, plan.base_id()),
            FieldAssignment::number(FormField::Size, plan.size()),
            FieldAssignment::number(FormField::BaseRid, plan.base_rid()),
            FieldAssignment::Radio {
                name: FormField::RangeType,
                value: kind.as_str().to_string(),
            },
            FieldAssignment::Callback {
                callback: plan.validation(),
                range_type: kind,
            },
        ];

        fields.push(match plan.assignment() {
            RangeAssignment::TrustBacked { trust_domain } => FieldAssignment::Textbox {
                name: FormField::TrustedDomainName,
                value: trust_domain.clone(),
            },
            RangeAssignment::Local { secondary_rid } => {
                FieldAssignment::number(FormField::SecondaryBaseRid, secondary_rid.start())
            }
        });

        fields
    }

    /// The sparse "modify" form sequence for `request`.
    ///
    /// Order: base ID, size, base RID, secondary base RID.
    #[must_use]
    pub fn modify_sequence(request: &ModifyRequest) -> Vec<FieldAssignment> {
        [
            (FormField::BaseId, request.base_id),
            (FormField::Size, request.size),
            (FormField::BaseRid, request.base_rid),
            (FormField::SecondaryBaseRid, request.secondary_base_rid),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| FieldAssignment::number(field, v)))
        .collect()
    }

    /// Add and modify fixtures for `plan`.
    ///
    /// The default modification grows the range by one identifier.
    #[must_use]
    pub fn fixture(plan: &AllocationPlan) -> FixtureData {
        let modify = ModifyRequest::new().with_size(plan.size().saturating_add(1));
        FixtureData {
            pkey: plan.name().to_string(),
            add: Self::add_sequence(plan),
            modify: Self::modify_sequence(&modify),
        }
    }

    /// Like [`FixtureBuilder::fixture`], but under a different primary key.
    ///
    /// The `cn` field of the add sequence follows the new key.
    #[must_use]
    pub fn fixture_named(plan: &AllocationPlan, pkey: impl Into<String>) -> FixtureData {
        let mut renamed = plan.clone();
        renamed.set_name(pkey);
        Self::fixture(&renamed)
    }
}

impl AllocationPlan {
    /// Rebuild a plan from an "add" form sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidField`] if a required field is missing, a
    /// numeric field does not parse, or the conditional field does not match
    /// the selected range type.
    pub fn from_add_sequence(fields: &[FieldAssignment]) -> Result<Self> {
        let mut name = None;
        let mut base_id = None;
        let mut size = None;
        let mut base_rid = None;
        let mut secondary_base_rid = None;
        let mut trust_domain = None;
        let mut kind = None;

        for assignment in fields {
            match assignment {
                FieldAssignment::Textbox { name: field, value } => match field {
                    FormField::Cn => name = Some(value.clone()),
                    FormField::BaseId => base_id = Some(parse_number(*field, value)?),
                    FormField::Size => size = Some(parse_number(*field, value)?),
                    FormField::BaseRid => base_rid = Some(parse_number(*field, value)?),
                    FormField::SecondaryBaseRid => {
                        secondary_base_rid = Some(parse_number(*field, value)?);
                    }
                    FormField::TrustedDomainName => trust_domain = Some(value.clone()),
                    FormField::RangeType => return Err(wrong_widget(*field)),
                },
                FieldAssignment::Radio { name: field, value } => {
                    kind = Some(RangeKind::parse(value).ok_or_else(|| Error::InvalidField {
                        field: field.as_str().to_string(),
                        reason: format!("unknown option '{value}'"),
                    })?);
                }
                FieldAssignment::Callback { .. } => {}
            }
        }

        let name = name.ok_or_else(|| missing(FormField::Cn))?;
        let base_id = base_id.ok_or_else(|| missing(FormField::BaseId))?;
        let size = size.ok_or_else(|| missing(FormField::Size))?;
        let base_rid = base_rid.ok_or_else(|| missing(FormField::BaseRid))?;
        let kind = kind.ok_or_else(|| missing(FormField::RangeType))?;

        let assignment = match (kind, secondary_base_rid, trust_domain) {
            (RangeKind::Local, Some(rid), None) => RangeAssignment::Local {
                secondary_rid: Window::in_space(IdSpace::SecondaryRid, rid, size)?,
            },
            (RangeKind::TrustBacked, None, Some(trust_domain)) => {
                RangeAssignment::TrustBacked { trust_domain }
            }
            (RangeKind::Local, _, _) => {
                return Err(Error::InvalidField {
                    field: FormField::SecondaryBaseRid.as_str().to_string(),
                    reason: "local range needs exactly a secondary base RID".to_string(),
                })
            }
            (RangeKind::TrustBacked, _, _) => {
                return Err(Error::InvalidField {
                    field: FormField::TrustedDomainName.as_str().to_string(),
                    reason: "trust-backed range needs exactly a trusted domain".to_string(),
                })
            }
        };

        Self::new(
            name,
            Window::in_space(IdSpace::BaseId, base_id, size)?,
            Window::in_space(IdSpace::PrimaryRid, base_rid, size)?,
            assignment,
        )
    }
}

fn parse_number(field: FormField, value: &str) -> Result<u64> {
    value.parse().map_err(|_| Error::InvalidField {
        field: field.as_str().to_string(),
        reason: format!("'{value}' is not an unsigned integer"),
    })
}

fn missing(field: FormField) -> Error {
    Error::InvalidField {
        field: field.as_str().to_string(),
        reason: "missing from add sequence".to_string(),
    }
}

fn wrong_widget(field: FormField) -> Error {
    Error::InvalidField {
        field: field.as_str().to_string(),
        reason: "assigned through the wrong widget".to_string(),
    }
}


#[cfg(test)]
mod proptests;
