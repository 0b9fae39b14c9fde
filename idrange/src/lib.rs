#![deny(missing_docs, unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! # idrange
//!
//! A library for planning collision-free ID ranges in directory-service
//! integration tests.
//!
//! Tests that create ID ranges on a live server cannot ask it for a free
//! window. This library reads the ranges that exist, keeps a high-water mark
//! in each of the three identifier spaces (base ID, primary RID, secondary
//! RID), and plans new ranges above those marks. Plans are then serialized
//! into the field sequences the range form expects.
//!
//! ## Core Types
//!
//! - [`RangeSnapshot`] and [`RangeSource`]: what exists on the server
//! - [`HighWaterMark`]: highest identifiers in use, plus a safety margin
//! - [`AllocationPlanner`], [`AllocationRequest`] and [`AllocationPlan`]: new ranges
//! - [`FixtureBuilder`] and [`FixtureData`]: form field sequences
//! - [`OverlapKind`]: the server's constraint-violation messages
//! - [`Error`] and [`Result`]: error handling types
//! - [`Logger`] and [`LogLevel`]: logging infrastructure
//!
//! ## Examples
//!
//! ```
//! use idrange::{
//!     AllocationPlanner, AllocationPolicy, AllocationRequest, FixtureBuilder, IdentityRange,
//!     StaticSource,
//! };
//!
//! let source = StaticSource::new(
//!     vec![IdentityRange::new("EXAMPLE.TEST_id_range", 1000, 50).with_base_rid(2000)],
//!     Vec::new(),
//! );
//!
//! let mut planner = AllocationPlanner::capture(&source, AllocationPolicy::default()).unwrap();
//! let plan = planner.plan(&AllocationRequest::local()).unwrap();
//! assert_eq!(plan.base_id(), 1_001_150);
//!
//! let fixture = FixtureBuilder::fixture(&plan);
//! assert_eq!(fixture.add[1].value(), Some("1001150"));
//! ```

pub mod config;
pub mod error;
pub mod fixture;
pub mod logging;
pub mod output;
pub mod overlap;
pub mod planner;
pub mod range;
pub mod snapshot;
pub mod watermark;

// Re-export key types at crate root for convenience
pub use config::{Config, ConfigBuilder, OutputFormat};
pub use error::{Error, IdSpace, Result};
pub use fixture::{
    FieldAssignment, FieldKind, FieldState, FixtureBuilder, FixtureData, FormField, ModifyRequest,
};
pub use logging::{init_logger, LogLevel, Logger};
pub use output::OutputFormatter;
pub use overlap::OverlapKind;
pub use planner::{
    AllocationPlan, AllocationPlanner, AllocationPolicy, AllocationRequest, RangeAssignment,
    ValidationCallback,
};
pub use range::{IdentityRange, RangeKind, TrustDomain, Window};
pub use snapshot::{RangeSnapshot, RangeSource, RecordedResponses, StaticSource};
pub use watermark::HighWaterMark;
