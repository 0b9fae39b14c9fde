//! Plan command implementation.
//!
//! Reads recorded range and trust responses, plans one or more ranges above
//! the existing ones and prints their add/modify fixtures.

use crate::error::CliError;
use crate::utils::{self, GlobalOptions};
use clap::Args;
use idrange::{
    AllocationPlanner, AllocationRequest, FixtureBuilder, FixtureData, ModifyRequest,
    RangeSnapshot,
};
use std::path::PathBuf;

/// Most ranges one invocation will plan.
pub const MAX_PLAN_COUNT: usize = 10_000;

/// Plan new ranges and print their fixtures.
#[derive(Args)]
pub struct PlanCommand {
    /// Recorded `idrange_find` response
    #[arg(long, value_name = "FILE")]
    pub ranges: PathBuf,

    /// Recorded `trust_find` response
    #[arg(long, value_name = "FILE")]
    pub trusts: Option<PathBuf>,

    /// Number of ranges to plan (at most 10000)
    #[arg(long, default_value_t = 1, value_name = "N")]
    pub count: usize,

    /// Range size (defaults to the configured default size)
    #[arg(long, value_name = "N")]
    pub size: Option<u64>,

    /// Plan trust-backed ranges instead of local ones
    #[arg(long)]
    pub trust_backed: bool,

    /// Trusted domain (defaults to the first recorded trust)
    #[arg(long, value_name = "NAME")]
    pub trust_domain: Option<String>,

    /// Range name (only with --count 1)
    #[arg(long, value_name = "NAME")]
    pub name: Option<String>,

    /// Force the base ID
    #[arg(long, value_name = "N")]
    pub base_id: Option<u64>,

    /// Force the primary RID
    #[arg(long, value_name = "N")]
    pub base_rid: Option<u64>,

    /// Force the secondary RID
    #[arg(long, value_name = "N")]
    pub secondary_base_rid: Option<u64>,

    /// Size submitted by the modify step (defaults to size + 1)
    #[arg(long, value_name = "N")]
    pub modify_size: Option<u64>,
}

impl PlanCommand {
    /// Execute the plan command.
    pub fn execute(self, global: &GlobalOptions) -> Result<(), CliError> {
        self.validate_args()?;

        let config = utils::load_configuration(global)?;
        let snapshot = utils::load_snapshot(&self.ranges, self.trusts.as_deref())?;
        let request = self.build_request(&snapshot)?;

        let mut planner = AllocationPlanner::from_snapshot(&snapshot, config.policy());
        let mut fixtures: Vec<FixtureData> = Vec::new();

        for _ in 0..self.count {
            let plan = planner.plan(&request)?;
            let mut fixture = FixtureBuilder::fixture(&plan);
            if let Some(size) = self.modify_size {
                fixture = fixture.with_modify(&ModifyRequest::new().with_size(size));
            }
            if plan.has_self_overlap() {
                log::warn!(
                    "{}: primary and secondary RID windows overlap",
                    plan.name()
                );
            }
            fixtures.push(fixture);
        }

        let output = utils::formatter(global, &config).format_fixtures(&fixtures)?;
        utils::print_output(&output);

        log::info!(
            "planned {} range(s); next base ID above {}",
            fixtures.len(),
            planner.mark().max_base_id
        );

        Ok(())
    }

    fn validate_args(&self) -> Result<(), CliError> {
        if self.count == 0 {
            return Err(CliError::InvalidArguments(
                "--count must be at least 1".to_string(),
            ));
        }
        if self.count > MAX_PLAN_COUNT {
            return Err(CliError::InvalidArguments(format!(
                "--count must be at most {MAX_PLAN_COUNT}"
            )));
        }
        if self.name.is_some() && self.count > 1 {
            return Err(CliError::InvalidArguments(
                "--name can only be used when planning a single range".to_string(),
            ));
        }
        Ok(())
    }

    /// Translate the flags into one request, repeated `count` times.
    fn build_request(&self, snapshot: &RangeSnapshot) -> Result<AllocationRequest, CliError> {
        let mut request = if self.trust_backed {
            let domain = match &self.trust_domain {
                Some(domain) => domain.clone(),
                None => snapshot
                    .first_trust_domain()
                    .map(|trust| trust.name().to_string())
                    .ok_or_else(|| {
                        CliError::InvalidArguments(
                            "no trust domain recorded; pass --trusts or --trust-domain"
                                .to_string(),
                        )
                    })?,
            };
            AllocationRequest::trust_backed(domain)
        } else {
            let mut local = AllocationRequest::local();
            // The planner rejects this combination
            if let Some(domain) = &self.trust_domain {
                local = local.with_trust_domain(domain.clone());
            }
            local
        };

        request.name.clone_from(&self.name);
        request.size = self.size;
        request.base_id = self.base_id;
        request.base_rid = self.base_rid;
        request.secondary_base_rid = self.secondary_base_rid;

        Ok(request)
    }
}
