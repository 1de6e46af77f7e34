use dealgate_core::{AppError, AppResult};
use dealgate_domain::{AccessPlan, PlanDuration};

/// Configuration deciding which pass durations may be purchased.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanPolicy {
    allowed: Option<Vec<PlanDuration>>,
}

impl PlanPolicy {
    /// Accepts any positive duration.
    #[must_use]
    pub fn any_positive() -> Self {
        Self { allowed: None }
    }

    /// Accepts only the given durations.
    ///
    /// An empty set falls back to [`PlanPolicy::any_positive`].
    #[must_use]
    pub fn tiers(durations: impl IntoIterator<Item = PlanDuration>) -> Self {
        let mut allowed: Vec<PlanDuration> = durations.into_iter().collect();
        allowed.sort_unstable();
        allowed.dedup();

        if allowed.is_empty() {
            return Self::any_positive();
        }

        Self {
            allowed: Some(allowed),
        }
    }

    /// The 3, 7 and 14 day tiers.
    #[must_use]
    pub fn standard() -> Self {
        Self::tiers(
            AccessPlan::standard_tiers()
                .iter()
                .map(AccessPlan::duration),
        )
    }

    /// Parses a comma separated day list such as `"3,7,14"`.
    pub fn parse(value: &str) -> AppResult<Self> {
        let durations = value
            .split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(|part| {
                part.parse::<i64>()
                    .map_err(|error| {
                        AppError::Validation(format!("invalid plan day count '{part}': {error}"))
                    })
                    .and_then(PlanDuration::new)
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self::tiers(durations))
    }

    /// Validates a requested duration against the policy.
    pub fn validate(&self, duration_days: i64) -> AppResult<PlanDuration> {
        let duration = PlanDuration::new(duration_days)?;

        match &self.allowed {
            Some(allowed) if !allowed.contains(&duration) => Err(AppError::InvalidPlan(format!(
                "a {duration_days}-day pass is not offered"
            ))),
            _ => Ok(duration),
        }
    }

    /// Plans to advertise. An unrestricted policy advertises the standard tiers.
    #[must_use]
    pub fn offered_plans(&self) -> Vec<AccessPlan> {
        match &self.allowed {
            Some(allowed) => allowed.iter().copied().map(AccessPlan::new).collect(),
            None => AccessPlan::standard_tiers(),
        }
    }
}

impl Default for PlanPolicy {
    fn default() -> Self {
        Self::standard()
    }
}
