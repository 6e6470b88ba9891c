//! Model tier routing
//!
//! Maps a complexity score and the current budget state to a model tier.
//! The router is pure and is only consulted on a full cache miss.

use serde::{Deserialize, Serialize};

use crate::domain::llm::ModelTier;

/// Configuration for the model router
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Scores at or above this threshold route to the expensive tier
    #[serde(default = "default_complexity_threshold")]
    pub complexity_threshold: f32,
}

fn default_complexity_threshold() -> f32 {
    0.7
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            complexity_threshold: default_complexity_threshold(),
        }
    }
}

/// Whether the spending budget still has headroom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetState {
    Available,
    Exhausted,
}

/// Outcome of a routing decision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDecision {
    pub tier: ModelTier,
    /// Stable human-readable reason, for observability only
    pub reason: &'static str,
}

/// Routes queries to a model tier by complexity score
#[derive(Debug, Clone)]
pub struct ModelRouter {
    config: RouterConfig,
}

impl ModelRouter {
    pub fn new(config: RouterConfig) -> Self {
        Self { config }
    }

    /// Pick a tier. An exhausted budget forces the cheap tier regardless of
    /// score.
    pub fn route(&self, score: f32, budget: BudgetState) -> RouteDecision {
        if budget == BudgetState::Exhausted {
            return RouteDecision {
                tier: ModelTier::Cheap,
                reason: "budget-forced",
            };
        }

        if score >= self.config.complexity_threshold {
            RouteDecision {
                tier: ModelTier::Expensive,
                reason: "complexity-above-threshold",
            }
        } else {
            RouteDecision {
                tier: ModelTier::Cheap,
                reason: "complexity-below-threshold",
            }
        }
    }

    /// The tier a score would select with budget headroom.
    ///
    /// Used to pick the cache partition before routing happens.
    pub fn candidate_tier(&self, score: f32) -> ModelTier {
        if score >= self.config.complexity_threshold {
            ModelTier::Expensive
        } else {
            ModelTier::Cheap
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> ModelRouter {
        ModelRouter::new(RouterConfig::default())
    }

    #[test]
    fn test_below_threshold_routes_cheap() {
        let decision = router().route(0.69, BudgetState::Available);

        assert_eq!(decision.tier, ModelTier::Cheap);
        assert_eq!(decision.reason, "complexity-below-threshold");
    }

    #[test]
    fn test_at_threshold_routes_expensive() {
        let decision = router().route(0.70, BudgetState::Available);

        assert_eq!(decision.tier, ModelTier::Expensive);
        assert_eq!(decision.reason, "complexity-above-threshold");
    }

    #[test]
    fn test_exhausted_budget_forces_cheap() {
        let decision = router().route(0.95, BudgetState::Exhausted);

        assert_eq!(decision.tier, ModelTier::Cheap);
        assert_eq!(decision.reason, "budget-forced");
    }

    #[test]
    fn test_candidate_tier_matches_route_with_budget() {
        let router = router();

        for score in [0.0, 0.3, 0.69, 0.7, 0.71, 1.0] {
            assert_eq!(
                router.candidate_tier(score),
                router.route(score, BudgetState::Available).tier
            );
        }
    }

    #[test]
    fn test_custom_threshold() {
        let router = ModelRouter::new(RouterConfig {
            complexity_threshold: 0.5,
        });

        assert_eq!(
            router.route(0.5, BudgetState::Available).tier,
            ModelTier::Expensive
        );
    }
}
