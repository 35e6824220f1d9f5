//! Routing rules.
//!
//! Rule order is significant: it is the tie-break order when two categories
//! reach the same score.

use shared_envelope::RouteCategory;

/// One routing target: its keyword table and weight.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    /// The category this rule scores for.
    pub category: RouteCategory,
    /// Keywords matched case-insensitively as substrings.
    pub keywords: Vec<String>,
    /// Multiplier applied to the distinct-hit count.
    pub weight: f64,
}

impl CategoryRule {
    /// Build a rule from a static keyword table.
    #[must_use]
    pub fn new(category: RouteCategory, keywords: &[&str], weight: f64) -> Self {
        Self {
            category,
            keywords: keywords.iter().map(ToString::to_string).collect(),
            weight,
        }
    }
}

/// The full ordered rule set for the Router stage.
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Rules in declared order; earlier rules win score ties.
    pub rules: Vec<CategoryRule>,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            rules: vec![
                CategoryRule::new(
                    RouteCategory::Finance,
                    &[
                        "billing",
                        "invoice",
                        "payment",
                        "refund",
                        "charge",
                        "subscription",
                        "price",
                        "cost",
                        "fee",
                        "credit card",
                        "bank",
                        "transaction",
                        "receipt",
                        "balance",
                        "overcharged",
                    ],
                    1.0,
                ),
                CategoryRule::new(
                    RouteCategory::Support,
                    &[
                        "help",
                        "issue",
                        "problem",
                        "error",
                        "bug",
                        "broken",
                        "not working",
                        "troubleshoot",
                        "fix",
                        "support",
                        "assistance",
                        "technical",
                        "crash",
                        "freeze",
                    ],
                    1.0,
                ),
                CategoryRule::new(
                    RouteCategory::Website,
                    &[
                        "login",
                        "password",
                        "access",
                        "account",
                        "sign in",
                        "reset",
                        "locked out",
                        "username",
                        "authentication",
                        "forgot password",
                        "cannot log in",
                        "registration",
                    ],
                    1.0,
                ),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rule_order() {
        let config = RoutingConfig::default();
        let order: Vec<RouteCategory> = config.rules.iter().map(|rule| rule.category).collect();
        assert_eq!(
            order,
            vec![
                RouteCategory::Finance,
                RouteCategory::Support,
                RouteCategory::Website
            ]
        );
    }

    #[test]
    fn test_default_weights_are_unit() {
        let config = RoutingConfig::default();
        assert!(config
            .rules
            .iter()
            .all(|rule| (rule.weight - 1.0).abs() < f64::EPSILON));
    }
}
