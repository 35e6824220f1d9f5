//! Weighted keyword scoring.

use std::collections::BTreeMap;

use shared_envelope::{RouteCategory, RoutingDecision};

use crate::config::RoutingConfig;

/// Score detail for one category.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryScore {
    /// Weighted score: distinct hits x weight.
    pub score: f64,
    /// Distinct configured keywords that occurred.
    pub matches: usize,
}

/// Weighted keyword-matching classifier.
pub struct RoutingScorer {
    config: RoutingConfig,
}

impl RoutingScorer {
    /// Build a scorer from an immutable rule set.
    #[must_use]
    pub fn new(config: RoutingConfig) -> Self {
        Self { config }
    }

    /// Score every category, in declared rule order.
    #[must_use]
    pub fn score(&self, text: &str) -> Vec<(RouteCategory, CategoryScore)> {
        let text_lower = text.to_lowercase();
        self.config
            .rules
            .iter()
            .map(|rule| {
                let matches = rule
                    .keywords
                    .iter()
                    .filter(|keyword| text_lower.contains(keyword.as_str()))
                    .count();
                let score = matches as f64 * rule.weight;
                (rule.category, CategoryScore { score, matches })
            })
            .collect()
    }

    /// Classify `text`: strictly highest score wins, first declared
    /// category wins ties, zero maximum routes to `unknown`.
    #[must_use]
    pub fn decide(&self, text: &str) -> RoutingDecision {
        let scores = self.score(text);

        let mut best_category = RouteCategory::Unknown;
        let mut best = CategoryScore {
            score: 0.0,
            matches: 0,
        };
        for (category, score) in &scores {
            if score.score > best.score {
                best_category = *category;
                best = *score;
            }
        }

        let all_scores: BTreeMap<String, f64> = scores
            .iter()
            .map(|(category, score)| (category.as_str().to_string(), score.score))
            .collect();

        if best.score == 0.0 {
            return RoutingDecision {
                category: RouteCategory::Unknown,
                confidence_score: 0.0,
                reason: "No keywords matched".to_string(),
                all_scores,
            };
        }

        RoutingDecision {
            category: best_category,
            confidence_score: best.score,
            reason: format!("Matched {} keywords", best.matches),
            all_scores,
        }
    }
}

impl Default for RoutingScorer {
    fn default() -> Self {
        Self::new(RoutingConfig::default())
    }
}
