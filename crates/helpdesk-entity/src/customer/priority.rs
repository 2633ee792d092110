//! Priority levels and the rules that assign them to customers.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use helpdesk_core::types::PriorityLevelId;

use super::model::Customer;

/// A named priority level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PriorityLevel {
    /// Unique priority level identifier.
    pub id: PriorityLevelId,
    /// Display name (unique).
    pub name: String,
}

/// Maps an agency / email-domain pair to a default priority level.
///
/// An empty field acts as a wildcard. A rule matches when every non-empty
/// field matches the customer, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PriorityLevelRule {
    /// Unique rule identifier.
    pub id: i64,
    /// Agency name to match, or empty.
    pub agency_name: String,
    /// Email domain to match, or empty.
    pub email_domain: String,
    /// Priority assigned on match.
    pub priority_level_id: PriorityLevelId,
}

impl PriorityLevelRule {
    /// Return how specific the match is, or `None` if the rule does not
    /// apply to `customer`. Rules with no criteria never match.
    pub fn specificity(&self, customer: &Customer) -> Option<u8> {
        let mut score = 0;

        let agency = self.agency_name.trim();
        if !agency.is_empty() {
            if !agency.eq_ignore_ascii_case(customer.agency_name.trim()) {
                return None;
            }
            score += 1;
        }

        let domain = normalize_domain(&self.email_domain);
        if !domain.is_empty() {
            if !domain.eq_ignore_ascii_case(normalize_domain(&customer.email_domain)) {
                return None;
            }
            score += 1;
        }

        (score > 0).then_some(score)
    }
}

fn normalize_domain(domain: &str) -> &str {
    domain.trim().trim_start_matches('@')
}
