//! Default priority resolution from customer rules.

use tracing::debug;

use helpdesk_core::types::PriorityLevelId;
use helpdesk_entity::customer::{Customer, PriorityLevelRule};

/// Picks a priority level for a new ticket.
///
/// The most specific matching rule wins (agency and domain over either one
/// alone). Equally specific rules are ordered by ascending rule id. With no
/// customer or no matching rule the configured default applies.
#[derive(Debug, Clone, Copy)]
pub struct PriorityResolver {
    default: PriorityLevelId,
}

impl PriorityResolver {
    /// Creates a resolver falling back to `default`.
    pub fn new(default: PriorityLevelId) -> Self {
        Self { default }
    }

    /// Resolve the priority for `customer` under `rules`.
    pub fn resolve(
        &self,
        customer: Option<&Customer>,
        rules: &[PriorityLevelRule],
    ) -> PriorityLevelId {
        let Some(customer) = customer else {
            return self.default;
        };

        let best = rules
            .iter()
            .filter_map(|rule| rule.specificity(customer).map(|score| (score, rule)))
            .max_by(|(a, ra), (b, rb)| a.cmp(b).then_with(|| rb.id.cmp(&ra.id)));

        match best {
            Some((score, rule)) => {
                debug!(
                    customer_id = %customer.id,
                    rule_id = rule.id,
                    specificity = score,
                    "Matched priority rule"
                );
                rule.priority_level_id
            }
            None => self.default,
        }
    }
}
