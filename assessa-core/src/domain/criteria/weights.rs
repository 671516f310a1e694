// assessa-core/src/domain/criteria/weights.rs

use crate::domain::criteria::{Domain, DomainWeight};
use std::collections::HashMap;

/// Total number of points distributed across a framework's domains.
pub const WEIGHT_BUDGET: u32 = 100;

/// Splits the budget equally across `domains`.
///
/// Every domain gets `floor(100 / n)`; the first one also absorbs the remainder so the
/// total is exactly 100. Returns an empty list for an empty domain set.
pub fn distribute_equal_weights(domains: &[Domain]) -> Vec<DomainWeight> {
    let ids: Vec<&str> = domains.iter().map(|d| d.id.as_str()).collect();
    distribute_over_ids(&ids)
}

pub(crate) fn distribute_over_ids(ids: &[&str]) -> Vec<DomainWeight> {
    let Ok(n) = u32::try_from(ids.len()) else {
        return Vec::new();
    };
    if n == 0 {
        return Vec::new();
    }

    let base = WEIGHT_BUDGET / n;
    let remainder = WEIGHT_BUDGET - base * n;

    ids.iter()
        .enumerate()
        .map(|(i, id)| {
            let weight = if i == 0 { base + remainder } else { base };
            DomainWeight::new(*id, f64::from(weight))
        })
        .collect()
}

/// Aligns previously saved weights with the live domain list.
///
/// Output order follows `domains`. Domains without a saved weight enter at 0 and
/// weights of domains that disappeared are dropped.
pub fn reconcile_weights(saved: &[DomainWeight], domains: &[Domain]) -> Vec<DomainWeight> {
    let by_id: HashMap<&str, f64> = saved
        .iter()
        .map(|w| (w.domain_id.as_str(), w.weight))
        .collect();

    domains
        .iter()
        .map(|d| DomainWeight::new(d.id.clone(), by_id.get(d.id.as_str()).copied().unwrap_or(0.0)))
        .collect()
}

pub fn total_weight(weights: &[DomainWeight]) -> f64 {
    weights.iter().map(|w| w.weight).sum()
}
