//! Rule engine for multi-criteria selection.
//!
//! Applies rules in sequence, consulting the next rule only on ties.
//! When every rule ties, the process that came first in the caller's
//! input wins, so the outcome never depends on ID spelling.

use std::cmp::Ordering;
use std::sync::Arc;

use super::DispatchingRule;
use crate::models::Process;

/// A composable rule chain for picking the next process.
///
/// # Example
/// ```
/// use cpu_sched::dispatching::{rules, RuleEngine};
/// use cpu_sched::models::{ProcessRegistry, ProcessSpec};
///
/// let registry = ProcessRegistry::register(&[
///     ProcessSpec::new("long", 7, 0),
///     ProcessSpec::new("short", 1, 0),
/// ]).unwrap();
/// let engine = RuleEngine::new().with_rule(rules::ShortestBurst);
/// assert_eq!(engine.select_best(registry.snapshot(), &[0, 1]), Some(1));
/// ```
#[derive(Clone, Default)]
pub struct RuleEngine {
    rules: Vec<Arc<dyn DispatchingRule>>,
}

impl RuleEngine {
    /// Creates an empty rule engine. With no rules it orders by input index.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Adds a primary rule.
    pub fn with_rule<R: DispatchingRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a rule consulted only when the earlier rules tie.
    ///
    /// Rules are always applied in insertion order; this is an alias of
    /// [`RuleEngine::with_rule`] that reads better at call sites.
    pub fn with_tie_breaker<R: DispatchingRule + 'static>(self, rule: R) -> Self {
        self.with_rule(rule)
    }

    /// Names of the configured rules, in evaluation order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Sorts all processes, best first.
    ///
    /// Returns indices into `processes`.
    pub fn sort_indices(&self, processes: &[Process]) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..processes.len()).collect();
        indices.sort_by(|&a, &b| self.compare(&processes[a], &processes[b]));
        indices
    }

    /// Picks the best process among `candidates` (indices into `processes`).
    pub fn select_best(&self, processes: &[Process], candidates: &[usize]) -> Option<usize> {
        candidates
            .iter()
            .copied()
            .min_by(|&a, &b| self.compare(&processes[a], &processes[b]))
    }

    /// Total order over processes: rules in sequence, then input index.
    pub fn compare(&self, a: &Process, b: &Process) -> Ordering {
        for rule in &self.rules {
            match rule.evaluate(a).cmp(&rule.evaluate(b)) {
                Ordering::Equal => continue,
                decided => return decided,
            }
        }
        a.index.cmp(&b.index)
    }
}

impl std::fmt::Debug for RuleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleEngine")
            .field("rules", &self.rule_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PriorityOrder;
    use crate::dispatching::rules;
    use crate::models::{ProcessRegistry, ProcessSpec};

    fn registry(specs: &[ProcessSpec]) -> ProcessRegistry {
        ProcessRegistry::register(specs).unwrap()
    }

    #[test]
    fn test_sjf_ordering() {
        let r = registry(&[
            ProcessSpec::new("long", 5, 0),
            ProcessSpec::new("short", 1, 0),
            ProcessSpec::new("medium", 3, 0),
        ]);
        let engine = RuleEngine::new().with_rule(rules::ShortestBurst);
        let order = engine.sort_indices(r.snapshot());
        let ids: Vec<&str> = order.iter().map(|&i| r[i].id.as_str()).collect();
        assert_eq!(ids, vec!["short", "medium", "long"]);
    }

    #[test]
    fn test_tie_breaker_chain() {
        let r = registry(&[
            ProcessSpec::new("late", 2, 3),
            ProcessSpec::new("early", 2, 1),
        ]);
        let engine = RuleEngine::new()
            .with_rule(rules::ShortestBurst)
            .with_tie_breaker(rules::ArrivalTime);
        // Equal bursts → earlier arrival wins
        assert_eq!(engine.select_best(r.snapshot(), &[0, 1]), Some(1));
    }

    #[test]
    fn test_input_order_is_final_tie_breaker() {
        // "B" before "A" in input; identical keys must keep input order,
        // never fall back to ID comparison.
        let r = registry(&[ProcessSpec::new("B", 2, 0), ProcessSpec::new("A", 2, 0)]);
        let engine = RuleEngine::new()
            .with_rule(rules::ShortestBurst)
            .with_tie_breaker(rules::ArrivalTime);
        assert_eq!(engine.sort_indices(r.snapshot()), vec![0, 1]);
        assert_eq!(engine.select_best(r.snapshot(), &[1, 0]), Some(0));
    }

    #[test]
    fn test_priority_then_arrival() {
        let r = registry(&[
            ProcessSpec::new("A", 5, 2).with_priority(1),
            ProcessSpec::new("B", 3, 0).with_priority(1),
            ProcessSpec::new("C", 1, 0).with_priority(4),
        ]);
        let engine = RuleEngine::new()
            .with_rule(rules::Priority::new(PriorityOrder::LowerFirst))
            .with_tie_breaker(rules::ArrivalTime);
        assert_eq!(engine.sort_indices(r.snapshot()), vec![1, 0, 2]);
    }

    #[test]
    fn test_empty_candidates() {
        let r = registry(&[ProcessSpec::new("A", 1, 0)]);
        let engine = RuleEngine::new().with_rule(rules::ShortestBurst);
        assert!(engine.select_best(r.snapshot(), &[]).is_none());
        assert!(engine.sort_indices(&[]).is_empty());
    }

    #[test]
    fn test_rule_names_in_order() {
        let engine = RuleEngine::new()
            .with_rule(rules::ShortestBurst)
            .with_rule(rules::ArrivalTime);
        assert_eq!(engine.rule_names(), vec!["SJF", "FCFS"]);
    }

    #[test]
    fn test_no_rules_orders_by_input() {
        let r = registry(&[ProcessSpec::new("X", 9, 9), ProcessSpec::new("Y", 1, 0)]);
        assert_eq!(RuleEngine::new().sort_indices(r.snapshot()), vec![0, 1]);
    }
}
