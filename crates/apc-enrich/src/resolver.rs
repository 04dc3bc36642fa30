//! Per-column overwrite resolution with memoized decisions.

use tracing::debug;

use apc_model::{CellValue, Column, OverwritePolicy};

/// The six possible answers to an overwrite conflict.
///
/// The `Remember` variants memoize the exact old→new pair on the column;
/// the `Always`/`Never` variants flip the column's standing policy. Both
/// kinds make later identical conflicts resolve without another question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteDecision {
    Accept,
    AcceptRemember,
    AcceptAlways,
    Reject,
    RejectRemember,
    RejectNever,
}

/// A conflict as presented to a decision provider.
#[derive(Debug, Clone, Copy)]
pub struct Conflict<'a> {
    /// Human label of the column the conflict is in.
    pub column: &'a str,
    pub old: &'a str,
    pub new: &'a str,
}

/// Boundary for interactive (or policy-driven) conflict decisions.
///
/// Deployments without a terminal supply a fixed-answer provider instead
/// of blocking on input.
pub trait DecisionProvider {
    fn decide(&mut self, conflict: Conflict<'_>) -> OverwriteDecision;
}

/// A provider that gives the same answer to every conflict.
#[derive(Debug, Clone, Copy)]
pub struct FixedDecision(pub OverwriteDecision);

impl DecisionProvider for FixedDecision {
    fn decide(&mut self, _conflict: Conflict<'_>) -> OverwriteDecision {
        self.0
    }
}

/// Resolves value conflicts against per-column overwrite state.
///
/// All mutation of column policy, whitelist and blacklist happens inside
/// [`OverwriteResolver::resolve`]; no other component touches that state.
pub struct OverwriteResolver<P> {
    provider: P,
}

impl<P: DecisionProvider> OverwriteResolver<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Decides whether `new` may replace `old` in `column`.
    ///
    /// The protocol, in order: equal values are a no-op; missing data (NA
    /// or blank) is always filled; a standing Always/Never policy answers
    /// unconditionally; a blacklisted exact pair keeps the old value; a
    /// whitelisted old value accepts the new one (the stored target is a
    /// standing rule and is not re-checked); anything else is put to the
    /// decision provider.
    pub fn resolve(&mut self, column: &mut Column, old: &CellValue, new: &CellValue) -> CellValue {
        if old == new {
            return old.clone();
        }
        if old.is_blank() {
            return new.clone();
        }
        match column.policy {
            OverwritePolicy::Always => return new.clone(),
            OverwritePolicy::Never => return old.clone(),
            OverwritePolicy::Ask => {}
        }
        let old_key = old.as_output_str();
        let new_key = new.as_output_str();
        if column.blacklist.get(old_key).map(String::as_str) == Some(new_key) {
            debug!(column = column.label(), old = old_key, "blacklisted pair, keeping old value");
            return old.clone();
        }
        if column.whitelist.contains_key(old_key) {
            debug!(column = column.label(), old = old_key, "whitelisted value, overwriting");
            return new.clone();
        }
        let decision = self.provider.decide(Conflict {
            column: column.label(),
            old: old_key,
            new: new_key,
        });
        match decision {
            OverwriteDecision::Accept => new.clone(),
            OverwriteDecision::AcceptRemember => {
                column
                    .whitelist
                    .insert(old_key.to_string(), new_key.to_string());
                new.clone()
            }
            OverwriteDecision::AcceptAlways => {
                column.policy = OverwritePolicy::Always;
                new.clone()
            }
            OverwriteDecision::Reject => old.clone(),
            OverwriteDecision::RejectRemember => {
                column
                    .blacklist
                    .insert(old_key.to_string(), new_key.to_string());
                old.clone()
            }
            OverwriteDecision::RejectNever => {
                column.policy = OverwritePolicy::Never;
                old.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apc_model::Requirement;

    /// Provider that records how often it was consulted.
    struct Counting {
        decision: OverwriteDecision,
        calls: usize,
    }

    impl Counting {
        fn new(decision: OverwriteDecision) -> Self {
            Self { decision, calls: 0 }
        }
    }

    impl DecisionProvider for Counting {
        fn decide(&mut self, _conflict: Conflict<'_>) -> OverwriteDecision {
            self.calls += 1;
            self.decision
        }
    }

    fn column() -> Column {
        Column::new("publisher", Requirement::Optional)
    }

    fn text(value: &str) -> CellValue {
        CellValue::Text(value.to_string())
    }

    #[test]
    fn equal_values_do_not_consult_the_provider() {
        let mut resolver = OverwriteResolver::new(Counting::new(OverwriteDecision::Reject));
        let mut column = column();
        let value = text("Springer");
        assert_eq!(resolver.resolve(&mut column, &value, &value), value);
        assert_eq!(resolver.provider.calls, 0);

        let na = CellValue::Na;
        assert_eq!(resolver.resolve(&mut column, &na, &na), na);
        assert_eq!(resolver.provider.calls, 0);
    }

    #[test]
    fn missing_data_is_always_filled() {
        let mut resolver = OverwriteResolver::new(Counting::new(OverwriteDecision::Reject));
        let mut column = column();
        let new = text("Springer");
        assert_eq!(resolver.resolve(&mut column, &CellValue::Na, &new), new);
        assert_eq!(resolver.resolve(&mut column, &text(""), &new), new);
        assert_eq!(resolver.resolve(&mut column, &text("   "), &new), new);
        assert_eq!(resolver.provider.calls, 0);
    }

    #[test]
    fn standing_policies_bypass_the_provider() {
        let mut resolver = OverwriteResolver::new(Counting::new(OverwriteDecision::Reject));
        let mut column = column();
        column.policy = OverwritePolicy::Always;
        assert_eq!(
            resolver.resolve(&mut column, &text("old"), &text("new")),
            text("new")
        );
        column.policy = OverwritePolicy::Never;
        assert_eq!(
            resolver.resolve(&mut column, &text("old"), &text("new")),
            text("old")
        );
        assert_eq!(resolver.provider.calls, 0);
    }

    #[test]
    fn remembered_acceptance_is_a_standing_rule_for_the_old_value() {
        let mut resolver = OverwriteResolver::new(Counting::new(OverwriteDecision::AcceptRemember));
        let mut column = column();
        assert_eq!(
            resolver.resolve(&mut column, &text("old"), &text("new")),
            text("new")
        );
        assert_eq!(resolver.provider.calls, 1);
        // Same old value with a different new value: whitelist still wins,
        // the stored target is not re-checked.
        assert_eq!(
            resolver.resolve(&mut column, &text("old"), &text("other")),
            text("other")
        );
        assert_eq!(resolver.provider.calls, 1);
    }

    #[test]
    fn remembered_rejection_only_blocks_the_exact_pair() {
        let mut resolver = OverwriteResolver::new(Counting::new(OverwriteDecision::RejectRemember));
        let mut column = column();
        assert_eq!(
            resolver.resolve(&mut column, &text("old"), &text("new")),
            text("old")
        );
        assert_eq!(resolver.provider.calls, 1);
        // Exact pair repeats: answered from the blacklist.
        assert_eq!(
            resolver.resolve(&mut column, &text("old"), &text("new")),
            text("old")
        );
        assert_eq!(resolver.provider.calls, 1);
        // Different new value for the same old one: asked again.
        resolver.resolve(&mut column, &text("old"), &text("other"));
        assert_eq!(resolver.provider.calls, 2);
    }

    #[test]
    fn always_and_never_decisions_flip_the_policy() {
        let mut resolver = OverwriteResolver::new(Counting::new(OverwriteDecision::AcceptAlways));
        let mut col = column();
        resolver.resolve(&mut col, &text("a"), &text("b"));
        assert_eq!(col.policy, OverwritePolicy::Always);
        assert_eq!(
            resolver.resolve(&mut col, &text("x"), &text("y")),
            text("y")
        );
        assert_eq!(resolver.provider.calls, 1);

        let mut resolver = OverwriteResolver::new(Counting::new(OverwriteDecision::RejectNever));
        let mut col = column();
        resolver.resolve(&mut col, &text("a"), &text("b"));
        assert_eq!(col.policy, OverwritePolicy::Never);
        assert_eq!(
            resolver.resolve(&mut col, &text("x"), &text("y")),
            text("x")
        );
        assert_eq!(resolver.provider.calls, 1);
    }

    #[test]
    fn na_replacement_can_be_put_to_the_provider() {
        // A real value being replaced by NA is a genuine conflict.
        let mut resolver = OverwriteResolver::new(Counting::new(OverwriteDecision::Accept));
        let mut column = column();
        assert_eq!(
            resolver.resolve(&mut column, &text("Springer"), &CellValue::Na),
            CellValue::Na
        );
        assert_eq!(resolver.provider.calls, 1);
    }
}
