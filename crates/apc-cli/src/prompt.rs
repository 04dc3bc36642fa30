//! Conflict decision providers for the CLI.

use std::io::{self, BufRead, Write};

use apc_enrich::{Conflict, DecisionProvider, FixedDecision, OverwriteDecision};

/// Interactive six-option conflict menu on the terminal.
///
/// Re-prompts until a valid selection is made. Deployments without a
/// terminal should use [`PolicyDecisions::Fixed`] instead, since this
/// blocks on stdin.
#[derive(Debug, Default)]
pub struct InteractivePrompt;

impl InteractivePrompt {
    fn menu(conflict: &Conflict<'_>) -> String {
        format!(
            "Conflict: existing non-NA value '{old}' in column '{column}' is to be \
             replaced by new value '{new}'.\nAllow overwrite?\n\
             1) Yes\n\
             2) Yes, and always replace '{old}' by '{new}' in this column\n\
             3) Yes, and always overwrite in this column\n\
             4) No\n\
             5) No, and never replace '{old}' by '{new}' in this column\n\
             6) No, and never overwrite in this column\n> ",
            old = conflict.old,
            column = conflict.column,
            new = conflict.new,
        )
    }

    fn parse(answer: &str) -> Option<OverwriteDecision> {
        match answer.trim() {
            "1" => Some(OverwriteDecision::Accept),
            "2" => Some(OverwriteDecision::AcceptRemember),
            "3" => Some(OverwriteDecision::AcceptAlways),
            "4" => Some(OverwriteDecision::Reject),
            "5" => Some(OverwriteDecision::RejectRemember),
            "6" => Some(OverwriteDecision::RejectNever),
            _ => None,
        }
    }
}

impl DecisionProvider for InteractivePrompt {
    fn decide(&mut self, conflict: Conflict<'_>) -> OverwriteDecision {
        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();
        eprint!("{}", Self::menu(&conflict));
        let _ = io::stderr().flush();
        loop {
            match lines.next() {
                Some(Ok(answer)) => {
                    if let Some(decision) = Self::parse(&answer) {
                        return decision;
                    }
                    eprint!("Please select a number between 1 and 6: ");
                    let _ = io::stderr().flush();
                }
                // Input closed underneath us: keep the existing value.
                Some(Err(_)) | None => return OverwriteDecision::Reject,
            }
        }
    }
}

/// The decision provider chosen by the `--on-conflict` flag.
pub enum PolicyDecisions {
    Interactive(InteractivePrompt),
    Fixed(FixedDecision),
}

impl PolicyDecisions {
    pub fn interactive() -> Self {
        PolicyDecisions::Interactive(InteractivePrompt)
    }

    /// Keep the existing value on every conflict.
    pub fn keep() -> Self {
        PolicyDecisions::Fixed(FixedDecision(OverwriteDecision::Reject))
    }

    /// Take the retrieved value on every conflict.
    pub fn overwrite() -> Self {
        PolicyDecisions::Fixed(FixedDecision(OverwriteDecision::Accept))
    }
}

impl DecisionProvider for PolicyDecisions {
    fn decide(&mut self, conflict: Conflict<'_>) -> OverwriteDecision {
        match self {
            PolicyDecisions::Interactive(prompt) => prompt.decide(conflict),
            PolicyDecisions::Fixed(fixed) => fixed.decide(conflict),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_selections_map_to_decisions() {
        assert_eq!(InteractivePrompt::parse("1"), Some(OverwriteDecision::Accept));
        assert_eq!(InteractivePrompt::parse(" 3 "), Some(OverwriteDecision::AcceptAlways));
        assert_eq!(InteractivePrompt::parse("6"), Some(OverwriteDecision::RejectNever));
        assert_eq!(InteractivePrompt::parse("7"), None);
        assert_eq!(InteractivePrompt::parse("yes"), None);
    }

    #[test]
    fn fixed_policies_answer_without_input() {
        let conflict = Conflict {
            column: "publisher",
            old: "a",
            new: "b",
        };
        assert_eq!(
            PolicyDecisions::keep().decide(conflict),
            OverwriteDecision::Reject
        );
        assert_eq!(
            PolicyDecisions::overwrite().decide(conflict),
            OverwriteDecision::Accept
        );
    }
}
