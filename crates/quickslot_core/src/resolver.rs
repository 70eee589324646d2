//! Selection policy resolution
//!
//! Turns a released slot into concrete `(command, candidate)` attempts.
//! Applicability and execution live behind [`ActionSink`], so the policy
//! logic only decides order and stopping.

use crate::command::{ActionKind, Candidate, Command, SelectionPolicy};
use crate::slot::Quickslot;
use quickslot_catalog::FormId;
use rand::Rng;

/// Executes candidates on behalf of the resolver
pub trait ActionSink {
    /// Test applicability and, if it passes, perform the action.
    /// Returns true if the action was performed.
    fn try_execute(&mut self, command: &Command, candidate: Candidate) -> bool;

    /// Whether the candidate is currently equipped
    fn is_equipped(&self, id: FormId) -> bool;
}

/// Resolve a released slot against its policy.
///
/// Returns how many actions were performed; zero means nothing applied.
pub fn resolve<R: Rng>(slot: &Quickslot, sink: &mut dyn ActionSink, rng: &mut R) -> usize {
    match slot.policy {
        SelectionPolicy::PerHand => [&slot.primary, &slot.secondary]
            .into_iter()
            .filter(|c| c.is_bound())
            .filter(|c| first_success(c, &c.candidates(), sink, false))
            .count(),
        SelectionPolicy::First => usize::from(
            slot.commands
                .iter()
                .filter(|c| c.is_bound())
                .any(|c| first_success(c, &c.candidates(), sink, false)),
        ),
        SelectionPolicy::Toggle => usize::from(
            slot.commands
                .iter()
                .filter(|c| c.is_bound())
                .any(|c| first_success(c, &c.candidates(), sink, true)),
        ),
        SelectionPolicy::Random => usize::from(resolve_random(&slot.commands, sink, rng)),
        SelectionPolicy::All => resolve_all(&slot.commands, sink),
    }
}

/// Try candidates in order, stopping at the first performed action
fn first_success(command: &Command, candidates: &[Candidate], sink: &mut dyn ActionSink, skip_equipped: bool) -> bool {
    candidates.iter().any(|&candidate| {
        if skip_equipped {
            if let Some(id) = candidate {
                if sink.is_equipped(id) {
                    return false;
                }
            }
        }
        sink.try_execute(command, candidate)
    })
}

/// Random pick without replacement over commands, then over each command's candidates
fn resolve_random<R: Rng>(commands: &[Command], sink: &mut dyn ActionSink, rng: &mut R) -> bool {
    let mut remaining_commands: Vec<usize> = (0..commands.len()).collect();

    while !remaining_commands.is_empty() {
        let pick = rng.gen_range(0..remaining_commands.len());
        let command = &commands[remaining_commands.swap_remove(pick)];
        if !command.is_bound() {
            continue;
        }

        let candidates = command.candidates();
        let mut remaining_candidates: Vec<usize> = (0..candidates.len()).collect();

        while !remaining_candidates.is_empty() {
            let pick = rng.gen_range(0..remaining_candidates.len());
            let candidate = candidates[remaining_candidates.swap_remove(pick)];
            if sink.try_execute(command, candidate) {
                return true;
            }
        }
    }

    false
}

/// Every command, each drawing from the first command's candidate list
fn resolve_all(commands: &[Command], sink: &mut dyn ActionSink) -> usize {
    let Some(lead) = commands.first() else {
        return 0;
    };
    let shared = lead.candidates();

    commands
        .iter()
        .filter(|c| c.is_bound())
        .filter(|c| {
            if c.action == ActionKind::ConsoleCommand {
                sink.try_execute(c, None)
            } else {
                first_success(c, &shared, sink, false)
            }
        })
        .count()
}
