//! Play queue construction
//!
//! Turns an ordered track list into the clear / enqueue / play sequence
//! sent to the player, and runs that sequence one command at a time.

use super::client::Player;
use super::command::PlayerCommand;
use crate::error::ProcessError;
use crate::model::Entry;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Ordered commands for one playback request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueuePlan {
    commands: Vec<PlayerCommand>,
    tracks: usize,
}

impl QueuePlan {
    /// Replace the queue with `tracks` and start playing
    pub fn play(tracks: &[Entry]) -> Self {
        if tracks.is_empty() {
            return Self::default();
        }

        let mut commands = Vec::with_capacity(tracks.len() + 2);
        commands.push(PlayerCommand::ClearQueue);
        commands.extend(enqueue_all(tracks));
        commands.push(PlayerCommand::Play);

        Self {
            commands,
            tracks: tracks.len(),
        }
    }

    /// Like [`QueuePlan::play`] with the tracks in shuffled order
    ///
    /// The same seed always gives the same order; None seeds from the clock.
    pub fn play_shuffled(tracks: &[Entry], seed: Option<u64>) -> Self {
        let mut shuffled = tracks.to_vec();
        shuffle(&mut shuffled, seed);
        Self::play(&shuffled)
    }

    /// Append `tracks` to the queue without clearing it or starting playback
    pub fn enqueue(tracks: &[Entry]) -> Self {
        Self {
            commands: enqueue_all(tracks).collect(),
            tracks: tracks.len(),
        }
    }

    pub fn commands(&self) -> &[PlayerCommand] {
        &self.commands
    }

    /// Number of tracks the plan enqueues
    pub fn track_count(&self) -> usize {
        self.tracks
    }

    /// True when there were no tracks to queue
    pub fn is_empty(&self) -> bool {
        self.tracks == 0
    }
}

fn enqueue_all(tracks: &[Entry]) -> impl Iterator<Item = PlayerCommand> + '_ {
    tracks.iter().map(|t| PlayerCommand::Enqueue(t.location.clone()))
}

static SHUFFLE_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Shuffle `tracks` in place
pub fn shuffle(tracks: &mut [Entry], seed: Option<u64>) {
    let seed = seed.unwrap_or_else(clock_seed);
    let mut rng = StdRng::seed_from_u64(seed);
    tracks.shuffle(&mut rng);
}

/// Wall-clock time plus a counter so back-to-back calls differ
fn clock_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    nanos.wrapping_add(SHUFFLE_COUNTER.fetch_add(1, Ordering::Relaxed))
}

/// Where a queue run has got to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QueueState {
    Idle,
    Cleared,
    Enqueuing { remaining: usize },
    Playing,
}

impl QueueState {
    /// State after `command` succeeded, given `pending` enqueues still to send
    fn after(self, command: &PlayerCommand, pending: usize) -> Self {
        match command {
            PlayerCommand::ClearQueue => QueueState::Cleared,
            PlayerCommand::Enqueue(_) => QueueState::Enqueuing { remaining: pending },
            PlayerCommand::Play => QueueState::Playing,
            _ => self,
        }
    }
}

/// Result of a playback request that reached the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QueueOutcome {
    Queued { tracks: usize },
    NoTracks,
}

/// Sends queue plans to a player, one command at a time
#[derive(Debug)]
pub struct QueueRunner<P: Player> {
    player: P,
    state: QueueState,
}

impl<P: Player> QueueRunner<P> {
    pub fn new(player: P) -> Self {
        Self {
            player,
            state: QueueState::Idle,
        }
    }

    pub fn state(&self) -> QueueState {
        self.state
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    /// Run `plan` from the start
    ///
    /// Any earlier run is abandoned. On failure the run stops and the state
    /// stays at the last command that succeeded.
    pub fn run(&mut self, plan: &QueuePlan) -> Result<QueueOutcome, ProcessError> {
        self.state = QueueState::Idle;

        if plan.is_empty() {
            log::info!("No tracks found, nothing queued");
            return Ok(QueueOutcome::NoTracks);
        }

        let mut pending = plan
            .commands()
            .iter()
            .filter(|c| matches!(c, PlayerCommand::Enqueue(_)))
            .count();

        for command in plan.commands() {
            self.player.execute(command)?;
            if matches!(command, PlayerCommand::Enqueue(_)) {
                pending -= 1;
            }
            self.state = self.state.after(command, pending);
        }

        log::info!("Queued {} track(s)", plan.track_count());
        Ok(QueueOutcome::Queued {
            tracks: plan.track_count(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn tracks(n: usize) -> Vec<Entry> {
        (0..n)
            .map(|id| Entry {
                id,
                location: format!("file:///music/{}.mp3", id),
                ..Default::default()
            })
            .collect()
    }

    fn locations(plan: &QueuePlan) -> Vec<String> {
        plan.commands()
            .iter()
            .filter_map(|c| match c {
                PlayerCommand::Enqueue(loc) => Some(loc.clone()),
                _ => None,
            })
            .collect()
    }

    /// Records commands and fails on the n-th one if asked to
    #[derive(Default)]
    struct FakePlayer {
        sent: RefCell<Vec<PlayerCommand>>,
        fail_at: Option<usize>,
    }

    impl Player for FakePlayer {
        fn execute(&self, command: &PlayerCommand) -> Result<String, ProcessError> {
            let mut sent = self.sent.borrow_mut();
            if self.fail_at == Some(sent.len()) {
                return Err(ProcessError::Failed {
                    binary: "fake".to_string(),
                    status: "exit status: 1".to_string(),
                    stderr: "boom".to_string(),
                });
            }
            sent.push(command.clone());
            Ok(String::new())
        }
    }

    #[test]
    fn test_play_plan_order() {
        let plan = QueuePlan::play(&tracks(2));

        assert_eq!(
            plan.commands(),
            &[
                PlayerCommand::ClearQueue,
                PlayerCommand::Enqueue("file:///music/0.mp3".to_string()),
                PlayerCommand::Enqueue("file:///music/1.mp3".to_string()),
                PlayerCommand::Play,
            ]
        );
        assert_eq!(plan.track_count(), 2);
    }

    #[test]
    fn test_enqueue_plan_has_no_clear_or_play() {
        let plan = QueuePlan::enqueue(&tracks(3));
        assert_eq!(plan.commands().len(), 3);
        assert!(plan
            .commands()
            .iter()
            .all(|c| matches!(c, PlayerCommand::Enqueue(_))));
    }

    #[test]
    fn test_empty_plans() {
        assert!(QueuePlan::play(&[]).is_empty());
        assert!(QueuePlan::play(&[]).commands().is_empty());
        assert!(QueuePlan::enqueue(&[]).commands().is_empty());
        assert!(QueuePlan::play_shuffled(&[], Some(1)).is_empty());
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let input = tracks(20);
        let a = QueuePlan::play_shuffled(&input, Some(42));
        let b = QueuePlan::play_shuffled(&input, Some(42));
        assert_eq!(a, b);

        let mut shuffled = locations(&a);
        let mut original = locations(&QueuePlan::play(&input));
        assert_ne!(shuffled, original, "20 tracks should not come back in file order");
        assert_ne!(locations(&QueuePlan::play_shuffled(&input, Some(43))), shuffled);
        shuffled.sort();
        original.sort();
        assert_eq!(shuffled, original);
        assert_eq!(a.commands().first(), Some(&PlayerCommand::ClearQueue));
        assert_eq!(a.commands().last(), Some(&PlayerCommand::Play));
    }

    #[test]
    fn test_run_sends_commands_in_order() {
        let mut runner = QueueRunner::new(FakePlayer::default());
        let plan = QueuePlan::play(&tracks(3));

        let outcome = runner.run(&plan).unwrap();

        assert_eq!(outcome, QueueOutcome::Queued { tracks: 3 });
        assert_eq!(runner.state(), QueueState::Playing);
        assert_eq!(*runner.player().sent.borrow(), plan.commands());
    }

    #[test]
    fn test_run_without_tracks() {
        let mut runner = QueueRunner::new(FakePlayer::default());

        let outcome = runner.run(&QueuePlan::enqueue(&[])).unwrap();

        assert_eq!(outcome, QueueOutcome::NoTracks);
        assert_eq!(runner.state(), QueueState::Idle);
        assert!(runner.player().sent.borrow().is_empty());
    }

    #[test]
    fn test_enqueue_only_run_ends_enqueuing() {
        let mut runner = QueueRunner::new(FakePlayer::default());
        runner.run(&QueuePlan::enqueue(&tracks(2))).unwrap();
        assert_eq!(runner.state(), QueueState::Enqueuing { remaining: 0 });
    }

    #[test]
    fn test_failure_keeps_last_state() {
        let player = FakePlayer {
            fail_at: Some(2),
            ..Default::default()
        };
        let mut runner = QueueRunner::new(player);

        let err = runner.run(&QueuePlan::play(&tracks(3))).unwrap_err();

        assert!(err.to_string().contains("boom"));
        assert_eq!(runner.state(), QueueState::Enqueuing { remaining: 2 });
        assert_eq!(runner.player().sent.borrow().len(), 2);
    }

    #[test]
    fn test_new_run_restarts_from_idle() {
        let player = FakePlayer {
            fail_at: Some(0),
            ..Default::default()
        };
        let mut runner = QueueRunner::new(player);
        runner.state = QueueState::Playing;

        assert!(runner.run(&QueuePlan::play(&tracks(1))).is_err());
        assert_eq!(runner.state(), QueueState::Idle);
    }
}
