//! Library browsing and playback, tied together

use crate::artwork::ImageResolver;
use crate::config::BrowserConfig;
use crate::error::{LoadError, ProcessError};
use crate::index::LibraryIndex;
use crate::model::Entry;
use crate::player::{Player, PlayerCommand, QueueOutcome, QueuePlan, QueueRunner, QueueState};
use crate::rhythmbox;

/// A loaded library and the player it drives
pub struct Browser<P: Player> {
    index: LibraryIndex,
    runner: QueueRunner<P>,
}

impl<P: Player> Browser<P> {
    /// Load the library named in `config` and index it
    pub fn setup<R: ImageResolver + ?Sized>(
        config: &BrowserConfig,
        player: P,
        resolver: &R,
    ) -> Result<Self, LoadError> {
        log::info!("Loading Rhythmbox library from {:?}", config.library_path);
        let entries = rhythmbox::parse_database(&config.library_path)?;
        let index = LibraryIndex::build(entries, resolver);
        Ok(Self::from_index(index, player))
    }

    pub fn from_index(index: LibraryIndex, player: P) -> Self {
        Self {
            index,
            runner: QueueRunner::new(player),
        }
    }

    pub fn index(&self) -> &LibraryIndex {
        &self.index
    }

    pub fn player(&self) -> &P {
        self.runner.player()
    }

    pub fn queue_state(&self) -> QueueState {
        self.runner.state()
    }

    /// Replace the queue with the album of entry `id`, in track order
    pub fn play_album(&mut self, id: usize) -> Result<QueueOutcome, ProcessError> {
        let plan = QueuePlan::play(&self.album_tracks(id));
        self.runner.run(&plan)
    }

    /// Replace the queue with the album of entry `id`, shuffled
    pub fn play_album_randomly(&mut self, id: usize, seed: Option<u64>) -> Result<QueueOutcome, ProcessError> {
        let plan = QueuePlan::play_shuffled(&self.album_tracks(id), seed);
        for command in plan.commands() {
            if let PlayerCommand::Enqueue(location) = command {
                log::debug!("Shuffled: {}", location);
            }
        }
        self.runner.run(&plan)
    }

    /// Append the album of entry `id` to the queue, in track order
    pub fn enqueue_album(&mut self, id: usize) -> Result<QueueOutcome, ProcessError> {
        let plan = QueuePlan::enqueue(&self.album_tracks(id));
        self.runner.run(&plan)
    }

    /// Replace the queue with the single entry `id`
    pub fn play_track(&mut self, id: usize) -> Result<QueueOutcome, ProcessError> {
        let track: Vec<Entry> = self.index.entry(id).cloned().into_iter().collect();
        self.runner.run(&QueuePlan::play(&track))
    }

    /// Pass a transport command straight to the player
    pub fn send(&self, command: &PlayerCommand) -> Result<String, ProcessError> {
        self.runner.player().execute(command)
    }

    fn album_tracks(&self, id: usize) -> Vec<Entry> {
        self.index
            .resolve_album(id)
            .map(|album| album.tracks)
            .unwrap_or_default()
    }
}
