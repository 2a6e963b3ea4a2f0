//! # Store Worker Module
//!
//! Runs a `StatsStore` on its own thread so file I/O never blocks the GUI.
//! Commands are handled one at a time in arrival order, so loads and saves
//! against the same file never interleave. Each reply is sent only after the
//! operation finished and logged its diagnostics.

use std::path::PathBuf;
use std::thread::{self, JoinHandle};

use anyhow::Context;
use crossbeam_channel::{Receiver, Sender};
use tracing::{debug, info};

use crate::document::FlatStats;
use crate::store::StatsStore;

/// Work sent to the store thread.
#[derive(Debug, Clone)]
pub enum StoreCommand {
    /// Load the given file, or re-read the current one.
    Load(Option<PathBuf>),
    /// Merge and save the values to the store's current file.
    Save(FlatStats),
    Shutdown,
}

/// Replies coming back from the store thread.
#[derive(Debug, Clone)]
pub enum StoreEvent {
    Loaded { path: PathBuf, stats: FlatStats },
    Saved { path: PathBuf },
    SaveFailed { path: PathBuf, error: String },
}

/// Handle to the store thread.
#[derive(Debug)]
pub struct StoreWorker {
    commands: Sender<StoreCommand>,
    events: Receiver<StoreEvent>,
    thread_handle: Option<JoinHandle<()>>,
}

impl StoreWorker {
    /// Spawns the store thread owning `store`.
    pub fn spawn(store: StatsStore) -> anyhow::Result<Self> {
        let (command_tx, command_rx) = crossbeam_channel::unbounded();
        let (event_tx, event_rx) = crossbeam_channel::unbounded();

        let thread_handle = thread::Builder::new()
            .name("stats-store".to_string())
            .spawn(move || run(store, command_rx, event_tx))
            .context("failed to spawn stats store thread")?;

        Ok(Self {
            commands: command_tx,
            events: event_rx,
            thread_handle: Some(thread_handle),
        })
    }

    /// Queues a command. Returns `false` if the thread is gone.
    pub fn send(&self, command: StoreCommand) -> bool {
        self.commands.send(command).is_ok()
    }

    pub fn load(&self, path: Option<PathBuf>) -> bool {
        self.send(StoreCommand::Load(path))
    }

    pub fn save(&self, stats: FlatStats) -> bool {
        self.send(StoreCommand::Save(stats))
    }

    /// Drains every reply that is ready, without blocking.
    pub fn poll(&self) -> Vec<StoreEvent> {
        self.events.try_iter().collect()
    }

    /// Blocks until the next reply arrives.
    pub fn recv(&self) -> Option<StoreEvent> {
        self.events.recv().ok()
    }
}

impl Drop for StoreWorker {
    fn drop(&mut self) {
        let _ = self.commands.send(StoreCommand::Shutdown);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

fn run(mut store: StatsStore, commands: Receiver<StoreCommand>, events: Sender<StoreEvent>) {
    info!("Stats store thread started for {}", store.path().display());

    for command in commands.iter() {
        debug!("Store command: {:?}", command);
        let event = match command {
            StoreCommand::Load(Some(path)) => {
                let stats = store.load(&path);
                StoreEvent::Loaded { path, stats }
            }
            StoreCommand::Load(None) => {
                let stats = store.reload();
                StoreEvent::Loaded {
                    path: store.path().to_path_buf(),
                    stats,
                }
            }
            StoreCommand::Save(stats) => {
                let path = store.path().to_path_buf();
                match store.save_current(&stats) {
                    Ok(()) => StoreEvent::Saved { path },
                    Err(e) => StoreEvent::SaveFailed {
                        path,
                        error: e.to_string(),
                    },
                }
            }
            StoreCommand::Shutdown => break,
        };

        if events.send(event).is_err() {
            break;
        }
    }

    info!("Stats store thread finished");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn commands_run_in_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, r#"{"A": {"subskills": {"x": 10}}, "B": 2}"#).unwrap();

        let worker = StoreWorker::spawn(StatsStore::new(&path)).unwrap();
        assert!(worker.load(None));
        assert!(worker.save(FlatStats::from([("A".to_string(), 64.0)])));
        assert!(worker.load(None));

        match worker.recv() {
            Some(StoreEvent::Loaded { stats, .. }) => assert_eq!(stats["A"], 10.0),
            other => panic!("unexpected event: {:?}", other),
        }
        match worker.recv() {
            Some(StoreEvent::Saved { path: saved }) => assert_eq!(saved, path),
            other => panic!("unexpected event: {:?}", other),
        }
        match worker.recv() {
            Some(StoreEvent::Loaded { stats, .. }) => {
                assert_eq!(stats["A"], 64.0);
                assert_eq!(stats["B"], 2.0);
            }
            other => panic!("unexpected event: {:?}", other),
        }

        let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["A"]["average"], serde_json::json!(64.0));
        assert_eq!(saved["A"]["subskills"], serde_json::json!({"x": 10}));
    }

    #[test]
    fn save_failure_is_reported_as_event() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("stats.json");

        let worker = StoreWorker::spawn(StatsStore::new(&path)).unwrap();
        worker.save(FlatStats::from([("A".to_string(), 1.0)]));

        match worker.recv() {
            Some(StoreEvent::SaveFailed { path: failed, error }) => {
                assert_eq!(failed, path);
                assert!(!error.is_empty());
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }
}
