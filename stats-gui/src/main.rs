//! # Stat Radar - Stats Entry and Radar Chart GUI
//!
//! This module contains the main GUI application for Stat Radar.
//! It provides a form for entering per-category stats, a radar (or bar)
//! chart of the current values, and buttons for saving to and reloading
//! from the stats JSON file.
//!
//! ## Architecture
//! - **Main Thread**: Iced GUI application with dark theme
//! - **Store Thread**: Dedicated thread owning the `StatsStore` (file I/O)
//! - **Communication**: Crossbeam channels inside `StoreWorker`
//! - **Updates**: Timer subscription polls store replies

mod ui;
mod widgets;

use std::path::PathBuf;

use clap::Parser;
use iced::{Element, Subscription, Task, Theme};
use indexmap::IndexMap;
use stats_core::{
    scoring::{self, FormScores},
    FlatStats, StatsStore, StoreEvent, StoreWorker, DEFAULT_STATS_FILE,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use ui::main_display::create_main_view;

/// How often store replies are polled.
const TICK_MS: u64 = 16;

/// Command line arguments.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Enter stats, keep them in a JSON file and view them as a radar chart")]
pub struct Args {
    /// Stats file to load from and save to
    #[arg(short, long, default_value = DEFAULT_STATS_FILE)]
    pub stats: PathBuf,

    /// Start with the bar chart instead of the radar chart
    #[arg(long)]
    pub bar: bool,
}

/// Main entry point for the Stat Radar application.
///
/// Sets up logging, starts the store thread and hands control to Iced.
pub fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    info!("Starting Stat Radar with stats file {}", args.stats.display());

    let worker = StoreWorker::spawn(StatsStore::new(&args.stats))?;

    let result = iced::application("Stat Radar", StatsApp::update, StatsApp::view)
        .subscription(StatsApp::subscription)
        .theme(StatsApp::theme)
        .run_with(move || (StatsApp::new(worker, args), Task::none()));
    info!("Application finished with result: {:?}", result);
    Ok(result?)
}

/// Application message types for the Iced GUI framework.
#[derive(Debug, Clone)]
pub enum Message {
    // Form interactions
    InputChanged(String, String), // Category name, new text
    Calculate,                    // Score the form and refresh the chart

    // Stats file
    Save,   // Score the form and save it
    Reload, // Re-read the stats file

    // View
    ToggleChart, // Switch between radar and bar chart

    // Continuous update message
    Tick, // Timer tick, polls the store thread
}

/// Which chart is shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartKind {
    Radar,
    Bar,
}

/// UI-specific data needed for rendering the interface.
///
/// This struct contains only the data that the UI components need
#[derive(Debug, Clone)]
pub struct AppDisplayData {
    pub stats_path: PathBuf,
    /// Raw text of each input box, in category order.
    pub inputs: IndexMap<String, String>,
    /// Text each box held after the last load or save; only boxes that
    /// differ from it are saved.
    pub loaded_inputs: IndexMap<String, String>,
    /// Values currently charted.
    pub chart_stats: FlatStats,
    pub result_text: String,
    pub status: String,
    pub chart_kind: ChartKind,
    /// Store commands sent but not yet answered.
    pub pending: usize,
}

/// Main application state for Stat Radar.
#[derive(Debug)]
struct StatsApp {
    worker: StoreWorker,
    /// Input text of the categories in the save that is in flight.
    saving_inputs: IndexMap<String, String>,
    // Single source of truth for all display data
    display_data: AppDisplayData,
}

impl StatsApp {
    fn new(worker: StoreWorker, args: Args) -> Self {
        let mut app = Self {
            worker,
            saving_inputs: IndexMap::new(),
            display_data: AppDisplayData {
                stats_path: args.stats.clone(),
                inputs: IndexMap::new(),
                loaded_inputs: IndexMap::new(),
                chart_stats: FlatStats::new(),
                result_text: "Results will appear here".to_string(),
                status: format!("Loading {}...", args.stats.display()),
                chart_kind: if args.bar { ChartKind::Bar } else { ChartKind::Radar },
                pending: 0,
            },
        };

        let requested = app.worker.load(Some(args.stats));
        app.track_request(requested);
        app
    }

    /// Handles application state updates based on incoming messages.
    fn update(&mut self, message: Message) {
        match message {
            Message::InputChanged(category, text) => {
                if let Some(input) = self.display_data.inputs.get_mut(&category) {
                    *input = text;
                }
            }
            Message::Calculate => {
                self.show_scores();
            }
            Message::Save => {
                let scores = self.show_scores();
                let edited = scoring::edited_scores(
                    &scores,
                    &self.display_data.inputs,
                    &self.display_data.loaded_inputs,
                );
                if edited.is_empty() {
                    info!("Save requested with no edited categories");
                    self.display_data.status = "No changes to save".to_string();
                    return;
                }

                info!("Saving {} edited categories", edited.len());
                self.saving_inputs = edited
                    .keys()
                    .filter_map(|name| {
                        let text = self.display_data.inputs.get(name)?;
                        Some((name.clone(), text.clone()))
                    })
                    .collect();
                let requested = self.worker.save(edited);
                self.track_request(requested);
                if requested {
                    self.display_data.status = format!("Saving to {}...", self.display_data.stats_path.display());
                }
            }
            Message::Reload => {
                let requested = self.worker.load(None);
                self.track_request(requested);
                if requested {
                    self.display_data.status = format!("Reloading {}...", self.display_data.stats_path.display());
                }
            }
            Message::ToggleChart => {
                self.display_data.chart_kind = match self.display_data.chart_kind {
                    ChartKind::Radar => ChartKind::Bar,
                    ChartKind::Bar => ChartKind::Radar,
                };
                info!("Chart switched to {:?}", self.display_data.chart_kind);
            }
            Message::Tick => {
                for event in self.worker.poll() {
                    self.process_store_event(event);
                }
            }
        }
    }

    /// Reads the form, runs the scoring hook and charts the result.
    ///
    /// Returns the scored values so `Save` can send the same numbers.
    fn show_scores(&mut self) -> FlatStats {
        let FormScores {
            scores,
            invalid_fields,
        } = scoring::read_form(&self.display_data.inputs);
        let scored = scoring::calculate_scores(&scores);

        self.display_data.result_text = scoring::format_scores(&scored);
        self.display_data.status = if invalid_fields.is_empty() {
            String::new()
        } else {
            warn!("Non-integer input in {:?}, counted as 0", invalid_fields);
            format!("Not a whole number, counted as 0: {}", invalid_fields.join(", "))
        };
        self.display_data.chart_stats = scored.clone();
        scored
    }

    fn track_request(&mut self, sent: bool) {
        if sent {
            self.display_data.pending += 1;
        } else {
            error!("Stats store thread is not running");
            self.display_data.status = "Stats store is not running".to_string();
        }
    }

    /// Applies one reply from the store thread.
    fn process_store_event(&mut self, event: StoreEvent) {
        self.display_data.pending = self.display_data.pending.saturating_sub(1);

        match event {
            StoreEvent::Loaded { path, stats } => {
                self.display_data.inputs = stats
                    .iter()
                    .map(|(name, value)| (name.clone(), format!("{}", value.round() as i64)))
                    .collect();
                self.display_data.loaded_inputs = self.display_data.inputs.clone();
                self.display_data.result_text = scoring::format_scores(&stats);
                self.display_data.status = format!("Loaded {} categories from {}", stats.len(), path.display());
                self.display_data.chart_stats = stats;
                self.display_data.stats_path = path;
            }
            StoreEvent::Saved { path } => {
                self.display_data.loaded_inputs.extend(self.saving_inputs.drain(..));
                self.display_data.status = format!("Saved to {}", path.display());
            }
            StoreEvent::SaveFailed { path, error } => {
                self.saving_inputs.clear();
                self.display_data.status = format!("Could not save {}: {}", path.display(), error);
            }
        }
    }

    /// Renders the main application interface.
    ///
    /// Delegates all UI rendering to the main_display module.
    fn view(&self) -> Element<'_, Message> {
        create_main_view(&self.display_data)
    }

    /// Returns a timer subscription that polls the store thread.
    fn subscription(&self) -> Subscription<Message> {
        iced::time::every(std::time::Duration::from_millis(TICK_MS)).map(|_| Message::Tick)
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn app_for(path: PathBuf) -> StatsApp {
        let worker = StoreWorker::spawn(StatsStore::new(&path)).unwrap();
        StatsApp::new(worker, Args { stats: path, bar: false })
    }

    /// Ticks until every queued store command was answered.
    fn settle(app: &mut StatsApp) {
        for _ in 0..500 {
            app.update(Message::Tick);
            if app.display_data.pending == 0 {
                return;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        }
        panic!("store thread did not answer");
    }

    #[test]
    fn startup_load_fills_the_form() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, r#"{"Physical": 40.4, "Graphics": {"subskills": {"a": 10, "b": 20}}}"#).unwrap();

        let mut app = app_for(path);
        settle(&mut app);

        assert_eq!(app.display_data.inputs["Physical"], "40");
        assert_eq!(app.display_data.inputs["Graphics"], "15");
        assert_eq!(app.display_data.chart_stats["Physical"], 40.4);
    }

    #[test]
    fn calculate_charts_the_form_values() {
        let dir = tempdir().unwrap();
        let mut app = app_for(dir.path().join("stats.json"));
        settle(&mut app);

        app.update(Message::InputChanged("Roguelike".to_string(), "55".to_string()));
        app.update(Message::InputChanged("Colony Sim".to_string(), "many".to_string()));
        app.update(Message::Calculate);

        assert_eq!(app.display_data.chart_stats["Roguelike"], 55.0);
        assert_eq!(app.display_data.chart_stats["Colony Sim"], 0.0);
        assert!(app.display_data.status.contains("Colony Sim"));
    }

    #[test]
    fn save_writes_the_form_to_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        let mut app = app_for(path.clone());
        settle(&mut app);

        app.update(Message::InputChanged("Destruction".to_string(), "90".to_string()));
        app.update(Message::Save);
        settle(&mut app);

        assert!(app.display_data.status.starts_with("Saved to"));
        let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["Destruction"], serde_json::json!(90.0));
    }

    #[test]
    fn save_leaves_unedited_entries_alone() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("stats.json");
        fs::write(&path, r#"{"Speed": 42.5, "Notes": "x", "Luck": 3}"#).unwrap();
        let mut app = app_for(path.clone());
        settle(&mut app);

        app.update(Message::Save);
        settle(&mut app);
        assert_eq!(app.display_data.status, "No changes to save");
        let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved["Speed"], serde_json::json!(42.5));
        assert_eq!(saved["Notes"], serde_json::json!("x"));

        app.update(Message::InputChanged("Luck".to_string(), "8".to_string()));
        app.update(Message::Save);
        settle(&mut app);
        let saved: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(saved, serde_json::json!({"Speed": 42.5, "Notes": "x", "Luck": 8.0}));

        // The saved text is the new baseline, so saving again changes nothing.
        app.update(Message::Save);
        assert_eq!(app.display_data.status, "No changes to save");
    }

    #[test]
    fn toggle_switches_chart_kind() {
        let dir = tempdir().unwrap();
        let mut app = app_for(dir.path().join("stats.json"));
        app.update(Message::ToggleChart);
        assert_eq!(app.display_data.chart_kind, ChartKind::Bar);
        app.update(Message::ToggleChart);
        assert_eq!(app.display_data.chart_kind, ChartKind::Radar);
    }
}
