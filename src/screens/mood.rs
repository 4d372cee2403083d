use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::capabilities::Context;
use crate::domain::{MoodEntry, MoodLevel};
use crate::metrics::{GardenLevel, mood_average, mood_bar_heights};
use crate::seed;
use crate::store::Screen;

/// Number of most recent entries the journal keeps.
pub const HISTORY_WINDOW: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodState {
    /// Newest first, at most [`HISTORY_WINDOW`] entries, one per day.
    pub history: Vec<MoodEntry>,
    pub selected: Option<MoodLevel>,
    pub note_draft: String,
    pub note_input_open: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoodAction {
    Select(MoodLevel),
    EditNote(String),
    Submit,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodMetrics {
    pub average: f64,
    pub garden: GardenLevel,
    pub entries: usize,
    pub latest: Option<MoodEntry>,
    /// Oldest first.
    pub bar_heights: Vec<u8>,
}

impl MoodState {
    pub fn new(history: Vec<MoodEntry>) -> Self {
        let mut history = history;
        history.truncate(HISTORY_WINDOW);
        Self {
            history,
            selected: None,
            note_draft: String::new(),
            note_input_open: false,
        }
    }

    pub fn seeded<R: Rng + ?Sized>(context: &Context, rng: &mut R) -> Self {
        Self::new(seed::mood_history(context.today(), rng))
    }

    fn apply(&mut self, action: MoodAction, context: &Context) {
        match action {
            MoodAction::Select(level) => {
                self.selected = Some(level);
                self.note_input_open = true;
            }
            MoodAction::EditNote(text) => {
                self.note_draft = text;
            }
            MoodAction::Submit => self.record(context),
        }
    }

    fn record(&mut self, context: &Context) {
        let Some(mood) = self.selected else {
            return;
        };

        let date = context.today();
        let note = std::mem::take(&mut self.note_draft);
        let notes = if note.trim().is_empty() { None } else { Some(note) };

        // one entry per day: a repeat check-in replaces today's entry, so the
        // history does not grow on that path
        self.history.retain(|entry| entry.date != date);
        self.history.insert(0, MoodEntry { date, mood, notes });
        self.history.truncate(HISTORY_WINDOW);

        self.selected = None;
        self.note_input_open = false;
        tracing::info!(%date, mood = mood.value(), "recorded mood");
    }
}

impl Screen for MoodState {
    type Action = MoodAction;
    type Metrics = MoodMetrics;

    fn reduce(&self, action: MoodAction, context: &Context) -> Self {
        let mut next = self.clone();
        next.apply(action, context);
        next
    }

    fn metrics(&self, _context: &Context) -> MoodMetrics {
        let average = mood_average(&self.history);
        MoodMetrics {
            average,
            garden: GardenLevel::classify(average),
            entries: self.history.len(),
            latest: self.history.first().cloned(),
            bar_heights: mood_bar_heights(&self.history, HISTORY_WINDOW),
        }
    }
}
