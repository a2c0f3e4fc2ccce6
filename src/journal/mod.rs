//! Journal entries and the in-memory draft store.
//!
//! The board owns the sample entries and a draft per entry id; it is the
//! owner the editing surface reports changes to.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::editor::ChangeListener;
use crate::error::SurfaceError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mood {
    Centered,
    Stressed,
    Hopeful,
    Reflective,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub mood: Mood,
    pub tags: Vec<String>,
    pub updated_at: String,
    pub content: String,
}

/// Edited content per entry id; lives for the session only.
#[derive(Debug, Clone, Default)]
pub struct DraftStore {
    drafts: HashMap<String, String>,
}

impl DraftStore {
    pub fn get(&self, entry_id: &str) -> Option<&str> {
        self.drafts.get(entry_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Drafts sorted by entry id.
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        let mut drafts: Vec<_> = self
            .drafts
            .iter()
            .map(|(id, html)| (id.as_str(), html.as_str()))
            .collect();
        drafts.sort_unstable();
        drafts
    }
}

impl ChangeListener for DraftStore {
    fn content_changed(&mut self, entry_id: &str, html: &str) {
        self.drafts.insert(entry_id.to_string(), html.to_string());
    }
}

/// Content for the editor, tagged by where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorContent<'a> {
    /// Surface output recorded this session; always markup.
    Draft(&'a str),
    /// The entry as stored, in whatever form it was written.
    Stored(&'a str),
}

#[derive(Debug, Clone, Default)]
pub struct JournalBoard {
    entries: Vec<JournalEntry>,
    selected_id: String,
    pub drafts: DraftStore,
}

impl JournalBoard {
    pub fn new(entries: Vec<JournalEntry>) -> Self {
        let selected_id = entries.first().map(|e| e.id.clone()).unwrap_or_default();
        Self {
            entries,
            selected_id,
            drafts: DraftStore::default(),
        }
    }

    pub fn with_samples() -> Self {
        Self::new(sample_entries())
    }

    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    pub fn select(&mut self, entry_id: &str) -> Result<&JournalEntry, SurfaceError> {
        let entry = self
            .entries
            .iter()
            .find(|e| e.id == entry_id)
            .ok_or_else(|| SurfaceError::UnknownEntry(entry_id.to_string()))?;
        self.selected_id.clone_from(&entry.id);
        Ok(entry)
    }

    /// The selected entry, falling back to the first one.
    pub fn active_entry(&self) -> Option<&JournalEntry> {
        self.entries
            .iter()
            .find(|e| e.id == self.selected_id)
            .or_else(|| self.entries.first())
    }

    pub fn active_index(&self) -> Option<usize> {
        let active = self.active_entry()?;
        self.entries.iter().position(|e| e.id == active.id)
    }

    /// What the editor should show for the active entry: the draft if one
    /// exists, else the stored content.
    pub fn editor_content(&self) -> Option<(&str, EditorContent<'_>)> {
        let entry = self.active_entry()?;
        let content = self
            .drafts
            .get(&entry.id)
            .map_or(EditorContent::Stored(&entry.content), EditorContent::Draft);
        Some((&entry.id, content))
    }
}

pub fn sample_entries() -> Vec<JournalEntry> {
    let entry = |id: &str, title: &str, summary: &str, mood, tags: &[&str], updated_at: &str, content: &str| {
        JournalEntry {
            id: id.to_string(),
            title: title.to_string(),
            summary: summary.to_string(),
            mood,
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
            updated_at: updated_at.to_string(),
            content: content.to_string(),
        }
    };
    vec![
        entry(
            "1",
            "Morning grounding practice",
            "Reflected on breathing exercises and set intentions.",
            Mood::Centered,
            &["mindfulness", "routine"],
            "Today • 8:45 AM",
            "Started the day with a slow breathing sequence. Noted how the tension in my shoulders eased after focusing on longer exhales. Set an intention to move slowly and ask for help when I feel overwhelmed.",
        ),
        entry(
            "2",
            "Midweek overwhelm",
            "Processing workload stress and noting triggers.",
            Mood::Stressed,
            &["work", "stress"],
            "Yesterday • 9:12 PM",
            "Felt a spike of anxiety after my calendar filled up. The pressure of back-to-back calls makes it hard to pause for basic needs. Writing helped me notice a repeating pattern of saying yes too quickly.",
        ),
        entry(
            "3",
            "Support group reflections",
            "Journaled about connecting with peers in the anxiety group.",
            Mood::Hopeful,
            &["community", "therapy"],
            "Monday • 7:05 PM",
            "Tonight's group call was grounding. Hearing others describe similar spirals reminded me I am not alone. I want to follow up with Maya about the breathing technique she mentioned.",
        ),
        entry(
            "4",
            "Weekend rewind",
            "Capturing highlights and low points from the weekend.",
            Mood::Reflective,
            &["weekend", "gratitude"],
            "Sunday • 5:22 PM",
            "Saturday morning felt light. Coffee with Jordan was slow and easy, but by evening I noticed my mind drifting into what-ifs again. Planning to schedule a longer hike next weekend to stay present.",
        ),
    ]
}
