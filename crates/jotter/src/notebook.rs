//! The note collection and its editing operations.
//!
//! [`NoteStore`] owns the notes in memory, in store order (newest creation
//! first), and writes the whole collection through to a [`KeyValueStore`]
//! after every mutation. Operations on ids that aren't in the collection are
//! silent no-ops.

use tracing::{debug, info, warn};

use crate::clock::{Clock, SystemClock};
use crate::error::{Error, Result};
use crate::markdown::MarkdownRenderer;
use crate::note::Note;
use crate::storage::KeyValueStore;

/// Key the collection is stored under unless configured otherwise.
pub const DEFAULT_NOTES_KEY: &str = "notes";

/// Owner of the note collection.
#[derive(Debug)]
pub struct NoteStore<S, C = SystemClock> {
    store: S,
    clock: C,
    key: String,
    notes: Vec<Note>,
    selected: Option<String>,
    pending_delete: Option<String>,
}

impl<S: KeyValueStore, C: Clock> NoteStore<S, C> {
    /// Load the collection stored under [`DEFAULT_NOTES_KEY`].
    ///
    /// # Errors
    ///
    /// Returns an error if the backend can't be read or holds something that
    /// isn't a note collection.
    pub fn open(store: S, clock: C) -> Result<Self> {
        Self::open_with_key(store, clock, DEFAULT_NOTES_KEY)
    }

    /// Load the collection stored under `key`. A missing key is an empty
    /// collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend can't be read or holds something that
    /// isn't a note collection.
    pub fn open_with_key(store: S, clock: C, key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        let notes = match store.get(&key)? {
            Some(raw) => {
                let notes: Vec<Note> =
                    serde_json::from_str(&raw).map_err(|source| Error::CorruptCollection {
                        key: key.clone(),
                        source,
                    })?;
                dedup_ids(notes)
            }
            None => Vec::new(),
        };

        info!(count = notes.len(), key = %key, "Loaded notes");
        Ok(Self {
            store,
            clock,
            key,
            notes,
            selected: None,
            pending_delete: None,
        })
    }

    /// Create an empty note at the head of the collection and select it.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection can't be written back.
    pub fn create(&mut self) -> Result<Note> {
        let mut note = Note::new(self.clock.now_millis());
        while self.contains(&note.id) {
            note.id = Note::generate_id();
        }

        debug!(id = %note.id, "Created note");
        self.notes.insert(0, note.clone());
        self.selected = Some(note.id.clone());
        self.persist()?;
        Ok(note)
    }

    /// Replace the title and content of note `id`, keeping its position.
    ///
    /// Does nothing when no note is selected or `id` isn't in the collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection can't be written back.
    pub fn update(&mut self, id: &str, title: &str, content: &str) -> Result<()> {
        if self.selected.is_none() {
            return Ok(());
        }
        let now = self.clock.now_millis();
        let Some(note) = self.notes.iter_mut().find(|n| n.id == id) else {
            return Ok(());
        };

        note.edit(title, content, now);
        debug!(id, "Updated note");
        self.persist()
    }

    /// Set the selected note's title, keeping its content.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection can't be written back.
    pub fn edit_title(&mut self, title: &str) -> Result<()> {
        let Some(note) = self.selected() else {
            return Ok(());
        };
        let (id, content) = (note.id.clone(), note.content.clone());
        self.update(&id, title, &content)
    }

    /// Set the selected note's content, keeping its title.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection can't be written back.
    pub fn edit_content(&mut self, content: &str) -> Result<()> {
        let Some(note) = self.selected() else {
            return Ok(());
        };
        let (id, title) = (note.id.clone(), note.title.clone());
        self.update(&id, &title, content)
    }

    /// Remove note `id`. Returns `false` if there was no such note.
    ///
    /// Deleting the selected note clears the selection.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection can't be written back.
    pub fn delete(&mut self, id: &str) -> Result<bool> {
        let before = self.notes.len();
        self.notes.retain(|n| n.id != id);
        if self.notes.len() == before {
            return Ok(false);
        }

        if self.selected.as_deref() == Some(id) {
            self.selected = None;
        }
        if self.pending_delete.as_deref() == Some(id) {
            self.pending_delete = None;
        }
        debug!(id, "Deleted note");
        self.persist()?;
        Ok(true)
    }

    /// Mark note `id` for deletion pending confirmation.
    pub fn request_delete(&mut self, id: &str) {
        self.pending_delete = Some(id.to_string());
    }

    /// Delete the note marked by [`request_delete`](Self::request_delete).
    ///
    /// Returns `false` if nothing was pending or the note is already gone.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection can't be written back.
    pub fn confirm_delete(&mut self) -> Result<bool> {
        match self.pending_delete.take() {
            Some(id) => self.delete(&id),
            None => Ok(false),
        }
    }

    /// Drop a pending deletion without deleting anything.
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// The note awaiting delete confirmation, if any.
    #[must_use]
    pub fn pending_delete(&self) -> Option<&Note> {
        self.pending_delete.as_deref().and_then(|id| self.get(id))
    }
}

impl<S, C> NoteStore<S, C> {
    /// Notes whose title or content contains `query`, ignoring case, in store
    /// order. A blank query matches everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Note> {
        if query.trim().is_empty() {
            return self.notes.iter().collect();
        }

        let needle = query.to_lowercase();
        self.notes.iter().filter(|n| n.matches(&needle)).collect()
    }

    /// What to show when [`search`](Self::search) comes back empty.
    #[must_use]
    pub fn empty_message(query: &str) -> &'static str {
        if query.is_empty() {
            "No notes yet"
        } else {
            "No notes found"
        }
    }

    /// Select note `id`. Selecting an unknown id clears the selection.
    pub fn select(&mut self, id: &str) -> bool {
        if self.contains(id) {
            self.selected = Some(id.to_string());
            true
        } else {
            self.selected = None;
            false
        }
    }

    /// Clear the selection.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// The selected note.
    #[must_use]
    pub fn selected(&self) -> Option<&Note> {
        self.selected.as_deref().and_then(|id| self.get(id))
    }

    /// Render the selected note's content. Empty without a selection or
    /// content.
    #[must_use]
    pub fn preview_html<R: MarkdownRenderer + ?Sized>(&self, renderer: &R) -> String {
        match self.selected() {
            Some(note) if !note.content.is_empty() => renderer.render(&note.content),
            _ => String::new(),
        }
    }

    /// Look up a note by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.iter().find(|n| n.id == id)
    }

    /// Check whether a note with this id exists.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// All notes in store order.
    #[must_use]
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Number of notes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Check whether there are no notes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Key the collection is persisted under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl<S: KeyValueStore, C> NoteStore<S, C> {
    fn persist(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.notes)?;
        self.store.set(&self.key, &raw)
    }
}

/// Keep the first note for each id.
///
/// Collections written with millisecond-timestamp ids can contain repeats.
fn dedup_ids(notes: Vec<Note>) -> Vec<Note> {
    let mut seen = std::collections::HashSet::with_capacity(notes.len());
    let before = notes.len();
    let notes: Vec<Note> = notes
        .into_iter()
        .filter(|n| seen.insert(n.id.clone()))
        .collect();

    if notes.len() != before {
        warn!(
            dropped = before - notes.len(),
            "Dropped notes with duplicate ids"
        );
    }
    notes
}
