//! The edit session a front end drives.
//!
//! A session owns the loaded collection, the selected date and the form
//! fields for that date. Field setters only touch the form; `save` and
//! `clear` write through to storage.

use thiserror::Error;
use wh_core::{
    ClockTime, DateKey, EntryCollection, FormFields, ReportError, ReportText, derive_form_state,
};

use crate::KeyValueStore;
use crate::store::{EntryStore, StorageWriteFailed};

/// Session errors.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Save was requested with neither a clock-in nor a clock-out.
    #[error("nothing to save for {date}: set a clock-in or clock-out time")]
    NothingToSave { date: DateKey },
    /// The change is applied in memory but could not be stored.
    #[error("changes to {date} were not saved")]
    Storage {
        date: DateKey,
        #[source]
        source: StorageWriteFailed,
    },
}

pub struct Session<S> {
    store: EntryStore<S>,
    collection: EntryCollection,
    selected: DateKey,
    form: FormFields,
    unsaved: bool,
}

impl<S: KeyValueStore> Session<S> {
    /// Loads the stored collection and selects `date`.
    pub fn open(store: S, date: DateKey) -> Self {
        let store = EntryStore::new(store);
        let collection = store.load();
        let form = derive_form_state(&collection, date);
        Self {
            store,
            collection,
            selected: date,
            form,
            unsaved: false,
        }
    }

    /// Selects a date, discarding unsaved edits and loading its stored fields.
    pub fn select_date(&mut self, date: DateKey) {
        self.selected = date;
        self.form = derive_form_state(&self.collection, date);
    }

    pub const fn set_clock_in(&mut self, time: Option<ClockTime>) {
        self.form.clock_in = time;
    }

    pub const fn set_clock_out(&mut self, time: Option<ClockTime>) {
        self.form.clock_out = time;
    }

    pub const fn set_break_minutes(&mut self, minutes: Option<u32>) {
        self.form.break_minutes = minutes;
    }

    /// Stores the form fields for the selected date.
    ///
    /// A form without clock values removes the stored entry, as [`clear`]
    /// does. If nothing is stored either, this fails with
    /// [`SessionError::NothingToSave`].
    ///
    /// [`clear`]: Self::clear
    pub fn save(&mut self) -> Result<(), SessionError> {
        let date = self.selected;
        let Some(entry) = self.form.to_entry() else {
            if self.collection.contains(date) {
                return self.clear();
            }
            return Err(SessionError::NothingToSave { date });
        };
        self.collection = self.collection.upsert(date, entry);
        tracing::debug!(%date, complete = entry.is_complete(), "saving entry");
        self.persist()
    }

    /// Removes the selected date's entry and empties the form.
    pub fn clear(&mut self) -> Result<(), SessionError> {
        let date = self.selected;
        self.form = FormFields::default();
        if !self.collection.contains(date) {
            tracing::debug!(%date, "nothing stored to clear");
            return Ok(());
        }
        self.collection = self.collection.remove(date);
        tracing::debug!(%date, "clearing entry");
        self.persist()
    }

    /// Generates the report for every stored entry.
    pub fn export_report(&self) -> Result<ReportText, ReportError> {
        wh_core::generate(&self.collection)
    }

    /// True when the form differs from the selected date's entry, or when the
    /// last write failed and the collection has changes storage lacks.
    pub fn is_dirty(&self) -> bool {
        self.unsaved || self.form != derive_form_state(&self.collection, self.selected)
    }

    pub const fn collection(&self) -> &EntryCollection {
        &self.collection
    }

    pub const fn selected(&self) -> DateKey {
        self.selected
    }

    pub const fn form(&self) -> &FormFields {
        &self.form
    }

    pub const fn store(&self) -> &S {
        self.store.store()
    }

    fn persist(&mut self) -> Result<(), SessionError> {
        let result = self
            .store
            .persist(&self.collection)
            .map_err(|source| SessionError::Storage {
                date: self.selected,
                source,
            });
        self.unsaved = result.is_err();
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::STORAGE_KEY;
    use crate::{DbError, MemoryStore};
    use wh_core::TimeEntry;

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn time(s: &str) -> ClockTime {
        s.parse().unwrap()
    }

    fn stored(session: &Session<MemoryStore>) -> EntryCollection {
        EntryStore::new(session.store().clone()).load()
    }

    #[test]
    fn save_persists_selected_date() {
        let mut session = Session::open(MemoryStore::new(), key("2024-03-01"));
        session.set_clock_in(Some(time("09:00")));
        session.set_clock_out(Some(time("17:30")));
        session.set_break_minutes(Some(30));
        assert!(session.is_dirty());

        session.save().unwrap();

        assert!(!session.is_dirty());
        assert_eq!(
            stored(&session).get(key("2024-03-01")),
            Some(&TimeEntry::complete(time("09:00"), time("17:30"), 30))
        );
    }

    #[test]
    fn partial_entry_is_saved() {
        let mut session = Session::open(MemoryStore::new(), key("2024-03-01"));
        session.set_clock_in(Some(time("09:00")));
        session.save().unwrap();

        let entry = *stored(&session).get(key("2024-03-01")).unwrap();
        assert!(!entry.is_complete());
        assert_eq!(session.export_report(), Err(ReportError::NoEntries));
    }

    #[test]
    fn save_without_clock_values_is_rejected() {
        let mut session = Session::open(MemoryStore::new(), key("2024-03-01"));
        session.set_break_minutes(Some(15));

        let err = session.save().unwrap_err();
        assert!(matches!(err, SessionError::NothingToSave { .. }));
        assert!(session.store().get(STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn select_date_loads_stored_fields() {
        let mut session = Session::open(MemoryStore::new(), key("2024-03-01"));
        session.set_clock_in(Some(time("08:00")));
        session.set_clock_out(Some(time("16:00")));
        session.save().unwrap();

        session.select_date(key("2024-03-02"));
        assert!(session.form().is_empty());

        session.select_date(key("2024-03-01"));
        assert_eq!(session.form().clock_in, Some(time("08:00")));
        assert_eq!(session.form().clock_out, Some(time("16:00")));
        assert_eq!(session.form().break_minutes, None);
    }

    #[test]
    fn clear_removes_entry_and_resets_form() {
        let mut session = Session::open(MemoryStore::new(), key("2024-03-01"));
        session.set_clock_in(Some(time("08:00")));
        session.set_clock_out(Some(time("16:00")));
        session.save().unwrap();

        session.clear().unwrap();

        assert!(session.form().is_empty());
        assert!(!session.collection().contains(key("2024-03-01")));
        assert!(stored(&session).is_empty());
    }

    #[test]
    fn reopening_restores_saved_entries() {
        let mut session = Session::open(MemoryStore::new(), key("2024-03-01"));
        session.set_clock_in(Some(time("08:00")));
        session.set_clock_out(Some(time("16:00")));
        session.save().unwrap();

        let reopened = Session::open(session.store().clone(), key("2024-03-01"));
        assert_eq!(reopened.form().clock_in, Some(time("08:00")));
        assert_eq!(
            reopened.export_report().unwrap().as_str(),
            "Friday 1 March\n8:00 - 16:00 (8 hrs 0 mins)\n"
        );
    }

    #[test]
    fn failed_write_keeps_change_in_memory() {
        let mut session = Session::open(MemoryStore::with_quota(16), key("2024-03-01"));
        session.set_clock_in(Some(time("08:00")));
        session.set_clock_out(Some(time("16:00")));

        let err = session.save().unwrap_err();
        assert!(matches!(
            err,
            SessionError::Storage {
                source: StorageWriteFailed::Write(DbError::QuotaExceeded { .. }),
                ..
            }
        ));
        assert!(session.collection().contains(key("2024-03-01")));
        assert!(session.store().get(STORAGE_KEY).unwrap().is_none());
        assert!(session.is_dirty());
    }

    #[test]
    fn blank_form_removes_stored_entry() {
        let mut session = Session::open(MemoryStore::new(), key("2024-03-01"));
        session.set_clock_in(Some(time("08:00")));
        session.save().unwrap();

        session.set_clock_in(None);
        session.save().unwrap();

        assert!(!session.collection().contains(key("2024-03-01")));
        assert!(!stored(&session).contains(key("2024-03-01")));
        assert!(!session.is_dirty());
    }
}
