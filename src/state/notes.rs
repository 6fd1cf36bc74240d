use crate::api::{ApiClient, ApiError, ReqwestTransport, Transport};
use crate::models::{Note, NotePayload};
use leptos::prelude::*;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub(crate) enum NoteError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("A request for note {id} is already in flight")]
    InFlight { id: String },
}

impl NoteError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Api(e) if e.is_unauthorized())
    }
}

/// New notes go first; an entry with the same id is dropped so ids stay unique.
pub(crate) fn prepend_created(notes: &mut Vec<Note>, note: Note) {
    notes.retain(|n| n.id != note.id);
    notes.insert(0, note);
}

/// Swaps the entry for `id` with the server's record, keeping its position.
pub(crate) fn replace_updated(notes: &mut [Note], id: &str, note: Note) -> bool {
    match notes.iter_mut().find(|n| n.id == id) {
        Some(slot) => {
            *slot = note;
            true
        }
        None => false,
    }
}

pub(crate) fn remove_deleted(notes: &mut Vec<Note>, id: &str) -> bool {
    let before = notes.len();
    notes.retain(|n| n.id != id);
    notes.len() != before
}

/// Client-side mirror of the user's notes for one dashboard mount.
///
/// Writes patch the list from the server's reply instead of refetching.
/// Updates and deletes are serialized per note id.
#[derive(Clone)]
pub(crate) struct NoteCollection<T = ReqwestTransport> {
    api: ApiClient<T>,
    pub notes: RwSignal<Vec<Note>>,
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,

    /// Fetch guard: responses from superseded fetches are ignored.
    request_id: RwSignal<u64>,
    in_flight: RwSignal<HashSet<String>>,
    /// Bumped by every update/delete; a refresh that raced a write is discarded.
    write_seq: RwSignal<HashMap<String, u64>>,
}

impl<T: Transport> NoteCollection<T> {
    pub fn new(api: ApiClient<T>) -> Self {
        Self {
            api,
            notes: RwSignal::new(vec![]),
            loading: RwSignal::new(true),
            error: RwSignal::new(None),
            request_id: RwSignal::new(0),
            in_flight: RwSignal::new(HashSet::new()),
            write_seq: RwSignal::new(HashMap::new()),
        }
    }

    pub async fn fetch_all(&self) {
        let req_id = self.request_id.get_untracked().saturating_add(1);
        self.request_id.set(req_id);
        self.loading.set(true);

        let result = self.api.list_notes().await;

        if self.request_id.get_untracked() != req_id {
            debug!(req_id, "dropping stale note list response");
            return;
        }

        match result {
            Ok(notes) => {
                debug!(count = notes.len(), "notes loaded");
                self.notes.set(notes);
                self.error.set(None);
            }
            Err(e) => {
                warn!(error = %e, "failed to fetch notes");
                self.error.set(Some("Failed to fetch notes".to_string()));
            }
        }
        self.loading.set(false);
    }

    pub async fn refetch(&self) {
        self.fetch_all().await;
    }

    pub async fn create(&self, payload: NotePayload) -> Result<Note, NoteError> {
        let note = self.api.create_note(&payload).await?;
        debug!(note_id = %note.id, "note created");
        self.notes.update(|notes| prepend_created(notes, note.clone()));
        Ok(note)
    }

    pub async fn update(&self, id: &str, payload: NotePayload) -> Result<Note, NoteError> {
        self.begin_write(id)?;
        let result = self.api.update_note(id, &payload).await;
        self.end_write(id);

        let note = result?;
        self.notes.update(|notes| {
            replace_updated(notes, id, note.clone());
        });
        Ok(note)
    }

    pub async fn delete(&self, id: &str) -> Result<(), NoteError> {
        self.begin_write(id)?;
        let result = self.api.delete_note(id).await;
        self.end_write(id);

        result?;
        self.notes.update(|notes| {
            remove_deleted(notes, id);
        });
        Ok(())
    }

    /// Pulls the server copy of one note into the list. Returns `None` when
    /// an update or delete for the same note started meanwhile; the write's
    /// reply is newer and the fetched copy is dropped.
    pub async fn refresh_note(&self, id: &str) -> Result<Option<Note>, NoteError> {
        let seq = self.write_seq_of(id);
        let note = self.api.get_note(id).await?;

        if self.write_seq_of(id) != seq || self.in_flight.with_untracked(|ids| ids.contains(id)) {
            debug!(note_id = %id, "dropping refresh superseded by a write");
            return Ok(None);
        }

        self.notes.update(|notes| {
            replace_updated(notes, id, note.clone());
        });
        Ok(Some(note))
    }

    pub fn is_busy(&self, id: &str) -> bool {
        self.in_flight.with(|ids| ids.contains(id))
    }

    fn begin_write(&self, id: &str) -> Result<(), NoteError> {
        let mut claimed = false;
        self.in_flight.update(|ids| claimed = ids.insert(id.to_string()));
        if claimed {
            self.write_seq
                .update(|seq| *seq.entry(id.to_string()).or_default() += 1);
            Ok(())
        } else {
            debug!(note_id = %id, "write rejected, another request is in flight");
            Err(NoteError::InFlight { id: id.to_string() })
        }
    }

    fn write_seq_of(&self, id: &str) -> u64 {
        self.write_seq
            .with_untracked(|seq| seq.get(id).copied().unwrap_or_default())
    }

    fn end_write(&self, id: &str) {
        self.in_flight.update(|ids| {
            ids.remove(id);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::{note_json, GatedTransport, MockTransport};
    use crate::session::SessionStore;
    use crate::storage::memory::MemoryStorage;
    use pretty_assertions::assert_eq;
    use reqwest::Method;
    use std::sync::Arc;

    const NOTES_URL: &str = "http://api.local/notes";
    const A_URL: &str = "http://api.local/notes/a";

    fn note(id: &str, title: &str) -> Note {
        Note {
            id: id.to_string(),
            title: title.to_string(),
            content: String::new(),
            user_id: "u1".to_string(),
            created_at: "2024-05-01T10:00:00Z".to_string(),
            modified_at: "2024-05-01T10:00:00Z".to_string(),
        }
    }

    fn payload(title: &str, content: &str) -> NotePayload {
        NotePayload {
            title: title.to_string(),
            content: content.to_string(),
        }
    }

    fn ids(notes: &[Note]) -> Vec<&str> {
        notes.iter().map(|n| n.id.as_str()).collect()
    }

    fn collection() -> (NoteCollection<MockTransport>, MockTransport) {
        let session = SessionStore::new(Arc::new(MemoryStorage::default()));
        let transport = MockTransport::default();
        let api = ApiClient::new("http://api.local", transport.clone(), session, Arc::new(|| {}));
        (NoteCollection::new(api), transport)
    }

    fn gated_collection() -> (NoteCollection<GatedTransport>, GatedTransport) {
        let session = SessionStore::new(Arc::new(MemoryStorage::default()));
        let transport = GatedTransport::default();
        let api = ApiClient::new("http://api.local", transport.clone(), session, Arc::new(|| {}));
        (NoteCollection::new(api), transport)
    }

    #[test]
    fn test_prepend_created_keeps_ids_unique() {
        let mut notes = vec![note("a", "A"), note("b", "B")];
        prepend_created(&mut notes, note("c", "C"));
        assert_eq!(ids(&notes), vec!["c", "a", "b"]);

        prepend_created(&mut notes, note("b", "B2"));
        assert_eq!(ids(&notes), vec!["b", "c", "a"]);
        assert_eq!(notes[0].title, "B2");
    }

    #[test]
    fn test_replace_updated_keeps_position() {
        let mut notes = vec![note("a", "A"), note("b", "B"), note("c", "C")];
        assert!(replace_updated(&mut notes, "b", note("b", "B2")));
        assert_eq!(ids(&notes), vec!["a", "b", "c"]);
        assert_eq!(notes[1].title, "B2");

        assert!(!replace_updated(&mut notes, "zzz", note("zzz", "Z")));
        assert_eq!(notes.len(), 3);
    }

    #[test]
    fn test_remove_deleted() {
        let mut notes = vec![note("a", "A"), note("b", "B")];
        assert!(remove_deleted(&mut notes, "a"));
        assert!(!remove_deleted(&mut notes, "a"));
        assert_eq!(ids(&notes), vec!["b"]);
    }

    #[tokio::test]
    async fn test_write_sequence_tracks_server_records() {
        let (notes, transport) = collection();
        transport.respond(
            200,
            &format!("[{},{}]", note_json("a", "A", "", "t0"), note_json("b", "B", "", "t0")),
        );
        transport.respond(201, &note_json("c", "New", "body", "t1"));
        transport.respond(200, &note_json("a", "A2", "edited", "t2"));
        transport.respond(204, "");

        notes.fetch_all().await;
        assert!(!notes.loading.get_untracked());
        assert_eq!(notes.notes.with_untracked(|n| n.len()), 2);

        let created = notes.create(payload("New", "body")).await.expect("create");
        assert_eq!(created.id, "c");
        assert_eq!(notes.notes.with_untracked(|n| ids(n).join(",")), "c,a,b");

        let updated = notes.update("a", payload("A2", "edited")).await.expect("update");
        notes.notes.with_untracked(|n| {
            let a = n.iter().find(|x| x.id == "a").expect("a present");
            assert_eq!(a, &updated);
            assert_eq!(a.modified_at, "t2");
        });

        notes.delete("b").await.expect("delete");
        assert_eq!(notes.notes.with_untracked(|n| ids(n).join(",")), "c,a");
    }

    #[tokio::test]
    async fn test_failed_writes_leave_list_untouched() {
        let (notes, transport) = collection();
        notes.notes.set(vec![note("a", "A")]);
        transport.respond(500, "");
        transport.respond(500, "");
        transport.respond(500, "");

        assert!(notes.create(payload("x", "")).await.is_err());
        assert!(notes.update("a", payload("changed", "")).await.is_err());
        assert!(notes.delete("a").await.is_err());

        assert_eq!(notes.notes.get_untracked(), vec![note("a", "A")]);
        assert!(!notes.is_busy("a"));
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_list() {
        let (notes, transport) = collection();
        notes.notes.set(vec![note("a", "A")]);
        transport.respond(503, "");

        notes.fetch_all().await;
        assert_eq!(notes.error.get_untracked().as_deref(), Some("Failed to fetch notes"));
        assert_eq!(notes.notes.get_untracked(), vec![note("a", "A")]);
        assert!(!notes.loading.get_untracked());

        transport.respond(200, "[]");
        notes.refetch().await;
        assert!(notes.error.get_untracked().is_none());
        assert!(notes.notes.get_untracked().is_empty());
    }

    #[tokio::test]
    async fn test_overlapping_write_to_same_note_is_rejected() {
        let (notes, transport) = gated_collection();
        notes.notes.set(vec![note("a", "A")]);

        let first = notes.update("a", payload("one", ""));
        let contender = async {
            transport.wait_for(1).await;
            assert!(notes.is_busy("a"));

            let err = notes
                .update("a", payload("two", ""))
                .await
                .expect_err("second write must wait");
            assert_eq!(err, NoteError::InFlight { id: "a".to_string() });
            let err = notes.delete("a").await.expect_err("delete must wait too");
            assert!(matches!(err, NoteError::InFlight { .. }));
            assert_eq!(transport.sent(), 1);

            transport.release(Method::PUT, A_URL, 200, &note_json("a", "one", "", "t1"));
        };
        let (first, ()) = tokio::join!(first, contender);
        assert_eq!(first.expect("first write").title, "one");
        assert!(!notes.is_busy("a"));

        let (again, ()) = tokio::join!(notes.update("a", payload("two", "")), async {
            transport.wait_for(2).await;
            transport.release(Method::PUT, A_URL, 200, &note_json("a", "two", "", "t2"));
        });
        again.expect("free again once the first write settled");
        assert_eq!(notes.notes.with_untracked(|n| n[0].title.clone()), "two");
    }

    #[tokio::test]
    async fn test_refresh_does_not_undo_a_newer_update() {
        let (notes, transport) = gated_collection();
        notes.notes.set(vec![note("a", "A")]);

        let refresh = notes.refresh_note("a");
        let writer = async {
            transport.wait_for(1).await;
            let (updated, ()) = tokio::join!(notes.update("a", payload("new", "")), async {
                transport.wait_for(2).await;
                transport.release(Method::PUT, A_URL, 200, &note_json("a", "new", "", "t2"));
            });
            // The GET sent before the write answers only now, with old data.
            transport.release(Method::GET, A_URL, 200, &note_json("a", "old", "", "t0"));
            updated.expect("update")
        };
        let (refreshed, updated) = tokio::join!(refresh, writer);

        assert_eq!(refreshed, Ok(None));
        notes.notes.with_untracked(|n| {
            assert_eq!(n[0], updated);
            assert_eq!(n[0].title, "new");
            assert_eq!(n[0].modified_at, "t2");
        });
    }

    #[tokio::test]
    async fn test_superseded_fetch_is_dropped() {
        let (notes, transport) = gated_collection();
        let old_list = format!("[{}]", note_json("a", "A", "", "t0"));
        let new_list = format!("[{}]", note_json("b", "B", "", "t1"));

        let first = notes.fetch_all();
        let second = async {
            transport.wait_for(1).await;
            notes.fetch_all().await;
        };
        let script = async {
            transport.wait_for(2).await;
            transport.release_newest(200, &new_list);
            while notes.loading.get_untracked() {
                tokio::task::yield_now().await;
            }
            transport.release(Method::GET, NOTES_URL, 200, &old_list);
        };
        tokio::join!(first, second, script);

        assert_eq!(notes.notes.with_untracked(|n| ids(n).join(",")), "b");
        assert!(!notes.loading.get_untracked());
        assert!(notes.error.get_untracked().is_none());
    }

    #[tokio::test]
    async fn test_refresh_note_replaces_cached_copy() {
        let (notes, transport) = collection();
        notes.notes.set(vec![note("a", "A"), note("b", "B")]);
        transport.respond(200, &note_json("b", "B-server", "fresh", "t9"));

        let fresh = notes
            .refresh_note("b")
            .await
            .expect("refresh")
            .expect("no write raced the refresh");
        assert_eq!(fresh.content, "fresh");
        assert_eq!(notes.notes.with_untracked(|n| n[1].title.clone()), "B-server");
    }

    #[tokio::test]
    async fn test_unauthorized_is_reported() {
        let (notes, transport) = collection();
        transport.respond(401, "");
        let err = notes.create(payload("x", "")).await.expect_err("401");
        assert!(err.is_unauthorized());
    }
}
