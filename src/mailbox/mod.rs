use ratatui::widgets::ListState;

use crate::api::MailBackend;
use crate::domain::email::{EmailId, EmailSummary};
use crate::domain::mailbox::{ListQuery, MailboxView};

/// Ids ticked in a list view, in the order they were ticked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckedEmails {
    ids: Vec<EmailId>,
}

impl CheckedEmails {
    pub fn toggle(&mut self, id: &EmailId) {
        if let Some(pos) = self.ids.iter().position(|x| x == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id.clone());
        }
    }

    pub fn contains(&self, id: &EmailId) -> bool {
        self.ids.contains(id)
    }

    pub fn ids(&self) -> &[EmailId] {
        &self.ids
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }
}

/// One mounted mailbox list: its summaries, selection and checked set.
///
/// The sort/filter/search query is owned by the caller and only read when
/// the list is mounted or `apply` is called.
#[derive(Debug)]
pub struct ListView {
    pub view: MailboxView,
    owner: String,
    pub items: Vec<EmailSummary>,
    pub checked: CheckedEmails,
    pub list_state: ListState,
    pub target_folder: Option<String>,
}

impl ListView {
    pub fn mount(
        view: MailboxView,
        owner: impl Into<String>,
        query: &ListQuery,
        backend: &dyn MailBackend,
    ) -> Self {
        let mut lv = Self {
            view,
            owner: owner.into(),
            items: vec![],
            checked: CheckedEmails::default(),
            list_state: ListState::default(),
            target_folder: None,
        };
        lv.load(query, backend);
        lv
    }

    /// Re-fetch with the query as it stands now.
    pub fn apply(&mut self, query: &ListQuery, backend: &dyn MailBackend) {
        self.load(query, backend);
    }

    fn load(&mut self, query: &ListQuery, backend: &dyn MailBackend) {
        match backend.fetch_emails(&self.owner, &self.view, query) {
            Ok(items) => {
                log::info!("Fetched {} emails for {}", items.len(), self.view);
                self.items = items;
                if self.items.is_empty() {
                    self.list_state.select(None);
                } else {
                    let idx = self
                        .list_state
                        .selected()
                        .unwrap_or(0)
                        .min(self.items.len() - 1);
                    self.list_state.select(Some(idx));
                }
            }
            Err(e) => log::error!("Error fetching {} emails: {e:#}", self.view),
        }
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn selected(&self) -> Option<&EmailSummary> {
        let idx = self.list_state.selected()?;
        self.items.get(idx)
    }

    pub fn move_selection(&mut self, delta: i32) {
        if self.items.is_empty() {
            self.list_state.select(None);
            return;
        }
        let cur = self.list_state.selected().unwrap_or(0) as i32;
        let len = self.items.len() as i32;
        let next = (cur + delta).clamp(0, len - 1) as usize;
        self.list_state.select(Some(next));
    }

    pub fn toggle_check(&mut self, id: &EmailId) {
        self.checked.toggle(id);
    }

    pub fn toggle_selected(&mut self) {
        if let Some(id) = self.selected().map(|e| e.id.clone()) {
            self.toggle_check(&id);
        }
    }

    pub fn can_move(&self) -> bool {
        self.view == MailboxView::Inbox
    }

    pub fn select_folder(&mut self, folder: impl Into<String>) {
        self.target_folder = Some(folder.into());
    }

    /// Ask the backend to delete every checked email. The local list is left
    /// as it is until the next fetch.
    pub fn delete_checked(&mut self, backend: &dyn MailBackend) {
        if self.checked.is_empty() {
            log::warn!("Delete ignored: no emails checked");
            return;
        }
        match backend.delete_emails(&self.owner, self.checked.ids()) {
            Ok(()) => log::info!("Deleted {} emails", self.checked.len()),
            Err(e) => log::error!("Error deleting emails: {e:#}"),
        }
    }

    /// File every checked email under the selected folder. Inbox only.
    pub fn move_checked(&mut self, backend: &dyn MailBackend) {
        if !self.can_move() {
            log::warn!("Move ignored: only available in the inbox");
            return;
        }
        let Some(folder) = self.target_folder.as_deref() else {
            log::warn!("Move ignored: no destination folder selected");
            return;
        };
        if self.checked.is_empty() {
            log::warn!("Move ignored: no emails checked");
            return;
        }
        match backend.add_to_folder(&self.owner, self.checked.ids(), folder) {
            Ok(()) => log::info!("Moved {} emails to {folder}", self.checked.len()),
            Err(e) => log::error!("Error moving emails to {folder}: {e:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{Call, RecordingBackend, summary};
    use crate::domain::mailbox::{FilterMethod, SortMethod};

    const ME: &str = "me@example.com";

    fn inbox(backend: &RecordingBackend) -> ListView {
        ListView::mount(MailboxView::Inbox, ME, &ListQuery::default(), backend)
    }

    #[test]
    fn mount_fetches_once_with_current_query() {
        let backend = RecordingBackend::with_summaries(vec![summary("1", "a"), summary("2", "b")]);
        let query = ListQuery {
            sort: SortMethod::Sender,
            filter: FilterMethod::Trash,
            substring: "bob".into(),
        };
        let lv = ListView::mount(MailboxView::Sent, ME, &query, &backend);

        assert_eq!(lv.items.len(), 2);
        assert_eq!(lv.list_state.selected(), Some(0));
        assert_eq!(
            *backend.calls.borrow(),
            vec![Call::Fetch {
                owner: ME.into(),
                view: MailboxView::Sent,
                query,
            }]
        );
    }

    #[test]
    fn changing_query_without_apply_does_not_fetch() {
        let backend = RecordingBackend::default();
        let mut query = ListQuery::default();
        let mut lv = ListView::mount(MailboxView::Inbox, ME, &query, &backend);
        assert_eq!(backend.fetch_count(), 1);

        query.sort = query.sort.next();
        query.filter = query.filter.next();
        query.substring.push('x');
        assert_eq!(backend.fetch_count(), 1);

        lv.apply(&query, &backend);
        assert_eq!(backend.fetch_count(), 2);
        match backend.calls.borrow().last() {
            Some(Call::Fetch { query: q, .. }) => assert_eq!(q, &query),
            other => panic!("unexpected call {other:?}"),
        }
    }

    #[test]
    fn toggling_twice_restores_checked_set() {
        let backend = RecordingBackend::with_summaries(vec![summary("1", "a"), summary("2", "b")]);
        let mut lv = inbox(&backend);
        lv.toggle_check(&EmailId::new("2"));
        let before = lv.checked.clone();

        lv.toggle_check(&EmailId::new("1"));
        lv.toggle_check(&EmailId::new("1"));

        assert_eq!(lv.checked, before);
    }

    #[test]
    fn delete_sends_checked_ids_and_keeps_local_list() {
        let backend = RecordingBackend::with_summaries(vec![summary("1", "a"), summary("2", "b")]);
        let mut lv = inbox(&backend);
        lv.toggle_selected();
        lv.move_selection(1);
        lv.toggle_selected();

        lv.delete_checked(&backend);

        assert_eq!(
            backend.calls.borrow().last(),
            Some(&Call::Delete {
                owner: ME.into(),
                ids: vec![EmailId::new("1"), EmailId::new("2")],
            })
        );
        assert_eq!(lv.items.len(), 2);
    }

    #[test]
    fn move_requires_inbox_and_folder() {
        let backend = RecordingBackend::with_summaries(vec![summary("1", "a")]);
        let mut sent = ListView::mount(MailboxView::Sent, ME, &ListQuery::default(), &backend);
        sent.toggle_selected();
        sent.select_folder("work");
        sent.move_checked(&backend);

        let mut lv = inbox(&backend);
        lv.toggle_selected();
        lv.move_checked(&backend);
        assert!(
            !backend
                .calls
                .borrow()
                .iter()
                .any(|c| matches!(c, Call::Move { .. }))
        );

        lv.select_folder("work");
        lv.move_checked(&backend);
        assert_eq!(
            backend.calls.borrow().last(),
            Some(&Call::Move {
                owner: ME.into(),
                ids: vec![EmailId::new("1")],
                folder: "work".into(),
            })
        );
    }

    #[test]
    fn failed_fetch_keeps_previous_items() {
        let ok = RecordingBackend::with_summaries(vec![summary("1", "a")]);
        let mut lv = inbox(&ok);
        lv.apply(&ListQuery::default(), &RecordingBackend::failing());
        assert_eq!(lv.items.len(), 1);
    }

    #[test]
    fn failed_delete_is_swallowed() {
        let backend = RecordingBackend::failing();
        let mut lv = ListView::mount(MailboxView::Inbox, ME, &ListQuery::default(), &backend);
        lv.toggle_check(&EmailId::new("9"));
        lv.delete_checked(&backend);
        assert_eq!(lv.checked.len(), 1);
    }
}
