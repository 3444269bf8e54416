use anyhow::{Result, anyhow};
use ratatui::widgets::ListState;

use crate::api::MailBackend;
use crate::compose::{ComposeForm, SubmitOutcome};
use crate::domain::mailbox::{ListQuery, MailboxView};
use crate::folders::FolderStore;
use crate::mailbox::ListView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Content,
}

/// Static entries of the side bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Inbox,
    Sent,
    Folders,
    Compose,
}

impl Section {
    pub const ALL: [Section; 4] = [
        Section::Inbox,
        Section::Sent,
        Section::Folders,
        Section::Compose,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Inbox => "Inbox",
            Section::Sent => "Sent",
            Section::Folders => "Folders",
            Section::Compose => "Compose",
        }
    }
}

/// Content component currently mounted next to the bars.
#[derive(Debug)]
pub enum Page {
    Mailbox(ListView),
    Folders,
    Compose(ComposeForm),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Search,
    NewFolder,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    pub kind: InputKind,
    pub buffer: String,
}

#[derive(Debug, Clone)]
pub struct Account {
    pub address: String,
    pub display_name: String,
}

pub struct AppState {
    pub account: Account,
    pub folders: FolderStore,

    /// Sort/filter/search for list views. Read on mount and on apply only.
    pub query: ListQuery,

    pub page: Page,
    pub focus: Focus,
    pub sidebar: ListState,

    /// Selection in the folder manager.
    pub folder_list: ListState,
    /// Open destination dropdown for a bulk move.
    pub folder_picker: Option<ListState>,

    pub input: Option<TextInput>,
    /// Modal message; blocks all other input until dismissed.
    pub alert: Option<String>,
    pub status: String,
    /// Whether the selected summary is shown as a full card.
    pub card_open: bool,
}

impl AppState {
    pub fn new(account: Account, folders: FolderStore) -> Self {
        let mut sidebar = ListState::default();
        sidebar.select(Some(0));
        Self {
            account,
            folders,
            query: ListQuery::default(),
            page: Page::Folders,
            focus: Focus::Sidebar,
            sidebar,
            folder_list: ListState::default(),
            folder_picker: None,
            input: None,
            alert: None,
            status: String::new(),
            card_open: false,
        }
    }

    pub fn section(&self) -> Section {
        let idx = self.sidebar.selected().unwrap_or(0);
        Section::ALL[idx.min(Section::ALL.len() - 1)]
    }

    pub fn move_sidebar(&mut self, delta: i32) {
        let cur = self.sidebar.selected().unwrap_or(0) as i32;
        let next = (cur + delta).clamp(0, Section::ALL.len() as i32 - 1) as usize;
        self.sidebar.select(Some(next));
    }

    /// Tear down the current page and mount the one for `section`.
    pub fn navigate(&mut self, section: Section, backend: &dyn MailBackend) {
        if let Some(pos) = Section::ALL.iter().position(|s| *s == section) {
            self.sidebar.select(Some(pos));
        }
        self.unmount_page(backend);
        let page = match section {
            Section::Inbox => Page::Mailbox(self.mount_list(MailboxView::Inbox, backend)),
            Section::Sent => Page::Mailbox(self.mount_list(MailboxView::Sent, backend)),
            Section::Folders => Page::Folders,
            Section::Compose => Page::Compose(ComposeForm::new()),
        };
        self.set_page(page);
    }

    pub fn open_folder(&mut self, name: &str, backend: &dyn MailBackend) {
        self.unmount_page(backend);
        let lv = self.mount_list(MailboxView::Folder(name.to_string()), backend);
        self.set_page(Page::Mailbox(lv));
    }

    /// Runs teardown for whatever is mounted. Called before quitting.
    ///
    /// There is no frame left to draw an alert in, so a failed final draft
    /// comes back as the error instead.
    pub fn shutdown(&mut self, backend: &dyn MailBackend) -> Result<()> {
        self.unmount_page(backend);
        match self.alert.take() {
            Some(alert) => Err(anyhow!(alert)),
            None => Ok(()),
        }
    }

    fn mount_list(&self, view: MailboxView, backend: &dyn MailBackend) -> ListView {
        ListView::mount(view, self.account.address.clone(), &self.query, backend)
    }

    fn set_page(&mut self, page: Page) {
        self.page = page;
        self.focus = Focus::Content;
        self.card_open = false;
        self.folder_picker = None;
        self.input = None;
    }

    fn unmount_page(&mut self, backend: &dyn MailBackend) {
        if let Page::Compose(form) = &mut self.page {
            let outcome = form.unmount(backend, &self.account.address);
            self.report(outcome);
        }
    }

    pub fn submit_compose(&mut self, backend: &dyn MailBackend) {
        let Page::Compose(form) = &mut self.page else {
            return;
        };
        let outcome = form.submit(backend, &self.account.address, false);
        self.report(Some(outcome));
    }

    fn report(&mut self, outcome: Option<SubmitOutcome>) {
        match outcome {
            Some(SubmitOutcome::Delivered) => self.status = "Email handed to server".into(),
            Some(SubmitOutcome::Failed { alert }) => self.alert = Some(alert),
            Some(SubmitOutcome::Incomplete(msg)) => self.status = msg.to_string(),
            None => {}
        }
    }

    pub fn list_view_mut(&mut self) -> Option<&mut ListView> {
        match &mut self.page {
            Page::Mailbox(lv) => Some(lv),
            _ => None,
        }
    }

    pub fn selected_folder(&self) -> Option<String> {
        let idx = self.folder_list.selected()?;
        self.folders.list().get(idx).cloned()
    }

    pub fn move_folder_selection(&mut self, delta: i32) {
        let len = self.folders.list().len();
        if len == 0 {
            self.folder_list.select(None);
            return;
        }
        let cur = self.folder_list.selected().unwrap_or(0) as i32;
        let next = (cur + delta).clamp(0, len as i32 - 1) as usize;
        self.folder_list.select(Some(next));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::{RecordingBackend, summary};
    use crate::compose::SEND_FAILED_ALERT;
    use crate::domain::email::EmailId;

    fn state() -> AppState {
        let account = Account {
            address: "me@example.com".into(),
            display_name: "Me".into(),
        };
        AppState::new(account, FolderStore::new(vec!["work".into()]))
    }

    #[test]
    fn shutdown_reports_failed_final_draft() {
        let backend = RecordingBackend::failing();
        let mut st = state();
        st.navigate(Section::Compose, &backend);
        if let Page::Compose(form) = &mut st.page {
            form.body = "unsaved".into();
        }

        let err = st.shutdown(&backend).unwrap_err();
        assert_eq!(err.to_string(), SEND_FAILED_ALERT);
        assert_eq!(backend.sent().len(), 1);
        assert!(st.alert.is_none());
    }

    #[test]
    fn shutdown_with_clean_page_is_ok() {
        let backend = RecordingBackend::default();
        let mut st = state();
        st.navigate(Section::Compose, &backend);
        assert!(st.shutdown(&backend).is_ok());
        assert!(backend.sent().is_empty());
    }

    #[test]
    fn remounting_a_list_clears_checked_emails() {
        let backend = RecordingBackend::with_summaries(vec![summary("1", "a"), summary("2", "b")]);
        let mut st = state();
        st.navigate(Section::Inbox, &backend);
        if let Some(lv) = st.list_view_mut() {
            lv.toggle_check(&EmailId::new("2"));
            assert_eq!(lv.checked.len(), 1);
        }

        st.navigate(Section::Inbox, &backend);
        let lv = st.list_view_mut().unwrap();
        assert!(lv.checked.is_empty());
        assert_eq!(lv.items.len(), 2);
    }
}
