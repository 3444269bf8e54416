use std::fmt;

/// Which set of summaries a list view shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MailboxView {
    Inbox,
    Sent,
    Folder(String),
}

impl MailboxView {
    /// Value sent as the `type` query parameter.
    pub fn type_param(&self) -> &str {
        match self {
            MailboxView::Inbox => "inbox",
            MailboxView::Sent => "sent",
            MailboxView::Folder(name) => name,
        }
    }

    pub fn title(&self) -> String {
        match self {
            MailboxView::Inbox => "Inbox".to_string(),
            MailboxView::Sent => "Sent".to_string(),
            MailboxView::Folder(name) => format!("Folder: {name}"),
        }
    }
}

impl fmt::Display for MailboxView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_param())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMethod {
    #[default]
    Date,
    Subject,
    Sender,
    Priority,
}

impl SortMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            SortMethod::Date => "date",
            SortMethod::Subject => "subject",
            SortMethod::Sender => "sender",
            SortMethod::Priority => "priority",
        }
    }

    pub fn next(self) -> Self {
        match self {
            SortMethod::Date => SortMethod::Subject,
            SortMethod::Subject => SortMethod::Sender,
            SortMethod::Sender => SortMethod::Priority,
            SortMethod::Priority => SortMethod::Date,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterMethod {
    #[default]
    None,
    Star,
    Trash,
}

impl FilterMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterMethod::None => "none",
            FilterMethod::Star => "star",
            FilterMethod::Trash => "trash",
        }
    }

    pub fn next(self) -> Self {
        match self {
            FilterMethod::None => FilterMethod::Star,
            FilterMethod::Star => FilterMethod::Trash,
            FilterMethod::Trash => FilterMethod::None,
        }
    }
}

/// Sort/filter/search parameters for a fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub sort: SortMethod,
    pub filter: FilterMethod,
    pub substring: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_view_uses_folder_name_as_type() {
        assert_eq!(MailboxView::Inbox.type_param(), "inbox");
        assert_eq!(MailboxView::Sent.type_param(), "sent");
        assert_eq!(MailboxView::Folder("work".into()).type_param(), "work");
    }

    #[test]
    fn sort_and_filter_cycle_back_to_default() {
        let mut s = SortMethod::default();
        for _ in 0..4 {
            s = s.next();
        }
        assert_eq!(s, SortMethod::Date);

        let mut f = FilterMethod::default();
        for _ in 0..3 {
            f = f.next();
        }
        assert_eq!(f, FilterMethod::None);
    }
}
