use std::fmt;

/// Which subscription form is bound on the page.
///
/// Both forms send the same fields and get the same reply shapes back; they
/// differ only in how the form element is found and where it posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormKind {
    /// The subscriptions page form (`#add_sub_form`).
    #[default]
    AddSubscription,
    /// The bare test page, where any `form` element is bound.
    Process,
}

impl FormKind {
    /// Fixed endpoint path the form posts to.
    pub fn endpoint(self) -> &'static str {
        match self {
            FormKind::AddSubscription => "/process_add_subscription",
            FormKind::Process => "/process",
        }
    }

    /// Element id of the form, or `None` when any form element matches.
    pub fn form_id(self) -> Option<&'static str> {
        match self {
            FormKind::AddSubscription => Some("add_sub_form"),
            FormKind::Process => None,
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormKind::AddSubscription => write!(f, "add-subscription"),
            FormKind::Process => write!(f, "process"),
        }
    }
}

/// Named inputs read from the page on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldName {
    UserId,
    RssUrl,
    DailyAmount,
}

impl FieldName {
    /// Every field, in the order they are sent.
    pub const ALL: [FieldName; 3] = [FieldName::UserId, FieldName::RssUrl, FieldName::DailyAmount];

    /// Element id on the page, which doubles as the form-encoded key.
    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::UserId => "user_id",
            FieldName::RssUrl => "rss_url",
            FieldName::DailyAmount => "daily_amount",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.as_str() == name)
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered field values captured for one submission.
///
/// Inserting a field that is already present replaces its value in place,
/// so the wire order is the order fields were first inserted.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormInputSet {
    entries: Vec<(FieldName, String)>,
}

impl FormInputSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FieldName, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((field, value)),
        }
    }

    pub fn with(mut self, field: FieldName, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Key/value pairs ready for form encoding.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect()
    }
}

impl FromIterator<(FieldName, String)> for FormInputSet {
    fn from_iter<I: IntoIterator<Item = (FieldName, String)>>(iter: I) -> Self {
        let mut set = FormInputSet::new();
        for (field, value) in iter {
            set.insert(field, value);
        }
        set
    }
}
