use serde::{Deserialize, Serialize};

use crate::capabilities::Context;
use crate::domain::{NotificationKind, NotificationSettings, ProfileField, UserProfile, UserStats};
use crate::notice::{NoticeKind, Notices};
use crate::seed;
use crate::store::Screen;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileTab {
    #[default]
    Profile,
    Stats,
    Settings,
    Privacy,
}

impl ProfileTab {
    pub const ALL: [ProfileTab; 4] = [
        ProfileTab::Profile,
        ProfileTab::Stats,
        ProfileTab::Settings,
        ProfileTab::Privacy,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ProfileTab::Profile => "My Profile",
            ProfileTab::Stats => "My Journey",
            ProfileTab::Settings => "Notifications",
            ProfileTab::Privacy => "Security",
        }
    }
}

/// Profile screen state. Edits go to `draft` and reach `committed` only
/// through [`ProfileAction::Save`], all at once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileState {
    pub tab: ProfileTab,
    pub committed: UserProfile,
    pub draft: Option<UserProfile>,
    pub notifications: NotificationSettings,
    pub stats: UserStats,
    pub delete_confirm_open: bool,
    pub notices: Notices,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileAction {
    SelectTab(ProfileTab),
    BeginEdit,
    EditField(ProfileField, String),
    Save,
    Cancel,
    ToggleNotification(NotificationKind),
    OpenDeleteConfirm,
    CloseDeleteConfirm,
    DismissNotice(String),
    ExpireNotices,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileMetrics {
    pub editing: bool,
    pub enabled_notifications: usize,
    pub member_since: String,
}

impl ProfileState {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            tab: ProfileTab::default(),
            committed: profile,
            draft: None,
            notifications: seed::notification_settings(),
            stats: seed::user_stats(),
            delete_confirm_open: false,
            notices: Notices::default(),
        }
    }

    pub fn seeded(context: &Context) -> Self {
        Self::new(seed::profile(&context.user_name))
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// The profile as currently displayed: the draft while editing.
    pub fn displayed(&self) -> &UserProfile {
        self.draft.as_ref().unwrap_or(&self.committed)
    }

    fn apply(&mut self, action: ProfileAction, context: &Context) {
        match action {
            ProfileAction::SelectTab(tab) => self.tab = tab,
            ProfileAction::BeginEdit => self.draft = Some(self.committed.clone()),
            ProfileAction::EditField(field, value) => match self.draft.as_mut() {
                Some(draft) => draft.set_field(field, value),
                None => tracing::debug!(?field, "edit outside an edit transaction ignored"),
            },
            ProfileAction::Save => {
                if let Some(draft) = self.draft.take() {
                    self.committed = draft;
                    self.notices
                        .raise("Profile updated successfully!", NoticeKind::Success, context);
                    tracing::info!("profile saved");
                }
            }
            ProfileAction::Cancel => self.draft = None,
            ProfileAction::ToggleNotification(kind) => self.notifications.toggle(kind),
            ProfileAction::OpenDeleteConfirm => self.delete_confirm_open = true,
            ProfileAction::CloseDeleteConfirm => self.delete_confirm_open = false,
            ProfileAction::DismissNotice(id) => self.notices.dismiss(&id),
            ProfileAction::ExpireNotices => self.notices.expire(context.now(), context.notice_ttl),
        }
    }
}

impl Screen for ProfileState {
    type Action = ProfileAction;
    type Metrics = ProfileMetrics;

    fn reduce(&self, action: ProfileAction, context: &Context) -> Self {
        let mut next = self.clone();
        next.apply(action, context);
        next
    }

    fn metrics(&self, _context: &Context) -> ProfileMetrics {
        ProfileMetrics {
            editing: self.is_editing(),
            enabled_notifications: NotificationKind::ALL
                .iter()
                .filter(|kind| self.notifications.is_enabled(**kind))
                .count(),
            member_since: self.committed.join_date.format("%B %Y").to_string(),
        }
    }
}
