//! Application Context
//!
//! Shared navigation state provided via Leptos Context API.

use leptos::prelude::*;

use crate::session::Session;

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Dashboard,
    NewCase,
    /// One case, by id
    CaseDetail(i64),
    Admin,
    Profile,
    Help,
    SignIn,
}

/// What a page may show for the current session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    SignInRequired,
    Denied,
}

impl Page {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::NewCase => "Register New Case",
            Self::CaseDetail(_) => "Case Details",
            Self::Admin => "Admin Dashboard",
            Self::Profile => "Profile Settings",
            Self::Help => "Help Center",
            Self::SignIn => "Sign In",
        }
    }

    /// Help and sign-in are public, Admin needs the admin role, the rest a signed-in user
    pub fn access(&self, session: &Session) -> Access {
        match self {
            Self::Help | Self::SignIn => Access::Granted,
            _ if session.user.is_none() => Access::SignInRequired,
            Self::Admin if !session.is_admin() => Access::Denied,
            _ => Access::Granted,
        }
    }

    /// Landing page for a session: admins go to the overview
    pub fn home(session: &Session) -> Self {
        if session.user.is_none() {
            Self::SignIn
        } else if session.is_admin() {
            Self::Admin
        } else {
            Self::Dashboard
        }
    }
}

/// App-wide signals provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current page - read
    pub page: ReadSignal<Page>,
    /// Current page - write
    set_page: WriteSignal<Page>,
    /// Trigger to reload cases from the backend - read
    pub reload_trigger: ReadSignal<u32>,
    /// Trigger to reload cases from the backend - write
    set_reload_trigger: WriteSignal<u32>,
}

impl AppContext {
    pub fn new(page: (ReadSignal<Page>, WriteSignal<Page>), reload_trigger: (ReadSignal<u32>, WriteSignal<u32>)) -> Self {
        Self {
            page: page.0,
            set_page: page.1,
            reload_trigger: reload_trigger.0,
            set_reload_trigger: reload_trigger.1,
        }
    }

    pub fn navigate(&self, page: Page) {
        log::debug!("navigate to {:?}", page);
        self.set_page.set(page);
    }

    /// Trigger a reload of cases
    pub fn reload(&self) {
        self.set_reload_trigger.update(|v| *v += 1);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn session(role: Option<&str>) -> Session {
        Session {
            token: Some("t".into()),
            user: Some(User {
                id: 1,
                name: "Asha".into(),
                role: role.map(str::to_string),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_access_rules() {
        let anonymous = Session::default();
        assert_eq!(Page::Help.access(&anonymous), Access::Granted);
        assert_eq!(Page::Dashboard.access(&anonymous), Access::SignInRequired);
        assert_eq!(Page::Admin.access(&anonymous), Access::SignInRequired);
        assert_eq!(Page::SignIn.access(&anonymous), Access::Granted);
        assert_eq!(Page::Profile.access(&anonymous), Access::SignInRequired);
        assert_eq!(Page::CaseDetail(4).access(&anonymous), Access::SignInRequired);

        let member = session(Some("user"));
        assert_eq!(Page::NewCase.access(&member), Access::Granted);
        assert_eq!(Page::CaseDetail(4).access(&member), Access::Granted);
        assert_eq!(Page::Admin.access(&member), Access::Denied);

        let admin = session(Some("admin"));
        assert_eq!(Page::Admin.access(&admin), Access::Granted);
    }

    #[test]
    fn test_home_page() {
        assert_eq!(Page::home(&session(Some("admin"))), Page::Admin);
        assert_eq!(Page::home(&session(None)), Page::Dashboard);
        assert_eq!(Page::home(&Session::default()), Page::SignIn);
    }
}
