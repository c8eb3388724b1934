//! Pages
//!
//! One component per top-level screen.

mod admin;
mod case_detail;
mod dashboard;
mod help;
mod new_case;
mod profile;
mod sign_in;

pub use admin::AdminPage;
pub use case_detail::CaseDetailPage;
pub use dashboard::DashboardPage;
pub use help::HelpPage;
pub use new_case::NewCasePage;
pub use profile::ProfilePage;
pub use sign_in::SignInPage;
