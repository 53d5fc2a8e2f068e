//! Server-rendered HTML pages
//!
//! Every interpolated value goes through [`crate::utils::html::escape`].

mod clients;
mod dashboard;
mod intake;
mod layout;
mod links;
mod settings;

pub use clients::{client_detail_page, edit_client_page};
pub use dashboard::dashboard_page;
pub use intake::{IntakeFormContext, intake_form_page};
pub use layout::page;
pub use links::links_page;
pub use settings::settings_page;
