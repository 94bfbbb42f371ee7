//! # tablescope-browser
//!
//! A headless table browser on top of
//! [`tablescope_bridge::Bridge`].
//!
//! [`Browser`] keeps what a browsing UI shows: the database and table
//! lists, the open table's columns and rows, the active filters and sort
//! order, and the last SQL statement the session ran. Filters are entered
//! as [`FilterDraft`]s, validated against the table's column types and
//! turned into labelled conditions such as `Age ~ [20, ∞)`.
//!
//! ```rust,ignore
//! use tablescope_bridge::Bridge;
//! use tablescope_browser::{Browser, FilterDraft, Relation};
//! use tablescope_session::ConnectOptions;
//!
//! let mut browser = Browser::new(Bridge::mysql());
//! browser.connect(ConnectOptions::new().password("secret")).await?;
//! browser.select_database("school").await?;
//! browser.select_table("t_students").await?;
//! browser.add_filter(FilterDraft::new("Age", Relation::Ge, "20"))?;
//! let rows = browser.refresh_data().await?;
//! browser.drain_statements();
//! println!("{}", browser.statements().last().unwrap_or_default());
//! ```

mod browser;
mod error;
pub mod filter;
mod state;

pub use browser::Browser;
pub use error::{BrowserError, FilterError, Result};
pub use filter::{allowed_relations, range_label, FilterDraft, Relation};
pub use state::{StatementLog, TableState};
