//! `subtrans-backstory` - Backstory records and their XML files.
//!
//! Reads game resource files and translation files, plans how existing
//! translations carry over to a new resource set, and writes the updated
//! translation file.

pub mod error;
pub mod identifier;
pub mod model;
pub mod order;
pub mod reader;
pub mod update;
pub mod writer;
mod xml;

pub use error::BackstoryError;
pub use model::{Backstory, BackstorySlot};
pub use update::{plan_update, UpdatePlan, UpdateReport};
