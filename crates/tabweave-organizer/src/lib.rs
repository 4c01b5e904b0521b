//! # Tabweave Organizer
//!
//! Sorts the tabs of the current window into named tab groups.
//!
//! The tab list goes to a [`Classifier`](tabweave_protocols::Classifier) in a
//! single call. Its proposals are then applied one group at a time, merging
//! into existing groups with the same title so that repeated runs converge.

mod descriptor;
mod error;
mod organizer;
mod parse;
mod prompt;

pub use descriptor::TabDescriptor;
pub use error::OrganizeError;
pub use organizer::{OrganizeResult, OrganizerOptions, TabOrganizer, UngroupResult};
pub use parse::{parse_classification, ClassificationParse, GroupProposal};
pub use prompt::build_prompt;
