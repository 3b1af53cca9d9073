//! Card resolution for the Tharsis engine.
//!
//! This crate is the behavior-interpretation machine: it decides whether
//! a command is legal ([`requirements`]), whether it can be paid
//! ([`affordability`]), and applies its full effect set in a fixed
//! pipeline order ([`effects`]). The [`play`] module strings the three
//! together into the atomic play-a-card command; [`standard_projects`]
//! routes the always-available projects through the same machine; and
//! [`playability`] derives availability views on demand.
//!
//! All checks run before any mutation: a rejected command leaves game
//! state byte-for-byte unchanged.

pub mod affordability;
pub mod catalog;
pub mod effects;
pub mod play;
pub mod playability;
pub mod requirements;
pub mod standard_projects;
pub mod vp;

pub use affordability::AffordabilityError;
pub use catalog::{CardCatalog, CardLookup, CatalogError};
pub use effects::EffectError;
pub use play::{invoke_card_action, play_card, PlayError};
pub use playability::{ActionPlayability, IssueKind, PlayabilityResult, ValidationIssue};
pub use requirements::RequirementError;
pub use standard_projects::{execute_standard_project, sell_patents, StandardProject};
