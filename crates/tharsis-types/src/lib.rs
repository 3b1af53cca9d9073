//! Shared type definitions for the Tharsis game engine.
//!
//! This crate holds the data model every other crate speaks: the closed
//! resource vocabulary, card/behavior/requirement structures parsed from
//! the card-definition JSON, payment types, and strongly-typed entity
//! identifiers. It contains no game logic -- validation and effect
//! application live in `tharsis-cards`, live entities in `tharsis-game`,
//! and event-sourced reconstruction in `tharsis-events`.

pub mod card;
pub mod enums;
pub mod ids;
pub mod payment;
pub mod resources;

pub use card::{
    Card, CardBehavior, Choice, PerCondition, Requirement, ResourceCondition, ResourceStorageSpec,
    Trigger, VictoryPointCondition,
};
pub use enums::{
    BasicResource, CardKind, CardTag, GamePhase, GlobalParameter, RequirementType, ResourceType,
    StandardProjectKind, StorageTarget, TileKind, TriggerKind, VpConditionKind,
};
pub use ids::{CardId, EventId, GameId, PlayerId};
pub use payment::{
    DiscountModifier, Payment, PaymentSubstitute, CARD_BUY_COST, STEEL_BASE_VALUE,
    TITANIUM_BASE_VALUE,
};
pub use resources::ResourceSet;
