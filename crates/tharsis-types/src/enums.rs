//! Enumeration types for the Tharsis engine.
//!
//! The string forms of these enums are the wire vocabulary of the
//! card-definition JSON and the event log. The vocabularies that outside
//! content can extend (resource types, card tags, requirement types,
//! storage targets) parse unrecognized strings into an explicit catch-all
//! variant instead of failing: effect stages ignore the catch-all with a
//! warning, and requirement checks treat it as a forward-compatible no-op.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Resource vocabulary
// ---------------------------------------------------------------------------

/// A resource-condition type from the card-definition vocabulary.
///
/// Covers basic resources, their production variants, tile placements,
/// card draw mechanics, global parameters, card-storage resources, and
/// the modifier vocabulary (discounts, value modifiers, payment
/// substitutes). Any string outside the closed set parses as
/// [`ResourceType::Other`] and is ignored by effect stages.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(from = "String", into = "String")]
#[ts(export, export_to = "bindings/")]
pub enum ResourceType {
    /// Megacredits.
    Credits,
    /// Steel.
    Steel,
    /// Titanium.
    Titanium,
    /// Plants.
    Plants,
    /// Energy.
    Energy,
    /// Heat.
    Heat,
    /// Megacredit production.
    CreditsProduction,
    /// Steel production.
    SteelProduction,
    /// Titanium production.
    TitaniumProduction,
    /// Plant production.
    PlantsProduction,
    /// Energy production.
    EnergyProduction,
    /// Heat production.
    HeatProduction,
    /// Queue a city tile placement.
    CityPlacement,
    /// Queue an ocean tile placement.
    OceanPlacement,
    /// Queue a greenery tile placement.
    GreeneryPlacement,
    /// Draw cards the player must keep.
    CardDraw,
    /// Reveal cards for a keep/buy decision.
    CardPeek,
    /// Keep revealed cards for free.
    CardTake,
    /// Option to buy revealed cards.
    CardBuy,
    /// Global temperature change, in degrees.
    Temperature,
    /// Global oxygen change, in percent steps.
    Oxygen,
    /// Ocean count change.
    Oceans,
    /// Terraform rating change.
    Tr,
    /// Animals stored on a card.
    Animals,
    /// Microbes stored on a card.
    Microbes,
    /// Floaters stored on a card.
    Floaters,
    /// Science resources stored on a card.
    Science,
    /// Asteroid resources stored on a card.
    Asteroid,
    /// Credit discount on qualifying card costs.
    Discount,
    /// Raises the megacredit value of a payment resource.
    ValueModifier,
    /// Registers an alternate payment currency.
    PaymentSubstitute,
    /// Unrecognized resource type, preserved verbatim.
    Other(String),
}

impl ResourceType {
    /// The canonical wire string for this resource type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Credits => "credits",
            Self::Steel => "steel",
            Self::Titanium => "titanium",
            Self::Plants => "plants",
            Self::Energy => "energy",
            Self::Heat => "heat",
            Self::CreditsProduction => "credits-production",
            Self::SteelProduction => "steel-production",
            Self::TitaniumProduction => "titanium-production",
            Self::PlantsProduction => "plants-production",
            Self::EnergyProduction => "energy-production",
            Self::HeatProduction => "heat-production",
            Self::CityPlacement => "city-placement",
            Self::OceanPlacement => "ocean-placement",
            Self::GreeneryPlacement => "greenery-placement",
            Self::CardDraw => "card-draw",
            Self::CardPeek => "card-peek",
            Self::CardTake => "card-take",
            Self::CardBuy => "card-buy",
            Self::Temperature => "temperature",
            Self::Oxygen => "oxygen",
            Self::Oceans => "oceans",
            Self::Tr => "tr",
            Self::Animals => "animals",
            Self::Microbes => "microbes",
            Self::Floaters => "floaters",
            Self::Science => "science",
            Self::Asteroid => "asteroid",
            Self::Discount => "discount",
            Self::ValueModifier => "value-modifier",
            Self::PaymentSubstitute => "payment-substitute",
            Self::Other(raw) => raw,
        }
    }

    /// Whether this type is a per-card storage resource (kept in a
    /// card's own bucket, not the player's resource pool).
    pub const fn is_card_storage(&self) -> bool {
        matches!(
            self,
            Self::Animals | Self::Microbes | Self::Floaters | Self::Science | Self::Asteroid
        )
    }
}

impl From<String> for ResourceType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "credits" => Self::Credits,
            "steel" => Self::Steel,
            "titanium" => Self::Titanium,
            "plants" => Self::Plants,
            "energy" => Self::Energy,
            "heat" => Self::Heat,
            "credits-production" => Self::CreditsProduction,
            "steel-production" => Self::SteelProduction,
            "titanium-production" => Self::TitaniumProduction,
            "plants-production" => Self::PlantsProduction,
            "energy-production" => Self::EnergyProduction,
            "heat-production" => Self::HeatProduction,
            "city-placement" => Self::CityPlacement,
            "ocean-placement" => Self::OceanPlacement,
            "greenery-placement" => Self::GreeneryPlacement,
            "card-draw" => Self::CardDraw,
            "card-peek" => Self::CardPeek,
            "card-take" => Self::CardTake,
            "card-buy" => Self::CardBuy,
            "temperature" => Self::Temperature,
            "oxygen" => Self::Oxygen,
            "oceans" => Self::Oceans,
            "tr" => Self::Tr,
            "animals" => Self::Animals,
            "microbes" => Self::Microbes,
            "floaters" => Self::Floaters,
            "science" => Self::Science,
            "asteroid" => Self::Asteroid,
            "discount" => Self::Discount,
            "value-modifier" => Self::ValueModifier,
            "payment-substitute" => Self::PaymentSubstitute,
            _ => Self::Other(raw),
        }
    }
}

impl From<ResourceType> for String {
    fn from(value: ResourceType) -> Self {
        value.as_str().to_owned()
    }
}

impl core::fmt::Display for ResourceType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Basic resources
// ---------------------------------------------------------------------------

/// One of the six resources every player holds in their pool and
/// produces each generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum BasicResource {
    /// Megacredits.
    Credits,
    /// Steel.
    Steel,
    /// Titanium.
    Titanium,
    /// Plants.
    Plants,
    /// Energy.
    Energy,
    /// Heat.
    Heat,
}

impl BasicResource {
    /// All six basic resources, in canonical order.
    pub const ALL: [Self; 6] = [
        Self::Credits,
        Self::Steel,
        Self::Titanium,
        Self::Plants,
        Self::Energy,
        Self::Heat,
    ];

    /// The wire string for this resource.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Credits => "credits",
            Self::Steel => "steel",
            Self::Titanium => "titanium",
            Self::Plants => "plants",
            Self::Energy => "energy",
            Self::Heat => "heat",
        }
    }

    /// Map a pool-side [`ResourceType`] (e.g. `credits`) to the basic
    /// resource it names, or `None` for anything else.
    pub const fn from_pool(resource: &ResourceType) -> Option<Self> {
        match resource {
            ResourceType::Credits => Some(Self::Credits),
            ResourceType::Steel => Some(Self::Steel),
            ResourceType::Titanium => Some(Self::Titanium),
            ResourceType::Plants => Some(Self::Plants),
            ResourceType::Energy => Some(Self::Energy),
            ResourceType::Heat => Some(Self::Heat),
            _ => None,
        }
    }

    /// Map a production-side [`ResourceType`] (e.g. `credits-production`)
    /// to the basic resource it names, or `None` for anything else.
    pub const fn from_production(resource: &ResourceType) -> Option<Self> {
        match resource {
            ResourceType::CreditsProduction => Some(Self::Credits),
            ResourceType::SteelProduction => Some(Self::Steel),
            ResourceType::TitaniumProduction => Some(Self::Titanium),
            ResourceType::PlantsProduction => Some(Self::Plants),
            ResourceType::EnergyProduction => Some(Self::Energy),
            ResourceType::HeatProduction => Some(Self::Heat),
            _ => None,
        }
    }
}

impl core::fmt::Display for BasicResource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Card tags
// ---------------------------------------------------------------------------

/// A tag printed on a card.
///
/// Tags gate payment currencies (building allows steel, space allows
/// titanium), feed tag-count requirements, and scale per-tag effects.
/// [`CardTag::Wild`] counts toward any requested tag. Unknown tags parse
/// as [`CardTag::Other`] and never match a requirement.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(from = "String", into = "String")]
#[ts(export, export_to = "bindings/")]
pub enum CardTag {
    /// Building tag; allows paying with steel.
    Building,
    /// Space tag; allows paying with titanium.
    Space,
    /// Earth tag.
    Earth,
    /// Science tag.
    Science,
    /// Power tag.
    Power,
    /// Microbe tag.
    Microbe,
    /// Animal tag.
    Animal,
    /// Plant tag.
    Plant,
    /// Event tag.
    Event,
    /// City tag.
    City,
    /// Jovian tag.
    Jovian,
    /// Wild tag; counts as any tag for requirements.
    Wild,
    /// Unrecognized tag, preserved verbatim.
    Other(String),
}

impl CardTag {
    /// The canonical wire string for this tag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Building => "building",
            Self::Space => "space",
            Self::Earth => "earth",
            Self::Science => "science",
            Self::Power => "power",
            Self::Microbe => "microbe",
            Self::Animal => "animal",
            Self::Plant => "plant",
            Self::Event => "event",
            Self::City => "city",
            Self::Jovian => "jovian",
            Self::Wild => "wild",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for CardTag {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "building" => Self::Building,
            "space" => Self::Space,
            "earth" => Self::Earth,
            "science" => Self::Science,
            "power" => Self::Power,
            "microbe" => Self::Microbe,
            "animal" => Self::Animal,
            "plant" => Self::Plant,
            "event" => Self::Event,
            "city" => Self::City,
            "jovian" => Self::Jovian,
            "wild" => Self::Wild,
            _ => Self::Other(raw),
        }
    }
}

impl From<CardTag> for String {
    fn from(value: CardTag) -> Self {
        value.as_str().to_owned()
    }
}

impl core::fmt::Display for CardTag {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Card kinds and triggers
// ---------------------------------------------------------------------------

/// The printed kind of a card.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum CardKind {
    /// Green card: immediate effects only.
    #[default]
    Automated,
    /// Blue card: carries ongoing or manual behaviors.
    Active,
    /// Red card: one-shot event.
    Event,
    /// Corporation card.
    Corporation,
}

/// When a behavior fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum TriggerKind {
    /// Fires when the card is played. With a condition attached the
    /// behavior is passive instead and is not applied immediately.
    Auto,
    /// Becomes a standing action the player may invoke later.
    Manual,
}

/// Where a card-storage output is directed.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(from = "String", into = "String")]
#[ts(export, export_to = "bindings/")]
pub enum StorageTarget {
    /// The bucket of the card being played.
    SelfCard,
    /// A player-chosen card among their played cards.
    AnyCard,
    /// Unrecognized target, preserved verbatim; effect stages skip it.
    Other(String),
}

impl StorageTarget {
    /// The canonical wire string for this target.
    pub fn as_str(&self) -> &str {
        match self {
            Self::SelfCard => "self-card",
            Self::AnyCard => "any-card",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for StorageTarget {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "self-card" => Self::SelfCard,
            "any-card" => Self::AnyCard,
            _ => Self::Other(raw),
        }
    }
}

impl From<StorageTarget> for String {
    fn from(value: StorageTarget) -> Self {
        value.as_str().to_owned()
    }
}

// ---------------------------------------------------------------------------
// Requirements
// ---------------------------------------------------------------------------

/// The quantity a card requirement constrains.
///
/// Unknown requirement types parse as [`RequirementType::Other`] and
/// always pass validation (forward-compatible no-op).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(from = "String", into = "String")]
#[ts(export, export_to = "bindings/")]
pub enum RequirementType {
    /// Global temperature, in degrees Celsius.
    Temperature,
    /// Global oxygen, in percent.
    Oxygen,
    /// Placed ocean count.
    Oceans,
    /// The player's terraform rating.
    TerraformRating,
    /// Count of a tag across the player's played cards and corporation.
    Tags,
    /// One of the player's production values.
    Production,
    /// One of the player's resource pool values.
    Resource,
    /// Unrecognized requirement type; always passes.
    Other(String),
}

impl RequirementType {
    /// The canonical wire string for this requirement type.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Temperature => "temperature",
            Self::Oxygen => "oxygen",
            Self::Oceans => "oceans",
            Self::TerraformRating => "terraform-rating",
            Self::Tags => "tags",
            Self::Production => "production",
            Self::Resource => "resource",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for RequirementType {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "temperature" => Self::Temperature,
            "oxygen" => Self::Oxygen,
            "oceans" => Self::Oceans,
            // Both forms appear in card data.
            "terraform-rating" | "tr" => Self::TerraformRating,
            "tags" => Self::Tags,
            "production" => Self::Production,
            "resource" => Self::Resource,
            _ => Self::Other(raw),
        }
    }
}

impl From<RequirementType> for String {
    fn from(value: RequirementType) -> Self {
        value.as_str().to_owned()
    }
}

// ---------------------------------------------------------------------------
// Victory points
// ---------------------------------------------------------------------------

/// How a card's victory point condition resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum VpConditionKind {
    /// Fixed amount, awarded when the card is played.
    Fixed,
    /// Awarded once when a condition is first met; resolved by the
    /// on-demand recalculation layer, never by the immediate pipeline.
    Once,
    /// Awarded per counted unit (tag, storage resource); computed at
    /// final scoring by the on-demand calculator.
    Per,
}

// ---------------------------------------------------------------------------
// Game structure
// ---------------------------------------------------------------------------

/// The phase a game is in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum GamePhase {
    /// Waiting for players and corporation selection.
    #[default]
    Setup,
    /// Drafting/buying project cards.
    Research,
    /// Players take turns acting.
    Action,
    /// Production is applied at generation end.
    Production,
    /// Final VP computation.
    FinalScoring,
    /// The game is over.
    Ended,
}

/// One of the three terraforming parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum GlobalParameter {
    /// Temperature, -30..=8 in steps of 2.
    Temperature,
    /// Oxygen, 0..=14 in steps of 1.
    Oxygen,
    /// Oceans, 0..=9 in steps of 1.
    Oceans,
}

/// A tile kind placeable on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum TileKind {
    /// City tile.
    City,
    /// Ocean tile.
    Ocean,
    /// Greenery tile.
    Greenery,
}

/// One of the standard projects every player may always attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "kebab-case")]
#[ts(export, export_to = "bindings/")]
pub enum StandardProjectKind {
    /// Discard cards from hand for 1 M€ each.
    SellPatents,
    /// 11 M€ for +1 energy production.
    PowerPlant,
    /// 14 M€ to raise temperature one step.
    Asteroid,
    /// 18 M€ to place an ocean tile.
    Aquifer,
    /// 23 M€ to place a greenery tile.
    Greenery,
    /// 25 M€ to place a city tile and gain +1 M€ production.
    City,
    /// Convert 8 plants into a greenery placement.
    ConvertPlants,
    /// Convert 8 heat into a temperature step.
    ConvertHeat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_type_roundtrips_known_values() {
        for wire in [
            "credits",
            "steel-production",
            "city-placement",
            "card-peek",
            "temperature",
            "tr",
            "animals",
            "value-modifier",
        ] {
            let parsed = ResourceType::from(wire.to_owned());
            assert_eq!(parsed.as_str(), wire);
            assert!(!matches!(parsed, ResourceType::Other(_)));
        }
    }

    #[test]
    fn unknown_resource_type_is_preserved() {
        let parsed = ResourceType::from("colony-fleet".to_owned());
        assert_eq!(parsed, ResourceType::Other("colony-fleet".to_owned()));
        assert_eq!(parsed.as_str(), "colony-fleet");
    }

    #[test]
    fn resource_type_json_uses_wire_strings() {
        let json = serde_json::to_string(&ResourceType::PlantsProduction).ok();
        assert_eq!(json.as_deref(), Some("\"plants-production\""));
        let back: Result<ResourceType, _> = serde_json::from_str("\"ocean-placement\"");
        assert_eq!(back.ok(), Some(ResourceType::OceanPlacement));
    }

    #[test]
    fn card_storage_classification() {
        assert!(ResourceType::Animals.is_card_storage());
        assert!(ResourceType::Science.is_card_storage());
        assert!(ResourceType::Asteroid.is_card_storage());
        assert!(!ResourceType::Plants.is_card_storage());
        assert!(!ResourceType::CardDraw.is_card_storage());
    }

    #[test]
    fn basic_resource_pool_and_production_mapping() {
        assert_eq!(
            BasicResource::from_pool(&ResourceType::Heat),
            Some(BasicResource::Heat)
        );
        assert_eq!(BasicResource::from_pool(&ResourceType::HeatProduction), None);
        assert_eq!(
            BasicResource::from_production(&ResourceType::HeatProduction),
            Some(BasicResource::Heat)
        );
        assert_eq!(BasicResource::from_production(&ResourceType::Heat), None);
    }

    #[test]
    fn requirement_type_accepts_both_tr_spellings() {
        assert_eq!(
            RequirementType::from("tr".to_owned()),
            RequirementType::TerraformRating
        );
        assert_eq!(
            RequirementType::from("terraform-rating".to_owned()),
            RequirementType::TerraformRating
        );
    }

    #[test]
    fn unknown_tag_is_preserved() {
        let tag = CardTag::from("venus".to_owned());
        assert_eq!(tag, CardTag::Other("venus".to_owned()));
        assert_eq!(tag.as_str(), "venus");
    }

    #[test]
    fn storage_target_parses_wire_values() {
        assert_eq!(
            StorageTarget::from("self-card".to_owned()),
            StorageTarget::SelfCard
        );
        assert_eq!(
            StorageTarget::from("any-card".to_owned()),
            StorageTarget::AnyCard
        );
        assert!(matches!(
            StorageTarget::from("steal-from-any-card".to_owned()),
            StorageTarget::Other(_)
        ));
    }
}
