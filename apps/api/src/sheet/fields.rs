//! Canonical field enumeration — the closed set of character-sheet attributes.
//!
//! Both the alias table (as its range) and the template map (as its domain) are
//! keyed by `CanonicalField`, so adding a field here is the only way to teach the
//! parser and the filler about a new attribute.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalField {
    Name,
    Race,
    Class,
    Background,
    Alignment,
    Level,
    Gender,
    Age,
    Strength,
    StrengthBonus,
    Dexterity,
    DexterityBonus,
    Constitution,
    ConstitutionBonus,
    Intelligence,
    IntelligenceBonus,
    Wisdom,
    WisdomBonus,
    Charisma,
    CharismaBonus,
    HitDice,
    Skills,
    ToolProficiencies,
    Languages,
    ArmorClass,
    Initiative,
    Speed,
    HitPoints,
    AttacksAndSpells,
    Equipment,
    RacialTraits,
    ClassFeatures,
    BackgroundFeature,
    SpecialFeature,
    PersonalityTraits,
    Ideals,
    Bonds,
    Flaws,
}

impl CanonicalField {
    /// Every member, in declaration order.
    pub const ALL: [CanonicalField; 38] = [
        CanonicalField::Name,
        CanonicalField::Race,
        CanonicalField::Class,
        CanonicalField::Background,
        CanonicalField::Alignment,
        CanonicalField::Level,
        CanonicalField::Gender,
        CanonicalField::Age,
        CanonicalField::Strength,
        CanonicalField::StrengthBonus,
        CanonicalField::Dexterity,
        CanonicalField::DexterityBonus,
        CanonicalField::Constitution,
        CanonicalField::ConstitutionBonus,
        CanonicalField::Intelligence,
        CanonicalField::IntelligenceBonus,
        CanonicalField::Wisdom,
        CanonicalField::WisdomBonus,
        CanonicalField::Charisma,
        CanonicalField::CharismaBonus,
        CanonicalField::HitDice,
        CanonicalField::Skills,
        CanonicalField::ToolProficiencies,
        CanonicalField::Languages,
        CanonicalField::ArmorClass,
        CanonicalField::Initiative,
        CanonicalField::Speed,
        CanonicalField::HitPoints,
        CanonicalField::AttacksAndSpells,
        CanonicalField::Equipment,
        CanonicalField::RacialTraits,
        CanonicalField::ClassFeatures,
        CanonicalField::BackgroundFeature,
        CanonicalField::SpecialFeature,
        CanonicalField::PersonalityTraits,
        CanonicalField::Ideals,
        CanonicalField::Bonds,
        CanonicalField::Flaws,
    ];

    /// The six ability scores paired with the field holding their modifier.
    pub const ABILITIES: [(CanonicalField, CanonicalField); 6] = [
        (CanonicalField::Strength, CanonicalField::StrengthBonus),
        (CanonicalField::Dexterity, CanonicalField::DexterityBonus),
        (CanonicalField::Constitution, CanonicalField::ConstitutionBonus),
        (CanonicalField::Intelligence, CanonicalField::IntelligenceBonus),
        (CanonicalField::Wisdom, CanonicalField::WisdomBonus),
        (CanonicalField::Charisma, CanonicalField::CharismaBonus),
    ];

    /// PascalCase name; identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::Name => "Name",
            CanonicalField::Race => "Race",
            CanonicalField::Class => "Class",
            CanonicalField::Background => "Background",
            CanonicalField::Alignment => "Alignment",
            CanonicalField::Level => "Level",
            CanonicalField::Gender => "Gender",
            CanonicalField::Age => "Age",
            CanonicalField::Strength => "Strength",
            CanonicalField::StrengthBonus => "StrengthBonus",
            CanonicalField::Dexterity => "Dexterity",
            CanonicalField::DexterityBonus => "DexterityBonus",
            CanonicalField::Constitution => "Constitution",
            CanonicalField::ConstitutionBonus => "ConstitutionBonus",
            CanonicalField::Intelligence => "Intelligence",
            CanonicalField::IntelligenceBonus => "IntelligenceBonus",
            CanonicalField::Wisdom => "Wisdom",
            CanonicalField::WisdomBonus => "WisdomBonus",
            CanonicalField::Charisma => "Charisma",
            CanonicalField::CharismaBonus => "CharismaBonus",
            CanonicalField::HitDice => "HitDice",
            CanonicalField::Skills => "Skills",
            CanonicalField::ToolProficiencies => "ToolProficiencies",
            CanonicalField::Languages => "Languages",
            CanonicalField::ArmorClass => "ArmorClass",
            CanonicalField::Initiative => "Initiative",
            CanonicalField::Speed => "Speed",
            CanonicalField::HitPoints => "HitPoints",
            CanonicalField::AttacksAndSpells => "AttacksAndSpells",
            CanonicalField::Equipment => "Equipment",
            CanonicalField::RacialTraits => "RacialTraits",
            CanonicalField::ClassFeatures => "ClassFeatures",
            CanonicalField::BackgroundFeature => "BackgroundFeature",
            CanonicalField::SpecialFeature => "SpecialFeature",
            CanonicalField::PersonalityTraits => "PersonalityTraits",
            CanonicalField::Ideals => "Ideals",
            CanonicalField::Bonds => "Bonds",
            CanonicalField::Flaws => "Flaws",
        }
    }

    /// The bonus field for an ability score, `None` for every other field.
    pub fn ability_bonus(&self) -> Option<CanonicalField> {
        Self::ABILITIES
            .iter()
            .find(|(score, _)| score == self)
            .map(|(_, bonus)| *bonus)
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown canonical field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for CanonicalField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_all_has_no_duplicates() {
        let unique: HashSet<_> = CanonicalField::ALL.iter().collect();
        assert_eq!(unique.len(), CanonicalField::ALL.len());
    }

    #[test]
    fn test_as_str_round_trips_through_from_str() {
        for field in CanonicalField::ALL {
            assert_eq!(field.as_str().parse::<CanonicalField>(), Ok(field));
        }
    }

    #[test]
    fn test_serde_name_matches_as_str() {
        for field in CanonicalField::ALL {
            let json = serde_json::to_string(&field).unwrap();
            assert_eq!(json, format!("\"{}\"", field.as_str()));
        }
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        assert!("Mana".parse::<CanonicalField>().is_err());
        assert!("name".parse::<CanonicalField>().is_err());
    }

    #[test]
    fn test_ability_bonus_only_for_scores() {
        assert_eq!(
            CanonicalField::Wisdom.ability_bonus(),
            Some(CanonicalField::WisdomBonus)
        );
        assert_eq!(CanonicalField::WisdomBonus.ability_bonus(), None);
        assert_eq!(CanonicalField::Name.ability_bonus(), None);
    }
}
