//! TemplateFieldMap — canonical field → slot identifier in the bundled D&D 5e sheet.
//!
//! Authored against `assets/ficha_dnd5e.pdf`. Replacing the template means updating
//! this table; `GET /api/v1/template/slots` lists what a template actually contains.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::sheet::fields::CanonicalField;

use CanonicalField::*;

const TEMPLATE_SLOTS: &[(CanonicalField, &str)] = &[
    (Name, "CharacterName"),
    (Race, "Race"),
    (Class, "Class"),
    (Background, "Background"),
    (Alignment, "Alignment"),
    (Level, "Level"),
    (Gender, "Gender"),
    (Age, "Age"),
    (Strength, "STR"),
    (StrengthBonus, "STRmod"),
    (Dexterity, "DEX"),
    (DexterityBonus, "DEXmod"),
    (Constitution, "CON"),
    (ConstitutionBonus, "CONmod"),
    (Intelligence, "INT"),
    (IntelligenceBonus, "INTmod"),
    (Wisdom, "WIS"),
    (WisdomBonus, "WISmod"),
    (Charisma, "CHA"),
    (CharismaBonus, "CHAmod"),
    (HitDice, "HDTotal"),
    (Skills, "Skills"),
    (ToolProficiencies, "ToolProficiencies"),
    (Languages, "ProficienciesLang"),
    (ArmorClass, "AC"),
    (Initiative, "Initiative"),
    (Speed, "Speed"),
    (HitPoints, "HPMax"),
    (AttacksAndSpells, "AttacksSpellcasting"),
    (Equipment, "Equipment"),
    (RacialTraits, "RacialTraits"),
    (ClassFeatures, "Features and Traits"),
    (BackgroundFeature, "BackgroundFeature"),
    (SpecialFeature, "SpecialFeature"),
    (PersonalityTraits, "PersonalityTraits"),
    (Ideals, "Ideals"),
    (Bonds, "Bonds"),
    (Flaws, "Flaws"),
];

static SLOT_BY_FIELD: LazyLock<HashMap<CanonicalField, &'static str>> =
    LazyLock::new(|| TEMPLATE_SLOTS.iter().copied().collect());

static FIELD_BY_SLOT: LazyLock<HashMap<&'static str, CanonicalField>> = LazyLock::new(|| {
    TEMPLATE_SLOTS
        .iter()
        .map(|(field, slot)| (*slot, *field))
        .collect()
});

/// Template slot a canonical field is written to, if the template has one.
pub fn slot_for(field: CanonicalField) -> Option<&'static str> {
    SLOT_BY_FIELD.get(&field).copied()
}

/// Canonical field feeding a template slot. `None` means the slot is not managed.
pub fn field_for_slot(slot: &str) -> Option<CanonicalField> {
    FIELD_BY_SLOT.get(slot).copied()
}
