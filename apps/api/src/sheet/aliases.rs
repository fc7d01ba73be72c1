//! FieldAlias — natural-language label variants mapped to canonical fields.
//!
//! Keys are lower-case and accent-sensitive: the generator writes Portuguese labels
//! with accents most of the time, so the unaccented spellings are listed separately
//! only where they have been seen in practice.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::sheet::fields::CanonicalField;

use CanonicalField::*;

const FIELD_ALIASES: &[(&str, CanonicalField)] = &[
    // General information
    ("nome", Name),
    ("nome do personagem", Name),
    ("name", Name),
    ("character name", Name),
    ("raça", Race),
    ("raca", Race),
    ("race", Race),
    ("classe", Class),
    ("class", Class),
    ("background", Background),
    ("antecedente", Background),
    ("alinhamento moral", Alignment),
    ("alinhamento", Alignment),
    ("alignment", Alignment),
    ("level", Level),
    ("nível", Level),
    ("nivel", Level),
    ("nível inicial", Level),
    ("gênero", Gender),
    ("genero", Gender),
    ("gender", Gender),
    ("idade", Age),
    ("age", Age),
    // Ability scores
    ("força", Strength),
    ("forca", Strength),
    ("for", Strength),
    ("strength", Strength),
    ("str", Strength),
    ("destreza", Dexterity),
    ("des", Dexterity),
    ("dexterity", Dexterity),
    ("dex", Dexterity),
    ("constituição", Constitution),
    ("constituicao", Constitution),
    ("con", Constitution),
    ("constitution", Constitution),
    ("inteligência", Intelligence),
    ("inteligencia", Intelligence),
    ("int", Intelligence),
    ("intelligence", Intelligence),
    ("sabedoria", Wisdom),
    ("sab", Wisdom),
    ("wisdom", Wisdom),
    ("wis", Wisdom),
    ("carisma", Charisma),
    ("car", Charisma),
    ("charisma", Charisma),
    ("cha", Charisma),
    // Ability modifiers
    ("bônus de força", StrengthBonus),
    ("modificador de força", StrengthBonus),
    ("strength bonus", StrengthBonus),
    ("strength modifier", StrengthBonus),
    ("bônus de destreza", DexterityBonus),
    ("modificador de destreza", DexterityBonus),
    ("dexterity bonus", DexterityBonus),
    ("dexterity modifier", DexterityBonus),
    ("bônus de constituição", ConstitutionBonus),
    ("modificador de constituição", ConstitutionBonus),
    ("constitution bonus", ConstitutionBonus),
    ("constitution modifier", ConstitutionBonus),
    ("bônus de inteligência", IntelligenceBonus),
    ("modificador de inteligência", IntelligenceBonus),
    ("intelligence bonus", IntelligenceBonus),
    ("intelligence modifier", IntelligenceBonus),
    ("bônus de sabedoria", WisdomBonus),
    ("modificador de sabedoria", WisdomBonus),
    ("wisdom bonus", WisdomBonus),
    ("wisdom modifier", WisdomBonus),
    ("bônus de carisma", CharismaBonus),
    ("modificador de carisma", CharismaBonus),
    ("charisma bonus", CharismaBonus),
    ("charisma modifier", CharismaBonus),
    // Skills and proficiencies
    ("dado de vida", HitDice),
    ("dados de vida", HitDice),
    ("hit dice", HitDice),
    ("perícias", Skills),
    ("pericias", Skills),
    ("skills", Skills),
    ("proficiência com ferramentas", ToolProficiencies),
    ("proficiências com ferramentas", ToolProficiencies),
    ("tool proficiencies", ToolProficiencies),
    ("idiomas", Languages),
    ("languages", Languages),
    // Combat
    ("classe de armadura", ArmorClass),
    ("ca", ArmorClass),
    ("armor class", ArmorClass),
    ("ac", ArmorClass),
    ("iniciativa", Initiative),
    ("initiative", Initiative),
    ("deslocamento", Speed),
    ("velocidade", Speed),
    ("speed", Speed),
    ("pontos de vida", HitPoints),
    ("pontos de vida máximos", HitPoints),
    ("pv", HitPoints),
    ("hit points", HitPoints),
    ("ataques e magias", AttacksAndSpells),
    ("ataques e conjuração", AttacksAndSpells),
    ("attacks and spells", AttacksAndSpells),
    ("attacks & spellcasting", AttacksAndSpells),
    // Equipment and features
    ("equipamentos", Equipment),
    ("equipamento", Equipment),
    ("equipment", Equipment),
    ("habilidades raciais", RacialTraits),
    ("traços raciais", RacialTraits),
    ("racial traits", RacialTraits),
    ("habilidades de classe", ClassFeatures),
    ("características de classe", ClassFeatures),
    ("class features", ClassFeatures),
    ("características do background", BackgroundFeature),
    ("característica do background", BackgroundFeature),
    ("background feature", BackgroundFeature),
    ("característica especial", SpecialFeature),
    ("special feature", SpecialFeature),
    // Personality
    ("traços de personalidade", PersonalityTraits),
    ("personality traits", PersonalityTraits),
    ("ideais", Ideals),
    ("ideals", Ideals),
    ("vínculos", Bonds),
    ("vinculos", Bonds),
    ("bonds", Bonds),
    ("fraquezas", Flaws),
    ("defeitos", Flaws),
    ("flaws", Flaws),
];

static ALIAS_INDEX: LazyLock<HashMap<&'static str, CanonicalField>> =
    LazyLock::new(|| FIELD_ALIASES.iter().copied().collect());

/// Looks up an already-normalized (trimmed, lower-cased) label.
pub fn lookup_alias(label: &str) -> Option<CanonicalField> {
    ALIAS_INDEX.get(label).copied()
}
