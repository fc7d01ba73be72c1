//! Ability modifier derivation.
//!
//! The parser drops the `(+N)` annotation next to a score; the template keeps the
//! modifier in its own slot. When the text never states a modifier on its own line,
//! it is recomputed from the score with the 5e rule `floor((score - 10) / 2)`.

use crate::sheet::fields::CanonicalField;
use crate::sheet::parser::CharacterRecord;

impl CharacterRecord {
    /// Fills absent or blank ability bonus fields from their scores.
    ///
    /// Non-blank bonus values are kept as-is; scores that are not plain
    /// integers are skipped.
    pub fn with_derived_modifiers(mut self) -> CharacterRecord {
        for (score_field, bonus_field) in CanonicalField::ABILITIES {
            if self.get(bonus_field).is_some_and(|b| !b.trim().is_empty()) {
                continue;
            }
            let Some(score) = self.get(score_field).and_then(|s| s.trim().parse::<i32>().ok())
            else {
                continue;
            };
            self.insert(bonus_field, format_modifier(ability_modifier(score)));
        }
        self
    }
}

pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// Always signed: `+2`, `+0`, `-1`.
pub fn format_modifier(modifier: i32) -> String {
    format!("{modifier:+}")
}
