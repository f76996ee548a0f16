//! Deterministic prompt selection.

use chrono::NaiveDate;
use serde::Serialize;

use super::{PromptPair, PromptTable, ThemeFilter};
use crate::cadence::{Cadence, PromptCategory};
use crate::dates::{format_iso, parse_iso};
use crate::error::DateError;

/// The prompt chosen for a given day, with how it was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptSelection {
    pub pair: PromptPair,
    pub category: PromptCategory,
    /// Index into the pool the pair was drawn from.
    pub index: usize,
    /// True when the theme filter matched nothing and the whole pool was used.
    pub theme_fallback: bool,
}

/// Hash a seed string: `seed = seed * 31 + code_unit` over UTF-16 code
/// units, wrapping at 2^32.
///
/// Prompt stability across versions depends on this exact recurrence.
pub fn prompt_seed(input: &str) -> u32 {
    input
        .encode_utf16()
        .fold(0u32, |seed, unit| seed.wrapping_mul(31).wrapping_add(u32::from(unit)))
}

/// Pick the prompt for `date` under `cadence` and `theme`.
///
/// The pool is the cadence's category pool narrowed to pairs tagged with
/// the theme. A theme that matches nothing falls back to the whole pool.
/// The seed is `"{date}|{cadence}|{theme}"`.
pub fn select_prompt(
    table: &PromptTable,
    date: NaiveDate,
    cadence: Cadence,
    theme: ThemeFilter,
) -> PromptSelection {
    let category = cadence.prompt_category();
    let seed_input = format!("{}|{}|{}", format_iso(&date), cadence.as_str(), theme.as_str());
    pick(table.pool(category), category, |p| theme.matches(p), &seed_input)
}

/// String-level variant of [`select_prompt`] for raw stored preferences.
///
/// The date must be a valid `YYYY-MM-DD`. Names must match the stored wire
/// names exactly. An unrecognised cadence name draws from the daily pool,
/// and an unrecognised theme name falls back to the unfiltered pool; both
/// still feed their raw text into the seed. Recognised names select exactly
/// what [`select_prompt`] does.
pub fn select_prompt_by_name(
    table: &PromptTable,
    date: &str,
    cadence: &str,
    theme: &str,
) -> Result<PromptSelection, DateError> {
    let date = parse_iso(date)?;
    let category = Cadence::ALL
        .into_iter()
        .find(|c| c.as_str() == cadence)
        .map(|c| c.prompt_category())
        .unwrap_or(PromptCategory::Daily);
    let theme_name = if theme.trim().is_empty() { "All" } else { theme };
    let filter = ThemeFilter::choices().find(|f| f.as_str() == theme_name);

    let seed_input = format!("{}|{}|{}", format_iso(&date), cadence, theme_name);
    Ok(pick(
        table.pool(category),
        category,
        |p| filter.is_some_and(|f| f.matches(p)),
        &seed_input,
    ))
}

fn pick(
    pool: &'static [PromptPair],
    category: PromptCategory,
    keep: impl Fn(&PromptPair) -> bool,
    seed_input: &str,
) -> PromptSelection {
    let filtered: Vec<(usize, &PromptPair)> =
        pool.iter().enumerate().filter(|(_, p)| keep(p)).collect();
    let theme_fallback = filtered.is_empty();
    let candidates: Vec<(usize, &PromptPair)> = if theme_fallback {
        pool.iter().enumerate().collect()
    } else {
        filtered
    };

    let seed = prompt_seed(seed_input);
    // Pools are non-empty by construction of PromptTable.
    let (index, pair) = candidates[seed as usize % candidates.len()];

    tracing::debug!(
        seed_input,
        seed,
        index,
        theme_fallback,
        category = category.as_str(),
        "selected prompt"
    );

    PromptSelection {
        pair: *pair,
        category,
        index,
        theme_fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompts::Theme;

    fn d(s: &str) -> NaiveDate {
        parse_iso(s).unwrap()
    }

    #[test]
    fn seed_matches_reference_recurrence() {
        assert_eq!(prompt_seed(""), 0);
        assert_eq!(prompt_seed("a"), 97);
        assert_eq!(prompt_seed("ab"), 97 * 31 + 98);
        // Long inputs wrap rather than overflow.
        let long = "2025-01-15|daily|All".repeat(20);
        let expected = long
            .bytes()
            .fold(0u64, |s, b| (s * 31 + u64::from(b)) % (1u64 << 32));
        assert_eq!(u64::from(prompt_seed(&long)), expected);
    }

    #[test]
    fn seed_uses_utf16_code_units() {
        // U+1F600 is a surrogate pair in UTF-16.
        let expected = (0xD83Du32).wrapping_mul(31).wrapping_add(0xDE00);
        assert_eq!(prompt_seed("\u{1F600}"), expected);
    }

    #[test]
    fn selection_is_deterministic() {
        let table = PromptTable::builtin();
        let first = select_prompt(table, d("2025-01-15"), Cadence::Daily, ThemeFilter::All);
        for _ in 0..10 {
            let again = select_prompt(table, d("2025-01-15"), Cadence::Daily, ThemeFilter::All);
            assert_eq!(again, first);
        }
        let expected_index = prompt_seed("2025-01-15|daily|All") as usize
            % table.pool(PromptCategory::Daily).len();
        assert_eq!(first.index, expected_index);
        assert!(!first.theme_fallback);
    }

    #[test]
    fn string_and_typed_paths_agree() {
        let table = PromptTable::builtin();
        for cadence in Cadence::ALL {
            for theme in ThemeFilter::choices() {
                let typed = select_prompt(table, d("2025-06-30"), cadence, theme);
                let named =
                    select_prompt_by_name(table, "2025-06-30", cadence.as_str(), theme.as_str())
                        .unwrap();
                assert_eq!(typed, named, "{cadence} / {theme}");
            }
        }
    }

    #[test]
    fn theme_filter_narrows_pool() {
        let table = PromptTable::builtin();
        for day in 1..=28 {
            let date = NaiveDate::from_ymd_opt(2025, 2, day).unwrap();
            let pick = select_prompt(table, date, Cadence::Weekly, ThemeFilter::Only(Theme::Bias));
            assert!(pick.pair.themes.contains(&Theme::Bias));
            assert_eq!(pick.category, PromptCategory::Week);
        }
    }

    #[test]
    fn empty_theme_match_falls_back_to_whole_pool() {
        static POOL: [PromptPair; 3] = [
            PromptPair { reflection: "one", action: "a1", themes: &[Theme::Bias] },
            PromptPair { reflection: "two", action: "a2", themes: &[Theme::Bias] },
            PromptPair { reflection: "three", action: "a3", themes: &[] },
        ];
        let table = PromptTable::new(&POOL, &POOL, &POOL).unwrap();
        let pick = select_prompt(
            &table,
            d("2025-01-15"),
            Cadence::Daily,
            ThemeFilter::Only(Theme::Advocacy),
        );
        assert!(pick.theme_fallback);
        assert!(!pick.pair.reflection.is_empty());
        let expected = prompt_seed("2025-01-15|daily|Advocacy") as usize % POOL.len();
        assert_eq!(pick.index, expected);
    }

    #[test]
    fn unknown_names_degrade_softly() {
        let table = PromptTable::builtin();
        let pick = select_prompt_by_name(table, "2025-01-15", "monthly", "Gardening").unwrap();
        assert_eq!(pick.category, PromptCategory::Daily);
        assert!(pick.theme_fallback);
        let expected = prompt_seed("2025-01-15|monthly|Gardening") as usize
            % table.pool(PromptCategory::Daily).len();
        assert_eq!(pick.index, expected);

        assert!(select_prompt_by_name(table, "2025-13-01", "daily", "All").is_err());
    }

    #[test]
    fn names_match_exactly() {
        let table = PromptTable::builtin();
        let typed = select_prompt(table, d("2025-01-15"), Cadence::Daily, ThemeFilter::Only(Theme::Bias));
        let named = select_prompt_by_name(table, "2025-01-15", "daily", "Bias").unwrap();
        assert_eq!(named, typed);

        // Lowercase is not a stored theme name, so the whole pool is used.
        let lower = select_prompt_by_name(table, "2025-01-15", "daily", "bias").unwrap();
        assert!(lower.theme_fallback);
        let expected = prompt_seed("2025-01-15|daily|bias") as usize
            % table.pool(PromptCategory::Daily).len();
        assert_eq!(lower.index, expected);

        // Long-form cadence aliases are CLI input, not stored names.
        let alias = select_prompt_by_name(table, "2025-01-15", "weekly-ish", "All").unwrap();
        assert_eq!(alias.category, PromptCategory::Daily);
        let alias = select_prompt_by_name(table, "2025-01-15", "three-times-weekly", "All").unwrap();
        assert_eq!(alias.category, PromptCategory::Daily);
    }

    #[test]
    fn empty_theme_name_seeds_as_all() {
        let table = PromptTable::builtin();
        let blank = select_prompt_by_name(table, "2025-01-15", "3x", "").unwrap();
        let all = select_prompt_by_name(table, "2025-01-15", "3x", "All").unwrap();
        assert_eq!(blank, all);
    }
}
