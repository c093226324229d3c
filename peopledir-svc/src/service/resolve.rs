//! Nationality resolution

use crate::inference::CountryGuess;

/// Country assumed when the nationality service offers nothing better
pub const FALLBACK_NATION: &str = "RU";

/// Pick the most probable country code.
///
/// Linear scan with a strictly-greater comparison, seeded with
/// ([`FALLBACK_NATION`], 0.0): on a tie the earliest entry wins, and an
/// empty list (or one where every probability is 0) yields the fallback.
pub fn resolve_nation(guesses: &[CountryGuess]) -> String {
    let mut best_code = FALLBACK_NATION;
    let mut best_probability = 0.0;

    for guess in guesses {
        if guess.probability > best_probability {
            best_probability = guess.probability;
            best_code = guess.country_id.as_str();
        }
    }

    best_code.to_string()
}
