use rand::Rng;

use crate::error::TrioError;

/// Allowed characters for generated ids - excludes I, O, 0, 1 for readability
pub const ID_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";
/// Length of generated game and gamer ids
pub const DEFAULT_ID_LENGTH: usize = 10;
/// How many candidates are tried before giving up on a unique id
pub const DEFAULT_ID_MAX_ATTEMPTS: usize = 100;

/// Generate a random id of `length` characters from [`ID_CHARSET`]
pub fn generate_id(rng: &mut impl Rng, length: usize) -> String {
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..ID_CHARSET.len());
            ID_CHARSET[idx] as char
        })
        .collect()
}

/// Generate ids until `is_unique` accepts one, at most `max_attempts` times
pub fn generate_unique_id(
    rng: &mut impl Rng,
    length: usize,
    max_attempts: usize,
    is_unique: impl Fn(&str) -> bool,
) -> Result<String, TrioError> {
    for _ in 0..max_attempts {
        let candidate = generate_id(rng, length);
        if is_unique(&candidate) {
            return Ok(candidate);
        }
    }

    tracing::error!(
        "Could not generate a unique id of length {} after {} attempts",
        length,
        max_attempts
    );
    Err(TrioError::Internal(format!(
        "could not generate a unique id after {} attempts",
        max_attempts
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::cell::Cell;

    #[test]
    fn test_generate_id_length() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let id = generate_id(&mut rng, DEFAULT_ID_LENGTH);
            assert_eq!(
                id.len(),
                DEFAULT_ID_LENGTH,
                "Generated id '{}' should be exactly {} characters",
                id,
                DEFAULT_ID_LENGTH
            );
        }
    }

    #[test]
    fn test_generate_id_charset() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let id = generate_id(&mut rng, DEFAULT_ID_LENGTH);
            for c in id.chars() {
                assert!(
                    ID_CHARSET.contains(&(c as u8)),
                    "Character '{}' in id '{}' is not in allowed charset",
                    c,
                    id
                );
            }
        }
    }

    #[test]
    fn test_unique_id_retries_until_accepted() {
        let mut rng = StdRng::seed_from_u64(3);
        let calls = Cell::new(0);
        let id = generate_unique_id(&mut rng, 6, 10, |_| {
            calls.set(calls.get() + 1);
            calls.get() == 3
        })
        .unwrap();

        assert_eq!(id.len(), 6);
        assert_eq!(calls.get(), 3, "The third candidate should have been taken");
    }

    #[test]
    fn test_unique_id_gives_up_after_max_attempts() {
        let mut rng = StdRng::seed_from_u64(3);
        let calls = Cell::new(0);
        let result = generate_unique_id(&mut rng, 6, 5, |_| {
            calls.set(calls.get() + 1);
            false
        });

        assert!(matches!(result, Err(TrioError::Internal(_))));
        assert_eq!(calls.get(), 5, "Generation should stop at the attempt cap");
    }
}
