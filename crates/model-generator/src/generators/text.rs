//! String and byte buffer generators.

use rand::Rng;

/// Default length of generated strings.
pub const DEFAULT_STR_LENGTH: usize = 16;

/// Default length of generated byte buffers.
pub const DEFAULT_BYTES_LENGTH: usize = 8;

/// Alphabet for generated strings.
pub const ASCII_LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generate a string of exactly `length` ASCII letters.
pub fn generate_string<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| ASCII_LETTERS[rng.random_range(0..ASCII_LETTERS.len())] as char)
        .collect()
}

/// Generate a buffer of exactly `length` random bytes.
pub fn generate_bytes<R: Rng>(rng: &mut R, length: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; length];
    rng.fill(bytes.as_mut_slice());
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generate_string_length_and_alphabet() {
        let mut rng = StdRng::seed_from_u64(42);

        for length in [0, 1, 16, 64, 257] {
            let value = generate_string(&mut rng, length);
            assert_eq!(value.len(), length);
            assert!(value.chars().all(|c| c.is_ascii_alphabetic()));
        }
    }

    #[test]
    fn test_generate_string_varies() {
        let mut rng = StdRng::seed_from_u64(42);

        let first = generate_string(&mut rng, DEFAULT_STR_LENGTH);
        let second = generate_string(&mut rng, DEFAULT_STR_LENGTH);
        assert_ne!(first, second);
    }

    #[test]
    fn test_generate_bytes() {
        let mut rng = StdRng::seed_from_u64(42);

        assert_eq!(generate_bytes(&mut rng, 100).len(), 100);
        assert_eq!(generate_bytes(&mut rng, DEFAULT_BYTES_LENGTH).len(), 8);
        assert!(generate_bytes(&mut rng, 0).is_empty());
    }
}
