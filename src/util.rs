use rand::Rng;

pub fn random_digits<R: Rng + ?Sized>(rng: &mut R, len: usize) -> String {
    (0..len)
        .map(|_| char::from(b'0' + rng.gen_range(0..10u8)))
        .collect()
}

/// Chunks an IBAN into groups of four for display. Pure formatting; the
/// checksum always runs on the unformatted string.
pub fn format_grouped(iban: &str) -> String {
    let chars: Vec<char> = iban.chars().collect();
    chars
        .chunks(4)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn random_digits_are_digits_of_requested_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let digits = random_digits(&mut rng, 18);
        assert_eq!(digits.len(), 18);
        assert!(digits.chars().all(|ch| ch.is_ascii_digit()));
    }

    #[test]
    fn grouping_splits_into_fours() {
        assert_eq!(
            format_grouped("SA9480000000000000000001"),
            "SA94 8000 0000 0000 0000 0001"
        );
        assert_eq!(format_grouped("SA948"), "SA94 8");
        assert_eq!(format_grouped(""), "");
    }
}
