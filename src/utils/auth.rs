/// Compare two secrets in constant time
///
/// Used for the stored security answer so the comparison does not leak how
/// many leading characters matched. Exact byte equality, case-sensitive.
pub fn constant_time_eq(provided: &str, expected: &str) -> bool {
    provided.as_bytes().len() == expected.as_bytes().len()
        && provided
            .as_bytes()
            .iter()
            .zip(expected.as_bytes().iter())
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}
