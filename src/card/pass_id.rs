use std::fmt;

use rand::Rng;

pub const PASS_ID_PREFIX: &str = "PASS-";
pub const PASS_ID_SUFFIX_LEN: usize = 8;

const SUFFIX_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Identifier printed on a rendered pass. Not persisted anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PassId(String);

impl PassId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `PASS-` followed by exactly eight characters from `[A-Z0-9]`.
    pub fn is_well_formed(value: &str) -> bool {
        value.strip_prefix(PASS_ID_PREFIX).is_some_and(|suffix| {
            suffix.len() == PASS_ID_SUFFIX_LEN
                && suffix
                    .bytes()
                    .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
        })
    }
}

impl fmt::Display for PassId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PassId> for String {
    fn from(id: PassId) -> Self {
        id.0
    }
}

pub trait PassIdGenerator: Send + Sync {
    fn generate(&self) -> PassId;
}

/// Fresh random identifier per call.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomPassIdGenerator;

impl PassIdGenerator for RandomPassIdGenerator {
    fn generate(&self) -> PassId {
        let mut rng = rand::rng();
        let suffix: String = (0..PASS_ID_SUFFIX_LEN)
            .map(|_| char::from(SUFFIX_CHARSET[rng.random_range(0..SUFFIX_CHARSET.len())]))
            .collect();
        PassId(format!("{PASS_ID_PREFIX}{suffix}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_well_formed() {
        for _ in 0..200 {
            let id = RandomPassIdGenerator.generate();
            assert!(PassId::is_well_formed(id.as_str()), "bad id {id}");
        }
    }

    #[test]
    fn well_formed_rejects_other_shapes() {
        assert!(PassId::is_well_formed("PASS-AB12CD34"));
        assert!(!PassId::is_well_formed("pass-AB12CD34"));
        assert!(!PassId::is_well_formed("PASS-ab12cd34"));
        assert!(!PassId::is_well_formed("PASS-AB12CD3"));
        assert!(!PassId::is_well_formed("PASS-AB12CD345"));
        assert!(!PassId::is_well_formed("PASS-AB12-D34"));
    }
}
