use xxhash_rust::xxh3::xxh3_64;

/// Structured seed for every deterministic "random" decision in the pipeline.
///
/// Ad hoc string concatenation invites seed collisions ("scene1"+"0" vs
/// "scene"+"10"), so the three components are hashed with length framing.
/// Identical keys yield identical values across runs and platforms; this is a
/// reproducibility contract, not a cryptographic one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct SeedKey {
    pub scope: String,
    pub purpose: String,
    pub index: u64,
}

impl SeedKey {
    pub fn new(scope: impl Into<String>, purpose: impl Into<String>, index: u64) -> Self {
        Self {
            scope: scope.into(),
            purpose: purpose.into(),
            index,
        }
    }

    fn hash(&self) -> u64 {
        let mut buf = Vec::with_capacity(self.scope.len() + self.purpose.len() + 24);
        buf.extend_from_slice(&(self.scope.len() as u64).to_le_bytes());
        buf.extend_from_slice(self.scope.as_bytes());
        buf.extend_from_slice(&(self.purpose.len() as u64).to_le_bytes());
        buf.extend_from_slice(self.purpose.as_bytes());
        buf.extend_from_slice(&self.index.to_le_bytes());
        xxh3_64(&buf)
    }

    /// Deterministic value in `[0, 1)`.
    pub fn unit(&self) -> f64 {
        // Top 53 bits, the full precision of an f64 mantissa.
        (self.hash() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Deterministic choice among `items`. `None` only for an empty slice.
    pub fn pick<'a, T>(&self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let i = (self.unit() * items.len() as f64) as usize;
        Some(&items[i.min(items.len() - 1)])
    }
}
