use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::game::Quadrant;
use crate::util::GameError;

/// Bounded, ordered list of quadrants the player has to repeat.
///
/// Pushing past the capacity fails instead of truncating, so the win check
/// always sees the full round. Storage grows on demand; the capacity is only
/// a bound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    entries: Vec<Quadrant>,
    capacity: usize,
}

impl Sequence {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity,
        }
    }

    /// Reserve room for `additional` more entries up front.
    pub fn try_reserve(&mut self, additional: usize) -> Result<(), GameError> {
        let requested = self.entries.len().saturating_add(additional);
        if requested > self.capacity {
            return Err(GameError::CapacityExceeded {
                requested,
                capacity: self.capacity,
            });
        }
        self.entries
            .try_reserve_exact(additional)
            .map_err(|_| GameError::Allocation {
                requested,
                capacity: self.entries.capacity(),
            })
    }

    pub fn try_push(&mut self, quadrant: Quadrant) -> Result<(), GameError> {
        if self.entries.len() >= self.capacity {
            return Err(GameError::CapacityExceeded {
                requested: self.entries.len() + 1,
                capacity: self.capacity,
            });
        }
        self.entries.push(quadrant);
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<Quadrant> {
        self.entries.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn as_slice(&self) -> &[Quadrant] {
        &self.entries
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl FromIterator<Quadrant> for Sequence {
    /// Collects into a sequence whose capacity is exactly its length.
    fn from_iter<I: IntoIterator<Item = Quadrant>>(iter: I) -> Self {
        let entries: Vec<Quadrant> = iter.into_iter().collect();
        let capacity = entries.len();
        Self { entries, capacity }
    }
}

/// Draws uniformly random sequences, `level * quadrants_per_level` long.
pub struct SequenceGenerator<R: Rng = StdRng> {
    rng: R,
    quadrants_per_level: usize,
    capacity: usize,
}

impl SequenceGenerator<StdRng> {
    /// Seeded generator, or one seeded from OS entropy when `seed` is `None`.
    pub fn from_seed(seed: Option<u64>, quadrants_per_level: usize, capacity: usize) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng, quadrants_per_level, capacity)
    }
}

impl<R: Rng> SequenceGenerator<R> {
    pub fn new(rng: R, quadrants_per_level: usize, capacity: usize) -> Self {
        Self {
            rng,
            quadrants_per_level,
            capacity,
        }
    }

    /// Number of entries a round at `level` needs.
    pub fn length_for(&self, level: u8) -> usize {
        usize::from(level).saturating_mul(self.quadrants_per_level)
    }

    /// Generate the sequence for `level`. Repeats are allowed.
    ///
    /// Fails before drawing any entropy if `level` is zero or the sequence
    /// would not fit the buffer.
    pub fn generate(&mut self, level: u8) -> Result<Sequence, GameError> {
        if level == 0 {
            return Err(GameError::InvalidLevel(level));
        }

        let requested = self.length_for(level);
        if requested > self.capacity {
            return Err(GameError::CapacityExceeded {
                requested,
                capacity: self.capacity,
            });
        }

        let mut sequence = Sequence::with_capacity(self.capacity);
        sequence.try_reserve(requested)?;
        for _ in 0..requested {
            let index = self.rng.gen_range(0..Quadrant::COUNT);
            if let Some(quadrant) = Quadrant::from_index(index) {
                sequence.try_push(quadrant)?;
            }
        }

        debug!(level, len = sequence.len(), sequence = ?sequence.as_slice(), "generated sequence");
        Ok(sequence)
    }
}
