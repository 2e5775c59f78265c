use std::fmt;

/// Playing strength of the automated opponent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Expert,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard, Difficulty::Expert];

    /// Host level 1..=4; anything outside is clamped.
    pub fn from_level(level: i32) -> Self {
        match level.clamp(1, 4) {
            1 => Difficulty::Easy,
            2 => Difficulty::Medium,
            3 => Difficulty::Hard,
            _ => Difficulty::Expert,
        }
    }

    pub fn level(self) -> i32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Expert => 4,
        }
    }

    /// Plies searched at the root: level + 1, Expert gets 5.
    pub fn search_depth(self) -> u32 {
        match self {
            Difficulty::Expert => 5,
            d => d.level() as u32 + 1,
        }
    }

    /// Centipawn step for root noise; the bonus is `uniform(0..=5) * step`.
    pub fn noise_step(self) -> i32 {
        match self {
            Difficulty::Easy => 20,
            Difficulty::Medium => 10,
            Difficulty::Hard | Difficulty::Expert => 0,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_clamp() {
        assert_eq!(Difficulty::from_level(-3), Difficulty::Easy);
        assert_eq!(Difficulty::from_level(9), Difficulty::Expert);
        for d in Difficulty::ALL {
            assert_eq!(Difficulty::from_level(d.level()), d);
        }
    }

    #[test]
    fn depths() {
        let depths: Vec<u32> = Difficulty::ALL.iter().map(|d| d.search_depth()).collect();
        assert_eq!(depths, vec![2, 3, 4, 5]);
    }
}
