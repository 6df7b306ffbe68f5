// Arithmetic problems and difficulty tiers

use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

/// Difficulty tier of a problem, also the index into per-character tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    #[cfg(test)]
    /// All tiers, easiest first
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Index into a per-difficulty table
    pub fn index(self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => 1,
            Difficulty::Hard => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Medium
    }
}

/// A generated problem; replaced wholesale, never edited
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub prompt: String,
    pub solution: i64,
}

impl Problem {
    pub fn new(prompt: impl Into<String>, solution: i64) -> Self {
        Self {
            prompt: prompt.into(),
            solution,
        }
    }

    /// Check a submitted answer; `None` (unparsable input) is never correct
    pub fn is_solved_by(&self, answer: Option<i64>) -> bool {
        answer == Some(self.solution)
    }
}

/// Problem generator strategy supplied by a character
pub type ProblemGenerator = fn(Difficulty, &mut Pcg32) -> Problem;

/// Sums and differences; differences never go negative since the keypad
/// has no minus key
pub fn addition(difficulty: Difficulty, rng: &mut Pcg32) -> Problem {
    let (lo, hi) = match difficulty {
        Difficulty::Easy => (1, 10),
        Difficulty::Medium => (10, 100),
        Difficulty::Hard => (100, 1000),
    };
    let a: i64 = rng.random_range(lo..hi);
    let b: i64 = rng.random_range(lo..hi);

    if difficulty != Difficulty::Easy && rng.random_bool(0.5) {
        let (big, small) = if a >= b { (a, b) } else { (b, a) };
        Problem::new(format!("{big} - {small}"), big - small)
    } else {
        Problem::new(format!("{a} + {b}"), a + b)
    }
}

/// Products
pub fn multiplication(difficulty: Difficulty, rng: &mut Pcg32) -> Problem {
    let (a, b): (i64, i64) = match difficulty {
        Difficulty::Easy => (rng.random_range(2..6), rng.random_range(2..6)),
        Difficulty::Medium => (rng.random_range(2..13), rng.random_range(2..13)),
        Difficulty::Hard => (rng.random_range(11..30), rng.random_range(3..13)),
    };
    Problem::new(format!("{a} × {b}"), a * b)
}

/// Exact divisions, built backwards from divisor and quotient
pub fn division(difficulty: Difficulty, rng: &mut Pcg32) -> Problem {
    let (divisor, quotient): (i64, i64) = match difficulty {
        Difficulty::Easy => (rng.random_range(2..6), rng.random_range(1..10)),
        Difficulty::Medium => (rng.random_range(2..13), rng.random_range(2..13)),
        Difficulty::Hard => (rng.random_range(6..20), rng.random_range(10..50)),
    };
    Problem::new(format!("{} ÷ {divisor}", divisor * quotient), quotient)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(1234)
    }

    #[test]
    fn test_difficulty_order_and_index() {
        assert!(Difficulty::Easy < Difficulty::Medium);
        assert!(Difficulty::Medium < Difficulty::Hard);
        for (i, d) in Difficulty::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
        }
        assert_eq!(Difficulty::default(), Difficulty::Medium);
    }

    #[test]
    fn test_problem_check() {
        let problem = Problem::new("2 + 2", 4);
        assert!(problem.is_solved_by(Some(4)));
        assert!(!problem.is_solved_by(Some(5)));
        assert!(!problem.is_solved_by(None));
    }

    #[test]
    fn test_generators_are_consistent() {
        let mut rng = rng();
        let generators: [ProblemGenerator; 3] = [addition, multiplication, division];
        for _ in 0..200 {
            for difficulty in Difficulty::ALL {
                for generate in generators {
                    let problem = generate(difficulty, &mut rng);
                    assert!(problem.solution >= 0, "{} -> {}", problem.prompt, problem.solution);
                    assert!(!problem.prompt.is_empty());
                }
            }
        }
    }

    #[test]
    fn test_division_is_exact() {
        let mut rng = rng();
        for _ in 0..100 {
            let problem = division(Difficulty::Hard, &mut rng);
            let mut parts = problem.prompt.split(" ÷ ");
            let dividend: i64 = parts.next().unwrap().parse().unwrap();
            let divisor: i64 = parts.next().unwrap().parse().unwrap();
            assert_eq!(dividend % divisor, 0);
            assert_eq!(dividend / divisor, problem.solution);
        }
    }

    #[test]
    fn test_same_seed_same_problems() {
        let mut a = rng();
        let mut b = rng();
        for _ in 0..20 {
            assert_eq!(
                addition(Difficulty::Medium, &mut a),
                addition(Difficulty::Medium, &mut b)
            );
        }
    }
}
