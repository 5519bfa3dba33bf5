//! Random number stream of a story.
//!
//! Every interpreter owns its own stream, so two stories never draw from the same
//! generator. The stream can be seeded to replay a story exactly, and it can be saved
//! and restored along with the rest of the story state.

use rand::{distributions::Uniform, Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

#[cfg(feature = "serde_support")]
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug)]
#[cfg_attr(
    feature = "serde_support",
    derive(Deserialize, Serialize),
    serde(from = "RngState", into = "RngState")
)]
/// Random number generator for the [`Interpreter`][crate::story::Interpreter].
///
/// We use `ChaChaRng` due to it being seedable and with the ability to get and set
/// the word position. The stream is de/serialized as its seed and position.
pub struct StoryRng {
    /// Random number generator.
    gen: ChaCha8Rng,
    /// Seed for the generator.
    seed: u64,
}

impl Default for StoryRng {
    fn default() -> Self {
        let seed = ChaCha8Rng::from_entropy().next_u64();
        StoryRng::with_seed(seed)
    }
}

impl StoryRng {
    /// Initiate the random number generator with a seed.
    pub fn with_seed(seed: u64) -> Self {
        let mut gen = ChaCha8Rng::seed_from_u64(seed);

        // `get_word_pos()` will panic unless we set the stream to 0
        gen.set_word_pos(0);

        StoryRng { gen, seed }
    }

    /// Initiate the random number generator with a seed and word position.
    fn with_seed_and_position(seed: u64, position: u128) -> Self {
        let mut rng = Self::with_seed(seed);
        rng.gen.set_word_pos(position);

        rng
    }

    /// Seed the stream was started from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw a number in `[0, 1)`.
    pub fn next_number(&mut self) -> f64 {
        self.gen.gen::<f64>()
    }

    /// Draw an integer in `1..=max`. A maximum of 0 is treated as 1.
    pub fn next_in_range(&mut self, max: u64) -> u64 {
        self.gen.sample(Uniform::new_inclusive(1, max.max(1)))
    }
}

impl PartialEq for StoryRng {
    fn eq(&self, other: &Self) -> bool {
        self.seed == other.seed && self.gen.get_word_pos() == other.gen.get_word_pos()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde_support",
    derive(Deserialize, Serialize),
    serde(rename = "StoryRng")
)]
/// Seed and word position of a [`StoryRng`].
///
/// The word position of `ChaCha8Rng` is a u128 but is kept as a u64, which every
/// serde format can represent.
struct RngState {
    seed: u64,
    position: u64,
}

impl From<StoryRng> for RngState {
    fn from(rng: StoryRng) -> Self {
        RngState {
            seed: rng.seed,
            position: rng.gen.get_word_pos() as u64,
        }
    }
}

impl From<RngState> for StoryRng {
    fn from(state: RngState) -> Self {
        StoryRng::with_seed_and_position(state.seed, state.position as u128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streams_with_the_same_seed_give_the_same_numbers() {
        let mut first = StoryRng::with_seed(7);
        let mut second = StoryRng::with_seed(7);

        for _ in 0..10 {
            assert_eq!(first.next_in_range(100), second.next_in_range(100));
        }

        assert_eq!(first, second);
    }

    #[test]
    fn numbers_in_range_stay_within_one_and_the_maximum() {
        let mut rng = StoryRng::with_seed(3);

        for _ in 0..200 {
            let number = rng.next_in_range(6);
            assert!(number >= 1 && number <= 6);
        }

        assert_eq!(rng.next_in_range(0), 1);
    }

    #[test]
    fn largest_range_can_be_drawn_from() {
        let mut rng = StoryRng::with_seed(3);

        for _ in 0..20 {
            assert!(rng.next_in_range(u64::MAX) >= 1);
        }
    }

    #[test]
    fn state_restores_the_stream_position() {
        let mut rng = StoryRng::with_seed(9);
        rng.next_in_range(10);
        rng.next_number();

        let mut restored = StoryRng::from(RngState::from(rng.clone()));
        assert_eq!(restored, rng);
        assert_eq!(restored.next_in_range(1000), rng.next_in_range(1000));
    }

    #[test]
    fn numbers_are_drawn_from_the_unit_interval() {
        let mut rng = StoryRng::with_seed(11);

        for _ in 0..200 {
            let number = rng.next_number();
            assert!(number >= 0.0 && number < 1.0);
        }
    }

    #[test]
    fn drawing_numbers_advances_the_stream() {
        let mut rng = StoryRng::with_seed(5);
        rng.next_number();

        assert_ne!(rng, StoryRng::with_seed(5));
        assert_eq!(rng.seed(), 5);
    }

    #[cfg(feature = "serde_support")]
    mod serde_tests {
        use super::*;
        use serde_test::*;

        #[test]
        fn story_rng_serializes_with_seed() {
            let seed = 30;
            let rng = StoryRng::with_seed(seed);

            let position = rng.gen.get_word_pos() as u64;

            assert_tokens(
                &rng,
                &[
                    Token::Struct {
                        name: "StoryRng",
                        len: 2,
                    },
                    Token::Str("seed"),
                    Token::U64(seed),
                    Token::Str("position"),
                    Token::U64(position),
                    Token::StructEnd,
                ],
            );
        }

        #[test]
        fn story_rng_serializes_with_correct_word_position() {
            let seed = 30;
            let mut rng = StoryRng::with_seed(seed);

            let mut buffer = vec![0; 64];
            rng.gen.fill_bytes(&mut buffer);

            // Get and sanity check current position, it should not be zero right now
            let position = rng.gen.get_word_pos() as u64;
            assert!(position > 0);

            assert_tokens(
                &rng,
                &[
                    Token::Struct {
                        name: "StoryRng",
                        len: 2,
                    },
                    Token::Str("seed"),
                    Token::U64(seed),
                    Token::Str("position"),
                    Token::U64(position),
                    Token::StructEnd,
                ],
            );
        }
    }
}
