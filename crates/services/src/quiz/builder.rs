use std::collections::HashSet;

use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Country, Question, OPTIONS_PER_QUESTION};

use crate::error::QuizError;
use crate::sampler::sample_with;

/// Every quiz asks exactly this many questions.
pub const QUESTIONS_PER_QUIZ: usize = 10;

const DISTRACTORS_PER_QUESTION: usize = OPTIONS_PER_QUESTION - 1;

/// Builds a question set from validated countries.
///
/// For each sampled country the three distractors are drawn from the names of
/// the other sampled countries, then the four options are shuffled.
#[derive(Debug, Default, Clone, Copy)]
pub struct QuizBuilder;

impl QuizBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Build [`QUESTIONS_PER_QUIZ`] questions using thread-local randomness.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotEnoughCountries` when fewer than
    /// [`QUESTIONS_PER_QUIZ`] distinctly-named countries are available.
    pub fn build(self, countries: &[Country]) -> Result<Vec<Question>, QuizError> {
        let mut rng = rand::rng();
        self.build_with(&mut rng, countries)
    }

    /// Like [`QuizBuilder::build`], drawing from the given random source.
    ///
    /// # Errors
    ///
    /// Same as [`QuizBuilder::build`].
    pub fn build_with<R: Rng + ?Sized>(
        self,
        rng: &mut R,
        countries: &[Country],
    ) -> Result<Vec<Question>, QuizError> {
        // Upstream validation already dedupes; re-checking here keeps the
        // distinct-options invariant local to the builder.
        let mut seen = HashSet::new();
        let pool: Vec<&Country> = countries
            .iter()
            .filter(|country| seen.insert(country.name()))
            .collect();

        if pool.len() < QUESTIONS_PER_QUIZ {
            return Err(QuizError::NotEnoughCountries {
                got: pool.len(),
                need: QUESTIONS_PER_QUIZ,
            });
        }

        let sampled = sample_with(rng, &pool, QUESTIONS_PER_QUIZ);

        let mut questions = Vec::with_capacity(QUESTIONS_PER_QUIZ);
        for country in &sampled {
            let others: Vec<String> = sampled
                .iter()
                .filter(|other| other.name() != country.name())
                .map(|other| other.name().to_string())
                .collect();

            let mut options = sample_with(rng, &others, DISTRACTORS_PER_QUESTION);
            options.push(country.name().to_string());
            options.shuffle(rng);

            questions.push(Question::new(
                country.flag_url().clone(),
                options,
                country.name(),
            )?);
        }

        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn build_countries(count: usize) -> Vec<Country> {
        (0..count)
            .map(|i| {
                Country::new(
                    format!("Country {i}"),
                    &format!("https://flagcdn.com/c{i}.svg"),
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn builder_produces_ten_valid_questions() {
        let countries = build_countries(25);
        let mut rng = StdRng::seed_from_u64(3);

        let questions = QuizBuilder::new().build_with(&mut rng, &countries).unwrap();

        assert_eq!(questions.len(), QUESTIONS_PER_QUIZ);
        for question in &questions {
            assert_eq!(question.options().len(), OPTIONS_PER_QUESTION);
            let answer_hits = question
                .options()
                .iter()
                .filter(|option| *option == question.answer())
                .count();
            assert_eq!(answer_hits, 1);
            // Question::new enforces distinctness; double-check anyway.
            let unique: HashSet<_> = question.options().iter().collect();
            assert_eq!(unique.len(), OPTIONS_PER_QUESTION);
        }
    }

    #[test]
    fn distractors_come_from_the_sampled_countries() {
        let countries = build_countries(10);
        let mut rng = StdRng::seed_from_u64(11);

        let questions = QuizBuilder::new().build_with(&mut rng, &countries).unwrap();

        let names: HashSet<String> = countries
            .iter()
            .map(|country| country.name().to_string())
            .collect();
        for question in &questions {
            for option in question.options() {
                assert!(names.contains(option), "unexpected option {option}");
            }
        }
    }

    #[test]
    fn too_few_countries_is_an_error() {
        let countries = build_countries(9);
        let err = QuizBuilder::new().build(&countries).unwrap_err();
        assert!(matches!(
            err,
            QuizError::NotEnoughCountries { got: 9, need: QUESTIONS_PER_QUIZ }
        ));
    }

    #[test]
    fn duplicate_names_do_not_count_toward_the_pool() {
        let mut countries = build_countries(9);
        countries.push(Country::new("Country 0", "https://flagcdn.com/dup.svg").unwrap());

        let err = QuizBuilder::new().build(&countries).unwrap_err();
        assert!(matches!(err, QuizError::NotEnoughCountries { got: 9, .. }));
    }

    #[test]
    fn each_flag_is_asked_once() {
        let countries = build_countries(12);
        let mut rng = StdRng::seed_from_u64(5);

        let questions = QuizBuilder::new().build_with(&mut rng, &countries).unwrap();

        let flags: HashSet<_> = questions
            .iter()
            .map(|question| question.flag_url().as_str())
            .collect();
        assert_eq!(flags.len(), QUESTIONS_PER_QUIZ);
    }
}
