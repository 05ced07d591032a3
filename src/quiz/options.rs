//! Multiple-choice option generation

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::flashcards::Card;

pub const DEFAULT_OPTION_COUNT: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerOption {
    pub text: String,
    pub is_correct: bool,
}

/// Build `count` shuffled options: the correct answer plus distractors
///
/// Distractors come from the same module when it has enough other cards,
/// otherwise from the whole collection. Small collections yield fewer options.
pub fn generate_multiple_choice_options<R: Rng + ?Sized>(
    correct: &Card,
    all_cards: &[Card],
    count: usize,
    rng: &mut R,
) -> Vec<AnswerOption> {
    let wanted = count.saturating_sub(1);

    let same_module: Vec<&Card> = all_cards
        .iter()
        .filter(|c| c.module == correct.module && c.id != correct.id)
        .collect();
    let mut pool = if same_module.len() >= wanted {
        same_module
    } else {
        all_cards.iter().filter(|c| c.id != correct.id).collect()
    };

    pool.shuffle(rng);
    let mut options: Vec<AnswerOption> = pool
        .into_iter()
        .take(wanted)
        .map(|c| AnswerOption {
            text: c.back.clone(),
            is_correct: false,
        })
        .collect();
    options.push(AnswerOption {
        text: correct.back.clone(),
        is_correct: true,
    });

    options.shuffle(rng);
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn card(id: &str, back: &str, module: &str) -> Card {
        let mut c = Card::new(id.to_string(), back.to_string(), module.to_string(), Utc::now());
        c.id = id.to_string();
        c
    }

    #[test]
    fn test_prefers_same_module_distractors() {
        let cards = vec![
            card("a", "one", "Numbers"),
            card("b", "two", "Numbers"),
            card("c", "three", "Numbers"),
            card("d", "four", "Numbers"),
            card("e", "red", "Colours"),
            card("f", "blue", "Colours"),
        ];
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..20 {
            let options = generate_multiple_choice_options(&cards[0], &cards, 4, &mut rng);
            assert_eq!(options.len(), 4);
            assert_eq!(options.iter().filter(|o| o.is_correct).count(), 1);
            assert!(options.iter().any(|o| o.is_correct && o.text == "one"));
            assert!(options.iter().all(|o| o.text != "red" && o.text != "blue"));
        }
    }

    #[test]
    fn test_falls_back_to_whole_collection() {
        let cards = vec![
            card("a", "one", "Numbers"),
            card("b", "two", "Numbers"),
            card("e", "red", "Colours"),
            card("f", "blue", "Colours"),
        ];
        let mut rng = StdRng::seed_from_u64(1);
        let options = generate_multiple_choice_options(&cards[0], &cards, 4, &mut rng);

        let mut texts: Vec<&str> = options.iter().map(|o| o.text.as_str()).collect();
        texts.sort();
        assert_eq!(texts, vec!["blue", "one", "red", "two"]);
    }

    #[test]
    fn test_tiny_collection() {
        let cards = vec![card("a", "one", "Numbers")];
        let mut rng = StdRng::seed_from_u64(3);
        let options = generate_multiple_choice_options(&cards[0], &cards, 4, &mut rng);
        assert_eq!(
            options,
            vec![AnswerOption {
                text: "one".to_string(),
                is_correct: true
            }]
        );
    }
}
