use rs_ngram_core::{tokenize, NGramModel};
use proptest::prelude::*;

// --- STRATEGIES ---

// Sentences over a tiny vocabulary so that contexts repeat often
prop_compose! {
    fn arb_corpus()(
        words in proptest::collection::vec(
            prop_oneof![
                Just("the"), Just("cat"), Just("dog"), Just("sat"),
                Just("ran"), Just("."), Just(","), Just("!")
            ],
            0..40
        )
    ) -> String {
        words.join(" ")
    }
}

prop_compose! {
    fn arb_phrase()(
        words in proptest::collection::vec(
            prop_oneof![Just("the"), Just("cat"), Just("dog"), Just("unseen")],
            0..4
        )
    ) -> String {
        words.join(" ")
    }
}

proptest! {
    #[test]
    fn tokenize_is_idempotent(text in "[a-zA-Z0-9 .,!?;:()'\t\n\x1c-\x1f\u{e9}\u{c9}\u{3000}-]{0,80}") {
        let tokens = tokenize(&text);
        prop_assert_eq!(tokenize(&tokens.join(" ")), tokens.clone());

        for token in &tokens {
            prop_assert!(!token.is_empty());
            prop_assert!(!token.chars().any(char::is_whitespace));
            prop_assert!(!token.chars().any(|c| ('\u{1c}'..='\u{1f}').contains(&c)), "token contains a U+001C..U+001F separator: {:?}", token);
        }
    }

    #[test]
    fn matched_order_scores_sum_to_one(
        n in 1usize..5,
        corpus in arb_corpus(),
        phrase in arb_phrase()
    ) {
        let mut model = NGramModel::new(n).unwrap();
        model.train(&corpus);

        let predictions = model.predict(&phrase, usize::MAX);
        prop_assert!(!predictions.is_empty());

        let total: f64 = predictions.iter().map(|p| p.score).sum();
        prop_assert!((total - 1.0).abs() < 1e-9, "total was {}", total);

        for pair in predictions.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn training_is_additive(
        n in 1usize..5,
        first in arb_corpus(),
        second in arb_corpus()
    ) {
        let mut both = NGramModel::new(n).unwrap();
        both.train(&first);
        both.train(&second);

        let mut only_first = NGramModel::new(n).unwrap();
        only_first.train(&first);
        let mut only_second = NGramModel::new(n).unwrap();
        only_second.train(&second);

        for k in 1..=n {
            for (context, count) in both.contexts(k) {
                let context: Vec<&str> = context.iter().map(String::as_str).collect();
                prop_assert_eq!(
                    count,
                    only_first.context_count(k, &context) + only_second.context_count(k, &context)
                );
            }
        }
    }
}
