//! Offline question generator used when the remote source fails.
//!
//! Each category has a small template library. Numeric templates take
//! random parameters so repeated batches differ.

use std::collections::HashSet;

use rand::Rng;
use rand::seq::IndexedRandom;

use crate::models::{Category, QuizSettings, Topic};

use super::error::SourcingError;
use super::parse::{GeneratedOption, GeneratedQuestion};

const LANGUAGES: [&str; 4] = ["Java", "Python", "JavaScript", "C++"];
const DATA_STRUCTURES: [&str; 5] = ["Arrays", "Linked Lists", "Trees", "Graphs", "Hash Tables"];

/// Re-rolls of a template id before falling back to an index-based one.
const MAX_REROLLS: usize = 200;

/// Question body produced by a template, before topic and template id are attached.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub text: String,
    pub options: Vec<GeneratedOption>,
    pub explanation: String,
}

fn opt(text: impl Into<String>, is_correct: bool) -> GeneratedOption {
    GeneratedOption {
        text: text.into(),
        is_correct,
    }
}

/// Generate `settings.number_of_questions` questions, cycling through the selected topics.
///
/// `date` is appended to every question text as `(date)`.
pub fn generate<R: Rng + ?Sized>(
    settings: &QuizSettings,
    session_id: &str,
    date: &str,
    rng: &mut R,
) -> Result<Vec<GeneratedQuestion>, SourcingError> {
    if settings.selected_topics.is_empty() {
        return Err(SourcingError::Exhausted("no topics selected".to_string()));
    }

    let mut used_templates = HashSet::new();
    let mut questions = Vec::with_capacity(settings.number_of_questions);

    for i in 0..settings.number_of_questions {
        let topic = &settings.selected_topics[i % settings.selected_topics.len()];
        let template_id = unique_template_id(session_id, topic, i, &mut used_templates, rng);
        let variant = template_variant(&template_id);

        let draft = match topic.category {
            Category::Aptitude => aptitude_draft(topic, variant, rng),
            Category::Programming => {
                let language = LANGUAGES.choose(rng).copied().unwrap_or(LANGUAGES[0]);
                language_feature_question(language)
            }
            Category::Dsa => {
                let structure = DATA_STRUCTURES
                    .choose(rng)
                    .copied()
                    .unwrap_or(DATA_STRUCTURES[0]);
                search_complexity_question(structure)
            }
            Category::Reasoning => reasoning_question(&topic.name, variant),
        };

        questions.push(GeneratedQuestion {
            text: format!("{} ({})", draft.text, date),
            options: draft.options,
            explanation: draft.explanation,
            topic: topic.name.clone(),
            template_id: Some(template_id),
        });
    }

    Ok(questions)
}

fn unique_template_id<R: Rng + ?Sized>(
    session_id: &str,
    topic: &Topic,
    index: usize,
    used: &mut HashSet<String>,
    rng: &mut R,
) -> String {
    let base = format!("{}-{}-{}", session_id, topic.category, topic.id);

    let mut template_id = format!("{}-template{}", base, rng.random_range(0..10u32));
    let mut attempts = 0;
    while used.contains(&template_id) {
        attempts += 1;
        template_id = if attempts > MAX_REROLLS {
            format!("{}-overflow{}-{}", base, index, rng.random_range(0..10u32))
        } else {
            format!("{}-template{}", base, rng.random_range(0..100u32))
        };
    }

    used.insert(template_id.clone());
    template_id
}

/// The trailing digit of a template id selects between fixed templates.
fn template_variant(template_id: &str) -> u32 {
    template_id
        .chars()
        .last()
        .and_then(|c| c.to_digit(10))
        .unwrap_or(0)
}

fn aptitude_draft<R: Rng + ?Sized>(topic: &Topic, variant: u32, rng: &mut R) -> Draft {
    if topic.name.contains("Probability") {
        probability_question(rng.random_range(2..=7))
    } else if topic.name.contains("Reasoning") {
        aptitude_reasoning_question(variant)
    } else if topic.name.contains("Percentage") {
        let price = rng.random_range(500..1500);
        let discount = rng.random_range(10..40);
        discount_question(price, discount)
    } else {
        let a = rng.random_range(5..15);
        let b = rng.random_range(10..20);
        work_rate_question(a, b)
    }
}

pub fn probability_question(rolls: u32) -> Draft {
    Draft {
        text: format!(
            "If you roll a fair die {} times, what is the probability of getting at least one 6?",
            rolls
        ),
        options: vec![
            opt(format!("1-(5/6)^{}", rolls), true),
            opt(format!("(1/6)^{}", rolls), false),
            opt(format!("{}/6", rolls), false),
            opt(format!("1-{}/6", rolls), false),
        ],
        explanation: format!(
            "When rolling a die {0} times, the probability of not getting a 6 in any roll is (5/6)^{0}. \
             So, the probability of getting at least one 6 is 1-(5/6)^{0}.",
            rolls
        ),
    }
}

fn aptitude_reasoning_question(variant: u32) -> Draft {
    match variant {
        0 => Draft {
            text: "In a sequence 3, 6, 11, 18, 27, what comes next?".to_string(),
            options: vec![
                opt("38", true),
                opt("36", false),
                opt("40", false),
                opt("42", false),
            ],
            explanation: "The differences are +3, +5, +7, +9, so the next one is +11: 27 + 11 = 38."
                .to_string(),
        },
        1 => Draft {
            text: "If \"COMPUTER\" is coded as \"RFUVQNPC\", how will \"PRINTER\" be coded?"
                .to_string(),
            options: vec![
                opt("QSJOUFQ", false),
                opt("SFUOJSQ", true),
                opt("QSJOUFS", false),
                opt("SFUOSJQ", false),
            ],
            explanation: "Each letter moves one place forward in the alphabet and the word is written \
                          in reverse: PRINTER becomes QSJOUFS, reversed SFUOJSQ."
                .to_string(),
        },
        _ => Draft {
            text: "If all roses are flowers and some flowers fade quickly, which of the following statements must be true?"
                .to_string(),
            options: vec![
                opt("All roses fade quickly", false),
                opt("Some roses fade quickly", false),
                opt("No roses fade quickly", false),
                opt("None of the above", true),
            ],
            explanation: "We only know that roses are flowers. The flowers that fade quickly may or may not \
                          include roses, so no definite conclusion about roses follows."
                .to_string(),
        },
    }
}

/// Selling price after a percentage discount on a marked price.
pub fn discount_question(price: u32, discount: u32) -> Draft {
    let selling_price = price as f64 * (1.0 - discount as f64 / 100.0);
    let discount_amount = (price * discount) as f64 / 100.0;

    Draft {
        text: format!(
            "A product is marked at ₹{} and sold at a discount of {}%. What is the selling price?",
            price, discount
        ),
        options: vec![
            opt(format!("₹{}", selling_price), true),
            opt(format!("₹{}", price as i64 - discount as i64), false),
            opt(format!("₹{}", selling_price - 10.0), false),
            opt(format!("₹{}", selling_price + 15.0), false),
        ],
        explanation: format!(
            "To find the selling price, we calculate: Marked price - Discount = ₹{0} - {1}% of ₹{0} = ₹{0} - ₹{2} = ₹{3}",
            price, discount, discount_amount, selling_price
        ),
    }
}

/// Days for A and B working together.
pub fn work_rate_question(a: u32, b: u32) -> Draft {
    let answer = (a * b) as f64 / (a + b) as f64;
    let average = (a + b) as f64 / 2.0;

    Draft {
        text: format!(
            "If A can complete a work in {} days and B can complete the same work in {} days, \
             how many days will they take to complete the work together?",
            a, b
        ),
        options: vec![
            opt(format!("{:.1} days", answer), true),
            opt(format!("{:.1} days", answer + 1.5), false),
            opt(format!("{:.1} days", answer - 1.0), false),
            opt(format!("{} days", average), false),
        ],
        explanation: format!(
            "A's one day work = 1/{a}, B's one day work = 1/{b}. Together they complete \
             (1/{a} + 1/{b}) = ({b}+{a})/{product} = {sum}/{product} of the work in one day. \
             So they'll complete the entire work in {product}/{sum} = {answer:.2} days.",
            a = a,
            b = b,
            product = a * b,
            sum = a + b,
            answer = answer
        ),
    }
}

pub fn language_feature_question(language: &str) -> Draft {
    let is_java = language == "Java";

    Draft {
        text: format!("Which of the following is NOT a feature of {}?", language),
        options: vec![
            opt(
                if is_java {
                    "Pointer arithmetic"
                } else {
                    "Automatic garbage collection"
                },
                is_java,
            ),
            opt("Object-oriented programming", false),
            opt("Exception handling", false),
            opt(
                if is_java {
                    "Function overloading"
                } else {
                    "Manual memory management"
                },
                !is_java,
            ),
        ],
        explanation: if is_java {
            "Java does not support pointer arithmetic unlike languages like C and C++. \
             Java uses references instead of pointers and handles memory management automatically."
                .to_string()
        } else {
            format!(
                "For {}, manual memory management is not a key feature as it has automatic \
                 garbage collection, unlike C where memory must be manually managed.",
                language
            )
        },
    }
}

pub fn search_complexity_question(structure: &str) -> Draft {
    let correct = match structure {
        "Arrays" => "O(n) for unsorted arrays, O(log n) for sorted arrays using binary search",
        "Linked Lists" => "O(n)",
        "Trees" => "O(log n) for balanced binary search trees, O(n) for unbalanced trees",
        "Graphs" => "O(V+E) using BFS or DFS, where V is the number of vertices and E is the number of edges",
        _ => "O(1) average case, O(n) worst case",
    };

    Draft {
        text: format!(
            "What is the time complexity of searching an element in {}?",
            structure
        ),
        options: vec![
            opt(correct, true),
            opt("O(1) in all cases", false),
            opt("O(n²)", false),
            opt("O(n log n)", false),
        ],
        explanation: format!(
            "For {}, the time complexity for searching is {}. This follows from how the structure \
             organizes and accesses its elements.",
            structure, correct
        ),
    }
}

fn reasoning_question(topic_name: &str, variant: u32) -> Draft {
    match variant % 4 {
        0 if topic_name.contains("Verbal") => Draft {
            text: "Doctor is to Patient as Teacher is to:".to_string(),
            options: vec![
                opt("School", false),
                opt("Student", true),
                opt("Education", false),
                opt("Book", false),
            ],
            explanation: "The relationship is that of a professional and the person they serve. \
                          A doctor serves patients, and a teacher serves students."
                .to_string(),
        },
        1 if topic_name.contains("Syllogism") => Draft {
            text: "All mammals are warm-blooded. All whales are mammals. Which conclusion follows?"
                .to_string(),
            options: vec![
                opt("All warm-blooded animals are mammals", false),
                opt("All whales are warm-blooded", true),
                opt("Some warm-blooded animals are not mammals", false),
                opt("No conclusion follows", false),
            ],
            explanation: "From 'All mammals are warm-blooded' and 'All whales are mammals' it follows \
                          by transitivity that 'All whales are warm-blooded'."
                .to_string(),
        },
        2 if topic_name.contains("Pattern") => Draft {
            text: "What comes next in the pattern? 2, 6, 18, 54, ?".to_string(),
            options: vec![
                opt("108", false),
                opt("162", true),
                opt("216", false),
                opt("324", false),
            ],
            explanation: "Each number is multiplied by 3 to get the next: 2×3=6, 6×3=18, 18×3=54, 54×3=162"
                .to_string(),
        },
        _ => Draft {
            text: "In a certain code, 'TEMPLE' is written as 'DKOLDS'. How would 'PRAYER' be written in that code?"
                .to_string(),
            options: vec![
                opt("XQDZFS", false),
                opt("QDZXFS", true),
                opt("QZXDFS", false),
                opt("QDXZFS", false),
            ],
            explanation: "Each letter is shifted two positions backward in the alphabet and adjacent \
                          letters are then swapped, which turns PRAYER into QDZXFS."
                .to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Difficulty, find_topic};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn settings(topic_ids: &[&str], count: usize) -> QuizSettings {
        let topics = topic_ids.iter().map(|id| find_topic(id).unwrap()).collect();
        QuizSettings::new(topics, 30, Difficulty::Medium, count).unwrap()
    }

    fn correct_count(options: &[GeneratedOption]) -> usize {
        options.iter().filter(|o| o.is_correct).count()
    }

    #[test]
    fn test_work_rate_ten_and_fifteen() {
        let draft = work_rate_question(10, 15);
        let correct: Vec<_> = draft.options.iter().filter(|o| o.is_correct).collect();

        assert_eq!(correct.len(), 1);
        assert_eq!(correct[0].text, "6.0 days");
        assert_eq!(draft.options[1].text, "7.5 days");
        assert_eq!(draft.options[2].text, "5.0 days");
        assert_eq!(draft.options[3].text, "12.5 days");
        assert!(draft.explanation.contains("150/25 = 6.00 days"));
    }

    #[test]
    fn test_discount_is_exact() {
        let draft = discount_question(1000, 25);
        assert_eq!(draft.options[0].text, "₹750");
        assert!(draft.options[0].is_correct);
        assert_eq!(draft.options[1].text, "₹975");
        assert_eq!(draft.options[2].text, "₹740");
        assert_eq!(draft.options[3].text, "₹765");

        let draft = discount_question(512, 10);
        assert_eq!(draft.options[0].text, "₹460.8");
    }

    #[test]
    fn test_language_question_has_one_correct_option() {
        for language in LANGUAGES {
            let draft = language_feature_question(language);
            assert_eq!(correct_count(&draft.options), 1, "{}", language);
        }
        assert!(language_feature_question("Java").options[0].is_correct);
        assert!(language_feature_question("Python").options[3].is_correct);
    }

    #[test]
    fn test_dsa_fallback_single_question() {
        let mut rng = StdRng::seed_from_u64(3);
        let questions = generate(&settings(&["dsa-1"], 1), "sess", "2025-01-31", &mut rng).unwrap();

        assert_eq!(questions.len(), 1);
        let question = &questions[0];
        assert_eq!(question.topic, "Arrays");
        assert_eq!(question.options.len(), 4);
        assert_eq!(correct_count(&question.options), 1);
        assert!(question.text.starts_with("What is the time complexity of searching"));
        assert!(question.text.ends_with("(2025-01-31)"));
    }

    #[test]
    fn test_generate_cycles_topics_with_unique_templates() {
        let mut rng = StdRng::seed_from_u64(11);
        let settings = settings(
            &["aptitude-10", "aptitude-14", "aptitude-2", "aptitude-7", "programming-1", "reasoning-4"],
            24,
        );

        let questions = generate(&settings, "sess", "2025-01-31", &mut rng).unwrap();
        assert_eq!(questions.len(), 24);

        for (i, question) in questions.iter().enumerate() {
            let topic = &settings.selected_topics[i % settings.selected_topics.len()];
            assert_eq!(question.topic, topic.name);
            assert_eq!(question.options.len(), 4);
            assert_eq!(correct_count(&question.options), 1, "{}", question.text);
        }

        let templates: HashSet<_> = questions.iter().map(|q| q.template_id.clone()).collect();
        assert_eq!(templates.len(), questions.len());
    }

    #[test]
    fn test_template_ids_stay_unique_beyond_reroll_space() {
        let mut rng = StdRng::seed_from_u64(5);
        let questions = generate(&settings(&["reasoning-1"], 150), "s", "d", &mut rng).unwrap();

        let templates: HashSet<_> = questions.iter().map(|q| q.template_id.clone()).collect();
        assert_eq!(templates.len(), 150);
    }

    #[test]
    fn test_reasoning_variants() {
        assert!(reasoning_question("Verbal Analogies", 0).text.starts_with("Doctor"));
        assert!(reasoning_question("Verbal Analogies", 1).text.contains("TEMPLE"));
        assert!(reasoning_question("Syllogisms", 5).text.starts_with("All mammals"));
        assert!(reasoning_question("Pattern Recognition", 6).text.contains("2, 6, 18, 54"));
    }

    #[test]
    fn test_generate_without_topics_fails() {
        let mut broken = settings(&["dsa-1"], 2);
        broken.selected_topics.clear();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(generate(&broken, "s", "d", &mut rng).is_err());
    }
}
