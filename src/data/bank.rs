//! The static local question bank and random selection from it.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::models::{Category, Difficulty, QuizOption, QuizQuestion, QuizSettings};

struct Entry {
    id: &'static str,
    text: &'static str,
    options: [&'static str; 4],
    correct: usize,
    explanation: &'static str,
    difficulty: Difficulty,
    category: Category,
    topic: &'static str,
}

const BUILTIN: &[Entry] = &[
    Entry {
        id: "1",
        text: "What is the smallest prime number?",
        options: ["0", "1", "2", "3"],
        correct: 2,
        explanation: "A prime has exactly two divisors. 1 has only one, so 2 is the smallest prime.",
        difficulty: Difficulty::Easy,
        category: Category::Aptitude,
        topic: "aptitude-1",
    },
    Entry {
        id: "2",
        text: "Which data structure follows the LIFO (Last In, First Out) principle?",
        options: ["Queue", "Stack", "Linked List", "Tree"],
        correct: 1,
        explanation: "A stack follows the LIFO principle, where the last element added is the first one to be removed.",
        difficulty: Difficulty::Medium,
        category: Category::Dsa,
        topic: "dsa-2",
    },
    Entry {
        id: "3",
        text: "What is the time complexity of searching an element in a sorted array using binary search?",
        options: ["O(n)", "O(log n)", "O(n^2)", "O(1)"],
        correct: 1,
        explanation: "Binary search has a time complexity of O(log n) because it halves the search space with each step.",
        difficulty: Difficulty::Medium,
        category: Category::Dsa,
        topic: "dsa-6",
    },
    Entry {
        id: "4",
        text: "Which of the following is NOT a feature of object-oriented programming?",
        options: ["Inheritance", "Polymorphism", "Encapsulation", "Pointers"],
        correct: 3,
        explanation: "Pointers are not a feature of object-oriented programming, but rather a concept from lower-level languages like C and C++.",
        difficulty: Difficulty::Medium,
        category: Category::Programming,
        topic: "programming-1",
    },
    Entry {
        id: "5",
        text: "What is the value of x? 2x + 5 = 15",
        options: ["5", "10", "20", "25"],
        correct: 0,
        explanation: "Subtract 5 from both sides to get 2x = 10, then divide by 2 to get x = 5.",
        difficulty: Difficulty::Easy,
        category: Category::Aptitude,
        topic: "aptitude-4",
    },
    Entry {
        id: "6",
        text: "If a train travels 120 miles in 2 hours, what is its average speed?",
        options: ["40 mph", "60 mph", "80 mph", "100 mph"],
        correct: 1,
        explanation: "Average speed is total distance divided by total time: 120 miles / 2 hours = 60 mph.",
        difficulty: Difficulty::Easy,
        category: Category::Aptitude,
        topic: "aptitude-6",
    },
    Entry {
        id: "7",
        text: "A shopkeeper marks an item 20% above its cost price. If he offers a discount of 10% on the marked price, what is his profit percentage?",
        options: ["10%", "8%", "12%", "15%"],
        correct: 1,
        explanation: "Let the cost price be 100. The marked price is 120. After a 10% discount the selling price is 108, so the profit is 8%.",
        difficulty: Difficulty::Medium,
        category: Category::Aptitude,
        topic: "aptitude-2",
    },
    Entry {
        id: "8",
        text: "If A can do a piece of work in 10 days and B can do the same work in 15 days, how many days will they take to complete the work together?",
        options: ["5 days", "6 days", "8 days", "12 days"],
        correct: 1,
        explanation: "Together they complete 1/10 + 1/15 = 5/30 = 1/6 of the work per day, so the whole work takes 6 days.",
        difficulty: Difficulty::Medium,
        category: Category::Aptitude,
        topic: "aptitude-7",
    },
    Entry {
        id: "9",
        text: "What is the next number in the series: 2, 6, 12, 20, 30, ?",
        options: ["36", "40", "42", "48"],
        correct: 2,
        explanation: "The series follows n * (n + 1) starting at n = 1, so the next number is 6 * 7 = 42.",
        difficulty: Difficulty::Medium,
        category: Category::Aptitude,
        topic: "aptitude-15",
    },
    Entry {
        id: "10",
        text: "If the ratio of boys to girls in a class is 3:5 and there are 24 students in the class, how many girls are there?",
        options: ["8", "15", "16", "20"],
        correct: 1,
        explanation: "The ratio has 8 parts, each worth 24 / 8 = 3 students, so there are 5 * 3 = 15 girls.",
        difficulty: Difficulty::Easy,
        category: Category::Aptitude,
        topic: "aptitude-3",
    },
    Entry {
        id: "11",
        text: "What is the average-case time complexity of lookup in a hash table?",
        options: ["O(1)", "O(log n)", "O(n)", "O(n log n)"],
        correct: 0,
        explanation: "With a good hash function keys spread evenly across buckets, so lookup takes constant time on average.",
        difficulty: Difficulty::Easy,
        category: Category::Dsa,
        topic: "dsa-7",
    },
    Entry {
        id: "12",
        text: "Doctor is to Patient as Teacher is to:",
        options: ["School", "Student", "Education", "Book"],
        correct: 1,
        explanation: "A professional and the person they serve: a doctor serves patients, a teacher serves students.",
        difficulty: Difficulty::Easy,
        category: Category::Reasoning,
        topic: "reasoning-1",
    },
    Entry {
        id: "13",
        text: "All mammals are warm-blooded. All whales are mammals. Which conclusion follows?",
        options: [
            "All warm-blooded animals are mammals",
            "All whales are warm-blooded",
            "Some warm-blooded animals are not mammals",
            "No conclusion follows",
        ],
        correct: 1,
        explanation: "Chaining the two universal premises gives: all whales are warm-blooded.",
        difficulty: Difficulty::Medium,
        category: Category::Reasoning,
        topic: "reasoning-2",
    },
    Entry {
        id: "14",
        text: "Which keyword declares an immutable binding in JavaScript?",
        options: ["var", "let", "const", "static"],
        correct: 2,
        explanation: "`const` bindings cannot be reassigned after initialization.",
        difficulty: Difficulty::Easy,
        category: Category::Programming,
        topic: "programming-3",
    },
    Entry {
        id: "15",
        text: "Which sorting algorithm has the best worst-case time complexity?",
        options: ["Quick sort", "Merge sort", "Bubble sort", "Insertion sort"],
        correct: 1,
        explanation: "Merge sort is O(n log n) in every case; quick sort degrades to O(n^2) in the worst case.",
        difficulty: Difficulty::Hard,
        category: Category::Dsa,
        topic: "dsa-5",
    },
];

/// The built-in bank.
pub fn builtin_questions() -> Vec<QuizQuestion> {
    BUILTIN.iter().map(to_question).collect()
}

fn to_question(entry: &Entry) -> QuizQuestion {
    const LETTERS: [char; 4] = ['a', 'b', 'c', 'd'];

    QuizQuestion {
        id: entry.id.to_string(),
        text: entry.text.to_string(),
        options: entry
            .options
            .iter()
            .enumerate()
            .map(|(i, text)| QuizOption {
                id: format!("{}{}", entry.id, LETTERS[i]),
                text: text.to_string(),
                is_correct: i == entry.correct,
            })
            .collect(),
        explanation: entry.explanation.to_string(),
        difficulty: entry.difficulty,
        category: entry.category,
        topic: entry.topic.to_string(),
        template_id: None,
    }
}

/// Pick up to `count` random questions on the selected topics.
///
/// Prefers questions at the selected difficulty; when fewer than `count`
/// match, any difficulty on the selected topics is accepted.
pub fn random_questions<R: Rng + ?Sized>(
    bank: &[QuizQuestion],
    settings: &QuizSettings,
    count: usize,
    rng: &mut R,
) -> Vec<QuizQuestion> {
    let on_topic = |q: &&QuizQuestion| settings.selected_topics.iter().any(|t| t.id == q.topic);

    let matching: Vec<&QuizQuestion> = bank
        .iter()
        .filter(on_topic)
        .filter(|q| q.difficulty == settings.difficulty)
        .collect();

    let mut available: Vec<QuizQuestion> = if matching.len() >= count {
        matching.into_iter().cloned().collect()
    } else {
        bank.iter().filter(on_topic).cloned().collect()
    };

    available.shuffle(rng);
    available.truncate(count);
    available
}
