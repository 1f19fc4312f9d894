use std::fmt;

use serde::{Deserialize, Serialize};

/// Broad subject area a topic belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Aptitude,
    Programming,
    Dsa,
    Reasoning,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Aptitude,
        Category::Programming,
        Category::Dsa,
        Category::Reasoning,
    ];

    /// Human readable label used in tabs and prompts.
    pub fn label(self) -> &'static str {
        match self {
            Category::Aptitude => "Aptitude",
            Category::Programming => "Programming",
            Category::Dsa => "DSA",
            Category::Reasoning => "Reasoning",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Aptitude => "aptitude",
            Category::Programming => "programming",
            Category::Dsa => "dsa",
            Category::Reasoning => "reasoning",
        };
        f.write_str(name)
    }
}

/// A labeled subject area with a fixed category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Topic {
    pub id: String,
    pub name: String,
    pub category: Category,
}

impl Topic {
    pub fn new(id: impl Into<String>, name: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category,
        }
    }
}

const CATALOG: &[(&str, &str, Category)] = &[
    ("aptitude-1", "Number System", Category::Aptitude),
    ("aptitude-2", "Percentage", Category::Aptitude),
    ("aptitude-3", "Ratio & Proportion", Category::Aptitude),
    ("aptitude-4", "Algebra", Category::Aptitude),
    ("aptitude-5", "Progressions", Category::Aptitude),
    ("aptitude-6", "Time, Speed & Distance", Category::Aptitude),
    ("aptitude-7", "Work & Time", Category::Aptitude),
    ("aptitude-8", "Mensuration", Category::Aptitude),
    ("aptitude-9", "Geometry", Category::Aptitude),
    ("aptitude-10", "Probability", Category::Aptitude),
    ("aptitude-11", "Permutation & Combination", Category::Aptitude),
    ("aptitude-12", "Statistics", Category::Aptitude),
    ("aptitude-13", "Data Interpretation", Category::Aptitude),
    ("aptitude-14", "Reasoning", Category::Aptitude),
    ("aptitude-15", "Logical Series", Category::Aptitude),
    ("aptitude-16", "Coding-Decoding", Category::Aptitude),
    ("aptitude-17", "Blood Relations", Category::Aptitude),
    ("aptitude-18", "Simple Interest", Category::Aptitude),
    ("aptitude-19", "Compound Interest", Category::Aptitude),
    ("aptitude-20", "Profit & Loss", Category::Aptitude),
    ("programming-1", "Java", Category::Programming),
    ("programming-2", "Python", Category::Programming),
    ("programming-3", "JavaScript", Category::Programming),
    ("programming-4", "C++", Category::Programming),
    ("programming-5", "C#", Category::Programming),
    ("programming-6", "Go", Category::Programming),
    ("dsa-1", "Arrays", Category::Dsa),
    ("dsa-2", "Linked Lists", Category::Dsa),
    ("dsa-3", "Trees", Category::Dsa),
    ("dsa-4", "Graphs", Category::Dsa),
    ("dsa-5", "Sorting Algorithms", Category::Dsa),
    ("dsa-6", "Searching Algorithms", Category::Dsa),
    ("dsa-7", "Hash Tables", Category::Dsa),
    ("reasoning-1", "Verbal Analogies", Category::Reasoning),
    ("reasoning-2", "Syllogisms", Category::Reasoning),
    ("reasoning-3", "Logical Deduction", Category::Reasoning),
    ("reasoning-4", "Pattern Recognition", Category::Reasoning),
    ("reasoning-5", "Matrices", Category::Reasoning),
    ("reasoning-6", "Critical Thinking", Category::Reasoning),
    ("reasoning-7", "Situational Judgement", Category::Reasoning),
    ("reasoning-8", "Statement & Conclusion", Category::Reasoning),
];

/// The full static topic catalog, in display order.
pub fn catalog() -> Vec<Topic> {
    CATALOG
        .iter()
        .map(|(id, name, category)| Topic::new(*id, *name, *category))
        .collect()
}

/// Topics of one category, in display order.
pub fn topics_in(category: Category) -> Vec<Topic> {
    CATALOG
        .iter()
        .filter(|(_, _, c)| *c == category)
        .map(|(id, name, c)| Topic::new(*id, *name, *c))
        .collect()
}

/// Look up a catalog topic by id.
pub fn find_topic(id: &str) -> Option<Topic> {
    CATALOG
        .iter()
        .find(|(topic_id, _, _)| *topic_id == id)
        .map(|(id, name, category)| Topic::new(*id, *name, *category))
}
