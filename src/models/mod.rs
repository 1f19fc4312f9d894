mod question;
mod result;
mod settings;
mod topic;

pub use question::{Difficulty, QuizOption, QuizQuestion};
pub use result::{QuizAnswer, QuizResult};
pub use settings::{QuizSettings, SettingsError};
pub use topic::{catalog, find_topic, topics_in, Category, Topic};

#[cfg(test)]
pub(crate) mod testing;
