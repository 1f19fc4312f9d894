//! Score arithmetic and time formatting for the results screen.

/// Percentage of correct answers, rounded to the nearest integer.
pub fn calculate_accuracy(correct: usize, total: usize) -> u32 {
    if total > 0 {
        ((correct as f64 / total as f64) * 100.0).round() as u32
    } else {
        0
    }
}

/// Score out of 10, rounded to the nearest integer.
pub fn calculate_score(correct: usize, total: usize) -> u32 {
    if total > 0 {
        ((correct as f64 / total as f64) * 10.0).round() as u32
    } else {
        0
    }
}

/// `MM:SS`.
pub fn format_time(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

pub fn format_time_in_words(seconds: u64) -> String {
    let mins = seconds / 60;
    let secs = seconds % 60;

    let mut result = String::new();

    if mins > 0 {
        result.push_str(&format!("{} minute{}", mins, plural(mins)));
    }

    if secs > 0 {
        if !result.is_empty() {
            result.push_str(" and ");
        }
        result.push_str(&format!("{} second{}", secs, plural(secs)));
    }

    if result.is_empty() {
        "0 seconds".to_string()
    } else {
        result
    }
}

fn plural(n: u64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_accuracy() {
        assert_eq!(calculate_accuracy(0, 0), 0);
        assert_eq!(calculate_accuracy(5, 10), 50);
        assert_eq!(calculate_accuracy(1, 3), 33);
        assert_eq!(calculate_accuracy(2, 3), 67);
        assert_eq!(calculate_accuracy(7, 7), 100);
    }

    #[test]
    fn test_calculate_score() {
        assert_eq!(calculate_score(0, 0), 0);
        assert_eq!(calculate_score(3, 4), 8);
        assert_eq!(calculate_score(10, 10), 10);
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0), "00:00");
        assert_eq!(format_time(59), "00:59");
        assert_eq!(format_time(90), "01:30");
    }

    #[test]
    fn test_format_time_in_words() {
        assert_eq!(format_time_in_words(0), "0 seconds");
        assert_eq!(format_time_in_words(1), "1 second");
        assert_eq!(format_time_in_words(60), "1 minute");
        assert_eq!(format_time_in_words(125), "2 minutes and 5 seconds");
        assert_eq!(format_time_in_words(61), "1 minute and 1 second");
    }
}
