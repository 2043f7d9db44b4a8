//! The journal's emotion vocabulary, mapped onto a 0-100 intensity scale.

/// Maps an emotion label to its score on the 0-100 domain scale.
///
/// Returns `None` for labels outside the journal's vocabulary; entries with
/// unknown emotions are excluded from the trend rather than scored as zero.
pub fn emotion_score(label: &str) -> Option<u8> {
    let score = match label.trim().to_ascii_lowercase().as_str() {
        "euphoric" => 95,
        "confident" => 85,
        "excited" => 80,
        "motivated" => 75,
        "calm" => 70,
        "focused" => 65,
        "neutral" => 50,
        "bored" => 45,
        "tired" => 40,
        "greedy" => 35,
        "anxious" => 30,
        "frustrated" => 25,
        "fearful" => 20,
        "angry" => 15,
        "devastated" => 10,
        _ => return None,
    };
    Some(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_are_scored() {
        assert_eq!(emotion_score("confident"), Some(85));
        assert_eq!(emotion_score("  Anxious "), Some(30));
    }

    #[test]
    fn unknown_labels_are_excluded_not_zeroed() {
        assert_eq!(emotion_score("hangry"), None);
        assert_eq!(emotion_score(""), None);
    }
}
