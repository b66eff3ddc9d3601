use serde::Serialize;

/// The fixed seven-label emotion vocabulary.
///
/// Every persisted detection and every catalog tag uses the lowercase
/// [`label`](Emotion::label); responses show the capitalized
/// [`display_name`](Emotion::display_name).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Angry,
    Disgust,
    Fear,
    Happy,
    Sad,
    Surprise,
    Neutral,
}

impl Emotion {
    pub const ALL: [Emotion; 7] = [
        Emotion::Angry,
        Emotion::Disgust,
        Emotion::Fear,
        Emotion::Happy,
        Emotion::Sad,
        Emotion::Surprise,
        Emotion::Neutral,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Emotion::Angry => "angry",
            Emotion::Disgust => "disgust",
            Emotion::Fear => "fear",
            Emotion::Happy => "happy",
            Emotion::Sad => "sad",
            Emotion::Surprise => "surprise",
            Emotion::Neutral => "neutral",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Emotion::Angry => "Angry",
            Emotion::Disgust => "Disgust",
            Emotion::Fear => "Fear",
            Emotion::Happy => "Happy",
            Emotion::Sad => "Sad",
            Emotion::Surprise => "Surprise",
            Emotion::Neutral => "Neutral",
        }
    }

    pub fn from_label(label: &str) -> Option<Emotion> {
        Emotion::ALL.into_iter().find(|e| e.label() == label)
    }

    pub(crate) fn index(self) -> usize {
        match self {
            Emotion::Angry => 0,
            Emotion::Disgust => 1,
            Emotion::Fear => 2,
            Emotion::Happy => 3,
            Emotion::Sad => 4,
            Emotion::Surprise => 5,
            Emotion::Neutral => 6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_all_contains_every_label_once() {
        let labels: Vec<&str> = Emotion::ALL.iter().map(|e| e.label()).collect();
        assert_eq!(
            labels,
            ["angry", "disgust", "fear", "happy", "sad", "surprise", "neutral"]
        );
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, emotion) in Emotion::ALL.into_iter().enumerate() {
            assert_eq!(emotion.index(), i);
        }
    }

    #[rstest]
    #[case(Emotion::Happy, "happy", "Happy")]
    #[case(Emotion::Surprise, "surprise", "Surprise")]
    #[case(Emotion::Neutral, "neutral", "Neutral")]
    fn test_label_casing(#[case] emotion: Emotion, #[case] label: &str, #[case] display: &str) {
        assert_eq!(emotion.label(), label);
        assert_eq!(emotion.display_name(), display);
    }

    #[test]
    fn test_from_label_round_trips() {
        for emotion in Emotion::ALL {
            assert_eq!(Emotion::from_label(emotion.label()), Some(emotion));
        }
    }

    #[test]
    fn test_from_label_rejects_unknown_and_cased() {
        assert_eq!(Emotion::from_label("bored"), None);
        assert_eq!(Emotion::from_label("Happy"), None);
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(
            serde_json::to_value(Emotion::Fear).unwrap(),
            serde_json::json!("fear")
        );
    }
}
