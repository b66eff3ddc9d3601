pub mod detect_emotion_use_case;
