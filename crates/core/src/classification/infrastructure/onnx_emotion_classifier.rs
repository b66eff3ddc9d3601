//! FER+ emotion classifier using ONNX Runtime via `ort`.
//!
//! The model consumes a 64x64 grayscale face and emits eight logits in the
//! order: neutral, happiness, surprise, sadness, anger, disgust, fear,
//! contempt. Contempt is folded into `disgust` to keep the fixed seven-label
//! vocabulary.

use std::path::Path;

use crate::classification::domain::emotion::Emotion;
use crate::classification::domain::emotion_classifier::{
    ClassifierError, EmotionClassifier, EmotionScores,
};
use crate::shared::frame::Frame;
use crate::shared::region::FaceRegion;

/// Model input resolution (square).
const INPUT_SIZE: u32 = 64;

/// Positions of each output logit in the FER+ head.
const FER_NEUTRAL: usize = 0;
const FER_HAPPINESS: usize = 1;
const FER_SURPRISE: usize = 2;
const FER_SADNESS: usize = 3;
const FER_ANGER: usize = 4;
const FER_DISGUST: usize = 5;
const FER_FEAR: usize = 6;
const FER_CONTEMPT: usize = 7;
const FER_OUTPUTS: usize = 8;

pub struct OnnxEmotionClassifier {
    session: ort::session::Session,
}

impl OnnxEmotionClassifier {
    pub fn from_model_file(path: &Path) -> Result<Self, ClassifierError> {
        let session = ort::session::Session::builder()
            .and_then(|mut builder| builder.commit_from_file(path))
            .map_err(|e| ClassifierError::Inference(format!("cannot load emotion model: {e}")))?;
        Ok(Self { session })
    }
}

impl EmotionClassifier for OnnxEmotionClassifier {
    fn analyze(
        &mut self,
        frame: &Frame,
        face: Option<&FaceRegion>,
    ) -> Result<EmotionScores, ClassifierError> {
        // Restrict to the located face when there is one; otherwise analyze
        // the whole frame rather than rejecting the input.
        let input = match face.and_then(|region| frame.crop(region)) {
            Some(crop) => preprocess(&crop),
            None => preprocess(frame),
        }?;

        let input_value = ort::value::Tensor::from_array(input)
            .map_err(|e| ClassifierError::Inference(format!("cannot build input tensor: {e}")))?;
        let outputs = self
            .session
            .run(ort::inputs![input_value])
            .map_err(|e| ClassifierError::Inference(format!("inference failed: {e}")))?;
        if outputs.len() == 0 {
            return Err(ClassifierError::Inference(
                "emotion model produced no outputs".into(),
            ));
        }

        let tensor = outputs[0]
            .try_extract_array::<f32>()
            .map_err(|e| ClassifierError::Inference(format!("cannot read output tensor: {e}")))?;
        let logits = tensor
            .as_slice()
            .ok_or_else(|| ClassifierError::Inference("output tensor is not contiguous".into()))?;

        scores_from_logits(logits)
    }
}

/// Grayscale + resize to the model's input square, as NCHW float32.
///
/// FER+ takes raw 0-255 intensities; no normalization is applied.
fn preprocess(frame: &Frame) -> Result<ndarray::Array4<f32>, ClassifierError> {
    let gray = image::GrayImage::from_raw(frame.width(), frame.height(), frame.to_luma())
        .ok_or_else(|| ClassifierError::Inference("frame buffer has invalid shape".into()))?;
    let resized = image::imageops::resize(
        &gray,
        INPUT_SIZE,
        INPUT_SIZE,
        image::imageops::FilterType::Triangle,
    );

    let mut input =
        ndarray::Array4::<f32>::zeros((1, 1, INPUT_SIZE as usize, INPUT_SIZE as usize));
    for (x, y, pixel) in resized.enumerate_pixels() {
        input[[0, 0, y as usize, x as usize]] = pixel.0[0] as f32;
    }
    Ok(input)
}

/// Softmax over the FER+ logits, contempt folded into disgust, scaled to
/// percentages over the seven-label vocabulary.
fn scores_from_logits(logits: &[f32]) -> Result<EmotionScores, ClassifierError> {
    if logits.len() < FER_OUTPUTS {
        return Err(ClassifierError::Inference(format!(
            "expected {FER_OUTPUTS} output logits, got {}",
            logits.len()
        )));
    }
    let logits = &logits[..FER_OUTPUTS];

    let max_logit = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&v| (v - max_logit).exp()).collect();
    let sum: f32 = exps.iter().sum();
    let pct = |i: usize| exps[i] / sum * 100.0;

    let mut scores = [0.0f32; 7];
    scores[Emotion::Angry.index()] = pct(FER_ANGER);
    scores[Emotion::Disgust.index()] = pct(FER_DISGUST) + pct(FER_CONTEMPT);
    scores[Emotion::Fear.index()] = pct(FER_FEAR);
    scores[Emotion::Happy.index()] = pct(FER_HAPPINESS);
    scores[Emotion::Sad.index()] = pct(FER_SADNESS);
    scores[Emotion::Surprise.index()] = pct(FER_SURPRISE);
    scores[Emotion::Neutral.index()] = pct(FER_NEUTRAL);
    Ok(EmotionScores::new(scores))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scores_sum_to_one_hundred() {
        let scores = scores_from_logits(&[0.5, 2.0, -1.0, 0.0, 1.5, -0.5, 0.25, -2.0]).unwrap();
        let total: f32 = Emotion::ALL.iter().map(|e| scores.get(*e)).sum();
        assert_relative_eq!(total, 100.0, epsilon = 1e-3);
    }

    #[test]
    fn test_dominant_follows_largest_logit() {
        // Happiness (index 1) dominates.
        let scores = scores_from_logits(&[0.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(scores.dominant(), Emotion::Happy);
        assert!(scores.confidence() > 90.0);
    }

    #[test]
    fn test_contempt_folds_into_disgust() {
        // Contempt (index 7) is the largest single logit, but the response
        // vocabulary has no contempt label.
        let scores = scores_from_logits(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 5.0]).unwrap();
        assert_eq!(scores.dominant(), Emotion::Disgust);
    }

    #[test]
    fn test_uniform_logits_spread_evenly_except_fold() {
        let scores = scores_from_logits(&[0.0; 8]).unwrap();
        // Eight equal classes at 12.5% each; disgust absorbs two of them.
        assert_relative_eq!(scores.get(Emotion::Disgust), 25.0, epsilon = 1e-3);
        assert_relative_eq!(scores.get(Emotion::Happy), 12.5, epsilon = 1e-3);
    }

    #[test]
    fn test_large_logits_do_not_overflow() {
        let scores = scores_from_logits(&[500.0, 400.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]).unwrap();
        assert_eq!(scores.dominant(), Emotion::Neutral);
        assert!(scores.confidence() <= 100.0);
    }

    #[test]
    fn test_truncated_output_is_reported() {
        let err = scores_from_logits(&[1.0, 2.0, 3.0]).unwrap_err();
        assert!(err.to_string().contains("expected 8 output logits"));
    }

    #[test]
    fn test_preprocess_shapes_input() {
        let frame = Frame::new(vec![128; 10 * 8 * 3], 10, 8);
        let input = preprocess(&frame).unwrap();
        assert_eq!(input.shape(), &[1, 1, 64, 64]);
        assert_relative_eq!(input[[0, 0, 0, 0]], 128.0);
    }
}
