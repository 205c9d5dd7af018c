//! Expression samples and the blendshape mapping at the inference boundary

use serde::{Deserialize, Serialize};

/// Blendshape category names read from the inference engine
pub const MOUTH_SMILE_LEFT: &str = "mouthSmileLeft";
pub const MOUTH_SMILE_RIGHT: &str = "mouthSmileRight";

/// One named blendshape score as reported by the inference engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    #[serde(alias = "categoryName")]
    pub name: String,
    pub score: f32,
}

impl Category {
    pub fn new(name: impl Into<String>, score: f32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Blendshapes for a single detected face
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceResult {
    pub categories: Vec<Category>,
}

impl FaceResult {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Convenience for tests and scripted sources
    pub fn smile(left: f32, right: f32) -> Self {
        Self::new(vec![
            Category::new(MOUTH_SMILE_LEFT, left),
            Category::new(MOUTH_SMILE_RIGHT, right),
        ])
    }

    fn score(&self, name: &str) -> f32 {
        self.categories
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.score)
            .unwrap_or(0.0)
    }
}

/// Left/right smile intensities for one frame, each in [0, 1]
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpressionSample {
    pub left: f32,
    pub right: f32,
}

impl ExpressionSample {
    pub fn new(left: f32, right: f32) -> Self {
        Self {
            left: sanitize(left),
            right: sanitize(right),
        }
    }

    /// Pull the two smile scores out of a face result.
    /// Missing categories read as 0.
    pub fn from_face(face: &FaceResult) -> Self {
        Self::new(face.score(MOUTH_SMILE_LEFT), face.score(MOUTH_SMILE_RIGHT))
    }

    /// Average of both sides
    pub fn composite(&self) -> f32 {
        (self.left + self.right) / 2.0
    }
}

fn sanitize(score: f32) -> f32 {
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_face_reads_smile_scores() {
        let face = FaceResult::new(vec![
            Category::new("jawOpen", 0.9),
            Category::new(MOUTH_SMILE_RIGHT, 0.4),
            Category::new(MOUTH_SMILE_LEFT, 0.8),
        ]);
        let sample = ExpressionSample::from_face(&face);
        assert_eq!(sample.left, 0.8);
        assert_eq!(sample.right, 0.4);
        assert!((sample.composite() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_missing_categories_default_to_zero() {
        let face = FaceResult::new(vec![Category::new(MOUTH_SMILE_LEFT, 1.0)]);
        let sample = ExpressionSample::from_face(&face);
        assert_eq!(sample.right, 0.0);
        assert_eq!(sample.composite(), 0.5);

        assert_eq!(ExpressionSample::from_face(&FaceResult::default()).composite(), 0.0);
    }

    #[test]
    fn test_out_of_range_scores_are_sanitized() {
        let sample = ExpressionSample::new(f32::NAN, 1.7);
        assert_eq!(sample.left, 0.0);
        assert_eq!(sample.right, 1.0);
    }

    #[test]
    fn test_category_accepts_engine_field_name() {
        let face: FaceResult = serde_json::from_str(
            r#"{ "categories": [{ "categoryName": "mouthSmileLeft", "score": 0.25 }] }"#,
        )
        .unwrap();
        assert_eq!(ExpressionSample::from_face(&face).left, 0.25);
    }
}
