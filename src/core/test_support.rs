// Recording stand-ins for the external capabilities

use image::{DynamicImage, ImageFormat, RgbImage};
use std::io::Cursor;
use std::path::Path;
use std::sync::Mutex;

use crate::models::sign::{
    DetectedHand, Keypoint3D, LandmarkerConfig, SignError, SignResult, HAND_LANDMARK_COUNT,
};
use crate::platform::inference::{ScorerOptions, SignScorer};
use crate::platform::pose::HandLandmarker;

/// One call made to the landmarker: (pixels, width, height)
pub type LandmarkerCall = (Vec<u8>, u32, u32);

pub struct MockLandmarker {
    response: Result<Vec<DetectedHand>, String>,
    pub calls: Mutex<Vec<LandmarkerCall>>,
}

impl MockLandmarker {
    pub fn with_hands(hands: Vec<DetectedHand>) -> Self {
        Self {
            response: Ok(hands),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl HandLandmarker for MockLandmarker {
    fn new(_config: &LandmarkerConfig, _python_dir: &Path) -> SignResult<Self> {
        Ok(Self::with_hands(vec![]))
    }

    fn detect_hands(&self, rgb: &[u8], width: u32, height: u32) -> SignResult<Vec<DetectedHand>> {
        self.calls.lock().unwrap().push((rgb.to_vec(), width, height));
        self.response
            .clone()
            .map_err(SignError::InferenceFailed)
    }

    fn is_initialized(&self) -> bool {
        true
    }

    fn get_model_info(&self) -> String {
        "mock landmarker".to_string()
    }
}

pub struct MockScorer {
    response: Result<Vec<f32>, String>,
    pub calls: Mutex<Vec<(Vec<f32>, [usize; 2])>>,
}

impl MockScorer {
    pub fn with_scores(scores: Vec<f32>) -> Self {
        Self {
            response: Ok(scores),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            response: Err(message.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl SignScorer for MockScorer {
    fn load(_options: &ScorerOptions) -> SignResult<Self> {
        Ok(Self::with_scores(vec![]))
    }

    fn score(&self, input: &[f32], shape: [usize; 2]) -> SignResult<Vec<f32>> {
        self.calls.lock().unwrap().push((input.to_vec(), shape));
        self.response
            .clone()
            .map_err(SignError::InferenceFailed)
    }

    fn get_model_info(&self) -> String {
        "mock scorer".to_string()
    }
}

/// A hand whose landmark `i` is (base + i, base + i / 100, -i / 1000)
pub fn hand(base: f32) -> DetectedHand {
    hand_with_landmarks(base, HAND_LANDMARK_COUNT)
}

pub fn hand_with_landmarks(base: f32, count: usize) -> DetectedHand {
    DetectedHand {
        landmarks: (0..count)
            .map(|i| {
                let i = i as f32;
                Keypoint3D::new(base + i, base + i / 100.0, -i / 1000.0)
            })
            .collect(),
        handedness: None,
        score: 0.9,
    }
}

/// A distribution over 26 labels peaking at `index`
pub fn peaked_scores(index: usize, peak: f32) -> Vec<f32> {
    let rest = (1.0 - peak) / 25.0;
    (0..26).map(|i| if i == index { peak } else { rest }).collect()
}

pub fn encode_image(width: u32, height: u32, rgb: [u8; 3], format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, image::Rgb(rgb));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), format)
        .unwrap();
    buf
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    encode_image(width, height, [200, 150, 100], ImageFormat::Png)
}

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    encode_image(width, height, [200, 150, 100], ImageFormat::Jpeg)
}
