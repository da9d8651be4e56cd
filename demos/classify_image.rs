/// Example program: run the recognizer on an image and show every stage outcome
/// Run with: cargo run --example classify_image -- path/to/hand.jpg

use signlens_lib::core::frame_decoder::decode_frame;
use signlens_lib::{ClassificationResult, Config, SignRecognizer};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("debug").init();

    let path = std::env::args()
        .nth(1)
        .ok_or("usage: classify_image <IMAGE>")?;

    println!("=== Sign Recognition Demo ===\n");

    let bytes = std::fs::read(&path)?;
    println!("Input: {} ({} bytes)", path, bytes.len());

    match decode_frame(&bytes) {
        Ok(frame) => println!("  Decoded: {}x{} ({:?})", frame.width, frame.height, frame.order),
        Err(e) => println!("  Decode error: {}", e),
    }
    println!();

    let config = Config::load()?;
    let recognizer = SignRecognizer::new(&config)?;

    println!("Backends:");
    println!("  Landmarker: {}", recognizer.landmarker_info());
    println!("  Classifier: {}", recognizer.classifier_info());
    println!("  Labels: {}", recognizer.labels().len());
    println!();

    let result = recognizer.classify_bytes(&bytes);
    match &result {
        ClassificationResult::Recognized(r) => {
            println!("Recognized '{}' (index {}, {:.2}%)", r.label, r.index, r.confidence_percent())
        }
        ClassificationResult::Failed(reason) => println!("No result: {:?}", reason),
    }

    println!("\nResponse: {}", serde_json::to_string(&result.to_response())?);
    Ok(())
}
