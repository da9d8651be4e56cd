// Result resolution: score distribution -> label + confidence

use tracing::{debug, warn};

use crate::models::sign::{FailureReason, LabelTable, Recognition};

/// Index and value of the highest score; the first occurrence wins ties
/// Non-finite scores (NaN, ±inf) never win. Returns None for an empty or
/// all non-finite sequence.
pub fn argmax(scores: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;
    for (i, &score) in scores.iter().enumerate() {
        if !score.is_finite() {
            continue;
        }
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((i, score)),
        }
    }
    best
}

/// Map the winning index through the label table
pub fn resolve(scores: &[f32], labels: &LabelTable) -> Result<Recognition, FailureReason> {
    if scores.len() != labels.len() {
        warn!(
            scores = scores.len(),
            labels = labels.len(),
            "Classifier output length does not match label table"
        );
    }

    let (index, confidence) = argmax(scores).ok_or_else(|| {
        warn!("Classifier returned no usable scores");
        FailureReason::UnknownLabelIndex
    })?;

    let label = labels.get(index).ok_or_else(|| {
        warn!(index, "Classifier index outside label table");
        FailureReason::UnknownLabelIndex
    })?;

    debug!(label, index, confidence, "Sign resolved");

    Ok(Recognition {
        label: label.to_string(),
        index,
        confidence,
    })
}
