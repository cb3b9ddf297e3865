//! Vector math for embedding comparison

use crate::domain::errors::VectorError;

/// Cosine similarity between two vectors, in `[-1, 1]`.
///
/// Returns `0.0` when either vector has zero magnitude.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f64, VectorError> {
    ensure_same_length(a, b)?;

    let mut dot = 0.0_f64;
    let mut mag_a = 0.0_f64;
    let mut mag_b = 0.0_f64;

    for (x, y) in a.iter().zip(b.iter()) {
        let (x, y) = (f64::from(*x), f64::from(*y));
        dot += x * y;
        mag_a += x * x;
        mag_b += y * y;
    }

    let denominator = mag_a.sqrt() * mag_b.sqrt();
    if denominator == 0.0 {
        return Ok(0.0);
    }

    Ok(dot / denominator)
}

/// Scale a vector to unit length. A zero vector is returned unchanged.
pub fn normalize(v: &[f32]) -> Vec<f32> {
    let magnitude = v
        .iter()
        .map(|x| f64::from(*x) * f64::from(*x))
        .sum::<f64>()
        .sqrt();

    if magnitude == 0.0 {
        return v.to_vec();
    }

    v.iter().map(|x| (f64::from(*x) / magnitude) as f32).collect()
}

/// First five components rounded to 4 decimals
pub fn preview(v: &[f32]) -> Vec<f64> {
    v.iter()
        .take(5)
        .map(|x| (f64::from(*x) * 10_000.0).round() / 10_000.0)
        .collect()
}

/// Similarity rendered as a percentage with two decimals ("87.12%")
pub fn format_percentage(similarity: f64) -> String {
    format!("{:.2}%", similarity * 100.0)
}

fn ensure_same_length(a: &[f32], b: &[f32]) -> Result<(), VectorError> {
    if a.len() != b.len() {
        return Err(VectorError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(())
}
