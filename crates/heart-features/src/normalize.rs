//! Landmark Normalizer - per-hand translation and scale invariance
//!
//! Every landmark is expressed relative to the wrist and divided by the
//! wrist-to-middle-MCP distance. The result does not depend on where the hand
//! is in the frame or how large it appears. It does depend on in-plane
//! rotation; the gesture is defined with both hands upright.

use heart_core::{Hand, NormalizedHand, NORMALIZED_HAND_LEN};

/// Floor for the anchor distance.
///
/// A hand collapsed to a point (detector noise) is scaled by this instead of
/// dividing by zero. It is never reported as an error.
pub const MIN_SCALE: f64 = 1e-6;

/// Wrist-to-middle-MCP distance, floored at [`MIN_SCALE`]
pub fn hand_scale(hand: &Hand) -> f64 {
    let wrist = hand.wrist();
    let mcp = hand.middle_mcp();
    let dx = mcp.x as f64 - wrist.x as f64;
    let dy = mcp.y as f64 - wrist.y as f64;
    let scale = (dx * dx + dy * dy).sqrt();
    if scale < MIN_SCALE {
        MIN_SCALE
    } else {
        scale
    }
}

/// Normalize one hand to 42 values: (p - wrist) / scale, in landmark order
pub fn normalize(hand: &Hand) -> NormalizedHand {
    let wrist = hand.wrist();
    let (wx, wy) = (wrist.x as f64, wrist.y as f64);
    let scale = hand_scale(hand);

    let mut values = [0.0; NORMALIZED_HAND_LEN];
    for (i, p) in hand.landmarks().iter().enumerate() {
        values[i * 2] = (p.x as f64 - wx) / scale;
        values[i * 2 + 1] = (p.y as f64 - wy) / scale;
    }

    NormalizedHand(values)
}
