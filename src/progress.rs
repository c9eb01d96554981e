// src/progress.rs - Progress arithmetic and display formatting

/// Percent complete after `index` of `copies` copies.
///
/// The final copy always reports 100. Earlier copies scale the rounded
/// per-copy increment, so non-divisor counts drift (copies = 7 yields
/// 14, 28, 42, 56, 70, 84, 100). The result is clamped to 100 because the
/// rounded increment can overshoot for large counts.
pub fn percent_for(index: u32, copies: u32) -> u8 {
    debug_assert!(copies >= 1);
    debug_assert!(index >= 1 && index <= copies);
    if index == copies {
        100
    } else {
        let step = (100.0 / copies as f64).round() as u32;
        (step * index).min(100) as u8
    }
}

/// Display string for a progress percent, uniform for all values including 100.
pub fn format_percent(percent: u8) -> String {
    format!("{}%", percent)
}
