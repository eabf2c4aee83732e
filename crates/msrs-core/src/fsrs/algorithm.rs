//! FSRS-5 Core Formulas
//!
//! Stateless formula functions over the fixed 19-weight parameter table.
//! Rating values enter the formulas as 1.0 (Again) through 4.0 (Easy).

// ============================================================================
// CONSTANTS
// ============================================================================

/// FSRS-5 default weights (py-fsrs 5.1.2)
pub const FSRS5_WEIGHTS: [f64; 19] = [
    0.40255, 1.18385, 3.173, 15.69105, 7.1949, 0.5345, 1.4604, 0.0046, 1.54575, 0.1192, 1.01925,
    1.9395, 0.11, 0.29605, 2.2698, 0.2315, 2.9898, 0.51655, 0.6621,
];

/// Forgetting curve decay exponent
pub const DECAY: f64 = -0.5;

/// Chosen so that retrievability is exactly 0.9 when `t == S`
pub fn factor() -> f64 {
    0.9_f64.powf(1.0 / DECAY) - 1.0
}

/// Minimum stability for a first review
pub const MIN_STABILITY: f64 = 0.1;

/// Minimum difficulty
pub const MIN_DIFFICULTY: f64 = 1.0;

/// Maximum difficulty
pub const MAX_DIFFICULTY: f64 = 10.0;

/// Default target retention
pub const DEFAULT_RETENTION: f64 = 0.9;

const W: &[f64; 19] = &FSRS5_WEIGHTS;

// ============================================================================
// RETRIEVABILITY / INTERVAL
// ============================================================================

/// Probability of recall after `elapsed_days` for a memory of `stability`
///
/// `R = (1 + FACTOR * t / S) ^ DECAY`
pub fn retrievability(stability: f64, elapsed_days: f64) -> f64 {
    (1.0 + factor() * elapsed_days / stability).powf(DECAY)
}

/// Days until retrievability falls to `retention` (inverse of [`retrievability`])
pub fn next_interval(stability: f64, retention: f64) -> f64 {
    (stability / factor()) * (retention.powf(1.0 / DECAY) - 1.0)
}

// ============================================================================
// STABILITY
// ============================================================================

/// Stability after the very first review
pub fn initial_stability(rating: f64) -> f64 {
    W[rating as usize - 1].max(MIN_STABILITY)
}

/// Stability after a review `elapsed_days` after the previous one
pub fn next_stability(stability: f64, difficulty: f64, elapsed_days: f64, rating: f64) -> f64 {
    if elapsed_days < 1.0 {
        return same_day_stability(stability, rating);
    }

    let r = retrievability(stability, elapsed_days);
    if rating == 1.0 {
        next_forget_stability(stability, difficulty, r)
    } else {
        next_recall_stability(stability, difficulty, r, rating)
    }
}

/// Short-term stability for a re-exposure within one day; no decay term
pub fn same_day_stability(stability: f64, rating: f64) -> f64 {
    stability * (W[17] * (rating - 3.0 + W[18])).exp()
}

/// Stability after a lapse, capped by the short-term estimate
pub fn next_forget_stability(stability: f64, difficulty: f64, retrievability: f64) -> f64 {
    let long_term = W[11]
        * difficulty.powf(-W[12])
        * ((stability + 1.0).powf(W[13]) - 1.0)
        * ((1.0 - retrievability) * W[14]).exp();
    let short_term = stability / (W[17] * W[18]).exp();

    long_term.min(short_term)
}

/// Stability after a successful recall
pub fn next_recall_stability(
    stability: f64,
    difficulty: f64,
    retrievability: f64,
    rating: f64,
) -> f64 {
    let hard_penalty = if rating == 2.0 { W[15] } else { 1.0 };
    let easy_bonus = if rating == 4.0 { W[16] } else { 1.0 };

    stability
        * (1.0
            + W[8].exp()
                * (11.0 - difficulty)
                * stability.powf(-W[9])
                * (((1.0 - retrievability) * W[10]).exp() - 1.0)
                * hard_penalty
                * easy_bonus)
}

// ============================================================================
// DIFFICULTY
// ============================================================================

/// Difficulty after the very first review, clamped to [1, 10]
pub fn initial_difficulty(rating: f64) -> f64 {
    (W[4] - (W[5] * (rating - 1.0)).exp() + 1.0).clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}

/// Difficulty after a subsequent review, mean-reverting towards D0(Easy)
pub fn next_difficulty(difficulty: f64, rating: f64) -> f64 {
    let delta = -(W[6] * (rating - 3.0));
    let linear_damped = difficulty + (10.0 - difficulty) * delta / 9.0;

    mean_reversion(initial_difficulty(4.0), linear_damped).clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}

fn mean_reversion(initial: f64, current: f64) -> f64 {
    W[7] * initial + (1.0 - W[7]) * current
}

// ============================================================================
// TESTS
// ============================================================================
