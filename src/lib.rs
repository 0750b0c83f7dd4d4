/// Loading of integer-valued observation files and summaries of their
/// empirical frequency distribution.
pub mod sample;

/// Candidate discrete distribution families (probability mass evaluation
/// and random-variate generation).
pub mod prob;

/// Maximum-likelihood fitting of the candidate families over bounded
/// parameter ranges, plus the bound-guessing heuristic.
pub mod fit;

/// Terminal charts for the empirical frequencies and the fitted masses.
pub mod viz;
