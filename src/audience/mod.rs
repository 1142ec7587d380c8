//! Audience size estimation and the audience builder.

pub mod builder;

use serde::{Deserialize, Serialize};

pub use builder::{AudienceBuilder, FilterInput, FilterSlot};

/// Reach before any filter is applied.
pub const BASE_AUDIENCE: f64 = 10_000_000.0;

const HIGH_THRESHOLD: u64 = 1_000_000;
const MEDIUM_THRESHOLD: u64 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReachPotential {
    Low,
    Medium,
    High,
}

impl ReachPotential {
    pub fn for_size(size: u64) -> Self {
        if size >= HIGH_THRESHOLD {
            Self::High
        } else if size >= MEDIUM_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl std::fmt::Display for ReachPotential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "Low"),
            Self::Medium => write!(f, "Medium"),
            Self::High => write!(f, "High"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Estimate {
    pub filter_count: usize,
    pub size: u64,
    pub potential: ReachPotential,
}

/// `floor(10_000_000 / 2^(0.5·n))`. Every filter halves reach by √2.
pub fn estimated_size(filter_count: usize) -> u64 {
    let divisor = 2f64.powf(0.5 * filter_count as f64);
    (BASE_AUDIENCE / divisor).floor() as u64
}

pub fn estimate(filter_count: usize) -> Estimate {
    let size = estimated_size(filter_count);
    Estimate {
        filter_count,
        size,
        potential: ReachPotential::for_size(size),
    }
}

/// Group digits with commas: `3535533` → `3,535,533`.
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
