//! HEDIS and Star Rating figures.
//!
//! These are fixed placeholder values and are NOT derived from claims or
//! member data yet. [`placeholder_measures`] labels its output with
//! [`Provenance::Placeholder`] so consumers can tell.

use crate::compute::{round_to_half, safe_ratio};
use crate::dashboards::{BenchmarkStatus, HedisScore, Provenance, QualityMeasures, StarCategory};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    HigherIsBetter,
    /// Inverse measures such as readmissions.
    LowerIsBetter,
}

struct MeasureSeed {
    name: &'static str,
    rate: f64,
    benchmark: f64,
    direction: Direction,
}

const HEDIS_PLACEHOLDERS: &[MeasureSeed] = &[
    MeasureSeed {
        name: "Breast Cancer Screening",
        rate: 0.72,
        benchmark: 0.75,
        direction: Direction::HigherIsBetter,
    },
    MeasureSeed {
        name: "Colorectal Cancer Screening",
        rate: 0.68,
        benchmark: 0.65,
        direction: Direction::HigherIsBetter,
    },
    MeasureSeed {
        name: "Diabetes HbA1c Testing",
        rate: 0.85,
        benchmark: 0.80,
        direction: Direction::HigherIsBetter,
    },
    MeasureSeed {
        name: "Controlling High Blood Pressure",
        rate: 0.62,
        benchmark: 0.60,
        direction: Direction::HigherIsBetter,
    },
    MeasureSeed {
        name: "Medication Adherence - Diabetes",
        rate: 0.78,
        benchmark: 0.80,
        direction: Direction::HigherIsBetter,
    },
    MeasureSeed {
        name: "Plan All-Cause Readmissions",
        rate: 0.12,
        benchmark: 0.10,
        direction: Direction::LowerIsBetter,
    },
    MeasureSeed {
        name: "Follow-Up After ED Visit",
        rate: 0.55,
        benchmark: 0.50,
        direction: Direction::HigherIsBetter,
    },
    MeasureSeed {
        name: "Immunizations for Adolescents",
        rate: 0.42,
        benchmark: 0.45,
        direction: Direction::HigherIsBetter,
    },
];

/// (category, stars, weight)
const STAR_PLACEHOLDERS: &[(&str, u8, u8)] = &[
    ("Staying Healthy", 4, 3),
    ("Managing Chronic Conditions", 3, 3),
    ("Member Experience", 4, 2),
    ("Complaints & Access", 3, 2),
    ("Health Plan Operations", 4, 1),
];

/// Meeting the benchmark exactly counts as `Above`.
pub fn benchmark_status(rate: f64, benchmark: f64, direction: Direction) -> BenchmarkStatus {
    let meets = match direction {
        Direction::HigherIsBetter => rate >= benchmark,
        Direction::LowerIsBetter => rate <= benchmark,
    };
    if meets {
        BenchmarkStatus::Above
    } else {
        BenchmarkStatus::Below
    }
}

/// Weighted mean of category stars, rounded to the nearest half star.
pub fn overall_star_rating(categories: &[StarCategory]) -> f64 {
    let total_weight: f64 = categories.iter().map(|c| f64::from(c.weight)).sum();
    let weighted: f64 = categories
        .iter()
        .map(|c| f64::from(c.stars) * f64::from(c.weight))
        .sum();
    round_to_half(safe_ratio(weighted, total_weight))
}

pub fn placeholder_measures() -> QualityMeasures {
    let hedis_scores = HEDIS_PLACEHOLDERS
        .iter()
        .map(|m| HedisScore {
            measure: m.name.to_owned(),
            rate: m.rate,
            benchmark: m.benchmark,
            status: benchmark_status(m.rate, m.benchmark, m.direction),
        })
        .collect();

    let star_rating: Vec<StarCategory> = STAR_PLACEHOLDERS
        .iter()
        .map(|(category, stars, weight)| StarCategory {
            category: (*category).to_owned(),
            stars: *stars,
            weight: *weight,
        })
        .collect();

    QualityMeasures {
        provenance: Provenance::Placeholder,
        overall_star_rating: overall_star_rating(&star_rating),
        hedis_scores,
        star_rating,
        care_gaps_closed: 0,
        care_gaps_open: 0,
    }
}
