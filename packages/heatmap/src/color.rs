//! Heat color and alpha ramps.
//!
//! Scores map through four equal-width linear segments:
//! dark blue, cyan, green, yellow, red.

use buurtkompas_heatmap_models::{LegendStop, Rgb};

/// Ramp anchors, also used to draw the map legend ("Laag" to "Hoog").
pub const HEAT_RAMP: &[LegendStop] = &[
    LegendStop {
        position: 0.0,
        color: Rgb::new(0.00, 0.22, 0.60),
    },
    LegendStop {
        position: 0.25,
        color: Rgb::new(0.00, 0.65, 0.74),
    },
    LegendStop {
        position: 0.50,
        color: Rgb::new(0.40, 0.85, 0.40),
    },
    LegendStop {
        position: 0.75,
        color: Rgb::new(0.98, 0.87, 0.20),
    },
    LegendStop {
        position: 1.0,
        color: Rgb::new(0.95, 0.35, 0.25),
    },
];

/// Clamps to `[0, 1]`, mapping NaN to 0.
fn unit(score: f64) -> f64 {
    if score.is_nan() {
        0.0
    } else {
        score.clamp(0.0, 1.0)
    }
}

/// Ramp color for `score`.
#[must_use]
pub fn heat_color(score: f64) -> Rgb {
    let t = unit(score);
    for window in HEAT_RAMP.windows(2) {
        let (lo, hi) = (window[0], window[1]);
        if t < hi.position {
            let k = (t - lo.position) / (hi.position - lo.position);
            return lo.color.lerp(hi.color, k);
        }
    }
    HEAT_RAMP[HEAT_RAMP.len() - 1].color
}

/// Linear opacity between `min_alpha` and `max_alpha`.
#[must_use]
pub fn heat_alpha(score: f64, min_alpha: f64, max_alpha: f64) -> f64 {
    (max_alpha - min_alpha).mul_add(unit(score), min_alpha)
}

/// Legend stops for the heat ramp.
#[must_use]
pub fn legend_stops() -> Vec<LegendStop> {
    HEAT_RAMP.to_vec()
}
