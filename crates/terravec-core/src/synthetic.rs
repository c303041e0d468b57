//! Synthetic labeled embedding generation.
//!
//! Real geospatial embedding models map satellite imagery patches to unit
//! vectors whose direction encodes land cover. For the demos we fake that:
//! each class gets a template direction whose leading axis bands carry
//! class-specific signal strengths (vegetation, moisture, structure,
//! thermal), and samples scatter around the template with additive noise
//! before being projected back onto the unit sphere. Summing two uniform
//! perturbations per component gives a heavier-tailed spread around the
//! template direction, loosely imitating a von Mises-Fisher cloud.
//!
//! Generation is fully deterministic for a given seed, so demos and tests
//! reproduce the exact same dataset.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TerravecError};
use crate::vector;

/// Width of each signal band in dimensions.
pub const BAND_WIDTH: usize = 8;

/// Number of named signal bands (vegetation, moisture, structure, thermal).
pub const BAND_COUNT: usize = 4;

/// Per-component jitter applied to template band values.
const TEMPLATE_JITTER: f64 = 0.1;

/// Amplitude of the higher-order components beyond the named bands.
const BACKGROUND_AMPLITUDE: f64 = 0.25;

/// Amplitude of each of the two per-sample uniform perturbations.
const SAMPLE_SPREAD: f64 = 0.1;

/// Template for one land-cover class.
///
/// Band strengths target the first four [`BAND_WIDTH`]-dimension axis
/// bands of the embedding; the remaining dimensions carry low-amplitude
/// higher-order structure unique to the class template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSpec {
    /// Class label.
    pub label: String,
    /// Display color (hex). Carried through to points for rendering;
    /// never used by the math.
    pub color: String,
    /// Number of samples to generate for this class.
    pub samples: usize,
    /// Vegetation band strength.
    pub vegetation: f64,
    /// Moisture band strength.
    pub moisture: f64,
    /// Built-structure band strength.
    pub structure: f64,
    /// Thermal band strength.
    pub thermal: f64,
}

impl ClassSpec {
    /// Create a class spec with the given label, color, and band strengths
    /// (vegetation, moisture, structure, thermal).
    pub fn new(
        label: impl Into<String>,
        color: impl Into<String>,
        samples: usize,
        bands: [f64; BAND_COUNT],
    ) -> Self {
        Self {
            label: label.into(),
            color: color.into(),
            samples,
            vegetation: bands[0],
            moisture: bands[1],
            structure: bands[2],
            thermal: bands[3],
        }
    }

    /// The six demo land-cover classes, 40 samples each.
    pub fn demo_set() -> Vec<ClassSpec> {
        vec![
            ClassSpec::new("forest", "#2d6a4f", 40, [0.95, 0.30, 0.05, 0.10]),
            ClassSpec::new("water", "#1d6fa5", 40, [0.02, 0.95, 0.02, 0.15]),
            ClassSpec::new("urban", "#6c757d", 40, [0.05, 0.10, 0.95, 0.70]),
            ClassSpec::new("agriculture", "#c9a227", 40, [0.65, 0.55, 0.25, 0.35]),
            ClassSpec::new("desert", "#d4a373", 40, [0.03, 0.05, 0.15, 0.95]),
            ClassSpec::new("wetland", "#52796f", 40, [0.45, 0.85, 0.05, 0.20]),
        ]
    }

    fn band_strengths(&self) -> [f64; BAND_COUNT] {
        [self.vegetation, self.moisture, self.structure, self.thermal]
    }
}

/// One generated sample: a unit embedding with its class label.
///
/// Ids are assigned sequentially in generation order and stay stable for
/// the lifetime of one generated dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledPoint {
    pub id: usize,
    pub embedding: Vec<f64>,
    pub label: String,
    pub color: String,
}

/// Generate a labeled synthetic dataset.
///
/// Points are generated class by class in spec order, each normalized onto
/// the unit hypersphere. The same seed always reproduces the identical
/// dataset.
pub fn generate_dataset(
    specs: &[ClassSpec],
    dimension: usize,
    seed: u64,
) -> Result<Vec<LabeledPoint>> {
    if specs.is_empty() {
        return Err(TerravecError::EmptyInput("class specs"));
    }
    if dimension < BAND_WIDTH * BAND_COUNT {
        return Err(TerravecError::invalid_parameter(
            "dimension",
            format!(
                "must be at least {} to fit the {} signal bands, got {}",
                BAND_WIDTH * BAND_COUNT,
                BAND_COUNT,
                dimension
            ),
        ));
    }
    for spec in specs {
        if spec.samples == 0 {
            return Err(TerravecError::invalid_parameter(
                "samples",
                format!("class {:?} requests zero samples", spec.label),
            ));
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut points = Vec::with_capacity(specs.iter().map(|s| s.samples).sum());
    let mut next_id = 0;

    for spec in specs {
        let template = class_template(spec, dimension, &mut rng);
        for _ in 0..spec.samples {
            let mut embedding = template.clone();
            for x in embedding.iter_mut() {
                // Two summed uniforms: triangular spread around the template.
                *x += rng.gen_range(-SAMPLE_SPREAD..SAMPLE_SPREAD)
                    + rng.gen_range(-SAMPLE_SPREAD..SAMPLE_SPREAD);
            }
            vector::normalize(&mut embedding);
            points.push(LabeledPoint {
                id: next_id,
                embedding,
                label: spec.label.clone(),
                color: spec.color.clone(),
            });
            next_id += 1;
        }
    }

    Ok(points)
}

/// Build the unit-norm template direction for one class.
fn class_template(spec: &ClassSpec, dimension: usize, rng: &mut impl Rng) -> Vec<f64> {
    let mut template = Vec::with_capacity(dimension);
    for (band, &strength) in spec.band_strengths().iter().enumerate() {
        debug_assert!(band * BAND_WIDTH < dimension);
        for _ in 0..BAND_WIDTH {
            template.push(strength + rng.gen_range(-TEMPLATE_JITTER..TEMPLATE_JITTER));
        }
    }
    while template.len() < dimension {
        template.push(rng.gen_range(-BACKGROUND_AMPLITUDE..BACKGROUND_AMPLITUDE));
    }
    vector::normalize(&mut template);
    template
}
