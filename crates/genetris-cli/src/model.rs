use std::{collections::BTreeMap, fs::File, io::BufReader, path::Path};

use anyhow::{Context, bail};
use chrono::{DateTime, Utc};
use genetris_evaluator::{
    features::{FEATURE_COUNT, FEATURE_NAMES},
    heuristic::FeatureWeights,
};
use genetris_training::chromosome::Chromosome;
use serde::{Deserialize, Serialize};

/// Weights used by `play` when no model file is given.
pub const DEFAULT_WEIGHTS: FeatureWeights = FeatureWeights::new([0.9, 0.4, 0.3, 0.1, 0.2]);

/// A trained weight vector as saved on disk, keyed by feature name.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AiModel {
    pub name: String,
    pub trained_at: DateTime<Utc>,
    pub final_fitness: f32,
    pub weights: BTreeMap<String, f32>,
}

impl AiModel {
    pub fn from_chromosome(name: &str, chromosome: &Chromosome) -> Self {
        Self {
            name: name.to_owned(),
            trained_at: Utc::now(),
            final_fitness: chromosome.fitness(),
            weights: FEATURE_NAMES
                .iter()
                .zip(chromosome.weights().as_array())
                .map(|(name, weight)| ((*name).to_owned(), *weight))
                .collect(),
        }
    }

    pub fn open<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open AI model file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let model = serde_json::from_reader(reader)
            .with_context(|| format!("Failed to read AI model file: {}", path.display()))?;

        Ok(model)
    }

    /// Arranges the named weights in feature order.
    pub fn to_weights(&self) -> anyhow::Result<FeatureWeights> {
        if let Some(unknown) = self
            .weights
            .keys()
            .find(|name| !FEATURE_NAMES.contains(&name.as_str()))
        {
            bail!("Feature {unknown} in model not found");
        }
        let mut weights = [0.0; FEATURE_COUNT];
        for (weight, name) in weights.iter_mut().zip(FEATURE_NAMES) {
            *weight = *self
                .weights
                .get(name)
                .with_context(|| format!("Model has no weight for feature {name}"))?;
        }
        Ok(weights.into())
    }
}
