use crate::model::{Category, GenerationReport, ItemCatalog, NewAssessment, Tier, Worker};
use crate::sampling::{sample_size, sample_without_replacement, WeightedTable};
use crate::storage::store::Store;
use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use std::collections::BTreeMap;

pub const DEFAULT_ASSESSED_BY: &str = "Test Supervisor";

pub const MIN_ITEMS_PER_CATEGORY: usize = 5;
pub const MAX_ITEMS_PER_CATEGORY: usize = 10;

/// Bounds (minutes, inclusive) of the gap between two consecutive workers.
pub const MIN_STEP_MINUTES: i64 = 5;
pub const MAX_STEP_MINUTES: i64 = 15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSettings {
    pub assessed_by: String,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            assessed_by: DEFAULT_ASSESSED_BY.to_string(),
        }
    }
}

/// Output of one generation pass. `cursor` is the timestamp the next worker
/// would have been assessed at.
#[derive(Debug, Clone)]
pub struct Batch {
    pub assessments: Vec<NewAssessment>,
    pub tiers: Vec<(i64, Tier)>,
    pub cursor: NaiveDateTime,
}

impl Batch {
    pub fn tier_counts(&self) -> BTreeMap<Tier, usize> {
        let mut counts = BTreeMap::new();
        for (_, tier) in &self.tiers {
            *counts.entry(*tier).or_insert(0) += 1;
        }
        counts
    }
}

pub struct Generator {
    settings: GeneratorSettings,
    tiers: WeightedTable<Tier>,
    excellent: WeightedTable<u8>,
    good: WeightedTable<u8>,
    average: WeightedTable<u8>,
}

impl Generator {
    pub fn new(settings: GeneratorSettings) -> anyhow::Result<Self> {
        Ok(Self {
            settings,
            tiers: WeightedTable::new(&Tier::WEIGHTS)?,
            excellent: WeightedTable::new(&Tier::Excellent.level_weights())?,
            good: WeightedTable::new(&Tier::Good.level_weights())?,
            average: WeightedTable::new(&Tier::Average.level_weights())?,
        })
    }

    fn levels(&self, tier: Tier) -> &WeightedTable<u8> {
        match tier {
            Tier::Excellent => &self.excellent,
            Tier::Good => &self.good,
            Tier::Average => &self.average,
        }
    }

    /// Assess one worker at `at`: draw a tier, then 5..=10 distinct items per
    /// category, each with a level from the tier's distribution.
    pub fn assess_worker<R: Rng + ?Sized>(
        &self,
        worker: &Worker,
        catalog: &ItemCatalog,
        at: NaiveDateTime,
        rng: &mut R,
    ) -> (Tier, Vec<NewAssessment>) {
        let tier = self.tiers.sample(rng);
        let levels = self.levels(tier);
        let comments = format!("Test assessment for {}", worker.name);

        let mut out = Vec::with_capacity(MAX_ITEMS_PER_CATEGORY * Category::ALL.len());
        for category in Category::ALL {
            let items = catalog.items(category);
            let n = sample_size(
                items.len(),
                MIN_ITEMS_PER_CATEGORY,
                MAX_ITEMS_PER_CATEGORY,
                rng,
            );
            for item in sample_without_replacement(items, n, rng) {
                out.push(NewAssessment {
                    worker_id: worker.id,
                    item_id: item.id,
                    category,
                    tier,
                    level: levels.sample(rng),
                    assessed_by: self.settings.assessed_by.clone(),
                    assessment_date: at,
                    comments: comments.clone(),
                });
            }
        }
        (tier, out)
    }

    /// Assess every worker in order. The timestamp cursor starts at `start`
    /// and moves forward 5..=15 minutes after each worker.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        workers: &[Worker],
        catalog: &ItemCatalog,
        start: NaiveDateTime,
        rng: &mut R,
    ) -> Batch {
        let mut cursor = start;
        let mut assessments = Vec::new();
        let mut tiers = Vec::with_capacity(workers.len());

        for worker in workers {
            let (tier, rows) = self.assess_worker(worker, catalog, cursor, rng);
            tracing::debug!(
                event = "worker_generated",
                worker_id = worker.id,
                employee_id = %worker.employee_id,
                tier = %tier,
                assessments = rows.len()
            );
            tiers.push((worker.id, tier));
            assessments.extend(rows);
            cursor += Duration::minutes(rng.gen_range(MIN_STEP_MINUTES..=MAX_STEP_MINUTES));
        }

        Batch {
            assessments,
            tiers,
            cursor,
        }
    }
}

/// Generate assessments for `workers` and insert them in a single
/// transaction. With `dry_run` nothing is written and `committed` stays false.
pub fn seed<R: Rng + ?Sized>(
    store: &Store,
    generator: &Generator,
    workers: &[Worker],
    catalog: &ItemCatalog,
    start: NaiveDateTime,
    rng: &mut R,
    dry_run: bool,
) -> anyhow::Result<GenerationReport> {
    let batch = generator.generate(workers, catalog, start, rng);

    let committed = if dry_run {
        tracing::info!(event = "dry_run", assessments = batch.assessments.len());
        false
    } else {
        store.insert_assessments(&batch.assessments)?;
        true
    };

    Ok(GenerationReport {
        workers: workers.len(),
        items_by_category: catalog.counts(),
        assessments_created: batch.assessments.len(),
        tier_counts: batch.tier_counts(),
        first_assessment_at: batch
            .assessments
            .first()
            .map(NewAssessment::assessment_date_str),
        last_assessment_at: batch
            .assessments
            .last()
            .map(NewAssessment::assessment_date_str),
        committed,
    })
}
