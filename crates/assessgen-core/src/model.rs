use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Timestamp layout stored in `supervisor_assessments.assessment_date`.
pub const ASSESSMENT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: i64,
    pub employee_id: String,
    pub name: String,
    pub entity: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Level2,
    Level3,
    Level4,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Level2, Category::Level3, Category::Level4];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Level2 => "Level2",
            Category::Level3 => "Level3",
            Category::Level4 => "Level4",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Level2" => Some(Category::Level2),
            "Level3" => Some(Category::Level3),
            "Level4" => Some(Category::Level4),
            _ => None,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssessmentItem {
    pub id: i64,
    pub category: Category,
    pub item_name: String,
}

/// Assessment items partitioned by category. Every category is present,
/// possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemCatalog {
    by_category: BTreeMap<Category, Vec<AssessmentItem>>,
}

impl ItemCatalog {
    pub fn from_items(items: impl IntoIterator<Item = AssessmentItem>) -> Self {
        let mut by_category: BTreeMap<Category, Vec<AssessmentItem>> =
            Category::ALL.iter().map(|c| (*c, Vec::new())).collect();
        for item in items {
            by_category.entry(item.category).or_default().push(item);
        }
        Self { by_category }
    }

    pub fn items(&self, category: Category) -> &[AssessmentItem] {
        self.by_category
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn len(&self, category: Category) -> usize {
        self.items(category).len()
    }

    pub fn total(&self) -> usize {
        self.by_category.values().map(Vec::len).sum()
    }

    pub fn counts(&self) -> BTreeMap<Category, usize> {
        Category::ALL.iter().map(|c| (*c, self.len(*c))).collect()
    }
}

/// Qualitative performance bucket drawn once per worker. It biases the
/// levels given to every item assessed for that worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Excellent,
    Good,
    Average,
}

impl Tier {
    /// Tier distribution in percent.
    pub const WEIGHTS: [(Tier, u32); 3] = [
        (Tier::Excellent, 20),
        (Tier::Good, 50),
        (Tier::Average, 30),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Excellent => "excellent",
            Tier::Good => "good",
            Tier::Average => "average",
        }
    }

    /// Level distribution for workers in this tier.
    pub fn level_weights(&self) -> [(u8, u32); 3] {
        match self {
            Tier::Excellent => [(3, 10), (4, 40), (5, 50)],
            Tier::Good => [(2, 20), (3, 50), (4, 30)],
            Tier::Average => [(1, 20), (2, 50), (3, 30)],
        }
    }

    pub fn allows_level(&self, level: u8) -> bool {
        self.level_weights().iter().any(|(l, _)| *l == level)
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row queued for `supervisor_assessments`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewAssessment {
    pub worker_id: i64,
    pub item_id: i64,
    pub category: Category,
    pub tier: Tier,
    pub level: u8,
    pub assessed_by: String,
    pub assessment_date: NaiveDateTime,
    pub comments: String,
}

impl NewAssessment {
    pub fn assessment_date_str(&self) -> String {
        self.assessment_date
            .format(ASSESSMENT_DATE_FORMAT)
            .to_string()
    }
}

/// One row of the per-entity verification query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySummary {
    pub entity: String,
    pub workers: i64,
    pub assessments: i64,
    pub avg_level: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub workers: usize,
    pub items_by_category: BTreeMap<Category, usize>,
    pub assessments_created: usize,
    pub tier_counts: BTreeMap<Tier, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_assessment_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_assessment_at: Option<String>,
    pub committed: bool,
}

impl GenerationReport {
    pub fn avg_per_worker(&self) -> f64 {
        if self.workers == 0 {
            0.0
        } else {
            self.assessments_created as f64 / self.workers as f64
        }
    }
}
