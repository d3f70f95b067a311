use crate::model::{Category, EntitySummary, GenerationReport, ItemCatalog};
use crate::storage::schema::CLEANUP_SQL;
use std::fmt::Write;

const RULE_WIDTH: usize = 60;

pub const FETCHING_BANNER: &str = "🔍 Fetching workers and assessment items...";
pub const GENERATING_BANNER: &str = "🎲 Generating assessment data...";

pub fn format_reference(workers: usize, catalog: &ItemCatalog) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "✅ Found {} workers", workers);
    let _ = writeln!(s, "✅ Found {} assessment items", catalog.total());
    for category in Category::ALL {
        let _ = writeln!(s, "  - {}: {} items", category, catalog.len(category));
    }
    s
}

pub fn format_entity_line(e: &EntitySummary) -> String {
    format!(
        "{:6} | Workers: {:2} | Assessments: {:4} | Avg Level: {:.2}",
        e.entity, e.workers, e.assessments, e.avg_level
    )
}

pub fn format_entity_table(entities: &[EntitySummary]) -> String {
    let mut s = String::new();
    let _ = writeln!(s, "📈 Summary by Entity:");
    let _ = writeln!(s, "{}", "-".repeat(RULE_WIDTH));
    for e in entities {
        let _ = writeln!(s, "{}", format_entity_line(e));
    }
    s
}

pub fn format_run(report: &GenerationReport, entities: &[EntitySummary]) -> String {
    let mut s = String::new();
    if report.committed {
        let _ = writeln!(
            s,
            "✅ Successfully created {} assessment records!",
            report.assessments_created
        );
    } else {
        let _ = writeln!(
            s,
            "🧪 Dry run: generated {} assessment records (nothing written)",
            report.assessments_created
        );
    }
    let _ = writeln!(
        s,
        "📊 Average assessments per worker: {:.1}",
        report.avg_per_worker()
    );
    let _ = writeln!(s);
    s.push_str(&format_entity_table(entities));
    let _ = writeln!(s);
    let rule = "=".repeat(RULE_WIDTH);
    let _ = writeln!(s, "{}", rule);
    let _ = writeln!(s, "✨ Test data generation complete!");
    let _ = writeln!(s, "📊 You can now test the dashboard with comprehensive data");
    s.push_str(&format_cleanup_hint());
    let _ = writeln!(s, "{}", rule);
    s
}

pub fn format_cleanup_hint() -> String {
    format!(
        "🗑️  To delete this test data later, run:\n    {}\n",
        CLEANUP_SQL
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::AssessmentItem;

    #[test]
    fn entity_line_pads_like_the_dashboard_report() {
        let line = format_entity_line(&EntitySummary {
            entity: "ACME".into(),
            workers: 3,
            assessments: 61,
            avg_level: 3.14159,
        });
        assert_eq!(
            line,
            "ACME   | Workers:  3 | Assessments:   61 | Avg Level: 3.14"
        );
    }

    #[test]
    fn reference_lists_each_category() {
        let catalog = ItemCatalog::from_items(vec![AssessmentItem {
            id: 1,
            category: Category::Level3,
            item_name: "Lockout/tagout".into(),
        }]);
        let out = format_reference(4, &catalog);
        assert!(out.contains("✅ Found 4 workers"));
        assert!(out.contains("✅ Found 1 assessment items"));
        assert!(out.contains("  - Level2: 0 items"));
        assert!(out.contains("  - Level3: 1 items"));
        assert!(out.contains("  - Level4: 0 items"));
    }

    #[test]
    fn run_report_mentions_counts_and_cleanup() {
        let report = GenerationReport {
            workers: 0,
            assessments_created: 0,
            committed: true,
            ..Default::default()
        };
        let out = format_run(&report, &[]);
        assert!(out.contains("✅ Successfully created 0 assessment records!"));
        assert!(out.contains("📊 Average assessments per worker: 0.0"));
        assert!(out.contains("    DELETE FROM supervisor_assessments;"));
        assert!(out.contains(&"=".repeat(60)));
    }

    #[test]
    fn dry_run_is_labelled() {
        let report = GenerationReport {
            workers: 2,
            assessments_created: 41,
            committed: false,
            ..Default::default()
        };
        let out = format_run(&report, &[]);
        assert!(out.contains("Dry run: generated 41"));
        assert!(out.contains("per worker: 20.5"));
    }
}
