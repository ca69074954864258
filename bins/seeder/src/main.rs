//! Demo data seeder for Vantora change tracking.
//!
//! Walks a demo organization through the tracking lifecycle: entity
//! captures, threshold alerts, analysis history, a weekly digest, and a
//! change-feed visit.
//!
//! Usage: cargo run --bin seeder

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use serde_json::json;
use std::collections::BTreeMap;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;
use vantora_core::entity::EntityType;
use vantora_core::summary::SummaryPeriod;
use vantora_db::{
    AnalysisHistoryRepository, SummaryRepository, TrackerRepository, VersionRepository,
};
use vantora_hooks::{AnalysisOptions, ChangeHooks, TrackingOutcome};
use vantora_shared::config::{AppConfig, TrackingConfig};
use vantora_shared::types::TimeWindow;

/// Demo organization ID (consistent for all seeds)
const DEMO_ORG_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo user ID (consistent for all seeds)
const DEMO_USER_ID: &str = "00000000-0000-0000-0000-000000000002";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Surface the tracking failures the hooks log instead of propagating
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vantora=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load().expect("Failed to load configuration");

    println!("Connecting to database...");
    let db = vantora_db::connect(&config.database.url)
        .await
        .expect("Failed to connect to database");

    let hooks = ChangeHooks::new(db.clone());

    println!("Seeding audience timeline...");
    seed_audience_timeline(&db, &hooks).await;

    println!("Seeding brand tracking timeline...");
    seed_brand_timeline(&db, &hooks, &config.tracking).await;

    println!("Seeding analysis history...");
    seed_analysis_history(&db, &hooks).await;

    println!("Generating weekly digest...");
    seed_weekly_digest(&db, &config.tracking).await;

    println!("Recording demo user visit...");
    seed_tracker_visit(&db).await;

    println!("Seeding complete!");
}

fn demo_org_id() -> Uuid {
    Uuid::parse_str(DEMO_ORG_ID).unwrap()
}

fn demo_user_id() -> Uuid {
    Uuid::parse_str(DEMO_USER_ID).unwrap()
}

/// Seeds an audience create/update pair with a significant size jump.
async fn seed_audience_timeline(db: &DatabaseConnection, hooks: &ChangeHooks) {
    let org = demo_org_id();
    let versions = VersionRepository::new(db.clone());

    // Skip when a prior run already captured this entity
    if versions
        .get_latest_version(org, EntityType::Audience, "aud-demo-1")
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Audience timeline already seeded, skipping...");
        return;
    }

    let created = hooks
        .on_entity_created(
            org,
            EntityType::Audience,
            "aud-demo-1",
            json!({"name": "Gen Z Panel", "size": 1000, "status": "active"}),
            Some(demo_user_id()),
        )
        .await;
    report("audience create", &created);

    let updated = hooks
        .on_entity_updated(
            org,
            EntityType::Audience,
            "aud-demo-1",
            &json!({"name": "Gen Z Panel", "size": 1000, "status": "active"}),
            json!({"name": "Gen Z Panel", "size": 1200, "status": "active"}),
            Some(demo_user_id()),
        )
        .await;
    report("audience update", &updated);
}

/// Seeds three brand tracking waves, a data refresh alert, and prints the
/// resulting brand health trend.
async fn seed_brand_timeline(
    db: &DatabaseConnection,
    hooks: &ChangeHooks,
    tracking: &TrackingConfig,
) {
    let org = demo_org_id();
    let versions = VersionRepository::new(db.clone());

    if versions
        .get_latest_version(org, EntityType::BrandTracking, "bt-demo-1")
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Brand timeline already seeded, skipping...");
        return;
    }

    let wave_one = json!({
        "name": "Acme Cola",
        "brandHealth": 80.0,
        "nps": 45.0,
        "marketShare": 0.31,
        "sentiment": 0.62
    });
    let wave_two = json!({
        "name": "Acme Cola",
        "brandHealth": 70.0,
        "nps": 44.0,
        "marketShare": 0.29,
        "sentiment": 0.58
    });
    let wave_three = json!({
        "name": "Acme Cola",
        "brandHealth": 74.0,
        "nps": 46.0,
        "marketShare": 0.30,
        "sentiment": 0.61
    });

    let first = hooks
        .on_entity_created(
            org,
            EntityType::BrandTracking,
            "bt-demo-1",
            wave_one.clone(),
            Some(demo_user_id()),
        )
        .await;
    report("brand wave 1", &first);

    // Wave 2 drops brand health by 10 points and fires both drop thresholds
    let second = hooks
        .on_entity_updated(
            org,
            EntityType::BrandTracking,
            "bt-demo-1",
            &wave_one,
            wave_two.clone(),
            Some(demo_user_id()),
        )
        .await;
    report("brand wave 2", &second);

    let third = hooks
        .on_entity_updated(
            org,
            EntityType::BrandTracking,
            "bt-demo-1",
            &wave_two,
            wave_three,
            Some(demo_user_id()),
        )
        .await;
    report("brand wave 3", &third);

    let fresh = hooks
        .on_new_data_available(org, EntityType::BrandTracking, "bt-demo-1", "April wave landed")
        .await;
    report("new data alert", &fresh);

    match versions
        .metric_trends(
            org,
            EntityType::BrandTracking,
            "bt-demo-1",
            &["brandHealth"],
            tracking.trend_periods,
        )
        .await
    {
        Ok(trends) => {
            for trend in trends {
                println!("  Trend for {}: {}", trend.metric, trend.direction.as_str());
            }
        }
        Err(e) => eprintln!("Failed to analyze trends: {e}"),
    }
}

/// Seeds two analysis runs and prints how the insights evolved.
async fn seed_analysis_history(db: &DatabaseConnection, hooks: &ChangeHooks) {
    let org = demo_org_id();
    let history = AnalysisHistoryRepository::new(db.clone());

    if history
        .latest(org, "brand_deep_dive", "report-demo-9")
        .await
        .ok()
        .flatten()
        .is_some()
    {
        println!("  Analysis history already seeded, skipping...");
        return;
    }

    let first = hooks
        .on_analysis_completed(
            org,
            "brand_deep_dive",
            "report-demo-9",
            json!({"sections": 4}),
            vec![
                "Awareness is climbing among 18-24s".to_string(),
                "Preference is flat quarter on quarter".to_string(),
            ],
            BTreeMap::from([
                ("awareness".to_string(), 0.41),
                ("preference".to_string(), 0.18),
            ]),
            AnalysisOptions {
                confidence: Some(0.82),
                ..AnalysisOptions::default()
            },
        )
        .await;
    report("analysis run 1", &first);

    let second = hooks
        .on_analysis_completed(
            org,
            "brand_deep_dive",
            "report-demo-9",
            json!({"sections": 5}),
            vec![
                "Awareness is climbing among 18-24s".to_string(),
                "Sentiment dipped after the April campaign".to_string(),
            ],
            BTreeMap::from([
                ("awareness".to_string(), 0.44),
                ("sentiment".to_string(), 0.58),
            ]),
            AnalysisOptions {
                confidence: Some(0.87),
                ..AnalysisOptions::default()
            },
        )
        .await;
    report("analysis run 2", &second);

    match history
        .compare_analysis_versions(org, "brand_deep_dive", "report-demo-9", 1, 2)
        .await
    {
        Ok(Some(comparison)) => println!(
            "  Insight evolution: {} added, {} removed, {} consistent",
            comparison.insight_evolution.added.len(),
            comparison.insight_evolution.removed.len(),
            comparison.insight_evolution.consistent.len()
        ),
        Ok(None) => eprintln!("Analysis versions missing for comparison"),
        Err(e) => eprintln!("Failed to compare analysis runs: {e}"),
    }
}

/// Generates the weekly digest over the seeded changes and prints it.
async fn seed_weekly_digest(db: &DatabaseConnection, tracking: &TrackingConfig) {
    let org = demo_org_id();
    let summaries = SummaryRepository::new(db.clone());

    let now = Utc::now();
    let window = TimeWindow::new(now - Duration::days(7), now);

    match summaries
        .generate_summary(
            org,
            SummaryPeriod::Weekly,
            &window,
            "overview",
            tracking.summary_top_changes as usize,
        )
        .await
    {
        Ok(summary) => {
            println!(
                "  Digest covers {} changes ({} significant)",
                summary.total_changes, summary.significant_changes
            );
            if let Some(highlights) = summary.highlights.as_array() {
                for highlight in highlights.iter().filter_map(|h| h.as_str()) {
                    println!("    - {highlight}");
                }
            }
        }
        Err(e) => eprintln!("Failed to generate digest: {e}"),
    }
}

/// Records a change-feed visit for the demo user and prints the unseen count.
async fn seed_tracker_visit(db: &DatabaseConnection) {
    let org = demo_org_id();
    let trackers = TrackerRepository::new(db.clone());

    if let Err(e) = trackers.record_visit(org, demo_user_id()).await {
        eprintln!("Failed to record visit: {e}");
        return;
    }
    match trackers.unseen_change_count(org, demo_user_id()).await {
        Ok(unseen) => println!("  Demo user has {unseen} unseen changes"),
        Err(e) => eprintln!("Failed to count unseen changes: {e}"),
    }
}

/// Prints one hook outcome in a compact line.
fn report(step: &str, outcome: &TrackingOutcome) {
    match outcome {
        TrackingOutcome::Recorded {
            version,
            alerts_raised,
        } => {
            let version = version.map_or_else(String::new, |v| format!(" v{v}"));
            println!("  Recorded {step}{version} ({alerts_raised} alerts)");
        }
        TrackingOutcome::Failed(error) => eprintln!("  Failed {step}: {error}"),
    }
}
