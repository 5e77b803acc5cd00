//! Seed the database with demo officers, locations and cameras.
//!
//! Optionally loads video analyses exported by the pipeline (a JSON array).

use anyhow::{Context, Result};
use clap::Parser;
use crowd_monitor_core::domains::auth::models::UserProfile;
use crowd_monitor_core::domains::locations::models::{Camera, Location};
use crowd_monitor_core::domains::video_analysis::models::{VideoAnalysis, VideoAnalysisDocument};
use sqlx::postgres::PgPoolOptions;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "seed")]
#[command(about = "Seed the crowd monitor database with demo data")]
struct Cli {
    /// Postgres connection string
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// JSON file holding an array of video analysis documents
    #[arg(long)]
    video_analyses: Option<PathBuf>,
}

const INTERVENTION_SUGGESTIONS: &[&str] = &[
    "Immediately stop any further crowd flow towards this congested area.",
    "Open or create multiple emergency exit routes away from the crush point to relieve pressure.",
    "Deploy emergency responders (police, medical) to the immediate area for assistance and upstream to manage flow control and diversions.",
    "Use clear, loud communication (e.g., loudspeakers) to instruct the crowd to stop pushing, remain calm if possible, and direct them towards available exit routes.",
    "Set up barricades to redirect crowd flow and prevent further congestion.",
    "Establish a command post near the affected area to coordinate response efforts.",
    "Initiate evacuation procedures for the most densely packed areas first.",
    "Dispatch additional personnel to manage crowd movement at key entry/exit points.",
    "Activate emergency protocols for rapid response team deployment.",
    "Implement traffic control measures in surrounding areas to facilitate emergency vehicle access.",
];

fn users() -> Vec<UserProfile> {
    [
        ("+919175045787", "Rajesh Kumar", "ASI", "Madgaon Police Department", "123"),
        ("+919130232897", "Priya Sharma", "SI", "Vasco Police Department", "456"),
        ("+917708122103", "Amit Patel", "PI", "Panjim Police Department", "789"),
        ("+919405061349", "Kavita Naik", "DYSP", "Mapusa Police Department", "321"),
    ]
    .into_iter()
    .map(|(phone_number, name, rank, department, id_card_number)| UserProfile {
        phone_number: phone_number.to_string(),
        name: name.to_string(),
        rank: rank.to_string(),
        department: department.to_string(),
        id_card_number: id_card_number.to_string(),
    })
    .collect()
}

fn locations() -> Vec<Location> {
    [
        ("loc1", "Miramar Beach", true),
        ("loc2", "Dona Paula", true),
        ("loc3", "Colva Beach", false),
        ("loc4", "Bodgini", true),
        ("loc5", "Calangute Beach", true),
        ("loc6", "Vasco Damodar Temple", false),
    ]
    .into_iter()
    .enumerate()
    .map(|(idx, (id, name, is_overcrowded))| Location {
        id: id.to_string(),
        name: name.to_string(),
        is_overcrowded,
        camera_ids: (1..=3).map(|n| format!("cam{}", idx * 3 + n)).collect(),
    })
    .collect()
}

/// Three to five suggestions and a crowd count between 50 and 449 per camera,
/// spread deterministically so reruns produce the same data.
fn cameras(locations: &[Location]) -> Vec<Camera> {
    let mut cameras = Vec::new();
    for location in locations {
        for camera_id in &location.camera_ids {
            let n = cameras.len();
            let count = 3 + n % 3;
            let intervention_suggestions = (0..count)
                .map(|i| INTERVENTION_SUGGESTIONS[(n * 7 + i * 3) % INTERVENTION_SUGGESTIONS.len()].to_string())
                .collect();

            cameras.push(Camera {
                id: camera_id.clone(),
                location_id: location.id.clone(),
                crowd_count: 50 + ((n as i32 * 137) % 400),
                police_intervention_needed: true,
                intervention_suggestions,
            });
        }
    }
    cameras
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&cli.database_url)
        .await
        .context("Failed to connect to database")?;
    println!("✓ Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    println!("✓ Migrations applied");

    let users = users();
    for user in &users {
        user.upsert(&pool)
            .await
            .with_context(|| format!("Failed to save user {}", user.name))?;
    }
    println!("✓ Seeded {} users", users.len());

    let locations = locations();
    for location in &locations {
        location
            .upsert(&pool)
            .await
            .with_context(|| format!("Failed to save location {}", location.id))?;
    }
    println!("✓ Seeded {} locations", locations.len());

    let cameras = cameras(&locations);
    for camera in &cameras {
        camera
            .upsert(&pool)
            .await
            .with_context(|| format!("Failed to save camera {}", camera.id))?;
    }
    println!("✓ Seeded {} cameras", cameras.len());

    if let Some(path) = cli.video_analyses {
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let analyses: Vec<VideoAnalysis> =
            serde_json::from_str(&raw).context("Failed to parse video analyses")?;

        for analysis in &analyses {
            VideoAnalysisDocument::from_analysis(analysis)?
                .upsert(&pool)
                .await
                .with_context(|| format!("Failed to save video analysis {}", analysis.video_id))?;
        }
        println!("✓ Loaded {} video analyses", analyses.len());
    }

    println!("\nSuccessfully seeded the database!");
    Ok(())
}
