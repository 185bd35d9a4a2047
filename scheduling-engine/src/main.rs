use anyhow::Result;
use chrono::{Datelike, Duration, Utc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scheduling_engine::demo;
use scheduling_engine::infrastructure::config::Settings;
use scheduling_engine::{RunParameters, SchedulePipeline};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "scheduling_engine=info,compliance=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting schedule generation...");

    // Load configuration
    let settings = Settings::new()?;
    tracing::info!("Configuration loaded: {:?}", settings);

    let inputs = demo::demo_inputs();
    let pipeline = SchedulePipeline::new(inputs, settings.solver.to_solver_config())
        .with_default_min_staff(settings.solver.default_min_staff)
        .with_model_dump_dir(settings.solver.model_dump_dir.clone());

    // Schedule the upcoming Monday-to-Sunday week.
    let today = Utc::now().date_naive();
    let days_until_monday = (7 - today.weekday().num_days_from_monday()) % 7;
    let start_date = today + Duration::days(i64::from(days_until_monday));
    let end_date = start_date + Duration::days(6);

    let mut params = RunParameters::new(start_date, end_date);
    params.solver = settings.solver.backend_kind()?;
    params.compliance = settings.compliance.to_options()?;
    params.published_at = Some(today);

    let result = pipeline.generate(&params)?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    tracing::info!(
        total_cost = result.total_weekly_cost,
        violations = result.compliance_violations.len(),
        "schedule generated"
    );

    if let Some(conflict) = result.compliance_error() {
        tracing::error!("{conflict}");
        std::process::exit(2);
    }

    Ok(())
}
