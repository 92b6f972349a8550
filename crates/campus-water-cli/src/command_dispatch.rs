use std::fs;
use std::path::Path;

use serde_json::{json, Value};

use campus_water_model::{MeasurementSet, ParameterCategory};
use campus_water_policies::{classify, derive_alerts, LimitsRegistry};
use campus_water_store::{AlertQuery, FaucetQuery, ReportPeriod, SampleQuery, SampleSubmission};

use crate::command_output_adapters::{emit_ok, to_value};
use crate::commands::{AlertsCommand, Commands};
use crate::workspace::Settings;
use crate::{CliError, OutputMode};

pub(crate) fn run_command(
    command: Commands,
    settings: &Settings,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let payload = match command {
        Commands::Limits { category } => limits(settings, category.map(Into::into))?,
        Commands::Evaluate { parameter, value } => evaluate(settings, &parameter, value)?,
        Commands::Classify { path } => classify_file(settings, &path)?,
        Commands::Faucets {
            status,
            building,
            faucet_type,
        } => {
            let query = FaucetQuery {
                status: status.map(Into::into),
                building,
                faucet_type: faucet_type.map(Into::into),
            };
            let catalog = settings.catalog()?;
            let faucets: Vec<_> = catalog.query(&query).collect();
            json!({ "faucets": to_value(&faucets)?, "stats": to_value(&catalog.stats())? })
        }
        Commands::Ingest { path } => ingest(settings, &path)?,
        Commands::Samples {
            faucet,
            from,
            to,
            compliance,
        } => {
            if let (Some(from), Some(to)) = (from, to) {
                if from > to {
                    return Err(CliError::usage("samples --from must not be after --to"));
                }
            }
            let query = SampleQuery {
                faucet_id: faucet,
                from,
                to,
                compliance: compliance.map(Into::into),
            };
            let store = settings.open_store()?;
            let samples: Vec<_> = store.samples().query(&query).collect();
            json!({ "samples": to_value(&samples)? })
        }
        Commands::Stats => {
            let store = settings.open_store()?;
            let today = settings.now.date_naive();
            let samples = store.samples();
            json!({
                "samples": to_value(&samples.stats(today))?,
                "parameters": to_value(&samples.parameter_stats())?,
                "bacteriological": to_value(&samples.bacteriological_stats())?,
                "chemical_trend": to_value(&samples.chemical_trend(today))?,
                "bacteriological_trend": to_value(&samples.bacteriological_trend(today))?,
            })
        }
        Commands::Alerts { command } => alerts(settings, command)?,
        Commands::Dashboard => {
            let store = settings.open_store()?;
            to_value(&store.dashboard(settings.now))?
        }
        Commands::Report { from, to } => {
            if from > to {
                return Err(CliError::usage("report --from must not be after --to"));
            }
            let store = settings.open_store()?;
            let period = ReportPeriod {
                start_date: from,
                end_date: to,
            };
            to_value(&store.report(period, settings.now))?
        }
        Commands::Version => json!({
            "name": "campus-water",
            "version": env!("CARGO_PKG_VERSION"),
        }),
        Commands::Completion { .. } => {
            return Err(CliError::internal(
                "completion is handled before dispatch".to_string(),
            ))
        }
    };
    emit_ok(output_mode, &payload)
}

pub(crate) fn print_config_paths(
    settings: &Settings,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    emit_ok(
        output_mode,
        &json!({
            "config_dir": settings.config_dir,
            "limits": settings.limits_path,
            "state": settings.state_path,
        }),
    )
}

fn limits_payload(settings: &Settings, registry: &LimitsRegistry) -> Result<Value, CliError> {
    let source = if settings.limits_path.exists() {
        settings.limits_path.display().to_string()
    } else {
        "builtin".to_string()
    };
    Ok(json!({
        "source": source,
        "fingerprint": registry.fingerprint()?,
        "policy": settings.policy.as_str(),
    }))
}

fn limits(
    settings: &Settings,
    category: Option<ParameterCategory>,
) -> Result<Value, CliError> {
    let registry = settings.registry()?;
    let rows: Vec<_> = match category {
        Some(category) => registry.by_category(category).collect(),
        None => registry.iter().collect(),
    };
    let mut payload = limits_payload(settings, &registry)?;
    payload["limits"] = to_value(&rows)?;
    Ok(payload)
}

fn evaluate(settings: &Settings, parameter: &str, value: f64) -> Result<Value, CliError> {
    if !value.is_finite() {
        return Err(CliError::validation(
            "invalid_measurement",
            &format!("measurement `{parameter}` must be finite, found {value}"),
        ));
    }
    let registry = settings.registry()?;
    let (evaluation, limit) = registry.evaluate_with_limit(parameter, value);
    if limit.is_none() {
        tracing::warn!(parameter, "parameter has no limit; reported compliant");
    }
    Ok(json!({
        "parameter": parameter,
        "value": value,
        "compliant": evaluation.compliant,
        "status": to_value(&evaluation.status)?,
        "limit": to_value(&limit)?,
    }))
}

fn read_json(path: &Path) -> Result<Value, CliError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| CliError::dependency(format!("read {} failed: {e}", path.display())))?;
    serde_json::from_str(&raw).map_err(|e| {
        CliError::validation("invalid_json", &format!("{}: {e}", path.display()))
    })
}

fn classify_file(settings: &Settings, path: &Path) -> Result<Value, CliError> {
    let document = read_json(path)?;
    let measurements = MeasurementSet::from_json(&document)
        .map_err(|e| CliError::validation("invalid_measurement", &e.to_string()))?;
    let registry = settings.registry()?;
    let classification = classify(&registry, &measurements, settings.policy);
    let alerts = derive_alerts(&classification, &registry);
    tracing::info!(
        grade = %classification.grade,
        violations = classification.violations,
        "measurements classified"
    );
    Ok(json!({
        "classification": to_value(&classification)?,
        "alerts": to_value(&alerts)?,
        "limits_fingerprint": registry.fingerprint()?,
    }))
}

fn ingest(settings: &Settings, path: &Path) -> Result<Value, CliError> {
    let document = read_json(path)?;
    let submission = SampleSubmission::from_json(&document)?;
    let mut store = settings.open_store()?;
    let outcome = store.ingest(submission, settings.now)?;
    settings.save_store(&store)?;
    Ok(json!({
        "sample": to_value(&outcome.sample)?,
        "classification": to_value(&outcome.classification)?,
        "alerts": to_value(&outcome.alerts)?,
    }))
}

fn alerts(settings: &Settings, command: AlertsCommand) -> Result<Value, CliError> {
    let mut store = settings.open_store()?;
    match command {
        AlertsCommand::List {
            status,
            severity,
            active,
        } => {
            let query = AlertQuery {
                status: status.map(Into::into),
                severity: severity.map(Into::into),
                active_only: active,
            };
            let board = store.alerts();
            let listed: Vec<_> = board.query(&query).collect();
            Ok(json!({ "alerts": to_value(&listed)?, "stats": to_value(&board.stats())? }))
        }
        AlertsCommand::Ack { id } => {
            let alert = to_value(store.alerts_mut().acknowledge(&id)?)?;
            settings.save_store(&store)?;
            Ok(json!({ "alert": alert }))
        }
        AlertsCommand::Resolve { id } => {
            let alert = to_value(store.alerts_mut().resolve(&id, settings.now)?)?;
            settings.save_store(&store)?;
            Ok(json!({ "alert": alert }))
        }
    }
}
