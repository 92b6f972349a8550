use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};
use clap_complete::Shell;

use campus_water_model::{
    AlertSeverity, AlertStatus, ComplianceStatus, FaucetStatus, FaucetType, ParameterCategory,
};
use campus_water_policies::CriticalityPolicy;

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print the limits table in use and its fingerprint.
    Limits {
        #[arg(long, value_enum)]
        category: Option<CategoryCli>,
    },
    /// Evaluate one measured value against its limit.
    Evaluate {
        parameter: String,
        #[arg(allow_negative_numbers = true)]
        value: f64,
    },
    /// Grade a measurement document (`{"chemical": {...}, "bacteriological": {...}}`).
    Classify { path: PathBuf },
    /// List catalog faucets.
    Faucets {
        #[arg(long, value_enum)]
        status: Option<FaucetStatusCli>,
        #[arg(long)]
        building: Option<String>,
        #[arg(long = "type", value_enum)]
        faucet_type: Option<FaucetTypeCli>,
    },
    /// Grade and store a laboratory report, raising alerts for violations.
    Ingest { path: PathBuf },
    /// List stored samples, most recent first.
    Samples {
        #[arg(long)]
        faucet: Option<String>,
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long)]
        to: Option<NaiveDate>,
        #[arg(long, value_enum)]
        compliance: Option<ComplianceCli>,
    },
    /// Sample, parameter and bacteriological statistics with 30-day trends.
    Stats,
    Alerts {
        #[command(subcommand)]
        command: AlertsCommand,
    },
    /// Dashboard counters.
    Dashboard,
    /// Quality report for an inclusive date range.
    Report {
        #[arg(long)]
        from: NaiveDate,
        #[arg(long)]
        to: NaiveDate,
    },
    Version,
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub(crate) enum AlertsCommand {
    List {
        #[arg(long, value_enum)]
        status: Option<AlertStatusCli>,
        #[arg(long, value_enum)]
        severity: Option<SeverityCli>,
        /// Only alerts that are not resolved.
        #[arg(long, default_value_t = false)]
        active: bool,
    },
    Ack {
        id: String,
    },
    Resolve {
        id: String,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum CriticalityCli {
    AllowlistOrRegistry,
    Allowlist,
    RegistryFlag,
}

impl From<CriticalityCli> for CriticalityPolicy {
    fn from(value: CriticalityCli) -> Self {
        match value {
            CriticalityCli::AllowlistOrRegistry => Self::AllowlistOrRegistry,
            CriticalityCli::Allowlist => Self::Allowlist,
            CriticalityCli::RegistryFlag => Self::RegistryFlag,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum CategoryCli {
    Physical,
    Chemical,
    Bacteriological,
}

impl From<CategoryCli> for ParameterCategory {
    fn from(value: CategoryCli) -> Self {
        match value {
            CategoryCli::Physical => Self::Physical,
            CategoryCli::Chemical => Self::Chemical,
            CategoryCli::Bacteriological => Self::Bacteriological,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum FaucetStatusCli {
    Active,
    OutOfService,
    Maintenance,
}

impl From<FaucetStatusCli> for FaucetStatus {
    fn from(value: FaucetStatusCli) -> Self {
        match value {
            FaucetStatusCli::Active => Self::Active,
            FaucetStatusCli::OutOfService => Self::OutOfService,
            FaucetStatusCli::Maintenance => Self::Maintenance,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum FaucetTypeCli {
    DrinkingFountain,
    Tap,
    WaterCooler,
}

impl From<FaucetTypeCli> for FaucetType {
    fn from(value: FaucetTypeCli) -> Self {
        match value {
            FaucetTypeCli::DrinkingFountain => Self::DrinkingFountain,
            FaucetTypeCli::Tap => Self::Tap,
            FaucetTypeCli::WaterCooler => Self::WaterCooler,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum ComplianceCli {
    Compliant,
    NonCompliant,
    Pending,
}

impl From<ComplianceCli> for ComplianceStatus {
    fn from(value: ComplianceCli) -> Self {
        match value {
            ComplianceCli::Compliant => Self::Compliant,
            ComplianceCli::NonCompliant => Self::NonCompliant,
            ComplianceCli::Pending => Self::Pending,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum AlertStatusCli {
    Active,
    Acknowledged,
    Resolved,
}

impl From<AlertStatusCli> for AlertStatus {
    fn from(value: AlertStatusCli) -> Self {
        match value {
            AlertStatusCli::Active => Self::Active,
            AlertStatusCli::Acknowledged => Self::Acknowledged,
            AlertStatusCli::Resolved => Self::Resolved,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub(crate) enum SeverityCli {
    Low,
    Medium,
    High,
    Critical,
}

impl From<SeverityCli> for AlertSeverity {
    fn from(value: SeverityCli) -> Self {
        match value {
            SeverityCli::Low => Self::Low,
            SeverityCli::Medium => Self::Medium,
            SeverityCli::High => Self::High,
            SeverityCli::Critical => Self::Critical,
        }
    }
}
