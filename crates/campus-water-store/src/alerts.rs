use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use campus_water_model::{Alert, AlertSeverity, AlertStatus, AlertType};
use campus_water_policies::AlertDraft;

use crate::error::StoreError;
use crate::stats::percent;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AlertTypeCounts {
    pub chemical: usize,
    pub bacteriological: usize,
    pub equipment: usize,
    pub maintenance: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
    pub critical: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AlertStats {
    pub total: usize,
    pub active: usize,
    /// Critical alerts that are not resolved.
    pub critical: usize,
    pub resolved: usize,
    pub resolution_rate: u32,
    pub by_type: AlertTypeCounts,
    pub by_severity: SeverityCounts,
}

/// Alert listing filter; unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertQuery {
    pub status: Option<AlertStatus>,
    pub severity: Option<AlertSeverity>,
    /// Drop resolved alerts.
    pub active_only: bool,
}

/// Alert collection with its lifecycle: `active -> acknowledged -> resolved`, or
/// `active -> resolved`. Resolved alerts are final.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlertBoard {
    alerts: Vec<Alert>,
}

impl AlertBoard {
    pub fn new(alerts: Vec<Alert>) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        for alert in &alerts {
            if !seen.insert(alert.id.as_str()) {
                return Err(StoreError::Duplicate {
                    kind: "alert",
                    id: alert.id.clone(),
                });
            }
        }
        Ok(Self { alerts })
    }

    #[must_use]
    pub fn all(&self) -> &[Alert] {
        &self.alerts
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Alert> {
        self.alerts.iter().find(|a| a.id == id)
    }

    pub fn by_severity(&self, severity: AlertSeverity) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(move |a| a.severity == severity)
    }

    pub fn by_status(&self, status: AlertStatus) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(move |a| a.status == status)
    }

    pub fn by_type(&self, alert_type: AlertType) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(move |a| a.alert_type == alert_type)
    }

    /// Everything not yet resolved, acknowledged alerts included.
    pub fn active(&self) -> impl Iterator<Item = &Alert> {
        self.alerts
            .iter()
            .filter(|a| a.status != AlertStatus::Resolved)
    }

    /// Alerts matching every constraint set on `query`, oldest first.
    pub fn query<'a>(&'a self, query: &'a AlertQuery) -> impl Iterator<Item = &'a Alert> + 'a {
        self.alerts
            .iter()
            .filter(move |a| query.status.map_or(true, |s| a.status == s))
            .filter(move |a| query.severity.map_or(true, |s| a.severity == s))
            .filter(move |a| !query.active_only || a.status != AlertStatus::Resolved)
    }

    pub fn critical_active(&self) -> impl Iterator<Item = &Alert> {
        self.active()
            .filter(|a| a.severity == AlertSeverity::Critical)
    }

    #[must_use]
    pub fn stats(&self) -> AlertStats {
        let total = self.alerts.len();
        let resolved = self.by_status(AlertStatus::Resolved).count();
        AlertStats {
            total,
            active: self.active().count(),
            critical: self.critical_active().count(),
            resolved,
            resolution_rate: percent(resolved, total),
            by_type: AlertTypeCounts {
                chemical: self.by_type(AlertType::ChemicalExceedance).count(),
                bacteriological: self.by_type(AlertType::BacteriologicalContamination).count(),
                equipment: self.by_type(AlertType::EquipmentFailure).count(),
                maintenance: self.by_type(AlertType::MaintenanceDue).count(),
            },
            by_severity: SeverityCounts {
                low: self.by_severity(AlertSeverity::Low).count(),
                medium: self.by_severity(AlertSeverity::Medium).count(),
                high: self.by_severity(AlertSeverity::High).count(),
                critical: self.by_severity(AlertSeverity::Critical).count(),
            },
        }
    }

    /// Appends one active alert per draft, with generated ids `alert-<seq>`.
    pub fn raise(
        &mut self,
        drafts: Vec<AlertDraft>,
        faucet_id: &str,
        sample_id: &str,
        now: DateTime<Utc>,
    ) -> Vec<Alert> {
        let mut raised = Vec::with_capacity(drafts.len());
        for draft in drafts {
            let alert = Alert {
                id: self.next_id(),
                alert_type: draft.alert_type,
                severity: draft.severity,
                title: draft.title,
                description: draft.description,
                faucet_id: Some(faucet_id.to_string()),
                sample_id: Some(sample_id.to_string()),
                created_at: now,
                resolved_at: None,
                status: AlertStatus::Active,
                assigned_to: None,
            };
            tracing::info!(
                alert_id = %alert.id,
                severity = %alert.severity,
                faucet_id,
                "alert raised"
            );
            self.alerts.push(alert.clone());
            raised.push(alert);
        }
        raised
    }

    pub fn acknowledge(&mut self, id: &str) -> Result<&Alert, StoreError> {
        self.transition(id, AlertStatus::Acknowledged, None)
    }

    pub fn resolve(&mut self, id: &str, now: DateTime<Utc>) -> Result<&Alert, StoreError> {
        self.transition(id, AlertStatus::Resolved, Some(now))
    }

    fn transition(
        &mut self,
        id: &str,
        to: AlertStatus,
        resolved_at: Option<DateTime<Utc>>,
    ) -> Result<&Alert, StoreError> {
        let alert = self
            .alerts
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| StoreError::AlertNotFound(id.to_string()))?;
        let allowed = matches!(
            (alert.status, to),
            (AlertStatus::Active, AlertStatus::Acknowledged)
                | (AlertStatus::Active | AlertStatus::Acknowledged, AlertStatus::Resolved)
        );
        if !allowed {
            return Err(StoreError::InvalidTransition {
                alert_id: id.to_string(),
                from: alert.status,
                to,
            });
        }
        tracing::info!(alert_id = id, from = %alert.status, to = %to, "alert transition");
        alert.status = to;
        if resolved_at.is_some() {
            alert.resolved_at = resolved_at;
        }
        Ok(alert)
    }

    fn next_id(&self) -> String {
        let mut seq = self.alerts.len() + 1;
        loop {
            let id = format!("alert-{seq:04}");
            if self.get(&id).is_none() {
                return id;
            }
            seq += 1;
        }
    }
}
