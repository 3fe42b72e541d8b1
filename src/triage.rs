//! Front-desk triage data layer.
//!
//! Keyword routing, per-department queue tokens, duplicate protection, and
//! the roster store a resolved explanation is finally written into. The
//! resolver never holds a reference to the roster; callers wire the two
//! together per prescription-completion action.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::resolver::ExplanationResult;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Cardiology,
    Neurology,
    Orthopedic,
    OralHealth,
    General,
}

impl Department {
    pub fn name(&self) -> &'static str {
        match self {
            Department::Cardiology => "Cardiology",
            Department::Neurology => "Neurology",
            Department::Orthopedic => "Orthopedic",
            Department::OralHealth => "Oral Health",
            Department::General => "General",
        }
    }

    /// First four letters of the department name, uppercased.
    fn token_prefix(&self) -> &'static str {
        match self {
            Department::Cardiology => "CARD",
            Department::Neurology => "NEUR",
            Department::Orthopedic => "ORTH",
            Department::OralHealth => "ORAL",
            Department::General => "GENE",
        }
    }
}

impl std::fmt::Display for Department {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Keyword routing table, checked in order; the first group with any keyword
/// contained in the lowercased symptom text wins. Anything unmatched goes to
/// General.
const ROUTING: &[(&[&str], Department)] = &[
    (&["heart", "chest", "pulse"], Department::Cardiology),
    (&["brain", "head", "dizzy"], Department::Neurology),
    (&["bone", "joint", "fracture"], Department::Orthopedic),
    (&["tooth", "gum", "mouth"], Department::OralHealth),
];

/// Route free-text symptoms to a department.
pub fn route_department(symptoms: &str) -> Department {
    let s = symptoms.to_lowercase();
    ROUTING
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| s.contains(k)))
        .map(|(_, dept)| *dept)
        .unwrap_or(Department::General)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    Waiting,
    Completed,
}

/// Intake form fields, validated non-empty by the collecting UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Intake {
    pub name: String,
    pub age: u8,
    pub gender: String,
    pub blood_type: String,
    pub contact: String,
    pub symptoms: String,
}

/// Doctor-authored prescription plus the resolved explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prescription {
    pub medicine: String,
    pub notes: String,
    pub explanation: ExplanationResult,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRecord {
    pub token: String,
    pub department: Department,
    pub status: Status,
    pub intake: Intake,
    pub prescription: Option<Prescription>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RosterStats {
    pub total: usize,
    pub waiting: usize,
    pub completed: usize,
    pub per_department: HashMap<Department, usize>,
}

/// Store the front desk registers into and doctors complete against.
pub trait Roster: Send + Sync {
    /// Register a patient: route, assign a queue token, and file the record.
    /// Rejected with [`Error::DuplicateRegistration`] when the same identity
    /// already holds a `Waiting` token.
    fn register(&self, intake: Intake) -> Result<PatientRecord>;

    /// Attach a prescription to a waiting record and mark it completed.
    fn complete(&self, token: &str, prescription: Prescription) -> Result<PatientRecord>;

    /// Records matching a patient identity (trimmed name, case-insensitive,
    /// plus trimmed contact).
    fn find_by_identity(&self, name: &str, contact: &str) -> Vec<PatientRecord>;

    /// Waiting queue for one department, in registration order.
    fn waiting_for(&self, department: Department) -> Vec<PatientRecord>;

    fn stats(&self) -> RosterStats;
}

#[derive(Default)]
struct RosterInner {
    records: Vec<PatientRecord>,
    token_counts: HashMap<Department, u32>,
}

/// In-memory roster. Interior mutability keeps concurrent front-desk calls
/// safe; a poisoned lock is recovered rather than propagated, since records
/// are only ever mutated in place by complete().
#[derive(Default)]
pub struct InMemoryRoster {
    inner: RwLock<RosterInner>,
}

impl InMemoryRoster {
    pub fn new() -> Self {
        Self::default()
    }
}

fn same_identity(record: &PatientRecord, name: &str, contact: &str) -> bool {
    // Full Unicode case folding: accented names must collide too.
    record.intake.name.trim().to_lowercase() == name.trim().to_lowercase()
        && record.intake.contact.trim() == contact.trim()
}

impl Roster for InMemoryRoster {
    fn register(&self, intake: Intake) -> Result<PatientRecord> {
        let mut inner = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = inner.records.iter().find(|r| {
            r.status == Status::Waiting && same_identity(r, &intake.name, &intake.contact)
        }) {
            return Err(Error::DuplicateRegistration {
                token: existing.token.clone(),
            });
        }

        let department = route_department(&intake.symptoms);
        let count = inner.token_counts.entry(department).or_insert(0);
        *count += 1;
        let token = format!("{}-{:03}", department.token_prefix(), count);

        let record = PatientRecord {
            token: token.clone(),
            department,
            status: Status::Waiting,
            intake,
            prescription: None,
        };
        inner.records.push(record.clone());
        info!(%token, department = %department, "patient registered");
        Ok(record)
    }

    fn complete(&self, token: &str, prescription: Prescription) -> Result<PatientRecord> {
        let mut inner = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let record = inner
            .records
            .iter_mut()
            .find(|r| r.token == token)
            .ok_or_else(|| Error::UnknownToken(token.to_string()))?;

        if record.status == Status::Completed {
            return Err(Error::AlreadyCompleted(token.to_string()));
        }

        record.prescription = Some(prescription);
        record.status = Status::Completed;
        info!(%token, "appointment completed");
        Ok(record.clone())
    }

    fn find_by_identity(&self, name: &str, contact: &str) -> Vec<PatientRecord> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .records
            .iter()
            .filter(|r| same_identity(r, name, contact))
            .cloned()
            .collect()
    }

    fn waiting_for(&self, department: Department) -> Vec<PatientRecord> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .records
            .iter()
            .filter(|r| r.department == department && r.status == Status::Waiting)
            .cloned()
            .collect()
    }

    fn stats(&self) -> RosterStats {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut stats = RosterStats {
            total: inner.records.len(),
            ..RosterStats::default()
        };
        for record in &inner.records {
            match record.status {
                Status::Waiting => stats.waiting += 1,
                Status::Completed => stats.completed += 1,
            }
            *stats.per_department.entry(record.department).or_insert(0) += 1;
        }
        stats
    }
}
