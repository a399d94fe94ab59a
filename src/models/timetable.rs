// ============================================================================
// Timetable domain types and JSON import
// ============================================================================
//
// `Session` and `Teacher` mirror the documents managed by the external
// scheduling CRUD surface. `parse_timetable_json_str` parses a bulk import
// document (teachers + sessions in one blob, sessions referencing teachers
// by name) into fully resolved domain values ready for storage.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::api::{SessionId, TeacherId};
use crate::models::time::{DayOfWeek, TimeOfDay, TimeSlot};

/// A resolved teacher assignment carried on a session.
///
/// Sessions returned by the store always have the teacher identity resolved;
/// the display name is what conflict descriptions and audit records use.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherRef {
    pub id: TeacherId,
    pub name: String,
}

/// One scheduled occurrence of a class: subject + teacher + hall + slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Store-assigned identifier; `None` before first insert.
    pub id: Option<SessionId>,
    pub class_name: String,
    pub section: String,
    pub subject: String,
    pub teacher: TeacherRef,
    pub hall: String,
    pub slot: TimeSlot,
    pub semester: String,
    pub academic_year: String,
}

/// A teacher and the set of subjects they are qualified to teach.
///
/// Availability is not stored; it is derived by scanning sessions for the
/// teacher at a given slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Teacher {
    pub id: Option<TeacherId>,
    pub name: String,
    pub employee_id: String,
    pub department: String,
    #[serde(default)]
    pub subjects: Vec<String>,
}

impl Teacher {
    pub fn teaches(&self, subject: &str) -> bool {
        self.subjects.iter().any(|s| s == subject)
    }
}

/// A parsed and resolved bulk import document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimetableDocument {
    pub teachers: Vec<Teacher>,
    pub sessions: Vec<Session>,
}

#[derive(Deserialize)]
struct TimetableInput {
    #[serde(default)]
    teachers: Vec<TeacherInput>,
    #[serde(default)]
    sessions: Vec<SessionInput>,
}

#[derive(Deserialize)]
struct TeacherInput {
    name: String,
    #[serde(default)]
    employee_id: String,
    #[serde(default)]
    department: String,
    #[serde(default)]
    subjects: Vec<String>,
}

#[derive(Deserialize)]
struct SessionInput {
    class_name: String,
    #[serde(default)]
    section: String,
    subject: String,
    /// Teacher display name, resolved against the document's teacher list.
    teacher: String,
    hall: String,
    day: String,
    start_time: String,
    end_time: String,
    #[serde(default)]
    semester: String,
    #[serde(default)]
    academic_year: String,
}

fn validate_input_timetable(timetable_json: &str) -> Result<()> {
    let value: serde_json::Value =
        serde_json::from_str(timetable_json).context("Invalid timetable JSON")?;
    let has_sessions = value
        .as_object()
        .and_then(|obj| obj.get("sessions"))
        .is_some();
    if !has_sessions {
        anyhow::bail!("Missing required 'sessions' field");
    }
    Ok(())
}

/// Parse a timetable import document from a JSON string.
///
/// Teachers are assigned fresh identifiers, and each session's `teacher`
/// name is resolved against them. Session time ranges are validated
/// (start strictly before end, day within the six-day week).
///
/// # Arguments
///
/// * `timetable_json` - Import document with `teachers` and `sessions` arrays
///
/// # Returns
///
/// A `TimetableDocument` whose sessions carry resolved `TeacherRef`s.
pub fn parse_timetable_json_str(timetable_json: &str) -> Result<TimetableDocument> {
    validate_input_timetable(timetable_json)?;

    let input: TimetableInput = serde_json::from_str(timetable_json)
        .context("Failed to deserialize timetable JSON using Serde")?;

    let mut teachers = Vec::with_capacity(input.teachers.len());
    let mut by_name: HashMap<String, TeacherRef> = HashMap::new();
    for teacher in input.teachers {
        let id = TeacherId::generate();
        by_name.insert(
            teacher.name.clone(),
            TeacherRef {
                id,
                name: teacher.name.clone(),
            },
        );
        teachers.push(Teacher {
            id: Some(id),
            name: teacher.name,
            employee_id: teacher.employee_id,
            department: teacher.department,
            subjects: teacher.subjects,
        });
    }

    let mut sessions = Vec::with_capacity(input.sessions.len());
    for session in input.sessions {
        let teacher = by_name
            .get(&session.teacher)
            .cloned()
            .with_context(|| format!("Unknown teacher '{}' in session", session.teacher))?;

        let day: DayOfWeek = session
            .day
            .parse()
            .map_err(|e: String| anyhow::anyhow!(e))?;
        let start = TimeOfDay::parse(&session.start_time).map_err(|e| anyhow::anyhow!(e))?;
        let end = TimeOfDay::parse(&session.end_time).map_err(|e| anyhow::anyhow!(e))?;
        let slot = TimeSlot::new(day, start, end).with_context(|| {
            format!(
                "Session '{}' has an empty or inverted time range {}-{}",
                session.class_name, session.start_time, session.end_time
            )
        })?;

        sessions.push(Session {
            id: None,
            class_name: session.class_name,
            section: session.section,
            subject: session.subject,
            teacher,
            hall: session.hall,
            slot,
            semester: session.semester,
            academic_year: session.academic_year,
        });
    }

    Ok(TimetableDocument { teachers, sessions })
}

// ============================================================================
// Tests
// ============================================================================
