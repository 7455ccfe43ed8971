//! Flattening of kind roots into searchable records.
//!
//! Every kind root is walked with the same recursive function, driven by a
//! fixed list of levels:
//!
//! ```text
//! PDF Notes: department / semester / "Subjects" / subject / unit  -> unit_leaf
//! PYQs:      department / semester / "Subjects" / subject / exam  -> exam_leaf
//! Syllabus:  department / semester                               -> syllabus_leaf
//! ```
//!
//! Nodes that fail their leaf rule are skipped, never reported as errors.

use tracing::{debug, warn};

use edubuddy_store::StoreNode;
use edubuddy_types::{MaterialKind, SearchRecord, Semester, StoragePath};

use crate::leaf::{exam_leaf, syllabus_leaf, unit_leaf, SkipReason};

/// Key of the subjects mapping below each semester node.
const SUBJECTS_KEY: &str = "Subjects";

/// Flattening options.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlattenOptions {
    /// Log skipped leaves at warn instead of debug
    pub warn_on_malformed: bool,
}

/// One step of a kind's traversal.
#[derive(Debug, Clone, Copy)]
enum Level {
    /// Iterate children, recording the key as the department
    Department,
    /// Iterate children, recording the key as the semester
    Semester,
    /// Descend into a fixed child
    Fixed(&'static str),
    /// Iterate children, recording the key as the subject
    Subject,
    /// Iterate children, recording the key as the unit/exam key
    LeafKey,
}

fn levels(kind: MaterialKind) -> &'static [Level] {
    match kind {
        MaterialKind::PdfNotes | MaterialKind::Pyqs => &[
            Level::Department,
            Level::Semester,
            Level::Fixed(SUBJECTS_KEY),
            Level::Subject,
            Level::LeafKey,
        ],
        MaterialKind::Syllabus => &[Level::Department, Level::Semester],
    }
}

/// Keys collected on the way down.
#[derive(Debug, Clone, Default)]
struct Trail {
    department: String,
    semester_key: String,
    subject: Option<String>,
    leaf_key: Option<String>,
}

struct Walker {
    kind: MaterialKind,
    options: FlattenOptions,
    records: Vec<SearchRecord>,
}

impl Walker {
    fn walk(&mut self, node: &StoreNode, levels: &[Level], trail: &Trail) {
        let Some((level, rest)) = levels.split_first() else {
            self.emit(node, trail);
            return;
        };

        if let Level::Fixed(key) = level {
            match node.child(key) {
                Some(child) => self.walk(child, rest, trail),
                None => debug!(kind = %self.kind, at = %trail_path(trail), missing = key, "No children"),
            }
            return;
        }

        for (key, child) in node.children() {
            let mut next = trail.clone();
            match level {
                Level::Department => next.department = key.to_string(),
                Level::Semester => next.semester_key = key.to_string(),
                Level::Subject => next.subject = Some(key.to_string()),
                Level::LeafKey => next.leaf_key = Some(key.to_string()),
                Level::Fixed(_) => {}
            }
            self.walk(child, rest, &next);
        }
    }

    fn emit(&mut self, node: &StoreNode, trail: &Trail) {
        match build_record(self.kind, node, trail) {
            Ok(record) => self.records.push(record),
            Err(reason) => self.skipped(trail, reason),
        }
    }

    fn skipped(&self, trail: &Trail, reason: SkipReason) {
        let at = trail_path(trail);
        if self.options.warn_on_malformed {
            warn!(kind = %self.kind, at = %at, reason = %reason, "Skipping malformed material node");
        } else {
            debug!(kind = %self.kind, at = %at, reason = %reason, "Skipping material node");
        }
    }
}

fn trail_path(trail: &Trail) -> StoragePath {
    let mut path = StoragePath::root()
        .child(trail.department.clone())
        .child(trail.semester_key.clone());
    if let Some(subject) = &trail.subject {
        path = path.child(subject.clone());
    }
    if let Some(key) = &trail.leaf_key {
        path = path.child(key.clone());
    }
    path
}

/// Semester number from a key such as `Semester 3`.
fn semester_number(semester_key: &str) -> String {
    semester_key
        .strip_prefix(Semester::KEY_PREFIX)
        .unwrap_or(semester_key)
        .trim()
        .to_string()
}

fn search_key(kind: MaterialKind, terms: &[&str]) -> String {
    let mut parts = Vec::with_capacity(terms.len() + 2);
    parts.push(kind.display_name());
    parts.extend_from_slice(terms);
    parts.push(kind.search_keyword());
    parts.join(" ").to_lowercase()
}

fn build_record(
    kind: MaterialKind,
    node: &StoreNode,
    trail: &Trail,
) -> Result<SearchRecord, SkipReason> {
    let dept = trail.department.as_str();
    let sem_key = trail.semester_key.as_str();
    let base_trail = format!("{} > {}", dept, sem_key);

    match kind {
        MaterialKind::PdfNotes => {
            let unit = unit_leaf(node)?;
            let subject = trail.subject.clone().unwrap_or_default();
            let unit_key = trail.leaf_key.clone().unwrap_or_default();
            Ok(SearchRecord {
                kind,
                department: dept.to_string(),
                semester: semester_number(sem_key),
                name: format!("{} - {}", subject, unit.name),
                path_display: format!("{} > {} > {}", base_trail, subject, unit.name),
                search_text: search_key(kind, &[dept, sem_key, &subject, &unit.name, &unit_key]),
                link: unit.link,
                subject: Some(subject),
                unit_name: Some(unit.name),
                unit_key: Some(unit_key),
                exam_type: None,
            })
        }
        MaterialKind::Pyqs => {
            let exam = exam_leaf(node)?;
            let subject = trail.subject.clone().unwrap_or_default();
            let exam_key = trail.leaf_key.clone().unwrap_or_default();
            Ok(SearchRecord {
                kind,
                department: dept.to_string(),
                semester: semester_number(sem_key),
                name: format!("{} - {} {}", subject, exam_key, kind),
                path_display: format!("{} > {} > {}", base_trail, subject, exam_key),
                search_text: search_key(kind, &[dept, sem_key, &subject, &exam_key]),
                link: exam.link,
                subject: Some(subject),
                unit_name: None,
                unit_key: None,
                exam_type: Some(exam_key),
            })
        }
        MaterialKind::Syllabus => {
            let syllabus = syllabus_leaf(node)?;
            Ok(SearchRecord {
                kind,
                department: dept.to_string(),
                semester: semester_number(sem_key),
                name: format!("{} - {} - {}", kind, dept, sem_key),
                path_display: base_trail,
                search_text: search_key(kind, &[dept, sem_key]),
                link: syllabus.link,
                subject: None,
                unit_name: None,
                unit_key: None,
                exam_type: None,
            })
        }
    }
}

/// Flatten one kind root, given the node at `<root>/Department`.
pub fn flatten_root(
    kind: MaterialKind,
    departments: &StoreNode,
    options: FlattenOptions,
) -> Vec<SearchRecord> {
    let mut walker = Walker {
        kind,
        options,
        records: Vec::new(),
    };
    walker.walk(departments, levels(kind), &Trail::default());
    debug!(kind = %kind, count = walker.records.len(), "Flattened root");
    walker.records
}

/// Flatten a full store snapshot: PDF Notes, then PYQs, then Syllabus.
pub fn flatten_store(root: &StoreNode, options: FlattenOptions) -> Vec<SearchRecord> {
    MaterialKind::ALL
        .iter()
        .flat_map(|&kind| {
            let path = StoragePath::root().child(kind.store_root()).child("Department");
            match root.at(&path) {
                Some(departments) => flatten_root(kind, departments, options),
                None => {
                    debug!(kind = %kind, path = %path, "No data for root");
                    Vec::new()
                }
            }
        })
        .collect()
}
