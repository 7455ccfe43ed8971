//! Leaf-detection rules, one per material kind.
//!
//! Each predicate looks at a single node and either extracts the fields a
//! record needs or says why the node is skipped.

use std::fmt;

use edubuddy_store::StoreNode;
use edubuddy_types::LinkField;

/// Why a candidate leaf produced no record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Node is a scalar where a mapping was expected
    NotBranch,
    /// Unit node without a truthy scalar `Name`
    MissingName,
    /// Link field absent or falsy
    MissingLink,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NotBranch => write!(f, "not a mapping"),
            SkipReason::MissingName => write!(f, "missing Name"),
            SkipReason::MissingLink => write!(f, "missing link"),
        }
    }
}

/// A PDF Notes unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitLeaf {
    /// Full unit name
    pub name: String,
    pub link: String,
}

/// A leaf carrying only a link (PYQ exam, syllabus semester).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafLink {
    pub link: String,
}

fn truthy_field(node: &StoreNode, field: &str) -> Option<String> {
    node.child(field).and_then(StoreNode::truthy_text)
}

fn link_leaf(node: &StoreNode, field: LinkField) -> Result<LeafLink, SkipReason> {
    if !node.is_branch() {
        return Err(SkipReason::NotBranch);
    }
    truthy_field(node, field.as_str())
        .map(|link| LeafLink { link })
        .ok_or(SkipReason::MissingLink)
}

/// A unit node needs both `Name` and `getPDFlink`.
///
/// Both must be truthy scalars; a mapping in either slot has no text to show.
pub fn unit_leaf(node: &StoreNode) -> Result<UnitLeaf, SkipReason> {
    if !node.is_branch() {
        return Err(SkipReason::NotBranch);
    }
    let name = truthy_field(node, "Name").ok_or(SkipReason::MissingName)?;
    let link = truthy_field(node, LinkField::PdfLink.as_str()).ok_or(SkipReason::MissingLink)?;
    Ok(UnitLeaf { name, link })
}

/// An exam-type node needs `getPYQlink`.
pub fn exam_leaf(node: &StoreNode) -> Result<LeafLink, SkipReason> {
    link_leaf(node, LinkField::PyqLink)
}

/// A syllabus semester node needs `Get Syllabus Structure`.
pub fn syllabus_leaf(node: &StoreNode) -> Result<LeafLink, SkipReason> {
    link_leaf(node, LinkField::SyllabusStructure)
}
