//! Transaction Sort Grammar
//!
//! Comma-separated field names from {id, uid, point_rule_id}; a leading `-`
//! requests descending order. Repeats after the first occurrence and
//! unrecognized fields are dropped. An empty spec leaves insertion order.

use crate::model::Transaction;
use std::cmp::Ordering;

/// Sortable transaction field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Row id
    Id,
    /// End-user identifier
    Uid,
    /// Referenced rule id
    PointRuleId,
}

/// One parsed sort token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    /// Field to sort on
    pub field: SortField,
    /// Descending when true
    pub descending: bool,
}

/// Parse a sort spec like `-id,uid`.
pub fn parse(spec: &str) -> Vec<SortKey> {
    let mut keys: Vec<SortKey> = Vec::new();
    for token in spec.split(',') {
        let token = token.trim();
        let (name, descending) = match token.strip_prefix('-') {
            Some(rest) => (rest, true),
            None => (token, false),
        };
        let field = match name {
            "id" => SortField::Id,
            "uid" => SortField::Uid,
            "point_rule_id" => SortField::PointRuleId,
            _ => continue,
        };
        if keys.iter().any(|k| k.field == field) {
            continue;
        }
        keys.push(SortKey { field, descending });
    }
    keys
}

/// Sort rows by the parsed keys, earlier keys taking precedence.
pub fn apply(rows: &mut [Transaction], keys: &[SortKey]) {
    if keys.is_empty() {
        return;
    }
    rows.sort_by(|a, b| {
        for key in keys {
            let ord = match key.field {
                SortField::Id => a.id.cmp(&b.id),
                SortField::Uid => a.uid.cmp(&b.uid),
                SortField::PointRuleId => a.point_rule_id.cmp(&b.point_rule_id),
            };
            let ord = if key.descending { ord.reverse() } else { ord };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    });
}
