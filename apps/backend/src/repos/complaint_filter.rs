//! Dynamic WHERE-clause construction for complaint listings.
//!
//! Predicates and their bound values are appended as pairs into one ordered
//! list; placeholder indices are rendered only at the end, from list
//! position, so numbering and values cannot drift apart no matter which
//! subset of filters a request supplies. Caller-supplied values never appear
//! in the query text.

use sea_orm::Value;
use serde::Deserialize;

/// Marker replaced with a 1-based `$N` placeholder when the clause renders.
const PLACEHOLDER: &str = "$?";

/// An ordered set of SQL predicate fragments with their bound values.
///
/// Each fragment contains exactly one [`PLACEHOLDER`] marker.
#[derive(Debug, Default)]
pub struct PredicateSet {
    fragments: Vec<&'static str>,
    values: Vec<Value>,
}

impl PredicateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a predicate fragment and the value bound to its placeholder.
    pub fn push(&mut self, fragment: &'static str, value: impl Into<Value>) {
        debug_assert_eq!(fragment.matches(PLACEHOLDER).count(), 1);
        self.fragments.push(fragment);
        self.values.push(value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Render `" WHERE a = $1 AND b = $2"`, or an empty string when no
    /// predicate was appended. Placeholder numbers come from fragment
    /// position, assigned here in one pass.
    pub fn where_clause(&self) -> String {
        if self.fragments.is_empty() {
            return String::new();
        }

        let rendered: Vec<String> = self
            .fragments
            .iter()
            .enumerate()
            .map(|(i, fragment)| fragment.replace(PLACEHOLDER, &format!("${}", i + 1)))
            .collect();

        format!(" WHERE {}", rendered.join(" AND "))
    }

    /// The bound values, in the same order the placeholders were numbered.
    pub fn into_values(self) -> Vec<Value> {
        self.values
    }
}

/// Optional filters accepted by the complaint listing endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplaintFilter {
    pub district: Option<String>,
    pub category: Option<i32>,
    pub status: Option<String>,
    #[serde(rename = "userid")]
    pub user_id: Option<i64>,
}

const BASE_SELECT: &str = "SELECT \
    c.id, c.user_id, c.title, c.description, \
    COALESCE(c.category_id, 0) AS category_id, \
    COALESCE(c.status, 'pending') AS status, \
    c.created_at, c.updated_at, c.evidence, \
    ST_AsText(c.location) AS location, \
    COALESCE(ST_X(c.location::geometry), 0) AS longitude, \
    COALESCE(ST_Y(c.location::geometry), 0) AS latitude, \
    c.is_public \
    FROM complaints c";

const DISTRICT_JOIN: &str =
    " JOIN admin_boundaries b ON ST_Intersects(b.geom, c.location::geometry)";

impl ComplaintFilter {
    /// Treat empty query-string values (`?district=`) the same as absent ones.
    pub fn normalized(mut self) -> Self {
        if self.district.as_deref() == Some("") {
            self.district = None;
        }
        if self.status.as_deref() == Some("") {
            self.status = None;
        }
        self
    }

    /// Build the listing query and its ordered argument list.
    ///
    /// The district filter joins the administrative boundary table on
    /// geometric containment and must be appended before the other filters;
    /// status, user id and category follow in that order.
    pub fn build_query(&self) -> (String, Vec<Value>) {
        let mut sql = String::from(BASE_SELECT);
        let mut predicates = PredicateSet::new();

        if let Some(district) = &self.district {
            sql.push_str(DISTRICT_JOIN);
            predicates.push("b.name_2 = $?", district.clone());
        }

        if let Some(status) = &self.status {
            predicates.push("c.status = $?", status.clone());
        }

        if let Some(user_id) = self.user_id {
            predicates.push("c.user_id = $?", user_id);
        }

        if let Some(category) = self.category {
            predicates.push("c.category_id = $?", category);
        }

        sql.push_str(&predicates.where_clause());
        sql.push_str(" ORDER BY c.created_at DESC");

        (sql, predicates.into_values())
    }
}
