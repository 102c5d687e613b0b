//! SQL query builder for record search.
//!
//! Translates a [`RecordFilter`] and [`PageRequest`] into SQL with bound
//! parameters that can be executed against the `business_records` table.
//! User input only ever travels as bound parameters; column names come from
//! [`RecordField`].

use crate::types::{PageRequest, Predicate, RecordField, RecordFilter, fold_case};

use super::super::functions::FOLD_FUNCTION;
use super::super::schema::RECORDS_TABLE;

/// Columns selected for a [`crate::types::BusinessRecord`], in row order.
pub const RECORD_COLUMNS: &str = "id, abn, entity_name, state, postcode, status, \
     effective_from, entity_type, record_updated, created_at";

/// Escape character used in LIKE patterns.
const LIKE_ESCAPE: char = '\\';

/// A fragment of SQL with bound parameters.
#[derive(Debug, Clone)]
pub struct SqlFragment {
    /// The SQL clause.
    pub sql: String,
    /// Bound parameter values.
    pub params: Vec<SqlParam>,
}

/// A bound SQL parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    /// String parameter.
    String(String),
    /// Integer parameter.
    Integer(i64),
}

impl SqlParam {
    /// Creates a string parameter.
    pub fn string(s: impl Into<String>) -> Self {
        SqlParam::String(s.into())
    }

    /// Creates an integer parameter.
    pub fn integer(i: i64) -> Self {
        SqlParam::Integer(i)
    }

    /// Boxes the value for use with rusqlite's dynamic parameter lists.
    pub fn to_boxed(&self) -> Box<dyn rusqlite::ToSql> {
        match self {
            SqlParam::String(s) => Box::new(s.clone()),
            SqlParam::Integer(i) => Box::new(*i),
        }
    }
}

impl SqlFragment {
    /// Creates a new SQL fragment.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Creates a fragment with parameters.
    pub fn with_params(sql: impl Into<String>, params: Vec<SqlParam>) -> Self {
        Self {
            sql: sql.into(),
            params,
        }
    }

    /// Combines with another fragment using AND.
    pub fn and(mut self, other: SqlFragment) -> Self {
        if !self.sql.is_empty() && !other.sql.is_empty() {
            self.sql = format!("({}) AND ({})", self.sql, other.sql);
        } else if !other.sql.is_empty() {
            self.sql = other.sql;
        }
        self.params.extend(other.params);
        self
    }

    /// Combines with another fragment using OR.
    pub fn or(mut self, other: SqlFragment) -> Self {
        if !self.sql.is_empty() && !other.sql.is_empty() {
            self.sql = format!("({}) OR ({})", self.sql, other.sql);
        } else if !other.sql.is_empty() {
            self.sql = other.sql;
        }
        self.params.extend(other.params);
        self
    }

    /// Returns true if this fragment is empty.
    pub fn is_empty(&self) -> bool {
        self.sql.is_empty()
    }

    /// Boxes every parameter, in placeholder order.
    pub fn boxed_params(&self) -> Vec<Box<dyn rusqlite::ToSql>> {
        self.params.iter().map(SqlParam::to_boxed).collect()
    }
}

/// Escapes LIKE wildcards so the term matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if c == '%' || c == '_' || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// Builds SQL queries from record filters.
pub struct QueryBuilder<'a> {
    filter: &'a RecordFilter,
}

impl<'a> QueryBuilder<'a> {
    /// Creates a new query builder.
    pub fn new(filter: &'a RecordFilter) -> Self {
        Self { filter }
    }

    /// Builds the WHERE condition: every predicate ANDed together.
    ///
    /// Placeholders are numbered from `?1`. Returns an empty fragment when the
    /// filter has no predicates.
    pub fn build_condition(&self) -> SqlFragment {
        let mut combined = SqlFragment::new("");
        for predicate in self.filter.predicates() {
            let condition = Self::build_predicate(&predicate, combined.params.len());
            combined = combined.and(condition);
        }
        combined
    }

    /// Builds the SQL for one predicate.
    ///
    /// `param_offset` is the number of placeholders already used before this
    /// fragment, so its first placeholder is `?(param_offset + 1)`.
    fn build_predicate(predicate: &Predicate, param_offset: usize) -> SqlFragment {
        match predicate {
            Predicate::AnyContains { fields, term } => {
                let mut combined = SqlFragment::new("");
                for field in fields {
                    let used = combined.params.len();
                    let condition = Self::build_like(*field, term, param_offset + used);
                    combined = combined.or(condition);
                }
                combined
            }
            Predicate::OneOf { field, values } => {
                let placeholders: Vec<String> = (1..=values.len())
                    .map(|i| format!("?{}", param_offset + i))
                    .collect();
                SqlFragment::with_params(
                    format!("{} IN ({})", field.column(), placeholders.join(", ")),
                    values.iter().map(SqlParam::string).collect(),
                )
            }
            Predicate::Contains { field, term } => Self::build_like(*field, term, param_offset),
            Predicate::Equals { field, value } => SqlFragment::with_params(
                format!("{} = ?{}", field.column(), param_offset + 1),
                vec![SqlParam::string(value)],
            ),
            Predicate::Range { field, start, end } => {
                let mut fragment = SqlFragment::new("");
                if let Some(start) = start {
                    fragment = fragment.and(SqlFragment::with_params(
                        format!("{} >= ?{}", field.column(), param_offset + 1),
                        vec![SqlParam::string(start)],
                    ));
                }
                if let Some(end) = end {
                    let used = fragment.params.len();
                    fragment = fragment.and(SqlFragment::with_params(
                        format!("{} <= ?{}", field.column(), param_offset + used + 1),
                        vec![SqlParam::string(end)],
                    ));
                }
                fragment
            }
        }
    }

    /// Case-insensitive literal substring match.
    ///
    /// Both sides go through [`fold_case`], the column via [`FOLD_FUNCTION`].
    /// SQLite's own LIKE folds ASCII only.
    fn build_like(field: RecordField, term: &str, param_offset: usize) -> SqlFragment {
        SqlFragment::with_params(
            format!(
                "{}({}) LIKE ?{} ESCAPE '{}'",
                FOLD_FUNCTION,
                field.column(),
                param_offset + 1,
                LIKE_ESCAPE
            ),
            vec![SqlParam::string(format!(
                "%{}%",
                escape_like(&fold_case(term))
            ))],
        )
    }

    /// Builds the page query: matching rows, ordered, limited and offset.
    pub fn build_select(&self, page: &PageRequest) -> SqlFragment {
        let condition = self.build_condition();
        let sql = format!(
            "SELECT {} FROM {}{} {} {}",
            RECORD_COLUMNS,
            RECORDS_TABLE,
            where_clause(&condition),
            Self::build_order_by(page),
            Self::build_limit(page)
        );
        SqlFragment::with_params(sql, condition.params)
    }

    /// Builds the count query over the whole filtered set.
    pub fn build_count(&self) -> SqlFragment {
        let condition = self.build_condition();
        let sql = format!(
            "SELECT COUNT(*) FROM {}{}",
            RECORDS_TABLE,
            where_clause(&condition)
        );
        SqlFragment::with_params(sql, condition.params)
    }

    /// Builds an ORDER BY clause.
    ///
    /// The requested field is followed by an `id ASC` tie-breaker for stable
    /// pagination. Without a sort field rows are ordered newest first.
    pub fn build_order_by(page: &PageRequest) -> String {
        match page.sort_field {
            None => "ORDER BY created_at DESC, id DESC".to_string(),
            Some(RecordField::Id) => format!("ORDER BY id {}", page.sort_direction.as_sql()),
            Some(field) => format!(
                "ORDER BY {} {}, id ASC",
                field.column(),
                page.sort_direction.as_sql()
            ),
        }
    }

    /// Builds a LIMIT clause.
    pub fn build_limit(page: &PageRequest) -> String {
        format!("LIMIT {} OFFSET {}", page.limit, page.offset())
    }
}

fn where_clause(condition: &SqlFragment) -> String {
    if condition.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", condition.sql)
    }
}
