//! Filter expressions such as `y==sin(x)` or `delta<=0.01`, applied to
//! grouped results before they are split into coordinates.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::error::{Error, Result};
use crate::group::GroupedResults;
use crate::model::BenchResult;
use crate::value::Value;

/// Comparison operator of a filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl Comparison {
    /// Longest tokens first so `<=` is not read as `<`.
    const TOKENS: [(&'static str, Comparison); 6] = [
        ("==", Comparison::Eq),
        ("!=", Comparison::Ne),
        ("<=", Comparison::Le),
        (">=", Comparison::Ge),
        ("<", Comparison::Lt),
        (">", Comparison::Gt),
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::Eq => "==",
            Comparison::Ne => "!=",
            Comparison::Lt => "<",
            Comparison::Gt => ">",
            Comparison::Le => "<=",
            Comparison::Ge => ">=",
        }
    }

    fn is_equality(&self) -> bool {
        matches!(self, Comparison::Eq | Comparison::Ne)
    }

    fn holds(&self, ord: Ordering) -> bool {
        match self {
            Comparison::Eq => ord == Ordering::Equal,
            Comparison::Ne => ord != Ordering::Equal,
            Comparison::Lt => ord == Ordering::Less,
            Comparison::Gt => ord == Ordering::Greater,
            Comparison::Le => ord != Ordering::Greater,
            Comparison::Ge => ord != Ordering::Less,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed `name<op>value` expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    pub name: String,
    pub op: Comparison,
    pub value: Value,
    expr: String,
}

impl FromStr for Filter {
    type Err = Error;

    fn from_str(expr: &str) -> Result<Self> {
        let invalid = |reason| Error::InvalidFilter {
            expr: expr.to_string(),
            reason,
        };

        let (pos, token, op) = expr
            .char_indices()
            .find_map(|(i, _)| {
                Comparison::TOKENS
                    .iter()
                    .find(|(token, _)| expr[i..].starts_with(token))
                    .map(|(token, op)| (i, *token, *op))
            })
            .ok_or_else(|| invalid("no comparison operator"))?;

        let name = expr[..pos].trim();
        if name.is_empty() {
            return Err(invalid("missing input name"));
        }

        Ok(Filter {
            name: name.to_string(),
            op,
            value: Value::infer(expr[pos + token.len()..].trim()),
            expr: expr.to_string(),
        })
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.expr)
    }
}

impl Filter {
    /// Whether `result` satisfies this filter.
    pub fn matches(&self, result: &BenchResult) -> Result<bool> {
        let param = result
            .parameter(&self.name)
            .ok_or_else(|| Error::UnknownInput(self.name.clone()))?;
        let ord = self.compare(&param.value)?;
        Ok(self.op.holds(ord))
    }

    fn compare(&self, left: &Value) -> Result<Ordering> {
        let mismatch = || Error::FilterMismatch {
            expr: self.expr.clone(),
            left: left.kind(),
            right: self.value.kind(),
        };

        match (left, &self.value) {
            (Value::Bool(a), Value::Bool(b)) if self.op.is_equality() => Ok(a.cmp(b)),
            (Value::String(a), Value::String(b)) if self.op.is_equality() => Ok(a.cmp(b)),
            (Value::Bool(_), _) | (Value::String(_), _) => Err(mismatch()),
            (_, Value::Bool(_)) | (_, Value::String(_)) => Err(mismatch()),
            (Value::Int(a), Value::Int(b)) => Ok(a.cmp(b)),
            (a, b) => {
                let (a, b) = (a.as_f64()?, b.as_f64()?);
                a.partial_cmp(&b).ok_or_else(mismatch)
            }
        }
    }
}

/// Keep only the results matching every filter; groups left empty are dropped.
pub fn filter_results(grouped: GroupedResults, filters: &[Filter]) -> Result<GroupedResults> {
    if filters.is_empty() {
        return Ok(grouped);
    }

    let mut filtered = GroupedResults::new();
    for (key, results) in grouped {
        let mut kept = Vec::with_capacity(results.len());
        for result in results {
            if all_match(filters, &result)? {
                kept.push(result);
            }
        }
        if !kept.is_empty() {
            filtered.insert(key, kept);
        }
    }
    debug!(filters = filters.len(), groups = filtered.len(), "filtered results");
    Ok(filtered)
}

fn all_match(filters: &[Filter], result: &BenchResult) -> Result<bool> {
    for filter in filters {
        let matched = filter
            .matches(result)
            .map_err(|e| e.context(format!("error applying filter '{filter}'")))?;
        if !matched {
            return Ok(false);
        }
    }
    Ok(true)
}
