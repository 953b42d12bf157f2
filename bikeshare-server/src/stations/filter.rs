//! Numeric filter predicates over station records.
//!
//! An expression is a comparison against an integer, written the way it
//! appears in a query string:
//!
//! | expression | meaning      |
//! |------------|--------------|
//! | `<=N`      | field ≤ N    |
//! | `<N`       | field < N    |
//! | `>=N`      | field ≥ N    |
//! | `>N`       | field > N    |
//! | `N`        | field == N   |
//!
//! Prefixes are tried in that order, so `<=5` is never read as `<` `=5`.

use std::fmt;

use crate::domain::StationRecord;

/// Errors from compiling a filter. Both are caller input errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    /// Field is not an integer field of a station record
    #[error("unknown filter field: {field}")]
    UnknownField { field: String },

    /// Expression does not match the grammar
    #[error("invalid filter expression for {field}: {expression:?}")]
    InvalidExpression { field: String, expression: String },
}

/// Integer fields of `StationRecord` that can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Capacity,
    IsInstalled,
    IsRenting,
    IsReturning,
    NumBikesAvailable,
    NumDocksAvailable,
}

impl FilterField {
    pub const ALL: [FilterField; 6] = [
        FilterField::Capacity,
        FilterField::IsInstalled,
        FilterField::IsRenting,
        FilterField::IsReturning,
        FilterField::NumBikesAvailable,
        FilterField::NumDocksAvailable,
    ];

    /// Field name as it appears in records and query strings.
    pub fn name(self) -> &'static str {
        match self {
            FilterField::Capacity => "capacity",
            FilterField::IsInstalled => "is_installed",
            FilterField::IsRenting => "is_renting",
            FilterField::IsReturning => "is_returning",
            FilterField::NumBikesAvailable => "num_bikes_available",
            FilterField::NumDocksAvailable => "num_docks_available",
        }
    }

    /// Look up a field by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    fn extractor(self) -> fn(&StationRecord) -> i64 {
        match self {
            FilterField::Capacity => |r: &StationRecord| i64::from(r.capacity),
            FilterField::IsInstalled => |r: &StationRecord| i64::from(r.is_installed),
            FilterField::IsRenting => |r: &StationRecord| i64::from(r.is_renting),
            FilterField::IsReturning => |r: &StationRecord| i64::from(r.is_returning),
            FilterField::NumBikesAvailable => |r: &StationRecord| i64::from(r.num_bikes_available),
            FilterField::NumDocksAvailable => |r: &StationRecord| i64::from(r.num_docks_available),
        }
    }

    /// Read this field from a record.
    pub fn get(self, record: &StationRecord) -> i64 {
        (self.extractor())(record)
    }
}

impl fmt::Display for FilterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Comparison operator of a predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
}

impl Comparison {
    fn holds(self, value: i64, operand: i64) -> bool {
        match self {
            Comparison::Lt => value < operand,
            Comparison::Le => value <= operand,
            Comparison::Gt => value > operand,
            Comparison::Ge => value >= operand,
            Comparison::Eq => value == operand,
        }
    }

    fn symbol(self) -> &'static str {
        match self {
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
            Comparison::Eq => "==",
        }
    }
}

/// Operator prefixes, longest first where they share a character.
const PREFIXES: [(&str, Comparison); 4] = [
    ("<=", Comparison::Le),
    ("<", Comparison::Lt),
    (">=", Comparison::Ge),
    (">", Comparison::Gt),
];

/// A compiled comparison of one record field against a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Predicate {
    pub field: FilterField,
    pub comparison: Comparison,
    pub operand: i64,
}

impl Predicate {
    /// Parse an expression for an already-resolved field.
    pub fn parse(field: FilterField, expression: &str) -> Result<Self, FilterError> {
        let (comparison, number) = PREFIXES
            .iter()
            .find_map(|(prefix, cmp)| expression.strip_prefix(prefix).map(|rest| (*cmp, rest)))
            .unwrap_or((Comparison::Eq, expression));

        let operand = number
            .parse::<i64>()
            .map_err(|_| FilterError::InvalidExpression {
                field: field.name().to_string(),
                expression: expression.to_string(),
            })?;

        Ok(Self {
            field,
            comparison,
            operand,
        })
    }

    /// Whether the record satisfies this predicate.
    pub fn matches(&self, record: &StationRecord) -> bool {
        self.comparison.holds(self.field.get(record), self.operand)
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.comparison.symbol(), self.operand)
    }
}

/// Compile `expression` as a predicate on the field called `field`.
pub fn compile_predicate(field: &str, expression: &str) -> Result<Predicate, FilterError> {
    let resolved = FilterField::from_name(field).ok_or_else(|| FilterError::UnknownField {
        field: field.to_string(),
    })?;
    Predicate::parse(resolved, expression)
}

/// Keep the records that satisfy every predicate.
pub fn apply_all(records: Vec<StationRecord>, predicates: &[Predicate]) -> Vec<StationRecord> {
    if predicates.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| predicates.iter().all(|p| p.matches(record)))
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::testing::station_record as record;
    use proptest::prelude::*;

    fn comparison_strategy() -> impl Strategy<Value = (&'static str, fn(i64, i64) -> bool)> {
        prop_oneof![
            Just(("<=", (|a: i64, b: i64| a <= b) as fn(i64, i64) -> bool)),
            Just(("<", (|a: i64, b: i64| a < b) as fn(i64, i64) -> bool)),
            Just((">=", (|a: i64, b: i64| a >= b) as fn(i64, i64) -> bool)),
            Just((">", (|a: i64, b: i64| a > b) as fn(i64, i64) -> bool)),
            Just(("", (|a: i64, b: i64| a == b) as fn(i64, i64) -> bool)),
        ]
    }

    fn records_strategy() -> impl Strategy<Value = Vec<StationRecord>> {
        prop::collection::vec((0u32..30, 0u32..30), 0..20).prop_map(|counts| {
            counts
                .into_iter()
                .enumerate()
                .map(|(i, (bikes, docks))| record(&i.to_string(), bikes, docks))
                .collect()
        })
    }

    proptest! {
        #[test]
        fn predicate_agrees_with_comparison(
            value in 0u32..40,
            operand in -5i64..40,
            (prefix, reference) in comparison_strategy(),
        ) {
            let expr = format!("{prefix}{operand}");
            let p = compile_predicate("num_bikes_available", &expr).unwrap();
            prop_assert_eq!(p.matches(&record("A", value, 0)), reference(value.into(), operand));
        }

        #[test]
        fn conjunction_is_intersection(
            records in records_strategy(),
            bikes in 0i64..30,
            docks in 0i64..30,
        ) {
            let by_bikes = compile_predicate("num_bikes_available", &format!(">={bikes}")).unwrap();
            let by_docks = compile_predicate("num_docks_available", &format!("<{docks}")).unwrap();

            let both = apply_all(records.clone(), &[by_bikes, by_docks]);
            let first = apply_all(records.clone(), &[by_bikes]);
            let second = apply_all(records, &[by_docks]);
            let intersection: Vec<_> = first.into_iter().filter(|r| second.contains(r)).collect();

            prop_assert_eq!(both, intersection);
        }

        #[test]
        fn trailing_garbage_rejected(n in 0i64..1000, junk in "[a-z>< ]{1,3}") {
            let expr = format!(">{n}{junk}");
            prop_assert!(compile_predicate("num_docks_available", &expr).is_err());
        }
    }
}
