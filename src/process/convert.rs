use crate::process::raw_table::Cell;
use crate::process::utils;
use serde::Serialize;
use std::fmt;
use std::ops::{Add, AddAssign};
use tracing::debug;

/// An issue count. Integer unless a floating point value took part in it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Count {
    Int(i64),
    Float(f64),
}

impl Count {
    pub const ZERO: Count = Count::Int(0);

    pub fn is_float(&self) -> bool {
        matches!(self, Count::Float(_))
    }

    pub fn as_f64(&self) -> f64 {
        match *self {
            Count::Int(i) => i as f64,
            Count::Float(f) => f,
        }
    }

    pub fn to_float(self) -> Count {
        Count::Float(self.as_f64())
    }
}

impl Default for Count {
    fn default() -> Self {
        Count::ZERO
    }
}

impl Add for Count {
    type Output = Count;

    fn add(self, rhs: Count) -> Count {
        match (self, rhs) {
            (Count::Int(a), Count::Int(b)) => a
                .checked_add(b)
                .map_or_else(|| Count::Float(a as f64 + b as f64), Count::Int),
            (a, b) => Count::Float(a.as_f64() + b.as_f64()),
        }
    }
}

impl AddAssign for Count {
    fn add_assign(&mut self, rhs: Count) {
        *self = *self + rhs;
    }
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Count::Int(i) => write!(f, "{}", i),
            Count::Float(v) => f.write_str(&utils::format_float(v)),
        }
    }
}

/// Countable value of a cell. Missing cells and non-numeric text count as nothing.
pub fn cell_to_count(cell: &Cell) -> Option<Count> {
    match cell {
        Cell::Missing => None,
        Cell::Int(i) => Some(Count::Int(*i)),
        Cell::Float(f) if f.is_finite() => Some(Count::Float(*f)),
        Cell::Float(_) => None,
        Cell::Text(s) => match utils::infer_cell(s) {
            Cell::Int(i) => Some(Count::Int(i)),
            Cell::Float(f) => Some(Count::Float(f)),
            _ => {
                debug!(value = %s, "skipping non-numeric cell");
                None
            }
        },
    }
}

/// Promote a whole column to floats if any of its values is a float.
pub fn unify_column(values: &mut [Count]) {
    if values.iter().any(Count::is_float) {
        for v in values.iter_mut() {
            *v = v.to_float();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_sums_stay_integral() {
        assert_eq!(Count::Int(2) + Count::Int(3), Count::Int(5));
        assert_eq!(Count::Int(2) + Count::Float(0.5), Count::Float(2.5));
    }

    #[test]
    fn integer_overflow_falls_back_to_float() {
        let sum = Count::Int(i64::MAX) + Count::Int(1);
        assert_eq!(sum, Count::Float(i64::MAX as f64 + 1.0));

        let mut acc = Count::Int(i64::MIN);
        acc += Count::Int(-1);
        assert!(acc.is_float());
    }

    #[test]
    fn cells_convert_to_counts() {
        assert_eq!(cell_to_count(&Cell::Int(4)), Some(Count::Int(4)));
        assert_eq!(cell_to_count(&Cell::Missing), None);
        assert_eq!(cell_to_count(&Cell::Text(" 3 ".into())), Some(Count::Int(3)));
        assert_eq!(cell_to_count(&Cell::Text("blocked".into())), None);
        assert_eq!(cell_to_count(&Cell::Float(f64::NAN)), None);
        assert_eq!(cell_to_count(&Cell::Text("inf".into())), None);
    }

    #[test]
    fn float_anywhere_promotes_the_column() {
        let mut col = vec![Count::Int(1), Count::Float(1.5), Count::Int(0)];
        unify_column(&mut col);
        assert_eq!(
            col,
            vec![Count::Float(1.0), Count::Float(1.5), Count::Float(0.0)]
        );
        assert_eq!(col[0].to_string(), "1.0");

        let mut ints = vec![Count::Int(1), Count::Int(2)];
        unify_column(&mut ints);
        assert_eq!(ints, vec![Count::Int(1), Count::Int(2)]);
    }
}
