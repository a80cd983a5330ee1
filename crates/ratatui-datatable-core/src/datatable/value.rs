//! Cell values and their sort order.

use std::cmp::Ordering;
use std::fmt;

/// A value extracted from a row by a column accessor.
///
/// Values are what the table sorts on and what it shows when a column has no cell renderer.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CellValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl CellValue {
    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Total order used for sorting.
    ///
    /// Booleans sort before numbers, numbers before text, and `Null` after everything. `Int` and
    /// `Float` compare numerically with each other; floats use IEEE total ordering so NaN has a
    /// stable position.
    pub fn sort_cmp(&self, other: &CellValue) -> Ordering {
        use CellValue::*;
        match (self, other) {
            (Bool(a), Bool(b)) => a.cmp(b),
            (Int(a), Int(b)) => a.cmp(b),
            (Float(a), Float(b)) => a.total_cmp(b),
            (Int(a), Float(b)) => (*a as f64).total_cmp(b),
            (Float(a), Int(b)) => a.total_cmp(&(*b as f64)),
            (Text(a), Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            CellValue::Bool(_) => 0,
            CellValue::Int(_) | CellValue::Float(_) => 1,
            CellValue::Text(_) => 2,
            CellValue::Null => 3,
        }
    }
}

/// `Null` renders as an empty string; the table substitutes its own placeholder.
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Int(i) => write!(f, "{i}"),
            CellValue::Float(x) => write!(f, "{x}"),
            CellValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for CellValue {
    fn from(v: bool) -> Self {
        CellValue::Bool(v)
    }
}

macro_rules! int_value {
    ($($t:ty),*) => {
        $(impl From<$t> for CellValue {
            fn from(v: $t) -> Self {
                CellValue::Int(v as i64)
            }
        })*
    };
}

int_value!(i8, i16, i32, i64, u8, u16, u32, isize);

impl From<u64> for CellValue {
    fn from(v: u64) -> Self {
        i64::try_from(v)
            .map(CellValue::Int)
            .unwrap_or(CellValue::Float(v as f64))
    }
}

impl From<usize> for CellValue {
    fn from(v: usize) -> Self {
        CellValue::from(v as u64)
    }
}

impl From<f32> for CellValue {
    fn from(v: f32) -> Self {
        CellValue::Float(v as f64)
    }
}

impl From<f64> for CellValue {
    fn from(v: f64) -> Self {
        CellValue::Float(v)
    }
}

impl From<String> for CellValue {
    fn from(v: String) -> Self {
        CellValue::Text(v)
    }
}

impl From<&str> for CellValue {
    fn from(v: &str) -> Self {
        CellValue::Text(v.to_string())
    }
}

impl From<&String> for CellValue {
    fn from(v: &String) -> Self {
        CellValue::Text(v.clone())
    }
}

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(CellValue::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_across_variants() {
        assert_eq!(CellValue::Int(2).sort_cmp(&CellValue::Float(1.5)), Ordering::Greater);
        assert_eq!(CellValue::Float(2.0).sort_cmp(&CellValue::Int(2)), Ordering::Equal);
    }

    #[test]
    fn null_sorts_last() {
        let mut v = vec![
            CellValue::Null,
            CellValue::from("b"),
            CellValue::Int(3),
            CellValue::Bool(true),
        ];
        v.sort_by(CellValue::sort_cmp);
        assert_eq!(
            v,
            vec![
                CellValue::Bool(true),
                CellValue::Int(3),
                CellValue::from("b"),
                CellValue::Null,
            ]
        );
    }

    #[test]
    fn option_maps_none_to_null() {
        assert!(CellValue::from(None::<i32>).is_null());
        assert_eq!(CellValue::from(Some("x")), CellValue::Text("x".into()));
        assert_eq!(CellValue::Null.to_string(), "");
    }
}
