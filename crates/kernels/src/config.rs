//! Transform configuration enums shared by every execution path.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Inverse,
}

impl Direction {
    /// Internal sign constant: forward is `1`, inverse is `-1`.
    pub fn sign(&self) -> i32 {
        match self {
            Direction::Forward => 1,
            Direction::Inverse => -1,
        }
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Direction::Forward => "fwd",
            Direction::Inverse => "inv",
        }
    }

    pub fn flipped(&self) -> Self {
        match self {
            Direction::Forward => Direction::Inverse,
            Direction::Inverse => Direction::Forward,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    DoubleComplex,
    SingleComplex,
}

impl ElementType {
    /// Resolves the element type from a `realType` option value.
    pub fn from_real_type(real_type: Option<&str>) -> Self {
        match real_type {
            Some("float") => ElementType::SingleComplex,
            _ => ElementType::DoubleComplex,
        }
    }

    /// Single-letter prefix used in canonical names.
    pub fn type_tag(&self) -> char {
        match self {
            ElementType::DoubleComplex => 'z',
            ElementType::SingleComplex => 'c',
        }
    }

    /// C spelling of the underlying real component.
    pub fn real_ctype(&self) -> &'static str {
        match self {
            ElementType::DoubleComplex => "double",
            ElementType::SingleComplex => "float",
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementType::DoubleComplex => f.write_str("complex128"),
            ElementType::SingleComplex => f.write_str("complex64"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Layout {
    #[default]
    RowMajor,
    ColumnMajor,
}

impl Layout {
    pub fn from_column_major(column_major: bool) -> Self {
        if column_major {
            Layout::ColumnMajor
        } else {
            Layout::RowMajor
        }
    }

    pub fn is_column_major(&self) -> bool {
        matches!(self, Layout::ColumnMajor)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetBackend {
    #[default]
    Cpu,
    Gpu,
}

impl TargetBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetBackend::Cpu => "cpu",
            TargetBackend::Gpu => "gpu",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn real_type_selects_precision() {
        assert_eq!(
            ElementType::from_real_type(Some("float")),
            ElementType::SingleComplex
        );
        assert_eq!(
            ElementType::from_real_type(Some("double")),
            ElementType::DoubleComplex
        );
        assert_eq!(ElementType::from_real_type(None), ElementType::DoubleComplex);
    }

    #[test]
    fn direction_signs_are_opposite() {
        assert_eq!(Direction::Forward.sign(), -Direction::Inverse.sign());
        assert_eq!(Direction::Forward.flipped(), Direction::Inverse);
    }
}
