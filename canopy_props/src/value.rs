// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The dynamic value model for property bags.

use alloc::string::String;
use alloc::vec::Vec;

/// A property bag as delivered by a host: flat keys to dynamic values.
pub type PropMap = hashbrown::HashMap<String, PropValue>;

/// A dynamically typed property value.
///
/// Hosts hand these over untyped; each known key documents the shape it
/// expects, and anything else falls back to that key's default.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    /// A number. Integral keys (`columns`, `visiblePage`) truncate.
    Number(f64),
    /// A boolean.
    Boolean(bool),
    /// A string, e.g. an alignment such as `"top-left"`.
    Text(String),
    /// A list of numbers, e.g. a position triple or padding quadruple.
    Numbers(Vec<f64>),
    /// Per-child-index values, e.g. alignment or padding overrides.
    Indexed(Vec<(usize, PropValue)>),
}

impl PropValue {
    /// The value as a finite number, if it is one.
    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }

    /// The value as a non-negative integer, if it is one.
    #[must_use]
    pub fn as_index(&self) -> Option<usize> {
        let n = self.as_number()?;
        if n < 0.0 || n.fract() != 0.0 {
            return None;
        }
        #[allow(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "negative and non-integral inputs are rejected first"
        )]
        let index = n as usize;
        Some(index)
    }

    /// The value as a boolean, if it is one.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as a string slice, if it is text.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The value as a fixed-length array of finite numbers.
    #[must_use]
    pub fn as_numbers<const N: usize>(&self) -> Option<[f64; N]> {
        match self {
            Self::Numbers(ns) if ns.len() == N && ns.iter().all(|n| n.is_finite()) => {
                let mut out = [0.0; N];
                out.copy_from_slice(ns);
                Some(out)
            }
            _ => None,
        }
    }

    /// The per-index entries, if the value is indexed.
    #[must_use]
    pub fn as_indexed(&self) -> Option<&[(usize, PropValue)]> {
        match self {
            Self::Indexed(entries) => Some(entries),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PropValue;
    use alloc::vec;

    #[test]
    fn numbers_must_be_finite_and_sized() {
        assert_eq!(PropValue::Number(f64::NAN).as_number(), None);
        assert_eq!(PropValue::Number(2.5).as_index(), None);
        assert_eq!(PropValue::Number(-1.0).as_index(), None);
        assert_eq!(PropValue::Number(3.0).as_index(), Some(3));
        assert_eq!(
            PropValue::Numbers(vec![1.0, 2.0]).as_numbers::<3>(),
            None
        );
        assert_eq!(
            PropValue::Numbers(vec![1.0, 2.0, 3.0]).as_numbers::<3>(),
            Some([1.0, 2.0, 3.0])
        );
    }

    #[test]
    fn accessors_reject_other_shapes() {
        assert_eq!(PropValue::Boolean(true).as_number(), None);
        assert_eq!(PropValue::Number(1.0).as_bool(), None);
        assert_eq!(PropValue::Number(1.0).as_text(), None);
    }
}
