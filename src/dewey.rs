use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// Hierarchical position of a node: the root is `1`, its second child `1.2`,
/// the first child of that `1.2.1`, and so on.
///
/// Ordering is component-wise, which is the document order of the nodes.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeweyId(Vec<u32>);

#[derive(Debug, Error, PartialEq)]
pub enum DeweyIdError {
    #[error("empty dewey id")]
    Empty,
    #[error("invalid dewey component {0:?}")]
    InvalidComponent(String),
}

impl DeweyId {
    pub fn root() -> DeweyId {
        DeweyId(vec![1])
    }

    /// Id of the `ordinal`-th (1-based) child of this node.
    pub fn child(&self, ordinal: u32) -> DeweyId {
        debug_assert!(ordinal > 0, "dewey ordinals are 1-based");
        let mut components = Vec::with_capacity(self.0.len() + 1);
        components.extend_from_slice(&self.0);
        components.push(ordinal);
        DeweyId(components)
    }

    pub fn parent(&self) -> Option<DeweyId> {
        match self.0.len() {
            0 | 1 => None,
            n => Some(DeweyId(self.0[..n - 1].to_vec())),
        }
    }

    /// Number of components; the root has depth 1.
    pub fn depth(&self) -> usize {
        self.0.len()
    }

    /// Position among the siblings.
    pub fn ordinal(&self) -> u32 {
        self.0.last().copied().unwrap_or(0)
    }

    pub fn components(&self) -> &[u32] {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == [1]
    }

    /// Strict ancestry: a node is not its own ancestor.
    pub fn is_ancestor_of(&self, other: &DeweyId) -> bool {
        self.0.len() < other.0.len() && other.0.starts_with(&self.0)
    }
}

impl Display for DeweyId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        let mut components = self.0.iter();
        if let Some(first) = components.next() {
            write!(f, "{}", first)?;
        }
        for component in components {
            write!(f, ".{}", component)?;
        }
        Ok(())
    }
}

impl FromStr for DeweyId {
    type Err = DeweyIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(DeweyIdError::Empty);
        }
        s.split('.')
            .map(|component| match component.parse::<u32>() {
                Ok(ordinal) if !component.starts_with(['+', '0']) => Ok(ordinal),
                _ => Err(DeweyIdError::InvalidComponent(component.to_string())),
            })
            .collect::<Result<Vec<u32>, _>>()
            .map(DeweyId)
    }
}

impl PartialEq<str> for DeweyId {
    fn eq(&self, other: &str) -> bool {
        self.to_string() == other
    }
}

impl PartialEq<&str> for DeweyId {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_and_parse() {
        let id = DeweyId::root().child(2).child(1);
        assert_eq!("1.2.1", id.to_string());
        assert_eq!(id, "1.2.1".parse::<DeweyId>().unwrap());
        assert_eq!(id, "1.2.1");
        assert_eq!("1.10.2", "1.10.2".parse::<DeweyId>().unwrap().to_string());
    }

    #[test]
    fn rejects_malformed() {
        assert_eq!(Err(DeweyIdError::Empty), "".parse::<DeweyId>());
        for bad in ["1..2", "0", "1.0", "a.1", "1.", "-1", "+1", "1.01", "01", "1.007"] {
            assert!(bad.parse::<DeweyId>().is_err(), "{} should not parse", bad);
        }
    }

    #[test]
    fn ancestry() {
        let root = DeweyId::root();
        let child = root.child(3);
        let grandchild = child.child(1);
        assert!(root.is_ancestor_of(&grandchild));
        assert!(child.is_ancestor_of(&grandchild));
        assert!(!grandchild.is_ancestor_of(&child));
        assert!(!child.is_ancestor_of(&child));
        assert_eq!(Some(child.clone()), grandchild.parent());
        assert_eq!(None, root.parent());
        assert_eq!(3, grandchild.depth());
        assert_eq!(3, child.ordinal());
        assert!(root.is_root());
    }

    #[test]
    fn document_order() {
        let mut ids: Vec<DeweyId> = ["1.10", "1.2.1", "1", "1.2", "1.1"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        ids.sort();
        let sorted: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
        assert_eq!(vec!["1", "1.1", "1.2", "1.2.1", "1.10"], sorted);
    }
}
