use std::fmt;

use serde::{Deserialize, Serialize};

/// The physical board side a piece of copper, pad or package outline sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Layer {
    Top,
    Bottom,
}

impl Layer {
    /// Parse a bare side name as used by etch subclasses and pad definitions.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "TOP" => Some(Layer::Top),
            "BOTTOM" => Some(Layer::Bottom),
            _ => None,
        }
    }

    /// Parse an assembly subclass such as `ASSEMBLY_TOP`.
    pub fn from_assembly_subclass(subclass: &str) -> Option<Self> {
        subclass
            .strip_prefix("ASSEMBLY_")
            .and_then(Layer::from_name)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Layer::Top => "TOP",
            Layer::Bottom => "BOTTOM",
        }
    }

    pub fn opposite(&self) -> Self {
        match self {
            Layer::Top => Layer::Bottom,
            Layer::Bottom => Layer::Top,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_names() {
        assert_eq!(Layer::from_name("TOP"), Some(Layer::Top));
        assert_eq!(Layer::from_name("BOTTOM"), Some(Layer::Bottom));
        assert_eq!(Layer::from_name("INNER1"), None);
        assert_eq!(Layer::Bottom.to_string(), "BOTTOM");
        assert_eq!(Layer::Top.opposite(), Layer::Bottom);
    }

    #[test]
    fn test_assembly_subclass() {
        assert_eq!(Layer::from_assembly_subclass("ASSEMBLY_TOP"), Some(Layer::Top));
        assert_eq!(
            Layer::from_assembly_subclass("ASSEMBLY_BOTTOM"),
            Some(Layer::Bottom)
        );
        assert_eq!(Layer::from_assembly_subclass("BODY_CENTER"), None);
    }
}
