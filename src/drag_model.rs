use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::BallisticsError;

/// Standard drag curve families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DragModel {
    G1,
    G2,
    G5,
    G6,
    G7,
    G8,
}

impl DragModel {
    pub const ALL: [DragModel; 6] = [
        DragModel::G1,
        DragModel::G2,
        DragModel::G5,
        DragModel::G6,
        DragModel::G7,
        DragModel::G8,
    ];

    /// Integer identifier used by the C interface (the curve number itself).
    pub fn code(self) -> i32 {
        match self {
            DragModel::G1 => 1,
            DragModel::G2 => 2,
            DragModel::G5 => 5,
            DragModel::G6 => 6,
            DragModel::G7 => 7,
            DragModel::G8 => 8,
        }
    }

    pub fn from_code(code: i32) -> Option<Self> {
        DragModel::ALL.into_iter().find(|model| model.code() == code)
    }
}

impl FromStr for DragModel {
    type Err = BallisticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "G1" => Ok(DragModel::G1),
            "G2" => Ok(DragModel::G2),
            "G5" => Ok(DragModel::G5),
            "G6" => Ok(DragModel::G6),
            "G7" => Ok(DragModel::G7),
            "G8" => Ok(DragModel::G8),
            _ => Err(BallisticsError::UnknownDragModel(s.to_string())),
        }
    }
}

impl std::fmt::Display for DragModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_model_from_str() {
        assert_eq!("G1".parse::<DragModel>(), Ok(DragModel::G1));
        assert_eq!("G2".parse::<DragModel>(), Ok(DragModel::G2));
        assert_eq!("G5".parse::<DragModel>(), Ok(DragModel::G5));
        assert_eq!("G6".parse::<DragModel>(), Ok(DragModel::G6));
        assert_eq!("G7".parse::<DragModel>(), Ok(DragModel::G7));
        assert_eq!("G8".parse::<DragModel>(), Ok(DragModel::G8));
    }

    #[test]
    fn test_drag_model_from_str_case_insensitive() {
        assert_eq!("g1".parse::<DragModel>(), Ok(DragModel::G1));
        assert_eq!("g7".parse::<DragModel>(), Ok(DragModel::G7));
        assert_eq!(" g8 ".parse::<DragModel>(), Ok(DragModel::G8));
    }

    #[test]
    fn test_drag_model_from_str_invalid() {
        // G3 is a published family name but has no retardation table
        assert_eq!(
            "G3".parse::<DragModel>(),
            Err(BallisticsError::UnknownDragModel("G3".to_string()))
        );
        assert!("G9".parse::<DragModel>().is_err());
        assert!("GI".parse::<DragModel>().is_err());
        assert!("".parse::<DragModel>().is_err());
        assert!("123".parse::<DragModel>().is_err());
    }

    #[test]
    fn test_drag_model_display() {
        for model in DragModel::ALL {
            let shown = model.to_string();
            assert_eq!(shown.parse::<DragModel>(), Ok(model));
        }
        assert_eq!(format!("{}", DragModel::G7), "G7");
    }

    #[test]
    fn test_drag_model_codes() {
        for model in DragModel::ALL {
            assert_eq!(DragModel::from_code(model.code()), Some(model));
        }
        assert_eq!(DragModel::from_code(7), Some(DragModel::G7));
        assert_eq!(DragModel::from_code(3), None);
        assert_eq!(DragModel::from_code(0), None);
        assert_eq!(DragModel::from_code(-1), None);
    }
}
