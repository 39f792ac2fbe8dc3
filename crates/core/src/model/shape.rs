use serde::{Deserialize, Serialize};

/// Geometry of a colorable shape, as reported by the presentation layer.
///
/// Round shapes fill with a circular sweep, rectangular ones with a
/// left-to-right proportional fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Circle,
    Rectangle,
}
