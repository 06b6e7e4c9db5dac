//! Draw-order strategies for detected elements.
//!
//! Every strategy assigns an element to exactly one group by its starting edge (top for
//! halves and rows, left for columns). Elements are never split or duplicated.

use crate::segment::DetectedElement;

/// Number of bands used by the row and column strategies.
pub const NUM_BANDS: usize = 5;

/// How elements are grouped before drawing.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ElementDirection {
    /// Top half then bottom half, each left to right.
    #[default]
    Default,
    /// Five horizontal bands, each left to right.
    RowWise,
    /// Five vertical bands, each top to bottom.
    ColumnWise,
}

impl ElementDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::RowWise => "row_wise",
            Self::ColumnWise => "column_wise",
        }
    }
}

impl std::str::FromStr for ElementDirection {
    type Err = crate::SketchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" | "halves" => Ok(Self::Default),
            "row_wise" => Ok(Self::RowWise),
            "column_wise" => Ok(Self::ColumnWise),
            other => Err(crate::SketchError::validation(format!(
                "unknown element direction '{other}'"
            ))),
        }
    }
}

fn band_index(start: u32, extent: u32) -> usize {
    let band = f64::from(extent) / NUM_BANDS as f64;
    if band <= 0.0 {
        return 0;
    }
    ((f64::from(start) / band) as usize).min(NUM_BANDS - 1)
}

/// Split by the vertical midpoint using each element's top edge; each half sorted by left edge.
pub fn organize_by_halves(
    elements: Vec<DetectedElement>,
    image_height: u32,
) -> Vec<Vec<DetectedElement>> {
    let center_y = f64::from(image_height) / 2.0;
    let mut halves: Vec<Vec<DetectedElement>> = vec![Vec::new(), Vec::new()];
    for el in elements {
        let idx = if f64::from(el.top()) < center_y { 0 } else { 1 };
        halves[idx].push(el);
    }
    for half in &mut halves {
        half.sort_by_key(DetectedElement::left);
    }
    halves
}

/// Five horizontal bands keyed by top edge; each band sorted by left edge.
pub fn organize_by_rows(
    elements: Vec<DetectedElement>,
    image_height: u32,
) -> Vec<Vec<DetectedElement>> {
    let mut rows: Vec<Vec<DetectedElement>> = (0..NUM_BANDS).map(|_| Vec::new()).collect();
    for el in elements {
        rows[band_index(el.top(), image_height)].push(el);
    }
    for row in &mut rows {
        row.sort_by_key(DetectedElement::left);
    }
    rows
}

/// Five vertical bands keyed by left edge; each band sorted by top edge.
pub fn organize_by_columns(
    elements: Vec<DetectedElement>,
    image_width: u32,
) -> Vec<Vec<DetectedElement>> {
    let mut cols: Vec<Vec<DetectedElement>> = (0..NUM_BANDS).map(|_| Vec::new()).collect();
    for el in elements {
        cols[band_index(el.left(), image_width)].push(el);
    }
    for col in &mut cols {
        col.sort_by_key(DetectedElement::top);
    }
    cols
}

/// Group with the chosen strategy.
pub fn organize(
    elements: Vec<DetectedElement>,
    image_width: u32,
    image_height: u32,
    direction: ElementDirection,
) -> Vec<Vec<DetectedElement>> {
    match direction {
        ElementDirection::Default => organize_by_halves(elements, image_height),
        ElementDirection::RowWise => organize_by_rows(elements, image_height),
        ElementDirection::ColumnWise => organize_by_columns(elements, image_width),
    }
}

/// Final draw order: groups concatenated in index order.
pub fn ordered_elements(
    elements: Vec<DetectedElement>,
    image_width: u32,
    image_height: u32,
    direction: ElementDirection,
) -> Vec<DetectedElement> {
    organize(elements, image_width, image_height, direction)
        .into_iter()
        .flatten()
        .collect()
}

#[cfg(test)]
#[path = "../tests/unit/order/order.rs"]
mod tests;
