//! Rendering hints for calendar tiles and the cramps pain scale.

use crate::models::{CrampsLevel, DayRecord, FlowLevel};
use serde::{Deserialize, Serialize};

pub const FLOW_COLOR: &str = "rgba(214, 48, 49, 0.85)";
pub const EMPTY_CELL_COLOR: &str = "#e9e4df";
pub const PAIN_SCALE_CELLS: usize = CrampsLevel::MAX as usize;

// Light to dark, one shade per cell.
const PAIN_SHADES: [&str; PAIN_SCALE_CELLS] = [
    "#fde2e1", "#fbc5c3", "#f8a8a5", "#f48b87", "#ef6e69",
    "#e9524c", "#dc3b35", "#c52c27", "#a8211d", "#8a1714",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileVisual {
    pub visible: bool,
    pub diameter_units: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PainCell {
    pub index: usize,
    pub level: u8,
    pub filled: bool,
    pub color: String,
}

pub fn flow_multiplier(level: Option<FlowLevel>) -> u32 {
    match level {
        Some(FlowLevel::Light) | None => 1,
        Some(FlowLevel::Regular) => 3,
        Some(FlowLevel::Heavy) => 6,
    }
}

/// The flow dot drawn on a calendar tile.
pub fn tile_visual(record: &DayRecord, base_unit: u32) -> TileVisual {
    TileVisual {
        visible: record.flow_present,
        diameter_units: base_unit.saturating_mul(flow_multiplier(record.flow_level)),
        color: FLOW_COLOR.to_string(),
    }
}

/// Ten cells, the first `level` of them filled with increasing intensity.
pub fn pain_scale(level: Option<CrampsLevel>) -> Vec<PainCell> {
    let filled_count = level.map(|level| usize::from(level.get())).unwrap_or(0);
    (0..PAIN_SCALE_CELLS)
        .map(|index| {
            let filled = index < filled_count;
            let color = if filled { PAIN_SHADES[index] } else { EMPTY_CELL_COLOR };
            PainCell {
                index,
                level: cramps_level_for_cell(index).map_or(0, CrampsLevel::get),
                filled,
                color: color.to_string(),
            }
        })
        .collect()
}

pub fn pain_scale_for(record: Option<&DayRecord>) -> Vec<PainCell> {
    pain_scale(record.and_then(DayRecord::effective_cramps_level))
}

/// Clicking cell `index` (0-based) selects level `index + 1`.
pub fn cramps_level_for_cell(index: usize) -> Option<CrampsLevel> {
    u8::try_from(index + 1).ok().and_then(|level| CrampsLevel::new(level).ok())
}
