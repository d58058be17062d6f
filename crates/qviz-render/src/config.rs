//! Diagram geometry.

use qviz_ir::Circuit;
use serde::{Deserialize, Serialize};

/// Fixed geometry constants, in surface units.
///
/// Missing fields deserialize to their defaults, so a configuration file
/// only needs to name the values it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Margin around the diagram; also the y of the first wire.
    pub padding: f64,
    /// Vertical distance between adjacent wires.
    pub wire_spacing: f64,
    /// Side of a gate box.
    pub gate_size: f64,
    /// Horizontal gap between columns.
    pub gate_gap: f64,
    /// Space between the left padding and the first column, for wire labels.
    pub label_gutter: f64,
    /// x of the wire labels.
    pub label_x: f64,
    /// Offset from a wire to the baseline of text drawn on it.
    pub text_baseline: f64,
    /// Offset from the left edge of a gate box to its label.
    pub label_inset: f64,
    /// Radius of a control dot.
    pub control_radius: f64,
    /// Distance between the two strokes of a classical wire.
    pub classical_offset: f64,
    /// Most wire rows (qubit plus classical) a layout will draw.
    pub max_rows: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: 40.0,
            wire_spacing: 60.0,
            gate_size: 40.0,
            gate_gap: 20.0,
            label_gutter: 50.0,
            label_x: 10.0,
            text_baseline: 5.0,
            label_inset: 5.0,
            control_radius: 5.0,
            classical_offset: 3.0,
            max_rows: 4096,
        }
    }
}

impl LayoutConfig {
    /// x of the first operation column.
    pub fn first_column_x(&self) -> f64 {
        self.padding + self.label_gutter
    }

    /// Distance between consecutive columns.
    pub fn column_pitch(&self) -> f64 {
        self.gate_size + self.gate_gap
    }

    /// y of a global row. Classical rows come after all qubit rows.
    pub fn row_y(&self, row: u32) -> f64 {
        self.padding + f64::from(row) * self.wire_spacing
    }

    /// Radius of the measurement glyph.
    pub fn measure_radius(&self) -> f64 {
        self.gate_size / 3.0
    }

    /// Smallest surface size that shows every wire and every column.
    pub fn preferred_size(&self, circuit: &Circuit) -> (f64, f64) {
        let columns = circuit.num_ops() as f64;
        let width = self.first_column_x() + columns * self.column_pitch() + self.padding;

        let rows = circuit.num_qubits() + circuit.num_clbits();
        let height = match rows {
            0 => 2.0 * self.padding,
            n => 2.0 * self.padding + (n - 1) as f64 * self.wire_spacing,
        };

        (width, height)
    }
}
