//! Pure layout: circuit to positioned primitives.
//!
//! Layout never touches a surface. It resolves every register reference to
//! its global row first, so a circuit with an unresolvable reference fails
//! here and nothing is drawn.

use std::ops::Range;

use qviz_ir::{Circuit, GateName, IrError, Operation, RegisterRef};
use serde::Serialize;
use tracing::debug;

use crate::config::LayoutConfig;
use crate::error::{RenderError, RenderResult};
use crate::primitive::Primitive;

/// The primitive stream for one circuit on one surface size.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    /// Surface width the layout was computed for.
    pub width: f64,
    /// Surface height the layout was computed for.
    pub height: f64,
    /// Primitives in drawing order, starting with a full clear.
    pub primitives: Vec<Primitive>,
    /// Left x of each operation's column, in operation order.
    pub columns: Vec<f64>,
}

impl Layout {
    /// Number of primitives.
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    /// Whether the layout holds no primitives.
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}

/// Lay out a circuit on a `width` x `height` surface.
///
/// Whole-register operands of `cx` broadcast pairwise: equal widths pair
/// wire by wire, and a single-wire operand pairs with every wire of the
/// other. Each pair draws its own dot, box and connector in the shared
/// column.
///
/// # Errors
///
/// - [`RenderError::TooManyWires`] if the circuit has more rows than
///   [`LayoutConfig::max_rows`].
/// - [`RenderError::UnresolvedRegister`] if any reference cannot be
///   resolved against the circuit's registers.
/// - [`RenderError::MeasureWidthMismatch`] for a measurement whose source
///   and target cover different numbers of wires.
/// - [`RenderError::ControlWidthMismatch`] for a `cx` whose operands cannot
///   be paired.
pub fn compute_layout(
    circuit: &Circuit,
    width: f64,
    height: f64,
    config: &LayoutConfig,
) -> RenderResult<Layout> {
    let rows = circuit.num_qubits() + circuit.num_clbits();
    let too_many = || RenderError::TooManyWires {
        rows,
        limit: config.max_rows,
    };
    if rows > u64::from(config.max_rows) {
        return Err(too_many());
    }

    let mut builder = LayoutBuilder {
        config,
        circuit,
        total_qubits: u32::try_from(circuit.num_qubits()).map_err(|_| too_many())?,
        total_clbits: u32::try_from(circuit.num_clbits()).map_err(|_| too_many())?,
        primitives: vec![Primitive::Clear { width, height }],
    };

    builder.wires(width);

    let mut columns = Vec::with_capacity(circuit.num_ops());
    let mut x = config.first_column_x();
    for operation in circuit.operations() {
        builder.operation(operation, x)?;
        columns.push(x);
        x += config.column_pitch();
    }

    debug!(
        width,
        height,
        qubits = builder.total_qubits,
        clbits = builder.total_clbits,
        columns = columns.len(),
        primitives = builder.primitives.len(),
        "computed layout"
    );

    Ok(Layout {
        width,
        height,
        primitives: builder.primitives,
        columns,
    })
}

struct LayoutBuilder<'a> {
    config: &'a LayoutConfig,
    circuit: &'a Circuit,
    total_qubits: u32,
    total_clbits: u32,
    primitives: Vec<Primitive>,
}

impl LayoutBuilder<'_> {
    fn wires(&mut self, width: f64) {
        let config = self.config;
        let x1 = config.padding;
        let x2 = width - config.padding;

        for i in 0..self.total_qubits {
            let y = config.row_y(i);
            self.line(x1, y, x2, y);
            self.text(config.label_x, y + config.text_baseline, format!("q{i}"));
        }

        for j in 0..self.total_clbits {
            let y = config.row_y(self.total_qubits.saturating_add(j));
            self.line(x1, y, x2, y);
            self.line(x1, y + config.classical_offset, x2, y + config.classical_offset);
            self.text(config.label_x, y + config.text_baseline, format!("c{j}"));
        }
    }

    fn operation(&mut self, operation: &Operation, x: f64) -> RenderResult<()> {
        match operation {
            Operation::Gate {
                gate: GateName::CX,
                targets,
            } if targets.len() == 2 => self.controlled(&targets[0], &targets[1], x),
            Operation::Gate { gate, targets } => {
                for target in targets {
                    for row in self.qubit_rows(target)? {
                        self.gate_box(gate.label(), x, self.config.row_y(row));
                    }
                }
                Ok(())
            }
            Operation::Measure { source, target } => self.measure(source, target, x),
        }
    }

    /// A control dot, a target box and one connector for each
    /// control/target pair.
    fn controlled(&mut self, control: &RegisterRef, target: &RegisterRef, x: f64) -> RenderResult<()> {
        let controls = self.qubit_rows(control)?;
        let targets = self.qubit_rows(target)?;

        let pairs: Vec<(u32, u32)> = match (span(&controls), span(&targets)) {
            (c, t) if c == t => controls.zip(targets).collect(),
            (1, _) => targets.map(|row| (controls.start, row)).collect(),
            (_, 1) => controls.map(|row| (row, targets.start)).collect(),
            (c, t) => {
                return Err(RenderError::ControlWidthMismatch {
                    controls: c,
                    targets: t,
                });
            }
        };

        let mid = x + self.config.gate_size / 2.0;
        for (control_row, target_row) in pairs {
            let control_y = self.config.row_y(control_row);
            let target_y = self.config.row_y(target_row);
            self.primitives.push(Primitive::Circle {
                cx: mid,
                cy: control_y,
                radius: self.config.control_radius,
                filled: true,
            });
            self.gate_box(GateName::CX.label(), x, target_y);
            self.line(mid, control_y.min(target_y), mid, control_y.max(target_y));
        }
        Ok(())
    }

    /// A glyph on each source row, connected down to the matching classical
    /// row.
    fn measure(&mut self, source: &RegisterRef, target: &RegisterRef, x: f64) -> RenderResult<()> {
        let sources = self.qubit_rows(source)?;
        let targets = self.classical_rows(target)?;
        if span(&sources) != span(&targets) {
            return Err(RenderError::MeasureWidthMismatch {
                sources: span(&sources),
                targets: span(&targets),
            });
        }

        let mid = x + self.config.gate_size / 2.0;
        for (source_row, target_row) in sources.zip(targets) {
            let source_y = self.config.row_y(source_row);
            self.primitives.push(Primitive::Circle {
                cx: mid,
                cy: source_y,
                radius: self.config.measure_radius(),
                filled: false,
            });
            self.line(mid, source_y, mid, self.config.row_y(target_row));
        }
        Ok(())
    }

    fn gate_box(&mut self, label: &str, x: f64, y: f64) {
        let size = self.config.gate_size;
        self.primitives.push(Primitive::Rect {
            x,
            y: y - size / 2.0,
            width: size,
            height: size,
        });
        self.text(
            x + self.config.label_inset,
            y + self.config.text_baseline,
            label.to_string(),
        );
    }

    /// Global qubit rows of a reference.
    fn qubit_rows(&self, reference: &RegisterRef) -> RenderResult<Range<u32>> {
        Ok(self.circuit.qubit_wires(reference)?)
    }

    /// Global rows of a classical reference, below all qubit rows.
    fn classical_rows(&self, reference: &RegisterRef) -> RenderResult<Range<u32>> {
        let wires = self.circuit.clbit_wires(reference)?;
        let overflow = || IrError::WireOverflow {
            register: reference.register.clone(),
        };
        let start = self.total_qubits.checked_add(wires.start).ok_or_else(overflow)?;
        let end = self.total_qubits.checked_add(wires.end).ok_or_else(overflow)?;
        Ok(start..end)
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.primitives.push(Primitive::Line { x1, y1, x2, y2 });
    }

    fn text(&mut self, x: f64, y: f64, text: String) {
        self.primitives.push(Primitive::Text { x, y, text });
    }
}

fn span(rows: &Range<u32>) -> u32 {
    rows.end - rows.start
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(circuit: &Circuit) -> Layout {
        compute_layout(circuit, 400.0, 300.0, &LayoutConfig::default()).unwrap()
    }

    fn count(layout: &Layout, pred: impl Fn(&Primitive) -> bool) -> usize {
        layout.primitives.iter().filter(|p| pred(p)).count()
    }

    fn dots(layout: &Layout) -> usize {
        count(layout, |p| matches!(p, Primitive::Circle { filled: true, .. }))
    }

    fn boxes(layout: &Layout) -> usize {
        count(layout, |p| matches!(p, Primitive::Rect { .. }))
    }

    fn connectors(layout: &Layout) -> usize {
        count(layout, Primitive::is_vertical_line)
    }

    #[test]
    fn test_empty_circuit_only_clears() {
        let layout = layout(&Circuit::new());
        assert_eq!(
            layout.primitives,
            vec![Primitive::Clear {
                width: 400.0,
                height: 300.0
            }]
        );
        assert!(layout.columns.is_empty());
    }

    #[test]
    fn test_wires_and_labels() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("q", 1);
        circuit.add_creg("c", 1);
        let layout = layout(&circuit);

        assert_eq!(
            layout.primitives[1..],
            [
                Primitive::Line { x1: 40.0, y1: 40.0, x2: 360.0, y2: 40.0 },
                Primitive::Text { x: 10.0, y: 45.0, text: "q0".into() },
                Primitive::Line { x1: 40.0, y1: 100.0, x2: 360.0, y2: 100.0 },
                Primitive::Line { x1: 40.0, y1: 103.0, x2: 360.0, y2: 103.0 },
                Primitive::Text { x: 10.0, y: 105.0, text: "c0".into() },
            ]
        );
    }

    #[test]
    fn test_bell_layout() {
        let layout = layout(&Circuit::bell());

        assert_eq!(layout.columns, vec![90.0, 150.0, 210.0]);
        assert_eq!(layout.len(), 16);
        assert_eq!(dots(&layout), 1);
        assert_eq!(boxes(&layout), 2);
        // cx connector plus the measurement connector
        assert_eq!(connectors(&layout), 2);

        // Measurement glyph on q0 at the third column, line down to c0.
        let tail = &layout.primitives[layout.len() - 2..];
        assert_eq!(
            tail,
            [
                Primitive::Circle { cx: 230.0, cy: 40.0, radius: 40.0 / 3.0, filled: false },
                Primitive::Line { x1: 230.0, y1: 40.0, x2: 230.0, y2: 160.0 },
            ]
        );
    }

    #[test]
    fn test_cx_draws_dot_box_and_one_connector() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("q", 3);
        circuit.cx(RegisterRef::single("q", 2), RegisterRef::single("q", 0));
        let layout = layout(&circuit);

        assert_eq!(dots(&layout), 1);
        assert_eq!(boxes(&layout), 1);
        assert_eq!(connectors(&layout), 1);
        assert!(layout.primitives.contains(&Primitive::Line {
            x1: 110.0,
            y1: 40.0,
            x2: 110.0,
            y2: 160.0
        }));
        assert!(layout.primitives.contains(&Primitive::Text {
            x: 95.0,
            y: 45.0,
            text: "CX".into()
        }));
    }

    #[test]
    fn test_other_gates_draw_independent_boxes() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("q", 3);
        circuit.push(Operation::gate(
            GateName::H,
            [RegisterRef::single("q", 0), RegisterRef::single("q", 2)],
        ));
        circuit.push(Operation::gate(
            GateName::CX,
            [
                RegisterRef::single("q", 0),
                RegisterRef::single("q", 1),
                RegisterRef::single("q", 2),
            ],
        ));
        let layout = layout(&circuit);

        assert_eq!(boxes(&layout), 5);
        assert_eq!(dots(&layout), 0);
        assert_eq!(connectors(&layout), 0);
    }

    #[test]
    fn test_rows_resolve_globally_across_registers() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("a", 2);
        circuit.add_qreg("b", 2);
        circuit.x(RegisterRef::single("b", 1));
        let layout = layout(&circuit);

        // b[1] is global row 3, not row 1.
        assert!(layout.primitives.contains(&Primitive::Rect {
            x: 90.0,
            y: 220.0 - 20.0,
            width: 40.0,
            height: 40.0
        }));
    }

    #[test]
    fn test_classical_rows_offset_by_total_qubits() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("q", 2);
        circuit.add_creg("c0", 1);
        circuit.add_creg("c1", 1);
        circuit.measure(RegisterRef::single("q", 1), RegisterRef::single("c1", 0));
        let layout = layout(&circuit);

        // q[1] is row 1; c1[0] is classical wire 1, drawn at row 2 + 1.
        assert_eq!(
            layout.primitives.last(),
            Some(&Primitive::Line { x1: 110.0, y1: 100.0, x2: 110.0, y2: 220.0 })
        );
    }

    #[test]
    fn test_whole_register_operands_expand() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("q", 3);
        circuit.add_creg("c", 3);
        circuit.h(RegisterRef::register("q"));
        circuit.measure(RegisterRef::register("q"), RegisterRef::register("c"));
        let layout = layout(&circuit);

        assert_eq!(boxes(&layout), 3);
        assert_eq!(
            count(&layout, |p| matches!(p, Primitive::Circle { filled: false, .. })),
            3
        );
        assert_eq!(connectors(&layout), 3);
    }

    #[test]
    fn test_unresolved_register_fails() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("q", 1);
        circuit.h(RegisterRef::single("r", 0));

        let err = compute_layout(&circuit, 400.0, 300.0, &LayoutConfig::default()).unwrap_err();
        assert_eq!(
            err,
            RenderError::UnresolvedRegister(IrError::UndeclaredRegister {
                register: "r".into()
            })
        );
    }

    #[test]
    fn test_index_past_width_fails() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("q", 2);
        circuit.add_creg("c", 1);
        circuit.measure(RegisterRef::single("q", 0), RegisterRef::single("c", 1));

        let err = compute_layout(&circuit, 400.0, 300.0, &LayoutConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            RenderError::UnresolvedRegister(IrError::IndexOutOfBounds { index: 1, width: 1, .. })
        ));
    }

    #[test]
    fn test_measure_width_mismatch() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("q", 2);
        circuit.add_creg("c", 1);
        circuit.measure(RegisterRef::register("q"), RegisterRef::single("c", 0));

        let err = compute_layout(&circuit, 400.0, 300.0, &LayoutConfig::default()).unwrap_err();
        assert_eq!(
            err,
            RenderError::MeasureWidthMismatch {
                sources: 2,
                targets: 1
            }
        );
    }

    #[test]
    fn test_whole_register_cx_pairs_wire_by_wire() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("q", 2);
        circuit.add_qreg("r", 2);
        circuit.cx(RegisterRef::register("q"), RegisterRef::register("r"));
        let layout = layout(&circuit);

        assert_eq!(layout.columns, vec![90.0]);
        assert_eq!(dots(&layout), 2);
        assert_eq!(boxes(&layout), 2);
        assert_eq!(connectors(&layout), 2);
        // q[0] -> r[0] spans rows 0..=2, q[1] -> r[1] spans rows 1..=3.
        assert!(layout.primitives.contains(&Primitive::Line { x1: 110.0, y1: 40.0, x2: 110.0, y2: 160.0 }));
        assert!(layout.primitives.contains(&Primitive::Line { x1: 110.0, y1: 100.0, x2: 110.0, y2: 220.0 }));
    }

    #[test]
    fn test_single_wire_cx_operand_broadcasts() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("a", 1);
        circuit.add_qreg("q", 3);
        circuit.cx(RegisterRef::single("a", 0), RegisterRef::register("q"));
        circuit.cx(RegisterRef::register("q"), RegisterRef::single("a", 0));
        let layout = layout(&circuit);

        assert_eq!(dots(&layout), 6);
        assert_eq!(boxes(&layout), 6);
        assert_eq!(connectors(&layout), 6);
    }

    #[test]
    fn test_cx_width_mismatch() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("q", 2);
        circuit.add_qreg("r", 3);
        circuit.cx(RegisterRef::register("q"), RegisterRef::register("r"));

        let err = compute_layout(&circuit, 400.0, 300.0, &LayoutConfig::default()).unwrap_err();
        assert_eq!(
            err,
            RenderError::ControlWidthMismatch {
                controls: 2,
                targets: 3
            }
        );
    }

    #[test]
    fn test_too_many_wires_fails_before_drawing() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("q", 3);
        circuit.add_creg("c", 2);
        let config = LayoutConfig {
            max_rows: 4,
            ..LayoutConfig::default()
        };

        let err = compute_layout(&circuit, 400.0, 300.0, &config).unwrap_err();
        assert_eq!(err, RenderError::TooManyWires { rows: 5, limit: 4 });

        let config = LayoutConfig {
            max_rows: 5,
            ..config
        };
        assert!(compute_layout(&circuit, 400.0, 300.0, &config).is_ok());
    }

    #[test]
    fn test_huge_registers_are_rejected_not_allocated() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("a", u32::MAX);
        circuit.add_qreg("b", 1);
        circuit.add_creg("c", u32::MAX);
        circuit.h(RegisterRef::single("b", 0));

        let err = compute_layout(&circuit, 400.0, 300.0, &LayoutConfig::default()).unwrap_err();
        assert_eq!(
            err,
            RenderError::TooManyWires {
                rows: 2 * u64::from(u32::MAX) + 1,
                limit: 4096
            }
        );
    }

    #[test]
    fn test_classical_rows_past_u32_are_unresolved() {
        let mut circuit = Circuit::new();
        circuit.add_qreg("q", u32::MAX);
        circuit.add_creg("c", 1);
        circuit.measure(RegisterRef::single("q", 0), RegisterRef::single("c", 0));
        let config = LayoutConfig {
            max_rows: u32::MAX,
            ..LayoutConfig::default()
        };

        let builder = LayoutBuilder {
            config: &config,
            circuit: &circuit,
            total_qubits: u32::MAX,
            total_clbits: 1,
            primitives: Vec::new(),
        };
        assert_eq!(
            builder.classical_rows(&RegisterRef::single("c", 0)),
            Err(RenderError::UnresolvedRegister(IrError::WireOverflow {
                register: "c".into()
            }))
        );
    }

    #[test]
    fn test_layout_is_idempotent() {
        let circuit = Circuit::bell();
        assert_eq!(layout(&circuit), layout(&circuit));
    }
}
