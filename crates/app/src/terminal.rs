use std::collections::HashMap;
use std::io::{self, BufRead, Write};

use services::{FillStyle, InputFeedback, MessageKind, WorksheetView};
use worksheet_core::{ShapeKind, WorksheetPath};

/// One colorable shape on the printed worksheet. Its displayed fraction is
/// also what the matching exercise expects for it.
pub struct ShapeSpec {
    pub id: &'static str,
    pub kind: ShapeKind,
    pub fraction: &'static str,
}

pub const SHAPES: [ShapeSpec; 4] = [
    ShapeSpec {
        id: "circle-1",
        kind: ShapeKind::Circle,
        fraction: "1/2",
    },
    ShapeSpec {
        id: "circle-2",
        kind: ShapeKind::Circle,
        fraction: "3/4",
    },
    ShapeSpec {
        id: "square-1",
        kind: ShapeKind::Rectangle,
        fraction: "1/4",
    },
    ShapeSpec {
        id: "square-2",
        kind: ShapeKind::Rectangle,
        fraction: "2/3",
    },
];

const FILL_CELLS: usize = 10;

/// Terminal rendition of the worksheet page.
///
/// The terminal is append-only, so "clearing" a transient message is a
/// no-op here; dismissal deadlines still tick in the service.
pub struct TerminalView {
    fills: HashMap<String, (FillStyle, f64)>,
    reload_requested: bool,
}

impl TerminalView {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fills: HashMap::new(),
            reload_requested: false,
        }
    }

    fn spec(&self, shape: &str) -> Option<&'static ShapeSpec> {
        SHAPES.iter().find(|spec| spec.id == shape)
    }

    /// Consume a pending reload request (the reset flow's page reload).
    pub fn take_reload_request(&mut self) -> bool {
        std::mem::take(&mut self.reload_requested)
    }

    pub fn print_shapes(&self) {
        println!("shapes on this worksheet:");
        for spec in &SHAPES {
            let kind = match spec.kind {
                ShapeKind::Circle => "circle",
                ShapeKind::Rectangle => "square",
            };
            let fill = self
                .fills
                .get(spec.id)
                .map_or_else(|| "uncolored".to_owned(), |(_, pct)| format!("{pct:.0}% colored"));
            println!("  {:<10} {kind:<7} shows {:<4} ({fill})", spec.id, spec.fraction);
        }
    }
}

impl Default for TerminalView {
    fn default() -> Self {
        Self::new()
    }
}

fn fill_bar(percentage: f64) -> String {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = ((percentage / 100.0 * FILL_CELLS as f64).round() as usize).min(FILL_CELLS);
    let mut bar = String::with_capacity(FILL_CELLS);
    bar.extend(std::iter::repeat_n('#', filled));
    bar.extend(std::iter::repeat_n('.', FILL_CELLS - filled));
    bar
}

impl WorksheetView for TerminalView {
    fn shape_kind(&self, shape: &str) -> Option<ShapeKind> {
        self.spec(shape).map(|spec| spec.kind)
    }

    fn catalogue_fraction(&self, shape: &str) -> Option<String> {
        self.spec(shape).map(|spec| spec.fraction.to_owned())
    }

    fn expected_fraction(&self, shape: &str) -> Option<String> {
        self.spec(shape).map(|spec| spec.fraction.to_owned())
    }

    fn render_fill(&mut self, shape: &str, style: FillStyle, percentage: f64) {
        self.fills.insert(shape.to_owned(), (style, percentage));
        let how = match style {
            FillStyle::ConicSweep => "sweep",
            FillStyle::LinearBar => "bar",
        };
        println!("  {shape}: [{}] {percentage:.0}% ({how})", fill_bar(percentage));
    }

    fn clear_fill(&mut self, shape: &str) -> bool {
        if self.spec(shape).is_none() {
            return false;
        }
        self.fills.remove(shape);
        println!("  {shape}: [{}] 0%", fill_bar(0.0));
        true
    }

    fn mark_selected(&mut self, shape: &str) {
        if self.spec(shape).is_some() {
            println!("  selected: {shape}");
        }
    }

    fn set_match_status(&mut self, shape: &str, correct: bool) {
        let mark = if correct { "matched" } else { "no match" };
        println!("  {shape}: {mark}");
    }

    fn render_people(&mut self, total: u32, front: u32) {
        let class: Vec<String> = (1..=total).map(|n| n.to_string()).collect();
        let marks: Vec<&str> = (1..=total)
            .map(|n| if n <= front { "*" } else { " " })
            .collect();
        println!("  class: {}", class.join(" "));
        println!("  front: {}", marks.join(" "));
    }

    fn set_game_fraction_input(&mut self, fraction: &str) {
        println!("  people in front: {fraction}");
    }

    fn set_input_feedback(&mut self, input_id: &str, feedback: InputFeedback) {
        let word = match feedback {
            InputFeedback::Neutral => "…",
            InputFeedback::Valid => "looks good",
            InputFeedback::Invalid => "not a fraction",
        };
        println!("  {input_id}: {word}");
    }

    fn show_message(&mut self, _target: &str, text: &str, kind: MessageKind) {
        let prefix = match kind {
            MessageKind::Success => "[ok]",
            MessageKind::Error => "[!!]",
            MessageKind::Info => "[..]",
        };
        println!("{prefix} {text}");
    }

    fn clear_message(&mut self, _target: &str) {
        // Nothing to take back on an append-only terminal.
    }

    fn show_worksheet(&mut self, path: WorksheetPath) {
        println!(
            "=== worksheet path {} ===",
            path.to_string().to_uppercase()
        );
    }

    fn confirm(&mut self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        let _ = io::stdout().flush();
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim(), "y" | "Y" | "yes")
    }

    fn alert(&mut self, text: &str) {
        println!("** {text}");
    }

    fn request_reload(&mut self) {
        self.reload_requested = true;
    }
}
