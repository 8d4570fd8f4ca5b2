//! # Dashboard Pages
//!
//! The views behind each route, and the content pane they are mounted into.
//!
//! Built-in pages are markdown documents. The impact overview and the
//! calculation setup are computed from demo data each time they are opened,
//! using the current [`PageOptions`]. Pages from the config's `[[pages]]`
//! section read their markdown file when opened, so a missing file surfaces
//! as a `ViewError` and the router falls back to home.

use log::debug;
use std::cell::RefCell;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::core::config::PageEntry;
use crate::core::router::{ContentSlot, RouteTable, RouteTableError, ViewError};

pub const HOME: &str = "home";
pub const PROCESS_DEFINITION: &str = "modeling/process-definition";
pub const CALCULATION_SETUP: &str = "modeling/calculation-setup";
pub const IMPACT_OVERVIEW: &str = "results/impact-overview";
pub const CONTRIBUTION_ANALYSIS: &str = "results/contribution-analysis";

/// A rendered page: a title and a markdown body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub title: String,
    pub body: String,
}

impl PageView {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// User choices that change how computed pages are built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOptions {
    /// Draw every stacked bar at full width (shares instead of amounts).
    pub normalize_bars: bool,
    /// Search text for the calculation setup process list.
    pub process_filter: String,
}

/// Options shared between the app and the page factories in the route table.
pub type SharedOptions = Rc<RefCell<PageOptions>>;

/// The single content slot of the dashboard.
///
/// `generation` increases on every replacement so the terminal layer can
/// reset its scroll position when the page changes.
#[derive(Debug, Default)]
pub struct ContentPane {
    view: Option<PageView>,
    generation: u64,
}

impl ContentPane {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> Option<&PageView> {
        self.view.as_ref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl ContentSlot<PageView> for ContentPane {
    fn replace_contents(&mut self, view: PageView) -> Result<(), ViewError> {
        debug!("Mounting page '{}'", view.title);
        self.view = Some(view);
        self.generation += 1;
        Ok(())
    }
}

// ============================================================================
// Built-in pages
// ============================================================================

const HOME_BODY: &str = "\
# Home

Welcome to a Demo.

- Go to **Modeling** to choose a project, database, and filter processes.
- Open **Results** to explore stacked bars and contribution breakdowns.

This is a placeholder home page with explanatory text.
";

const PROCESS_DEFINITION_BODY: &str = "\
# Process Definition

This page is for defining and managing LCA processes.

Here you can:

- Define new processes
- Edit existing process parameters
- Configure process relationships

This is a placeholder for the process definition functionality.
";

const CONTRIBUTION_ANALYSIS_BODY: &str = "\
# Contribution Analysis

This page provides detailed contribution analysis of LCA results.

Here you can:

- Analyze contributions by process
- View contribution breakdowns by stage
- Compare contribution patterns across products
- Export detailed contribution data

This is a placeholder for the contribution analysis functionality.
";

/// Life-cycle stages of the demo footprint data.
pub const STAGES: [&str; 5] = [
    "Raw materials",
    "Manufacturing",
    "Transport",
    "Use",
    "End of life",
];

/// Demo carbon footprint per product and stage, in kg CO2-eq.
pub const FOOTPRINTS: [(&str, [f64; 5]); 5] = [
    ("Acetic acid", [1.42, 0.88, 0.12, 0.05, 0.09]),
    ("Ethanol", [0.97, 0.64, 0.15, 0.02, 0.04]),
    ("Methanol", [0.61, 0.49, 0.10, 0.01, 0.03]),
    ("Toluene", [1.18, 0.73, 0.18, 0.04, 0.11]),
    ("Acetone", [1.05, 0.92, 0.14, 0.03, 0.06]),
];

/// One glyph per stage, in `STAGES` order.
pub const STAGE_GLYPHS: [char; 5] = ['█', '▓', '▒', '░', '▪'];

const BAR_WIDTH: f64 = 30.0;

/// A stacked bar of `stages`, where `scale` kg fills the whole width.
///
/// Segment ends are rounded from the running sum, so the bar length only
/// depends on the total and never drifts from per-segment rounding.
pub fn stacked_bar(stages: &[f64], scale: f64) -> String {
    let mut bar = String::new();
    let mut sum = 0.0;
    let mut drawn = 0;
    for (value, glyph) in stages.iter().zip(STAGE_GLYPHS) {
        sum += value;
        let end = if scale > 0.0 {
            (sum / scale * BAR_WIDTH).round() as usize
        } else {
            0
        };
        bar.extend(std::iter::repeat_n(glyph, end.saturating_sub(drawn)));
        drawn = drawn.max(end);
    }
    bar
}

/// Impact overview: per-product table, stacked bars by stage, stage totals.
pub fn impact_overview(options: &PageOptions) -> PageView {
    let totals: Vec<(&str, f64)> = FOOTPRINTS
        .iter()
        .map(|(product, stages)| (*product, stages.iter().sum()))
        .collect();
    let max = totals.iter().map(|(_, t)| *t).fold(0.0_f64, f64::max);

    let mut body = String::from(
        "# Impact Overview\n\nStacked bar chart of carbon footprint by stage and product.\n\n",
    );

    body.push_str("| Product |");
    for stage in STAGES {
        body.push_str(&format!(" {stage} |"));
    }
    body.push_str(" Total |\n|---|");
    body.push_str(&"---:|".repeat(STAGES.len() + 1));
    body.push('\n');
    for ((product, stages), (_, total)) in FOOTPRINTS.iter().zip(&totals) {
        body.push_str(&format!("| {product} |"));
        for value in stages {
            body.push_str(&format!(" {value:.2} |"));
        }
        body.push_str(&format!(" {total:.2} |\n"));
    }

    if options.normalize_bars {
        body.push_str("\n## Stacked bars (normalized, 100%)\n\n```text\n");
    } else {
        body.push_str("\n## Stacked bars (kg CO2-eq)\n\n```text\n");
    }
    for ((product, stages), (_, total)) in FOOTPRINTS.iter().zip(&totals) {
        let scale = if options.normalize_bars { *total } else { max };
        let bar = stacked_bar(stages, scale);
        if options.normalize_bars {
            body.push_str(&format!("{product:<12} {bar}\n"));
        } else {
            body.push_str(&format!("{product:<12} {bar} {total:.2}\n"));
        }
    }
    body.push('\n');
    let legend: Vec<String> = STAGES
        .iter()
        .zip(STAGE_GLYPHS)
        .map(|(stage, glyph)| format!("{glyph} {stage}"))
        .collect();
    body.push_str(&legend.join("  "));
    body.push_str("\n```\n");

    // Where the footprint flows from: each stage's share of the grand total.
    let grand_total: f64 = totals.iter().map(|(_, t)| t).sum();
    body.push_str("\n## Stage totals\n\n| Stage | kg CO2-eq | Share |\n|---|---:|---:|\n");
    for (i, stage) in STAGES.iter().enumerate() {
        let stage_total: f64 = FOOTPRINTS.iter().map(|(_, stages)| stages[i]).sum();
        let share = if grand_total > 0.0 {
            stage_total / grand_total * 100.0
        } else {
            0.0
        };
        body.push_str(&format!("| {stage} | {stage_total:.2} | {share:.1}% |\n"));
    }

    PageView::new("Impact Overview", body)
}

/// A demo process: name, reference product and location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Process {
    pub name: &'static str,
    pub product: &'static str,
    pub location: &'static str,
}

const fn process(name: &'static str, product: &'static str, location: &'static str) -> Process {
    Process {
        name,
        product,
        location,
    }
}

/// Demo database browsed on the calculation setup page.
pub const PROCESSES: [Process; 10] = [
    process("acetic acid production, methanol carbonylation", "acetic acid", "RER"),
    process("acetic acid production, methanol carbonylation", "acetic acid", "US"),
    process("ethanol production, ethylene hydration", "ethanol", "RER"),
    process("ethanol production, fermentation of sugarcane", "ethanol", "BR"),
    process("methanol production, natural gas", "methanol", "GLO"),
    process("toluene production, catalytic reforming", "toluene", "RER"),
    process("acetone production, cumene process", "acetone", "RER"),
    process("acetone production, cumene process", "acetone", "CN"),
    process("market for electricity, medium voltage", "electricity, medium voltage", "DE"),
    process("transport, freight, lorry 16-32 metric ton", "transport, freight, lorry", "RER"),
];

/// Split a search string into lowercase terms. `"quoted phrases"` stay whole,
/// everything else splits on whitespace.
pub fn filter_terms(pattern: &str) -> Vec<String> {
    let parts: Vec<&str> = pattern.split('"').collect();
    let last = parts.len() - 1;
    let mut terms = Vec::new();
    let mut words = String::new();
    for (i, part) in parts.iter().enumerate() {
        // Odd parts sit between a pair of quotes, unless the last quote is unclosed.
        if i % 2 == 1 && i < last {
            let phrase = part.trim().to_lowercase();
            if !phrase.is_empty() {
                terms.push(phrase);
            }
        } else {
            words.push(' ');
            words.push_str(part);
        }
    }
    terms.extend(words.split_whitespace().map(str::to_lowercase));
    terms
}

impl Process {
    /// True when every term occurs in the name, product or location.
    pub fn matches(&self, terms: &[String]) -> bool {
        let fields = [
            self.name.to_lowercase(),
            self.product.to_lowercase(),
            self.location.to_lowercase(),
        ];
        terms
            .iter()
            .all(|term| fields.iter().any(|field| field.contains(term.as_str())))
    }
}

/// Calculation setup: the demo process list, narrowed by the filter, and the
/// functional unit built from the processes left after filtering.
pub fn calculation_setup(options: &PageOptions) -> PageView {
    let terms = filter_terms(&options.process_filter);
    let shown: Vec<&Process> = PROCESSES.iter().filter(|p| p.matches(&terms)).collect();

    let mut body = String::from(
        "# Calculation Setup\n\n\
         Project **demo**, database **demo-chemicals**. \
         Filter processes by name, product, or location.\n\n",
    );
    if terms.is_empty() {
        body.push_str(&format!("Showing all {} processes.\n\n", PROCESSES.len()));
    } else {
        body.push_str(&format!(
            "Filter `{}`: {} of {} processes.\n\n",
            options.process_filter.trim(),
            shown.len(),
            PROCESSES.len()
        ));
    }

    if shown.is_empty() {
        body.push_str("*No process matches the filter.*\n");
    } else {
        body.push_str("| Product | Process | Location |\n|---|---|---|\n");
        for p in &shown {
            body.push_str(&format!("| {} | {} | {} |\n", p.product, p.name, p.location));
        }
    }

    body.push_str("\n## Functional unit\n\n");
    if terms.is_empty() || shown.is_empty() {
        body.push_str("*Filter the process list to choose the functional unit.*\n");
    } else {
        body.push_str("| Amount | Product | Process | Location |\n|---:|---|---|---|\n");
        for p in &shown {
            body.push_str(&format!(
                "| 1.0 | {} | {} | {} |\n",
                p.product, p.name, p.location
            ));
        }
    }

    PageView::new("Calculation Setup", body)
}

/// Read a configured page's markdown file.
pub fn load_markdown(path: &Path) -> Result<String, ViewError> {
    fs::read_to_string(path).map_err(|source| {
        if source.kind() == ErrorKind::NotFound {
            ViewError::Missing(path.to_path_buf())
        } else {
            ViewError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })
}

/// Route table for the dashboard: built-in pages, then configured ones.
/// A configured page with a built-in route replaces the built-in page.
/// Computed pages read `options` each time they are opened.
pub fn route_table(
    extra: &[PageEntry],
    options: &SharedOptions,
) -> Result<RouteTable<PageView>, RouteTableError> {
    let setup_options = options.clone();
    let overview_options = options.clone();
    let builder = RouteTable::builder()
        .route(HOME, || Ok(PageView::new("Home", HOME_BODY)))
        .route(PROCESS_DEFINITION, || {
            Ok(PageView::new("Process Definition", PROCESS_DEFINITION_BODY))
        })
        .route(CALCULATION_SETUP, move || {
            Ok(calculation_setup(&setup_options.borrow()))
        })
        .route(IMPACT_OVERVIEW, move || {
            Ok(impact_overview(&overview_options.borrow()))
        })
        .route(CONTRIBUTION_ANALYSIS, || {
            Ok(PageView::new("Contribution Analysis", CONTRIBUTION_ANALYSIS_BODY))
        });

    let builder = extra.iter().fold(builder, |builder, page| {
        let title = page.title.clone();
        let file: PathBuf = page.file.clone();
        builder.route(page.route.as_str(), move || {
            load_markdown(&file).map(|body| PageView::new(title.clone(), body))
        })
    });

    builder.build()
}
