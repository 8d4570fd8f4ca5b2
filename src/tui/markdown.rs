//! Page markdown → ratatui `Text`.
//!
//! Pages are short documents: headings, paragraphs, lists, quotes, tables of
//! footprint numbers and the occasional fenced block (text charts, snippets in
//! user pages). Fenced blocks with a known language go through syntect.

use std::sync::LazyLock;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use syntect::easy::HighlightLines;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use unicode_width::UnicodeWidthStr;

static SYNTAX_SET: LazyLock<SyntaxSet> = LazyLock::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: LazyLock<ThemeSet> = LazyLock::new(ThemeSet::load_defaults);

const CODE_THEME: &str = "base16-ocean.dark";
const GUTTER: &str = "▌ ";

pub fn render(content: &str, base_fg: Color) -> Text<'static> {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let mut page = PageRenderer::new(base_fg);
    for event in Parser::new_ext(content, opts) {
        page.event(event);
    }
    Text::from(page.lines)
}

enum CodeBlock {
    Highlighted(HighlightLines<'static>),
    Plain,
}

#[derive(Default)]
struct TableBuf {
    alignments: Vec<Alignment>,
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
}

struct PageRenderer {
    lines: Vec<Line<'static>>,
    base_fg: Color,
    inline: Vec<Style>,
    quote_depth: usize,
    lists: Vec<Option<u64>>,
    code: Option<CodeBlock>,
    table: Option<TableBuf>,
    link: Option<String>,
    /// A blank line is owed before the next block.
    gap: bool,
}

impl PageRenderer {
    fn new(base_fg: Color) -> Self {
        Self {
            lines: Vec::new(),
            base_fg,
            inline: Vec::new(),
            quote_depth: 0,
            lists: Vec::new(),
            code: None,
            table: None,
            link: None,
            gap: false,
        }
    }

    fn style(&self) -> Style {
        self.inline
            .last()
            .copied()
            .unwrap_or_else(|| Style::default().fg(self.base_fg))
    }

    fn push_inline(&mut self, overlay: Style) {
        self.inline.push(self.style().patch(overlay));
    }

    /// Start a new line, carrying the blockquote prefix.
    fn new_line(&mut self) {
        let mut line = Line::default();
        for _ in 0..self.quote_depth {
            line.push_span(Span::styled("│ ", Style::default().fg(Color::DarkGray)));
        }
        self.lines.push(line);
    }

    fn push_span(&mut self, span: Span<'static>) {
        if self.lines.is_empty() {
            self.new_line();
        }
        if let Some(line) = self.lines.last_mut() {
            line.push_span(span);
        }
    }

    fn open_block(&mut self) {
        if self.gap && !self.lines.is_empty() {
            self.new_line();
        }
        self.gap = false;
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                if let Some(table) = self.table.as_mut() {
                    table.cell.push_str(&code);
                } else {
                    let style = Style::default().fg(Color::LightYellow);
                    self.push_span(Span::styled(code.into_string(), style));
                }
            }
            Event::SoftBreak => {
                if let Some(table) = self.table.as_mut() {
                    table.cell.push(' ');
                } else {
                    self.push_span(Span::raw(" "));
                }
            }
            Event::HardBreak => self.new_line(),
            Event::Rule => {
                self.open_block();
                self.new_line();
                self.push_span(Span::styled("─".repeat(48), Style::default().fg(Color::DarkGray)));
                self.gap = true;
            }
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                // List items already opened their line.
                if self.lists.is_empty() {
                    self.open_block();
                    self.new_line();
                }
            }
            Tag::Heading { level, .. } => {
                self.open_block();
                self.new_line();
                self.push_inline(heading_style(level));
            }
            Tag::BlockQuote(_) => {
                self.open_block();
                self.quote_depth += 1;
                self.push_inline(Style::default().add_modifier(Modifier::ITALIC));
            }
            Tag::CodeBlock(kind) => {
                self.open_block();
                let lang = match kind {
                    CodeBlockKind::Fenced(lang) => lang.into_string(),
                    CodeBlockKind::Indented => String::new(),
                };
                let highlighter = SYNTAX_SET
                    .find_syntax_by_token(&lang)
                    .filter(|_| !lang.is_empty() && lang != "text")
                    .zip(THEME_SET.themes.get(CODE_THEME))
                    .map(|(syntax, theme)| HighlightLines::new(syntax, theme));
                self.code = Some(match highlighter {
                    Some(h) => CodeBlock::Highlighted(h),
                    None => CodeBlock::Plain,
                });
            }
            Tag::List(start) => {
                if self.lists.is_empty() {
                    self.open_block();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.new_line();
                let indent = "  ".repeat(self.lists.len().saturating_sub(1));
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{indent}{n}. ");
                        *n += 1;
                        marker
                    }
                    _ => format!("{indent}• "),
                };
                self.push_span(Span::styled(marker, Style::default().fg(Color::DarkGray)));
            }
            Tag::Table(alignments) => {
                self.open_block();
                self.table = Some(TableBuf {
                    alignments,
                    ..TableBuf::default()
                });
            }
            Tag::Emphasis => self.push_inline(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_inline(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_inline(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.link = Some(dest_url.into_string());
                self.push_inline(Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED));
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.gap = true,
            TagEnd::Heading(_) => {
                self.inline.pop();
                self.gap = true;
            }
            TagEnd::BlockQuote(_) => {
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.inline.pop();
                self.gap = true;
            }
            TagEnd::CodeBlock => {
                self.code = None;
                self.gap = true;
            }
            TagEnd::List(_) => {
                self.lists.pop();
                self.gap = true;
            }
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    let cell = std::mem::take(&mut table.cell);
                    table.row.push(cell.trim().to_string());
                }
            }
            TagEnd::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.header = std::mem::take(&mut table.row);
                }
            }
            TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    let row = std::mem::take(&mut table.row);
                    table.rows.push(row);
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    self.emit_table(table);
                }
                self.gap = true;
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.inline.pop();
            }
            TagEnd::Link => {
                self.inline.pop();
                if let Some(url) = self.link.take() {
                    self.push_span(Span::styled(
                        format!(" <{url}>"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
            }
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(table) = self.table.as_mut() {
            table.cell.push_str(text);
            return;
        }

        match self.code.take() {
            Some(CodeBlock::Highlighted(mut hl)) => {
                for line in LinesWithEndings::from(text) {
                    let spans: Vec<Span<'static>> = match hl.highlight_line(line, &SYNTAX_SET) {
                        Ok(ranges) => ranges
                            .into_iter()
                            .map(|(style, frag)| {
                                let fg = style.foreground;
                                Span::styled(
                                    frag.trim_end_matches('\n').replace('\t', "    "),
                                    Style::default().fg(Color::Rgb(fg.r, fg.g, fg.b)),
                                )
                            })
                            .collect(),
                        Err(_) => vec![Span::raw(line.trim_end_matches('\n').to_string())],
                    };
                    self.code_line(spans);
                }
                self.code = Some(CodeBlock::Highlighted(hl));
            }
            Some(CodeBlock::Plain) => {
                for line in text.lines() {
                    let span = Span::styled(
                        line.replace('\t', "    "),
                        Style::default().fg(Color::White),
                    );
                    self.code_line(vec![span]);
                }
                self.code = Some(CodeBlock::Plain);
            }
            None => {
                let style = self.style();
                self.push_span(Span::styled(text.to_string(), style));
            }
        }
    }

    fn code_line(&mut self, spans: Vec<Span<'static>>) {
        self.new_line();
        self.push_span(Span::styled(GUTTER, Style::default().fg(Color::DarkGray)));
        for span in spans {
            self.push_span(span);
        }
    }

    fn emit_table(&mut self, table: TableBuf) {
        let columns = table
            .rows
            .iter()
            .map(Vec::len)
            .chain(std::iter::once(table.header.len()))
            .max()
            .unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for row in std::iter::once(&table.header).chain(&table.rows) {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.width());
            }
        }

        let header_style = Style::default().fg(self.base_fg).add_modifier(Modifier::BOLD);
        let body_style = Style::default().fg(self.base_fg);
        let rule_style = Style::default().fg(Color::DarkGray);

        if !table.header.is_empty() {
            self.table_row(&table.header, &widths, &table.alignments, header_style);
            let rule = widths
                .iter()
                .map(|w| "─".repeat(*w))
                .collect::<Vec<_>>()
                .join("─┼─");
            self.new_line();
            self.push_span(Span::styled(rule, rule_style));
        }
        for row in &table.rows {
            self.table_row(row, &widths, &table.alignments, body_style);
        }
    }

    fn table_row(&mut self, row: &[String], widths: &[usize], alignments: &[Alignment], style: Style) {
        self.new_line();
        for (i, width) in widths.iter().enumerate() {
            if i > 0 {
                self.push_span(Span::styled(" │ ", Style::default().fg(Color::DarkGray)));
            }
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(cell.width());
            let padded = match alignments.get(i) {
                Some(Alignment::Right) => format!("{}{cell}", " ".repeat(pad)),
                Some(Alignment::Center) => {
                    let left = pad / 2;
                    format!("{}{cell}{}", " ".repeat(left), " ".repeat(pad - left))
                }
                _ => format!("{cell}{}", " ".repeat(pad)),
            };
            self.push_span(Span::styled(padded, style));
        }
    }
}

fn heading_style(level: HeadingLevel) -> Style {
    let style = Style::default().fg(Color::LightBlue).add_modifier(Modifier::BOLD);
    match level {
        HeadingLevel::H1 => style.add_modifier(Modifier::UNDERLINED),
        HeadingLevel::H2 => style,
        _ => style.add_modifier(Modifier::ITALIC),
    }
}
