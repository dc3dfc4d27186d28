//! Rendering - compose page state into styled lines and draw them.
//!
//! Composition is pure: [`compose`] turns the page, the notices and the
//! confirm dialog into a flat list of styled lines with row tags, and
//! [`hit_map`] projects the tags of the visible window into screen rows for
//! click routing. Only [`Screen`] touches the terminal.

use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{
    Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
    enable_raw_mode,
};
use crossterm::{execute, queue};

use crate::app::HitMap;
use crate::config::UiConfig;
use crate::enhance::counters::{self, CounterLevel};
use crate::enhance::forms::ConfirmDialog;
use crate::enhance::media::format_size;
use crate::enhance::notify::{Notice, Phase, Severity};
use crate::page::{FieldKind, FieldRef, Page};

// =============================================================================
// STYLE
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::DIM`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const UNDERLINE = 1 << 2;
        const REVERSE = 1 << 3;
    }
}

/// Foreground color plus attributes for one line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Style {
    pub fg: Color,
    pub attrs: Attr,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            attrs: Attr::NONE,
        }
    }
}

impl Style {
    fn fg(color: Color) -> Self {
        Self {
            fg: color,
            attrs: Attr::NONE,
        }
    }

    fn with(mut self, attrs: Attr) -> Self {
        self.attrs |= attrs;
        self
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Success => Color::Green,
        Severity::Error => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Info => Color::Cyan,
    }
}

// =============================================================================
// LINES
// =============================================================================

/// What a rendered line represents, for click routing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RowTag {
    #[default]
    Plain,
    Notice(u64),
    MenuToggle,
    Field(FieldRef),
}

/// One styled line of output.
#[derive(Clone, Debug, Default)]
pub struct Line {
    pub text: String,
    pub style: Style,
    pub tag: RowTag,
}

impl Line {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
            ..Default::default()
        }
    }

    fn tagged(text: impl Into<String>, style: Style, tag: RowTag) -> Self {
        Self {
            text: text.into(),
            style,
            tag,
        }
    }
}

/// Compose the whole page into lines, top to bottom: notices, navigation,
/// stat cards, forms, tables, then the confirm dialog and the shortcut bar.
pub fn compose(
    page: &Page,
    notices: &[Notice],
    confirm: Option<&ConfirmDialog>,
    focus: Option<FieldRef>,
    ui: &UiConfig,
) -> Vec<Line> {
    let mut lines = Vec::new();

    for notice in notices {
        let mut style = Style::fg(severity_color(notice.severity)).with(Attr::BOLD);
        if notice.phase == Phase::Fading {
            style = style.with(Attr::DIM);
        }
        lines.push(Line::tagged(
            format!("[{}] {}", severity_tag(notice.severity), notice.text),
            style,
            RowTag::Notice(notice.id),
        ));
    }
    if !notices.is_empty() {
        lines.push(Line::default());
    }

    if let Some(nav) = &page.nav {
        if let Some(toggle) = &nav.toggle {
            lines.push(Line::tagged(
                toggle.label(),
                Style::default().with(Attr::BOLD | Attr::REVERSE),
                RowTag::MenuToggle,
            ));
        }
        if nav.menu_visible {
            lines.push(Line::styled(
                nav.items.join("  |  "),
                Style::default().with(Attr::BOLD),
            ));
        }
        lines.push(Line::default());
    }

    for card in &page.stat_cards {
        lines.push(Line::styled(
            format!("{}: {}", card.label, card.text),
            Style::fg(Color::Cyan).with(Attr::BOLD),
        ));
    }
    if !page.stat_cards.is_empty() {
        lines.push(Line::default());
    }

    for (form_idx, form) in page.forms.iter().enumerate() {
        lines.push(Line::styled(
            form.name.clone(),
            Style::default().with(Attr::UNDERLINE),
        ));

        for (field_idx, field) in form.fields.iter().enumerate() {
            let field_ref = FieldRef {
                form: form_idx,
                field: field_idx,
            };
            let focused = focus == Some(field_ref);

            let marker = if focused { "> " } else { "  " };
            let mut style = Style::default();
            if field.invalid {
                style = Style::fg(Color::Red).with(Attr::UNDERLINE);
            } else if focused {
                style = style.with(Attr::BOLD);
            }
            lines.push(Line::tagged(
                format!("{}{}: {}", marker, field.label, field.value),
                style,
                RowTag::Field(field_ref),
            ));

            if let Some(counter) = counters::counter(field, ui) {
                let style = match counter.level {
                    CounterLevel::Neutral => Style::fg(Color::DarkGrey),
                    CounterLevel::Warning => Style::fg(Color::Yellow),
                    CounterLevel::Critical => Style::fg(Color::Red).with(Attr::BOLD),
                };
                lines.push(Line::styled(format!("    {}", counter.text), style));
            }

            if let FieldKind::File(state) = &field.kind {
                if state.pending {
                    lines.push(Line::styled("    loading preview...", Style::fg(Color::DarkGrey)));
                } else if let Some(preview) = &state.preview {
                    lines.push(Line::styled(
                        format!(
                            "    {} ({}, {}x{})",
                            preview.file_name,
                            format_size(preview.size),
                            preview.width,
                            preview.height
                        ),
                        Style::fg(Color::Green),
                    ));
                }
            }
        }

        if let Some(button) = &form.submit {
            let style = if button.disabled {
                Style::default().with(Attr::DIM)
            } else {
                Style::default().with(Attr::BOLD | Attr::REVERSE)
            };
            lines.push(Line::styled(format!("  [ {} ]", button.label), style));
        }

        if !form.links.is_empty() {
            let labels: Vec<&str> = form.links.iter().map(|l| l.label.as_str()).collect();
            lines.push(Line::styled(
                format!("  {}", labels.join("   ")),
                Style::fg(Color::Blue).with(Attr::UNDERLINE),
            ));
        }
        lines.push(Line::default());
    }

    for table in &page.tables {
        lines.push(Line::styled(
            table.title.clone(),
            Style::default().with(Attr::UNDERLINE),
        ));
        lines.push(Line::styled(
            clip_x(&table.columns.join(" | "), table.scroll_x),
            Style::default().with(Attr::BOLD),
        ));
        for row_idx in table.visible_rows() {
            lines.push(Line::plain(clip_x(
                &table.rows[row_idx].join(" | "),
                table.scroll_x,
            )));
        }
        if !table.filter.is_empty() {
            lines.push(Line::styled(
                format!(
                    "  {} of {} rows match \"{}\"",
                    table.visible_rows().len(),
                    table.rows.len(),
                    table.filter
                ),
                Style::fg(Color::DarkGrey),
            ));
        }
        lines.push(Line::default());
    }

    if let Some(dialog) = confirm {
        lines.push(Line::styled(
            format!(" {} ", dialog.message),
            Style::fg(Color::Yellow).with(Attr::REVERSE),
        ));
        lines.push(Line::styled(
            " [Enter/y] confirm   [Esc/n] cancel ",
            Style::default().with(Attr::REVERSE),
        ));
        lines.push(Line::default());
    }

    lines.push(Line::styled(
        "Alt+N new   Alt+S save   Esc cancel   Ctrl+K search   Ctrl+C quit",
        Style::fg(Color::DarkGrey),
    ));

    lines
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "ok",
        Severity::Error => "error",
        Severity::Warning => "warn",
        Severity::Info => "info",
    }
}

/// Drop the first `scroll_x` columns of a line (character based).
fn clip_x(text: &str, scroll_x: u16) -> String {
    text.chars().skip(usize::from(scroll_x)).collect()
}

/// Project the tags of the visible window into screen rows.
pub fn hit_map(lines: &[Line], scroll_y: u16, height: u16) -> HitMap {
    let mut hit = HitMap::default();
    let start = usize::from(scroll_y);

    for (offset, line) in lines.iter().skip(start).take(usize::from(height)).enumerate() {
        let row = offset as u16;
        match line.tag {
            RowTag::Plain => {}
            RowTag::Notice(id) => hit.notice_rows.push((id, row)),
            RowTag::MenuToggle => hit.toggle_row = Some(row),
            RowTag::Field(field) => hit.field_rows.push((field, row)),
        }
    }
    hit
}

// =============================================================================
// SCREEN
// =============================================================================

/// Terminal session guard. Raw mode, alternate screen and mouse capture are
/// restored on drop even when the event loop errors out.
pub struct Screen {
    out: Stdout,
}

impl Screen {
    pub fn new() -> io::Result<Self> {
        let mut out = io::stdout();
        enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(Self { out })
    }

    /// Draw the visible window of `lines`, truncated to the terminal size.
    pub fn draw(&mut self, lines: &[Line], scroll_y: u16, size: (u16, u16)) -> io::Result<()> {
        let (width, height) = size;
        queue!(self.out, Clear(ClearType::All))?;

        let start = usize::from(scroll_y);
        for (offset, line) in lines.iter().skip(start).take(usize::from(height)).enumerate() {
            let text: String = line.text.chars().take(usize::from(width)).collect();
            queue!(self.out, MoveTo(0, offset as u16))?;
            queue!(self.out, SetForegroundColor(line.style.fg))?;
            for attribute in attributes(line.style.attrs) {
                queue!(self.out, SetAttribute(attribute))?;
            }
            queue!(self.out, Print(text))?;
            queue!(self.out, SetAttribute(Attribute::Reset), ResetColor)?;
        }
        self.out.flush()
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = execute!(self.out, Show, DisableMouseCapture, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

fn attributes(attrs: Attr) -> Vec<Attribute> {
    let mut out = Vec::new();
    if attrs.contains(Attr::BOLD) {
        out.push(Attribute::Bold);
    }
    if attrs.contains(Attr::DIM) {
        out.push(Attribute::Dim);
    }
    if attrs.contains(Attr::UNDERLINE) {
        out.push(Attribute::Underlined);
    }
    if attrs.contains(Attr::REVERSE) {
        out.push(Attribute::Reverse);
    }
    out
}

// =============================================================================
// TESTS
// =============================================================================
