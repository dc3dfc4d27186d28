//! Application wiring - one Enhancer owning page, timers and components.
//!
//! The enhancer receives a backend-rendered [`Page`], binds known roles
//! once, and from then on reacts to input events and timer expirations. It
//! never talks to the backend itself: submissions and navigations are
//! queued in an outbox the embedding application drains and forwards.
//!
//! File fields are driven like every other field: the user types a path and
//! confirms with Enter, which stands in for the change event of a native
//! file picker.

use std::time::Instant;

use tracing::info;

use crate::config::Config;
use crate::enhance::countup::{CountUp, Step};
use crate::enhance::forms::{ConfirmDialog, PendingAction};
use crate::enhance::media::{MediaLoader, Rejection};
use crate::enhance::notify::{Notifier, Severity};
use crate::enhance::scanner::{EnterOutcome, ScanDetector};
use crate::enhance::shortcuts::Command;
use crate::enhance::{busy, forms, media, menu, shortcuts, tables};
use crate::input::{InputDispatcher, InputEvent, KeyboardEvent, MouseClick};
use crate::page::{Bindings, FieldKind, FieldRef, LinkRef, Page};
use crate::timer::{Debouncer, TimerQueue};

// =============================================================================
// TYPES
// =============================================================================

/// Timed effects applied to page state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerAction {
    /// Remove the invalid mark from a field.
    ClearInvalid(FieldRef),
    /// Safety fallback restoring a busy submit button.
    RestoreBusy(usize),
    /// Advance one count-up animation step.
    CountUpStep(usize),
    /// Resize events went quiet; reconfigure the nav menu.
    ResizeSettled,
    /// Filter typing went quiet; apply the term to the table.
    ApplyFilter,
}

/// A form submission handed to the backend collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submission {
    pub form: String,
    pub action: String,
    pub values: Vec<(String, String)>,
}

/// Outward effects for the embedding application.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outbound {
    Submit(Submission),
    Navigate(String),
}

/// Screen positions of clickable rows, produced by the renderer.
#[derive(Debug, Default)]
pub struct HitMap {
    /// Notice id per screen row.
    pub notice_rows: Vec<(u64, u16)>,
    /// Row of the menu toggle, if drawn.
    pub toggle_row: Option<u16>,
    /// Screen row per field, for click focusing and scroll centering.
    pub field_rows: Vec<(FieldRef, u16)>,
}

// =============================================================================
// ENHANCER
// =============================================================================

/// Input enhancement layer bound to one page.
pub struct Enhancer {
    config: Config,
    pub page: Page,
    pub bindings: Bindings,
    dispatcher: InputDispatcher<Command>,
    timers: TimerQueue<TimerAction>,
    pub notifier: Notifier,
    scanner: Option<ScanDetector>,
    countups: Vec<Option<CountUp>>,
    pub confirm: Option<ConfirmDialog>,
    media: MediaLoader,
    resize_debounce: Debouncer,
    filter_debounce: Debouncer,
    pub focus: Option<FieldRef>,
    /// Next keystroke replaces the focused field's content (select-all).
    select_pending: bool,
    pub scroll_y: u16,
    width: u16,
    height: u16,
    hit: HitMap,
    outbox: Vec<Outbound>,
    running: bool,
}

impl Enhancer {
    /// Bind to a page and run all init-time enhancements.
    pub fn new(mut page: Page, config: Config, size: (u16, u16), now: Instant) -> Self {
        let bindings = Bindings::bind(&page);
        let mut notifier = Notifier::new(config.notices.clone());

        // Backend-rendered messages get the same lifetime as local notices
        for message in page.server_messages.drain(..) {
            notifier.notify(now, message.text, message.severity);
        }

        if let Some(nav) = page.nav.as_mut() {
            menu::configure(nav, size.0, config.ui.narrow_cols);
        }
        tables::wrap_all(&mut page.tables);

        let mut dispatcher = InputDispatcher::new();
        shortcuts::register(&mut dispatcher);

        let scanner = bindings.lookup.map(|_| ScanDetector::new(&config.scanner));

        let mut timers = TimerQueue::new();
        let mut countups = Vec::with_capacity(page.stat_cards.len());
        for (idx, card) in page.stat_cards.iter_mut().enumerate() {
            match CountUp::start(&card.text, &config.ui) {
                Some(anim) => {
                    card.text = anim.initial();
                    countups.push(Some(anim));
                    timers.schedule(now, config.ui.countup_interval(), TimerAction::CountUpStep(idx));
                }
                None => countups.push(None),
            }
        }

        info!("shortcuts: Alt+N new | Alt+S save | Esc cancel | Ctrl+K search");

        let mut enhancer = Self {
            config,
            page,
            bindings,
            dispatcher,
            timers,
            notifier,
            scanner,
            countups,
            confirm: None,
            media: MediaLoader::new(),
            resize_debounce: Debouncer::new(),
            filter_debounce: Debouncer::new(),
            focus: None,
            select_pending: false,
            scroll_y: 0,
            width: size.0,
            height: size.1,
            hit: HitMap::default(),
            outbox: Vec::new(),
            running: true,
        };

        // Auto-focus the lookup field, content selected
        if enhancer.bindings.lookup.is_some() {
            enhancer.focus = enhancer.bindings.lookup;
            enhancer.select_pending = true;
        }
        enhancer
    }

    /// Still accepting events.
    pub fn running(&self) -> bool {
        self.running
    }

    /// Emit a notice.
    pub fn notify(&mut self, now: Instant, text: impl Into<String>, severity: Severity) {
        self.notifier.notify(now, text, severity);
    }

    /// Earliest pending deadline across all timers.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.timers.next_deadline(), self.notifier.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Drain queued submissions/navigations.
    pub fn take_outbox(&mut self) -> Vec<Outbound> {
        std::mem::take(&mut self.outbox)
    }

    /// Store the renderer's row map for click routing.
    pub fn set_hit_map(&mut self, hit: HitMap) {
        self.hit = hit;
    }

    // =========================================================================
    // EVENT HANDLING
    // =========================================================================

    pub fn handle_event(&mut self, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Key(key) => self.handle_key(&key, now),
            InputEvent::Click(click) => self.handle_click(click, now),
            InputEvent::Resize(w, h) => self.handle_resize(w, h, now),
            InputEvent::None => {}
        }
    }

    fn handle_key(&mut self, event: &KeyboardEvent, now: Instant) {
        if !event.is_press() {
            return;
        }

        if event.modifiers.ctrl && event.key == "c" {
            self.running = false;
            return;
        }

        // A confirm dialog owns the keyboard while present
        if let Some(dialog) = &self.confirm {
            if let Some(accepted) = dialog.decide(&event.key) {
                let pending = dialog.pending;
                self.confirm = None;
                if accepted {
                    self.execute_pending(pending, now);
                }
            }
            return;
        }

        if let Some(command) = self.dispatcher.dispatch(event) {
            self.run_command(command, now);
            return;
        }

        match event.key.as_str() {
            "Tab" => {
                if event.modifiers.shift {
                    self.focus_step(-1);
                } else {
                    self.focus_step(1);
                }
            }
            "Enter" => self.handle_enter(now),
            "Backspace" => self.edit_focused(now, |field| field.backspace()),
            "ArrowLeft" => self.scroll_table(-4),
            "ArrowRight" => self.scroll_table(4),
            "ArrowUp" => self.scroll_page(-1),
            "ArrowDown" => self.scroll_page(1),
            _ => {
                if let Some(c) = event.plain_char() {
                    self.handle_typed_char(c, now);
                }
            }
        }
    }

    fn handle_typed_char(&mut self, c: char, now: Instant) {
        let Some(focus) = self.focus else { return };

        if self.select_pending {
            if let Some(field) = self.field_mut(focus) {
                field.value.clear();
            }
            self.select_pending = false;
        }

        self.edit_focused(now, |field| field.push_char(c));

        // The lookup field also feeds the scan detector
        if self.bindings.lookup == Some(focus) {
            if let Some(scanner) = self.scanner.as_mut() {
                scanner.on_char(c, now);
            }
        }
    }

    /// Apply an edit to the focused field and run the per-input reactions
    /// (invalid-mark clearing, debounced table filtering).
    fn edit_focused(&mut self, now: Instant, edit: impl FnOnce(&mut crate::page::Field)) {
        let Some(focus) = self.focus else { return };
        let Some(field) = self.field_mut(focus) else { return };
        edit(field);
        let is_search = matches!(field.kind, FieldKind::Search);

        forms::clear_mark(&mut self.page.forms[focus.form], focus.field);

        if is_search {
            self.filter_debounce.trigger(
                &mut self.timers,
                now,
                self.config.ui.filter_debounce(),
                TimerAction::ApplyFilter,
            );
        }
    }

    fn handle_enter(&mut self, now: Instant) {
        let Some(focus) = self.focus else { return };

        // Lookup field: the scan detector decides what Enter means
        if self.bindings.lookup == Some(focus) {
            self.lookup_enter(now);
            return;
        }

        let is_file = {
            let Some(field) = self.field_mut(focus) else { return };
            match field.kind {
                FieldKind::TextArea => {
                    field.push_char('\n');
                    return;
                }
                FieldKind::File(_) => true,
                FieldKind::Text | FieldKind::Search => false,
            }
        };
        if is_file {
            self.file_selected(focus, now);
        } else {
            self.submit_form(focus.form, now);
        }
    }

    fn lookup_enter(&mut self, now: Instant) {
        let Some(lookup) = self.bindings.lookup else { return };
        let Some(scanner) = self.scanner.as_mut() else { return };

        let field_value = self.page.forms[lookup.form].fields[lookup.field].value.clone();
        match scanner.on_enter(now, &field_value) {
            EnterOutcome::Submit { value, from_scanner } => {
                if from_scanner {
                    self.page.forms[lookup.form].fields[lookup.field].value = value;
                }
                self.submit_form(lookup.form, now);
            }
            EnterOutcome::Empty => {
                self.notifier
                    .notify(now, "Please enter or scan a code", Severity::Warning);
                self.focus = Some(lookup);
                self.select_pending = false;
            }
        }
    }

    fn handle_click(&mut self, click: MouseClick, now: Instant) {
        if let Some((id, _)) = self
            .hit
            .notice_rows
            .iter()
            .find(|(_, row)| *row == click.row)
            .copied()
        {
            self.notifier.dismiss(now, id);
            return;
        }

        if self.hit.toggle_row == Some(click.row) {
            if let Some(nav) = self.page.nav.as_mut() {
                menu::toggle(nav);
            }
            return;
        }

        if let Some((field, _)) = self
            .hit
            .field_rows
            .iter()
            .find(|(_, row)| *row == click.row)
            .copied()
        {
            self.focus = Some(field);
            self.select_pending = false;
        }
    }

    fn handle_resize(&mut self, width: u16, height: u16, now: Instant) {
        self.width = width;
        self.height = height;
        self.resize_debounce.trigger(
            &mut self.timers,
            now,
            self.config.ui.resize_debounce(),
            TimerAction::ResizeSettled,
        );
    }

    // =========================================================================
    // COMMANDS AND ACTIONS
    // =========================================================================

    fn run_command(&mut self, command: Command, now: Instant) {
        match command {
            Command::NewRecord => {
                if let Some(link) = self.bindings.new_record {
                    self.navigate(link);
                }
            }
            Command::SubmitFirstForm => {
                if !self.page.forms.is_empty() {
                    self.submit_form(0, now);
                }
            }
            Command::Cancel => {
                if let Some(link) = self.bindings.cancel {
                    self.navigate(link);
                }
            }
            Command::FocusSearch => {
                if let Some(search) = self.bindings.search {
                    self.focus = Some(search);
                    self.select_pending = true;
                }
            }
        }
    }

    /// Activate an action link. Destructive targets and the finalize button
    /// go through a confirm dialog first. Stale handles are ignored.
    pub fn activate_link(&mut self, link: LinkRef) {
        let Some(action) = self.link_at(link) else { return };
        let target = action.target.clone();
        if action.is_destructive() {
            self.confirm = Some(ConfirmDialog::for_delete(link));
        } else if Some(link) == self.bindings.finalize {
            self.confirm = Some(ConfirmDialog::for_finalize(link));
        } else {
            info!(%target, "navigating");
            self.outbox.push(Outbound::Navigate(target));
        }
    }

    fn navigate(&mut self, link: LinkRef) {
        self.activate_link(link);
    }

    fn execute_pending(&mut self, pending: PendingAction, now: Instant) {
        match pending {
            PendingAction::Delete(link) => {
                let Some(action) = self.link_at(link) else { return };
                let target = action.target.clone();
                info!(%target, "delete confirmed");
                self.outbox.push(Outbound::Navigate(target));
            }
            PendingAction::Finalize(link) => {
                info!("conference finalize confirmed");
                self.submit_form(link.form, now);
            }
        }
    }

    // =========================================================================
    // SUBMISSION
    // =========================================================================

    /// Run the guards and, if they pass, queue the submission.
    /// A stale form index is ignored.
    pub fn submit_form(&mut self, form_idx: usize, now: Instant) {
        if form_idx >= self.page.forms.len() {
            return;
        }

        // Lookup guard: specific message, runs before the generic scan
        if let Some(lookup) = self.bindings.lookup {
            if lookup.form == form_idx
                && self.page.forms[form_idx].fields[lookup.field].is_blank()
            {
                self.notifier.notify(
                    now,
                    "Please enter or scan a patrimony code",
                    Severity::Error,
                );
                self.focus = Some(lookup);
                self.select_pending = false;
                return;
            }
        }

        let result = forms::guard_required(&mut self.page.forms[form_idx]);
        if !result.ok() {
            for field in &result.invalid {
                self.timers.schedule(
                    now,
                    self.config.forms.invalid_mark(),
                    TimerAction::ClearInvalid(FieldRef {
                        form: form_idx,
                        field: *field,
                    }),
                );
            }
            self.notifier
                .notify(now, "Please fill in all required fields", Severity::Error);
            if let Some(first) = result.first_invalid() {
                let field = FieldRef {
                    form: form_idx,
                    field: first,
                };
                self.focus = Some(field);
                self.select_pending = false;
                self.scroll_to_center(field);
            }
            return;
        }

        if busy::start(&mut self.page.forms[form_idx]) {
            self.timers.schedule(
                now,
                self.config.forms.busy_restore(),
                TimerAction::RestoreBusy(form_idx),
            );
        }

        let form = &self.page.forms[form_idx];
        let submission = Submission {
            form: form.name.clone(),
            action: form.action.clone(),
            values: form
                .fields
                .iter()
                .map(|f| (f.name.clone(), f.value.clone()))
                .collect(),
        };
        info!(form = %submission.form, action = %submission.action, "form submitted");
        self.outbox.push(Outbound::Submit(submission));
    }

    // =========================================================================
    // FILE SELECTION
    // =========================================================================

    fn file_selected(&mut self, field_ref: FieldRef, now: Instant) {
        let Some(field) = self.field_mut(field_ref) else { return };
        let path = std::path::PathBuf::from(field.value.trim());
        if path.as_os_str().is_empty() {
            return;
        }

        let max_bytes = self.config.media.max_bytes;
        match media::validate(&path, max_bytes) {
            Ok(_) => {
                if let Some(field) = self.field_mut(field_ref) {
                    if let FieldKind::File(state) = &mut field.kind {
                        // Any prior preview is replaced by the new one
                        state.preview = None;
                        state.pending = true;
                    }
                }
                self.media.load(field_ref, path);
            }
            Err(rejection) => {
                let severity = match rejection {
                    Rejection::NotImage => Severity::Warning,
                    Rejection::TooLarge(_) | Rejection::Unreadable => Severity::Error,
                };
                let text = rejection.message(max_bytes);
                if let Some(field) = self.field_mut(field_ref) {
                    field.value.clear();
                    if let FieldKind::File(state) = &mut field.kind {
                        state.preview = None;
                        state.pending = false;
                    }
                }
                self.notifier.notify(now, text, severity);
            }
        }
    }

    // =========================================================================
    // TICK
    // =========================================================================

    /// Fire due timers and drain async completions.
    pub fn tick(&mut self, now: Instant) {
        self.notifier.tick(now);

        for action in self.timers.fire_due(now) {
            match action {
                TimerAction::ClearInvalid(field) => {
                    if let Some(form) = self.page.forms.get_mut(field.form) {
                        forms::clear_mark(form, field.field);
                    }
                }
                TimerAction::RestoreBusy(form) => {
                    if let Some(form) = self.page.forms.get_mut(form) {
                        busy::restore(form);
                    }
                }
                TimerAction::CountUpStep(idx) => self.countup_step(idx, now),
                TimerAction::ResizeSettled => {
                    if let Some(nav) = self.page.nav.as_mut() {
                        menu::on_resize_settled(nav, self.width, self.config.ui.narrow_cols);
                    }
                }
                TimerAction::ApplyFilter => self.apply_filter(),
            }
        }

        while let Some(event) = self.media.try_recv() {
            match event.result {
                Ok(preview) => {
                    if let Some(field) = self.field_mut(event.field) {
                        if let FieldKind::File(state) = &mut field.kind {
                            state.pending = false;
                            state.preview = Some(preview);
                        }
                    }
                }
                Err(_) => {
                    if let Some(field) = self.field_mut(event.field) {
                        field.value.clear();
                        if let FieldKind::File(state) = &mut field.kind {
                            state.pending = false;
                        }
                    }
                    self.notifier.notify(
                        now,
                        format!("Could not load preview for {}", event.file_name),
                        Severity::Error,
                    );
                }
            }
        }
    }

    fn countup_step(&mut self, idx: usize, now: Instant) {
        let Some(slot) = self.countups.get_mut(idx) else { return };
        let Some(anim) = slot.as_mut() else { return };
        match anim.step() {
            Step::Running(text) => {
                self.page.stat_cards[idx].text = text;
                self.timers.schedule(
                    now,
                    self.config.ui.countup_interval(),
                    TimerAction::CountUpStep(idx),
                );
            }
            Step::Done(text) => {
                self.page.stat_cards[idx].text = text;
                *slot = None;
            }
        }
    }

    fn apply_filter(&mut self) {
        let Some(search) = self.bindings.search else { return };
        // Only a dedicated search input drives the table filter
        if !matches!(
            self.page.forms[search.form].fields[search.field].kind,
            FieldKind::Search
        ) {
            return;
        }
        let term = self.page.forms[search.form].fields[search.field].value.clone();
        if let Some(table) = self.page.tables.first_mut() {
            tables::apply_filter(table, &term);
        }
    }

    // =========================================================================
    // FOCUS AND SCROLL
    // =========================================================================

    fn link_at(&self, link: LinkRef) -> Option<&crate::page::ActionLink> {
        self.page
            .forms
            .get(link.form)
            .and_then(|form| form.links.get(link.link))
    }

    fn field_mut(&mut self, field: FieldRef) -> Option<&mut crate::page::Field> {
        self.page
            .forms
            .get_mut(field.form)
            .and_then(|form| form.fields.get_mut(field.field))
    }

    fn all_fields(&self) -> Vec<FieldRef> {
        let mut refs = Vec::new();
        for (form_idx, form) in self.page.forms.iter().enumerate() {
            for field_idx in 0..form.fields.len() {
                refs.push(FieldRef {
                    form: form_idx,
                    field: field_idx,
                });
            }
        }
        refs
    }

    fn focus_step(&mut self, direction: i32) {
        let fields = self.all_fields();
        if fields.is_empty() {
            return;
        }
        let next = match self.focus.and_then(|f| fields.iter().position(|x| *x == f)) {
            Some(pos) => {
                let len = fields.len() as i32;
                ((pos as i32 + direction).rem_euclid(len)) as usize
            }
            None => 0,
        };
        self.focus = Some(fields[next]);
        self.select_pending = false;
    }

    fn scroll_page(&mut self, delta: i32) {
        if delta < 0 {
            self.scroll_y = self.scroll_y.saturating_sub(delta.unsigned_abs() as u16);
        } else {
            self.scroll_y = self.scroll_y.saturating_add(delta as u16);
        }
    }

    fn scroll_table(&mut self, delta: i32) {
        // Fields have no cursor, so the horizontal arrows are free for the
        // table even while a field holds focus
        if let Some(table) = self.page.tables.first_mut() {
            tables::scroll_by(table, delta, self.width);
        }
    }

    /// Bring a field's row to the vertical center of the viewport.
    fn scroll_to_center(&mut self, field: FieldRef) {
        let Some((_, row)) = self.hit.field_rows.iter().find(|(f, _)| *f == field) else {
            return;
        };
        let absolute = self.scroll_y.saturating_add(*row);
        self.scroll_y = absolute.saturating_sub(self.height / 2);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use crate::page::{ActionLink, Field, Form, NavMenu, ServerMessage, StatCard, SubmitButton, Table};
    use crate::page::{FINALIZE_ACTION, LOOKUP_FIELD};
    use std::time::Duration;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn sample_page() -> Page {
        let mut lookup_form = Form::new("busca", "/buscar");
        lookup_form
            .fields
            .push(Field::new(LOOKUP_FIELD, "Code", FieldKind::Text));
        lookup_form.submit = Some(SubmitButton::new("Search"));

        let mut item_form = Form::new("item", "/item/salvar");
        item_form
            .fields
            .push(Field::new("descricao", "Description", FieldKind::Text).required());
        item_form.fields.push(
            Field::new("obs", "Notes", FieldKind::TextArea).with_max_length(200),
        );
        item_form.submit = Some(SubmitButton::new("Save"));
        item_form.links.push(ActionLink::new("Back", "/itens"));
        item_form
            .links
            .push(ActionLink::new("New", "/item/novo"));
        item_form
            .links
            .push(ActionLink::new("Delete", "/item/excluir/7"));
        item_form
            .links
            .push(ActionLink::new("Finalize", FINALIZE_ACTION));

        let mut table = Table::new("Items", vec!["Code".into(), "Name".into()]);
        table.rows.push(vec!["1001".into(), "Monitor".into()]);

        Page {
            nav: Some(NavMenu::new(vec!["Home".into(), "Items".into()])),
            forms: vec![lookup_form, item_form],
            tables: vec![table],
            stat_cards: vec![StatCard::new("Total", "250")],
            server_messages: vec![ServerMessage {
                text: "Welcome".into(),
                severity: Severity::Info,
            }],
        }
    }

    fn enhancer() -> (Enhancer, Instant) {
        let now = Instant::now();
        (
            Enhancer::new(sample_page(), Config::default(), (120, 40), now),
            now,
        )
    }

    fn type_text(e: &mut Enhancer, text: &str, start: Instant, gap: Duration) -> Instant {
        let mut t = start;
        for c in text.chars() {
            e.handle_event(InputEvent::Key(KeyboardEvent::new(c.to_string())), t);
            t += gap;
        }
        t
    }

    #[test]
    fn test_init_adopts_server_messages_and_focuses_lookup() {
        let (e, _) = enhancer();
        assert_eq!(e.notifier.notices().len(), 1);
        assert_eq!(e.notifier.notices()[0].text, "Welcome");
        assert_eq!(e.focus, e.bindings.lookup);
        assert!(e.page.tables[0].wrapped);
        // Wide terminal: menu stays open
        assert!(e.page.nav.as_ref().unwrap().toggle.is_none());
    }

    #[test]
    fn test_countup_starts_at_zero_and_finishes_exact() {
        let (mut e, now) = enhancer();
        assert_eq!(e.page.stat_cards[0].text, "0");

        // Drive well past the animation end
        let mut t = now;
        for _ in 0..120 {
            t += ms(25);
            e.tick(t);
        }
        assert_eq!(e.page.stat_cards[0].text, "250");
    }

    #[test]
    fn test_scanner_burst_submits_with_buffer_value() {
        let (mut e, now) = enhancer();
        let t = type_text(&mut e, "INV12345", now, ms(10));
        e.handle_event(InputEvent::Key(KeyboardEvent::new("Enter")), t);

        let lookup = e.bindings.lookup.unwrap();
        assert_eq!(e.page.forms[lookup.form].fields[lookup.field].value, "INV12345");
        let outbox = e.take_outbox();
        assert_eq!(outbox.len(), 1);
        match &outbox[0] {
            Outbound::Submit(sub) => {
                assert_eq!(sub.form, "busca");
                assert_eq!(sub.values[0].1, "INV12345");
            }
            other => panic!("expected submit, got {:?}", other),
        }
    }

    #[test]
    fn test_lookup_enter_blank_warns_and_keeps_focus() {
        let (mut e, now) = enhancer();
        let before = e.notifier.notices().len();
        e.handle_event(InputEvent::Key(KeyboardEvent::new("Enter")), now + ms(200));

        assert!(e.take_outbox().is_empty());
        assert_eq!(e.notifier.notices().len(), before + 1);
        assert_eq!(e.focus, e.bindings.lookup);
        assert_eq!(
            e.notifier.notices().last().unwrap().severity,
            Severity::Warning
        );
    }

    #[test]
    fn test_required_guard_blocks_and_marks() {
        let (mut e, now) = enhancer();
        e.submit_form(1, now);

        assert!(e.take_outbox().is_empty());
        assert!(e.page.forms[1].fields[0].invalid);
        assert_eq!(e.focus, Some(FieldRef { form: 1, field: 0 }));
        // Error notice on top of the welcome message
        assert_eq!(e.notifier.notices().last().unwrap().severity, Severity::Error);

        // Mark clears after the timeout
        e.tick(now + ms(3000));
        assert!(!e.page.forms[1].fields[0].invalid);
    }

    #[test]
    fn test_input_clears_invalid_mark_immediately() {
        let (mut e, now) = enhancer();
        e.submit_form(1, now);
        assert!(e.page.forms[1].fields[0].invalid);

        // Focus already moved to the invalid field; typing clears the mark
        e.handle_event(InputEvent::Key(KeyboardEvent::new("M")), now + ms(50));
        assert!(!e.page.forms[1].fields[0].invalid);
    }

    #[test]
    fn test_valid_submit_sets_busy_and_restores() {
        let (mut e, now) = enhancer();
        e.page.forms[1].fields[0].value = "Monitor".into();
        e.submit_form(1, now);

        let outbox = e.take_outbox();
        assert_eq!(outbox.len(), 1);
        let button = e.page.forms[1].submit.as_ref().unwrap();
        assert!(button.disabled);

        e.tick(now + ms(10_000));
        let button = e.page.forms[1].submit.as_ref().unwrap();
        assert!(!button.disabled);
        assert_eq!(button.label, "Save");
    }

    #[test]
    fn test_delete_link_requires_confirmation() {
        let (mut e, now) = enhancer();
        e.activate_link(LinkRef { form: 1, link: 2 });
        assert!(e.confirm.is_some());

        // Decline: nothing happens
        e.handle_event(InputEvent::Key(KeyboardEvent::new("n")), now);
        assert!(e.confirm.is_none());
        assert!(e.take_outbox().is_empty());

        // Accept: navigation queued
        e.activate_link(LinkRef { form: 1, link: 2 });
        e.handle_event(InputEvent::Key(KeyboardEvent::new("y")), now);
        assert_eq!(
            e.take_outbox(),
            vec![Outbound::Navigate("/item/excluir/7".into())]
        );
    }

    #[test]
    fn test_finalize_confirm_submits_form() {
        let (mut e, now) = enhancer();
        e.page.forms[1].fields[0].value = "done".into();
        e.activate_link(LinkRef { form: 1, link: 3 });
        assert!(e.confirm.is_some());

        e.handle_event(InputEvent::Key(KeyboardEvent::new("Enter")), now);
        let outbox = e.take_outbox();
        assert!(matches!(&outbox[0], Outbound::Submit(s) if s.form == "item"));
    }

    #[test]
    fn test_shortcut_alt_n_navigates_to_new() {
        let (mut e, now) = enhancer();
        let event = KeyboardEvent::with_modifiers("n", Modifiers::alt());
        e.handle_event(InputEvent::Key(event), now);
        assert_eq!(e.take_outbox(), vec![Outbound::Navigate("/item/novo".into())]);
    }

    #[test]
    fn test_ctrl_k_focuses_search_with_select() {
        let (mut e, now) = enhancer();
        e.focus = None;
        let lookup = e.bindings.lookup.unwrap();
        e.page.forms[lookup.form].fields[lookup.field].value = "OLD".into();

        let event = KeyboardEvent::with_modifiers("k", Modifiers::ctrl());
        e.handle_event(InputEvent::Key(event), now);
        assert_eq!(e.focus, e.bindings.search);

        // First keystroke replaces the selected content
        e.handle_event(InputEvent::Key(KeyboardEvent::new("9")), now + ms(10));
        assert_eq!(e.page.forms[lookup.form].fields[lookup.field].value, "9");
    }

    #[test]
    fn test_resize_debounced_menu_collapse() {
        let (mut e, now) = enhancer();
        e.handle_event(InputEvent::Resize(60, 40), now);
        // Not yet: debounce window still open
        assert!(e.page.nav.as_ref().unwrap().toggle.is_none());

        e.tick(now + ms(250));
        let nav = e.page.nav.as_ref().unwrap();
        assert!(nav.toggle.is_some());
        assert!(!nav.menu_visible);
    }

    #[test]
    fn test_notice_click_dismisses_via_hit_map() {
        let (mut e, now) = enhancer();
        let id = e.notifier.notices()[0].id;
        e.set_hit_map(HitMap {
            notice_rows: vec![(id, 0)],
            ..Default::default()
        });

        e.handle_event(InputEvent::Click(MouseClick { column: 5, row: 0 }), now);
        assert_eq!(
            e.notifier.notices()[0].phase,
            crate::enhance::notify::Phase::Fading
        );
    }

    #[test]
    fn test_escape_cancel_navigates_back() {
        let (mut e, now) = enhancer();
        e.handle_event(InputEvent::Key(KeyboardEvent::new("Escape")), now);
        assert_eq!(e.take_outbox(), vec![Outbound::Navigate("/itens".into())]);
    }

    #[test]
    fn test_arrow_keys_scroll_table_while_field_focused() {
        // Narrow terminal so the table overflows the viewport
        let now = Instant::now();
        let mut e = Enhancer::new(sample_page(), Config::default(), (10, 40), now);
        assert!(e.focus.is_some());

        e.handle_event(InputEvent::Key(KeyboardEvent::new("ArrowRight")), now);
        assert!(e.page.tables[0].scroll_x > 0);

        e.handle_event(InputEvent::Key(KeyboardEvent::new("ArrowLeft")), now);
        assert_eq!(e.page.tables[0].scroll_x, 0);
    }

    #[test]
    fn test_stale_link_ref_is_ignored() {
        let (mut e, now) = enhancer();
        e.activate_link(LinkRef { form: 9, link: 0 });
        e.activate_link(LinkRef { form: 1, link: 99 });
        assert!(e.confirm.is_none());
        assert!(e.take_outbox().is_empty());

        // Same for a stale form index on submit
        e.submit_form(42, now);
        assert!(e.take_outbox().is_empty());
    }

    #[test]
    fn test_tab_cycles_focus() {
        let (mut e, _) = enhancer();
        assert_eq!(e.focus, Some(FieldRef { form: 0, field: 0 }));
        e.focus_step(1);
        assert_eq!(e.focus, Some(FieldRef { form: 1, field: 0 }));
        e.focus_step(-1);
        assert_eq!(e.focus, Some(FieldRef { form: 0, field: 0 }));
        // Wraps around backwards
        e.focus_step(-1);
        assert_eq!(e.focus, Some(FieldRef { form: 1, field: 1 }));
    }
}
