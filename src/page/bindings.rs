//! Role bindings - one upfront lookup pass over the page.
//!
//! Instead of every enhancement searching the page on every event, roles are
//! resolved once at init into optional handles. An absent role means the
//! page simply doesn't have that affordance and the enhancement no-ops.
//!
//! Matching follows the backend's naming conventions: the lookup field is
//! named `codigo_patrimonio`, the conference finalize button `finalizar`,
//! and delete links carry `excluir`/`delete` in their target.

use super::widgets::{FieldKind, Page};

/// Field name the backend gives the patrimony-code lookup input.
pub const LOOKUP_FIELD: &str = "codigo_patrimonio";

/// Action name of the conference finalize button.
pub const FINALIZE_ACTION: &str = "finalizar";

// =============================================================================
// HANDLES
// =============================================================================

/// Handle to a field: indices into `page.forms[form].fields[field]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldRef {
    pub form: usize,
    pub field: usize,
}

/// Handle to an action link: indices into `page.forms[form].links[link]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LinkRef {
    pub form: usize,
    pub link: usize,
}

/// Resolved roles for one page.
#[derive(Clone, Copy, Debug, Default)]
pub struct Bindings {
    /// The barcode lookup input, if this page has one.
    pub lookup: Option<FieldRef>,
    /// First search-style input (falls back to the lookup field).
    pub search: Option<FieldRef>,
    /// First "new record" affordance.
    pub new_record: Option<LinkRef>,
    /// First cancel-style action (non-destructive, non-new).
    pub cancel: Option<LinkRef>,
    /// Conference finalize button.
    pub finalize: Option<LinkRef>,
}

impl Bindings {
    /// Resolve all known roles against a page.
    pub fn bind(page: &Page) -> Self {
        let mut bindings = Self::default();

        for (form_idx, form) in page.forms.iter().enumerate() {
            for (field_idx, field) in form.fields.iter().enumerate() {
                let handle = FieldRef {
                    form: form_idx,
                    field: field_idx,
                };
                if bindings.lookup.is_none() && field.name == LOOKUP_FIELD {
                    bindings.lookup = Some(handle);
                }
                if bindings.search.is_none() && matches!(field.kind, FieldKind::Search) {
                    bindings.search = Some(handle);
                }
            }

            for (link_idx, link) in form.links.iter().enumerate() {
                let handle = LinkRef {
                    form: form_idx,
                    link: link_idx,
                };
                if bindings.finalize.is_none() && link.target == FINALIZE_ACTION {
                    bindings.finalize = Some(handle);
                }
                if bindings.new_record.is_none() && link.is_new_record() {
                    bindings.new_record = Some(handle);
                }
                if bindings.cancel.is_none()
                    && !link.is_destructive()
                    && !link.is_new_record()
                    && link.target != FINALIZE_ACTION
                {
                    bindings.cancel = Some(handle);
                }
            }
        }

        // A lookup field doubles as the search target when no dedicated
        // search input exists.
        if bindings.search.is_none() {
            bindings.search = bindings.lookup;
        }

        bindings
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::widgets::{ActionLink, Field, FieldKind, Form};

    fn sample_page() -> Page {
        let mut lookup_form = Form::new("busca", "/buscar");
        lookup_form
            .fields
            .push(Field::new(LOOKUP_FIELD, "Code", FieldKind::Text));

        let mut item_form = Form::new("item", "/item/salvar");
        item_form
            .fields
            .push(Field::new("descricao", "Description", FieldKind::Text));
        item_form.links.push(ActionLink::new("Back", "/itens"));
        item_form
            .links
            .push(ActionLink::new("New item", "/item/novo"));
        item_form
            .links
            .push(ActionLink::new("Delete", "/item/excluir/1"));
        item_form
            .links
            .push(ActionLink::new("Finalize", FINALIZE_ACTION));

        Page {
            forms: vec![lookup_form, item_form],
            ..Default::default()
        }
    }

    #[test]
    fn test_bind_resolves_roles() {
        let page = sample_page();
        let bindings = Bindings::bind(&page);

        assert_eq!(bindings.lookup, Some(FieldRef { form: 0, field: 0 }));
        assert_eq!(bindings.new_record, Some(LinkRef { form: 1, link: 1 }));
        assert_eq!(bindings.cancel, Some(LinkRef { form: 1, link: 0 }));
        assert_eq!(bindings.finalize, Some(LinkRef { form: 1, link: 3 }));
    }

    #[test]
    fn test_search_falls_back_to_lookup() {
        let page = sample_page();
        let bindings = Bindings::bind(&page);
        assert_eq!(bindings.search, bindings.lookup);
    }

    #[test]
    fn test_dedicated_search_preferred() {
        let mut page = sample_page();
        page.forms[1]
            .fields
            .push(Field::new("q", "Search", FieldKind::Search));

        let bindings = Bindings::bind(&page);
        assert_eq!(bindings.search, Some(FieldRef { form: 1, field: 1 }));
    }

    #[test]
    fn test_empty_page_binds_nothing() {
        let bindings = Bindings::bind(&Page::default());
        assert!(bindings.lookup.is_none());
        assert!(bindings.search.is_none());
        assert!(bindings.new_record.is_none());
        assert!(bindings.cancel.is_none());
        assert!(bindings.finalize.is_none());
    }
}
