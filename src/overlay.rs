use crate::constants::HINT_ELEMENT_ID;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HINT_ELEMENT_ID) {
        _ = el.class_list().remove_1("hidden");
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(HINT_ELEMENT_ID) {
        _ = el.class_list().add_1("hidden");
        // fallback for pages without a `.hidden` rule
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
pub fn is_hidden(document: &web::Document) -> bool {
    let Some(el) = document.get_element_by_id(HINT_ELEMENT_ID) else {
        return false;
    };
    el.class_list().contains("hidden")
        || el
            .get_attribute("style")
            .is_some_and(|s| s.contains("display:none"))
}

#[inline]
pub fn toggle(document: &web::Document) {
    if is_hidden(document) {
        show(document);
    } else {
        hide(document);
    }
}

/// Replaces the hint text. Text is set, not HTML, since target names come
/// from user data.
pub fn update_hint(document: &web::Document, text: &str) {
    if let Some(el) = document.get_element_by_id(HINT_ELEMENT_ID) {
        el.set_text_content(Some(text));
    }
}
