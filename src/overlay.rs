use crate::constants::{GALLERY_ID, GALLERY_STRIP_ID, HIDDEN_CLASS};
use tree_core::CardPlacement;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn show(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(GALLERY_ID) {
        _ = el.class_list().remove_1(HIDDEN_CLASS);
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(GALLERY_ID) {
        _ = el.class_list().add_1(HIDDEN_CLASS);
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

/// Position each card element of the film strip. Children of the strip are
/// matched to placements by index.
pub fn apply_cards(document: &web::Document, placements: &[CardPlacement]) {
    let Some(strip) = document.get_element_by_id(GALLERY_STRIP_ID) else {
        return;
    };
    let cards = strip.children();
    for p in placements {
        let Some(card) = cards
            .item(p.index as u32)
            .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
        else {
            continue;
        };
        let style = card.style();
        _ = style.set_property("transform", &p.css_transform());
        _ = style.set_property("opacity", &format!("{:.3}", p.opacity));
        _ = style.set_property("z-index", &p.z_index.to_string());
    }
}

/// Tracks the gallery's visibility so the DOM is only touched on change.
#[derive(Default)]
pub struct GalleryView {
    shown: bool,
}

impl GalleryView {
    pub fn sync(&mut self, document: &web::Document, open: bool, placements: &[CardPlacement]) {
        if open != self.shown {
            self.shown = open;
            if open {
                show(document);
            } else {
                hide(document);
            }
        }
        if open {
            apply_cards(document, placements);
        }
    }
}
