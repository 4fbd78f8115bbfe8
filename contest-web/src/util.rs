use wasm_bindgen::prelude::*;

#[wasm_bindgen(inline_js = "
    export function show_modal(elt) {
        bootstrap.Modal.getOrCreateInstance(elt).show();
    }
")]
extern "C" {
    pub fn show_modal(elt: &web_sys::Element);
}
