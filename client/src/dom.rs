/// Text content of the element with `id`, if the page has one.
pub fn element_text(id: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    document.get_element_by_id(id)?.text_content()
}
