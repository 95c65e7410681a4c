/// Keyboard shortcuts understood by the overlay while it has focus.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    CancelPlacement,
    ToggleGrid,
    ToggleNearbyPreview,
    ToggleHint,
}

#[inline]
pub fn action_for_key(key: &str) -> Option<KeyAction> {
    match key {
        "Escape" | "Esc" => Some(KeyAction::CancelPlacement),
        "g" | "G" => Some(KeyAction::ToggleGrid),
        "n" | "N" => Some(KeyAction::ToggleNearbyPreview),
        "h" | "H" => Some(KeyAction::ToggleHint),
        _ => None,
    }
}

/// Keys typed into form fields belong to the field, not the overlay.
#[inline]
pub fn is_text_entry_tag(tag_name: &str) -> bool {
    matches!(
        tag_name.to_ascii_uppercase().as_str(),
        "INPUT" | "TEXTAREA" | "SELECT"
    )
}
