use crate::constants::{HINT_NORMAL, HINT_PREVIEW_SUFFIX, HINT_SET_FROM_CLICK};

/// Hint line for the current interaction state. The hovered marker's name,
/// when known, replaces the generic instruction.
pub fn hint_text(set_from_click: bool, nearby_preview: bool, hovered_name: Option<&str>) -> String {
    let mut text = if set_from_click {
        HINT_SET_FROM_CLICK.to_string()
    } else {
        match hovered_name {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => HINT_NORMAL.to_string(),
        }
    };
    if nearby_preview && !set_from_click {
        text.push_str(HINT_PREVIEW_SUFFIX);
    }
    text
}
