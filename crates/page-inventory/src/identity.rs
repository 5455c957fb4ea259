use action_primitives::RawNode;

/// Identifier a listed element is reported under: `#id`, then `.a.b` for its
/// classes, then the lowercase tag name.
pub fn element_identifier(node: &RawNode) -> String {
    if !node.id.is_empty() {
        return format!("#{}", node.id);
    }
    let classes: Vec<&str> = node
        .class_name
        .as_deref()
        .map(|raw| raw.split_whitespace().collect())
        .unwrap_or_default();
    if classes.is_empty() {
        node.tag.to_lowercase()
    } else {
        format!(".{}", classes.join("."))
    }
}
