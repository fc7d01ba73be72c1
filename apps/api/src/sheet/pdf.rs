//! AcroForm plumbing over `lopdf` — slot discovery, text-string codec, value writes.
//!
//! A slot is a terminal form field: a field dictionary carrying `/T` whose kids (if
//! any) are bare widget annotations. Slots are found through the AcroForm `/Fields`
//! tree first, then through every page's `/Annots` so that widgets a broken
//! template forgot to register in `/Fields` are still filled.

use std::collections::HashSet;

use lopdf::{Dictionary, Document, Object, ObjectId, StringFormat};

const UTF16_BE_BOM: [u8; 2] = [0xFE, 0xFF];
const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];
const MAX_FIELD_DEPTH: usize = 32;

/// A fillable field in a loaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSlot {
    pub id: ObjectId,
    /// Fully qualified name (`parent.child`).
    pub name: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Text string codec
// ────────────────────────────────────────────────────────────────────────────

/// Decodes a PDF text string: UTF-16BE or UTF-8 when BOM-prefixed, Latin-1 otherwise.
pub fn decode_text_string(bytes: &[u8]) -> String {
    if let Some(rest) = bytes.strip_prefix(&UTF16_BE_BOM) {
        let units: Vec<u16> = rest
            .chunks_exact(2)
            .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
            .collect();
        String::from_utf16_lossy(&units)
    } else if let Some(rest) = bytes.strip_prefix(&UTF8_BOM) {
        String::from_utf8_lossy(rest).into_owned()
    } else {
        bytes.iter().map(|&b| b as char).collect()
    }
}

/// Encodes a value for `/V`. ASCII stays a literal; anything else becomes UTF-16BE.
pub fn encode_text_string(value: &str) -> Object {
    if value.is_ascii() {
        return Object::String(value.as_bytes().to_vec(), StringFormat::Literal);
    }
    let mut bytes = UTF16_BE_BOM.to_vec();
    for unit in value.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

// ────────────────────────────────────────────────────────────────────────────
// Slot discovery
// ────────────────────────────────────────────────────────────────────────────

/// Every terminal field in the document, AcroForm order first, then page order.
pub fn collect_slots(doc: &Document) -> Vec<TemplateSlot> {
    let mut walker = SlotWalker {
        doc,
        visited: HashSet::new(),
        slots: Vec::new(),
    };

    let fields = acroform(doc)
        .and_then(|form| form.get(b"Fields").ok())
        .and_then(|obj| resolve(doc, obj))
        .and_then(|obj| obj.as_array().ok());
    for field in fields.into_iter().flatten() {
        if let Ok(id) = field.as_reference() {
            walker.visit_field(id, None, 0);
        }
    }

    for page_id in doc.get_pages().into_values() {
        let annots = doc
            .get_dictionary(page_id)
            .ok()
            .and_then(|page| page.get(b"Annots").ok())
            .and_then(|obj| resolve(doc, obj))
            .and_then(|obj| obj.as_array().ok());
        for annot in annots.into_iter().flatten() {
            if let Ok(id) = annot.as_reference() {
                walker.visit_widget(id);
            }
        }
    }

    walker.slots
}

struct SlotWalker<'a> {
    doc: &'a Document,
    visited: HashSet<ObjectId>,
    slots: Vec<TemplateSlot>,
}

impl SlotWalker<'_> {
    fn visit_field(&mut self, id: ObjectId, parent_name: Option<&str>, depth: usize) {
        if depth > MAX_FIELD_DEPTH || !self.visited.insert(id) {
            return;
        }
        let Some(dict) = dictionary(self.doc, id) else {
            return;
        };
        let Some(partial) = text_entry(self.doc, dict, b"T") else {
            return;
        };
        let name = match parent_name {
            Some(parent) => format!("{parent}.{partial}"),
            None => partial,
        };

        let children = child_fields(self.doc, dict);
        if children.is_empty() {
            self.slots.push(TemplateSlot { id, name });
        } else {
            for child in children {
                self.visit_field(child, Some(&name), depth + 1);
            }
        }
    }

    fn visit_widget(&mut self, id: ObjectId) {
        let Some(dict) = dictionary(self.doc, id) else {
            return;
        };
        // A widget merged with its field carries /T; a bare widget points at its field.
        let field_id = if dict.has(b"T") {
            id
        } else {
            match dict.get(b"Parent").and_then(Object::as_reference) {
                Ok(parent) => parent,
                Err(_) => return,
            }
        };
        if self.visited.contains(&field_id) {
            return;
        }
        let Some(field) = dictionary(self.doc, field_id) else {
            return;
        };
        if !child_fields(self.doc, field).is_empty() {
            return;
        }
        self.visited.insert(field_id);
        if let Some(name) = qualified_name(self.doc, field_id) {
            self.slots.push(TemplateSlot { id: field_id, name });
        }
    }
}

/// Kids of a field that are themselves fields (carry `/T`), as opposed to widgets.
fn child_fields(doc: &Document, dict: &Dictionary) -> Vec<ObjectId> {
    dict.get(b"Kids")
        .ok()
        .and_then(|obj| resolve(doc, obj))
        .and_then(|obj| obj.as_array().ok())
        .map(|kids| {
            kids.iter()
                .filter_map(|kid| kid.as_reference().ok())
                .filter(|kid| dictionary(doc, *kid).is_some_and(|d| d.has(b"T")))
                .collect()
        })
        .unwrap_or_default()
}

/// Joins `/T` up the `/Parent` chain.
fn qualified_name(doc: &Document, id: ObjectId) -> Option<String> {
    let mut parts = Vec::new();
    let mut current = Some(id);
    while let Some(node) = current {
        if parts.len() > MAX_FIELD_DEPTH {
            return None;
        }
        let dict = dictionary(doc, node)?;
        if let Some(partial) = text_entry(doc, dict, b"T") {
            parts.push(partial);
        }
        current = dict.get(b"Parent").and_then(Object::as_reference).ok();
    }
    if parts.is_empty() {
        return None;
    }
    parts.reverse();
    Some(parts.join("."))
}

// ────────────────────────────────────────────────────────────────────────────
// Reads and writes
// ────────────────────────────────────────────────────────────────────────────

/// Current `/V` of a slot as text. Names (checkbox states) are returned verbatim.
pub fn slot_value(doc: &Document, slot: &TemplateSlot) -> Option<String> {
    let dict = dictionary(doc, slot.id)?;
    match resolve(doc, dict.get(b"V").ok()?)? {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        Object::Name(name) => Some(String::from_utf8_lossy(name).into_owned()),
        _ => None,
    }
}

/// Sets `/V` and drops stale appearance streams on the field and its widgets.
/// Returns false if the slot's dictionary is gone.
pub fn set_slot_value(doc: &mut Document, slot: &TemplateSlot, value: &str) -> bool {
    let read: &Document = doc;
    let widget_ids: Vec<ObjectId> = dictionary(read, slot.id)
        .and_then(|dict| dict.get(b"Kids").ok())
        .and_then(|obj| resolve(read, obj))
        .and_then(|obj| obj.as_array().ok())
        .map(|kids| kids.iter().filter_map(|k| k.as_reference().ok()).collect())
        .unwrap_or_default();

    let Some(field) = dictionary_mut(doc, slot.id) else {
        return false;
    };
    field.set("V", encode_text_string(value));
    field.remove(b"AP");

    for widget_id in widget_ids {
        if let Some(widget) = dictionary_mut(doc, widget_id) {
            widget.remove(b"AP");
        }
    }
    true
}

/// Sets `/NeedAppearances true` so viewers rebuild the appearances we removed.
pub fn request_appearance_regeneration(doc: &mut Document) {
    let Some(root) = root_id(doc) else {
        return;
    };
    let form_ref = doc
        .get_dictionary(root)
        .ok()
        .and_then(|catalog| catalog.get(b"AcroForm").ok())
        .map(|obj| obj.as_reference().ok());

    let form = match form_ref {
        Some(Some(form_id)) => dictionary_mut(doc, form_id),
        Some(None) => dictionary_mut(doc, root)
            .and_then(|catalog| catalog.get_mut(b"AcroForm").ok())
            .and_then(|obj| obj.as_dict_mut().ok()),
        None => None,
    };
    if let Some(form) = form {
        form.set("NeedAppearances", Object::Boolean(true));
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Internal helpers
// ────────────────────────────────────────────────────────────────────────────

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Option<&'a Object> {
    match obj {
        Object::Reference(id) => doc.get_object(*id).ok(),
        other => Some(other),
    }
}

fn root_id(doc: &Document) -> Option<ObjectId> {
    doc.trailer.get(b"Root").and_then(Object::as_reference).ok()
}

fn acroform(doc: &Document) -> Option<&Dictionary> {
    let catalog = doc.get_dictionary(root_id(doc)?).ok()?;
    resolve(doc, catalog.get(b"AcroForm").ok()?)?.as_dict().ok()
}

fn dictionary(doc: &Document, id: ObjectId) -> Option<&Dictionary> {
    doc.get_object(id).ok()?.as_dict().ok()
}

fn dictionary_mut(doc: &mut Document, id: ObjectId) -> Option<&mut Dictionary> {
    doc.get_object_mut(id).ok()?.as_dict_mut().ok()
}

fn text_entry(doc: &Document, dict: &Dictionary, key: &[u8]) -> Option<String> {
    match resolve(doc, dict.get(key).ok()?)? {
        Object::String(bytes, _) => Some(decode_text_string(bytes)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sheet::test_support::FormBuilder;

    #[test]
    fn test_decode_latin1() {
        assert_eq!(decode_text_string(b"For\xe7a"), "Força");
    }

    #[test]
    fn test_decode_utf16_with_bom() {
        let bytes = [0xFE, 0xFF, 0x00, 0x46, 0x00, 0xF4, 0x00, 0x72];
        assert_eq!(decode_text_string(&bytes), "Fôr");
    }

    #[test]
    fn test_encode_ascii_stays_literal() {
        assert!(matches!(
            encode_text_string("AC"),
            Object::String(ref bytes, StringFormat::Literal) if bytes == b"AC"
        ));
    }

    #[test]
    fn test_encode_accented_round_trips() {
        let Object::String(bytes, format) = encode_text_string("Élfico, Anão") else {
            panic!("expected a string object");
        };
        assert!(matches!(format, StringFormat::Hexadecimal));
        assert!(bytes.starts_with(&UTF16_BE_BOM));
        assert_eq!(decode_text_string(&bytes), "Élfico, Anão");
    }

    #[test]
    fn test_collect_slots_flat_fields() {
        let doc = FormBuilder::new()
            .text_field("CharacterName", "")
            .text_field("STR", "")
            .build();
        let names: Vec<String> = collect_slots(&doc).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["CharacterName", "STR"]);
    }

    #[test]
    fn test_collect_slots_qualifies_nested_names() {
        let doc = FormBuilder::new()
            .nested_field("Stats", &["STR", "DEX"])
            .build();
        let names: Vec<String> = collect_slots(&doc).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Stats.STR", "Stats.DEX"]);
    }

    #[test]
    fn test_collect_slots_finds_unregistered_widgets() {
        let doc = FormBuilder::new()
            .text_field("CharacterName", "")
            .unregistered_field("Notes")
            .build();
        let names: Vec<String> = collect_slots(&doc).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["CharacterName", "Notes"]);
    }

    #[test]
    fn test_collect_slots_separate_widget_counted_once() {
        let doc = FormBuilder::new()
            .field_with_widget("Equipment", "")
            .build();
        let names: Vec<String> = collect_slots(&doc).into_iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["Equipment"]);
    }

    #[test]
    fn test_set_value_clears_widget_appearance() {
        let mut doc = FormBuilder::new()
            .field_with_widget("Equipment", "stale")
            .build();
        let slot = collect_slots(&doc).remove(0);
        assert!(set_slot_value(&mut doc, &slot, "Arco longo"));

        let kids = dictionary(&doc, slot.id)
            .and_then(|d| d.get(b"Kids").ok())
            .and_then(|o| o.as_array().ok())
            .cloned()
            .unwrap();
        let widget_id = kids[0].as_reference().unwrap();
        assert!(!dictionary(&doc, widget_id).unwrap().has(b"AP"));
    }

    #[test]
    fn test_set_value_follows_indirect_kids_array() {
        let mut doc = FormBuilder::new()
            .field_with_indirect_kids("Equipment", "stale")
            .build();
        let slot = collect_slots(&doc).remove(0);
        assert_eq!(slot.name, "Equipment");
        assert!(set_slot_value(&mut doc, &slot, "Kit de explorador"));

        let kids_id = dictionary(&doc, slot.id)
            .and_then(|d| d.get(b"Kids").ok())
            .and_then(|o| o.as_reference().ok())
            .unwrap();
        let widget_id = doc.get_object(kids_id).unwrap().as_array().unwrap()[0]
            .as_reference()
            .unwrap();
        assert!(!dictionary(&doc, widget_id).unwrap().has(b"AP"));
        assert_eq!(slot_value(&doc, &slot).as_deref(), Some("Kit de explorador"));
    }

    #[test]
    fn test_document_without_form_has_no_slots() {
        let doc = FormBuilder::new().without_acroform().build();
        assert!(collect_slots(&doc).is_empty());
    }

    #[test]
    fn test_set_and_read_slot_value() {
        let mut doc = FormBuilder::new().text_field("Race", "stale").build();
        let slot = collect_slots(&doc).remove(0);
        assert_eq!(slot_value(&doc, &slot).as_deref(), Some("stale"));

        assert!(set_slot_value(&mut doc, &slot, "Meio-Elfa"));
        assert_eq!(slot_value(&doc, &slot).as_deref(), Some("Meio-Elfa"));
        let field = dictionary(&doc, slot.id).unwrap();
        assert!(!field.has(b"AP"));
    }

    #[test]
    fn test_need_appearances_is_set() {
        let mut doc = FormBuilder::new().text_field("Race", "").build();
        request_appearance_regeneration(&mut doc);
        let form = acroform(&doc).unwrap();
        assert!(matches!(
            form.get(b"NeedAppearances"),
            Ok(Object::Boolean(true))
        ));
    }
}
