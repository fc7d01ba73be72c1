//! Builds small single-page AcroForm documents for tests.

use std::path::Path;

use lopdf::{dictionary, Dictionary, Document, Object, ObjectId};

pub struct FormBuilder {
    doc: Document,
    pages_id: ObjectId,
    fields: Vec<ObjectId>,
    annots: Vec<ObjectId>,
    with_acroform: bool,
}

fn rect() -> Object {
    Object::Array(vec![
        Object::Integer(0),
        Object::Integer(0),
        Object::Integer(200),
        Object::Integer(20),
    ])
}

fn refs(ids: &[ObjectId]) -> Object {
    Object::Array(ids.iter().map(|id| Object::Reference(*id)).collect())
}

fn text_widget(name: &str, value: &str) -> Dictionary {
    dictionary! {
        "Type" => "Annot",
        "Subtype" => "Widget",
        "FT" => "Tx",
        "T" => Object::string_literal(name),
        "V" => Object::string_literal(value),
        "Rect" => rect(),
        "AP" => dictionary! {},
    }
}

impl FormBuilder {
    pub fn new() -> Self {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        Self {
            doc,
            pages_id,
            fields: Vec::new(),
            annots: Vec::new(),
            with_acroform: true,
        }
    }

    /// Field and widget merged in one dictionary, registered in `/Fields`.
    pub fn text_field(mut self, name: &str, value: &str) -> Self {
        let id = self.doc.add_object(text_widget(name, value));
        self.fields.push(id);
        self.annots.push(id);
        self
    }

    /// Field whose widget is a separate kid annotation.
    pub fn field_with_widget(self, name: &str, value: &str) -> Self {
        self.split_field(name, value, false)
    }

    /// Same as `field_with_widget`, with `/Kids` stored as an indirect array.
    pub fn field_with_indirect_kids(self, name: &str, value: &str) -> Self {
        self.split_field(name, value, true)
    }

    fn split_field(mut self, name: &str, value: &str, indirect_kids: bool) -> Self {
        let field_id = self.doc.new_object_id();
        let widget_id = self.doc.add_object(dictionary! {
            "Type" => "Annot",
            "Subtype" => "Widget",
            "Parent" => Object::Reference(field_id),
            "Rect" => rect(),
            "AP" => dictionary! {},
        });
        let kids = if indirect_kids {
            Object::Reference(self.doc.add_object(refs(&[widget_id])))
        } else {
            refs(&[widget_id])
        };
        self.doc.objects.insert(
            field_id,
            Object::Dictionary(dictionary! {
                "FT" => "Tx",
                "T" => Object::string_literal(name),
                "V" => Object::string_literal(value),
                "Kids" => kids,
            }),
        );
        self.fields.push(field_id);
        self.annots.push(widget_id);
        self
    }

    /// Non-terminal parent with one merged field/widget per child name.
    pub fn nested_field(mut self, parent: &str, children: &[&str]) -> Self {
        let parent_id = self.doc.new_object_id();
        let mut kids = Vec::new();
        for child in children {
            let mut widget = text_widget(child, "");
            widget.set("Parent", Object::Reference(parent_id));
            let id = self.doc.add_object(widget);
            kids.push(id);
            self.annots.push(id);
        }
        self.doc.objects.insert(
            parent_id,
            Object::Dictionary(dictionary! {
                "T" => Object::string_literal(parent),
                "Kids" => refs(&kids),
            }),
        );
        self.fields.push(parent_id);
        self
    }

    /// Widget on the page that the AcroForm `/Fields` array does not list.
    pub fn unregistered_field(mut self, name: &str) -> Self {
        let id = self.doc.add_object(text_widget(name, ""));
        self.annots.push(id);
        self
    }

    pub fn without_acroform(mut self) -> Self {
        self.with_acroform = false;
        self
    }

    pub fn build(mut self) -> Document {
        let page_id = self.doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(self.pages_id),
            "MediaBox" => Object::Array(vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ]),
            "Annots" => refs(&self.annots),
        });
        self.doc.objects.insert(
            self.pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => refs(&[page_id]),
                "Count" => Object::Integer(1),
            }),
        );

        let mut catalog = dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(self.pages_id),
        };
        if self.with_acroform {
            let form_id = self.doc.add_object(dictionary! {
                "Fields" => refs(&self.fields),
            });
            catalog.set("AcroForm", Object::Reference(form_id));
        }
        let catalog_id = self.doc.add_object(catalog);
        self.doc.trailer.set("Root", Object::Reference(catalog_id));
        self.doc
    }

    pub fn save(self, path: &Path) {
        let mut doc = self.build();
        doc.save(path).expect("fixture document saves");
    }
}
