//! HTML templates, compiled into the binary and rendered with Tera.

use tera::{Context, Tera};

const TEMPLATES: [(&str, &str); 5] = [
    ("base.html", include_str!("../templates/base.html")),
    (
        "board/post_list.html",
        include_str!("../templates/board/post_list.html"),
    ),
    (
        "contacts/contact_list.html",
        include_str!("../templates/contacts/contact_list.html"),
    ),
    (
        "contacts/contact_form.html",
        include_str!("../templates/contacts/contact_form.html"),
    ),
    (
        "contacts/contact_confirm_delete.html",
        include_str!("../templates/contacts/contact_confirm_delete.html"),
    ),
];

/// Template registry. Autoescaping is on for every `.html` template.
pub struct Templates {
    tera: Tera,
}

impl Templates {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    pub fn render(&self, name: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera.render(name, context)
    }
}
