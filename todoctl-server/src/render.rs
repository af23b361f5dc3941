//! HTML rendering for the list page
//!
//! The page is a Handlebars template embedded at build time. Values are
//! HTML-escaped by the engine, so task text can be rendered as-is.

use handlebars::{Handlebars, RenderError};
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::flash::Notice;
use crate::models::Todo;

const INDEX_TEMPLATE: &str = "index";

static TEMPLATES: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(false);
    handlebars
        .register_template_string(INDEX_TEMPLATE, include_str!("../templates/index.html"))
        .expect("invalid index template");
    handlebars
});

/// Template context for the list page
#[derive(Debug, Serialize)]
struct IndexContext<'a> {
    notices: &'a [Notice],
    todos: Vec<TodoView<'a>>,
}

#[derive(Debug, Serialize)]
struct TodoView<'a> {
    id: i32,
    task: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    added: Option<String>,
}

impl<'a> From<&'a Todo> for TodoView<'a> {
    fn from(todo: &'a Todo) -> Self {
        Self {
            id: todo.id,
            task: &todo.task,
            added: todo
                .created_at
                .map(|ts| ts.format("%Y-%m-%d %H:%M UTC").to_string()),
        }
    }
}

/// Render the list page with queued notices and the current todos.
pub fn index_page(todos: &[Todo], notices: &[Notice]) -> Result<String, RenderError> {
    let context = IndexContext {
        notices,
        todos: todos.iter().map(TodoView::from).collect(),
    };
    TEMPLATES.render(INDEX_TEMPLATE, &context)
}
