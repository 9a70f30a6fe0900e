//! AST outline pane
//!
//! Flattens a [`Statement`] into indented rows: one row per node, children
//! one level deeper. Types show their canonical text on the row itself and
//! expand into pointer flags, qualifiers, generic parameters and embedded
//! function parts below it.

use super::{clamp_scroll, pane_block, visible_height};
use crate::entries::Entry;
use crate::parser::ast::*;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// One outline row: nesting depth and text.
pub type OutlineRow = (usize, String);

struct Outline {
    rows: Vec<OutlineRow>,
}

impl Outline {
    fn push(&mut self, depth: usize, text: impl Into<String>) {
        self.rows.push((depth, text.into()));
    }

    fn ty(&mut self, depth: usize, label: &str, ty: &TypeInfo) {
        self.push(depth, format!("{label}: {ty}"));
        let depth = depth + 1;

        if ty.is_ptr_ptr {
            self.push(depth, "pointer to pointer");
        } else if ty.is_ptr {
            self.push(depth, "pointer");
        }
        for q in &ty.qualifiers {
            self.push(depth, format!("qualifier {} ({:?})", q.qualifier.as_str(), q.placement));
        }
        for param in &ty.params {
            self.ty(depth, "param", param);
        }
        if let Some(func) = ty.func() {
            self.function(depth, func);
        }
    }

    fn function(&mut self, depth: usize, func: &FunctionDecl) {
        let kind = match func.kind {
            FunctionKind::Block => "block",
            FunctionKind::Pointer => "function pointer",
            FunctionKind::TopLevel => "function",
        };
        match &func.name {
            Some(name) => self.push(depth, format!("{kind} {name}")),
            None => self.push(depth, kind),
        }
        self.ty(depth + 1, "returns", &func.return_type);
        self.args(depth + 1, &func.args);
    }

    fn args(&mut self, depth: usize, args: &[ArgInfo]) {
        for arg in args {
            match (&arg.ty, &arg.name) {
                (None, _) => self.push(depth, "variadic ..."),
                (Some(ty), Some(name)) => self.ty(depth, &format!("arg {name}"), ty),
                (Some(ty), None) => self.ty(depth, "arg", ty),
            }
        }
    }

    fn variable(&mut self, depth: usize, label: &str, var: &VariableDecl) {
        self.push(depth, format!("{label} {}", var.name));
        if let Some(ty) = &var.ty {
            self.ty(depth + 1, "type", ty);
        }
        if let Some(value) = &var.value {
            self.push(depth + 1, format!("value = {value}"));
        }
    }

    fn decl(&mut self, decl: &Decl) {
        match decl {
            Decl::Method(m) => {
                let side = if m.is_class { "class" } else { "instance" };
                self.push(0, format!("method ({side}) {}", m.selector()));
                self.ty(1, "returns", &m.return_type);
                self.args(1, &m.args);
            }
            Decl::Property(p) => {
                self.push(0, format!("property {}", p.name));
                for (attr, value) in &p.attrs {
                    match value {
                        AttrValue::Flag => self.push(1, format!("attr {}", attr.as_str())),
                        AttrValue::Value(v) => self.push(1, format!("attr {}={}", attr.as_str(), v)),
                    }
                }
                self.ty(1, "type", &p.ty);
            }
            Decl::Interface(i) => {
                self.push(0, format!("interface {}", i.name));
                for param in &i.type_params {
                    match param.variance {
                        Some(v) => self.push(1, format!("type param {} {}", v.as_str(), param.name)),
                        None => self.push(1, format!("type param {}", param.name)),
                    }
                }
                self.headers(i.super_name.as_deref(), &i.protocols);
            }
            Decl::Protocol(p) => {
                self.push(0, format!("protocol {}", p.name));
                self.headers(p.super_name.as_deref(), &p.protocols);
            }
            Decl::Enum(e) => {
                self.push(0, format!("enum {}", e.name.as_deref().unwrap_or("(anonymous)")));
                if let Some(ty) = &e.ty {
                    self.ty(1, "backing", ty);
                }
                for case in &e.cases {
                    self.variable(1, "case", case);
                }
            }
            Decl::Struct(s) => {
                self.push(0, format!("struct {}", s.name.as_deref().unwrap_or("(anonymous)")));
                for field in &s.fields {
                    self.variable(1, "field", field);
                }
            }
            Decl::Variable(v) if v.ty.is_none() => self.variable(0, "enum case", v),
            Decl::Variable(v) => self.variable(0, "variable", v),
            Decl::Function(f) => self.function(0, f),
            Decl::TypeAlias(ty) => self.ty(0, "type alias", ty),
        }
    }

    fn headers(&mut self, super_name: Option<&str>, protocols: &[String]) {
        if let Some(super_name) = super_name {
            self.push(1, format!("super {super_name}"));
        }
        for protocol in protocols {
            self.push(1, format!("adopts {protocol}"));
        }
    }
}

/// Outline rows for a parsed statement
pub fn outline(stmt: &Statement) -> Vec<OutlineRow> {
    let mut outline = Outline { rows: Vec::new() };
    if let Some(alias) = stmt.alias_name() {
        outline.push(0, format!("typedef {alias}"));
    }
    outline.decl(&stmt.decl);
    outline.rows
}

pub fn render_outline_pane(
    frame: &mut Frame,
    area: Rect,
    entry: Option<&Entry>,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = pane_block(" AST ", is_focused);

    let lines: Vec<Line> = match entry.map(|e| &e.result) {
        Some(Ok(stmt)) => outline(stmt)
            .into_iter()
            .map(|(depth, text)| {
                let style = if depth == 0 {
                    Style::default()
                        .fg(DEFAULT_THEME.keyword)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(DEFAULT_THEME.fg)
                };
                Line::from(vec![
                    Span::styled("  ".repeat(depth), Style::default().fg(DEFAULT_THEME.comment)),
                    Span::styled(text, style),
                ])
            })
            .collect(),
        Some(Err(_)) => vec![Line::from(Span::styled(
            "(parse failed)",
            Style::default().fg(DEFAULT_THEME.error),
        ))],
        None => Vec::new(),
    };

    let visible = visible_height(area);
    clamp_scroll(scroll, lines.len(), visible);

    let visible_lines: Vec<Line> = lines.into_iter().skip(*scroll).take(visible).collect();
    frame.render_widget(Paragraph::new(visible_lines).block(block), area);
}
