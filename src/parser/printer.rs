//! Canonical declaration text
//!
//! `Display` for every AST node. Printing a parsed [`Statement`] and parsing
//! the output again yields an equal tree, and printing is a fixed point after
//! one round.

use crate::parser::ast::*;
use std::fmt::{self, Display, Write};

/// Join a type and the name it declares. No space follows a trailing `*`.
fn join_name(ty: &str, name: &str) -> String {
    if ty.ends_with('*') {
        format!("{ty}{name}")
    } else {
        format!("{ty} {name}")
    }
}

/// Join items with `", "`.
fn comma_list<T: Display>(items: &[T]) -> String {
    items
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        for q in self.qualifiers_at(Placement::Prefix) {
            write!(out, "{q} ")?;
        }

        match &self.kind {
            TypeKind::Named(name) => {
                out.push_str(name);
                if !self.params.is_empty() {
                    write!(out, "<{}>", comma_list(&self.params))?;
                }
                if self.is_ptr {
                    out.push_str(" *");
                }
                for q in self.qualifiers_at(Placement::Suffix) {
                    write!(out, " {q}")?;
                }
            }
            TypeKind::Function(func) => {
                // Suffix qualifiers of a block or function pointer sit inside its group
                let quals: Vec<Qualifier> = self.qualifiers_at(Placement::Suffix).collect();
                write_function(&mut out, func, &quals)?;
            }
        }

        if self.is_ptr_ptr {
            if out.ends_with('*') {
                out.push('*');
            } else {
                out.push_str(" *");
            }
            for q in self.qualifiers_at(Placement::Outer) {
                write!(out, " {q}")?;
            }
        }

        f.write_str(&out)
    }
}

fn write_function(out: &mut String, func: &FunctionDecl, quals: &[Qualifier]) -> fmt::Result {
    let ret = func.return_type.to_string();
    let args = comma_list(&func.args);
    let marker = match func.kind {
        FunctionKind::TopLevel => {
            let name = func.name.as_deref().unwrap_or_default();
            return write!(out, "{}({})", join_name(&ret, name), args);
        }
        FunctionKind::Block => '^',
        FunctionKind::Pointer => '*',
    };

    let mut group = String::from(marker);
    let quals: Vec<&str> = quals.iter().map(|q| q.as_str()).collect();
    group.push_str(&quals.join(" "));
    if let Some(name) = &func.name {
        if !quals.is_empty() {
            group.push(' ');
        }
        group.push_str(name);
    }
    write!(out, "{}({})", join_name(&ret, &format!("({group})")), args)
}

impl Display for FunctionDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_function(&mut out, self, &[])?;
        f.write_str(&out)
    }
}

impl Display for ArgInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.ty, &self.name) {
            (Some(ty), Some(name)) => f.write_str(&join_name(&ty.to_string(), name)),
            (Some(ty), None) => write!(f, "{ty}"),
            (None, Some(name)) => f.write_str(name),
            (None, None) => Ok(()),
        }
    }
}

impl Display for MethodDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = if self.is_class { '+' } else { '-' };
        write!(f, "{} ({})", marker, self.return_type)?;

        let args = self.fixed_args();
        if args.is_empty() {
            return f.write_str(&self.name_parts.concat());
        }

        let parts: Vec<String> = self
            .name_parts
            .iter()
            .zip(args)
            .map(|(label, arg)| {
                let ty = arg.ty.as_ref().map(ToString::to_string).unwrap_or_default();
                format!("{}:({}){}", label, ty, arg.name.as_deref().unwrap_or_default())
            })
            .collect();
        f.write_str(&parts.join(" "))?;

        if self.variadic {
            f.write_str(", ...")?;
        }
        Ok(())
    }
}

impl Display for PropertyDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("@property")?;
        if !self.attrs.is_empty() {
            let attrs: Vec<String> = self
                .attrs
                .iter()
                .map(|(attr, value)| match value {
                    AttrValue::Flag => attr.as_str().to_string(),
                    AttrValue::Value(v) => format!("{}={}", attr.as_str(), v),
                })
                .collect();
            write!(f, " ({})", attrs.join(", "))?;
        }
        write!(f, " {}", declared(&self.ty, &self.name))
    }
}

/// A type with its declared name, omitting the name when the block or
/// function pointer type already carries it.
fn declared(ty: &TypeInfo, name: &str) -> String {
    let ty_text = ty.to_string();
    match ty.func() {
        Some(func) if func.name.as_deref() == Some(name) => ty_text,
        _ => join_name(&ty_text, name),
    }
}

impl Display for InterfaceDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@interface {}", self.name)?;
        if !self.type_params.is_empty() {
            let params: Vec<String> = self
                .type_params
                .iter()
                .map(|p| match p.variance {
                    Some(variance) => format!("{} {}", variance.as_str(), p.name),
                    None => p.name.clone(),
                })
                .collect();
            write!(f, "<{}>", params.join(", "))?;
        }
        if let Some(super_name) = &self.super_name {
            write!(f, " : {}", super_name)?;
        }
        if !self.protocols.is_empty() {
            write!(f, " <{}>", self.protocols.join(", "))?;
        }
        Ok(())
    }
}

impl Display for ProtocolDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@protocol {}", self.name)?;
        if let Some(super_name) = &self.super_name {
            write!(f, " : {}", super_name)?;
        }
        if !self.protocols.is_empty() {
            write!(f, " <{}>", self.protocols.join(", "))?;
        }
        Ok(())
    }
}

impl Display for VariableDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ty {
            Some(ty) => f.write_str(&declared(ty, &self.name))?,
            None => f.write_str(&self.name)?,
        }
        if let Some(value) = &self.value {
            write!(f, " = {}", value)?;
        }
        Ok(())
    }
}

impl Display for EnumDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("enum")?;
        if let Some(name) = &self.name {
            write!(f, " {}", name)?;
        }
        if let Some(ty) = &self.ty {
            write!(f, " : {}", ty)?;
        }
        if self.cases.is_empty() {
            f.write_str(" { }")
        } else {
            write!(f, " {{ {} }}", comma_list(&self.cases))
        }
    }
}

impl Display for StructDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("struct")?;
        if let Some(name) = &self.name {
            write!(f, " {}", name)?;
        }
        f.write_str(" {")?;
        for field in &self.fields {
            write!(f, " {};", field)?;
        }
        f.write_str(" }")
    }
}

impl Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decl::Method(m) => write!(f, "{m}"),
            Decl::Property(p) => write!(f, "{p}"),
            Decl::Interface(i) => write!(f, "{i}"),
            Decl::Protocol(p) => write!(f, "{p}"),
            Decl::Enum(e) => write!(f, "{e}"),
            Decl::Struct(s) => write!(f, "{s}"),
            Decl::Variable(v) => write!(f, "{v}"),
            Decl::Function(func) => write!(f, "{func}"),
            Decl::TypeAlias(ty) => write!(f, "{ty}"),
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let decl = self.decl.to_string();
        if self.is_typedef() {
            f.write_str("typedef ")?;
        }
        match (&self.typedef, &self.decl) {
            (Some(alias), Decl::TypeAlias(_)) => f.write_str(&join_name(&decl, alias))?,
            (Some(alias), _) => write!(f, "{} {}", decl, alias)?,
            (None, _) => f.write_str(&decl)?,
        }
        match self.decl {
            Decl::Interface(_) | Decl::Protocol(_) => Ok(()),
            _ => f.write_str(";"),
        }
    }
}
