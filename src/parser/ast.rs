//! AST definitions for parsed declarations
//!
//! Every parse call builds one fresh [`Statement`] tree owned by the caller.
//! Nodes are plain data: they are cloned, compared and serialized, never
//! mutated after the parser returns them. The textual form of each node lives
//! in [`printer`](super::printer).

use serde::Serialize;
use std::collections::BTreeMap;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Type qualifiers and nullability annotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Qualifier {
    Const,
    Volatile,
    Kindof,
    // Context-sensitive nullability, written before the type name
    Nullable,
    Nonnull,
    NullUnspecified,
    // Nullability type annotations, written after the name or pointer
    NullableAnnot,
    NonnullAnnot,
    NullUnspecifiedAnnot,
    NullableResult,
    // Ownership
    Strong,
    Weak,
    Autoreleasing,
    UnsafeUnretained,
}

impl Qualifier {
    pub const ALL: [Qualifier; 14] = [
        Qualifier::Const,
        Qualifier::Volatile,
        Qualifier::Kindof,
        Qualifier::Nullable,
        Qualifier::Nonnull,
        Qualifier::NullUnspecified,
        Qualifier::NullableAnnot,
        Qualifier::NonnullAnnot,
        Qualifier::NullUnspecifiedAnnot,
        Qualifier::NullableResult,
        Qualifier::Strong,
        Qualifier::Weak,
        Qualifier::Autoreleasing,
        Qualifier::UnsafeUnretained,
    ];

    /// The spelling used in headers.
    pub fn as_str(self) -> &'static str {
        match self {
            Qualifier::Const => "const",
            Qualifier::Volatile => "volatile",
            Qualifier::Kindof => "__kindof",
            Qualifier::Nullable => "nullable",
            Qualifier::Nonnull => "nonnull",
            Qualifier::NullUnspecified => "null_unspecified",
            Qualifier::NullableAnnot => "_Nullable",
            Qualifier::NonnullAnnot => "_Nonnull",
            Qualifier::NullUnspecifiedAnnot => "_Null_unspecified",
            Qualifier::NullableResult => "_Nullable_result",
            Qualifier::Strong => "__strong",
            Qualifier::Weak => "__weak",
            Qualifier::Autoreleasing => "__autoreleasing",
            Qualifier::UnsafeUnretained => "__unsafe_unretained",
        }
    }

    /// Whether the qualifier may be written at the given placement.
    pub fn allowed_at(self, placement: Placement) -> bool {
        match self {
            Qualifier::Const
            | Qualifier::Volatile
            | Qualifier::Strong
            | Qualifier::Weak
            | Qualifier::Autoreleasing
            | Qualifier::UnsafeUnretained => true,
            Qualifier::Kindof
            | Qualifier::Nullable
            | Qualifier::Nonnull
            | Qualifier::NullUnspecified => placement == Placement::Prefix,
            Qualifier::NullableAnnot
            | Qualifier::NonnullAnnot
            | Qualifier::NullUnspecifiedAnnot
            | Qualifier::NullableResult => placement != Placement::Prefix,
        }
    }
}

/// Where a qualifier was written relative to the type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Placement {
    /// Before the base name: `const char *`
    Prefix,
    /// After the name and first pointer marker: `NSString * _Nullable`
    Suffix,
    /// After the second pointer marker: `NSError * _Nullable * _Nullable`
    Outer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct QualifierInfo {
    pub qualifier: Qualifier,
    pub placement: Placement,
}

/// Either a named type or an embedded function/block type, never both.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeKind {
    Named(String),
    Function(Box<FunctionDecl>),
}

/// A parsed type: `__kindof NSArray<NSString *> * _Nullable`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeInfo {
    pub kind: TypeKind,
    pub is_ptr: bool,
    pub is_ptr_ptr: bool,
    pub qualifiers: Vec<QualifierInfo>,
    pub params: Vec<TypeInfo>,
}

impl TypeInfo {
    pub fn named(name: impl Into<String>) -> Self {
        TypeInfo {
            kind: TypeKind::Named(name.into()),
            is_ptr: false,
            is_ptr_ptr: false,
            qualifiers: Vec::new(),
            params: Vec::new(),
        }
    }

    pub fn function(func: FunctionDecl) -> Self {
        TypeInfo {
            kind: TypeKind::Function(Box::new(func)),
            ..TypeInfo::named("")
        }
    }

    pub fn with_pointer(mut self) -> Self {
        self.is_ptr = true;
        self
    }

    pub fn with_param(mut self, param: TypeInfo) -> Self {
        self.params.push(param);
        self
    }

    pub fn with_qualifier(mut self, qualifier: Qualifier, placement: Placement) -> Self {
        self.qualifiers.push(QualifierInfo {
            qualifier,
            placement,
        });
        self
    }

    /// Base name, or `None` for function and block types.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Named(name) => Some(name),
            TypeKind::Function(_) => None,
        }
    }

    pub fn func(&self) -> Option<&FunctionDecl> {
        match &self.kind {
            TypeKind::Function(func) => Some(func),
            TypeKind::Named(_) => None,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self.kind, TypeKind::Function(_))
    }

    pub fn has_qualifier(&self, qualifier: Qualifier) -> bool {
        self.qualifiers.iter().any(|q| q.qualifier == qualifier)
    }

    pub(crate) fn qualifiers_at(&self, placement: Placement) -> impl Iterator<Item = Qualifier> + '_ {
        self.qualifiers
            .iter()
            .filter(move |q| q.placement == placement)
            .map(|q| q.qualifier)
    }
}

/// Function argument. The variadic marker is an argument named `...` with no type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArgInfo {
    pub ty: Option<TypeInfo>,
    pub name: Option<String>,
}

impl ArgInfo {
    pub const ELLIPSIS: &'static str = "...";

    pub fn new(ty: TypeInfo, name: impl Into<String>) -> Self {
        ArgInfo {
            ty: Some(ty),
            name: Some(name.into()),
        }
    }

    pub fn unnamed(ty: TypeInfo) -> Self {
        ArgInfo { ty: Some(ty), name: None }
    }

    pub fn variadic() -> Self {
        ArgInfo {
            ty: None,
            name: Some(Self::ELLIPSIS.to_string()),
        }
    }

    pub fn is_variadic(&self) -> bool {
        self.ty.is_none() && self.name.as_deref() == Some(Self::ELLIPSIS)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FunctionKind {
    /// `ret (*name)(args)`
    Pointer,
    /// `ret (^name)(args)`
    Block,
    /// `ret name(args)`
    TopLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDecl {
    pub name: Option<String>,
    pub return_type: TypeInfo,
    pub args: Vec<ArgInfo>,
    pub kind: FunctionKind,
}

impl FunctionDecl {
    pub fn is_variadic(&self) -> bool {
        self.args.last().is_some_and(ArgInfo::is_variadic)
    }
}

/// Objective-C method declaration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodDecl {
    /// `+` methods
    pub is_class: bool,
    pub return_type: TypeInfo,
    pub name_parts: Vec<String>,
    pub args: Vec<ArgInfo>,
    pub variadic: bool,
}

impl MethodDecl {
    /// Full selector, e.g. `setValue:forKey:` or `alloc`.
    pub fn selector(&self) -> String {
        if self.args.is_empty() {
            return self.name_parts.concat();
        }
        self.name_parts.iter().map(|part| format!("{part}:")).collect()
    }

    /// Arguments without the variadic marker.
    pub fn fixed_args(&self) -> &[ArgInfo] {
        match self.args.last() {
            Some(last) if last.is_variadic() => &self.args[..self.args.len() - 1],
            _ => &self.args,
        }
    }
}

/// Property attribute keys, in canonical print order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyAttr {
    Class,
    Nonatomic,
    Readonly,
    Weak,
    Copy,
    Retain,
    UnsafeUnretained,
    Nullable,
    Nonnull,
    NullUnspecified,
    NullResettable,
    Getter,
    Setter,
}

impl PropertyAttr {
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyAttr::Class => "class",
            PropertyAttr::Nonatomic => "nonatomic",
            PropertyAttr::Readonly => "readonly",
            PropertyAttr::Weak => "weak",
            PropertyAttr::Copy => "copy",
            PropertyAttr::Retain => "retain",
            PropertyAttr::UnsafeUnretained => "unsafe_unretained",
            PropertyAttr::Nullable => "nullable",
            PropertyAttr::Nonnull => "nonnull",
            PropertyAttr::NullUnspecified => "null_unspecified",
            PropertyAttr::NullResettable => "null_resettable",
            PropertyAttr::Getter => "getter",
            PropertyAttr::Setter => "setter",
        }
    }
}

/// Presence flag or `getter=`/`setter=` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Flag,
    Value(String),
}

impl Serialize for AttrValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            AttrValue::Flag => serializer.serialize_bool(true),
            AttrValue::Value(value) => serializer.serialize_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PropertyDecl {
    pub name: String,
    pub ty: TypeInfo,
    pub attrs: BTreeMap<PropertyAttr, AttrValue>,
}

impl PropertyDecl {
    pub fn has_attr(&self, attr: PropertyAttr) -> bool {
        self.attrs.contains_key(&attr)
    }

    pub fn getter(&self) -> Option<&str> {
        self.attr_value(PropertyAttr::Getter)
    }

    pub fn setter(&self) -> Option<&str> {
        self.attr_value(PropertyAttr::Setter)
    }

    fn attr_value(&self, attr: PropertyAttr) -> Option<&str> {
        match self.attrs.get(&attr) {
            Some(AttrValue::Value(value)) => Some(value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Variance {
    Covariant,
    Contravariant,
}

impl Variance {
    pub fn as_str(self) -> &'static str {
        match self {
            Variance::Covariant => "__covariant",
            Variance::Contravariant => "__contravariant",
        }
    }
}

/// Generic parameter of a class interface: `__covariant ObjectType`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeParam {
    pub variance: Option<Variance>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InterfaceDecl {
    pub name: String,
    pub type_params: Vec<TypeParam>,
    pub super_name: Option<String>,
    pub protocols: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolDecl {
    pub name: String,
    pub super_name: Option<String>,
    pub protocols: Vec<String>,
}

/// Variable, struct field or enum case. Enum cases carry no type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDecl {
    pub ty: Option<TypeInfo>,
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumDecl {
    pub name: Option<String>,
    pub ty: Option<TypeInfo>,
    pub cases: Vec<VariableDecl>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructDecl {
    pub name: Option<String>,
    pub fields: Vec<VariableDecl>,
}

/// The declaration a statement holds. Exactly one kind per statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Decl {
    Method(MethodDecl),
    Property(PropertyDecl),
    Interface(InterfaceDecl),
    Protocol(ProtocolDecl),
    Enum(EnumDecl),
    Struct(StructDecl),
    Variable(VariableDecl),
    Function(FunctionDecl),
    TypeAlias(TypeInfo),
}

impl Decl {
    /// Short kind name used by diagnostics and the inspector.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Decl::Method(_) => "method",
            Decl::Property(_) => "property",
            Decl::Interface(_) => "interface",
            Decl::Protocol(_) => "protocol",
            Decl::Enum(_) => "enum",
            Decl::Struct(_) => "struct",
            Decl::Variable(_) => "variable",
            Decl::Function(_) => "function",
            Decl::TypeAlias(_) => "typealias",
        }
    }
}

/// One parsed declaration, optionally introduced by `typedef`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statement {
    pub decl: Decl,
    /// Name declared by a trailing identifier after a `typedef` declaration.
    pub typedef: Option<String>,
}

impl Statement {
    pub fn new(decl: Decl) -> Self {
        Statement {
            decl,
            typedef: None,
        }
    }

    pub fn is_typedef(&self) -> bool {
        self.typedef.is_some() || matches!(self.decl, Decl::TypeAlias(_))
    }

    /// The name a typedef introduces, including `typedef void (^Name)(void)`.
    pub fn alias_name(&self) -> Option<&str> {
        if let Some(alias) = &self.typedef {
            return Some(alias);
        }
        match &self.decl {
            Decl::TypeAlias(ty) => ty.func().and_then(|f| f.name.as_deref()),
            _ => None,
        }
    }
}
