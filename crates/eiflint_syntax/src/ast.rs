//! Syntax tree definitions
//!
//! The tree is structural: class headers, feature clauses, feature signatures and contracts are parsed into
//! nodes, while routine bodies and assertion expressions stay opaque [`TokenRange`]s over the token sequence.
//! The body scanner records the few facts the rule checkers need (statement count, assignment targets, loop
//! invariants, agents).

use eiflint_core::lang::clauses::ClauseCategoryId;

use crate::source::{SourceLocation, Span};

/// A node with source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub node: T,
    pub span: Span,
    pub loc: SourceLocation,
}

impl<T> Spanned<T> {
    pub fn new(node: T, span: Span, loc: SourceLocation) -> Self {
        Self { node, span, loc }
    }
}

/// Identifier as written.
pub type Ident = String;

/// Half-open range of indices into the token sequence the tree was parsed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenRange {
    pub start: usize,
    pub end: usize,
}

impl TokenRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    pub fn indices(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

/// A parsed file. Each file normally declares exactly one class.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SyntaxTree {
    pub classes: Vec<ClassDecl>,
}

// ============================================================================
// Classes
// ============================================================================

/// Class header mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClassKind {
    #[default]
    Regular,
    Deferred,
    Expanded,
    Frozen,
    Separate,
    /// `once class`: every creation procedure yields one shared instance.
    Once,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    /// `None` when the header is too malformed to name the class.
    pub name: Option<Spanned<Ident>>,
    pub kind: ClassKind,
    pub generics: Vec<Spanned<Ident>>,
    pub parents: Vec<Spanned<Ident>>,
    pub creators: Vec<CreationClause>,
    pub clauses: Vec<FeatureClause>,
    pub invariant: Option<AssertionBlock>,
    /// Every agent expression in bodies and assertions, in source order.
    pub agents: Vec<AgentExpr>,
    pub span: Span,
    pub loc: SourceLocation,
}

impl ClassDecl {
    pub fn is_once(&self) -> bool {
        self.kind == ClassKind::Once
    }

    pub fn name_str(&self) -> &str {
        self.name.as_ref().map_or("", |n| n.node.as_str())
    }

    /// All features in declaration order.
    pub fn features(&self) -> impl Iterator<Item = &FeatureDecl> + '_ {
        self.clauses.iter().flat_map(|c| c.features.iter())
    }

    /// First feature declared with `name` (names compare case-insensitively, as in the language).
    pub fn feature(&self, name: &str) -> Option<&FeatureDecl> {
        self.features().find(|f| f.name.node.eq_ignore_ascii_case(name))
    }

    /// All creation procedure names, across every `create` clause.
    pub fn creation_names(&self) -> impl Iterator<Item = &Spanned<Ident>> + '_ {
        self.creators.iter().flat_map(|c| c.names.iter())
    }

    /// Names of plain and `attribute` attributes.
    pub fn attribute_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.features().filter(|f| f.is_attribute()).map(|f| f.name.node.as_str())
    }
}

/// `create [{CLIENTS}] a, b`
#[derive(Debug, Clone, PartialEq)]
pub struct CreationClause {
    pub names: Vec<Spanned<Ident>>,
    pub loc: SourceLocation,
}

/// Category of a feature clause, read from the comment on its `feature` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClauseCategory {
    Recognized(ClauseCategoryId),
    /// A comment that names no known category.
    Unrecognized(String),
    /// `feature` without a comment.
    Missing,
    /// Features found before any `feature` keyword.
    Implicit,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureClause {
    pub category: ClauseCategory,
    /// Location of the `feature` keyword (of the first feature for [`ClauseCategory::Implicit`]).
    pub loc: SourceLocation,
    pub features: Vec<FeatureDecl>,
}

// ============================================================================
// Features
// ============================================================================

/// Attachment mark on a declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attachment {
    /// No mark: attached by default.
    #[default]
    Default,
    /// `attached T` or `!T`.
    Attached,
    /// `detachable T` or `?T`.
    Detachable,
}

/// A declared type, kept as text.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    /// Type text without the attachment mark, tokens joined by single spaces (`HASH_TABLE [STRING, INTEGER]`).
    pub text: String,
    pub attachment: Attachment,
    pub span: Span,
}

impl TypeRef {
    pub fn is_detachable(&self) -> bool {
        self.attachment == Attachment::Detachable
    }
}

/// A formal argument or a local variable.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pub name: Spanned<Ident>,
    pub ty: TypeRef,
}

/// Command (no result) or query (has a result type).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    Command,
    Query,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureDecl {
    pub name: Spanned<Ident>,
    pub frozen: bool,
    pub params: Vec<Entity>,
    pub return_type: Option<TypeRef>,
    /// First comment after the signature.
    pub header_comment: Option<Spanned<String>>,
    pub require: Option<AssertionBlock>,
    pub locals: Vec<Entity>,
    pub body: RoutineBody,
    pub ensure: Option<AssertionBlock>,
    pub rescue: Option<TokenRange>,
    pub span: Span,
}

impl FeatureDecl {
    pub fn kind(&self) -> FeatureKind {
        if self.return_type.is_some() {
            FeatureKind::Query
        } else {
            FeatureKind::Command
        }
    }

    /// Routines have an implementation part (`do`, `once`, `deferred`, `external`).
    pub fn is_routine(&self) -> bool {
        matches!(
            self.body,
            RoutineBody::Do(_) | RoutineBody::Once { .. } | RoutineBody::Deferred | RoutineBody::External { .. }
        )
    }

    pub fn is_attribute(&self) -> bool {
        matches!(self.body, RoutineBody::Attribute { .. })
    }

    pub fn is_once(&self) -> bool {
        matches!(self.body, RoutineBody::Once { .. })
    }

    /// Compound executed by the feature, if it has one.
    pub fn compound(&self) -> Option<&Body> {
        match &self.body {
            RoutineBody::Do(body) | RoutineBody::Once { body, .. } => Some(body),
            RoutineBody::Attribute { body } => body.as_ref(),
            _ => None,
        }
    }

    /// Precondition and postcondition assertions.
    pub fn contract_assertions(&self) -> impl Iterator<Item = &Assertion> + '_ {
        self.require
            .iter()
            .chain(self.ensure.iter())
            .flat_map(|block| block.assertions.iter())
    }
}

/// Implementation part of a feature.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutineBody {
    /// `x: T`, or `x: T attribute ... end` when `body` is present.
    Attribute { body: Option<Body> },
    /// `x: T = value`
    Constant { value: Spanned<String> },
    Do(Body),
    /// `once` or `once ("KEY", ...)`.
    Once { keys: Vec<String>, body: Body },
    Deferred,
    External { language: String },
}

/// Scanned routine compound.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Body {
    /// Tokens between the body keyword and the keyword that ends the compound.
    pub range: TokenRange,
    /// Top-level instructions. A compound instruction (`if`, `from`, ...) counts once.
    pub statement_count: usize,
    /// Targets of `name := ...` at any depth.
    pub assigned: Vec<Spanned<Ident>>,
    /// Location of the first `Result := ...`, if any.
    pub result_assignment: Option<SourceLocation>,
    pub loop_invariants: Vec<AssertionBlock>,
}

// ============================================================================
// Assertions
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssertionKind {
    Precondition,
    Postcondition,
    Invariant,
    LoopInvariant,
}

impl AssertionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            AssertionKind::Precondition => "precondition",
            AssertionKind::Postcondition => "postcondition",
            AssertionKind::Invariant => "invariant",
            AssertionKind::LoopInvariant => "loop invariant",
        }
    }
}

/// `[label:] boolean_expression`
#[derive(Debug, Clone, PartialEq)]
pub struct Assertion {
    pub label: Option<Spanned<Ident>>,
    pub expr: TokenRange,
    pub kind: AssertionKind,
    pub span: Span,
    pub loc: SourceLocation,
}

/// `require`, `ensure`, `invariant` (class or loop) with its assertions.
#[derive(Debug, Clone, PartialEq)]
pub struct AssertionBlock {
    pub kind: AssertionKind,
    /// `require else` / `ensure then`.
    pub extended: bool,
    pub assertions: Vec<Assertion>,
    pub loc: SourceLocation,
}

// ============================================================================
// Agents
// ============================================================================

/// Target of an agent call.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentTarget {
    /// `agent f`: the current object.
    Current,
    /// `agent x.f`, `agent (a + b).f`: a closed target expression.
    Closed(TokenRange),
    /// `agent {T}.f`: open target of type `T`.
    Open(String),
    /// `agent (x: T) do ... end`: inline agent.
    Inline(Box<InlineAgent>),
}

/// Formals, contract and body of an inline agent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InlineAgent {
    pub params: Vec<Entity>,
    pub require: Option<AssertionBlock>,
    pub body: Body,
    pub ensure: Option<AssertionBlock>,
}

/// One actual argument of an agent.
#[derive(Debug, Clone, PartialEq)]
pub enum AgentArg {
    /// `?`
    Open { loc: SourceLocation },
    /// Any expression.
    Closed { range: TokenRange, loc: SourceLocation },
}

impl AgentArg {
    pub fn is_open(&self) -> bool {
        matches!(self, AgentArg::Open { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentExpr {
    pub target: AgentTarget,
    /// `None` for inline agents.
    pub feature: Option<Spanned<Ident>>,
    /// Explicit argument list; `None` when the agent has no parenthesized arguments.
    pub args: Option<Vec<AgentArg>>,
    pub span: Span,
    pub loc: SourceLocation,
}

impl AgentExpr {
    pub fn inline(&self) -> Option<&InlineAgent> {
        match &self.target {
            AgentTarget::Inline(inline) => Some(inline),
            _ => None,
        }
    }

    /// `agent f (?, ?)`: a non-empty explicit list with every argument open.
    pub fn is_all_open(&self) -> bool {
        self.args
            .as_ref()
            .is_some_and(|args| !args.is_empty() && args.iter().all(AgentArg::is_open))
    }
}
