//! Opal scopes and symbol table

use super::consteval::ConstValue;
use crate::common::{Span, TypeError, TypeErrorKind};
use crate::types::{is_reserved, Mutability, TypeId};
use std::collections::HashMap;
use string_interner::{DefaultStringInterner, DefaultSymbol};
use tracing::debug;

/// Handle to a scope frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u32);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);
}

/// Handle to a declared binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(u32);

/// Progress of a variable declaration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitState {
    /// Declared in its scope, initializer not yet reached
    Unchecked,
    CheckingInitializer,
    Initialized,
    Failed,
}

/// Evaluation slot of a constant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstSlot {
    Unevaluated,
    InProgress,
    Done(ConstValue),
    Failed,
}

/// A parameter as seen by named-argument binding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamInfo {
    pub name: String,
    pub anonymous: bool,
    pub ty: TypeId,
}

/// What a name is bound to
#[derive(Debug, Clone)]
pub enum BindingKind {
    Variable {
        /// Set once the declaration has been checked
        ty: Option<TypeId>,
        mutability: Mutability,
        state: InitState,
    },
    Constant {
        ty: Option<TypeId>,
        slot: ConstSlot,
    },
    Function {
        ty: TypeId,
        params: Vec<ParamInfo>,
    },
}

impl BindingKind {
    pub fn variable(mutability: Mutability) -> Self {
        BindingKind::Variable {
            ty: None,
            mutability,
            state: InitState::Unchecked,
        }
    }

    /// A variable whose value is already available (parameters)
    pub fn initialized(ty: TypeId, mutability: Mutability) -> Self {
        BindingKind::Variable {
            ty: Some(ty),
            mutability,
            state: InitState::Initialized,
        }
    }

    pub fn constant() -> Self {
        BindingKind::Constant {
            ty: None,
            slot: ConstSlot::Unevaluated,
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            BindingKind::Variable { .. } => "variable",
            BindingKind::Constant { .. } => "constant",
            BindingKind::Function { .. } => "function",
        }
    }
}

/// A declared name
#[derive(Debug, Clone)]
pub struct Binding {
    name: DefaultSymbol,
    pub scope: ScopeId,
    pub span: Span,
    pub kind: BindingKind,
}

impl Binding {
    /// The binding's type, if known yet
    pub fn ty(&self) -> Option<TypeId> {
        match &self.kind {
            BindingKind::Variable { ty, .. } | BindingKind::Constant { ty, .. } => *ty,
            BindingKind::Function { ty, .. } => Some(*ty),
        }
    }
}

#[derive(Debug)]
struct Scope {
    parent: Option<ScopeId>,
    names: HashMap<DefaultSymbol, BindingId>,
}

/// Tree of scopes with the bindings declared in them
///
/// Frames are never discarded: leaving a scope only moves the cursor back to
/// its parent, so binding handles stay valid after checking.
#[derive(Debug)]
pub struct SymbolTable {
    interner: DefaultStringInterner,
    scopes: Vec<Scope>,
    bindings: Vec<Binding>,
    current: ScopeId,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            interner: Default::default(),
            scopes: vec![Scope {
                parent: None,
                names: HashMap::new(),
            }],
            bindings: Vec::new(),
            current: ScopeId::ROOT,
        }
    }

    pub fn current(&self) -> ScopeId {
        self.current
    }

    /// Open a child of the current scope and make it current
    pub fn push_scope(&mut self) -> ScopeId {
        let id = ScopeId(self.scopes.len() as u32);
        self.scopes.push(Scope {
            parent: Some(self.current),
            names: HashMap::new(),
        });
        debug!(scope = id.0, parent = self.current.0, "enter scope");
        self.current = id;
        id
    }

    /// Return to the parent of the current scope
    pub fn pop_scope(&mut self) {
        if let Some(parent) = self.scopes[self.current.0 as usize].parent {
            debug!(scope = self.current.0, "leave scope");
            self.current = parent;
        }
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.scopes[scope.0 as usize].parent
    }

    /// Bind `name` in `scope`
    pub fn declare(
        &mut self,
        scope: ScopeId,
        name: &str,
        span: Span,
        kind: BindingKind,
    ) -> Result<BindingId, TypeError> {
        if is_reserved(name) {
            return Err(TypeError::new(
                TypeErrorKind::ReservedIdentifier { name: name.to_string() },
                span,
            ));
        }

        let symbol = self.interner.get_or_intern(name);
        if self.scopes[scope.0 as usize].names.contains_key(&symbol) {
            return Err(TypeError::new(
                TypeErrorKind::DuplicateDeclaration { name: name.to_string() },
                span,
            ));
        }

        let id = BindingId(self.bindings.len() as u32);
        debug!(name, kind = kind.describe(), scope = scope.0, "declare");
        self.bindings.push(Binding {
            name: symbol,
            scope,
            span,
            kind,
        });
        self.scopes[scope.0 as usize].names.insert(symbol, id);
        Ok(id)
    }

    /// Find the nearest binding of `name`, starting at `scope` and walking
    /// outward
    pub fn lookup(&self, scope: ScopeId, name: &str, span: Span) -> Result<BindingId, TypeError> {
        let undeclared = || {
            TypeError::new(
                TypeErrorKind::UndeclaredIdentifier { name: name.to_string() },
                span,
            )
        };

        let symbol = self.interner.get(name).ok_or_else(&undeclared)?;
        let mut cursor = Some(scope);
        while let Some(id) = cursor {
            let frame = &self.scopes[id.0 as usize];
            if let Some(&binding) = frame.names.get(&symbol) {
                return Ok(binding);
            }
            cursor = frame.parent;
        }

        Err(undeclared())
    }

    pub fn binding(&self, id: BindingId) -> &Binding {
        &self.bindings[id.0 as usize]
    }

    pub fn binding_mut(&mut self, id: BindingId) -> &mut Binding {
        &mut self.bindings[id.0 as usize]
    }

    pub fn name(&self, id: BindingId) -> &str {
        self.interner
            .resolve(self.binding(id).name)
            .unwrap_or_default()
    }

    /// Move a variable to a new declaration state
    pub fn set_init_state(&mut self, id: BindingId, new_state: InitState) {
        let name = self.name(id).to_string();
        if let BindingKind::Variable { state, .. } = &mut self.binding_mut(id).kind {
            let old = *state;
            debug!(name = %name, from = ?old, to = ?new_state, "variable state");
            *state = new_state;
        }
    }

    /// All bindings in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (BindingId, &Binding)> {
        self.bindings
            .iter()
            .enumerate()
            .map(|(i, b)| (BindingId(i as u32), b))
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
