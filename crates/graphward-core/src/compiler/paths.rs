//! Traversal state for condition-tree descent.

use crate::error::{CompileError, CompileResult};
use crate::plan::{MatchFragment, NodeBinding, PathPattern, PathStep};
use crate::schema::{Association, EntityDef};

/// Assigns plan variables to association chains.
///
/// Variables derive from the target type name. The same chain always maps to
/// the same variable, so fragments reached from different rules deduplicate
/// and shared prefixes unify; a distinct chain that would collide on the
/// derived name gets a numeric suffix instead.
#[derive(Debug)]
pub(crate) struct VarAllocator {
    assigned: Vec<(Vec<String>, String)>,
}

impl VarAllocator {
    /// Creates an allocator with the root variable reserved.
    pub(crate) fn new(root_var: impl Into<String>) -> Self {
        Self {
            assigned: vec![(Vec::new(), root_var.into())],
        }
    }

    /// The variable for a chain of association names from the root.
    pub(crate) fn var_for(&mut self, chain: &[String], base: &str) -> String {
        if let Some((_, var)) = self.assigned.iter().find(|(c, _)| c.as_slice() == chain) {
            return var.clone();
        }
        let var = self.unique(base);
        self.assigned.push((chain.to_vec(), var.clone()));
        var
    }

    fn unique(&self, base: &str) -> String {
        if !self.taken(base) {
            return base.to_string();
        }
        let mut suffix = 2;
        loop {
            let candidate = format!("{}_{}", base, suffix);
            if !self.taken(&candidate) {
                return candidate;
            }
            suffix += 1;
        }
    }

    fn taken(&self, var: &str) -> bool {
        self.assigned.iter().any(|(_, v)| v == var)
    }
}

/// Current position during condition-tree descent: the entity, its bound
/// variable, the association chain and steps walked from the root, and the
/// depth already consumed.
#[derive(Debug)]
pub(crate) struct PathScope<'s> {
    pub(crate) entity: &'s EntityDef,
    pub(crate) var: String,
    chain: Vec<String>,
    steps: Vec<PathStep>,
    depth: u32,
}

impl<'s> PathScope<'s> {
    /// The scope at the root entity, before any traversal.
    pub(crate) fn root(entity: &'s EntityDef, var: String) -> Self {
        Self {
            entity,
            var,
            chain: Vec::new(),
            steps: Vec::new(),
            depth: 0,
        }
    }

    /// Descends one association: allocates the target variable and extends
    /// the walked path. Fails once the depth limit is consumed.
    pub(crate) fn descend(
        &self,
        association: &Association,
        target: &'s EntityDef,
        vars: &mut VarAllocator,
        max_depth: u32,
    ) -> CompileResult<PathScope<'s>> {
        if self.depth >= max_depth {
            return Err(CompileError::DepthLimitExceeded { max_depth });
        }

        let mut chain = self.chain.clone();
        chain.push(association.name.clone());
        let var = vars.var_for(&chain, &target.var_name());

        let mut steps = self.steps.clone();
        steps.push(PathStep::to_node(
            association.direction,
            association.rel_label.as_str(),
            NodeBinding::new(var.clone(), target.label.clone()),
        ));

        Ok(PathScope {
            entity: target,
            var,
            chain,
            steps,
            depth: self.depth + 1,
        })
    }

    /// The walked path as a match fragment ending at the current binding.
    pub(crate) fn fragment(&self, root: &NodeBinding) -> MatchFragment {
        MatchFragment {
            root: root.clone(),
            steps: self.steps.clone(),
        }
    }

    /// The walked path as a match fragment with the terminal left anonymous.
    pub(crate) fn fragment_anonymous(&self, root: &NodeBinding) -> MatchFragment {
        let mut steps = self.steps.clone();
        if let Some(last) = steps.last_mut() {
            last.node = None;
        }
        MatchFragment {
            root: root.clone(),
            steps,
        }
    }

    /// A single anonymous step from the current binding, used for
    /// relationship non-existence tests.
    pub(crate) fn absence_pattern(&self, association: &Association) -> PathPattern {
        PathPattern {
            anchor: self.var.clone(),
            steps: vec![PathStep::anonymous(
                association.direction,
                association.rel_label.as_str(),
            )],
        }
    }
}
