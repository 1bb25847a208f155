//! Uniform view of the two conditional shapes.

use smallvec::SmallVec;
use tern_ir::{ExprId, ExprKind, SyntaxTree};

use crate::kind::Shape;
use crate::Precondition;

/// Branch bodies in source order.
pub type Bodies = SmallVec<[ExprId; 4]>;

/// An `if` or `when` whose every control path produces a value.
///
/// The catch-all of each shape is a required field, so a view over a
/// conditional without one cannot be built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BranchedExpr {
    If {
        id: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    },
    When {
        id: ExprId,
        arms: Bodies,
        catch_all: ExprId,
    },
}

impl BranchedExpr {
    /// View `id` as an eligible conditional.
    pub fn of(tree: &SyntaxTree, id: ExprId) -> Result<Self, Precondition> {
        if !tree.contains_expr(id) {
            return Err(Precondition::NotBranched);
        }
        match tree.expr_kind(id) {
            ExprKind::If {
                then_branch,
                else_branch,
                ..
            } => {
                if !else_branch.is_valid() {
                    return Err(Precondition::MissingCatchAll);
                }
                Ok(BranchedExpr::If {
                    id,
                    then_branch,
                    else_branch,
                })
            }
            ExprKind::When {
                arms, else_body, ..
            } => {
                if !else_body.is_valid() {
                    return Err(Precondition::MissingCatchAll);
                }
                Ok(BranchedExpr::When {
                    id,
                    arms: tree.arms(arms).iter().map(|arm| arm.body).collect(),
                    catch_all: else_body,
                })
            }
            _ => Err(Precondition::NotBranched),
        }
    }

    pub fn id(&self) -> ExprId {
        match self {
            BranchedExpr::If { id, .. } | BranchedExpr::When { id, .. } => *id,
        }
    }

    pub fn shape(&self) -> Shape {
        match self {
            BranchedExpr::If { .. } => Shape::If,
            BranchedExpr::When { .. } => Shape::When,
        }
    }

    /// Every branch body, catch-all last.
    pub fn bodies(&self) -> Bodies {
        match self {
            BranchedExpr::If {
                then_branch,
                else_branch,
                ..
            } => SmallVec::from_slice(&[*then_branch, *else_branch]),
            BranchedExpr::When {
                arms, catch_all, ..
            } => {
                let mut bodies = arms.clone();
                bodies.push(*catch_all);
                bodies
            }
        }
    }
}
