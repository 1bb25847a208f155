//! Expression inference.

use tern_ir::stack::ensure_sufficient_stack;
use tern_ir::{BinaryOp, ExprId, ExprKind, Name, StmtId, StmtKind, UnaryOp};

use super::Analyzer;
use crate::{ref_to_type, Type};

impl Analyzer<'_> {
    /// Infer and record the type of `id` and of everything below it.
    pub(super) fn infer(&mut self, id: ExprId) -> Option<Type> {
        if !id.is_valid() {
            return None;
        }
        let ty = ensure_sufficient_stack(|| self.infer_kind(id));
        if let Some(ty) = &ty {
            self.types.insert(id, ty.clone());
        }
        ty
    }

    fn infer_kind(&mut self, id: ExprId) -> Option<Type> {
        let tree = self.tree;
        match tree.expr_kind(id) {
            ExprKind::Int(_) => Some(self.builtins.int.clone()),
            ExprKind::Double(_) => Some(self.builtins.double.clone()),
            ExprKind::Bool(_) => Some(self.builtins.boolean.clone()),
            ExprKind::Str(_) => Some(self.builtins.string.clone()),
            ExprKind::Char(_) => Some(self.builtins.char.clone()),
            ExprKind::Null => Some(Type::Nothing.nullable()),
            ExprKind::Ident(name) => self.name_type(name),
            ExprKind::Field { receiver, name } => {
                let receiver = self.infer(receiver)?;
                self.member_type(&receiver, name)
            }
            ExprKind::Call { callee, args } => {
                let args: Vec<Option<Type>> = tree
                    .expr_list(args)
                    .iter()
                    .map(|&arg| self.infer(arg))
                    .collect();
                self.call_type(callee, &args)
            }
            ExprKind::Unary { op, operand } => {
                let operand = self.infer(operand);
                match op {
                    UnaryOp::Not => Some(self.builtins.boolean.clone()),
                    UnaryOp::Neg => operand.filter(|ty| self.builtins.is_numeric(ty)),
                }
            }
            ExprKind::Binary { op, left, right } => {
                let left = self.infer(left);
                let right = self.infer(right);
                if op.is_boolean() {
                    Some(self.builtins.boolean.clone())
                } else {
                    self.arithmetic(op, left.as_ref()?, right.as_ref()?)
                }
            }
            ExprKind::Cast { expr, ty } => {
                self.infer(expr);
                ref_to_type(tree, ty, &self.scope)
            }
            ExprKind::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.infer(cond);
                let then_ty = self.infer(then_branch);
                if else_branch.is_valid() {
                    let else_ty = self.infer(else_branch);
                    Type::join([then_ty.as_ref(), else_ty.as_ref()])
                } else {
                    Some(self.builtins.unit.clone())
                }
            }
            ExprKind::When {
                subject,
                arms,
                else_body,
            } => {
                self.infer(subject);
                let mut bodies = Vec::new();
                for arm in tree.arms(arms) {
                    for &cond in tree.expr_list(arm.conditions) {
                        self.infer(cond);
                    }
                    bodies.push(self.infer(arm.body));
                }
                if else_body.is_valid() {
                    bodies.push(self.infer(else_body));
                    Type::join(bodies.iter().map(Option::as_ref))
                } else {
                    Some(self.builtins.unit.clone())
                }
            }
            ExprKind::Block(range) => {
                self.env.push_scope();
                let mut last = Some(self.builtins.unit.clone());
                for &stmt in tree.stmt_list(range) {
                    last = self.stmt(stmt);
                }
                self.env.pop_scope();
                last
            }
            ExprKind::Assign { target, value, .. } => {
                self.infer(target);
                self.infer(value);
                Some(self.builtins.unit.clone())
            }
            ExprKind::Return(value) => {
                self.infer(value);
                Some(Type::Nothing)
            }
            ExprKind::Error => None,
        }
    }

    /// Value type of a statement in block position.
    fn stmt(&mut self, stmt: StmtId) -> Option<Type> {
        match self.tree.stmt(stmt).kind {
            StmtKind::Expr(expr) => self.infer(expr),
            StmtKind::Decl(decl) => {
                self.declaration(decl);
                Some(self.builtins.unit.clone())
            }
        }
    }

    /// Locals, then properties, then functions.
    fn name_type(&mut self, name: Name) -> Option<Type> {
        if let Some(ty) = self.env.lookup(name) {
            return ty.clone();
        }
        if let Some(ty) = self.properties.get(&name) {
            return ty.clone();
        }
        let index = *self.functions.get(&name)?;
        let params = self.signatures[index]
            .params
            .iter()
            .map(|(_, ty)| ty.clone())
            .collect::<Option<Vec<_>>>()?;
        let ret = self.return_type(index)?;
        Some(Type::Function {
            params,
            ret: Box::new(ret),
        })
    }

    fn is_value(&self, name: Name) -> bool {
        self.env.lookup(name).is_some() || self.properties.contains_key(&name)
    }

    fn call_type(&mut self, callee: ExprId, args: &[Option<Type>]) -> Option<Type> {
        match self.tree.expr_kind(callee) {
            ExprKind::Ident(name) if !self.is_value(name) => {
                if name == self.builtins.list_of || name == self.builtins.mutable_list_of {
                    if args.is_empty() {
                        return None;
                    }
                    let element = Type::join(args.iter().map(Option::as_ref))?;
                    if element.is_nothing() {
                        return None;
                    }
                    return Some(if name == self.builtins.list_of {
                        self.builtins.list_type(element)
                    } else {
                        self.builtins.mutable_list_type(element)
                    });
                }
                if let Some(&index) = self.functions.get(&name) {
                    return self.return_type(index);
                }
                if name == self.builtins.println {
                    return Some(self.builtins.unit.clone());
                }
                None
            }
            ExprKind::Field { receiver, name } => {
                self.infer(receiver);
                (name == self.builtins.to_string).then(|| self.builtins.string.clone())
            }
            _ => match self.infer(callee)? {
                Type::Function { ret, .. } => Some(*ret),
                _ => None,
            },
        }
    }

    fn member_type(&self, receiver: &Type, name: Name) -> Option<Type> {
        if name == self.builtins.size && self.builtins.is_list(receiver) && !receiver.is_nullable()
        {
            return Some(self.builtins.int.clone());
        }
        if name == self.builtins.length && *receiver == self.builtins.string {
            return Some(self.builtins.int.clone());
        }
        None
    }

    fn arithmetic(&self, op: BinaryOp, left: &Type, right: &Type) -> Option<Type> {
        let builtins = &self.builtins;
        if op == BinaryOp::Add && *left == builtins.string {
            return Some(builtins.string.clone());
        }
        if !builtins.is_numeric(left) || !builtins.is_numeric(right) {
            return None;
        }
        if *left == builtins.double || *right == builtins.double {
            Some(builtins.double.clone())
        } else {
            Some(builtins.int.clone())
        }
    }
}
